//! How an evaluation log is to be charted

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::model::{ModelData, VIEW_DETAIL_SETTING, VIEW_FREQUENCY_SETTING};

/// Whether series are per item or folded into categories
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Detail {
    #[default]
    Coarse,
    Fine,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    Monthly,
    #[default]
    Annually,
}

/// What an asset chart plots
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetView {
    /// The asset's value at the end of each bucket
    #[default]
    Value,
    /// Only increases, keyed by what caused them
    Additions,
    /// Only decreases, keyed by what caused them
    Reductions,
    /// Increases and decreases together
    Delta,
}

/// Restricts a chart to one item or one category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Focus {
    #[default]
    All,
    Item(String),
    Category(String),
}

impl Focus {
    /// A name matching any category in the model focuses on that category,
    /// anything else on a single item
    pub fn resolve(name: &str, model: &ModelData) -> Self {
        let is_category = model
            .assets
            .iter()
            .map(|a| a.category.as_str())
            .chain(model.incomes.iter().map(|i| i.category.as_str()))
            .chain(model.expenses.iter().map(|e| e.category.as_str()))
            .any(|c| !c.is_empty() && c == name);
        if is_category {
            Focus::Category(name.to_string())
        } else {
            Focus::Item(name.to_string())
        }
    }

    pub fn admits(&self, name: &str, model: &ModelData) -> bool {
        match self {
            Focus::All => true,
            Focus::Item(item) => item == name,
            Focus::Category(category) => model.category_of(name) == Some(category.as_str()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewSettings {
    pub detail: Detail,
    pub frequency: Frequency,
    pub income_focus: Focus,
    pub expense_focus: Focus,
    pub asset_focus: Focus,
    pub asset_view: AssetView,
}

impl ViewSettings {
    /// Defaults overridden by the model's view settings where they are
    /// present and recognised
    pub fn from_model(model: &ModelData) -> Self {
        let mut settings = Self::default();
        if let Some(frequency) = model
            .setting(VIEW_FREQUENCY_SETTING)
            .and_then(|s| s.value.parse().ok())
        {
            settings.frequency = frequency;
        }
        if let Some(detail) = model
            .setting(VIEW_DETAIL_SETTING)
            .and_then(|s| s.value.parse().ok())
        {
            settings.detail = detail;
        }
        settings
    }

    #[must_use]
    pub fn detail(mut self, detail: Detail) -> Self {
        self.detail = detail;
        self
    }

    #[must_use]
    pub fn frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    #[must_use]
    pub fn income_focus(mut self, focus: Focus) -> Self {
        self.income_focus = focus;
        self
    }

    #[must_use]
    pub fn expense_focus(mut self, focus: Focus) -> Self {
        self.expense_focus = focus;
        self
    }

    #[must_use]
    pub fn asset_focus(mut self, focus: Focus) -> Self {
        self.asset_focus = focus;
        self
    }

    #[must_use]
    pub fn asset_view(mut self, view: AssetView) -> Self {
        self.asset_view = view;
        self
    }
}

// ============================================================================
// Text forms, shared by model settings and the command line
// ============================================================================

impl FromStr for Detail {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "coarse" => Ok(Detail::Coarse),
            "fine" => Ok(Detail::Fine),
            _ => Err(ParseError::InvalidViewSetting(s.to_string())),
        }
    }
}

impl FromStr for Frequency {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" | "month" | "m" => Ok(Frequency::Monthly),
            "annually" | "annual" | "yearly" | "year" | "y" => Ok(Frequency::Annually),
            _ => Err(ParseError::InvalidViewSetting(s.to_string())),
        }
    }
}

impl FromStr for AssetView {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "value" | "val" => Ok(AssetView::Value),
            "additions" | "add" => Ok(AssetView::Additions),
            "reductions" | "reduce" => Ok(AssetView::Reductions),
            "delta" => Ok(AssetView::Delta),
            _ => Err(ParseError::InvalidViewSetting(s.to_string())),
        }
    }
}

impl fmt::Display for AssetView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            AssetView::Value => "value",
            AssetView::Additions => "additions",
            AssetView::Reductions => "reductions",
            AssetView::Delta => "delta",
        };
        f.write_str(text)
    }
}
