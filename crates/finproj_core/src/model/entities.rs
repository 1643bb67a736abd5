//! The declarative model
//!
//! These are the caller-owned definitions the engine reads but never
//! mutates. Dates, growth rates and transaction values are kept as text and
//! resolved by the helpers in [`crate::parse`] when a run is prepared, so a
//! date may name a trigger and a growth rate may name a setting.

use jiff::civil::Date;
use serde::{Deserialize, Deserializer, Serialize};

/// A named date other definitions may refer to instead of a literal date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    pub name: String,
    pub date: Date,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub start: String,
    pub value: f64,
    /// Annual growth as a percentage, or the name of a setting holding one
    #[serde(default = "default_growth")]
    pub growth: String,
    /// `/`-separated liability tags, e.g. `Joe(CGT)`
    #[serde(default)]
    pub liability: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_price: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub cpi_immune: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Income {
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub start: String,
    pub end: String,
    pub value: f64,
    /// Date on which `value` was true; defaults to `start`
    #[serde(default)]
    pub value_set_date: String,
    #[serde(default = "default_growth")]
    pub growth: String,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub cpi_immune: bool,
    #[serde(default)]
    pub liability: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub start: String,
    pub end: String,
    pub value: f64,
    #[serde(default)]
    pub value_set_date: String,
    #[serde(default = "default_growth")]
    pub growth: String,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub cpi_immune: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub name: String,
    #[serde(default)]
    pub from: String,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub from_absolute: bool,
    #[serde(default)]
    pub from_value: String,
    #[serde(default)]
    pub to: String,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub to_absolute: bool,
    #[serde(default)]
    pub to_value: String,
    pub date: String,
    #[serde(default)]
    pub stop_date: String,
    /// Count and unit, e.g. `1m` or `2y`; empty for a one-off
    #[serde(default)]
    pub recurrence: String,
    #[serde(default)]
    pub category: String,
}

/// A named scalar, used both as configuration and as a growth indirection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Setting {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub hint: String,
}

/// Complete model of one person's (or household's) finances
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelData {
    #[serde(default)]
    pub triggers: Vec<Trigger>,
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(default)]
    pub incomes: Vec<Income>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub settings: Vec<Setting>,
}

impl ModelData {
    pub fn asset(&self, name: &str) -> Option<&Asset> {
        self.assets.iter().find(|a| a.name == name)
    }

    pub fn income(&self, name: &str) -> Option<&Income> {
        self.incomes.iter().find(|i| i.name == name)
    }

    pub fn expense(&self, name: &str) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.name == name)
    }

    pub fn transaction(&self, name: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.name == name)
    }

    pub fn setting(&self, name: &str) -> Option<&Setting> {
        self.settings.iter().find(|s| s.name == name)
    }

    pub fn is_asset(&self, name: &str) -> bool {
        self.asset(name).is_some()
    }

    pub fn is_income(&self, name: &str) -> bool {
        self.income(name).is_some()
    }

    pub fn is_expense(&self, name: &str) -> bool {
        self.expense(name).is_some()
    }

    pub fn is_setting(&self, name: &str) -> bool {
        self.setting(name).is_some()
    }

    /// Category of any named definition, if it has a non-empty one
    pub fn category_of(&self, name: &str) -> Option<&str> {
        let category = self
            .asset(name)
            .map(|a| a.category.as_str())
            .or_else(|| self.income(name).map(|i| i.category.as_str()))
            .or_else(|| self.expense(name).map(|e| e.category.as_str()))
            .or_else(|| self.transaction(name).map(|t| t.category.as_str()))?;
        if category.is_empty() {
            None
        } else {
            Some(category)
        }
    }
}

fn default_growth() -> String {
    "0".to_string()
}

/// Accept either a YAML/JSON boolean or a `Y`/`N` style string
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => Ok(b),
        Flag::Text(text) => crate::parse::parse_flag(&text).map_err(serde::de::Error::custom),
    }
}
