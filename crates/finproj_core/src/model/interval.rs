use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::entities::ModelData;
use super::names::{VIEW_END_SETTING, VIEW_START_SETTING};
use crate::error::ParseError;
use crate::parse::resolve_date;

/// The region of interest: moments are generated up to (not including)
/// `end`, and charts cover `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewInterval {
    pub start: Date,
    pub end: Date,
}

impl ViewInterval {
    pub fn new(start: Date, end: Date) -> Self {
        Self { start, end }
    }

    /// Resolve the interval from the model's view range settings
    pub fn from_model(model: &ModelData) -> Result<Self, ParseError> {
        let start = setting_date(model, VIEW_START_SETTING)?;
        let end = setting_date(model, VIEW_END_SETTING)?;
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date < self.end
    }
}

fn setting_date(model: &ModelData, name: &str) -> Result<Date, ParseError> {
    let setting = model
        .setting(name)
        .ok_or_else(|| ParseError::MissingSetting(name.to_string()))?;
    resolve_date(&setting.value, &model.triggers)
}
