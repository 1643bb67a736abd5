use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// A record that a named quantity took a value on a date, and why.
///
/// Evaluations are appended to the log in processing order and never
/// modified afterwards. Several evaluations may share a name and date; the
/// position in the log disambiguates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub name: String,
    pub date: Date,
    pub value: f64,
    /// Name of the income, expense, asset, transaction or tax liability
    /// that caused this change
    pub source: String,
}

impl Evaluation {
    pub fn new(name: &str, date: Date, value: f64, source: &str) -> Self {
        Self {
            name: name.to_string(),
            date,
            value,
            source: source.to_string(),
        }
    }
}
