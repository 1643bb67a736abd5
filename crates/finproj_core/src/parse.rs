//! Turning model text into numbers, flags, dates and recurrences
//!
//! The engine only ever sees the results of these helpers; validation runs
//! them over the whole model first so a simulation never meets bad text.

use jiff::ToSpan;
use jiff::civil::Date;

use crate::error::ParseError;
use crate::model::{Liability, LiabilityKind, Setting, TransactionValue, Trigger};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecurrenceUnit {
    Month,
    Year,
}

/// How often a transaction repeats, e.g. `2y` is every two years
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recurrence {
    pub count: u32,
    pub unit: RecurrenceUnit,
}

impl Recurrence {
    /// The `n`th occurrence after `start`, computed from `start` so month-end
    /// clamping never accumulates
    pub fn nth_after(&self, start: Date, n: i64) -> Option<Date> {
        let steps = n * i64::from(self.count);
        let span = match self.unit {
            RecurrenceUnit::Month => steps.months(),
            RecurrenceUnit::Year => steps.years(),
        };
        start.checked_add(span).ok()
    }
}

/// Parse a plain number, allowing thousands separators
pub fn parse_number(text: &str) -> Result<f64, ParseError> {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ParseError::InvalidNumber(text.to_string()))
}

/// Annual growth in percent: a literal (optionally ending in `%`) or the
/// name of a setting whose value is such a literal
pub fn parse_growth(text: &str, settings: &[Setting]) -> Result<f64, ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    let literal = trimmed.strip_suffix('%').unwrap_or(trimmed);
    if let Ok(value) = parse_number(literal) {
        return Ok(value);
    }
    let setting = settings
        .iter()
        .find(|s| s.name == trimmed)
        .ok_or_else(|| ParseError::MissingSetting(trimmed.to_string()))?;
    let value = setting.value.trim();
    parse_number(value.strip_suffix('%').unwrap_or(value))
}

pub fn parse_flag(text: &str) -> Result<bool, ParseError> {
    match text.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "t" | "true" => Ok(true),
        "n" | "no" | "f" | "false" | "" => Ok(false),
        _ => Err(ParseError::InvalidFlag(text.to_string())),
    }
}

/// A literal date (`2018-01-31`, `Jan 31 2018`), a trigger name, or a
/// trigger name with an offset (`Retire+6m`, `Retire-1y`)
pub fn resolve_date(text: &str, triggers: &[Trigger]) -> Result<Date, ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseError::InvalidDate(text.to_string()));
    }
    if let Some(date) = literal_date(trimmed) {
        return Ok(date);
    }
    if let Some(trigger) = triggers.iter().find(|t| t.name == trimmed) {
        return Ok(trigger.date);
    }

    let Some(split) = trimmed.rfind(['+', '-']).filter(|i| *i > 0) else {
        return Err(ParseError::UnknownTrigger(text.to_string()));
    };
    let (base, offset) = trimmed.split_at(split);
    let base = base.trim();
    let anchor = literal_date(base)
        .or_else(|| triggers.iter().find(|t| t.name == base).map(|t| t.date))
        .ok_or_else(|| ParseError::UnknownTrigger(text.to_string()))?;
    let span = parse_offset(offset).ok_or_else(|| ParseError::InvalidDate(text.to_string()))?;
    anchor
        .checked_add(span)
        .map_err(|_| ParseError::InvalidDate(text.to_string()))
}

fn literal_date(text: &str) -> Option<Date> {
    if let Ok(date) = text.parse::<Date>() {
        return Some(date);
    }
    ["%b %d %Y", "%B %d %Y", "%d %b %Y", "%d %B %Y"]
        .iter()
        .find_map(|format| Date::strptime(format, text).ok())
}

/// `+6m`, `-1y`, `+10d`
fn parse_offset(text: &str) -> Option<jiff::Span> {
    let (sign, rest) = match text.split_at(1) {
        ("+", rest) => (1, rest),
        ("-", rest) => (-1, rest),
        _ => return None,
    };
    let rest = rest.trim();
    let unit = rest.chars().last()?;
    let count: i64 = rest[..rest.len() - unit.len_utf8()].trim().parse().ok()?;
    let count = sign * count;
    match unit {
        'd' => Some(count.days()),
        'm' => Some(count.months()),
        'y' => Some(count.years()),
        _ => None,
    }
}

/// `1m`, `3m`, `2y`
pub fn parse_recurrence(text: &str) -> Result<Recurrence, ParseError> {
    let trimmed = text.trim();
    let invalid = || ParseError::InvalidRecurrence(text.to_string());
    let unit = match trimmed.chars().last().ok_or_else(invalid)? {
        'm' => RecurrenceUnit::Month,
        'y' => RecurrenceUnit::Year,
        _ => return Err(invalid()),
    };
    let count: u32 = trimmed[..trimmed.len() - 1]
        .trim()
        .parse()
        .map_err(|_| invalid())?;
    if count == 0 {
        return Err(invalid());
    }
    Ok(Recurrence { count, unit })
}

/// A transaction amount: number, percentage (`50%` is 0.5), or setting name
pub fn parse_value(text: &str) -> Result<TransactionValue, ParseError> {
    let trimmed = text.trim();
    if let Some(percent) = trimmed.strip_suffix('%') {
        return parse_number(percent).map(|v| TransactionValue::Literal(v / 100.0));
    }
    if let Ok(value) = parse_number(trimmed) {
        return Ok(TransactionValue::Literal(value));
    }
    if trimmed.is_empty() || trimmed.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(ParseError::InvalidNumber(text.to_string()));
    }
    Ok(TransactionValue::Setting(trimmed.to_string()))
}

/// `Joe(incomeTax)/Joe(NI)`; empty text means no liabilities
pub fn parse_liabilities(text: &str) -> Result<Vec<Liability>, ParseError> {
    text.split('/')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            let invalid = || ParseError::InvalidLiability(part.to_string());
            let (person, rest) = part.split_once('(').ok_or_else(invalid)?;
            let tag = rest.strip_suffix(')').ok_or_else(invalid)?;
            let kind = LiabilityKind::from_tag(tag.trim()).ok_or_else(invalid)?;
            let person = person.trim();
            if person.is_empty() {
                return Err(invalid());
            }
            Ok(Liability::new(person, kind))
        })
        .collect()
}
