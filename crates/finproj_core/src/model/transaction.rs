//! Transactions prepared for a simulation run
//!
//! The model stores a transaction's behaviour implicitly in its name
//! (`Revalue...`, `Conditional...`, `Pension...`). A run classifies each
//! transaction once into a [`TransactionKind`] and parses its values, so
//! processing never has to look at name prefixes again.

use jiff::civil::Date;

use super::entities::Transaction;
use super::names::{
    CASH, CONDITIONAL_PREFIX, CRYSTALLIZED_PENSION_PREFIX, PENSION_PREFIX, REVALUE_PREFIX,
    SALARY_SACRIFICE_PREFIX,
};
use crate::error::ParseError;
use crate::parse::{Recurrence, parse_recurrence, parse_value, resolve_date};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    /// Set one or more targets directly
    Revalue,
    /// Only fires while the target is negative, topping it up towards zero
    Conditional,
    /// Diverts part of an income into a pension as it is paid
    PensionContribution,
    /// A pension contribution that is also exempt from National Insurance
    SalarySacrifice,
    /// Moves crystallized pension into cash as taxable income
    PensionDrawdown,
    /// Plain transfer between assets, or a one-sided addition/removal
    Transfer,
}

impl TransactionKind {
    pub fn classify(transaction: &Transaction) -> Self {
        let name = transaction.name.as_str();
        if name.starts_with(REVALUE_PREFIX) {
            TransactionKind::Revalue
        } else if name.starts_with(CONDITIONAL_PREFIX) {
            TransactionKind::Conditional
        } else if name.starts_with(SALARY_SACRIFICE_PREFIX) {
            TransactionKind::SalarySacrifice
        } else if name.starts_with(PENSION_PREFIX) {
            TransactionKind::PensionContribution
        } else if transaction.from.starts_with(CRYSTALLIZED_PENSION_PREFIX) && transaction.to == CASH
        {
            TransactionKind::PensionDrawdown
        } else {
            TransactionKind::Transfer
        }
    }

    /// Pension contributions are consulted while paying incomes and never
    /// scheduled on their own.
    pub fn is_pension_contribution(&self) -> bool {
        matches!(
            self,
            TransactionKind::PensionContribution | TransactionKind::SalarySacrifice
        )
    }
}

/// A FROM or TO amount: a literal or a reference to a setting
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionValue {
    Literal(f64),
    Setting(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreparedTransaction {
    pub name: String,
    pub kind: TransactionKind,
    pub from: String,
    pub from_absolute: bool,
    pub from_value: TransactionValue,
    /// Revaluations may name several `/`-separated targets
    pub to: Vec<String>,
    pub to_absolute: bool,
    pub to_value: TransactionValue,
    pub date: Date,
    pub stop_date: Option<Date>,
    pub recurrence: Option<Recurrence>,
}

impl PreparedTransaction {
    pub fn prepare(
        transaction: &Transaction,
        triggers: &[super::entities::Trigger],
    ) -> Result<Self, ParseError> {
        let kind = TransactionKind::classify(transaction);
        let stop_date = if transaction.stop_date.trim().is_empty() {
            None
        } else {
            Some(resolve_date(&transaction.stop_date, triggers)?)
        };
        let recurrence = if transaction.recurrence.trim().is_empty() {
            None
        } else {
            Some(parse_recurrence(&transaction.recurrence)?)
        };
        let to = if transaction.to.is_empty() {
            Vec::new()
        } else if kind == TransactionKind::Revalue {
            transaction.to.split('/').map(|s| s.trim().to_string()).collect()
        } else {
            vec![transaction.to.clone()]
        };

        Ok(Self {
            name: transaction.name.clone(),
            kind,
            from: transaction.from.clone(),
            from_absolute: transaction.from_absolute,
            from_value: parse_value_or_zero(&transaction.from_value)?,
            to,
            to_absolute: transaction.to_absolute,
            to_value: parse_value_or_zero(&transaction.to_value)?,
            date: resolve_date(&transaction.date, triggers)?,
            stop_date,
            recurrence,
        })
    }

    /// Whether the transaction applies on `date` (used for pension
    /// contributions, which have no moments of their own)
    pub fn is_active_on(&self, date: Date) -> bool {
        self.date <= date && self.stop_date.is_none_or(|stop| date < stop)
    }

    /// Name used as the source of FROM-side evaluations
    pub fn from_source(&self) -> &str {
        self.name
            .strip_prefix(CONDITIONAL_PREFIX)
            .unwrap_or(&self.name)
    }

    /// Name used as the source of TO-side evaluations
    pub fn to_source(&self) -> &str {
        if self.kind == TransactionKind::Conditional && !self.from.is_empty() {
            &self.from
        } else {
            &self.name
        }
    }

    pub fn single_target(&self) -> Option<&str> {
        self.to.first().map(String::as_str)
    }
}

fn parse_value_or_zero(text: &str) -> Result<TransactionValue, ParseError> {
    if text.trim().is_empty() {
        Ok(TransactionValue::Literal(0.0))
    } else {
        parse_value(text)
    }
}
