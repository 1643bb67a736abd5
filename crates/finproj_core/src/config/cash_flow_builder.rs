//! Income and Expense Builder DSL
//!
//! Incomes and expenses share every field apart from liabilities, so one
//! builder covers both.
//!
//! ```ignore
//! use finproj_core::config::CashFlowBuilder;
//!
//! let salary = CashFlowBuilder::income("Salary")
//!     .start("2018-01-01")
//!     .end("Retire")
//!     .value(3_000.0)
//!     .growth("2")
//!     .liability("Joe(incomeTax)/Joe(NI)");
//! ```

use crate::model::{Expense, Income};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CashFlowKind {
    Income,
    Expense,
}

/// Builder for a monthly income or expense
#[derive(Debug, Clone)]
pub struct CashFlowBuilder {
    pub(crate) kind: CashFlowKind,
    name: String,
    category: String,
    start: String,
    end: String,
    value: f64,
    value_set_date: String,
    growth: String,
    cpi_immune: bool,
    liability: String,
}

impl CashFlowBuilder {
    fn new(kind: CashFlowKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            category: String::new(),
            start: String::new(),
            end: String::new(),
            value: 0.0,
            value_set_date: String::new(),
            growth: "0".to_string(),
            cpi_immune: false,
            liability: String::new(),
        }
    }

    #[must_use]
    pub fn income(name: impl Into<String>) -> Self {
        Self::new(CashFlowKind::Income, name)
    }

    #[must_use]
    pub fn expense(name: impl Into<String>) -> Self {
        Self::new(CashFlowKind::Expense, name)
    }

    // =========================================================================
    // Timing
    // =========================================================================

    #[must_use]
    pub fn start(mut self, date: impl Into<String>) -> Self {
        self.start = date.into();
        self
    }

    #[must_use]
    pub fn end(mut self, date: impl Into<String>) -> Self {
        self.end = date.into();
        self
    }

    /// Date on which the monthly value was true, if not the start date
    #[must_use]
    pub fn value_set_date(mut self, date: impl Into<String>) -> Self {
        self.value_set_date = date.into();
        self
    }

    // =========================================================================
    // Amount
    // =========================================================================

    /// Monthly amount
    #[must_use]
    pub fn value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    #[must_use]
    pub fn growth(mut self, growth: impl Into<String>) -> Self {
        self.growth = growth.into();
        self
    }

    #[must_use]
    pub fn cpi_immune(mut self) -> Self {
        self.cpi_immune = true;
        self
    }

    // =========================================================================
    // Classification
    // =========================================================================

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Ignored for expenses
    #[must_use]
    pub fn liability(mut self, liability: impl Into<String>) -> Self {
        self.liability = liability.into();
        self
    }

    pub(crate) fn into_income(self) -> Income {
        Income {
            name: self.name,
            category: self.category,
            start: self.start,
            end: self.end,
            value: self.value,
            value_set_date: self.value_set_date,
            growth: self.growth,
            cpi_immune: self.cpi_immune,
            liability: self.liability,
        }
    }

    pub(crate) fn into_expense(self) -> Expense {
        Expense {
            name: self.name,
            category: self.category,
            start: self.start,
            end: self.end,
            value: self.value,
            value_set_date: self.value_set_date,
            growth: self.growth,
            cpi_immune: self.cpi_immune,
        }
    }
}
