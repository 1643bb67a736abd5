//! Transaction Builder DSL
//!
//! The behaviour of a transaction follows from its name, as it does for
//! models loaded from disk: `Revalue...`, `Conditional...`, `Pension...`
//! and `PensionSS...` prefixes select the special kinds.
//!
//! ```ignore
//! use finproj_core::config::TransactionBuilder;
//!
//! // Move 10% of savings into cash every month
//! let draw = TransactionBuilder::new("Draw")
//!     .from_proportion("Savings", 0.1)
//!     .to_proportion("Cash", 1.0)
//!     .date("2020-01-01")
//!     .recurrence("1m");
//!
//! // Keep the mortgage paid off from cash
//! let pay = TransactionBuilder::new("ConditionalPayMortgage")
//!     .from_absolute("Cash", 500.0)
//!     .to_proportion("Mortgage", 1.0)
//!     .date("2018-01-01")
//!     .recurrence("1m");
//! ```

use crate::model::Transaction;

#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    pub(crate) transaction: Transaction,
}

impl TransactionBuilder {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            transaction: Transaction {
                name: name.into(),
                ..Default::default()
            },
        }
    }

    // =========================================================================
    // FROM side
    // =========================================================================

    /// Take a fixed amount from `from`
    #[must_use]
    pub fn from_absolute(self, from: impl Into<String>, amount: f64) -> Self {
        self.from_value(from, amount.to_string(), true)
    }

    /// Take a proportion of the value of `from`
    #[must_use]
    pub fn from_proportion(self, from: impl Into<String>, proportion: f64) -> Self {
        self.from_value(from, proportion.to_string(), false)
    }

    /// FROM side with raw value text, which may name a setting
    #[must_use]
    pub fn from_value(
        mut self,
        from: impl Into<String>,
        value: impl Into<String>,
        absolute: bool,
    ) -> Self {
        self.transaction.from = from.into();
        self.transaction.from_value = value.into();
        self.transaction.from_absolute = absolute;
        self
    }

    // =========================================================================
    // TO side
    // =========================================================================

    /// Add a fixed amount to `to`
    #[must_use]
    pub fn to_absolute(self, to: impl Into<String>, amount: f64) -> Self {
        self.to_value(to, amount.to_string(), true)
    }

    /// Add a multiple of whatever left the FROM side
    #[must_use]
    pub fn to_proportion(self, to: impl Into<String>, proportion: f64) -> Self {
        self.to_value(to, proportion.to_string(), false)
    }

    #[must_use]
    pub fn to_value(mut self, to: impl Into<String>, value: impl Into<String>, absolute: bool) -> Self {
        self.transaction.to = to.into();
        self.transaction.to_value = value.into();
        self.transaction.to_absolute = absolute;
        self
    }

    // =========================================================================
    // Timing
    // =========================================================================

    #[must_use]
    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.transaction.date = date.into();
        self
    }

    #[must_use]
    pub fn stop_date(mut self, date: impl Into<String>) -> Self {
        self.transaction.stop_date = date.into();
        self
    }

    /// `1m`, `6m`, `1y`...
    #[must_use]
    pub fn recurrence(mut self, recurrence: impl Into<String>) -> Self {
        self.transaction.recurrence = recurrence.into();
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.transaction.category = category.into();
        self
    }

    #[must_use]
    pub fn build(self) -> Transaction {
        self.transaction
    }
}
