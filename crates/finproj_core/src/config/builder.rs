//! Model Builder
//!
//! Fluent construction of a [`ModelData`], mainly for tests, benchmarks and
//! programmatic callers. Everything is stored as the same text a model file
//! would hold, so a built model goes through exactly the same parsing and
//! validation as a loaded one.
//!
//! # Example
//!
//! ```ignore
//! use finproj_core::config::{AssetBuilder, CashFlowBuilder, ModelBuilder, TransactionBuilder};
//!
//! let (model, roi) = ModelBuilder::new()
//!     .view_range("2018-01-01", "2040-01-01")
//!     .setting("cpi", "2.5")
//!     .trigger("Retire", jiff::civil::date(2035, 6, 1))
//!
//!     .asset(AssetBuilder::new("Cash").start("2018-01-01").value(5_000.0))
//!     .asset(AssetBuilder::new("Stocks").start("2018-01-01").value(20_000.0).growth("5"))
//!
//!     .income(CashFlowBuilder::income("Salary")
//!         .start("2018-01-01")
//!         .end("Retire")
//!         .value(3_000.0)
//!         .liability("Joe(incomeTax)/Joe(NI)"))
//!     .expense(CashFlowBuilder::expense("Living")
//!         .start("2018-01-01")
//!         .end("2040-01-01")
//!         .value(1_800.0))
//!
//!     .transaction(TransactionBuilder::new("Invest")
//!         .from_absolute("Cash", 500.0)
//!         .to_proportion("Stocks", 1.0)
//!         .date("2018-02-01")
//!         .recurrence("1m"))
//!     .build_with_interval()?;
//! ```

use jiff::civil::Date;

use super::asset_builder::AssetBuilder;
use super::cash_flow_builder::{CashFlowBuilder, CashFlowKind};
use super::transaction_builder::TransactionBuilder;
use crate::error::ParseError;
use crate::model::{
    ModelData, Setting, Trigger, VIEW_END_SETTING, VIEW_START_SETTING, ViewInterval,
};

/// Builder for a complete model
#[derive(Debug, Clone, Default)]
pub struct ModelBuilder {
    model: ModelData,
}

impl ModelBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing model, e.g. to derive a variant of it
    #[must_use]
    pub fn from_model(model: ModelData) -> Self {
        Self { model }
    }

    // =========================================================================
    // Settings and triggers
    // =========================================================================

    /// Add a setting, replacing any existing one with the same name
    #[must_use]
    pub fn setting(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.model.settings.iter_mut().find(|s| s.name == name) {
            Some(existing) => existing.value = value,
            None => self.model.settings.push(Setting {
                name,
                value,
                hint: String::new(),
            }),
        }
        self
    }

    #[must_use]
    pub fn trigger(mut self, name: impl Into<String>, date: Date) -> Self {
        self.model.triggers.push(Trigger {
            name: name.into(),
            date,
        });
        self
    }

    /// Set the viewing interval settings
    #[must_use]
    pub fn view_range(self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.setting(VIEW_START_SETTING, start)
            .setting(VIEW_END_SETTING, end)
    }

    // =========================================================================
    // Items
    // =========================================================================

    #[must_use]
    pub fn asset(mut self, asset: AssetBuilder) -> Self {
        self.model.assets.push(asset.build());
        self
    }

    #[must_use]
    pub fn income(mut self, income: CashFlowBuilder) -> Self {
        self.push_cash_flow(income);
        self
    }

    #[must_use]
    pub fn expense(mut self, expense: CashFlowBuilder) -> Self {
        self.push_cash_flow(expense);
        self
    }

    #[must_use]
    pub fn transaction(mut self, transaction: TransactionBuilder) -> Self {
        self.model.transactions.push(transaction.build());
        self
    }

    /// A cash flow goes where its constructor says, whichever method added it
    fn push_cash_flow(&mut self, cash_flow: CashFlowBuilder) {
        match cash_flow.kind {
            CashFlowKind::Income => self.model.incomes.push(cash_flow.into_income()),
            CashFlowKind::Expense => self.model.expenses.push(cash_flow.into_expense()),
        }
    }

    // =========================================================================
    // Build
    // =========================================================================

    #[must_use]
    pub fn build(self) -> ModelData {
        self.model
    }

    /// Build the model along with the viewing interval its settings describe
    pub fn build_with_interval(self) -> Result<(ModelData, ViewInterval), ParseError> {
        let roi = ViewInterval::from_model(&self.model)?;
        Ok((self.model, roi))
    }
}
