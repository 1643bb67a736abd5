//! Personal finance projection library
//!
//! This crate turns a declarative model of incomes, expenses, assets,
//! triggers and transactions into a dated, causally ordered log of every
//! value change (the evaluation log), and derives chart-ready series from it.
//! It supports:
//! - Monthly compounding growth with optional CPI adjustment
//! - Revaluations, proportional/absolute and conditional "maintain" transfers
//! - Pension contributions (including salary sacrifice) and drawdown
//! - UK-style income tax, National Insurance and capital gains, CPI-indexed
//! - Categorised chart aggregation with value/additions/reductions/delta views
//!
//! # Builder DSL
//!
//! ```ignore
//! use finproj_core::config::{AssetBuilder, CashFlowBuilder, ModelBuilder};
//! use finproj_core::simulation::get_evaluations;
//!
//! let (model, roi) = ModelBuilder::new()
//!     .view_range("2018-01-01", "2020-01-01")
//!     .asset(AssetBuilder::new("Cash").start("2018-01-01").value(1_000.0))
//!     .income(CashFlowBuilder::income("Salary")
//!         .start("2018-01-01")
//!         .end("2020-01-01")
//!         .value(2_500.0)
//!         .liability("Joe(incomeTax)/Joe(NI)"))
//!     .build_with_interval()?;
//!
//! let evaluations = get_evaluations(&model, &roi);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod apply;
pub mod chart;
pub mod date_math;
pub mod error;
pub mod growth;
pub mod income;
pub mod moments;
pub mod parse;
pub mod scheduler;
pub mod simulation;
pub mod simulation_state;
pub mod taxes;
pub mod validate;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use chart::{ChartData, ChartPoint, ChartSeries, ViewSettings, make_chart_data};
pub use config::{AssetBuilder, CashFlowBuilder, ModelBuilder, TransactionBuilder};
pub use model::{Evaluation, ModelData, ViewInterval};
pub use simulation::{SimulationResult, get_evaluations, simulate};
pub use validate::validate;
