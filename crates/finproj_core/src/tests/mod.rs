//! Integration tests for the finproj projection engine
//!
//! Tests are organized by topic:
//! - `cash_flows` - Income and expense moments, growth and cash routing
//! - `assets` - Asset growth and the viewing interval
//! - `transactions` - Transfers, revaluations, conditionals and capital gains
//! - `taxes` - Tax year settlement, bands and allowance use
//! - `pensions` - Contributions, salary sacrifice and drawdown
//! - `charts` - Chart aggregation over simulated logs
//! - `simulation_result` - Determinism and entry point behaviour
//! - `builder_dsl` - Builder DSL for fluent model setup

mod assets;
mod charts;
mod pensions;

use jiff::civil::Date;

use crate::model::{Evaluation, ModelData, ViewInterval};
use crate::simulation::{SimulationResult, simulate};

pub(crate) fn roi(start: Date, end: Date) -> ViewInterval {
    ViewInterval::new(start, end)
}

/// Simulate and fail loudly if the model did not validate
pub(crate) fn run(model: &ModelData, roi: &ViewInterval) -> SimulationResult {
    if let Err(e) = crate::validate::validate(model) {
        panic!("test model is invalid: {e}");
    }
    simulate(model, roi)
}

/// Evaluations of `name`, in log order
pub(crate) fn evaluations_of<'a>(
    result: &'a SimulationResult,
    name: &'a str,
) -> impl Iterator<Item = &'a Evaluation> + 'a {
    result.evaluations.iter().filter(move |e| e.name == name)
}

pub(crate) fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected:.4}, got {actual:.4}"
    );
}
