use std::collections::BTreeMap;

use crate::apply::apply_transaction;
use crate::error::ApplyError;
use crate::income::{apply_growth, apply_start};
use crate::model::{Evaluation, ModelData, Moment, MomentType, ViewInterval};
use crate::scheduler::MomentQueue;
use crate::simulation_state::SimulationState;
use crate::taxes::{settle_taxes, tax_year_of};
use crate::validate::validate;

/// Output of one simulation run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationResult {
    /// Every value assignment in processing order
    pub evaluations: Vec<Evaluation>,
    /// Value of every named quantity once all moments are processed
    pub final_values: BTreeMap<String, f64>,
}

/// Run the model over the viewing interval and return the evaluation log.
///
/// An invalid model is logged and yields an empty log.
pub fn get_evaluations(model: &ModelData, roi: &ViewInterval) -> Vec<Evaluation> {
    simulate(model, roi).evaluations
}

pub fn simulate(model: &ModelData, roi: &ViewInterval) -> SimulationResult {
    if let Err(e) = validate(model) {
        tracing::error!(error = %e, "model is not valid; nothing simulated");
        return SimulationResult::default();
    }

    let (mut state, moments) = match SimulationState::from_model(model, roi) {
        Ok(prepared) => prepared,
        Err(e) => {
            tracing::error!(error = %e, "BUG: validated model could not be prepared");
            return SimulationResult::default();
        }
    };

    run(&mut state, MomentQueue::new(moments));

    SimulationResult {
        final_values: state.values.snapshot(),
        evaluations: state.history.evaluations,
    }
}

/// Process every moment in order, settling tax at each tax-year boundary
/// and once more after the final moment.
pub fn run(state: &mut SimulationState, queue: MomentQueue) {
    for moment in queue {
        let tax_year = tax_year_of(moment.date);
        match state.taxes.tax_year {
            Some(current) if tax_year > current => {
                settle_taxes(state, current);
                state.taxes.tax_year = Some(tax_year);
            }
            None => state.taxes.tax_year = Some(tax_year),
            Some(_) => {}
        }

        state.timeline.current_date = moment.date;
        if let Err(e) = process_moment(state, &moment) {
            tracing::error!(
                name = %moment.name,
                date = %moment.date,
                kind = moment.kind.as_str(),
                error = %e,
                "BUG: moment skipped"
            );
        }
    }

    if let Some(current) = state.taxes.tax_year {
        settle_taxes(state, current);
    }
}

fn process_moment(state: &mut SimulationState, moment: &Moment) -> Result<(), ApplyError> {
    match moment.kind {
        MomentType::Transaction => match moment.transaction {
            Some(index) => apply_transaction(state, index),
            None => Ok(()),
        },
        kind if kind.is_start() => apply_start(state, moment),
        _ => apply_growth(state, moment),
    }
}
