//! Transaction processing
//!
//! Applies one scheduled transaction moment to the simulation state:
//! revaluations, transfers (absolute, proportional, conditional), one-sided
//! additions and removals, and pension drawdown. Disposals of assets liable
//! for capital gains record the proportional gain against the owner.

use crate::error::{ApplyError, LookupError};
use crate::income::accumulate_taxable;
use crate::model::{LiabilityKind, PreparedTransaction, TransactionKind, may_go_negative};
use crate::simulation_state::SimulationState;

/// Apply the prepared transaction at `index` at the current date
pub fn apply_transaction(state: &mut SimulationState, index: usize) -> Result<(), ApplyError> {
    let transaction = state.transaction(index)?.clone();

    match transaction.kind {
        TransactionKind::Revalue => revalue(state, &transaction),
        TransactionKind::PensionContribution | TransactionKind::SalarySacrifice => {
            // Applied while paying the income they come from
            Ok(())
        }
        _ if transaction.from.is_empty() => add_to_target(state, &transaction),
        _ => transfer(state, &transaction),
    }
}

/// Set each target directly: to a literal when absolute, otherwise to its
/// previous value times the multiplier
fn revalue(state: &mut SimulationState, t: &PreparedTransaction) -> Result<(), ApplyError> {
    if !t.from.is_empty() {
        tracing::warn!(
            transaction = %t.name,
            from = %t.from,
            "WARNING: revaluation has a FROM value which is ignored"
        );
    }

    let amount = state.resolve_amount(&t.to_value)?;
    let date = state.timeline.current_date;

    for target in &t.to {
        let new_value = match state.value(target) {
            Ok(_) if t.to_absolute => amount,
            Ok(previous) => previous * amount,
            Err(e) => {
                tracing::error!(transaction = %t.name, error = %e, "BUG: revaluing a value that was never set");
                continue;
            }
        };
        state.set_value(target, new_value, &t.name);
        if state.items.setting_names.contains(target) {
            state.values.mark_defined(target, date);
        }
    }
    Ok(())
}

/// A transaction with only a TO side adds an amount to it
fn add_to_target(state: &mut SimulationState, t: &PreparedTransaction) -> Result<(), ApplyError> {
    let Some(target) = t.single_target() else {
        tracing::warn!(transaction = %t.name, "WARNING: transaction has neither FROM nor TO");
        return Ok(());
    };
    let to_value = state.resolve_amount(&t.to_value)?;
    let amount = if t.to_absolute {
        to_value
    } else {
        to_value * state.resolve_amount(&t.from_value)?
    };
    state.add_to_value(target, amount, &t.name)?;
    Ok(())
}

fn transfer(state: &mut SimulationState, t: &PreparedTransaction) -> Result<(), ApplyError> {
    let pre_from = state.value(&t.from)?;
    let target = t.single_target();
    let pre_to = match target {
        Some(to) => Some(state.value(to)?),
        None => None,
    };

    let Some(from_change) = from_change(state, t, pre_from, pre_to)? else {
        return Ok(());
    };
    // Resolved before anything moves so a failed lookup changes nothing
    let to_change = match pre_to {
        Some(pre_to) => Some(to_amount(state, t, from_change, pre_to)?),
        None => None,
    };

    recognise_gain(state, &t.from, pre_from, from_change);
    state.set_value(&t.from, pre_from - from_change, t.from_source());

    let (Some(to), Some(to_change)) = (target, to_change) else {
        return Ok(());
    };
    state.add_to_value(to, to_change, t.to_source())?;

    if t.kind == TransactionKind::PensionDrawdown {
        // Drawdown is income for whoever is liable on the pension
        let liabilities = state.items.liabilities_of(&t.from).to_vec();
        accumulate_taxable(state, &liabilities, to_change, 0.0);
    }
    Ok(())
}

/// How much arrives at the TO side. A conditional transfer never takes its
/// target past zero.
fn to_amount(
    state: &SimulationState,
    t: &PreparedTransaction,
    from_change: f64,
    pre_to: f64,
) -> Result<f64, LookupError> {
    if !t.to_absolute {
        return Ok(to_multiplier(state, t)? * from_change);
    }
    let amount = state.resolve_amount(&t.to_value)?;
    if t.kind == TransactionKind::Conditional {
        Ok(amount.min(-pre_to))
    } else {
        Ok(amount)
    }
}

/// How much leaves the FROM side, or `None` when nothing should happen
fn from_change(
    state: &SimulationState,
    t: &PreparedTransaction,
    pre_from: f64,
    pre_to: Option<f64>,
) -> Result<Option<f64>, LookupError> {
    let conditional = t.kind == TransactionKind::Conditional;
    // A conditional transfer only tops up a negative target
    let shortfall = match (conditional, pre_to) {
        (true, Some(to)) if to < 0.0 => -to,
        (true, _) => return Ok(None),
        (false, _) => 0.0,
    };

    let from_value = state.resolve_amount(&t.from_value)?;
    let mut change = if t.from_absolute {
        if conditional {
            from_value.min(shortfall / to_multiplier(state, t)?)
        } else {
            from_value
        }
    } else {
        if from_value > 1.0 {
            tracing::warn!(
                transaction = %t.name,
                proportion = from_value,
                "WARNING: proportion of FROM value is greater than 1"
            );
        }
        if conditional {
            shortfall * from_value / to_multiplier(state, t)?
        } else {
            pre_from * from_value
        }
    };

    if !may_go_negative(&t.from) && pre_from - change < 0.0 {
        if !conditional {
            tracing::debug!(
                transaction = %t.name,
                from = %t.from,
                "skipping transfer that would make the source negative"
            );
            return Ok(None);
        }
        change = pre_from.max(0.0);
    }

    if change == 0.0 {
        return Ok(None);
    }
    Ok(Some(change))
}

/// Multiplier applied to the FROM change on arrival; 1 when TO is absolute
fn to_multiplier(state: &SimulationState, t: &PreparedTransaction) -> Result<f64, LookupError> {
    if t.to_absolute {
        Ok(1.0)
    } else {
        state.resolve_amount(&t.to_value)
    }
}

/// Record the capital gain realised by taking `change` out of `asset`, and
/// shrink its remaining purchase price by the proportion sold.
fn recognise_gain(state: &mut SimulationState, asset: &str, pre_value: f64, change: f64) {
    let owners: Vec<_> = state
        .items
        .liabilities_of(asset)
        .iter()
        .filter(|l| l.kind == LiabilityKind::CapitalGains)
        .cloned()
        .collect();
    if owners.is_empty() || pre_value <= 0.0 {
        return;
    }
    let Some(price) = state.taxes.purchase_prices.get(asset).copied() else {
        let e = LookupError::PurchasePriceNotFound(asset.to_string());
        tracing::error!(error = %e, "BUG: capital gain not taxed");
        return;
    };

    let proportion = change / pre_value;
    let gain = (pre_value - price) * proportion;
    // Joint owners share the gain equally
    let share = gain / owners.len() as f64;
    for owner in &owners {
        state.taxes.liabilities.accumulate(owner, share);
    }
    state
        .taxes
        .purchase_prices
        .insert(asset.to_string(), price * (1.0 - proportion));
}
