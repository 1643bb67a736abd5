//! Growth and cash-flow moments
//!
//! Applies the monthly growth of incomes, expenses and assets, sets the
//! initial value of items starting, and routes money earned into pensions,
//! cash and the tax accumulators.

use crate::error::ApplyError;
use crate::model::{CASH, Liability, LiabilityKind, Moment, MomentType, TransactionKind};
use crate::simulation_state::SimulationState;

/// Apply one month of growth to an income, expense or asset.
///
/// The new value is always logged, even when unchanged, so chart series
/// stay contiguous. Growth of an asset with liabilities is earned like
/// income: it is credited to cash as well and taxed against the owners.
pub fn apply_growth(state: &mut SimulationState, moment: &Moment) -> Result<(), ApplyError> {
    let name = moment.name.as_str();
    let rate = state
        .items
        .monthly_rates
        .get(name)
        .copied()
        .unwrap_or(0.0);
    if !rate.is_finite() {
        return Err(ApplyError::InvalidGrowth {
            name: name.to_string(),
            rate,
        });
    }

    let current = state.value(name)?;
    let new_value = current * (1.0 + rate);
    state.set_value(name, new_value, name);

    match moment.kind {
        MomentType::Income => handle_income(state, name, new_value),
        MomentType::Expense => pay_expense(state, name, new_value),
        MomentType::Asset => {
            let growth = new_value - current;
            if growth == 0.0 || state.items.liabilities_of(name).is_empty() {
                return Ok(());
            }
            handle_income(state, name, growth)
        }
        _ => Ok(()),
    }
}

/// Set the declared starting value of an item; incomes are paid and
/// expenses charged for their first month as well.
pub fn apply_start(state: &mut SimulationState, moment: &Moment) -> Result<(), ApplyError> {
    let name = moment.name.as_str();
    let value = moment.initial_value.unwrap_or(0.0);
    state.set_value(name, value, name);

    match moment.kind {
        MomentType::IncomeStart => handle_income(state, name, value),
        MomentType::ExpenseStart => pay_expense(state, name, value),
        MomentType::AssetStart => {
            if let Some(price) = state.items.declared_purchase_prices.get(name).copied() {
                state.taxes.purchase_prices.insert(name.to_string(), price);
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Route `amount` earned by `source` through pension contributions, cash
/// and the source's liabilities.
pub fn handle_income(
    state: &mut SimulationState,
    source: &str,
    amount: f64,
) -> Result<(), ApplyError> {
    let mut to_cash = amount;
    let mut for_income_tax = amount;
    let mut for_national_insurance = amount;

    let date = state.timeline.current_date;
    let contributions: Vec<_> = state
        .items
        .pension_transactions
        .iter()
        .filter(|pt| pt.from == source && pt.is_active_on(date))
        .cloned()
        .collect();

    // Check every target first so a missing pension leaves nothing half-paid
    for pt in &contributions {
        if let Some(target) = pt.single_target() {
            state.value(target)?;
        }
    }

    for pt in contributions {
        let from_value = state.resolve_amount(&pt.from_value)?;
        let contribution = if pt.from_absolute {
            from_value
        } else {
            amount * from_value
        };
        if let Some(target) = pt.single_target() {
            let to_value = state.resolve_amount(&pt.to_value)?;
            let into_pension = if pt.to_absolute {
                to_value
            } else {
                contribution * to_value
            };
            state.add_to_value(target, into_pension, &pt.name)?;
        }
        to_cash -= contribution;
        for_income_tax -= contribution;
        if pt.kind == TransactionKind::SalarySacrifice {
            for_national_insurance -= contribution;
        }
    }

    if state.values.contains(CASH) {
        state.add_to_value(CASH, to_cash, source)?;
    } else {
        tracing::debug!(source, "no cash asset to receive income");
    }

    let liabilities = state.items.liabilities_of(source).to_vec();
    accumulate_taxable(state, &liabilities, for_income_tax, for_national_insurance);
    Ok(())
}

/// Add taxable amounts to the income tax and National Insurance totals of
/// the people named in `liabilities`.
pub fn accumulate_taxable(
    state: &mut SimulationState,
    liabilities: &[Liability],
    income_tax: f64,
    national_insurance: f64,
) {
    for liability in liabilities {
        match liability.kind {
            LiabilityKind::IncomeTax => state.taxes.liabilities.accumulate(liability, income_tax),
            LiabilityKind::NationalInsurance => state
                .taxes
                .liabilities
                .accumulate(liability, national_insurance),
            LiabilityKind::CapitalGains => {}
        }
    }
}

/// Debit an expense from cash; models without a cash asset just track it
fn pay_expense(state: &mut SimulationState, name: &str, amount: f64) -> Result<(), ApplyError> {
    if state.values.contains(CASH) {
        state.add_to_value(CASH, -amount, name)?;
    }
    Ok(())
}
