//! Moment generation
//!
//! Expands every income, expense, asset and transaction definition into the
//! dated moments the scheduler will process. Nothing is generated on or
//! after the end of the viewing interval; moments before its start are kept
//! so a projection always begins when the item begins.

use jiff::civil::Date;
use rustc_hash::FxHashMap;

use crate::date_math::{monthly_dates, months_between};
use crate::error::ParseError;
use crate::growth::compound;
use crate::model::{ModelData, Moment, MomentType, PreparedTransaction, ViewInterval};
use crate::parse::resolve_date;

/// Everything a run schedules, produced once from the static model
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    pub moments: Vec<Moment>,
    /// Transactions referenced by index from transaction moments
    pub transactions: Vec<PreparedTransaction>,
    /// Pension contributions, consulted only while paying incomes
    pub pension_transactions: Vec<PreparedTransaction>,
}

/// Generate all moments for a run.
///
/// `monthly_rates` holds the monthly growth rate of every income and
/// expense, used to age a value set before the item starts.
pub fn generate_moments(
    model: &ModelData,
    roi: &ViewInterval,
    monthly_rates: &FxHashMap<String, f64>,
) -> Result<Schedule, ParseError> {
    let mut schedule = Schedule::default();

    for income in &model.incomes {
        let rate = monthly_rates.get(&income.name).copied().unwrap_or(0.0);
        schedule.moments.extend(cash_flow_moments(
            &income.name,
            &income.start,
            &income.end,
            &income.value_set_date,
            income.value,
            rate,
            (MomentType::IncomeStart, MomentType::Income),
            model,
            roi,
        )?);
    }

    for expense in &model.expenses {
        let rate = monthly_rates.get(&expense.name).copied().unwrap_or(0.0);
        schedule.moments.extend(cash_flow_moments(
            &expense.name,
            &expense.start,
            &expense.end,
            &expense.value_set_date,
            expense.value,
            rate,
            (MomentType::ExpenseStart, MomentType::Expense),
            model,
            roi,
        )?);
    }

    for asset in &model.assets {
        let start = resolve_date(&asset.start, &model.triggers)?;
        schedule.moments.extend(monthly_moments(
            &asset.name,
            start,
            roi.end,
            asset.value,
            (MomentType::AssetStart, MomentType::Asset),
        ));
    }

    for transaction in &model.transactions {
        let prepared = PreparedTransaction::prepare(transaction, &model.triggers)?;
        if prepared.kind.is_pension_contribution() {
            schedule.pension_transactions.push(prepared);
            continue;
        }
        let index = schedule.transactions.len();
        for date in transaction_dates(&prepared, roi) {
            schedule
                .moments
                .push(Moment::transaction(date, &prepared.name, index));
        }
        schedule.transactions.push(prepared);
    }

    Ok(schedule)
}

#[allow(clippy::too_many_arguments)]
fn cash_flow_moments(
    name: &str,
    start: &str,
    end: &str,
    value_set_date: &str,
    value: f64,
    monthly_rate: f64,
    kinds: (MomentType, MomentType),
    model: &ModelData,
    roi: &ViewInterval,
) -> Result<Vec<Moment>, ParseError> {
    let start = resolve_date(start, &model.triggers)?;
    let end = resolve_date(end, &model.triggers)?;
    let value_set = if value_set_date.trim().is_empty() {
        start
    } else {
        resolve_date(value_set_date, &model.triggers)?
    };

    let months = months_between(value_set, start);
    if months < 0 {
        tracing::warn!(
            name,
            %value_set,
            %start,
            "WARNING: value is set after the item starts; using it unaged"
        );
    }
    let initial = compound(value, monthly_rate, months.max(0));

    Ok(monthly_moments(name, start, end.min(roi.end), initial, kinds))
}

fn monthly_moments(
    name: &str,
    start: Date,
    stop: Date,
    initial_value: f64,
    (start_kind, kind): (MomentType, MomentType),
) -> Vec<Moment> {
    monthly_dates(start, stop)
        .into_iter()
        .enumerate()
        .map(|(i, date)| {
            if i == 0 {
                Moment::start(date, name, start_kind, initial_value)
            } else {
                Moment::new(date, name, kind)
            }
        })
        .collect()
}

/// Dates on which a non-pension transaction fires
pub fn transaction_dates(transaction: &PreparedTransaction, roi: &ViewInterval) -> Vec<Date> {
    match transaction.recurrence {
        Some(recurrence) => {
            let stop = transaction
                .stop_date
                .map_or(roi.end, |stop| stop.min(roi.end));
            (0..)
                .map_while(|n| recurrence.nth_after(transaction.date, n))
                .take_while(|d| *d < stop)
                .collect()
        }
        None if transaction.date < roi.end => vec![transaction.date],
        None => Vec::new(),
    }
}
