use std::collections::BTreeMap;

use jiff::civil::Date;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::date_math::months_between;
use crate::error::{LookupError, ParseError, Result};
use crate::growth::{compound, monthly_growth_rate};
use crate::model::{
    CPI_SETTING, CRYSTALLIZED_PENSION_PREFIX, Evaluation, Liability, LiabilityKind, ModelData,
    Moment, PreparedTransaction, TAX_POT, TransactionValue, ViewInterval,
};
use crate::moments::generate_moments;
use crate::parse::{parse_growth, parse_liabilities, parse_value};
use crate::taxes::TaxConfig;

/// Everything one simulation run reads and mutates.
///
/// A fresh state is built per run, so runs never share values, logs or tax
/// accumulators.
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub timeline: SimTimeline,
    pub values: ValueStore,
    pub items: SimItems,
    pub taxes: SimTaxState,
    pub history: SimHistory,
}

#[derive(Debug, Clone)]
pub struct SimTimeline {
    pub roi: ViewInterval,
    /// Date of the moment being processed
    pub current_date: Date,
}

/// Current value of every named quantity
#[derive(Debug, Clone, Default)]
pub struct ValueStore {
    values: FxHashMap<String, f64>,
    /// Settings revalued by a transaction, with the revaluation date
    defined_on: FxHashMap<String, Date>,
}

impl ValueStore {
    pub fn get(&self, name: &str) -> Result<f64> {
        self.values
            .get(name)
            .copied()
            .ok_or_else(|| LookupError::ValueNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn insert(&mut self, name: &str, value: f64) {
        self.values.insert(name.to_string(), value);
    }

    pub fn mark_defined(&mut self, name: &str, date: Date) {
        self.defined_on.insert(name.to_string(), date);
    }

    pub fn defined_on(&self, name: &str) -> Option<Date> {
        self.defined_on.get(name).copied()
    }

    /// Snapshot of every value, ordered by name
    pub fn snapshot(&self) -> BTreeMap<String, f64> {
        self.values
            .iter()
            .map(|(name, value)| (name.clone(), *value))
            .collect()
    }
}

/// Per-item facts derived once from the model
#[derive(Debug, Clone, Default)]
pub struct SimItems {
    /// Monthly growth rate of every income, expense and asset
    pub monthly_rates: FxHashMap<String, f64>,
    /// Parsed liability tags of incomes and assets
    pub liabilities: FxHashMap<String, Vec<Liability>>,
    /// Purchase prices declared on assets, recorded when they start
    pub declared_purchase_prices: FxHashMap<String, f64>,
    pub transactions: Vec<PreparedTransaction>,
    pub pension_transactions: Vec<PreparedTransaction>,
    /// Crystallized pension assets per person liable for their income tax
    pub crystallized_pensions: BTreeMap<String, Vec<String>>,
    pub setting_names: FxHashSet<String>,
    /// Annual CPI in percent
    pub cpi: f64,
}

impl SimItems {
    pub fn liabilities_of(&self, name: &str) -> &[Liability] {
        self.liabilities.get(name).map_or(&[], Vec::as_slice)
    }

    pub fn has_liability(&self, name: &str, kind: LiabilityKind) -> bool {
        self.liabilities_of(name).iter().any(|l| l.kind == kind)
    }
}

/// Running tax totals for the current tax year, keyed by kind and person
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LiabilityTotals {
    totals: BTreeMap<(LiabilityKind, String), f64>,
}

impl LiabilityTotals {
    pub fn accumulate(&mut self, liability: &Liability, amount: f64) {
        *self
            .totals
            .entry((liability.kind, liability.person.clone()))
            .or_insert(0.0) += amount;
    }

    pub fn get(&self, kind: LiabilityKind, person: &str) -> f64 {
        self.totals
            .get(&(kind, person.to_string()))
            .copied()
            .unwrap_or(0.0)
    }

    /// People with an accumulated total of `kind`, in name order
    pub fn people(&self, kind: LiabilityKind) -> Vec<String> {
        self.totals
            .keys()
            .filter(|(k, _)| *k == kind)
            .map(|(_, person)| person.clone())
            .collect()
    }

    pub fn clear(&mut self) {
        self.totals.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SimTaxState {
    pub liabilities: LiabilityTotals,
    /// Remaining purchase price of assets liable for capital gains
    pub purchase_prices: FxHashMap<String, f64>,
    /// Tax year currently accumulating, by the calendar year it starts in
    pub tax_year: Option<i16>,
    pub config: TaxConfig,
}

#[derive(Debug, Clone, Default)]
pub struct SimHistory {
    /// Append-only log of every value assignment
    pub evaluations: Vec<Evaluation>,
}

impl SimulationState {
    /// Prepare a run: derive growth rates and liabilities, seed settings,
    /// and generate the moments to process.
    pub fn from_model(
        model: &ModelData,
        roi: &ViewInterval,
    ) -> std::result::Result<(Self, Vec<Moment>), ParseError> {
        let cpi = match model.setting(CPI_SETTING) {
            Some(setting) => parse_growth(&setting.value, &[])?,
            None => 0.0,
        };

        let mut items = SimItems {
            cpi,
            setting_names: model.settings.iter().map(|s| s.name.clone()).collect(),
            ..Default::default()
        };
        for income in &model.incomes {
            let annual = parse_growth(&income.growth, &model.settings)?;
            items.monthly_rates.insert(
                income.name.clone(),
                monthly_growth_rate(annual, cpi, income.cpi_immune),
            );
            items
                .liabilities
                .insert(income.name.clone(), parse_liabilities(&income.liability)?);
        }
        for expense in &model.expenses {
            let annual = parse_growth(&expense.growth, &model.settings)?;
            items.monthly_rates.insert(
                expense.name.clone(),
                monthly_growth_rate(annual, cpi, expense.cpi_immune),
            );
        }
        for asset in &model.assets {
            let annual = parse_growth(&asset.growth, &model.settings)?;
            items.monthly_rates.insert(
                asset.name.clone(),
                monthly_growth_rate(annual, cpi, asset.cpi_immune),
            );
            let liabilities = parse_liabilities(&asset.liability)?;
            if asset.name.starts_with(CRYSTALLIZED_PENSION_PREFIX) {
                for liability in &liabilities {
                    if liability.kind == LiabilityKind::IncomeTax {
                        items
                            .crystallized_pensions
                            .entry(liability.person.clone())
                            .or_default()
                            .push(asset.name.clone());
                    }
                }
            }
            items.liabilities.insert(asset.name.clone(), liabilities);
            if let Some(price) = asset.purchase_price {
                items
                    .declared_purchase_prices
                    .insert(asset.name.clone(), price);
            }
        }

        let schedule = generate_moments(model, roi, &items.monthly_rates)?;
        items.transactions = schedule.transactions;
        items.pension_transactions = schedule.pension_transactions;

        let mut values = ValueStore::default();
        for setting in &model.settings {
            if let Ok(TransactionValue::Literal(value)) = parse_value(&setting.value) {
                values.insert(&setting.name, value);
            }
        }
        values.insert(TAX_POT, 0.0);

        let state = Self {
            timeline: SimTimeline {
                roi: *roi,
                current_date: roi.start,
            },
            values,
            items,
            taxes: SimTaxState::default(),
            history: SimHistory::default(),
        };
        Ok((state, schedule.moments))
    }

    pub fn value(&self, name: &str) -> Result<f64> {
        self.values.get(name)
    }

    /// Assign a value and log it at the current date
    pub fn set_value(&mut self, name: &str, value: f64, source: &str) {
        self.values.insert(name, value);
        self.history.evaluations.push(Evaluation::new(
            name,
            self.timeline.current_date,
            value,
            source,
        ));
    }

    /// Add `delta` to an existing value and log the result
    pub fn add_to_value(&mut self, name: &str, delta: f64, source: &str) -> Result<f64> {
        let new_value = self.value(name)? + delta;
        self.set_value(name, new_value, source);
        Ok(new_value)
    }

    /// Monthly CPI rate used to age revalued settings
    pub fn monthly_cpi(&self) -> f64 {
        monthly_growth_rate(0.0, self.items.cpi, false)
    }

    /// Resolve a transaction amount at the current date.
    ///
    /// A setting that was revalued by a transaction grows with CPI for each
    /// whole month since that revaluation.
    pub fn resolve_amount(&self, value: &TransactionValue) -> Result<f64> {
        match value {
            TransactionValue::Literal(v) => Ok(*v),
            TransactionValue::Setting(name) => {
                let base = self
                    .values
                    .get(name)
                    .map_err(|_| LookupError::SettingNotFound(name.clone()))?;
                Ok(match self.values.defined_on(name) {
                    Some(set_on) => compound(
                        base,
                        self.monthly_cpi(),
                        months_between(set_on, self.timeline.current_date),
                    ),
                    None => base,
                })
            }
        }
    }

    pub fn transaction(&self, index: usize) -> Result<&PreparedTransaction> {
        self.items
            .transactions
            .get(index)
            .ok_or(LookupError::TransactionNotFound(index))
    }
}
