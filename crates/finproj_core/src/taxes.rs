//! Tax engine
//!
//! Income tax, National Insurance and capital gains accumulate per person
//! through a UK-style tax year (6 April to 5 April). When the simulation
//! moves past the end of a tax year, or runs out of moments, the year is
//! settled: unused personal allowance is first filled from crystallized
//! pensions, then each accumulated total is taxed through its progressive
//! bands, paid out of cash into the tax pot, and reset.

use jiff::civil::Date;

use crate::model::{CASH, Liability, LiabilityKind, TAX_POT};
use crate::simulation_state::SimulationState;

/// Tax year whose band thresholds are the unindexed defaults
pub const REFERENCE_TAX_YEAR: i16 = 2018;

/// A rate applying to the part of an amount above `threshold`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxBand {
    pub threshold: f64,
    pub rate: f64,
}

impl TaxBand {
    pub const fn new(threshold: f64, rate: f64) -> Self {
        Self { threshold, rate }
    }
}

/// Band schedules for the three kinds of tax
#[derive(Debug, Clone, PartialEq)]
pub struct TaxConfig {
    pub income_tax: Vec<TaxBand>,
    pub national_insurance: Vec<TaxBand>,
    /// Flat rate above the allowance; no higher-rate taxpayer distinction
    pub capital_gains: Vec<TaxBand>,
}

impl Default for TaxConfig {
    fn default() -> Self {
        Self {
            income_tax: vec![
                TaxBand::new(0.0, 0.0),
                TaxBand::new(12_500.0, 0.20),
                TaxBand::new(50_000.0, 0.40),
                TaxBand::new(150_000.0, 0.45),
            ],
            national_insurance: vec![
                TaxBand::new(0.0, 0.0),
                TaxBand::new(8_628.0, 0.12),
                TaxBand::new(50_004.0, 0.02),
            ],
            capital_gains: vec![TaxBand::new(0.0, 0.0), TaxBand::new(12_000.0, 0.20)],
        }
    }
}

impl TaxConfig {
    /// Thresholds grown by CPI for each year between the reference tax year
    /// and `tax_year`
    #[must_use]
    pub fn indexed(&self, cpi_percent: f64, tax_year: i16) -> Self {
        let years = i32::from(tax_year - REFERENCE_TAX_YEAR);
        let factor = (1.0 + cpi_percent / 100.0).powi(years);
        let index = |bands: &[TaxBand]| {
            bands
                .iter()
                .map(|b| TaxBand::new(b.threshold * factor, b.rate))
                .collect()
        };
        Self {
            income_tax: index(&self.income_tax),
            national_insurance: index(&self.national_insurance),
            capital_gains: index(&self.capital_gains),
        }
    }

    pub fn bands(&self, kind: LiabilityKind) -> &[TaxBand] {
        match kind {
            LiabilityKind::IncomeTax => &self.income_tax,
            LiabilityKind::NationalInsurance => &self.national_insurance,
            LiabilityKind::CapitalGains => &self.capital_gains,
        }
    }

    /// Income that can be received before any income tax is due
    pub fn personal_allowance(&self) -> f64 {
        self.income_tax
            .iter()
            .find(|b| b.rate > 0.0)
            .map_or(0.0, |b| b.threshold)
    }

    pub fn tax_due(&self, kind: LiabilityKind, amount: f64) -> f64 {
        calculate_band_tax(amount, self.bands(kind))
    }
}

/// Tax owed on `amount` under progressive `bands` (sorted by threshold)
pub fn calculate_band_tax(amount: f64, bands: &[TaxBand]) -> f64 {
    if amount <= 0.0 || bands.is_empty() {
        return 0.0;
    }

    let mut tax = 0.0;
    for (i, band) in bands.iter().enumerate() {
        if amount <= band.threshold {
            break;
        }
        let next_threshold = bands
            .get(i + 1)
            .map(|b| b.threshold)
            .unwrap_or(f64::INFINITY);
        tax += (amount.min(next_threshold) - band.threshold) * band.rate;
    }
    tax
}

/// Calendar year in which the tax year containing `date` starts
pub fn tax_year_of(date: Date) -> i16 {
    if (date.month(), date.day()) >= (4, 6) {
        date.year()
    } else {
        date.year() - 1
    }
}

/// Last day (5 April) of the tax year starting in `tax_year`
pub fn tax_year_end(tax_year: i16) -> Date {
    jiff::civil::date(tax_year + 1, 4, 5)
}

/// Settle everything accumulated for `tax_year` and reset the accumulators.
pub fn settle_taxes(state: &mut SimulationState, tax_year: i16) {
    if state.taxes.liabilities.is_empty() {
        return;
    }
    state.timeline.current_date = tax_year_end(tax_year);
    let config = state.taxes.config.indexed(state.items.cpi, tax_year);

    for person in state.taxes.liabilities.people(LiabilityKind::IncomeTax) {
        use_allowance_from_pensions(state, &person, &config);
    }

    for kind in LiabilityKind::ALL {
        for person in state.taxes.liabilities.people(kind) {
            let amount = state.taxes.liabilities.get(kind, &person);
            let tax = config.tax_due(kind, amount);
            tracing::debug!(tax_year, %person, kind = kind.as_str(), amount, tax, "settling tax");
            pay_tax(state, &Liability::new(&person, kind), tax);
        }
    }

    state.taxes.liabilities.clear();
}

/// Fill any unused personal allowance by moving crystallized pension into
/// cash, counting the moved amount as taxable income.
fn use_allowance_from_pensions(state: &mut SimulationState, person: &str, config: &TaxConfig) {
    let Some(pensions) = state.items.crystallized_pensions.get(person).cloned() else {
        return;
    };
    let liability = Liability::new(person, LiabilityKind::IncomeTax);
    let income = state.taxes.liabilities.get(LiabilityKind::IncomeTax, person);
    let mut unused = config.personal_allowance() - income;

    for pension in pensions {
        if unused <= 0.0 {
            break;
        }
        let Ok(balance) = state.value(&pension) else {
            continue;
        };
        let amount = unused.min(balance);
        if amount <= 0.0 {
            continue;
        }
        if !state.values.contains(CASH) {
            tracing::warn!(%person, "WARNING: no cash to receive pension drawn into allowance");
            return;
        }
        let source = liability.to_string();
        state.set_value(&pension, balance - amount, &source);
        if let Err(e) = state.add_to_value(CASH, amount, &pension) {
            tracing::error!(error = %e, "BUG: cash vanished while drawing pension");
        }
        state.taxes.liabilities.accumulate(&liability, amount);
        unused -= amount;
    }
}

fn pay_tax(state: &mut SimulationState, liability: &Liability, tax: f64) {
    if tax <= 0.0 {
        return;
    }
    let source = liability.to_string();
    if state.add_to_value(CASH, -tax, &source).is_err() {
        tracing::warn!(liability = %source, tax, "WARNING: tax due but there is no cash to pay it");
        return;
    }
    if let Err(e) = state.add_to_value(TAX_POT, tax, &source) {
        tracing::error!(error = %e, "BUG: tax pot missing");
    }
}
