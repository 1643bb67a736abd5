/// Convert an annual percentage into the equivalent monthly compounding rate.
///
/// Unless the item is CPI-immune the CPI rate is added to the annual figure
/// first. The result compounds to the annual rate over twelve months, so it
/// is `(1 + a/100)^(1/12) - 1` rather than `a/1200`. Rates at or below -100%
/// produce NaN; callers must guard against that.
#[must_use]
#[inline]
pub fn monthly_growth_rate(annual_percent: f64, cpi_percent: f64, cpi_immune: bool) -> f64 {
    let annual = if cpi_immune {
        annual_percent
    } else {
        annual_percent + cpi_percent
    };
    ((1.0 + annual / 100.0).ln() / 12.0).exp() - 1.0
}

/// Grow `value` by `months` steps of `monthly_rate`, one month at a time.
#[must_use]
pub fn compound(value: f64, monthly_rate: f64, months: i32) -> f64 {
    if months >= 0 {
        (0..months).fold(value, |v, _| v * (1.0 + monthly_rate))
    } else {
        (0..-months).fold(value, |v, _| v / (1.0 + monthly_rate))
    }
}
