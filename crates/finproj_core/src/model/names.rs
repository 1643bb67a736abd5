//! Reserved names understood by the engine
//!
//! Names are plain strings in the model; the few that carry meaning are
//! collected here so nothing else hardcodes them.

/// The cash asset every income is paid into and every expense paid from.
pub const CASH: &str = "Cash";

/// Tracking value that accumulates every tax payment.
pub const TAX_POT: &str = "TaxPot";

pub const REVALUE_PREFIX: &str = "Revalue";
pub const CONDITIONAL_PREFIX: &str = "Conditional";
pub const PENSION_PREFIX: &str = "Pension";
/// Salary sacrifice contributions are also exempt from National Insurance.
pub const SALARY_SACRIFICE_PREFIX: &str = "PensionSS";
pub const CRYSTALLIZED_PENSION_PREFIX: &str = "CrystallizedPension";

// === Settings ===
pub const CPI_SETTING: &str = "cpi";
pub const BIRTH_DATE_SETTING: &str = "Date of birth";
pub const VIEW_START_SETTING: &str = "Start of view range";
pub const VIEW_END_SETTING: &str = "End of view range";
pub const VIEW_FREQUENCY_SETTING: &str = "View frequency";
pub const VIEW_DETAIL_SETTING: &str = "View detail";

/// Whether an asset may be driven below zero by a transfer out of it.
///
/// Only cash and mortgage-like debts are allowed to go negative.
pub fn may_go_negative(name: &str) -> bool {
    name == CASH || name.contains("mortgage") || name.contains("Mortgage")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_allow_list() {
        assert!(may_go_negative(CASH));
        assert!(may_go_negative("Mortgage"));
        assert!(may_go_negative("bigmortgage"));
        assert!(!may_go_negative("Stocks"));
        assert!(!may_go_negative("cash"));
    }
}
