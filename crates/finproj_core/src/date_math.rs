//! Calendar helpers for the monthly simulation and chart labels.
//!
//! Month stepping always goes through jiff so month-end clamping follows its
//! rules; day differences use Rata Die numbering, which avoids building a
//! `Span` for every chart label.

use jiff::ToSpan;
use jiff::civil::Date;

/// Mean Gregorian year length used for ages
pub const DAYS_PER_YEAR: f64 = 365.2425;

/// Convert a civil date to a Rata Die day number (days since 0001-01-01).
#[inline]
fn rata_die(d: Date) -> i32 {
    let y = i32::from(d.year());
    let m = i32::from(d.month());
    let day = i32::from(d.day());

    // March-based year so February's leap day falls at the end
    let a = (14 - m) / 12;
    let y2 = y - a;
    let m2 = m + 12 * a - 3;

    day + (153 * m2 + 2) / 5 + 365 * y2 + y2 / 4 - y2 / 100 + y2 / 400 - 306
}

/// Number of days from `d1` to `d2`, positive when `d2 > d1`.
#[inline]
pub fn days_between(d1: Date, d2: Date) -> i32 {
    rata_die(d2) - rata_die(d1)
}

/// Whole months from `from` to `to`; a partial month does not count.
///
/// Negative when `to` is before `from`.
pub fn months_between(from: Date, to: Date) -> i32 {
    if to < from {
        return -months_between(to, from);
    }
    let mut months = (i32::from(to.year()) - i32::from(from.year())) * 12
        + (i32::from(to.month()) - i32::from(from.month()));
    if to.day() < from.day() {
        months -= 1;
    }
    months.max(0)
}

/// `start` moved forward by `n` months, or `None` past the end of time.
pub fn add_months(start: Date, n: i64) -> Option<Date> {
    start.checked_add(n.months()).ok()
}

/// Monthly dates `start, start+1m, ...` strictly before `stop`.
pub fn monthly_dates(start: Date, stop: Date) -> Vec<Date> {
    (0..)
        .map_while(|n| add_months(start, n))
        .take_while(|d| *d < stop)
        .collect()
}

/// Whole years of age on `on` for someone born on `birth`
pub fn age_in_years(birth: Date, on: Date) -> i64 {
    (f64::from(days_between(birth, on)) / DAYS_PER_YEAR).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn test_days_between_matches_jiff() {
        let pairs = [
            (date(2020, 1, 1), date(2030, 6, 15)),
            (date(2024, 2, 29), date(2025, 2, 28)),
            (date(2000, 3, 1), date(2100, 3, 1)),
            (date(2025, 12, 31), date(2026, 1, 1)),
        ];
        for (d1, d2) in pairs {
            assert_eq!(
                days_between(d1, d2),
                (d2 - d1).get_days(),
                "mismatch for {d1} → {d2}"
            );
        }
        assert_eq!(days_between(date(2025, 1, 2), date(2025, 1, 1)), -1);
    }

    #[test]
    fn test_months_between() {
        assert_eq!(months_between(date(2018, 1, 1), date(2018, 1, 1)), 0);
        assert_eq!(months_between(date(2018, 1, 1), date(2018, 3, 1)), 2);
        assert_eq!(months_between(date(2018, 1, 15), date(2018, 3, 14)), 1);
        assert_eq!(months_between(date(2017, 11, 1), date(2019, 1, 1)), 14);
        assert_eq!(months_between(date(2018, 3, 1), date(2018, 1, 1)), -2);
    }

    #[test]
    fn test_monthly_dates_clamp_from_anchor() {
        let dates = monthly_dates(date(2018, 1, 31), date(2018, 4, 1));
        assert_eq!(
            dates,
            vec![date(2018, 1, 31), date(2018, 2, 28), date(2018, 3, 31)]
        );
    }

    #[test]
    fn test_monthly_dates_empty_when_stop_not_after_start() {
        assert!(monthly_dates(date(2018, 1, 1), date(2018, 1, 1)).is_empty());
        assert!(monthly_dates(date(2018, 1, 1), date(2017, 1, 1)).is_empty());
    }

    #[test]
    fn test_age_in_years() {
        assert_eq!(age_in_years(date(1980, 6, 15), date(2018, 6, 14)), 37);
        assert_eq!(age_in_years(date(1980, 6, 15), date(2018, 6, 16)), 38);
    }
}
