//! Date buckets a chart is drawn over
//!
//! Bucket 0 is the leading "pre" bucket one step before the viewing
//! interval. Everything dated earlier collects there, which gives value
//! charts a baseline to carry forward; it is never emitted.

use jiff::ToSpan;
use jiff::civil::Date;

use super::view::Frequency;
use crate::date_math::age_in_years;
use crate::model::ViewInterval;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buckets {
    starts: Vec<Date>,
    end: Date,
}

impl Buckets {
    pub fn new(roi: &ViewInterval, frequency: Frequency) -> Self {
        let step = |n: i64| match frequency {
            Frequency::Monthly => n.months(),
            Frequency::Annually => n.years(),
        };

        let mut starts = Vec::new();
        if let Ok(pre) = roi.start.checked_add(step(-1)) {
            starts.push(pre);
        }
        // A bucket start is always derived from the interval start so
        // month-end clamping never drifts
        let mut n = 0;
        while let Ok(date) = roi.start.checked_add(step(n)) {
            if date >= roi.end {
                break;
            }
            starts.push(date);
            n += 1;
        }

        Self {
            starts,
            end: roi.end,
        }
    }

    /// Bucket holding `date`, or `None` at or after the end of the interval
    pub fn index_of(&self, date: Date) -> Option<usize> {
        if date >= self.end || self.starts.is_empty() {
            return None;
        }
        let after = self.starts.partition_point(|start| *start <= date);
        Some(after.saturating_sub(1))
    }

    /// Number of buckets, including the pre bucket
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// Indices of the buckets that are shown
    pub fn shown(&self) -> std::ops::Range<usize> {
        1.min(self.len())..self.len()
    }

    /// One label per shown bucket: its start date, or the age on that date
    /// when a birth date is known
    pub fn labels(&self, birth_date: Option<Date>) -> Vec<String> {
        self.starts[self.shown()]
            .iter()
            .map(|date| match birth_date {
                Some(birth) => age_in_years(birth, *date).to_string(),
                None => date.to_string(),
            })
            .collect()
    }
}
