//! Chronological ordering of moments
//!
//! Moments are sorted once with [`compare_moments`] into descending order
//! and then consumed from the back, which yields ascending dates with the
//! same-day priorities below:
//!
//! 1. Earlier dates first.
//! 2. Cash moments before anything else on the same day, so cash exists
//!    before incomes, expenses and transactions touch it.
//! 3. Asset start moments before other moments, so a value that begins that
//!    day is present for the day's transactions.
//! 4. Asset growth before incomes, expenses and transactions.
//! 5. Then by name, then by moment type.

use std::cmp::Ordering;

use crate::model::{CASH, Moment, MomentType};

/// Multi-key comparator giving the *descending* storage order of the queue.
///
/// `Ordering::Less` means `a` sits nearer the front, i.e. is processed later.
/// This departs from ranking cash first in the descending order, which
/// would leave cash at the front and process it last on its date. Cash
/// sorts to the back instead and is processed before every other same-day
/// moment.
pub fn compare_moments(a: &Moment, b: &Moment) -> Ordering {
    // Dates descending
    b.date
        .cmp(&a.date)
        // Cash is consumed first on its date, so it sorts to the back
        .then_with(|| (a.name == CASH).cmp(&(b.name == CASH)))
        .then_with(|| {
            (a.kind == MomentType::AssetStart).cmp(&(b.kind == MomentType::AssetStart))
        })
        .then_with(|| (a.kind == MomentType::Asset).cmp(&(b.kind == MomentType::Asset)))
        .then_with(|| b.name.cmp(&a.name))
        .then_with(|| b.kind.as_str().cmp(a.kind.as_str()))
}

/// A pre-sorted queue handing out moments in processing order
#[derive(Debug, Clone, Default)]
pub struct MomentQueue {
    moments: Vec<Moment>,
}

impl MomentQueue {
    pub fn new(mut moments: Vec<Moment>) -> Self {
        moments.sort_by(compare_moments);
        Self { moments }
    }

    /// Next moment to process
    pub fn pop(&mut self) -> Option<Moment> {
        self.moments.pop()
    }

    /// The moment `pop` would return next
    pub fn peek(&self) -> Option<&Moment> {
        self.moments.last()
    }

    pub fn len(&self) -> usize {
        self.moments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moments.is_empty()
    }
}

impl Iterator for MomentQueue {
    type Item = Moment;

    fn next(&mut self) -> Option<Moment> {
        self.pop()
    }
}
