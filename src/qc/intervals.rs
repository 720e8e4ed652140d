//! Failure interval computation.
//!
//! Turns a per-timestamp pass/fail series into merged time spans. Each
//! failing observation is bounded by the nearest passing observation on
//! either side, falling back to the global table bounds when no pass exists
//! on that side. Overlapping spans are coalesced.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::table::TimeBounds;

/// A merged span bounded by the nearest passing observations
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct FailureInterval {
    /// Last passing observation before the failures (or the global minimum)
    pub start: NaiveDateTime,
    /// First passing observation after the failures (or the global maximum)
    pub end: NaiveDateTime,
}

impl FailureInterval {
    /// Whether a timestamp lies inside the interval (bounds inclusive)
    pub fn contains(&self, date_time: NaiveDateTime) -> bool {
        self.start <= date_time && date_time <= self.end
    }
}

/// Compute merged failure intervals from a pass/fail series
///
/// `series` holds `(timestamp, failed)` pairs in any order. `bounds` must be
/// the min/max of the full table, not of the screened subset. The result is
/// sorted by start and pairwise non-overlapping; it is empty when nothing
/// failed.
pub fn compute_failure_intervals(series: &[(NaiveDateTime, bool)], bounds: TimeBounds) -> Vec<FailureInterval> {
    let mut sorted = series.to_vec();
    sorted.sort_by_key(|(t, _)| *t);

    if !sorted.iter().any(|(_, failed)| *failed) {
        return Vec::new();
    }

    let mut left_bounds = Vec::with_capacity(sorted.len());
    let mut last_pass = None;
    for (t, failed) in &sorted {
        if *failed {
            left_bounds.push(last_pass.unwrap_or(bounds.min));
        } else {
            last_pass = Some(*t);
        }
    }

    let mut right_bounds = Vec::with_capacity(left_bounds.len());
    let mut next_pass = None;
    for (t, failed) in sorted.iter().rev() {
        if *failed {
            right_bounds.push(next_pass.unwrap_or(bounds.max));
        } else {
            next_pass = Some(*t);
        }
    }
    right_bounds.reverse();

    let mut pairs: Vec<(NaiveDateTime, NaiveDateTime)> = left_bounds.into_iter().zip(right_bounds).collect();
    pairs.sort_by_key(|(left, _)| *left);

    let mut merged: Vec<FailureInterval> = Vec::new();
    for (left, right) in pairs {
        match merged.last_mut() {
            Some(current) if left <= current.end => {
                current.end = current.end.max(right);
            }
            _ => merged.push(FailureInterval { start: left, end: right }),
        }
    }

    merged
}
