//! Replay counters and the interval type used for conflict detection.

use std::fmt;

use tr_core::Minute;

/// A half-open occupation window `[start, end)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Interval {
    pub start: Minute,
    pub end:   Minute,
}

impl Interval {
    /// `true` unless one window ends at or before the other starts.
    #[inline]
    pub fn overlaps(&self, other: &Interval) -> bool {
        !(self.end <= other.start || self.start >= other.end)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start.0, self.end.0)
    }
}

/// Observability counters of one replay.  Not part of the occupancy result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReplayDiagnostics {
    /// Reservations skipped because a claimed table is not in the layout.
    pub missing_table_skips: usize,
    /// Reservations overlapping an earlier accepted reservation on at least
    /// one table.
    pub conflicts:           usize,
    /// Conflicting reservations excluded (`ConflictPolicy::Reject` only).
    pub rejected:            usize,
    /// Reservations whose events were scheduled.
    pub scheduled:           usize,
    pub events_fired:        usize,
    /// Events dropped for falling after `end_time`.
    pub events_after_end:    usize,
}

impl fmt::Display for ReplayDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} scheduled, {} conflicts ({} rejected), {} skipped for missing tables, {} events fired, {} after end",
            self.scheduled,
            self.conflicts,
            self.rejected,
            self.missing_table_skips,
            self.events_fired,
            self.events_after_end
        )
    }
}
