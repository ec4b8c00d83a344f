//! Per-load row accounting.

use std::fmt;

/// What happened to the rows of one CSV load.
///
/// Every row read is either `unreadable` or checked against the filter.
/// `rows_matched` counts rows that passed the filter; each of those ends up
/// either accepted or in exactly one of `malformed` / `untabled`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub rows_read:    usize,
    pub rows_matched: usize,
    /// Rows the CSV reader could not turn into a record (short rows, bad
    /// encoding).  They never reach the filter.
    pub unreadable:   usize,
    /// Matched rows that could not be decoded.
    pub malformed:    usize,
    /// Matched reservation rows dropped for resolving to zero tables.
    pub untabled:     usize,
}

impl ParseReport {
    /// Matched rows that produced a record.
    pub fn accepted(&self) -> usize {
        self.rows_matched
            .saturating_sub(self.malformed)
            .saturating_sub(self.untabled)
    }

    /// Rows skipped for any reason other than the filter.
    pub fn skipped(&self) -> usize {
        self.unreadable + self.malformed + self.untabled
    }
}

impl fmt::Display for ParseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} read, {} unreadable, {} matched, {} accepted, {} malformed, {} untabled",
            self.rows_read,
            self.unreadable,
            self.rows_matched,
            self.accepted(),
            self.malformed,
            self.untabled
        )
    }
}
