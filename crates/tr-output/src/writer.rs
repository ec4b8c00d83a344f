//! The `OutputWriter` trait implemented by all backend writers.

use crate::{OccupancyGroupRow, OutputResult, ReplaySummaryRow, TableOccupancyRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// All methods are infallible from the observer's perspective; errors are
/// stored internally and retrieved with
/// [`ReplayOutputObserver::take_error`][crate::ReplayOutputObserver::take_error].
pub trait OutputWriter {
    /// Write one released table interval.
    fn write_table_occupancy(&mut self, row: &TableOccupancyRow) -> OutputResult<()>;

    /// Write the merged groups of a run.
    fn write_groups(&mut self, rows: &[OccupancyGroupRow]) -> OutputResult<()>;

    /// Write one run summary row.
    fn write_summary(&mut self, row: &ReplaySummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
