//! `ReplayOutputObserver<W>`: bridges `ReplayObserver` to an `OutputWriter`.

use tr_core::{ShiftClock, TableId};
use tr_records::OccupancyEntry;
use tr_sim::{ReplayDiagnostics, ReplayObserver, SimulationData};

use crate::row::{OccupancyGroupRow, ReplaySummaryRow, TableOccupancyRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`ReplayObserver`] that writes released table intervals as they happen,
/// then the occupancy groups and a summary row when the replay ends.
///
/// Errors from the writer are stored internally because `ReplayObserver`
/// methods have no return value.  After `run()` returns, check for errors
/// with [`take_error`][Self::take_error].
pub struct ReplayOutputObserver<W: OutputWriter> {
    writer:     W,
    clock:      ShiftClock,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> ReplayOutputObserver<W> {
    /// Create an observer backed by `writer`.  `clock` formats the replay
    /// minutes; take it from the data before handing that to the replay.
    pub fn new(writer: W, clock: ShiftClock) -> Self {
        Self { writer, clock, last_error: None }
    }

    /// Take the stored write error (if any) after `run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the replay).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> ReplayObserver for ReplayOutputObserver<W> {
    fn on_release(&mut self, table: TableId, entry: &OccupancyEntry) {
        let row = TableOccupancyRow::new(table, entry, &self.clock);
        let result = self.writer.write_table_occupancy(&row);
        self.store_err(result);
    }

    fn on_replay_end(&mut self, data: &SimulationData, diagnostics: &ReplayDiagnostics) {
        let rows: Vec<OccupancyGroupRow> = data
            .occupancy_groups
            .iter()
            .map(|g| OccupancyGroupRow::new(g, &self.clock))
            .collect();
        let result = self.writer.write_groups(&rows);
        self.store_err(result);

        let result = self.writer.write_summary(&ReplaySummaryRow::new(data, diagnostics));
        self.store_err(result);

        let result = self.writer.finish();
        self.store_err(result);
    }
}
