//! Replay observer trait for diagnostics and data collection.

use tr_core::{ReservationId, TableId};
use tr_records::OccupancyEntry;

use crate::queue::Event;
use crate::{Interval, ReplayDiagnostics, SimulationData};

/// Callbacks invoked by [`Replay::run`][crate::Replay::run] at key points of
/// the replay.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: conflict printer
///
/// ```rust,ignore
/// struct ConflictPrinter;
///
/// impl ReplayObserver for ConflictPrinter {
///     fn on_conflict(&mut self, id: ReservationId, table: TableId, existing: Interval) {
///         println!("{id} overlaps {existing} on {table}");
///     }
/// }
/// ```
pub trait ReplayObserver {
    /// A reservation claims tables absent from the layout and is skipped.
    fn on_reservation_skipped(&mut self, _reservation: ReservationId, _missing: &[TableId]) {}

    /// `reservation` overlaps the accepted window `existing` on `table`.
    /// Called once per conflicting table.
    fn on_conflict(&mut self, _reservation: ReservationId, _table: TableId, _existing: Interval) {}

    /// Called for every event that fires, before it is applied.
    fn on_event(&mut self, _event: &Event) {}

    /// A table was released and `entry` appended to its log.
    fn on_release(&mut self, _table: TableId, _entry: &OccupancyEntry) {}

    /// Called once after grouping, with the finished data.
    fn on_replay_end(&mut self, _data: &SimulationData, _diagnostics: &ReplayDiagnostics) {}
}

/// A [`ReplayObserver`] that does nothing.
pub struct NoopObserver;

impl ReplayObserver for NoopObserver {}
