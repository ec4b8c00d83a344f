//! Core record types: `Table`, `OccupancyEntry`, and `Reservation`.
//!
//! # Ownership
//!
//! The loaders in this crate create tables and reservations.  After that,
//! `Reservation` is immutable and only the replay engine touches a table's
//! `occupied` flag and `occupancy_log`.  Every simulation run must get its
//! own `TableMap`; logs from one run must never leak into another.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use tr_core::{Minute, TableId};

/// Tables of one run keyed by id.  Ordered so that every scan over the
/// tables is deterministic.
pub type TableMap = BTreeMap<TableId, Table>;

// ── OccupancyEntry ────────────────────────────────────────────────────────────

/// One finalized occupation interval of a single table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OccupancyEntry {
    pub start:       Minute,
    pub end:         Minute,
    /// When the booking was made.
    pub creation:    NaiveDateTime,
    /// The booked arrival wall-clock time.
    pub reservation: NaiveDateTime,
}

// ── Table ─────────────────────────────────────────────────────────────────────

/// A physical table from the layout data.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Table {
    pub table_id:      TableId,
    pub max_capacity:  u32,
    /// Transient replay state.
    pub occupied:      bool,
    /// Finalized intervals in release order.
    pub occupancy_log: Vec<OccupancyEntry>,
}

impl Table {
    /// A fresh, unoccupied table with an empty log.
    pub fn new(table_id: TableId, max_capacity: u32) -> Self {
        Self { table_id, max_capacity, occupied: false, occupancy_log: Vec::new() }
    }
}

// ── Reservation ───────────────────────────────────────────────────────────────

/// A confirmed historical booking.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reservation {
    /// Minutes after the earliest arrival of the filtered set.
    pub arrival_time:         Minute,
    /// Claimed tables.  Empty only under `UntabledPolicy::Keep`.
    pub table_ids:            Vec<TableId>,
    pub party_size:           u32,
    /// Minutes.
    pub duration:             u32,
    pub creation_datetime:    NaiveDateTime,
    pub reservation_datetime: NaiveDateTime,
}

impl Reservation {
    /// Exclusive end of the occupation window.
    #[inline]
    pub fn end_time(&self) -> Minute {
        self.arrival_time.offset(self.duration)
    }
}
