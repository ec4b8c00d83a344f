//! The `SimulationData` aggregate and its derived `OccupancyGroup` view.

use chrono::{NaiveDate, NaiveDateTime};

use tr_core::{Minute, ShiftClock, TableId};
use tr_records::{MealShift, Reservation, TableMap};

// ── OccupancyGroup ────────────────────────────────────────────────────────────

/// All table log entries sharing one `(start, end, creation, reservation)`
/// tuple, merged.
///
/// Produced only by the replay; never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyGroup {
    /// Contributing tables, ascending.
    pub table_ids:    Vec<TableId>,
    /// Minutes from the first arrival of the shift.
    pub start:        Minute,
    pub duration:     u32,
    pub creation:     NaiveDateTime,
    pub reservation:  NaiveDateTime,
    /// `reservation - creation` in minutes.  Negative when the booking was
    /// logged after its own arrival time.
    pub advance:      i64,
    /// `creation - shift_start` in minutes; the playback reveal time.
    pub creation_rel: Minute,
}

impl OccupancyGroup {
    /// Exclusive end of the occupation window.
    #[inline]
    pub fn end(&self) -> Minute {
        self.start.offset(self.duration)
    }

    /// `true` if the group occupies `minute` (`start ≤ minute < end`).
    #[inline]
    pub fn covers(&self, minute: Minute) -> bool {
        self.start <= minute && minute < self.end()
    }
}

// ── SimulationData ────────────────────────────────────────────────────────────

/// The aggregate root of one simulation run.
///
/// Built by [`SimulationBuilder`][crate::SimulationBuilder] with empty
/// `occupancy_groups`; a [`Replay`][crate::Replay] consumes it and returns it
/// with groups populated and slider bounds tightened.
///
/// Invariants: `min_slider_val ≤ max_slider_val` and `end_time ≥ 0`.
#[derive(Clone, Debug)]
pub struct SimulationData {
    pub tables:           TableMap,
    pub reservations:     Vec<Reservation>,
    pub occupancy_groups: Vec<OccupancyGroup>,

    /// Earliest arrival offset (always `Minute(0)` for parser output).
    pub min_time:         Minute,
    /// Latest arrival offset.
    pub max_time:         Minute,
    /// Earliest booked wall-clock time among the reservations.
    pub shift_start:      NaiveDateTime,
    /// Last minute at which replay events fire.
    pub end_time:         Minute,

    /// Playback bounds in creation-relative minutes.
    pub min_slider_val:   Minute,
    pub max_slider_val:   Minute,

    pub day:              NaiveDate,
    pub meal_shift:       MealShift,
    pub restaurant_id:    String,
}

impl SimulationData {
    /// Clock anchored at `shift_start`.
    pub fn clock(&self) -> ShiftClock {
        ShiftClock::new(self.shift_start)
    }

    /// Total `(table, interval)` pairs across all table logs.
    pub fn logged_intervals(&self) -> usize {
        self.tables.values().map(|t| t.occupancy_log.len()).sum()
    }
}
