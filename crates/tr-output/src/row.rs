//! Plain data row types written by output backends.
//!
//! Timestamps are pre-formatted `YYYY-MM-DD HH:MM` strings and clock labels
//! `HH:MM`, so every backend stores the same text.

use tr_core::{ShiftClock, TableId, format_stamp};
use tr_records::OccupancyEntry;
use tr_sim::{OccupancyGroup, ReplayDiagnostics, SimulationData};

/// One finalized interval of one table, in release order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOccupancyRow {
    pub table_id:    u32,
    pub start:       i64,
    pub end:         i64,
    pub start_clock: String,
    pub end_clock:   String,
    pub creation:    String,
    pub reservation: String,
}

impl TableOccupancyRow {
    pub fn new(table: TableId, entry: &OccupancyEntry, clock: &ShiftClock) -> Self {
        Self {
            table_id:    table.0,
            start:       entry.start.0,
            end:         entry.end.0,
            start_clock: clock.clock(entry.start),
            end_clock:   clock.clock(entry.end),
            creation:    format_stamp(entry.creation),
            reservation: format_stamp(entry.reservation),
        }
    }
}

/// One merged occupancy group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGroupRow {
    /// Contributing table ids joined with `;`.
    pub tables:          String,
    pub start:           i64,
    pub duration:        u32,
    pub start_clock:     String,
    pub end_clock:       String,
    pub creation:        String,
    pub reservation:     String,
    pub advance_minutes: i64,
    pub creation_rel:    i64,
}

impl OccupancyGroupRow {
    pub fn new(group: &OccupancyGroup, clock: &ShiftClock) -> Self {
        let tables = group
            .table_ids
            .iter()
            .map(|t| t.0.to_string())
            .collect::<Vec<_>>()
            .join(";");
        Self {
            tables,
            start:           group.start.0,
            duration:        group.duration,
            start_clock:     clock.clock(group.start),
            end_clock:       clock.clock(group.end()),
            creation:        format_stamp(group.creation),
            reservation:     format_stamp(group.reservation),
            advance_minutes: group.advance,
            creation_rel:    group.creation_rel.0,
        }
    }
}

/// Per-run totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaySummaryRow {
    pub date:                String,
    pub meal_shift:          String,
    pub restaurant:          String,
    pub shift_start:         String,
    pub tables:              u64,
    pub reservations:        u64,
    pub scheduled:           u64,
    pub conflicts:           u64,
    pub rejected:            u64,
    pub missing_table_skips: u64,
    pub events_fired:        u64,
    pub occupancy_groups:    u64,
    pub end_time:            i64,
    pub min_slider:          i64,
    pub max_slider:          i64,
}

impl ReplaySummaryRow {
    pub fn new(data: &SimulationData, diagnostics: &ReplayDiagnostics) -> Self {
        Self {
            date:                data.day.to_string(),
            meal_shift:          data.meal_shift.to_string(),
            restaurant:          data.restaurant_id.clone(),
            shift_start:         format_stamp(data.shift_start),
            tables:              data.tables.len() as u64,
            reservations:        data.reservations.len() as u64,
            scheduled:           diagnostics.scheduled as u64,
            conflicts:           diagnostics.conflicts as u64,
            rejected:            diagnostics.rejected as u64,
            missing_table_skips: diagnostics.missing_table_skips as u64,
            events_fired:        diagnostics.events_fired as u64,
            occupancy_groups:    data.occupancy_groups.len() as u64,
            end_time:            data.end_time.0,
            min_slider:          data.min_slider_val.0,
            max_slider:          data.max_slider_val.0,
        }
    }
}
