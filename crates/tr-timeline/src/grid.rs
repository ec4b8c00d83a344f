//! The table × time-slot occupancy grid.

use chrono::NaiveDateTime;

use tr_core::{Minute, TableId, offset_to_clock};
use tr_sim::{OccupancyGroup, SimulationData};

use crate::{filtered_table_ids, visible_occupancies};

/// State of one grid cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SlotStatus {
    Free,
    /// Covered by a visible group; `HH:MM` labels of its window.
    Occupied { start: String, end: String },
}

impl SlotStatus {
    pub fn is_occupied(&self) -> bool {
        matches!(self, SlotStatus::Occupied { .. })
    }
}

/// `0, step, 2·step, …` up to and including `end_time`.  Empty when
/// `end_time` is negative.
pub fn time_slots(end_time: Minute, step: u32) -> Vec<Minute> {
    let step = i64::from(step.max(1));
    (0..)
        .map(|i| Minute(i * step))
        .take_while(|slot| *slot <= end_time)
        .collect()
}

/// Whether `table` is occupied at `slot` by the first visible group covering
/// it.
pub fn slot_status(
    visible: &[&OccupancyGroup],
    table: TableId,
    slot: Minute,
    shift_start: NaiveDateTime,
) -> SlotStatus {
    visible
        .iter()
        .find(|g| g.covers(slot) && g.table_ids.contains(&table))
        .map_or(SlotStatus::Free, |g| SlotStatus::Occupied {
            start: offset_to_clock(g.start, shift_start),
            end:   offset_to_clock(g.end(), shift_start),
        })
}

/// A rendered grid snapshot at one playback time.
#[derive(Clone, Debug)]
pub struct OccupancyGrid {
    pub slots: Vec<Minute>,
    /// `HH:MM` label per slot.
    pub labels: Vec<String>,
    /// One row per admitted table, ascending id.
    pub rows: Vec<(TableId, Vec<SlotStatus>)>,
}

impl OccupancyGrid {
    /// Grid of the tables admitted by `capacity_filter`, showing only the
    /// groups visible at playback time `at`.
    pub fn build(data: &SimulationData, capacity_filter: &str, at: Minute, slot_minutes: u32) -> Self {
        let slots = time_slots(data.end_time, slot_minutes);
        let labels = slots.iter().map(|&s| offset_to_clock(s, data.shift_start)).collect();
        let visible = visible_occupancies(&data.occupancy_groups, at);

        let rows = filtered_table_ids(&data.tables, capacity_filter)
            .into_iter()
            .map(|table| {
                let cells = slots
                    .iter()
                    .map(|&slot| slot_status(&visible, table, slot, data.shift_start))
                    .collect();
                (table, cells)
            })
            .collect();

        Self { slots, labels, rows }
    }

    /// Occupied cells per slot column.
    pub fn occupied_per_slot(&self) -> Vec<usize> {
        (0..self.slots.len())
            .map(|i| self.rows.iter().filter(|(_, cells)| cells[i].is_occupied()).count())
            .collect()
    }
}
