//! Folding per-table occupancy logs into `OccupancyGroup`s.

use chrono::NaiveDateTime;

use tr_core::{ShiftClock, minutes_between};
use tr_records::{OccupancyEntry, TableMap};

use crate::OccupancyGroup;

#[cfg(feature = "fx-hash")]
type GroupIndex = rustc_hash::FxHashMap<OccupancyEntry, usize>;
#[cfg(not(feature = "fx-hash"))]
type GroupIndex = std::collections::HashMap<OccupancyEntry, usize>;

/// Merge every log entry sharing `(start, end, creation, reservation)` into
/// one group, sorted by `start` ascending.
///
/// Tables are scanned in ascending id order, so each group's `table_ids` is
/// ascending and groups with equal `start` keep first-seen order.
pub fn group_occupancy(tables: &TableMap, shift_start: NaiveDateTime) -> Vec<OccupancyGroup> {
    let clock = ShiftClock::new(shift_start);
    let mut index = GroupIndex::default();
    let mut groups: Vec<OccupancyGroup> = Vec::new();

    for table in tables.values() {
        for entry in &table.occupancy_log {
            let slot = *index.entry(*entry).or_insert_with(|| {
                groups.push(OccupancyGroup {
                    table_ids:    Vec::new(),
                    start:        entry.start,
                    duration:     (entry.end - entry.start) as u32,
                    creation:     entry.creation,
                    reservation:  entry.reservation,
                    advance:      minutes_between(entry.reservation, entry.creation),
                    creation_rel: clock.minute_of(entry.creation),
                });
                groups.len() - 1
            });

            // A table logging the same tuple twice still appears once.
            let ids = &mut groups[slot].table_ids;
            if ids.last() != Some(&table.table_id) {
                ids.push(table.table_id);
            }
        }
    }

    groups.sort_by_key(|g| g.start);
    groups
}
