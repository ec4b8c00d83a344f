//! Table filtering and reveal-by-creation visibility.

use std::collections::BTreeSet;
use std::fmt;

use log::debug;

use tr_core::{Minute, TableId};
use tr_records::TableMap;
use tr_sim::OccupancyGroup;

/// A parsed capacity selector.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CapacityFilter {
    /// Every table.
    All,
    /// Tables whose `max_capacity` equals the value.
    Exact(u32),
    /// Unparseable selector; matches nothing.
    Invalid,
}

impl CapacityFilter {
    /// `"All"` (any case, surrounding blanks ignored) or a base-10 capacity.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text.eq_ignore_ascii_case("all") {
            return CapacityFilter::All;
        }
        match text.parse::<u32>() {
            Ok(capacity) => CapacityFilter::Exact(capacity),
            Err(_) => {
                debug!("capacity filter {text:?} is not a number; nothing matches");
                CapacityFilter::Invalid
            }
        }
    }

    #[inline]
    pub fn admits(self, capacity: u32) -> bool {
        match self {
            CapacityFilter::All => true,
            CapacityFilter::Exact(c) => c == capacity,
            CapacityFilter::Invalid => false,
        }
    }
}

impl fmt::Display for CapacityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapacityFilter::All => f.write_str("All"),
            CapacityFilter::Exact(c) => write!(f, "{c}"),
            CapacityFilter::Invalid => f.write_str("(invalid)"),
        }
    }
}

/// Ids of the tables admitted by `capacity_filter`, ascending.
pub fn filtered_table_ids(tables: &TableMap, capacity_filter: &str) -> Vec<TableId> {
    let filter = CapacityFilter::parse(capacity_filter);
    tables
        .values()
        .filter(|t| filter.admits(t.max_capacity))
        .map(|t| t.table_id)
        .collect()
}

/// Groups already booked at playback time `at`: `creation_rel ≤ at`.
///
/// Keeps the input order.  Growing `at` never removes a group.
pub fn visible_occupancies(groups: &[OccupancyGroup], at: Minute) -> Vec<&OccupancyGroup> {
    groups.iter().filter(|g| g.creation_rel <= at).collect()
}

/// Distinct table capacities, ascending.
pub fn capacity_options(tables: &TableMap) -> Vec<u32> {
    tables
        .values()
        .map(|t| t.max_capacity)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
