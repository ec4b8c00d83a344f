//! `tr-timeline`: read-only queries over a replayed [`SimulationData`].
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`query`]    | `filtered_table_ids`, `visible_occupancies`, capacities    |
//! | [`grid`]     | `time_slots`, `slot_status`, `OccupancyGrid`                |
//! | [`playback`] | `Playback` cursor over the slider range                     |
//! | [`stats`]    | `SimulationSummary`                                         |
//!
//! Nothing here mutates the replay result; every function borrows it.
//!
//! [`SimulationData`]: tr_sim::SimulationData

pub mod grid;
pub mod playback;
pub mod query;
pub mod stats;

#[cfg(test)]
mod tests;

pub use grid::{OccupancyGrid, SlotStatus, slot_status, time_slots};
pub use playback::Playback;
pub use query::{CapacityFilter, capacity_options, filtered_table_ids, visible_occupancies};
pub use stats::SimulationSummary;
