//! `tr-sim`: discrete-event occupancy replay for the table_replay workspace.
//!
//! # Replay
//!
//! ```text
//! SimulationBuilder::build  → SimulationData (tables, reservations, bounds)
//! Replay::run:
//!   ① Schedule:  reservations in stable arrival order; skip missing tables,
//!                detect overlaps, push Occupy/Release into EventQueue.
//!   ② Interpret: pop minutes in order; Occupy marks tables occupied,
//!                Release frees them and appends to each table's log.
//!   ③ Group:     merge identical log entries into OccupancyGroups and
//!                tighten the slider bounds.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                   |
//! |------------|----------------------------------------------------------|
//! | `parallel` | `replay_batch` runs independent replays on Rayon.        |
//! | `fx-hash`  | FxHash for the occupancy-group index.                    |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use tr_core::ReplayConfig;
//! use tr_records::{MealShift, RecordFilter};
//! use tr_sim::{NoopObserver, Replay, SimulationBuilder};
//!
//! let filter = RecordFilter::new(date, MealShift::Dinner, "Casa Pepe");
//! let data = SimulationBuilder::new(filter, config.clone())
//!     .load(layout_file, reservations_file)?
//!     .build()?;
//! let outcome = Replay::new(data, &config).run(&mut NoopObserver);
//! ```

pub mod batch;
pub mod builder;
pub mod data;
pub mod diagnostics;
pub mod error;
pub mod group;
pub mod observer;
pub mod queue;
pub mod replay;


pub use batch::replay_batch;
pub use builder::SimulationBuilder;
pub use data::{OccupancyGroup, SimulationData};
pub use diagnostics::{Interval, ReplayDiagnostics};
pub use error::{SimError, SimResult};
pub use group::group_occupancy;
pub use observer::{NoopObserver, ReplayObserver};
pub use queue::{Event, EventKind, EventQueue};
pub use replay::{Replay, ReplayOutcome, run_simulation};
