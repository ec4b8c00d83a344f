//! `tr-output`: replay output writers for the table_replay workspace.
//!
//! Two backends are provided:
//!
//! | Feature   | Backend | Files created                                                        |
//! |-----------|---------|----------------------------------------------------------------------|
//! | *(none)*  | CSV     | `table_occupancy.csv`, `occupancy_groups.csv`, `replay_summary.csv`  |
//! | `sqlite`  | SQLite  | `replay.db`                                                          |
//!
//! Both implement [`OutputWriter`] and are driven by
//! [`ReplayOutputObserver`], which implements `tr_sim::ReplayObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use tr_output::{CsvWriter, ReplayOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = ReplayOutputObserver::new(writer, data.clock());
//! let outcome = Replay::new(data, &config).run(&mut obs);
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use self::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::ReplayOutputObserver;
pub use row::{OccupancyGroupRow, ReplaySummaryRow, TableOccupancyRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
