//! `tr-records`: turns raw table-layout and reservation rows into typed
//! records for one simulation run.
//!
//! # Crate layout
//!
//! | Module           | Contents                                               |
//! |------------------|--------------------------------------------------------|
//! | [`table`]        | `Table`, `OccupancyEntry`, `TableMap`, `Reservation`   |
//! | [`shift`]        | `MealShift`, `RecordFilter`, `CONFIRMED_STATUSES`      |
//! | [`layout`]       | `load_tables_csv`, `load_tables_reader`, `decode_table_list` |
//! | [`reservations`] | `load_reservations_csv`, `load_reservations_reader`, `parse_table_ids` |
//! | [`report`]       | `ParseReport`                                          |
//! | [`error`]        | `RecordError`, `RecordResult<T>`                       |
//!
//! # Failure model
//!
//! A row that cannot be decoded is a *malformed record*: it is logged,
//! counted in the [`ParseReport`], and skipped.  The batch never aborts for
//! data problems; only I/O errors are returned.  When nothing matches the
//! filter the loaders return empty collections and leave it to the caller to
//! decide that there is nothing to simulate.

pub mod error;
pub mod layout;
pub mod report;
pub mod reservations;
pub mod shift;
pub mod table;

#[cfg(test)]
mod tests;

pub use error::{RecordError, RecordResult};
pub use layout::{decode_table_list, load_tables_csv, load_tables_reader};
pub use report::ParseReport;
pub use reservations::{load_reservations_csv, load_reservations_reader, parse_table_ids};
pub use shift::{CONFIRMED_STATUSES, MealShift, RecordFilter, is_confirmed};
pub use table::{OccupancyEntry, Reservation, Table, TableMap};
