//! `tr-core`: foundational types for the `table_replay` workspace.
//!
//! This crate is a dependency of every other `tr-*` crate.  It has no `tr-*`
//! dependencies and only `chrono` and `thiserror` externally, plus optional
//! `serde`.
//!
//! # What lives here
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`ids`]    | `TableId`, `ReservationId`                                 |
//! | [`time`]   | `Minute`, `ShiftClock`, `offset_to_clock`, `format_stamp`  |
//! | [`config`] | `ReplayConfig`, `ConflictPolicy`, `UntabledPolicy`         |
//! | [`error`]  | `TrError`, `TrResult`                                      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod ids;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{ConflictPolicy, ReplayConfig, UntabledPolicy};
pub use error::{TrError, TrResult};
pub use ids::{ReservationId, TableId};
pub use time::{
    Minute, ShiftClock, format_stamp, minutes_between, minutes_of_day, offset_to_clock,
    parse_clock, parse_stamp,
};
