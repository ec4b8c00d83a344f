//! Replay time model and wall-clock formatting.
//!
//! # Design
//!
//! Time on the replay timeline is a signed `Minute` offset.  Two different
//! origins are in play:
//!
//! - **arrival offsets** are relative to the earliest booked arrival of the
//!   filtered reservation set, so the first arrival is `Minute(0)`;
//! - **creation-relative** offsets are relative to `shift_start` (the earliest
//!   booked wall-clock time) and are usually negative, since bookings are made
//!   before the shift.
//!
//! Both map to wall-clock time through [`ShiftClock`]:
//!
//!   wall_time = shift_start + minutes
//!
//! Wall-clock values are `chrono::NaiveDateTime` in the restaurant's local
//! representation.  No time zone is attached; the source data has none.

use std::fmt;

use chrono::{NaiveDateTime, NaiveTime, TimeDelta, Timelike};

use crate::{TrError, TrResult};

// ── Minute ────────────────────────────────────────────────────────────────────

/// A signed minute offset on the replay timeline.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Minute(pub i64);

impl Minute {
    pub const ZERO: Minute = Minute(0);

    /// Return the minute `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u32) -> Minute {
        Minute(self.0 + n as i64)
    }
}

impl std::ops::Add<i64> for Minute {
    type Output = Minute;
    #[inline]
    fn add(self, rhs: i64) -> Minute {
        Minute(self.0 + rhs)
    }
}

impl std::ops::Sub for Minute {
    type Output = i64;
    #[inline]
    fn sub(self, rhs: Minute) -> i64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Minute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}m", self.0)
    }
}

// ── ShiftClock ────────────────────────────────────────────────────────────────

/// Converts between replay minutes and wall-clock timestamps for one shift.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShiftClock {
    /// Wall-clock time of `Minute(0)`.
    pub shift_start: NaiveDateTime,
}

impl ShiftClock {
    pub fn new(shift_start: NaiveDateTime) -> Self {
        Self { shift_start }
    }

    /// Wall-clock timestamp for `minute`.
    #[inline]
    pub fn at(&self, minute: Minute) -> NaiveDateTime {
        self.shift_start + TimeDelta::minutes(minute.0)
    }

    /// Offset of `stamp` from the shift start, floored to whole minutes.
    #[inline]
    pub fn minute_of(&self, stamp: NaiveDateTime) -> Minute {
        Minute(minutes_between(stamp, self.shift_start))
    }

    /// `HH:MM` label for `minute`.
    pub fn clock(&self, minute: Minute) -> String {
        offset_to_clock(minute, self.shift_start)
    }
}

impl fmt::Display for ShiftClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shift@{}", format_stamp(self.shift_start))
    }
}

// ── Formatting ────────────────────────────────────────────────────────────────

/// `base + minutes` as a 24-hour `HH:MM` label.
pub fn offset_to_clock(minutes: Minute, base: NaiveDateTime) -> String {
    (base + TimeDelta::minutes(minutes.0)).format("%H:%M").to_string()
}

/// `YYYY-MM-DD HH:MM` for `stamp`.
pub fn format_stamp(stamp: NaiveDateTime) -> String {
    stamp.format("%Y-%m-%d %H:%M").to_string()
}

/// Whole minutes from `earlier` to `later`, rounded towards negative infinity.
///
/// A stamp 30 s before `earlier` yields `-1`, not `0`.
pub fn minutes_between(later: NaiveDateTime, earlier: NaiveDateTime) -> i64 {
    (later - earlier).num_seconds().div_euclid(60)
}

// ── Parsing ───────────────────────────────────────────────────────────────────

const STAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
];

/// Parse a `YYYY-MM-DD HH:MM` timestamp (seconds and a `T` separator are
/// also accepted).
pub fn parse_stamp(s: &str) -> TrResult<NaiveDateTime> {
    let s = s.trim();
    STAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| TrError::Parse(format!("invalid timestamp {s:?}: expected YYYY-MM-DD HH:MM")))
}

/// Parse an `HH:MM` (or `HH:MM:SS`) wall-clock time.
pub fn parse_clock(s: &str) -> TrResult<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| TrError::Parse(format!("invalid time {s:?}: expected HH:MM")))
}

/// Minutes since midnight (`hours * 60 + minutes`); seconds are ignored.
#[inline]
pub fn minutes_of_day(time: NaiveTime) -> i64 {
    time.hour() as i64 * 60 + time.minute() as i64
}
