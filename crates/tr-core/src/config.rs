//! Replay configuration and policy switches.
//!
//! Two behaviors that historically differed between replay strategies are
//! explicit policies here rather than code paths:
//!
//! | Policy            | Canonical | Alternative                               |
//! |-------------------|-----------|-------------------------------------------|
//! | [`ConflictPolicy`]| `Accept`  | `Reject` overlapping reservations         |
//! | [`UntabledPolicy`]| `Drop`    | `Keep` reservations with no table ids     |
//!
//! A single run uses exactly one value of each.

use std::fmt;

/// What the engine does with a reservation whose tables overlap an already
/// accepted reservation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ConflictPolicy {
    /// Replay as historical fact: count and log the conflict, schedule anyway.
    #[default]
    Accept,
    /// Exclude the conflicting reservation from occupancy.
    Reject,
}

impl fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictPolicy::Accept => f.write_str("accept"),
            ConflictPolicy::Reject => f.write_str("reject"),
        }
    }
}

/// What the record parser does with a reservation that resolves to zero
/// table ids.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum UntabledPolicy {
    /// Drop the row, counting and logging it.
    #[default]
    Drop,
    /// Keep it with an empty table list.  It occupies nothing during replay.
    Keep,
}

/// Top-level replay configuration.
///
/// Typically loaded from a JSON file by the application crate and passed to
/// both the record parser and the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReplayConfig {
    pub conflict_policy: ConflictPolicy,

    pub untabled_policy: UntabledPolicy,

    /// Duration assumed when a reservation row has none.  Default: 90.
    pub default_duration_minutes: u32,

    /// Party size assumed when a reservation row has none.  Default: 1.
    pub default_party_size: u32,

    /// Minutes added after the last possible release when computing
    /// `end_time`.  Default: 10.
    pub end_buffer_minutes: u32,

    /// Playback cursor step.  Default: 10.
    pub playback_step_minutes: u32,

    /// Width of one timeline grid column.  Default: 30.
    pub slot_minutes: u32,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            conflict_policy:          ConflictPolicy::Accept,
            untabled_policy:          UntabledPolicy::Drop,
            default_duration_minutes: 90,
            default_party_size:       1,
            end_buffer_minutes:       10,
            playback_step_minutes:    10,
            slot_minutes:             30,
        }
    }
}

impl ReplayConfig {
    /// Reject values that would make the timeline degenerate.
    pub fn validate(&self) -> crate::TrResult<()> {
        if self.default_duration_minutes == 0 {
            return Err(crate::TrError::Config("default_duration_minutes must be > 0".into()));
        }
        if self.default_party_size == 0 {
            return Err(crate::TrError::Config("default_party_size must be > 0".into()));
        }
        if self.playback_step_minutes == 0 || self.slot_minutes == 0 {
            return Err(crate::TrError::Config(
                "playback_step_minutes and slot_minutes must be > 0".into(),
            ));
        }
        Ok(())
    }
}
