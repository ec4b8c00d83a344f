//! Row selection: meal shift, status allow-list, and the date/shift/restaurant
//! filter shared by both loaders.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::{RecordError, RecordResult};

// ── MealShift ─────────────────────────────────────────────────────────────────

/// A named service period partitioning a day's reservations.
///
/// Reservation rows carry the label (`Comida` / `Cena`); table-layout rows
/// usually carry the numeric code (`1` / `2`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MealShift {
    Lunch,
    Dinner,
}

impl MealShift {
    /// Label used in the reservation data.
    pub fn label(self) -> &'static str {
        match self {
            MealShift::Lunch  => "Comida",
            MealShift::Dinner => "Cena",
        }
    }

    /// Numeric code used in the table-layout data.
    pub fn code(self) -> &'static str {
        match self {
            MealShift::Lunch  => "1",
            MealShift::Dinner => "2",
        }
    }

    /// `true` if `field` names this shift by label or by code.
    pub fn matches(self, field: &str) -> bool {
        let field = field.trim();
        field == self.label() || field == self.code()
    }
}

impl FromStr for MealShift {
    type Err = RecordError;

    fn from_str(s: &str) -> RecordResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "comida" | "lunch" | "1"  => Ok(MealShift::Lunch),
            "cena" | "dinner" | "2"   => Ok(MealShift::Dinner),
            other => Err(RecordError::MalformedRow(format!(
                "unknown meal shift {other:?}: expected Comida/Cena, lunch/dinner, or 1/2"
            ))),
        }
    }
}

impl fmt::Display for MealShift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Status allow-list ─────────────────────────────────────────────────────────

/// Status labels meaning the booking actually materialized.  Any other status
/// (cancelled, no-show, pending, …) is excluded from replay.
pub const CONFIRMED_STATUSES: [&str; 6] = [
    "Sentada",
    "Cuenta solicitada",
    "Liberada",
    "Llegada",
    "Confirmada",
    "Re-Confirmada",
];

pub fn is_confirmed(status: &str) -> bool {
    CONFIRMED_STATUSES.contains(&status.trim())
}

// ── RecordFilter ──────────────────────────────────────────────────────────────

/// Selects the rows of one simulation run.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecordFilter {
    pub date:       NaiveDate,
    pub shift:      MealShift,
    pub restaurant: String,
}

impl RecordFilter {
    pub fn new(date: NaiveDate, shift: MealShift, restaurant: impl Into<String>) -> Self {
        Self { date, shift, restaurant: restaurant.into() }
    }

    /// `true` if the three row fields select this run.  Rows whose date does
    /// not parse never match.
    pub fn matches(&self, date: &str, shift: &str, restaurant: &str) -> bool {
        restaurant.trim() == self.restaurant
            && self.shift.matches(shift)
            && NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").is_ok_and(|d| d == self.date)
    }
}

impl fmt::Display for RecordFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} @ {}", self.date, self.shift, self.restaurant)
    }
}
