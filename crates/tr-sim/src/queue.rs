//! `EventQueue`: time-keyed list of explicit replay events.
//!
//! # Ordering
//!
//! Events are grouped per `Minute` in a `BTreeMap`, so popping always yields
//! the earliest time first.  Within one minute events come out in the order
//! they were pushed.  Together with the stable arrival sort done before
//! scheduling, that makes a replay fully reproducible.
//!
//! An event names its reservation by `ReservationId` rather than holding a
//! callback; the interpreter loop in [`Replay`][crate::Replay] looks up the
//! reservation and mutates table state itself.

use std::collections::BTreeMap;
use std::fmt;

use tr_core::{Minute, ReservationId};

// ── Event ─────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EventKind {
    /// Mark every table of the reservation occupied.
    Occupy,
    /// Mark them free and append the interval to each table's log.
    Release,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub time:        Minute,
    pub kind:        EventKind,
    pub reservation: ReservationId,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {} at {}", self.kind, self.reservation, self.time)
    }
}

// ── EventQueue ────────────────────────────────────────────────────────────────

/// A priority queue mapping replay minutes → events due at that minute.
#[derive(Default, Debug)]
pub struct EventQueue {
    inner: BTreeMap<Minute, Vec<Event>>,
    /// Cached total event count for O(1) `len()`.
    total: usize,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `kind` for `reservation` at `time`.
    pub fn push(&mut self, time: Minute, kind: EventKind, reservation: ReservationId) {
        self.inner.entry(time).or_default().push(Event { time, kind, reservation });
        self.total += 1;
    }

    /// Remove and return every event of the earliest scheduled minute, in
    /// push order.  `None` once the queue is empty.
    pub fn pop_next(&mut self) -> Option<(Minute, Vec<Event>)> {
        let (time, events) = self.inner.pop_first()?;
        self.total -= events.len();
        Some((time, events))
    }

    /// The earliest minute with at least one queued event, or `None` if empty.
    pub fn next_time(&self) -> Option<Minute> {
        self.inner.keys().next().copied()
    }

    /// Total number of queued events across all minutes.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of distinct minutes that have at least one queued event.
    pub fn time_count(&self) -> usize {
        self.inner.len()
    }
}
