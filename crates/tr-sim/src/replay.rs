//! The `Replay` runner: schedule, interpret, group.

use std::collections::HashMap;

use log::{debug, info, warn};

use tr_core::{ConflictPolicy, ReplayConfig, ReservationId, TableId};
use tr_records::OccupancyEntry;

use crate::group::group_occupancy;
use crate::queue::{Event, EventKind, EventQueue};
use crate::{Interval, NoopObserver, ReplayDiagnostics, ReplayObserver, SimulationData};

/// Result of one replay: the populated data plus its counters.
#[derive(Clone, Debug)]
pub struct ReplayOutcome {
    pub data:        SimulationData,
    pub diagnostics: ReplayDiagnostics,
}

/// One replay of one [`SimulationData`].
///
/// Everything mutable during the run (the event queue, the accepted windows
/// per table, the table states) lives in this value, so independent replays
/// never share state.
///
/// # Phases
///
/// 1. **Schedule**: reservations in stable arrival order.  A reservation
///    claiming a table missing from the layout is skipped.  One that overlaps
///    an accepted window is counted as a conflict and then either accepted or
///    rejected per [`ConflictPolicy`].  Accepted reservations push an
///    `Occupy` event at arrival and a `Release` event at arrival + duration.
/// 2. **Interpret**: events fire in time order, push order within a minute.
///    Events after `end_time` are dropped.
/// 3. **Group**: table logs fold into `occupancy_groups`; slider bounds are
///    tightened to the creation-relative range of the groups.
pub struct Replay {
    policy:      ConflictPolicy,
    data:        SimulationData,
    queue:       EventQueue,
    /// Accepted windows per table, for conflict detection.
    booked:      HashMap<TableId, Vec<Interval>>,
    diagnostics: ReplayDiagnostics,
}

impl Replay {
    /// Prepare a replay.  Table states and logs left over from an earlier
    /// replay of the same data are cleared.
    pub fn new(mut data: SimulationData, config: &ReplayConfig) -> Self {
        if data.logged_intervals() > 0 || !data.occupancy_groups.is_empty() {
            debug!("clearing occupancy left over from a previous replay");
        }
        for table in data.tables.values_mut() {
            table.occupied = false;
            table.occupancy_log.clear();
        }
        data.occupancy_groups.clear();

        Self {
            policy: config.conflict_policy,
            data,
            queue: EventQueue::new(),
            booked: HashMap::new(),
            diagnostics: ReplayDiagnostics::default(),
        }
    }

    /// Run all three phases and return the populated data.
    pub fn run<O: ReplayObserver>(mut self, observer: &mut O) -> ReplayOutcome {
        self.schedule(observer);
        self.interpret(observer);

        let Self { mut data, diagnostics, .. } = self;
        data.occupancy_groups = group_occupancy(&data.tables, data.shift_start);

        let creation = data.occupancy_groups.iter().map(|g| g.creation_rel);
        if let (Some(min), Some(max)) = (creation.clone().min(), creation.max()) {
            data.min_slider_val = min;
            data.max_slider_val = max;
        }

        info!(
            "replayed {} {} @ {}: {} occupancy groups; {diagnostics}",
            data.day,
            data.meal_shift,
            data.restaurant_id,
            data.occupancy_groups.len()
        );
        observer.on_replay_end(&data, &diagnostics);

        ReplayOutcome { data, diagnostics }
    }

    // ── Phase 1 ───────────────────────────────────────────────────────────

    fn schedule<O: ReplayObserver>(&mut self, observer: &mut O) {
        let reservations = &self.data.reservations;
        let tables = &self.data.tables;

        let mut order: Vec<ReservationId> =
            (0..reservations.len() as u32).map(ReservationId).collect();
        // `sort_by_key` is stable: equal arrivals keep input order.
        order.sort_by_key(|id| reservations[id.index()].arrival_time);

        for id in order {
            let reservation = &reservations[id.index()];

            let missing: Vec<TableId> = reservation
                .table_ids
                .iter()
                .filter(|t| !tables.contains_key(t))
                .copied()
                .collect();
            if !missing.is_empty() {
                warn!("{id} claims tables missing from the layout: {missing:?}; skipped");
                self.diagnostics.missing_table_skips += 1;
                observer.on_reservation_skipped(id, &missing);
                continue;
            }

            let window = Interval { start: reservation.arrival_time, end: reservation.end_time() };

            let mut conflicted = false;
            for &table in &reservation.table_ids {
                let existing = self
                    .booked
                    .get(&table)
                    .and_then(|windows| windows.iter().find(|w| w.overlaps(&window)));
                if let Some(&existing) = existing {
                    debug!("{id} ({window}) overlaps {existing} on {table}");
                    observer.on_conflict(id, table, existing);
                    conflicted = true;
                }
            }
            if conflicted {
                self.diagnostics.conflicts += 1;
                if self.policy == ConflictPolicy::Reject {
                    self.diagnostics.rejected += 1;
                    continue;
                }
            }

            for &table in &reservation.table_ids {
                self.booked.entry(table).or_default().push(window);
            }
            self.queue.push(window.start, EventKind::Occupy, id);
            self.queue.push(window.end, EventKind::Release, id);
            self.diagnostics.scheduled += 1;
        }

        debug!(
            "scheduled {} events over {} distinct minutes",
            self.queue.len(),
            self.queue.time_count()
        );
    }

    // ── Phase 2 ───────────────────────────────────────────────────────────

    fn interpret<O: ReplayObserver>(&mut self, observer: &mut O) {
        let end_time = self.data.end_time;

        while let Some((time, events)) = self.queue.pop_next() {
            if time > end_time {
                warn!("{} events at {time} fall after end {end_time}; dropped", events.len());
                self.diagnostics.events_after_end += events.len();
                continue;
            }
            for event in events {
                observer.on_event(&event);
                self.apply(event, observer);
                self.diagnostics.events_fired += 1;
            }
        }
    }

    fn apply<O: ReplayObserver>(&mut self, event: Event, observer: &mut O) {
        let SimulationData { tables, reservations, .. } = &mut self.data;
        let reservation = &reservations[event.reservation.index()];

        match event.kind {
            EventKind::Occupy => {
                for table_id in &reservation.table_ids {
                    if let Some(table) = tables.get_mut(table_id) {
                        table.occupied = true;
                    }
                }
            }
            EventKind::Release => {
                let entry = OccupancyEntry {
                    start:       reservation.arrival_time,
                    end:         reservation.end_time(),
                    creation:    reservation.creation_datetime,
                    reservation: reservation.reservation_datetime,
                };
                for table_id in &reservation.table_ids {
                    if let Some(table) = tables.get_mut(table_id) {
                        table.occupied = false;
                        table.occupancy_log.push(entry);
                        observer.on_release(*table_id, &entry);
                    }
                }
            }
        }
    }
}

/// Replay `data` with no observer.
pub fn run_simulation(data: SimulationData, config: &ReplayConfig) -> ReplayOutcome {
    Replay::new(data, config).run(&mut NoopObserver)
}
