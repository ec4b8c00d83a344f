//! Fluent builder that prepares a [`SimulationData`] for replay.

use std::io::Read;

use log::{error, info};

use tr_core::{Minute, ReplayConfig};
use tr_records::{
    ParseReport, RecordFilter, Reservation, TableMap, load_reservations_reader, load_tables_reader,
};

use crate::{SimError, SimResult, SimulationData};

/// Fluent builder for [`SimulationData`].
///
/// # Required inputs
///
/// - [`RecordFilter`]: the date, shift, and restaurant of the run
/// - [`ReplayConfig`]: end buffer and the other run parameters
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default      |
/// |----------------------|--------------|
/// | `.tables(m)`         | empty map    |
/// | `.reservations(v)`   | empty list   |
///
/// [`load`](Self::load) keeps the row accounting of both sources; read it
/// back with [`layout_report`](Self::layout_report) and
/// [`reservation_report`](Self::reservation_report) before building.
///
/// `build` refuses to produce a degenerate run: zero tables or zero
/// reservations is [`SimError::NothingToSimulate`].
///
/// # Example
///
/// ```rust,ignore
/// let data = SimulationBuilder::new(filter, config.clone())
///     .tables(tables)
///     .reservations(reservations)
///     .build()?;
/// let outcome = Replay::new(data, config).run(&mut NoopObserver);
/// ```
pub struct SimulationBuilder {
    filter:             RecordFilter,
    config:             ReplayConfig,
    tables:             Option<TableMap>,
    reservations:       Option<Vec<Reservation>>,
    layout_report:      Option<ParseReport>,
    reservation_report: Option<ParseReport>,
}

impl SimulationBuilder {
    /// Create a builder with all required inputs.
    pub fn new(filter: RecordFilter, config: ReplayConfig) -> Self {
        Self {
            filter,
            config,
            tables: None,
            reservations: None,
            layout_report: None,
            reservation_report: None,
        }
    }

    /// Supply the table map.  Each run needs its own fresh map.
    pub fn tables(mut self, tables: TableMap) -> Self {
        self.tables = Some(tables);
        self
    }

    /// Supply the parsed reservations (arrival offsets already normalized).
    pub fn reservations(mut self, reservations: Vec<Reservation>) -> Self {
        self.reservations = Some(reservations);
        self
    }

    /// Parse both CSV sources with the builder's filter and config, then
    /// supply the results and keep both parse reports.
    pub fn load<L: Read, R: Read>(mut self, layout: L, reservations: R) -> SimResult<Self> {
        let (tables, layout_report) = load_tables_reader(layout, &self.filter)?;
        let (reservations, reservation_report) =
            load_reservations_reader(reservations, &self.filter, &self.config)?;
        self.layout_report = Some(layout_report);
        self.reservation_report = Some(reservation_report);
        Ok(self.tables(tables).reservations(reservations))
    }

    /// Row accounting of the layout source, if it came through [`load`](Self::load).
    pub fn layout_report(&self) -> Option<ParseReport> {
        self.layout_report
    }

    /// Row accounting of the reservation source, if it came through [`load`](Self::load).
    pub fn reservation_report(&self) -> Option<ParseReport> {
        self.reservation_report
    }

    /// Validate inputs, derive the timeline bounds, and return a ready-to-replay
    /// [`SimulationData`].
    pub fn build(self) -> SimResult<SimulationData> {
        let Self { filter, config, tables, reservations, layout_report, reservation_report } = self;
        config.validate()?;

        if let Some(report) = layout_report {
            info!("layout rows: {report}");
        }
        if let Some(report) = reservation_report {
            info!("reservation rows: {report}");
        }

        let tables = tables.unwrap_or_default();
        let reservations = reservations.unwrap_or_default();

        // ── Refuse degenerate runs ────────────────────────────────────────
        let (Some(shift_start), Some(max_time), Some(min_time), Some(max_duration)) = (
            reservations.iter().map(|r| r.reservation_datetime).min(),
            reservations.iter().map(|r| r.arrival_time).max(),
            reservations.iter().map(|r| r.arrival_time).min(),
            reservations.iter().map(|r| r.duration).max(),
        ) else {
            return Err(nothing_to_simulate(&filter, tables.len(), 0));
        };
        if tables.is_empty() {
            return Err(nothing_to_simulate(&filter, 0, reservations.len()));
        }

        // ── Derive bounds ─────────────────────────────────────────────────
        //
        // No reservation can end after max arrival + max duration, so every
        // release event lands at or before end_time.
        let end_time = max_time.offset(max_duration).offset(config.end_buffer_minutes);

        info!(
            "prepared {filter} with {} tables and {} reservations (end {end_time})",
            tables.len(),
            reservations.len()
        );

        Ok(SimulationData {
            tables,
            reservations,
            occupancy_groups: Vec::new(),
            min_time,
            max_time,
            shift_start,
            end_time,
            min_slider_val:   Minute::ZERO,
            max_slider_val:   end_time,
            day:              filter.date,
            meal_shift:       filter.shift,
            restaurant_id:    filter.restaurant,
        })
    }
}

fn nothing_to_simulate(filter: &RecordFilter, tables: usize, reservations: usize) -> SimError {
    error!("no valid tables or reservations found for {filter}");
    SimError::NothingToSimulate { what: filter.to_string(), tables, reservations }
}
