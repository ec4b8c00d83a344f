//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `table_occupancy.csv`
//! - `occupancy_groups.csv`
//! - `replay_summary.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;
use log::info;

use crate::writer::OutputWriter;
use crate::{OccupancyGroupRow, OutputResult, ReplaySummaryRow, TableOccupancyRow};

/// Writes replay output to three CSV files.
pub struct CsvWriter {
    occupancy: Writer<File>,
    groups:    Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the three CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut occupancy = Writer::from_path(dir.join("table_occupancy.csv"))?;
        occupancy.write_record([
            "table_id", "start", "end", "start_clock", "end_clock", "creation", "reservation",
        ])?;

        let mut groups = Writer::from_path(dir.join("occupancy_groups.csv"))?;
        groups.write_record([
            "tables", "start", "duration", "start_clock", "end_clock", "creation", "reservation",
            "advance_minutes", "creation_rel",
        ])?;

        let mut summaries = Writer::from_path(dir.join("replay_summary.csv"))?;
        summaries.write_record([
            "date", "meal_shift", "restaurant", "shift_start", "tables", "reservations",
            "scheduled", "conflicts", "rejected", "missing_table_skips", "events_fired",
            "occupancy_groups", "end_time", "min_slider", "max_slider",
        ])?;

        info!("writing replay CSV output to {}", dir.display());
        Ok(Self { occupancy, groups, summaries, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_table_occupancy(&mut self, row: &TableOccupancyRow) -> OutputResult<()> {
        self.occupancy.write_record(&[
            row.table_id.to_string(),
            row.start.to_string(),
            row.end.to_string(),
            row.start_clock.clone(),
            row.end_clock.clone(),
            row.creation.clone(),
            row.reservation.clone(),
        ])?;
        Ok(())
    }

    fn write_groups(&mut self, rows: &[OccupancyGroupRow]) -> OutputResult<()> {
        for row in rows {
            self.groups.write_record(&[
                row.tables.clone(),
                row.start.to_string(),
                row.duration.to_string(),
                row.start_clock.clone(),
                row.end_clock.clone(),
                row.creation.clone(),
                row.reservation.clone(),
                row.advance_minutes.to_string(),
                row.creation_rel.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_summary(&mut self, row: &ReplaySummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.date.clone(),
            row.meal_shift.clone(),
            row.restaurant.clone(),
            row.shift_start.clone(),
            row.tables.to_string(),
            row.reservations.to_string(),
            row.scheduled.to_string(),
            row.conflicts.to_string(),
            row.rejected.to_string(),
            row.missing_table_skips.to_string(),
            row.events_fired.to_string(),
            row.occupancy_groups.to_string(),
            row.end_time.to_string(),
            row.min_slider.to_string(),
            row.max_slider.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.occupancy.flush()?;
        self.groups.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
