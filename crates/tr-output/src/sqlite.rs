//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `replay.db` file in the configured output directory with
//! three tables: `table_occupancy`, `occupancy_groups` and `replay_summary`.

use std::path::Path;

use log::info;
use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{OccupancyGroupRow, OutputResult, ReplaySummaryRow, TableOccupancyRow};

/// Writes replay output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `replay.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let path = dir.join("replay.db");
        let conn = Connection::open(&path)?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS table_occupancy (
                 table_id    INTEGER NOT NULL,
                 start       INTEGER NOT NULL,
                 end         INTEGER NOT NULL,
                 start_clock TEXT    NOT NULL,
                 end_clock   TEXT    NOT NULL,
                 creation    TEXT    NOT NULL,
                 reservation TEXT    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS occupancy_groups (
                 tables          TEXT    NOT NULL,
                 start           INTEGER NOT NULL,
                 duration        INTEGER NOT NULL,
                 start_clock     TEXT    NOT NULL,
                 end_clock       TEXT    NOT NULL,
                 creation        TEXT    NOT NULL,
                 reservation     TEXT    NOT NULL,
                 advance_minutes INTEGER NOT NULL,
                 creation_rel    INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS replay_summary (
                 date                TEXT    NOT NULL,
                 meal_shift          TEXT    NOT NULL,
                 restaurant          TEXT    NOT NULL,
                 shift_start         TEXT    NOT NULL,
                 tables              INTEGER NOT NULL,
                 reservations        INTEGER NOT NULL,
                 scheduled           INTEGER NOT NULL,
                 conflicts           INTEGER NOT NULL,
                 rejected            INTEGER NOT NULL,
                 missing_table_skips INTEGER NOT NULL,
                 events_fired        INTEGER NOT NULL,
                 occupancy_groups    INTEGER NOT NULL,
                 end_time            INTEGER NOT NULL,
                 min_slider          INTEGER NOT NULL,
                 max_slider          INTEGER NOT NULL
             );",
        )?;

        info!("writing replay output to {}", path.display());
        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_table_occupancy(&mut self, row: &TableOccupancyRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO table_occupancy \
             (table_id, start, end, start_clock, end_clock, creation, reservation) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![
                row.table_id,
                row.start,
                row.end,
                row.start_clock,
                row.end_clock,
                row.creation,
                row.reservation,
            ],
        )?;
        Ok(())
    }

    fn write_groups(&mut self, rows: &[OccupancyGroupRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO occupancy_groups \
                 (tables, start, duration, start_clock, end_clock, creation, reservation, \
                  advance_minutes, creation_rel) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.tables,
                    row.start,
                    row.duration,
                    row.start_clock,
                    row.end_clock,
                    row.creation,
                    row.reservation,
                    row.advance_minutes,
                    row.creation_rel,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_summary(&mut self, row: &ReplaySummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO replay_summary \
             (date, meal_shift, restaurant, shift_start, tables, reservations, scheduled, \
              conflicts, rejected, missing_table_skips, events_fired, occupancy_groups, \
              end_time, min_slider, max_slider) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
            rusqlite::params![
                row.date,
                row.meal_shift,
                row.restaurant,
                row.shift_start,
                row.tables as i64,
                row.reservations as i64,
                row.scheduled as i64,
                row.conflicts as i64,
                row.rejected as i64,
                row.missing_table_skips as i64,
                row.events_fired as i64,
                row.occupancy_groups as i64,
                row.end_time,
                row.min_slider,
                row.max_slider,
            ],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn
            .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
