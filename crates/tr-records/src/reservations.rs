//! Reservation loader.
//!
//! # CSV format
//!
//! ```csv
//! id,date,meal_shift,restaurant,status_long,time,date_add,time_add,tables,table,for,duration
//! 17,2024-03-01,Comida,saona-ciscar,Sentada,13:30,2024-02-20,18:04:11,"3, 4",,6,120
//! 18,2024-03-01,Comida,saona-ciscar,Liberada,14:00,2024-03-01,11:00,,9,2,
//! ```
//!
//! Unknown columns are ignored.  `table`, `for` (party size), `duration` and
//! `id` may be absent or empty.
//!
//! # Arrival normalization
//!
//! Arrival times are minutes since midnight minus the minimum over every
//! decoded row of the filtered set, so the earliest arrival is `Minute(0)`.
//! Rows later dropped for having no tables still take part in the minimum.

use std::io::Read;
use std::path::Path;

use chrono::NaiveDateTime;
use log::{debug, info, warn};
use serde::Deserialize;

use tr_core::{Minute, ReplayConfig, TableId, UntabledPolicy, minutes_of_day, parse_clock};

use crate::shift::{RecordFilter, is_confirmed};
use crate::table::Reservation;
use crate::{ParseReport, RecordError, RecordResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ReservationRecord {
    #[serde(default)]
    id:          Option<String>,
    date:        String,
    meal_shift:  String,
    restaurant:  String,
    status_long: String,
    time:        String,
    date_add:    String,
    time_add:    String,
    #[serde(default)]
    tables:      Option<String>,
    #[serde(default)]
    table:       Option<String>,
    #[serde(default, rename = "for")]
    party_size:  Option<String>,
    #[serde(default)]
    duration:    Option<String>,
}

/// A row that passed the filter and decoded, before normalization.
struct DecodedRow {
    label:                String,
    minute_of_day:        i64,
    table_ids:            Vec<TableId>,
    party_size:           u32,
    duration:             u32,
    creation_datetime:    NaiveDateTime,
    reservation_datetime: NaiveDateTime,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the confirmed reservations of one run from a CSV file.
pub fn load_reservations_csv(
    path:   &Path,
    filter: &RecordFilter,
    config: &ReplayConfig,
) -> RecordResult<(Vec<Reservation>, ParseReport)> {
    let file = std::fs::File::open(path).map_err(RecordError::Io)?;
    load_reservations_reader(file, filter, config)
}

/// Like [`load_reservations_csv`] but accepts any `Read` source.
///
/// Reservations are returned in file order.  Malformed rows are logged and
/// skipped; rows with no table ids follow `config.untabled_policy`.  Only I/O
/// failures abort the load.
pub fn load_reservations_reader<R: Read>(
    reader: R,
    filter: &RecordFilter,
    config: &ReplayConfig,
) -> RecordResult<(Vec<Reservation>, ParseReport)> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut report = ParseReport::default();
    let mut rows: Vec<DecodedRow> = Vec::new();

    // ── Filter and decode ─────────────────────────────────────────────────
    for (line, result) in csv_reader.deserialize::<ReservationRecord>().enumerate() {
        report.rows_read += 1;
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                warn!("reservation row {}: skipped, {e}", line + 1);
                report.unreadable += 1;
                continue;
            }
        };

        if !is_confirmed(&record.status_long)
            || !filter.matches(&record.date, &record.meal_shift, &record.restaurant)
        {
            continue;
        }
        report.rows_matched += 1;

        match decode_row(record, line + 1, config) {
            Ok(row) => rows.push(row),
            Err(e) => {
                warn!("reservation row {}: skipped, {e}", line + 1);
                report.malformed += 1;
            }
        }
    }

    // ── Normalize arrivals and apply the untabled policy ──────────────────
    let Some(min_minute) = rows.iter().map(|r| r.minute_of_day).min() else {
        info!("no reservations matched {filter} ({report})");
        return Ok((Vec::new(), report));
    };

    let mut reservations = Vec::with_capacity(rows.len());
    for row in rows {
        if row.table_ids.is_empty() && config.untabled_policy == UntabledPolicy::Drop {
            debug!("reservation {}: no valid table ids, dropped", row.label);
            report.untabled += 1;
            continue;
        }
        reservations.push(Reservation {
            arrival_time:         Minute(row.minute_of_day - min_minute),
            table_ids:            row.table_ids,
            party_size:           row.party_size,
            duration:             row.duration,
            creation_datetime:    row.creation_datetime,
            reservation_datetime: row.reservation_datetime,
        });
    }

    if report.untabled > 0 {
        warn!("{} reservations for {filter} had no valid table ids", report.untabled);
    }
    info!("parsed {} reservations for {filter} ({report})", reservations.len());
    Ok((reservations, report))
}

/// Table ids from a comma-separated field.  Parts that are not plain digit
/// runs are ignored, so `"3, 4, x, -1"` gives `[3, 4]`.
pub fn parse_table_ids(text: &str) -> Vec<TableId> {
    text.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()))
        .filter_map(|part| part.parse::<u32>().ok())
        .map(TableId)
        .collect()
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn decode_row(record: ReservationRecord, line: usize, config: &ReplayConfig) -> RecordResult<DecodedRow> {
    let label = record.id.unwrap_or_else(|| format!("row {line}"));

    let booked_time = parse_clock(&record.time)?;
    let reservation_datetime = stamp(&record.date, &record.time)?;
    let creation_datetime = stamp(&record.date_add, &record.time_add)?;

    let mut table_ids = record.tables.as_deref().map(parse_table_ids).unwrap_or_default();
    if table_ids.is_empty() {
        table_ids = record.table.as_deref().map(parse_table_ids).unwrap_or_default();
    }

    let party_size = positive_or(record.party_size.as_deref(), config.default_party_size, "for")?;
    let duration = positive_or(record.duration.as_deref(), config.default_duration_minutes, "duration")?;

    Ok(DecodedRow {
        label,
        minute_of_day: minutes_of_day(booked_time),
        table_ids,
        party_size,
        duration,
        creation_datetime,
        reservation_datetime,
    })
}

fn stamp(date: &str, time: &str) -> RecordResult<NaiveDateTime> {
    let date = chrono::NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| RecordError::MalformedRow(format!("invalid date {date:?}")))?;
    Ok(date.and_time(parse_clock(time)?))
}

/// Parse an optional positive integer field; absent or empty gives `default`.
fn positive_or(field: Option<&str>, default: u32, name: &str) -> RecordResult<u32> {
    match field.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(default),
        Some(s) => match s.parse::<u32>() {
            Ok(v) if v > 0 => Ok(v),
            _ => Err(RecordError::MalformedRow(format!("invalid {name} {s:?}: expected a positive integer"))),
        },
    }
}
