//! Table-layout loader.
//!
//! # CSV format
//!
//! One row per (date, shift, restaurant) floor plan.  The `tables` field holds
//! a nested structure written with Python literals:
//!
//! ```csv
//! date,meal,restaurant_name,tables
//! 2024-03-01,1,saona-ciscar,"[{'id_table': 1, 'max': 2, 'vip': None}, {'id_table': 2, 'max': 4}]"
//! 2024-03-01,2,saona-ciscar,"{'id_table': 7, 'max': '6', 'terrace': True}"
//! ```
//!
//! `meal` is usually the numeric shift code (`1` lunch, `2` dinner); the
//! label is accepted too.  `tables` may be a single object or a list.  Extra
//! keys in each object are ignored; `id_table` and `max` must be positive
//! integers (or strings holding one).
//!
//! # Decoding
//!
//! [`decode_table_list`] first rewrites the Python literals `None`, `True`,
//! `False` and single-quoted strings into JSON, touching nothing inside string
//! literals, then decodes against a typed schema.  A row either decodes
//! completely or is rejected; there is no partial coercion.

use std::io::Read;
use std::path::Path;

use log::{debug, info, warn};
use serde::{Deserialize, Deserializer};

use tr_core::TableId;

use crate::shift::RecordFilter;
use crate::table::{Table, TableMap};
use crate::{ParseReport, RecordError, RecordResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct LayoutRecord {
    date:            String,
    meal:            String,
    restaurant_name: String,
    tables:          String,
}

// ── Nested table-list schema ──────────────────────────────────────────────────

#[derive(Deserialize)]
struct TableEntry {
    #[serde(deserialize_with = "positive_int")]
    id_table: u32,
    #[serde(deserialize_with = "positive_int")]
    max:      u32,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TableList {
    Many(Vec<TableEntry>),
    One(TableEntry),
}

/// Accept `4` or `"4"`; reject zero, negatives, and non-integers.
fn positive_int<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IntOrText {
        Int(u64),
        Text(String),
    }

    let n = match IntOrText::deserialize(deserializer)? {
        IntOrText::Int(n)  => n,
        IntOrText::Text(s) => s.trim().parse::<u64>().map_err(D::Error::custom)?,
    };
    match u32::try_from(n) {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(D::Error::custom(format!("expected a positive integer, got {n}"))),
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the tables of one run from a layout CSV file.
pub fn load_tables_csv(path: &Path, filter: &RecordFilter) -> RecordResult<(TableMap, ParseReport)> {
    let file = std::fs::File::open(path).map_err(RecordError::Io)?;
    load_tables_reader(file, filter)
}

/// Like [`load_tables_csv`] but accepts any `Read` source.
///
/// Rows matching `filter` are decoded and their tables inserted by id; a
/// later row with the same id replaces the earlier table.  Rows that cannot
/// be decoded are logged, counted in the report, and skipped.  Only I/O
/// failures abort the load.
pub fn load_tables_reader<R: Read>(
    reader: R,
    filter: &RecordFilter,
) -> RecordResult<(TableMap, ParseReport)> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut tables = TableMap::new();
    let mut report = ParseReport::default();

    for (line, result) in csv_reader.deserialize::<LayoutRecord>().enumerate() {
        report.rows_read += 1;
        let row = match result {
            Ok(row) => row,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                warn!("layout row {}: skipped, {e}", line + 1);
                report.unreadable += 1;
                continue;
            }
        };

        if !filter.matches(&row.date, &row.meal, &row.restaurant_name) {
            continue;
        }
        report.rows_matched += 1;

        match decode_table_list(&row.tables) {
            Ok(decoded) => {
                for table in decoded {
                    if tables.insert(table.table_id, table).is_some() {
                        debug!("layout row {}: replaced earlier definition", line + 1);
                    }
                }
            }
            Err(e) => {
                warn!("layout row {}: skipped, {e}", line + 1);
                report.malformed += 1;
            }
        }
    }

    info!("parsed {} tables for {filter} ({report})", tables.len());
    Ok((tables, report))
}

/// Decode one nested table-list field into fresh tables.
pub fn decode_table_list(text: &str) -> RecordResult<Vec<Table>> {
    let json = normalize_literals(text)?;
    let list: TableList = serde_json::from_str(&json)
        .map_err(|e| RecordError::Decode(format!("{e} in {text:?}")))?;

    let entries = match list {
        TableList::Many(v) => v,
        TableList::One(e)  => vec![e],
    };
    Ok(entries
        .into_iter()
        .map(|e| Table::new(TableId(e.id_table), e.max))
        .collect())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Rewrite Python literals into JSON.
///
/// Outside string literals: `None` → `null`, `True` → `true`, `False` →
/// `false`, `'…'` → `"…"`.  Inside strings nothing is rewritten except the
/// quoting itself.  Other bare words are passed through and rejected later by
/// the JSON decoder.
fn normalize_literals(text: &str) -> RecordResult<String> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\'' | '"' => {
                out.push('"');
                let mut closed = false;
                while let Some(s) = chars.next() {
                    match s {
                        '\\' => match chars.next() {
                            Some('\'') => out.push('\''),
                            Some(esc)  => {
                                out.push('\\');
                                out.push(esc);
                            }
                            None => break,
                        },
                        q if q == c => {
                            closed = true;
                            break;
                        }
                        '"' => out.push_str("\\\""),
                        other => out.push(other),
                    }
                }
                if !closed {
                    return Err(RecordError::Decode(format!("unterminated string in {text:?}")));
                }
                out.push('"');
            }
            c if c.is_ascii_alphabetic() => {
                let mut word = String::from(c);
                while let Some(&n) = chars.peek() {
                    if n.is_ascii_alphanumeric() || n == '_' {
                        word.push(n);
                        chars.next();
                    } else {
                        break;
                    }
                }
                out.push_str(match word.as_str() {
                    "None"  => "null",
                    "True"  => "true",
                    "False" => "false",
                    other   => other,
                });
            }
            other => out.push(other),
        }
    }
    Ok(out)
}
