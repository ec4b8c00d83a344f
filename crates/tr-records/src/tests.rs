//! Unit tests for tr-records.

use chrono::NaiveDate;

use crate::{MealShift, RecordFilter};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn lunch_filter() -> RecordFilter {
    RecordFilter::new(
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        MealShift::Lunch,
        "saona-ciscar",
    )
}

// ── Shift / filter ────────────────────────────────────────────────────────────

#[cfg(test)]
mod shift {
    use super::*;
    use crate::is_confirmed;

    #[test]
    fn shift_matches_label_and_code() {
        assert!(MealShift::Lunch.matches("Comida"));
        assert!(MealShift::Lunch.matches(" 1 "));
        assert!(MealShift::Dinner.matches("2"));
        assert!(!MealShift::Dinner.matches("Comida"));
    }

    #[test]
    fn shift_from_str() {
        assert_eq!("Cena".parse::<MealShift>().unwrap(), MealShift::Dinner);
        assert_eq!("lunch".parse::<MealShift>().unwrap(), MealShift::Lunch);
        assert!("brunch".parse::<MealShift>().is_err());
    }

    #[test]
    fn six_confirmed_statuses() {
        for s in ["Sentada", "Cuenta solicitada", "Liberada", "Llegada", "Confirmada", "Re-Confirmada"] {
            assert!(is_confirmed(s), "{s} should be confirmed");
        }
        assert!(!is_confirmed("Cancelada"));
        assert!(!is_confirmed("No-show"));
        assert!(!is_confirmed(""));
    }

    #[test]
    fn filter_requires_all_three_fields() {
        let f = lunch_filter();
        assert!(f.matches("2024-03-01", "Comida", "saona-ciscar"));
        assert!(f.matches("2024-03-01", "1", "saona-ciscar"));
        assert!(!f.matches("2024-03-02", "Comida", "saona-ciscar"));
        assert!(!f.matches("2024-03-01", "Cena", "saona-ciscar"));
        assert!(!f.matches("2024-03-01", "Comida", "turqueta"));
        assert!(!f.matches("01/03/2024", "Comida", "saona-ciscar"));
    }
}

// ── Nested table-list decoding ────────────────────────────────────────────────

#[cfg(test)]
mod decode {
    use tr_core::TableId;

    use crate::decode_table_list;

    #[test]
    fn python_list_with_foreign_literals() {
        let tables = decode_table_list(
            "[{'id_table': 1, 'max': 2, 'vip': None}, {'id_table': 2, 'max': 4, 'terrace': True}]",
        )
        .unwrap();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].table_id, TableId(1));
        assert_eq!(tables[0].max_capacity, 2);
        assert_eq!(tables[1].table_id, TableId(2));
        assert_eq!(tables[1].max_capacity, 4);
        assert!(tables.iter().all(|t| !t.occupied && t.occupancy_log.is_empty()));
    }

    #[test]
    fn single_object_and_string_capacity() {
        let tables = decode_table_list("{'id_table': 7, 'max': '6', 'flag': False}").unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].table_id, TableId(7));
        assert_eq!(tables[0].max_capacity, 6);
    }

    #[test]
    fn literals_inside_strings_untouched() {
        let tables =
            decode_table_list("[{'id_table': 3, 'max': 2, 'note': 'None of the True chairs'}]").unwrap();
        assert_eq!(tables[0].table_id, TableId(3));
    }

    #[test]
    fn plain_json_accepted() {
        let tables = decode_table_list(r#"[{"id_table": 5, "max": 8, "zone": null}]"#).unwrap();
        assert_eq!(tables[0].max_capacity, 8);
    }

    #[test]
    fn missing_key_rejected() {
        assert!(decode_table_list("[{'id_table': 1}]").is_err());
    }

    #[test]
    fn zero_capacity_rejected() {
        assert!(decode_table_list("[{'id_table': 1, 'max': 0}]").is_err());
    }

    #[test]
    fn unknown_bare_word_rejected() {
        assert!(decode_table_list("[{'id_table': 1, 'max': nan}]").is_err());
    }

    #[test]
    fn unterminated_string_rejected() {
        assert!(decode_table_list("[{'id_table: 1, 'max': 2}]").is_err());
    }
}

// ── Layout loader ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod layout_loader {
    use std::io::Cursor;

    use tr_core::TableId;

    use super::*;
    use crate::load_tables_reader;

    const CSV: &[u8] = b"\
date,meal,restaurant_name,tables\n\
2024-03-01,1,saona-ciscar,\"[{'id_table': 1, 'max': 2}, {'id_table': 2, 'max': 4}]\"\n\
2024-03-01,2,saona-ciscar,\"[{'id_table': 9, 'max': 6}]\"\n\
2024-03-01,1,turqueta,\"[{'id_table': 8, 'max': 6}]\"\n\
2024-03-01,1,saona-ciscar,\"[{'id_table': 2, 'max': 6}, {'id_table': 3, 'max': 2}]\"\n\
2024-03-01,1,saona-ciscar,not a table list\n\
2024-03-02,1,turqueta\n\
";

    #[test]
    fn filters_and_merges_rows() {
        let (tables, report) = load_tables_reader(Cursor::new(CSV), &lunch_filter()).unwrap();
        let ids: Vec<_> = tables.keys().copied().collect();
        assert_eq!(ids, vec![TableId(1), TableId(2), TableId(3)]);
        assert_eq!(report.rows_read, 6);
        assert_eq!(report.rows_matched, 3);
        assert_eq!(report.malformed, 1);
        assert_eq!(report.unreadable, 1);
        assert_eq!(report.accepted(), 2);
    }

    #[test]
    fn short_row_counted_as_unreadable() {
        let csv = b"date,meal,restaurant_name,tables\n2024-03-02,1,other\n";
        let (tables, report) = load_tables_reader(Cursor::new(csv.as_slice()), &lunch_filter()).unwrap();
        assert!(tables.is_empty());
        assert_eq!(report.unreadable, 1);
        assert_eq!(report.malformed, 0);
        assert_eq!(report.accepted(), 0);
        assert_eq!(report.to_string(), "1 read, 1 unreadable, 0 matched, 0 accepted, 0 malformed, 0 untabled");
    }

    #[test]
    fn report_display_lists_every_counter() {
        let (_, report) = load_tables_reader(Cursor::new(CSV), &lunch_filter()).unwrap();
        assert_eq!(report.to_string(), "6 read, 1 unreadable, 3 matched, 2 accepted, 1 malformed, 0 untabled");
        assert_eq!(report.skipped(), 2);
    }

    #[test]
    fn later_row_wins() {
        let (tables, _) = load_tables_reader(Cursor::new(CSV), &lunch_filter()).unwrap();
        assert_eq!(tables[&TableId(2)].max_capacity, 6);
    }

    #[test]
    fn no_match_is_empty_not_error() {
        let filter = RecordFilter::new(
            NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            MealShift::Lunch,
            "saona-ciscar",
        );
        let (tables, report) = load_tables_reader(Cursor::new(CSV), &filter).unwrap();
        assert!(tables.is_empty());
        assert_eq!(report.rows_matched, 0);
    }
}

// ── Reservation loader ────────────────────────────────────────────────────────

#[cfg(test)]
mod reservation_loader {
    use std::io::Cursor;

    use tr_core::{Minute, ReplayConfig, TableId, UntabledPolicy};

    use super::*;
    use crate::{load_reservations_reader, parse_table_ids};

    const CSV: &[u8] = b"\
id,date,meal_shift,restaurant,status_long,time,date_add,time_add,tables,table,for,duration\n\
r1,2024-03-01,Comida,saona-ciscar,Sentada,13:30,2024-02-20,18:04:11,\"3, 4\",,6,120\n\
r2,2024-03-01,Comida,saona-ciscar,Liberada,14:00,2024-03-01,11:00,,9,2,\n\
r3,2024-03-01,Comida,saona-ciscar,Cancelada,13:00,2024-02-28,10:00,5,,2,90\n\
r4,2024-03-01,Cena,saona-ciscar,Sentada,21:00,2024-02-28,10:00,5,,2,90\n\
r5,2024-03-01,Comida,saona-ciscar,Llegada,13:15,2024-02-28,10:00,,,2,90\n\
r6,2024-03-01,Comida,saona-ciscar,Confirmada,1x:00,2024-02-28,10:00,6,,2,90\n\
r7,2024-03-01,Comida,saona-ciscar,Re-Confirmada,15:00,2024-02-28,10:00,7,,,0\n\
r8,2024-03-01,Comida\n\
";

    #[test]
    fn parse_table_ids_keeps_digit_runs() {
        assert_eq!(parse_table_ids("3, 4, x, -1, 12"), vec![TableId(3), TableId(4), TableId(12)]);
        assert!(parse_table_ids("").is_empty());
        assert!(parse_table_ids(" , ").is_empty());
    }

    #[test]
    fn filters_by_status_and_shift() {
        let (res, report) =
            load_reservations_reader(Cursor::new(CSV), &lunch_filter(), &ReplayConfig::default()).unwrap();
        // r1, r2 kept; r3 cancelled; r4 dinner; r5 untabled; r6 bad time; r7 zero duration;
        // r8 too short to read.
        assert_eq!(res.len(), 2);
        assert_eq!(report.rows_read, 8);
        assert_eq!(report.unreadable, 1);
        assert_eq!(report.rows_matched, 5);
        assert_eq!(report.malformed, 2);
        assert_eq!(report.untabled, 1);
        assert_eq!(report.accepted(), 2);
        assert_eq!(report.to_string(), "8 read, 1 unreadable, 5 matched, 2 accepted, 2 malformed, 1 untabled");
    }

    #[test]
    fn only_unreadable_rows_still_report() {
        let csv = b"\
id,date,meal_shift,restaurant,status_long,time,date_add,time_add,tables\n\
r1,2024-03-01\n\
";
        let (res, report) =
            load_reservations_reader(Cursor::new(csv.as_slice()), &lunch_filter(), &ReplayConfig::default())
                .unwrap();
        assert!(res.is_empty());
        assert_eq!(report.accepted(), 0);
        assert_eq!(report.to_string(), "1 read, 1 unreadable, 0 matched, 0 accepted, 0 malformed, 0 untabled");
    }

    #[test]
    fn arrivals_normalized_to_earliest_decoded_row() {
        let (res, _) =
            load_reservations_reader(Cursor::new(CSV), &lunch_filter(), &ReplayConfig::default()).unwrap();
        // The untabled r5 at 13:15 is the minimum even though it is dropped.
        assert_eq!(res[0].arrival_time, Minute(15));
        assert_eq!(res[1].arrival_time, Minute(45));
    }

    #[test]
    fn fields_and_defaults() {
        let (res, _) =
            load_reservations_reader(Cursor::new(CSV), &lunch_filter(), &ReplayConfig::default()).unwrap();
        assert_eq!(res[0].table_ids, vec![TableId(3), TableId(4)]);
        assert_eq!(res[0].party_size, 6);
        assert_eq!(res[0].duration, 120);
        assert_eq!(res[0].creation_datetime.to_string(), "2024-02-20 18:04:11");
        assert_eq!(res[0].reservation_datetime.to_string(), "2024-03-01 13:30:00");
        // r2 falls back to the single `table` field and the default duration.
        assert_eq!(res[1].table_ids, vec![TableId(9)]);
        assert_eq!(res[1].duration, 90);
    }

    #[test]
    fn keep_policy_retains_untabled() {
        let config = ReplayConfig { untabled_policy: UntabledPolicy::Keep, ..ReplayConfig::default() };
        let (res, report) = load_reservations_reader(Cursor::new(CSV), &lunch_filter(), &config).unwrap();
        assert_eq!(res.len(), 3);
        assert_eq!(report.untabled, 0);
        assert!(res.iter().any(|r| r.table_ids.is_empty() && r.arrival_time == Minute(0)));
    }

    #[test]
    fn missing_optional_columns() {
        let csv = b"\
date,meal_shift,restaurant,status_long,time,date_add,time_add,tables\n\
2024-03-01,Comida,saona-ciscar,Sentada,13:00,2024-02-20,18:04,1\n\
";
        let (res, _) =
            load_reservations_reader(Cursor::new(csv.as_slice()), &lunch_filter(), &ReplayConfig::default())
                .unwrap();
        assert_eq!(res.len(), 1);
        assert_eq!(res[0].party_size, 1);
        assert_eq!(res[0].duration, 90);
        assert_eq!(res[0].arrival_time, Minute(0));
    }

    #[test]
    fn nothing_matches_is_empty() {
        let (res, report) = load_reservations_reader(
            Cursor::new(CSV),
            &RecordFilter::new(NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(), MealShift::Lunch, "saona-ciscar"),
            &ReplayConfig::default(),
        )
        .unwrap();
        assert!(res.is_empty());
        assert_eq!(report.rows_matched, 0);
    }
}
