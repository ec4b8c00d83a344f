//! Unit tests for tr-timeline.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use tr_core::{Minute, ReplayConfig, TableId};
use tr_records::{MealShift, RecordFilter, Reservation, Table, TableMap};
use tr_sim::{SimulationBuilder, SimulationData, run_simulation};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn t0() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(11, 0, 0).unwrap()
}

/// Tables `{1: cap 2, 2: cap 4}`.
fn two_tables() -> TableMap {
    [Table::new(TableId(1), 2), Table::new(TableId(2), 4)]
        .into_iter()
        .map(|t| (t.table_id, t))
        .collect()
}

/// Arriving at 13:00 + `arrival`, booked `created` minutes after 11:00.
fn booking(arrival: i64, duration: u32, tables: &[u32], created: i64) -> Reservation {
    Reservation {
        arrival_time:         Minute(arrival),
        table_ids:            tables.iter().map(|&t| TableId(t)).collect(),
        party_size:           2,
        duration,
        creation_datetime:    t0() + Duration::minutes(created),
        reservation_datetime: t0() + Duration::hours(2) + Duration::minutes(arrival),
    }
}

/// Shift starts 13:00, ends at minute 160.
///
/// | group | tables | window  | creation_rel |
/// |-------|--------|---------|--------------|
/// | A     | 1      | 0..60   | -120         |
/// | B     | 2      | 30..90  | -60          |
/// | C     | 1, 2   | 90..120 | 30           |
fn replayed() -> SimulationData {
    let filter = RecordFilter::new(
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        MealShift::Lunch,
        "saona-ciscar",
    );
    let config = ReplayConfig::default();
    let data = SimulationBuilder::new(filter, config.clone())
        .tables(two_tables())
        .reservations(vec![
            booking(0, 60, &[1], 0),
            booking(30, 60, &[2], 60),
            booking(90, 30, &[1, 2], 150),
        ])
        .build()
        .unwrap();
    run_simulation(data, &config).data
}

// ── Queries ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod query {
    use super::*;
    use crate::{CapacityFilter, capacity_options, filtered_table_ids, visible_occupancies};

    #[test]
    fn capacity_filter_selects_exact_matches() {
        let tables = two_tables();
        assert_eq!(filtered_table_ids(&tables, "All"), vec![TableId(1), TableId(2)]);
        assert_eq!(filtered_table_ids(&tables, "2"), vec![TableId(1)]);
        assert_eq!(filtered_table_ids(&tables, "4"), vec![TableId(2)]);
        assert!(filtered_table_ids(&tables, "6").is_empty());
    }

    #[test]
    fn malformed_filter_is_empty() {
        let tables = two_tables();
        assert!(filtered_table_ids(&tables, "two").is_empty());
        assert!(filtered_table_ids(&tables, "").is_empty());
        assert_eq!(CapacityFilter::parse("-4"), CapacityFilter::Invalid);
        assert_eq!(CapacityFilter::parse(" all "), CapacityFilter::All);
    }

    #[test]
    fn capacities_distinct_and_ascending() {
        let mut tables = two_tables();
        tables.insert(TableId(7), Table::new(TableId(7), 2));
        tables.insert(TableId(3), Table::new(TableId(3), 8));
        assert_eq!(capacity_options(&tables), vec![2, 4, 8]);
    }

    #[test]
    fn visibility_follows_creation() {
        let data = replayed();
        let groups = &data.occupancy_groups;
        assert!(visible_occupancies(groups, Minute(-121)).is_empty());
        assert_eq!(visible_occupancies(groups, Minute(-120)).len(), 1);
        assert_eq!(visible_occupancies(groups, Minute(-60)).len(), 2);
        assert_eq!(visible_occupancies(groups, Minute(30)).len(), 3);
    }

    #[test]
    fn visibility_is_monotonic() {
        let data = replayed();
        let mut previous: Vec<_> = Vec::new();
        for t in -150..=60 {
            let visible = visible_occupancies(&data.occupancy_groups, Minute(t));
            assert!(previous.iter().all(|g| visible.contains(g)), "group vanished at {t}");
            previous = visible;
        }
    }
}

// ── Grid ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod grid {
    use super::*;
    use crate::{OccupancyGrid, SlotStatus, slot_status, time_slots, visible_occupancies};

    #[test]
    fn slots_include_end() {
        let slots: Vec<i64> = time_slots(Minute(90), 30).iter().map(|m| m.0).collect();
        assert_eq!(slots, vec![0, 30, 60, 90]);
        assert_eq!(time_slots(Minute(89), 30).len(), 3);
        assert!(time_slots(Minute(-1), 30).is_empty());
    }

    #[test]
    fn slot_status_uses_half_open_windows() {
        let data = replayed();
        let visible = visible_occupancies(&data.occupancy_groups, Minute(30));
        let at = |table: u32, slot: i64| slot_status(&visible, TableId(table), Minute(slot), data.shift_start);

        assert_eq!(
            at(1, 0),
            SlotStatus::Occupied { start: "13:00".into(), end: "14:00".into() }
        );
        assert_eq!(at(1, 60), SlotStatus::Free);
        assert_eq!(
            at(2, 60),
            SlotStatus::Occupied { start: "13:30".into(), end: "14:30".into() }
        );
        assert_eq!(
            at(1, 90),
            SlotStatus::Occupied { start: "14:30".into(), end: "15:00".into() }
        );
    }

    #[test]
    fn hidden_groups_leave_cells_free() {
        let data = replayed();
        let visible = visible_occupancies(&data.occupancy_groups, Minute(-120));
        assert_eq!(slot_status(&visible, TableId(2), Minute(30), data.shift_start), SlotStatus::Free);
    }

    #[test]
    fn grid_counts_per_slot() {
        let data = replayed();
        let grid = OccupancyGrid::build(&data, "All", Minute(30), 30);
        assert_eq!(grid.labels.first().map(String::as_str), Some("13:00"));
        assert_eq!(grid.rows.len(), 2);
        assert_eq!(grid.occupied_per_slot(), vec![1, 2, 1, 2, 0, 0]);

        let only_fours = OccupancyGrid::build(&data, "4", Minute(30), 30);
        assert_eq!(only_fours.rows.len(), 1);
        assert_eq!(only_fours.rows[0].0, TableId(2));
    }
}

// ── Playback ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod playback {
    use super::*;
    use crate::Playback;

    #[test]
    fn starts_at_minimum() {
        let data = replayed();
        let playback = Playback::new(&data, &ReplayConfig::default());
        assert_eq!(playback.bounds(), (Minute(-120), Minute(30)));
        assert_eq!(playback.current(), Minute(-120));
        assert_eq!(playback.clock_text(), "2024-03-01 11:00");
    }

    #[test]
    fn advance_clamps_and_finishes() {
        let data = replayed();
        let mut playback = Playback::new(&data, &ReplayConfig::default());
        assert!(!playback.advance());
        assert_eq!(playback.current(), Minute(-110));

        // -110 to 30 in steps of 10.
        let mut steps = 1;
        while !playback.advance() {
            steps += 1;
        }
        assert_eq!(steps, 14);
        assert_eq!(playback.current(), Minute(30));
        assert!(playback.advance());
        assert_eq!(playback.current(), Minute(30));
    }

    #[test]
    fn skip_forward_moves_one_slot() {
        let data = replayed();
        let mut playback = Playback::new(&data, &ReplayConfig::default());
        playback.skip_forward();
        assert_eq!(playback.current(), Minute(-90));
    }

    #[test]
    fn seek_converts_and_clamps() {
        let data = replayed();
        let mut playback = Playback::new(&data, &ReplayConfig::default());
        assert_eq!(playback.seek("2024-03-01 13:10").unwrap(), Minute(10));
        assert_eq!(playback.clock_text(), "2024-03-01 13:10");
        assert_eq!(playback.seek("2024-03-01 20:00").unwrap(), Minute(30));
        assert_eq!(playback.seek("2024-02-01 20:00").unwrap(), Minute(-120));
        assert!(playback.seek("tomorrow").is_err());
        assert_eq!(playback.current(), Minute(-120));
    }
}

// ── Statistics ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod stats {
    use super::*;
    use crate::SimulationSummary;

    #[test]
    fn summary_figures() {
        let summary = SimulationSummary::from_data(&replayed());
        assert_eq!(summary.total_tables, 2);
        assert_eq!(summary.total_reservations, 3);
        // 160 minutes.
        assert_eq!(summary.timespan_hours, 3);
        assert_eq!(summary.occupancy_events, 3);
        assert_eq!(summary.average_duration_minutes, Some(50));
        // Advances 120, 90 and 60 minutes: 1.5 hours rounds up.
        assert_eq!(summary.average_advance_hours, Some(2));
        assert_eq!(summary.peak_hour, Some(13));
        assert_eq!(summary.peak_label().as_deref(), Some("13:00 - 14:00"));
    }

    #[test]
    fn empty_groups_have_no_advance() {
        let mut data = replayed();
        data.occupancy_groups.clear();
        let summary = SimulationSummary::from_data(&data);
        assert_eq!(summary.occupancy_events, 0);
        assert_eq!(summary.average_advance_hours, None);
    }
}
