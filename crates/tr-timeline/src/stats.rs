//! Headline statistics of a replayed run.

use std::collections::BTreeMap;
use std::fmt;

use chrono::Timelike;

use tr_sim::SimulationData;

/// Summary figures of one replay.  Averages are `None` when there is nothing
/// to average.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationSummary {
    pub total_tables:             usize,
    pub total_reservations:       usize,
    /// `end_time` in whole hours, rounded.
    pub timespan_hours:           i64,
    /// Number of occupancy groups.
    pub occupancy_events:         usize,
    /// Mean reservation duration in minutes, rounded.
    pub average_duration_minutes: Option<i64>,
    /// Mean group advance in hours, rounded.
    pub average_advance_hours:    Option<i64>,
    /// Hour of day with the most booked arrivals; the earliest wins ties.
    pub peak_hour:                Option<u32>,
}

impl SimulationSummary {
    pub fn from_data(data: &SimulationData) -> Self {
        let reservations = &data.reservations;
        let groups = &data.occupancy_groups;

        let average_duration_minutes = mean(reservations.iter().map(|r| i64::from(r.duration)))
            .map(round_half_up);
        let average_advance_hours =
            mean(groups.iter().map(|g| g.advance)).map(|minutes| round_half_up(minutes / 60.0));

        let mut per_hour: BTreeMap<u32, usize> = BTreeMap::new();
        for r in reservations {
            *per_hour.entry(r.reservation_datetime.hour()).or_default() += 1;
        }
        let mut peak_hour = None;
        let mut peak_count = 0;
        for (hour, count) in per_hour {
            if count > peak_count {
                peak_hour = Some(hour);
                peak_count = count;
            }
        }

        Self {
            total_tables: data.tables.len(),
            total_reservations: reservations.len(),
            timespan_hours: round_half_up(data.end_time.0 as f64 / 60.0),
            occupancy_events: groups.len(),
            average_duration_minutes,
            average_advance_hours,
            peak_hour,
        }
    }

    /// `"HH:00 - HH+1:00"`, or `None` without reservations.
    pub fn peak_label(&self) -> Option<String> {
        self.peak_hour.map(|h| format!("{h}:00 - {}:00", h + 1))
    }
}

impl fmt::Display for SimulationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "tables:               {}", self.total_tables)?;
        writeln!(f, "reservations:         {}", self.total_reservations)?;
        writeln!(f, "timespan:             {} hours", self.timespan_hours)?;
        writeln!(f, "occupancy events:     {}", self.occupancy_events)?;
        match self.average_duration_minutes {
            Some(m) => writeln!(f, "average duration:     {m} minutes")?,
            None => writeln!(f, "average duration:     -")?,
        }
        match self.average_advance_hours {
            Some(h) => writeln!(f, "average advance:      {h} hours")?,
            None => writeln!(f, "average advance:      -")?,
        }
        write!(f, "peak hour:            {}", self.peak_label().as_deref().unwrap_or("-"))
    }
}

fn mean(values: impl Iterator<Item = i64>) -> Option<f64> {
    let (sum, n) = values.fold((0i64, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum as f64 / n as f64)
}

/// Halves round up, also for negatives: `-2.5 → -2`.
fn round_half_up(x: f64) -> i64 {
    (x + 0.5).floor() as i64
}
