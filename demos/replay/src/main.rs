//! replay: replay one restaurant shift from its CSV exports.
//!
//! ```text
//! replay --maps maps.csv --reservations reservations.csv \
//!        --date 2024-03-01 --shift Cena --restaurant saona-ciscar \
//!        [--capacity 4] [--at "2024-03-01 18:30"] [--out output/] [--play]
//! ```
//!
//! Prints the run summary and the occupancy grid as booked at `--at`
//! (default: the end of playback).  `--out` also writes the replay tables to
//! CSV (or `replay.db` with the `sqlite` feature).

mod logger;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::Parser;
use log::info;

use tr_core::{ConflictPolicy, ReplayConfig};
use tr_output::{OutputWriter, ReplayOutputObserver};
use tr_records::{MealShift, RecordFilter, load_reservations_csv, load_tables_csv};
use tr_sim::{Replay, ReplayOutcome, SimulationBuilder, SimulationData, run_simulation};
use tr_timeline::{OccupancyGrid, Playback, SimulationSummary, SlotStatus, capacity_options, visible_occupancies};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "replay")]
#[command(about = "Replay historical restaurant table occupancy for one shift")]
#[command(version)]
struct Args {
    /// Table-layout CSV (date, meal, restaurant_name, tables)
    #[arg(long)]
    maps: PathBuf,

    /// Reservation CSV export
    #[arg(long)]
    reservations: PathBuf,

    /// Service date, YYYY-MM-DD
    #[arg(long)]
    date: String,

    /// Meal shift: Comida/Cena, lunch/dinner, or 1/2
    #[arg(long)]
    shift: String,

    /// Restaurant identifier as it appears in both files
    #[arg(long)]
    restaurant: String,

    /// Only show tables of this capacity ("All" for every table)
    #[arg(long, default_value = "All")]
    capacity: String,

    /// Show the grid as booked at this moment, YYYY-MM-DD HH:MM
    #[arg(long)]
    at: Option<String>,

    /// JSON file with replay settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Exclude reservations that overlap an earlier one
    #[arg(long)]
    reject_conflicts: bool,

    /// Directory for the replay output files
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Step through playback and print the bookings visible at each step
    #[arg(long)]
    play: bool,

    /// Debug logging (overrides RUST_LOG)
    #[arg(short, long)]
    verbose: bool,

    /// Also append log lines to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init(args.verbose, args.log_file.as_deref())?;

    // 1. Settings.
    let mut config = load_config(args.config.as_deref())?;
    if args.reject_conflicts {
        config.conflict_policy = ConflictPolicy::Reject;
    }
    config.validate()?;

    // 2. Filter.
    let date = NaiveDate::parse_from_str(args.date.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid --date {:?}: expected YYYY-MM-DD", args.date))?;
    let shift: MealShift = args.shift.parse()?;
    let filter = RecordFilter::new(date, shift, args.restaurant.clone());

    // 3. Records.
    let (tables, layout_report) = load_tables_csv(&args.maps, &filter)
        .with_context(|| format!("reading {}", args.maps.display()))?;
    info!("layout rows: {layout_report}");
    let (reservations, reservation_report) = load_reservations_csv(&args.reservations, &filter, &config)
        .with_context(|| format!("reading {}", args.reservations.display()))?;
    info!("reservation rows: {reservation_report}");

    // 4. Replay.
    let data = SimulationBuilder::new(filter, config.clone())
        .tables(tables)
        .reservations(reservations)
        .build()?;

    let t0 = Instant::now();
    let outcome = match &args.out {
        Some(dir) => replay_to(dir, data, &config)?,
        None => run_simulation(data, &config),
    };
    info!("replay finished in {:.3} s", t0.elapsed().as_secs_f64());

    // 5. Report.
    print_report(&outcome, &config, &args)
}

fn load_config(path: Option<&Path>) -> Result<ReplayConfig> {
    let Some(path) = path else {
        return Ok(ReplayConfig::default());
    };
    let file = File::open(path).with_context(|| format!("opening config {}", path.display()))?;
    let config: ReplayConfig =
        serde_json::from_reader(file).with_context(|| format!("parsing config {}", path.display()))?;
    info!("loaded settings from {} ({} conflicts)", path.display(), config.conflict_policy);
    Ok(config)
}

// ── Output ────────────────────────────────────────────────────────────────────

#[cfg(not(feature = "sqlite"))]
fn replay_to(dir: &Path, data: SimulationData, config: &ReplayConfig) -> Result<ReplayOutcome> {
    std::fs::create_dir_all(dir)?;
    replay_observed(tr_output::CsvWriter::new(dir)?, data, config)
}

#[cfg(feature = "sqlite")]
fn replay_to(dir: &Path, data: SimulationData, config: &ReplayConfig) -> Result<ReplayOutcome> {
    std::fs::create_dir_all(dir)?;
    replay_observed(tr_output::SqliteWriter::new(dir)?, data, config)
}

fn replay_observed<W: OutputWriter>(
    writer: W,
    data:   SimulationData,
    config: &ReplayConfig,
) -> Result<ReplayOutcome> {
    let mut obs = ReplayOutputObserver::new(writer, data.clock());
    let outcome = Replay::new(data, config).run(&mut obs);
    if let Some(e) = obs.take_error() {
        bail!("output error: {e}");
    }
    Ok(outcome)
}

// ── Report ────────────────────────────────────────────────────────────────────

fn print_report(outcome: &ReplayOutcome, config: &ReplayConfig, args: &Args) -> Result<()> {
    let data = &outcome.data;

    println!("=== replay: {} {} ({}) ===", data.restaurant_id, data.day, data.meal_shift);
    println!("{}", SimulationSummary::from_data(data));
    println!("diagnostics:          {}", outcome.diagnostics);
    let capacities: Vec<String> = capacity_options(&data.tables).iter().map(u32::to_string).collect();
    println!("capacities:           {}", capacities.join(", "));
    println!();

    let mut playback = Playback::new(data, config);

    if args.play {
        loop {
            let visible = visible_occupancies(&data.occupancy_groups, playback.current());
            println!("{}  {:>4} bookings visible", playback.clock_text(), visible.len());
            if playback.is_finished() {
                break;
            }
            playback.advance();
        }
        println!();
    }

    match &args.at {
        Some(stamp) => {
            playback.seek(stamp)?;
        }
        None => {
            let (_, max) = playback.bounds();
            playback.set(max);
        }
    }

    let grid = OccupancyGrid::build(data, &args.capacity, playback.current(), config.slot_minutes);
    println!("as booked at {} (capacity {})", playback.clock_text(), args.capacity);
    print_grid(&grid);
    Ok(())
}

fn print_grid(grid: &OccupancyGrid) {
    if grid.rows.is_empty() {
        println!("(no tables match)");
        return;
    }

    print!("{:<8}", "table");
    for label in &grid.labels {
        print!(" {label}");
    }
    println!();

    for (table, cells) in &grid.rows {
        print!("{:<8}", table.0);
        for cell in cells {
            let mark = match cell {
                SlotStatus::Occupied { .. } => "  ###",
                SlotStatus::Free => "    .",
            };
            print!(" {mark}");
        }
        println!();
    }

    print!("{:<8}", "busy");
    for count in grid.occupied_per_slot() {
        print!(" {count:>5}");
    }
    println!();
}
