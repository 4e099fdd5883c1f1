//! RustLift - Strength Training Progression Engine
//!
//! Command-line entry point.
//!
//! ```bash
//! # Next weight for an exercise, using stored history
//! rustlift suggest --exercise squat --sets 5 --reps 5
//!
//! # Plates for 225 on the configured bar
//! rustlift plates 225
//!
//! # Export every logged set
//! rustlift export --out sets.csv
//!
//! # Full backup, then restore it elsewhere
//! rustlift export --json --out backup.json
//! rustlift import backup.json --merge
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use rustlift::export::{
    export_backup, export_sets_csv, import_backup, read_backup, write_backup, write_export,
};
use rustlift::history::get_exercise_history;
use rustlift::metrics::{metric_series, muscle_group_breakdown, ExerciseRecords, MetricKind};
use rustlift::plates::calculate_plates;
use rustlift::progression::{PlanExerciseConfig, ProgressionAdvisor};
use rustlift::storage::config::{load_config, load_config_from, SettingsSource};
use rustlift::storage::Database;

#[derive(Parser)]
#[command(
    name = "rustlift",
    version,
    about = "Strength training progression engine",
    long_about = "Suggests next working weights, plate loading and training history from a local workout log."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Database file override
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Configuration file override
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Suggest the next working weight for an exercise
    Suggest {
        /// Exercise id
        #[arg(long)]
        exercise: String,

        /// Target sets (defaults to the sets performed last time)
        #[arg(long)]
        sets: Option<u32>,

        /// Target reps per set
        #[arg(long)]
        reps: Option<u32>,

        /// Weight added after a successful session
        #[arg(long)]
        increment: Option<f64>,

        /// Percent removed on deload
        #[arg(long)]
        deload_percent: Option<f64>,

        /// Consecutive failed sessions before a deload
        #[arg(long)]
        deload_after: Option<u32>,
    },

    /// Show the plates to load for a target weight
    Plates {
        /// Total target weight including the bar
        target: f64,

        /// Bar weight (defaults to the configured bar)
        #[arg(long)]
        bar: Option<f64>,
    },

    /// Per-workout history of an exercise, oldest first
    History {
        /// Exercise id
        #[arg(long)]
        exercise: String,
    },

    /// Personal records and a progress series for an exercise
    Records {
        /// Exercise id
        #[arg(long)]
        exercise: String,

        /// Series metric: e1rm, best, volume or reps
        #[arg(long, default_value = "e1rm")]
        metric: MetricKind,
    },

    /// Completed sets and volume per muscle group
    Muscles,

    /// Export all logged sets as CSV, or a full backup as JSON
    Export {
        /// Output file (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Write a full JSON backup of every store instead of CSV
        #[arg(long)]
        json: bool,
    },

    /// Restore a JSON backup
    Import {
        /// Backup file
        path: PathBuf,

        /// Keep existing records; records with the same id are replaced
        #[arg(long)]
        merge: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("Starting RustLift v{}", env!("CARGO_PKG_VERSION"));

    let config = match &cli.config {
        Some(path) => load_config_from(path),
        None => load_config(),
    }
    .context("Failed to load configuration")?;

    let db_path = cli.db.clone().unwrap_or_else(|| config.database_file());
    let mut db = Database::open(&db_path)
        .with_context(|| format!("Failed to open database at {}", db_path.display()))?;

    let settings = db
        .apply_setting_overrides(config.training_settings())
        .context("Failed to read stored settings")?;

    match cli.command {
        Command::Suggest {
            exercise,
            sets,
            reps,
            increment,
            deload_percent,
            deload_after,
        } => {
            let plan_config = PlanExerciseConfig {
                sets,
                reps,
                increment,
                deload_percent,
                deload_after,
            };
            let advisor = ProgressionAdvisor::with_defaults(settings.progression_defaults());
            let suggestion = advisor
                .suggest(&db, &exercise, &settings.resolve(&plan_config), settings.unit)
                .with_context(|| format!("Failed to suggest a weight for {}", exercise))?;

            print_json(&suggestion)?;
        }
        Command::Plates { target, bar } => {
            let bar = bar.unwrap_or_else(|| settings.bar_weight());
            let result = calculate_plates(target, bar, &settings.plate_inventory());

            println!("{}", result.describe(settings.unit));
        }
        Command::History { exercise } => {
            let history = get_exercise_history(&db, &exercise)
                .with_context(|| format!("Failed to load history for {}", exercise))?;

            print_json(&history)?;
        }
        Command::Records { exercise, metric } => {
            let sets = db
                .get_sets_for_exercise(&exercise)
                .with_context(|| format!("Failed to load sets for {}", exercise))?;

            let records = ExerciseRecords::from_sets(&sets);
            let series = metric_series(sets, metric);

            print_json(&serde_json::json!({
                "exercise": exercise,
                "records": records,
                "metric": metric,
                "series": series,
            }))?;
        }
        Command::Muscles => {
            let sets = db.list_sets().context("Failed to load sets")?;
            let exercises = db.list_exercises().context("Failed to load exercises")?;

            print_json(&muscle_group_breakdown(&sets, &exercises))?;
        }
        Command::Export { out, json: true } => {
            let backup = export_backup(&mut db).context("Failed to read backup")?;
            match out {
                Some(path) => {
                    write_backup(&path, &backup)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    tracing::info!("Wrote backup to {}", path.display());
                }
                None => print_json(&backup)?,
            }
        }
        Command::Export { out, json: false } => {
            let mut workouts = db.list_workouts().context("Failed to load workouts")?;
            workouts.reverse();
            let sets = db.list_sets().context("Failed to load sets")?;
            let exercises = db.list_exercises().context("Failed to load exercises")?;

            let csv = export_sets_csv(&workouts, &sets, &exercises)?;
            match out {
                Some(path) => {
                    write_export(&path, &csv)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    tracing::info!("Exported {} workouts to {}", workouts.len(), path.display());
                }
                None => print!("{}", csv),
            }
        }
        Command::Import { path, merge } => {
            let backup = read_backup(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let summary = import_backup(&mut db, &backup, merge)
                .with_context(|| format!("Failed to import {}", path.display()))?;

            print_json(&summary)?;
        }
    }

    Ok(())
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
