//! neo-watch CLI
//!
//! Run with: cargo run -p neo-watch -- scan --page page.json

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use neo_watch::{
    analysis::VelocitySeries,
    storage::{HistoricDateStore, JsonFileHistoricStore, MemoryHistoricStore},
    ApproachScanner, BrowsePage, CloseApproachFilter, FilterOutcome, NearEarthObject,
    NeoWatchConfig,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "neo-watch", version, about = "Upcoming asteroid close approaches from NeoWs data")]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Filter one asteroid against a historic orbit-determination date
    Filter {
        /// NeoWs asteroid document
        #[arg(long)]
        asteroid: PathBuf,
        /// Last processed orbit-determination date (YYYY-MM-DD HH:MM:SS)
        #[arg(long)]
        historic: String,
        /// Report which outcome occurred
        #[arg(long)]
        explain: bool,
    },
    /// Scan a browse page against the history file
    Scan {
        /// NeoWs browse page, asteroid list or single asteroid
        #[arg(long)]
        page: PathBuf,
        /// History file (overrides config)
        #[arg(long)]
        history: Option<PathBuf>,
        /// Do not write the history file
        #[arg(long)]
        dry_run: bool,
    },
    /// Per-year relative velocity table
    Velocity {
        /// NeoWs browse page, asteroid list or single asteroid
        #[arg(long)]
        input: PathBuf,
        /// Restrict to one asteroid name, e.g. "433 Eros (A898 PA)"
        #[arg(long)]
        name: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "neo_watch=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => NeoWatchConfig::load(path)?,
        None => NeoWatchConfig::default(),
    };

    match cli.command {
        Command::Filter {
            asteroid,
            historic,
            explain,
        } => run_filter(&config, &asteroid, &historic, explain),
        Command::Scan {
            page,
            history,
            dry_run,
        } => run_scan(&config, &page, history, dry_run),
        Command::Velocity { input, name } => run_velocity(&input, name.as_deref()),
    }
}

fn read_page(path: &Path) -> Result<BrowsePage> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;
    BrowsePage::from_json_value(value)
        .with_context(|| format!("{} is not a NeoWs document", path.display()))
}

fn run_filter(config: &NeoWatchConfig, path: &Path, historic: &str, explain: bool) -> Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let asteroid: NearEarthObject = serde_json::from_str(&text)
        .with_context(|| format!("{} is not a NeoWs asteroid document", path.display()))?;

    let filter = CloseApproachFilter::new(config.formats.clone());
    let outcome = filter
        .evaluate(
            &asteroid.close_approach_data,
            asteroid.orbit_determination_date(),
            historic,
        )
        .with_context(|| format!("Cannot evaluate {}", asteroid.name))?;

    if explain {
        println!("{}: {}", asteroid.name, outcome.label());
    }

    match outcome {
        FilterOutcome::Upcoming(records) => {
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        FilterOutcome::Stale | FilterOutcome::NoFutureApproaches => {
            println!("Nothing new for {}", asteroid.name);
        }
    }
    Ok(())
}

fn run_scan(
    config: &NeoWatchConfig,
    page: &Path,
    history: Option<PathBuf>,
    dry_run: bool,
) -> Result<()> {
    let page = read_page(page)?;
    let history = history.unwrap_or_else(|| config.history.path.clone());
    let file_store = JsonFileHistoricStore::open(&history)
        .with_context(|| format!("Failed to open history {}", history.display()))?;

    let scanner = ApproachScanner::from_config(config);
    let report = if dry_run {
        // Scan against a throwaway copy so the file stays untouched
        let scratch = MemoryHistoricStore::with_entries(file_store.snapshot());
        scanner.scan(&page.near_earth_objects, &scratch)?
    } else {
        let report = scanner.scan(&page.near_earth_objects, &file_store)?;
        file_store.flush()?;
        report
    };

    for entry in report.upcoming() {
        println!(
            "{} ({}) orbit {} -> {} upcoming close approaches",
            entry.name,
            entry.asteroid_id,
            entry.current_orbit_date,
            entry.upcoming().map_or(0, <[_]>::len)
        );
        for record in entry.upcoming().unwrap_or_default() {
            let when = record.date_full().unwrap_or("?");
            match record.relative_velocity_kps() {
                Some(kps) => println!("  {}  {:.3} km/s", when, kps),
                None => println!("  {}", when),
            }
        }
    }
    for failure in &report.failures {
        println!("skipped {} ({}): {}", failure.name, failure.asteroid_id, failure.error);
    }

    let summary = report.summary();
    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}

fn run_velocity(input: &Path, name: Option<&str>) -> Result<()> {
    let page = read_page(input)?;
    let series = VelocitySeries::collect(&page.near_earth_objects, name);

    if series.is_empty() {
        println!("No velocity data found");
        return Ok(());
    }

    println!("{:<6} {:>5} {:>10} {:>10} {:>10}", "year", "n", "min", "mean", "max");
    for year in series.yearly() {
        println!(
            "{:<6} {:>5} {:>10.3} {:>10.3} {:>10.3}",
            year.year, year.count, year.min_kps, year.mean_kps, year.max_kps
        );
    }
    if series.skipped > 0 {
        println!("({} approaches without usable velocity)", series.skipped);
    }
    Ok(())
}
