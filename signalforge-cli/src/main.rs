//! SignalForge CLI — analyze price histories from CSV or a synthetic random walk.
//!
//! Commands:
//! - `analyze` — recommendation for one CSV price history
//! - `synthetic` — recommendation for a seeded random walk
//! - `batch` — every CSV in a directory, analyzed in parallel
//! - `config` — print the default configuration as TOML

mod input;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};
use rayon::prelude::*;
use signalforge_core::synthetic::{symbol_seed, RandomWalk};
use signalforge_core::{AnalysisConfig, Analyzer, Recommendation};
use std::path::{Path, PathBuf};
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "signalforge",
    about = "SignalForge CLI — technical-analysis BUY/HOLD/SELL recommendations"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). Logs go to stderr.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Pretty-print JSON output.
    #[arg(long, default_value_t = false, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a CSV price history (date,open,high,low,close,volume).
    Analyze {
        /// Path to the CSV file.
        #[arg(long)]
        csv: PathBuf,

        /// Symbol the history belongs to.
        #[arg(long)]
        symbol: String,

        /// Path to a TOML config file. Defaults to built-in settings.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Analyze a seeded synthetic random walk.
    Synthetic {
        /// Symbol to label the series with.
        #[arg(long)]
        symbol: String,

        /// Number of trading days to generate.
        #[arg(long, default_value_t = 250)]
        days: usize,

        /// RNG seed. Defaults to a hash of the symbol.
        #[arg(long)]
        seed: Option<u64>,

        /// Opening price of the first day.
        #[arg(long, default_value_t = 100.0)]
        start_price: f64,

        /// First date (YYYY-MM-DD).
        #[arg(long, default_value = "2024-01-02")]
        start: String,

        /// Path to a TOML config file. Defaults to built-in settings.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Analyze every *.csv in a directory; the file stem is the symbol.
    Batch {
        /// Directory holding the CSV files.
        #[arg(long)]
        dir: PathBuf,

        /// Path to a TOML config file. Defaults to built-in settings.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the default configuration as TOML.
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Analyze {
            csv,
            symbol,
            config,
        } => run_analyze(&csv, &symbol, config.as_deref(), cli.pretty),
        Commands::Synthetic {
            symbol,
            days,
            seed,
            start_price,
            start,
            config,
        } => run_synthetic(
            &symbol,
            days,
            seed,
            start_price,
            &start,
            config.as_deref(),
            cli.pretty,
        ),
        Commands::Batch { dir, config } => run_batch(&dir, config.as_deref(), cli.pretty),
        Commands::Config => {
            print!("{}", AnalysisConfig::default().to_toml_string()?);
            Ok(())
        }
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn build_analyzer(config_path: Option<&Path>) -> Result<Analyzer> {
    let config = match config_path {
        Some(path) => AnalysisConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };
    Ok(Analyzer::new(config)?)
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}

fn run_analyze(csv: &Path, symbol: &str, config: Option<&Path>, pretty: bool) -> Result<()> {
    let analyzer = build_analyzer(config)?;
    let series = input::load_series(csv)?;
    tracing::info!(symbol, points = series.len(), digest = %series.digest(), "loaded series");

    let recommendation = analyzer.analyze(symbol, &series)?;
    print_json(&recommendation, pretty)
}

fn run_synthetic(
    symbol: &str,
    days: usize,
    seed: Option<u64>,
    start_price: f64,
    start: &str,
    config: Option<&Path>,
    pretty: bool,
) -> Result<()> {
    let analyzer = build_analyzer(config)?;
    let start = NaiveDate::parse_from_str(start, "%Y-%m-%d")
        .with_context(|| format!("invalid --start date '{start}'"))?;
    let seed = seed.unwrap_or_else(|| symbol_seed(symbol));

    let walk = RandomWalk {
        start,
        start_price,
        days,
        ..RandomWalk::default()
    };
    let series = walk.generate(seed)?;
    tracing::info!(symbol, seed, days, "generated synthetic series");

    let recommendation = analyzer.analyze(symbol, &series)?;
    print_json(&recommendation, pretty)
}

fn run_batch(dir: &Path, config: Option<&Path>, pretty: bool) -> Result<()> {
    let analyzer = build_analyzer(config)?;
    let files = input::csv_files(dir)?;
    if files.is_empty() {
        bail!("no CSV files found in {}", dir.display());
    }

    // One independent analysis per file; the analyzer holds no mutable state.
    let outcomes: Vec<(String, Result<Recommendation>)> = files
        .par_iter()
        .map(|path| {
            let symbol = input::symbol_from_path(path).unwrap_or_else(|| "UNKNOWN".to_string());
            let outcome = input::load_series(path)
                .and_then(|series| analyzer.analyze(&symbol, &series).map_err(Into::into));
            (symbol, outcome)
        })
        .collect();

    let mut recommendations = Vec::new();
    let mut failures = 0usize;
    for (symbol, outcome) in outcomes {
        match outcome {
            Ok(rec) => recommendations.push(rec),
            Err(err) => {
                failures += 1;
                tracing::warn!(symbol = %symbol, "analysis failed: {err:#}");
                eprintln!("{symbol}: {err:#}");
            }
        }
    }

    print_json(&recommendations, pretty)?;

    if failures > 0 {
        bail!("{failures} of {} files failed", files.len());
    }
    Ok(())
}
