//! Teller staffing search
//!
//! Usage:
//!   cargo run --release -p teller_staffing -- --config configs/lunch_peak.toml
//!   cargo run --release -p teller_staffing -- --seed 42 --policy fresh --csv results.csv

use clap::Parser;
use std::path::PathBuf;
use teller_staffing::{ArrivalPolicy, StaffingConfig, StaffingSearch, report};

#[derive(Parser, Debug)]
#[command(
    name = "teller_staffing",
    about = "Find the fewest bank tellers that keep every queue wait under the goal"
)]
struct Args {
    /// TOML file overriding the default parameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the arrival draws (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    min_tellers: Option<usize>,

    #[arg(long)]
    max_tellers: Option<usize>,

    /// `shared` replays one arrival sequence for every count, `fresh` draws one per count
    #[arg(long)]
    policy: Option<ArrivalPolicy>,

    /// Worker threads for the per-count runs
    #[arg(long)]
    threads: Option<usize>,

    /// Write one CSV row per teller count
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the full outcome as JSON
    #[arg(long)]
    json: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format_timestamp(None)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            log::info!("loading config from {}", path.display());
            StaffingConfig::from_path(path)?
        }
        None => StaffingConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(min) = args.min_tellers {
        config.min_tellers = min;
    }
    if let Some(max) = args.max_tellers {
        config.max_tellers = max;
    }
    if let Some(policy) = args.policy {
        config.arrival_policy = policy;
    }

    let seed = config.seed.unwrap_or_else(rand::random);

    let mut search = StaffingSearch::new(config)?;
    if let Some(threads) = args.threads {
        search = search.num_threads(threads);
    }

    let outcome = search.run(seed)?;
    print!("{}", report::render_outcome(&outcome));

    if let Some(path) = &args.csv {
        report::write_csv(path, &outcome.results)?;
        log::info!("results written to {}", path.display());
    }
    if let Some(path) = &args.json {
        report::write_json(path, &outcome)?;
        log::info!("outcome written to {}", path.display());
    }

    Ok(())
}
