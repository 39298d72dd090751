//! Vice Simulation CLI
//!
//! Runs one simulation or a seeded batch and writes the reports as JSON.

use clap::{Args, Parser, Subcommand};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

use vice_core::{run_batch, seed_range, ActionCatalog, CatalogError, ConfigError, SimConfig, Simulation, SimulationParams};

/// Agent decision and state evolution simulator
#[derive(Debug, Parser)]
#[command(name = "vice_sim")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run a single simulation and write its report as JSON
    Run {
        #[command(flatten)]
        sim: SimArgs,

        /// Random seed for reproducibility
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Also write every turn's full record as JSON lines to this file
        #[arg(long, value_name = "FILE")]
        turns: Option<PathBuf>,
    },

    /// Run many seeded simulations and write one report per line
    Batch {
        #[command(flatten)]
        sim: SimArgs,

        /// Number of runs
        #[arg(long, default_value_t = 100)]
        runs: usize,

        /// Seed of the first run; later runs use consecutive seeds
        #[arg(long, default_value_t = 0)]
        first_seed: u64,

        /// Worker threads
        #[arg(long, default_value_t = 4)]
        workers: usize,
    },

    /// Print the default tuning file, or the built-in action catalog
    DefaultConfig {
        /// Print the action catalog instead of the tuning file
        #[arg(long)]
        catalog: bool,
    },
}

/// Options shared by `run` and `batch`. Omitted values come from the tuning file.
#[derive(Debug, Args)]
struct SimArgs {
    /// Probability of choosing the best-scored action (0 to 1)
    #[arg(long)]
    rationality: Option<f64>,

    /// Starting money
    #[arg(long)]
    money: Option<i64>,

    /// Risk tolerance (-1 to 1)
    #[arg(long, allow_hyphen_values = true)]
    risk_tolerance: Option<f64>,

    /// Maximum number of turns
    #[arg(long)]
    steps: Option<u32>,

    /// Global addiction predisposition multiplier
    #[arg(long)]
    predisposition: Option<f64>,

    /// Record the name of every chosen action
    #[arg(long)]
    record_actions: bool,

    /// Tuning file (defaults to tuning.toml when present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Action catalog TOML file (defaults to the built-in catalog)
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

impl SimArgs {
    fn load(&self) -> Result<(SimConfig, ActionCatalog), CliError> {
        let config = match &self.config {
            Some(path) => SimConfig::from_file(path)?,
            None => SimConfig::load_or_default(),
        };
        let catalog = match &self.catalog {
            Some(path) => ActionCatalog::from_file(path)?,
            None => ActionCatalog::default(),
        };
        Ok((config, catalog))
    }

    fn params(&self, config: &SimConfig) -> SimulationParams {
        let defaults = &config.simulation;
        SimulationParams::new(
            self.rationality.unwrap_or(defaults.default_rationality),
            self.money.unwrap_or(defaults.default_money),
            self.risk_tolerance.unwrap_or(defaults.default_risk_tolerance),
            self.steps.unwrap_or(defaults.default_steps),
            self.predisposition.unwrap_or(defaults.default_predisposition),
        )
        .with_record_actions(self.record_actions)
    }

    fn writer(&self) -> Result<Box<dyn Write>, CliError> {
        open_writer(self.output.as_ref())
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn open_writer(path: Option<&PathBuf>) -> Result<Box<dyn Write>, CliError> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

fn run_single(sim: &SimArgs, seed: u64, turns: Option<&PathBuf>) -> Result<(), CliError> {
    let (config, catalog) = sim.load()?;
    let mut simulation = Simulation::new(&catalog, &config, sim.params(&config)).with_seed(seed);

    let report = match turns {
        Some(path) => {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut out = open_writer(Some(path))?;
            while let Some(record) = simulation.step(&mut rng) {
                serde_json::to_writer(&mut out, &record)?;
                writeln!(out)?;
            }
            out.flush()?;
            simulation.into_report()
        }
        None => simulation.run(),
    };

    let mut out = sim.writer()?;
    serde_json::to_writer_pretty(&mut out, &report)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

fn run_many(sim: &SimArgs, runs: usize, first_seed: u64, workers: usize) -> Result<(), CliError> {
    let (config, catalog) = sim.load()?;
    let params = sim.params(&config);
    let reports = run_batch(&catalog, &config, &params, &seed_range(first_seed, runs), workers);

    let mut out = sim.writer()?;
    for report in &reports {
        serde_json::to_writer(&mut out, report)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

fn print_defaults(catalog: bool) -> Result<(), CliError> {
    let toml = if catalog {
        ActionCatalog::default().to_toml()?
    } else {
        SimConfig::default().to_toml()?
    };
    print!("{}", toml);
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match &cli.command {
        Command::Run { sim, seed, turns } => run_single(sim, *seed, turns.as_ref()),
        Command::Batch {
            sim,
            runs,
            first_seed,
            workers,
        } => run_many(sim, *runs, *first_seed, *workers),
        Command::DefaultConfig { catalog } => print_defaults(*catalog),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
