//! volmc - Command Line Operations for Monte Carlo Path Simulation
//!
//! This is the operational entry point for the volmc simulation engine.
//!
//! # Commands
//!
//! - `volmc simulate` - Generate a path bundle and summarise terminal values
//! - `volmc price --strike <K> --rate <r>` - Price an option with delta and gamma
//! - `volmc check` - Show hardware concurrency and the resolved configuration
//!
//! # Configuration
//!
//! Settings come from `--config <file>` (TOML), then `PRICER_*` environment
//! variables, then command-line flags. See [`config`] for the file layout.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use pricer_models::instruments::PayoffType;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

use config::{CliArgs, LogLevel};
pub use error::{CliError, Result};

/// Monte Carlo path simulation CLI
#[derive(Parser)]
#[command(name = "volmc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for command results
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate paths and summarise terminal values
    Simulate {
        /// Number of paths
        #[arg(short, long)]
        n_paths: Option<usize>,

        /// Steps per path
        #[arg(short = 's', long)]
        n_steps: Option<usize>,

        /// Explicit seed
        #[arg(long)]
        seed: Option<u64>,

        /// Worker threads (-1 for all cores)
        #[arg(short, long, allow_negative_numbers = true)]
        jobs: Option<i32>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Price an option over the configured horizon
    Price {
        /// Strike price
        #[arg(short = 'k', long)]
        strike: f64,

        /// Continuously-compounded discount rate
        #[arg(short, long, allow_negative_numbers = true)]
        rate: f64,

        /// Payoff (call, put, digital-call, digital-put)
        #[arg(short, long, default_value = "call")]
        payoff: PayoffType,

        /// Absolute spot bump for delta and gamma (default: 1% of spot)
        #[arg(short, long)]
        bump: Option<f64>,

        /// Number of paths
        #[arg(short, long)]
        n_paths: Option<usize>,

        /// Explicit seed
        #[arg(long)]
        seed: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Check system configuration
    Check,
}

impl Cli {
    /// Collect the overrides that take precedence over file and environment
    fn overrides(&self) -> CliArgs {
        let mut args = CliArgs {
            config_file: self.config.clone(),
            log_level: self.log_level.clone(),
            ..Default::default()
        };
        match &self.command {
            Commands::Simulate {
                n_paths,
                n_steps,
                seed,
                jobs,
                ..
            } => {
                args.n_paths = *n_paths;
                args.n_steps = *n_steps;
                args.seed = *seed;
                args.n_jobs = *jobs;
            }
            Commands::Price { n_paths, seed, .. } => {
                args.n_paths = *n_paths;
                args.seed = *seed;
            }
            Commands::Check => {}
        }
        args
    }
}

fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter_str()));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::build_config(&cli.overrides())?;

    init_tracing(config.log_level);
    info!(
        model = config.model.kind(),
        scheme = config.scheme.kind(),
        "configuration loaded"
    );

    match cli.command {
        Commands::Simulate { format, .. } => commands::simulate::run(&config, format),
        Commands::Price {
            strike,
            rate,
            payoff,
            bump,
            format,
            ..
        } => commands::price::run(&config, strike, rate, payoff, bump, format),
        Commands::Check => commands::check::run(&config),
    }
}
