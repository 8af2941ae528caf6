//! Simulate command implementation
//!
//! Generates a path bundle with the configured model and scheme and prints a
//! summary of the terminal distribution.

use pricer_pricing::mc::{MonteCarloEngine, SimulationResult};
use pricer_pricing::schemes::Scheme;
use serde::Serialize;
use tracing::info;

use crate::config::SimulationConfig;
use crate::{OutputFormat, Result};

/// Terminal statistics of a simulated bundle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSummary {
    pub scheme: &'static str,
    pub n_paths: usize,
    pub n_steps: usize,
    pub seed: u64,
    pub user_seeded: bool,
    pub mean_terminal: f64,
    pub min_terminal: f64,
    pub max_terminal: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_terminal_variance: Option<f64>,
}

impl SimulationSummary {
    fn from_result(result: &SimulationResult, scheme: &'static str, user_seeded: bool) -> Self {
        let (min, max) = result
            .terminal_values()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| {
                (lo.min(s), hi.max(s))
            });

        let row = result.row_len();
        let mean_terminal_variance = result.variances().ok().map(|v| {
            v.chunks_exact(row).map(|r| r[row - 1]).sum::<f64>() / result.n_paths() as f64
        });

        Self {
            scheme,
            n_paths: result.n_paths(),
            n_steps: result.n_steps(),
            seed: result.origin_seed(),
            user_seeded,
            mean_terminal: result.avg_terminal_value(),
            min_terminal: min,
            max_terminal: max,
            mean_terminal_variance,
        }
    }
}

/// Run the simulate command
pub fn run(config: &SimulationConfig, format: OutputFormat) -> Result<()> {
    let sim = &config.simulation;
    info!("Starting simulation...");
    info!("  Paths: {}", sim.n_paths);
    info!("  Steps: {}", sim.n_steps);
    info!("  Maturity: {}", sim.maturity);

    let mut engine = MonteCarloEngine::new(config.build_scheme()?);
    engine.configure(&config.engine)?;
    info!("  Worker threads: {}", engine.n_jobs());

    let result = engine.generate(sim.spot, sim.n_steps, sim.maturity, sim.n_paths, sim.v0)?;
    let summary = SimulationSummary::from_result(&result, engine.scheme().name(), engine.is_user_seeded());

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Table => print_table(&summary),
    }

    info!("Simulation complete");
    Ok(())
}

fn print_table(summary: &SimulationSummary) {
    println!("\n┌──────────────────────────┬──────────────────────┐");
    println!("│ Scheme                   │ {:>20} │", summary.scheme);
    println!("│ Paths                    │ {:>20} │", summary.n_paths);
    println!("│ Steps                    │ {:>20} │", summary.n_steps);
    println!(
        "│ Seed                     │ {:>20} │",
        if summary.user_seeded {
            summary.seed.to_string()
        } else {
            format!("{} (entropy)", summary.seed)
        }
    );
    println!("├──────────────────────────┼──────────────────────┤");
    println!("│ Mean terminal value      │ {:>20.6} │", summary.mean_terminal);
    println!("│ Min terminal value       │ {:>20.6} │", summary.min_terminal);
    println!("│ Max terminal value       │ {:>20.6} │", summary.max_terminal);
    if let Some(v) = summary.mean_terminal_variance {
        println!("│ Mean terminal variance   │ {:>20.6} │", v);
    }
    println!("└──────────────────────────┴──────────────────────┘");
}
