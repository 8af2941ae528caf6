//! Price command implementation
//!
//! Prices a single option on the configured model with bump-and-revalue
//! delta and gamma.

use pricer_models::instruments::{Instrument, OptionContract, PayoffType};
use pricer_pricing::mc::MonteCarloEngine;
use pricer_pricing::pricer::{MarketState, Pricer};
use tracing::info;

use crate::config::SimulationConfig;
use crate::{CliError, OutputFormat, Result};

/// Run the price command
pub fn run(
    config: &SimulationConfig,
    strike: f64,
    rate: f64,
    payoff: PayoffType,
    bump: Option<f64>,
    format: OutputFormat,
) -> Result<()> {
    let sim = &config.simulation;
    info!("Starting pricing...");
    info!("  Payoff: {}", payoff);
    info!("  Strike: {}", strike);
    info!("  Maturity: {}", sim.maturity);
    info!("  Monte Carlo paths: {}", sim.n_paths);

    if let Some(h) = bump {
        if !(h.is_finite() && h > 0.0) {
            return Err(CliError::InvalidArgument(format!(
                "bump must be a positive number, got {}",
                h
            )));
        }
    }

    let mut engine = MonteCarloEngine::new(config.build_scheme()?);
    engine.configure(&config.engine)?;

    let market = MarketState::new(sim.spot, rate, sim.v0)?;
    let instrument = Instrument::new(OptionContract::new(strike, sim.maturity)?, payoff.into());
    let mut pricer = Pricer::new(market, sim.n_steps, sim.n_paths, engine)?;
    let result = pricer.compute(&instrument, bump)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Table => {
            println!("\n┌────────────┬──────────────────┐");
            println!("│ Price      │ {:>16.6} │", result.price);
            println!("│ Delta      │ {:>16.6} │", result.delta);
            println!("│ Gamma      │ {:>16.6} │", result.gamma);
            println!("└────────────┴──────────────────┘");
        }
    }

    info!("Pricing complete");
    Ok(())
}
