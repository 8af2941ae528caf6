//! Check command implementation
//!
//! Reports hardware concurrency and the resolved configuration without
//! running a simulation.

use pricer_pricing::mc::{hardware_concurrency, resolve_n_jobs};
use pricer_pricing::schemes::{Scheme, SchemeEnum};
use tracing::{info, warn};

use crate::config::SimulationConfig;
use crate::Result;

/// Run the check command
pub fn run(config: &SimulationConfig) -> Result<()> {
    info!("Checking configuration...");

    let scheme = config.build_scheme()?;
    let n_jobs = resolve_n_jobs(config.engine.n_jobs.unwrap_or(1))?;
    let sim = &config.simulation;

    println!("volmc {}", env!("CARGO_PKG_VERSION"));
    println!("  Hardware concurrency: {}", hardware_concurrency());
    println!("  Worker threads:       {}", n_jobs);
    println!(
        "  Seed:                 {}",
        config
            .engine
            .seed
            .map_or_else(|| "entropy".to_string(), |s| s.to_string())
    );
    println!(
        "  Return variance:      {}",
        config.engine.return_variance.unwrap_or(false)
    );
    println!("  Log level:            {}", config.log_level);
    println!("  Model:                {}", config.model.kind());
    println!("  Scheme:               {}", scheme.name());
    println!(
        "  Grid:                 {} paths x {} steps over {} years",
        sim.n_paths, sim.n_steps, sim.maturity
    );

    let heston = match &scheme {
        SchemeEnum::EulerHeston(s) => Some(s.model()),
        SchemeEnum::Qe(s) => Some(s.model()),
        _ => None,
    };
    if let Some(model) = heston {
        let feller = model.satisfies_feller();
        println!(
            "  Feller condition:     {}",
            if feller { "satisfied" } else { "violated" }
        );
        if !feller && matches!(scheme, SchemeEnum::EulerHeston(_)) {
            warn!("variance can reach zero under full truncation; prefer the qe scheme");
        }
    }

    info!("Check complete");
    Ok(())
}
