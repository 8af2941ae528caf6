//! # Pricer Pricing (Layer 3: Simulation Engine)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing turns the models of Layer 2 into simulated path bundles:
//! - Seeded, reproducible random number generation ([`rng`])
//! - Discretisation schemes: Euler–Maruyama, log-Euler, full-truncation
//!   Heston Euler and Andersen's Quadratic-Exponential ([`schemes`])
//! - The Monte Carlo engine: two-phase seeding, parallel path generation on
//!   a rayon pool, first-error capture ([`mc`])
//! - Bump-and-revalue pricing with common random numbers ([`pricer`])
//!
//! ## Reproducibility
//!
//! For a fixed seed, [`MonteCarloEngine::generate`](mc::MonteCarloEngine::generate)
//! returns bit-identical buffers whatever the configured parallelism: every
//! path draws from its own generator, seeded serially from the engine's
//! generator before any worker starts.
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_models::models::BlackScholesModel;
//! use pricer_pricing::mc::{EngineConfig, MonteCarloEngine};
//! use pricer_pricing::schemes::LogEulerScheme;
//!
//! let scheme = LogEulerScheme::new(BlackScholesModel::new(0.05, 0.2).unwrap());
//! let mut engine = MonteCarloEngine::new(scheme);
//! engine
//!     .configure(&EngineConfig::builder().seed(42).n_jobs(2).build().unwrap())
//!     .unwrap();
//!
//! // 1,000 paths of 252 steps over one year
//! let result = engine.generate(100.0, 252, 1.0, 1_000, None).unwrap();
//! assert_eq!(result.paths().len(), 1_000 * 253);
//! assert!(result.avg_terminal_value() > 0.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod mc;
pub mod pricer;
pub mod rng;
pub mod schemes;
