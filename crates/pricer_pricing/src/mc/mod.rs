//! Monte Carlo path generation.
//!
//! # Architecture
//!
//! ```text
//! MonteCarloEngine<S: Scheme>
//! ├── EngineConfig      (seed, n_jobs, return_variance)
//! ├── PricerRng         (engine generator, sub-seed source)
//! ├── rayon ThreadPool  (built when n_jobs > 1)
//! └── generate()
//!     ├── draw n_paths sub-seeds serially
//!     ├── fill_path() per path on disjoint row slices
//!     └── SimulationResult
//! ```
//!
//! # Examples
//!
//! ```rust
//! use pricer_models::models::BlackScholesModel;
//! use pricer_pricing::mc::{EngineConfig, MonteCarloEngine, ALL_CORES};
//! use pricer_pricing::schemes::LogEulerScheme;
//!
//! let scheme = LogEulerScheme::new(BlackScholesModel::new(0.05, 0.2).unwrap());
//! let mut serial = MonteCarloEngine::new(scheme);
//! let mut parallel = serial.clone();
//!
//! serial
//!     .configure(&EngineConfig::builder().seed(42).build().unwrap())
//!     .unwrap();
//! parallel
//!     .configure(&EngineConfig::builder().seed(42).n_jobs(ALL_CORES).build().unwrap())
//!     .unwrap();
//!
//! let a = serial.generate(100.0, 64, 1.0, 500, None).unwrap();
//! let b = parallel.generate(100.0, 64, 1.0, 500, None).unwrap();
//! assert_eq!(a.paths(), b.paths());
//! ```

pub mod config;
pub mod engine;
pub mod paths;
pub mod result;

pub use config::{hardware_concurrency, resolve_n_jobs, EngineConfig, EngineConfigBuilder, ALL_CORES};
pub use engine::MonteCarloEngine;
pub use paths::{simulate_path, SimulatedPath};
pub use result::SimulationResult;
