//! Instrument valuation on top of the Monte Carlo engine.
//!
//! [`Pricer`] discounts the mean payoff of an [`Instrument`] over a simulated
//! bundle and bumps the spot for delta and gamma, replaying the same random
//! numbers on every leg.
//!
//! # Examples
//!
//! ```rust
//! use pricer_models::instruments::{Instrument, OptionContract, PayoffType};
//! use pricer_models::models::BlackScholesModel;
//! use pricer_pricing::mc::{EngineConfig, MonteCarloEngine};
//! use pricer_pricing::pricer::{MarketState, Pricer};
//! use pricer_pricing::schemes::LogEulerScheme;
//!
//! let mut engine = MonteCarloEngine::new(LogEulerScheme::new(
//!     BlackScholesModel::new(0.05, 0.2).unwrap(),
//! ));
//! engine
//!     .configure(&EngineConfig::builder().seed(42).build().unwrap())
//!     .unwrap();
//!
//! let market = MarketState::new(100.0, 0.05, None).unwrap();
//! let mut pricer = Pricer::new(market, 12, 2_000, engine).unwrap();
//!
//! let call = Instrument::new(OptionContract::new(100.0, 1.0).unwrap(), PayoffType::Call.into());
//! let result = pricer.compute(&call, None).unwrap();
//! assert!(result.price > 0.0);
//! assert!(result.delta > 0.0 && result.delta < 1.0);
//! ```
//!
//! [`Instrument`]: pricer_models::instruments::Instrument

mod bump;
mod market;
mod result;

pub use bump::{Pricer, DEFAULT_RELATIVE_BUMP};
pub use market::MarketState;
pub use result::PricingResult;
