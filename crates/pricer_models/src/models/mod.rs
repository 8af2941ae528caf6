//! Stochastic process models.
//!
//! This module provides the models driven by the simulation schemes:
//! - [`State`]: Spot and optional variance carried between steps
//! - [`DiffusionModel`]: Drift/diffusion contract for one-factor SDEs
//! - [`BlackScholesModel`]: Geometric Brownian motion
//! - [`HestonModel`]: Stochastic variance model (consumed by the Heston schemes)
//! - [`LocalVolModel`]: Dupire local volatility backed by a surface
//! - [`VasicekModel`]: Mean-reverting Gaussian short rate
//! - [`DiffusionModelEnum`]: Static dispatch over the one-factor models
//!
//! ## Example
//!
//! ```
//! use pricer_models::models::{BlackScholesModel, DiffusionModel, State};
//!
//! let model = BlackScholesModel::new(0.05, 0.2).unwrap();
//! let state = State::spot(100.0);
//!
//! assert!((model.drift(0.0, &state) - 5.0).abs() < 1e-12);
//! assert!((model.diffusion(0.0, &state) - 20.0).abs() < 1e-12);
//! ```

pub mod black_scholes;
pub mod diffusion;
pub mod heston;
pub mod local_vol;
pub mod model_enum;
pub mod rates;
pub mod state;

pub use black_scholes::BlackScholesModel;
pub use diffusion::DiffusionModel;
pub use heston::HestonModel;
pub use local_vol::LocalVolModel;
pub use model_enum::DiffusionModelEnum;
pub use rates::VasicekModel;
pub use state::State;

use pricer_core::types::{PricingError, Result};

/// Reject non-finite model inputs with a uniform message.
pub(crate) fn ensure_finite(context: &'static str, name: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PricingError::invalid(
            context,
            format!("{} must be finite, got {}", name, value),
        ))
    }
}
