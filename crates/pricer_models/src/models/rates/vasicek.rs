//! Vasicek short-rate model.
//!
//! ```text
//! dr(t) = a * (b - r(t)) * dt + sigma * dW(t)
//! ```
//! where:
//! - r(t) = short rate at time t (carried in the state's spot slot)
//! - a = mean reversion speed (must be positive)
//! - b = long-term mean rate (must be positive)
//! - sigma = volatility (must be positive)
//!
//! ## Usage
//!
//! ```
//! use pricer_models::models::{DiffusionModel, State, VasicekModel};
//!
//! let model = VasicekModel::new(0.5, 0.04, 0.01).unwrap();
//! let state = State::spot(0.02);
//!
//! // Pulled towards b = 4%
//! assert!(model.drift(0.0, &state) > 0.0);
//! assert_eq!(model.diffusion(0.0, &state), 0.01);
//! ```

use pricer_core::types::{PricingError, Result};

use crate::models::{ensure_finite, DiffusionModel, State};

/// Vasicek model parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VasicekModel {
    /// Mean reversion speed (a > 0)
    mean_reversion: f64,
    /// Long-term mean rate (b > 0)
    long_term_mean: f64,
    /// Short rate volatility (sigma > 0)
    volatility: f64,
}

impl VasicekModel {
    /// Create a new Vasicek model.
    ///
    /// # Errors
    /// `InvalidParameter` unless `a`, `b` and `sigma` are all finite and
    /// strictly positive.
    pub fn new(a: f64, b: f64, sigma: f64) -> Result<Self> {
        const CTX: &str = "VasicekModel::new";
        for (name, value) in [("a", a), ("b", b), ("sigma", sigma)] {
            ensure_finite(CTX, name, value)?;
            if value <= 0.0 {
                return Err(PricingError::invalid(
                    CTX,
                    format!("{} must be > 0, got {}", name, value),
                ));
            }
        }
        Ok(Self {
            mean_reversion: a,
            long_term_mean: b,
            volatility: sigma,
        })
    }

    /// Mean reversion speed a.
    pub fn mean_reversion(&self) -> f64 {
        self.mean_reversion
    }

    /// Long-term mean b.
    pub fn long_term_mean(&self) -> f64 {
        self.long_term_mean
    }

    /// Volatility sigma.
    pub fn volatility(&self) -> f64 {
        self.volatility
    }
}

impl DiffusionModel for VasicekModel {
    #[inline]
    fn drift(&self, _t: f64, state: &State) -> f64 {
        self.mean_reversion * (self.long_term_mean - state.spot)
    }

    #[inline]
    fn diffusion(&self, _t: f64, _state: &State) -> f64 {
        self.volatility
    }

    fn model_name(&self) -> &'static str {
        "Vasicek"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_valid() {
        let model = VasicekModel::new(0.5, 0.04, 0.01).unwrap();
        assert_eq!(model.mean_reversion(), 0.5);
        assert_eq!(model.long_term_mean(), 0.04);
        assert_eq!(model.volatility(), 0.01);
    }

    #[test]
    fn test_non_positive_parameters_rejected() {
        assert!(VasicekModel::new(0.0, 0.04, 0.01).is_err());
        assert!(VasicekModel::new(0.5, -0.04, 0.01).is_err());
        let err = VasicekModel::new(0.5, 0.04, 0.0).unwrap_err();
        assert!(err.to_string().contains("sigma must be > 0"));
    }

    #[test]
    fn test_mean_reverting_drift() {
        let model = VasicekModel::new(0.5, 0.04, 0.01).unwrap();
        assert_relative_eq!(model.drift(0.0, &State::spot(0.02)), 0.01, epsilon = 1e-15);
        assert_relative_eq!(model.drift(0.0, &State::spot(0.06)), -0.01, epsilon = 1e-15);
        assert_relative_eq!(model.drift(0.0, &State::spot(0.04)), 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_constant_diffusion() {
        let model = VasicekModel::new(0.5, 0.04, 0.01).unwrap();
        assert_eq!(model.diffusion(3.0, &State::spot(-0.02)), 0.01);
        assert_eq!(model.model_name(), "Vasicek");
    }
}
