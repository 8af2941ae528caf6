//! Black–Scholes (geometric Brownian motion) model.
//!
//! ```text
//! dS = mu * S * dt + sigma * S * dW
//! ```
//! where:
//! - S = asset price
//! - mu = drift rate
//! - sigma = volatility
//!
//! The generic Euler scheme discretises the SDE directly; the log-Euler
//! scheme uses the exact log-space solution
//! `S(t+dt) = S(t) * exp((mu - 0.5*sigma^2)*dt + sigma*sqrt(dt)*Z)`.

use pricer_core::types::{PricingError, Result};

use super::{ensure_finite, DiffusionModel, State};

/// Black–Scholes model with constant drift and volatility.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlackScholesModel {
    mu: f64,
    sigma: f64,
}

impl BlackScholesModel {
    /// Create a new Black–Scholes model.
    ///
    /// # Arguments
    /// * `mu` - Drift rate
    /// * `sigma` - Volatility (must be non-negative)
    ///
    /// # Errors
    /// `InvalidParameter` if `sigma < 0` or either input is not finite.
    pub fn new(mu: f64, sigma: f64) -> Result<Self> {
        ensure_finite("BlackScholesModel::new", "mu", mu)?;
        ensure_finite("BlackScholesModel::new", "sigma", sigma)?;
        if sigma < 0.0 {
            return Err(PricingError::invalid(
                "BlackScholesModel::new",
                format!("sigma must be non-negative, got {}", sigma),
            ));
        }
        Ok(Self { mu, sigma })
    }

    /// Drift rate.
    #[inline]
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Volatility.
    #[inline]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

impl DiffusionModel for BlackScholesModel {
    #[inline]
    fn drift(&self, _t: f64, state: &State) -> f64 {
        self.mu * state.spot
    }

    #[inline]
    fn diffusion(&self, _t: f64, state: &State) -> f64 {
        self.sigma * state.spot
    }

    fn model_name(&self) -> &'static str {
        "BlackScholes"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_valid() {
        let model = BlackScholesModel::new(0.05, 0.2).unwrap();
        assert_eq!(model.mu(), 0.05);
        assert_eq!(model.sigma(), 0.2);
    }

    #[test]
    fn test_zero_volatility_allowed() {
        assert!(BlackScholesModel::new(0.05, 0.0).is_ok());
    }

    #[test]
    fn test_negative_volatility_rejected() {
        let err = BlackScholesModel::new(0.05, -0.1).unwrap_err();
        assert!(err.is_invalid_parameter());
        assert!(err.to_string().contains("sigma must be non-negative"));
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(BlackScholesModel::new(f64::NAN, 0.2).is_err());
        assert!(BlackScholesModel::new(0.05, f64::INFINITY).is_err());
    }

    #[test]
    fn test_coefficients_scale_with_spot() {
        let model = BlackScholesModel::new(0.03, 0.25).unwrap();
        let state = State::spot(80.0);
        assert_relative_eq!(model.drift(1.0, &state), 2.4, epsilon = 1e-12);
        assert_relative_eq!(model.diffusion(1.0, &state), 20.0, epsilon = 1e-12);
        assert_eq!(model.instantaneous_variance(0.0, &state), None);
        assert_eq!(model.model_name(), "BlackScholes");
    }
}
