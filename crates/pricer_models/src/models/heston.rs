//! Heston stochastic volatility model.
//!
//! ```text
//! dS = mu * S * dt + sqrt(V) * S * dW_S
//! dV = kappa * (theta - V) * dt + xi * sqrt(V) * dW_V
//! d<W_S, W_V> = rho * dt
//! ```
//!
//! ## Feller condition
//!
//! The variance process stays strictly positive when
//! ```text
//! 2 * kappa * theta >= xi^2
//! ```
//! A violation is legal; it is logged at construction and the schemes
//! handle zero variance.
//!
//! ## Usage
//!
//! ```
//! use pricer_models::models::HestonModel;
//!
//! // mu, kappa, theta, xi, rho
//! let model = HestonModel::new(0.02, 1.5, 0.04, 0.3, -0.7).unwrap();
//! assert!(model.satisfies_feller()); // 2 * 1.5 * 0.04 = 0.12 >= 0.09
//! ```

use pricer_core::types::{PricingError, Result};
use tracing::warn;

use super::ensure_finite;

/// Heston model parameters, validated at construction.
///
/// The model is two-factor and is therefore not a [`DiffusionModel`](super::DiffusionModel);
/// it is consumed by the dedicated Heston schemes (full-truncation Euler
/// and QE).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HestonModel {
    mu: f64,
    kappa: f64,
    theta: f64,
    xi: f64,
    rho: f64,
}

impl HestonModel {
    /// Create a new Heston model.
    ///
    /// # Arguments
    /// * `mu` - Spot drift rate
    /// * `kappa` - Mean reversion speed (> 0)
    /// * `theta` - Long-run variance (> 0)
    /// * `xi` - Volatility of variance (> 0)
    /// * `rho` - Spot/variance correlation, in `[-1, 1]`
    ///
    /// # Errors
    /// `InvalidParameter` naming the first violated constraint.
    pub fn new(mu: f64, kappa: f64, theta: f64, xi: f64, rho: f64) -> Result<Self> {
        const CTX: &str = "HestonModel::new";
        ensure_finite(CTX, "mu", mu)?;
        ensure_finite(CTX, "kappa", kappa)?;
        ensure_finite(CTX, "theta", theta)?;
        ensure_finite(CTX, "xi", xi)?;
        ensure_finite(CTX, "rho", rho)?;

        if kappa <= 0.0 {
            return Err(PricingError::invalid(
                CTX,
                format!("kappa must be > 0, got {}", kappa),
            ));
        }
        if theta <= 0.0 {
            return Err(PricingError::invalid(
                CTX,
                format!("theta must be > 0, got {}", theta),
            ));
        }
        if xi <= 0.0 {
            return Err(PricingError::invalid(CTX, format!("xi must be > 0, got {}", xi)));
        }
        if !(-1.0..=1.0).contains(&rho) {
            return Err(PricingError::invalid(
                CTX,
                format!("rho must lie in [-1, 1], got {}", rho),
            ));
        }

        let model = Self {
            mu,
            kappa,
            theta,
            xi,
            rho,
        };
        if !model.satisfies_feller() {
            warn!(
                kappa,
                theta,
                xi,
                "Heston parameters violate the Feller condition; variance can reach zero"
            );
        }
        Ok(model)
    }

    /// Spot drift rate.
    #[inline]
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Mean reversion speed.
    #[inline]
    pub fn kappa(&self) -> f64 {
        self.kappa
    }

    /// Long-run variance.
    #[inline]
    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// Volatility of variance.
    #[inline]
    pub fn xi(&self) -> f64 {
        self.xi
    }

    /// Spot/variance correlation.
    #[inline]
    pub fn rho(&self) -> f64 {
        self.rho
    }

    /// Check the Feller condition `2 * kappa * theta >= xi^2`.
    ///
    /// Diagnostic only; construction never fails because of it.
    pub fn satisfies_feller(&self) -> bool {
        2.0 * self.kappa * self.theta >= self.xi * self.xi
    }

    /// Conditional mean and variance of `V(t+dt)` given `V(t) = v`.
    ///
    /// ```text
    /// m  = theta + (v - theta) * e^{-kappa dt}
    /// s2 = v xi^2 e^{-kappa dt} (1 - e^{-kappa dt}) / kappa
    ///    + theta xi^2 (1 - e^{-kappa dt})^2 / (2 kappa)
    /// ```
    pub fn variance_moments(&self, v: f64, dt: f64) -> (f64, f64) {
        let decay = (-self.kappa * dt).exp();
        let one_minus = 1.0 - decay;
        let xi2 = self.xi * self.xi;

        let mean = self.theta + (v - self.theta) * decay;
        let variance = v * xi2 * decay * one_minus / self.kappa
            + self.theta * xi2 * one_minus * one_minus / (2.0 * self.kappa);
        (mean, variance)
    }

    /// Human-readable model name.
    pub fn model_name(&self) -> &'static str {
        "Heston"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_valid() {
        let model = HestonModel::new(0.02, 2.0, 0.05, 0.4, -0.5).unwrap();
        assert_eq!(model.mu(), 0.02);
        assert_eq!(model.kappa(), 2.0);
        assert_eq!(model.theta(), 0.05);
        assert_eq!(model.xi(), 0.4);
        assert_eq!(model.rho(), -0.5);
        assert_eq!(model.model_name(), "Heston");
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(HestonModel::new(0.02, 0.0, 0.05, 0.4, -0.5).is_err());
        assert!(HestonModel::new(0.02, 2.0, -0.05, 0.4, -0.5).is_err());
        assert!(HestonModel::new(0.02, 2.0, 0.05, 0.0, -0.5).is_err());
        assert!(HestonModel::new(0.02, 2.0, 0.05, 0.4, 1.5).is_err());
        assert!(HestonModel::new(0.02, 2.0, 0.05, 0.4, -1.01).is_err());
        assert!(HestonModel::new(f64::NAN, 2.0, 0.05, 0.4, -0.5).is_err());
    }

    #[test]
    fn test_rho_bounds_inclusive() {
        assert!(HestonModel::new(0.0, 1.0, 0.04, 0.3, 1.0).is_ok());
        assert!(HestonModel::new(0.0, 1.0, 0.04, 0.3, -1.0).is_ok());
    }

    #[test]
    fn test_error_message_names_parameter() {
        let err = HestonModel::new(0.02, -1.0, 0.05, 0.4, -0.5).unwrap_err();
        assert!(err.to_string().starts_with("HestonModel::new: kappa"));
    }

    #[test]
    fn test_feller_condition() {
        let ok = HestonModel::new(0.0, 1.5, 0.04, 0.3, -0.7).unwrap();
        assert!(ok.satisfies_feller());

        // 2 * 0.5 * 0.04 = 0.04 < 0.25: still constructible
        let violating = HestonModel::new(0.0, 0.5, 0.04, 0.5, -0.7).unwrap();
        assert!(!violating.satisfies_feller());
    }

    #[test]
    fn test_variance_moments_at_long_run_level() {
        let model = HestonModel::new(0.0, 2.0, 0.04, 0.3, 0.0).unwrap();
        let (mean, _) = model.variance_moments(0.04, 0.1);
        assert_relative_eq!(mean, 0.04, epsilon = 1e-15);
    }

    #[test]
    fn test_variance_moments_formula() {
        let model = HestonModel::new(0.0, 2.0, 0.04, 0.3, 0.0).unwrap();
        let (v, dt) = (0.09, 0.25);
        let e = (-2.0_f64 * dt).exp();
        let expected_mean = 0.04 + (v - 0.04) * e;
        let expected_var = v * 0.09 * e * (1.0 - e) / 2.0 + 0.04 * 0.09 * (1.0 - e).powi(2) / 4.0;

        let (mean, var) = model.variance_moments(v, dt);
        assert_relative_eq!(mean, expected_mean, epsilon = 1e-15);
        assert_relative_eq!(var, expected_var, epsilon = 1e-15);
    }
}
