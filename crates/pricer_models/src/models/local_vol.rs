//! Dupire local volatility model.
//!
//! ```text
//! dS = (r - q) * S * dt + sigma_loc(t, S) * S * dW
//! ```
//!
//! The volatility is read from a [`LocalVolatilitySurface`] every time the
//! coefficients are evaluated, so the diffusion term changes along the path.

use std::sync::Arc;

use pricer_core::market_data::surfaces::LocalVolatilitySurface;
use pricer_core::types::Result;

use super::{ensure_finite, DiffusionModel, State};

/// Local volatility model backed by a shared surface.
#[derive(Clone, Debug)]
pub struct LocalVolModel {
    rate: f64,
    dividend: f64,
    surface: Arc<LocalVolatilitySurface>,
}

impl LocalVolModel {
    /// Create a local volatility model.
    ///
    /// # Arguments
    /// * `rate` - Risk-free rate r
    /// * `dividend` - Continuous dividend yield q
    /// * `surface` - Shared local volatility surface
    pub fn new(rate: f64, dividend: f64, surface: Arc<LocalVolatilitySurface>) -> Result<Self> {
        ensure_finite("LocalVolModel::new", "rate", rate)?;
        ensure_finite("LocalVolModel::new", "dividend", dividend)?;
        Ok(Self {
            rate,
            dividend,
            surface,
        })
    }

    /// Risk-free rate.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Dividend yield.
    pub fn dividend(&self) -> f64 {
        self.dividend
    }

    /// The underlying surface.
    pub fn surface(&self) -> &Arc<LocalVolatilitySurface> {
        &self.surface
    }
}

impl DiffusionModel for LocalVolModel {
    #[inline]
    fn drift(&self, _t: f64, state: &State) -> f64 {
        (self.rate - self.dividend) * state.spot
    }

    #[inline]
    fn diffusion(&self, t: f64, state: &State) -> f64 {
        self.surface.sigma(t, state.spot) * state.spot
    }

    fn instantaneous_variance(&self, t: f64, state: &State) -> Option<f64> {
        let sigma = self.surface.sigma(t, state.spot);
        Some(sigma * sigma)
    }

    fn has_instantaneous_variance(&self) -> bool {
        true
    }

    fn model_name(&self) -> &'static str {
        "LocalVol"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn model() -> LocalVolModel {
        let surface = LocalVolatilitySurface::new(
            vec![0.2, 0.5, 0.8],
            vec![90.0, 100.0, 110.0],
            vec![0.20, 0.19, 0.21, 0.22, 0.20, 0.23, 0.25, 0.24, 0.26],
        )
        .unwrap();
        LocalVolModel::new(0.05, 0.01, Arc::new(surface)).unwrap()
    }

    #[test]
    fn test_drift_uses_carry() {
        let state = State::spot(100.0);
        assert_relative_eq!(model().drift(0.3, &state), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_diffusion_reads_surface() {
        let m = model();
        assert_relative_eq!(m.diffusion(0.2, &State::spot(100.0)), 19.0, epsilon = 1e-10);
        assert_relative_eq!(m.diffusion(0.2, &State::spot(105.0)), 0.20 * 105.0, epsilon = 1e-10);
    }

    #[test]
    fn test_instantaneous_variance_is_sigma_squared() {
        let v = model().instantaneous_variance(0.2, &State::spot(100.0)).unwrap();
        assert_relative_eq!(v, 0.19 * 0.19, epsilon = 1e-12);
    }

    #[test]
    fn test_rejects_non_finite_rate() {
        let surface = Arc::clone(model().surface());
        assert!(LocalVolModel::new(f64::NAN, 0.0, surface).is_err());
    }
}
