//! Euler–Maruyama scheme for one-factor diffusions.
//!
//! ```text
//! X(t+dt) = X(t) + a(t, X) * dt + b(t, X) * sqrt(dt) * Z,   Z ~ N(0, 1)
//! ```
//!
//! Coefficients are re-evaluated at every step, so state- and
//! time-dependent models (local volatility) are handled without special
//! cases.

use pricer_core::types::Result;
use pricer_models::models::{DiffusionModel, State};

use super::{check_dt, check_spot, reject_v0, Scheme};
use crate::rng::PricerRng;

/// Generic Euler–Maruyama scheme.
///
/// Draws exactly one standard normal per step. When the model exposes an
/// instantaneous variance, each produced state records it.
///
/// # Examples
///
/// ```
/// use pricer_models::models::BlackScholesModel;
/// use pricer_pricing::rng::PricerRng;
/// use pricer_pricing::schemes::{EulerScheme, Scheme};
///
/// // Zero volatility: the step is deterministic
/// let scheme = EulerScheme::new(BlackScholesModel::new(0.05, 0.0).unwrap());
/// let mut rng = PricerRng::from_seed(1);
///
/// let s0 = scheme.init_state(100.0, None).unwrap();
/// let s1 = scheme.step(&s0, 0, 0.1, &mut rng).unwrap();
/// assert!((s1.spot - 100.5).abs() < 1e-12);
/// ```
#[derive(Clone, Debug)]
pub struct EulerScheme<M: DiffusionModel> {
    model: M,
}

impl<M: DiffusionModel> EulerScheme<M> {
    /// Wrap a model.
    pub fn new(model: M) -> Self {
        Self { model }
    }

    /// The discretised model.
    pub fn model(&self) -> &M {
        &self.model
    }
}

impl<M: DiffusionModel> Scheme for EulerScheme<M> {
    fn init_state(&self, s0: f64, v0: Option<f64>) -> Result<State> {
        check_spot("EulerScheme::init_state", s0, false)?;
        reject_v0("EulerScheme::init_state", v0)?;

        let state = State::spot(s0);
        Ok(State {
            variance: self.model.instantaneous_variance(0.0, &state),
            ..state
        })
    }

    fn step(
        &self,
        state: &State,
        step_index: usize,
        dt: f64,
        rng: &mut PricerRng,
    ) -> Result<State> {
        check_dt("EulerScheme::step", dt)?;

        let t = step_index as f64 * dt;
        let z = rng.gen_normal();
        let drift = self.model.drift(t, state);
        let diffusion = self.model.diffusion(t, state);

        let next = State::spot(state.spot + drift * dt + diffusion * dt.sqrt() * z);
        Ok(State {
            variance: self.model.instantaneous_variance(t + dt, &next),
            ..next
        })
    }

    fn produces_variance(&self) -> bool {
        self.model.has_instantaneous_variance()
    }

    fn name(&self) -> &'static str {
        "Euler"
    }
}
