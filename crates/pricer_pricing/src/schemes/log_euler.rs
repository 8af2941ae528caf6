//! Log-Euler scheme for Black–Scholes.
//!
//! ```text
//! log S(t+dt) = log S(t) + (mu - 0.5 * sigma^2) * dt + sigma * sqrt(dt) * Z
//! ```
//!
//! Exact in distribution for constant coefficients and strictly positive
//! by construction.

use pricer_core::types::Result;
use pricer_models::models::{BlackScholesModel, State};

use super::{check_dt, check_spot, reject_v0, Scheme};
use crate::rng::PricerRng;

/// Log-space stepping for [`BlackScholesModel`].
#[derive(Clone, Copy, Debug)]
pub struct LogEulerScheme {
    model: BlackScholesModel,
}

impl LogEulerScheme {
    /// Wrap a Black–Scholes model.
    pub fn new(model: BlackScholesModel) -> Self {
        Self { model }
    }

    /// The discretised model.
    pub fn model(&self) -> &BlackScholesModel {
        &self.model
    }
}

impl Scheme for LogEulerScheme {
    fn init_state(&self, s0: f64, v0: Option<f64>) -> Result<State> {
        check_spot("LogEulerScheme::init_state", s0, true)?;
        reject_v0("LogEulerScheme::init_state", v0)?;
        Ok(State::spot(s0))
    }

    fn step(
        &self,
        state: &State,
        _step_index: usize,
        dt: f64,
        rng: &mut PricerRng,
    ) -> Result<State> {
        check_dt("LogEulerScheme::step", dt)?;

        let sigma = self.model.sigma();
        let z = rng.gen_normal();
        let log_increment = (self.model.mu() - 0.5 * sigma * sigma) * dt + sigma * dt.sqrt() * z;
        Ok(State::spot(state.spot * log_increment.exp()))
    }

    fn produces_variance(&self) -> bool {
        false
    }

    fn name(&self) -> &'static str {
        "LogEuler"
    }
}
