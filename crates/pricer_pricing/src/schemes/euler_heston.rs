//! Full-truncation Euler scheme for the Heston model.
//!
//! ```text
//! V+       = max(V, 0)
//! V(t+dt)  = V + kappa * (theta - V+) * dt + xi * sqrt(V+) * sqrt(dt) * Z_v
//! Z_s      = rho * Z_v + sqrt(1 - rho^2) * Z
//! log S(t+dt) = log S + (mu - 0.5 * V+) * dt + sqrt(V+) * sqrt(dt) * Z_s
//! ```
//!
//! The raw variance may go negative; only its positive part feeds the
//! drift and diffusion terms. States record the raw value.

use pricer_core::types::Result;
use pricer_models::models::{HestonModel, State};

use super::{check_dt, check_spot, require_v0, state_variance, Scheme};
use crate::rng::PricerRng;

/// Full-truncation Euler discretisation of [`HestonModel`].
#[derive(Clone, Copy, Debug)]
pub struct EulerHestonScheme {
    model: HestonModel,
}

impl EulerHestonScheme {
    /// Wrap a Heston model.
    pub fn new(model: HestonModel) -> Self {
        Self { model }
    }

    /// The discretised model.
    pub fn model(&self) -> &HestonModel {
        &self.model
    }
}

impl Scheme for EulerHestonScheme {
    fn init_state(&self, s0: f64, v0: Option<f64>) -> Result<State> {
        check_spot("EulerHestonScheme::init_state", s0, true)?;
        let v0 = require_v0("EulerHestonScheme::init_state", v0)?;
        Ok(State::with_variance(s0, v0))
    }

    fn step(
        &self,
        state: &State,
        _step_index: usize,
        dt: f64,
        rng: &mut PricerRng,
    ) -> Result<State> {
        check_dt("EulerHestonScheme::step", dt)?;
        let v = state_variance("EulerHestonScheme::step", state)?;

        let m = &self.model;
        let z_v = rng.gen_normal();
        let z = rng.gen_normal();
        let z_s = m.rho() * z_v + (1.0 - m.rho() * m.rho()).sqrt() * z;

        let v_plus = v.max(0.0);
        let sqrt_v_dt = (v_plus * dt).sqrt();

        let v_next = v + m.kappa() * (m.theta() - v_plus) * dt + m.xi() * sqrt_v_dt * z_v;
        let log_increment = (m.mu() - 0.5 * v_plus) * dt + sqrt_v_dt * z_s;

        Ok(State::with_variance(state.spot * log_increment.exp(), v_next))
    }

    fn produces_variance(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "EulerHeston"
    }
}
