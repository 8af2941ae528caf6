//! Static dispatch over the available schemes.

use pricer_core::types::Result;
use pricer_models::models::{DiffusionModelEnum, State};

use super::{EulerHestonScheme, EulerScheme, LogEulerScheme, QeScheme, Scheme};
use crate::rng::PricerRng;

/// Closed set of schemes, chosen at run time (for example from a
/// configuration file) while keeping `match`-based dispatch in the step loop.
#[derive(Clone, Debug)]
pub enum SchemeEnum {
    /// Euler–Maruyama over a one-factor model
    Euler(EulerScheme<DiffusionModelEnum>),
    /// Log-space Black–Scholes stepping
    LogEuler(LogEulerScheme),
    /// Full-truncation Heston Euler
    EulerHeston(EulerHestonScheme),
    /// Quadratic-Exponential Heston
    Qe(QeScheme),
}

impl Scheme for SchemeEnum {
    fn init_state(&self, s0: f64, v0: Option<f64>) -> Result<State> {
        match self {
            SchemeEnum::Euler(s) => s.init_state(s0, v0),
            SchemeEnum::LogEuler(s) => s.init_state(s0, v0),
            SchemeEnum::EulerHeston(s) => s.init_state(s0, v0),
            SchemeEnum::Qe(s) => s.init_state(s0, v0),
        }
    }

    #[inline]
    fn step(
        &self,
        state: &State,
        step_index: usize,
        dt: f64,
        rng: &mut PricerRng,
    ) -> Result<State> {
        match self {
            SchemeEnum::Euler(s) => s.step(state, step_index, dt, rng),
            SchemeEnum::LogEuler(s) => s.step(state, step_index, dt, rng),
            SchemeEnum::EulerHeston(s) => s.step(state, step_index, dt, rng),
            SchemeEnum::Qe(s) => s.step(state, step_index, dt, rng),
        }
    }

    fn produces_variance(&self) -> bool {
        match self {
            SchemeEnum::Euler(s) => s.produces_variance(),
            SchemeEnum::LogEuler(s) => s.produces_variance(),
            SchemeEnum::EulerHeston(s) => s.produces_variance(),
            SchemeEnum::Qe(s) => s.produces_variance(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            SchemeEnum::Euler(s) => s.name(),
            SchemeEnum::LogEuler(s) => s.name(),
            SchemeEnum::EulerHeston(s) => s.name(),
            SchemeEnum::Qe(s) => s.name(),
        }
    }
}

impl From<EulerScheme<DiffusionModelEnum>> for SchemeEnum {
    fn from(scheme: EulerScheme<DiffusionModelEnum>) -> Self {
        SchemeEnum::Euler(scheme)
    }
}

impl From<LogEulerScheme> for SchemeEnum {
    fn from(scheme: LogEulerScheme) -> Self {
        SchemeEnum::LogEuler(scheme)
    }
}

impl From<EulerHestonScheme> for SchemeEnum {
    fn from(scheme: EulerHestonScheme) -> Self {
        SchemeEnum::EulerHeston(scheme)
    }
}

impl From<QeScheme> for SchemeEnum {
    fn from(scheme: QeScheme) -> Self {
        SchemeEnum::Qe(scheme)
    }
}
