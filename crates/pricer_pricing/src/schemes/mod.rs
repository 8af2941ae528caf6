//! Discretisation schemes.
//!
//! A [`Scheme`] binds one or more models to a time-stepping rule and
//! advances a [`State`] by one step, drawing its randomness from the
//! generator it is handed. Schemes hold no mutable state, so one instance
//! is shared by every worker of a simulation.
//!
//! ## Available Schemes
//!
//! - [`EulerScheme`]: Euler–Maruyama for any [`DiffusionModel`](pricer_models::models::DiffusionModel)
//! - [`LogEulerScheme`]: Exact log-space stepping for Black–Scholes
//! - [`EulerHestonScheme`]: Full-truncation Euler for Heston
//! - [`QeScheme`]: Andersen's Quadratic-Exponential scheme for Heston
//! - [`SchemeEnum`]: Static dispatch over the four schemes above
//!
//! ## Step convention
//!
//! `step_index` is the 0-based index of the time point the step starts
//! from, so a time-inhomogeneous model is evaluated at
//! `t = step_index * dt`.
//!
//! Coefficients are frozen at the left end of each interval, as the Itô
//! Euler-Maruyama scheme requires. A local volatility surface is therefore
//! read at `t` for the step itself, while the variance recorded for the new
//! state is read at `t + dt`. Numbering steps from 1 instead would shift every
//! surface lookup one interval later.

mod euler;
mod euler_heston;
mod log_euler;
mod qe;
mod scheme_enum;

pub use euler::EulerScheme;
pub use euler_heston::EulerHestonScheme;
pub use log_euler::LogEulerScheme;
pub use qe::{QeScheme, DEFAULT_PSI_THRESHOLD};
pub use scheme_enum::SchemeEnum;

use pricer_core::types::{PricingError, Result};
use pricer_models::models::State;

use crate::rng::PricerRng;

/// Time-stepping rule for a simulated process.
pub trait Scheme: Send + Sync {
    /// Build the state at t = 0.
    ///
    /// `v0` is the initial variance for stochastic-variance schemes; schemes
    /// without a variance factor reject it.
    fn init_state(&self, s0: f64, v0: Option<f64>) -> Result<State>;

    /// Advance `state` by `dt`.
    ///
    /// # Errors
    /// `InvalidParameter` when `dt <= 0` or the state lacks a component the
    /// scheme needs.
    fn step(&self, state: &State, step_index: usize, dt: f64, rng: &mut PricerRng)
        -> Result<State>;

    /// Whether states produced by this scheme carry a variance.
    fn produces_variance(&self) -> bool;

    /// Scheme name used in logs.
    fn name(&self) -> &'static str;
}

#[inline]
pub(crate) fn check_dt(context: &'static str, dt: f64) -> Result<()> {
    if dt > 0.0 && dt.is_finite() {
        Ok(())
    } else {
        Err(PricingError::invalid(context, "dt must be strictly positive"))
    }
}

pub(crate) fn check_spot(context: &'static str, s0: f64, strictly_positive: bool) -> Result<()> {
    if !s0.is_finite() {
        return Err(PricingError::invalid(
            context,
            format!("initial value must be finite, got {}", s0),
        ));
    }
    if strictly_positive && s0 <= 0.0 {
        return Err(PricingError::invalid(
            context,
            format!("initial spot must be > 0, got {}", s0),
        ));
    }
    Ok(())
}

pub(crate) fn reject_v0(context: &'static str, v0: Option<f64>) -> Result<()> {
    match v0 {
        None => Ok(()),
        Some(_) => Err(PricingError::invalid(
            context,
            "initial variance is not accepted by this scheme",
        )),
    }
}

pub(crate) fn require_v0(context: &'static str, v0: Option<f64>) -> Result<f64> {
    match v0 {
        Some(v) if v.is_finite() && v >= 0.0 => Ok(v),
        Some(v) => Err(PricingError::invalid(
            context,
            format!("initial variance must be non-negative, got {}", v),
        )),
        None => Err(PricingError::invalid(context, "initial variance is required")),
    }
}

pub(crate) fn state_variance(context: &'static str, state: &State) -> Result<f64> {
    state
        .variance
        .ok_or_else(|| PricingError::invalid(context, "state carries no variance"))
}
