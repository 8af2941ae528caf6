//! Single-path driver.
//!
//! Runs a [`Scheme`] over a uniform time grid and writes the visited states
//! into caller-provided rows. The engine fills one row per path
//! on disjoint slices of its output buffers.
//!
//! # Memory Layout
//!
//! A row holds `n_steps + 1` points; index 0 is the initial state and index
//! `k` the state after `k` steps of size `dt = maturity / n_steps`.

use pricer_core::types::{PricingError, Result};
use pricer_models::models::State;

use crate::rng::PricerRng;
use crate::schemes::Scheme;

/// One simulated path.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulatedPath {
    /// Spot values, `n_steps + 1` points
    pub spots: Vec<f64>,
    /// Variance values when the scheme produces them
    pub variances: Option<Vec<f64>>,
}

impl SimulatedPath {
    /// Terminal spot value.
    pub fn terminal(&self) -> Option<f64> {
        self.spots.last().copied()
    }
}

/// Simulate one path with its own generator.
///
/// # Errors
///
/// `InvalidParameter` when `n_steps == 0` or the row cannot be allocated,
/// plus any error raised by the scheme (`init_state` preconditions, non-positive `dt`).
pub fn simulate_path<S: Scheme + ?Sized>(
    scheme: &S,
    s0: f64,
    n_steps: usize,
    maturity: f64,
    rng: &mut PricerRng,
    v0: Option<f64>,
) -> Result<SimulatedPath> {
    check_steps("MonteCarloEngine::simulate_path", n_steps)?;
    let row_len = buffer_len("MonteCarloEngine::simulate_path", 1, n_steps)?;

    let dt = maturity / n_steps as f64;
    let mut spots = vec![0.0; row_len];
    let mut variances = scheme.produces_variance().then(|| vec![0.0; row_len]);

    fill_path(scheme, s0, v0, dt, rng, &mut spots, variances.as_deref_mut())?;
    Ok(SimulatedPath { spots, variances })
}

/// Run the scheme over `spots.len() - 1` steps, writing every state.
///
/// `variances`, when given, must have the same length as `spots`.
pub(crate) fn fill_path<S: Scheme + ?Sized>(
    scheme: &S,
    s0: f64,
    v0: Option<f64>,
    dt: f64,
    rng: &mut PricerRng,
    spots: &mut [f64],
    mut variances: Option<&mut [f64]>,
) -> Result<()> {
    let mut state = scheme.init_state(s0, v0)?;
    record(&state, 0, spots, variances.as_deref_mut())?;

    for step in 1..spots.len() {
        state = scheme.step(&state, step - 1, dt, rng)?;
        record(&state, step, spots, variances.as_deref_mut())?;
    }
    Ok(())
}

#[inline]
fn record(state: &State, idx: usize, spots: &mut [f64], variances: Option<&mut [f64]>) -> Result<()> {
    spots[idx] = state.spot;
    if let Some(row) = variances {
        row[idx] = state.variance.ok_or_else(|| {
            PricingError::invalid(
                "MonteCarloEngine::generate",
                "scheme reported variance output but produced a state without variance",
            )
        })?;
    }
    Ok(())
}

pub(crate) fn check_steps(context: &'static str, n_steps: usize) -> Result<()> {
    if n_steps == 0 {
        return Err(PricingError::invalid(context, "n_steps must be > 0"));
    }
    Ok(())
}

/// Length of an `n_paths × (n_steps + 1)` buffer of `f64`.
///
/// Fails instead of overflowing when the product exceeds what a `Vec<f64>`
/// can hold.
pub(crate) fn buffer_len(context: &'static str, n_paths: usize, n_steps: usize) -> Result<usize> {
    n_steps
        .checked_add(1)
        .and_then(|row| row.checked_mul(n_paths))
        .filter(|&len| {
            len.checked_mul(std::mem::size_of::<f64>())
                .is_some_and(|bytes| bytes <= isize::MAX as usize)
        })
        .ok_or_else(|| PricingError::invalid(context, "path buffer size overflows usize"))
}
