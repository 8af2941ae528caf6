//! DiffusionModel trait for one-factor SDEs.
//!
//! A model describes `dX = a(t, X) dt + b(t, X) dW` through its drift `a`
//! and diffusion `b`. Discretisation lives in the schemes of the pricing
//! layer; models only evaluate coefficients and never draw randomness.

use super::State;

/// Drift and diffusion coefficients of a one-factor SDE.
///
/// Implementors are immutable and shared read-only between simulation
/// workers, hence the `Send + Sync` bound.
pub trait DiffusionModel: Send + Sync {
    /// Drift coefficient a(t, X).
    fn drift(&self, t: f64, state: &State) -> f64;

    /// Diffusion coefficient b(t, X).
    fn diffusion(&self, t: f64, state: &State) -> f64;

    /// Instantaneous variance the model attaches to a state, if any.
    ///
    /// Models with a state-dependent volatility (local volatility) report
    /// σ(t, S)² here so that schemes can record it alongside the spot.
    fn instantaneous_variance(&self, _t: f64, _state: &State) -> Option<f64> {
        None
    }

    /// Whether [`instantaneous_variance`](Self::instantaneous_variance)
    /// returns a value for every state.
    fn has_instantaneous_variance(&self) -> bool {
        false
    }

    /// Human-readable model name.
    fn model_name(&self) -> &'static str;
}
