//! Simulation state carried from one time step to the next.

/// Spot value plus optional instantaneous variance.
///
/// For short-rate models the `spot` slot carries the rate. `variance` is
/// present for stochastic-variance schemes and for models that expose an
/// instantaneous variance (local volatility); it always holds σ², never σ.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct State {
    /// Spot (or short rate)
    pub spot: f64,
    /// Instantaneous variance, when the scheme tracks one
    pub variance: Option<f64>,
}

impl State {
    /// State with a spot value and no variance.
    #[inline]
    pub fn spot(spot: f64) -> Self {
        Self {
            spot,
            variance: None,
        }
    }

    /// State with both spot and variance.
    #[inline]
    pub fn with_variance(spot: f64, variance: f64) -> Self {
        Self {
            spot,
            variance: Some(variance),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(State::spot(100.0).variance, None);
        let s = State::with_variance(100.0, 0.04);
        assert_eq!(s.spot, 100.0);
        assert_eq!(s.variance, Some(0.04));
    }
}
