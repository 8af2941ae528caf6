//! Local volatility surface σ_loc(t, S).

use crate::math::interpolators::BilinearInterpolator;
use crate::types::Result;

/// Local volatility surface on a (time, spot) grid.
///
/// Built from strictly increasing time and spot knots plus a time-major
/// volatility grid: `vols[t_idx * spots.len() + s_idx]`. Queries are
/// clamped to the knot rectangle, so [`sigma`](Self::sigma) is total and
/// can be called from inside a simulation step without error handling.
///
/// The surface is immutable once built and is typically shared between
/// models through `Arc`.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::surfaces::LocalVolatilitySurface;
///
/// let surface = LocalVolatilitySurface::new(
///     vec![0.2, 0.5, 0.8],
///     vec![90.0, 100.0, 110.0],
///     vec![0.20, 0.19, 0.21, 0.22, 0.20, 0.23, 0.25, 0.24, 0.26],
/// )
/// .unwrap();
///
/// // Halfway between the 100 and 110 knots on the first time slice
/// assert!((surface.sigma(0.2, 105.0) - 0.20).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(try_from = "SurfaceGrid")
)]
pub struct LocalVolatilitySurface {
    grid: BilinearInterpolator<f64>,
}

impl LocalVolatilitySurface {
    /// Build a surface from time knots, spot knots and a time-major grid.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` when either axis has fewer than two knots
    /// or is not strictly increasing, when `vols.len() != times.len() *
    /// spots.len()`, or when any input is not finite.
    pub fn new(times: Vec<f64>, spots: Vec<f64>, vols: Vec<f64>) -> Result<Self> {
        let grid = BilinearInterpolator::new(times, spots, vols)?;
        Ok(Self { grid })
    }

    /// Local volatility at time `t` and spot `s`.
    ///
    /// Out-of-range queries are held flat at the nearest edge of the grid.
    #[inline]
    pub fn sigma(&self, t: f64, s: f64) -> f64 {
        self.grid.interpolate(t, s)
    }

    /// Time knots.
    pub fn times(&self) -> &[f64] {
        self.grid.xs()
    }

    /// Spot knots.
    pub fn spots(&self) -> &[f64] {
        self.grid.ys()
    }

    /// Time-major volatility grid.
    pub fn vols(&self) -> &[f64] {
        self.grid.zs()
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct SurfaceGrid {
    times: Vec<f64>,
    spots: Vec<f64>,
    vols: Vec<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<SurfaceGrid> for LocalVolatilitySurface {
    type Error = crate::types::PricingError;

    fn try_from(raw: SurfaceGrid) -> Result<Self> {
        Self::new(raw.times, raw.spots, raw.vols)
    }
}
