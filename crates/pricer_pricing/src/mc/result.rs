//! Immutable bundle of simulated paths.

use std::sync::Arc;

use pricer_core::types::{PricingError, Result};

use super::paths::buffer_len;

/// Output of [`MonteCarloEngine::generate`](super::MonteCarloEngine::generate).
///
/// Holds a flat row-major spot buffer of `n_paths × (n_steps + 1)` values
/// (`paths[path_idx * (n_steps + 1) + step]`) and, optionally, a variance
/// buffer of the same shape. Buffers sit behind `Arc`, so clones are cheap
/// and share storage.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use pricer_pricing::mc::SimulationResult;
///
/// let paths = vec![
///     100.0, 101.0, 102.0, 103.0,
///     100.0,  99.0,  98.0,  97.0,
///     100.0, 102.0, 105.0, 109.0,
/// ];
/// let result = SimulationResult::new(Arc::new(paths), None, 42, 3, 3).unwrap();
///
/// assert_eq!(result.n_paths(), 3);
/// assert_eq!(result.n_steps(), 3);
/// assert!((result.avg_terminal_value() - 103.0).abs() < 1e-12);
/// assert!(result.variances().is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationResult {
    paths: Arc<Vec<f64>>,
    variances: Option<Arc<Vec<f64>>>,
    origin_seed: u64,
    n_steps: usize,
    n_paths: usize,
}

impl SimulationResult {
    /// Wrap simulation buffers, checking their shape.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` when `n_paths` is zero, when
    /// `n_paths * (n_steps + 1)` overflows, or when a buffer length differs
    /// from it.
    pub fn new(
        paths: Arc<Vec<f64>>,
        variances: Option<Arc<Vec<f64>>>,
        origin_seed: u64,
        n_steps: usize,
        n_paths: usize,
    ) -> Result<Self> {
        if n_paths == 0 {
            return Err(PricingError::invalid(
                "SimulationResult::new",
                "n_paths must be > 0",
            ));
        }
        let expected = buffer_len("SimulationResult::new", n_paths, n_steps)?;
        if paths.len() != expected {
            return Err(PricingError::invalid(
                "SimulationResult::new",
                format!(
                    "path buffer has {} values, expected {} ({} paths x {} points)",
                    paths.len(),
                    expected,
                    n_paths,
                    n_steps + 1
                ),
            ));
        }
        if let Some(v) = &variances {
            if v.len() != expected {
                return Err(PricingError::invalid(
                    "SimulationResult::new",
                    format!(
                        "variance buffer has {} values, expected {}",
                        v.len(),
                        expected
                    ),
                ));
            }
        }
        Ok(Self {
            paths,
            variances,
            origin_seed,
            n_steps,
            n_paths,
        })
    }

    /// Flat row-major spot buffer.
    #[inline]
    pub fn paths(&self) -> &[f64] {
        &self.paths
    }

    /// Flat row-major variance buffer.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` when the simulation did not retain variance.
    pub fn variances(&self) -> Result<&[f64]> {
        self.variances.as_deref().map(Vec::as_slice).ok_or_else(|| {
            PricingError::invalid(
                "SimulationResult::variances",
                "variance was not generated for this simulation",
            )
        })
    }

    /// Whether a variance buffer is present.
    #[inline]
    pub fn has_variances(&self) -> bool {
        self.variances.is_some()
    }

    /// Spot row of path `idx`, or `None` when out of range.
    pub fn path(&self, idx: usize) -> Option<&[f64]> {
        let width = self.row_len();
        (idx < self.n_paths).then(|| &self.paths[idx * width..(idx + 1) * width])
    }

    /// Variance row of path `idx`.
    pub fn variance_path(&self, idx: usize) -> Option<&[f64]> {
        let width = self.row_len();
        let variances = self.variances.as_deref()?;
        (idx < self.n_paths).then(|| &variances[idx * width..(idx + 1) * width])
    }

    /// Iterator over the terminal spot of every path.
    pub fn terminal_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.paths.chunks_exact(self.row_len()).map(|row| row[row.len() - 1])
    }

    /// Mean terminal spot.
    pub fn avg_terminal_value(&self) -> f64 {
        self.terminal_values().sum::<f64>() / self.n_paths as f64
    }

    /// Number of paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Number of steps per path.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Points per path (`n_steps + 1`).
    #[inline]
    pub fn row_len(&self) -> usize {
        self.n_steps + 1
    }

    /// Seed of the engine that produced the bundle.
    #[inline]
    pub fn origin_seed(&self) -> u64 {
        self.origin_seed
    }
}
