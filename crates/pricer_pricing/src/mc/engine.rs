//! Monte Carlo path-generation orchestrator.
//!
//! # Seeding
//!
//! [`MonteCarloEngine::generate`] seeds in two phases:
//!
//! 1. `n_paths` sub-seeds are drawn serially from the engine generator.
//! 2. Each path then runs with its own [`PricerRng`] seeded from its
//!    sub-seed, on any worker thread.
//!
//! Path `i` therefore depends only on the engine seed and `i`, which makes
//! the output bit-identical for every degree of parallelism.
//!
//! # Errors from workers
//!
//! Workers never abort each other. The first error recorded in a
//! mutex-guarded slot is returned once every path has finished.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use pricer_core::types::{PricingError, Result};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, trace};

use super::config::{resolve_n_jobs, EngineConfig};
use super::paths::{buffer_len, check_steps, fill_path, SimulatedPath};
use super::result::SimulationResult;
use crate::rng::PricerRng;
use crate::schemes::Scheme;

/// Path-generation engine over a discretisation scheme.
///
/// # Examples
///
/// ```
/// use pricer_models::models::HestonModel;
/// use pricer_pricing::mc::{EngineConfig, MonteCarloEngine};
/// use pricer_pricing::schemes::QeScheme;
///
/// let model = HestonModel::new(0.0, 2.0, 0.04, 0.3, -0.7).unwrap();
/// let mut engine = MonteCarloEngine::new(QeScheme::new(model));
///
/// let config = EngineConfig::builder()
///     .seed(7)
///     .return_variance(true)
///     .build()
///     .unwrap();
/// engine.configure(&config).unwrap();
///
/// let result = engine.generate(100.0, 50, 0.5, 200, Some(0.04)).unwrap();
/// assert_eq!(result.n_paths(), 200);
/// assert!(result.variances().unwrap().iter().all(|&v| v >= 0.0));
/// ```
pub struct MonteCarloEngine<S: Scheme> {
    scheme: Arc<S>,
    seed: u64,
    user_seeded: bool,
    rng: PricerRng,
    n_jobs: usize,
    return_variance: bool,
    pool: Option<Arc<ThreadPool>>,
}

/// Row slices and sub-seed for one path.
struct PathTask<'a> {
    spots: &'a mut [f64],
    variances: Option<&'a mut [f64]>,
    seed: u64,
}

impl<S: Scheme> MonteCarloEngine<S> {
    /// Engine with an entropy-drawn seed, serial execution and variance
    /// retention off.
    pub fn new(scheme: S) -> Self {
        Self::from_arc(Arc::new(scheme))
    }

    /// Engine over a shared scheme.
    pub fn from_arc(scheme: Arc<S>) -> Self {
        let seed = PricerRng::entropy_seed();
        Self {
            scheme,
            seed,
            user_seeded: false,
            rng: PricerRng::from_seed(seed),
            n_jobs: 1,
            return_variance: false,
            pool: None,
        }
    }

    /// Apply configuration overrides.
    ///
    /// Everything is validated before any setting changes; on error the
    /// engine is left exactly as it was.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` when `n_jobs` is `0` or below `-1`
    /// - `ExecutionFailure` when the worker pool cannot be started
    pub fn configure(&mut self, config: &EngineConfig) -> Result<()> {
        let (n_jobs, pool) = match config.n_jobs {
            Some(requested) => {
                let n_jobs = resolve_n_jobs(requested)?;
                let pool = if n_jobs == self.n_jobs {
                    self.pool.clone()
                } else {
                    build_pool(n_jobs)?
                };
                (n_jobs, pool)
            }
            None => (self.n_jobs, self.pool.clone()),
        };

        self.n_jobs = n_jobs;
        self.pool = pool;
        if let Some(seed) = config.seed {
            self.seed = seed;
            self.user_seeded = true;
            self.rng = PricerRng::from_seed(seed);
        }
        if let Some(return_variance) = config.return_variance {
            self.return_variance = return_variance;
        }

        debug!(
            n_jobs = self.n_jobs,
            user_seeded = self.user_seeded,
            return_variance = self.return_variance,
            "engine configured"
        );
        Ok(())
    }

    /// Rewind the generator to the state right after the last seeding.
    pub fn reset_rng(&mut self) {
        self.rng.reset();
    }

    /// Draw a fresh entropy seed and clear the user-seeded flag.
    pub fn reset_seed(&mut self) {
        self.seed = PricerRng::entropy_seed();
        self.user_seeded = false;
        self.rng = PricerRng::from_seed(self.seed);
        debug!("engine re-seeded from entropy");
    }

    /// Current seed.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Whether the seed was set explicitly through [`configure`](Self::configure).
    #[inline]
    pub fn is_user_seeded(&self) -> bool {
        self.user_seeded
    }

    /// Resolved number of worker threads.
    #[inline]
    pub fn n_jobs(&self) -> usize {
        self.n_jobs
    }

    /// Whether `generate` keeps the variance buffer.
    #[inline]
    pub fn return_variance(&self) -> bool {
        self.return_variance
    }

    /// The discretisation scheme.
    #[inline]
    pub fn scheme(&self) -> &Arc<S> {
        &self.scheme
    }

    /// Simulate a single path with a caller-owned generator.
    ///
    /// The engine generator is not touched.
    pub fn simulate_path(
        &self,
        s0: f64,
        n_steps: usize,
        maturity: f64,
        rng: &mut PricerRng,
        v0: Option<f64>,
    ) -> Result<SimulatedPath> {
        super::paths::simulate_path(self.scheme.as_ref(), s0, n_steps, maturity, rng, v0)
    }

    /// Simulate `n_paths` paths of `n_steps` steps over `[0, maturity]`.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` when `n_steps` or `n_paths` is zero, or the
    ///   path buffer would not fit in memory
    /// - the first error raised by any path (scheme preconditions, `dt`)
    pub fn generate(
        &mut self,
        s0: f64,
        n_steps: usize,
        maturity: f64,
        n_paths: usize,
        v0: Option<f64>,
    ) -> Result<SimulationResult> {
        check_steps("MonteCarloEngine::generate", n_steps)?;
        if n_paths == 0 {
            return Err(PricingError::invalid(
                "MonteCarloEngine::generate",
                "n_paths must be > 0",
            ));
        }

        let len = buffer_len("MonteCarloEngine::generate", n_paths, n_steps)?;

        let scheme = self.scheme.as_ref();
        let row_len = n_steps + 1;
        let dt = maturity / n_steps as f64;
        let keep_variance = self.return_variance && scheme.produces_variance();

        debug!(
            n_paths,
            n_steps,
            n_jobs = self.n_jobs,
            scheme = scheme.name(),
            keep_variance,
            "generating paths"
        );

        let seeds: Vec<u64> = (0..n_paths).map(|_| self.rng.next_seed()).collect();

        let mut spots = vec![0.0; len];
        let mut variances = keep_variance.then(|| vec![0.0; len]);

        let mut tasks: Vec<PathTask<'_>> = spots
            .chunks_mut(row_len)
            .zip(seeds)
            .map(|(spots, seed)| PathTask {
                spots,
                variances: None,
                seed,
            })
            .collect();
        if let Some(buffer) = variances.as_mut() {
            for (task, row) in tasks.iter_mut().zip(buffer.chunks_mut(row_len)) {
                task.variances = Some(row);
            }
        }

        let first_error: Mutex<Option<PricingError>> = Mutex::new(None);
        let run = |task: PathTask<'_>| {
            let mut rng = PricerRng::from_seed(task.seed);
            if let Err(err) = fill_path(scheme, s0, v0, dt, &mut rng, task.spots, task.variances)
            {
                trace!(error = %err, "path simulation failed");
                let mut slot = first_error.lock().unwrap_or_else(PoisonError::into_inner);
                slot.get_or_insert(err);
            }
        };

        match &self.pool {
            Some(pool) => pool.install(|| tasks.into_par_iter().for_each(run)),
            None => tasks.into_iter().for_each(run),
        }

        if let Some(err) = first_error
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
        {
            return Err(err);
        }

        SimulationResult::new(
            Arc::new(spots),
            variances.map(Arc::new),
            self.seed,
            n_steps,
            n_paths,
        )
    }
}

fn build_pool(n_jobs: usize) -> Result<Option<Arc<ThreadPool>>> {
    if n_jobs <= 1 {
        return Ok(None);
    }
    ThreadPoolBuilder::new()
        .num_threads(n_jobs)
        .thread_name(|i| format!("volmc-worker-{}", i))
        .build()
        .map(|pool| Some(Arc::new(pool)))
        .map_err(|e| PricingError::ExecutionFailure(format!("failed to start worker pool: {}", e)))
}

impl<S: Scheme> Clone for MonteCarloEngine<S> {
    fn clone(&self) -> Self {
        Self {
            scheme: Arc::clone(&self.scheme),
            seed: self.seed,
            user_seeded: self.user_seeded,
            rng: self.rng.clone(),
            n_jobs: self.n_jobs,
            return_variance: self.return_variance,
            pool: self.pool.clone(),
        }
    }
}

impl<S: Scheme> fmt::Debug for MonteCarloEngine<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MonteCarloEngine")
            .field("scheme", &self.scheme.name())
            .field("seed", &self.seed)
            .field("user_seeded", &self.user_seeded)
            .field("n_jobs", &self.n_jobs)
            .field("return_variance", &self.return_variance)
            .finish()
    }
}
