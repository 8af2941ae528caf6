//! Monte Carlo engine configuration.
//!
//! This module provides [`EngineConfig`], the set of optional overrides
//! applied by [`MonteCarloEngine::configure`](super::MonteCarloEngine::configure),
//! together with its builder and the parallelism resolution rules.

use pricer_core::types::{PricingError, Result};

/// Request every hardware thread.
pub const ALL_CORES: i32 = -1;

/// Number of hardware threads available to the process (at least 1).
#[inline]
pub fn hardware_concurrency() -> usize {
    num_cpus::get().max(1)
}

/// Resolve a requested degree of parallelism into a worker count.
///
/// `-1` and any value above [`hardware_concurrency`] resolve to the hardware
/// concurrency; other positive values are used as given.
///
/// # Errors
///
/// `InvalidParameter` for `0` and for values below `-1`.
///
/// # Examples
///
/// ```
/// use pricer_pricing::mc::{hardware_concurrency, resolve_n_jobs};
///
/// assert_eq!(resolve_n_jobs(1).unwrap(), 1);
/// assert_eq!(resolve_n_jobs(-1).unwrap(), hardware_concurrency());
/// assert!(resolve_n_jobs(0).is_err());
/// assert!(resolve_n_jobs(-2).is_err());
/// ```
pub fn resolve_n_jobs(requested: i32) -> Result<usize> {
    let hardware = hardware_concurrency();
    match requested {
        ALL_CORES => Ok(hardware),
        n if n > 0 => Ok((n as usize).min(hardware)),
        n => Err(PricingError::invalid(
            "MonteCarloEngine::configure",
            format!("n_jobs must be -1 or > 0, got {}", n),
        )),
    }
}

/// Optional engine overrides.
///
/// Unset fields leave the corresponding engine setting untouched.
///
/// # Examples
///
/// ```
/// use pricer_pricing::mc::EngineConfig;
///
/// let config = EngineConfig::builder()
///     .seed(42)
///     .n_jobs(-1)
///     .return_variance(true)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.seed, Some(42));
/// assert!(EngineConfig::builder().n_jobs(0).build().is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct EngineConfig {
    /// Explicit seed; re-seeds the engine and marks it user-seeded
    pub seed: Option<u64>,
    /// Degree of parallelism: `-1` (all cores) or a positive thread count
    pub n_jobs: Option<i32>,
    /// Keep the variance buffer when the scheme produces one
    pub return_variance: Option<bool>,
}

impl EngineConfig {
    /// Creates a new builder for `EngineConfig`.
    #[inline]
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Check the overrides without applying them.
    pub fn validate(&self) -> Result<()> {
        if let Some(n_jobs) = self.n_jobs {
            resolve_n_jobs(n_jobs)?;
        }
        Ok(())
    }
}

/// Builder for [`EngineConfig`].
#[derive(Clone, Debug, Default)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    /// Sets an explicit seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Sets the degree of parallelism.
    #[inline]
    pub fn n_jobs(mut self, n_jobs: i32) -> Self {
        self.config.n_jobs = Some(n_jobs);
        self
    }

    /// Sets whether the variance buffer is retained.
    #[inline]
    pub fn return_variance(mut self, return_variance: bool) -> Self {
        self.config.return_variance = Some(return_variance);
        self
    }

    /// Builds and validates the configuration.
    pub fn build(self) -> Result<EngineConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
