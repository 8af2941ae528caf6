//! Simulation configuration management
//!
//! Handles loading configuration from TOML files, environment variables and
//! command-line arguments.
//!
//! ```toml
//! log_level = "info"
//!
//! [engine]
//! seed = 42
//! n_jobs = -1
//! return_variance = true
//!
//! [simulation]
//! spot = 100.0
//! v0 = 0.04
//! n_steps = 252
//! maturity = 1.0
//! n_paths = 10000
//!
//! [model]
//! kind = "heston"
//! mu = 0.0
//! kappa = 2.0
//! theta = 0.04
//! xi = 0.3
//! rho = -0.7
//!
//! [scheme]
//! kind = "qe"
//! psi_threshold = 1.5
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use pricer_core::market_data::surfaces::LocalVolatilitySurface;
use pricer_models::models::{
    BlackScholesModel, DiffusionModelEnum, HestonModel, LocalVolModel, VasicekModel,
};
use pricer_pricing::mc::EngineConfig;
use pricer_pricing::schemes::{
    EulerHestonScheme, EulerScheme, LogEulerScheme, QeScheme, SchemeEnum, DEFAULT_PSI_THRESHOLD,
};
use serde::Deserialize;
use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable error: {0}")]
    EnvError(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Scheme '{scheme}' cannot discretise model '{model}'")]
    IncompatibleScheme {
        model: &'static str,
        scheme: &'static str,
    },
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

/// Initial conditions and grid of a simulation run
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationParams {
    /// Initial spot (or short rate for Vasicek)
    pub spot: f64,
    /// Initial variance; required by the Heston schemes only
    pub v0: Option<f64>,
    /// Steps per path
    pub n_steps: usize,
    /// Horizon in years
    pub maturity: f64,
    /// Number of paths
    pub n_paths: usize,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            spot: 100.0,
            v0: None,
            n_steps: 252,
            maturity: 1.0,
            n_paths: 10_000,
        }
    }
}

/// Model section, tagged by `kind`
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelSpec {
    BlackScholes {
        mu: f64,
        sigma: f64,
    },
    Heston {
        mu: f64,
        kappa: f64,
        theta: f64,
        xi: f64,
        rho: f64,
    },
    LocalVol {
        rate: f64,
        #[serde(default)]
        dividend: f64,
        surface: LocalVolatilitySurface,
    },
    Vasicek {
        a: f64,
        b: f64,
        sigma: f64,
    },
}

impl Default for ModelSpec {
    fn default() -> Self {
        ModelSpec::BlackScholes {
            mu: 0.05,
            sigma: 0.2,
        }
    }
}

impl ModelSpec {
    /// Configuration name of the model
    pub fn kind(&self) -> &'static str {
        match self {
            ModelSpec::BlackScholes { .. } => "black_scholes",
            ModelSpec::Heston { .. } => "heston",
            ModelSpec::LocalVol { .. } => "local_vol",
            ModelSpec::Vasicek { .. } => "vasicek",
        }
    }

    fn needs_variance(&self) -> bool {
        matches!(self, ModelSpec::Heston { .. })
    }
}

fn default_psi_threshold() -> f64 {
    DEFAULT_PSI_THRESHOLD
}

/// Scheme section, tagged by `kind`
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchemeSpec {
    Euler,
    #[default]
    LogEuler,
    EulerHeston,
    Qe {
        #[serde(default = "default_psi_threshold")]
        psi_threshold: f64,
    },
}

impl SchemeSpec {
    /// Configuration name of the scheme
    pub fn kind(&self) -> &'static str {
        match self {
            SchemeSpec::Euler => "euler",
            SchemeSpec::LogEuler => "log_euler",
            SchemeSpec::EulerHeston => "euler_heston",
            SchemeSpec::Qe { .. } => "qe",
        }
    }
}

/// Full configuration of a `volmc` run
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Engine overrides (seed, parallelism, variance retention)
    pub engine: EngineConfig,
    /// Initial conditions and grid
    pub simulation: SimulationParams,
    /// Model parameters
    pub model: ModelSpec,
    /// Discretisation scheme
    pub scheme: SchemeSpec,
}

impl SimulationConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Override fields from `PRICER_*` environment variables
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Override fields from a variable lookup
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("PRICER_LOG_LEVEL") {
            self.log_level = LogLevel::from_str(&level)?;
        }
        if let Some(seed) = lookup("PRICER_SEED") {
            self.engine.seed = Some(parse_env("PRICER_SEED", &seed)?);
        }
        if let Some(n_jobs) = lookup("PRICER_N_JOBS") {
            self.engine.n_jobs = Some(parse_env("PRICER_N_JOBS", &n_jobs)?);
        }
        if let Some(n_paths) = lookup("PRICER_N_PATHS") {
            self.simulation.n_paths = parse_env("PRICER_N_PATHS", &n_paths)?;
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(level) = &cli.log_level {
            self.log_level = LogLevel::from_str(level)?;
        }
        if let Some(seed) = cli.seed {
            self.engine.seed = Some(seed);
        }
        if let Some(n_jobs) = cli.n_jobs {
            self.engine.n_jobs = Some(n_jobs);
        }
        if let Some(n_paths) = cli.n_paths {
            self.simulation.n_paths = n_paths;
        }
        if let Some(n_steps) = cli.n_steps {
            self.simulation.n_steps = n_steps;
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine
            .validate()
            .map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

        let sim = &self.simulation;
        if sim.n_steps == 0 {
            return Err(ConfigError::InvalidValue("simulation.n_steps must be > 0".into()));
        }
        if sim.n_paths == 0 {
            return Err(ConfigError::InvalidValue("simulation.n_paths must be > 0".into()));
        }
        if !sim.maturity.is_finite() || sim.maturity <= 0.0 {
            return Err(ConfigError::InvalidValue(format!(
                "simulation.maturity must be > 0, got {}",
                sim.maturity
            )));
        }
        if !sim.spot.is_finite() {
            return Err(ConfigError::InvalidValue(format!(
                "simulation.spot must be finite, got {}",
                sim.spot
            )));
        }

        self.check_compatibility()?;

        match (self.model.needs_variance(), sim.v0) {
            (true, None) => Err(ConfigError::InvalidValue(
                "simulation.v0 is required by the heston model".into(),
            )),
            (false, Some(_)) => Err(ConfigError::InvalidValue(format!(
                "simulation.v0 is only accepted by the heston model, not '{}'",
                self.model.kind()
            ))),
            _ => Ok(()),
        }
    }

    fn check_compatibility(&self) -> Result<(), ConfigError> {
        let compatible = matches!(
            (&self.model, &self.scheme),
            (ModelSpec::BlackScholes { .. }, SchemeSpec::Euler | SchemeSpec::LogEuler)
                | (ModelSpec::LocalVol { .. }, SchemeSpec::Euler)
                | (ModelSpec::Vasicek { .. }, SchemeSpec::Euler)
                | (ModelSpec::Heston { .. }, SchemeSpec::EulerHeston | SchemeSpec::Qe { .. })
        );
        if compatible {
            Ok(())
        } else {
            Err(ConfigError::IncompatibleScheme {
                model: self.model.kind(),
                scheme: self.scheme.kind(),
            })
        }
    }

    /// Build the configured model and scheme
    pub fn build_scheme(&self) -> crate::Result<SchemeEnum> {
        self.check_compatibility()?;

        let scheme: SchemeEnum = match (&self.model, self.scheme) {
            (ModelSpec::BlackScholes { mu, sigma }, SchemeSpec::LogEuler) => {
                LogEulerScheme::new(BlackScholesModel::new(*mu, *sigma)?).into()
            }
            (ModelSpec::BlackScholes { mu, sigma }, _) => {
                let model = DiffusionModelEnum::from(BlackScholesModel::new(*mu, *sigma)?);
                EulerScheme::new(model).into()
            }
            (
                ModelSpec::LocalVol {
                    rate,
                    dividend,
                    surface,
                },
                _,
            ) => {
                let model = LocalVolModel::new(*rate, *dividend, Arc::new(surface.clone()))?;
                EulerScheme::new(DiffusionModelEnum::from(model)).into()
            }
            (ModelSpec::Vasicek { a, b, sigma }, _) => {
                let model = VasicekModel::new(*a, *b, *sigma)?;
                EulerScheme::new(DiffusionModelEnum::from(model)).into()
            }
            (
                ModelSpec::Heston {
                    mu,
                    kappa,
                    theta,
                    xi,
                    rho,
                },
                scheme,
            ) => {
                let model = HestonModel::new(*mu, *kappa, *theta, *xi, *rho)?;
                match scheme {
                    SchemeSpec::Qe { psi_threshold } => {
                        QeScheme::with_psi_threshold(model, psi_threshold)?.into()
                    }
                    _ => EulerHestonScheme::new(model).into(),
                }
            }
        };
        Ok(scheme)
    }
}

fn parse_env<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::EnvError(format!("{}={} could not be parsed", key, value)))
}

/// CLI arguments that override the configuration
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<String>,
    /// Seed override
    pub seed: Option<u64>,
    /// Parallelism override
    pub n_jobs: Option<i32>,
    /// Path count override
    pub n_paths: Option<usize>,
    /// Step count override
    pub n_steps: Option<usize>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<SimulationConfig, ConfigError> {
    let mut config = match &cli.config_file {
        Some(path) => SimulationConfig::from_file(path)?,
        None => SimulationConfig::default(),
    };
    config.apply_env()?;
    config.merge_with_cli(cli)?;
    config.validate()?;
    Ok(config)
}
