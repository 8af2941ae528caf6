//! CLI error types.

use pricer_core::types::PricingError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by `volmc` commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or is inconsistent
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Invalid command-line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Failure inside the simulation libraries
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    /// Output could not be serialised
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
