//! Error types for structured error handling.
//!
//! Every fallible operation in the workspace reports a [`PricingError`].
//! Model construction, scheme preconditions, engine configuration and
//! result consistency checks all surface as
//! [`PricingError::InvalidParameter`], tagged with the operation that
//! rejected the input.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, PricingError>;

/// Categorised simulation errors.
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::invalid("EulerScheme::step", "dt must be strictly positive");
/// assert_eq!(
///     format!("{}", err),
///     "EulerScheme::step: dt must be strictly positive"
/// );
/// assert!(err.is_invalid_parameter());
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// A parameter, precondition or shape check failed.
    #[error("{context}: {reason}")]
    InvalidParameter {
        /// Operation that rejected the input
        context: &'static str,
        /// Violated constraint
        reason: String,
    },

    /// The parallel execution backend could not be set up.
    #[error("Execution failure: {0}")]
    ExecutionFailure(String),
}

impl PricingError {
    /// Shorthand for [`PricingError::InvalidParameter`].
    pub fn invalid(context: &'static str, reason: impl Into<String>) -> Self {
        PricingError::InvalidParameter {
            context,
            reason: reason.into(),
        }
    }

    /// Whether this error reports an invalid parameter.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, PricingError::InvalidParameter { .. })
    }
}
