//! Contract terms shared by every option instrument.

use pricer_core::types::{PricingError, Result};

/// Strike and maturity of a European-style option.
///
/// # Examples
/// ```
/// use pricer_models::instruments::OptionContract;
///
/// let contract = OptionContract::new(100.0, 0.5).unwrap();
/// assert_eq!(contract.strike(), 100.0);
/// assert_eq!(contract.maturity(), 0.5);
///
/// assert!(OptionContract::new(-1.0, 0.5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptionContract {
    strike: f64,
    maturity: f64,
}

impl OptionContract {
    /// Create contract terms.
    ///
    /// # Arguments
    /// * `strike` - Strike K (must be non-negative)
    /// * `maturity` - Time to maturity in years (must be positive)
    pub fn new(strike: f64, maturity: f64) -> Result<Self> {
        if !strike.is_finite() || strike < 0.0 {
            return Err(PricingError::invalid(
                "OptionContract::new",
                format!("strike must be non-negative, got {}", strike),
            ));
        }
        if !maturity.is_finite() || maturity <= 0.0 {
            return Err(PricingError::invalid(
                "OptionContract::new",
                format!("maturity must be > 0, got {}", maturity),
            ));
        }
        Ok(Self { strike, maturity })
    }

    /// Strike price.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Time to maturity in years.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.maturity
    }
}
