//! Market inputs for a pricing run.

use pricer_core::types::{PricingError, Result};

/// Spot, continuously-compounded rate and optional initial variance.
///
/// # Examples
///
/// ```
/// use pricer_pricing::pricer::MarketState;
///
/// let market = MarketState::new(100.0, 0.03, Some(0.04)).unwrap();
/// assert_eq!(market.variance().unwrap(), 0.04);
///
/// assert!(MarketState::new(0.0, 0.03, None).is_err());
/// assert!(MarketState::new(100.0, 0.03, None).unwrap().variance().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MarketState {
    spot: f64,
    rate: f64,
    v0: Option<f64>,
}

impl MarketState {
    /// Validated market state.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` when `spot <= 0`, `v0 < 0` or any input is
    /// non-finite.
    pub fn new(spot: f64, rate: f64, v0: Option<f64>) -> Result<Self> {
        if !spot.is_finite() || spot <= 0.0 {
            return Err(PricingError::invalid(
                "MarketState::new",
                format!("spot must be finite and > 0, got {}", spot),
            ));
        }
        if !rate.is_finite() {
            return Err(PricingError::invalid(
                "MarketState::new",
                format!("rate must be finite, got {}", rate),
            ));
        }
        if let Some(v) = v0 {
            if !v.is_finite() || v < 0.0 {
                return Err(PricingError::invalid(
                    "MarketState::new",
                    format!("v0 must be finite and >= 0, got {}", v),
                ));
            }
        }
        Ok(Self { spot, rate, v0 })
    }

    /// Spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Risk-free rate used for discounting.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Initial variance, if any.
    #[inline]
    pub fn v0(&self) -> Option<f64> {
        self.v0
    }

    /// Initial variance.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` when the state carries no variance.
    pub fn variance(&self) -> Result<f64> {
        self.v0.ok_or_else(|| {
            PricingError::invalid("MarketState::variance", "no initial variance set")
        })
    }

    /// Copy with a different spot.
    pub fn with_spot(&self, spot: f64) -> Result<Self> {
        Self::new(spot, self.rate, self.v0)
    }

    /// Discount factor `exp(-r T)`.
    #[inline]
    pub fn discount_factor(&self, maturity: f64) -> f64 {
        (-self.rate * maturity).exp()
    }
}
