//! Pricing result type.

use std::fmt;

/// Price with first- and second-order spot sensitivities.
///
/// - `delta`: ∂V/∂S by central difference
/// - `gamma`: ∂²V/∂S² by central second difference
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::pricer::PricingResult;
///
/// let result = PricingResult { price: 10.45, delta: 0.64, gamma: 0.019 };
/// assert_eq!(result.to_string(), "price=10.450000 delta=0.640000 gamma=0.019000");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PricingResult {
    /// Discounted expected payoff.
    pub price: f64,
    /// Delta: ∂V/∂S.
    pub delta: f64,
    /// Gamma: ∂²V/∂S².
    pub gamma: f64,
}

impl fmt::Display for PricingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "price={:.6} delta={:.6} gamma={:.6}",
            self.price, self.delta, self.gamma
        )
    }
}
