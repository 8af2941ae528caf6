//! Payoff type definitions.

use std::fmt;
use std::str::FromStr;

use pricer_core::types::PricingError;

use super::BarrierPayoff;

/// Vanilla payoff on the terminal value of a path.
///
/// # Variants
/// - `Call`: max(S - K, 0)
/// - `Put`: max(K - S, 0)
/// - `DigitalCall`: 1 if S > K else 0
/// - `DigitalPut`: 1 if S < K else 0
///
/// # Examples
/// ```
/// use pricer_models::instruments::PayoffType;
///
/// assert_eq!(PayoffType::Call.evaluate(110.0, 100.0), 10.0);
/// assert_eq!(PayoffType::DigitalPut.evaluate(110.0, 100.0), 0.0);
/// assert_eq!("digital-call".parse::<PayoffType>().unwrap(), PayoffType::DigitalCall);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum PayoffType {
    /// Call option: max(S - K, 0)
    Call,
    /// Put option: max(K - S, 0)
    Put,
    /// Digital call: 1 if S > K else 0
    DigitalCall,
    /// Digital put: 1 if S < K else 0
    DigitalPut,
}

impl PayoffType {
    /// Evaluate the payoff for a terminal spot and strike.
    #[inline]
    pub fn evaluate(&self, spot: f64, strike: f64) -> f64 {
        match self {
            PayoffType::Call => (spot - strike).max(0.0),
            PayoffType::Put => (strike - spot).max(0.0),
            PayoffType::DigitalCall => {
                if spot > strike {
                    1.0
                } else {
                    0.0
                }
            }
            PayoffType::DigitalPut => {
                if spot < strike {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    /// Returns whether this payoff is a call-type (Call or DigitalCall).
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, PayoffType::Call | PayoffType::DigitalCall)
    }

    /// Canonical lower-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PayoffType::Call => "call",
            PayoffType::Put => "put",
            PayoffType::DigitalCall => "digital-call",
            PayoffType::DigitalPut => "digital-put",
        }
    }
}

impl FromStr for PayoffType {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "call" => Ok(PayoffType::Call),
            "put" => Ok(PayoffType::Put),
            "digital-call" => Ok(PayoffType::DigitalCall),
            "digital-put" => Ok(PayoffType::DigitalPut),
            other => Err(PricingError::invalid(
                "PayoffType::from_str",
                format!(
                    "unknown payoff '{}'; expected call, put, digital-call or digital-put",
                    other
                ),
            )),
        }
    }
}

impl fmt::Display for PayoffType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payoff evaluated over a whole path.
#[derive(Debug, Clone, PartialEq)]
pub enum Payoff {
    /// Terminal-value payoff
    Vanilla(PayoffType),
    /// Path-monitored barrier wrapper
    Barrier(BarrierPayoff),
}

impl Payoff {
    /// Evaluate on a recorded path (initial point first, terminal point last).
    ///
    /// An empty path pays nothing.
    pub fn evaluate_path(&self, path: &[f64], strike: f64) -> f64 {
        match self {
            Payoff::Vanilla(kind) => match path.last() {
                Some(&terminal) => kind.evaluate(terminal, strike),
                None => 0.0,
            },
            Payoff::Barrier(barrier) => barrier.evaluate_path(path, strike),
        }
    }
}

impl From<PayoffType> for Payoff {
    fn from(kind: PayoffType) -> Self {
        Payoff::Vanilla(kind)
    }
}

impl From<BarrierPayoff> for Payoff {
    fn from(barrier: BarrierPayoff) -> Self {
        Payoff::Barrier(barrier)
    }
}
