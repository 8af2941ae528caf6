//! Barrier payoffs monitored on every recorded point of a path.

use pricer_core::types::{PricingError, Result};

use super::PayoffType;

/// Side from which the barrier is approached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarrierDirection {
    /// Touched when the path reaches or exceeds the level
    Up,
    /// Touched when the path reaches or falls below the level
    Down,
}

/// Whether touching the barrier activates or cancels the payoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarrierKnock {
    /// Pays only if the barrier was touched
    In,
    /// Pays only if the barrier was never touched
    Out,
}

/// Knock-in / knock-out wrapper around a vanilla payoff.
///
/// Monitoring is discrete: only the recorded time points are checked,
/// including the initial one.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{BarrierDirection, BarrierKnock, BarrierPayoff, PayoffType};
///
/// let up_and_out = BarrierPayoff::new(
///     120.0,
///     BarrierDirection::Up,
///     BarrierKnock::Out,
///     PayoffType::Call,
/// )
/// .unwrap();
///
/// assert_eq!(up_and_out.evaluate_path(&[100.0, 110.0, 115.0], 100.0), 15.0);
/// assert_eq!(up_and_out.evaluate_path(&[100.0, 125.0, 115.0], 100.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarrierPayoff {
    level: f64,
    direction: BarrierDirection,
    knock: BarrierKnock,
    underlying: PayoffType,
}

impl BarrierPayoff {
    /// Create a barrier payoff.
    ///
    /// # Errors
    /// `InvalidParameter` if `level` is negative or not finite.
    pub fn new(
        level: f64,
        direction: BarrierDirection,
        knock: BarrierKnock,
        underlying: PayoffType,
    ) -> Result<Self> {
        if !level.is_finite() || level < 0.0 {
            return Err(PricingError::invalid(
                "BarrierPayoff::new",
                format!("barrier level must be non-negative, got {}", level),
            ));
        }
        Ok(Self {
            level,
            direction,
            knock,
            underlying,
        })
    }

    /// Barrier level.
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Monitoring direction.
    pub fn direction(&self) -> BarrierDirection {
        self.direction
    }

    /// Knock type.
    pub fn knock(&self) -> BarrierKnock {
        self.knock
    }

    /// Wrapped vanilla payoff.
    pub fn underlying(&self) -> PayoffType {
        self.underlying
    }

    /// Whether any recorded point touches the barrier.
    pub fn is_touched(&self, path: &[f64]) -> bool {
        match self.direction {
            BarrierDirection::Up => path.iter().any(|&s| s >= self.level),
            BarrierDirection::Down => path.iter().any(|&s| s <= self.level),
        }
    }

    /// Evaluate on a recorded path.
    pub fn evaluate_path(&self, path: &[f64], strike: f64) -> f64 {
        let Some(&terminal) = path.last() else {
            return 0.0;
        };
        let active = match self.knock {
            BarrierKnock::In => self.is_touched(path),
            BarrierKnock::Out => !self.is_touched(path),
        };
        if active {
            self.underlying.evaluate(terminal, strike)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn barrier(level: f64, direction: BarrierDirection, knock: BarrierKnock) -> BarrierPayoff {
        BarrierPayoff::new(level, direction, knock, PayoffType::Put).unwrap()
    }

    #[test]
    fn test_touch_is_inclusive() {
        let up = barrier(110.0, BarrierDirection::Up, BarrierKnock::In);
        assert!(up.is_touched(&[100.0, 110.0, 90.0]));
        assert!(!up.is_touched(&[100.0, 109.99, 90.0]));

        let down = barrier(90.0, BarrierDirection::Down, BarrierKnock::In);
        assert!(down.is_touched(&[100.0, 90.0, 95.0]));
        assert!(!down.is_touched(&[100.0, 90.01, 95.0]));
    }

    #[test]
    fn test_initial_point_is_monitored() {
        let down = barrier(100.0, BarrierDirection::Down, BarrierKnock::Out);
        assert_eq!(down.evaluate_path(&[100.0, 105.0, 95.0], 100.0), 0.0);
    }

    #[test]
    fn test_in_out_parity() {
        let path = [100.0, 85.0, 95.0];
        let knock_in = barrier(90.0, BarrierDirection::Down, BarrierKnock::In);
        let knock_out = barrier(90.0, BarrierDirection::Down, BarrierKnock::Out);
        let vanilla = PayoffType::Put.evaluate(95.0, 100.0);

        assert_eq!(
            knock_in.evaluate_path(&path, 100.0) + knock_out.evaluate_path(&path, 100.0),
            vanilla
        );
    }

    #[test]
    fn test_invalid_level() {
        assert!(BarrierPayoff::new(-1.0, BarrierDirection::Up, BarrierKnock::In, PayoffType::Call)
            .is_err());
        assert!(
            BarrierPayoff::new(f64::NAN, BarrierDirection::Up, BarrierKnock::In, PayoffType::Call)
                .is_err()
        );
    }

    #[test]
    fn test_accessors() {
        let b = barrier(120.0, BarrierDirection::Up, BarrierKnock::Out);
        assert_eq!(b.level(), 120.0);
        assert_eq!(b.direction(), BarrierDirection::Up);
        assert_eq!(b.knock(), BarrierKnock::Out);
        assert_eq!(b.underlying(), PayoffType::Put);
    }
}
