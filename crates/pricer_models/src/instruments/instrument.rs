//! Contract terms paired with a payoff.

use super::{OptionContract, Payoff};

/// A priceable option: contract terms and a payoff rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Instrument {
    contract: OptionContract,
    payoff: Payoff,
}

impl Instrument {
    /// Pair contract terms with a payoff.
    pub fn new(contract: OptionContract, payoff: Payoff) -> Self {
        Self { contract, payoff }
    }

    /// Contract terms.
    #[inline]
    pub fn contract(&self) -> &OptionContract {
        &self.contract
    }

    /// Payoff rule.
    #[inline]
    pub fn payoff(&self) -> &Payoff {
        &self.payoff
    }

    /// Time to maturity in years.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.contract.maturity()
    }

    /// Undiscounted payoff on one recorded path.
    #[inline]
    pub fn payoff_on_path(&self, path: &[f64]) -> f64 {
        self.payoff.evaluate_path(path, self.contract.strike())
    }

    /// Mean undiscounted payoff over consecutive rows of a flat path buffer.
    ///
    /// `paths` is row-major with `row_len` points per path. Returns 0 for an
    /// empty buffer.
    pub fn mean_payoff(&self, paths: &[f64], row_len: usize) -> f64 {
        if row_len == 0 || paths.is_empty() {
            return 0.0;
        }
        let n_paths = paths.len() / row_len;
        let total: f64 = paths
            .chunks_exact(row_len)
            .map(|row| self.payoff_on_path(row))
            .sum();
        total / n_paths as f64
    }
}
