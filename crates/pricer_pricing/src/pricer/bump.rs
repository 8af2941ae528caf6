//! Bump-and-revalue pricer.

use pricer_core::types::{PricingError, Result};
use pricer_models::instruments::Instrument;
use tracing::debug;

use super::{MarketState, PricingResult};
use crate::mc::MonteCarloEngine;
use crate::schemes::Scheme;

/// Default relative spot bump for [`Pricer::compute`].
pub const DEFAULT_RELATIVE_BUMP: f64 = 0.01;

/// Prices instruments by simulation and estimates spot Greeks by central
/// differences.
///
/// Every Greek leg runs on a clone of the engine rewound with
/// [`reset_rng`](MonteCarloEngine::reset_rng), so the bumped and unbumped
/// valuations share their random numbers.
#[derive(Clone, Debug)]
pub struct Pricer<S: Scheme> {
    market: MarketState,
    n_steps: usize,
    n_paths: usize,
    engine: MonteCarloEngine<S>,
}

impl<S: Scheme> Pricer<S> {
    /// Create a pricer.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` when `n_steps` or `n_paths` is zero.
    pub fn new(
        market: MarketState,
        n_steps: usize,
        n_paths: usize,
        engine: MonteCarloEngine<S>,
    ) -> Result<Self> {
        check_counts("Pricer::new", n_steps, n_paths)?;
        Ok(Self {
            market,
            n_steps,
            n_paths,
            engine,
        })
    }

    /// Market inputs.
    #[inline]
    pub fn market(&self) -> &MarketState {
        &self.market
    }

    /// Steps per path.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Paths per valuation.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// The underlying engine.
    #[inline]
    pub fn engine(&self) -> &MonteCarloEngine<S> {
        &self.engine
    }

    /// Mutable access to the engine, e.g. to re-configure it.
    #[inline]
    pub fn engine_mut(&mut self) -> &mut MonteCarloEngine<S> {
        &mut self.engine
    }

    /// Discounted mean payoff. Advances the engine generator.
    pub fn compute_price(&mut self, instrument: &Instrument) -> Result<f64> {
        value(&mut self.engine, &self.market, self.n_steps, self.n_paths, instrument)
    }

    /// Central-difference delta `(V(S+h) - V(S-h)) / 2h`.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` when `h <= 0` or `S - h <= 0`, plus engine errors.
    pub fn delta(&self, instrument: &Instrument, h: f64) -> Result<f64> {
        check_bump("Pricer::delta", h)?;
        let up = self.bumped_value(instrument, h)?;
        let down = self.bumped_value(instrument, -h)?;
        Ok((up - down) / (2.0 * h))
    }

    /// Central second difference `(V(S+h) - 2V(S) + V(S-h)) / h^2`.
    ///
    /// # Errors
    ///
    /// As for [`delta`](Self::delta).
    pub fn gamma(&self, instrument: &Instrument, h: f64) -> Result<f64> {
        check_bump("Pricer::gamma", h)?;
        let up = self.bumped_value(instrument, h)?;
        let mid = self.bumped_value(instrument, 0.0)?;
        let down = self.bumped_value(instrument, -h)?;
        Ok((up - 2.0 * mid + down) / (h * h))
    }

    /// Price, delta and gamma in one call.
    ///
    /// `h` defaults to 1% of spot.
    pub fn compute(&mut self, instrument: &Instrument, h: Option<f64>) -> Result<PricingResult> {
        let h = h.unwrap_or(DEFAULT_RELATIVE_BUMP * self.market.spot());
        check_bump("Pricer::compute", h)?;

        let result = PricingResult {
            price: self.compute_price(instrument)?,
            delta: self.delta(instrument, h)?,
            gamma: self.gamma(instrument, h)?,
        };
        debug!(
            price = result.price,
            delta = result.delta,
            gamma = result.gamma,
            h,
            "instrument priced"
        );
        Ok(result)
    }

    /// Price several instruments off one simulation.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` when the maturities differ.
    pub fn batch_price(&mut self, instruments: &[Instrument]) -> Result<Vec<f64>> {
        let Some(first) = instruments.first() else {
            return Ok(Vec::new());
        };
        let maturity = first.maturity();
        if let Some(other) = instruments.iter().find(|i| i.maturity() != maturity) {
            return Err(PricingError::invalid(
                "Pricer::batch_price",
                format!(
                    "all instruments must share one maturity, got {} and {}",
                    maturity,
                    other.maturity()
                ),
            ));
        }

        let result = self.engine.generate(
            self.market.spot(),
            self.n_steps,
            maturity,
            self.n_paths,
            self.market.v0(),
        )?;
        let df = self.market.discount_factor(maturity);
        Ok(instruments
            .iter()
            .map(|i| df * i.mean_payoff(result.paths(), result.row_len()))
            .collect())
    }

    /// Replace any of the step count, path count or market state.
    ///
    /// Nothing changes when validation fails.
    pub fn reconfigure(
        &mut self,
        n_steps: Option<usize>,
        n_paths: Option<usize>,
        market: Option<MarketState>,
    ) -> Result<()> {
        let n_steps = n_steps.unwrap_or(self.n_steps);
        let n_paths = n_paths.unwrap_or(self.n_paths);
        check_counts("Pricer::reconfigure", n_steps, n_paths)?;

        self.n_steps = n_steps;
        self.n_paths = n_paths;
        if let Some(market) = market {
            self.market = market;
        }
        Ok(())
    }

    fn bumped_value(&self, instrument: &Instrument, bump: f64) -> Result<f64> {
        let market = self.market.with_spot(self.market.spot() + bump)?;
        let mut engine = self.engine.clone();
        engine.reset_rng();
        value(&mut engine, &market, self.n_steps, self.n_paths, instrument)
    }
}

fn value<S: Scheme>(
    engine: &mut MonteCarloEngine<S>,
    market: &MarketState,
    n_steps: usize,
    n_paths: usize,
    instrument: &Instrument,
) -> Result<f64> {
    let maturity = instrument.maturity();
    let result = engine.generate(market.spot(), n_steps, maturity, n_paths, market.v0())?;
    Ok(market.discount_factor(maturity) * instrument.mean_payoff(result.paths(), result.row_len()))
}

fn check_counts(context: &'static str, n_steps: usize, n_paths: usize) -> Result<()> {
    if n_steps == 0 {
        return Err(PricingError::invalid(context, "n_steps must be > 0"));
    }
    if n_paths == 0 {
        return Err(PricingError::invalid(context, "n_paths must be > 0"));
    }
    Ok(())
}

fn check_bump(context: &'static str, h: f64) -> Result<()> {
    if h.is_finite() && h > 0.0 {
        Ok(())
    } else {
        Err(PricingError::invalid(
            context,
            format!("bump size h must be finite and > 0, got {}", h),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mc::EngineConfig;
    use crate::schemes::{EulerScheme, LogEulerScheme};
    use approx::assert_relative_eq;
    use pricer_models::instruments::{OptionContract, PayoffType};
    use pricer_models::models::BlackScholesModel;

    fn seeded<S: Scheme>(scheme: S) -> MonteCarloEngine<S> {
        let mut engine = MonteCarloEngine::new(scheme);
        engine
            .configure(&EngineConfig::builder().seed(2024).build().unwrap())
            .unwrap();
        engine
    }

    fn call(strike: f64, maturity: f64) -> Instrument {
        Instrument::new(OptionContract::new(strike, maturity).unwrap(), PayoffType::Call.into())
    }

    #[test]
    fn test_zero_vol_price_is_deterministic() {
        // Euler with sigma = 0: S_T = S0 (1 + r dt)^n
        let engine = seeded(EulerScheme::new(BlackScholesModel::new(0.05, 0.0).unwrap()));
        let market = MarketState::new(100.0, 0.05, None).unwrap();
        let mut pricer = Pricer::new(market, 4, 16, engine).unwrap();

        let terminal = 100.0 * (1.0 + 0.05 * 0.25_f64).powi(4);
        let expected = (-0.05_f64).exp() * (terminal - 90.0);
        assert_relative_eq!(pricer.compute_price(&call(90.0, 1.0)).unwrap(), expected, epsilon = 1e-10);
    }

    #[test]
    fn test_zero_vol_delta_of_deep_itm_call() {
        let engine = seeded(EulerScheme::new(BlackScholesModel::new(0.0, 0.0).unwrap()));
        let market = MarketState::new(100.0, 0.0, None).unwrap();
        let pricer = Pricer::new(market, 2, 8, engine).unwrap();

        assert_relative_eq!(pricer.delta(&call(50.0, 1.0), 1.0).unwrap(), 1.0, epsilon = 1e-10);
        assert_relative_eq!(pricer.gamma(&call(50.0, 1.0), 1.0).unwrap(), 0.0, epsilon = 1e-8);
    }

    #[test]
    fn test_greeks_do_not_advance_engine() {
        let engine = seeded(LogEulerScheme::new(BlackScholesModel::new(0.05, 0.2).unwrap()));
        let market = MarketState::new(100.0, 0.05, None).unwrap();
        let mut pricer = Pricer::new(market, 10, 200, engine).unwrap();
        let inst = call(100.0, 1.0);

        let mut reference = pricer.clone();
        pricer.delta(&inst, 1.0).unwrap();
        assert_eq!(
            pricer.compute_price(&inst).unwrap(),
            reference.compute_price(&inst).unwrap()
        );
    }

    #[test]
    fn test_invalid_bump() {
        let engine = seeded(LogEulerScheme::new(BlackScholesModel::new(0.05, 0.2).unwrap()));
        let market = MarketState::new(100.0, 0.05, None).unwrap();
        let mut pricer = Pricer::new(market, 10, 10, engine).unwrap();
        let inst = call(100.0, 1.0);

        assert!(pricer.delta(&inst, 0.0).unwrap_err().is_invalid_parameter());
        assert!(pricer.gamma(&inst, -1.0).is_err());
        assert!(pricer.compute(&inst, Some(f64::NAN)).is_err());
        // Down leg would leave a non-positive spot
        assert!(pricer.delta(&inst, 100.0).is_err());
    }

    #[test]
    fn test_batch_price_requires_common_maturity() {
        let engine = seeded(LogEulerScheme::new(BlackScholesModel::new(0.05, 0.2).unwrap()));
        let market = MarketState::new(100.0, 0.05, None).unwrap();
        let mut pricer = Pricer::new(market, 10, 100, engine).unwrap();

        assert!(pricer.batch_price(&[]).unwrap().is_empty());
        let err = pricer
            .batch_price(&[call(100.0, 1.0), call(100.0, 2.0)])
            .unwrap_err();
        assert!(err.to_string().contains("share one maturity"));

        let prices = pricer
            .batch_price(&[call(90.0, 1.0), call(110.0, 1.0)])
            .unwrap();
        assert!(prices[0] > prices[1]);
    }

    #[test]
    fn test_reconfigure_is_atomic() {
        let engine = seeded(LogEulerScheme::new(BlackScholesModel::new(0.05, 0.2).unwrap()));
        let market = MarketState::new(100.0, 0.05, None).unwrap();
        let mut pricer = Pricer::new(market, 10, 100, engine).unwrap();

        let other = MarketState::new(90.0, 0.01, None).unwrap();
        assert!(pricer.reconfigure(Some(20), Some(0), Some(other)).is_err());
        assert_eq!(pricer.n_steps(), 10);
        assert_eq!(pricer.market().spot(), 100.0);

        pricer.reconfigure(Some(20), None, Some(other)).unwrap();
        assert_eq!(pricer.n_steps(), 20);
        assert_eq!(pricer.n_paths(), 100);
        assert_eq!(pricer.market().spot(), 90.0);
    }

    #[test]
    fn test_new_rejects_zero_counts() {
        let engine = seeded(LogEulerScheme::new(BlackScholesModel::new(0.05, 0.2).unwrap()));
        let market = MarketState::new(100.0, 0.05, None).unwrap();
        assert!(Pricer::new(market, 0, 10, engine.clone()).is_err());
        assert!(Pricer::new(market, 10, 0, engine).is_err());
    }
}
