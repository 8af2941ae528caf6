//! Andersen's Quadratic-Exponential (QE) scheme for the Heston model.
//!
//! The next variance is sampled from a distribution matched to the first
//! two conditional moments of the CIR process:
//!
//! ```text
//! m   = theta + (V - theta) * e^{-kappa dt}
//! s2  = V xi^2 e^{-kappa dt} (1 - e^{-kappa dt}) / kappa
//!     + theta xi^2 (1 - e^{-kappa dt})^2 / (2 kappa)
//! psi = s2 / m^2
//! ```
//!
//! - `psi <= psi_c` (quadratic): `b^2 = 2/psi - 1 + sqrt(2/psi (2/psi - 1))`,
//!   `a = m / (1 + b^2)`, `V' = a (Z_v + b)^2`
//! - `psi > psi_c` (exponential): `p = (psi - 1)/(psi + 1)`, `beta = (1 - p)/m`,
//!   `V' = 0` if `U <= p`, else `ln((1 - p)/(1 - U)) / beta`
//!
//! The log-spot then moves with the trapezoidal variance
//! `V_int = (V + V') / 2`:
//!
//! ```text
//! log S' = log S + mu dt - 0.5 V_int dt
//!        + (rho / xi) (V' - V - kappa (theta - V_int) dt)
//!        + sqrt((1 - rho^2) V_int dt) * Z
//! ```
//!
//! Each step consumes exactly two draws: the variance shock (`Z_v` or `U`)
//! first, then `Z` for the spot.
//!
//! # Reference
//!
//! Andersen, L. (2008). "Simple and efficient simulation of the Heston
//! stochastic volatility model". Journal of Computational Finance 11(3).

use pricer_core::types::{PricingError, Result};
use pricer_models::models::{HestonModel, State};

use super::{check_dt, check_spot, require_v0, state_variance, Scheme};
use crate::rng::PricerRng;

/// Default switching threshold between the quadratic and exponential branches.
pub const DEFAULT_PSI_THRESHOLD: f64 = 1.5;

const PSI_MIN: f64 = 1.0;
const PSI_MAX: f64 = 2.0;

/// QE discretisation of [`HestonModel`].
///
/// # Examples
///
/// ```
/// use pricer_models::models::HestonModel;
/// use pricer_pricing::schemes::QeScheme;
///
/// let model = HestonModel::new(0.0, 2.0, 0.04, 0.3, -0.7).unwrap();
/// let mut scheme = QeScheme::new(model);
/// assert_eq!(scheme.psi_threshold(), 1.5);
///
/// // Out-of-range updates fail and keep the previous value
/// assert!(scheme.set_psi_threshold(2.5).is_err());
/// assert_eq!(scheme.psi_threshold(), 1.5);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct QeScheme {
    model: HestonModel,
    psi_threshold: f64,
}

impl QeScheme {
    /// QE scheme with the default threshold of 1.5.
    pub fn new(model: HestonModel) -> Self {
        Self {
            model,
            psi_threshold: DEFAULT_PSI_THRESHOLD,
        }
    }

    /// QE scheme with an explicit threshold in `[1, 2]`.
    pub fn with_psi_threshold(model: HestonModel, psi_threshold: f64) -> Result<Self> {
        validate_psi("QeScheme::with_psi_threshold", psi_threshold)?;
        Ok(Self {
            model,
            psi_threshold,
        })
    }

    /// The discretised model.
    pub fn model(&self) -> &HestonModel {
        &self.model
    }

    /// Current switching threshold.
    pub fn psi_threshold(&self) -> f64 {
        self.psi_threshold
    }

    /// Update the switching threshold; on error the previous value is kept.
    pub fn set_psi_threshold(&mut self, psi_threshold: f64) -> Result<()> {
        validate_psi("QeScheme::set_psi_threshold", psi_threshold)?;
        self.psi_threshold = psi_threshold;
        Ok(())
    }

    /// Sample V(t+dt) given V(t); consumes one draw.
    ///
    /// When `dt` is so small that the conditional variance rounds to zero,
    /// the draw is discarded and the conditional mean is returned.
    fn next_variance(&self, v: f64, dt: f64, rng: &mut PricerRng) -> f64 {
        let (m, s2) = self.model.variance_moments(v, dt);
        let psi = s2 / (m * m);
        let two_over_psi = 2.0 / psi;

        if !(psi > 0.0 && psi.is_finite() && two_over_psi.is_finite()) {
            rng.gen_normal();
            return m.max(0.0);
        }

        if psi <= self.psi_threshold {
            let b2 = two_over_psi - 1.0 + (two_over_psi * (two_over_psi - 1.0)).sqrt();
            let a = m / (1.0 + b2);
            let z_v = rng.gen_normal();
            let root = z_v + b2.sqrt();
            a * root * root
        } else {
            let p = (psi - 1.0) / (psi + 1.0);
            let beta = (1.0 - p) / m;
            let u = rng.gen_uniform();
            if u <= p {
                0.0
            } else {
                ((1.0 - p) / (1.0 - u)).ln() / beta
            }
        }
    }
}

fn validate_psi(context: &'static str, psi: f64) -> Result<()> {
    if (PSI_MIN..=PSI_MAX).contains(&psi) {
        Ok(())
    } else {
        Err(PricingError::invalid(
            context,
            format!("psi_threshold must lie in [1, 2], got {}", psi),
        ))
    }
}

impl Scheme for QeScheme {
    fn init_state(&self, s0: f64, v0: Option<f64>) -> Result<State> {
        check_spot("QeScheme::init_state", s0, true)?;
        let v0 = require_v0("QeScheme::init_state", v0)?;
        Ok(State::with_variance(s0, v0))
    }

    fn step(
        &self,
        state: &State,
        _step_index: usize,
        dt: f64,
        rng: &mut PricerRng,
    ) -> Result<State> {
        check_dt("QeScheme::step", dt)?;
        let v = state_variance("QeScheme::step", state)?.max(0.0);

        let m = &self.model;
        let v_next = self.next_variance(v, dt, rng);
        let z = rng.gen_normal();

        let v_int = 0.5 * (v + v_next);
        let rho = m.rho();
        let log_increment = m.mu() * dt - 0.5 * v_int * dt
            + (rho / m.xi()) * (v_next - v - m.kappa() * (m.theta() - v_int) * dt)
            + ((1.0 - rho * rho) * v_int * dt).sqrt() * z;

        Ok(State::with_variance(state.spot * log_increment.exp(), v_next))
    }

    fn produces_variance(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "QE"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn model() -> HestonModel {
        HestonModel::new(0.02, 2.0, 0.05, 0.4, -0.5).unwrap()
    }

    #[test]
    fn test_psi_threshold_bounds() {
        assert!(QeScheme::with_psi_threshold(model(), 1.0).is_ok());
        assert!(QeScheme::with_psi_threshold(model(), 2.0).is_ok());
        assert!(QeScheme::with_psi_threshold(model(), 0.99).is_err());
        assert!(QeScheme::with_psi_threshold(model(), 2.01).is_err());
        assert!(QeScheme::with_psi_threshold(model(), f64::NAN).is_err());
    }

    #[test]
    fn test_set_psi_threshold_keeps_value_on_error() {
        let mut scheme = QeScheme::with_psi_threshold(model(), 1.2).unwrap();
        let err = scheme.set_psi_threshold(0.5).unwrap_err();
        assert!(err.to_string().contains("psi_threshold must lie in [1, 2]"));
        assert_eq!(scheme.psi_threshold(), 1.2);

        scheme.set_psi_threshold(1.8).unwrap();
        assert_eq!(scheme.psi_threshold(), 1.8);
    }

    #[test]
    fn test_quadratic_branch_matches_formula() {
        let scheme = QeScheme::new(model());
        let (v, dt) = (0.04, 0.01);

        // Small dt keeps psi well below 1.5
        let (m, s2) = model().variance_moments(v, dt);
        let psi = s2 / (m * m);
        assert!(psi < 1.5);

        let mut rng = PricerRng::from_seed(12);
        let mut replay = PricerRng::from_seed(12);
        let z_v = replay.gen_normal();

        let b2 = 2.0 / psi - 1.0 + (2.0 / psi * (2.0 / psi - 1.0)).sqrt();
        let expected = m / (1.0 + b2) * (z_v + b2.sqrt()).powi(2);
        assert_relative_eq!(scheme.next_variance(v, dt, &mut rng), expected, epsilon = 1e-15);
    }

    #[test]
    fn test_exponential_branch_from_zero_variance() {
        // From V = 0, psi = xi^2 / (2 kappa theta) = 25 here
        let heavy = HestonModel::new(0.0, 0.5, 0.04, 1.0, -0.9).unwrap();
        let scheme = QeScheme::new(heavy);
        let dt = 0.01;
        let (m, s2) = heavy.variance_moments(0.0, dt);
        let psi = s2 / (m * m);
        assert!(psi > 2.0);

        let p = (psi - 1.0) / (psi + 1.0);
        let beta = (1.0 - p) / m;
        let mut rng = PricerRng::from_seed(5);
        let mut replay = PricerRng::from_seed(5);
        let u = replay.gen_uniform();
        let expected = if u <= p {
            0.0
        } else {
            ((1.0 - p) / (1.0 - u)).ln() / beta
        };
        assert_relative_eq!(scheme.next_variance(0.0, dt, &mut rng), expected, epsilon = 1e-15);
    }

    #[test]
    fn test_spot_step_matches_formula() {
        let scheme = QeScheme::new(model());
        let dt = 0.01;
        let state = State::with_variance(100.0, 0.04);

        let mut rng = PricerRng::from_seed(21);
        let next = scheme.step(&state, 0, dt, &mut rng).unwrap();

        // Replay: variance draw first, spot draw second
        let mut replay = PricerRng::from_seed(21);
        let v_next = scheme.next_variance(0.04, dt, &mut replay);
        let z = replay.gen_normal();
        let v_int = 0.5 * (0.04 + v_next);
        let expected_log = 0.02 * dt - 0.5 * v_int * dt
            + (-0.5 / 0.4) * (v_next - 0.04 - 2.0 * (0.05 - v_int) * dt)
            + (0.75 * v_int * dt).sqrt() * z;

        assert_relative_eq!(next.variance.unwrap(), v_next, epsilon = 1e-15);
        assert_relative_eq!(next.spot, 100.0 * expected_log.exp(), epsilon = 1e-10);
    }

    #[test]
    fn test_variance_never_negative() {
        let scheme = QeScheme::new(HestonModel::new(0.0, 0.5, 0.04, 1.0, -0.9).unwrap());
        let mut rng = PricerRng::from_seed(77);
        let mut state = scheme.init_state(100.0, Some(0.04)).unwrap();
        for i in 0..5_000 {
            state = scheme.step(&state, i, 1.0 / 52.0, &mut rng).unwrap();
            assert!(state.variance.unwrap() >= 0.0);
            assert!(state.spot > 0.0);
        }
    }

    #[test]
    fn test_vanishing_dt_stays_finite() {
        let scheme = QeScheme::new(model());
        let mut rng = PricerRng::from_seed(9);

        let next = scheme
            .step(&State::with_variance(100.0, 0.04), 0, 1e-18, &mut rng)
            .unwrap();
        assert!(next.spot.is_finite());
        assert_relative_eq!(next.spot, 100.0, epsilon = 1e-6);
        assert_relative_eq!(next.variance.unwrap(), 0.04, epsilon = 1e-12);

        let from_zero = scheme
            .step(&State::with_variance(100.0, 0.0), 1, 1e-18, &mut rng)
            .unwrap();
        assert!(from_zero.spot.is_finite());
        assert!(from_zero.variance.unwrap().is_finite());
        assert!(from_zero.variance.unwrap() >= 0.0);
    }

    #[test]
    fn test_degenerate_variance_keeps_draw_count() {
        let scheme = QeScheme::new(model());
        let mut rng = PricerRng::from_seed(31);
        let mut replay = PricerRng::from_seed(31);

        scheme.next_variance(0.04, 1e-18, &mut rng);
        replay.gen_normal();
        assert_eq!(rng.gen_normal(), replay.gen_normal());
    }

    #[test]
    fn test_init_and_step_preconditions() {
        let scheme = QeScheme::new(model());
        assert!(scheme.init_state(100.0, None).is_err());
        assert!(scheme.init_state(-1.0, Some(0.04)).is_err());

        let mut rng = PricerRng::from_seed(1);
        let err = scheme
            .step(&State::with_variance(100.0, 0.04), 0, 0.0, &mut rng)
            .unwrap_err();
        assert_eq!(err.to_string(), "QeScheme::step: dt must be strictly positive");
    }
}
