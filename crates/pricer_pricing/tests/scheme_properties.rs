//! Path-level properties of the discretisation schemes under the engine.

use std::sync::Arc;

use approx::assert_relative_eq;
use pricer_core::market_data::surfaces::LocalVolatilitySurface;
use pricer_models::models::{
    BlackScholesModel, DiffusionModelEnum, HestonModel, LocalVolModel, VasicekModel,
};
use pricer_pricing::mc::{EngineConfig, MonteCarloEngine, ALL_CORES};
use pricer_pricing::schemes::{
    EulerHestonScheme, EulerScheme, LogEulerScheme, QeScheme, Scheme, SchemeEnum,
};
use proptest::prelude::*;

fn engine<S: Scheme>(scheme: S, seed: u64) -> MonteCarloEngine<S> {
    let mut engine = MonteCarloEngine::new(scheme);
    let config = EngineConfig::builder()
        .seed(seed)
        .n_jobs(ALL_CORES)
        .return_variance(true)
        .build()
        .unwrap();
    engine.configure(&config).unwrap();
    engine
}

#[test]
fn test_log_euler_stays_positive() {
    let scheme = LogEulerScheme::new(BlackScholesModel::new(-0.5, 1.5).unwrap());
    let result = engine(scheme, 1).generate(100.0, 1_500, 5.0, 50, None).unwrap();
    assert!(result.paths().iter().all(|&s| s > 0.0));
}

#[test]
fn test_qe_spot_and_variance_stay_non_negative() {
    let scheme = QeScheme::new(HestonModel::new(0.0, 2.0, 0.04, 0.3, -0.7).unwrap());
    let result = engine(scheme, 2)
        .generate(100.0, 1_260, 5.0, 100, Some(0.04))
        .unwrap();
    assert!(result.paths().iter().all(|&s| s > 0.0));
    assert!(result.variances().unwrap().iter().all(|&v| v >= 0.0));
}

#[test]
fn test_qe_mean_variance_reverts_to_theta() {
    let scheme = QeScheme::new(HestonModel::new(0.0, 3.0, 0.04, 0.3, -0.7).unwrap());
    let result = engine(scheme, 3)
        .generate(100.0, 250, 5.0, 4_000, Some(0.09))
        .unwrap();
    let row = result.row_len();
    let terminal_mean: f64 = result
        .variances()
        .unwrap()
        .chunks_exact(row)
        .map(|r| r[row - 1])
        .sum::<f64>()
        / result.n_paths() as f64;
    assert_relative_eq!(terminal_mean, 0.04, epsilon = 0.004);
}

#[test]
fn test_euler_heston_records_truncated_input() {
    let scheme = EulerHestonScheme::new(HestonModel::new(0.0, 1.0, 0.04, 1.2, -0.3).unwrap());
    let result = engine(scheme, 4)
        .generate(100.0, 100, 1.0, 50, Some(0.01))
        .unwrap();
    assert_eq!(result.variances().unwrap().len(), 50 * 101);
    assert!(result.paths().iter().all(|&s| s > 0.0));
}

#[test]
fn test_zero_vol_euler_is_deterministic() {
    let scheme = EulerScheme::new(BlackScholesModel::new(0.03, 0.0).unwrap());
    let n_steps = 12;
    let result = engine(scheme, 5).generate(50.0, n_steps, 1.0, 8, None).unwrap();
    let expected = 50.0 * (1.0 + 0.03 / n_steps as f64).powi(n_steps as i32);
    for terminal in result.terminal_values() {
        assert_relative_eq!(terminal, expected, epsilon = 1e-10);
    }
}

#[test]
fn test_local_vol_euler_records_squared_vol() {
    let surface = LocalVolatilitySurface::new(
        vec![0.0, 1.0],
        vec![50.0, 150.0],
        vec![0.2, 0.2, 0.2, 0.2],
    )
    .unwrap();
    let model = LocalVolModel::new(0.02, 0.0, Arc::new(surface)).unwrap();
    let scheme = SchemeEnum::from(EulerScheme::new(DiffusionModelEnum::from(model)));
    assert!(scheme.produces_variance());

    let result = engine(scheme, 6).generate(100.0, 20, 1.0, 10, None).unwrap();
    for &v in result.variances().unwrap() {
        assert_relative_eq!(v, 0.04, epsilon = 1e-12);
    }
}

#[test]
fn test_vasicek_mean_reverts() {
    let model = VasicekModel::new(2.0, 0.05, 0.01).unwrap();
    let scheme = EulerScheme::new(model);
    let result = engine(scheme, 7).generate(0.10, 500, 5.0, 1_000, None).unwrap();
    assert_relative_eq!(result.avg_terminal_value(), 0.05, epsilon = 0.002);
    assert!(!result.has_variances());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_row_starts_at_initial_value(s0 in 1.0f64..500.0, n_steps in 1usize..40, seed in any::<u64>()) {
        let scheme = LogEulerScheme::new(BlackScholesModel::new(0.01, 0.3).unwrap());
        let result = engine(scheme, seed).generate(s0, n_steps, 1.0, 4, None).unwrap();
        prop_assert_eq!(result.paths().len(), 4 * (n_steps + 1));
        for row in result.paths().chunks_exact(n_steps + 1) {
            prop_assert_eq!(row[0], s0);
        }
    }
}
