//! Criterion benchmarks for pricer_pricing path generation.
//!
//! Benchmarks cover:
//! - Single-step cost of each scheme
//! - `generate` throughput (serial vs all cores) for log-Euler and QE
//! - Bump-and-revalue pricing of a European call

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_models::instruments::{Instrument, OptionContract, PayoffType};
use pricer_models::models::{BlackScholesModel, HestonModel, State};
use pricer_pricing::mc::{EngineConfig, MonteCarloEngine, ALL_CORES};
use pricer_pricing::pricer::{MarketState, Pricer};
use pricer_pricing::rng::PricerRng;
use pricer_pricing::schemes::{EulerHestonScheme, LogEulerScheme, QeScheme, Scheme};

fn heston() -> HestonModel {
    HestonModel::new(0.0, 2.0, 0.04, 0.3, -0.7).unwrap()
}

fn configured<S: Scheme>(scheme: S, n_jobs: i32) -> MonteCarloEngine<S> {
    let mut engine = MonteCarloEngine::new(scheme);
    engine
        .configure(&EngineConfig::builder().seed(42).n_jobs(n_jobs).build().unwrap())
        .unwrap();
    engine
}

/// Benchmark one step of each Heston scheme.
fn bench_scheme_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("scheme_step");
    let state = State::with_variance(100.0, 0.04);
    let dt = 1.0 / 252.0;

    let qe = QeScheme::new(heston());
    group.bench_function("qe", |b| {
        let mut rng = PricerRng::from_seed(42);
        b.iter(|| qe.step(black_box(&state), 0, dt, &mut rng))
    });

    let euler = EulerHestonScheme::new(heston());
    group.bench_function("euler_heston", |b| {
        let mut rng = PricerRng::from_seed(42);
        b.iter(|| euler.step(black_box(&state), 0, dt, &mut rng))
    });

    group.finish();
}

/// Benchmark `generate` with varying path counts and parallelism.
fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    group.sample_size(20);
    let n_steps = 252;

    for n_paths in [1_000, 10_000] {
        for (label, n_jobs) in [("serial", 1), ("all_cores", ALL_CORES)] {
            group.bench_with_input(
                BenchmarkId::new(format!("log_euler_{}", label), n_paths),
                &n_paths,
                |b, &n| {
                    let scheme = LogEulerScheme::new(BlackScholesModel::new(0.05, 0.2).unwrap());
                    let mut engine = configured(scheme, n_jobs);
                    b.iter(|| engine.generate(100.0, n_steps, 1.0, n, None))
                },
            );
            group.bench_with_input(
                BenchmarkId::new(format!("qe_{}", label), n_paths),
                &n_paths,
                |b, &n| {
                    let mut engine = configured(QeScheme::new(heston()), n_jobs);
                    b.iter(|| engine.generate(100.0, n_steps, 1.0, n, Some(0.04)))
                },
            );
        }
    }

    group.finish();
}

/// Benchmark price + delta + gamma (five simulations).
fn bench_pricer(c: &mut Criterion) {
    let mut group = c.benchmark_group("pricer");
    group.sample_size(10);

    let scheme = LogEulerScheme::new(BlackScholesModel::new(0.05, 0.2).unwrap());
    let engine = configured(scheme, ALL_CORES);
    let market = MarketState::new(100.0, 0.05, None).unwrap();
    let mut pricer = Pricer::new(market, 50, 10_000, engine).unwrap();
    let call = Instrument::new(OptionContract::new(100.0, 1.0).unwrap(), PayoffType::Call.into());

    group.bench_function("european_call_greeks", |b| {
        b.iter(|| pricer.compute(black_box(&call), None))
    });

    group.finish();
}

criterion_group!(benches, bench_scheme_step, bench_generate, bench_pricer);
criterion_main!(benches);
