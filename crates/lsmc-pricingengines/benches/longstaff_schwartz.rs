use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use lsmc_instruments::{AmericanOption, OptionType};
use lsmc_methods::PathGenerator;
use lsmc_pricingengines::{LongstaffSchwartzPricer, McAmericanEngine};
use lsmc_processes::GeometricBrownianMotionProcess;
use std::hint::black_box;

// Backward induction alone, on pre-simulated paths.
fn bench_backward_induction(c: &mut Criterion) {
    let process = GeometricBrownianMotionProcess::new(36.0, 0.06, 0.2).expect("valid process");
    let mut group = c.benchmark_group("lsm_backward_induction");

    for paths in [1_000, 10_000, 50_000].iter() {
        let matrix = PathGenerator::new(&process, 1.0, 50, 42)
            .and_then(|mut g| g.generate(*paths))
            .expect("simulation should succeed");
        let mut pricer =
            LongstaffSchwartzPricer::new(0.06 / 50.0, 40.0, matrix).expect("valid pricer");
        group.bench_with_input(BenchmarkId::from_parameter(paths), paths, |b, _| {
            b.iter(|| black_box(pricer.price_put().expect("pricing should succeed")))
        });
    }

    group.finish();
}

// Simulation plus pricing through the engine.
fn bench_engine_steps(c: &mut Criterion) {
    let option = AmericanOption::new(OptionType::Put, 40.0, 1.0).expect("valid option");
    let mut group = c.benchmark_group("mc_american_steps");

    for steps in [10, 50, 100].iter() {
        let engine =
            McAmericanEngine::new(36.0, 0.06, 0.2, *steps, 10_000, 42).expect("valid engine");
        group.bench_with_input(BenchmarkId::from_parameter(steps), steps, |b, _| {
            b.iter(|| {
                let npv = option
                    .price(black_box(&engine))
                    .expect("pricing should succeed")
                    .npv;
                black_box(npv)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_backward_induction, bench_engine_steps);
criterion_main!(benches);
