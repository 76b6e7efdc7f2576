//! Criterion benchmarks for the fit and predict hot paths over synthetic
//! venue batches.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use vr_core::fit::FitStrategy;
use vr_core::synthetic::generate_venues;
use vr_core::Engine;

fn bench_fit(c: &mut Criterion) {
    let engine = Engine::default();
    let mut group = c.benchmark_group("fit");

    for &n in &[50usize, 200, 500] {
        let venues = generate_venues(n, 42);
        group.bench_with_input(BenchmarkId::new("laplace", n), &venues, |b, venues| {
            b.iter(|| {
                let model = engine
                    .fit(
                        black_box(venues),
                        None,
                        "work",
                        false,
                        FitStrategy::Approximate,
                        42,
                    )
                    .expect("fit should succeed on synthetic data");
                black_box(model.n_samples());
            })
        });
    }

    let venues = generate_venues(200, 42);
    group.bench_function("mcmc_200", |b| {
        b.iter(|| {
            let model = engine
                .fit(
                    black_box(&venues),
                    None,
                    "work",
                    false,
                    FitStrategy::Exact,
                    42,
                )
                .expect("fit should succeed on synthetic data");
            black_box(model.n_samples());
        })
    });
    group.finish();
}

fn bench_predict(c: &mut Criterion) {
    let engine = Engine::default();
    let venues = generate_venues(200, 7);
    let model = engine
        .fit(&venues, None, "work", false, FitStrategy::Approximate, 7)
        .expect("fit should succeed on synthetic data");

    let mut group = c.benchmark_group("predict");
    for &n_samples in &[100usize, 1000] {
        group.bench_with_input(
            BenchmarkId::new("batch_200", n_samples),
            &n_samples,
            |b, &n_samples| {
                b.iter(|| {
                    let preds =
                        engine.predict(black_box(&model), &venues, "work", false, n_samples, 1);
                    black_box(preds.len());
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_fit, bench_predict);
criterion_main!(benches);
