//! Criterion benchmarks for the integration loop and batch execution.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use thrum_bench::chain_profile;
use thrum_solver::{run_batch, CancelToken, SimulationRunner};

/// Benchmark: full run of a two-body chain over 1000 steps.
fn bench_run_two_body_1k_steps(c: &mut Criterion) {
    let deck = chain_profile(2, 10.0, 0.01);

    c.bench_function("run_two_body_1k_steps", |b| {
        b.iter(|| {
            let mut runner = SimulationRunner::new(&deck).unwrap();
            black_box(runner.run().unwrap());
        });
    });
}

/// Benchmark: full run of a ten-body chain over 1000 steps.
fn bench_run_ten_body_1k_steps(c: &mut Criterion) {
    let deck = chain_profile(10, 10.0, 0.01);

    c.bench_function("run_ten_body_1k_steps", |b| {
        b.iter(|| {
            let mut runner = SimulationRunner::new(&deck).unwrap();
            black_box(runner.run().unwrap());
        });
    });
}

/// Benchmark: a batch of eight chain decks across worker threads.
fn bench_batch_of_eight(c: &mut Criterion) {
    let decks: Vec<_> = (2..=9).map(|n| chain_profile(n, 1.0, 0.001)).collect();

    c.bench_function("batch_of_eight_1k_steps", |b| {
        b.iter(|| {
            let results = run_batch(black_box(&decks), 42, &CancelToken::new());
            black_box(results);
        });
    });
}

criterion_group!(
    benches,
    bench_run_two_body_1k_steps,
    bench_run_ten_body_1k_steps,
    bench_batch_of_eight
);
criterion_main!(benches);
