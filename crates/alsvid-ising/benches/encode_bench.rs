//! Benchmarks for the QUBO → Ising transform.
//!
//! Run with: cargo bench -p alsvid-ising

use alsvid_ising::{QuboCoefficients, qubo_to_ising};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

/// Dense-ish QUBO over `n` variables: all diagonals plus a ring of couplers.
fn ring_qubo(n: u32) -> QuboCoefficients {
    let mut qubo = QuboCoefficients::new();
    for i in 0..n {
        qubo.add(i, i, -1.0 + f64::from(i) * 0.01);
        qubo.add(i, (i + 1) % n, 2.0);
    }
    qubo
}

fn bench_qubo_to_ising(c: &mut Criterion) {
    let mut group = c.benchmark_group("qubo_to_ising");

    for n in &[16u32, 64, 256, 1024] {
        let qubo = ring_qubo(*n);
        group.bench_with_input(BenchmarkId::new("ring", n), &qubo, |b, qubo| {
            b.iter(|| qubo_to_ising(black_box(qubo), black_box(0.0), false));
        });
    }

    group.finish();
}

fn bench_normalization(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    let qubo = ring_qubo(1024);
    let ising = qubo_to_ising(&qubo, 0.0, false);

    group.bench_function("abs_max_1024", |b| {
        b.iter(|| {
            let mut m = ising.clone();
            m.normalize_by_abs_max();
            black_box(m)
        });
    });

    group.bench_function("rms_1024", |b| {
        b.iter(|| {
            let mut m = ising.clone();
            m.normalize_by_rms();
            black_box(m)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_qubo_to_ising, bench_normalization);
criterion_main!(benches);
