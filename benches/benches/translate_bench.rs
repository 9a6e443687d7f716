//! # Translation Benchmarks
//!
//! Measures index translation and the gather/scatter primitives built on it.
//! Cost is O(2^L) in the source log-size.
//!
//! Run: `cargo bench --bench translate_bench`

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qclib_core::{AmplitudeVector, permutation_indices, translate_indices};

/// Benchmark translate_indices por tamanho
fn bench_translate(c: &mut Criterion) {
    let mut group = c.benchmark_group("translate_indices");

    for log_size in [4usize, 8, 12, 16] {
        group.bench_with_input(BenchmarkId::new("one_target", log_size), &log_size, |b, &l| {
            b.iter(|| black_box(translate_indices(l, &[l / 2])))
        });
        group.bench_with_input(BenchmarkId::new("two_targets", log_size), &log_size, |b, &l| {
            b.iter(|| black_box(translate_indices(l, &[l - 1, 0])))
        });
    }

    group.finish();
}

/// Benchmark reordenação completa
fn bench_permutation(c: &mut Criterion) {
    let mut group = c.benchmark_group("permutation");

    for log_size in [4usize, 10, 14] {
        let order: Vec<usize> = (0..log_size).rev().collect();
        let data = AmplitudeVector::zero_state(log_size).unwrap();
        group.bench_with_input(BenchmarkId::new("reverse_gather", log_size), &order, |b, order| {
            b.iter(|| {
                let indices = permutation_indices(order.len(), order).unwrap();
                black_box(data.gather(&indices))
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_translate, bench_permutation);
criterion_main!(benches);
