//! # Operator Benchmarks
//!
//! Measures operator application on containers of growing size, and the
//! cost of composing operators with `before`.
//!
//! Run: `cargo bench --bench operator_bench`

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qclib_core::AmplitudeVector;
use qclib_ops::{Cnot, H, Op, toffoli};

/// Benchmark apply_to em vetores de 2^L amplitudes
fn bench_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_to");
    let h: Op = H.into();
    let cnot: Op = Cnot.into();

    for log_size in [4usize, 10, 16] {
        let mut data = AmplitudeVector::zero_state(log_size).unwrap();
        group.bench_with_input(BenchmarkId::new("hadamard", log_size), &log_size, |b, &l| {
            b.iter(|| h.apply_to(black_box(&mut data), &[l - 1]))
        });

        let mut data = AmplitudeVector::zero_state(log_size).unwrap();
        group.bench_with_input(BenchmarkId::new("cnot", log_size), &log_size, |b, &l| {
            b.iter(|| cnot.apply_to(black_box(&mut data), &[0, l - 1]))
        });
    }

    group.finish();
}

/// Benchmark composição
fn bench_compose(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose");
    let h: Op = H.into();

    group.bench_function("fused_matrix_chain", |b| {
        b.iter(|| {
            let mut op = h.clone();
            for _ in 0..8 {
                op = op.before(&h).unwrap();
            }
            black_box(op)
        })
    });

    group.bench_function("toffoli_build", |b| b.iter(|| black_box(toffoli())));

    let ccnot = toffoli().unwrap();
    let mut data = AmplitudeVector::zero_state(10).unwrap();
    group.bench_function("toffoli_apply_10", |b| {
        b.iter(|| ccnot.apply_to(black_box(&mut data), &[0, 5, 9]))
    });

    group.finish();
}

criterion_group!(benches, bench_apply, bench_compose);
criterion_main!(benches);
