//! # Register Benchmarks
//!
//! Measures coupling (tensor product), register-level operator application
//! and measurement with decoupling.
//!
//! Run: `cargo bench --bench register_bench`

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qclib_core::QuantumConfig;
use qclib_ops::{Cnot, H, Op};
use qclib_register::QubitRegister;

fn seeded(n: usize) -> QubitRegister {
    QubitRegister::with_config(n, QuantumConfig::default().with_seed(42)).unwrap()
}

/// Benchmark acoplamento de n qubits isolados
fn bench_couple(c: &mut Criterion) {
    let mut group = c.benchmark_group("couple");

    for n in [2usize, 8, 14] {
        let qubits: Vec<usize> = (0..n).collect();
        group.bench_with_input(BenchmarkId::new("all", n), &qubits, |b, qubits| {
            b.iter(|| {
                let mut qr = seeded(qubits.len());
                qr.couple(qubits).unwrap();
                black_box(qr)
            })
        });
    }

    group.finish();
}

/// Benchmark GHZ: H + cadeia de CNOTs, depois medição de todos
fn bench_ghz(c: &mut Criterion) {
    let mut group = c.benchmark_group("ghz");
    let h: Op = H.into();
    let cnot: Op = Cnot.into();

    for n in [4usize, 10] {
        group.bench_with_input(BenchmarkId::new("prepare_and_measure", n), &n, |b, &n| {
            b.iter(|| {
                let mut qr = seeded(n);
                qr.do_op(&h, &[0]).unwrap();
                for q in 1..n {
                    qr.do_op(&cnot, &[q, q - 1]).unwrap();
                }
                let qubits: Vec<usize> = (0..n).collect();
                black_box(qr.measure_many(&qubits).unwrap())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_couple, bench_ghz);
criterion_main!(benches);
