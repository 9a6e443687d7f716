//! Testes integrados para qclib-register

use crate::*;
use qclib_core::{AmplitudeVector, Complex, EPSILON, QuantumConfig, QuantumError};
use qclib_ops::{Cnot, H, Op, X, Z};
use rand::rngs::StdRng;
use rand::rngs::mock::StepRng;
use rand::{Rng, SeedableRng};

fn reals(values: &[f64]) -> AmplitudeVector {
    AmplitudeVector::from_reals(values).unwrap()
}

fn over25(values: &[f64]) -> AmplitudeVector {
    AmplitudeVector::from_reals(&values.iter().map(|v| v / 25.0).collect::<Vec<_>>()).unwrap()
}

fn seeded(n: usize, seed: u64) -> QubitRegister<StdRng> {
    QubitRegister::with_config(n, QuantumConfig::default().with_seed(seed)).unwrap()
}

// ═══════════════════════════════════════════════════════════════
// Construção
// ═══════════════════════════════════════════════════════════════

#[test]
fn test_new_register_is_all_zero() {
    let qr = QubitRegister::new(4).unwrap();
    assert_eq!(qr.num_qubits(), 4);
    assert_eq!(qr.container_count(), 4);
    qr.check_invariants().unwrap();
    for q in 0..4 {
        assert_eq!(qr.get_amps(&[q]).unwrap(), reals(&[1.0, 0.0]));
        assert_eq!(qr.coresident(q).unwrap(), vec![q]);
    }
}

#[test]
fn test_zero_qubits_rejected() {
    assert_eq!(QubitRegister::new(0).unwrap_err(), RegisterError::InvalidQubitCount(0));
}

// ═══════════════════════════════════════════════════════════════
// Amplitudes
// ═══════════════════════════════════════════════════════════════

#[test]
fn test_get_amps_across_containers_does_not_couple() {
    let mut qr = QubitRegister::new(2).unwrap();
    qr.set_amps(&reals(&[0.6, -0.8]), &[0]).unwrap();
    qr.set_amps(&reals(&[0.6, 0.8]), &[1]).unwrap();

    let forward = qr.get_amps(&[0, 1]).unwrap();
    let backward = qr.get_amps(&[1, 0]).unwrap();
    assert!(forward.approx_eq(&over25(&[9.0, -12.0, 12.0, -16.0]), EPSILON));
    assert!(backward.approx_eq(&over25(&[9.0, 12.0, -12.0, -16.0]), EPSILON));

    assert_eq!(qr.container_count(), 2);
    assert!(!qr.are_coupled(0, 1).unwrap());
}

#[test]
fn test_coupled_pair_then_cnot() {
    let mut qr = QubitRegister::new(12).unwrap();
    qr.set_amps(&reals(&[0.6, 0.8]), &[10]).unwrap();
    qr.set_amps(&reals(&[0.6, -0.8]), &[11]).unwrap();
    qr.couple(&[10, 11]).unwrap();
    assert!(qr.are_coupled(10, 11).unwrap());

    assert!(qr.get_amps(&[10, 11]).unwrap().approx_eq(&over25(&[9.0, 12.0, -12.0, -16.0]), EPSILON));
    assert!(qr.get_amps(&[11, 10]).unwrap().approx_eq(&over25(&[9.0, -12.0, 12.0, -16.0]), EPSILON));

    qr.do_op(&Cnot.into(), &[10, 11]).unwrap();

    assert!(qr.get_amps(&[10, 11]).unwrap().approx_eq(&over25(&[9.0, 12.0, -16.0, -12.0]), EPSILON));
    assert!(qr.get_amps(&[11, 10]).unwrap().approx_eq(&over25(&[9.0, -16.0, 12.0, -12.0]), EPSILON));
    qr.check_invariants().unwrap();
}

#[test]
fn test_set_amps_in_caller_order() {
    let mut qr = QubitRegister::with_config(3, QuantumConfig::default().without_validation()).unwrap();
    let values = reals(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
    qr.set_amps(&values, &[2, 0, 1]).unwrap();

    assert_eq!(qr.get_amps(&[2, 0, 1]).unwrap(), values);
    // qubit 2 era o bit 0 do vetor fornecido
    assert_eq!(qr.get_amps(&[0, 1, 2]).unwrap(), reals(&[0.0, 2.0, 4.0, 6.0, 1.0, 3.0, 5.0, 7.0]));
    qr.check_invariants().unwrap();
}

#[test]
fn test_set_amps_validation() {
    let mut qr = QubitRegister::new(2).unwrap();
    assert_eq!(
        qr.set_amps(&reals(&[1.0, 0.0, 0.0, 0.0]), &[0]),
        Err(RegisterError::Core(QuantumError::DimensionMismatch { expected: 2, actual: 4 }))
    );
    assert!(matches!(
        qr.set_amps(&reals(&[1.0, 1.0]), &[0]),
        Err(RegisterError::Core(QuantumError::NormalizationViolated { .. }))
    ));
    // nada mudou
    assert_eq!(qr.get_amps(&[0]).unwrap(), reals(&[1.0, 0.0]));
    assert_eq!(qr.container_count(), 2);
}

#[test]
fn test_amps_respect_size_limit() {
    let mut qr = QubitRegister::new(70).unwrap();
    let all: Vec<usize> = (0..70).collect();
    assert_eq!(
        qr.set_amps(&reals(&[1.0, 0.0]), &all).unwrap_err(),
        RegisterError::TooManyQubits { requested: 70, max: 24 }
    );
    assert_eq!(
        qr.get_amps(&all[..30]).unwrap_err(),
        RegisterError::TooManyQubits { requested: 30, max: 24 }
    );
    assert_eq!(qr.container_count(), 70);
    qr.check_invariants().unwrap();
}

#[test]
fn test_unsupported_coresidency() {
    let mut qr = QubitRegister::new(3).unwrap();
    qr.couple(&[0, 1]).unwrap();

    assert_eq!(
        qr.get_amps(&[0]).unwrap_err(),
        RegisterError::UnsupportedCoresidency { qubit: 1, requested: vec![0] }
    );
    assert_eq!(
        qr.set_amps(&reals(&[1.0, 0.0, 0.0, 0.0]), &[0, 2]).unwrap_err(),
        RegisterError::UnsupportedCoresidency { qubit: 1, requested: vec![0, 2] }
    );
    assert_eq!(qr.container_count(), 2);
}

#[test]
fn test_qubit_argument_errors() {
    let mut qr = QubitRegister::new(2).unwrap();
    assert_eq!(qr.get_amps(&[]).unwrap_err(), RegisterError::EmptyQubitList);
    assert_eq!(
        qr.get_amps(&[2]).unwrap_err(),
        RegisterError::Core(QuantumError::IndexOutOfRange { index: 2, bound: 2 })
    );
    assert_eq!(
        qr.couple(&[1, 1]).unwrap_err(),
        RegisterError::Core(QuantumError::DuplicateBit(1))
    );
    assert!(qr.measure(5).is_err());
}

// ═══════════════════════════════════════════════════════════════
// Acoplamento e operadores
// ═══════════════════════════════════════════════════════════════

#[test]
fn test_couple_pulls_in_coresidents() {
    let mut qr = QubitRegister::new(4).unwrap();
    qr.couple(&[0, 1]).unwrap();
    qr.couple(&[3, 1]).unwrap();

    // ordem de primeira aparição: container de 3, depois o de {0, 1}
    assert_eq!(qr.coresident(0).unwrap(), vec![3, 0, 1]);
    assert_eq!(qr.container_count(), 2);
    qr.check_invariants().unwrap();

    // sem efeito quando já acoplados
    qr.couple(&[0, 3]).unwrap();
    assert_eq!(qr.coresident(3).unwrap(), vec![3, 0, 1]);
}

#[test]
fn test_couple_coupled_set_keeps_amplitudes() {
    let mut qr = seeded(3, 5);
    qr.do_op(&H.into(), &[0]).unwrap();
    qr.do_op(&Cnot.into(), &[2, 0]).unwrap();
    qr.do_op(&Z.into(), &[2]).unwrap();
    let before = qr.get_amps(&[0, 2]).unwrap();

    qr.couple(&[2, 0]).unwrap();
    qr.couple(&[0]).unwrap();
    assert_eq!(qr.get_amps(&[0, 2]).unwrap(), before);
    assert_eq!(qr.coresident(2).unwrap(), vec![2, 0]);
    assert_eq!(qr.container_count(), 2);
}

#[test]
fn test_couple_respects_size_limit() {
    let config = QuantumConfig {
        max_container_qubits: 2,
        ..QuantumConfig::default()
    };
    let mut qr = QubitRegister::with_config(3, config).unwrap();
    qr.couple(&[0, 1]).unwrap();
    assert_eq!(
        qr.couple(&[1, 2]).unwrap_err(),
        RegisterError::TooManyQubits { requested: 3, max: 2 }
    );
    assert_eq!(qr.container_count(), 2);
    qr.check_invariants().unwrap();
}

#[test]
fn test_do_op_arity_mismatch() {
    let mut qr = QubitRegister::new(2).unwrap();
    assert_eq!(
        qr.do_op(&Cnot.into(), &[0]).unwrap_err(),
        RegisterError::Core(QuantumError::TargetCountMismatch { arity: 2, targets: 1 })
    );
    assert_eq!(qr.container_count(), 2);
}

#[test]
fn test_do_op_on_single_qubit() {
    let mut qr = QubitRegister::new(3).unwrap();
    qr.do_op(&X.into(), &[1]).unwrap();
    assert_eq!(qr.get_amps(&[1]).unwrap(), reals(&[0.0, 1.0]));
    assert_eq!(qr.container_count(), 3);
}

#[test]
fn test_do_op_couples_and_entangles() {
    let mut qr = QubitRegister::new(2).unwrap();
    qr.do_op(&H.into(), &[0]).unwrap();
    // alvo = qubit 1, controle = qubit 0
    qr.do_op(&Cnot.into(), &[1, 0]).unwrap();
    let h = std::f64::consts::FRAC_1_SQRT_2;
    assert!(qr.get_amps(&[0, 1]).unwrap().approx_eq(&reals(&[h, 0.0, 0.0, h]), EPSILON));
}

// ═══════════════════════════════════════════════════════════════
// Medição
// ═══════════════════════════════════════════════════════════════

#[test]
fn test_measure_zero_is_always_false() {
    for seed in 0..20 {
        let mut qr = seeded(1, seed);
        assert!(!qr.measure(0).unwrap());
        assert_eq!(qr.get_amps(&[0]).unwrap(), reals(&[1.0, 0.0]));
    }
}

#[test]
fn test_measure_i_one_is_always_true() {
    for seed in 0..20 {
        let mut qr = seeded(1, seed);
        let i_one = AmplitudeVector::from_vec(vec![Complex::new(0.0, 0.0), Complex::new(0.0, 1.0)]).unwrap();
        qr.set_amps(&i_one, &[0]).unwrap();
        assert!(qr.measure(0).unwrap());
    }
}

#[test]
fn test_measure_decouples_measured_qubit() {
    let mut qr = QubitRegister::with_rng(3, QuantumConfig::default(), StepRng::new(u64::MAX, 0)).unwrap();
    qr.do_op(&H.into(), &[0]).unwrap();
    qr.do_op(&Cnot.into(), &[1, 0]).unwrap();
    qr.do_op(&X.into(), &[2]).unwrap();
    qr.couple(&[0, 2]).unwrap();
    assert_eq!(qr.coresident(0).unwrap(), vec![1, 0, 2]);

    assert!(qr.measure(0).unwrap());
    qr.check_invariants().unwrap();

    assert_eq!(qr.coresident(0).unwrap(), vec![0]);
    assert_eq!(qr.coresident(1).unwrap(), vec![1, 2]);
    assert_eq!(qr.get_amps(&[0]).unwrap(), reals(&[0.0, 1.0]));
    // qubit 1 colapsou junto; qubit 2 continua em |1⟩
    assert!(qr.get_amps(&[1, 2]).unwrap().approx_eq(&reals(&[0.0, 0.0, 0.0, 1.0]), EPSILON));
    assert!(qr.measure(1).unwrap());
    assert_eq!(qr.container_count(), 3);
}

#[test]
fn test_measure_many_validates_before_measuring() {
    let mut qr = QubitRegister::with_rng(2, QuantumConfig::default(), StepRng::new(u64::MAX, 0)).unwrap();
    qr.do_op(&H.into(), &[0]).unwrap();
    let before = qr.get_amps(&[0]).unwrap();

    assert_eq!(
        qr.measure_many(&[0, 7]).unwrap_err(),
        RegisterError::Core(QuantumError::IndexOutOfRange { index: 7, bound: 2 })
    );
    assert_eq!(qr.get_amps(&[0]).unwrap(), before);
    assert_eq!(qr.measure_many(&[0, 0]).unwrap(), vec![true, true]);
}

#[test]
fn test_containers_stay_normalized_through_measurement() {
    for seed in 0..8u64 {
        let mut source = StdRng::seed_from_u64(seed);
        let raw: Vec<Complex> = (0..16)
            .map(|_| Complex::new(source.gen_range(-1.0..1.0), source.gen_range(-1.0..1.0)))
            .collect();
        let norm = raw.iter().map(|c| c.norm_sqr()).sum::<f64>().sqrt();
        let state = AmplitudeVector::from_vec(raw.into_iter().map(|c| c / norm).collect()).unwrap();

        let mut qr = seeded(4, seed);
        qr.set_amps(&state, &[0, 1, 2, 3]).unwrap();
        for qubit in [2, 0, 3, 1] {
            qr.measure(qubit).unwrap();
            qr.check_invariants().unwrap();
            for q in 0..4 {
                let group = qr.coresident(q).unwrap();
                let total = qr.get_amps(&group).unwrap().norm_sqr_sum();
                assert!((total - 1.0).abs() < EPSILON, "seed {seed}: {group:?} has norm {total}");
            }
        }
        assert_eq!(qr.container_count(), 4);
    }
}

#[test]
fn test_seeded_registers_agree() {
    let run = |seed| {
        let mut qr = seeded(6, seed);
        for q in 0..6 {
            qr.do_op(&H.into(), &[q]).unwrap();
        }
        qr.measure_many(&[0, 1, 2, 3, 4, 5]).unwrap()
    };
    assert_eq!(run(7), run(7));
}

#[test]
fn test_step_rng_forces_outcomes() {
    let mut low = QubitRegister::with_rng(1, QuantumConfig::default(), StepRng::new(0, 0)).unwrap();
    low.do_op(&H.into(), &[0]).unwrap();
    assert!(!low.measure(0).unwrap());

    let mut high = QubitRegister::with_rng(1, QuantumConfig::default(), StepRng::new(u64::MAX, 0)).unwrap();
    high.do_op(&H.into(), &[0]).unwrap();
    assert!(high.measure(0).unwrap());
    assert_eq!(high.get_amps(&[0]).unwrap().get(1).map(|c| (c.re - 1.0).abs() < EPSILON), Some(true));
}

// ═══════════════════════════════════════════════════════════════
// Reordenação e impressão
// ═══════════════════════════════════════════════════════════════

#[test]
fn test_reorder_preserves_logical_state() {
    let mut qr = QubitRegister::with_config(3, QuantumConfig::default().without_validation()).unwrap();
    let values = reals(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
    qr.set_amps(&values, &[0, 1, 2]).unwrap();

    qr.reorder(&[2, 0]).unwrap();
    assert_eq!(qr.coresident(1).unwrap(), vec![2, 0, 1]);
    assert_eq!(qr.get_amps(&[0, 1, 2]).unwrap(), values);
    qr.check_invariants().unwrap();
}

#[test]
fn test_print_bits() {
    let mut qr = QubitRegister::with_config(3, QuantumConfig::default().without_validation()).unwrap();
    qr.set_amps(&reals(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]), &[0, 1, 2]).unwrap();

    let printed = qr.print_bits(&[2, 0, 1]).unwrap();
    assert!(printed.starts_with("{2,0,1}:\n { |000>=("), "{printed}");
    assert_eq!(qr.coresident(0).unwrap(), vec![2, 0, 1]);
}

#[test]
fn test_print_bits_across_containers() {
    let mut qr = QubitRegister::new(3).unwrap();
    qr.couple(&[1, 2]).unwrap();
    let printed = qr.print_bits(&[2, 0]).unwrap();
    assert!(printed.starts_with("{2,1}:\n "), "{printed}");
    assert!(printed.contains("{0}:\n "), "{printed}");
}

#[test]
fn test_display_lists_containers() {
    let mut qr = QubitRegister::new(3).unwrap();
    qr.do_op(&Z.into(), &[0]).unwrap();
    qr.couple(&[1, 2]).unwrap();
    let shown = qr.to_string();
    assert!(shown.starts_with("QubitRegister (qubits=3, containers=2)"));
    assert!(shown.contains("{1,2}"));
    assert!(shown.contains("{0}"));
}

#[test]
fn test_operator_handle_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Op>();
    assert_send_sync::<QubitRegister>();
}
