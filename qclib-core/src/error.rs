//! Tipos de erro para qclib-core

use thiserror::Error;

/// Resultado customizado para operações sobre amplitudes e operadores
pub type QuantumResult<T> = Result<T, QuantumError>;

/// Erros de argumento e de invariante do núcleo do simulador
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuantumError {
    #[error("Invalid arity: {0} (must be in 1..={max})", max = crate::translate::MAX_LOG_SIZE)]
    InvalidArity(usize),

    #[error("Arity mismatch: {left} vs {right}")]
    ArityMismatch { left: usize, right: usize },

    #[error("Operator of arity {arity} given {targets} target bits")]
    TargetCountMismatch { arity: usize, targets: usize },

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Vector length {0} is not a power of two >= 2")]
    NotPowerOfTwo(usize),

    #[error("Index {index} out of range [0, {bound})")]
    IndexOutOfRange { index: usize, bound: usize },

    #[error("Duplicate bit {0} in target list")]
    DuplicateBit(usize),

    #[error("Invalid log size {log_size} for {targets} target bits")]
    InvalidLogSize { log_size: usize, targets: usize },

    #[error("Amplitudes not normalized: squared magnitudes sum to {norm}")]
    NormalizationViolated { norm: f64 },
}
