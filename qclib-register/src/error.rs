//! Tipos de erro para qclib-register

use qclib_core::QuantumError;
use thiserror::Error;

/// Resultado customizado para operações do registrador
pub type RegisterResult<T> = Result<T, RegisterError>;

/// Erros que podem ocorrer em operações do registrador
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegisterError {
    #[error("Core error: {0}")]
    Core(#[from] QuantumError),

    #[error("Register needs at least one qubit, got {0}")]
    InvalidQubitCount(usize),

    #[error("No qubits given")]
    EmptyQubitList,

    #[error("Qubit {qubit} shares a container with {requested:?} but was not requested")]
    UnsupportedCoresidency { qubit: usize, requested: Vec<usize> },

    #[error("Probabilities do not sum to 1: p0 = {p0}, p1 = {p1}")]
    ProbabilityMismatch { p0: f64, p1: f64 },

    #[error("Coupling would create a container of {requested} qubits (max {max})")]
    TooManyQubits { requested: usize, max: usize },

    #[error("Container {0} not found")]
    MissingContainer(u64),

    #[error("Register invariant violated: {0}")]
    InvariantViolated(String),
}
