//! # Portas canônicas
//!
//! - **Single-qubit**: Z, X, Y, H, V (|1⟩·i), Phase(θ) (|1⟩·e^{iθ})
//! - **Two-qubit**: Cnot, Cz, Cv, CPhase(θ)
//!
//! Nas portas de dois qubits o bit 0 é o alvo e o bit 1 o controle; só os
//! índices 2 e 3 (controle = 1) são afetados.
//!
//! Todas expõem a matriz, então `before` entre portas funde numa matriz única.

use std::f64::consts::FRAC_1_SQRT_2;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use qclib_core::{Complex, QuantumResult};

use crate::matrix::Matrix;
use crate::operator::{Op, Operator};

const ZERO: Complex = Complex::new(0.0, 0.0);
const ONE: Complex = Complex::new(1.0, 0.0);
const I: Complex = Complex::new(0.0, 1.0);

fn diagonal(entries: &[Complex]) -> Matrix {
    let n = entries.len();
    let mut data = vec![ZERO; n * n];
    for (k, &value) in entries.iter().enumerate() {
        data[k * n + k] = value;
    }
    Matrix::square_unchecked(n, data)
}

static Z_MATRIX: Lazy<Matrix> = Lazy::new(|| diagonal(&[ONE, -ONE]));
static X_MATRIX: Lazy<Matrix> = Lazy::new(|| Matrix::square_unchecked(2, vec![ZERO, ONE, ONE, ZERO]));
static Y_MATRIX: Lazy<Matrix> = Lazy::new(|| Matrix::square_unchecked(2, vec![ZERO, -I, I, ZERO]));
static H_MATRIX: Lazy<Matrix> = Lazy::new(|| {
    let h = Complex::new(FRAC_1_SQRT_2, 0.0);
    Matrix::square_unchecked(2, vec![h, h, h, -h])
});
static V_MATRIX: Lazy<Matrix> = Lazy::new(|| diagonal(&[ONE, I]));
static CNOT_MATRIX: Lazy<Matrix> = Lazy::new(|| {
    #[rustfmt::skip]
    let data = vec![
        ONE,  ZERO, ZERO, ZERO,
        ZERO, ONE,  ZERO, ZERO,
        ZERO, ZERO, ZERO, ONE,
        ZERO, ZERO, ONE,  ZERO,
    ];
    Matrix::square_unchecked(4, data)
});
static CZ_MATRIX: Lazy<Matrix> = Lazy::new(|| diagonal(&[ONE, ONE, ONE, -ONE]));
static CV_MATRIX: Lazy<Matrix> = Lazy::new(|| diagonal(&[ONE, ONE, ONE, I]));

/// Pauli-Z: |1⟩ → −|1⟩
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Z;

impl Operator for Z {
    fn arity(&self) -> usize {
        1
    }

    fn name(&self) -> &str {
        "Z"
    }

    fn transform(&self, input: &[Complex]) -> QuantumResult<Vec<Complex>> {
        Ok(vec![input[0], -input[1]])
    }

    fn matrix(&self) -> Option<&Matrix> {
        Some(&*Z_MATRIX)
    }
}

/// Pauli-X (NOT): troca |0⟩ e |1⟩
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct X;

impl Operator for X {
    fn arity(&self) -> usize {
        1
    }

    fn name(&self) -> &str {
        "X"
    }

    fn transform(&self, input: &[Complex]) -> QuantumResult<Vec<Complex>> {
        Ok(vec![input[1], input[0]])
    }

    fn matrix(&self) -> Option<&Matrix> {
        Some(&*X_MATRIX)
    }
}

/// Pauli-Y: |0⟩ → i|1⟩, |1⟩ → −i|0⟩
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Y;

impl Operator for Y {
    fn arity(&self) -> usize {
        1
    }

    fn name(&self) -> &str {
        "Y"
    }

    fn transform(&self, input: &[Complex]) -> QuantumResult<Vec<Complex>> {
        Ok(vec![-I * input[1], I * input[0]])
    }

    fn matrix(&self) -> Option<&Matrix> {
        Some(&*Y_MATRIX)
    }
}

/// Hadamard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct H;

impl Operator for H {
    fn arity(&self) -> usize {
        1
    }

    fn name(&self) -> &str {
        "H"
    }

    fn transform(&self, input: &[Complex]) -> QuantumResult<Vec<Complex>> {
        let (a, b) = (input[0], input[1]);
        Ok(vec![(a + b) * FRAC_1_SQRT_2, (a - b) * FRAC_1_SQRT_2])
    }

    fn matrix(&self) -> Option<&Matrix> {
        Some(&*H_MATRIX)
    }
}

/// Raiz quadrada de Z: |1⟩ → i|1⟩
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct V;

impl Operator for V {
    fn arity(&self) -> usize {
        1
    }

    fn name(&self) -> &str {
        "V"
    }

    fn transform(&self, input: &[Complex]) -> QuantumResult<Vec<Complex>> {
        Ok(vec![input[0], I * input[1]])
    }

    fn matrix(&self) -> Option<&Matrix> {
        Some(&*V_MATRIX)
    }
}

/// Fase arbitrária: |1⟩ → e^{iθ}|1⟩
#[derive(Debug, Clone, PartialEq)]
pub struct Phase {
    theta: f64,
    factor: Complex,
    matrix: Matrix,
}

impl Phase {
    pub fn new(theta: f64) -> Self {
        let factor = Complex::from_polar(1.0, theta);
        Self {
            theta,
            factor,
            matrix: diagonal(&[ONE, factor]),
        }
    }

    pub fn theta(&self) -> f64 {
        self.theta
    }
}

impl Operator for Phase {
    fn arity(&self) -> usize {
        1
    }

    fn name(&self) -> &str {
        "Phase"
    }

    fn transform(&self, input: &[Complex]) -> QuantumResult<Vec<Complex>> {
        Ok(vec![input[0], self.factor * input[1]])
    }

    fn matrix(&self) -> Option<&Matrix> {
        Some(&self.matrix)
    }
}

/// NOT controlado (alvo = bit 0, controle = bit 1): troca os índices 2 e 3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cnot;

impl Operator for Cnot {
    fn arity(&self) -> usize {
        2
    }

    fn name(&self) -> &str {
        "CNOT"
    }

    fn transform(&self, input: &[Complex]) -> QuantumResult<Vec<Complex>> {
        Ok(vec![input[0], input[1], input[3], input[2]])
    }

    fn matrix(&self) -> Option<&Matrix> {
        Some(&*CNOT_MATRIX)
    }
}

/// Z controlado: nega o índice 3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cz;

impl Operator for Cz {
    fn arity(&self) -> usize {
        2
    }

    fn name(&self) -> &str {
        "CZ"
    }

    fn transform(&self, input: &[Complex]) -> QuantumResult<Vec<Complex>> {
        Ok(vec![input[0], input[1], input[2], -input[3]])
    }

    fn matrix(&self) -> Option<&Matrix> {
        Some(&*CZ_MATRIX)
    }
}

/// V controlado: multiplica o índice 3 por i
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cv;

impl Operator for Cv {
    fn arity(&self) -> usize {
        2
    }

    fn name(&self) -> &str {
        "CV"
    }

    fn transform(&self, input: &[Complex]) -> QuantumResult<Vec<Complex>> {
        Ok(vec![input[0], input[1], input[2], I * input[3]])
    }

    fn matrix(&self) -> Option<&Matrix> {
        Some(&*CV_MATRIX)
    }
}

/// Fase controlada: multiplica o índice 3 por e^{iθ}
#[derive(Debug, Clone, PartialEq)]
pub struct CPhase {
    theta: f64,
    factor: Complex,
    matrix: Matrix,
}

impl CPhase {
    pub fn new(theta: f64) -> Self {
        let factor = Complex::from_polar(1.0, theta);
        Self {
            theta,
            factor,
            matrix: diagonal(&[ONE, ONE, ONE, factor]),
        }
    }

    pub fn theta(&self) -> f64 {
        self.theta
    }
}

impl Operator for CPhase {
    fn arity(&self) -> usize {
        2
    }

    fn name(&self) -> &str {
        "CPhase"
    }

    fn transform(&self, input: &[Complex]) -> QuantumResult<Vec<Complex>> {
        Ok(vec![input[0], input[1], input[2], self.factor * input[3]])
    }

    fn matrix(&self) -> Option<&Matrix> {
        Some(&self.matrix)
    }
}

macro_rules! impl_into_op {
    ($($gate:ty),* $(,)?) => {
        $(
            impl From<$gate> for Op {
                fn from(gate: $gate) -> Self {
                    Op::builtin(gate)
                }
            }
        )*
    };
}

impl_into_op!(Z, X, Y, H, V, Phase, Cnot, Cz, Cv, CPhase);
