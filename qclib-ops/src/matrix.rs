//! Matriz complexa densa para operadores explícitos

use qclib_core::{Complex, QuantumError, QuantumResult, approx_eq_complex};

/// Matriz quadrada 2^k × 2^k, armazenada por linhas
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    dim: usize,
    data: Vec<Complex>,
}

impl Matrix {
    /// Cria matriz `dim × dim` a partir dos elementos por linha
    pub fn new(dim: usize, data: Vec<Complex>) -> QuantumResult<Self> {
        if dim < 2 || !dim.is_power_of_two() {
            return Err(QuantumError::NotPowerOfTwo(dim));
        }
        if data.len() != dim * dim {
            return Err(QuantumError::DimensionMismatch {
                expected: dim * dim,
                actual: data.len(),
            });
        }
        Ok(Self { dim, data })
    }

    /// Construção sem verificação, para as portas embutidas
    pub(crate) fn square_unchecked(dim: usize, data: Vec<Complex>) -> Self {
        debug_assert_eq!(data.len(), dim * dim);
        Self { dim, data }
    }

    /// Cria a partir de linhas; todas devem ter o mesmo comprimento da lista
    pub fn from_rows(rows: Vec<Vec<Complex>>) -> QuantumResult<Self> {
        let dim = rows.len();
        let mut data = Vec::with_capacity(dim * dim);
        for row in rows {
            if row.len() != dim {
                return Err(QuantumError::DimensionMismatch {
                    expected: dim,
                    actual: row.len(),
                });
            }
            data.extend(row);
        }
        Self::new(dim, data)
    }

    /// Atalho para matrizes reais
    pub fn from_real_rows(rows: &[&[f64]]) -> QuantumResult<Self> {
        Self::from_rows(
            rows.iter()
                .map(|row| row.iter().map(|&re| Complex::new(re, 0.0)).collect())
                .collect(),
        )
    }

    /// Matriz identidade
    pub fn identity(dim: usize) -> QuantumResult<Self> {
        let mut data = vec![Complex::new(0.0, 0.0); dim * dim];
        for i in 0..dim {
            data[i * dim + i] = Complex::new(1.0, 0.0);
        }
        Self::new(dim, data)
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// log2 da dimensão (aridade do operador correspondente)
    #[inline]
    pub fn log_dim(&self) -> usize {
        self.dim.trailing_zeros() as usize
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Complex {
        self.data[row * self.dim + col]
    }

    /// Produto `self · other`
    pub fn mul(&self, other: &Matrix) -> QuantumResult<Matrix> {
        if self.dim != other.dim {
            return Err(QuantumError::DimensionMismatch {
                expected: self.dim,
                actual: other.dim,
            });
        }
        let n = self.dim;
        let mut data = vec![Complex::new(0.0, 0.0); n * n];
        for r in 0..n {
            for k in 0..n {
                let a = self.data[r * n + k];
                if a.norm_sqr() == 0.0 {
                    continue;
                }
                for c in 0..n {
                    data[r * n + c] += a * other.data[k * n + c];
                }
            }
        }
        Ok(Matrix { dim: n, data })
    }

    /// Transposta conjugada
    pub fn dagger(&self) -> Matrix {
        let n = self.dim;
        let mut data = vec![Complex::new(0.0, 0.0); n * n];
        for r in 0..n {
            for c in 0..n {
                data[c * n + r] = self.data[r * n + c].conj();
            }
        }
        Matrix { dim: n, data }
    }

    /// Produto matriz-vetor; `input.len()` deve ser `dim`
    pub fn apply(&self, input: &[Complex]) -> Vec<Complex> {
        let n = self.dim;
        (0..n)
            .map(|r| {
                self.data[r * n..(r + 1) * n]
                    .iter()
                    .zip(input)
                    .map(|(&m, &v)| m * v)
                    .sum::<Complex>()
            })
            .collect()
    }

    /// Verifica U·U† ≈ I
    pub fn is_unitary(&self, eps: f64) -> bool {
        let Ok(product) = self.mul(&self.dagger()) else {
            return false;
        };
        let n = self.dim;
        (0..n).all(|r| {
            (0..n).all(|c| {
                let expected = if r == c { Complex::new(1.0, 0.0) } else { Complex::new(0.0, 0.0) };
                approx_eq_complex(product.get(r, c), expected, eps)
            })
        })
    }
}
