//! # Vetor de amplitudes
//!
//! Sequência densa de 2^k amplitudes complexas endereçada por um índice de k
//! bits. O bit `i` do endereço corresponde ao qubit local `i`.

use std::fmt;
use std::ops::Index;

use crate::error::{QuantumError, QuantumResult};
use crate::translate::MAX_LOG_SIZE;

/// Amplitude complexa (par de f64)
pub type Complex = num_complex::Complex64;

/// Tolerância padrão para igualdade aproximada
pub const EPSILON: f64 = 1e-5;

/// Verifica se `x` está a menos de `eps` de zero
#[inline]
pub fn is_approx_zero(x: f64, eps: f64) -> bool {
    x < eps && x > -eps
}

/// Igualdade aproximada componente a componente
#[inline]
pub fn approx_eq_complex(a: Complex, b: Complex, eps: f64) -> bool {
    is_approx_zero(a.re - b.re, eps) && is_approx_zero(a.im - b.im, eps)
}

/// Vetor de amplitudes de comprimento 2^k
#[derive(Debug, Clone, PartialEq)]
pub struct AmplitudeVector {
    data: Vec<Complex>,
    log_size: usize,
}

impl AmplitudeVector {
    /// Estado base |00…0⟩ de `log_size` bits
    pub fn zero_state(log_size: usize) -> QuantumResult<Self> {
        Self::basis_state(log_size, 0)
    }

    /// Estado base |index⟩ de `log_size` bits
    pub fn basis_state(log_size: usize, index: usize) -> QuantumResult<Self> {
        if log_size < 1 || log_size > MAX_LOG_SIZE {
            return Err(QuantumError::InvalidLogSize { log_size, targets: 0 });
        }
        let len = 1usize << log_size;
        if index >= len {
            return Err(QuantumError::IndexOutOfRange { index, bound: len });
        }
        let mut data = vec![Complex::new(0.0, 0.0); len];
        data[index] = Complex::new(1.0, 0.0);
        Ok(Self { data, log_size })
    }

    /// Cria a partir de amplitudes; o comprimento deve ser potência de dois ≥ 2
    pub fn from_vec(data: Vec<Complex>) -> QuantumResult<Self> {
        let len = data.len();
        if len < 2 || !len.is_power_of_two() {
            return Err(QuantumError::NotPowerOfTwo(len));
        }
        Ok(Self {
            data,
            log_size: len.trailing_zeros() as usize,
        })
    }

    /// Atalho para amplitudes puramente reais
    pub fn from_reals(reals: &[f64]) -> QuantumResult<Self> {
        Self::from_vec(reals.iter().map(|&re| Complex::new(re, 0.0)).collect())
    }

    /// Vetor nulo; só para buffers internos, viola a normalização
    pub(crate) fn zeros(log_size: usize) -> Self {
        Self {
            data: vec![Complex::new(0.0, 0.0); 1 << log_size],
            log_size,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Sempre falso: o menor vetor tem duas entradas
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Número de bits k (comprimento 2^k)
    #[inline]
    pub fn log_size(&self) -> usize {
        self.log_size
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Complex> {
        self.data.get(index).copied()
    }

    pub fn set(&mut self, index: usize, value: Complex) -> QuantumResult<()> {
        let bound = self.data.len();
        let slot = self
            .data
            .get_mut(index)
            .ok_or(QuantumError::IndexOutOfRange { index, bound })?;
        *slot = value;
        Ok(())
    }

    #[inline]
    pub fn as_slice(&self) -> &[Complex] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Complex] {
        &mut self.data
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Complex> {
        self.data.iter()
    }

    pub fn into_inner(self) -> Vec<Complex> {
        self.data
    }

    /// Soma de |amplitude|²
    pub fn norm_sqr_sum(&self) -> f64 {
        self.data.iter().map(|c| c.norm_sqr()).sum()
    }

    pub fn is_normalized(&self, eps: f64) -> bool {
        is_approx_zero(self.norm_sqr_sum() - 1.0, eps)
    }

    /// Falha com `NormalizationViolated` se a soma dos quadrados não for ≈1
    pub fn check_normalized(&self, eps: f64) -> QuantumResult<()> {
        let norm = self.norm_sqr_sum();
        if is_approx_zero(norm - 1.0, eps) {
            Ok(())
        } else {
            Err(QuantumError::NormalizationViolated { norm })
        }
    }

    /// Igualdade aproximada entrada a entrada; comprimentos diferentes nunca são iguais
    pub fn approx_eq(&self, other: &AmplitudeVector, eps: f64) -> bool {
        self.len() == other.len()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(&a, &b)| approx_eq_complex(a, b, eps))
    }

    /// Lê as amplitudes nos endereços `indices`, na ordem dada
    ///
    /// `indices` vem de [`translate_indices`](crate::translate::translate_indices)
    /// sobre este vetor, portanto todos os endereços são válidos.
    pub fn gather(&self, indices: &[usize]) -> Vec<Complex> {
        indices.iter().map(|&i| self.data[i]).collect()
    }

    /// Escreve `values[j]` no endereço `indices[j]`
    pub fn scatter(&mut self, indices: &[usize], values: &[Complex]) {
        for (&i, &v) in indices.iter().zip(values) {
            self.data[i] = v;
        }
    }

    /// Multiplica `values[j]` na entrada `indices[j]`
    pub fn multiply_in(&mut self, indices: &[usize], values: &[Complex]) {
        for (&i, &v) in indices.iter().zip(values) {
            self.data[i] *= v;
        }
    }

    /// Vetor de 2^`log_size` entradas iguais a um, base do produto tensorial
    pub fn ones(log_size: usize) -> QuantumResult<Self> {
        if log_size < 1 || log_size > MAX_LOG_SIZE {
            return Err(QuantumError::InvalidLogSize { log_size, targets: 0 });
        }
        let mut v = Self::zeros(log_size);
        v.data.iter_mut().for_each(|c| *c = Complex::new(1.0, 0.0));
        Ok(v)
    }
}

impl Index<usize> for AmplitudeVector {
    type Output = Complex;

    fn index(&self, index: usize) -> &Complex {
        &self.data[index]
    }
}

impl<'a> IntoIterator for &'a AmplitudeVector {
    type Item = &'a Complex;
    type IntoIter = std::slice::Iter<'a, Complex>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl TryFrom<Vec<Complex>> for AmplitudeVector {
    type Error = QuantumError;

    fn try_from(data: Vec<Complex>) -> QuantumResult<Self> {
        Self::from_vec(data)
    }
}

/// Formata um real com até três casas, alinhado em `width` colunas
fn format_component(x: f64, width: usize) -> String {
    let mut s = format!("{:.3}", x);
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s = "0".to_string();
    }
    if !s.starts_with('-') {
        s.insert(0, ' ');
    }
    format!("{:<width$}", s, width = width)
}

/// `{ |00>=( 1     , 0     i), |01>=( 0     , 0     i), ... }`, quatro entradas por linha
impl fmt::Display for AmplitudeVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ ")?;
        let last = self.data.len() - 1;
        for (i, c) in self.data.iter().enumerate() {
            write!(
                f,
                "|{:0width$b}>=({},{}i)",
                i,
                format_component(c.re, 6),
                format_component(c.im, 6),
                width = self.log_size
            )?;
            if i == last {
                write!(f, " }}")?;
            } else if i % 4 == 3 {
                write!(f, "\n   ")?;
            } else {
                write!(f, ", ")?;
            }
        }
        Ok(())
    }
}
