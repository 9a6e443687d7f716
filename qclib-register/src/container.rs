//! # Container de qubits
//!
//! Guarda o vetor denso de 2^k amplitudes de k qubits acoplados. As posições
//! dos bits são locais ao container; o mapeamento para qubits do registrador
//! fica em [`crate::register`].

use std::fmt;

use qclib_core::{
    AmplitudeVector, Complex, QuantumError, complement_bits, is_approx_zero, permutation_indices,
    translate_indices,
};
use qclib_ops::Op;
use rand::Rng;

use crate::error::{RegisterError, RegisterResult};
use crate::measurement::{check_probabilities, collapse, marginal_probabilities, sample};

/// Vetor de amplitudes de `size` qubits
#[derive(Debug, Clone, PartialEq)]
pub struct QubitContainer {
    data: AmplitudeVector,
}

impl QubitContainer {
    /// Container de `size` qubits no estado |0…0⟩
    pub fn new(size: usize) -> RegisterResult<Self> {
        if size == 0 {
            return Err(RegisterError::InvalidQubitCount(0));
        }
        Ok(Self {
            data: AmplitudeVector::zero_state(size)?,
        })
    }

    /// Container de 1 qubit em |0⟩ ou |1⟩
    pub fn basis_qubit(outcome: bool) -> RegisterResult<Self> {
        Ok(Self {
            data: AmplitudeVector::basis_state(1, usize::from(outcome))?,
        })
    }

    pub fn from_amplitudes(data: AmplitudeVector) -> Self {
        Self { data }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.data.log_size()
    }

    /// Cópia das amplitudes
    pub fn amplitudes(&self) -> AmplitudeVector {
        self.data.clone()
    }

    #[inline]
    pub fn as_amplitudes(&self) -> &AmplitudeVector {
        &self.data
    }

    /// Substitui as amplitudes; o comprimento deve ser 2^size
    pub fn set_amplitudes(&mut self, data: AmplitudeVector) -> RegisterResult<()> {
        if data.len() != self.data.len() {
            return Err(QuantumError::DimensionMismatch {
                expected: self.data.len(),
                actual: data.len(),
            }
            .into());
        }
        self.data = data;
        Ok(())
    }

    /// Aplica `op` no lugar aos bits locais `target_bits`
    pub fn apply_operator(&mut self, op: &Op, target_bits: &[usize]) -> RegisterResult<()> {
        op.apply_to(&mut self.data, target_bits)?;
        Ok(())
    }

    /// Permuta os bits: o antigo bit `new_order[i]` passa a ser o bit `i`
    pub fn reorder_bits(&mut self, new_order: &[usize]) -> RegisterResult<()> {
        let indices = permutation_indices(self.size(), new_order)?;
        self.data = AmplitudeVector::from_vec(self.data.gather(&indices))?;
        Ok(())
    }

    /// Mede o bit local `bit`, colapsando o estado
    ///
    /// Retorna `true` para |1⟩.
    pub fn measure<R: Rng>(&mut self, bit: usize, rng: &mut R, eps: f64) -> RegisterResult<bool> {
        self.check_bit(bit)?;
        let (p0, p1) = marginal_probabilities(self.data.as_slice(), bit);
        check_probabilities(p0, p1, eps)?;

        // resíduo de arredondamento nunca é sorteado
        let outcome = if is_approx_zero(p1, eps) {
            false
        } else if is_approx_zero(p0, eps) {
            true
        } else {
            sample(rng, p0)
        };
        let prob = if outcome { p1 } else { p0 };
        collapse(self.data.as_mut_slice(), bit, outcome, prob, eps);

        tracing::debug!(bit, p0, p1, outcome, "measured container bit");
        Ok(outcome)
    }

    /// Sub-vetor dos bits restantes com o bit `bit` fixo em `outcome`
    ///
    /// Se a metade escolhida é toda nula, usa a outra. Os bits restantes
    /// mantêm sua ordem relativa.
    pub fn split_off(&self, bit: usize, outcome: bool) -> RegisterResult<AmplitudeVector> {
        self.check_bit(bit)?;
        if self.size() < 2 {
            return Err(QuantumError::InvalidLogSize {
                log_size: self.size(),
                targets: 1,
            }
            .into());
        }
        let survivors = complement_bits(self.size(), &[bit]);
        let groups = translate_indices(self.size(), &survivors)?;

        let chosen = self.data.gather(&groups[usize::from(outcome)]);
        let half = if chosen.iter().all(|c| *c == Complex::new(0.0, 0.0)) {
            self.data.gather(&groups[usize::from(!outcome)])
        } else {
            chosen
        };
        Ok(AmplitudeVector::from_vec(half)?)
    }

    fn check_bit(&self, bit: usize) -> RegisterResult<()> {
        if bit >= self.size() {
            return Err(QuantumError::IndexOutOfRange {
                index: bit,
                bound: self.size(),
            }
            .into());
        }
        Ok(())
    }
}

impl fmt::Display for QubitContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.data)
    }
}
