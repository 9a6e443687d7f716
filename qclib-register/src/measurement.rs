//! # Medição e colapso
//!
//! Funções livres sobre as amplitudes de um container. A única fonte de
//! não-determinismo é o `Rng` passado para [`sample`].

use qclib_core::{Complex, is_approx_zero};
use rand::Rng;

use crate::error::{RegisterError, RegisterResult};

/// Probabilidades marginais `(p0, p1)` do bit `bit`
///
/// `p0` soma |a|² sobre os endereços com o bit limpo e `p1` sobre os
/// endereços com o bit ligado; nenhum dos dois é derivado do outro.
pub fn marginal_probabilities(amps: &[Complex], bit: usize) -> (f64, f64) {
    let mask = 1usize << bit;
    amps.iter()
        .enumerate()
        .fold((0.0, 0.0), |(p0, p1), (index, amp)| {
            if index & mask == 0 {
                (p0 + amp.norm_sqr(), p1)
            } else {
                (p0, p1 + amp.norm_sqr())
            }
        })
}

/// Verifica `|p0 + p1 − 1| ≤ eps`
pub fn check_probabilities(p0: f64, p1: f64, eps: f64) -> RegisterResult<()> {
    if (p0 + p1 - 1.0).abs() > eps {
        return Err(RegisterError::ProbabilityMismatch { p0, p1 });
    }
    Ok(())
}

/// Sorteia o resultado: `true` (|1⟩) se `u > p0`, com `u ∈ [0, 1)`
pub fn sample<R: Rng>(rng: &mut R, p0: f64) -> bool {
    let u: f64 = rng.gen_range(0.0..1.0);
    u > p0
}

/// Colapsa as amplitudes no resultado `outcome` do bit `bit`
///
/// Se a probabilidade do resultado é ≈0 nada muda. Caso contrário as
/// amplitudes compatíveis são divididas por √prob e as demais zeradas.
pub fn collapse(amps: &mut [Complex], bit: usize, outcome: bool, prob: f64, eps: f64) {
    if is_approx_zero(prob, eps) {
        return;
    }
    let mask = 1usize << bit;
    let norm = prob.sqrt();
    for (index, amp) in amps.iter_mut().enumerate() {
        if (index & mask != 0) == outcome {
            *amp /= norm;
        } else {
            *amp = Complex::new(0.0, 0.0);
        }
    }
}
