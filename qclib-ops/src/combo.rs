//! Operadores compostos e oráculos

use qclib_core::{Complex, MAX_LOG_SIZE, QuantumError, QuantumResult};

use crate::gates::{Cnot, Cv, H};
use crate::operator::Op;

/// Toffoli (CCNOT): controles nos bits 0 e 1, alvo no bit 2
///
/// Decomposição em H, CV e CNOT: `CV†` é obtido como três aplicações de CV.
/// O resultado troca apenas os índices 3 e 7.
pub fn toffoli() -> QuantumResult<Op> {
    let h2 = Op::from(H).extend(3, &[2])?;
    let cv12 = Op::from(Cv).extend(3, &[1, 2])?;
    let cv02 = Op::from(Cv).extend(3, &[0, 2])?;
    // alvo no bit 1, controle no bit 0
    let cnot01 = Op::from(Cnot).extend(3, &[1, 0])?;

    h2.before(&cv12)?
        .before(&cnot01)?
        .before(&cv12)?
        .before(&cv12)?
        .before(&cv12)?
        .before(&cnot01)?
        .before(&cv02)?
        .before(&h2)
}

/// Oráculo `|x, y⟩ → |x, y ⊕ f(x)⟩` com `y` no bit 0 e `x` nos bits 1..arity
pub fn function_oracle<F>(arity: usize, f: F) -> QuantumResult<Op>
where
    F: Fn(usize) -> bool + Send + Sync + 'static,
{
    if arity < 2 {
        return Err(QuantumError::InvalidArity(arity));
    }
    Op::from_fn(arity, "FunctionOracle", move |input| {
        let mut out = vec![Complex::new(0.0, 0.0); input.len()];
        for (index, &amp) in input.iter().enumerate() {
            let flip = usize::from(f(index >> 1));
            out[index ^ flip] += amp;
        }
        out
    })
}

/// Oráculo de fase: nega a amplitude do índice `marked`
pub fn phase_oracle(arity: usize, marked: usize) -> QuantumResult<Op> {
    if arity == 0 || arity > MAX_LOG_SIZE {
        return Err(QuantumError::InvalidArity(arity));
    }
    if marked >= 1 << arity {
        return Err(QuantumError::IndexOutOfRange {
            index: marked,
            bound: 1 << arity,
        });
    }
    Op::from_fn(arity, "PhaseOracle", move |input| {
        let mut out = input.to_vec();
        out[marked] = -out[marked];
        out
    })
}
