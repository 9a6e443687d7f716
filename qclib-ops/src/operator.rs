//! # Operadores
//!
//! Um operador de aridade `a` transforma vetores de 2^a amplitudes em vetores
//! do mesmo comprimento, sem modificar a entrada.
//!
//! [`Op`] é o handle compartilhado (`Arc`) sobre qualquer [`Operator`] e
//! carrega os combinadores: [`Op::before`] (sequência), [`Op::extend`]
//! (aplicação a bits de um espaço maior) e [`Op::permute`].

use std::fmt;
use std::sync::Arc;

use qclib_core::{
    AmplitudeVector, Complex, MAX_LOG_SIZE, QuantumError, QuantumResult, translate_indices,
    validate_target_bits,
};

use crate::matrix::Matrix;

/// Capacidade mínima de um operador
///
/// `transform` recebe exatamente 2^`arity()` amplitudes; a verificação da
/// entrada fica em [`Op::apply`] e a da saída em cada chamada via [`Op`].
pub trait Operator: Send + Sync + fmt::Debug {
    /// Número de qubits sobre os quais atua
    fn arity(&self) -> usize;

    /// Nome para debug/log
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Aplica o operador, retornando novo vetor
    fn transform(&self, input: &[Complex]) -> QuantumResult<Vec<Complex>>;

    /// Representação matricial explícita, se houver
    fn matrix(&self) -> Option<&Matrix> {
        None
    }

    /// Passos internos, para operadores que são sequências
    fn steps(&self) -> Option<&[Op]> {
        None
    }
}

/// Handle compartilhado sobre um operador
#[derive(Clone)]
pub struct Op {
    inner: Arc<dyn Operator>,
}

impl fmt::Debug for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.inner, f)
    }
}

impl Op {
    /// Envolve um operador; aridade em `1..=MAX_LOG_SIZE`
    pub fn new<O: Operator + 'static>(op: O) -> QuantumResult<Self> {
        check_arity(op.arity())?;
        Ok(Self { inner: Arc::new(op) })
    }

    /// Envolve uma porta embutida, cuja aridade é sempre ≥ 1
    pub(crate) fn builtin<O: Operator + 'static>(op: O) -> Self {
        Self { inner: Arc::new(op) }
    }

    /// Operador definido por matriz 2^arity × 2^arity
    pub fn matrix(arity: usize, matrix: Matrix) -> QuantumResult<Self> {
        Self::new(MatrixOperator::new(arity, matrix)?)
    }

    /// Operador definido por closure
    ///
    /// A closure recebe 2^arity amplitudes e deve devolver o mesmo número.
    pub fn from_fn<F>(arity: usize, name: impl Into<String>, f: F) -> QuantumResult<Self>
    where
        F: Fn(&[Complex]) -> Vec<Complex> + Send + Sync + 'static,
    {
        Self::new(FnOperator {
            arity,
            name: name.into(),
            f: Arc::new(f),
        })
    }

    /// Identidade de aridade `arity`
    pub fn identity(arity: usize) -> QuantumResult<Self> {
        check_arity(arity)?;
        Self::matrix(arity, Matrix::identity(1 << arity)?)
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.inner.arity()
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Matriz explícita, quando o operador é matricial
    pub fn as_matrix(&self) -> Option<&Matrix> {
        self.inner.matrix()
    }

    /// Aplica a um vetor de 2^arity amplitudes, retornando novo vetor
    pub fn apply(&self, input: &AmplitudeVector) -> QuantumResult<AmplitudeVector> {
        let expected = 1usize << self.arity();
        if input.len() != expected {
            return Err(QuantumError::DimensionMismatch {
                expected,
                actual: input.len(),
            });
        }
        let out = self.transform_checked(input.as_slice())?;
        AmplitudeVector::from_vec(out)
    }

    /// `transform` com verificação do comprimento de saída
    pub(crate) fn transform_checked(&self, input: &[Complex]) -> QuantumResult<Vec<Complex>> {
        let out = self.inner.transform(input)?;
        if out.len() != input.len() {
            return Err(QuantumError::DimensionMismatch {
                expected: input.len(),
                actual: out.len(),
            });
        }
        Ok(out)
    }

    /// Aplica o operador, no lugar, aos bits `target_bits` de `data`
    ///
    /// Para cada grupo da tradução de índices: lê o sub-vetor, aplica e
    /// escreve de volta antes de passar ao grupo seguinte.
    pub fn apply_to(&self, data: &mut AmplitudeVector, target_bits: &[usize]) -> QuantumResult<()> {
        if target_bits.len() != self.arity() {
            return Err(QuantumError::TargetCountMismatch {
                arity: self.arity(),
                targets: target_bits.len(),
            });
        }
        let groups = translate_indices(data.log_size(), target_bits)?;
        tracing::trace!(
            op = self.name(),
            groups = groups.len(),
            ?target_bits,
            "applying operator"
        );
        apply_groups(self, data, &groups)
    }

    /// Operador que aplica `self` e depois `other`
    ///
    /// Dois operadores matriciais são fundidos numa única matriz
    /// (`other · self`); caso contrário o resultado é uma sequência.
    pub fn before(&self, other: &Op) -> QuantumResult<Op> {
        if self.arity() != other.arity() {
            return Err(QuantumError::ArityMismatch {
                left: self.arity(),
                right: other.arity(),
            });
        }

        if let (Some(first), Some(second)) = (self.as_matrix(), other.as_matrix()) {
            return Op::matrix(self.arity(), second.mul(first)?);
        }

        let mut steps = Vec::new();
        for op in [self, other] {
            match op.inner.steps() {
                Some(inner) => steps.extend(inner.iter().cloned()),
                None => steps.push(op.clone()),
            }
        }
        Op::new(Sequence {
            arity: self.arity(),
            steps,
        })
    }

    /// Estende o operador a um espaço de `new_arity` bits
    ///
    /// O bit `i` do operador passa a atuar sobre o bit `target_bits[i]`; os
    /// demais bits do espaço estendido não são afetados.
    pub fn extend(&self, new_arity: usize, target_bits: &[usize]) -> QuantumResult<Op> {
        if target_bits.len() != self.arity() {
            return Err(QuantumError::TargetCountMismatch {
                arity: self.arity(),
                targets: target_bits.len(),
            });
        }
        validate_target_bits(new_arity, target_bits)?;
        let groups = translate_indices(new_arity, target_bits)?;
        Op::new(Extended {
            inner: self.clone(),
            arity: new_arity,
            groups,
        })
    }

    /// Mesmo operador com a ordem dos bits permutada
    ///
    /// `permute(&[1, 0])` de um CNOT (alvo 0, controle 1) dá alvo 1, controle 0.
    pub fn permute(&self, order: &[usize]) -> QuantumResult<Op> {
        self.extend(self.arity(), order)
    }

    /// Materializa a matriz aplicando o operador a cada vetor da base
    pub fn to_matrix(&self) -> QuantumResult<Matrix> {
        if let Some(m) = self.as_matrix() {
            return Ok(m.clone());
        }
        let dim = 1usize << self.arity();
        let mut data = vec![Complex::new(0.0, 0.0); dim * dim];
        let mut basis = vec![Complex::new(0.0, 0.0); dim];
        for col in 0..dim {
            basis[col] = Complex::new(1.0, 0.0);
            let column = self.transform_checked(&basis)?;
            for (row, value) in column.into_iter().enumerate() {
                data[row * dim + col] = value;
            }
            basis[col] = Complex::new(0.0, 0.0);
        }
        Matrix::new(dim, data)
    }

    /// Verifica unitariedade pela matriz materializada
    pub fn is_unitary(&self, eps: f64) -> bool {
        self.to_matrix().map(|m| m.is_unitary(eps)).unwrap_or(false)
    }
}

fn check_arity(arity: usize) -> QuantumResult<()> {
    if arity == 0 || arity > MAX_LOG_SIZE {
        return Err(QuantumError::InvalidArity(arity));
    }
    Ok(())
}

/// Get → transform → set para cada grupo, em sequência
fn apply_groups(op: &Op, data: &mut AmplitudeVector, groups: &[Vec<usize>]) -> QuantumResult<()> {
    for indices in groups {
        let part = data.gather(indices);
        let out = op.transform_checked(&part)?;
        data.scatter(indices, &out);
    }
    Ok(())
}

/// Operador definido por matriz explícita
#[derive(Debug, Clone)]
pub struct MatrixOperator {
    arity: usize,
    matrix: Matrix,
}

impl MatrixOperator {
    pub fn new(arity: usize, matrix: Matrix) -> QuantumResult<Self> {
        check_arity(arity)?;
        if matrix.dim() != 1 << arity {
            return Err(QuantumError::DimensionMismatch {
                expected: 1 << arity,
                actual: matrix.dim(),
            });
        }
        Ok(Self { arity, matrix })
    }
}

impl Operator for MatrixOperator {
    fn arity(&self) -> usize {
        self.arity
    }

    fn name(&self) -> &str {
        "Matrix"
    }

    fn transform(&self, input: &[Complex]) -> QuantumResult<Vec<Complex>> {
        Ok(self.matrix.apply(input))
    }

    fn matrix(&self) -> Option<&Matrix> {
        Some(&self.matrix)
    }
}

type TransformFn = dyn Fn(&[Complex]) -> Vec<Complex> + Send + Sync;

/// Operador definido por closure
pub struct FnOperator {
    arity: usize,
    name: String,
    f: Arc<TransformFn>,
}

impl fmt::Debug for FnOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnOperator")
            .field("arity", &self.arity)
            .field("name", &self.name)
            .finish()
    }
}

impl Operator for FnOperator {
    fn arity(&self) -> usize {
        self.arity
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn transform(&self, input: &[Complex]) -> QuantumResult<Vec<Complex>> {
        Ok((self.f)(input))
    }
}

/// Sequência de operadores de mesma aridade, aplicados em ordem
#[derive(Debug)]
struct Sequence {
    arity: usize,
    steps: Vec<Op>,
}

impl Operator for Sequence {
    fn arity(&self) -> usize {
        self.arity
    }

    fn name(&self) -> &str {
        "Sequence"
    }

    fn transform(&self, input: &[Complex]) -> QuantumResult<Vec<Complex>> {
        self.steps
            .iter()
            .try_fold(input.to_vec(), |acc, step| step.transform_checked(&acc))
    }

    fn steps(&self) -> Option<&[Op]> {
        Some(&self.steps)
    }
}

/// Operador estendido a um espaço maior, com grupos pré-calculados
#[derive(Debug)]
struct Extended {
    inner: Op,
    arity: usize,
    groups: Vec<Vec<usize>>,
}

impl Operator for Extended {
    fn arity(&self) -> usize {
        self.arity
    }

    fn name(&self) -> &str {
        "Extended"
    }

    fn transform(&self, input: &[Complex]) -> QuantumResult<Vec<Complex>> {
        let mut out = input.to_vec();
        for indices in &self.groups {
            let part: Vec<Complex> = indices.iter().map(|&i| out[i]).collect();
            let result = self.inner.transform_checked(&part)?;
            for (&i, v) in indices.iter().zip(result) {
                out[i] = v;
            }
        }
        Ok(out)
    }
}

/// Combina operadores sobre conjuntos de bits disjuntos num operador de
/// aridade `log_k`; bits não citados ficam com a identidade
pub fn combine_independent(log_k: usize, parts: &[(Op, Vec<usize>)]) -> QuantumResult<Op> {
    if parts.is_empty() {
        return Err(QuantumError::InvalidArity(0));
    }
    let all_bits: Vec<usize> = parts.iter().flat_map(|(_, bits)| bits.iter().copied()).collect();
    validate_target_bits(log_k, &all_bits)?;

    let mut combined: Option<Op> = None;
    for (op, bits) in parts {
        let extended = op.extend(log_k, bits)?;
        combined = Some(match combined {
            None => extended,
            Some(acc) => acc.before(&extended)?,
        });
    }
    combined.ok_or(QuantumError::InvalidArity(0))
}
