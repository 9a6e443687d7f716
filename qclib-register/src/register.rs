//! # Registrador de qubits
//!
//! N qubits lógicos distribuídos entre containers. Cada qubit vive em
//! exatamente um container, numa posição local. Operações sobre qubits de
//! containers diferentes acoplam esses containers (produto tensorial); a
//! medição desacopla o qubit medido.
//!
//! ```text
//! slots[q] = (container, posição)      members[container] = [q₀, q₁, …]
//!            ───────────────┬──────────────────────┘
//!                 slots[members[c][p]] == (c, p)
//! ```

use std::collections::BTreeMap;
use std::fmt;

use qclib_core::{AmplitudeVector, Complex, QuantumConfig, QuantumError, permutation_indices, translate_indices};
use qclib_ops::Op;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::container::QubitContainer;
use crate::error::{RegisterError, RegisterResult};
use crate::registry::{ContainerHandle, ContainerRegistry};

/// Localização de um qubit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    container: ContainerHandle,
    position: usize,
}

/// Registrador de qubits com acoplamento sob demanda
///
/// O gerador `R` é a única fonte de aleatoriedade (medição).
#[derive(Debug, Clone)]
pub struct QubitRegister<R: Rng = StdRng> {
    config: QuantumConfig,
    registry: ContainerRegistry,
    /// Índice = qubit
    slots: Vec<Slot>,
    /// Qubits de cada container, em ordem de posição local
    members: BTreeMap<ContainerHandle, Vec<usize>>,
    rng: R,
}

impl QubitRegister<StdRng> {
    /// Registrador de `num_qubits` qubits em |0⟩, configuração padrão
    pub fn new(num_qubits: usize) -> RegisterResult<Self> {
        Self::with_config(num_qubits, QuantumConfig::default())
    }

    /// Semente de `config.seed`, ou entropia do sistema
    pub fn with_config(num_qubits: usize, config: QuantumConfig) -> RegisterResult<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(num_qubits, config, rng)
    }
}

impl<R: Rng> QubitRegister<R> {
    /// Registrador com gerador explícito
    ///
    /// Cada qubit começa em |0⟩ no seu próprio container de tamanho 1.
    pub fn with_rng(num_qubits: usize, config: QuantumConfig, rng: R) -> RegisterResult<Self> {
        if num_qubits == 0 {
            return Err(RegisterError::InvalidQubitCount(0));
        }

        let mut registry = ContainerRegistry::new();
        let mut slots = Vec::with_capacity(num_qubits);
        let mut members = BTreeMap::new();
        for qubit in 0..num_qubits {
            let container = registry.insert(QubitContainer::new(1)?);
            slots.push(Slot { container, position: 0 });
            members.insert(container, vec![qubit]);
        }

        debug!(num_qubits, "created qubit register");
        Ok(Self {
            config,
            registry,
            slots,
            members,
            rng,
        })
    }

    // ═══════════════════════════════════════════════════════════════
    // Introspecção
    // ═══════════════════════════════════════════════════════════════

    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.slots.len()
    }

    /// Número de containers vivos
    pub fn container_count(&self) -> usize {
        self.registry.len()
    }

    pub fn config(&self) -> &QuantumConfig {
        &self.config
    }

    /// Qubits no container de `qubit`, em ordem de posição local
    pub fn coresident(&self, qubit: usize) -> RegisterResult<Vec<usize>> {
        self.check_qubits(&[qubit])?;
        Ok(self.members_of(self.slots[qubit].container)?.to_vec())
    }

    /// Verifica se os dois qubits compartilham container
    pub fn are_coupled(&self, a: usize, b: usize) -> RegisterResult<bool> {
        self.check_qubit(a)?;
        self.check_qubit(b)?;
        Ok(self.slots[a].container == self.slots[b].container)
    }

    /// Verifica a consistência dos mapas qubit ↔ container
    pub fn check_invariants(&self) -> RegisterResult<()> {
        if self.members.len() != self.registry.len() {
            return Err(RegisterError::InvariantViolated(format!(
                "{} member lists for {} containers",
                self.members.len(),
                self.registry.len()
            )));
        }

        let mut seen = vec![false; self.num_qubits()];
        for (&handle, qubits) in &self.members {
            let container = self.container(handle)?;
            if container.size() != qubits.len() {
                return Err(RegisterError::InvariantViolated(format!(
                    "container {handle} has {} bits but {} qubits",
                    container.size(),
                    qubits.len()
                )));
            }
            if container.as_amplitudes().len() != 1 << qubits.len() {
                return Err(RegisterError::InvariantViolated(format!(
                    "container {handle} vector length {}",
                    container.as_amplitudes().len()
                )));
            }
            for (position, &qubit) in qubits.iter().enumerate() {
                if qubit >= seen.len() || seen[qubit] {
                    return Err(RegisterError::InvariantViolated(format!(
                        "qubit {qubit} listed twice or out of range"
                    )));
                }
                seen[qubit] = true;
                if self.slots[qubit] != (Slot { container: handle, position }) {
                    return Err(RegisterError::InvariantViolated(format!(
                        "qubit {qubit} slot disagrees with container {handle}"
                    )));
                }
            }
        }

        if let Some(missing) = seen.iter().position(|&s| !s) {
            return Err(RegisterError::InvariantViolated(format!(
                "qubit {missing} belongs to no container"
            )));
        }
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════
    // Acoplamento
    // ═══════════════════════════════════════════════════════════════

    /// Junta os containers de `qubits` num único container
    ///
    /// Containers entram em ordem de primeira aparição em `qubits`, cada um
    /// trazendo todos os seus qubits na ordem local. Sem efeito se todos já
    /// compartilham container.
    pub fn couple(&mut self, qubits: &[usize]) -> RegisterResult<()> {
        self.check_qubits(qubits)?;
        let handles = self.containers_of(qubits);
        if handles.len() == 1 {
            return Ok(());
        }

        let total: usize = handles
            .iter()
            .map(|&h| self.members_of(h).map(<[usize]>::len))
            .sum::<RegisterResult<usize>>()?;
        self.check_size(total)?;

        let (product, order) = self.tensor_product(&handles)?;

        for handle in &handles {
            self.registry.remove(*handle);
            self.members.remove(handle);
        }
        let handle = self.registry.insert(QubitContainer::from_amplitudes(product));
        for (position, &qubit) in order.iter().enumerate() {
            self.slots[qubit] = Slot { container: handle, position };
        }
        debug!(container = %handle, qubits = ?order, merged = handles.len(), "coupled containers");
        self.members.insert(handle, order);
        Ok(())
    }

    /// Produto tensorial de containers, sem alterar o registrador
    ///
    /// Retorna o vetor e a lista de qubits por posição local.
    fn tensor_product(&self, handles: &[ContainerHandle]) -> RegisterResult<(AmplitudeVector, Vec<usize>)> {
        let mut order = Vec::new();
        for &handle in handles {
            order.extend_from_slice(self.members_of(handle)?);
        }

        let mut product = AmplitudeVector::ones(order.len())?;
        let mut offset = 0;
        for &handle in handles {
            let container = self.container(handle)?;
            let positions: Vec<usize> = (offset..offset + container.size()).collect();
            for indices in translate_indices(order.len(), &positions)? {
                product.multiply_in(&indices, container.as_amplitudes().as_slice());
            }
            offset += container.size();
        }
        Ok((product, order))
    }

    // ═══════════════════════════════════════════════════════════════
    // Amplitudes
    // ═══════════════════════════════════════════════════════════════

    /// Amplitudes de `qubits`, com o bit `i` do resultado sendo `qubits[i]`
    ///
    /// Os containers tocados não podem conter qubits fora de `qubits`.
    /// Containers distintos são combinados num produto temporário; o
    /// registrador não muda.
    pub fn get_amps(&self, qubits: &[usize]) -> RegisterResult<AmplitudeVector> {
        self.check_qubits(qubits)?;
        self.check_size(qubits.len())?;
        let handles = self.containers_of(qubits);
        self.check_coresidency(&handles, qubits)?;

        let (amps, order) = match handles.as_slice() {
            [single] => (self.container(*single)?.amplitudes(), self.members_of(*single)?.to_vec()),
            _ => self.tensor_product(&handles)?,
        };

        let targets = local_positions(&order, qubits)?;
        let indices = permutation_indices(qubits.len(), &targets)?;
        Ok(AmplitudeVector::from_vec(amps.gather(&indices))?)
    }

    /// Define as amplitudes de `qubits`; `amps[j]` tem `qubits[i]` = bit `i` de `j`
    ///
    /// Valida comprimento (e normalização, se configurado) antes de acoplar.
    pub fn set_amps(&mut self, amps: &AmplitudeVector, qubits: &[usize]) -> RegisterResult<()> {
        self.check_qubits(qubits)?;
        self.check_size(qubits.len())?;
        let expected = 1usize << qubits.len();
        if amps.len() != expected {
            return Err(QuantumError::DimensionMismatch {
                expected,
                actual: amps.len(),
            }
            .into());
        }
        if self.config.validate_normalization {
            amps.check_normalized(self.config.epsilon)?;
        }
        let handles = self.containers_of(qubits);
        self.check_coresidency(&handles, qubits)?;

        self.couple(qubits)?;

        let handle = self.slots[qubits[0]].container;
        let targets = local_positions(self.members_of(handle)?, qubits)?;
        let indices = permutation_indices(qubits.len(), &targets)?;

        let mut data = vec![Complex::new(0.0, 0.0); expected];
        for (&index, &value) in indices.iter().zip(amps.iter()) {
            data[index] = value;
        }
        self.container_mut(handle)?
            .set_amplitudes(AmplitudeVector::from_vec(data)?)
    }

    // ═══════════════════════════════════════════════════════════════
    // Operadores
    // ═══════════════════════════════════════════════════════════════

    /// Aplica `op` a `qubits`; o bit `i` do operador atua sobre `qubits[i]`
    ///
    /// Acopla os containers envolvidos (com todos os seus qubits) antes.
    pub fn do_op(&mut self, op: &Op, qubits: &[usize]) -> RegisterResult<()> {
        self.check_qubits(qubits)?;
        if op.arity() != qubits.len() {
            return Err(QuantumError::TargetCountMismatch {
                arity: op.arity(),
                targets: qubits.len(),
            }
            .into());
        }

        self.couple(qubits)?;

        let handle = self.slots[qubits[0]].container;
        let targets: Vec<usize> = qubits.iter().map(|&q| self.slots[q].position).collect();
        self.container_mut(handle)?.apply_operator(op, &targets)
    }

    // ═══════════════════════════════════════════════════════════════
    // Medição
    // ═══════════════════════════════════════════════════════════════

    /// Mede `qubit` (`true` = |1⟩), colapsando o estado
    ///
    /// Em containers maiores que 1, o qubit medido vai para um container
    /// próprio no estado da base medido e os demais ficam num container novo.
    pub fn measure(&mut self, qubit: usize) -> RegisterResult<bool> {
        self.check_qubit(qubit)?;
        let Slot { container: handle, position } = self.slots[qubit];
        let eps = self.config.epsilon;

        let container = self
            .registry
            .get_mut(handle)
            .ok_or(RegisterError::MissingContainer(handle.id()))?;
        let outcome = container.measure(position, &mut self.rng, eps)?;
        if container.size() == 1 {
            debug!(qubit, outcome, "measured qubit");
            return Ok(outcome);
        }

        let survivors = container.split_off(position, outcome)?;
        let measured = QubitContainer::basis_qubit(outcome)?;
        let members = self
            .members
            .remove(&handle)
            .ok_or(RegisterError::MissingContainer(handle.id()))?;
        self.registry.remove(handle);

        let remaining: Vec<usize> = members.into_iter().filter(|&q| q != qubit).collect();
        let rest = self.registry.insert(QubitContainer::from_amplitudes(survivors));
        for (position, &q) in remaining.iter().enumerate() {
            self.slots[q] = Slot { container: rest, position };
        }

        let single = self.registry.insert(measured);
        self.slots[qubit] = Slot { container: single, position: 0 };
        self.members.insert(single, vec![qubit]);

        debug!(qubit, outcome, remaining = ?remaining, "measured and decoupled qubit");
        self.members.insert(rest, remaining);
        Ok(outcome)
    }

    /// Mede os qubits em ordem, colapsando após cada medição
    ///
    /// Todos os índices são validados antes da primeira medição.
    pub fn measure_many(&mut self, qubits: &[usize]) -> RegisterResult<Vec<bool>> {
        for &qubit in qubits {
            self.check_qubit(qubit)?;
        }
        qubits.iter().map(|&q| self.measure(q)).collect()
    }

    // ═══════════════════════════════════════════════════════════════
    // Reordenação e impressão
    // ═══════════════════════════════════════════════════════════════

    /// Põe `qubits` nas posições mais baixas do(s) seu(s) container(s), na
    /// ordem dada; os demais qubits seguem na ordem anterior
    pub fn reorder(&mut self, qubits: &[usize]) -> RegisterResult<()> {
        self.check_qubits(qubits)?;
        for handle in self.containers_of(qubits) {
            let current = self.members_of(handle)?;
            let mut wanted: Vec<usize> = qubits
                .iter()
                .copied()
                .filter(|&q| self.slots[q].container == handle)
                .collect();
            wanted.extend(current.iter().copied().filter(|q| !qubits.contains(q)));

            let new_order: Vec<usize> = wanted.iter().map(|&q| self.slots[q].position).collect();
            self.container_mut(handle)?.reorder_bits(&new_order)?;
            for (position, &q) in wanted.iter().enumerate() {
                self.slots[q] = Slot { container: handle, position };
            }
            self.members.insert(handle, wanted);
        }
        Ok(())
    }

    /// Reordena e imprime `{q₀,q₁,…}:` seguido da tabela de cada container
    pub fn print_bits(&mut self, qubits: &[usize]) -> RegisterResult<String> {
        self.reorder(qubits)?;
        let mut out = String::new();
        for handle in self.containers_of(qubits) {
            let labels: Vec<String> = self.members_of(handle)?.iter().map(usize::to_string).collect();
            out.push_str(&format!("{{{}}}:\n {}\n", labels.join(","), self.container(handle)?));
        }
        Ok(out)
    }

    // ═══════════════════════════════════════════════════════════════
    // Auxiliares
    // ═══════════════════════════════════════════════════════════════

    fn check_qubit(&self, qubit: usize) -> RegisterResult<()> {
        if qubit >= self.num_qubits() {
            return Err(QuantumError::IndexOutOfRange {
                index: qubit,
                bound: self.num_qubits(),
            }
            .into());
        }
        Ok(())
    }

    /// Limite de qubits num único container
    fn check_size(&self, requested: usize) -> RegisterResult<()> {
        if requested > self.config.max_container_qubits {
            return Err(RegisterError::TooManyQubits {
                requested,
                max: self.config.max_container_qubits,
            });
        }
        Ok(())
    }

    /// Lista não vazia, sem repetições, dentro do registrador
    fn check_qubits(&self, qubits: &[usize]) -> RegisterResult<()> {
        if qubits.is_empty() {
            return Err(RegisterError::EmptyQubitList);
        }
        let mut seen = vec![false; self.num_qubits()];
        for &qubit in qubits {
            self.check_qubit(qubit)?;
            if seen[qubit] {
                return Err(QuantumError::DuplicateBit(qubit).into());
            }
            seen[qubit] = true;
        }
        Ok(())
    }

    /// Containers de `qubits`, em ordem de primeira aparição
    fn containers_of(&self, qubits: &[usize]) -> Vec<ContainerHandle> {
        let mut handles = Vec::new();
        for &qubit in qubits {
            let handle = self.slots[qubit].container;
            if !handles.contains(&handle) {
                handles.push(handle);
            }
        }
        handles
    }

    fn check_coresidency(&self, handles: &[ContainerHandle], qubits: &[usize]) -> RegisterResult<()> {
        for &handle in handles {
            if let Some(&qubit) = self.members_of(handle)?.iter().find(|q| !qubits.contains(q)) {
                return Err(RegisterError::UnsupportedCoresidency {
                    qubit,
                    requested: qubits.to_vec(),
                });
            }
        }
        Ok(())
    }

    fn members_of(&self, handle: ContainerHandle) -> RegisterResult<&[usize]> {
        self.members
            .get(&handle)
            .map(Vec::as_slice)
            .ok_or(RegisterError::MissingContainer(handle.id()))
    }

    fn container(&self, handle: ContainerHandle) -> RegisterResult<&QubitContainer> {
        self.registry
            .get(handle)
            .ok_or(RegisterError::MissingContainer(handle.id()))
    }

    fn container_mut(&mut self, handle: ContainerHandle) -> RegisterResult<&mut QubitContainer> {
        self.registry
            .get_mut(handle)
            .ok_or(RegisterError::MissingContainer(handle.id()))
    }
}

/// Posição em `order` de cada qubit de `qubits`
fn local_positions(order: &[usize], qubits: &[usize]) -> RegisterResult<Vec<usize>> {
    qubits
        .iter()
        .map(|&q| {
            order.iter().position(|&o| o == q).ok_or(RegisterError::UnsupportedCoresidency {
                qubit: q,
                requested: order.to_vec(),
            })
        })
        .collect()
}

impl<R: Rng> fmt::Display for QubitRegister<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "QubitRegister (qubits={}, containers={})",
            self.num_qubits(),
            self.container_count()
        )?;
        for (handle, container) in self.registry.iter() {
            let labels: Vec<String> = self
                .members
                .get(&handle)
                .map(|qs| qs.iter().map(usize::to_string).collect())
                .unwrap_or_default();
            writeln!(f, "\t{handle} -> {{{}}}: {container}", labels.join(","))?;
        }
        Ok(())
    }
}
