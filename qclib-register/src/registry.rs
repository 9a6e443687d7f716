//! Registro de containers
//!
//! Arena indexada por [`ContainerHandle`]; handles nunca são reutilizados.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::container::QubitContainer;

/// Identificador estável de um container
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ContainerHandle(u64);

impl ContainerHandle {
    #[inline]
    pub fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ContainerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Containers vivos de um registrador
#[derive(Debug, Clone, Default)]
pub struct ContainerRegistry {
    /// Containers ativos
    containers: BTreeMap<ContainerHandle, QubitContainer>,
    /// Contador de IDs
    next_id: u64,
}

impl ContainerRegistry {
    /// Cria registro vazio
    pub fn new() -> Self {
        Self::default()
    }

    /// Adiciona container, retornando seu handle
    pub fn insert(&mut self, container: QubitContainer) -> ContainerHandle {
        let handle = ContainerHandle(self.next_id);
        self.next_id += 1;
        self.containers.insert(handle, container);
        handle
    }

    /// Remove container
    pub fn remove(&mut self, handle: ContainerHandle) -> Option<QubitContainer> {
        self.containers.remove(&handle)
    }

    pub fn get(&self, handle: ContainerHandle) -> Option<&QubitContainer> {
        self.containers.get(&handle)
    }

    pub fn get_mut(&mut self, handle: ContainerHandle) -> Option<&mut QubitContainer> {
        self.containers.get_mut(&handle)
    }

    /// Verifica se container existe
    pub fn contains(&self, handle: ContainerHandle) -> bool {
        self.containers.contains_key(&handle)
    }

    /// Número de containers ativos
    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    /// Handles em ordem de criação
    pub fn handles(&self) -> Vec<ContainerHandle> {
        self.containers.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ContainerHandle, &QubitContainer)> {
        self.containers.iter().map(|(&h, c)| (h, c))
    }
}
