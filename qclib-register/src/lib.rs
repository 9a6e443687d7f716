//! # 🧮 qclib-register — Registrador de Qubits
//!
//! Containers densos de qubits acoplados e o registrador que os gerencia:
//! acoplamento por produto tensorial, leitura e escrita de amplitudes em
//! ordem arbitrária de qubits, aplicação de operadores, medição com
//! colapso e desacoplamento do qubit medido.
//!
//! ## Computational Complexity
//!
//! **couple — O(2^n):**
//! - n = soma dos tamanhos dos containers envolvidos
//! - Limitado por `QuantumConfig::max_container_qubits`
//!
//! **measure — O(2^k):** k = tamanho do container do qubit medido.
//!
//! ## Arquitetura
//!
//! ```text
//! ┌───────────────────────────────────────────────────┐
//! │                 QubitRegister<R>                  │
//! │  slots: qubit → (handle, posição)                 │
//! │  members: handle → [qubits]                       │
//! │  ┌─────────────────────────────────────────────┐  │
//! │  │  ContainerRegistry (arena)                  │  │
//! │  │    handle → QubitContainer (2^k amplitudes) │  │
//! │  └─────────────────────────────────────────────┘  │
//! │  rng: R  (única fonte de aleatoriedade)           │
//! └───────────────────────────────────────────────────┘
//! ```
//!
//! ## Exemplo
//!
//! ```
//! use qclib_core::QuantumConfig;
//! use qclib_ops::{Cnot, H, Op};
//! use qclib_register::QubitRegister;
//!
//! let mut qr = QubitRegister::with_config(2, QuantumConfig::default().with_seed(42)).unwrap();
//! qr.do_op(&Op::from(H), &[1]).unwrap();
//! qr.do_op(&Op::from(Cnot), &[0, 1]).unwrap();
//! assert!(qr.are_coupled(0, 1).unwrap());
//!
//! // par de Bell: os dois qubits sempre concordam
//! let first = qr.measure(0).unwrap();
//! assert_eq!(qr.measure(1).unwrap(), first);
//! ```

pub mod container;
pub mod error;
pub mod measurement;
pub mod register;
pub mod registry;

pub use container::QubitContainer;
pub use error::{RegisterError, RegisterResult};
pub use measurement::{check_probabilities, collapse, marginal_probabilities, sample};
pub use register::QubitRegister;
pub use registry::{ContainerHandle, ContainerRegistry};

#[cfg(test)]
mod tests;
