//! # ⚛️ qclib-core — Amplitudes e Tradução de Índices
//!
//! Núcleo do simulador clássico de registradores quânticos: vetores densos de
//! amplitudes complexas, a tradução de índices de bits que endereça
//! sub-vetores por subconjuntos ordenados de bits, e a taxonomia de erros
//! compartilhada pelos demais crates.
//!
//! ## Computational Complexity
//!
//! **Translation — O(2^L):**
//! - L = log-size do vetor de origem
//! - Saída total de 2^L endereços, aritmética inteira exata
//!
//! **Normalization check — O(2^k):**
//! - Soma de |amplitude|² sobre o vetor inteiro
//!
//! **Scalability:** exact dense simulation, O(2^n) memory by design.
//! Containers above ~26 qubits exceed typical RAM.
//!
//! ## Arquitetura
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │          AmplitudeVector (2^k Complex64)        │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  translate_indices(L, target_bits)        │  │
//! │  │    → 2^(L−m) grupos de 2^m endereços      │  │
//! │  └───────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  gather / scatter / multiply_in           │  │
//! │  └───────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! ## Exemplo
//!
//! ```
//! use qclib_core::{AmplitudeVector, translate_indices};
//!
//! let v = AmplitudeVector::from_reals(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]).unwrap();
//! let groups = translate_indices(3, &[2, 0]).unwrap();
//! assert_eq!(groups.len(), 2);
//! assert_eq!(v.gather(&groups[0]).len(), 4);
//! ```

pub mod amplitude;
pub mod config;
pub mod error;
pub mod translate;

pub use amplitude::{AmplitudeVector, Complex, EPSILON, approx_eq_complex, is_approx_zero};
pub use config::QuantumConfig;
pub use error::{QuantumError, QuantumResult};
pub use translate::{
    MAX_LOG_SIZE, complement_bits, free_bit_mask, permutation_indices, translate_indices,
    validate_target_bits,
};
