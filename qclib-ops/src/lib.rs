//! # 🔀 qclib-ops — Operadores Quânticos
//!
//! Operadores de aridade fixa sobre vetores de amplitudes: portas canônicas,
//! operadores por matriz ou por closure, e os combinadores que os compõem
//! (`before`), estendem a espaços maiores (`extend`) e permutam bits
//! (`permute`).
//!
//! ## Computational Complexity
//!
//! **apply_to — O(2^L · 2^m):**
//! - L = log-size do container, m = aridade do operador
//! - Portas embutidas usam caminho direto O(2^L)
//!
//! **before (matricial) — O(8^m):** multiplicação feita uma vez na composição.
//!
//! ## Arquitetura
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Op (Arc<dyn Operator>)                     │
//! │   ├─ portas embutidas (Z, X, H, CNOT, ...)  │
//! │   ├─ MatrixOperator   (matriz explícita)    │
//! │   ├─ FnOperator       (oráculos)            │
//! │   ├─ Sequence         (before)              │
//! │   └─ Extended         (extend / permute)    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Exemplo
//!
//! ```
//! use qclib_core::AmplitudeVector;
//! use qclib_ops::{Cnot, Op};
//!
//! let cnot: Op = Cnot.into();
//! let v = AmplitudeVector::from_reals(&[0.0, 1.0, 2.0, 3.0]).unwrap();
//! let out = cnot.apply(&v).unwrap();
//! assert_eq!(out, AmplitudeVector::from_reals(&[0.0, 1.0, 3.0, 2.0]).unwrap());
//! ```

pub mod combo;
pub mod gates;
pub mod matrix;
pub mod operator;

pub use combo::{function_oracle, phase_oracle, toffoli};
pub use gates::{CPhase, Cnot, Cv, Cz, H, Phase, V, X, Y, Z};
pub use matrix::Matrix;
pub use operator::{FnOperator, MatrixOperator, Op, Operator, combine_independent};
