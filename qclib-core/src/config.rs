//! Configuração do simulador
//!
//! Valores padrão podem ser sobrescritos por variáveis de ambiente ou por um
//! arquivo `.env` carregado na primeira leitura.

use std::env;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::amplitude::EPSILON;

// Carrega .env uma única vez
static DOTENV_INIT: Lazy<()> = Lazy::new(|| {
    let _ = dotenv::dotenv();
});

#[inline]
fn ensure_loaded() {
    let _ = &*DOTENV_INIT;
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    ensure_loaded();
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Configuração de um registrador
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantumConfig {
    /// Tolerância para comparações de ponto flutuante
    pub epsilon: f64,
    /// Verifica normalização das amplitudes fornecidas pelo chamador
    pub validate_normalization: bool,
    /// Tamanho máximo (em qubits) de um container após acoplamento
    pub max_container_qubits: usize,
    /// Semente da fonte aleatória de medição (None = entropia do sistema)
    pub seed: Option<u64>,
}

impl Default for QuantumConfig {
    fn default() -> Self {
        Self {
            epsilon: EPSILON,
            validate_normalization: true,
            max_container_qubits: 24,
            seed: None,
        }
    }
}

impl QuantumConfig {
    /// Lê `QCLIB_EPSILON`, `QCLIB_VALIDATE_NORMALIZATION`,
    /// `QCLIB_MAX_CONTAINER_QUBITS` e `QCLIB_SEED`
    ///
    /// Valores ausentes ou inválidos mantêm o padrão.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            epsilon: env_parse("QCLIB_EPSILON")
                .filter(|e: &f64| *e > 0.0)
                .unwrap_or(defaults.epsilon),
            validate_normalization: env_parse("QCLIB_VALIDATE_NORMALIZATION")
                .unwrap_or(defaults.validate_normalization),
            max_container_qubits: env_parse("QCLIB_MAX_CONTAINER_QUBITS")
                .filter(|n: &usize| *n >= 1)
                .unwrap_or(defaults.max_container_qubits),
            seed: env_parse("QCLIB_SEED").or(defaults.seed),
        }
    }

    /// Mesma configuração com semente fixa
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Mesma configuração sem validação de normalização
    pub fn without_validation(mut self) -> Self {
        self.validate_normalization = false;
        self
    }
}
