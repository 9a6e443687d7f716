//! # Tradução de índices
//!
//! Particiona o espaço de endereços de um vetor de comprimento 2^L em grupos
//! endereçados por uma lista ordenada de bits alvo.
//!
//! Dentro de cada grupo os bits livres (fora de `target_bits`) ficam fixos, e a
//! entrada `j` do grupo é o endereço original obtido colocando o bit alvo
//! `target_bits[i]` igual ao bit `i` de `j`.
//!
//! ```text
//! L = 3, target_bits = [2, 0]
//!   grupo (bit 1 = 0): [000, 100, 001, 101]
//!   grupo (bit 1 = 1): [010, 110, 011, 111]
//! ```
//!
//! É a única primitiva usada para aplicar operadores a subconjuntos de bits,
//! reordenar bits num container e montar o produto tensorial do acoplamento.

use crate::error::{QuantumError, QuantumResult};

/// Maior log-size endereçável sem overflow nos deslocamentos
pub const MAX_LOG_SIZE: usize = usize::BITS as usize - 2;

/// Valida `target_bits` contra um espaço de `log_size` bits
pub fn validate_target_bits(log_size: usize, target_bits: &[usize]) -> QuantumResult<()> {
    if log_size < 1 || log_size > MAX_LOG_SIZE || target_bits.len() > log_size {
        return Err(QuantumError::InvalidLogSize {
            log_size,
            targets: target_bits.len(),
        });
    }

    let mut seen = 0usize;
    for &bit in target_bits {
        if bit >= log_size {
            return Err(QuantumError::IndexOutOfRange {
                index: bit,
                bound: log_size,
            });
        }
        if seen & (1 << bit) != 0 {
            return Err(QuantumError::DuplicateBit(bit));
        }
        seen |= 1 << bit;
    }
    Ok(())
}

/// Máscara dos bits livres (não listados em `target_bits`)
///
/// Assume argumentos já validados.
pub fn free_bit_mask(log_size: usize, target_bits: &[usize]) -> usize {
    let full = (1usize << log_size) - 1;
    target_bits.iter().fold(full, |mask, &bit| mask & !(1 << bit))
}

/// Bits de `[0, log_size)` ausentes de `bits`, em ordem crescente
pub fn complement_bits(log_size: usize, bits: &[usize]) -> Vec<usize> {
    (0..log_size).filter(|b| !bits.contains(b)).collect()
}

/// Deslocamentos do grupo com bits livres em zero
fn group_template(target_bits: &[usize]) -> Vec<usize> {
    let mut offsets = Vec::with_capacity(1 << target_bits.len());
    offsets.push(0);
    for &bit in target_bits {
        let with_bit: Vec<usize> = offsets.iter().map(|&o| o | (1 << bit)).collect();
        offsets.extend(with_bit);
    }
    offsets
}

/// Traduz índices de um vetor de 2^`log_size` entradas para sub-vetores de
/// 2^`target_bits.len()` entradas.
///
/// Retorna 2^(L−m) grupos de 2^m endereços cada, em ordem crescente do valor
/// dos bits livres. Os grupos particionam `{0, …, 2^L − 1}` exatamente.
pub fn translate_indices(log_size: usize, target_bits: &[usize]) -> QuantumResult<Vec<Vec<usize>>> {
    validate_target_bits(log_size, target_bits)?;

    let template = group_template(target_bits);
    let free_mask = free_bit_mask(log_size, target_bits);
    let mut groups = Vec::with_capacity(1 << (log_size - target_bits.len()));

    // Enumera as submáscaras de `free_mask` em ordem crescente
    let mut free = 0usize;
    loop {
        groups.push(template.iter().map(|&offset| offset | free).collect());
        if free == free_mask {
            break;
        }
        free = free.wrapping_sub(free_mask) & free_mask;
    }

    Ok(groups)
}

/// Grupo único de uma reordenação completa dos `log_size` bits
///
/// A entrada `j` é o endereço antigo que passa a ocupar a posição `j`.
pub fn permutation_indices(log_size: usize, order: &[usize]) -> QuantumResult<Vec<usize>> {
    if order.len() != log_size {
        return Err(QuantumError::InvalidLogSize {
            log_size,
            targets: order.len(),
        });
    }
    let mut groups = translate_indices(log_size, order)?;
    Ok(groups.swap_remove(0))
}
