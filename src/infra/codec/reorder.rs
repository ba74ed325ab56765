//! Bit-level reorder adapter: some record revisions permute their bits
//! relative to the order fields are declared in, without changing field
//! widths. A `Record` with a reorder permutation decodes by first
//! unreordering the raw bits back into declaration order, and encodes by
//! reordering declaration-order bits into wire order.
//!
//! Convention: `permutation[i]` is the destination index of bit `i` on
//! encode, i.e. `reorder(bits, permutation)[permutation[i]] == bits[i]`.
//! `permutation` must therefore be a bijection on `0..bits.len()`.
use alloc::format;
use alloc::vec;
use alloc::vec::Vec;

use crate::error::{Error, Result};
use crate::infra::codec::bits::Bits;

fn validate(permutation: &[usize], len: usize) -> Result<()> {
    if permutation.len() != len {
        return Err(Error::BadReorder {
            reason: format!(
                "permutation has {} entries, bit sequence has {}",
                permutation.len(),
                len
            ),
        });
    }
    let mut seen = vec![false; len];
    for &dest in permutation {
        if dest >= len {
            return Err(Error::BadReorder {
                reason: format!("index {} out of range for length {}", dest, len),
            });
        }
        if seen[dest] {
            return Err(Error::BadReorder {
                reason: format!("duplicate destination index {}", dest),
            });
        }
        seen[dest] = true;
    }
    Ok(())
}

/// Permute `bits` so that the bit at source position `i` lands at
/// destination `permutation[i]`.
pub fn reorder(bits: &Bits, permutation: &[usize]) -> Result<Bits> {
    if permutation.is_empty() && bits.is_empty() {
        return Ok(bits.clone());
    }
    validate(permutation, bits.len())?;
    let mut out = vec![false; bits.len()];
    for (src, &dest) in permutation.iter().enumerate() {
        out[dest] = bits[src];
    }
    Ok(Bits::from(out))
}

/// The exact inverse of [`reorder`]: given bits already in destination
/// order, recover the original source order.
pub fn unreorder(bits: &Bits, permutation: &[usize]) -> Result<Bits> {
    if permutation.is_empty() && bits.is_empty() {
        return Ok(bits.clone());
    }
    validate(permutation, bits.len())?;
    let out: Vec<bool> = permutation.iter().map(|&dest| bits[dest]).collect();
    Ok(Bits::from(out))
}
