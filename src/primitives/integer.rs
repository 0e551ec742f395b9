//! Bit-width-constrained views over `U256`/`I256`.
//!
//! The ABI only ever needs 256-bit storage (the widest `uintN`/`intN` the
//! Solidity ABI defines), so a single pair of fixed-width integer types
//! covers every declared width; the width constraint itself is carried
//! alongside the value by the caller (the ABI type descriptor) and checked
//! here rather than encoded in the type system as N const-generic integer
//! types.

use alloy_primitives::{I256, U256};

/// Whether `value` fits in an unsigned integer of `bits` bits (`8..=256`,
/// multiple of 8).
pub fn fits_uint(bits: usize, value: &U256) -> bool {
    if bits >= 256 {
        return true;
    }
    let limit = U256::ONE << bits;
    *value < limit
}

/// Whether `value` fits in a two's-complement signed integer of `bits` bits
/// (`8..=256`, multiple of 8).
pub fn fits_int(bits: usize, value: &I256) -> bool {
    if bits >= 256 {
        return true;
    }
    let half = U256::ONE << (bits - 1);
    // max = 2^(bits-1) - 1, min = -2^(bits-1)
    let max = I256::try_from(half - U256::from(1)).expect("half-1 fits in I256 for bits < 256");
    let min = -I256::try_from(half).expect("half fits in I256 for bits < 256");
    *value >= min && *value <= max
}

/// Big-endian, zero-padded-to-32-bytes encoding of an unsigned value. This
/// is the ABI's inline `uintN` slot encoding (left-padded with `0x00`).
pub fn uint_to_be_bytes_fixed32(value: &U256) -> [u8; 32] {
    value.to_be_bytes::<32>()
}

/// Big-endian, two's-complement, sign-extended-to-32-bytes encoding of a
/// signed value. This is the ABI's inline `intN` slot encoding.
pub fn int_to_be_bytes_fixed32(value: &I256) -> [u8; 32] {
    value.to_be_bytes::<32>()
}

/// Minimal big-endian encoding with no leading zero byte, empty for zero.
/// This is RLP's integer normalization rule (spec §4.4); negative values
/// have no RLP representation and are rejected upstream of this function.
pub fn uint_to_be_bytes_minimal(value: &U256) -> Vec<u8> {
    if value.is_zero() {
        return Vec::new();
    }
    let full = value.to_be_bytes::<32>();
    let first_nonzero = full.iter().position(|&b| b != 0).unwrap_or(31);
    full[first_nonzero..].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uint8_bounds() {
        assert!(fits_uint(8, &U256::from(255)));
        assert!(!fits_uint(8, &U256::from(256)));
    }

    #[test]
    fn int8_bounds() {
        assert!(fits_int(8, &I256::try_from(127).unwrap()));
        assert!(!fits_int(8, &I256::try_from(128).unwrap()));
        assert!(fits_int(8, &I256::try_from(-128).unwrap()));
        assert!(!fits_int(8, &I256::try_from(-129).unwrap()));
    }

    #[test]
    fn minimal_encoding_drops_leading_zeros_and_zero_is_empty() {
        assert_eq!(uint_to_be_bytes_minimal(&U256::ZERO), Vec::<u8>::new());
        assert_eq!(uint_to_be_bytes_minimal(&U256::from(1024u64)), vec![0x04, 0x00]);
        assert_eq!(uint_to_be_bytes_minimal(&U256::from(1u64)), vec![0x01]);
    }
}
