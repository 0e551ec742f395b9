//! The (r, s, y_parity) signature attached to a signed transaction, and the
//! wire `v` encoding rules for each transaction variant (spec §4.5).

use alloy_primitives::U256;
use alloy_rlp::{BufMut, Decodable, Encodable};
use once_cell::sync::Lazy;

/// The secp256k1 curve order, `n`.
static SECP256K1_ORDER: Lazy<U256> = Lazy::new(|| {
    let bytes = hex::decode("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141")
        .expect("curve order literal is valid hex");
    U256::from_be_slice(&bytes)
});

/// The canonical low-s bound: `n / 2`. Signatures with `s` above this
/// threshold are non-canonical per consensus rules and must be normalized
/// by negating `s` (and flipping `y_parity`) before being accepted as a
/// valid transaction signature.
static SECP256K1_HALF_ORDER: Lazy<U256> = Lazy::new(|| *SECP256K1_ORDER / U256::from(2u64));

/// An ECDSA signature over secp256k1, always stored in canonical low-s
/// form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    /// The `r` component.
    pub r: U256,
    /// The `s` component, always `<= n/2`.
    pub s: U256,
    /// The recovery id: which of the two possible public keys produced
    /// this signature.
    pub y_parity: bool,
}

impl Signature {
    /// Build a signature from raw (r, s, y_parity), normalizing `s` (and
    /// flipping `y_parity`) into canonical low-s form if necessary.
    pub fn from_rs_parity(r: U256, s: U256, y_parity: bool) -> Self {
        if s > *SECP256K1_HALF_ORDER {
            Self { r, s: *SECP256K1_ORDER - s, y_parity: !y_parity }
        } else {
            Self { r, s, y_parity }
        }
    }

    /// Whether `s` is within the canonical low-s range.
    pub fn is_canonical(&self) -> bool {
        self.s <= *SECP256K1_HALF_ORDER
    }

    /// The legacy pre-EIP-155 wire `v` value (`27` or `28`).
    pub fn legacy_v(&self) -> u64 {
        27 + u64::from(self.y_parity)
    }

    /// The legacy EIP-155 wire `v` value, folding in the chain id.
    pub fn eip155_v(&self, chain_id: u64) -> u64 {
        u64::from(self.y_parity) + 35 + 2 * chain_id
    }

    /// RLP length of the trailing `v, r, s` (legacy) fields for a given
    /// precomputed `v`.
    pub(crate) fn rlp_len_with_v(&self, v: u64) -> usize {
        v.length() + self.r.length() + self.s.length()
    }

    pub(crate) fn encode_with_v(&self, v: u64, out: &mut dyn BufMut) {
        v.encode(out);
        self.r.encode(out);
        self.s.encode(out);
    }

    /// RLP length of the trailing `y_parity, r, s` (typed transaction)
    /// fields.
    pub(crate) fn rlp_len_typed(&self) -> usize {
        u64::from(self.y_parity).length() + self.r.length() + self.s.length()
    }

    pub(crate) fn encode_typed(&self, out: &mut dyn BufMut) {
        u64::from(self.y_parity).encode(out);
        self.r.encode(out);
        self.s.encode(out);
    }

    /// Decode trailing `y_parity, r, s` fields (typed transactions).
    pub(crate) fn decode_typed(buf: &mut &[u8]) -> alloy_rlp::Result<Self> {
        let y_parity = u64::decode(buf)? != 0;
        let r = U256::decode(buf)?;
        let s = U256::decode(buf)?;
        Ok(Self { r, s, y_parity })
    }

    /// Decode trailing `v, r, s` fields (legacy), returning the signature
    /// plus the chain id recovered from `v` if it was EIP-155-encoded.
    pub(crate) fn decode_legacy(buf: &mut &[u8]) -> alloy_rlp::Result<(Self, Option<u64>)> {
        let v = u64::decode(buf)?;
        let r = U256::decode(buf)?;
        let s = U256::decode(buf)?;
        let (y_parity, chain_id) = if v >= 35 {
            (((v - 35) % 2) == 1, Some((v - 35) / 2))
        } else {
            (v == 28, None)
        };
        Ok((Self { r, s, y_parity }, chain_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_high_s_to_canonical_low_s() {
        let high_s = *SECP256K1_ORDER - U256::from(1u64);
        let sig = Signature::from_rs_parity(U256::from(1u64), high_s, false);
        assert!(sig.is_canonical());
        assert!(sig.y_parity);
    }

    #[test]
    fn low_s_passes_through_unchanged() {
        let sig = Signature::from_rs_parity(U256::from(1u64), U256::from(2u64), true);
        assert_eq!(sig.s, U256::from(2u64));
        assert!(sig.y_parity);
    }

    #[test]
    fn eip155_v_folds_in_chain_id() {
        let sig = Signature::from_rs_parity(U256::from(1u64), U256::from(2u64), false);
        assert_eq!(sig.eip155_v(1), 37);
        assert_eq!(sig.legacy_v(), 27);
    }

    #[test]
    fn decode_legacy_recovers_chain_id_from_eip155_v() {
        let sig = Signature::from_rs_parity(U256::from(9u64), U256::from(10u64), true);
        let v = sig.eip155_v(5);
        let mut buf = Vec::new();
        v.encode(&mut buf);
        sig.r.encode(&mut buf);
        sig.s.encode(&mut buf);
        let (decoded, chain_id) = Signature::decode_legacy(&mut &buf[..]).unwrap();
        assert_eq!(decoded, sig);
        assert_eq!(chain_id, Some(5));
    }
}
