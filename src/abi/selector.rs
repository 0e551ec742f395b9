//! Function selectors and event `topic0` hashes.

use super::signature::Signature;
use alloy_primitives::keccak256;

/// The 4-byte function selector: the first 4 bytes of
/// `keccak256(canonical_signature)`.
pub fn selector(sig: &Signature) -> [u8; 4] {
    let hash = keccak256(sig.canonical().as_bytes());
    let mut out = [0u8; 4];
    out.copy_from_slice(&hash[..4]);
    out
}

/// The full 32-byte `topic0` hash, or `None` for an anonymous event (which
/// has no `topic0` slot at all).
pub fn topic0(sig: &Signature) -> Option<[u8; 32]> {
    if sig.anonymous {
        return None;
    }
    Some(keccak256(sig.canonical().as_bytes()).0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::signature::{parse_signature, SignatureKind};

    #[test]
    fn transfer_selector_matches_known_value() {
        let sig = parse_signature(SignatureKind::Function, "transfer(address,uint256)").unwrap();
        assert_eq!(hex::encode(selector(&sig)), "a9059cbb");
    }

    #[test]
    fn transfer_event_topic0_matches_known_value() {
        let sig = parse_signature(
            SignatureKind::Event,
            "Transfer(address indexed from, address indexed to, uint256 value)",
        )
        .unwrap();
        assert_eq!(
            hex::encode(topic0(&sig).unwrap()),
            "ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"
        );
    }

    #[test]
    fn anonymous_event_has_no_topic0() {
        let sig = parse_signature(SignatureKind::Event, "Ping(uint256 x) anonymous").unwrap();
        assert!(topic0(&sig).is_none());
    }
}
