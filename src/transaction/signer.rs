//! ECDSA signing over secp256k1, and address recovery from a signature
//! plus its digest (spec §4.5).

use super::signature::Signature;
use crate::error::{Error, Result};
use alloy_primitives::{keccak256, Address, B256};
use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{Message, PublicKey, Secp256k1, SecretKey};

/// Sign a 32-byte digest with `secret_key`, returning a canonical
/// low-s [`Signature`].
pub fn sign_digest(secret_key: &SecretKey, digest: B256) -> Result<Signature> {
    let secp = Secp256k1::signing_only();
    let message =
        Message::from_digest_slice(digest.as_slice()).map_err(|_| Error::MalformedEncoding("invalid signing digest".into()))?;
    let recoverable = secp.sign_ecdsa_recoverable(&message, secret_key);
    let (recovery_id, compact) = recoverable.serialize_compact();
    let r = alloy_primitives::U256::from_be_slice(&compact[..32]);
    let s = alloy_primitives::U256::from_be_slice(&compact[32..]);
    let y_parity = recovery_id.to_i32() != 0;
    Ok(Signature::from_rs_parity(r, s, y_parity))
}

/// Recover the signer's address from a digest and the signature over it.
pub fn recover_signer(signature: &Signature, digest: B256) -> Result<Address> {
    let secp = Secp256k1::verification_only();
    let message =
        Message::from_digest_slice(digest.as_slice()).map_err(|_| Error::MalformedEncoding("invalid signing digest".into()))?;

    let mut compact = [0u8; 64];
    compact[..32].copy_from_slice(&signature.r.to_be_bytes::<32>());
    compact[32..].copy_from_slice(&signature.s.to_be_bytes::<32>());
    let recovery_id = RecoveryId::from_i32(i32::from(signature.y_parity))
        .map_err(|_| Error::MalformedEncoding("invalid recovery id".into()))?;
    let recoverable = RecoverableSignature::from_compact(&compact, recovery_id)
        .map_err(|_| Error::SignatureMismatch)?;

    let public_key: PublicKey =
        secp.recover_ecdsa(&message, &recoverable).map_err(|_| Error::SignatureMismatch)?;
    Ok(public_key_to_address(&public_key))
}

pub(crate) fn public_key_to_address(public_key: &PublicKey) -> Address {
    let uncompressed = public_key.serialize_uncompressed();
    // Drop the 0x04 prefix byte; Ethereum addresses are the low 20 bytes
    // of keccak256 over the raw 64-byte (x, y) point.
    let hash = keccak256(&uncompressed[1..]);
    Address::from_slice(&hash[12..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use secp256k1::rand::rngs::OsRng;

    #[test]
    fn sign_then_recover_round_trips_to_the_same_address() {
        let secp = Secp256k1::new();
        let (secret_key, public_key) = secp.generate_keypair(&mut OsRng);
        let digest = B256::from(keccak256(b"hello world"));

        let signature = sign_digest(&secret_key, digest).unwrap();
        assert!(signature.is_canonical());

        let recovered = recover_signer(&signature, digest).unwrap();
        assert_eq!(recovered, public_key_to_address(&public_key));
    }
}
