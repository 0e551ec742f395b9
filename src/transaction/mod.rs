//! Transaction assembly, RLP (de)serialization, and ECDSA signing for
//! legacy, EIP-2930, and EIP-1559 transactions (spec §3, §4.5).
//!
//! Signing-payload derivation follows the rules in spec §4.5 exactly;
//! everything around it — field layout, `fields_len`/`encode_fields`
//! naming, `into_signed`/`decode_signed` — is adapted from the
//! alloy-consensus transaction family, since this crate's RLP and
//! primitive types are the alloy ones.

mod access_list;
mod eip1559;
mod eip2930;
mod legacy;
mod signature;
mod signer;

/// EIP-2930 access-list types, shared by type-1 and type-2 transactions.
pub use access_list::{AccessList, AccessListItem};
/// The type-`0x02` transaction's fields.
pub use eip1559::TxEip1559;
/// The type-`0x01` transaction's fields.
pub use eip2930::TxEip2930;
/// The legacy (pre-EIP-2718) transaction's fields.
pub use legacy::TxLegacy;
/// An ECDSA `(r, s, yParity)` triple with low-s normalization and the
/// legacy/EIP-155/typed `v` encodings.
pub use signature::Signature;
/// Digest signing and signer recovery over secp256k1.
pub use signer::{recover_signer, sign_digest};

use crate::error::{Error, Result};
use alloy_primitives::{keccak256, Address, Bytes, B256};
use alloy_rlp::{length_of_length, BufMut, Decodable, Encodable, Header};
use secp256k1::SecretKey;

/// A transaction's recipient: either a call target or contract creation.
/// Contract creation RLP-encodes as an empty byte string, never as 20
/// zero bytes (spec §4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxKind {
    /// Contract creation: there is no recipient.
    Create,
    /// A call (or value transfer) to an existing account.
    Call(Address),
}

impl Default for TxKind {
    fn default() -> Self {
        Self::Create
    }
}

impl Encodable for TxKind {
    fn encode(&self, out: &mut dyn BufMut) {
        match self {
            Self::Create => out.put_u8(alloy_rlp::EMPTY_STRING_CODE),
            Self::Call(addr) => addr.encode(out),
        }
    }

    fn length(&self) -> usize {
        match self {
            Self::Create => 1,
            Self::Call(addr) => addr.length(),
        }
    }
}

impl Decodable for TxKind {
    fn decode(buf: &mut &[u8]) -> alloy_rlp::Result<Self> {
        if let Some(&first) = buf.first() {
            if first == alloy_rlp::EMPTY_STRING_CODE {
                *buf = &buf[1..];
                return Ok(Self::Create);
            }
        }
        Ok(Self::Call(Address::decode(buf)?))
    }
}

/// The sum type of supported transactions (spec §3): legacy (with or
/// without EIP-155) and EIP-1559. EIP-2930 is carried as well since it
/// sits directly between them in the wire-type sequence and shares the
/// same access-list machinery EIP-1559 needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transaction {
    /// A legacy (`v, r, s` only, no type byte) transaction.
    Legacy(TxLegacy),
    /// A type-`0x01` transaction.
    Eip2930(TxEip2930),
    /// A type-`0x02` transaction.
    Eip1559(TxEip1559),
}

impl Transaction {
    /// The EIP-2718 transaction type byte, or `None` for legacy (which has
    /// no type prefix on the wire).
    pub const fn tx_type(&self) -> Option<u8> {
        match self {
            Self::Legacy(_) => None,
            Self::Eip2930(_) => Some(0x01),
            Self::Eip1559(_) => Some(0x02),
        }
    }

    /// This transaction's chain id, if it carries one.
    pub const fn chain_id(&self) -> Option<u64> {
        match self {
            Self::Legacy(tx) => tx.chain_id,
            Self::Eip2930(tx) => Some(tx.chain_id),
            Self::Eip1559(tx) => Some(tx.chain_id),
        }
    }

    /// Sender's per-account sequence number.
    pub const fn nonce(&self) -> u64 {
        match self {
            Self::Legacy(tx) => tx.nonce,
            Self::Eip2930(tx) => tx.nonce,
            Self::Eip1559(tx) => tx.nonce,
        }
    }

    /// Maximum gas this transaction may consume.
    pub const fn gas_limit(&self) -> u64 {
        match self {
            Self::Legacy(tx) => tx.gas_limit,
            Self::Eip2930(tx) => tx.gas_limit,
            Self::Eip1559(tx) => tx.gas_limit,
        }
    }

    /// Recipient, or [`TxKind::Create`] for contract creation.
    pub const fn to(&self) -> TxKind {
        match self {
            Self::Legacy(tx) => tx.to,
            Self::Eip2930(tx) => tx.to,
            Self::Eip1559(tx) => tx.to,
        }
    }

    /// Calldata or init code.
    pub fn input(&self) -> &Bytes {
        match self {
            Self::Legacy(tx) => &tx.input,
            Self::Eip2930(tx) => &tx.input,
            Self::Eip1559(tx) => &tx.input,
        }
    }

    fn fields_len(&self) -> usize {
        match self {
            Self::Legacy(tx) => tx.fields_len(),
            Self::Eip2930(tx) => tx.fields_len(),
            Self::Eip1559(tx) => tx.fields_len(),
        }
    }

    fn encode_fields(&self, out: &mut dyn BufMut) {
        match self {
            Self::Legacy(tx) => tx.encode_fields(out),
            Self::Eip2930(tx) => tx.encode_fields(out),
            Self::Eip1559(tx) => tx.encode_fields(out),
        }
    }

    /// The exact bytes this transaction's signature is computed over
    /// (spec §4.5): for legacy, a plain RLP list (optionally with the
    /// trailing `chainId, 0, 0` EIP-155 fields); for typed transactions,
    /// the type byte followed by the RLP list of fields.
    pub fn encode_for_signing(&self, out: &mut dyn BufMut) {
        match self {
            Self::Legacy(tx) => {
                let payload_length = match tx.chain_id {
                    Some(_) => tx.fields_len() + eip155_padding_len(tx.chain_id.unwrap()),
                    None => tx.fields_len(),
                };
                Header { list: true, payload_length }.encode(out);
                tx.encode_fields(out);
                if let Some(chain_id) = tx.chain_id {
                    chain_id.encode(out);
                    0u8.encode(out);
                    0u8.encode(out);
                }
            }
            Self::Eip2930(_) | Self::Eip1559(_) => {
                out.put_u8(self.tx_type().expect("typed transaction always has a type byte"));
                let payload_length = self.fields_len();
                Header { list: true, payload_length }.encode(out);
                self.encode_fields(out);
            }
        }
    }

    /// The Keccak-256 digest of [`Self::encode_for_signing`]'s output —
    /// what the signer actually signs.
    pub fn signing_hash(&self) -> B256 {
        let mut buf = Vec::new();
        self.encode_for_signing(&mut buf);
        B256::from(keccak256(buf))
    }

    /// Sign this transaction with `secret_key`, producing a
    /// [`TransactionSigned`] with its wire hash precomputed.
    ///
    /// Rejects an EIP-1559 transaction targeting a chain this crate's
    /// [`crate::chains`] registry knows predates London.
    pub fn sign(self, secret_key: &SecretKey) -> Result<TransactionSigned> {
        if let Self::Eip1559(tx) = &self {
            crate::chains::ensure_eip1559_supported(tx.chain_id)?;
        }
        let hash = self.signing_hash();
        let signature = sign_digest(secret_key, hash)?;
        Ok(self.into_signed(signature))
    }

    /// Combine this transaction with an already-produced signature.
    pub fn into_signed(self, signature: Signature) -> TransactionSigned {
        let mut buf = Vec::new();
        encode_signed_into(&self, &signature, &mut buf);
        let hash = B256::from(keccak256(&buf));
        TransactionSigned { transaction: self, signature, hash }
    }
}

fn eip155_padding_len(chain_id: u64) -> usize {
    chain_id.length() + 0u8.length() + 0u8.length()
}

fn encode_signed_into(transaction: &Transaction, signature: &Signature, out: &mut Vec<u8>) {
    match transaction {
        Transaction::Legacy(tx) => {
            let v = match tx.chain_id {
                Some(chain_id) => signature.eip155_v(chain_id),
                None => signature.legacy_v(),
            };
            let payload_length = tx.fields_len() + signature.rlp_len_with_v(v);
            Header { list: true, payload_length }.encode(out);
            tx.encode_fields(out);
            signature.encode_with_v(v, out);
        }
        Transaction::Eip2930(_) | Transaction::Eip1559(_) => {
            out.put_u8(transaction.tx_type().expect("typed transaction always has a type byte"));
            let payload_length = transaction.fields_len() + signature.rlp_len_typed();
            Header { list: true, payload_length }.encode(out);
            transaction.encode_fields(out);
            signature.encode_typed(out);
        }
    }
}

/// A transaction paired with its signature and cached wire hash. This is
/// the unit a caller submits to a transport (spec §4.5's "Signed" state).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionSigned {
    transaction: Transaction,
    signature: Signature,
    hash: B256,
}

impl TransactionSigned {
    /// The wrapped transaction.
    pub const fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    /// The signature over [`Transaction::signing_hash`].
    pub const fn signature(&self) -> &Signature {
        &self.signature
    }

    /// The Keccak-256 hash of this transaction's final wire encoding —
    /// its canonical transaction hash.
    pub const fn hash(&self) -> B256 {
        self.hash
    }

    /// Recover the sender's address from the signature and the original
    /// signing digest.
    pub fn recover_signer(&self) -> Result<Address> {
        recover_signer(&self.signature, self.transaction.signing_hash())
    }

    /// The final wire bytes: legacy RLP list, or `0x02`/`0x01`-prefixed
    /// typed list (spec §4.5).
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.length());
        encode_signed_into(&self.transaction, &self.signature, &mut out);
        out
    }

    /// Byte length of [`Self::encode`]'s output.
    pub fn length(&self) -> usize {
        match &self.transaction {
            Transaction::Legacy(tx) => {
                let v = match tx.chain_id {
                    Some(chain_id) => self.signature.eip155_v(chain_id),
                    None => self.signature.legacy_v(),
                };
                let payload_length = tx.fields_len() + self.signature.rlp_len_with_v(v);
                length_of_length(payload_length) + payload_length
            }
            Transaction::Eip2930(_) | Transaction::Eip1559(_) => {
                let payload_length = self.transaction.fields_len() + self.signature.rlp_len_typed();
                1 + length_of_length(payload_length) + payload_length
            }
        }
    }

    /// Decode a transaction from its final wire form: a type byte
    /// (`0x01`/`0x02`) followed by an RLP list for typed transactions, or
    /// a bare RLP list for legacy.
    pub fn decode(buf: &mut &[u8]) -> Result<Self> {
        let Some(&first) = buf.first() else {
            return Err(Error::MalformedEncoding("empty transaction buffer".into()));
        };

        let (transaction, signature) = match first {
            0x01 => {
                *buf = &buf[1..];
                let header = Header::decode(buf).map_err(rlp_err)?;
                if !header.list {
                    return Err(Error::MalformedEncoding("expected an RLP list for a typed transaction".into()));
                }
                let tx = TxEip2930::decode_inner(buf).map_err(rlp_err)?;
                let signature = Signature::decode_typed(buf).map_err(rlp_err)?;
                (Transaction::Eip2930(tx), signature)
            }
            0x02 => {
                *buf = &buf[1..];
                let header = Header::decode(buf).map_err(rlp_err)?;
                if !header.list {
                    return Err(Error::MalformedEncoding("expected an RLP list for a typed transaction".into()));
                }
                let tx = TxEip1559::decode_inner(buf).map_err(rlp_err)?;
                let signature = Signature::decode_typed(buf).map_err(rlp_err)?;
                (Transaction::Eip1559(tx), signature)
            }
            _ => {
                let header = Header::decode(buf).map_err(rlp_err)?;
                if !header.list {
                    return Err(Error::MalformedEncoding("expected an RLP list for a legacy transaction".into()));
                }
                let mut tx = TxLegacy::decode_inner(buf).map_err(rlp_err)?;
                let (signature, chain_id) = Signature::decode_legacy(buf).map_err(rlp_err)?;
                tx.chain_id = chain_id;
                (Transaction::Legacy(tx), signature)
            }
        };

        let mut rebuilt = Vec::new();
        encode_signed_into(&transaction, &signature, &mut rebuilt);
        let hash = B256::from(keccak256(rebuilt));
        Ok(Self { transaction, signature, hash })
    }
}

fn rlp_err(err: alloy_rlp::Error) -> Error {
    Error::MalformedEncoding(err.to_string())
}
