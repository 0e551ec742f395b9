//! The original transaction format, with or without EIP-155 replay
//! protection (spec §3, §4.5).

use super::TxKind;
use alloy_primitives::{Bytes, U256};
use alloy_rlp::{Decodable, Encodable};

/// A legacy transaction: `[nonce, gasPrice, gasLimit, to, value, data]`
/// plus, once signed, `v, r, s`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TxLegacy {
    /// The chain id this transaction is replay-protected against, if any.
    /// `None` means a pre-EIP-155 signing payload.
    pub chain_id: Option<u64>,
    /// Sender's per-account sequence number.
    pub nonce: u64,
    /// Price paid per unit of gas.
    pub gas_price: u128,
    /// Maximum gas this transaction may consume.
    pub gas_limit: u64,
    /// Recipient, or [`TxKind::Create`] for contract creation.
    pub to: TxKind,
    /// Wei transferred to `to` (or endowed to the created contract).
    pub value: U256,
    /// Calldata or init code.
    pub input: Bytes,
}

impl TxLegacy {
    pub(crate) fn fields_len(&self) -> usize {
        self.nonce.length()
            + self.gas_price.length()
            + self.gas_limit.length()
            + self.to.length()
            + self.value.length()
            + self.input.0.length()
    }

    pub(crate) fn encode_fields(&self, out: &mut dyn alloy_rlp::BufMut) {
        self.nonce.encode(out);
        self.gas_price.encode(out);
        self.gas_limit.encode(out);
        self.to.encode(out);
        self.value.encode(out);
        self.input.0.encode(out);
    }

    pub(crate) fn decode_inner(buf: &mut &[u8]) -> alloy_rlp::Result<Self> {
        Ok(Self {
            chain_id: None,
            nonce: Decodable::decode(buf)?,
            gas_price: Decodable::decode(buf)?,
            gas_limit: Decodable::decode(buf)?,
            to: Decodable::decode(buf)?,
            value: Decodable::decode(buf)?,
            input: Decodable::decode(buf)?,
        })
    }
}
