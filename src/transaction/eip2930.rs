//! EIP-2930 transactions (type `0x01`): legacy fields plus an access list,
//! still priced with a single `gas_price` (the fee-market split arrives
//! with EIP-1559).

use super::access_list::AccessList;
use super::TxKind;
use alloy_primitives::{Bytes, U256};
use alloy_rlp::{Decodable, Encodable};

/// A type-1 transaction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TxEip2930 {
    /// Chain this transaction is valid on.
    pub chain_id: u64,
    /// Sender's per-account sequence number.
    pub nonce: u64,
    /// Price paid per unit of gas.
    pub gas_price: u128,
    /// Maximum gas this transaction may consume.
    pub gas_limit: u64,
    /// Recipient, or [`TxKind::Create`] for contract creation.
    pub to: TxKind,
    /// Wei transferred to `to`.
    pub value: U256,
    /// Calldata or init code.
    pub input: Bytes,
    /// Storage slots pre-declared as accessed.
    pub access_list: AccessList,
}

impl TxEip2930 {
    pub(crate) fn fields_len(&self) -> usize {
        self.chain_id.length()
            + self.nonce.length()
            + self.gas_price.length()
            + self.gas_limit.length()
            + self.to.length()
            + self.value.length()
            + self.input.0.length()
            + self.access_list.length()
    }

    pub(crate) fn encode_fields(&self, out: &mut dyn alloy_rlp::BufMut) {
        self.chain_id.encode(out);
        self.nonce.encode(out);
        self.gas_price.encode(out);
        self.gas_limit.encode(out);
        self.to.encode(out);
        self.value.encode(out);
        self.input.0.encode(out);
        self.access_list.encode(out);
    }

    pub(crate) fn decode_inner(buf: &mut &[u8]) -> alloy_rlp::Result<Self> {
        Ok(Self {
            chain_id: Decodable::decode(buf)?,
            nonce: Decodable::decode(buf)?,
            gas_price: Decodable::decode(buf)?,
            gas_limit: Decodable::decode(buf)?,
            to: Decodable::decode(buf)?,
            value: Decodable::decode(buf)?,
            input: Decodable::decode(buf)?,
            access_list: Decodable::decode(buf)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_fields_through_rlp() {
        let tx = TxEip2930 { chain_id: 1, nonce: 3, gas_price: 7, gas_limit: 21_000, ..Default::default() };
        let mut buf = Vec::new();
        tx.encode_fields(&mut buf);
        let decoded = TxEip2930::decode_inner(&mut &buf[..]).unwrap();
        assert_eq!(decoded, tx);
    }
}
