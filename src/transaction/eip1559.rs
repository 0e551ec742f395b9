//! EIP-1559 (type `0x02`) fee-market transactions (spec §3, §4.5).

use super::access_list::AccessList;
use super::TxKind;
use alloy_primitives::{Bytes, U256};
use alloy_rlp::{Decodable, Encodable};

/// A type-2 transaction: priority fee plus a fee cap, replacing a single
/// `gas_price`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TxEip1559 {
    /// Chain this transaction is valid on.
    pub chain_id: u64,
    /// Sender's per-account sequence number.
    pub nonce: u64,
    /// Tip paid to the block proposer, per unit of gas.
    pub max_priority_fee_per_gas: u128,
    /// The most this transaction will pay per unit of gas, inclusive of
    /// the tip.
    pub max_fee_per_gas: u128,
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

impl TxEip1559 {
    /// The gas price this transaction would actually pay under a given
    /// base fee: `min(max_fee_per_gas, base_fee + max_priority_fee_per_gas)`.
    pub fn effective_gas_price(&self, base_fee: Option<u128>) -> u128 {
        match base_fee {
            None => self.max_fee_per_gas,
            Some(base_fee) => {
                let tip = self.max_fee_per_gas.saturating_sub(base_fee);
                base_fee + tip.min(self.max_priority_fee_per_gas)
            }
        }
    }

    pub(crate) fn fields_len(&self) -> usize {
        self.chain_id.length()
            + self.nonce.length()
            + self.max_priority_fee_per_gas.length()
            + self.max_fee_per_gas.length()
            + self.gas_limit.length()
            + self.to.length()
            + self.value.length()
            + self.input.0.length()
            + self.access_list.length()
    }

    pub(crate) fn encode_fields(&self, out: &mut dyn alloy_rlp::BufMut) {
        self.chain_id.encode(out);
        self.nonce.encode(out);
        self.max_priority_fee_per_gas.encode(out);
        self.max_fee_per_gas.encode(out);
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
            max_priority_fee_per_gas: Decodable::decode(buf)?,
            max_fee_per_gas: Decodable::decode(buf)?,
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
    fn effective_gas_price_caps_at_max_fee() {
        let tx = TxEip1559 {
            max_fee_per_gas: 50_000_000_000,
            max_priority_fee_per_gas: 2_000_000_000,
            ..Default::default()
        };
        assert_eq!(tx.effective_gas_price(Some(60_000_000_000)), 50_000_000_000);
        assert_eq!(tx.effective_gas_price(Some(10_000_000_000)), 12_000_000_000);
        assert_eq!(tx.effective_gas_price(None), 50_000_000_000);
    }

    // Scenario (e): field count/order check.
    #[test]
    fn nine_fields_before_signature() {
        let tx = TxEip1559 {
            chain_id: 1,
            nonce: 123,
            max_priority_fee_per_gas: 2_000_000_000,
            max_fee_per_gas: 50_000_000_000,
            gas_limit: 21_000,
            to: TxKind::Call(alloy_primitives::Address::repeat_byte(0x01)),
            value: U256::from(1_000_000_000_000_000_000u128),
            input: Bytes::from(hex::decode("cafebabe").unwrap()),
            access_list: AccessList(vec![super::super::access_list::AccessListItem {
                address: alloy_primitives::Address::repeat_byte(0x02),
                storage_keys: vec![alloy_primitives::B256::ZERO],
            }]),
        };
        let mut buf = Vec::new();
        tx.encode_fields(&mut buf);
        let decoded = TxEip1559::decode_inner(&mut &buf[..]).unwrap();
        assert_eq!(decoded, tx);
    }
}
