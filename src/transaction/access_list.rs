//! EIP-2930 access lists: storage keys a transaction pre-declares as
//! touched, at a discounted gas cost relative to cold access.

use alloy_primitives::{Address, B256};
use alloy_rlp::{length_of_length, BufMut, Decodable, Encodable, Header, RlpDecodable, RlpEncodable};

/// One access-list entry: an address plus the storage slots within it the
/// transaction pre-declares.
#[derive(Debug, Clone, PartialEq, Eq, Default, RlpEncodable, RlpDecodable)]
pub struct AccessListItem {
    /// The account whose storage is pre-declared as accessed.
    pub address: Address,
    /// Storage slots within `address` that are pre-declared as accessed.
    pub storage_keys: Vec<B256>,
}

/// An ordered list of [`AccessListItem`]s (spec §3, EIP-2930).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccessList(pub Vec<AccessListItem>);

impl AccessList {
    /// Total number of storage keys across every entry.
    pub fn total_storage_keys(&self) -> usize {
        self.0.iter().map(|item| item.storage_keys.len()).sum()
    }
}

impl Encodable for AccessList {
    fn encode(&self, out: &mut dyn BufMut) {
        let payload_length: usize = self.0.iter().map(Encodable::length).sum();
        Header { list: true, payload_length }.encode(out);
        for item in &self.0 {
            item.encode(out);
        }
    }

    fn length(&self) -> usize {
        let payload_length: usize = self.0.iter().map(Encodable::length).sum();
        length_of_length(payload_length) + payload_length
    }
}

impl Decodable for AccessList {
    fn decode(buf: &mut &[u8]) -> alloy_rlp::Result<Self> {
        Ok(Self(Vec::<AccessListItem>::decode(buf)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_access_list_round_trips() {
        let list = AccessList::default();
        let mut buf = Vec::new();
        list.encode(&mut buf);
        let decoded = AccessList::decode(&mut &buf[..]).unwrap();
        assert_eq!(decoded, list);
    }

    #[test]
    fn single_entry_round_trips() {
        let list = AccessList(vec![AccessListItem {
            address: Address::repeat_byte(0x11),
            storage_keys: vec![B256::repeat_byte(0x22)],
        }]);
        let mut buf = Vec::new();
        list.encode(&mut buf);
        let decoded = AccessList::decode(&mut &buf[..]).unwrap();
        assert_eq!(decoded, list);
        assert_eq!(decoded.total_storage_keys(), 1);
    }
}
