use crate::{Error, Result};
use alloy_primitives::{I256, U256};
use alloy_rlp::{Encodable, Header};

/// RLP-encode a byte string per spec §4.4's byte-string rules.
pub fn encode_bytes(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len() + 9);
    bytes.encode(&mut out);
    out
}

/// RLP-encode a list of items that are each independently `Encodable`.
pub fn encode_list<T: Encodable>(items: &[T]) -> Vec<u8> {
    let payload_length: usize = items.iter().map(Encodable::length).sum();
    let mut out = Vec::with_capacity(payload_length + 9);
    Header { list: true, payload_length }.encode(&mut out);
    for item in items {
        item.encode(&mut out);
    }
    out
}

/// RLP-encode a non-negative integer: minimal big-endian bytes, zero as the
/// empty string.
pub fn encode_uint(value: &U256) -> Vec<u8> {
    let mut out = Vec::new();
    value.encode(&mut out);
    out
}

/// RLP-encode a signed integer. RLP has no representation for negative
/// numbers, so this rejects them rather than silently encoding the
/// magnitude or the two's-complement bit pattern.
pub fn encode_int(value: &I256) -> Result<Vec<u8>> {
    if value.is_negative() {
        return Err(Error::MalformedEncoding(format!(
            "RLP cannot encode a negative integer ({value})"
        )));
    }
    let magnitude = U256::from_be_bytes(value.to_be_bytes::<32>());
    Ok(encode_uint(&magnitude))
}
