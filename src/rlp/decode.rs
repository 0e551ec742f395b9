use crate::{Error, Result};
use alloy_primitives::{I256, U256};
use alloy_rlp::Decodable;

/// Decode a single RLP item and require that `buf` is fully consumed.
///
/// Top-level RLP decoding must account for every byte in the buffer (spec
/// §4.4); this is not implied by [`Decodable::decode`] alone, which is also
/// used to decode one item out of a larger buffer (e.g. one element of a
/// list) and therefore happily leaves trailing bytes for the caller to keep
/// parsing.
pub fn decode_exact<T: Decodable>(buf: &[u8]) -> Result<T> {
    let mut slice = buf;
    let value = T::decode(&mut slice).map_err(rlp_err)?;
    if !slice.is_empty() {
        return Err(Error::MalformedEncoding(format!(
            "{} unconsumed byte(s) after top-level RLP item",
            slice.len()
        )));
    }
    Ok(value)
}

/// Decode an RLP list into a `Vec<T>`.
pub fn decode_list<T: Decodable>(buf: &mut &[u8]) -> Result<Vec<T>> {
    Vec::<T>::decode(buf).map_err(rlp_err)
}

/// Decode an RLP-encoded non-negative integer into a signed container.
/// There is no sign bit in RLP, so the result is always `>= 0`; this exists
/// for symmetry with [`crate::rlp::encode_int`] on the writer side.
pub fn try_decode_int(buf: &mut &[u8]) -> Result<I256> {
    let magnitude = U256::decode(buf).map_err(rlp_err)?;
    I256::try_from(magnitude)
        .map_err(|_| Error::MalformedEncoding("decoded RLP integer overflows I256".into()))
}

fn rlp_err(err: alloy_rlp::Error) -> Error {
    Error::MalformedEncoding(err.to_string())
}
