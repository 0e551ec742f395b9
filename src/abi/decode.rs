//! Standard ABI decoding: the inverse of [`super::encode::encode`], with the
//! pointer, length, and bit-width validation spec §4.3 requires.

use super::types::{AbiType, ArrayDim, BaseKind};
use super::value::Value;
use crate::config::DecoderConfig;
use crate::error::{Error, Result};
use alloy_primitives::{Address, I256, U256};

const SLOT: usize = 32;

/// Decode a standard-encoded argument list against its parameter types,
/// using the default (strict) [`DecoderConfig`].
pub fn decode(types: &[AbiType], buf: &[u8]) -> Result<Vec<Value>> {
    decode_with_config(types, buf, &DecoderConfig::default())
}

/// Decode a standard-encoded argument list, honoring `config.lenient` to
/// skip the non-canonical-padding checks a strict decode applies.
pub fn decode_with_config(types: &[AbiType], buf: &[u8], config: &DecoderConfig) -> Result<Vec<Value>> {
    decode_tuple_at(types, buf, 0, config)
}

/// Decode a tuple's components, with `base` the absolute offset (into
/// `buf`) of this tuple's own head — every pointer encountered while
/// decoding these components is relative to `base`.
fn decode_tuple_at(types: &[AbiType], buf: &[u8], base: usize, config: &DecoderConfig) -> Result<Vec<Value>> {
    let mut values = Vec::with_capacity(types.len());
    let mut cursor = base;
    for ty in types {
        if ty.is_dynamic() {
            let ptr = read_slot_as_usize(buf, cursor)?;
            if !config.lenient && ptr % SLOT != 0 {
                return Err(Error::MalformedEncoding("ABI pointer is not a multiple of 32".into()));
            }
            let target = base.checked_add(ptr).ok_or_else(|| {
                Error::MalformedEncoding("ABI pointer overflowed buffer addressing".into())
            })?;
            if target > buf.len() {
                return Err(Error::MalformedEncoding("ABI pointer points outside buffer".into()));
            }
            values.push(decode_dynamic_at(ty, buf, target, config)?);
            cursor += SLOT;
        } else {
            let (value, consumed) = decode_static_at(ty, buf, cursor, config)?;
            values.push(value);
            cursor += consumed;
        }
    }
    Ok(values)
}

fn decode_static_at(ty: &AbiType, buf: &[u8], offset: usize, config: &DecoderConfig) -> Result<(Value, usize)> {
    if let Some(ArrayDim::Fixed(n)) = ty.outer_dim() {
        let element_ty = ty.element_type();
        let element_types: Vec<AbiType> = std::iter::repeat(element_ty).take(n).collect();
        let values = decode_tuple_at(&element_types, buf, offset, config)?;
        let total = static_size_of_all(&element_types);
        return Ok((Value::Array(values), total));
    }

    match &ty.base {
        BaseKind::Tuple(children) => {
            let values = decode_tuple_at(children, buf, offset, config)?;
            let total = static_size_of_all(children);
            Ok((Value::Tuple(values), total))
        }
        _ => {
            let value = decode_leaf(ty, buf, offset, config)?;
            Ok((value, SLOT))
        }
    }
}

fn static_size_of_all(types: &[AbiType]) -> usize {
    types.iter().map(static_size).sum()
}

fn static_size(ty: &AbiType) -> usize {
    if let Some(ArrayDim::Fixed(n)) = ty.outer_dim() {
        return n * static_size(&ty.element_type());
    }
    match &ty.base {
        BaseKind::Tuple(children) => children.iter().map(static_size).sum(),
        _ => SLOT,
    }
}

fn decode_dynamic_at(ty: &AbiType, buf: &[u8], offset: usize, config: &DecoderConfig) -> Result<Value> {
    if let Some(dim) = ty.outer_dim() {
        let element_ty = ty.element_type();
        return match dim {
            ArrayDim::Dynamic => {
                let len = read_slot_as_usize(buf, offset)?;
                let element_types: Vec<AbiType> = std::iter::repeat(element_ty).take(len).collect();
                let values = decode_tuple_at(&element_types, buf, offset + SLOT, config)?;
                Ok(Value::Array(values))
            }
            ArrayDim::Fixed(n) => {
                let element_types: Vec<AbiType> = std::iter::repeat(element_ty).take(n).collect();
                let values = decode_tuple_at(&element_types, buf, offset, config)?;
                Ok(Value::Array(values))
            }
        };
    }

    match &ty.base {
        BaseKind::Bytes => Ok(Value::Bytes(read_dynamic_bytes(buf, offset)?)),
        BaseKind::String => {
            let raw = read_dynamic_bytes(buf, offset)?;
            let s = std::str::from_utf8(&raw)?;
            Ok(Value::String(s.to_owned()))
        }
        BaseKind::Tuple(children) => Ok(Value::Tuple(decode_tuple_at(children, buf, offset, config)?)),
        _ => unreachable!("leaf type without dims is never classified dynamic"),
    }
}

fn read_dynamic_bytes(buf: &[u8], offset: usize) -> Result<Vec<u8>> {
    let len = read_slot_as_usize(buf, offset)?;
    let start = offset + SLOT;
    let end = start
        .checked_add(len)
        .ok_or_else(|| Error::MalformedEncoding("bytes length overflowed buffer addressing".into()))?;
    if end > buf.len() {
        return Err(Error::MalformedEncoding("bytes/string value truncated".into()));
    }
    Ok(buf[start..end].to_vec())
}

fn decode_leaf(ty: &AbiType, buf: &[u8], offset: usize, config: &DecoderConfig) -> Result<Value> {
    let slot = read_slot(buf, offset)?;
    match &ty.base {
        BaseKind::Address => {
            if !config.lenient && slot[..12].iter().any(|&b| b != 0) {
                return Err(Error::MalformedEncoding("address slot has non-zero padding".into()));
            }
            Ok(Value::Address(Address::from_slice(&slot[12..])))
        }
        BaseKind::Bool => {
            let value = U256::from_be_bytes(*slot);
            if !config.lenient && value > U256::from(1u64) {
                return Err(Error::MalformedEncoding("bool slot is neither 0 nor 1".into()));
            }
            Ok(Value::Bool(value != U256::ZERO))
        }
        BaseKind::Uint(bits) => {
            let value = U256::from_be_bytes(*slot);
            if !crate::primitives::fits_uint(*bits, &value) {
                return Err(Error::OutOfRange { bits: *bits });
            }
            Ok(Value::Uint(value))
        }
        BaseKind::Int(bits) => {
            let value = I256::from_be_bytes(*slot);
            if !crate::primitives::fits_int(*bits, &value) {
                return Err(Error::OutOfRange { bits: *bits });
            }
            Ok(Value::Int(value))
        }
        BaseKind::FixedBytes(n) => {
            if !config.lenient && slot[*n..].iter().any(|&b| b != 0) {
                return Err(Error::MalformedEncoding("bytesN slot has non-zero right padding".into()));
            }
            Ok(Value::Bytes(slot[..*n].to_vec()))
        }
        BaseKind::Bytes | BaseKind::String | BaseKind::Tuple(_) => {
            unreachable!("dynamic/tuple types never reach decode_leaf")
        }
    }
}

fn read_slot(buf: &[u8], offset: usize) -> Result<[u8; 32]> {
    let end = offset
        .checked_add(SLOT)
        .ok_or_else(|| Error::MalformedEncoding("slot offset overflowed buffer addressing".into()))?;
    if end > buf.len() {
        return Err(Error::MalformedEncoding("buffer truncated before expected slot".into()));
    }
    let mut out = [0u8; 32];
    out.copy_from_slice(&buf[offset..end]);
    Ok(out)
}

fn read_slot_as_usize(buf: &[u8], offset: usize) -> Result<usize> {
    let slot = read_slot(buf, offset)?;
    let value = U256::from_be_bytes(slot);
    usize::try_from(value).map_err(|_| Error::MalformedEncoding("offset/length exceeds usize range".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::encode::encode;
    use crate::abi::types::parse_type;
    use proptest::prelude::*;

    #[test]
    fn round_trips_baz_uint32_bool() {
        let types = vec![parse_type("uint32").unwrap(), parse_type("bool").unwrap()];
        let values = vec![Value::Uint(U256::from(69u64)), Value::Bool(true)];
        let encoded = encode(&types, &values).unwrap();
        let decoded = decode(&types, &encoded).unwrap();
        assert_eq!(decoded, values);
    }

    #[test]
    fn round_trips_sam_mixed_dynamic() {
        let types = vec![
            parse_type("bytes").unwrap(),
            parse_type("bool").unwrap(),
            parse_type("uint256[]").unwrap(),
        ];
        let values = vec![
            Value::Bytes(b"dave".to_vec()),
            Value::Bool(true),
            Value::Array(vec![Value::Uint(U256::from(1u64)), Value::Uint(U256::from(2u64)), Value::Uint(U256::from(3u64))]),
        ];
        let encoded = encode(&types, &values).unwrap();
        let decoded = decode(&types, &encoded).unwrap();
        assert_eq!(decoded, values);
    }

    #[test]
    fn rejects_pointer_outside_buffer() {
        let types = vec![parse_type("bytes").unwrap()];
        let mut buf = vec![0u8; 32];
        buf[31] = 200; // offset way past the (empty) buffer
        assert!(decode(&types, &buf).is_err());
    }

    #[test]
    fn rejects_pointer_not_a_multiple_of_32() {
        let types = vec![parse_type("bytes").unwrap()];
        let mut buf = vec![0u8; 32];
        buf[31] = 31; // offset 31, not a multiple of 32
        assert!(decode(&types, &buf).is_err());
    }

    #[test]
    fn rejects_non_canonical_bool_slot() {
        let types = vec![parse_type("bool").unwrap()];
        let mut buf = vec![0u8; 32];
        buf[31] = 2;
        assert!(decode(&types, &buf).is_err());
    }

    #[test]
    fn rejects_invalid_utf8_string() {
        let types = vec![parse_type("string").unwrap()];
        let mut buf = vec![0u8; 64];
        buf[31] = 32; // offset
        buf[63] = 1; // length = 1
        buf.push(0xff); // invalid utf8 byte
        buf.extend_from_slice(&[0u8; 31]);
        assert!(decode(&types, &buf).is_err());
    }

    proptest! {
        #[test]
        fn uint256_bool_bytes_round_trip(
            n in any::<[u8; 32]>(),
            b in any::<bool>(),
            data in proptest::collection::vec(any::<u8>(), 0..128),
        ) {
            let types = vec![
                parse_type("uint256").unwrap(),
                parse_type("bool").unwrap(),
                parse_type("bytes").unwrap(),
            ];
            let values = vec![Value::Uint(U256::from_be_bytes(n)), Value::Bool(b), Value::Bytes(data)];
            let encoded = encode(&types, &values).unwrap();
            let decoded = decode(&types, &encoded).unwrap();
            prop_assert_eq!(decoded, values);
        }

        #[test]
        fn dynamic_uint_array_round_trips(xs in proptest::collection::vec(any::<u64>(), 0..16)) {
            let types = vec![parse_type("uint256[]").unwrap()];
            let values = vec![Value::Array(xs.iter().map(|&x| Value::Uint(U256::from(x))).collect())];
            let encoded = encode(&types, &values).unwrap();
            let decoded = decode(&types, &encoded).unwrap();
            prop_assert_eq!(decoded, values);
        }

        #[test]
        fn string_round_trips(s in ".{0,64}") {
            let types = vec![parse_type("string").unwrap()];
            let values = vec![Value::String(s)];
            let encoded = encode(&types, &values).unwrap();
            let decoded = decode(&types, &encoded).unwrap();
            prop_assert_eq!(decoded, values);
        }
    }
}
