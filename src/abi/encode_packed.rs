//! Non-standard packed encoding (spec §4.2): no offsets, no length
//! prefixes, leaves written at their natural byte width. A distinct entry
//! point from [`super::encode::encode`] — the two modes are never mixed.

use super::types::{AbiType, ArrayDim, BaseKind};
use super::value::{validate, Value};
use crate::error::{Error, Result};

/// Packed-encode an ordered value list. Each value is concatenated with no
/// padding, offset, or length prefix (except that dynamic arrays still need
/// no delimiter since packed mode is meant for leaf-level concatenation,
/// per spec §4.2 this mode is typically used for hash preimages rather than
/// round-trippable data).
pub fn encode_packed(types: &[AbiType], values: &[Value]) -> Result<Vec<u8>> {
    if types.len() != values.len() {
        return Err(Error::incompatible(
            "<args>",
            format!("expected {} value(s), got {}", types.len(), values.len()),
        ));
    }
    let mut out = Vec::new();
    for (i, (ty, value)) in types.iter().zip(values).enumerate() {
        validate(ty, value, &format!("arg{i}"))?;
        encode_packed_value(ty, value, &mut out)?;
    }
    Ok(out)
}

fn encode_packed_value(ty: &AbiType, value: &Value, out: &mut Vec<u8>) -> Result<()> {
    if ty.outer_dim().is_some() {
        let Value::Array(elements) = value else {
            return Err(Error::incompatible("<value>", "expected array"));
        };
        let element_ty = ty.element_type();
        for element in elements {
            encode_packed_value(&element_ty, element, out)?;
        }
        return Ok(());
    }

    match (&ty.base, value) {
        (BaseKind::Address, Value::Address(addr)) => out.extend_from_slice(addr.as_slice()),
        (BaseKind::Bool, Value::Bool(b)) => out.push(u8::from(*b)),
        (BaseKind::String, Value::String(s)) => out.extend_from_slice(s.as_bytes()),
        (BaseKind::Bytes, Value::Bytes(b)) | (BaseKind::FixedBytes(_), Value::Bytes(b)) => {
            out.extend_from_slice(b)
        }
        (BaseKind::Uint(bits), Value::Uint(v)) => {
            let full = v.to_be_bytes::<32>();
            out.extend_from_slice(&full[32 - bits / 8..]);
        }
        (BaseKind::Int(bits), Value::Int(v)) => {
            let full = v.to_be_bytes::<32>();
            out.extend_from_slice(&full[32 - bits / 8..]);
        }
        (BaseKind::Tuple(children), Value::Tuple(values)) => {
            for (child_ty, child_val) in children.iter().zip(values) {
                encode_packed_value(child_ty, child_val, out)?;
            }
        }
        (base, other) => {
            return Err(Error::incompatible(
                "<value>",
                format!("type `{}` is incompatible with value `{other:?}`", base.canonical()),
            ))
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::types::parse_type;
    use alloy_primitives::U256;

    #[test]
    fn packs_uint8_at_natural_width() {
        let ty = parse_type("uint8").unwrap();
        let encoded = encode_packed(&[ty], &[Value::Uint(U256::from(255u64))]).unwrap();
        assert_eq!(encoded, vec![0xff]);
    }

    #[test]
    fn packs_string_with_no_length_prefix() {
        let ty = parse_type("string").unwrap();
        let encoded = encode_packed(&[ty], &[Value::String("hi".into())]).unwrap();
        assert_eq!(encoded, b"hi");
    }

    #[test]
    fn packs_array_with_no_offsets_or_lengths() {
        let ty = parse_type("uint16[2]").unwrap();
        let encoded = encode_packed(
            &[ty],
            &[Value::Array(vec![Value::Uint(U256::from(1u64)), Value::Uint(U256::from(2u64))])],
        )
        .unwrap();
        assert_eq!(encoded, vec![0x00, 0x01, 0x00, 0x02]);
    }
}
