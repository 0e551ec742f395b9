//! Standard ABI encoding: the head/tail layout (spec §4.2).

use super::types::{AbiType, ArrayDim, BaseKind};
use super::value::{validate, Value};
use crate::error::{Error, Result};
use crate::primitives::{int_to_be_bytes_fixed32, uint_to_be_bytes_fixed32};
use alloy_primitives::U256;

const SLOT: usize = 32;

/// Encode an ordered parameter list as the standard ABI head/tail layout.
/// This is what a function call's argument block (after the selector) or an
/// event's non-indexed data block looks like.
pub fn encode(types: &[AbiType], values: &[Value]) -> Result<Vec<u8>> {
    if types.len() != values.len() {
        return Err(Error::incompatible(
            "<args>",
            format!("expected {} value(s), got {}", types.len(), values.len()),
        ));
    }
    for (i, (ty, value)) in types.iter().zip(values).enumerate() {
        validate(ty, value, &format!("arg{i}"))?;
    }
    encode_tuple(types, values)
}

/// Encode a 4-byte selector followed by the standard-encoded argument list.
pub fn encode_calldata(selector: [u8; 4], types: &[AbiType], values: &[Value]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(4 + types.len() * SLOT);
    out.extend_from_slice(&selector);
    out.extend(encode(types, values)?);
    Ok(out)
}

/// Encode a tuple's components as a standalone head/tail region (offsets
/// relative to the start of this region).
fn encode_tuple(types: &[AbiType], values: &[Value]) -> Result<Vec<u8>> {
    let mut heads: Vec<Option<Vec<u8>>> = Vec::with_capacity(types.len());
    let mut tails: Vec<Vec<u8>> = Vec::with_capacity(types.len());

    for (ty, value) in types.iter().zip(values) {
        if ty.is_dynamic() {
            heads.push(None);
            tails.push(encode_dynamic(ty, value)?);
        } else {
            heads.push(Some(encode_static(ty, value)?));
            tails.push(Vec::new());
        }
    }

    let head_size: usize = heads.iter().map(|h| h.as_ref().map_or(SLOT, Vec::len)).sum();
    let mut tail_offsets = Vec::with_capacity(tails.len());
    let mut running = head_size;
    for tail in &tails {
        tail_offsets.push(running);
        running += tail.len();
    }

    let mut out = Vec::with_capacity(running);
    for (i, head) in heads.iter().enumerate() {
        match head {
            Some(bytes) => out.extend_from_slice(bytes),
            None => out.extend_from_slice(&uint_to_be_bytes_fixed32(&U256::from(tail_offsets[i]))),
        }
    }
    for tail in &tails {
        out.extend_from_slice(tail);
    }
    Ok(out)
}

/// Inline encoding of a type already known to be static: for a leaf this is
/// exactly one 32-byte slot; for a static tuple or static fixed array it is
/// the concatenation of its components' own static encodings (which is how
/// a static type can occupy more than one slot in the head).
fn encode_static(ty: &AbiType, value: &Value) -> Result<Vec<u8>> {
    if let Some(ArrayDim::Fixed(n)) = ty.outer_dim() {
        let Value::Array(elements) = value else {
            return Err(Error::incompatible("<value>", "expected array"));
        };
        let element_ty = ty.element_type();
        let element_types: Vec<AbiType> = std::iter::repeat(element_ty).take(n).collect();
        return encode_tuple(&element_types, elements);
    }

    match &ty.base {
        BaseKind::Tuple(children) => {
            let Value::Tuple(values) = value else {
                return Err(Error::incompatible("<value>", "expected tuple"));
            };
            encode_tuple(children, values)
        }
        _ => Ok(encode_leaf(ty, value)?.to_vec()),
    }
}

/// Encoding of a type already known to be dynamic, used as a tail entry.
fn encode_dynamic(ty: &AbiType, value: &Value) -> Result<Vec<u8>> {
    if let Some(dim) = ty.outer_dim() {
        let Value::Array(elements) = value else {
            return Err(Error::incompatible("<value>", "expected array"));
        };
        if let ArrayDim::Fixed(n) = dim {
            if elements.len() != n {
                return Err(Error::incompatible("<value>", format!("expected {n} elements")));
            }
        }
        let element_ty = ty.element_type();
        let element_types: Vec<AbiType> = std::iter::repeat(element_ty).take(elements.len()).collect();
        let body = encode_tuple(&element_types, elements)?;
        return Ok(match dim {
            ArrayDim::Dynamic => {
                let mut out = uint_to_be_bytes_fixed32(&U256::from(elements.len())).to_vec();
                out.extend(body);
                out
            }
            ArrayDim::Fixed(_) => body,
        });
    }

    match &ty.base {
        BaseKind::Bytes => {
            let Value::Bytes(bytes) = value else {
                return Err(Error::incompatible("<value>", "expected bytes"));
            };
            Ok(encode_dynamic_bytes(bytes))
        }
        BaseKind::String => {
            let Value::String(s) = value else {
                return Err(Error::incompatible("<value>", "expected string"));
            };
            Ok(encode_dynamic_bytes(s.as_bytes()))
        }
        BaseKind::Tuple(children) => {
            let Value::Tuple(values) = value else {
                return Err(Error::incompatible("<value>", "expected tuple"));
            };
            encode_tuple(children, values)
        }
        _ => unreachable!("leaf type without dims is never classified dynamic"),
    }
}

fn encode_dynamic_bytes(bytes: &[u8]) -> Vec<u8> {
    let mut out = uint_to_be_bytes_fixed32(&U256::from(bytes.len())).to_vec();
    out.extend_from_slice(bytes);
    let padded_len = bytes.len().div_ceil(SLOT) * SLOT;
    out.resize(SLOT + padded_len, 0);
    out
}

fn encode_leaf(ty: &AbiType, value: &Value) -> Result<[u8; 32]> {
    match (&ty.base, value) {
        (BaseKind::Address, Value::Address(addr)) => {
            let mut slot = [0u8; 32];
            slot[12..].copy_from_slice(addr.as_slice());
            Ok(slot)
        }
        (BaseKind::Bool, Value::Bool(b)) => {
            let mut slot = [0u8; 32];
            slot[31] = u8::from(*b);
            Ok(slot)
        }
        (BaseKind::Uint(_), Value::Uint(v)) => Ok(uint_to_be_bytes_fixed32(v)),
        (BaseKind::Int(_), Value::Int(v)) => Ok(int_to_be_bytes_fixed32(v)),
        (BaseKind::FixedBytes(n), Value::Bytes(b)) => {
            let mut slot = [0u8; 32];
            slot[..*n].copy_from_slice(b);
            Ok(slot)
        }
        (base, other) => Err(Error::incompatible(
            "<leaf>",
            format!("type `{}` is incompatible with value kind `{}`", base.canonical(), other_kind(other)),
        )),
    }
}

fn other_kind(value: &Value) -> &'static str {
    match value {
        Value::Address(_) => "address",
        Value::Bool(_) => "bool",
        Value::String(_) => "string",
        Value::Bytes(_) => "bytes",
        Value::Uint(_) => "uint",
        Value::Int(_) => "int",
        Value::Array(_) => "array",
        Value::Tuple(_) => "tuple",
    }
}
