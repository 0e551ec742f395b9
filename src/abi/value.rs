//! The tagged value tree passed to the encoder and returned by the decoder.

use super::types::{AbiType, ArrayDim, BaseKind};
use crate::error::{Error, Result};
use alloy_primitives::{Address, I256, U256};

/// A value to encode, or a value produced by decoding, shaped to mirror an
/// [`AbiType`] descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// `address`.
    Address(Address),
    /// `bool`.
    Bool(bool),
    /// `string`.
    String(String),
    /// `bytes` (dynamic-length) or `bytesN` (fixed-length) content, raw.
    Bytes(Vec<u8>),
    /// `uintN`.
    Uint(U256),
    /// `intN`.
    Int(I256),
    /// Any array dimension (fixed or dynamic), element values in order.
    Array(Vec<Value>),
    /// A tuple, component values in declaration order.
    Tuple(Vec<Value>),
}

impl Value {
    /// A human-readable tag for error messages (`"address"`, `"array"`, …).
    fn kind_name(&self) -> &'static str {
        match self {
            Self::Address(_) => "address",
            Self::Bool(_) => "bool",
            Self::String(_) => "string",
            Self::Bytes(_) => "bytes",
            Self::Uint(_) => "uint",
            Self::Int(_) => "int",
            Self::Array(_) => "array",
            Self::Tuple(_) => "tuple",
        }
    }
}

/// Check that `value` is shape-compatible with `ty`, recursively. `path`
/// names the component for error messages (e.g. `"sam.param1"`).
pub fn validate(ty: &AbiType, value: &Value, path: &str) -> Result<()> {
    if let Some(dim) = ty.outer_dim() {
        let Value::Array(elements) = value else {
            return Err(Error::incompatible(path, format!("expected array, got {}", value.kind_name())));
        };
        if let ArrayDim::Fixed(n) = dim {
            if elements.len() != n {
                return Err(Error::incompatible(
                    path,
                    format!("expected {n} element(s), got {}", elements.len()),
                ));
            }
        }
        let element_ty = ty.element_type();
        for (i, element) in elements.iter().enumerate() {
            validate(&element_ty, element, &format!("{path}[{i}]"))?;
        }
        return Ok(());
    }

    match (&ty.base, value) {
        (BaseKind::Address, Value::Address(_)) => Ok(()),
        (BaseKind::Bool, Value::Bool(_)) => Ok(()),
        (BaseKind::String, Value::String(_)) => Ok(()),
        (BaseKind::Bytes, Value::Bytes(_)) => Ok(()),
        (BaseKind::FixedBytes(n), Value::Bytes(b)) => {
            if b.len() != *n {
                Err(Error::incompatible(path, format!("expected {n} byte(s), got {}", b.len())))
            } else {
                Ok(())
            }
        }
        (BaseKind::Uint(bits), Value::Uint(v)) => {
            if crate::primitives::fits_uint(*bits, v) {
                Ok(())
            } else {
                Err(Error::OutOfRange { bits: *bits })
            }
        }
        (BaseKind::Int(bits), Value::Int(v)) => {
            if crate::primitives::fits_int(*bits, v) {
                Ok(())
            } else {
                Err(Error::OutOfRange { bits: *bits })
            }
        }
        (BaseKind::Tuple(children), Value::Tuple(values)) => {
            if children.len() != values.len() {
                return Err(Error::incompatible(
                    path,
                    format!("tuple arity mismatch: expected {}, got {}", children.len(), values.len()),
                ));
            }
            for (i, (child_ty, child_val)) in children.iter().zip(values).enumerate() {
                validate(child_ty, child_val, &format!("{path}.{i}"))?;
            }
            Ok(())
        }
        (_, other) => Err(Error::incompatible(
            path,
            format!("type `{}` is incompatible with value kind `{}`", ty.canonical(), other.kind_name()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::types::parse_type;

    #[test]
    fn rejects_wrong_fixed_array_length() {
        let ty = parse_type("uint256[3]").unwrap();
        let value = Value::Array(vec![Value::Uint(U256::ZERO), Value::Uint(U256::ZERO)]);
        assert!(validate(&ty, &value, "p").is_err());
    }

    #[test]
    fn rejects_oversized_uint() {
        let ty = parse_type("uint8").unwrap();
        let value = Value::Uint(U256::from(300));
        assert!(matches!(validate(&ty, &value, "p"), Err(Error::OutOfRange { bits: 8 })));
    }

    #[test]
    fn accepts_matching_tuple() {
        let ty = parse_type("(uint256,bool)").unwrap();
        let value = Value::Tuple(vec![Value::Uint(U256::from(1)), Value::Bool(true)]);
        assert!(validate(&ty, &value, "p").is_ok());
    }
}
