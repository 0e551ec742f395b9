//! Event-log decoding: splitting a receipt log's topics and data back into
//! named parameter values against a parsed event [`Signature`] (spec §4.3).

use crate::abi::{decode, keyed_components, AbiType, BaseKind, Signature, SignatureKind};
use crate::error::{Error, Result};
use alloy_primitives::B256;

/// One decoded event parameter's value. Re-exported here so callers don't
/// need to reach into [`crate::abi`] just to match on a log's results.
pub use crate::abi::Value;

/// A receipt log as the event reader consumes it: ordered topics (`T0..Tn`)
/// plus the opaque data region.
#[derive(Debug, Clone)]
pub struct Log<'a> {
    /// `T0..Tn`. For a non-anonymous event, `topics[0]` is `topic0`.
    pub topics: &'a [B256],
    /// The non-indexed parameter region, ABI-tuple-encoded.
    pub data: &'a [u8],
}

/// Decode `log` against `signature`, returning each parameter's
/// (possibly suffixed) key alongside its value, in declaration order.
///
/// Indexed parameters of elementary (value) types are read directly from
/// their topic; indexed parameters of `string`, `bytes`, array, or tuple
/// type carry only their Keccak hash as the topic, so the value returned
/// for them is that raw 32-byte hash, not the original argument (spec
/// §4.3). Non-indexed parameters are decoded together as an ABI tuple
/// from `data`.
pub fn decode_log(signature: &Signature, log: &Log<'_>) -> Result<Vec<(String, Value)>> {
    if signature.kind != SignatureKind::Event {
        return Err(Error::InvalidType(format!(
            "`{}` is not an event signature",
            signature.name
        )));
    }

    let mut topics = log.topics.iter();

    if !signature.anonymous {
        let &topic0 = topics.next().ok_or(Error::SignatureMismatch)?;
        let expected = crate::abi::topic0(signature).expect("non-anonymous event always has a topic0");
        if topic0.0 != expected {
            return Err(Error::SignatureMismatch);
        }
    }

    let mut indexed_values = Vec::new();
    let mut non_indexed_params = Vec::new();

    for param in &signature.inputs {
        if param.indexed == Some(true) {
            let &topic = topics.next().ok_or_else(|| {
                Error::MalformedEncoding(format!(
                    "log is missing a topic for indexed parameter `{}`",
                    param.name.as_deref().unwrap_or("<unnamed>")
                ))
            })?;
            let value = if is_value_type(&param.ty) {
                decode(std::slice::from_ref(&param.ty), topic.as_slice())?
                    .into_iter()
                    .next()
                    .expect("decode of a single type yields a single value")
            } else {
                Value::Bytes(topic.as_slice().to_vec())
            };
            indexed_values.push((param, value));
        } else {
            non_indexed_params.push(param);
        }
    }

    let non_indexed_types: Vec<AbiType> = non_indexed_params.iter().map(|p| p.ty.clone()).collect();
    let non_indexed_values = decode(&non_indexed_types, log.data)?;

    let mut by_position: Vec<Option<Value>> = vec![None; signature.inputs.len()];
    for (param, value) in indexed_values {
        by_position[param.position] = Some(value);
    }
    for (param, value) in non_indexed_params.into_iter().zip(non_indexed_values) {
        by_position[param.position] = Some(value);
    }

    let values: Vec<Value> = by_position
        .into_iter()
        .enumerate()
        .map(|(i, v)| v.unwrap_or_else(|| unreachable!("every parameter position {i} is filled exactly once")))
        .collect();

    Ok(keyed_components(&signature.inputs, values))
}

/// Whether `ty` is an elementary (value) type: everything except `string`,
/// `bytes`, tuples, and arrays of any dimension. Matches the Solidity ABI
/// notion of "value type" used to decide indexed-parameter topic encoding.
fn is_value_type(ty: &AbiType) -> bool {
    if !ty.dims.is_empty() {
        return false;
    }
    matches!(
        ty.base,
        BaseKind::Address | BaseKind::Bool | BaseKind::Uint(_) | BaseKind::Int(_) | BaseKind::FixedBytes(_)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::parse_signature;
    use alloy_primitives::{keccak256, Address, U256};

    fn topic_word(bytes: &[u8]) -> B256 {
        let mut word = [0u8; 32];
        word[32 - bytes.len()..].copy_from_slice(bytes);
        B256::from(word)
    }

    #[test]
    fn decodes_transfer_event_with_two_indexed_addresses() {
        let signature = parse_signature(
            SignatureKind::Event,
            "Transfer(address indexed from, address indexed to, uint256 value)",
        )
        .unwrap();

        let from = Address::repeat_byte(0x11);
        let to = Address::repeat_byte(0x22);
        let mut data = vec![0u8; 32];
        data[..].copy_from_slice(&U256::from(500u64).to_be_bytes::<32>());

        let topic0 = B256::from(crate::abi::topic0(&signature).unwrap());
        let topics = [topic0, topic_word(from.as_slice()), topic_word(to.as_slice())];
        let log = Log { topics: &topics, data: &data };

        let decoded = decode_log(&signature, &log).unwrap();
        assert_eq!(decoded[0].0, "from");
        assert_eq!(decoded[0].1, Value::Address(from));
        assert_eq!(decoded[1].0, "to");
        assert_eq!(decoded[1].1, Value::Address(to));
        assert_eq!(decoded[2].0, "value");
        assert_eq!(decoded[2].1, Value::Uint(U256::from(500u64)));
    }

    #[test]
    fn rejects_mismatched_topic0() {
        let signature = parse_signature(SignatureKind::Event, "Ping(uint256 x)").unwrap();
        let wrong_topic0 = B256::from(keccak256(b"not the right signature"));
        let data = U256::from(1u64).to_be_bytes::<32>().to_vec();
        let log = Log { topics: &[wrong_topic0], data: &data };
        assert!(matches!(decode_log(&signature, &log), Err(Error::SignatureMismatch)));
    }

    #[test]
    fn indexed_string_topic_carries_raw_hash_not_original_value() {
        let signature = parse_signature(SignatureKind::Event, "Named(string indexed name)").unwrap();
        let hash = keccak256(b"alice");
        let topic0 = B256::from(crate::abi::topic0(&signature).unwrap());
        let topics = [topic0, B256::from(hash)];
        let log = Log { topics: &topics, data: &[] };

        let decoded = decode_log(&signature, &log).unwrap();
        assert_eq!(decoded[0].1, Value::Bytes(hash.0.to_vec()));
    }

    #[test]
    fn anonymous_event_has_no_topic0_to_verify() {
        let signature = parse_signature(SignatureKind::Event, "Ping(uint256 indexed x) anonymous").unwrap();
        let topics = [topic_word(&U256::from(7u64).to_be_bytes::<32>())];
        let log = Log { topics: &topics, data: &[] };
        let decoded = decode_log(&signature, &log).unwrap();
        assert_eq!(decoded[0].1, Value::Uint(U256::from(7u64)));
    }
}
