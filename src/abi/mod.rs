//! Contract ABI encoding and decoding (spec §3, §4.2, §4.3).
//!
//! Types are described by [`types::AbiType`], built either by parsing a
//! Solidity-style type string or programmatically. [`encode::encode`] and
//! [`decode::decode`] implement the standard head/tail layout;
//! [`encode_packed::encode_packed`] implements the non-standard packed
//! mode. [`selector::selector`] and [`selector::topic0`] derive the
//! 4-/32-byte hashes contracts and event logs key on.

mod decode;
mod encode;
mod encode_packed;
mod keyed;
mod selector;
mod signature;
mod types;
mod value;

pub use decode::{decode, decode_with_config};
pub use encode::{encode, encode_calldata};
pub use encode_packed::encode_packed;
pub use keyed::keyed_components;
pub use selector::{selector, topic0};
pub use signature::{parse_signature, Param, Signature, SignatureKind};
pub use types::{parse_type, AbiType, ArrayDim, BaseKind};
pub use value::Value;
