//! Byte-string re-exports.
//!
//! `bytes`/`string` (dynamic) map to [`alloy_primitives::Bytes`];
//! `bytes1..bytes32` (fixed) map to [`alloy_primitives::FixedBytes`].

pub use alloy_primitives::{Bytes, FixedBytes};
