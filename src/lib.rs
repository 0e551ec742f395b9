//! Binary codec layer for an Ethereum client: ABI encoding/decoding, RLP,
//! transaction assembly and signing, nonce reservation, and event-log
//! decoding.
//!
//! This crate has no opinion on transport (HTTP/WebSocket/IPC) or on how a
//! caller discovers gas price, chain id, or polling intervals — it only
//! produces and consumes the bytes that a JSON-RPC-speaking node expects.

#![warn(missing_docs, unreachable_pub)]
#![deny(unused_must_use, rust_2018_idioms)]

pub mod abi;
pub mod chains;
pub mod config;
pub mod error;
pub mod events;
pub mod nonce;
pub mod primitives;
pub mod rlp;
pub mod transaction;

pub use error::{Error, Result};
