//! Fixed-width address, arbitrary-precision integer, byte-string, and hex
//! view — the leaf types every other module builds on.
//!
//! Address and integer storage are delegated to `alloy_primitives`, which
//! already gives us correctly-sized, well-tested 160-bit/256-bit types; this
//! module adds the declared-bit-width constraint and two's-complement /
//! minimal-byte conversions the ABI and RLP encoders need on top.

mod address;
mod bytes;
mod hex;
mod integer;

pub use address::is_valid_address_str;
pub use bytes::{Bytes, FixedBytes};
pub use hex::HexView;
pub use integer::{
    fits_int, fits_uint, int_to_be_bytes_fixed32, uint_to_be_bytes_fixed32,
    uint_to_be_bytes_minimal,
};

/// Re-exported so callers don't need a direct `alloy_primitives` dependency
/// for the common case.
pub use alloy_primitives::{Address, I256, U256};
