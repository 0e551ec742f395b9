//! Address string validation.
//!
//! [`alloy_primitives::Address`] already parses `0x`-prefixed hex and
//! renders EIP-55 checksums; this module only adds the stricter format
//! check the spec calls for (exactly 42 characters, `0x`-prefixed) so that
//! `"0x00"` or a bare 40-char string without the prefix are rejected before
//! they ever reach the address parser.

/// Whether `s` is a syntactically valid address string: `0x` followed by
/// exactly 40 hex digits (lowercase, uppercase, or EIP-55 mixed case — case
/// is not checked here, only that every character is a hex digit).
pub fn is_valid_address_str(s: &str) -> bool {
    let Some(hex) = s.strip_prefix("0x") else { return false };
    hex.len() == 40 && hex.bytes().all(|b| b.is_ascii_hexdigit())
}
