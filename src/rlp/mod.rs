//! Recursive Length Prefix (RLP) codec.
//!
//! RLP encodes exactly two atoms — byte strings and lists of items — per
//! the rules in the Ethereum Yellow Paper appendix B. The prefix arithmetic
//! itself (`0x80+L`, `0xB7+len(Lb)`, `0xC0+P`, `0xF7+len(Pb)`) is
//! implemented by [`alloy_rlp::Header`], which this crate depends on
//! directly rather than re-deriving; what this module adds on top is
//! integer-sign rejection (RLP has no negative numbers) and a top-level
//! decode entry point that enforces "no trailing bytes", which
//! [`alloy_rlp::Decodable::decode`] alone does not check for you.

mod decode;
mod encode;

pub use alloy_rlp::{length_of_length, Decodable, Encodable, Error as RlpError, Header, EMPTY_STRING_CODE};
pub use decode::{decode_exact, decode_list, try_decode_int};
pub use encode::{encode_bytes, encode_int, encode_list, encode_uint};

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;

    // Scenario (d) from the codec's test vectors.
    #[test]
    fn empty_string_encodes_to_0x80() {
        assert_eq!(encode_bytes(b""), vec![0x80]);
    }

    #[test]
    fn dog_encodes_with_single_length_prefix() {
        assert_eq!(encode_bytes(b"dog"), vec![0x83, 0x64, 0x6f, 0x67]);
    }

    #[test]
    fn list_of_two_short_strings() {
        let encoded = encode_list(&[Vec::from(*b"cat"), Vec::from(*b"dog")]);
        assert_eq!(
            encoded,
            vec![0xc8, 0x83, b'c', b'a', b't', 0x83, b'd', b'o', b'g']
        );
    }

    #[test]
    fn integer_1024_and_zero() {
        assert_eq!(encode_uint(&U256::from(1024u64)), vec![0x82, 0x04, 0x00]);
        assert_eq!(encode_uint(&U256::ZERO), vec![0x80]);
    }

    #[test]
    fn single_byte_below_0x80_is_itself() {
        assert_eq!(encode_bytes(&[0x00]), vec![0x00]);
        assert_eq!(encode_bytes(&[0x7f]), vec![0x7f]);
    }
}
