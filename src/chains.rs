//! Well-known chain-id registry.
//!
//! Consumed for display and polling-interval selection only; nothing in this
//! crate consults it to decide wire format or signature rules — that is
//! governed entirely by the chain id a caller supplies to the transaction
//! model. The one exception is [`ensure_eip1559_supported`], which exists
//! purely to surface `Error::LegacyChain` early for chains known in advance
//! to have never adopted the fork; it never second-guesses an unrecognized
//! chain id.

use crate::error::{Error, Result};

/// Ethereum Classic forked away before London and has never adopted
/// EIP-1559.
const ETHEREUM_CLASSIC: u64 = 61;

/// A well-known EVM chain id with a human-readable name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainInfo {
    /// The numeric chain id as it appears in EIP-155 `v` values and
    /// `eth_chainId` responses.
    pub id: u64,
    /// Human-readable name, for logging and UIs.
    pub name: &'static str,
}

/// Look up a well-known chain by id. Returns `None` for chain ids this
/// registry does not recognize — that is not an error, just an unnamed
/// chain.
pub const fn lookup(id: u64) -> Option<ChainInfo> {
    let name = match id {
        1 => "Ethereum Mainnet",
        5 => "Goerli",
        10 => "OP Mainnet",
        11_155_111 => "Sepolia",
        17_000 => "Holesky",
        137 => "Polygon",
        8453 => "Base",
        42_161 => "Arbitrum One",
        31_337 => "Local Test Node",
        ETHEREUM_CLASSIC => "Ethereum Classic",
        _ => return None,
    };
    Some(ChainInfo { id, name })
}

/// Reject building an EIP-1559 transaction against a chain id this
/// registry knows predates London. Unknown chain ids are always accepted —
/// this check only flags chains confirmed never to have adopted the fork.
pub fn ensure_eip1559_supported(chain_id: u64) -> Result<()> {
    if chain_id == ETHEREUM_CLASSIC {
        Err(Error::LegacyChain)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_chains_resolve() {
        assert_eq!(lookup(1).unwrap().name, "Ethereum Mainnet");
        assert_eq!(lookup(11_155_111).unwrap().name, "Sepolia");
        assert_eq!(lookup(31_337).unwrap().name, "Local Test Node");
    }

    #[test]
    fn unknown_chain_is_none() {
        assert!(lookup(999_999_999).is_none());
    }

    #[test]
    fn eip1559_is_permitted_by_default() {
        assert!(ensure_eip1559_supported(1).is_ok());
        assert!(ensure_eip1559_supported(123_456).is_ok());
    }

    #[test]
    fn ethereum_classic_rejects_eip1559() {
        assert!(matches!(ensure_eip1559_supported(ETHEREUM_CLASSIC), Err(Error::LegacyChain)));
    }
}
