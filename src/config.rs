//! Small configuration surface for the parts of the crate that have a knob.
//!
//! This intentionally does not parse files or environment variables — that
//! belongs to whatever CLI or service embeds this crate. It only holds the
//! values other modules need injected.

use std::time::Duration;

/// Configuration for a [`crate::nonce::NonceStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonceStoreConfig {
    /// How long `on_failure` keeps returning `NotRemovedShouldRetry` for the
    /// same nonce before treating the failure as terminal.
    ///
    /// The source material called this "~30s" without making it
    /// configurable; we promote it to the public surface per the open
    /// question recorded in DESIGN.md.
    pub grace_window: Duration,
}

impl Default for NonceStoreConfig {
    fn default() -> Self {
        Self { grace_window: Duration::from_secs(30) }
    }
}

/// Configuration for [`crate::abi::decode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecoderConfig {
    /// When `true` (the default), decoding rejects any input that a
    /// canonical encoder would never produce (non-minimal pointers, trailing
    /// bytes, non-zero padding). When `false`, those checks are skipped.
    ///
    /// Lenient mode exists for reading logs/calldata emitted by contracts
    /// that do not round-trip through this encoder; it is never used for
    /// values this crate itself produced.
    pub lenient: bool,
}
