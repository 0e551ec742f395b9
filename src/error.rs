//! Crate-wide error type.
//!
//! Codec functions never retry; they surface the first error they hit. The
//! nonce store is the only component with its own retry loop, and even it
//! reports terminal conditions through [`Error::Nonce`].

use crate::nonce::NonceOutcome;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// The error kinds produced by this crate.
///
/// Variant names match the kinds named in the codec design: callers that
/// need to branch on failure category should match on this enum rather than
/// on the message text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A type string failed to parse, or named a base type / size suffix
    /// that the ABI does not define (e.g. `uint300`, `bytes33`).
    #[error("invalid type: {0}")]
    InvalidType(String),

    /// A runtime value did not match the shape or range of the descriptor
    /// it was validated or encoded against.
    #[error("value at {path} is incompatible with its type: {reason}")]
    IncompatibleValue {
        /// Dotted/bracketed path to the offending component, e.g.
        /// `param-2 (to) -> component-0 (amount)`.
        path: String,
        /// Human-readable reason.
        reason: String,
    },

    /// An integer value does not fit the declared bit width.
    #[error("value does not fit in {bits}-bit integer")]
    OutOfRange {
        /// The declared bit width that rejected the value.
        bits: usize,
    },

    /// RLP or ABI bytes were structurally invalid: non-canonical RLP
    /// length prefixes, a ABI pointer outside the buffer, a truncated
    /// buffer, or similar.
    #[error("malformed encoding: {0}")]
    MalformedEncoding(String),

    /// An event log's `topic0` did not match the hash of the expected
    /// event signature.
    #[error("log topic0 does not match the expected event signature")]
    SignatureMismatch,

    /// A `string` parameter decoded to bytes that are not valid UTF-8.
    #[error("decoded string is not valid utf-8")]
    Utf8Error(#[from] std::str::Utf8Error),

    /// An EIP-1559 transaction (or other typed transaction) was built
    /// against a chain that predates London.
    #[error("EIP-1559 transactions require a post-London chain")]
    LegacyChain,

    /// A nonce-store operation concluded with a non-success outcome.
    #[error("nonce store outcome: {0:?}")]
    Nonce(NonceOutcome),

    /// An opaque error from the RPC transport the caller supplied.
    #[error("transport error: {0}")]
    Transport(String),
}

impl Error {
    /// Construct an [`Error::IncompatibleValue`] from path segments.
    pub fn incompatible(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::IncompatibleValue { path: path.into(), reason: reason.into() }
    }

    /// Whether retrying the same operation unmodified has a chance of
    /// succeeding. Only nonce outcomes are ever retryable; malformed bytes,
    /// out-of-range values, and type errors are permanent for the same
    /// input.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Nonce(NonceOutcome::NotRemovedShouldRetry))
    }
}
