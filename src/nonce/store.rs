//! The [`NonceStore`] trait and its outcome vocabulary (spec §4.6).

use crate::config::NonceStoreConfig;
use crate::error::Result;

/// The result of resolving an issued nonce against a submission outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonceOutcome {
    /// The nonce marker (and any `failed` sibling) was deleted cleanly:
    /// the grace window elapsed and no later nonce is outstanding.
    RemovedOkay,
    /// The marker was deleted, but a marker with a higher index was found
    /// outstanding — the account's nonce sequence has a gap and must be
    /// reconciled against the network.
    RemovedGapDetected,
    /// Still within the grace window (or this is the first failure); the
    /// same nonce remains reserved and the caller should retry submission.
    NotRemovedShouldRetry,
    /// The call reverted or ran out of gas on-chain: the nonce was
    /// genuinely consumed even though the caller's intent failed. Markers
    /// are preserved.
    NotRemovedGasSpent,
    /// No marker exists for the requested nonce.
    NonceNotFound,
    /// A storage error (disk full, corrupted timestamp, concurrent
    /// directory deletion, …) prevented reconciliation; the store degrades
    /// to this outcome rather than panicking or propagating the raw I/O
    /// error.
    NotRemovedDueToError,
}

/// Supplies the current on-chain transaction count for an account, used to
/// seed [`NonceStore::reserve`] when no local markers exist yet. Kept as a
/// narrow trait rather than a concrete RPC type so the store never depends
/// on a transport.
pub trait NonceSeed: Send + Sync {
    /// The on-chain transaction count (i.e. the next nonce the network
    /// would accept) for the account this store tracks.
    fn transaction_count(&self) -> Result<u64>;
}

impl<F: Fn() -> Result<u64> + Send + Sync> NonceSeed for F {
    fn transaction_count(&self) -> Result<u64> {
        self()
    }
}

/// A crash-safe, strictly-increasing per-account nonce allocator (spec
/// §4.6). Implementations guarantee single-writer semantics per nonce
/// integer via exclusive-create (or an equivalent compare-and-swap), so
/// two concurrent [`reserve`](NonceStore::reserve) calls never return the
/// same value.
pub trait NonceStore: Send + Sync {
    /// The configuration this store was built with.
    fn config(&self) -> &NonceStoreConfig;

    /// Return the smallest nonce not yet reserved. Seeds from the injected
    /// [`NonceSeed`] if no markers exist yet.
    fn reserve(&self) -> Result<u64>;

    /// Acknowledge that `n` was submitted and confirmed successfully:
    /// drops the `failed` sibling marker if present. The `nonce` marker
    /// itself is preserved as proof the slot was consumed.
    fn on_success(&self, n: u64) -> Result<()>;

    /// Acknowledge that submitting `n` failed (transport error, timeout,
    /// …). Returns [`NonceOutcome::NotRemovedShouldRetry`] while within
    /// the grace window, otherwise resolves the marker per spec §4.6.
    fn on_failure(&self, n: u64) -> Result<NonceOutcome>;

    /// Acknowledge that `n`'s transaction reverted on-chain: gas was
    /// spent, so the nonce is not reclaimable. Always
    /// [`NonceOutcome::NotRemovedGasSpent`] if the marker exists.
    fn on_revert(&self, n: u64) -> Result<NonceOutcome>;

    /// Acknowledge that `n`'s transaction ran out of gas on-chain. Same
    /// resolution as [`Self::on_revert`].
    fn on_out_of_gas(&self, n: u64) -> Result<NonceOutcome>;

    /// The RPC rejected `n` as stale ("nonce too low"). Returns a fresh
    /// nonce strictly greater than the current maximum reserved (or
    /// on-chain) nonce.
    fn on_nonce_too_low(&self, n: u64) -> Result<u64>;
}
