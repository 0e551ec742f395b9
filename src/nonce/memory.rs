//! In-memory [`NonceStore`] for tests and for callers that don't need
//! cross-process crash safety.

use super::store::{NonceOutcome, NonceSeed, NonceStore};
use crate::config::NonceStoreConfig;
use crate::error::Result;
use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

struct Marker {
    failed_since: Option<Instant>,
}

struct State {
    markers: BTreeMap<u64, Marker>,
    next_candidate: u64,
    seeded: bool,
}

/// A [`NonceStore`] backed by an in-process `BTreeMap`. State is lost on
/// process exit; use [`super::FsNonceStore`] when that matters.
pub struct InMemoryNonceStore<S: NonceSeed> {
    config: NonceStoreConfig,
    seed: S,
    state: Mutex<State>,
}

impl<S: NonceSeed> InMemoryNonceStore<S> {
    /// Build an empty store that seeds its first [`reserve`](NonceStore::reserve)
    /// call from `seed`.
    pub fn new(seed: S, config: NonceStoreConfig) -> Self {
        Self {
            config,
            seed,
            state: Mutex::new(State { markers: BTreeMap::new(), next_candidate: 0, seeded: false }),
        }
    }

    fn reserve_from(&self, state: &mut State, min: u64) -> u64 {
        let mut candidate = min.max(state.next_candidate);
        while state.markers.contains_key(&candidate) {
            candidate += 1;
        }
        state.markers.insert(candidate, Marker { failed_since: None });
        state.next_candidate = candidate + 1;
        candidate
    }
}

impl<S: NonceSeed> NonceStore for InMemoryNonceStore<S> {
    fn config(&self) -> &NonceStoreConfig {
        &self.config
    }

    fn reserve(&self) -> Result<u64> {
        let mut state = self.state.lock().expect("nonce store mutex poisoned");
        if !state.seeded {
            let seed = self.seed.transaction_count()?;
            state.next_candidate = state.next_candidate.max(seed);
            state.seeded = true;
        }
        let n = self.reserve_from(&mut state, 0);
        debug!(target: "nonce", nonce = n, "reserved nonce");
        Ok(n)
    }

    fn on_success(&self, n: u64) -> Result<()> {
        let mut state = self.state.lock().expect("nonce store mutex poisoned");
        if let Some(marker) = state.markers.get_mut(&n) {
            marker.failed_since = None;
        }
        Ok(())
    }

    fn on_failure(&self, n: u64) -> Result<NonceOutcome> {
        let mut state = self.state.lock().expect("nonce store mutex poisoned");
        let Some(marker) = state.markers.get(&n) else {
            return Ok(NonceOutcome::NonceNotFound);
        };

        let now = Instant::now();
        match marker.failed_since {
            None => {
                state.markers.get_mut(&n).expect("checked above").failed_since = Some(now);
                debug!(target: "nonce", nonce = n, "marked nonce failed, starting grace window");
                Ok(NonceOutcome::NotRemovedShouldRetry)
            }
            Some(since) if now.duration_since(since) < self.config.grace_window => {
                Ok(NonceOutcome::NotRemovedShouldRetry)
            }
            Some(_) => {
                let gap_detected = state.markers.keys().any(|&k| k > n);
                state.markers.remove(&n);
                if gap_detected {
                    warn!(target: "nonce", nonce = n, "removed failed nonce, gap detected above it");
                    Ok(NonceOutcome::RemovedGapDetected)
                } else {
                    debug!(target: "nonce", nonce = n, "removed failed nonce, no gap");
                    Ok(NonceOutcome::RemovedOkay)
                }
            }
        }
    }

    fn on_revert(&self, n: u64) -> Result<NonceOutcome> {
        let state = self.state.lock().expect("nonce store mutex poisoned");
        Ok(if state.markers.contains_key(&n) { NonceOutcome::NotRemovedGasSpent } else { NonceOutcome::NonceNotFound })
    }

    fn on_out_of_gas(&self, n: u64) -> Result<NonceOutcome> {
        self.on_revert(n)
    }

    fn on_nonce_too_low(&self, n: u64) -> Result<u64> {
        let mut state = self.state.lock().expect("nonce store mutex poisoned");
        if !state.seeded {
            state.seeded = true;
        }
        Ok(self.reserve_from(&mut state, n + 1))
    }
}

// Helper used by tests elsewhere in this crate: an always-zero seed.
#[cfg(test)]
pub(crate) fn zero_seed() -> impl NonceSeed {
    || Ok(0u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::thread;

    #[test]
    fn five_concurrent_reserves_yield_distinct_values() {
        let store = std::sync::Arc::new(InMemoryNonceStore::new(zero_seed(), NonceStoreConfig::default()));
        let handles: Vec<_> = (0..5)
            .map(|_| {
                let store = store.clone();
                thread::spawn(move || store.reserve().unwrap())
            })
            .collect();
        let mut values: Vec<u64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        values.sort_unstable();
        assert_eq!(values, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn on_failure_outside_grace_window_with_higher_marker_detects_gap() {
        let config = NonceStoreConfig { grace_window: Duration::from_millis(0) };
        let store = InMemoryNonceStore::new(zero_seed(), config);
        for _ in 0..5 {
            store.reserve().unwrap();
        }
        // first call starts the grace window
        assert_matches!(store.on_failure(3).unwrap(), NonceOutcome::NotRemovedShouldRetry);
        // with a zero grace window, the very next call is already outside it
        assert_matches!(store.on_failure(3).unwrap(), NonceOutcome::RemovedGapDetected);
        assert_matches!(store.on_failure(3).unwrap(), NonceOutcome::NonceNotFound);
    }

    #[test]
    fn on_failure_with_no_higher_marker_removes_cleanly() {
        let config = NonceStoreConfig { grace_window: Duration::from_millis(0) };
        let store = InMemoryNonceStore::new(zero_seed(), config);
        store.reserve().unwrap(); // 0
        store.on_failure(0).unwrap();
        assert_matches!(store.on_failure(0).unwrap(), NonceOutcome::RemovedOkay);
    }

    #[test]
    fn revert_preserves_marker_as_gas_spent() {
        let store = InMemoryNonceStore::new(zero_seed(), NonceStoreConfig::default());
        store.reserve().unwrap();
        assert_matches!(store.on_revert(0).unwrap(), NonceOutcome::NotRemovedGasSpent);
        // still present: a second reserve does not reuse it
        assert_eq!(store.reserve().unwrap(), 1);
    }

    #[test]
    fn nonce_too_low_returns_strictly_greater_value() {
        let store = InMemoryNonceStore::new(zero_seed(), NonceStoreConfig::default());
        for _ in 0..3 {
            store.reserve().unwrap();
        }
        let fresh = store.on_nonce_too_low(5).unwrap();
        assert_eq!(fresh, 6);
    }
}
