//! Filesystem-backed [`NonceStore`]: crash-safe across process restarts via
//! exclusive-create marker files (spec §4.6, §6).

use super::store::{NonceOutcome, NonceSeed, NonceStore};
use crate::config::NonceStoreConfig;
use crate::error::{Error, Result};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

/// A [`NonceStore`] that persists one marker file per nonce under a
/// per-account directory, so the store survives a crash between reserving
/// a nonce and acting on its outcome.
///
/// One instance owns one account's directory. The directory is created on
/// first use; files other than `<n>.nonce`/`<n>.failed` are ignored.
pub struct FsNonceStore<S: NonceSeed> {
    dir: PathBuf,
    config: NonceStoreConfig,
    seed: S,
    // Serializes the read-scan-decide sequence in `reserve`/`on_failure`;
    // the exclusive-create itself is what makes cross-process races safe,
    // this mutex only protects this store's own reserve/resolve ordering
    // against other threads sharing the same handle.
    guard: Mutex<()>,
}

impl<S: NonceSeed> FsNonceStore<S> {
    /// Open (creating if necessary) the nonce directory at `dir`.
    pub fn open(dir: impl Into<PathBuf>, seed: S, config: NonceStoreConfig) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(io_err)?;
        Ok(Self { dir, config, seed, guard: Mutex::new(()) })
    }

    fn nonce_path(&self, n: u64) -> PathBuf {
        self.dir.join(format!("{n}.nonce"))
    }

    fn failed_path(&self, n: u64) -> PathBuf {
        self.dir.join(format!("{n}.failed"))
    }

    fn marker_exists(&self, n: u64) -> bool {
        self.nonce_path(n).exists()
    }

    fn any_marker_above(&self, n: u64) -> Result<bool> {
        for entry in fs::read_dir(&self.dir).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            if let Some(index) = parse_nonce_filename(&entry.file_name().to_string_lossy(), ".nonce") {
                if index > n {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    fn current_max_reserved(&self) -> Result<Option<u64>> {
        let mut max = None;
        for entry in fs::read_dir(&self.dir).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            if let Some(index) = parse_nonce_filename(&entry.file_name().to_string_lossy(), ".nonce") {
                max = Some(max.map_or(index, |m: u64| m.max(index)));
            }
        }
        Ok(max)
    }

    fn try_create_marker(&self, n: u64) -> io::Result<bool> {
        match OpenOptions::new().write(true).create_new(true).open(self.nonce_path(n)) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn reserve_from(&self, min: u64) -> Result<u64> {
        let mut candidate = min;
        loop {
            match self.try_create_marker(candidate) {
                Ok(true) => return Ok(candidate),
                Ok(false) => candidate += 1,
                Err(e) => return Err(io_err(e)),
            }
        }
    }

    fn write_failed_marker(&self, n: u64) -> Result<()> {
        let timestamp = epoch_millis_now().to_string();
        fs::write(self.failed_path(n), timestamp).map_err(io_err)
    }

    fn read_failed_marker(&self, n: u64) -> Result<Option<Duration>> {
        match fs::read_to_string(self.failed_path(n)) {
            Ok(contents) => {
                let millis: u64 = contents
                    .trim()
                    .parse()
                    .map_err(|_| Error::MalformedEncoding("corrupted nonce failure timestamp".into()))?;
                Ok(Some(Duration::from_millis(millis)))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(_) => Err(Error::Nonce(NonceOutcome::NotRemovedDueToError)),
        }
    }

    fn remove_markers(&self, n: u64) {
        let _ = fs::remove_file(self.nonce_path(n));
        let _ = fs::remove_file(self.failed_path(n));
    }
}

impl<S: NonceSeed> NonceStore for FsNonceStore<S> {
    fn config(&self) -> &NonceStoreConfig {
        &self.config
    }

    fn reserve(&self) -> Result<u64> {
        let _lock = self.guard.lock().expect("nonce store mutex poisoned");
        let min = match self.current_max_reserved()? {
            Some(max) => max + 1,
            None => self.seed.transaction_count()?,
        };
        let n = self.reserve_from(min)?;
        debug!(target: "nonce", dir = %self.dir.display(), nonce = n, "reserved nonce");
        Ok(n)
    }

    fn on_success(&self, n: u64) -> Result<()> {
        let _ = fs::remove_file(self.failed_path(n));
        Ok(())
    }

    fn on_failure(&self, n: u64) -> Result<NonceOutcome> {
        let _lock = self.guard.lock().expect("nonce store mutex poisoned");
        if !self.marker_exists(n) {
            debug!(target: "nonce", dir = %self.dir.display(), nonce = n, "on_failure for unreserved nonce");
            return Ok(NonceOutcome::NonceNotFound);
        }

        let previously_failed_at = match self.read_failed_marker(n) {
            Ok(v) => v,
            Err(Error::Nonce(outcome)) => return Ok(outcome),
            Err(e) => return Err(e),
        };

        match previously_failed_at {
            None => {
                self.write_failed_marker(n)?;
                debug!(target: "nonce", dir = %self.dir.display(), nonce = n, "marked nonce failed, starting grace window");
                Ok(NonceOutcome::NotRemovedShouldRetry)
            }
            Some(since) => {
                let elapsed = epoch_millis_now().saturating_sub(since.as_millis() as u64);
                if Duration::from_millis(elapsed) < self.config.grace_window {
                    Ok(NonceOutcome::NotRemovedShouldRetry)
                } else {
                    let gap_detected = self.any_marker_above(n)?;
                    self.remove_markers(n);
                    if gap_detected {
                        warn!(target: "nonce", dir = %self.dir.display(), nonce = n, "removed failed nonce, gap detected above it");
                        Ok(NonceOutcome::RemovedGapDetected)
                    } else {
                        debug!(target: "nonce", dir = %self.dir.display(), nonce = n, "removed failed nonce, no gap");
                        Ok(NonceOutcome::RemovedOkay)
                    }
                }
            }
        }
    }

    fn on_revert(&self, n: u64) -> Result<NonceOutcome> {
        Ok(if self.marker_exists(n) { NonceOutcome::NotRemovedGasSpent } else { NonceOutcome::NonceNotFound })
    }

    fn on_out_of_gas(&self, n: u64) -> Result<NonceOutcome> {
        self.on_revert(n)
    }

    fn on_nonce_too_low(&self, n: u64) -> Result<u64> {
        let _lock = self.guard.lock().expect("nonce store mutex poisoned");
        self.reserve_from(n + 1)
    }
}

fn epoch_millis_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock predates the unix epoch")
        .as_millis() as u64
}

fn parse_nonce_filename(name: &str, suffix: &str) -> Option<u64> {
    name.strip_suffix(suffix)?.parse().ok()
}

fn io_err(e: io::Error) -> Error {
    Error::MalformedEncoding(format!("nonce store I/O error: {e}"))
}

/// Touch a file's existence without leaking `File` outside this module;
/// used only by tests that want to assert a marker is present.
#[cfg(test)]
fn marker_file_exists(path: &Path) -> bool {
    path.exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NonceStoreConfig;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    fn zero_seed() -> impl NonceSeed {
        || Ok(0u64)
    }

    #[test]
    fn reserve_seeds_from_injected_provider_when_empty() {
        let dir = tempdir().unwrap();
        let store = FsNonceStore::open(dir.path(), || Ok(42u64), NonceStoreConfig::default()).unwrap();
        assert_eq!(store.reserve().unwrap(), 42);
        assert_eq!(store.reserve().unwrap(), 43);
    }

    #[test]
    fn on_failure_gap_detected_matches_scenario_f() {
        let dir = tempdir().unwrap();
        let config = NonceStoreConfig { grace_window: Duration::from_millis(0) };
        let store = FsNonceStore::open(dir.path(), zero_seed(), config).unwrap();
        for _ in 0..5 {
            store.reserve().unwrap();
        }
        assert!(marker_file_exists(&store.nonce_path(4)));
        assert_matches!(store.on_failure(3).unwrap(), NonceOutcome::NotRemovedShouldRetry);
        // simulate the elapsed grace window by back-dating the marker
        let past = epoch_millis_now().saturating_sub(60_000);
        fs::write(store.failed_path(3), past.to_string()).unwrap();
        assert_matches!(store.on_failure(3).unwrap(), NonceOutcome::RemovedGapDetected);
        assert!(!marker_file_exists(&store.nonce_path(3)));
    }

    #[test]
    fn on_success_clears_failed_marker_but_keeps_nonce_marker() {
        let dir = tempdir().unwrap();
        let store = FsNonceStore::open(dir.path(), zero_seed(), NonceStoreConfig::default()).unwrap();
        store.reserve().unwrap();
        store.on_failure(0).unwrap();
        store.on_success(0).unwrap();
        assert!(marker_file_exists(&store.nonce_path(0)));
        assert!(!marker_file_exists(&store.failed_path(0)));
    }
}
