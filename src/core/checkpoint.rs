//! Checkpoints: a persisted prefix that must earn trust before it replaces
//! the cache. Structure check → primality sample → regression check → install.

use super::engine::PrimeEngine;
use super::error::{PrimeError, Result};
use crate::storage::{PrimeStore, WriteMode};
use ahash::AHashSet;
use log::{info, warn};

/// How many leading entries are primality-tested by default.
pub const DEFAULT_VERIFY_COUNT: usize = 100;

/// Knobs for [`PrimeEngine::load_with`] / [`PrimeEngine::save_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckpointPolicy {
    /// Leading entries to primality-test. 0 skips the sample.
    pub verify_count: usize,
    /// Accept a checkpoint shorter than the live prefix.
    pub allow_shrink: bool,
    /// Replace an existing destination on save.
    pub overwrite: bool,
}

impl Default for CheckpointPolicy {
    fn default() -> Self {
        Self {
            verify_count: DEFAULT_VERIFY_COUNT,
            allow_shrink: false,
            overwrite: false,
        }
    }
}

/// A candidate prefix read from storage, plus a BLAKE3 fingerprint of it.
/// The fingerprint is for logs and round-trip comparison; it is not stored.
#[derive(Debug, Clone)]
pub struct Checkpoint {
    pub primes: Vec<u64>,
    pub digest: blake3::Hash,
}

impl Checkpoint {
    pub fn new(primes: Vec<u64>) -> Self {
        let digest = compute_digest(&primes);
        Self { primes, digest }
    }

    pub fn read<S: PrimeStore + ?Sized>(store: &S) -> Result<Self> {
        Ok(Self::new(store.read_all()?))
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.primes.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.primes.is_empty()
    }

    /// Leading entries to primality-test.
    #[inline(always)]
    pub fn sample(&self, verify_count: usize) -> &[u64] {
        &self.primes[..verify_count.min(self.primes.len())]
    }

    /// A gap-free prefix starts at 2 and strictly ascends.
    pub fn verify_structure(&self) -> bool {
        if self.primes.first().is_some_and(|&first| first != 2) {
            return false;
        }
        self.primes.windows(2).all(|w| w[0] < w[1])
    }
}

/// BLAKE3 over the little-endian bytes of each value.
pub fn compute_digest(primes: &[u64]) -> blake3::Hash {
    let mut hasher = blake3::Hasher::new();
    for p in primes {
        hasher.update(&p.to_le_bytes());
    }
    hasher.finalize()
}

impl PrimeEngine {
    /// Load a checkpoint into the cache.
    ///
    /// Fails with `CorruptCheckpoint` if the sequence is not ascending from 2
    /// or the first `verify_count` entries are not exactly the first primes
    /// (a composite or a skipped prime), and with
    /// `CheckpointRegression` if it is shorter than the live prefix and
    /// `allow_shrink` is false. On failure the engine is untouched.
    ///
    /// On success the membership set is reset to exactly the new prefix.
    /// Returns the new prefix length.
    pub fn load<S: PrimeStore + ?Sized>(
        &mut self,
        store: &S,
        verify_count: usize,
        allow_shrink: bool,
    ) -> Result<usize> {
        let checkpoint = Checkpoint::read(store)?;

        if let Err(err) = self.vet_checkpoint(&checkpoint, verify_count, allow_shrink) {
            self.checkpoint_metrics.record_rejection();
            warn!("rejected checkpoint {}: {}", store.name(), err);
            return Err(err);
        }

        let len = checkpoint.len();
        info!(
            "loaded {} primes from {} (digest {})",
            len,
            store.name(),
            checkpoint.digest.to_hex()
        );
        self.install(checkpoint);
        Ok(len)
    }

    pub fn load_with<S: PrimeStore + ?Sized>(
        &mut self,
        store: &S,
        policy: CheckpointPolicy,
    ) -> Result<usize> {
        self.load(store, policy.verify_count, policy.allow_shrink)
    }

    /// Write the prefix, one integer per line. Returns bytes written.
    pub fn save<S: PrimeStore + ?Sized>(&self, store: &mut S, overwrite: bool) -> Result<usize> {
        let written = store.write_all(self.cache.prefix(), WriteMode::from_overwrite(overwrite))?;
        self.checkpoint_metrics.record_save(written as u64);
        info!(
            "saved {} primes to {} ({} bytes, digest {})",
            self.cache.len(),
            store.name(),
            written,
            self.prefix_digest().to_hex()
        );
        Ok(written)
    }

    pub fn save_with<S: PrimeStore + ?Sized>(
        &self,
        store: &mut S,
        policy: CheckpointPolicy,
    ) -> Result<usize> {
        self.save(store, policy.overwrite)
    }

    /// Digest of the live prefix, same construction as [`Checkpoint`].
    pub fn prefix_digest(&self) -> blake3::Hash {
        compute_digest(self.cache.prefix())
    }

    /// Every check, no mutation of `self`. The sample runs on a fresh scratch
    /// engine so a rejected load leaves no trace in the cache. The sample
    /// must be prime and must also be exactly the first primes, in order.
    fn vet_checkpoint(
        &self,
        checkpoint: &Checkpoint,
        verify_count: usize,
        allow_shrink: bool,
    ) -> Result<()> {
        if !checkpoint.verify_structure() {
            return Err(PrimeError::CorruptCheckpoint);
        }

        if verify_count > 0 {
            let sample = checkpoint.sample(verify_count);
            let mut verifier = PrimeEngine::new();
            if !verifier.are_prime(sample) {
                return Err(PrimeError::CorruptCheckpoint);
            }
            if verifier.first_primes(sample.len()) != sample {
                return Err(PrimeError::CorruptCheckpoint);
            }
        }

        let cached = self.cache.len();
        if cached > checkpoint.len() && !allow_shrink {
            return Err(PrimeError::CheckpointRegression {
                cached,
                loaded: checkpoint.len(),
            });
        }
        Ok(())
    }

    fn install(&mut self, checkpoint: Checkpoint) {
        self.cache.set_prefix(checkpoint.primes);
        // Prefix first, then reset: the set ends up exactly the new prefix.
        self.cache.set_known(AHashSet::new());
        self.checkpoint_metrics.record_load();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn store_with(values: &[u64]) -> MemoryStore {
        let mut store = MemoryStore::new("test");
        store.write_all(values, WriteMode::CreateNew).unwrap();
        store
    }

    #[test]
    fn test_digest_deterministic() {
        let a = compute_digest(&[2, 3, 5]);
        let b = compute_digest(&[2, 3, 5]);
        assert_eq!(a, b);
        assert_ne!(a, compute_digest(&[2, 3, 7]));
        assert_eq!(Checkpoint::new(vec![2, 3, 5]).digest, a);
    }

    #[test]
    fn test_fingerprint_tracks_stored_values() {
        let mut engine = PrimeEngine::new();
        let mut store = MemoryStore::new("test");
        engine.save(&mut store, false).unwrap();
        assert_eq!(Checkpoint::read(&store).unwrap().digest, engine.prefix_digest());

        let tampered = MemoryStore::with_contents("test", "2\n3\n5\n7\n13");
        let checkpoint = Checkpoint::read(&tampered).unwrap();
        assert_ne!(checkpoint.digest, engine.prefix_digest());
        assert!(engine.load(&tampered, 5, false).is_err());
    }

    #[test]
    fn test_load_rejects_missing_prime() {
        let mut engine = PrimeEngine::with_seed(vec![2]);
        let store = MemoryStore::with_contents("gap", "2\n3\n7\n11\n13");

        let err = engine.load(&store, 5, false).unwrap_err();
        assert!(matches!(err, PrimeError::CorruptCheckpoint));
        assert_eq!(engine.cache().prefix(), &[2]);
        assert_eq!(engine.primes_up_to(20), vec![2, 3, 5, 7, 11, 13, 17, 19]);
    }

    #[test]
    fn test_verify_structure() {
        assert!(Checkpoint::new(vec![2, 3, 5, 7]).verify_structure());
        assert!(Checkpoint::new(Vec::new()).verify_structure());
        assert!(!Checkpoint::new(vec![3, 5, 7]).verify_structure());
        assert!(!Checkpoint::new(vec![2, 5, 3]).verify_structure());
        assert!(!Checkpoint::new(vec![2, 3, 3]).verify_structure());
    }

    #[test]
    fn test_sample_clamps() {
        let cp = Checkpoint::new(vec![2, 3, 5]);
        assert_eq!(cp.sample(2), &[2, 3]);
        assert_eq!(cp.sample(10), &[2, 3, 5]);
        assert!(cp.sample(0).is_empty());
    }

    #[test]
    fn test_save_load_round_trip() {
        let mut engine = PrimeEngine::new();
        engine.first_primes(50);
        let mut store = MemoryStore::new("test");
        engine.save(&mut store, true).unwrap();

        let mut restored = PrimeEngine::new();
        let len = restored.load(&store, 50, true).unwrap();
        assert_eq!(len, 50);
        assert_eq!(restored.cache().prefix(), engine.cache().prefix());
        assert_eq!(restored.prefix_digest(), engine.prefix_digest());
    }

    #[test]
    fn test_load_resets_set_to_prefix() {
        let mut engine = PrimeEngine::new();
        assert!(engine.is_prime(1021));
        let store = store_with(&[2, 3, 5, 7, 11, 13]);

        engine.load(&store, 6, false).unwrap();
        assert!(!engine.cache().is_known(1021));
        assert_eq!(engine.cache().known().len(), 6);
    }

    #[test]
    fn test_load_rejects_composite_sample() {
        let mut engine = PrimeEngine::new();
        engine.is_prime(97);
        let prefix = engine.cache().prefix().to_vec();
        let known = engine.cache().known().clone();

        let store = store_with(&[2, 3, 5, 7, 9, 11, 13]);
        let err = engine.load(&store, 5, true).unwrap_err();

        assert!(matches!(err, PrimeError::CorruptCheckpoint));
        assert_eq!(engine.cache().prefix(), prefix.as_slice());
        assert_eq!(engine.cache().known(), &known);
        assert_eq!(engine.checkpoint_metrics().rejected_loads(), 1);
    }

    #[test]
    fn test_load_composite_outside_sample_passes_sample_check() {
        let mut engine = PrimeEngine::with_seed(vec![2]);
        let store = store_with(&[2, 3, 5, 7, 9]);
        assert_eq!(engine.load(&store, 4, false).unwrap(), 5);
    }

    #[test]
    fn test_load_rejects_unsorted() {
        let mut engine = PrimeEngine::new();
        let store = store_with(&[2, 5, 3, 7, 11, 13]);
        let err = engine.load(&store, 0, true).unwrap_err();
        assert!(matches!(err, PrimeError::CorruptCheckpoint));
    }

    #[test]
    fn test_load_rejects_regression() {
        let mut engine = PrimeEngine::new();
        engine.first_primes(10);
        let store = store_with(&[2, 3, 5]);

        let err = engine.load(&store, 3, false).unwrap_err();
        assert!(matches!(
            err,
            PrimeError::CheckpointRegression {
                cached: 10,
                loaded: 3
            }
        ));
        assert_eq!(engine.cache().len(), 10);

        assert_eq!(engine.load(&store, 3, true).unwrap(), 3);
        assert_eq!(engine.cache().prefix(), &[2, 3, 5]);
    }

    #[test]
    fn test_save_refuses_overwrite() {
        let engine = PrimeEngine::new();
        let mut store = store_with(&[2]);
        let err = engine.save(&mut store, false).unwrap_err();
        assert!(matches!(err, PrimeError::AlreadyExists { .. }));
        assert_eq!(store.read_all().unwrap(), vec![2]);

        assert_eq!(engine.save(&mut store, true).unwrap(), "2\n3\n5\n7\n11".len());
    }

    #[test]
    fn test_policy_defaults() {
        let policy = CheckpointPolicy::default();
        assert_eq!(policy.verify_count, DEFAULT_VERIFY_COUNT);
        assert!(!policy.allow_shrink);
        assert!(!policy.overwrite);
    }

    #[test]
    fn test_load_with_policy() {
        let mut engine = PrimeEngine::new();
        let mut store = MemoryStore::new("test");
        engine.first_primes(20);
        engine
            .save_with(&mut store, CheckpointPolicy::default())
            .unwrap();

        let mut restored = PrimeEngine::new();
        restored
            .load_with(&store, CheckpointPolicy::default())
            .unwrap();
        assert_eq!(restored.cache().len(), 20);
    }

    #[test]
    fn test_grow_after_load() {
        let mut engine = PrimeEngine::new();
        let store = store_with(&[2, 3, 5, 7, 11, 13, 17]);
        engine.load(&store, 7, false).unwrap();
        assert_eq!(engine.first_primes(9), vec![2, 3, 5, 7, 11, 13, 17, 19, 23]);
    }
}
