//! PrimeCache: gap-free ordered prefix + unordered membership set.
//!
//! Invariant held at every mutation site: every prefix element is in the set.
//! The set may hold extra primes found out of order by direct tests.

use ahash::AHashSet;

/// Primes every fresh cache starts from. Odd from index 1 on, which lets
/// the sieve step by 2.
pub const SEED_PRIMES: [u64; 5] = [2, 3, 5, 7, 11];

#[derive(Debug, Clone)]
pub struct PrimeCache {
    prefix: Vec<u64>,
    known: AHashSet<u64>,
}

impl PrimeCache {
    pub fn new() -> Self {
        Self::with_prefix(SEED_PRIMES.to_vec())
    }

    /// Caller guarantees `prefix` is gap-free and ascending.
    pub fn with_prefix(prefix: Vec<u64>) -> Self {
        let mut cache = Self {
            prefix: Vec::new(),
            known: AHashSet::new(),
        };
        cache.set_prefix(prefix);
        cache
    }

    #[inline(always)]
    pub fn prefix(&self) -> &[u64] {
        &self.prefix
    }

    /// Replace the prefix wholesale and union it into the set. Stale set
    /// members stay. Not re-verified here; that is the checkpoint's job.
    pub fn set_prefix(&mut self, prefix: Vec<u64>) {
        self.known.extend(prefix.iter().copied());
        self.prefix = prefix;
    }

    #[inline(always)]
    pub fn known(&self) -> &AHashSet<u64> {
        &self.known
    }

    /// Replace the set. The prefix is unioned back in so it stays a subset.
    pub fn set_known(&mut self, known: AHashSet<u64>) {
        self.known = known;
        self.known.extend(self.prefix.iter().copied());
    }

    /// Set-only insert. Returns false if `p` was already known.
    #[inline(always)]
    pub fn add_known_prime(&mut self, p: u64) -> bool {
        self.known.insert(p)
    }

    #[inline(always)]
    pub fn is_known(&self, n: u64) -> bool {
        self.known.contains(&n)
    }

    #[inline(always)]
    pub fn last(&self) -> Option<u64> {
        self.prefix.last().copied()
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.prefix.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.prefix.is_empty()
    }

    #[inline(always)]
    pub fn get(&self, index: usize) -> Option<u64> {
        self.prefix.get(index).copied()
    }

    /// Append the next contiguous prime. Only the sieve calls this.
    pub(crate) fn push_contiguous(&mut self, p: u64) {
        debug_assert!(self.last().map_or(true, |last| p > last));
        self.prefix.push(p);
        self.known.insert(p);
    }
}

impl Default for PrimeCache {
    fn default() -> Self {
        Self::new()
    }
}
