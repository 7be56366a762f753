//! The engine. Owns the cache, answers primality, grows the prefix on demand.
//!
//! Sieve growth and primality testing used to be a mutually recursive pair.
//! Here the recursion is flattened into one frontier:
//! - [`PrimeEngine::grow_prefix`] extends the prefix by one prime, trial
//!   dividing odd candidates against the cached prefix only. That is always
//!   enough: the next prime is below `2 * last <= last^2`.
//! - [`PrimeEngine::is_prime`] walks the prefix with a cursor and calls
//!   `grow_prefix` when it runs off the end.
//!
//! No call path recurses, so stack depth is flat for any `n`.

use super::cache::PrimeCache;
use super::metrics::{CheckpointMetrics, SieveMetrics};
use log::{debug, trace};

/// Stateful primality engine.
///
/// ```
/// use primecache::PrimeEngine;
///
/// let mut engine = PrimeEngine::new();
/// assert!(!engine.is_prime(119));
/// assert!(!engine.is_prime(121));
/// assert!(engine.is_prime(149));
/// assert!(engine.is_prime(1021));
/// ```
#[derive(Debug, Clone)]
pub struct PrimeEngine {
    pub(crate) cache: PrimeCache,
    pub(crate) metrics: SieveMetrics,
    pub(crate) checkpoint_metrics: CheckpointMetrics,
}

impl PrimeEngine {
    pub fn new() -> Self {
        Self::with_cache(PrimeCache::new())
    }

    /// Start from a caller-supplied prefix. Must be gap-free from 2.
    pub fn with_seed(seed: Vec<u64>) -> Self {
        Self::with_cache(PrimeCache::with_prefix(seed))
    }

    pub fn with_cache(cache: PrimeCache) -> Self {
        debug!("PrimeEngine created with {} cached primes", cache.len());
        Self {
            cache,
            metrics: SieveMetrics::new(),
            checkpoint_metrics: CheckpointMetrics::new(),
        }
    }

    #[inline(always)]
    pub fn cache(&self) -> &PrimeCache {
        &self.cache
    }

    /// Direct cache access. The cache's own setters keep the prefix inside
    /// the set, but gap-freeness is on the caller.
    #[inline(always)]
    pub fn cache_mut(&mut self) -> &mut PrimeCache {
        &mut self.cache
    }

    #[inline(always)]
    pub fn metrics(&self) -> &SieveMetrics {
        &self.metrics
    }

    #[inline(always)]
    pub fn checkpoint_metrics(&self) -> &CheckpointMetrics {
        &self.checkpoint_metrics
    }

    /// Is `n` prime?
    ///
    /// `n < 2` is never prime and is not recorded. A prime found here goes
    /// into the membership set only; it may not be contiguous with the prefix.
    pub fn is_prime(&mut self, n: u64) -> bool {
        if n < 2 {
            return false;
        }
        if self.cache.is_known(n) {
            self.metrics.record_set_hit();
            return true;
        }

        let mut index = 0;
        while let Some(p) = self.prime_at(index, None) {
            index += 1;
            self.metrics.record_trial_division();

            if n % p == 0 {
                // p == n only when the set was replaced without n in it.
                if p == n {
                    self.cache.add_known_prime(n);
                    return true;
                }
                trace!("{} composite, factor {}", n, p);
                self.metrics.record_composite();
                return false;
            }
            if exceeds_square_root(p, n) {
                self.cache.add_known_prime(n);
                return true;
            }
        }

        // Sieve ran out of u64 without finding a divisor.
        self.cache.add_known_prime(n);
        true
    }

    /// True iff every candidate is prime. Tests all of them, even after a
    /// composite turns up, so every prime in the batch lands in the set.
    pub fn are_prime(&mut self, candidates: &[u64]) -> bool {
        let mut all = true;
        for &n in candidates {
            all &= self.is_prime(n);
        }
        all
    }

    /// Prime at logical `index`, growing the prefix as needed. Growth stops
    /// (returns None) before testing any candidate above `limit`.
    pub(crate) fn prime_at(&mut self, index: usize, limit: Option<u64>) -> Option<u64> {
        while self.cache.len() <= index {
            self.grow_prefix(limit)?;
        }
        self.cache.get(index)
    }

    /// Append the next contiguous prime. None if it would exceed `limit` or
    /// the candidate overflows u64.
    pub(crate) fn grow_prefix(&mut self, limit: Option<u64>) -> Option<u64> {
        let mut candidate = match self.cache.last() {
            None => 2,
            Some(2) => 3,
            Some(last) => last.checked_add(2)?,
        };

        loop {
            if limit.is_some_and(|max| candidate > max) {
                return None;
            }
            if self.cache.is_known(candidate) {
                self.metrics.record_set_hit();
                break;
            }
            if !self.divisible_by_prefix(candidate) {
                break;
            }
            self.metrics.record_composite();
            candidate = candidate.checked_add(2)?;
        }

        self.cache.push_contiguous(candidate);
        self.metrics.record_append();

        let len = self.cache.len();
        if len.is_power_of_two() {
            debug!("prefix reached {} primes (last {})", len, candidate);
        }
        Some(candidate)
    }

    /// Trial division by the cached prefix up to sqrt(candidate).
    fn divisible_by_prefix(&self, candidate: u64) -> bool {
        for &p in self.cache.prefix() {
            if exceeds_square_root(p, candidate) {
                return false;
            }
            self.metrics.record_trial_division();
            if candidate % p == 0 {
                return true;
            }
        }
        false
    }
}

impl Default for PrimeEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// `p * p > n`, treating overflow as "yes".
#[inline(always)]
pub(crate) fn exceeds_square_root(p: u64, n: u64) -> bool {
    p.checked_mul(p).map_or(true, |sq| sq > n)
}
