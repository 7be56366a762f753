//! Factorization by trial division against the engine's primes.

use super::engine::{exceeds_square_root, PrimeEngine};
use super::error::{PrimeError, Result};
use arrayvec::ArrayVec;
use log::trace;

/// A u64 has at most 63 prime factors (2^63). One slot spare for `[0]`.
pub const MAX_FACTORS: usize = 64;

/// Prime factors in ascending order, with multiplicity. No heap.
pub type Factorization = ArrayVec<u64, MAX_FACTORS>;

impl PrimeEngine {
    /// Prime factors of `n`, ascending, product equal to `n`.
    ///
    /// `1` has the empty factorization. `0` has none and comes back as `[0]`.
    ///
    /// ```
    /// use primecache::PrimeEngine;
    ///
    /// let mut engine = PrimeEngine::new();
    /// assert_eq!(engine.prime_factors(9).as_slice(), &[3, 3]);
    /// assert_eq!(engine.prime_factors(21).as_slice(), &[3, 7]);
    /// assert_eq!(engine.prime_factors(53).as_slice(), &[53]);
    /// assert!(engine.prime_factors(1).is_empty());
    /// ```
    pub fn prime_factors(&mut self, n: u64) -> Factorization {
        let mut factors = Factorization::new();
        if n == 0 {
            factors.push(0);
            return factors;
        }

        let mut rest = n;
        // Divisors come out ascending, so the cursor never rewinds.
        let mut index = 0;
        while rest > 1 {
            let root = rest.isqrt();
            match self.smallest_divisor(rest, root, &mut index) {
                Some(p) => {
                    factors.push(p);
                    rest /= p;
                }
                None => {
                    factors.push(rest);
                    break;
                }
            }
        }

        trace!("factored {} into {} primes", n, factors.len());
        factors
    }

    /// Like [`prime_factors`](Self::prime_factors) but never grows the cache.
    /// Fails if `n` is beyond `last^2`, where the prefix stops being enough.
    pub fn prime_factors_known(&self, n: u64) -> Result<Factorization> {
        let limit = self
            .cache
            .last()
            .map_or(0, |last| last.checked_mul(last).unwrap_or(u64::MAX));
        if n > limit {
            return Err(PrimeError::ExceedsCache { n, limit });
        }

        let mut factors = Factorization::new();
        if n == 0 {
            factors.push(0);
            return Ok(factors);
        }

        let mut rest = n;
        let mut primes = self.cache.prefix().iter().copied().peekable();
        while rest > 1 {
            match primes.peek().copied() {
                Some(p) if !exceeds_square_root(p, rest) => {
                    if rest % p == 0 {
                        factors.push(p);
                        rest /= p;
                    } else {
                        primes.next();
                    }
                }
                _ => {
                    factors.push(rest);
                    break;
                }
            }
        }
        Ok(factors)
    }

    /// Smallest prime `<= root` dividing `n`, scanning from `*index`.
    fn smallest_divisor(&mut self, n: u64, root: u64, index: &mut usize) -> Option<u64> {
        while let Some(p) = self.prime_at(*index, Some(root)) {
            if p > root {
                return None;
            }
            self.metrics.record_trial_division();
            if n % p == 0 {
                return Some(p);
            }
            *index += 1;
        }
        None
    }
}
