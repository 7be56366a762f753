//! Lazy prime iteration over the logical prime sequence.

use super::engine::PrimeEngine;
use super::error::{PrimeError, Result};
use core::iter::FusedIterator;

/// Where an `iter_primes` call starts and stops.
///
/// - `max_value`: never emit a prime above this.
/// - `max_count`: stop at this logical index (exclusive). With
///   `start_index = 7, max_count = 10` you get indices 7, 8, 9.
/// - `start_index`: zero-based index into the prime sequence. Must not be
///   past the cached prefix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SieveBounds {
    pub max_value: Option<u64>,
    pub max_count: Option<usize>,
    pub start_index: usize,
}

impl SieveBounds {
    pub const fn unbounded() -> Self {
        Self {
            max_value: None,
            max_count: None,
            start_index: 0,
        }
    }

    /// All primes `<= max_value`.
    pub const fn up_to(max_value: u64) -> Self {
        Self::unbounded().max_value(max_value)
    }

    /// The first `count` primes.
    pub const fn first(count: usize) -> Self {
        Self::unbounded().max_count(count)
    }

    pub const fn max_value(mut self, max_value: u64) -> Self {
        self.max_value = Some(max_value);
        self
    }

    pub const fn max_count(mut self, max_count: usize) -> Self {
        self.max_count = Some(max_count);
        self
    }

    pub const fn start_index(mut self, start_index: usize) -> Self {
        self.start_index = start_index;
        self
    }
}

/// Ascending primes, grown on demand. Fresh cursor per call; the cache it
/// grows is shared with the engine.
#[derive(Debug)]
pub struct PrimeIter<'a> {
    engine: &'a mut PrimeEngine,
    index: usize,
    bounds: SieveBounds,
    done: bool,
}

impl Iterator for PrimeIter<'_> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.done {
            return None;
        }
        if self.bounds.max_count.is_some_and(|end| self.index >= end) {
            self.done = true;
            return None;
        }

        // Bound checked before yielding, and before growth tests a candidate.
        let next = self
            .engine
            .prime_at(self.index, self.bounds.max_value)
            .filter(|&p| self.bounds.max_value.map_or(true, |max| p <= max));

        match next {
            Some(p) => {
                self.index += 1;
                Some(p)
            }
            None => {
                self.done = true;
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let upper = self.bounds.max_count.map(|end| end.saturating_sub(self.index));
        (0, upper)
    }
}

impl FusedIterator for PrimeIter<'_> {}

impl PrimeEngine {
    /// Iterate primes within `bounds`, extending the cache as needed.
    ///
    /// ```
    /// use primecache::{PrimeEngine, SieveBounds};
    ///
    /// let mut engine = PrimeEngine::new();
    /// let small: Vec<u64> = engine.iter_primes(SieveBounds::up_to(10))?.collect();
    /// assert_eq!(small, [2, 3, 5, 7]);
    ///
    /// // Starting index must already be cached.
    /// assert_eq!(engine.iter_primes(SieveBounds::first(10))?.count(), 10);
    /// let tail: Vec<u64> = engine
    ///     .iter_primes(SieveBounds::first(10).start_index(7))?
    ///     .collect();
    /// assert_eq!(tail, [19, 23, 29]);
    /// # Ok::<(), primecache::PrimeError>(())
    /// ```
    pub fn iter_primes(&mut self, bounds: SieveBounds) -> Result<PrimeIter<'_>> {
        let cached = self.cache.len();
        if bounds.start_index > cached {
            return Err(PrimeError::OutOfRange {
                start_index: bounds.start_index,
                cached,
            });
        }
        Ok(PrimeIter {
            engine: self,
            index: bounds.start_index,
            bounds,
            done: false,
        })
    }

    /// All primes `<= max_value`, collected.
    pub fn primes_up_to(&mut self, max_value: u64) -> Vec<u64> {
        self.iter_primes(SieveBounds::up_to(max_value))
            .map(Iterator::collect)
            .unwrap_or_default()
    }

    /// The first `count` primes, collected.
    pub fn first_primes(&mut self, count: usize) -> Vec<u64> {
        self.iter_primes(SieveBounds::first(count))
            .map(Iterator::collect)
            .unwrap_or_default()
    }
}
