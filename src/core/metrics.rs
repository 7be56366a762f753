//! Lightweight metrics. No allocations, no locks, just atomics.

use core::sync::atomic::{AtomicU64, Ordering};

/// Sieve and primality counters. All monotonic.
#[derive(Debug)]
pub struct SieveMetrics {
    pub set_hits: AtomicU64,
    pub trial_divisions: AtomicU64,
    pub primes_appended: AtomicU64,
    pub composites_rejected: AtomicU64,
}

impl SieveMetrics {
    pub const fn new() -> Self {
        Self {
            set_hits: AtomicU64::new(0),
            trial_divisions: AtomicU64::new(0),
            primes_appended: AtomicU64::new(0),
            composites_rejected: AtomicU64::new(0),
        }
    }

    #[inline(always)]
    pub fn record_set_hit(&self) {
        self.set_hits.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn record_trial_division(&self) {
        self.trial_divisions.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn record_append(&self) {
        self.primes_appended.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn record_composite(&self) {
        self.composites_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn set_hits(&self) -> u64 {
        self.set_hits.load(Ordering::Relaxed)
    }

    pub fn trial_divisions(&self) -> u64 {
        self.trial_divisions.load(Ordering::Relaxed)
    }

    pub fn primes_appended(&self) -> u64 {
        self.primes_appended.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            set_hits: self.set_hits(),
            trial_divisions: self.trial_divisions(),
            primes_appended: self.primes_appended(),
            composites_rejected: self.composites_rejected.load(Ordering::Relaxed),
        }
    }
}

impl Default for SieveMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for SieveMetrics {
    fn clone(&self) -> Self {
        let s = self.snapshot();
        Self {
            set_hits: AtomicU64::new(s.set_hits),
            trial_divisions: AtomicU64::new(s.trial_divisions),
            primes_appended: AtomicU64::new(s.primes_appended),
            composites_rejected: AtomicU64::new(s.composites_rejected),
        }
    }
}

/// Checkpoint load/save counters.
#[derive(Debug)]
pub struct CheckpointMetrics {
    pub saves: AtomicU64,
    pub loads: AtomicU64,
    pub rejected_loads: AtomicU64,
    pub bytes_written: AtomicU64,
}

impl CheckpointMetrics {
    pub const fn new() -> Self {
        Self {
            saves: AtomicU64::new(0),
            loads: AtomicU64::new(0),
            rejected_loads: AtomicU64::new(0),
            bytes_written: AtomicU64::new(0),
        }
    }

    #[inline(always)]
    pub fn record_save(&self, bytes: u64) {
        self.saves.fetch_add(1, Ordering::Relaxed);
        self.bytes_written.fetch_add(bytes, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn record_load(&self) {
        self.loads.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn record_rejection(&self) {
        self.rejected_loads.fetch_add(1, Ordering::Relaxed);
    }

    pub fn saves(&self) -> u64 {
        self.saves.load(Ordering::Relaxed)
    }

    pub fn loads(&self) -> u64 {
        self.loads.load(Ordering::Relaxed)
    }

    pub fn rejected_loads(&self) -> u64 {
        self.rejected_loads.load(Ordering::Relaxed)
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written.load(Ordering::Relaxed)
    }

    pub fn avg_bytes_per_save(&self) -> u64 {
        let saves = self.saves();
        if saves == 0 {
            0
        } else {
            self.bytes_written() / saves
        }
    }
}

impl Default for CheckpointMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for CheckpointMetrics {
    fn clone(&self) -> Self {
        Self {
            saves: AtomicU64::new(self.saves()),
            loads: AtomicU64::new(self.loads()),
            rejected_loads: AtomicU64::new(self.rejected_loads()),
            bytes_written: AtomicU64::new(self.bytes_written()),
        }
    }
}

/// Immutable snapshot for export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub set_hits: u64,
    pub trial_divisions: u64,
    pub primes_appended: u64,
    pub composites_rejected: u64,
}
