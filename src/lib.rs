//! Incremental primality engine with a two-tier cache.
//!
//! A [`PrimeEngine`] keeps a gap-free prefix of primes plus a membership set,
//! grows the prefix only when a query runs past it, and can checkpoint the
//! prefix to a [`PrimeStore`](storage::PrimeStore) and reload it after
//! verification.
//!
//! ```
//! use primecache::prelude::*;
//!
//! let mut engine = PrimeEngine::new();
//! assert!(engine.is_prime(1021));
//! assert_eq!(engine.prime_factors(21).as_slice(), &[3, 7]);
//!
//! let mut store = MemoryStore::new("primes");
//! engine.save(&mut store, false)?;
//! engine.load(&store, 5, true)?;
//! # Ok::<(), PrimeError>(())
//! ```

pub mod core;
pub mod storage;

/// Prelude for convenient imports of primary API types.
pub mod prelude {
    pub use crate::core::{
        Checkpoint, CheckpointPolicy, Factorization, PrimeCache, PrimeEngine, PrimeError,
        PrimeIter, SieveBounds,
    };
    #[cfg(feature = "persistence")]
    pub use crate::storage::FileStore;
    pub use crate::storage::{MemoryStore, PrimeStore, WriteMode};
}

// Re-export primary types at crate root for convenience.
pub use crate::core::{
    Checkpoint, CheckpointPolicy, Factorization, PrimeCache, PrimeEngine, PrimeError, PrimeIter,
    Result, SieveBounds, DEFAULT_VERIFY_COUNT, SEED_PRIMES,
};
pub use crate::storage::{PrimeStore, StoreError, WriteMode, DEFAULT_CHECKPOINT_NAME};
