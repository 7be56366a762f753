//! The guts. Cache, engine, sieve, factorizer, checkpoints.

pub mod cache;
pub mod checkpoint;
pub mod engine;
pub mod error;
pub mod factor;
pub mod metrics;
pub mod sieve;

pub use cache::{PrimeCache, SEED_PRIMES};
pub use checkpoint::{compute_digest, Checkpoint, CheckpointPolicy, DEFAULT_VERIFY_COUNT};
pub use engine::PrimeEngine;
pub use error::{PrimeError, Result};
pub use factor::{Factorization, MAX_FACTORS};
pub use metrics::{CheckpointMetrics, MetricsSnapshot, SieveMetrics};
pub use sieve::{PrimeIter, SieveBounds};
