//! Error kinds. One variant per failure, never folded together.

use crate::storage::StoreError;
use thiserror::Error;

pub type Result<T> = core::result::Result<T, PrimeError>;

/// Why the engine said no.
#[derive(Debug, Error)]
pub enum PrimeError {
    /// `iter_primes` asked to start past the cached prefix.
    #[error("cannot start beyond the currently cached prefix (start index {start_index}, {cached} primes cached)")]
    OutOfRange { start_index: usize, cached: usize },

    /// Checkpoint failed verification. Deliberately names no culprit.
    #[error("checkpoint failed verification")]
    CorruptCheckpoint,

    /// Loading would drop cached primes and shrinking was not allowed.
    #[error("would lose already-cached primes ({cached} cached, checkpoint holds {loaded})")]
    CheckpointRegression { cached: usize, loaded: usize },

    /// Save target exists and overwrite was not requested.
    #[error("checkpoint destination already exists: {name}")]
    AlreadyExists { name: String },

    /// A stored line is not a decimal integer. `line` is 1-based.
    #[error("checkpoint line {line} is not an integer")]
    MalformedCheckpoint { line: usize },

    /// Known-prefix factorization asked for a number the prefix can't cover.
    #[error("{n} exceeds the cached range (limit {limit})")]
    ExceedsCache { n: u64, limit: u64 },

    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StoreError> for PrimeError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AlreadyExists { name } => PrimeError::AlreadyExists { name },
            StoreError::Malformed { line } => PrimeError::MalformedCheckpoint { line },
            StoreError::Io(e) => PrimeError::Io(e),
        }
    }
}
