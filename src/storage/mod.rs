//! Checkpoint storage. A named resource holding one decimal integer per line.
//!
//! The engine only sees [`PrimeStore`]. [`FileStore`] is the on-disk default,
//! [`MemoryStore`] keeps the same text in memory.

#[cfg(feature = "persistence")]
pub mod file;
pub mod memory;

#[cfg(feature = "persistence")]
pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Default checkpoint resource name.
pub const DEFAULT_CHECKPOINT_NAME: &str = "known_primes_contiguous.txt";

/// Create-or-fail vs. replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Fail with [`StoreError::AlreadyExists`] if the resource exists.
    CreateNew,
    /// Replace whatever is there.
    Overwrite,
}

impl WriteMode {
    #[inline(always)]
    pub const fn from_overwrite(overwrite: bool) -> Self {
        if overwrite {
            WriteMode::Overwrite
        } else {
            WriteMode::CreateNew
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{name} already exists")]
    AlreadyExists { name: String },

    /// 1-based line number of the first bad line.
    #[error("line {line} is not a decimal integer")]
    Malformed { line: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Where checkpoints live.
pub trait PrimeStore {
    fn name(&self) -> &str;

    /// Every integer, in stored order.
    fn read_all(&self) -> Result<Vec<u64>, StoreError>;

    /// Replace the contents with `values`. Returns bytes written.
    fn write_all(&mut self, values: &[u64], mode: WriteMode) -> Result<usize, StoreError>;
}

/// Newline-joined decimal, no trailing newline.
pub fn encode(values: &[u64]) -> String {
    let mut out = String::with_capacity(values.len() * 8);
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&v.to_string());
    }
    out
}

/// Inverse of [`encode`]. Blank lines and surrounding whitespace are ignored.
pub fn decode(text: &str) -> Result<Vec<u64>, StoreError> {
    let mut values = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let value = line
            .parse::<u64>()
            .map_err(|_| StoreError::Malformed { line: i + 1 })?;
        values.push(value);
    }
    Ok(values)
}
