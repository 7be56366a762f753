//! File-backed checkpoint store.

use super::{decode, encode, PrimeStore, StoreError, WriteMode, DEFAULT_CHECKPOINT_NAME};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    name: String,
}

impl FileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = path.display().to_string();
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new(DEFAULT_CHECKPOINT_NAME)
    }
}

impl PrimeStore for FileStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn read_all(&self) -> Result<Vec<u64>, StoreError> {
        let text = fs::read_to_string(&self.path)?;
        decode(&text)
    }

    fn write_all(&mut self, values: &[u64], mode: WriteMode) -> Result<usize, StoreError> {
        let mut options = OpenOptions::new();
        options.write(true);
        match mode {
            WriteMode::CreateNew => options.create_new(true),
            WriteMode::Overwrite => options.create(true).truncate(true),
        };

        let mut file = options.open(&self.path).map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => StoreError::AlreadyExists {
                name: self.name.clone(),
            },
            _ => StoreError::Io(e),
        })?;

        let text = encode(values);
        file.write_all(text.as_bytes())?;
        file.sync_all()?;
        Ok(text.len())
    }
}
