//! In-memory store. Same text format as the file store.

use super::{decode, encode, PrimeStore, StoreError, WriteMode};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    name: String,
    contents: Option<String>,
}

impl MemoryStore {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            contents: None,
        }
    }

    /// A store that already holds `text`, exactly as written.
    pub fn with_contents(name: &str, text: &str) -> Self {
        Self {
            name: name.to_string(),
            contents: Some(text.to_string()),
        }
    }

    pub fn exists(&self) -> bool {
        self.contents.is_some()
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl PrimeStore for MemoryStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn read_all(&self) -> Result<Vec<u64>, StoreError> {
        match &self.contents {
            Some(text) => decode(text),
            None => Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not found", self.name),
            ))),
        }
    }

    fn write_all(&mut self, values: &[u64], mode: WriteMode) -> Result<usize, StoreError> {
        if mode == WriteMode::CreateNew && self.exists() {
            return Err(StoreError::AlreadyExists {
                name: self.name.clone(),
            });
        }
        let text = encode(values);
        let written = text.len();
        self.contents = Some(text);
        Ok(written)
    }
}
