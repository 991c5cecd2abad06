//! Key-value persistence backends
//!
//! The ledger persists a handful of string values under fixed keys. A
//! backend only needs to get, set and remove them.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::LedgerError;

use super::file_io::{read_text_optional, remove_file_optional, write_text_atomic};

/// A string key-value store
pub trait Backend {
    /// Read the value stored under `key`, `None` if absent
    fn get(&self, key: &str) -> Result<Option<String>, LedgerError>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<(), LedgerError>;

    /// Remove `key`; removing an absent key is not an error
    fn remove(&mut self, key: &str) -> Result<(), LedgerError>;
}

/// Stores each key as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Create a backend rooted at `dir` (created lazily on first write)
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The file holding `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Backend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>, LedgerError> {
        read_text_optional(self.path_for(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), LedgerError> {
        write_text_atomic(self.path_for(key), value)
    }

    fn remove(&mut self, key: &str) -> Result<(), LedgerError> {
        remove_file_optional(self.path_for(key))
    }
}

/// Keeps values in a map; nothing survives the process
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    values: HashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Backend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, LedgerError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), LedgerError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), LedgerError> {
        self.values.remove(key);
        Ok(())
    }
}

impl<B: Backend + ?Sized> Backend for &mut B {
    fn get(&self, key: &str) -> Result<Option<String>, LedgerError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), LedgerError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), LedgerError> {
        (**self).remove(key)
    }
}
