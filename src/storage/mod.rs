//! Storage layer for HomeLedger
//!
//! Provides a string key-value [`Backend`] abstraction with file and
//! in-memory implementations, the per-user [`EntityStore`], and the
//! [`UserDirectory`].

pub mod backend;
pub mod file_io;
pub mod store;
pub mod users;

pub use backend::{Backend, FileBackend, MemoryBackend};
pub use file_io::write_json_atomic;
pub use store::{EntityStore, PARTITION_KEYS};
pub use users::{UserDirectory, USERS_KEY};

use crate::config::paths::LedgerPaths;
use crate::error::LedgerError;

/// Open the file backend under the configured data directory
pub fn open_file_backend(paths: &LedgerPaths) -> Result<FileBackend, LedgerError> {
    paths.ensure_directories()?;
    Ok(FileBackend::new(paths.data_dir()))
}
