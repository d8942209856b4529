//! Persistence
//!
//! The persisted medium is an abstract string key-value store; the engine
//! never sees anything richer. One entry per session field, textual
//! values, absence of a key meaning "unset".

use std::path::PathBuf;

use thiserror::Error;

pub mod codec;
pub mod file;
pub mod keys;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// Errors raised at the persistence boundary.
///
/// Engine operations never propagate these; they log and keep the
/// in-memory state authoritative for the rest of the session.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store file could not be read.
    #[error("failed to read store file {path}: {source}")]
    Read {
        /// Path of the store file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Store file could not be written.
    #[error("failed to write store file {path}: {source}")]
    Write {
        /// Path of the store file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Abstract synchronous key-value persistence with string semantics.
///
/// A narrow capability interface so the engine is testable against an
/// in-memory fake without a real backend.
pub trait KeyValueStore {
    /// Read the value stored under `key`. `None` means unset.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove the entry under `key`. Removing a missing key is a no-op.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}
