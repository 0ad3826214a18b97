//! Local key-value storage for data that must survive restarts.
//!
//! Semantics follow browser `localStorage`: string keys map to string
//! values, a write replaces the whole value, and there is no partial update.
//!
//! # Backends
//!
//! - [`FileStorage`] - all keys in one JSON file, replaced atomically on write
//! - [`MemoryStorage`] - process-local map for tests and throwaway sessions

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use async_trait::async_trait;
use thiserror::Error;

/// Storage keys.
pub mod keys {
    /// Key holding the serialized cart snapshot.
    pub const CART: &str = "@RocketShoes:cart";
}

/// Errors that can occur when reading or writing local storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying filesystem operation failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Value could not be serialized or deserialized.
    #[error("Storage serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Stored data is not in the expected layout.
    #[error("Corrupt storage at {location}: {reason}")]
    Corrupt { location: String, reason: String },
}

/// String key-value store.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Read the value stored under `key`.
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    async fn set_item(&self, key: &str, value: String) -> Result<(), StorageError>;
}
