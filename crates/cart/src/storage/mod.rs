//! Durable key-value storage adapters.
//!
//! The cart persists itself as one string blob under one key. Any backend
//! that can `get` and `set` a string by key can hold it:
//!
//! - [`MemoryStorage`] - In-process map, optionally quota-limited
//! - [`FileStorage`] - JSON file on disk, written atomically

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use thiserror::Error;

/// Default storage key for the persisted cart.
///
/// The version suffix lets a future format live alongside this one.
pub const DEFAULT_CART_KEY: &str = "cart:v1";

/// Errors that can occur when reading or writing storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The write would exceed the storage quota.
    #[error("Quota exceeded: {needed} bytes needed, {quota} allowed")]
    QuotaExceeded {
        /// Bytes the storage would hold after the write.
        needed: usize,
        /// Maximum bytes allowed.
        quota: usize,
    },

    /// The backend cannot be used right now.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Key-scoped string storage.
///
/// Both operations are fallible. Implementations must be shareable across
/// threads because deferred writes run on a background task.
pub trait CartStorage: Send + Sync {
    /// Read the value stored under `key`, or `None` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
