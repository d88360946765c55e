//! Durable client-local storage for small JSON records.
//!
//! Records are addressed by a string key, like browser local storage.
//!
//! ## Directory Structure
//!
//! ```text
//! {storage_dir}/
//! └── metCollegeBookmarks.json   # Bookmark record
//! ```

pub mod local;
pub mod memory;

use serde::{Serialize, de::DeserializeOwned};

use crate::error::Result;

// Re-export for convenience
pub use local::LocalStorage;
pub use memory::MemoryStorage;

/// Trait for key/value storage backends.
///
/// Writes are synchronous: once `write_bytes` returns, the record is
/// durable (or the error says why not).
pub trait BookmarkStorage {
    /// Read a record, returning `None` if the key has never been written.
    fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Replace a record.
    fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<()>;

    /// Remove a record. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Read JSON data.
    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>>
    where
        Self: Sized,
    {
        match self.read_bytes(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Write JSON data.
    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()>
    where
        Self: Sized,
    {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.write_bytes(key, &bytes)
    }
}
