//! In-memory storage backend.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::error::{AppError, Result};
use crate::storage::BookmarkStorage;

/// Storage that lives only as long as the process.
///
/// Writes can be switched off to stand in for unavailable storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: RefCell<HashMap<String, Vec<u8>>>,
    fail_writes: Cell<bool>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record, e.g. one left behind by an earlier session.
    pub fn with_record(key: &str, bytes: impl Into<Vec<u8>>) -> Self {
        let storage = Self::new();
        storage
            .records
            .borrow_mut()
            .insert(key.to_string(), bytes.into());
        storage
    }

    /// Make every subsequent write fail.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

impl BookmarkStorage for MemoryStorage {
    fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.records.borrow().get(key).cloned())
    }

    fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<()> {
        if self.fail_writes.get() {
            return Err(AppError::Io(std::io::Error::other("storage unavailable")));
        }
        self.records
            .borrow_mut()
            .insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        if self.fail_writes.get() {
            return Err(AppError::Io(std::io::Error::other("storage unavailable")));
        }
        self.records.borrow_mut().remove(key);
        Ok(())
    }
}
