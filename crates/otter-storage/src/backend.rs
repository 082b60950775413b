//! Backing key-value stores
//!
//! A backend is a synchronous string-keyed, string-valued store with the
//! same surface as the DOM `Storage` interface.

use parking_lot::RwLock;
use std::collections::HashMap;

use crate::error::{StorageError, StorageResult};

/// Synchronous key/value storage area.
pub trait StorageBackend {
    /// Whether the facility exists in the current environment at all.
    fn is_supported(&self) -> bool {
        true
    }

    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;

    fn remove_item(&self, key: &str) -> StorageResult<()>;

    /// Remove every key, including keys written by other users of the area.
    fn clear(&self) -> StorageResult<()>;

    /// Every key currently present, in backend-defined order.
    fn keys(&self) -> StorageResult<Vec<String>>;
}

impl<B: StorageBackend + ?Sized> StorageBackend for &B {
    fn is_supported(&self) -> bool {
        (**self).is_supported()
    }

    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        (**self).remove_item(key)
    }

    fn clear(&self) -> StorageResult<()> {
        (**self).clear()
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        (**self).keys()
    }
}

/// Process-local storage area.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

impl StorageBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.items.read().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        self.items.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        self.items.write().remove(key);
        Ok(())
    }

    fn clear(&self) -> StorageResult<()> {
        self.items.write().clear();
        Ok(())
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        Ok(self.items.read().keys().cloned().collect())
    }
}

/// Stand-in for an environment without any storage facility.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableBackend;

impl StorageBackend for UnavailableBackend {
    fn is_supported(&self) -> bool {
        false
    }

    fn get_item(&self, _key: &str) -> StorageResult<Option<String>> {
        Err(StorageError::Unsupported)
    }

    fn set_item(&self, _key: &str, _value: &str) -> StorageResult<()> {
        Err(StorageError::Unsupported)
    }

    fn remove_item(&self, _key: &str) -> StorageResult<()> {
        Err(StorageError::Unsupported)
    }

    fn clear(&self) -> StorageResult<()> {
        Err(StorageError::Unsupported)
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        Err(StorageError::Unsupported)
    }
}
