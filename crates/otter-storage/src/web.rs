//! Browser `localStorage` backend (feature `web`)

use web_sys::Storage;

use crate::backend::StorageBackend;
use crate::error::{StorageError, StorageResult};

fn js_error(err: wasm_bindgen::JsValue) -> StorageError {
    StorageError::Backend(format!("{err:?}"))
}

/// The current window's `localStorage`, when there is one.
fn local_storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Storage area backed by the browser's origin-scoped `localStorage`.
#[derive(Debug, Clone)]
pub struct LocalStorageBackend {
    storage: Option<Storage>,
}

impl LocalStorageBackend {
    pub fn new() -> Self {
        Self {
            storage: local_storage(),
        }
    }

    fn storage(&self) -> StorageResult<&Storage> {
        self.storage.as_ref().ok_or(StorageError::Unsupported)
    }
}

impl Default for LocalStorageBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageBackend for LocalStorageBackend {
    fn is_supported(&self) -> bool {
        self.storage.is_some()
    }

    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        self.storage()?.get_item(key).map_err(js_error)
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        self.storage()?.set_item(key, value).map_err(js_error)
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        self.storage()?.remove_item(key).map_err(js_error)
    }

    fn clear(&self) -> StorageResult<()> {
        self.storage()?.clear().map_err(js_error)
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        let storage = self.storage()?;
        let len = storage.length().map_err(js_error)?;
        let mut keys = Vec::with_capacity(len as usize);
        for index in 0..len {
            if let Some(key) = storage.key(index).map_err(js_error)? {
                keys.push(key);
            }
        }
        Ok(keys)
    }
}
