//! Namespaced store over a backing storage area

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::backend::{MemoryBackend, StorageBackend};
use crate::clock::{Clock, SystemClock};
use crate::config::StoreConfig;
use crate::diagnostics::{DiagnosticSink, TracingSink, join_parts};
use crate::envelope::{self, Decoded};
use crate::error::StorageResult;
use crate::key::{ZoneMatcher, is_valid_key, storage_key};
use crate::ttl::IntoTimeLife;

/// One record produced by [`NamespacedStore::dump`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DumpEntry {
    /// Physical key, prefix included.
    pub key: String,
    pub data: Option<JsonValue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    /// Validated and prefixed.
    Namespaced,
    /// Raw backend key space, no validation.
    Global,
}

/// Key-value store that namespaces keys, stamps values and expires them on read.
///
/// Invalid keys never produce an error: the store reports them to its
/// diagnostic sink and returns `None`, `false` or itself. Backend failures,
/// including an unsupported environment, are returned as [`StorageError`].
///
/// [`StorageError`]: crate::StorageError
pub struct NamespacedStore<B: StorageBackend = MemoryBackend> {
    backend: B,
    prefix: String,
    sink: Box<dyn DiagnosticSink>,
    clock: Box<dyn Clock>,
}

impl Default for NamespacedStore<MemoryBackend> {
    fn default() -> Self {
        Self::new(MemoryBackend::new())
    }
}

impl<B: StorageBackend> NamespacedStore<B> {
    /// Wrap `backend` with the default prefix, a tracing sink and the system clock.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            prefix: StoreConfig::default().prefix,
            sink: Box::new(TracingSink),
            clock: Box::new(SystemClock),
        }
    }

    pub fn with_config(mut self, config: StoreConfig) -> Self {
        self.prefix = config.prefix;
        self
    }

    pub fn with_sink(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Whether the backing facility exists in this environment.
    pub fn is_supported(&self) -> bool {
        self.backend.is_supported()
    }

    /// Payload stored under `key`, without any expiry check.
    pub fn get(&self, key: &str) -> StorageResult<Option<JsonValue>> {
        Ok(self
            .read(key, Scope::Namespaced)?
            .and_then(Decoded::into_data))
    }

    /// Payload stored under the raw backend key `key`.
    pub fn get_global(&self, key: &str) -> StorageResult<Option<JsonValue>> {
        Ok(self.read(key, Scope::Global)?.and_then(Decoded::into_data))
    }

    /// Payload under `key` deserialized into `T`.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>> {
        match self.get(key)? {
            Some(data) => Ok(Some(serde_json::from_value(data)?)),
            None => Ok(None),
        }
    }

    /// Whole decoded record under `key`, write time included.
    pub fn get_instance(&self, key: &str) -> StorageResult<Option<Decoded>> {
        self.read(key, Scope::Namespaced)
    }

    pub fn get_instance_global(&self, key: &str) -> StorageResult<Option<Decoded>> {
        self.read(key, Scope::Global)
    }

    /// Payload under `key` if it was written no longer than `time_life` ago.
    ///
    /// A stale entry is removed from the backend and reads as `None`.
    /// Records without a write time never expire.
    pub fn get_with_ttl(
        &self,
        key: &str,
        time_life: impl IntoTimeLife,
    ) -> StorageResult<Option<JsonValue>> {
        let Some(storage_key) = self.resolve(key, Scope::Namespaced) else {
            return Ok(None);
        };
        let time_life = time_life.into_time_life()?;

        let Some(record) = self.read_physical(&storage_key)? else {
            return Ok(None);
        };

        if let Some(written_at) = record.time() {
            let age = self.clock.now_millis() as f64 - written_at;
            if time_life.is_expired(age) {
                self.backend.remove_item(&storage_key)?;
                tracing::debug!(key = %storage_key, age_ms = age, "removed expired entry");
                return Ok(None);
            }
        }

        Ok(record.into_data())
    }

    /// Store `data` under `key` in a freshly stamped envelope.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, data: &T) -> StorageResult<&Self> {
        let Some(storage_key) = self.resolve(key, Scope::Namespaced) else {
            return Ok(self);
        };
        let encoded = envelope::encode(self.clock.as_ref(), data)?;
        self.backend.set_item(&storage_key, &encoded)?;
        Ok(self)
    }

    /// True if a non-empty value is stored under `key`. Ignores expiry.
    pub fn has(&self, key: &str) -> StorageResult<bool> {
        let Some(storage_key) = self.resolve(key, Scope::Namespaced) else {
            return Ok(false);
        };
        Ok(self
            .backend
            .get_item(&storage_key)?
            .is_some_and(|value| !value.is_empty()))
    }

    pub fn remove(&self, key: &str) -> StorageResult<&Self> {
        let Some(storage_key) = self.resolve(key, Scope::Namespaced) else {
            return Ok(self);
        };
        self.backend.remove_item(&storage_key)?;
        Ok(self)
    }

    /// Every entry whose physical key starts with `prefix + zone`, ignoring case.
    ///
    /// An empty zone lists the whole namespace. Order follows the backend.
    pub fn dump(&self, zone: &str) -> StorageResult<Vec<DumpEntry>> {
        let mut entries = Vec::new();
        for key in self.zone_keys(zone)? {
            let data = self.get_global(&key)?;
            entries.push(DumpEntry { key, data });
        }
        Ok(entries)
    }

    /// Remove every entry whose physical key starts with `prefix + zone`, ignoring case.
    pub fn clear(&self, zone: &str) -> StorageResult<&Self> {
        let keys = self.zone_keys(zone)?;
        let removed = keys.len();
        for key in keys {
            self.backend.remove_item(&key)?;
        }
        tracing::debug!(zone, removed, "cleared storage zone");
        Ok(self)
    }

    /// Remove every key in the backend, including keys outside the namespace.
    pub fn clear_all(&self) -> StorageResult<&Self> {
        self.backend.clear()?;
        tracing::debug!("cleared entire storage area");
        Ok(self)
    }

    fn zone_keys(&self, zone: &str) -> StorageResult<Vec<String>> {
        let matcher = ZoneMatcher::new(&self.prefix, zone)?;
        let mut keys = self.backend.keys()?;
        keys.retain(|key| matcher.matches(key));
        Ok(keys)
    }

    /// Physical key for `key`, or `None` after reporting an invalid key.
    fn resolve(&self, key: &str, scope: Scope) -> Option<String> {
        match scope {
            Scope::Global => Some(key.to_string()),
            Scope::Namespaced if is_valid_key(key) => Some(storage_key(&self.prefix, key)),
            Scope::Namespaced => {
                self.report(&["Invalid key", key]);
                None
            }
        }
    }

    fn read(&self, key: &str, scope: Scope) -> StorageResult<Option<Decoded>> {
        match self.resolve(key, scope) {
            Some(storage_key) => self.read_physical(&storage_key),
            None => Ok(None),
        }
    }

    fn read_physical(&self, storage_key: &str) -> StorageResult<Option<Decoded>> {
        let Some(raw) = self.backend.get_item(storage_key)? else {
            return Ok(None);
        };
        match envelope::decode(&raw) {
            Decoded::Foreign(JsonValue::Null) => Ok(None),
            decoded => Ok(Some(decoded)),
        }
    }

    fn report(&self, parts: &[&str]) {
        self.sink.error(&join_parts(parts));
    }
}
