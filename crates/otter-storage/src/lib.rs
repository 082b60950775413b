//! Otter Storage - namespaced key-value storage with expiring reads
//!
//! Wraps a synchronous string key-value area (browser `localStorage`, a redb
//! file, or process memory) and adds:
//!
//! - key namespacing under a fixed prefix (`"storage:"` by default)
//! - a timestamp envelope around every stored value
//! - time-to-live checks on read, deleting stale entries
//! - zone-scoped dump and clear
//!
//! # Usage
//!
//! ```
//! use otter_storage::{MemoryBackend, NamespacedStore};
//! use serde_json::json;
//!
//! # fn main() -> otter_storage::StorageResult<()> {
//! let store = NamespacedStore::new(MemoryBackend::new());
//!
//! store.set("user:name", "Alice")?.set("user:age", &30)?;
//! assert_eq!(store.get("user:name")?, Some(json!("Alice")));
//! assert_eq!(store.get_with_ttl("user:age", "10m")?, Some(json!(30)));
//!
//! assert_eq!(store.dump("user")?.len(), 2);
//! store.clear("user")?;
//! assert!(!store.has("user:name")?);
//! # Ok(())
//! # }
//! ```

mod backend;
mod clock;
mod config;
mod diagnostics;
mod envelope;
mod error;
mod key;
mod redb_backend;
mod store;
mod ttl;
#[cfg(feature = "web")]
mod web;

pub use backend::{MemoryBackend, StorageBackend, UnavailableBackend};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::StoreConfig;
pub use diagnostics::{DiagnosticSink, MESSAGE_SEPARATOR, RecordingSink, TracingSink};
pub use envelope::{Decoded, Envelope, decode, encode};
pub use error::{StorageError, StorageResult};
pub use key::{DEFAULT_PREFIX, KEY_SEPARATOR, ZoneMatcher, is_valid_key};
pub use redb_backend::RedbBackend;
pub use store::{DumpEntry, NamespacedStore};
pub use ttl::{IntoTimeLife, TimeLife};
#[cfg(feature = "web")]
pub use web::LocalStorageBackend;
