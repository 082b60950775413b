//! Diagnostics emitted through the default tracing sink

use otter_storage::{MemoryBackend, NamespacedStore, StorageBackend};
use tracing_subscriber::filter::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("debug".parse().unwrap()))
        .with_test_writer()
        .try_init();
}

#[test]
fn test_invalid_key_with_tracing_sink() {
    init_tracing();
    let store = NamespacedStore::new(MemoryBackend::new());

    assert_eq!(store.get("nokey").unwrap(), None);
    assert!(!store.has("").unwrap());
    store.set("nokey", "value").unwrap();

    assert!(store.backend().is_empty());
}

#[test]
fn test_expiry_and_clear_with_tracing() {
    init_tracing();
    let store = NamespacedStore::new(MemoryBackend::new());

    store.set("zone:a", "x").unwrap();
    store
        .backend()
        .set_item(
            "storage:zone:old",
            r#"{"date": "", "time": 0, "data": "stale"}"#,
        )
        .unwrap();

    assert_eq!(store.get_with_ttl("zone:old", "1d").unwrap(), None);
    assert!(store.has("zone:a").unwrap());

    store.clear("zone").unwrap();
    assert!(store.backend().keys().unwrap().is_empty());
}
