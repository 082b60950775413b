//! Store configuration

use crate::key::DEFAULT_PREFIX;

/// Settings fixed for the lifetime of a [`NamespacedStore`](crate::NamespacedStore).
///
/// # Example
///
/// ```
/// use otter_storage::StoreConfig;
///
/// let config = StoreConfig::default().with_prefix("app:");
/// assert_eq!(config.prefix, "app:");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Prepended to every namespaced key (default: `"storage:"`)
    pub prefix: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

impl StoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the namespace prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }
}
