//! Key validation, namespacing and zone matching

use regex::{Regex, RegexBuilder};

use crate::error::{StorageError, StorageResult};

/// Prefix every namespaced key is stored under.
pub const DEFAULT_PREFIX: &str = "storage:";

/// Separator a logical key must contain at least once.
pub const KEY_SEPARATOR: char = ':';

/// Returns true if `key` can be used for namespaced access.
///
/// A valid key has at least two `:`-separated segments, e.g. `"user:id"`.
/// Empty segments are allowed, so `":"` and `"user:"` pass.
pub fn is_valid_key(key: &str) -> bool {
    key.split(KEY_SEPARATOR).nth(1).is_some()
}

/// Physical key for a namespaced logical key.
pub(crate) fn storage_key(prefix: &str, key: &str) -> String {
    let mut out = String::with_capacity(prefix.len() + key.len());
    out.push_str(prefix);
    out.push_str(key);
    out
}

/// Matches physical keys that start with `prefix + zone`, ignoring case.
///
/// The zone is taken literally: regex metacharacters in it are escaped.
#[derive(Debug, Clone)]
pub struct ZoneMatcher {
    pattern: Regex,
}

impl ZoneMatcher {
    pub fn new(prefix: &str, zone: &str) -> StorageResult<Self> {
        let source = format!("^{}", regex::escape(&storage_key(prefix, zone)));
        let pattern = RegexBuilder::new(&source)
            .case_insensitive(true)
            .build()
            .map_err(|e| StorageError::InvalidZone(e.to_string()))?;
        Ok(Self { pattern })
    }

    pub fn matches(&self, key: &str) -> bool {
        self.pattern.is_match(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_keys() {
        assert!(is_valid_key("user:id"));
        assert!(is_valid_key("a:b:c"));
        assert!(is_valid_key(":"));
        assert!(is_valid_key("user:"));
    }

    #[test]
    fn test_invalid_keys() {
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("user"));
        assert!(!is_valid_key("user.id"));
    }

    #[test]
    fn test_storage_key_prefixing() {
        assert_eq!(storage_key(DEFAULT_PREFIX, "user:id"), "storage:user:id");
    }

    #[test]
    fn test_zone_matcher_case_insensitive() {
        let matcher = ZoneMatcher::new(DEFAULT_PREFIX, "user").unwrap();
        assert!(matcher.matches("storage:user:1"));
        assert!(matcher.matches("STORAGE:User:2"));
        assert!(matcher.matches("storage:users:3"));
        assert!(!matcher.matches("storage:admin:1"));
        assert!(!matcher.matches("user:1"));
    }

    #[test]
    fn test_zone_matcher_empty_zone_matches_whole_namespace() {
        let matcher = ZoneMatcher::new(DEFAULT_PREFIX, "").unwrap();
        assert!(matcher.matches("storage:anything:at:all"));
        assert!(!matcher.matches("other:key"));
    }

    #[test]
    fn test_zone_matcher_escapes_metacharacters() {
        let matcher = ZoneMatcher::new(DEFAULT_PREFIX, "a.b").unwrap();
        assert!(matcher.matches("storage:a.b:1"));
        assert!(!matcher.matches("storage:axb:1"));
    }
}
