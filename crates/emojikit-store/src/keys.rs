//! Storage key namespace.
//!
//! All persisted state lives under one application prefix so a "reset stored
//! data" action can remove it without touching unrelated keys.

use crate::backend::{KeyValueStore, StorageResult};

/// Environment variable overriding the storage prefix.
const ENV_STORAGE_PREFIX: &str = "EMOJIKIT_STORAGE_PREFIX";

/// Default prefix for every persisted key.
pub const DEFAULT_PREFIX: &str = "emojikit";

/// Key names derived from an application prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    prefix: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

impl StorageKeys {
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Default keys, with the prefix taken from `EMOJIKIT_STORAGE_PREFIX` when set.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom lookup (for tests).
    #[must_use]
    pub fn from_env_with<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        match get_env(ENV_STORAGE_PREFIX) {
            Some(prefix) if !prefix.trim().is_empty() => Self::new(prefix.trim()),
            _ => Self::default(),
        }
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Key of the favorites list (JSON array of entries).
    #[must_use]
    pub fn favorites(&self) -> String {
        format!("{}-fav", self.prefix)
    }

    /// Key of the classification cache (JSON object of sequence to level).
    #[must_use]
    pub fn support_cache(&self) -> String {
        format!("{}-sup", self.prefix)
    }

    /// Whether `key` belongs to this namespace (`<prefix>-...`).
    #[must_use]
    pub fn owns(&self, key: &str) -> bool {
        key.strip_prefix(self.prefix.as_str())
            .is_some_and(|rest| rest.starts_with('-'))
    }

    /// Remove every key under the prefix. Returns how many were removed.
    pub fn reset_all(&self, store: &dyn KeyValueStore) -> StorageResult<usize> {
        let owned: Vec<String> = store.keys()?.into_iter().filter(|k| self.owns(k)).collect();
        for key in &owned {
            store.remove(key)?;
        }
        tracing::info!(prefix = %self.prefix, removed = owned.len(), "stored emoji data reset");
        Ok(owned.len())
    }
}
