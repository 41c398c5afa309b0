//! Persistent classification cache.
//!
//! Maps an exact emoji sequence to the [`SupportLevel`] computed for it. The
//! map is read once when the cache is loaded and written through on every
//! change, as one JSON object (`{"🚩": 1, "🫠": 0}`).
//!
//! Entries never expire: a host's font stack is assumed stable, and a stale
//! verdict after a platform upgrade is fixed only by [`ClassificationCache::clear`].
//! Persistence is best-effort. A failed write is logged and the in-memory
//! map still changes.

use std::collections::{BTreeMap, HashMap};

use emojikit_core::SupportLevel;

use crate::backend::{MemoryStore, SharedStore, StorageError};
use crate::keys::StorageKeys;

/// Sequence → support level, persisted under `<prefix>-sup`.
pub struct ClassificationCache {
    store: SharedStore,
    key: String,
    entries: HashMap<String, SupportLevel>,
}

impl ClassificationCache {
    /// Read the persisted map.
    ///
    /// Missing data yields an empty cache. Malformed JSON is treated as
    /// missing, and the empty map is persisted in its place.
    pub fn load(store: SharedStore, keys: &StorageKeys) -> Self {
        let key = keys.support_cache();
        let mut cache = Self {
            store,
            key,
            entries: HashMap::new(),
        };

        let raw = match cache.store.get(&cache.key) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(key = %cache.key, error = %e, "classification cache unreadable");
                None
            }
        };
        let Some(raw) = raw else {
            return cache;
        };

        match serde_json::from_str::<BTreeMap<String, u8>>(&raw) {
            Ok(codes) => {
                for (sequence, code) in codes {
                    match SupportLevel::from_code(code) {
                        Some(level) => {
                            cache.entries.insert(sequence, level);
                        }
                        None => {
                            tracing::warn!(%sequence, code, "unknown support level, skipping");
                        }
                    }
                }
                tracing::debug!(entries = cache.entries.len(), "classification cache loaded");
            }
            Err(e) => {
                tracing::warn!(key = %cache.key, error = %e, "malformed classification cache, resetting");
                cache.persist();
            }
        }
        cache
    }

    /// A cache backed by a private [`MemoryStore`].
    #[must_use]
    pub fn in_memory() -> Self {
        Self::load(MemoryStore::new().shared(), &StorageKeys::default())
    }

    #[must_use]
    pub fn get(&self, sequence: &str) -> Option<SupportLevel> {
        self.entries.get(sequence).copied()
    }

    #[must_use]
    pub fn contains(&self, sequence: &str) -> bool {
        self.entries.contains_key(sequence)
    }

    /// Record `level` for `sequence` and write through.
    ///
    /// The empty sequence is never recorded.
    pub fn put(&mut self, sequence: &str, level: SupportLevel) {
        if sequence.is_empty() {
            return;
        }
        self.entries.insert(sequence.to_string(), level);
        self.persist();
    }

    /// Record many levels with a single write.
    pub fn extend<I, S>(&mut self, levels: I)
    where
        I: IntoIterator<Item = (S, SupportLevel)>,
        S: Into<String>,
    {
        let before = self.entries.len();
        for (sequence, level) in levels {
            let sequence = sequence.into();
            if !sequence.is_empty() {
                self.entries.insert(sequence, level);
            }
        }
        tracing::trace!(added = self.entries.len() - before, "classification cache extended");
        self.persist();
    }

    /// Drop every entry and the persisted key.
    pub fn clear(&mut self) {
        self.entries.clear();
        if let Err(e) = self.store.remove(&self.key) {
            tracing::warn!(key = %self.key, error = %e, "failed to remove classification cache");
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn persist(&self) {
        let codes: BTreeMap<&str, u8> = self
            .entries
            .iter()
            .map(|(sequence, level)| (sequence.as_str(), level.code()))
            .collect();
        let result = serde_json::to_string(&codes)
            .map_err(StorageError::from)
            .and_then(|json| self.store.set(&self.key, &json));
        if let Err(e) = result {
            tracing::warn!(key = %self.key, error = %e, "failed to persist classification cache");
        }
    }
}

impl std::fmt::Debug for ClassificationCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassificationCache")
            .field("backend", &self.store.name())
            .field("key", &self.key)
            .field("entries", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{KeyValueStore, MemoryStore, StorageResult};
    use std::rc::Rc;

    fn shared_with(entries: &[(&str, &str)]) -> SharedStore {
        MemoryStore::with_entries(entries.iter().copied()).shared()
    }

    #[test]
    fn put_writes_through() {
        let store = MemoryStore::new().shared();
        let mut cache = ClassificationCache::load(Rc::clone(&store), &StorageKeys::default());
        cache.put("🚩", SupportLevel::Supported);
        cache.put("🫠", SupportLevel::NotSupported);

        assert_eq!(
            store.get("emojikit-sup").unwrap().as_deref(),
            Some(r#"{"🚩":1,"🫠":0}"#)
        );
    }

    #[test]
    fn load_reads_numeric_levels() {
        let store = shared_with(&[("emojikit-sup", r#"{"🚩":1,"👨‍👩‍👧":2,"🫠":0}"#)]);
        let cache = ClassificationCache::load(store, &StorageKeys::default());
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.get("🚩"), Some(SupportLevel::Supported));
        assert_eq!(cache.get("👨‍👩‍👧"), Some(SupportLevel::Fallback));
        assert_eq!(cache.get("🫠"), Some(SupportLevel::NotSupported));
        assert_eq!(cache.get("😀"), None);
    }

    #[test]
    fn malformed_json_resets_and_persists_empty() {
        let store = shared_with(&[("emojikit-sup", "{oops")]);
        let cache = ClassificationCache::load(Rc::clone(&store), &StorageKeys::default());
        assert!(cache.is_empty());
        assert_eq!(store.get("emojikit-sup").unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn unknown_codes_are_skipped() {
        let store = shared_with(&[("emojikit-sup", r#"{"a":1,"b":9}"#)]);
        let cache = ClassificationCache::load(store, &StorageKeys::default());
        assert_eq!(cache.len(), 1);
        assert!(cache.contains("a"));
        assert!(!cache.contains("b"));
    }

    #[test]
    fn empty_sequence_is_ignored() {
        let mut cache = ClassificationCache::in_memory();
        cache.put("", SupportLevel::Supported);
        cache.extend([("", SupportLevel::Fallback)]);
        assert!(cache.is_empty());
    }

    #[test]
    fn extend_persists_once_with_all_entries() {
        let store = MemoryStore::new().shared();
        let mut cache = ClassificationCache::load(Rc::clone(&store), &StorageKeys::default());
        cache.extend([("a", SupportLevel::Supported), ("b", SupportLevel::Fallback)]);
        let reloaded = ClassificationCache::load(store, &StorageKeys::default());
        assert_eq!(reloaded.get("b"), Some(SupportLevel::Fallback));
        assert_eq!(reloaded.len(), 2);
    }

    #[test]
    fn clear_removes_entries_and_key() {
        let store = MemoryStore::new().shared();
        let mut cache = ClassificationCache::load(Rc::clone(&store), &StorageKeys::default());
        cache.put("🚩", SupportLevel::Supported);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(store.get("emojikit-sup").unwrap(), None);
    }

    struct ReadOnly;

    impl KeyValueStore for ReadOnly {
        fn name(&self) -> &str {
            "ReadOnly"
        }
        fn get(&self, _key: &str) -> StorageResult<Option<String>> {
            Ok(None)
        }
        fn set(&self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::Unavailable("read-only".into()))
        }
        fn remove(&self, _key: &str) -> StorageResult<()> {
            Err(StorageError::Unavailable("read-only".into()))
        }
        fn keys(&self) -> StorageResult<Vec<String>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn failed_write_keeps_in_memory_state() {
        let mut cache = ClassificationCache::load(Rc::new(ReadOnly), &StorageKeys::default());
        cache.put("🚩", SupportLevel::Supported);
        cache.extend([("🫠", SupportLevel::NotSupported)]);
        assert_eq!(cache.get("🚩"), Some(SupportLevel::Supported));
        assert_eq!(cache.get("🫠"), Some(SupportLevel::NotSupported));

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get("🚩"), None);
    }
}
