//! Recently chosen emoji, persisted across sessions.
//!
//! The list keeps first-use order and never holds two entries with the same
//! `emoji`. Entries are only appended; the sole removal is [`FavoritesStore::reset`].

use emojikit_core::EmojiEntry;

use crate::backend::{MemoryStore, SharedStore, StorageError};
use crate::keys::StorageKeys;

/// Ordered favorites, persisted as a JSON array under `<prefix>-fav`.
pub struct FavoritesStore {
    store: SharedStore,
    key: String,
    entries: Vec<EmojiEntry>,
}

impl FavoritesStore {
    /// Read the persisted list.
    ///
    /// Missing or malformed data re-initializes to an empty list, which is
    /// written back immediately.
    pub fn load(store: SharedStore, keys: &StorageKeys) -> Self {
        let mut favorites = Self {
            store,
            key: keys.favorites(),
            entries: Vec::new(),
        };

        let raw = favorites.store.get(&favorites.key).unwrap_or_else(|e| {
            tracing::warn!(key = %favorites.key, error = %e, "favorites unreadable");
            None
        });
        match raw.as_deref().map(serde_json::from_str::<Vec<EmojiEntry>>) {
            Some(Ok(entries)) => {
                tracing::debug!(entries = entries.len(), "favorites loaded");
                favorites.entries = entries;
            }
            Some(Err(e)) => {
                tracing::warn!(key = %favorites.key, error = %e, "malformed favorites, resetting");
                favorites.persist();
            }
            None => favorites.persist(),
        }
        favorites
    }

    /// Favorites backed by a private [`MemoryStore`].
    #[must_use]
    pub fn in_memory() -> Self {
        Self::load(MemoryStore::new().shared(), &StorageKeys::default())
    }

    /// Entries in first-added order.
    #[must_use]
    pub fn list(&self) -> &[EmojiEntry] {
        &self.entries
    }

    #[must_use]
    pub fn contains(&self, emoji: &str) -> bool {
        self.entries.iter().any(|e| e.emoji == emoji)
    }

    /// Append `entry` unless its `emoji` is already present.
    ///
    /// Returns `false` (and changes nothing) for a duplicate.
    pub fn add(&mut self, entry: EmojiEntry) -> bool {
        if self.contains(&entry.emoji) {
            return false;
        }
        tracing::debug!(emoji = %entry.emoji, "favorite added");
        self.entries.push(entry);
        self.persist();
        true
    }

    /// Empty the list and persist the empty state.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.persist();
    }

    /// Empty the in-memory list without writing, for when the persisted key
    /// has already been removed.
    pub fn forget(&mut self) {
        self.entries.clear();
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
        let result = serde_json::to_string(&self.entries)
            .map_err(StorageError::from)
            .and_then(|json| self.store.set(&self.key, &json));
        if let Err(e) = result {
            tracing::warn!(key = %self.key, error = %e, "failed to persist favorites");
        }
    }
}

impl std::fmt::Debug for FavoritesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritesStore")
            .field("backend", &self.store.name())
            .field("key", &self.key)
            .field("entries", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{KeyValueStore, StorageResult};
    use std::rc::Rc;

    fn thumbs_up() -> EmojiEntry {
        EmojiEntry::new("👍", "thumbs up", true)
    }

    #[test]
    fn missing_list_is_initialized_and_persisted() {
        let store = MemoryStore::new().shared();
        let favorites = FavoritesStore::load(Rc::clone(&store), &StorageKeys::default());
        assert!(favorites.is_empty());
        assert_eq!(store.get("emojikit-fav").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn malformed_list_resets() {
        let store = MemoryStore::with_entries([("emojikit-fav", r#"{"not":"a list"}"#)]).shared();
        let favorites = FavoritesStore::load(Rc::clone(&store), &StorageKeys::default());
        assert!(favorites.is_empty());
        assert_eq!(store.get("emojikit-fav").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn duplicate_add_is_rejected() {
        let mut favorites = FavoritesStore::in_memory();
        assert!(favorites.add(thumbs_up()));
        assert!(!favorites.add(thumbs_up()));
        assert_eq!(favorites.len(), 1);
    }

    #[test]
    fn order_is_first_added() {
        let mut favorites = FavoritesStore::in_memory();
        favorites.add(EmojiEntry::new("😀", "grinning face", false));
        favorites.add(thumbs_up());
        favorites.add(EmojiEntry::new("😀", "grinning face", false));
        let order: Vec<_> = favorites.list().iter().map(|e| e.emoji.as_str()).collect();
        assert_eq!(order, ["😀", "👍"]);
    }

    #[test]
    fn list_survives_reload() {
        let store = MemoryStore::new().shared();
        let mut favorites = FavoritesStore::load(Rc::clone(&store), &StorageKeys::default());
        favorites.add(thumbs_up());

        let reloaded = FavoritesStore::load(store, &StorageKeys::default());
        assert_eq!(reloaded.list(), [thumbs_up()]);
    }

    #[test]
    fn reset_persists_empty_list() {
        let store = MemoryStore::new().shared();
        let mut favorites = FavoritesStore::load(Rc::clone(&store), &StorageKeys::default());
        favorites.add(thumbs_up());
        favorites.reset();
        assert!(favorites.is_empty());
        assert_eq!(store.get("emojikit-fav").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn forget_leaves_store_untouched() {
        let store = MemoryStore::new().shared();
        let mut favorites = FavoritesStore::load(Rc::clone(&store), &StorageKeys::default());
        favorites.add(thumbs_up());
        store.remove("emojikit-fav").unwrap();

        favorites.forget();
        assert!(favorites.is_empty());
        assert_eq!(store.get("emojikit-fav").unwrap(), None);
    }

    /// Backend whose writes always fail.
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
        let mut favorites = FavoritesStore::load(Rc::new(ReadOnly), &StorageKeys::default());
        assert!(favorites.add(thumbs_up()));
        assert_eq!(favorites.len(), 1);
    }
}
