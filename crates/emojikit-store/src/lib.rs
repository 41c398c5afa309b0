#![forbid(unsafe_code)]

//! Persistence for emojikit.
//!
//! - [`KeyValueStore`] - the storage capability (`get`/`set`/`remove`/`keys`)
//! - [`MemoryStore`] / `FileStore` - in-memory and JSON-file backends
//! - [`StorageKeys`] - key names under one application prefix
//! - [`ClassificationCache`] - sequence → support level, written through
//! - [`FavoritesStore`] - deduplicated recently used emoji
//!
//! # Example
//! ```
//! use std::rc::Rc;
//! use emojikit_core::{EmojiEntry, SupportLevel};
//! use emojikit_store::{ClassificationCache, FavoritesStore, MemoryStore, StorageKeys};
//!
//! let store = MemoryStore::new().shared();
//! let keys = StorageKeys::default();
//!
//! let mut cache = ClassificationCache::load(Rc::clone(&store), &keys);
//! cache.put("🚩", SupportLevel::Supported);
//!
//! let mut favorites = FavoritesStore::load(Rc::clone(&store), &keys);
//! assert!(favorites.add(EmojiEntry::new("🚩", "triangular flag", false)));
//! assert!(!favorites.add(EmojiEntry::new("🚩", "triangular flag", false)));
//!
//! assert_eq!(keys.reset_all(store.as_ref()).unwrap(), 2);
//! ```

pub mod backend;
pub mod cache;
pub mod favorites;
pub mod keys;

#[cfg(feature = "file-store")]
pub use backend::FileStore;
pub use backend::{KeyValueStore, MemoryStore, SharedStore, StorageError, StorageResult};
pub use cache::ClassificationCache;
pub use favorites::FavoritesStore;
pub use keys::{DEFAULT_PREFIX, StorageKeys};
