//! String key-value storage backends.
//!
//! Everything emojikit persists goes through [`KeyValueStore`], a synchronous
//! string-to-string map with the same shape as browser `localStorage`:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │        ClassificationCache            FavoritesStore          │
//! │        (<prefix>-sup)                 (<prefix>-fav)          │
//! └──────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     KeyValueStore                             │
//! │   - MemoryStore: in-memory (testing, ephemeral)               │
//! │   - FileStore: JSON object file (requires file-store)         │
//! │   - LocalStorageStore: browser storage (emojikit-web)         │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Backends take `&self` and use interior mutability so the cache and the
//! favorites store can share one handle ([`SharedStore`]). Everything runs on
//! one thread; no backend is `Sync`.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | `StorageError::Io` | File I/O failure | Returned; callers log and continue |
//! | `StorageError::Serialization` | JSON encode failure | Returned |
//! | `StorageError::Corruption` | Unreadable backing file | Returned from reads; the next write replaces the file |
//! | `StorageError::Unavailable` | No storage on this host | Returned |

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

// ─────────────────────────────────────────────────────────────────────────────
// Error Types
// ─────────────────────────────────────────────────────────────────────────────

/// Errors that can occur during storage operations.
#[derive(Debug)]
pub enum StorageError {
    /// I/O error during file operations.
    Io(std::io::Error),
    /// Serialization or deserialization error.
    Serialization(String),
    /// Backing data is corrupted or has the wrong shape.
    Corruption(String),
    /// Backend is not available (no window, storage disabled, quota, ...).
    Unavailable(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "I/O error: {e}"),
            StorageError::Serialization(msg) => write!(f, "serialization error: {msg}"),
            StorageError::Corruption(msg) => write!(f, "storage corruption: {msg}"),
            StorageError::Unavailable(msg) => write!(f, "storage unavailable: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Serialization(e.to_string())
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

// ─────────────────────────────────────────────────────────────────────────────
// Backend Trait
// ─────────────────────────────────────────────────────────────────────────────

/// Synchronous string key-value storage.
pub trait KeyValueStore {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// Stored value for `key`; `Ok(None)` when absent.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;

    /// All keys currently stored.
    fn keys(&self) -> StorageResult<Vec<String>>;
}

/// Shared handle to a backend.
pub type SharedStore = Rc<dyn KeyValueStore>;

// ─────────────────────────────────────────────────────────────────────────────
// Memory Storage
// ─────────────────────────────────────────────────────────────────────────────

/// In-memory backend for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStore {
    data: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated store.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            data: RefCell::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Wrap in a [`SharedStore`].
    #[must_use]
    pub fn shared(self) -> SharedStore {
        Rc::new(self)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn name(&self) -> &str {
        "MemoryStore"
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.data.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.data
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.data.borrow_mut().remove(key);
        Ok(())
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        Ok(self.data.borrow().keys().cloned().collect())
    }
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStore")
            .field("entries", &self.len())
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Storage (requires file-store feature)
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(feature = "file-store")]
mod file_store {
    use super::*;
    use std::fs::{self, File};
    use std::io::{BufReader, BufWriter, Write};
    use std::path::{Path, PathBuf};

    /// JSON-object file backend.
    ///
    /// The whole file is one object mapping keys to string values, read on
    /// every access and rewritten on every mutation. The data is a few
    /// kilobytes, so this keeps the file as the single source of truth.
    ///
    /// Writes go to `{path}.tmp`, are synced, then renamed over `{path}`.
    pub struct FileStore {
        path: PathBuf,
    }

    impl FileStore {
        /// The file does not need to exist; it is created on first write.
        #[must_use]
        pub fn new(path: impl AsRef<Path>) -> Self {
            Self {
                path: path.as_ref().to_path_buf(),
            }
        }

        /// `$XDG_STATE_HOME/emojikit/{app_name}/storage.json`, falling back
        /// to `~/.local/state` and then the current directory.
        #[must_use]
        pub fn default_for_app(app_name: &str) -> Self {
            let path = state_dir()
                .join("emojikit")
                .join(app_name)
                .join("storage.json");
            Self { path }
        }

        #[must_use]
        pub fn path(&self) -> &Path {
            &self.path
        }

        fn temp_path(&self) -> PathBuf {
            let mut tmp = self.path.clone();
            tmp.set_extension("json.tmp");
            tmp
        }

        fn read_map(&self) -> StorageResult<BTreeMap<String, String>> {
            if !self.path.exists() {
                return Ok(BTreeMap::new());
            }
            let reader = BufReader::new(File::open(&self.path)?);
            serde_json::from_reader(reader).map_err(|e| {
                StorageError::Corruption(format!("{}: {e}", self.path.display()))
            })
        }

        /// Like `read_map`, but a corrupt file counts as empty so the next
        /// write replaces it.
        fn read_map_for_update(&self) -> StorageResult<BTreeMap<String, String>> {
            match self.read_map() {
                Err(StorageError::Corruption(msg)) => {
                    tracing::warn!(error = %msg, "discarding corrupt storage file");
                    Ok(BTreeMap::new())
                }
                other => other,
            }
        }

        fn write_map(&self, map: &BTreeMap<String, String>) -> StorageResult<()> {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent)?;
            }
            let tmp_path = self.temp_path();
            {
                let mut writer = BufWriter::new(File::create(&tmp_path)?);
                serde_json::to_writer(&mut writer, map)?;
                writer.flush()?;
                writer.get_ref().sync_all()?;
            }
            fs::rename(&tmp_path, &self.path)?;
            tracing::trace!(path = %self.path.display(), keys = map.len(), "storage file written");
            Ok(())
        }
    }

    fn state_dir() -> PathBuf {
        if let Ok(state_home) = std::env::var("XDG_STATE_HOME") {
            return PathBuf::from(state_home);
        }
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(".local").join("state");
        }
        PathBuf::from(".")
    }

    impl KeyValueStore for FileStore {
        fn name(&self) -> &str {
            "FileStore"
        }

        fn get(&self, key: &str) -> StorageResult<Option<String>> {
            Ok(self.read_map()?.remove(key))
        }

        fn set(&self, key: &str, value: &str) -> StorageResult<()> {
            let mut map = self.read_map_for_update()?;
            map.insert(key.to_string(), value.to_string());
            self.write_map(&map)
        }

        fn remove(&self, key: &str) -> StorageResult<()> {
            let mut map = self.read_map_for_update()?;
            if map.remove(key).is_some() {
                self.write_map(&map)?;
            }
            Ok(())
        }

        fn keys(&self) -> StorageResult<Vec<String>> {
            Ok(self.read_map()?.into_keys().collect())
        }
    }

    impl fmt::Debug for FileStore {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("FileStore").field("path", &self.path).finish()
        }
    }
}

#[cfg(feature = "file-store")]
pub use file_store::FileStore;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────


#[cfg(all(test, feature = "file-store"))]
mod file_store_tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_store_round_trip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("storage.json");
        let store = FileStore::new(&path);

        store.set("emojikit-fav", "[]").unwrap();
        assert!(path.exists());

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("emojikit-fav").unwrap().as_deref(), Some("[]"));
        assert_eq!(reopened.keys().unwrap(), vec!["emojikit-fav"]);
    }

    #[test]
    fn file_store_missing_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path().join("absent.json"));
        assert_eq!(store.get("k").unwrap(), None);
        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn file_store_creates_parent_dirs() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("dirs").join("storage.json");
        FileStore::new(&path).set("k", "v").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn file_store_remove_persists() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("storage.json");
        let store = FileStore::new(&path);
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        store.remove("a").unwrap();
        assert_eq!(FileStore::new(&path).keys().unwrap(), vec!["b"]);
    }

    #[test]
    fn corrupt_file_reads_fail_and_writes_replace_it() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("storage.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = FileStore::new(&path);
        assert!(matches!(store.get("k"), Err(StorageError::Corruption(_))));

        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
