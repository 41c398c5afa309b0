#![forbid(unsafe_code)]

//! Emoji catalogue with runtime compatibility detection.
//!
//! [`EmojiKit`] ties together:
//! - a [`Catalogue`] of grouped emoji,
//! - a [`Classifier`] that probes the host surface once per sequence and
//!   caches the verdict,
//! - a favorites list, name search, and skin-tone composition,
//! - a [`Palette`] planner for picker UIs.
//!
//! Rendering and storage are capabilities: supply a [`RenderingProbe`] and a
//! [`KeyValueStore`]. The `emojikit-web` crate provides browser
//! implementations of both.
//!
//! # Example
//! ```
//! # #[cfg(feature = "test-helpers")] {
//! use emojikit::{Catalogue, EmojiKit, MemoryStore, ScriptedProbe, SkinTone, SupportLevel};
//!
//! let catalogue = Catalogue::from_json(
//!     r#"{"Flags":[{"e":"🚩","n":"triangular flag","s":0}],
//!         "People & Body":[{"e":"👍","n":"thumbs up","s":1}]}"#,
//! )
//! .unwrap();
//! let mut kit =
//!     EmojiKit::new(catalogue, ScriptedProbe::default(), MemoryStore::new().shared()).unwrap();
//!
//! assert_eq!(kit.classify("🚩"), SupportLevel::Supported);
//! assert_eq!(kit.apply_tone("👍", SkinTone::Dark), "👍\u{1F3FF}");
//! assert!(kit.select("👍"));
//! assert_eq!(kit.search("THUMBS").len(), 1);
//! # }
//! ```

pub mod kit;
pub mod logging;
pub mod picker;

pub use kit::{EmojiKit, KitConfig};
pub use picker::{Button, COMBINED_SECTION, DEFAULT_GROUPS, Palette, PickerConfig, Section};

pub use emojikit_core::{
    Catalogue, CatalogueError, EmojiEntry, FAVORITES_GROUP, SkinTone, SupportLevel,
    UnknownSkinTone, apply_tone, strip_tones,
};
#[cfg(feature = "test-helpers")]
pub use emojikit_detect::ScriptedProbe;
pub use emojikit_detect::{
    Classifier, ClassifierStats, DetectorConfig, ProbeError, ProbeResult, REFERENCE_GLYPH,
    RenderingProbe, visibility,
};
#[cfg(feature = "file-store")]
pub use emojikit_store::FileStore;
pub use emojikit_store::{
    KeyValueStore, MemoryStore, SharedStore, StorageError, StorageKeys, StorageResult,
};
