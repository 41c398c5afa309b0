#![forbid(unsafe_code)]

//! Core data model for emojikit.
//!
//! This crate holds the pieces that need no rendering surface and no storage:
//! - [`EmojiEntry`] / [`Catalogue`] - the grouped emoji dataset
//! - [`SupportLevel`] - the classifier's verdict for a sequence
//! - [`SkinTone`] / [`apply_tone`] - skin-tone modifier composition
//! - [`SearchIndex`] - case-insensitive name search across groups
//!
//! # Example
//! ```
//! use emojikit_core::{apply_tone, SkinTone};
//!
//! let dark = apply_tone("👍", SkinTone::Dark);
//! assert_eq!(dark, "👍\u{1F3FF}");
//! assert_eq!(apply_tone(&dark, SkinTone::Neutral), "👍");
//! ```

pub mod entry;
pub mod props;
pub mod search;
pub mod support;
pub mod tone;

pub use entry::{Catalogue, CatalogueError, EmojiEntry, FAVORITES_GROUP, Group};
pub use search::{NameIndex, SearchIndex};
pub use support::SupportLevel;
pub use tone::{SkinTone, UnknownSkinTone, apply_tone, strip_tones};
