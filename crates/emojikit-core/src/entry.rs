#![forbid(unsafe_code)]

//! Emoji entries and the grouped catalogue.
//!
//! The dataset arrives as a JSON object keyed by group name, each group an
//! array of compact records (`{"e": "😀", "n": "grinning face", "s": false}`).
//! [`Catalogue::from_json`] normalizes those records into [`EmojiEntry`]
//! values once; nothing downstream sees the compact field names.
//!
//! Group order is the order of the source object. The empty group name is
//! reserved for the favorites list ([`FAVORITES_GROUP`]) and is never taken
//! from catalogue data.

use std::fmt;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

/// Group key under which callers find the favorites list.
pub const FAVORITES_GROUP: &str = "";

/// A single emoji with its display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmojiEntry {
    /// One or more scalar values, possibly joined with ZWJ / VS16.
    pub emoji: String,
    pub name: String,
    /// Whether the entry accepts skin tone modifiers.
    #[serde(default)]
    pub skintone: bool,
}

impl EmojiEntry {
    #[must_use]
    pub fn new(emoji: impl Into<String>, name: impl Into<String>, skintone: bool) -> Self {
        Self {
            emoji: emoji.into(),
            name: name.into(),
            skintone,
        }
    }

    /// The name with its first character uppercased (`"Thumbs up"`).
    #[must_use]
    pub fn title(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

/// A named, ordered run of entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub name: String,
    pub entries: Vec<EmojiEntry>,
}

/// Errors raised while loading a catalogue.
#[derive(Debug)]
pub enum CatalogueError {
    /// The dataset is not valid JSON or does not have the grouped shape.
    Parse(serde_json::Error),
}

impl fmt::Display for CatalogueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "invalid emoji catalogue: {e}"),
        }
    }
}

impl std::error::Error for CatalogueError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for CatalogueError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// The loaded emoji dataset. Read-only after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalogue {
    groups: Vec<Group>,
}

impl Catalogue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from already-normalized groups.
    ///
    /// A group named [`FAVORITES_GROUP`] is dropped.
    pub fn from_groups<I, S>(groups: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<EmojiEntry>)>,
        S: Into<String>,
    {
        let mut catalogue = Self::new();
        for (name, entries) in groups {
            catalogue.push_group(name.into(), entries);
        }
        catalogue
    }

    /// Parse the compact grouped dataset.
    pub fn from_json(json: &str) -> Result<Self, CatalogueError> {
        let catalogue: Self = serde_json::from_str(json)?;
        tracing::debug!(
            groups = catalogue.groups.len(),
            entries = catalogue.len(),
            "emoji catalogue loaded"
        );
        Ok(catalogue)
    }

    fn push_group(&mut self, name: String, entries: Vec<EmojiEntry>) {
        if name == FAVORITES_GROUP {
            tracing::warn!("catalogue group with reserved empty name ignored");
            return;
        }
        self.groups.push(Group { name, entries });
    }

    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.name.as_str())
    }

    /// Entries of the named group, if present.
    #[must_use]
    pub fn group(&self, name: &str) -> Option<&[EmojiEntry]> {
        self.groups
            .iter()
            .find(|g| g.name == name)
            .map(|g| g.entries.as_slice())
    }

    /// Every entry, group by group.
    pub fn entries(&self) -> impl Iterator<Item = &EmojiEntry> {
        self.groups.iter().flat_map(|g| g.entries.iter())
    }

    /// Total number of entries across groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.entries.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|g| g.entries.is_empty())
    }

    /// First entry whose `emoji` equals `emoji` exactly.
    #[must_use]
    pub fn lookup(&self, emoji: &str) -> Option<&EmojiEntry> {
        self.entries().find(|e| e.emoji == emoji)
    }
}

/// Compact wire record; the long names are accepted too.
#[derive(Deserialize)]
struct WireEntry {
    #[serde(rename = "e", alias = "emoji")]
    emoji: String,
    #[serde(rename = "n", alias = "name")]
    name: String,
    #[serde(rename = "s", alias = "skintone", default, deserialize_with = "flag")]
    skintone: bool,
}

impl From<WireEntry> for EmojiEntry {
    fn from(w: WireEntry) -> Self {
        Self {
            emoji: w.emoji,
            name: w.name,
            skintone: w.skintone,
        }
    }
}

/// The dataset encodes the skin tone flag as a bool or as `0`/`1`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Number(u64),
}

fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(b)) => b,
        Some(Flag::Number(n)) => n != 0,
        None => false,
    })
}

struct CatalogueVisitor;

impl<'de> Visitor<'de> for CatalogueVisitor {
    type Value = Catalogue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object mapping group names to arrays of emoji records")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut catalogue = Catalogue::new();
        while let Some((name, entries)) = map.next_entry::<String, Vec<WireEntry>>()? {
            catalogue.push_group(name, entries.into_iter().map(EmojiEntry::from).collect());
        }
        Ok(catalogue)
    }
}

impl<'de> Deserialize<'de> for Catalogue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(CatalogueVisitor)
    }
}
