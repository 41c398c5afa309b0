#![forbid(unsafe_code)]

//! Case-insensitive name search across catalogue groups.
//!
//! # Example
//! ```
//! use emojikit_core::{Catalogue, EmojiEntry, SearchIndex};
//!
//! let cat = Catalogue::from_groups([(
//!     "Smileys",
//!     vec![EmojiEntry::new("😀", "Grinning face", false)],
//! )]);
//! let index = SearchIndex::new(&cat);
//! assert_eq!(index.search("GRIN").len(), 1);
//! assert!(index.search("").is_empty());
//! ```

use std::collections::HashSet;

use crate::entry::{Catalogue, EmojiEntry};

/// Lowercased names, built once per catalogue.
///
/// Matching is a linear scan; the catalogue is a few thousand entries.
#[derive(Debug, Clone)]
pub struct SearchIndex<'a> {
    names: Vec<(String, &'a EmojiEntry)>,
}

impl<'a> SearchIndex<'a> {
    #[must_use]
    pub fn new(catalogue: &'a Catalogue) -> Self {
        Self::from_entries(catalogue.entries())
    }

    /// Index an arbitrary run of entries, in iteration order.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a EmojiEntry>,
    {
        Self {
            names: entries
                .into_iter()
                .map(|e| (e.name.to_lowercase(), e))
                .collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Entries whose name contains `term`, ignoring case.
    ///
    /// An emoji already matched earlier is not repeated. An empty term means
    /// "search inactive" and matches nothing.
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<&'a EmojiEntry> {
        if term.is_empty() {
            return Vec::new();
        }
        let needle = term.to_lowercase();
        let mut seen = HashSet::new();
        let mut results = Vec::new();
        collect_matches(
            self.names.iter().map(|(name, entry)| (name.as_str(), *entry)),
            &needle,
            &mut seen,
            &mut results,
        );
        tracing::trace!(term, matches = results.len(), "emoji search");
        results
    }
}

/// Lowercased names of one catalogue, owned so it can be kept beside the
/// catalogue it was built from.
#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    names: Vec<String>,
}

impl NameIndex {
    #[must_use]
    pub fn new(catalogue: &Catalogue) -> Self {
        Self {
            names: catalogue.entries().map(|e| e.name.to_lowercase()).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Matches among `leading`, then among `catalogue`, with the same rules
    /// as [`SearchIndex::search`].
    ///
    /// `catalogue` must be the one this index was built from. Only the
    /// `leading` names are lowercased per call.
    #[must_use]
    pub fn search<'e>(
        &self,
        catalogue: &'e Catalogue,
        leading: &'e [EmojiEntry],
        term: &str,
    ) -> Vec<&'e EmojiEntry> {
        if term.is_empty() {
            return Vec::new();
        }
        debug_assert_eq!(self.names.len(), catalogue.len());
        let needle = term.to_lowercase();
        let mut seen = HashSet::new();
        let mut results = Vec::new();

        let leading_names: Vec<String> = leading.iter().map(|e| e.name.to_lowercase()).collect();
        collect_matches(
            leading_names.iter().map(String::as_str).zip(leading),
            &needle,
            &mut seen,
            &mut results,
        );
        collect_matches(
            self.names.iter().map(String::as_str).zip(catalogue.entries()),
            &needle,
            &mut seen,
            &mut results,
        );
        tracing::trace!(term, matches = results.len(), "emoji search");
        results
    }
}

fn collect_matches<'n, 'e, I>(
    candidates: I,
    needle: &str,
    seen: &mut HashSet<&'e str>,
    results: &mut Vec<&'e EmojiEntry>,
) where
    I: IntoIterator<Item = (&'n str, &'e EmojiEntry)>,
{
    for (name, entry) in candidates {
        if name.contains(needle) && seen.insert(entry.emoji.as_str()) {
            results.push(entry);
        }
    }
}
