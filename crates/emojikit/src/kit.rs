#![forbid(unsafe_code)]

//! The [`EmojiKit`] facade.

use std::rc::Rc;

use emojikit_core::{
    Catalogue, EmojiEntry, FAVORITES_GROUP, NameIndex, SkinTone, SupportLevel, apply_tone,
};
use emojikit_detect::{Classifier, ClassifierStats, DetectorConfig, ProbeResult, RenderingProbe};
use emojikit_store::{
    ClassificationCache, FavoritesStore, SharedStore, StorageKeys, StorageResult,
};

use crate::picker::{Button, COMBINED_SECTION, Palette, PickerConfig, Section};

/// Construction options for [`EmojiKit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KitConfig {
    pub keys: StorageKeys,
    pub detector: DetectorConfig,
    /// Classify the whole catalogue up front when no verdicts are cached.
    pub prime: bool,
}

impl Default for KitConfig {
    fn default() -> Self {
        Self {
            keys: StorageKeys::default(),
            detector: DetectorConfig::default(),
            prime: true,
        }
    }
}

impl KitConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Storage prefix and detector tunables from a custom lookup (for tests).
    #[must_use]
    pub fn from_env_with<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            keys: StorageKeys::from_env_with(&get_env),
            detector: DetectorConfig::from_env_with(&get_env),
            prime: true,
        }
    }

    #[must_use]
    pub fn without_prime(mut self) -> Self {
        self.prime = false;
        self
    }
}

/// Emoji catalogue bound to one rendering surface and one store.
///
/// Owns the classifier (with its cache) and the favorites list for as long
/// as the kit lives. Single-threaded.
pub struct EmojiKit<P> {
    catalogue: Catalogue,
    names: NameIndex,
    classifier: Classifier<P>,
    favorites: FavoritesStore,
    keys: StorageKeys,
    store: SharedStore,
}

impl<P: RenderingProbe> EmojiKit<P> {
    /// Kit with default keys and detector settings.
    pub fn new(catalogue: Catalogue, probe: P, store: SharedStore) -> ProbeResult<Self> {
        Self::with_config(catalogue, probe, store, KitConfig::default())
    }

    /// Load persisted state from `store`, calibrate `probe`, and (when
    /// configured and nothing is cached yet) classify the whole catalogue.
    ///
    /// Fails when the surface cannot measure the reference glyph yet; retry
    /// once the host is ready to lay out text.
    pub fn with_config(
        catalogue: Catalogue,
        probe: P,
        store: SharedStore,
        config: KitConfig,
    ) -> ProbeResult<Self> {
        let KitConfig {
            keys,
            detector,
            prime,
        } = config;

        let cache = ClassificationCache::load(Rc::clone(&store), &keys);
        let mut classifier = Classifier::calibrate(probe, cache, detector)?;
        let favorites = FavoritesStore::load(Rc::clone(&store), &keys);
        if prime {
            classifier.prime(catalogue.entries());
        }
        tracing::info!(
            backend = store.name(),
            prefix = keys.prefix(),
            groups = catalogue.groups().len(),
            entries = catalogue.len(),
            favorites = favorites.len(),
            "emoji kit ready"
        );

        Ok(Self {
            names: NameIndex::new(&catalogue),
            catalogue,
            classifier,
            favorites,
            keys,
            store,
        })
    }

    /// Support level of `sequence` on this host.
    pub fn classify(&mut self, sequence: &str) -> SupportLevel {
        self.classifier.classify(sequence)
    }

    /// `sequence` recolored to `tone`; [`SkinTone::Neutral`] strips tones.
    #[must_use]
    pub fn apply_tone(&self, sequence: &str, tone: SkinTone) -> String {
        apply_tone(sequence, tone)
    }

    /// Every skin tone, neutral first.
    #[must_use]
    pub fn list_tones(&self) -> &'static [SkinTone] {
        &SkinTone::ALL
    }

    /// Record `entry` as recently used. `false` if already present.
    pub fn add_favorite(&mut self, entry: EmojiEntry) -> bool {
        self.favorites.add(entry)
    }

    #[must_use]
    pub fn list_favorites(&self) -> &[EmojiEntry] {
        self.favorites.list()
    }

    pub fn clear_favorites(&mut self) {
        self.favorites.reset();
    }

    /// Record the catalogue entry for `emoji` as a favorite.
    ///
    /// Returns `false` when `emoji` is unknown or already a favorite.
    pub fn select(&mut self, emoji: &str) -> bool {
        match self.catalogue.lookup(emoji) {
            Some(entry) => self.favorites.add(entry.clone()),
            None => {
                tracing::warn!(%emoji, "selected emoji is not in the catalogue");
                false
            }
        }
    }

    /// Entries whose name contains `term`, case-insensitively.
    ///
    /// Favorites are scanned first, then the catalogue in group order; each
    /// `emoji` appears once. An empty term matches nothing.
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<EmojiEntry> {
        self.names
            .search(&self.catalogue, self.favorites.list(), term)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Exact catalogue match for `emoji`. Favorites are not consulted.
    #[must_use]
    pub fn lookup(&self, emoji: &str) -> Option<&EmojiEntry> {
        self.catalogue.lookup(emoji)
    }

    /// Entries of group `name`; `""` is the favorites list.
    #[must_use]
    pub fn group(&self, name: &str) -> Option<&[EmojiEntry]> {
        if name == FAVORITES_GROUP {
            Some(self.favorites.list())
        } else {
            self.catalogue.group(name)
        }
    }

    /// Plan the picker for `config`: classify, filter, and tone every entry.
    ///
    /// Groups missing from the catalogue are logged and skipped.
    pub fn palette(&mut self, config: &PickerConfig) -> Palette {
        let _span = tracing::debug_span!("palette", groups = config.groups.len()).entered();
        let mut palette = Palette::default();

        if config.show_recent {
            let buttons = plan_buttons(&mut self.classifier, self.favorites.list(), config);
            palette.sections.push(Section {
                name: FAVORITES_GROUP.to_string(),
                caption: None,
                buttons,
            });
        }

        let mut combined = Vec::new();
        for (index, name) in config.groups.iter().enumerate() {
            let entries = match self.catalogue.group(name) {
                Some(entries) if !entries.is_empty() => entries,
                _ => {
                    tracing::warn!(group = %name, "emoji group does not exist, skipping");
                    continue;
                }
            };
            let buttons = plan_buttons(&mut self.classifier, entries, config);
            if config.captions.is_some() {
                palette.sections.push(Section {
                    name: name.clone(),
                    caption: config.caption(index).map(str::to_string),
                    buttons,
                });
            } else {
                combined.extend(buttons);
            }
        }
        if config.captions.is_none() {
            palette.sections.push(Section {
                name: COMBINED_SECTION.to_string(),
                caption: None,
                buttons: combined,
            });
        }

        tracing::debug!(
            sections = palette.sections.len(),
            buttons = palette.buttons().count(),
            "palette planned"
        );
        palette
    }

    /// Remove every persisted key under the prefix and empty the in-memory
    /// cache and favorites. Returns how many keys were removed.
    ///
    /// In-memory state is emptied even when the store fails.
    pub fn reset_stored_data(&mut self) -> StorageResult<usize> {
        let removed = self.keys.reset_all(self.store.as_ref());
        self.classifier.clear_cache();
        self.favorites.forget();
        removed
    }

    #[must_use]
    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    #[must_use]
    pub fn classifier(&self) -> &Classifier<P> {
        &self.classifier
    }

    #[must_use]
    pub fn stats(&self) -> ClassifierStats {
        self.classifier.stats()
    }

    #[must_use]
    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }
}

fn plan_buttons<P: RenderingProbe>(
    classifier: &mut Classifier<P>,
    entries: &[EmojiEntry],
    config: &PickerConfig,
) -> Vec<Button> {
    entries
        .iter()
        .filter_map(|entry| Button::plan(entry, classifier.classify(&entry.emoji), config))
        .collect()
}

impl<P> std::fmt::Debug for EmojiKit<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmojiKit")
            .field("groups", &self.catalogue.groups().len())
            .field("entries", &self.catalogue.len())
            .field("favorites", &self.favorites)
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}
