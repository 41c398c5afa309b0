#![forbid(unsafe_code)]

//! String-in, JSON-out adapter over [`EmojiKit`].
//!
//! JavaScript callers exchange plain strings with the wasm export, so this
//! layer owns the JSON encoding and error mapping. It is target-independent
//! and tested natively.

use std::fmt;

use serde::Serialize;

use emojikit::{
    Catalogue, CatalogueError, EmojiKit, KitConfig, PickerConfig, ProbeError, RenderingProbe,
    SharedStore, SkinTone, StorageError, UnknownSkinTone,
};

/// Errors surfaced to JavaScript as exception messages.
#[derive(Debug)]
pub enum BridgeError {
    /// The catalogue JSON could not be parsed.
    Catalogue(CatalogueError),
    /// The rendering surface could not be calibrated.
    Probe(ProbeError),
    /// Picker options were not valid JSON.
    Options(serde_json::Error),
    /// A skin tone name was not recognized.
    Tone(UnknownSkinTone),
    /// Persisted state could not be reset.
    Storage(StorageError),
    /// A result could not be encoded.
    Encode(serde_json::Error),
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Catalogue(e) => write!(f, "{e}"),
            Self::Probe(e) => write!(f, "{e}"),
            Self::Options(e) => write!(f, "invalid picker options: {e}"),
            Self::Tone(e) => write!(f, "{e}"),
            Self::Storage(e) => write!(f, "storage error: {e}"),
            Self::Encode(e) => write!(f, "failed to encode result: {e}"),
        }
    }
}

impl std::error::Error for BridgeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Catalogue(e) => Some(e),
            Self::Probe(e) => Some(e),
            Self::Options(e) | Self::Encode(e) => Some(e),
            Self::Tone(e) => Some(e),
            Self::Storage(e) => Some(e),
        }
    }
}

impl From<CatalogueError> for BridgeError {
    fn from(err: CatalogueError) -> Self {
        Self::Catalogue(err)
    }
}

impl From<ProbeError> for BridgeError {
    fn from(err: ProbeError) -> Self {
        Self::Probe(err)
    }
}

impl From<UnknownSkinTone> for BridgeError {
    fn from(err: UnknownSkinTone) -> Self {
        Self::Tone(err)
    }
}

impl From<StorageError> for BridgeError {
    fn from(err: StorageError) -> Self {
        Self::Storage(err)
    }
}

pub type BridgeResult<T> = Result<T, BridgeError>;

/// Tone descriptor for building a tone selector.
#[derive(Debug, Serialize)]
struct ToneInfo {
    id: SkinTone,
    label: &'static str,
    sample: String,
}

/// Glyph used to preview each tone.
const TONE_SAMPLE: &str = "👍";

/// JSON adapter around an [`EmojiKit`].
#[derive(Debug)]
pub struct Bridge<P> {
    kit: EmojiKit<P>,
}

impl<P: RenderingProbe> Bridge<P> {
    /// Parse `catalogue_json` (compact `e`/`n`/`s` or long field names) and
    /// open a kit over `store`.
    ///
    /// Fails with [`BridgeError::Probe`] when the surface cannot be measured
    /// yet. A fresh store is left untouched in that case.
    pub fn open(
        catalogue_json: &str,
        probe: P,
        store: SharedStore,
        config: KitConfig,
    ) -> BridgeResult<Self> {
        let catalogue = Catalogue::from_json(catalogue_json)?;
        Ok(Self {
            kit: EmojiKit::with_config(catalogue, probe, store, config)?,
        })
    }

    /// Numeric support level (`0`/`1`/`2`).
    pub fn classify(&mut self, sequence: &str) -> u8 {
        self.kit.classify(sequence).code()
    }

    pub fn apply_tone(&self, sequence: &str, tone: &str) -> BridgeResult<String> {
        Ok(self.kit.apply_tone(sequence, tone.parse()?))
    }

    /// `[{"id":"neutral","label":"neutral","sample":"👍"}, ...]`
    pub fn list_tones(&self) -> BridgeResult<String> {
        let tones: Vec<ToneInfo> = self
            .kit
            .list_tones()
            .iter()
            .map(|&tone| ToneInfo {
                id: tone,
                label: tone.label(),
                sample: self.kit.apply_tone(TONE_SAMPLE, tone),
            })
            .collect();
        encode(&tones)
    }

    /// Record the catalogue entry for `emoji` as a favorite.
    pub fn add_favorite(&mut self, emoji: &str) -> bool {
        self.kit.select(emoji)
    }

    pub fn list_favorites(&self) -> BridgeResult<String> {
        encode(self.kit.list_favorites())
    }

    pub fn clear_favorites(&mut self) {
        self.kit.clear_favorites();
    }

    pub fn search(&self, term: &str) -> BridgeResult<String> {
        encode(&self.kit.search(term))
    }

    /// Catalogue entry for `emoji` as JSON, or `None`.
    pub fn lookup(&self, emoji: &str) -> BridgeResult<Option<String>> {
        self.kit.lookup(emoji).map(encode).transpose()
    }

    /// Palette plan for the given picker options. Blank options use defaults.
    pub fn palette(&mut self, options_json: &str) -> BridgeResult<String> {
        let config = if options_json.trim().is_empty() {
            PickerConfig::default()
        } else {
            PickerConfig::from_json(options_json).map_err(BridgeError::Options)?
        };
        encode(&self.kit.palette(&config))
    }

    pub fn reset_stored_data(&mut self) -> BridgeResult<usize> {
        Ok(self.kit.reset_stored_data()?)
    }

    #[must_use]
    pub fn kit(&self) -> &EmojiKit<P> {
        &self.kit
    }
}

fn encode<T: Serialize + ?Sized>(value: &T) -> BridgeResult<String> {
    serde_json::to_string(value).map_err(BridgeError::Encode)
}
