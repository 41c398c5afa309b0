#![forbid(unsafe_code)]

//! Picker options and the palette plan.
//!
//! A [`Palette`] is what a picker UI would draw: ordered sections of buttons,
//! each button already classified, filtered by visibility, and toned. It
//! holds no DOM or widget state.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use emojikit_core::{EmojiEntry, SkinTone, SupportLevel};

/// Environment variable selecting the default skin tone (`dark`, `medium light`, ...).
const ENV_SKIN_TONE: &str = "EMOJIKIT_SKIN_TONE";
/// Environment variable to show fallback-rendered emoji (`1/0/true/false`).
const ENV_SHOW_FALLBACKS: &str = "EMOJIKIT_SHOW_FALLBACKS";

/// Catalogue groups offered when no explicit list is configured.
pub const DEFAULT_GROUPS: [&str; 9] = [
    "Smileys & Emotion",
    "Activities",
    "Animals & Nature",
    "Flags",
    "Food & Drink",
    "Objects",
    "People & Body",
    "Symbols",
    "Travel & Places",
];

/// Name of the section holding every group when captions are disabled.
pub const COMBINED_SECTION: &str = "emojis";

/// Picker options, deserializable from the camelCase JSON a host passes in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PickerConfig {
    /// Catalogue groups to show, in display order.
    pub groups: Vec<String>,
    /// Per-group headers, parallel to `groups`.
    ///
    /// `None` merges every group into one uncaptioned section. An empty label
    /// hides that group's header; a missing one falls back to the group name.
    /// JSON `true` is an empty list, `false` or `null` is `None`.
    #[serde(deserialize_with = "deserialize_captions")]
    pub captions: Option<Vec<String>>,
    /// Prepend the favorites section.
    pub show_recent: bool,
    /// Tone applied to entries that accept one.
    pub skin_tone: SkinTone,
    /// Offer emoji that render as separate pieces.
    pub show_fallbacks: bool,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            groups: DEFAULT_GROUPS.iter().map(|g| (*g).to_string()).collect(),
            captions: Some(Vec::new()),
            show_recent: true,
            skin_tone: SkinTone::Neutral,
            show_fallbacks: false,
        }
    }
}

impl PickerConfig {
    /// Defaults with overrides from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Defaults with overrides from a custom lookup (for tests).
    #[must_use]
    pub fn from_env_with<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = get_env(ENV_SKIN_TONE) {
            match raw.parse::<SkinTone>() {
                Ok(tone) => config.skin_tone = tone,
                Err(e) => tracing::warn!(error = %e, "ignoring {ENV_SKIN_TONE}"),
            }
        }
        if let Some(show) = get_env(ENV_SHOW_FALLBACKS).and_then(|v| parse_bool(&v)) {
            config.show_fallbacks = show;
        }
        config
    }

    /// Parse host options. Absent fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn with_skin_tone(mut self, tone: SkinTone) -> Self {
        self.skin_tone = tone;
        self
    }

    #[must_use]
    pub fn with_show_fallbacks(mut self, show: bool) -> Self {
        self.show_fallbacks = show;
        self
    }

    #[must_use]
    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups = groups.into_iter().map(Into::into).collect();
        self
    }

    /// Header for the section of `groups[index]`, if any.
    #[must_use]
    pub fn caption(&self, index: usize) -> Option<&str> {
        match self.captions.as_ref()?.get(index) {
            Some(label) if label.is_empty() => None,
            Some(label) => Some(label.as_str()),
            None => self.groups.get(index).map(String::as_str),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn deserialize_captions<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Captions {
        Enabled(bool),
        Labels(Vec<String>),
    }

    Ok(match Option::<Captions>::deserialize(deserializer)? {
        None | Some(Captions::Enabled(false)) => None,
        Some(Captions::Enabled(true)) => Some(Vec::new()),
        Some(Captions::Labels(labels)) => Some(labels),
    })
}

/// One emoji button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Button {
    /// Catalogue sequence, used for selection and favorites.
    pub emoji: String,
    /// Sequence to display and insert (toned when the entry accepts a tone).
    pub glyph: String,
    /// Capitalized entry name.
    pub title: String,
    pub level: SupportLevel,
}

impl Button {
    /// Button for `entry` classified as `level`, or `None` when hidden.
    pub(crate) fn plan(entry: &EmojiEntry, level: SupportLevel, config: &PickerConfig) -> Option<Self> {
        if !emojikit_detect::visibility(level, config.show_fallbacks) {
            return None;
        }
        let glyph = if entry.skintone && !config.skin_tone.is_neutral() {
            emojikit_core::apply_tone(&entry.emoji, config.skin_tone)
        } else {
            entry.emoji.clone()
        };
        Some(Self {
            emoji: entry.emoji.clone(),
            glyph,
            title: entry.title(),
            level,
        })
    }
}

/// A titled run of buttons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Group name; `""` for favorites, [`COMBINED_SECTION`] when merged.
    pub name: String,
    pub caption: Option<String>,
    pub buttons: Vec<Button>,
}

impl Section {
    #[must_use]
    pub fn is_recent(&self) -> bool {
        self.name == emojikit_core::FAVORITES_GROUP
    }
}

/// Ordered picker sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub sections: Vec<Section>,
}

impl Palette {
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Every button, in display order.
    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.sections.iter().flat_map(|s| s.buttons.iter())
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in &self.sections {
            let label = section.caption.as_deref().unwrap_or(&section.name);
            write!(f, "[{label}]")?;
            for button in &section.buttons {
                write!(f, " {}", button.glyph)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
