#![forbid(unsafe_code)]

//! Skin-tone composition.
//!
//! [`apply_tone`] rewrites an emoji sequence so that every `Emoji_Modifier_Base`
//! scalar carries the requested skin tone modifier. Existing modifiers are
//! always removed first, so re-toning never accumulates modifiers:
//!
//! ```
//! use emojikit_core::{apply_tone, SkinTone};
//!
//! let light = apply_tone("👍", SkinTone::Light);
//! assert_eq!(apply_tone(&light, SkinTone::Dark), apply_tone("👍", SkinTone::Dark));
//! assert_eq!(apply_tone(&light, SkinTone::Neutral), "👍");
//! ```
//!
//! U+FE0F is dropped from the output for every tone, including neutral, so
//! `apply_tone(apply_tone(s, a), b) == apply_tone(s, b)` for every input.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::props::{EMOJI_PRESENTATION_SELECTOR, is_modifier_base, is_skin_tone_modifier};

/// Skin tone selection, in picker order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SkinTone {
    /// No modifier.
    #[default]
    Neutral,
    Light,
    MediumLight,
    Medium,
    MediumDark,
    Dark,
}

impl SkinTone {
    /// All tones in their fixed order.
    pub const ALL: [Self; 6] = [
        Self::Neutral,
        Self::Light,
        Self::MediumLight,
        Self::Medium,
        Self::MediumDark,
        Self::Dark,
    ];

    /// The Fitzpatrick modifier for this tone; `None` for neutral.
    #[must_use]
    pub const fn modifier(self) -> Option<char> {
        match self {
            Self::Neutral => None,
            Self::Light => Some('\u{1F3FB}'),
            Self::MediumLight => Some('\u{1F3FC}'),
            Self::Medium => Some('\u{1F3FD}'),
            Self::MediumDark => Some('\u{1F3FE}'),
            Self::Dark => Some('\u{1F3FF}'),
        }
    }

    /// Stable identifier (`"mediumLight"`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Light => "light",
            Self::MediumLight => "mediumLight",
            Self::Medium => "medium",
            Self::MediumDark => "mediumDark",
            Self::Dark => "dark",
        }
    }

    /// Human readable label (`"medium light"`), used for button titles.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Light => "light",
            Self::MediumLight => "medium light",
            Self::Medium => "medium",
            Self::MediumDark => "medium dark",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub const fn is_neutral(self) -> bool {
        matches!(self, Self::Neutral)
    }
}

impl fmt::Display for SkinTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an unrecognized tone identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSkinTone(pub String);

impl fmt::Display for UnknownSkinTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown skin tone: {:?}", self.0)
    }
}

impl std::error::Error for UnknownSkinTone {}

impl FromStr for SkinTone {
    type Err = UnknownSkinTone;

    /// Accepts the camelCase identifier, case-insensitively, and the spaced
    /// label form (`"medium light"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|tone| {
                tone.as_str().eq_ignore_ascii_case(wanted) || tone.label().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| UnknownSkinTone(s.to_string()))
    }
}

/// Remove every skin tone modifier from `sequence`.
#[must_use]
pub fn strip_tones(sequence: &str) -> String {
    sequence.chars().filter(|&c| !is_skin_tone_modifier(c)).collect()
}

/// Compose `sequence` with `tone`.
///
/// Existing modifiers and U+FE0F are removed; for a non-neutral tone the
/// modifier is inserted right after each modifier base.
#[must_use]
pub fn apply_tone(sequence: &str, tone: SkinTone) -> String {
    let mut toned = String::with_capacity(sequence.len() + 4);
    let modifier = tone.modifier();
    for c in sequence.chars() {
        if is_skin_tone_modifier(c) || c == EMOJI_PRESENTATION_SELECTOR {
            continue;
        }
        toned.push(c);
        if let Some(m) = modifier
            && is_modifier_base(c)
        {
            toned.push(m);
        }
    }
    toned
}

#[cfg(test)]
mod tests {
    use super::*;

    const THUMBS_UP: &str = "👍";

    #[test]
    fn dark_thumbs_up_appends_modifier() {
        assert_eq!(apply_tone(THUMBS_UP, SkinTone::Dark), "👍\u{1F3FF}");
    }

    #[test]
    fn neutral_strips_prior_tone() {
        let toned = apply_tone(THUMBS_UP, SkinTone::Dark);
        assert_eq!(apply_tone(&toned, SkinTone::Neutral), THUMBS_UP);
    }

    #[test]
    fn retone_replaces_modifier() {
        let light = apply_tone(THUMBS_UP, SkinTone::Light);
        assert_eq!(apply_tone(&light, SkinTone::Medium), "👍\u{1F3FD}");
    }

    #[test]
    fn every_modifier_base_in_zwj_sequence_is_toned() {
        // woman ZWJ heart VS16 ZWJ man
        let couple = "👩\u{200D}❤\u{FE0F}\u{200D}👨";
        let toned = apply_tone(couple, SkinTone::MediumDark);
        assert_eq!(toned, "👩\u{1F3FE}\u{200D}❤\u{200D}👨\u{1F3FE}");
    }

    #[test]
    fn presentation_selector_is_dropped() {
        // index pointing up + VS16
        assert_eq!(apply_tone("☝\u{FE0F}", SkinTone::Light), "☝\u{1F3FB}");
        // runner ZWJ female sign VS16
        assert_eq!(
            apply_tone("🏃\u{200D}♀\u{FE0F}", SkinTone::Dark),
            "🏃\u{1F3FF}\u{200D}♀"
        );
    }

    #[test]
    fn non_base_sequences_pass_through() {
        assert_eq!(apply_tone("🚩", SkinTone::Dark), "🚩");
        assert_eq!(apply_tone("😀", SkinTone::Light), "😀");
    }

    #[test]
    fn strip_tones_keeps_everything_else() {
        assert_eq!(strip_tones("👍\u{1F3FB}"), THUMBS_UP);
        assert_eq!(strip_tones("☝\u{FE0F}"), "☝\u{FE0F}");
    }

    #[test]
    fn tone_order_and_modifiers() {
        assert_eq!(SkinTone::ALL[0], SkinTone::Neutral);
        assert_eq!(SkinTone::ALL[5], SkinTone::Dark);
        assert_eq!(SkinTone::Neutral.modifier(), None);
        assert_eq!(SkinTone::MediumLight.modifier(), Some('\u{1F3FC}'));
    }

    #[test]
    fn parse_identifiers_and_labels() {
        assert_eq!("mediumLight".parse::<SkinTone>(), Ok(SkinTone::MediumLight));
        assert_eq!("MEDIUMDARK".parse::<SkinTone>(), Ok(SkinTone::MediumDark));
        assert_eq!("medium light".parse::<SkinTone>(), Ok(SkinTone::MediumLight));
        assert_eq!(
            "purple".parse::<SkinTone>(),
            Err(UnknownSkinTone("purple".into()))
        );
    }

    #[test]
    fn serde_uses_camel_case_identifiers() {
        let json = serde_json::to_string(&SkinTone::MediumDark).unwrap();
        assert_eq!(json, r#""mediumDark""#);
        let tone: SkinTone = serde_json::from_str(r#""light""#).unwrap();
        assert_eq!(tone, SkinTone::Light);
    }
}
