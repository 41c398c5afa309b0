#![forbid(unsafe_code)]

//! Unicode emoji property lookups (UTS #51).
//!
//! Thin wrappers over `unicode-properties` so the rest of the workspace asks
//! questions in emoji terms rather than matching on [`EmojiStatus`] directly.

use unicode_properties::{EmojiStatus, UnicodeEmoji};

/// U+FE0F VARIATION SELECTOR-16 (emoji presentation).
pub const EMOJI_PRESENTATION_SELECTOR: char = '\u{FE0F}';

/// U+200D ZERO WIDTH JOINER.
pub const ZERO_WIDTH_JOINER: char = '\u{200D}';

/// First and last skin tone modifier (Fitzpatrick type 1-2 .. type 6).
pub const SKIN_TONE_MODIFIERS: std::ops::RangeInclusive<char> = '\u{1F3FB}'..='\u{1F3FF}';

/// `Emoji=Yes`.
///
/// Digits, `#` and `*` qualify (they are keycap bases); ZWJ and VS16 do not.
#[inline]
#[must_use]
pub fn is_emoji(c: char) -> bool {
    c.is_emoji_char()
}

/// `Emoji_Modifier_Base=Yes`: a skin tone modifier may follow this scalar.
#[inline]
#[must_use]
pub fn is_modifier_base(c: char) -> bool {
    matches!(
        c.emoji_status(),
        EmojiStatus::EmojiModifierBase | EmojiStatus::EmojiPresentationAndModifierBase
    )
}

/// One of the five skin tone modifiers U+1F3FB..=U+1F3FF.
#[inline]
#[must_use]
pub fn is_skin_tone_modifier(c: char) -> bool {
    SKIN_TONE_MODIFIERS.contains(&c)
}

/// Number of scalar values in `sequence` carrying the `Emoji` property.
#[must_use]
pub fn emoji_scalar_count(sequence: &str) -> usize {
    sequence.chars().filter(|&c| is_emoji(c)).count()
}
