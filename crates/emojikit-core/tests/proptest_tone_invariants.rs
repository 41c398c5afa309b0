//! Property-based invariants for skin-tone composition.
//!
//! 1. Re-toning depends only on the last tone applied.
//! 2. Neutral after any tone equals neutral on the untoned input.
//! 3. Composing twice with the same tone is idempotent.
//! 4. No output ever holds more modifiers than it has modifier bases.
//! 5. Neutral output contains no skin tone modifier.

use emojikit_core::props::{is_modifier_base, is_skin_tone_modifier};
use emojikit_core::{SkinTone, apply_tone};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

/// Scalars that matter for composition, plus a sprinkling of plain text.
const ALPHABET: &[char] = &[
    '👍', '👋', '☝', '👩', '👨', '🏃', '😀', '🚩', '❤', '♀', '#', 'a', '\u{200D}', '\u{FE0F}',
    '\u{20E3}', '\u{1F3FB}', '\u{1F3FC}', '\u{1F3FD}', '\u{1F3FE}', '\u{1F3FF}', '🇫', '🇷',
];

fn sequence_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(ALPHABET), 0..12)
        .prop_map(|chars| chars.into_iter().collect())
}

fn tone_strategy() -> impl Strategy<Value = SkinTone> {
    prop::sample::select(SkinTone::ALL.to_vec())
}

proptest! {
    #[test]
    fn retone_depends_only_on_last_tone(
        s in sequence_strategy(),
        t1 in tone_strategy(),
        t2 in tone_strategy(),
    ) {
        prop_assert_eq!(apply_tone(&apply_tone(&s, t1), t2), apply_tone(&s, t2));
    }

    #[test]
    fn neutral_recovers_base_form(s in sequence_strategy(), t in tone_strategy()) {
        prop_assert_eq!(
            apply_tone(&apply_tone(&s, t), SkinTone::Neutral),
            apply_tone(&s, SkinTone::Neutral)
        );
    }

    #[test]
    fn same_tone_twice_is_idempotent(s in sequence_strategy(), t in tone_strategy()) {
        let once = apply_tone(&s, t);
        prop_assert_eq!(apply_tone(&once, t), once);
    }

    #[test]
    fn modifiers_never_exceed_bases(s in sequence_strategy(), t in tone_strategy()) {
        let out = apply_tone(&s, t);
        let modifiers = out.chars().filter(|&c| is_skin_tone_modifier(c)).count();
        let bases = out.chars().filter(|&c| is_modifier_base(c)).count();
        prop_assert!(modifiers <= bases, "{out:?}: {modifiers} modifiers, {bases} bases");
    }

    #[test]
    fn neutral_output_has_no_modifier(s in sequence_strategy()) {
        let out = apply_tone(&s, SkinTone::Neutral);
        prop_assert!(!out.chars().any(is_skin_tone_modifier));
    }
}
