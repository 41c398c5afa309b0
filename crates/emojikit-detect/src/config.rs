//! Classifier configuration.

use crate::probe::REFERENCE_GLYPH;

/// Environment variable overriding the native-compound threshold (integer).
const ENV_COMPOUND_THRESHOLD: &str = "EMOJIKIT_COMPOUND_THRESHOLD";

/// Default threshold: a wide sequence with more than two emoji scalars is
/// taken to be a natively composed glyph.
pub const DEFAULT_COMPOUND_THRESHOLD: usize = 2;

/// Tunables for the [`Classifier`](crate::Classifier).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectorConfig {
    /// A sequence wider than the reference glyph counts as supported when it
    /// holds more than this many `Emoji` scalars.
    pub compound_threshold: usize,
    /// Glyph measured once at calibration to define the single-glyph width.
    pub reference_glyph: String,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            compound_threshold: DEFAULT_COMPOUND_THRESHOLD,
            reference_glyph: REFERENCE_GLYPH.to_string(),
        }
    }
}

impl DetectorConfig {
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
        if let Some(raw) = get_env(ENV_COMPOUND_THRESHOLD) {
            match raw.trim().parse::<usize>() {
                Ok(threshold) => config.compound_threshold = threshold,
                Err(_) => {
                    tracing::warn!(value = %raw, "ignoring invalid {ENV_COMPOUND_THRESHOLD}");
                }
            }
        }
        config
    }

    #[must_use]
    pub fn with_compound_threshold(mut self, threshold: usize) -> Self {
        self.compound_threshold = threshold;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn map_env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn get_env<'a>(map: &'a HashMap<String, String>) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = DetectorConfig::from_env_with(get_env(&map_env(&[])));
        assert_eq!(config, DetectorConfig::default());
        assert_eq!(config.compound_threshold, 2);
        assert_eq!(config.reference_glyph, "😀");
    }

    #[test]
    fn env_overrides_threshold() {
        let env = map_env(&[(ENV_COMPOUND_THRESHOLD, " 3 ")]);
        assert_eq!(DetectorConfig::from_env_with(get_env(&env)).compound_threshold, 3);
    }

    #[test]
    fn invalid_threshold_keeps_default() {
        let env = map_env(&[(ENV_COMPOUND_THRESHOLD, "many")]);
        assert_eq!(
            DetectorConfig::from_env_with(get_env(&env)).compound_threshold,
            DEFAULT_COMPOUND_THRESHOLD
        );
    }
}
