//! Emoji compatibility classifier.
//!
//! Classification of a sequence, in order:
//!
//! 1. A cached verdict is returned without touching the probe.
//! 2. Nothing painted → [`SupportLevel::NotSupported`].
//! 3. Width at most the reference glyph's → [`SupportLevel::Supported`].
//! 4. Wider: a native compound (more than `compound_threshold` `Emoji`
//!    scalars) is [`SupportLevel::Supported`], anything else renders as
//!    separate pieces → [`SupportLevel::Fallback`].
//!
//! Every fresh verdict is written through to the [`ClassificationCache`], so
//! a sequence is probed at most once per cache lifetime. The empty sequence
//! paints nothing and is answered without probing.
//!
//! A probe error yields no verdict. [`Classifier::try_classify`] returns it;
//! [`Classifier::classify`] logs it and hides the sequence for this call
//! only, so the next call probes again.

use std::collections::HashSet;

use emojikit_core::props::emoji_scalar_count;
use emojikit_core::{EmojiEntry, SupportLevel};
use emojikit_store::ClassificationCache;

use crate::config::DetectorConfig;
use crate::probe::{ProbeError, ProbeResult, RenderingProbe};

/// Classification counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassifierStats {
    /// Verdicts served from the cache.
    pub hits: u64,
    /// Verdicts that had to be probed.
    pub misses: u64,
    /// Probe invocations (`can_render` plus `measured_width`), calibration included.
    pub probes: u64,
    /// Classifications abandoned because the probe failed.
    pub failures: u64,
    /// Entries currently cached.
    pub cached: usize,
}

impl ClassifierStats {
    /// Calculate hit rate (0.0 to 1.0).
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Classifies emoji sequences against one rendering surface.
///
/// Construction measures the reference glyph, so every `Classifier` holds a
/// usable (finite, positive) reference width.
#[derive(Debug)]
pub struct Classifier<P> {
    probe: P,
    cache: ClassificationCache,
    config: DetectorConfig,
    reference_width: f64,
    hits: u64,
    misses: u64,
    probes: u64,
    failures: u64,
}

impl<P: RenderingProbe> Classifier<P> {
    /// Measure the reference glyph and build a classifier around `cache`.
    ///
    /// Fails when the surface cannot measure, or when the reference glyph
    /// measures a width that is not finite and positive (for example a layout
    /// taken before the document has a body).
    pub fn calibrate(
        mut probe: P,
        cache: ClassificationCache,
        config: DetectorConfig,
    ) -> ProbeResult<Self> {
        let reference_width = probe.measured_width(&config.reference_glyph)?;
        if !reference_width.is_finite() || reference_width <= 0.0 {
            tracing::warn!(
                glyph = %config.reference_glyph,
                reference_width,
                "reference glyph measured an unusable width"
            );
            return Err(ProbeError::InvalidWidth {
                sequence: config.reference_glyph,
                width: reference_width,
            });
        }
        tracing::debug!(
            glyph = %config.reference_glyph,
            reference_width,
            cached = cache.len(),
            "classifier calibrated"
        );
        Ok(Self {
            probe,
            cache,
            config,
            reference_width,
            hits: 0,
            misses: 0,
            probes: 1,
            failures: 0,
        })
    }

    /// Support level of `sequence` on this surface.
    ///
    /// A probe failure is logged and reported as
    /// [`SupportLevel::NotSupported`] without being cached.
    pub fn classify(&mut self, sequence: &str) -> SupportLevel {
        match self.try_classify(sequence) {
            Ok(level) => level,
            Err(e) => {
                tracing::warn!(%sequence, error = %e, "probe failed, verdict not cached");
                SupportLevel::NotSupported
            }
        }
    }

    /// Like [`Classifier::classify`], but a probe failure is returned.
    pub fn try_classify(&mut self, sequence: &str) -> ProbeResult<SupportLevel> {
        if sequence.is_empty() {
            return Ok(SupportLevel::NotSupported);
        }
        if let Some(level) = self.cache.get(sequence) {
            self.hits += 1;
            tracing::trace!(%sequence, ?level, "classification cache hit");
            return Ok(level);
        }
        self.misses += 1;

        let level = self.probe_level(sequence).inspect_err(|_| self.failures += 1)?;
        tracing::debug!(%sequence, ?level, "classified");
        self.cache.put(sequence, level);
        Ok(level)
    }

    /// Classify every entry when the cache is empty (first run).
    ///
    /// Returns how many verdicts were recorded; zero when the cache already
    /// held verdicts. Sequences whose probe fails are left uncached. The
    /// whole batch is persisted with one write.
    pub fn prime<'e, I>(&mut self, entries: I) -> usize
    where
        I: IntoIterator<Item = &'e EmojiEntry>,
    {
        if !self.cache.is_empty() {
            return 0;
        }

        let mut seen: HashSet<&'e str> = HashSet::new();
        let mut verdicts: Vec<(&'e str, SupportLevel)> = Vec::new();
        let mut failed = 0usize;
        for entry in entries {
            let sequence = entry.emoji.as_str();
            if sequence.is_empty() || !seen.insert(sequence) {
                continue;
            }
            self.misses += 1;
            match self.probe_level(sequence) {
                Ok(level) => verdicts.push((sequence, level)),
                Err(e) => {
                    self.failures += 1;
                    failed += 1;
                    tracing::debug!(%sequence, error = %e, "probe failed while priming");
                }
            }
        }

        let probed = verdicts.len();
        self.cache.extend(verdicts);
        if failed > 0 {
            tracing::warn!(failed, "some sequences could not be probed and stay uncached");
        }
        tracing::info!(probed, "classification cache primed");
        probed
    }

    /// Whether `sequence` holds enough `Emoji` scalars to be a natively
    /// composed glyph even though it measures wide.
    ///
    /// A single scalar is never a compound, whatever the threshold.
    #[must_use]
    pub fn is_native_compound(&self, sequence: &str) -> bool {
        if sequence.chars().nth(1).is_none() {
            return false;
        }
        emoji_scalar_count(sequence) > self.config.compound_threshold
    }

    #[must_use]
    pub fn reference_width(&self) -> f64 {
        self.reference_width
    }

    #[must_use]
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    #[must_use]
    pub fn cache(&self) -> &ClassificationCache {
        &self.cache
    }

    #[must_use]
    pub fn probe(&self) -> &P {
        &self.probe
    }

    #[must_use]
    pub fn stats(&self) -> ClassifierStats {
        ClassifierStats {
            hits: self.hits,
            misses: self.misses,
            probes: self.probes,
            failures: self.failures,
            cached: self.cache.len(),
        }
    }

    /// Forget every verdict, in memory and persisted.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    fn probe_level(&mut self, sequence: &str) -> ProbeResult<SupportLevel> {
        self.probes += 1;
        if !self.probe.can_render(sequence)? {
            return Ok(SupportLevel::NotSupported);
        }

        self.probes += 1;
        let width = self.probe.measured_width(sequence)?;
        if !width.is_finite() || width < 0.0 {
            return Err(ProbeError::InvalidWidth {
                sequence: sequence.to_string(),
                width,
            });
        }
        if width <= self.reference_width || self.is_native_compound(sequence) {
            Ok(SupportLevel::Supported)
        } else {
            Ok(SupportLevel::Fallback)
        }
    }
}

/// Whether a picker shows an emoji classified as `level`.
#[must_use]
pub const fn visibility(level: SupportLevel, show_fallbacks: bool) -> bool {
    match level {
        SupportLevel::NotSupported => false,
        SupportLevel::Supported => true,
        SupportLevel::Fallback => show_fallbacks,
    }
}
