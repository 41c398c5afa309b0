#![forbid(unsafe_code)]

//! Runtime emoji compatibility detection.
//!
//! A [`Classifier`] decides, per emoji sequence, whether the host draws it as
//! one glyph ([`SupportLevel::Supported`]), as visibly separate pieces
//! ([`SupportLevel::Fallback`]), or not at all ([`SupportLevel::NotSupported`]).
//! It observes the host only through a [`RenderingProbe`] and remembers every
//! verdict in a [`ClassificationCache`](emojikit_store::ClassificationCache).
//! Probe failures surface as [`ProbeError`] and are never cached.
//!
//! # Example
//! ```
//! # #[cfg(feature = "test-helpers")] {
//! use emojikit_core::SupportLevel;
//! use emojikit_detect::{Classifier, DetectorConfig, ScriptedProbe};
//! use emojikit_store::ClassificationCache;
//!
//! let probe = ScriptedProbe::new(20.0).with_width("🏃\u{200D}♀\u{FE0F}", 40.0);
//! let mut classifier =
//!     Classifier::calibrate(probe, ClassificationCache::in_memory(), DetectorConfig::default())
//!         .unwrap();
//!
//! assert_eq!(classifier.classify("🚩"), SupportLevel::Supported);
//! assert_eq!(classifier.classify("🏃\u{200D}♀\u{FE0F}"), SupportLevel::Fallback);
//! # }
//! ```

pub mod classifier;
pub mod config;
pub mod probe;

pub use classifier::{Classifier, ClassifierStats, visibility};
pub use config::{DEFAULT_COMPOUND_THRESHOLD, DetectorConfig};
#[cfg(any(test, feature = "test-helpers"))]
pub use probe::ScriptedProbe;
pub use probe::{ProbeError, ProbeResult, REFERENCE_GLYPH, RenderingProbe};

pub use emojikit_core::SupportLevel;
