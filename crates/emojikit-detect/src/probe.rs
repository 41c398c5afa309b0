//! Rendering probe capability.
//!
//! There is no platform API that says whether a multi-codepoint sequence is
//! drawn as one glyph. A probe answers two observable questions instead:
//! does anything get painted, and how wide is the laid-out text.
//!
//! Both questions can fail (no canvas yet, no document body to lay text out
//! in). Failures are reported as [`ProbeError`] and never folded into an
//! answer, since a wrong answer would be cached for good.

use std::fmt;

/// The glyph whose width defines "one emoji wide" (U+1F600 GRINNING FACE).
pub const REFERENCE_GLYPH: &str = "\u{1F600}";

/// Errors from observing the rendering surface.
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeError {
    /// The surface could not paint or measure (missing canvas, detached
    /// document, read-back refused, ...).
    Surface(String),
    /// A measurement came back that cannot be compared against.
    InvalidWidth { sequence: String, width: f64 },
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Surface(msg) => write!(f, "rendering surface unavailable: {msg}"),
            Self::InvalidWidth { sequence, width } => {
                write!(f, "unusable width {width} measured for {sequence:?}")
            }
        }
    }
}

impl std::error::Error for ProbeError {}

/// Result type for probe operations.
pub type ProbeResult<T> = Result<T, ProbeError>;

/// Observable side effects of drawing a sequence on the host surface.
///
/// Implementations may cache surfaces internally, hence `&mut self`.
pub trait RenderingProbe {
    /// Whether drawing `sequence` paints at least one visible pixel.
    fn can_render(&mut self, sequence: &str) -> ProbeResult<bool>;

    /// Laid-out width of `sequence` in the picker's emoji style.
    fn measured_width(&mut self, sequence: &str) -> ProbeResult<f64>;
}

impl<P: RenderingProbe + ?Sized> RenderingProbe for &mut P {
    fn can_render(&mut self, sequence: &str) -> ProbeResult<bool> {
        (**self).can_render(sequence)
    }

    fn measured_width(&mut self, sequence: &str) -> ProbeResult<f64> {
        (**self).measured_width(sequence)
    }
}

impl<P: RenderingProbe + ?Sized> RenderingProbe for Box<P> {
    fn can_render(&mut self, sequence: &str) -> ProbeResult<bool> {
        (**self).can_render(sequence)
    }

    fn measured_width(&mut self, sequence: &str) -> ProbeResult<f64> {
        (**self).measured_width(sequence)
    }
}

#[cfg(any(test, feature = "test-helpers"))]
pub use scripted::ScriptedProbe;

#[cfg(any(test, feature = "test-helpers"))]
mod scripted {
    use std::collections::{HashMap, HashSet};

    use super::{ProbeError, ProbeResult, REFERENCE_GLYPH, RenderingProbe};

    /// Deterministic probe with scripted answers and call counters.
    ///
    /// Every sequence renders and measures `default_width` unless scripted
    /// otherwise. A sequence scripted with [`ScriptedProbe::with_failure`]
    /// makes both probe calls fail.
    #[derive(Debug, Clone)]
    pub struct ScriptedProbe {
        default_width: f64,
        widths: HashMap<String, f64>,
        blank: HashSet<String>,
        failing: HashSet<String>,
        render_calls: usize,
        width_calls: usize,
    }

    impl Default for ScriptedProbe {
        fn default() -> Self {
            Self::new(20.0)
        }
    }

    impl ScriptedProbe {
        /// A probe where the reference glyph and everything unscripted is
        /// `default_width` wide.
        #[must_use]
        pub fn new(default_width: f64) -> Self {
            Self {
                default_width,
                widths: HashMap::new(),
                blank: HashSet::new(),
                failing: HashSet::new(),
                render_calls: 0,
                width_calls: 0,
            }
        }

        /// Script the measured width of `sequence`.
        #[must_use]
        pub fn with_width(mut self, sequence: &str, width: f64) -> Self {
            self.widths.insert(sequence.to_string(), width);
            self
        }

        /// Script `sequence` as painting nothing.
        #[must_use]
        pub fn with_blank(mut self, sequence: &str) -> Self {
            self.blank.insert(sequence.to_string());
            self
        }

        /// Script `sequence` as failing with [`ProbeError::Surface`].
        #[must_use]
        pub fn with_failure(mut self, sequence: &str) -> Self {
            self.failing.insert(sequence.to_string());
            self
        }

        /// Script the reference glyph's width.
        #[must_use]
        pub fn with_reference_width(self, width: f64) -> Self {
            self.with_width(REFERENCE_GLYPH, width)
        }

        #[must_use]
        pub fn render_calls(&self) -> usize {
            self.render_calls
        }

        #[must_use]
        pub fn width_calls(&self) -> usize {
            self.width_calls
        }

        /// Total probe invocations of either kind.
        #[must_use]
        pub fn calls(&self) -> usize {
            self.render_calls + self.width_calls
        }
    }

    impl ScriptedProbe {
        fn check(&self, sequence: &str) -> ProbeResult<()> {
            if self.failing.contains(sequence) {
                return Err(ProbeError::Surface(format!("scripted failure for {sequence:?}")));
            }
            Ok(())
        }
    }

    impl RenderingProbe for ScriptedProbe {
        fn can_render(&mut self, sequence: &str) -> ProbeResult<bool> {
            self.render_calls += 1;
            self.check(sequence)?;
            Ok(!self.blank.contains(sequence))
        }

        fn measured_width(&mut self, sequence: &str) -> ProbeResult<f64> {
            self.width_calls += 1;
            self.check(sequence)?;
            Ok(self
                .widths
                .get(sequence)
                .copied()
                .unwrap_or(self.default_width))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_defaults() {
        let mut probe = ScriptedProbe::new(18.0);
        assert!(probe.can_render("🫠").unwrap());
        assert_eq!(probe.measured_width("🫠").unwrap(), 18.0);
        assert_eq!(probe.calls(), 2);
    }

    #[test]
    fn scripted_overrides() {
        let mut probe = ScriptedProbe::default()
            .with_blank("🫠")
            .with_width("👨‍👩‍👧", 60.0);
        assert!(!probe.can_render("🫠").unwrap());
        assert_eq!(probe.measured_width("👨‍👩‍👧").unwrap(), 60.0);
        assert_eq!(probe.render_calls(), 1);
        assert_eq!(probe.width_calls(), 1);
    }

    #[test]
    fn mutable_reference_forwards() {
        fn paint<P: RenderingProbe>(mut probe: P) -> bool {
            probe.can_render(REFERENCE_GLYPH).unwrap()
        }

        let mut probe = ScriptedProbe::default();
        assert!(paint(&mut probe));
        assert_eq!(probe.render_calls(), 1);
    }

    #[test]
    fn scripted_failures_are_errors() {
        let mut probe = ScriptedProbe::default().with_failure("🫠");
        assert!(matches!(probe.can_render("🫠"), Err(ProbeError::Surface(_))));
        assert!(probe.measured_width("🫠").is_err());
        assert!(probe.can_render("👍").unwrap());
        assert_eq!(probe.calls(), 3);
    }

    #[test]
    fn probe_error_display() {
        let err = ProbeError::InvalidWidth {
            sequence: "😀".into(),
            width: 0.0,
        };
        assert!(err.to_string().contains("unusable width 0"));
        assert!(ProbeError::Surface("no body".into())
            .to_string()
            .contains("no body"));
    }
}
