#![forbid(unsafe_code)]

//! Support level produced by the compatibility classifier.

use std::fmt;

use serde::{Serialize, Serializer};

/// How well the host renders an emoji sequence.
///
/// The discriminants are the persisted representation (`0`/`1`/`2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SupportLevel {
    /// Nothing is painted for the sequence.
    NotSupported = 0,
    /// The sequence renders as one glyph of normal width.
    Supported = 1,
    /// The sequence renders, but as separate component glyphs.
    Fallback = 2,
}

impl SupportLevel {
    /// Numeric code used in persisted caches.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Decode a persisted code. Unknown codes yield `None`.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::NotSupported),
            1 => Some(Self::Supported),
            2 => Some(Self::Fallback),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotSupported => "not-supported",
            Self::Supported => "supported",
            Self::Fallback => "fallback",
        }
    }
}

impl fmt::Display for SupportLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serialized as the numeric code, matching the persisted cache.
impl Serialize for SupportLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}
