//! Encoded path segment type.

use std::fmt;

use crate::encode::{EncodeSet, decode_utf8, decode_utf16, percent_encode};
use crate::error::PathSegmentError;

/// A percent-encoded path segment, ready to be joined with `/`.
///
/// Segments are never empty and never start or end with `/`. A `/` inside
/// the raw input is kept literally, so one segment may span several path
/// levels.
///
/// # Examples
///
/// ```
/// use uri_assembler::PathSegment;
///
/// let seg = PathSegment::encode("users").unwrap();
/// assert_eq!(seg.as_str(), "users");
///
/// let seg = PathSegment::encode("a b").unwrap();
/// assert_eq!(seg.as_str(), "a%20b");
///
/// let seg = PathSegment::encode("v1/items").unwrap();
/// assert_eq!(seg.as_str(), "v1/items");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathSegment(String);

impl PathSegment {
    /// Validates and percent-encodes a raw segment.
    ///
    /// # Errors
    ///
    /// Returns `PathSegmentError` if:
    /// - The segment is empty
    /// - The segment starts with '/'
    /// - The segment ends with '/'
    pub fn encode(raw: &str) -> Result<Self, PathSegmentError> {
        check_shape(raw.as_bytes(), b'/')?;
        Ok(Self(percent_encode(raw, EncodeSet::PathSegment)))
    }

    /// Validates and percent-encodes a raw segment given as UTF-8 bytes.
    ///
    /// # Errors
    ///
    /// Returns `PathSegmentError` for the shapes rejected by
    /// [`encode`](Self::encode), or `PathSegmentError::InvalidText` if the
    /// bytes are not well-formed UTF-8.
    pub fn encode_utf8(raw: &[u8]) -> Result<Self, PathSegmentError> {
        check_shape(raw, b'/')?;
        let text = decode_utf8(raw).map_err(PathSegmentError::InvalidText)?;
        Ok(Self(percent_encode(text, EncodeSet::PathSegment)))
    }

    /// Validates and percent-encodes a raw segment given as UTF-16 code units.
    ///
    /// # Errors
    ///
    /// Returns `PathSegmentError` for the shapes rejected by
    /// [`encode`](Self::encode), or `PathSegmentError::InvalidText` if the
    /// input contains an unpaired surrogate.
    pub fn encode_utf16(raw: &[u16]) -> Result<Self, PathSegmentError> {
        check_shape(raw, u16::from(b'/'))?;
        let text = decode_utf16(raw).map_err(PathSegmentError::InvalidText)?;
        Ok(Self(percent_encode(&text, EncodeSet::PathSegment)))
    }

    /// Returns the encoded segment as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the character is written unescaped in a segment.
    #[must_use]
    pub const fn is_unescaped_char(c: char) -> bool {
        EncodeSet::PathSegment.allows(c)
    }
}

// Shape is checked on the raw units so that a misplaced separator is
// reported even when the rest of the input is ill-formed.
fn check_shape<T: Copy + PartialEq>(raw: &[T], separator: T) -> Result<(), PathSegmentError> {
    match (raw.first(), raw.last()) {
        (None, _) | (_, None) => Err(PathSegmentError::Empty),
        (Some(&first), _) if first == separator => Err(PathSegmentError::LeadingSeparator),
        (_, Some(&last)) if last == separator => Err(PathSegmentError::TrailingSeparator),
        _ => Ok(()),
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PathSegment {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for PathSegment {
    type Error = PathSegmentError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::encode(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for PathSegment {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}
