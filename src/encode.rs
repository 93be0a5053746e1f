//! Percent-encoding of Unicode text.
//!
//! Scalars admitted by an [`EncodeSet`] are copied through; every other
//! scalar is written as its UTF-8 bytes, each as `%` followed by two
//! uppercase hexadecimal digits.

use std::fmt;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::classify::is_path_allowed;
use crate::error::InvalidTextError;

/// Bytes escaped in a path segment: everything but `pchar` and `/`.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=')
    .remove(b':')
    .remove(b'@')
    .remove(b'/');

/// Bytes escaped in a query name or value: the path set less `?`, plus the
/// pair separators.
const QUERY_COMPONENT: &AsciiSet = &PATH_SEGMENT.remove(b'?').add(b'=').add(b'&');

/// The set of scalars a URI component may carry unescaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncodeSet {
    /// Path segment content: `pchar` plus `/`.
    PathSegment,
    /// Query name or value: `pchar` plus `/` and `?`, minus `=` and `&`.
    QueryComponent,
}

impl EncodeSet {
    /// Returns true if `c` passes through this set unescaped.
    #[must_use]
    pub const fn allows(self, c: char) -> bool {
        match self {
            Self::PathSegment => is_path_allowed(c) || c == '/',
            Self::QueryComponent => {
                c != '=' && c != '&' && (is_path_allowed(c) || c == '/' || c == '?')
            }
        }
    }

    /// Returns the bytes this set escapes.
    #[must_use]
    pub const fn ascii_set(self) -> &'static AsciiSet {
        match self {
            Self::PathSegment => PATH_SEGMENT,
            Self::QueryComponent => QUERY_COMPONENT,
        }
    }
}

impl fmt::Display for EncodeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PathSegment => write!(f, "path segment"),
            Self::QueryComponent => write!(f, "query component"),
        }
    }
}

/// Percent-encodes `input` under `set`, returning a new string.
///
/// # Examples
///
/// ```
/// use uri_assembler::{percent_encode, EncodeSet};
///
/// assert_eq!(percent_encode("a b/c", EncodeSet::PathSegment), "a%20b/c");
/// assert_eq!(percent_encode("a=b&c", EncodeSet::QueryComponent), "a%3Db%26c");
/// assert_eq!(percent_encode("caf\u{e9}", EncodeSet::PathSegment), "caf%C3%A9");
/// ```
#[must_use]
pub fn percent_encode(input: &str, set: EncodeSet) -> String {
    let mut out = String::with_capacity(input.len());
    percent_encode_into(&mut out, input, set);
    out
}

/// Percent-encodes `input` under `set`, appending to `out`.
pub fn percent_encode_into(out: &mut String, input: &str, set: EncodeSet) {
    out.extend(utf8_percent_encode(input, set.ascii_set()));
}

/// Validates UTF-8 bytes as text.
///
/// # Errors
///
/// Returns [`InvalidTextError::Utf8`] if `bytes` is not well-formed UTF-8.
pub fn decode_utf8(bytes: &[u8]) -> Result<&str, InvalidTextError> {
    std::str::from_utf8(bytes).map_err(|e| InvalidTextError::Utf8 {
        valid_up_to: e.valid_up_to(),
    })
}

/// Decodes UTF-16 code units into text.
///
/// # Errors
///
/// Returns [`InvalidTextError::UnpairedSurrogate`] at the first surrogate
/// that is not part of a valid pair.
pub fn decode_utf16(units: &[u16]) -> Result<String, InvalidTextError> {
    let mut out = String::with_capacity(units.len());
    let mut position = 0;

    for decoded in char::decode_utf16(units.iter().copied()) {
        match decoded {
            Ok(c) => {
                out.push(c);
                position += c.len_utf16();
            }
            Err(e) => {
                return Err(InvalidTextError::UnpairedSurrogate {
                    unit: e.unpaired_surrogate(),
                    position,
                });
            }
        }
    }

    Ok(out)
}
