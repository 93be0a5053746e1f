//! RFC 3986 character classes.
//!
//! Classification is total over `char`: every scalar value is either a
//! member of a class or not, and nothing here can fail.

/// Returns true if `c` is an RFC 3986 `unreserved` character.
///
/// ```text
/// unreserved = ALPHA / DIGIT / "-" / "." / "_" / "~"
/// ```
#[must_use]
pub const fn is_unreserved(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~')
}

/// Returns true if `c` is an RFC 3986 `sub-delims` character.
///
/// ```text
/// sub-delims = "!" / "$" / "&" / "'" / "(" / ")" / "*" / "+" / "," / ";" / "="
/// ```
#[must_use]
pub const fn is_sub_delim(c: char) -> bool {
    matches!(
        c,
        '!' | '$' | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | ';' | '='
    )
}

/// Returns true if `c` may appear unescaped in a path segment (`pchar`
/// minus `pct-encoded`).
///
/// ```text
/// pchar = unreserved / pct-encoded / sub-delims / ":" / "@"
/// ```
#[must_use]
pub const fn is_path_allowed(c: char) -> bool {
    is_unreserved(c) || is_sub_delim(c) || c == ':' || c == '@'
}
