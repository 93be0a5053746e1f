//! Error types for URI assembly.

use std::error::Error as StdError;
use std::fmt;

/// Broad classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller supplied an unusable argument (bad base, empty or
    /// malformed path segment, empty query name or value).
    InvalidArgument,
    /// The caller supplied text with an ill-formed scalar sequence.
    InvalidText,
    /// The assembler produced output the URI parser rejected.
    Internal,
}

/// Any error produced by this crate.
///
/// Each operation returns its own component error; this enum exists so a
/// chain of operations can be driven with `?` into a single error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Base URI validation failed
    Base(BaseUriError),
    /// Path segment validation failed
    Path(PathSegmentError),
    /// Query parameter validation failed
    Query(QueryError),
    /// The assembled string could not be parsed back into a URI
    Build(BuildError),
}

impl Error {
    /// Returns the broad class of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Base(_) => ErrorKind::InvalidArgument,
            Self::Path(PathSegmentError::InvalidText(_))
            | Self::Query(
                QueryError::InvalidName(QueryComponentError::InvalidText(_))
                | QueryError::InvalidValue {
                    reason: QueryComponentError::InvalidText(_),
                    ..
                },
            ) => ErrorKind::InvalidText,
            Self::Path(_) | Self::Query(_) => ErrorKind::InvalidArgument,
            Self::Build(_) => ErrorKind::Internal,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base(e) => write!(f, "invalid base URI: {e}"),
            Self::Path(e) => write!(f, "invalid path segment: {e}"),
            Self::Query(e) => write!(f, "invalid query parameter: {e}"),
            Self::Build(e) => write!(f, "failed to build URI: {e}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Base(e) => Some(e),
            Self::Path(e) => Some(e),
            Self::Query(e) => Some(e),
            Self::Build(e) => Some(e),
        }
    }
}

impl From<BaseUriError> for Error {
    fn from(e: BaseUriError) -> Self {
        Self::Base(e)
    }
}

impl From<PathSegmentError> for Error {
    fn from(e: PathSegmentError) -> Self {
        Self::Path(e)
    }
}

impl From<QueryError> for Error {
    fn from(e: QueryError) -> Self {
        Self::Query(e)
    }
}

impl From<BuildError> for Error {
    fn from(e: BuildError) -> Self {
        Self::Build(e)
    }
}

/// Input text contains an ill-formed scalar sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidTextError {
    /// Byte input is not valid UTF-8
    Utf8 {
        /// Length of the longest valid UTF-8 prefix
        valid_up_to: usize,
    },
    /// UTF-16 input contains a surrogate without its pair
    UnpairedSurrogate {
        /// The offending code unit
        unit: u16,
        /// Index of the code unit in the input
        position: usize,
    },
}

impl fmt::Display for InvalidTextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utf8 { valid_up_to } => {
                write!(f, "invalid UTF-8 sequence after byte {valid_up_to}")
            }
            Self::UnpairedSurrogate { unit, position } => {
                write!(f, "unpaired surrogate {unit:#06x} at position {position}")
            }
        }
    }
}

impl StdError for InvalidTextError {}

/// Errors for path segment encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegmentError {
    /// Segment is empty
    Empty,
    /// Segment starts with '/'
    LeadingSeparator,
    /// Segment ends with '/'
    TrailingSeparator,
    /// Segment is not well-formed text
    InvalidText(InvalidTextError),
}

impl fmt::Display for PathSegmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "segment cannot be empty"),
            Self::LeadingSeparator => {
                write!(f, "segment cannot start with '/'; the separator is added automatically")
            }
            Self::TrailingSeparator => write!(f, "segment cannot end with '/'"),
            Self::InvalidText(e) => write!(f, "segment contains unknown characters: {e}"),
        }
    }
}

impl StdError for PathSegmentError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::InvalidText(e) => Some(e),
            _ => None,
        }
    }
}

/// Errors for encoding a single query name or value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryComponentError {
    /// Component is empty
    Empty,
    /// Component is not well-formed text
    InvalidText(InvalidTextError),
}

impl fmt::Display for QueryComponentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "value cannot be empty"),
            Self::InvalidText(e) => write!(f, "value contains unknown characters: {e}"),
        }
    }
}

impl StdError for QueryComponentError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::InvalidText(e) => Some(e),
            Self::Empty => None,
        }
    }
}

/// Errors for appending a query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Invalid parameter name
    InvalidName(QueryComponentError),
    /// Invalid parameter value
    InvalidValue {
        /// Parameter name (encoded for byte/UTF-16 input)
        name: String,
        /// Reason for invalidity
        reason: QueryComponentError,
    },
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidName(reason) => write!(f, "invalid parameter name: {reason}"),
            Self::InvalidValue { name, reason } => {
                write!(f, "invalid value for parameter '{name}': {reason}")
            }
        }
    }
}

impl StdError for QueryError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::InvalidName(reason) | Self::InvalidValue { reason, .. } => Some(reason),
        }
    }
}

/// Errors for base URI validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseUriError {
    /// Input is not a syntactically valid URI
    Malformed {
        /// The input that failed to parse
        input: String,
        /// Parser diagnosis
        reason: url::ParseError,
    },
    /// Input is a relative reference
    NotAbsolute {
        /// The input that failed to parse
        input: String,
    },
    /// URI carries a query component
    HasQuery {
        /// The query, without the leading '?'
        query: String,
    },
    /// URI carries a fragment component
    HasFragment {
        /// The fragment, without the leading '#'
        fragment: String,
    },
}

impl fmt::Display for BaseUriError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed { input, reason } => {
                write!(f, "'{input}' is not a valid URI: {reason}")
            }
            Self::NotAbsolute { input } => {
                write!(f, "'{input}' is not an absolute URI; a scheme is required")
            }
            Self::HasQuery { query } => {
                write!(f, "base URI has query '?{query}'; append parameters instead")
            }
            Self::HasFragment { fragment } => {
                write!(f, "base URI has fragment '#{fragment}'")
            }
        }
    }
}

impl StdError for BaseUriError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Malformed { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

/// Errors for converting an assembled string back into a URI value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The URI parser rejected the assembled string
    Malformed {
        /// The assembled string
        uri: String,
        /// Parser diagnosis
        reason: url::ParseError,
    },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed { uri, reason } => {
                write!(f, "assembled '{uri}' is not a valid URI: {reason}")
            }
        }
    }
}

impl StdError for BuildError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Malformed { reason, .. } => Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_separates_text_from_argument_errors() {
        let text = InvalidTextError::Utf8 { valid_up_to: 0 };
        assert_eq!(Error::from(PathSegmentError::Empty).kind(), ErrorKind::InvalidArgument);
        assert_eq!(
            Error::from(PathSegmentError::InvalidText(text)).kind(),
            ErrorKind::InvalidText
        );
        assert_eq!(
            Error::from(QueryError::InvalidValue {
                name: "q".to_string(),
                reason: QueryComponentError::InvalidText(text),
            })
            .kind(),
            ErrorKind::InvalidText
        );
        assert_eq!(
            Error::from(QueryError::InvalidName(QueryComponentError::Empty)).kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            Error::from(BaseUriError::NotAbsolute { input: "x".to_string() }).kind(),
            ErrorKind::InvalidArgument
        );
    }

    #[test]
    fn display_messages_are_actionable() {
        let err = BaseUriError::HasQuery { query: "q=1".to_string() };
        assert_eq!(
            err.to_string(),
            "base URI has query '?q=1'; append parameters instead"
        );

        let err = InvalidTextError::UnpairedSurrogate { unit: 0xD800, position: 3 };
        assert_eq!(err.to_string(), "unpaired surrogate 0xd800 at position 3");
    }

    #[test]
    fn source_chains_to_component_error() {
        let err = Error::from(PathSegmentError::InvalidText(InvalidTextError::Utf8 {
            valid_up_to: 2,
        }));
        let path = err.source().unwrap();
        assert!(path.to_string().contains("unknown characters"));
        let text = path.source().unwrap();
        assert_eq!(text.to_string(), "invalid UTF-8 sequence after byte 2");
    }
}
