//! Validated base URI.

use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::error::BaseUriError;

/// An absolute URI with no query and no fragment.
///
/// Parsing and normalization are delegated to [`url::Url`]; the base's
/// absolute form is the `Url` serialization.
///
/// # Examples
///
/// ```
/// use uri_assembler::BaseUri;
///
/// let base = BaseUri::parse("https://API.example.com").unwrap();
/// assert_eq!(base.as_str(), "https://api.example.com/");
///
/// assert!(BaseUri::parse("/relative/path").is_err());
/// assert!(BaseUri::parse("https://x.test/?q=1").is_err());
/// assert!(BaseUri::parse("https://x.test/#top").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BaseUri(Url);

impl BaseUri {
    /// Parses a base URI from a string.
    ///
    /// # Errors
    ///
    /// Returns `BaseUriError` if:
    /// - The input is not a syntactically valid URI
    /// - The input is a relative reference
    /// - The URI has a query or a fragment, even an empty one
    pub fn parse(input: &str) -> Result<Self, BaseUriError> {
        let url = Url::parse(input).map_err(|reason| match reason {
            url::ParseError::RelativeUrlWithoutBase => BaseUriError::NotAbsolute {
                input: input.to_string(),
            },
            reason => BaseUriError::Malformed {
                input: input.to_string(),
                reason,
            },
        })?;
        Self::from_url(url)
    }

    /// Validates an already-parsed URL as a base.
    ///
    /// # Errors
    ///
    /// Returns `BaseUriError` if the URL has a query or a fragment.
    pub fn from_url(url: Url) -> Result<Self, BaseUriError> {
        if let Some(query) = url.query() {
            return Err(BaseUriError::HasQuery {
                query: query.to_string(),
            });
        }
        if let Some(fragment) = url.fragment() {
            return Err(BaseUriError::HasFragment {
                fragment: fragment.to_string(),
            });
        }
        Ok(Self(url))
    }

    /// Returns the absolute form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the underlying URL.
    #[must_use]
    pub const fn as_url(&self) -> &Url {
        &self.0
    }

    /// Consumes the base and returns the underlying URL.
    #[must_use]
    pub fn into_url(self) -> Url {
        self.0
    }

    /// Returns the absolute form with at most one trailing '/' removed.
    pub(crate) fn stem(&self) -> &str {
        let s = self.as_str();
        s.strip_suffix('/').unwrap_or(s)
    }
}

impl fmt::Display for BaseUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BaseUri {
    type Err = BaseUriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for BaseUri {
    type Error = BaseUriError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl TryFrom<Url> for BaseUri {
    type Error = BaseUriError;

    fn try_from(url: Url) -> Result<Self, Self::Error> {
        Self::from_url(url)
    }
}

impl AsRef<str> for BaseUri {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<BaseUri> for Url {
    fn from(base: BaseUri) -> Self {
        base.into_url()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for BaseUri {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for BaseUri {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
