//! Encoded query components and the ordered parameter store.

use std::fmt;

use crate::encode::{EncodeSet, decode_utf8, decode_utf16, percent_encode};
use crate::error::QueryComponentError;

/// A percent-encoded query name or value.
///
/// Never empty, and never contains a literal `=` or `&`, so a query string
/// assembled from components splits unambiguously.
///
/// # Examples
///
/// ```
/// use uri_assembler::QueryComponent;
///
/// let c = QueryComponent::encode("a=b&c").unwrap();
/// assert_eq!(c.as_str(), "a%3Db%26c");
///
/// let c = QueryComponent::encode("path/to?x").unwrap();
/// assert_eq!(c.as_str(), "path/to?x");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryComponent(String);

impl QueryComponent {
    /// Validates and percent-encodes a raw name or value.
    ///
    /// # Errors
    ///
    /// Returns `QueryComponentError::Empty` if `raw` is empty.
    pub fn encode(raw: &str) -> Result<Self, QueryComponentError> {
        if raw.is_empty() {
            return Err(QueryComponentError::Empty);
        }
        Ok(Self(percent_encode(raw, EncodeSet::QueryComponent)))
    }

    /// Validates and percent-encodes a raw name or value given as UTF-8 bytes.
    ///
    /// # Errors
    ///
    /// Returns `QueryComponentError` if `raw` is empty or not well-formed UTF-8.
    pub fn encode_utf8(raw: &[u8]) -> Result<Self, QueryComponentError> {
        let text = decode_utf8(raw).map_err(QueryComponentError::InvalidText)?;
        Self::encode(text)
    }

    /// Validates and percent-encodes a raw name or value given as UTF-16
    /// code units.
    ///
    /// # Errors
    ///
    /// Returns `QueryComponentError` if `raw` is empty or contains an
    /// unpaired surrogate.
    pub fn encode_utf16(raw: &[u16]) -> Result<Self, QueryComponentError> {
        let text = decode_utf16(raw).map_err(QueryComponentError::InvalidText)?;
        Self::encode(&text)
    }

    /// Returns the encoded component as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the character is written unescaped in a component.
    #[must_use]
    pub const fn is_unescaped_char(c: char) -> bool {
        EncodeSet::QueryComponent.allows(c)
    }
}

impl fmt::Display for QueryComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for QueryComponent {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for QueryComponent {
    type Error = QueryComponentError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::encode(s)
    }
}

/// Ordered multi-valued query parameters.
///
/// Names keep their first-insertion order. Each name holds its values in
/// insertion order, and appending under an existing name adds to that
/// name's bucket rather than replacing it.
///
/// # Examples
///
/// ```
/// use uri_assembler::{QueryComponent, QueryParams};
///
/// let mut params = QueryParams::new();
/// for (name, value) in [("a", "1"), ("b", "2"), ("a", "3")] {
///     params.append(
///         QueryComponent::encode(name).unwrap(),
///         QueryComponent::encode(value).unwrap(),
///     );
/// }
/// assert_eq!(params.to_string(), "a=1&a=3&b=2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryParams {
    buckets: Vec<(QueryComponent, Vec<QueryComponent>)>,
}

impl QueryParams {
    /// Creates an empty parameter set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buckets: Vec::new(),
        }
    }

    /// Appends `value` under `name`.
    pub fn append(&mut self, name: QueryComponent, value: QueryComponent) {
        match self.buckets.iter_mut().find(|(n, _)| *n == name) {
            Some((_, values)) => values.push(value),
            None => self.buckets.push((name, vec![value])),
        }
    }

    /// Returns the values stored under an encoded name, in insertion order.
    #[must_use]
    pub fn get_all(&self, name: &str) -> &[QueryComponent] {
        self.buckets
            .iter()
            .find(|(n, _)| n.as_str() == name)
            .map(|(_, values)| values.as_slice())
            .unwrap_or_default()
    }

    /// Returns the distinct encoded names in first-insertion order.
    pub fn names(&self) -> impl Iterator<Item = &QueryComponent> {
        self.buckets.iter().map(|(n, _)| n)
    }

    /// Returns every `(name, value)` pair in emission order.
    pub fn iter(&self) -> impl Iterator<Item = (&QueryComponent, &QueryComponent)> {
        self.buckets
            .iter()
            .flat_map(|(n, values)| values.iter().map(move |v| (n, v)))
    }

    /// Returns true if no parameter has been appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Returns the number of `(name, value)` pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.iter().map(|(_, values)| values.len()).sum()
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{name}={value}")?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for QueryComponent {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for QueryParams {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}
