//! Incremental builder for percent-encoded URIs.

use std::fmt;
use std::str::FromStr;

use tracing::trace;
use url::Url;

use crate::base::BaseUri;
use crate::encode::{EncodeSet, percent_encode};
use crate::error::{BaseUriError, BuildError, PathSegmentError, QueryComponentError, QueryError};
use crate::path_segment::PathSegment;
use crate::query::{QueryComponent, QueryParams};

/// Assembles a URI from a base, ordered path segments, and ordered query
/// parameters.
///
/// Appends encode their input immediately and either succeed completely or
/// leave the assembler untouched. [`build`](Self::build) only reads the
/// accumulated state, so it can be called any number of times, between
/// appends as well as after them.
///
/// Mutators take `&mut self`, which rules out building while another
/// thread appends without a lock around the assembler.
///
/// # Examples
///
/// ```
/// use uri_assembler::UriAssembler;
///
/// let mut uri = UriAssembler::parse("https://api.example.com/")?;
/// uri.append_path("users")?
///     .append_path("42")?
///     .append_query("active", "true")?;
///
/// assert_eq!(uri.build(), "https://api.example.com/users/42?active=true");
/// # Ok::<(), uri_assembler::Error>(())
/// ```
///
/// Repeated names accumulate instead of overwriting:
///
/// ```
/// use uri_assembler::UriAssembler;
///
/// let mut uri = UriAssembler::parse("https://x.test")?;
/// uri.append_query("a", "1")?
///     .append_query("b", "2")?
///     .append_query("a", "3")?;
///
/// assert_eq!(uri.build(), "https://x.test?a=1&a=3&b=2");
/// # Ok::<(), uri_assembler::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriAssembler {
    base: BaseUri,
    paths: Vec<PathSegment>,
    query: QueryParams,
}

impl UriAssembler {
    /// Creates an assembler over a validated base.
    #[must_use]
    pub const fn new(base: BaseUri) -> Self {
        Self {
            base,
            paths: Vec::new(),
            query: QueryParams::new(),
        }
    }

    /// Creates an assembler from a base URI string.
    ///
    /// # Errors
    ///
    /// Returns `BaseUriError` if `base` is not a valid absolute URI or has a
    /// query or fragment.
    pub fn parse(base: &str) -> Result<Self, BaseUriError> {
        BaseUri::parse(base).map(Self::new)
    }

    /// Creates an assembler from a parsed URL.
    ///
    /// # Errors
    ///
    /// Returns `BaseUriError` if `base` has a query or fragment.
    pub fn from_url(base: Url) -> Result<Self, BaseUriError> {
        BaseUri::from_url(base).map(Self::new)
    }

    /// Returns the current base.
    #[must_use]
    pub const fn base(&self) -> &BaseUri {
        &self.base
    }

    /// Replaces the base, keeping all path segments and query parameters.
    pub fn set_base(&mut self, base: BaseUri) -> &mut Self {
        trace!(base = %base, "replaced base URI");
        self.base = base;
        self
    }

    /// Parses `candidate` and replaces the base with it.
    ///
    /// # Errors
    ///
    /// Returns `BaseUriError` if `candidate` is not a valid base; the current
    /// base is kept.
    pub fn try_set_base(&mut self, candidate: &str) -> Result<&mut Self, BaseUriError> {
        let base = BaseUri::parse(candidate)?;
        Ok(self.set_base(base))
    }

    /// Validates `candidate` and replaces the base with it.
    ///
    /// # Errors
    ///
    /// Returns `BaseUriError` if `candidate` has a query or fragment; the
    /// current base is kept.
    pub fn try_set_base_url(&mut self, candidate: Url) -> Result<&mut Self, BaseUriError> {
        let base = BaseUri::from_url(candidate)?;
        Ok(self.set_base(base))
    }

    /// Encodes `raw` and appends it as the next path segment.
    ///
    /// A `/` inside `raw` is kept as-is, so `"v1/items"` adds two levels.
    ///
    /// # Errors
    ///
    /// Returns `PathSegmentError` if `raw` is empty or starts or ends with '/'.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_assembler::{PathSegmentError, UriAssembler};
    ///
    /// let mut uri = UriAssembler::parse("https://x.test")?;
    /// uri.append_path("a b")?;
    /// assert_eq!(uri.build(), "https://x.test/a%20b");
    ///
    /// assert_eq!(uri.append_path("/c").unwrap_err(), PathSegmentError::LeadingSeparator);
    /// assert_eq!(uri.build(), "https://x.test/a%20b");
    /// # Ok::<(), uri_assembler::Error>(())
    /// ```
    pub fn append_path(&mut self, raw: &str) -> Result<&mut Self, PathSegmentError> {
        let segment = PathSegment::encode(raw)?;
        Ok(self.push_path(segment))
    }

    /// Appends a path segment given as UTF-8 bytes.
    ///
    /// # Errors
    ///
    /// Returns `PathSegmentError` if the segment is malformed or the bytes
    /// are not valid UTF-8.
    pub fn append_path_utf8(&mut self, raw: &[u8]) -> Result<&mut Self, PathSegmentError> {
        let segment = PathSegment::encode_utf8(raw)?;
        Ok(self.push_path(segment))
    }

    /// Appends a path segment given as UTF-16 code units.
    ///
    /// # Errors
    ///
    /// Returns `PathSegmentError` if the segment is malformed or contains an
    /// unpaired surrogate.
    pub fn append_path_utf16(&mut self, raw: &[u16]) -> Result<&mut Self, PathSegmentError> {
        let segment = PathSegment::encode_utf16(raw)?;
        Ok(self.push_path(segment))
    }

    /// Appends an already-encoded path segment.
    pub fn push_path(&mut self, segment: PathSegment) -> &mut Self {
        trace!(segment = %segment, index = self.paths.len(), "appended path segment");
        self.paths.push(segment);
        self
    }

    /// Encodes `name` and `value` and appends them as a query parameter.
    ///
    /// Names are not unique: appending under an existing name adds another
    /// value for it.
    ///
    /// # Errors
    ///
    /// Returns `QueryError` if `name` or `value` is empty.
    pub fn append_query(&mut self, name: &str, value: &str) -> Result<&mut Self, QueryError> {
        let encoded_name = QueryComponent::encode(name).map_err(QueryError::InvalidName)?;
        let encoded_value =
            QueryComponent::encode(value).map_err(|reason| QueryError::InvalidValue {
                name: name.to_string(),
                reason,
            })?;
        Ok(self.push_query(encoded_name, encoded_value))
    }

    /// Appends a query parameter given as UTF-8 bytes.
    ///
    /// # Errors
    ///
    /// Returns `QueryError` if `name` or `value` is empty or not valid UTF-8.
    pub fn append_query_utf8(&mut self, name: &[u8], value: &[u8]) -> Result<&mut Self, QueryError> {
        let (name, value) = encode_query_pair(
            name,
            value,
            QueryComponent::encode_utf8,
            |raw| String::from_utf8_lossy(raw).into_owned(),
        )?;
        Ok(self.push_query(name, value))
    }

    /// Appends a query parameter given as UTF-16 code units.
    ///
    /// # Errors
    ///
    /// Returns `QueryError` if `name` or `value` is empty or contains an
    /// unpaired surrogate.
    pub fn append_query_utf16(
        &mut self,
        name: &[u16],
        value: &[u16],
    ) -> Result<&mut Self, QueryError> {
        let (name, value) = encode_query_pair(
            name,
            value,
            QueryComponent::encode_utf16,
            String::from_utf16_lossy,
        )?;
        Ok(self.push_query(name, value))
    }

    /// Appends an already-encoded query parameter.
    pub fn push_query(&mut self, name: QueryComponent, value: QueryComponent) -> &mut Self {
        trace!(name = %name, value = %value, "appended query parameter");
        self.query.append(name, value);
        self
    }

    /// Returns the encoded path segments in append order.
    #[must_use]
    pub fn path_segments(&self) -> &[PathSegment] {
        &self.paths
    }

    /// Returns the encoded query parameters.
    #[must_use]
    pub const fn query(&self) -> &QueryParams {
        &self.query
    }

    /// Assembles the URI string from the current state.
    ///
    /// The base's absolute form loses one trailing '/', then each path
    /// segment follows a '/', then the query follows a '?' if any parameter
    /// has been appended.
    #[must_use]
    pub fn build(&self) -> String {
        let stem = self.base.stem();
        let mut out = String::with_capacity(
            stem.len()
                + self.paths.iter().map(|p| p.as_str().len() + 1).sum::<usize>()
                + self.query_len_hint(),
        );

        out.push_str(stem);
        for segment in &self.paths {
            out.push('/');
            out.push_str(segment.as_str());
        }
        if !self.query.is_empty() {
            out.push('?');
            for (i, (name, value)) in self.query.iter().enumerate() {
                if i > 0 {
                    out.push('&');
                }
                out.push_str(name.as_str());
                out.push('=');
                out.push_str(value.as_str());
            }
        }

        trace!(len = out.len(), segments = self.paths.len(), params = self.query.len(), "built URI");
        out
    }

    /// Assembles the URI and parses it into a [`Url`].
    ///
    /// The URL parser removes dot segments, so a segment of `.` or `..`
    /// survives in [`build`](Self::build) but not here:
    ///
    /// ```
    /// use uri_assembler::UriAssembler;
    ///
    /// let mut uri = UriAssembler::parse("https://x.test/a/")?;
    /// uri.append_path("..")?;
    /// assert_eq!(uri.build(), "https://x.test/a/..");
    /// assert_eq!(uri.build_uri()?.as_str(), "https://x.test/");
    /// # Ok::<(), uri_assembler::Error>(())
    /// ```
    ///
    /// For any other input the serialization equals `build()`.
    ///
    /// # Errors
    ///
    /// Returns `BuildError` if the URL parser rejects the assembled string.
    /// Every component is already conformant, so this indicates a defect in
    /// the assembler rather than bad input.
    pub fn build_uri(&self) -> Result<Url, BuildError> {
        let uri = self.build();
        Url::parse(&uri).map_err(|reason| BuildError::Malformed { uri, reason })
    }

    fn query_len_hint(&self) -> usize {
        self.query
            .iter()
            .map(|(n, v)| n.as_str().len() + v.as_str().len() + 2)
            .sum()
    }
}

/// Encodes a name/value pair given as raw code units.
///
/// Both emptiness checks run before either side is decoded. A failing value
/// reports its name percent-encoded, with ill-formed units replaced by U+FFFD.
fn encode_query_pair<T>(
    name: &[T],
    value: &[T],
    encode: fn(&[T]) -> Result<QueryComponent, QueryComponentError>,
    lossy: fn(&[T]) -> String,
) -> Result<(QueryComponent, QueryComponent), QueryError> {
    let invalid_value = |reason| QueryError::InvalidValue {
        name: percent_encode(&lossy(name), EncodeSet::QueryComponent),
        reason,
    };

    if name.is_empty() {
        return Err(QueryError::InvalidName(QueryComponentError::Empty));
    }
    if value.is_empty() {
        return Err(invalid_value(QueryComponentError::Empty));
    }

    let encoded_name = encode(name).map_err(QueryError::InvalidName)?;
    let encoded_value = encode(value).map_err(invalid_value)?;
    Ok((encoded_name, encoded_value))
}

impl From<BaseUri> for UriAssembler {
    fn from(base: BaseUri) -> Self {
        Self::new(base)
    }
}

impl TryFrom<&str> for UriAssembler {
    type Error = BaseUriError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl TryFrom<Url> for UriAssembler {
    type Error = BaseUriError;

    fn try_from(url: Url) -> Result<Self, Self::Error> {
        Self::from_url(url)
    }
}

impl FromStr for UriAssembler {
    type Err = BaseUriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for UriAssembler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.build())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for UriAssembler {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvalidTextError;

    fn sample() -> UriAssembler {
        UriAssembler::parse("https://api.example.com/").unwrap()
    }

    #[test]
    fn build_without_appends_strips_trailing_slash() {
        assert_eq!(sample().build(), "https://api.example.com");
        let uri = UriAssembler::parse("https://api.example.com/v1/").unwrap();
        assert_eq!(uri.build(), "https://api.example.com/v1");
    }

    #[test]
    fn build_base_without_trailing_slash_unchanged() {
        let uri = UriAssembler::parse("https://api.example.com/v1").unwrap();
        assert_eq!(uri.build(), "https://api.example.com/v1");
    }

    #[test]
    fn build_paths_and_query() {
        let mut uri = sample();
        uri.append_path("users")
            .unwrap()
            .append_path("42")
            .unwrap()
            .append_query("active", "true")
            .unwrap();
        assert_eq!(uri.build(), "https://api.example.com/users/42?active=true");
    }

    #[test]
    fn build_encodes_path() {
        let mut uri = UriAssembler::parse("https://x.test").unwrap();
        uri.append_path("a b").unwrap();
        assert_eq!(uri.build(), "https://x.test/a%20b");
    }

    #[test]
    fn build_query_only() {
        let mut uri = UriAssembler::parse("https://x.test/search").unwrap();
        uri.append_query("q", "rust lang").unwrap();
        assert_eq!(uri.build(), "https://x.test/search?q=rust%20lang");
    }

    #[test]
    fn build_groups_query_by_first_seen_name() {
        let mut uri = UriAssembler::parse("https://x.test").unwrap();
        uri.append_query("a", "1")
            .unwrap()
            .append_query("b", "2")
            .unwrap()
            .append_query("a", "3")
            .unwrap();
        assert_eq!(uri.build(), "https://x.test?a=1&a=3&b=2");
    }

    #[test]
    fn build_is_repeatable() {
        let mut uri = sample();
        uri.append_path("x").unwrap().append_query("k", "v").unwrap();
        assert_eq!(uri.build(), uri.build());
    }

    #[test]
    fn build_reflects_state_at_call_time() {
        let mut uri = sample();
        uri.append_path("a").unwrap();
        let first = uri.build();
        uri.append_path("b").unwrap();
        assert_eq!(first, "https://api.example.com/a");
        assert_eq!(uri.build(), "https://api.example.com/a/b");
    }

    #[test]
    fn failed_append_path_leaves_state() {
        let mut uri = sample();
        uri.append_path("a").unwrap();
        let before = uri.clone();

        assert_eq!(uri.append_path("").unwrap_err(), PathSegmentError::Empty);
        assert_eq!(uri.append_path("/b").unwrap_err(), PathSegmentError::LeadingSeparator);
        assert_eq!(uri.append_path("b/").unwrap_err(), PathSegmentError::TrailingSeparator);
        assert_eq!(uri, before);
    }

    #[test]
    fn failed_append_query_leaves_state() {
        let mut uri = sample();
        uri.append_query("a", "1").unwrap();
        let before = uri.clone();

        assert_eq!(
            uri.append_query("", "v").unwrap_err(),
            QueryError::InvalidName(QueryComponentError::Empty)
        );
        assert_eq!(
            uri.append_query("n", "").unwrap_err(),
            QueryError::InvalidValue {
                name: "n".to_string(),
                reason: QueryComponentError::Empty,
            }
        );
        assert_eq!(uri, before);
    }

    #[test]
    fn append_path_utf16_rejects_unpaired_surrogate() {
        let mut uri = sample();
        let err = uri.append_path_utf16(&[0xDFFF]).unwrap_err();
        assert_eq!(
            err,
            PathSegmentError::InvalidText(InvalidTextError::UnpairedSurrogate {
                unit: 0xDFFF,
                position: 0
            })
        );
        assert!(uri.path_segments().is_empty());
    }

    #[test]
    fn append_utf8_and_utf16_inputs() {
        let mut uri = sample();
        let name: Vec<u16> = "na\u{ef}ve".encode_utf16().collect();
        uri.append_path_utf8("caf\u{e9}".as_bytes())
            .unwrap()
            .append_query_utf16(&name, &[u16::from(b'1')])
            .unwrap()
            .append_query_utf8(b"k", b"v")
            .unwrap();
        assert_eq!(
            uri.build(),
            "https://api.example.com/caf%C3%A9?na%C3%AFve=1&k=v"
        );
    }

    #[test]
    fn append_query_utf8_invalid_value_names_encoded_key() {
        let mut uri = sample();
        let err = uri.append_query_utf8(b"a b", b"\xff").unwrap_err();
        assert_eq!(
            err,
            QueryError::InvalidValue {
                name: "a%20b".to_string(),
                reason: QueryComponentError::InvalidText(InvalidTextError::Utf8 {
                    valid_up_to: 0
                }),
            }
        );
    }

    #[test]
    fn set_base_keeps_paths_and_query() {
        let mut uri = sample();
        uri.append_path("users").unwrap().append_query("a", "1").unwrap();
        uri.try_set_base("http://localhost:8080/api/").unwrap();
        assert_eq!(uri.build(), "http://localhost:8080/api/users?a=1");
    }

    #[test]
    fn try_set_base_rejects_query_and_keeps_old_base() {
        let mut uri = sample();
        let err = uri.try_set_base("https://x.test/?q=1").unwrap_err();
        assert!(matches!(err, BaseUriError::HasQuery { .. }));
        assert_eq!(uri.base().as_str(), "https://api.example.com/");
    }

    #[test]
    fn try_set_base_url_rejects_fragment() {
        let mut uri = sample();
        let url = Url::parse("https://x.test/#f").unwrap();
        assert!(matches!(
            uri.try_set_base_url(url),
            Err(BaseUriError::HasFragment { .. })
        ));
    }

    #[test]
    fn parse_rejects_relative_base() {
        assert!(matches!(
            UriAssembler::parse("api/v1"),
            Err(BaseUriError::NotAbsolute { .. })
        ));
    }

    #[test]
    fn build_uri_removes_dot_segments() {
        let mut uri = UriAssembler::parse("https://x.test").unwrap();
        uri.append_path("..").unwrap();
        assert_eq!(uri.build(), "https://x.test/..");
        assert_eq!(uri.build_uri().unwrap().as_str(), "https://x.test/");

        let mut uri = UriAssembler::parse("https://x.test/v1").unwrap();
        uri.append_path(".").unwrap().append_path("items").unwrap();
        assert_eq!(uri.build(), "https://x.test/v1/./items");
        assert_eq!(uri.build_uri().unwrap().as_str(), "https://x.test/v1/items");
    }

    #[test]
    fn empty_value_is_reported_before_ill_formed_name() {
        let mut uri = sample();
        assert_eq!(
            uri.append_query_utf16(&[0xD800], &[]).unwrap_err(),
            QueryError::InvalidValue {
                name: "%EF%BF%BD".to_string(),
                reason: QueryComponentError::Empty,
            }
        );
        assert_eq!(
            uri.append_query_utf8(b"\xff", b"").unwrap_err(),
            QueryError::InvalidValue {
                name: "%EF%BF%BD".to_string(),
                reason: QueryComponentError::Empty,
            }
        );
        assert!(uri.query().is_empty());
    }

    #[test]
    fn empty_name_wins_over_every_value_error() {
        let mut uri = sample();
        assert_eq!(
            uri.append_query_utf16(&[], &[0xDC00]).unwrap_err(),
            QueryError::InvalidName(QueryComponentError::Empty)
        );
        assert_eq!(
            uri.append_query_utf8(b"", b"").unwrap_err(),
            QueryError::InvalidName(QueryComponentError::Empty)
        );
    }

    #[test]
    fn build_uri_parses_result() {
        let mut uri = sample();
        uri.append_path("a b").unwrap().append_query("q", "x=y").unwrap();
        let url = uri.build_uri().unwrap();
        assert_eq!(url.path(), "/a%20b");
        assert_eq!(url.query(), Some("q=x%3Dy"));
        assert_eq!(url.as_str(), uri.build());
    }

    #[test]
    fn push_pre_encoded_components() {
        let mut uri = sample();
        uri.push_path(PathSegment::encode("x y").unwrap()).push_query(
            QueryComponent::encode("k").unwrap(),
            QueryComponent::encode("v").unwrap(),
        );
        assert_eq!(uri.path_segments().len(), 1);
        assert_eq!(uri.query().len(), 1);
        assert_eq!(uri.to_string(), "https://api.example.com/x%20y?k=v");
    }

    #[test]
    fn inner_slash_adds_levels() {
        let mut uri = sample();
        uri.append_path("v1/items").unwrap();
        assert_eq!(uri.build(), "https://api.example.com/v1/items");
    }

    #[test]
    fn conversions() {
        let from_str: UriAssembler = "https://x.test".parse().unwrap();
        let try_from = UriAssembler::try_from("https://x.test").unwrap();
        let from_base = UriAssembler::from(BaseUri::parse("https://x.test").unwrap());
        let from_url = UriAssembler::try_from(Url::parse("https://x.test").unwrap()).unwrap();
        assert_eq!(from_str, try_from);
        assert_eq!(from_base, from_url);
        assert_eq!(from_str, from_base);
    }
}
