//! Builder for well-formed, percent-encoded URIs.
//!
//! A [`UriAssembler`] starts from an absolute base URI and layers ordered
//! path segments and ordered query parameters on top of it. Every piece of
//! caller text is percent-encoded as it is appended, using the RFC 3986
//! character classes, so the assembled URI never needs a second pass.
//!
//! # Quick Start
//!
//! ```rust
//! use uri_assembler::UriAssembler;
//!
//! let mut uri = UriAssembler::parse("https://api.example.com/")?;
//! uri.append_path("users")?
//!     .append_path("jane doe")?
//!     .append_query("fields", "name,email")?
//!     .append_query("filter", "a=b&c")?;
//!
//! assert_eq!(
//!     uri.build(),
//!     "https://api.example.com/users/jane%20doe?fields=name,email&filter=a%3Db%26c"
//! );
//!
//! let url = uri.build_uri()?;
//! assert_eq!(url.host_str(), Some("api.example.com"));
//! # Ok::<(), uri_assembler::Error>(())
//! ```
//!
//! # Encoding Policy
//!
//! | Component       | Written unescaped                                     |
//! |-----------------|-------------------------------------------------------|
//! | Path segment    | unreserved, sub-delims, `:`, `@`, `/`                 |
//! | Query component | unreserved, sub-delims, `:`, `@`, `/`, `?`; not `=` `&` |
//!
//! Everything else is written as the `%XX` form of each of its UTF-8 bytes,
//! with uppercase hexadecimal digits.
//!
//! # Assembly
//!
//! ```text
//! <base without one trailing '/'> ( '/' <segment> )* [ '?' <name>=<value> ( '&' <name>=<value> )* ]
//! ```
//!
//! Query names appear in first-insertion order; the values of a name appear
//! in insertion order, all grouped under that name.
//!
//! # Cargo Features
//!
//! - `serde`: string (de)serialization for [`BaseUri`] and string
//!   serialization for the encoded types and [`UriAssembler`].

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod assembler;
mod base;
pub mod classify;
mod encode;
mod error;
#[cfg(kani)]
mod kani_impls;
mod path_segment;
pub mod prelude;
mod query;

pub use assembler::UriAssembler;
pub use base::BaseUri;
pub use encode::{EncodeSet, decode_utf8, decode_utf16, percent_encode, percent_encode_into};
pub use error::{
    BaseUriError, BuildError, Error, ErrorKind, InvalidTextError, PathSegmentError,
    QueryComponentError, QueryError,
};
pub use path_segment::PathSegment;
pub use query::{QueryComponent, QueryParams};
