//! Convenient re-exports for glob imports.
//!
//! ```rust
//! use uri_assembler::prelude::*;
//!
//! let mut uri = UriAssembler::parse("https://x.test").unwrap();
//! uri.append_path("a b").unwrap();
//! assert_eq!(uri.build(), "https://x.test/a%20b");
//! ```

pub use crate::{
    // Core types
    BaseUri, EncodeSet, PathSegment, QueryComponent, QueryParams, UriAssembler,
    // Errors
    BaseUriError, BuildError, Error, ErrorKind, InvalidTextError, PathSegmentError,
    QueryComponentError, QueryError,
};
