//! Kani proof harnesses for the character classes and encoders.
//!
//! # Usage
//!
//! Kani is not a Cargo dependency. Install and run with:
//!
//! ```bash
//! cargo install --locked kani-verifier
//! cargo kani setup
//! cargo kani --features kani
//! ```
//!
//! This module is only compiled when using Kani (`#[cfg(kani)]`).

use crate::classify::{is_path_allowed, is_sub_delim, is_unreserved};
use crate::{EncodeSet, PathSegment, QueryComponent, percent_encode};

/// Generate an arbitrary scalar value.
fn arbitrary_char() -> char {
    let c: char = kani::any();
    c
}

#[kani::proof]
fn unreserved_is_ascii() {
    let c = arbitrary_char();
    if is_unreserved(c) || is_sub_delim(c) {
        assert!(c.is_ascii());
    }
}

#[kani::proof]
fn path_allowed_is_superset_of_unreserved() {
    let c = arbitrary_char();
    if is_unreserved(c) {
        assert!(is_path_allowed(c));
    }
}

#[kani::proof]
fn query_set_never_admits_separators() {
    let c = arbitrary_char();
    if c == '=' || c == '&' || c == '#' || c == '%' {
        assert!(!EncodeSet::QueryComponent.allows(c));
    }
}

#[kani::proof]
fn query_set_is_subset_of_path_set_plus_question() {
    let c = arbitrary_char();
    if EncodeSet::QueryComponent.allows(c) {
        assert!(EncodeSet::PathSegment.allows(c) || c == '?');
    }
}

#[kani::proof]
#[kani::unwind(6)]
fn escaped_scalar_expands_to_three_bytes_per_utf8_byte() {
    let c = arbitrary_char();
    kani::assume(!EncodeSet::PathSegment.allows(c));
    let mut buf = [0u8; 4];
    let encoded = percent_encode(c.encode_utf8(&mut buf), EncodeSet::PathSegment);
    assert_eq!(encoded.len(), c.len_utf8() * 3);
    assert!(encoded.starts_with('%'));
}

#[kani::proof]
#[kani::unwind(6)]
fn single_unreserved_segment_is_unchanged() {
    let c = arbitrary_char();
    kani::assume(is_unreserved(c));
    let mut buf = [0u8; 4];
    let raw = c.encode_utf8(&mut buf);
    let segment = PathSegment::encode(raw).expect("non-empty segment without separator");
    assert_eq!(segment.as_str(), raw);
}

#[kani::proof]
#[kani::unwind(6)]
fn single_scalar_component_has_no_separators() {
    let c = arbitrary_char();
    let mut buf = [0u8; 4];
    let component = QueryComponent::encode(c.encode_utf8(&mut buf)).expect("non-empty component");
    assert!(!component.as_str().contains(['=', '&']));
}
