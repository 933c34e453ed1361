//! Query-string splitting and strict percent-decoding.
//!
//! Decoding follows URI-component rules rather than form encoding: `+` is a
//! literal plus, and a `%` must start a valid escape of UTF-8 bytes. Pairs
//! that fail to decode are dropped, never fatal.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Bytes `encode_component` escapes: everything but the URI-component
/// unreserved set.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// `percent_decode_str` passes bad escapes through; reject them up front.
fn escapes_are_well_formed(src: &str) -> bool {
    let bytes = src.as_bytes();
    bytes.iter().enumerate().all(|(i, &b)| {
        b != b'%'
            || matches!(
                (bytes.get(i + 1), bytes.get(i + 2)),
                (Some(hi), Some(lo)) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit()
            )
    })
}

/// Percent-decodes one key or value. Returns `None` for a truncated or
/// non-hex escape, or when the decoded bytes are not UTF-8.
pub fn decode_component(src: &str) -> Option<String> {
    if !escapes_are_well_formed(src) {
        return None;
    }
    percent_decode_str(src)
        .decode_utf8()
        .ok()
        .map(|decoded| decoded.into_owned())
}

/// Percent-encodes one key or value; the inverse of [`decode_component`].
pub fn encode_component(src: &str) -> String {
    utf8_percent_encode(src, COMPONENT).to_string()
}

/// Splits a query string (with or without its leading `?`) into decoded pairs,
/// in source order.
///
/// A pair without `=` gets an empty value, pairs with an empty key are skipped,
/// and pairs whose key or value cannot be decoded are dropped.
pub fn parse_query(query: &str) -> Vec<(String, String)> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut pairs = Vec::new();
    for part in query.split('&') {
        let (raw_key, raw_value) = part.split_once('=').unwrap_or((part, ""));
        if raw_key.is_empty() {
            continue;
        }
        match (decode_component(raw_key), decode_component(raw_value)) {
            (Some(key), Some(value)) => pairs.push((key, value)),
            _ => tracing::debug!(pair = part, "dropping undecodable query pair"),
        }
    }
    pairs
}
