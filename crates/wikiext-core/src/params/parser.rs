//! Builds a [`ParamSnapshot`] from a full page URL.

use url::Url;

use crate::error::{ExtError, Result};

use super::encoding::parse_query;
use super::ParamSnapshot;

/// Parses `url` into a frozen snapshot.
///
/// The standard query string is read first, then the query embedded after the
/// first `?` of the fragment is laid over it (embedded values win). The
/// snapshot keeps the fragment with the embedded query cut off.
///
/// - `https://w.test/p?a=1#info?a=2&b=3` -> `{a: "2", b: "3"}`, fragment `#info`
/// - `https://w.test/p#top` -> `{}`, fragment `#top`
pub fn parse(url: &str) -> Result<ParamSnapshot> {
    let parsed = Url::parse(url).map_err(|source| ExtError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;

    let mut snapshot = ParamSnapshot::new();
    if let Some(query) = parsed.query() {
        for (key, value) in parse_query(query) {
            snapshot.set(key, value)?;
        }
    }

    // Url reports "#" alone as an empty fragment; treat it as no fragment at all.
    let mut fragment = match parsed.fragment() {
        Some(f) if !f.is_empty() => format!("#{f}"),
        _ => String::new(),
    };

    if let Some(sep) = fragment.find('?') {
        for (key, value) in parse_query(&fragment[sep..]) {
            snapshot.set(key, value)?;
        }
        fragment.truncate(sep);
    }

    snapshot.set_fragment(fragment)?;
    snapshot.freeze();
    Ok(snapshot)
}

/// [`parse`], returning the retained fragment alongside the snapshot.
pub fn parse_parts(url: &str) -> Result<(ParamSnapshot, String)> {
    let snapshot = parse(url)?;
    let fragment = snapshot.fragment().to_string();
    Ok((snapshot, fragment))
}
