//! Merged URL parameters with a one-way freeze.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{ExtError, Result};

use super::encoding::encode_component;

/// Point-in-time view of the merged URL parameters plus the retained
/// navigational fragment (`""` or `#name`).
///
/// A snapshot is mutable only while it is being built. [`freeze`](Self::freeze)
/// is terminal: every later `set` or `delete` returns
/// [`ExtError::FrozenSnapshot`]. The parser freezes before handing a snapshot
/// out, so consumers only ever see finished ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParamSnapshot {
    entries: BTreeMap<String, String>,
    fragment: String,
    #[serde(skip)]
    frozen: bool,
}

impl ParamSnapshot {
    /// Empty, unfrozen snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    /// Retained fragment including its `#`, or empty.
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Anchor name the fragment points at (`#info` -> `info`), if any.
    pub fn anchor_name(&self) -> Option<&str> {
        if self.fragment.len() > 1 {
            self.fragment.strip_prefix('#')
        } else {
            None
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Inserts or overwrites `key`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Result<()> {
        let key = key.into();
        self.ensure_writable(&key)?;
        self.entries.insert(key, value.into());
        Ok(())
    }

    /// Removes `key` if present.
    pub fn delete(&mut self, key: &str) -> Result<()> {
        self.ensure_writable(key)?;
        self.entries.remove(key);
        Ok(())
    }

    pub(crate) fn set_fragment(&mut self, fragment: impl Into<String>) -> Result<()> {
        self.ensure_writable("#")?;
        self.fragment = fragment.into();
        Ok(())
    }

    /// Makes the snapshot read-only for good.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// `?k=v&...` with percent-encoded keys and values; empty when there are no entries.
    pub fn to_query_string(&self) -> String {
        if self.entries.is_empty() {
            return String::new();
        }
        let body = self
            .entries
            .iter()
            .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("?{body}")
    }

    fn ensure_writable(&self, key: &str) -> Result<()> {
        if self.frozen {
            return Err(ExtError::FrozenSnapshot {
                key: key.to_string(),
            });
        }
        Ok(())
    }
}
