//! Page identification from the URL path.

use serde::Serialize;
use url::Url;

use crate::error::{ExtError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageType {
    /// Article view (`/<wiki>/d/...` or the wiki top page).
    Article,
    /// Editor (`/<wiki>/e/...`).
    Edit,
    Other,
}

impl PageType {
    fn from_rest_path(rest: &str) -> Self {
        if rest.starts_with("/d/") || rest == "/" {
            PageType::Article
        } else if rest.starts_with("/e/") {
            PageType::Edit
        } else {
            PageType::Other
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub wiki_id: Option<String>,
    pub page_type: PageType,
    pub mobile_layout: bool,
}

impl PageInfo {
    /// Identify the page at `url`. Only URLs on `wiki_host` carry a wiki id;
    /// everything else is [`PageType::Other`].
    pub fn from_url(url: &str, wiki_host: &str, mobile_layout: bool) -> Result<Self> {
        let parsed = Url::parse(url).map_err(|source| ExtError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let (wiki_id, rest) = if parsed.host_str() == Some(wiki_host) {
            match split_wiki_path(parsed.path()) {
                Some((id, rest)) => (Some(id.to_string()), rest),
                None => (None, ""),
            }
        } else {
            (None, "")
        };

        Ok(Self {
            wiki_id,
            page_type: PageType::from_rest_path(rest),
            mobile_layout,
        })
    }
}

/// `/<id><rest>` or `/w/<id><rest>` -> `(id, rest)`.
fn split_wiki_path(path: &str) -> Option<(&str, &str)> {
    let after_root = path.strip_prefix('/')?;
    let body = match after_root.strip_prefix("w/") {
        Some(r) if !r.is_empty() && !r.starts_with('/') => r,
        _ => after_root,
    };
    let end = body.find('/').unwrap_or(body.len());
    if end == 0 {
        return None;
    }
    Some(body.split_at(end))
}
