//! Error type for the page-enhancement core.
//!
//! Only hard failures live here: writes to a frozen snapshot, lifecycle
//! misuse, and URLs that cannot be parsed at all. Recoverable conditions
//! (bad filter regex, missing anchors, undecodable query pairs) never become
//! errors; they are logged and absorbed where they occur.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtError {
    /// A `set` or `delete` reached a snapshot that was already published.
    #[error("read only param: snapshot is frozen (key {key:?})")]
    FrozenSnapshot { key: String },

    /// `init` was called while the extension was not in the initializing state.
    #[error("already initialized")]
    AlreadyInitialized,

    /// `setup` was called before `init` completed.
    #[error("not yet initialized")]
    NotInitialized,

    /// `setup` ran before; bindings and subscriptions exist already.
    #[error("setup already applied")]
    AlreadyLoaded,

    #[error("invalid URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

pub type Result<T, E = ExtError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frozen_snapshot_message_names_key() {
        let err = ExtError::FrozenSnapshot {
            key: "keyword".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "read only param: snapshot is frozen (key \"keyword\")"
        );
    }

    #[test]
    fn invalid_url_keeps_parse_error_as_source() {
        use std::error::Error as _;

        let err = ExtError::InvalidUrl {
            url: "not a url".to_string(),
            source: url::ParseError::RelativeUrlWithoutBase,
        };
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("invalid URL \"not a url\""));
    }
}
