//! Pattern → row predicate compilation.

use regex::{Regex, RegexBuilder};

/// Compiled row test. Built fresh for every accepted pattern.
#[derive(Debug, Clone)]
pub enum MatchPredicate {
    Regex(Regex),
    /// `needle` is already lower-cased when `ignore_case` is set.
    Substring { needle: String, ignore_case: bool },
}

impl MatchPredicate {
    pub fn matches(&self, text: &str) -> bool {
        match self {
            MatchPredicate::Regex(re) => re.is_match(text),
            MatchPredicate::Substring {
                needle,
                ignore_case: true,
            } => text.to_lowercase().contains(needle.as_str()),
            MatchPredicate::Substring {
                needle,
                ignore_case: false,
            } => text.contains(needle.as_str()),
        }
    }
}

/// Compile `pattern` into a predicate.
///
/// In regex mode an invalid pattern yields `None`; the caller must then leave
/// row visibility as it is. Substring mode always succeeds. Regex mode uses
/// the `regex` crate dialect, so look-around and backreferences do not compile.
pub fn compile(pattern: &str, case_insensitive: bool, regex_mode: bool) -> Option<MatchPredicate> {
    if regex_mode {
        return match RegexBuilder::new(pattern)
            .case_insensitive(case_insensitive)
            .build()
        {
            Ok(re) => Some(MatchPredicate::Regex(re)),
            Err(e) => {
                tracing::debug!(pattern, "filter pattern rejected: {e}");
                None
            }
        };
    }

    let needle = if case_insensitive {
        pattern.to_lowercase()
    } else {
        pattern.to_string()
    };
    Some(MatchPredicate::Substring {
        needle,
        ignore_case: case_insensitive,
    })
}
