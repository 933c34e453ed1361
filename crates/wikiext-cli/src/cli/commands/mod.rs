//! CLI command handlers. Each command is in its own file.

mod config;
mod filter;
mod params;
mod replay;

pub use config::run_config;
pub use filter::run_filter;
pub use params::run_params;
pub use replay::run_replay;

use anyhow::{Context, Result};
use std::path::Path;

/// Rows of a table file: one per line, blank lines skipped.
pub(crate) fn read_rows(path: &Path) -> Result<Vec<String>> {
    let data =
        std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    Ok(data
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(str::to_string)
        .collect())
}
