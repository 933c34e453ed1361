//! Filter command: run one filter over the lines of a file.

use anyhow::{bail, Result};
use std::path::Path;
use wikiext_core::filter::{ApplyOutcome, FilterEngine};
use wikiext_core::headless::{HeadlessInput, HeadlessTable};

use super::read_rows;

/// Print the rows of `path` that stay visible for `pattern`.
pub fn run_filter(path: &Path, pattern: &str, regex: bool) -> Result<()> {
    let rows = read_rows(path)?;
    let classes: &[&str] = if regex { &["filter", "regex"] } else { &["filter"] };
    let table = HeadlessTable::new(classes, &rows);

    let mut engine = FilterEngine::new();
    let index = engine.bind(Box::new(HeadlessInput::new("")), Box::new(table.clone()));

    match engine.set_input_value(index, pattern) {
        ApplyOutcome::InvalidPattern => bail!("invalid regex: {pattern}"),
        ApplyOutcome::Applied { visible, hidden } => {
            tracing::debug!(visible, hidden, "filter command applied");
        }
        ApplyOutcome::Unchanged | ApplyOutcome::NoBinding | ApplyOutcome::Dropped => {}
    }

    for row in table.visible_rows() {
        println!("{row}");
    }
    Ok(())
}
