//! Params command: show the merged parameter snapshot for a URL.

use anyhow::{Context, Result};
use wikiext_core::params;

pub fn run_params(url: &str, json: bool) -> Result<()> {
    let snapshot = params::parse(url).with_context(|| format!("parse {url}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    println!("fragment: {}", snapshot.fragment());
    if snapshot.is_empty() {
        println!("(no parameters)");
    }
    for (key, value) in snapshot.iter() {
        println!("{key} = {value}");
    }
    Ok(())
}
