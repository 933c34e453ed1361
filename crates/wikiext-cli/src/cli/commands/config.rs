//! Config command: print the effective configuration as TOML.

use anyhow::Result;
use wikiext_core::config::{self, ExtConfig};

pub fn run_config(cfg: &ExtConfig) -> Result<()> {
    println!("# {}", config::config_path()?.display());
    print!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}
