//! CLI for the wikiext page enhancer.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use wikiext_core::config;

use commands::{run_config, run_filter, run_params, run_replay};

/// Top-level CLI for wikiext.
#[derive(Debug, Parser)]
#[command(name = "wikiext")]
#[command(about = "wikiext: URL parameters, anchor jumps and table filters for wiki pages", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Show the merged URL parameters and the retained fragment.
    Params {
        /// Full page URL, e.g. "https://host/page#info?keyword=foo&order=0,2".
        url: String,
        /// Print the snapshot as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Filter the lines of a file the way a filter table filters its rows.
    Filter {
        /// File with one row per line.
        path: PathBuf,
        /// Filter pattern (case-insensitive).
        pattern: String,
        /// Treat the pattern as a regular expression.
        #[arg(long)]
        regex: bool,
    },

    /// Boot a headless page and replay navigations against it.
    Replay {
        /// Initial page URL.
        url: String,
        /// Filter table rows, one file per table (in page order).
        #[arg(long = "table", value_name = "FILE")]
        tables: Vec<PathBuf>,
        /// Fragment-change navigations to apply after boot, in order.
        #[arg(long = "navigate", value_name = "URL")]
        navigations: Vec<String>,
    },

    /// Print the effective configuration.
    Config,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Params { url, json } => run_params(&url, json)?,
            CliCommand::Filter {
                path,
                pattern,
                regex,
            } => run_filter(&path, &pattern, regex)?,
            CliCommand::Replay {
                url,
                tables,
                navigations,
            } => run_replay(&cfg, &url, &tables, &navigations)?,
            CliCommand::Config => run_config(&cfg)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
