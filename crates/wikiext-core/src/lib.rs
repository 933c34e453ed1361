//! Page enhancements for a wiki site: a URL parameter model that merges the
//! query string with a query embedded in the fragment, anchor jumps driven by
//! it, and reactive table filtering seeded from `keyword` / `order`.
//!
//! The rendered page is reached only through the traits in [`dom`];
//! [`headless`] provides an in-memory page for tests and the CLI.

pub mod config;
pub mod error;
pub mod logging;

pub mod anchor;
pub mod dom;
pub mod events;
pub mod extension;
pub mod filter;
pub mod headless;
pub mod nav;
pub mod page;
pub mod params;

pub use error::{ExtError, Result};
pub use extension::{ReadyState, WikiExtension};
