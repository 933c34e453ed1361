//! URL parameter model.
//!
//! Merges the standard query string with a query embedded in the fragment
//! (`#section?keyword=foo&order=0,2`) into one frozen [`ParamSnapshot`].

mod encoding;
mod parser;
mod snapshot;

pub use encoding::{decode_component, encode_component, parse_query};
pub use parser::{parse, parse_parts};
pub use snapshot::ParamSnapshot;
