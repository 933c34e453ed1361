//! Table filtering: pattern compilation, bindings, and URL-driven auto filter.
//!
//! Manual typing and the `keyword`/`order` URL parameters end up on the same
//! path: the input's change event, then [`FilterEngine::apply`].

mod auto;
mod engine;
mod matcher;

pub use auto::{parse_order, AutoFilterBridge};
pub use engine::{ApplyOutcome, FilterBinding, FilterEngine};
pub use matcher::{compile, MatchPredicate};
