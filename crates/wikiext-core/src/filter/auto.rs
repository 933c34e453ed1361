//! Seed filters from the `keyword` / `order` URL parameters.

use crate::params::ParamSnapshot;

use super::{ApplyOutcome, FilterEngine};

pub const KEYWORD_PARAM: &str = "keyword";
pub const ORDER_PARAM: &str = "order";

/// Parse an `order` value (`"0,2"`) into table indices, skipping junk items.
pub fn parse_order(order: &str) -> Vec<usize> {
    order
        .split(',')
        .filter_map(|item| match item.trim().parse::<usize>() {
            Ok(index) => Some(index),
            Err(_) => {
                tracing::debug!(item, "ignoring order item");
                None
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoFilterBridge {
    default_order: String,
}

impl Default for AutoFilterBridge {
    fn default() -> Self {
        Self::new("0")
    }
}

impl AutoFilterBridge {
    /// `default_order` is used when `keyword` is present but `order` is absent or empty.
    pub fn new(default_order: impl Into<String>) -> Self {
        Self {
            default_order: default_order.into(),
        }
    }

    /// Drive the filters named by `order` with `keyword`.
    ///
    /// Each targeted binding is forced into regex mode and its input is set
    /// through the regular change path. Does nothing without a non-empty
    /// `keyword`. Returns `(index, outcome)` for every targeted index.
    pub fn apply(
        &self,
        params: &ParamSnapshot,
        engine: &mut FilterEngine,
    ) -> Vec<(usize, ApplyOutcome)> {
        let keyword = match params.get(KEYWORD_PARAM) {
            Some(k) if !k.is_empty() => k,
            _ => return Vec::new(),
        };
        let order = params
            .get(ORDER_PARAM)
            .filter(|o| !o.is_empty())
            .unwrap_or(self.default_order.as_str());

        tracing::info!(keyword, order, "auto filter");
        parse_order(order)
            .into_iter()
            .map(|index| {
                engine.force_regex(index);
                (index, engine.set_input_value(index, keyword))
            })
            .collect()
    }
}
