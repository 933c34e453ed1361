//! Input ↔ table bindings and the guarded apply path.

use std::collections::BTreeMap;

use crate::dom::{filter_input_id, FilterTable, PageDocument, TextInput, REGEX_CLASS};

use super::matcher;

/// Case sensitivity is not user-configurable: filters always ignore case.
const IGNORE_CASE: bool = true;

/// One input bound to one table, plus the last pattern accepted for it.
pub struct FilterBinding {
    input: Box<dyn TextInput>,
    table: Box<dyn FilterTable>,
    last_pattern: Option<String>,
    regex_mode: bool,
}

impl FilterBinding {
    /// Regex mode is read from the table's `regex` class once, here.
    pub fn new(input: Box<dyn TextInput>, table: Box<dyn FilterTable>) -> Self {
        let regex_mode = table.has_class(REGEX_CLASS);
        Self {
            input,
            table,
            last_pattern: None,
            regex_mode,
        }
    }

    pub fn regex_mode(&self) -> bool {
        self.regex_mode
    }

    pub fn last_pattern(&self) -> Option<&str> {
        self.last_pattern.as_deref()
    }
}

impl std::fmt::Debug for FilterBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterBinding")
            .field("last_pattern", &self.last_pattern)
            .field("regex_mode", &self.regex_mode)
            .finish_non_exhaustive()
    }
}

/// Result of one [`FilterEngine::apply`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Same pattern as last time; nothing scanned.
    Unchanged,
    /// Regex did not compile; visibility left as it was.
    InvalidPattern,
    /// Every row was re-evaluated.
    Applied { visible: usize, hidden: usize },
    /// No binding at that index.
    NoBinding,
    /// The engine was busy with another apply; the event was dropped.
    Dropped,
}

/// All filter bindings of a page, keyed by the ordinal of their `filter`
/// table. Tables without an input leave a gap; later indices do not shift.
#[derive(Debug, Default)]
pub struct FilterEngine {
    bindings: BTreeMap<usize, FilterBinding>,
}

impl FilterEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `input` to `table` after the highest index in use; returns that index.
    pub fn bind(&mut self, input: Box<dyn TextInput>, table: Box<dyn FilterTable>) -> usize {
        let index = self.bindings.last_key_value().map_or(0, |(last, _)| last + 1);
        self.bind_at(index, input, table);
        index
    }

    /// Bind `input` to `table` at `index`, replacing any binding there.
    pub fn bind_at(
        &mut self,
        index: usize,
        input: Box<dyn TextInput>,
        table: Box<dyn FilterTable>,
    ) {
        self.bindings.insert(index, FilterBinding::new(input, table));
    }

    /// Pair the Nth `filter` table with input `table-filter-N`.
    ///
    /// Tables without an input are skipped and their index stays unbound.
    /// Returns the number of bindings made.
    pub fn bind_document(&mut self, doc: &dyn PageDocument) -> usize {
        let mut bound = 0;
        for (index, table) in doc.filter_tables().into_iter().enumerate() {
            let id = filter_input_id(index);
            match doc.text_input(&id) {
                Some(input) => {
                    self.bind_at(index, input, table);
                    bound += 1;
                }
                None => tracing::debug!(input = %id, "no filter input for table"),
            }
        }
        tracing::debug!(bound, "filter tables bound");
        bound
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn binding(&self, index: usize) -> Option<&FilterBinding> {
        self.bindings.get(&index)
    }

    /// Re-filter the table at `index` for `raw_pattern`.
    ///
    /// A pattern equal to the last accepted one is a no-op. The pattern is
    /// recorded before compiling, so repeating an invalid regex is a no-op too.
    pub fn apply(&mut self, index: usize, raw_pattern: &str) -> ApplyOutcome {
        let Some(binding) = self.bindings.get_mut(&index) else {
            tracing::debug!(index, "apply on unknown filter binding");
            return ApplyOutcome::NoBinding;
        };

        if binding.last_pattern.as_deref() == Some(raw_pattern) {
            return ApplyOutcome::Unchanged;
        }
        binding.last_pattern = Some(raw_pattern.to_string());

        let Some(predicate) = matcher::compile(raw_pattern, IGNORE_CASE, binding.regex_mode)
        else {
            return ApplyOutcome::InvalidPattern;
        };

        let table = &binding.table;
        let mut visible = 0;
        let rows = table.row_count();
        for row in 0..rows {
            let show = predicate.matches(&table.row_text(row));
            table.set_row_visible(row, show);
            if show {
                visible += 1;
            }
        }
        table.notify_filtered();

        tracing::debug!(index, pattern = raw_pattern, visible, rows, "filter applied");
        ApplyOutcome::Applied {
            visible,
            hidden: rows - visible,
        }
    }

    /// Entry point for both live text-change and committed-change events of
    /// the input at `index`.
    pub fn on_input_event(&mut self, index: usize) -> ApplyOutcome {
        let Some(binding) = self.bindings.get(&index) else {
            return ApplyOutcome::NoBinding;
        };
        let value = binding.input.value();
        self.apply(index, &value)
    }

    /// Switch the binding at `index` to regex mode (and mark its table).
    pub fn force_regex(&mut self, index: usize) -> bool {
        match self.bindings.get_mut(&index) {
            Some(binding) => {
                binding.regex_mode = true;
                binding.table.add_class(REGEX_CLASS);
                true
            }
            None => false,
        }
    }

    /// Set the input's value programmatically and dispatch its change event,
    /// exactly as if the user had committed the text.
    pub fn set_input_value(&mut self, index: usize, value: &str) -> ApplyOutcome {
        let Some(binding) = self.bindings.get(&index) else {
            tracing::debug!(index, "no filter input to set");
            return ApplyOutcome::NoBinding;
        };
        binding.input.set_value(value);
        self.on_input_event(index)
    }
}
