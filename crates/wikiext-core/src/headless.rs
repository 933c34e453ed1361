//! In-memory page implementing the [`dom`](crate::dom) traits.
//!
//! Used by the CLI to run filters over plain text rows and by tests, which
//! keep clones of the handles to inspect what the core did to them.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::dom::{filter_input_id, FilterTable, PageDocument, TextInput, FILTER_CLASS};

#[derive(Debug, Default)]
struct TableState {
    classes: Vec<String>,
    rows: Vec<(String, bool)>,
    scans: usize,
    notifications: usize,
}

/// Shared handle to an in-memory table. Rows start visible.
#[derive(Debug, Clone, Default)]
pub struct HeadlessTable {
    state: Rc<RefCell<TableState>>,
}

impl HeadlessTable {
    pub fn new<S: AsRef<str>>(classes: &[&str], rows: &[S]) -> Self {
        let state = TableState {
            classes: classes.iter().map(|c| c.to_string()).collect(),
            rows: rows.iter().map(|r| (r.as_ref().to_string(), true)).collect(),
            ..TableState::default()
        };
        Self {
            state: Rc::new(RefCell::new(state)),
        }
    }

    pub fn visibility(&self) -> Vec<bool> {
        self.state.borrow().rows.iter().map(|(_, v)| *v).collect()
    }

    pub fn visible_rows(&self) -> Vec<String> {
        self.state
            .borrow()
            .rows
            .iter()
            .filter(|(_, v)| *v)
            .map(|(t, _)| t.clone())
            .collect()
    }

    /// How many full row scans have been started.
    pub fn scans(&self) -> usize {
        self.state.borrow().scans
    }

    pub fn filtered_notifications(&self) -> usize {
        self.state.borrow().notifications
    }

    pub fn has_class_now(&self, class: &str) -> bool {
        self.state.borrow().classes.iter().any(|c| c == class)
    }
}

impl FilterTable for HeadlessTable {
    fn has_class(&self, class: &str) -> bool {
        self.has_class_now(class)
    }

    fn add_class(&self, class: &str) {
        if !self.has_class_now(class) {
            self.state.borrow_mut().classes.push(class.to_string());
        }
    }

    fn row_count(&self) -> usize {
        let mut state = self.state.borrow_mut();
        state.scans += 1;
        state.rows.len()
    }

    fn row_text(&self, row: usize) -> String {
        self.state
            .borrow()
            .rows
            .get(row)
            .map(|(t, _)| t.clone())
            .unwrap_or_default()
    }

    fn set_row_visible(&self, row: usize, visible: bool) {
        if let Some(r) = self.state.borrow_mut().rows.get_mut(row) {
            r.1 = visible;
        }
    }

    fn notify_filtered(&self) {
        self.state.borrow_mut().notifications += 1;
    }
}

/// Shared handle to an in-memory text input.
#[derive(Debug, Clone, Default)]
pub struct HeadlessInput {
    value: Rc<RefCell<String>>,
}

impl HeadlessInput {
    pub fn new(value: &str) -> Self {
        Self {
            value: Rc::new(RefCell::new(value.to_string())),
        }
    }

    /// Simulate the user editing the field (no event is fired).
    pub fn type_text(&self, text: &str) {
        *self.value.borrow_mut() = text.to_string();
    }

    pub fn current(&self) -> String {
        self.value.borrow().clone()
    }
}

impl TextInput for HeadlessInput {
    fn value(&self) -> String {
        self.current()
    }

    fn set_value(&self, value: &str) {
        self.type_text(value);
    }
}

#[derive(Debug, Default)]
struct PageState {
    elements: Vec<(String, f64)>,
    named_anchors: Vec<(String, f64)>,
    live_fragment: String,
    mobile_layout: bool,
    tables: Vec<HeadlessTable>,
    inputs: HashMap<String, HeadlessInput>,
    scrolls: Vec<(f64, f64)>,
    anchor_lookups: Vec<String>,
    scroll_wraps: usize,
    calendar_injections: usize,
}

/// In-memory page: elements with offsets, tables, inputs, and a log of scrolls.
#[derive(Debug, Clone, Default)]
pub struct HeadlessPage {
    state: Rc<RefCell<PageState>>,
}

impl HeadlessPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_element(&self, id: &str, top: f64) {
        self.state.borrow_mut().elements.push((id.to_string(), top));
    }

    pub fn add_named_anchor(&self, name: &str, top: f64) {
        self.state
            .borrow_mut()
            .named_anchors
            .push((name.to_string(), top));
    }

    pub fn set_live_fragment(&self, fragment: &str) {
        self.state.borrow_mut().live_fragment = fragment.to_string();
    }

    pub fn set_mobile_layout(&self, mobile: bool) {
        self.state.borrow_mut().mobile_layout = mobile;
    }

    pub fn add_table(&self, table: &HeadlessTable) {
        self.state.borrow_mut().tables.push(table.clone());
    }

    pub fn add_input(&self, id: &str, input: &HeadlessInput) {
        self.state
            .borrow_mut()
            .inputs
            .insert(id.to_string(), input.clone());
    }

    /// Add a `filter` table (plus `extra_classes`) and its `table-filter-N` input.
    pub fn add_filter_table<S: AsRef<str>>(
        &self,
        extra_classes: &[&str],
        rows: &[S],
    ) -> (HeadlessTable, HeadlessInput) {
        let mut classes = vec![FILTER_CLASS];
        classes.extend_from_slice(extra_classes);
        let table = HeadlessTable::new(&classes, rows);
        let index = self.filter_table_count();
        let input = HeadlessInput::new("");
        self.add_table(&table);
        self.add_input(&filter_input_id(index), &input);
        (table, input)
    }

    fn filter_table_count(&self) -> usize {
        self.state
            .borrow()
            .tables
            .iter()
            .filter(|t| t.has_class_now(FILTER_CLASS))
            .count()
    }

    pub fn scrolls(&self) -> Vec<(f64, f64)> {
        self.state.borrow().scrolls.clone()
    }

    /// Every id looked up for an anchor jump, in order.
    pub fn anchor_lookups(&self) -> Vec<String> {
        self.state.borrow().anchor_lookups.clone()
    }

    pub fn scroll_wraps(&self) -> usize {
        self.state.borrow().scroll_wraps
    }

    pub fn calendar_injections(&self) -> usize {
        self.state.borrow().calendar_injections
    }
}

impl PageDocument for HeadlessPage {
    fn element_top_by_id(&self, id: &str) -> Option<f64> {
        let mut state = self.state.borrow_mut();
        state.anchor_lookups.push(id.to_string());
        state
            .elements
            .iter()
            .find(|(eid, _)| eid == id)
            .map(|(_, top)| *top)
    }

    fn named_anchor_tops(&self) -> Vec<(String, f64)> {
        self.state.borrow().named_anchors.clone()
    }

    fn scroll_to(&self, x: f64, y: f64) {
        self.state.borrow_mut().scrolls.push((x, y));
    }

    fn live_fragment(&self) -> String {
        self.state.borrow().live_fragment.clone()
    }

    fn mobile_layout(&self) -> bool {
        self.state.borrow().mobile_layout
    }

    fn filter_tables(&self) -> Vec<Box<dyn FilterTable>> {
        self.state
            .borrow()
            .tables
            .iter()
            .filter(|t| t.has_class_now(FILTER_CLASS))
            .map(|t| Box::new(t.clone()) as Box<dyn FilterTable>)
            .collect()
    }

    fn text_input(&self, id: &str) -> Option<Box<dyn TextInput>> {
        self.state
            .borrow()
            .inputs
            .get(id)
            .map(|i| Box::new(i.clone()) as Box<dyn TextInput>)
    }

    fn wrap_scrollable_tables(&self) {
        self.state.borrow_mut().scroll_wraps += 1;
    }

    fn inject_calendar(&self) {
        self.state.borrow_mut().calendar_injections += 1;
    }
}
