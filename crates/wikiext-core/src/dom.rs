//! Capability traits for the rendered page.
//!
//! The core never touches a real DOM. A browser binding (or the in-memory
//! [`headless`](crate::headless) page) implements these traits; methods take
//! `&self` because page handles are shared and mutate through the page.

/// Marker class that opts a table into filtering.
pub const FILTER_CLASS: &str = "filter";

/// Marker class that puts a filter table into regex mode.
pub const REGEX_CLASS: &str = "regex";

/// Id of the text input paired with the `index`-th filter table.
pub fn filter_input_id(index: usize) -> String {
    format!("table-filter-{index}")
}

/// A text-input control.
pub trait TextInput {
    fn value(&self) -> String;

    /// Set the value without firing any event; callers dispatch the change.
    fn set_value(&self, value: &str);
}

/// A table whose body rows can be shown or hidden.
pub trait FilterTable {
    fn has_class(&self, class: &str) -> bool;

    fn add_class(&self, class: &str);

    /// Number of data rows in the table body.
    fn row_count(&self) -> usize;

    /// Full text content of body row `row`.
    fn row_text(&self, row: usize) -> String;

    fn set_row_visible(&self, row: usize, visible: bool);

    /// Post-filter notification for dependent cosmetic listeners (striping etc).
    fn notify_filtered(&self);
}

/// Page-level queries and the one-shot setup hooks.
pub trait PageDocument {
    /// Offset of the element with this id from the document top.
    fn element_top_by_id(&self, id: &str) -> Option<f64>;

    /// `(name, top)` of every `<a name=..>` element, in document order.
    fn named_anchor_tops(&self) -> Vec<(String, f64)>;

    fn scroll_to(&self, x: f64, y: f64);

    /// Fragment the browser currently shows, including `#` (or empty).
    fn live_fragment(&self) -> String;

    /// Whether the page uses the mobile layout.
    fn mobile_layout(&self) -> bool {
        false
    }

    /// Tables carrying the `filter` class, in document order.
    fn filter_tables(&self) -> Vec<Box<dyn FilterTable>>;

    /// Input with the given id, if the page has one.
    fn text_input(&self, id: &str) -> Option<Box<dyn TextInput>>;

    /// Wrap `content_block_*` tables marked `scrollX` / `scrollY` in scrollers.
    fn wrap_scrollable_tables(&self) {}

    /// Insert the schedule calendar embed where the page asks for one.
    fn inject_calendar(&self) {}
}
