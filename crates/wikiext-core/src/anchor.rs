//! Anchor jumps that leave room for the fixed header.

use crate::config::DEFAULT_ANCHOR_OFFSET_PX;
use crate::dom::PageDocument;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorJumper {
    offset_px: f64,
}

impl Default for AnchorJumper {
    fn default() -> Self {
        Self::new(DEFAULT_ANCHOR_OFFSET_PX)
    }
}

impl AnchorJumper {
    pub fn new(offset_px: i32) -> Self {
        Self {
            offset_px: f64::from(offset_px),
        }
    }

    /// Scroll so the element named `name` sits `offset_px` below the viewport top.
    ///
    /// Looks for an element id first, then for `<a name=..>`. Returns whether a
    /// target was found; a miss is not an error.
    pub fn jump(&self, doc: &dyn PageDocument, name: &str) -> bool {
        let top = doc.element_top_by_id(name).or_else(|| {
            doc.named_anchor_tops()
                .into_iter()
                .find(|(anchor, _)| anchor == name)
                .map(|(_, top)| top)
        });

        match top {
            Some(top) => {
                tracing::debug!(anchor = name, top, "anchor jump");
                doc.scroll_to(0.0, top - self.offset_px);
                true
            }
            None => {
                tracing::debug!(anchor = name, "anchor not found");
                false
            }
        }
    }

    /// Jump for a `#name` fragment; fragments of length <= 1 are ignored.
    pub fn jump_to_fragment(&self, doc: &dyn PageDocument, fragment: &str) -> bool {
        match fragment.strip_prefix('#') {
            Some(name) if !name.is_empty() => self.jump(doc, name),
            _ => false,
        }
    }

    /// First jump after the document is ready.
    ///
    /// Skipped when the browser already shows this exact fragment (it has
    /// jumped natively) or when there is no anchor name.
    pub fn initial_jump(&self, doc: &dyn PageDocument, fragment: &str) -> bool {
        if fragment.len() <= 1 || fragment == doc.live_fragment() {
            return false;
        }
        self.jump_to_fragment(doc, fragment)
    }
}
