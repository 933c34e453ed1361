//! Holder of the current URL parameters.
//!
//! The synchronizer parses the page URL once at construction (silently) and
//! again on every fragment-change navigation, publishing a [`ParamChange`] for
//! the latter only.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::Result;
use crate::events::{EventChannel, Subscription};
use crate::params::{self, ParamSnapshot};

/// Payload of the parameter-change event.
#[derive(Debug, Clone)]
pub struct ParamChange {
    pub params: Rc<ParamSnapshot>,
}

impl ParamChange {
    /// Retained fragment of the new URL (`""` or `#name`).
    pub fn fragment(&self) -> &str {
        self.params.fragment()
    }
}

pub struct NavigationSynchronizer {
    current: RefCell<Rc<ParamSnapshot>>,
    changes: EventChannel<ParamChange>,
}

impl NavigationSynchronizer {
    /// Parse the initial page URL. No change event is emitted for it.
    pub fn new(url: &str) -> Result<Self> {
        let snapshot = params::parse(url)?;
        tracing::debug!(
            entries = snapshot.len(),
            fragment = snapshot.fragment(),
            "initial url params"
        );
        Ok(Self {
            current: RefCell::new(Rc::new(snapshot)),
            changes: EventChannel::new(),
        })
    }

    /// The snapshot for the URL seen last.
    pub fn current(&self) -> Rc<ParamSnapshot> {
        Rc::clone(&self.current.borrow())
    }

    /// Handle a fragment-change navigation to `new_url`.
    ///
    /// The new snapshot is stored before listeners run, so they and anything
    /// they call see it through [`current`](Self::current). Returns `false`
    /// (and keeps the previous snapshot) when `new_url` cannot be parsed.
    pub fn navigate(&self, new_url: &str) -> bool {
        let snapshot = match params::parse(new_url) {
            Ok(s) => Rc::new(s),
            Err(e) => {
                tracing::warn!("ignoring navigation: {e}");
                return false;
            }
        };
        tracing::debug!(
            entries = snapshot.len(),
            fragment = snapshot.fragment(),
            "url params changed"
        );
        *self.current.borrow_mut() = Rc::clone(&snapshot);
        self.changes.emit(&ParamChange { params: snapshot });
        true
    }

    /// Listen for parameter changes caused by navigation after the initial load.
    pub fn subscribe(&self, listener: impl FnMut(&ParamChange) + 'static) -> Subscription {
        self.changes.subscribe(listener)
    }
}
