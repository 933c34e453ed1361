//! Composition root: one instance per page.
//!
//! Owns the navigation synchronizer, the filter engine and the auto-filter
//! bridge, and wires the anchor jumper and the bridge as ordinary param-change
//! subscribers. The host (browser binding, CLI replay, tests) forwards page
//! lifecycle and navigation events into it.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::Serialize;

use crate::anchor::AnchorJumper;
use crate::config::ExtConfig;
use crate::dom::PageDocument;
use crate::error::{ExtError, Result};
use crate::events::{EventChannel, Subscription};
use crate::filter::{ApplyOutcome, AutoFilterBridge, FilterEngine};
use crate::nav::{NavigationSynchronizer, ParamChange};
use crate::page::{PageInfo, PageType};
use crate::params::ParamSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadyState {
    Initializing,
    Initialized,
    Loaded,
}

impl fmt::Display for ReadyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReadyState::Initializing => "initializing",
            ReadyState::Initialized => "initialized",
            ReadyState::Loaded => "loaded",
        };
        f.write_str(name)
    }
}

pub struct WikiExtension {
    doc: Rc<dyn PageDocument>,
    url: String,
    config: ExtConfig,
    ready_state: ReadyState,
    ready_events: EventChannel<ReadyState>,
    page: Option<PageInfo>,
    nav: Option<Rc<NavigationSynchronizer>>,
    filters: Rc<RefCell<FilterEngine>>,
    jumper: AnchorJumper,
    bridge: AutoFilterBridge,
    // Internal listeners live as long as the page.
    subscriptions: Vec<Subscription>,
}

impl WikiExtension {
    /// Create the extension for the page at `url`. Nothing is parsed yet.
    pub fn new(doc: Rc<dyn PageDocument>, url: impl Into<String>, config: ExtConfig) -> Self {
        let jumper = AnchorJumper::new(config.anchor_offset_px);
        let bridge = AutoFilterBridge::new(config.filter.default_order.clone());
        Self {
            doc,
            url: url.into(),
            config,
            ready_state: ReadyState::Initializing,
            ready_events: EventChannel::new(),
            page: None,
            nav: None,
            filters: Rc::new(RefCell::new(FilterEngine::new())),
            jumper,
            bridge,
            subscriptions: Vec::new(),
        }
    }

    pub fn ready_state(&self) -> ReadyState {
        self.ready_state
    }

    pub fn page_info(&self) -> Option<&PageInfo> {
        self.page.as_ref()
    }

    /// Current merged URL parameters (after `init`).
    pub fn params(&self) -> Option<Rc<ParamSnapshot>> {
        self.nav.as_ref().map(|nav| nav.current())
    }

    pub fn filter_count(&self) -> usize {
        self.filters.borrow().len()
    }

    /// Listen for ready-state transitions.
    pub fn subscribe_ready_state(
        &self,
        listener: impl FnMut(&ReadyState) + 'static,
    ) -> Subscription {
        self.ready_events.subscribe(listener)
    }

    /// Listen for parameter changes caused by navigation (after `init`).
    pub fn subscribe_params(
        &self,
        listener: impl FnMut(&ParamChange) + 'static,
    ) -> Result<Subscription> {
        Ok(self.nav()?.subscribe(listener))
    }

    /// Parse the page URL and hook up anchor jumps.
    ///
    /// Returns whether the caller should go on to [`setup`](Self::setup);
    /// `false` when the config's `stop_before_setup` flag is set.
    pub fn init(&mut self) -> Result<bool> {
        if self.ready_state != ReadyState::Initializing {
            return Err(ExtError::AlreadyInitialized);
        }

        let page = PageInfo::from_url(
            &self.url,
            &self.config.wiki_host,
            self.doc.mobile_layout(),
        )?;
        tracing::info!(
            wiki_id = ?page.wiki_id,
            page_type = ?page.page_type,
            mobile = page.mobile_layout,
            "page identified"
        );
        self.page = Some(page);

        let nav = Rc::new(NavigationSynchronizer::new(&self.url)?);
        let doc = Rc::clone(&self.doc);
        let jumper = self.jumper;
        self.subscriptions.push(nav.subscribe(move |change| {
            jumper.jump_to_fragment(&*doc, change.fragment());
        }));
        self.nav = Some(nav);

        self.set_ready_state(ReadyState::Initialized);

        if self.config.stop_before_setup {
            tracing::info!("setup stopped");
            return Ok(false);
        }
        Ok(true)
    }

    /// Apply the page enhancements for the detected page type.
    pub fn setup(&mut self) -> Result<()> {
        match self.ready_state {
            ReadyState::Initializing => return Err(ExtError::NotInitialized),
            ReadyState::Loaded => return Err(ExtError::AlreadyLoaded),
            ReadyState::Initialized => {}
        }

        let page_type = self
            .page
            .as_ref()
            .map(|p| p.page_type)
            .unwrap_or(PageType::Other);

        if page_type == PageType::Article {
            self.filters.borrow_mut().bind_document(&*self.doc);
            self.doc.wrap_scrollable_tables();
            self.setup_auto_filter()?;
            self.doc.inject_calendar();
        }

        self.set_ready_state(ReadyState::Loaded);
        tracing::info!("extension has applied");
        Ok(())
    }

    /// `init` followed by `setup` unless setup is suppressed.
    pub fn boot(&mut self) -> Result<()> {
        if self.init()? {
            self.setup()?;
        }
        Ok(())
    }

    /// First anchor jump, once the document is ready.
    pub fn dom_content_loaded(&self) -> Result<bool> {
        let current = self.nav()?.current();
        Ok(self.jumper.initial_jump(&*self.doc, current.fragment()))
    }

    /// Fragment-change navigation to `new_url`.
    pub fn hash_changed(&self, new_url: &str) -> Result<bool> {
        Ok(self.nav()?.navigate(new_url))
    }

    /// Live or committed change on the input of filter `index`.
    pub fn input_event(&self, index: usize) -> ApplyOutcome {
        match self.filters.try_borrow_mut() {
            Ok(mut filters) => filters.on_input_event(index),
            Err(_) => {
                tracing::warn!(index, "filter engine busy; input event dropped");
                ApplyOutcome::Dropped
            }
        }
    }

    fn setup_auto_filter(&mut self) -> Result<()> {
        let nav = Rc::clone(self.nav()?);
        self.bridge.apply(&nav.current(), &mut self.filters.borrow_mut());

        let filters = Rc::clone(&self.filters);
        let bridge = self.bridge.clone();
        self.subscriptions
            .push(nav.subscribe(move |change| match filters.try_borrow_mut() {
                Ok(mut engine) => {
                    bridge.apply(&change.params, &mut engine);
                }
                Err(_) => tracing::warn!("filter engine busy; auto filter skipped"),
            }));
        Ok(())
    }

    fn nav(&self) -> Result<&Rc<NavigationSynchronizer>> {
        self.nav.as_ref().ok_or(ExtError::NotInitialized)
    }

    fn set_ready_state(&mut self, state: ReadyState) {
        self.ready_state = state;
        tracing::debug!(%state, "ready state");
        self.ready_events.emit(&state);
    }
}

impl Drop for WikiExtension {
    fn drop(&mut self) {
        for subscription in self.subscriptions.drain(..) {
            subscription.unsubscribe();
        }
    }
}

impl fmt::Debug for WikiExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WikiExtension")
            .field("url", &self.url)
            .field("ready_state", &self.ready_state)
            .field("page", &self.page)
            .field("filters", &self.filter_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessPage;

    const ARTICLE: &str = "https://seesaawiki.jp/ssrb/d/songs";

    fn extension(page: &HeadlessPage, url: &str, config: ExtConfig) -> WikiExtension {
        WikiExtension::new(Rc::new(page.clone()), url, config)
    }

    #[test]
    fn lifecycle_publishes_states_in_order() {
        let page = HeadlessPage::new();
        let mut ext = extension(&page, ARTICLE, ExtConfig::default());
        let states = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&states);
        let _sub = ext.subscribe_ready_state(move |st| s.borrow_mut().push(*st));

        assert_eq!(ext.ready_state(), ReadyState::Initializing);
        ext.boot().unwrap();

        assert_eq!(*states.borrow(), vec![ReadyState::Initialized, ReadyState::Loaded]);
        assert_eq!(ext.ready_state(), ReadyState::Loaded);
    }

    #[test]
    fn init_twice_fails() {
        let page = HeadlessPage::new();
        let mut ext = extension(&page, ARTICLE, ExtConfig::default());
        ext.init().unwrap();
        assert!(matches!(ext.init(), Err(ExtError::AlreadyInitialized)));
    }

    #[test]
    fn setup_before_init_fails() {
        let page = HeadlessPage::new();
        let mut ext = extension(&page, ARTICLE, ExtConfig::default());
        assert!(matches!(ext.setup(), Err(ExtError::NotInitialized)));
        assert!(matches!(
            ext.hash_changed("https://seesaawiki.jp/ssrb/d/songs#x"),
            Err(ExtError::NotInitialized)
        ));
    }

    #[test]
    fn setup_twice_fails() {
        let page = HeadlessPage::new();
        let mut ext = extension(&page, ARTICLE, ExtConfig::default());
        ext.boot().unwrap();
        assert!(matches!(ext.setup(), Err(ExtError::AlreadyLoaded)));
    }

    #[test]
    fn stop_before_setup_leaves_page_untouched() {
        let page = HeadlessPage::new();
        page.add_filter_table(&[], &["a"]);
        let config = ExtConfig {
            stop_before_setup: true,
            ..ExtConfig::default()
        };
        let mut ext = extension(&page, ARTICLE, config);

        ext.boot().unwrap();
        assert_eq!(ext.ready_state(), ReadyState::Initialized);
        assert_eq!(ext.filter_count(), 0);
        assert_eq!(page.scroll_wraps(), 0);
    }

    #[test]
    fn non_article_pages_skip_table_setup() {
        let page = HeadlessPage::new();
        page.add_filter_table(&[], &["a"]);
        let mut ext = extension(
            &page,
            "https://seesaawiki.jp/w/ssrb/e/edit",
            ExtConfig::default(),
        );

        ext.boot().unwrap();
        assert_eq!(ext.page_info().unwrap().page_type, PageType::Edit);
        assert_eq!(ext.filter_count(), 0);
        assert_eq!(page.calendar_injections(), 0);
        assert_eq!(ext.ready_state(), ReadyState::Loaded);
    }

    #[test]
    fn article_setup_runs_hooks_and_binds_tables() {
        let page = HeadlessPage::new();
        page.add_filter_table(&[], &["a"]);
        page.add_filter_table(&["regex"], &["b"]);
        let mut ext = extension(&page, ARTICLE, ExtConfig::default());

        ext.boot().unwrap();
        assert_eq!(ext.filter_count(), 2);
        assert_eq!(page.scroll_wraps(), 1);
        assert_eq!(page.calendar_injections(), 1);
    }

    #[test]
    fn input_event_filters_bound_table() {
        let page = HeadlessPage::new();
        let (table, input) = page.add_filter_table(&[], &["Sword", "Axe"]);
        let mut ext = extension(&page, ARTICLE, ExtConfig::default());
        ext.boot().unwrap();

        input.type_text("ax");
        assert_eq!(ext.input_event(0), ApplyOutcome::Applied { visible: 1, hidden: 1 });
        assert_eq!(ext.input_event(0), ApplyOutcome::Unchanged);
        assert_eq!(table.visibility(), vec![false, true]);
    }

    #[test]
    fn input_event_while_engine_busy_is_dropped() {
        let page = HeadlessPage::new();
        let (table, input) = page.add_filter_table(&[], &["Sword", "Axe"]);
        let mut ext = extension(&page, ARTICLE, ExtConfig::default());
        ext.boot().unwrap();

        input.type_text("ax");
        let held = ext.filters.borrow_mut();
        assert_eq!(ext.input_event(0), ApplyOutcome::Dropped);
        drop(held);

        assert_eq!(table.scans(), 0);
        assert_eq!(ext.input_event(0), ApplyOutcome::Applied { visible: 1, hidden: 1 });
    }

    #[test]
    fn anchor_offset_comes_from_config() {
        let page = HeadlessPage::new();
        page.add_element("info", 300.0);
        let config = ExtConfig {
            anchor_offset_px: 100,
            ..ExtConfig::default()
        };
        let mut ext = extension(&page, &format!("{ARTICLE}#info"), config);
        ext.boot().unwrap();

        assert!(ext.dom_content_loaded().unwrap());
        assert_eq!(page.scrolls(), vec![(0.0, 200.0)]);
    }
}
