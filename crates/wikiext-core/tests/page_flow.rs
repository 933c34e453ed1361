//! Integration tests: whole-page flows against the headless page.
//!
//! Boots the extension on an in-memory page, feeds it navigations and input
//! events, and checks params, anchor jumps and row visibility.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use wikiext_core::config::ExtConfig;
use wikiext_core::filter::{ApplyOutcome, AutoFilterBridge, FilterEngine};
use wikiext_core::headless::{HeadlessPage, HeadlessTable};
use wikiext_core::nav::NavigationSynchronizer;
use wikiext_core::{ReadyState, WikiExtension};

const SONGS: &[&str] = &[
    "Sword Dance / 2021",
    "Moonlight / 2020",
    "sword of the morning / 2022",
    "Axe Waltz / 2019",
];

fn boot(page: &HeadlessPage, url: &str) -> WikiExtension {
    let mut ext = WikiExtension::new(Rc::new(page.clone()), url, ExtConfig::default());
    ext.boot().expect("boot");
    ext
}

#[test]
fn keyword_url_filters_listed_tables() {
    let url = "https://example.test/page#info?keyword=Sword&order=0,1";
    let nav = NavigationSynchronizer::new(url).unwrap();
    let params = nav.current();

    let expected: BTreeMap<String, String> = [("keyword", "Sword"), ("order", "0,1")]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    assert_eq!(params.entries(), &expected);
    assert_eq!(params.fragment(), "#info");

    let page = HeadlessPage::new();
    let (t0, i0) = page.add_filter_table(&[], SONGS);
    let (t1, i1) = page.add_filter_table(&[], SONGS);
    let (t2, i2) = page.add_filter_table(&[], SONGS);
    let mut engine = FilterEngine::new();
    engine.bind_document(&page);

    AutoFilterBridge::default().apply(&params, &mut engine);

    for (table, input) in [(&t0, &i0), (&t1, &i1)] {
        assert!(table.has_class_now("regex"));
        assert_eq!(input.current(), "Sword");
        assert_eq!(table.visibility(), vec![true, false, true, false]);
    }
    assert!(engine.binding(0).unwrap().regex_mode());
    assert!(engine.binding(1).unwrap().regex_mode());
    assert!(!engine.binding(2).unwrap().regex_mode());
    assert_eq!(i2.current(), "");
    assert_eq!(t2.visibility(), vec![true; 4]);
}

#[test]
fn keyword_url_filters_on_boot() {
    let page = HeadlessPage::new();
    let (t0, _) = page.add_filter_table(&[], SONGS);
    let (t1, _) = page.add_filter_table(&[], SONGS);

    let ext = boot(
        &page,
        "https://seesaawiki.jp/ssrb/d/songs#info?keyword=Sword&order=1",
    );

    assert_eq!(ext.ready_state(), ReadyState::Loaded);
    assert_eq!(t0.visibility(), vec![true; 4]);
    assert_eq!(t1.visible_rows(), vec![SONGS[0], SONGS[2]]);
}

#[test]
fn fragment_navigation_emits_once_and_jumps_once() {
    let page = HeadlessPage::new();
    page.add_element("a", 100.0);
    page.add_element("b", 800.0);
    page.set_live_fragment("#a");

    let ext = boot(&page, "https://seesaawiki.jp/ssrb/d/top#a");
    // The browser already shows #a, so the initial jump is skipped.
    assert!(!ext.dom_content_loaded().unwrap());
    assert!(page.anchor_lookups().is_empty());

    let changes = Rc::new(RefCell::new(Vec::new()));
    let c = Rc::clone(&changes);
    let _sub = ext
        .subscribe_params(move |change| {
            c.borrow_mut()
                .push((change.params.entries().clone(), change.fragment().to_string()));
        })
        .unwrap();

    page.set_live_fragment("#b?x=1");
    assert!(ext.hash_changed("https://seesaawiki.jp/ssrb/d/top#b?x=1").unwrap());

    let changes = changes.borrow();
    assert_eq!(changes.len(), 1);
    let mut expected = BTreeMap::new();
    expected.insert("x".to_string(), "1".to_string());
    assert_eq!(changes[0], (expected, "#b".to_string()));

    assert_eq!(page.anchor_lookups(), vec!["b".to_string()]);
    assert_eq!(page.scrolls(), vec![(0.0, 760.0)]);
}

#[test]
fn initial_jump_uses_retained_fragment() {
    let page = HeadlessPage::new();
    page.add_named_anchor("info", 400.0);
    page.set_live_fragment("#info?keyword=x");

    let ext = boot(&page, "https://seesaawiki.jp/ssrb/d/top#info?keyword=x");
    assert!(ext.dom_content_loaded().unwrap());
    assert_eq!(page.scrolls(), vec![(0.0, 360.0)]);
}

#[test]
fn navigation_with_new_keyword_refilters() {
    let page = HeadlessPage::new();
    let (table, input) = page.add_filter_table(&[], SONGS);
    let ext = boot(&page, "https://seesaawiki.jp/ssrb/d/songs#list?keyword=sword");
    assert_eq!(table.visible_rows(), vec![SONGS[0], SONGS[2]]);

    ext.hash_changed("https://seesaawiki.jp/ssrb/d/songs#list?keyword=waltz|moon")
        .unwrap();
    assert_eq!(input.current(), "waltz|moon");
    assert_eq!(table.visible_rows(), vec![SONGS[1], SONGS[3]]);

    // No keyword: the current filter stays as it is.
    ext.hash_changed("https://seesaawiki.jp/ssrb/d/songs#list").unwrap();
    assert_eq!(table.visible_rows(), vec![SONGS[1], SONGS[3]]);
    assert_eq!(table.filtered_notifications(), 2);
}

#[test]
fn same_keyword_navigation_does_not_rescan() {
    let page = HeadlessPage::new();
    let (table, _) = page.add_filter_table(&[], SONGS);
    let ext = boot(&page, "https://seesaawiki.jp/ssrb/d/songs#a?keyword=sword");
    ext.hash_changed("https://seesaawiki.jp/ssrb/d/songs#b?keyword=sword")
        .unwrap();
    assert_eq!(table.scans(), 1);
}

#[test]
fn invalid_keyword_regex_keeps_rows_visible() {
    let page = HeadlessPage::new();
    let (table, _) = page.add_filter_table(&[], SONGS);
    let _ext = boot(&page, "https://seesaawiki.jp/ssrb/d/songs#a?keyword=%28sword");

    assert_eq!(table.visibility(), vec![true; 4]);
    assert_eq!(table.scans(), 0);
    assert_eq!(table.filtered_notifications(), 0);
}

#[test]
fn user_typing_after_auto_filter_stays_in_regex_mode() {
    let page = HeadlessPage::new();
    let (table, input) = page.add_filter_table(&[], SONGS);
    let ext = boot(&page, "https://seesaawiki.jp/ssrb/d/songs?keyword=sword");

    input.type_text("^(moon|axe)");
    ext.input_event(0);
    assert_eq!(table.visible_rows(), vec![SONGS[1], SONGS[3]]);
}

#[test]
fn plain_tables_without_inputs_are_left_alone() {
    let page = HeadlessPage::new();
    let lonely = HeadlessTable::new(&["filter"], SONGS);
    page.add_table(&lonely);
    let ext = boot(&page, "https://seesaawiki.jp/ssrb/d/songs?keyword=sword");

    assert_eq!(ext.filter_count(), 0);
    assert_eq!(lonely.visibility(), vec![true; 4]);
}

#[test]
fn order_and_input_events_address_tables_by_ordinal() {
    let page = HeadlessPage::new();
    let orphan = HeadlessTable::new(&["filter"], &["Sword", "Axe"]);
    page.add_table(&orphan);
    let (table, input) = page.add_filter_table(&[], &["Sword", "Axe"]);

    let ext = boot(&page, "https://seesaawiki.jp/ssrb/d/songs#a?keyword=axe&order=1");
    assert_eq!(ext.filter_count(), 1);
    assert_eq!(input.current(), "axe");
    assert_eq!(table.visibility(), vec![false, true]);

    input.type_text("sword");
    assert_eq!(
        ext.input_event(1),
        ApplyOutcome::Applied {
            visible: 1,
            hidden: 1
        }
    );
    assert_eq!(table.visibility(), vec![true, false]);

    // Table 0 has no input, so order=0 targets nothing.
    ext.hash_changed("https://seesaawiki.jp/ssrb/d/songs#a?keyword=sword&order=0")
        .unwrap();
    assert_eq!(orphan.visibility(), vec![true, true]);
    assert_eq!(orphan.scans(), 0);
    assert_eq!(table.visibility(), vec![true, false]);
}
