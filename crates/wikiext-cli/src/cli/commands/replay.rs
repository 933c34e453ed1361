//! Replay command: boot a headless page and apply navigations to it.

use anyhow::Result;
use std::path::PathBuf;
use std::rc::Rc;
use wikiext_core::config::ExtConfig;
use wikiext_core::headless::{HeadlessPage, HeadlessTable};
use wikiext_core::WikiExtension;

use super::read_rows;

pub fn run_replay(
    cfg: &ExtConfig,
    url: &str,
    tables: &[PathBuf],
    navigations: &[String],
) -> Result<()> {
    let page = HeadlessPage::new();
    let mut handles = Vec::with_capacity(tables.len());
    for path in tables {
        let rows = read_rows(path)?;
        let (table, _input) = page.add_filter_table(&[], &rows);
        handles.push(table);
    }

    let mut ext = WikiExtension::new(Rc::new(page.clone()), url, cfg.clone());
    ext.boot()?;
    ext.dom_content_loaded()?;
    if let Some(info) = ext.page_info() {
        println!("page: {:?} (wiki {:?})", info.page_type, info.wiki_id);
    }
    print_step(&ext, url, &handles, &page);

    for next in navigations {
        ext.hash_changed(next)?;
        print_step(&ext, next, &handles, &page);
    }
    Ok(())
}

fn print_step(ext: &WikiExtension, url: &str, tables: &[HeadlessTable], page: &HeadlessPage) {
    println!("== {url}");
    if let Some(params) = ext.params() {
        println!(
            "params: {} fragment: {:?}",
            params.to_query_string(),
            params.fragment()
        );
    }
    if let Some((x, y)) = page.scrolls().last() {
        println!("scroll: ({x}, {y})");
    }
    for (index, table) in tables.iter().enumerate() {
        let rows = table.visible_rows();
        println!(
            "table {index}: {}/{} visible",
            rows.len(),
            table.visibility().len()
        );
        for row in rows {
            println!("  {row}");
        }
    }
}
