//! A search that matches nothing shows the no-results label and no list.

use crate::common::*;
use postfind::{RenderOutcome, SiteConfig};

#[test]
fn test_unknown_word_shows_no_results() {
    let index = blog_index();
    let (doc, outcome) = render(&index, "/search/?query=xyz");
    assert_eq!(outcome.unwrap(), RenderOutcome::NoResults);
    assert_eq!(heading_text(&doc), "No results found.");
    assert_eq!(heading_display(&doc).as_deref(), Some("block"));
    assert!(result_lists(&doc).is_empty());
    assert!(doc.elements_by_tag("ul").is_empty());
}

#[test]
fn test_stop_words_only_shows_no_results() {
    let index = blog_index();
    let (doc, outcome) = render(&index, "?query=the+and+of");
    assert_eq!(outcome.unwrap(), RenderOutcome::NoResults);
    assert_eq!(heading_text(&doc), "No results found.");
}

#[test]
fn test_excluded_everything_shows_no_results() {
    let index = blog_index();
    let (doc, outcome) = render(&index, "?query=%2Brust+-rust");
    assert_eq!(outcome.unwrap(), RenderOutcome::NoResults);
    assert!(result_lists(&doc).is_empty());
}

#[test]
fn test_empty_store_shows_no_results() {
    let index = postfind::SiteIndex::build(make_store(&[]), &Default::default());
    let (doc, outcome) = render(&index, "?query=anything");
    assert_eq!(outcome.unwrap(), RenderOutcome::NoResults);
    assert_eq!(heading_text(&doc), "No results found.");
}

#[test]
fn test_no_results_label_is_configurable() {
    let index = blog_index();
    let config = SiteConfig {
        no_results_label: "Nichts gefunden.".to_string(),
        ..Default::default()
    };
    let (doc, _) = render_with(&index, &config, BLOG_PAGE, "?query=xyz");
    assert_eq!(heading_text(&doc), "Nichts gefunden.");
}

#[test]
fn test_no_results_does_not_need_a_parent() {
    // The parent is only needed to attach a list.
    let index = blog_index();
    let mut doc = postfind::MemoryDocument::new();
    let root = doc.root();
    let heading = doc.append_element(root, "h2");
    postfind::Dom::set_attribute(&mut doc, &heading, "id", "search-results-h");

    let config = SiteConfig::default();
    let outcome = postfind::QueryRenderer::new(&config, &index)
        .on_page_load(&mut doc, "?query=xyz")
        .unwrap();
    assert_eq!(outcome, RenderOutcome::NoResults);
    assert_eq!(doc.text_content(heading), "No results found.");
}
