//! A page without the results heading is a markup error and must not be
//! partially modified.

use crate::common::*;
use postfind::{Dom, MemoryDocument, QueryRenderer, SearchError, SiteConfig};

const NO_HEADING: &str = r#"<html><body><div class="content"><h2 id="other">x</h2></div></body></html>"#;

#[test]
fn test_missing_heading_with_matches() {
    let index = blog_index();
    let (doc, outcome) = render_with(&index, &SiteConfig::default(), NO_HEADING, "?query=rust");
    assert_eq!(
        outcome.unwrap_err(),
        SearchError::MissingElement {
            id: "search-results-h".to_string()
        }
    );
    assert_eq!(doc.mutation_count(), 0);
    assert!(doc.elements_by_tag("ul").is_empty());
}

#[test]
fn test_missing_heading_without_matches() {
    let index = blog_index();
    let (doc, outcome) = render_with(&index, &SiteConfig::default(), NO_HEADING, "?query=xyz");
    assert!(matches!(outcome, Err(SearchError::MissingElement { .. })));
    assert_eq!(doc.mutation_count(), 0);
}

#[test]
fn test_heading_id_is_configurable() {
    let index = blog_index();
    let config = SiteConfig {
        heading_id: "other".to_string(),
        ..Default::default()
    };
    let (doc, outcome) = render_with(&index, &config, NO_HEADING, "?query=rust");
    assert!(outcome.is_ok());
    let heading = doc.element_by_id("other").unwrap();
    assert_eq!(doc.text_content(heading), "Results:");
}

#[test]
fn test_orphan_heading_with_matches_is_untouched() {
    let index = blog_index();
    let config = SiteConfig::default();
    let mut doc = MemoryDocument::new();
    let root = doc.root();
    let heading = doc.append_element(root, "h2");
    doc.set_attribute(&heading, "id", "search-results-h");
    let before = doc.mutation_count();

    let err = QueryRenderer::new(&config, &index)
        .on_page_load(&mut doc, "?query=rust")
        .unwrap_err();
    assert!(err.to_string().contains("search-results-h"), "{err}");
    assert_eq!(doc.mutation_count(), before);
    assert_eq!(doc.text_content(heading), "");
}

#[test]
fn test_error_message_names_element() {
    let err = SearchError::missing("search-results-h");
    assert_eq!(err.to_string(), "unable to locate element 'search-results-h'");
}
