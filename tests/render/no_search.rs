//! Without a search term the page must come out byte-for-byte unchanged.

use crate::common::*;
use postfind::RenderOutcome;

#[test]
fn test_absent_parameter_is_skipped() {
    let index = blog_index();
    for location in [
        "",
        "/search/",
        "https://blog.example/search/",
        "/search/?q=rust",
        "/search/#query=rust",
    ] {
        let (doc, outcome) = render(&index, location);
        assert_eq!(outcome.unwrap(), RenderOutcome::Skipped, "{location}");
        assert_eq!(doc.mutation_count(), 0, "{location}");
    }
}

#[test]
fn test_blank_values_are_skipped() {
    let index = blog_index();
    for location in ["?query=", "?query=+", "?query=%20%09", "?query=&query="] {
        let (doc, outcome) = render(&index, location);
        assert_eq!(outcome.unwrap(), RenderOutcome::Skipped, "{location}");
        assert_eq!(doc.mutation_count(), 0, "{location}");
    }
}

#[test]
fn test_skipped_page_serializes_identically() {
    let index = blog_index();
    let untouched = postfind::MemoryDocument::parse(BLOG_PAGE).to_html();
    let (doc, _) = render(&index, "/search/");
    assert_eq!(doc.to_html(), untouched);
    assert_eq!(heading_text(&doc), "Results");
    assert_eq!(heading_display(&doc).as_deref(), Some("none"));
}

#[test]
fn test_blank_term_skips_even_without_heading() {
    // Nothing is looked up when there is nothing to search for.
    let index = blog_index();
    let (doc, outcome) = render_with(
        &index,
        &Default::default(),
        "<html><body><p>no heading here</p></body></html>",
        "?query=",
    );
    assert_eq!(outcome.unwrap(), RenderOutcome::Skipped);
    assert_eq!(doc.mutation_count(), 0);
}

#[test]
fn test_blankness_follows_browser_trim() {
    let index = blog_index();

    let (doc, outcome) = render(&index, "?query=%EF%BB%BF");
    assert_eq!(outcome.unwrap(), RenderOutcome::Skipped);
    assert_eq!(doc.mutation_count(), 0);

    // U+0085 survives a browser trim, so the page searches and finds nothing.
    let (doc, outcome) = render(&index, "?query=%C2%85");
    assert_eq!(outcome.unwrap(), RenderOutcome::NoResults);
    assert_eq!(heading_text(&doc), "No results found.");
}
