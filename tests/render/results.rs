//! Matches become a list of links appended after the heading's siblings.

use crate::common::*;
use postfind::{IndexProvider, RenderOutcome, SiteIndex};

#[test]
fn test_two_post_store_example() {
    let store = make_store(&[("/p1", "Post One"), ("/p2", "Post Two")]);
    let index = SiteIndex::build(store, &Default::default());

    let (doc, outcome) = render(&index, "?query=one");
    assert_eq!(outcome.unwrap(), RenderOutcome::Results { count: 1 });
    assert_eq!(heading_text(&doc), "Results:");
    assert_eq!(heading_display(&doc).as_deref(), Some("block"));

    let lists = result_lists(&doc);
    assert_eq!(lists.len(), 1);
    assert_eq!(
        list_links(&doc, lists[0]),
        vec![("/p1".to_string(), "Post One".to_string())]
    );
}

#[test]
fn test_list_is_last_child_of_heading_parent() {
    let index = blog_index();
    let (doc, _) = render(&index, "?query=rust");

    let content = doc.elements_by_tag("div")[0];
    let last = doc.last_child_element(content).unwrap();
    assert_eq!(doc.tag(last), Some("ul"));

    // The footer stays after the content column.
    let body = doc.body().unwrap();
    let footer = doc.last_child_element(body).unwrap();
    assert_eq!(doc.tag(footer), Some("footer"));
}

#[test]
fn test_items_mirror_provider_order() {
    let index = blog_index();
    let matches = index.search("rust");
    assert!(matches.len() >= 2);

    let (doc, outcome) = render(&index, "?query=rust");
    assert_eq!(
        outcome.unwrap(),
        RenderOutcome::Results {
            count: matches.len()
        }
    );

    let links = list_links(&doc, result_lists(&doc)[0]);
    let expected: Vec<(String, String)> = matches
        .iter()
        .map(|m| {
            (
                m.reference.clone(),
                index.lookup(&m.reference).unwrap().title.clone(),
            )
        })
        .collect();
    assert_eq!(links, expected);
}

#[test]
fn test_static_provider_order_is_kept() {
    let store = make_store(&[("/a", "A"), ("/b", "B"), ("/c", "C")]);
    let provider = StaticProvider::new(store, &[("/b", 0.1), ("/c", 9.0), ("/a", 3.0)]);
    let config = postfind::SiteConfig::default();
    let mut doc = postfind::MemoryDocument::parse(BLOG_PAGE);

    postfind::QueryRenderer::new(&config, &provider)
        .on_page_load(&mut doc, "?query=x")
        .unwrap();

    let hrefs: Vec<String> = list_links(&doc, result_lists(&doc)[0])
        .into_iter()
        .map(|(href, _)| href)
        .collect();
    assert_eq!(hrefs, vec!["/b", "/c", "/a"]);
}

#[test]
fn test_title_boost_puts_title_hits_first() {
    let index = blog_index();
    let (doc, _) = render(&index, "?query=browser");
    let links = list_links(&doc, result_lists(&doc)[0]);
    assert_eq!(links[0].0, "/2023/08/wasm-in-the-browser/");
    assert_eq!(links.len(), 2);
}

#[test]
fn test_markup_in_titles_is_rendered_as_text() {
    let store = make_store(&[("/x", "<img src=x onerror=alert(1)> & friends")]);
    let index = SiteIndex::build(store, &Default::default());
    let (doc, _) = render(&index, "?query=friends");

    assert!(doc.elements_by_tag("img").is_empty());
    let list = result_lists(&doc)[0];
    assert_eq!(
        list_links(&doc, list)[0].1,
        "<img src=x onerror=alert(1)> & friends"
    );
}

#[test]
fn test_rendering_twice_appends_two_lists() {
    let index = blog_index();
    let config = postfind::SiteConfig::default();
    let renderer = postfind::QueryRenderer::new(&config, &index);
    let mut doc = postfind::MemoryDocument::parse(BLOG_PAGE);

    renderer.on_page_load(&mut doc, "?query=rust").unwrap();
    renderer.on_page_load(&mut doc, "?query=rust").unwrap();
    assert_eq!(result_lists(&doc).len(), 2);
}

#[test]
fn test_serialized_output_contains_links() {
    let index = blog_index();
    let (doc, _) = render(&index, "?query=lifetimes");
    let html = doc.to_html();
    assert!(html.contains(
        r#"<ul><li><a href="/2024/03/borrow-checker/">Fighting the Borrow Checker</a></li></ul>"#
    ));
    assert!(html.contains(r#"style="display: block;""#));
}
