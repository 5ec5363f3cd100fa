//! Query syntax: presence, field scoping, wildcards, fuzzy terms, boosts.

use crate::common::*;
use postfind::IndexProvider;

fn refs(query: &str) -> Vec<String> {
    blog_index()
        .search(query)
        .into_iter()
        .map(|m| m.reference)
        .collect()
}

#[test]
fn test_required_terms_intersect() {
    assert_eq!(refs("+rust +lifetimes"), vec!["/2024/03/borrow-checker/"]);
}

#[test]
fn test_prohibited_terms_exclude() {
    let results = refs("rust -lifetimes");
    assert!(!results.is_empty());
    assert!(!results.contains(&"/2024/03/borrow-checker/".to_string()));
}

#[test]
fn test_only_prohibited_returns_nothing() {
    assert!(refs("-rust").is_empty());
}

#[test]
fn test_field_scope() {
    assert_eq!(refs("title:static"), vec!["/2024/01/static-sites/"]);
    // "browser" appears in one title and one body.
    assert_eq!(refs("content:browser"), vec!["/2024/01/static-sites/"]);
    assert_eq!(refs("categories:languages"), vec!["/2023/05/rust-ownership/"]);
}

#[test]
fn test_unknown_field_matches_nothing() {
    assert!(refs("author:rust").is_empty());
}

#[test]
fn test_prefix_wildcard() {
    let results = refs("own*");
    assert_eq!(results, vec!["/2023/05/rust-ownership/"]);
    assert_eq!(refs("webassem*"), vec!["/2023/08/wasm-in-the-browser/"]);
}

#[test]
fn test_fuzzy_terms() {
    assert_eq!(refs("ownrship~1"), vec!["/2023/05/rust-ownership/"]);
    assert!(refs("ownrship").is_empty());
}

#[test]
fn test_boost_reorders() {
    let plain = refs("ownership lifetimes");
    let boosted = refs("ownership lifetimes^20");
    assert_eq!(plain.len(), 2);
    assert_eq!(boosted[0], "/2024/03/borrow-checker/");
}

#[test]
fn test_exact_beats_expansion() {
    let store = make_store(&[("/exact", "borrow"), ("/longer", "borrowing")]);
    let index = postfind::SiteIndex::build(store, &Default::default());
    let results = index.search("borrow*");
    assert_eq!(results[0].reference, "/exact");
    assert!(results[0].score > results[1].score);
}
