//! Ranking: field boosts, BM25 saturation, and tie-breaking.

use crate::common::*;
use postfind::{FieldBoosts, IndexConfig, IndexProvider, SiteIndex};

fn refs(index: &SiteIndex, query: &str) -> Vec<String> {
    index.search(query).into_iter().map(|m| m.reference).collect()
}

#[test]
fn test_title_outranks_body() {
    let store = make_full_store(&[
        ("/body", "Notes", "", "compilers compilers compilers"),
        ("/title", "Compilers", "", "notes"),
    ]);
    let index = SiteIndex::build(store, &IndexConfig::default());
    assert_eq!(refs(&index, "compilers"), vec!["/title", "/body"]);
}

#[test]
fn test_equal_boosts_let_frequency_win() {
    let store = make_full_store(&[
        ("/body", "Notes", "", "compilers compilers compilers"),
        ("/title", "Compilers", "", "notes"),
    ]);
    let config = IndexConfig {
        boosts: FieldBoosts {
            title: 1.0,
            categories: 1.0,
            content: 1.0,
        },
        ..Default::default()
    };
    let index = SiteIndex::build(store, &config);
    assert_eq!(refs(&index, "compilers"), vec!["/body", "/title"]);
}

#[test]
fn test_categories_are_searchable() {
    let index = blog_index();
    let results = refs(&index, "web");
    assert_eq!(results.len(), 2);
    assert!(results.contains(&"/2023/08/wasm-in-the-browser/".to_string()));
    assert!(results.contains(&"/2024/01/static-sites/".to_string()));
}

#[test]
fn test_more_matching_terms_rank_higher() {
    let index = blog_index();
    let results = refs(&index, "rust borrow");
    assert_eq!(results[0], "/2024/03/borrow-checker/");
}

#[test]
fn test_ties_break_by_reference() {
    let store = make_store(&[("/c", "Same"), ("/a", "Same"), ("/b", "Same")]);
    let index = SiteIndex::build(store, &IndexConfig::default());
    let results = index.search("same");
    assert_eq!(results.len(), 3);
    assert!(results.windows(2).all(|w| w[0].score == w[1].score));
    let order: Vec<&str> = results.iter().map(|m| m.reference.as_str()).collect();
    assert_eq!(order, vec!["/a", "/b", "/c"]);
}

#[test]
fn test_scores_are_positive_and_descending() {
    let index = blog_index();
    let results = index.search("rust browser static");
    assert!(!results.is_empty());
    assert!(results.iter().all(|m| m.score > 0.0));
    assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
}

#[test]
fn test_diacritics_are_folded() {
    let store = make_full_store(&[("/cafe", "Café Culture", "", "")]);
    let index = SiteIndex::build(store, &IndexConfig::default());
    assert_eq!(refs(&index, "cafe"), vec!["/cafe"]);
    assert_eq!(refs(&index, "CAFÉ"), vec!["/cafe"]);
}

#[test]
fn test_every_result_resolves() {
    let index = blog_index();
    for m in index.search("the browser rust web static site") {
        assert!(index.lookup(&m.reference).is_some(), "{}", m.reference);
    }
}
