//! The same store and query always give the same results.

use crate::common::*;
use postfind::{IndexProvider, RecordStore, SiteIndex};

#[test]
fn test_repeated_queries_are_identical() {
    let index = blog_index();
    for query in ["rust", "web browser", "borrow*", "rust~1", "+rust -web"] {
        assert_eq!(index.search(query), index.search(query), "{query}");
    }
}

#[test]
fn test_rebuilt_index_gives_same_results() {
    let store = blog_store();
    let json = store.to_json().unwrap();
    let reloaded = RecordStore::from_json_str(&json).unwrap();

    let a = SiteIndex::build(store, &Default::default());
    let b = SiteIndex::build(reloaded, &Default::default());
    for query in ["rust", "static site", "browser", "lifetimes"] {
        assert_eq!(a.search(query), b.search(query), "{query}");
    }
}
