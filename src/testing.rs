// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical implementations of test helpers to avoid duplication.

#![doc(hidden)]

use crate::index::IndexProvider;
use crate::store::RecordStore;
use crate::types::{Match, Record};

/// A record with every field set.
pub fn make_record(title: &str, categories: &str, content: &str) -> Record {
    Record::new(title, categories, content)
}

/// A store of `(ref, title)` pairs with empty categories and content.
///
/// Panics on duplicate refs; fixtures are expected to be well formed.
pub fn make_store(posts: &[(&str, &str)]) -> RecordStore {
    RecordStore::from_records(
        posts
            .iter()
            .map(|(reference, title)| (reference.to_string(), Record::new(*title, "", ""))),
    )
    .expect("fixture refs are unique")
}

/// A store of `(ref, title, categories, content)` tuples.
pub fn make_full_store(posts: &[(&str, &str, &str, &str)]) -> RecordStore {
    RecordStore::from_records(posts.iter().map(|(reference, title, categories, content)| {
        (
            reference.to_string(),
            Record::new(*title, *categories, *content),
        )
    }))
    .expect("fixture refs are unique")
}

/// A provider that ignores the query and answers with a fixed match list.
///
/// Lets renderer tests pin the exact order and contents of the results.
#[derive(Debug, Clone)]
pub struct StaticProvider {
    store: RecordStore,
    matches: Vec<Match>,
}

impl StaticProvider {
    pub fn new(store: RecordStore, matches: &[(&str, f64)]) -> Self {
        StaticProvider {
            store,
            matches: matches
                .iter()
                .map(|(reference, score)| Match::new(*reference, *score))
                .collect(),
        }
    }

    /// A provider that never matches anything.
    pub fn empty(store: RecordStore) -> Self {
        StaticProvider {
            store,
            matches: Vec::new(),
        }
    }
}

impl IndexProvider for StaticProvider {
    fn search(&self, _query: &str) -> Vec<Match> {
        self.matches.clone()
    }

    fn lookup(&self, reference: &str) -> Option<&Record> {
        self.store.get(reference)
    }
}

/// The smallest page the renderer accepts: a heading inside a container.
pub const MINIMAL_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Search</title></head>
<body>
  <main id="main">
    <h1 id="search-results-h" style="display: none"></h1>
  </main>
</body>
</html>"#;
