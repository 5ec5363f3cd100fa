// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The index provider: what the renderer asks for matches.
//!
//! The renderer only knows the `IndexProvider` trait. `SiteIndex` is the
//! implementation pages use; tests plug in fixed result lists instead.

pub mod fuzzy;
pub mod query;
mod site;
pub mod tokenize;

pub use site::SiteIndex;

use crate::types::{Match, Record};

/// Read-only full-text search over a record store.
///
/// Contract:
/// - `search` returns matches ordered by descending relevance. It may be
///   empty and never fails.
/// - `lookup` returns a record for every reference `search` has returned.
pub trait IndexProvider {
    fn search(&self, query: &str) -> Vec<Match>;

    fn lookup(&self, reference: &str) -> Option<&Record>;
}

impl<T: IndexProvider + ?Sized> IndexProvider for &T {
    fn search(&self, query: &str) -> Vec<Match> {
        (**self).search(query)
    }

    fn lookup(&self, reference: &str) -> Option<&Record> {
        (**self).lookup(reference)
    }
}
