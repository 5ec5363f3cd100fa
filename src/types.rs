// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The values that flow between the record store, the index and the renderer.
//!
//! ```text
//! Post ──(build)──▶ Record ──(SiteIndex)──▶ Match ──(QueryRenderer)──▶ <li><a>
//! ```
//!
//! - `Record` is what a page needs to display a hit. Only `title` is rendered;
//!   `categories` and `content` exist so the index has something to search.
//! - `Match` is a reference into the store plus a relevance score. A list of
//!   matches is always in the order the index produced it.
//! - `SearchTerm` is the non-blank text extracted from the page location.
//!
//! Nothing here is mutable after construction.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Display metadata for one page of the site, keyed by its URL in the store.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Record {
    pub title: String,
    /// Comma-joined category list, e.g. `"rust, wasm"`.
    pub categories: String,
    /// Plain text with markup removed.
    pub content: String,
}

impl Record {
    pub fn new(
        title: impl Into<String>,
        categories: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Record {
            title: title.into(),
            categories: categories.into(),
            content: content.into(),
        }
    }
}

/// One search hit: the store key of the page and how well it matched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    #[serde(rename = "ref")]
    pub reference: String,
    pub score: f64,
}

impl Match {
    pub fn new(reference: impl Into<String>, score: f64) -> Self {
        Match {
            reference: reference.into(),
            score,
        }
    }
}

/// A search query taken from the page location.
///
/// Only constructed for terms with at least one non-whitespace character,
/// so holding a `SearchTerm` means there is something to search for. The
/// text is kept verbatim, surrounding whitespace included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Returns `None` for empty or whitespace-only input.
    ///
    /// Whitespace here is what a browser's `String.prototype.trim` strips,
    /// so the byte order mark counts as blank and U+0085 does not.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.chars().all(is_page_whitespace) {
            None
        } else {
            Some(SearchTerm(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// ECMAScript `WhiteSpace` and `LineTerminator` code points.
pub fn is_page_whitespace(c: char) -> bool {
    matches!(
        c,
        '\u{0009}'
            | '\u{000A}'
            | '\u{000B}'
            | '\u{000C}'
            | '\u{000D}'
            | '\u{0020}'
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

impl AsRef<str> for SearchTerm {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Searchable fields of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Title,
    Categories,
    Content,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Title, Field::Categories, Field::Content];

    pub fn name(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Categories => "categories",
            Field::Content => "content",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "title" => Some(Field::Title),
            "categories" | "category" => Some(Field::Categories),
            "content" => Some(Field::Content),
            _ => None,
        }
    }

    pub fn text(self, record: &Record) -> &str {
        match self {
            Field::Title => &record.title,
            Field::Categories => &record.categories,
            Field::Content => &record.content,
        }
    }
}
