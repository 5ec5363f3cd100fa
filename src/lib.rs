// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Full-text search for static sites.
//!
//! At build time, post files become a record store: a JSON lookup table from
//! page URL to `{ title, categories, content }`. At page load, the search page
//! reads `?query=` from its URL, ranks the records, and writes either a list
//! of links or a "No results found." message under its results heading.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────────┐
//! │  build/     │────▶│  store.rs    │────▶│  index/          │
//! │ (manifest,  │     │ (RecordStore,│     │ (SiteIndex, BM25,│
//! │  posts)     │     │  checksum)   │     │  query syntax)   │
//! └─────────────┘     └──────────────┘     └──────────────────┘
//!                                                   │ IndexProvider
//!                                                   ▼
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────────┐
//! │ location.rs │────▶│  render.rs   │────▶│  dom/            │
//! │ (?query=)   │     │(QueryRenderer│     │ (Dom trait,      │
//! │             │     │ on_page_load)│     │  MemoryDocument) │
//! └─────────────┘     └──────────────┘     └──────────────────┘
//!                            ▲
//!                            │
//!                  runtime/wasm.rs (browser DOM, SiteSearch)
//! ```
//!
//! # Usage
//!
//! ```
//! use postfind::{MemoryDocument, QueryRenderer, RecordStore, RenderOutcome, SiteConfig, SiteIndex};
//!
//! let store = RecordStore::from_json_str(
//!     r#"{"/p1": {"title": "Post One"}, "/p2": {"title": "Post Two"}}"#,
//! ).unwrap();
//! let config = SiteConfig::default();
//! let index = SiteIndex::build(store, &config.index);
//!
//! let mut page = MemoryDocument::parse(
//!     r#"<main><h1 id="search-results-h" style="display: none"></h1></main>"#,
//! );
//! let outcome = QueryRenderer::new(&config, &index)
//!     .on_page_load(&mut page, "/search/?query=one")
//!     .unwrap();
//! assert_eq!(outcome, RenderOutcome::Results { count: 1 });
//! ```

pub mod build;
pub mod config;
pub mod dom;
pub mod error;
pub mod index;
pub mod location;
pub mod render;
pub mod runtime;
pub mod store;
pub mod testing;
pub mod types;
pub mod util;

// Re-exports for public API
pub use config::{FieldBoosts, IndexConfig, SiteConfig};
pub use dom::{find_element, Dom, MemoryDocument, NodeId};
pub use error::{SearchError, StoreError};
pub use index::{IndexProvider, SiteIndex};
pub use location::search_term;
pub use render::{set_text_and_display, DisplayText, QueryRenderer, RenderOutcome};
pub use store::{RecordStore, StoreShape, STORE_VERSION};
pub use types::{Field, Match, Record, SearchTerm};

#[cfg(feature = "wasm")]
pub use runtime::wasm::SiteSearch;
