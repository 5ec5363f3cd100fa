// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Rendering search results into the page.
//!
//! ```text
//! location ──▶ search_term ──▶ provider.search ──▶ heading + <ul> of links
//!                  │                 │
//!                blank              empty
//!                  ▼                 ▼
//!              (no change)   "No results found."
//! ```
//!
//! Every element the flow needs is looked up before the first mutation, so a
//! `MissingElement` failure leaves the page exactly as it was.

use crate::config::SiteConfig;
use crate::dom::{find_element, Dom};
use crate::error::SearchError;
use crate::index::IndexProvider;
use crate::location::search_term;
use crate::store::describe;
use crate::types::{Match, SearchTerm};
use log::{debug, warn};
use serde_json::Value;

/// What `on_page_load` did to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// No search term; the page was not touched.
    Skipped,
    /// The heading now reads the no-results label.
    NoResults,
    /// The heading reads the results label and a list of `count` links was appended.
    Results { count: usize },
}

/// A string that is allowed to become element text.
///
/// Rust callers build one from any string. Values from JSON or JavaScript go
/// through `TryFrom`, which is where non-strings are rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayText(String);

impl DisplayText {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DisplayText {
    fn from(text: &str) -> Self {
        DisplayText(text.to_string())
    }
}

impl From<String> for DisplayText {
    fn from(text: String) -> Self {
        DisplayText(text)
    }
}

impl TryFrom<&Value> for DisplayText {
    type Error = SearchError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(DisplayText(s.clone())),
            other => Err(SearchError::invalid(
                "display text",
                "a string",
                describe(other),
            )),
        }
    }
}

/// Set an element's text and make it visible (`display: block`).
pub fn set_text_and_display<D: Dom + ?Sized>(dom: &mut D, element: &D::Element, text: &DisplayText) {
    dom.set_text(element, text.as_str());
    dom.set_style(element, "display", "block");
}

/// `set_text_and_display` for an untyped value. Non-strings are rejected
/// before the element is touched.
pub fn set_value_and_display<D: Dom + ?Sized>(
    dom: &mut D,
    element: &D::Element,
    value: &Value,
) -> Result<(), SearchError> {
    let text = DisplayText::try_from(value)?;
    set_text_and_display(dom, element, &text);
    Ok(())
}

/// Drives one page load: read the term, search, write the results.
pub struct QueryRenderer<'a, P> {
    config: &'a SiteConfig,
    provider: P,
}

impl<'a, P: IndexProvider> QueryRenderer<'a, P> {
    pub fn new(config: &'a SiteConfig, provider: P) -> Self {
        QueryRenderer { config, provider }
    }

    pub fn config(&self) -> &SiteConfig {
        self.config
    }

    /// Render results for the term carried by `location`.
    ///
    /// `location` is anything `location::query_string` understands: a full
    /// URL, a path with a query string, or `window.location.search`.
    pub fn on_page_load<D: Dom + ?Sized>(
        &self,
        dom: &mut D,
        location: &str,
    ) -> Result<RenderOutcome, SearchError> {
        match search_term(location, &self.config.query_param) {
            Some(term) => self.render_term(dom, &term),
            None => {
                debug!("no '{}' parameter in {:?}", self.config.query_param, location);
                Ok(RenderOutcome::Skipped)
            }
        }
    }

    /// Search for `term` and write the outcome into `dom`.
    pub fn render_term<D: Dom + ?Sized>(
        &self,
        dom: &mut D,
        term: &SearchTerm,
    ) -> Result<RenderOutcome, SearchError> {
        let heading = find_element(dom, &self.config.heading_id)?;
        let matches = self.provider.search(term.as_str());
        debug!("query {:?}: {} matches", term.as_str(), matches.len());

        if matches.is_empty() {
            let label = DisplayText::from(self.config.no_results_label.as_str());
            set_text_and_display(dom, &heading, &label);
            return Ok(RenderOutcome::NoResults);
        }

        let parent = dom.parent_element(&heading).ok_or_else(|| {
            SearchError::missing(format!("parent of #{}", self.config.heading_id))
        })?;

        let label = DisplayText::from(self.config.results_label.as_str());
        set_text_and_display(dom, &heading, &label);

        let list = self.build_list(dom, &matches);
        dom.append_child(&parent, &list);

        Ok(RenderOutcome::Results {
            count: matches.len(),
        })
    }

    /// A detached `<ul>` with one `<li><a href=ref>title</a></li>` per match.
    fn build_list<D: Dom + ?Sized>(&self, dom: &mut D, matches: &[Match]) -> D::Element {
        let list = dom.create_element("ul");
        for m in matches {
            let label = match self.provider.lookup(&m.reference) {
                Some(record) => record.title.as_str(),
                None => {
                    warn!("no record for matched ref '{}'", m.reference);
                    m.reference.as_str()
                }
            };

            let item = dom.create_element("li");
            let link = dom.create_element("a");
            dom.set_attribute(&link, "href", &m.reference);
            dom.set_text(&link, label);
            dom.append_child(&item, &link);
            dom.append_child(&list, &item);
        }
        list
    }
}
