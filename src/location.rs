// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Reading the search term out of the page location.
//!
//! The search page is reached through a plain GET form, so the term sits in
//! the query string: `/search/?query=rust+wasm`. The parameter may repeat
//! (`?query=rust&query=wasm`); every value is kept, in order, and the values
//! are joined with one space.
//!
//! Decoding follows `application/x-www-form-urlencoded`: `+` is a space and
//! percent escapes are decoded.

use crate::types::SearchTerm;
use url::{form_urlencoded, Url};

/// The raw query string of `location`, without the leading `?`.
///
/// `location` may be an absolute URL, a path with a query string, or just
/// the query string (`window.location.search`). Fragments are ignored.
pub fn query_string(location: &str) -> String {
    if let Ok(url) = Url::parse(location) {
        return url.query().unwrap_or_default().to_string();
    }

    let without_fragment = location.split('#').next().unwrap_or_default();
    match without_fragment.split_once('?') {
        Some((_, query)) => query.to_string(),
        None if without_fragment.contains('=') => without_fragment.to_string(),
        None => String::new(),
    }
}

/// All values bound to `param`, decoded, in encounter order.
pub fn param_values(location: &str, param: &str) -> Vec<String> {
    let query = query_string(location);
    form_urlencoded::parse(query.as_bytes())
        .filter(|(name, _)| name == param)
        .map(|(_, value)| value.into_owned())
        .collect()
}

/// The search term for this location, or `None` when there is nothing to
/// search for (parameter absent, empty, or whitespace).
pub fn search_term(location: &str, param: &str) -> Option<SearchTerm> {
    SearchTerm::new(param_values(location, param).join(" "))
}
