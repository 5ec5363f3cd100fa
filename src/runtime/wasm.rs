// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! WebAssembly bindings for the search page.
//!
//! This is the browser-facing API. The page fetches the store JSON, hands it
//! to `SiteSearch`, and either renders immediately or waits for `load`:
//!
//! ```js
//! import init, { SiteSearch } from "./postfind.js";
//!
//! await init();
//! const store = await (await fetch("/search/store.json")).json();
//! const search = new SiteSearch(store, { resultsLabel: "Results:" });
//! search.installOnLoad();
//! ```
//!
//! The DOM surface is tiny (five methods on `Element`, two on `document`), so
//! it is declared here directly instead of pulling in the full browser API
//! bindings.

use crate::config::SiteConfig;
use crate::dom::{find_element, Dom};
use crate::error::{SearchError, StoreError};
use crate::index::SiteIndex;
use crate::render::{set_text_and_display, DisplayText, QueryRenderer, RenderOutcome};
use crate::store::RecordStore;
use serde::Serialize;
use serde_wasm_bindgen::to_value;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// A DOM `Element`.
    #[derive(Debug, Clone)]
    pub type DomElement;

    /// `CSSStyleDeclaration` of an element.
    #[derive(Debug, Clone)]
    pub type CssStyle;

    #[wasm_bindgen(js_namespace = document, js_name = getElementById)]
    fn get_element_by_id(id: &str) -> Option<DomElement>;

    #[wasm_bindgen(js_namespace = document, js_name = createElement)]
    fn create_element(tag: &str) -> DomElement;

    #[wasm_bindgen(method, getter, js_name = parentElement)]
    fn parent_element(this: &DomElement) -> Option<DomElement>;

    #[wasm_bindgen(method, setter, js_name = textContent)]
    fn set_text_content(this: &DomElement, text: &str);

    #[wasm_bindgen(method, js_name = setAttribute)]
    fn set_attribute(this: &DomElement, name: &str, value: &str);

    #[wasm_bindgen(method, js_name = appendChild)]
    fn append_child(this: &DomElement, child: &DomElement) -> DomElement;

    #[wasm_bindgen(method, getter)]
    fn style(this: &DomElement) -> CssStyle;

    #[wasm_bindgen(method, js_name = setProperty)]
    fn set_property(this: &CssStyle, name: &str, value: &str);

    #[wasm_bindgen(js_namespace = window, js_name = addEventListener)]
    fn add_window_listener(event: &str, listener: &JsValue);
}

/// The live page `document`.
#[derive(Debug, Default, Clone, Copy)]
pub struct WebDom;

impl Dom for WebDom {
    type Element = DomElement;

    fn element_by_id(&self, id: &str) -> Option<DomElement> {
        get_element_by_id(id)
    }

    fn parent_element(&self, element: &DomElement) -> Option<DomElement> {
        element.parent_element()
    }

    fn create_element(&mut self, tag: &str) -> DomElement {
        create_element(tag)
    }

    fn set_text(&mut self, element: &DomElement, text: &str) {
        element.set_text_content(text);
    }

    fn set_attribute(&mut self, element: &DomElement, name: &str, value: &str) {
        element.set_attribute(name, value);
    }

    fn set_style(&mut self, element: &DomElement, property: &str, value: &str) {
        element.style().set_property(property, value);
    }

    fn append_child(&mut self, parent: &DomElement, child: &DomElement) {
        parent.append_child(child);
    }
}

/// `window.location.search`, or empty when there is no location.
fn location_search() -> Result<String, JsValue> {
    let location = js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("location"))?;
    if location.is_undefined() {
        return Ok(String::new());
    }
    let search = js_sys::Reflect::get(&location, &JsValue::from_str("search"))?;
    Ok(search.as_string().unwrap_or_default())
}

/// Invalid values surface as `TypeError`, everything else as `Error`.
fn search_error_to_js(err: SearchError) -> JsValue {
    match err {
        SearchError::InvalidArgument { .. } => js_sys::TypeError::new(&err.to_string()).into(),
        SearchError::MissingElement { .. } => js_sys::Error::new(&err.to_string()).into(),
    }
}

fn store_error_to_js(err: StoreError) -> JsValue {
    match err {
        StoreError::Invalid(inner) => search_error_to_js(inner),
        other => js_sys::Error::new(&other.to_string()).into(),
    }
}

/// Result of `onPageLoad` for JavaScript consumption.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsRenderOutcome {
    outcome: &'static str,
    count: usize,
}

impl From<RenderOutcome> for JsRenderOutcome {
    fn from(outcome: RenderOutcome) -> Self {
        match outcome {
            RenderOutcome::Skipped => JsRenderOutcome {
                outcome: "skipped",
                count: 0,
            },
            RenderOutcome::NoResults => JsRenderOutcome {
                outcome: "noResults",
                count: 0,
            },
            RenderOutcome::Results { count } => JsRenderOutcome {
                outcome: "results",
                count,
            },
        }
    }
}

/// Search over one site's record store, bound to the current page.
#[wasm_bindgen]
#[derive(Clone)]
pub struct SiteSearch {
    index: Rc<SiteIndex>,
    config: Rc<SiteConfig>,
}

#[wasm_bindgen]
impl SiteSearch {
    /// Build the index from a store object (envelope or bare lookup table).
    ///
    /// Throws `TypeError` when a record has a non-string field.
    #[wasm_bindgen(constructor)]
    pub fn new(store: JsValue, config: JsValue) -> Result<SiteSearch, JsValue> {
        let value: serde_json::Value = serde_wasm_bindgen::from_value(store)
            .map_err(|e| JsValue::from_str(&format!("Invalid store: {}", e)))?;
        let store = RecordStore::from_json_value(value).map_err(store_error_to_js)?;

        let config: SiteConfig = if config.is_undefined() || config.is_null() {
            SiteConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?
        };

        let index = SiteIndex::build(store, &config.index);
        Ok(SiteSearch {
            index: Rc::new(index),
            config: Rc::new(config),
        })
    }

    /// Number of records.
    #[wasm_bindgen(js_name = "docCount")]
    pub fn doc_count(&self) -> usize {
        self.index.doc_count()
    }

    /// Ranked matches: `[{ ref, score }]`.
    #[wasm_bindgen]
    pub fn search(&self, term: &str) -> Result<JsValue, JsValue> {
        to_value(&self.index.query(term)).map_err(|e| e.to_string().into())
    }

    /// The record for `ref`, or `undefined`.
    #[wasm_bindgen]
    pub fn lookup(&self, reference: &str) -> Result<JsValue, JsValue> {
        to_value(&self.index.store().get(reference)).map_err(|e| e.to_string().into())
    }

    /// Render results for `window.location.search` into the page.
    ///
    /// Returns `{ outcome: "skipped" | "noResults" | "results", count }`.
    #[wasm_bindgen(js_name = "onPageLoad")]
    pub fn on_page_load(&self) -> Result<JsValue, JsValue> {
        let location = location_search()?;
        let renderer = QueryRenderer::new(&self.config, &*self.index);
        let outcome = renderer
            .on_page_load(&mut WebDom, &location)
            .map_err(search_error_to_js)?;
        to_value(&JsRenderOutcome::from(outcome)).map_err(|e| e.to_string().into())
    }

    /// Set the results heading's text and show it. Throws `TypeError` for non-strings.
    #[wasm_bindgen(js_name = "setTextAndDisplay")]
    pub fn set_text_and_display(&self, value: JsValue) -> Result<(), JsValue> {
        let text = match value.as_string() {
            Some(s) => DisplayText::from(s),
            None => {
                let found = value.js_typeof().as_string().unwrap_or_default();
                return Err(search_error_to_js(SearchError::invalid(
                    "setTextAndDisplay",
                    "a string",
                    found,
                )));
            }
        };
        let mut dom = WebDom;
        let heading = find_element(&dom, &self.config.heading_id).map_err(search_error_to_js)?;
        set_text_and_display(&mut dom, &heading, &text);
        Ok(())
    }

    /// Run `onPageLoad` once, when the window fires `load`.
    #[wasm_bindgen(js_name = "installOnLoad")]
    pub fn install_on_load(&self) {
        let this = self.clone();
        let listener = Closure::once_into_js(move || -> Result<(), JsValue> {
            this.on_page_load().map(|_| ())
        });
        add_window_listener("load", &listener);
    }
}
