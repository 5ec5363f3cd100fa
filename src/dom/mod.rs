// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The slice of the DOM the renderer needs.
//!
//! The renderer touches exactly one region of the page: it finds the results
//! heading by id, changes its text and visibility, and may append a list to
//! the heading's parent. `Dom` names those operations and nothing else, so
//! the same rendering code drives the browser (`runtime::wasm`) and the
//! in-memory tree used by the CLI and the tests (`MemoryDocument`).

mod memory;

pub use memory::{MemoryDocument, NodeId};

use crate::error::SearchError;

/// Element lookup and mutation.
///
/// Element handles are cheap to clone. A handle from `create_element` is
/// detached until passed to `append_child`.
pub trait Dom {
    type Element: Clone;

    /// The connected element with this id, if any.
    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    fn parent_element(&self, element: &Self::Element) -> Option<Self::Element>;

    fn create_element(&mut self, tag: &str) -> Self::Element;

    /// Replace the element's children with a single text node.
    fn set_text(&mut self, element: &Self::Element, text: &str);

    fn set_attribute(&mut self, element: &Self::Element, name: &str, value: &str);

    /// Set one inline style property, leaving the others alone.
    fn set_style(&mut self, element: &Self::Element, property: &str, value: &str);

    /// Append `child` as the last child of `parent`, moving it if attached elsewhere.
    fn append_child(&mut self, parent: &Self::Element, child: &Self::Element);
}

/// Look up an element the page is required to have.
///
/// Absence is a markup defect, reported as `SearchError::MissingElement`.
pub fn find_element<D: Dom + ?Sized>(dom: &D, id: &str) -> Result<D::Element, SearchError> {
    dom.element_by_id(id).ok_or_else(|| SearchError::missing(id))
}
