// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Browser bindings.
//!
//! The WASM module is what actually runs on the search page. Everything it
//! does goes through the same `QueryRenderer` the CLI's `render` command
//! drives against an in-memory document.

#[cfg(feature = "wasm")]
pub mod wasm;
