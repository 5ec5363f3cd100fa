// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Site-level settings shared by the build, the CLI and the browser runtime.
//!
//! Every field has a default, so `{}` is a valid config. The defaults match
//! the markup the search page ships with: a hidden `#search-results-h`
//! heading and a `?query=` parameter.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Id of the heading that receives the result message.
pub const DEFAULT_HEADING_ID: &str = "search-results-h";

/// URL parameter holding the search text.
pub const DEFAULT_QUERY_PARAM: &str = "query";

pub const DEFAULT_RESULTS_LABEL: &str = "Results:";

pub const DEFAULT_NO_RESULTS_LABEL: &str = "No results found.";

/// Renderer and index settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    pub heading_id: String,
    pub query_param: String,
    pub results_label: String,
    pub no_results_label: String,
    pub index: IndexConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            heading_id: DEFAULT_HEADING_ID.to_string(),
            query_param: DEFAULT_QUERY_PARAM.to_string(),
            results_label: DEFAULT_RESULTS_LABEL.to_string(),
            no_results_label: DEFAULT_NO_RESULTS_LABEL.to_string(),
            index: IndexConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Read a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {}", path.display(), e))?;
        serde_json::from_str(&content)
            .map_err(|e| format!("Invalid config JSON in {}: {}", path.display(), e))
    }
}

/// Scoring parameters for `SiteIndex`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    pub boosts: FieldBoosts,
    /// BM25 term frequency saturation.
    pub k1: f64,
    /// BM25 length normalization.
    pub b: f64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        IndexConfig {
            boosts: FieldBoosts::default(),
            k1: 1.2,
            b: 0.75,
        }
    }
}

/// Per-field score multipliers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldBoosts {
    pub title: f64,
    pub categories: f64,
    pub content: f64,
}

impl Default for FieldBoosts {
    fn default() -> Self {
        FieldBoosts {
            title: 10.0,
            categories: 1.0,
            content: 1.0,
        }
    }
}
