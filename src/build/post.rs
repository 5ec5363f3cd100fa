// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use crate::types::Record;
use crate::util::html::strip_html;
use serde::{Deserialize, Serialize};

/// One post file, as emitted by the site generator.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Post {
    /// Page URL; becomes the record ref and the link target.
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub categories: Option<Categories>,
    /// Rendered post body (HTML).
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub date: Option<String>,
}

/// Generators emit either a single category or a list.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum Categories {
    One(String),
    Many(Vec<String>),
}

impl Categories {
    /// Categories as one display string, `", "` separated.
    pub fn joined(&self) -> String {
        match self {
            Categories::One(c) => c.trim().to_string(),
            Categories::Many(cs) => cs
                .iter()
                .map(|c| c.trim())
                .filter(|c| !c.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

impl Post {
    /// The searchable record for this post. Titles are kept verbatim; the
    /// body loses its markup.
    pub fn to_record(&self) -> Record {
        Record::new(
            self.title.clone(),
            self.categories
                .as_ref()
                .map(Categories::joined)
                .unwrap_or_default(),
            strip_html(&self.content),
        )
    }
}
