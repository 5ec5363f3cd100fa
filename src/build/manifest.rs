// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use crate::config::SiteConfig;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Manifest format understood by this build.
pub const MANIFEST_VERSION: u32 = 1;

/// `manifest.json` at the root of the build input directory.
#[derive(Deserialize, Clone, Debug)]
pub struct InputManifest {
    pub version: u32,
    /// Post files, relative to the input directory.
    pub posts: Vec<String>,
    /// Site settings baked into the demo page.
    #[serde(default)]
    pub config: Option<SiteConfig>,
}

impl InputManifest {
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read manifest: {}", e))?;
        let manifest: InputManifest = serde_json::from_str(&content)
            .map_err(|e| format!("Invalid manifest JSON: {}", e))?;
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.version != MANIFEST_VERSION {
            return Err(format!(
                "Unsupported manifest version {} (expected {})",
                self.version, MANIFEST_VERSION
            ));
        }
        if let Some(empty) = self.posts.iter().position(|p| p.trim().is_empty()) {
            return Err(format!("Manifest post entry {} is empty", empty));
        }
        Ok(())
    }
}
