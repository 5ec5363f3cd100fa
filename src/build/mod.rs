// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Build-time generation of the record store.
//!
//! ```text
//! input/manifest.json ──▶ posts (parallel) ──▶ RecordStore ──▶ output/store-{crc32}.json
//!                                                          └─▶ output/store.json
//!                                                          └─▶ output/demo.html (optional)
//! ```
//!
//! The hashed file name changes whenever the records do, so pages can cache
//! it forever. `store.json` is the same content under a stable name.

pub mod manifest;
pub mod parallel;
pub mod post;

use std::fs;
use std::path::Path;

#[cfg(feature = "parallel")]
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::config::SiteConfig;
use crate::index::SiteIndex;
use crate::store::RecordStore;

pub use manifest::*;
pub use parallel::*;
pub use post::*;

/// Stable name of the store written next to the hashed one.
pub const STABLE_STORE_FILE: &str = "store.json";

/// Options that do not come from the manifest.
#[derive(Clone, Debug, Default)]
pub struct BuildOptions {
    /// Also write `demo.html`.
    pub emit_demo: bool,
    /// Overrides the manifest's `config` block.
    pub config: Option<SiteConfig>,
}

/// What a build produced.
#[derive(Clone, Debug, PartialEq)]
pub struct BuildSummary {
    pub post_count: usize,
    pub term_count: usize,
    /// File name of the hashed store, relative to the output directory.
    pub store_file: String,
    pub checksum: String,
    pub bytes: usize,
    pub demo_file: Option<String>,
}

/// Create a progress style for the main progress bars
#[cfg(feature = "parallel")]
fn create_progress_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {prefix:<12} [{bar:40.cyan/dim}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("━━╸")
}

pub fn run_build(
    input_dir: &Path,
    output_dir: &Path,
    options: &BuildOptions,
) -> Result<BuildSummary, String> {
    #[cfg(feature = "parallel")]
    let multi = MultiProgress::new();

    // 1. Read manifest
    let manifest = InputManifest::from_file(&input_dir.join("manifest.json"))?;
    let config = options
        .config
        .clone()
        .or_else(|| manifest.config.clone())
        .unwrap_or_default();

    // 2. Load posts in parallel with progress bar
    #[cfg(feature = "parallel")]
    let load_pb = multi.add(ProgressBar::new(manifest.posts.len() as u64));
    #[cfg(feature = "parallel")]
    load_pb.set_style(create_progress_style());
    #[cfg(feature = "parallel")]
    load_pb.set_prefix("Loading");
    #[cfg(feature = "parallel")]
    load_pb.set_message("posts...");

    let posts = parallel::load_posts_with_progress(
        input_dir,
        &manifest,
        #[cfg(feature = "parallel")]
        &load_pb,
    )?;

    #[cfg(feature = "parallel")]
    load_pb.finish_with_message(format!("loaded {} posts", posts.len()));

    if posts.is_empty() {
        log::warn!("manifest lists no posts; writing an empty store");
    }

    // 3. Convert to records and index once to validate the config against them
    let store = parallel::posts_to_store(&posts)?;
    let index = SiteIndex::build(store, &config.index);
    log::info!(
        "indexed {} posts, {} terms",
        index.doc_count(),
        index.term_count()
    );

    // 4. Write store files
    fs::create_dir_all(output_dir)
        .map_err(|e| format!("Failed to create output dir: {}", e))?;

    let store = index.store();
    let checksum = store.checksum();
    let json = store
        .to_json()
        .map_err(|e| format!("Failed to serialize store: {}", e))?;

    let store_file = format!("store-{}.json", checksum);
    for name in [store_file.as_str(), STABLE_STORE_FILE] {
        let path = output_dir.join(name);
        fs::write(&path, &json)
            .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
        log::info!("wrote {}", path.display());
    }

    // 5. Emit demo HTML if requested
    let demo_file = if options.emit_demo {
        Some(emit_demo_html(output_dir, &store_file, &config)?)
    } else {
        None
    };

    Ok(BuildSummary {
        post_count: index.doc_count(),
        term_count: index.term_count(),
        store_file,
        checksum,
        bytes: json.len(),
        demo_file,
    })
}

/// Read a built store back, checking its checksum.
pub fn load_store(path: &Path) -> Result<RecordStore, String> {
    RecordStore::from_file(path).map_err(|e| format!("Failed to load {}: {}", path.display(), e))
}

/// The demo search page for `store_file`, wired with `config`.
pub fn demo_page(store_file: &str, config: &SiteConfig) -> Result<String, String> {
    const DEMO_HTML: &str = include_str!("demo_template.html");

    let config_json = serde_json::to_string(config)
        .map_err(|e| format!("Failed to serialize config: {}", e))?
        // Keep the inline script from being closed early.
        .replace("</", "<\\/");

    Ok(DEMO_HTML
        .replace("{{STORE_FILE}}", store_file)
        .replace("{{HEADING_ID}}", &escape_attr(&config.heading_id))
        .replace("{{QUERY_PARAM}}", &escape_attr(&config.query_param))
        .replace("{{CONFIG_JSON}}", &config_json))
}

/// Emit demo HTML page.
fn emit_demo_html(output_dir: &Path, store_file: &str, config: &SiteConfig) -> Result<String, String> {
    let demo_path = output_dir.join("demo.html");
    fs::write(&demo_path, demo_page(store_file, config)?)
        .map_err(|e| format!("Failed to write demo.html: {}", e))?;
    log::info!("wrote {}", demo_path.display());

    Ok("demo.html".to_string())
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
