// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Parallel post loading and record conversion.
//!
//! The expensive parts of a build are reading post files and stripping their
//! HTML. Both are independent per post, so with the `parallel` feature they
//! run on rayon's pool; without it the same functions run sequentially.
//! Output is sorted by URL either way, so builds are reproducible.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::fs;
use std::path::Path;

#[cfg(feature = "parallel")]
use indicatif::ProgressBar;
#[cfg(feature = "parallel")]
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::store::RecordStore;
use crate::types::Record;

use super::{InputManifest, Post};

/// Read and parse one post file.
pub fn load_post(input_dir: &Path, filename: &str) -> Result<Post, String> {
    let path = input_dir.join(filename);
    let content = fs::read_to_string(&path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    serde_json::from_str::<Post>(&content).map_err(|e| {
        log::warn!("failed to parse {}: {}", path.display(), e);
        format!("Invalid JSON in {}: {}", filename, e)
    })
}

/// Load every post listed in the manifest, sorted by URL.
pub fn load_posts(input_dir: &Path, manifest: &InputManifest) -> Result<Vec<Post>, String> {
    #[cfg(feature = "parallel")]
    let posts = manifest
        .posts
        .par_iter()
        .map(|filename| load_post(input_dir, filename))
        .collect::<Result<Vec<Post>, String>>()?;

    #[cfg(not(feature = "parallel"))]
    let posts = manifest
        .posts
        .iter()
        .map(|filename| load_post(input_dir, filename))
        .collect::<Result<Vec<Post>, String>>()?;

    Ok(sorted(posts))
}

/// Load every post listed in the manifest with progress reporting.
#[cfg(feature = "parallel")]
pub fn load_posts_with_progress(
    input_dir: &Path,
    manifest: &InputManifest,
    progress: &ProgressBar,
) -> Result<Vec<Post>, String> {
    let counter = AtomicUsize::new(0);
    let total = manifest.posts.len();

    let posts = manifest
        .posts
        .par_iter()
        .map(|filename| {
            let post = load_post(input_dir, filename)?;

            let count = counter.fetch_add(1, Ordering::Relaxed) + 1;
            progress.set_position(count as u64);
            if count.is_multiple_of(10) || count == total {
                progress.set_message(format!("{}/{}", count, total));
            }

            Ok(post)
        })
        .collect::<Result<Vec<Post>, String>>()?;

    Ok(sorted(posts))
}

/// Non-parallel fallback (no progress).
#[cfg(not(feature = "parallel"))]
pub fn load_posts_with_progress(
    input_dir: &Path,
    manifest: &InputManifest,
) -> Result<Vec<Post>, String> {
    load_posts(input_dir, manifest)
}

fn sorted(mut posts: Vec<Post>) -> Vec<Post> {
    posts.sort_by(|a, b| a.url.cmp(&b.url));
    posts
}

/// Convert posts into a validated store. Two posts with the same URL is an error.
pub fn posts_to_store(posts: &[Post]) -> Result<RecordStore, String> {
    #[cfg(feature = "parallel")]
    let records: Vec<(String, Record)> = posts
        .par_iter()
        .map(|post| (post.url.clone(), post.to_record()))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let records: Vec<(String, Record)> = posts
        .iter()
        .map(|post| (post.url.clone(), post.to_record()))
        .collect();

    RecordStore::from_records(records).map_err(|e| format!("Failed to build store: {}", e))
}
