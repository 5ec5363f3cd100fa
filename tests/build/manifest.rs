//! Manifest reading from disk.

use crate::common::*;
use postfind::build::InputManifest;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

#[test]
fn test_fixture_manifest_loads() {
    let path = Path::new(BUILD_FIXTURES_DIR).join("valid/manifest.json");
    let manifest = InputManifest::from_file(&path).unwrap();
    assert_eq!(manifest.version, 1);
    assert_eq!(manifest.posts.len(), 3);
    let config = manifest.config.unwrap();
    assert_eq!(config.results_label, "Results:");
    assert_eq!(config.heading_id, "search-results-h");
}

#[test]
fn test_truncated_manifest_is_invalid_json() {
    let path = Path::new(BUILD_FIXTURES_DIR).join("invalid-manifest/manifest.json");
    let err = InputManifest::from_file(&path).unwrap_err();
    assert!(err.starts_with("Invalid manifest JSON"), "{err}");
}

#[test]
fn test_missing_manifest_names_the_problem() {
    let dir = TempDir::new().unwrap();
    let err = InputManifest::from_file(&dir.path().join("manifest.json")).unwrap_err();
    assert!(err.contains("Failed to read manifest"), "{err}");
}

#[test]
fn test_future_version_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("manifest.json");
    fs::write(&path, r#"{"version": 9, "posts": []}"#).unwrap();
    let err = InputManifest::from_file(&path).unwrap_err();
    assert!(err.contains("Unsupported manifest version 9"), "{err}");
}
