//! End-to-end tests for the build workflow.

use crate::common::*;
use postfind::build::{run_build, BuildOptions, STABLE_STORE_FILE};
use postfind::{
    Dom, IndexProvider, MemoryDocument, QueryRenderer, RecordStore, RenderOutcome, SiteConfig,
    SiteIndex,
};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn fixture(name: &str) -> std::path::PathBuf {
    Path::new(BUILD_FIXTURES_DIR).join(name)
}

#[test]
fn test_run_build_e2e_basic() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("output");

    let summary = run_build(&fixture("valid"), &output_path, &BuildOptions::default())
        .expect("build should succeed");

    assert_eq!(summary.post_count, 3);
    assert!(summary.term_count > 10);
    assert_eq!(summary.store_file, format!("store-{}.json", summary.checksum));
    assert!(summary.demo_file.is_none());

    let hashed = fs::read_to_string(output_path.join(&summary.store_file)).unwrap();
    let stable = fs::read_to_string(output_path.join(STABLE_STORE_FILE)).unwrap();
    assert_eq!(hashed, stable);
    assert_eq!(hashed.len(), summary.bytes);
    assert!(!output_path.join("demo.html").exists());
}

#[test]
fn test_store_envelope_shape() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("output");
    let summary = run_build(&fixture("valid"), &output_path, &BuildOptions::default()).unwrap();

    let value: Value =
        serde_json::from_str(&fs::read_to_string(output_path.join(STABLE_STORE_FILE)).unwrap())
            .unwrap();
    assert_eq!(value["version"], json!(1));
    assert_eq!(value["checksum"], json!(summary.checksum));
    assert_eq!(
        value["records"]["/2023/05/rust-ownership/"]["title"],
        json!("Understanding Rust Ownership")
    );
}

#[test]
fn test_built_store_serves_the_search_page() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("output");
    run_build(&fixture("valid"), &output_path, &BuildOptions::default()).unwrap();

    let store = RecordStore::from_file(&output_path.join(STABLE_STORE_FILE)).unwrap();
    let config = SiteConfig::default();
    let index = SiteIndex::build(store, &config.index);

    let mut doc = MemoryDocument::parse(BLOG_PAGE);
    let outcome = QueryRenderer::new(&config, &index)
        .on_page_load(&mut doc, "/search/?query=ownership")
        .unwrap();
    assert_eq!(outcome, RenderOutcome::Results { count: 1 });
    assert_eq!(
        list_links(&doc, result_lists(&doc)[0]),
        vec![(
            "/2023/05/rust-ownership/".to_string(),
            "Understanding Rust Ownership".to_string()
        )]
    );

    // Script bodies were stripped at build time.
    assert!(index.search("indexed").is_empty());
}

#[test]
fn test_run_build_e2e_with_demo() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("output");
    let options = BuildOptions {
        emit_demo: true,
        ..Default::default()
    };

    let summary = run_build(&fixture("valid"), &output_path, &options).unwrap();
    assert_eq!(summary.demo_file.as_deref(), Some("demo.html"));

    let demo_content = fs::read_to_string(output_path.join("demo.html")).unwrap();
    assert!(
        demo_content.contains(&summary.store_file),
        "demo.html should reference the hashed store"
    );

    let doc = MemoryDocument::parse(&demo_content);
    assert!(doc.element_by_id("search-results-h").is_some());
}

#[test]
fn test_config_override_reaches_demo() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("output");
    let options = BuildOptions {
        emit_demo: true,
        config: Some(SiteConfig {
            heading_id: "hits".to_string(),
            ..Default::default()
        }),
    };
    run_build(&fixture("valid"), &output_path, &options).unwrap();

    let doc = MemoryDocument::parse(&fs::read_to_string(output_path.join("demo.html")).unwrap());
    assert!(doc.element_by_id("hits").is_some());
    assert!(doc.element_by_id("search-results-h").is_none());
}

#[test]
fn test_checksum_tracks_content() {
    let a = TempDir::new().unwrap();
    let b = TempDir::new().unwrap();
    write_site(a.path(), &[post("/x/", "One", json!([]), "body")], None);
    write_site(b.path(), &[post("/x/", "Two", json!([]), "body")], None);

    let out_a = a.path().join("out");
    let out_b = b.path().join("out");
    let sa = run_build(a.path(), &out_a, &BuildOptions::default()).unwrap();
    let sb = run_build(b.path(), &out_b, &BuildOptions::default()).unwrap();
    assert_ne!(sa.checksum, sb.checksum);

    // Same input, same name.
    let again = run_build(a.path(), &out_a, &BuildOptions::default()).unwrap();
    assert_eq!(again.store_file, sa.store_file);
}

#[test]
fn test_empty_manifest_writes_empty_store() {
    let temp_dir = TempDir::new().unwrap();
    write_site(temp_dir.path(), &[], None);
    let output_path = temp_dir.path().join("out");

    let summary = run_build(temp_dir.path(), &output_path, &BuildOptions::default()).unwrap();
    assert_eq!(summary.post_count, 0);
    let store = RecordStore::from_file(&output_path.join(STABLE_STORE_FILE)).unwrap();
    assert!(store.is_empty());
}

#[test]
fn test_run_build_e2e_missing_manifest() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("output");

    let err = run_build(temp_dir.path(), &output_path, &BuildOptions::default()).unwrap_err();
    assert!(err.contains("manifest"), "Error should mention manifest: {}", err);
    assert!(!output_path.exists());
}

#[test]
fn test_run_build_e2e_invalid_manifest() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("output");

    let err = run_build(&fixture("invalid-manifest"), &output_path, &BuildOptions::default())
        .unwrap_err();
    assert!(err.contains("Invalid") || err.contains("JSON"), "{err}");
}

#[test]
fn test_run_build_e2e_duplicate_urls() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("output");

    let err = run_build(&fixture("duplicate-urls"), &output_path, &BuildOptions::default())
        .unwrap_err();
    assert!(err.contains("/same/"), "{err}");
    assert!(!output_path.join(STABLE_STORE_FILE).exists());
}
