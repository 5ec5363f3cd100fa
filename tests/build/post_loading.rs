//! Loading post files and turning them into records.

use crate::common::*;
use postfind::build::{load_posts, posts_to_store, InputManifest};
use serde_json::json;
use std::path::Path;
use tempfile::TempDir;

fn load_fixture(name: &str) -> Result<Vec<postfind::build::Post>, String> {
    let dir = Path::new(BUILD_FIXTURES_DIR).join(name);
    let manifest = InputManifest::from_file(&dir.join("manifest.json"))?;
    load_posts(&dir, &manifest)
}

#[test]
fn test_fixture_posts_load_sorted() {
    let posts = load_fixture("valid").unwrap();
    let urls: Vec<&str> = posts.iter().map(|p| p.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            "/2023/01/hello-world/",
            "/2023/05/rust-ownership/",
            "/2024/02/static-search/",
        ]
    );
}

#[test]
fn test_records_have_plain_text_content() {
    let posts = load_fixture("valid").unwrap();
    let store = posts_to_store(&posts).unwrap();

    let ownership = store.get("/2023/05/rust-ownership/").unwrap();
    assert_eq!(ownership.title, "Understanding Rust Ownership");
    assert_eq!(ownership.categories, "rust, languages");
    assert!(ownership.content.starts_with("Moves Ownership moves values"));
    assert!(!ownership.content.contains('<'));

    let search = store.get("/2024/02/static-search/").unwrap();
    assert!(!search.content.contains("console.log"));
    assert!(search.content.ends_with("on the search page."));

    let hello = store.get("/2023/01/hello-world/").unwrap();
    assert_eq!(hello.categories, "meta");
}

#[test]
fn test_duplicate_urls_fail() {
    let posts = load_fixture("duplicate-urls").unwrap();
    let err = posts_to_store(&posts).unwrap_err();
    assert!(err.contains("duplicate record for '/same/'"), "{err}");
}

#[test]
fn test_missing_title_fails_with_file_name() {
    let dir = TempDir::new().unwrap();
    write_site(dir.path(), &[json!({"url": "/untitled/"})], None);
    let manifest = InputManifest::from_file(&dir.path().join("manifest.json")).unwrap();
    let err = load_posts(dir.path(), &manifest).unwrap_err();
    assert!(err.contains("Invalid JSON in post-0.json"), "{err}");
}

#[test]
fn test_many_posts_load() {
    let dir = TempDir::new().unwrap();
    let posts: Vec<_> = (0..64)
        .map(|i| {
            post(
                &format!("/p/{:03}/", i),
                &format!("Post {}", i),
                json!(["bulk"]),
                "<p>generated</p>",
            )
        })
        .collect();
    write_site(dir.path(), &posts, None);

    let manifest = InputManifest::from_file(&dir.path().join("manifest.json")).unwrap();
    let loaded = load_posts(dir.path(), &manifest).unwrap();
    assert_eq!(loaded.len(), 64);
    assert!(loaded.windows(2).all(|w| w[0].url < w[1].url));
}
