//! Integration tests for the non-interactive `posts` and `read` commands.

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::{TempDir, tempdir};

/// Creates a temp CODERISTIC_HOME directory for test isolation.
fn temp_home() -> TempDir {
    TempDir::new().expect("create temp coderistic home")
}

#[test]
fn test_posts_lists_builtin_catalog() {
    let home = temp_home();

    cargo_bin_cmd!("coderistic")
        .env("CODERISTIC_HOME", home.path())
        .arg("posts")
        .assert()
        .success()
        .stdout(predicate::str::contains("the-art-of-quiet-code"))
        .stdout(predicate::str::contains("The Art of Quiet Code"))
        .stdout(predicate::str::contains("digital-stoicism"));
}

#[test]
fn test_posts_respects_language_flag() {
    let home = temp_home();

    cargo_bin_cmd!("coderistic")
        .env("CODERISTIC_HOME", home.path())
        .args(["posts", "--lang", "kh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("សិល្បៈនៃកូដដ៏ស្ងប់ស្ងាត់"));
}

#[test]
fn test_read_renders_bundled_essay() {
    let home = temp_home();

    cargo_bin_cmd!("coderistic")
        .env("CODERISTIC_HOME", home.path())
        .args(["read", "the-art-of-quiet-code"])
        .assert()
        .success()
        .stdout(predicate::str::contains("THE ART OF QUIET CODE"))
        .stdout(predicate::str::contains(
            "│ The best code is the code you never had to write.",
        ))
        .stdout(predicate::str::contains("# ").not());
}

#[test]
fn test_read_unknown_post_fails() {
    let home = temp_home();

    cargo_bin_cmd!("coderistic")
        .env("CODERISTIC_HOME", home.path())
        .args(["read", "no-such-post"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown post: no-such-post"));
}

#[test]
fn test_read_custom_catalog_resolves_next_to_file() {
    let home = temp_home();
    let site = tempdir().unwrap();
    fs::create_dir_all(site.path().join("contents")).unwrap();
    fs::write(
        site.path().join("contents/hello.md"),
        "# Hello\n\nFrom disk.",
    )
    .unwrap();
    fs::write(
        site.path().join("catalog.toml"),
        r#"
[[post]]
id = "hello"
title = "Hello"
title_kh = "សួស្តី"
date = "Spring, 2025"
reading_time = "1 min read"
excerpt = "A greeting."
excerpt_kh = "ការស្វាគមន៍។"
content_url = "contents/hello.md"
content_url_kh = "contents/missing.md"
"#,
    )
    .unwrap();
    let catalog_path = site.path().join("catalog.toml");
    fs::write(
        home.path().join("config.toml"),
        format!("catalog_path = {:?}\n", catalog_path.to_str().unwrap()),
    )
    .unwrap();

    cargo_bin_cmd!("coderistic")
        .env("CODERISTIC_HOME", home.path())
        .args(["read", "hello"])
        .assert()
        .success()
        .stdout(predicate::str::contains("HELLO"))
        .stdout(predicate::str::contains("From disk."));

    // The missing secondary-language file falls back instead of failing.
    cargo_bin_cmd!("coderistic")
        .env("CODERISTIC_HOME", home.path())
        .args(["read", "hello", "--lang", "kh"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Failed to load the fragment from the void.",
        ));
}
