//! Integration tests for the `wisdom` command against a mock endpoint.

mod fixtures;

use assert_cmd::cargo::cargo_bin_cmd;
use fixtures::{chat_sse, sse_response};
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a temp CODERISTIC_HOME directory for test isolation.
fn temp_home() -> TempDir {
    TempDir::new().expect("create temp coderistic home")
}

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

#[tokio::test]
async fn test_wisdom_streams_text() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-api-key"))
        .respond_with(sse_response(&chat_sse(&["Si", "lence ", "is truth."])))
        .expect(1)
        .mount(&mock_server)
        .await;

    cargo_bin_cmd!("coderistic")
        .env("CODERISTIC_HOME", home.path())
        .env("CODERISTIC_API_KEY", "test-api-key")
        .env("CODERISTIC_BASE_URL", mock_server.uri())
        .arg("wisdom")
        .assert()
        .success()
        .stdout(predicate::str::contains("Silence is truth."));
}

#[tokio::test]
async fn test_wisdom_missing_key_prints_fallback_without_network() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(sse_response(&chat_sse(&["unused"])))
        .expect(0)
        .mount(&mock_server)
        .await;

    cargo_bin_cmd!("coderistic")
        .env("CODERISTIC_HOME", home.path())
        .env("CODERISTIC_API_KEY", "undefined")
        .env_remove("OPENAI_API_KEY")
        .env_remove("API_KEY")
        .env("CODERISTIC_BASE_URL", mock_server.uri())
        .arg("wisdom")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Wisdom is found within, not in the machine.",
        ));
}

#[tokio::test]
async fn test_wisdom_server_error_prints_fallback() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    cargo_bin_cmd!("coderistic")
        .env("CODERISTIC_HOME", home.path())
        .env("CODERISTIC_API_KEY", "test-api-key")
        .env("CODERISTIC_BASE_URL", mock_server.uri())
        .args(["wisdom", "--lang", "kh"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "ប្រាជ្ញាត្រូវបានរកឃើញនៅខាងក្នុង",
        ));
}

#[tokio::test]
async fn test_wisdom_empty_stream_prints_silence() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(sse_response(&chat_sse(&["  ", "\n"])))
        .mount(&mock_server)
        .await;

    cargo_bin_cmd!("coderistic")
        .env("CODERISTIC_HOME", home.path())
        .env("CODERISTIC_API_KEY", "test-api-key")
        .env("CODERISTIC_BASE_URL", mock_server.uri())
        .arg("wisdom")
        .assert()
        .success()
        .stdout(predicate::str::contains("Silence is the truest wisdom."));
}
