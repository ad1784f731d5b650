//! One-shot commands against a stub proxy.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::{TempDir, tempdir};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn redraft(home: &TempDir, proxy: &MockServer) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("redraft");
    cmd.env("REDRAFT_HOME", home.path())
        .env("REDRAFT_PROXY_URL", proxy.uri())
        .env_remove("REDRAFT_LOG");
    cmd
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rephrase_prints_result() {
    let home = tempdir().unwrap();
    let proxy = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/rephrase"))
        .and(body_json(json!({
            "text": "I are happy",
            "language": "en",
            "writing_style": "business",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rephrased_text": "I am happy",
            "detected_language": "en",
        })))
        .expect(1)
        .mount(&proxy)
        .await;

    redraft(&home, &proxy)
        .args(["rephrase", "  I are happy ", "--style", "business"])
        .assert()
        .success()
        .stdout("I am happy\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rephrase_reads_stdin_and_marks_additions() {
    let home = tempdir().unwrap();
    let proxy = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/rephrase"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rephrased_text": "I am happy",
        })))
        .mount(&proxy)
        .await;

    redraft(&home, &proxy)
        .args(["rephrase", "--diff"])
        .write_stdin("I are happy\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"<span class="diff-added">am</span>"#))
        .stdout(predicate::str::contains("are").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rephrase_empty_result() {
    let home = tempdir().unwrap();
    let proxy = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/rephrase"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&proxy)
        .await;

    redraft(&home, &proxy)
        .args(["rephrase", "hello"])
        .assert()
        .success()
        .stdout("No rephrasing available.\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_proxy_error_prints_record_and_reason() {
    let home = tempdir().unwrap();
    let proxy = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/rephrase"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": "DeepL API error",
        })))
        .mount(&proxy)
        .await;

    redraft(&home, &proxy)
        .args(["rephrase", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"status\": 500"))
        .stderr(predicate::str::contains("Error: DeepL API error"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_blank_text_is_rejected_without_request() {
    let home = tempdir().unwrap();
    let proxy = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&proxy)
        .await;

    redraft(&home, &proxy)
        .args(["rephrase", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No text provided"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_translate_normalizes_codes() {
    let home = tempdir().unwrap();
    let proxy = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/translate"))
        .and(body_json(json!({
            "text": "Hallo Welt",
            "source_lang": "DE",
            "target_lang": "EN-US",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "translated_text": "Hello world",
            "detected_language": "DE",
        })))
        .expect(1)
        .mount(&proxy)
        .await;

    redraft(&home, &proxy)
        .args(["translate", "Hallo Welt", "--to", "en", "--from", "de"])
        .assert()
        .success()
        .stdout("Hello world\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_translate_unknown_target() {
    let home = tempdir().unwrap();
    let proxy = MockServer::start().await;

    redraft(&home, &proxy)
        .args(["translate", "Hallo", "--to", "XX"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown target language: XX"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_usage_summary_and_json() {
    let home = tempdir().unwrap();
    let proxy = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/usage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "character_count": 12345,
            "character_limit": 500000,
        })))
        .mount(&proxy)
        .await;

    redraft(&home, &proxy)
        .arg("usage")
        .assert()
        .success()
        .stdout("12,345 / 500,000 chars (2%)\n");

    redraft(&home, &proxy)
        .args(["usage", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"character_limit\": 500000"));
}
