//! Tests for the `oai-pmh` binary.

mod common;

use tempfile::TempDir;

use common::{run_cli, run_cli_success, seed_repository};

fn repository() -> TempDir {
    let dir = TempDir::new().unwrap();
    seed_repository(dir.path(), "CLI Archive");
    dir
}

#[test]
fn version_flag() {
    let stdout = run_cli_success(&["--version"]);
    assert!(stdout.starts_with("oai-pmh "));
}

#[test]
fn query_prints_xml() {
    let dir = repository();
    let root = dir.path().to_str().unwrap();
    let stdout = run_cli_success(&[
        "query",
        "--root",
        root,
        "--base-url",
        "http://cli.test/oai",
        "verb=Identify",
    ]);

    assert!(stdout.starts_with("<?xml"));
    assert!(stdout.contains("<repositoryName>CLI Archive</repositoryName>"));
    assert!(stdout.contains("<baseURL>http://cli.test/oai</baseURL>"));
}

#[test]
fn query_prints_json_envelope() {
    let dir = repository();
    let root = dir.path().to_str().unwrap();
    let stdout = run_cli_success(&[
        "query",
        "--root",
        root,
        "--json",
        "?verb=ListIdentifiers&metadataPrefix=oai_dc&from=2005-01-01",
    ]);

    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let headers = value["ListIdentifiers"]["headers"].as_array().unwrap();
    let ids: Vec<&str> = headers
        .iter()
        .map(|h| h["identifier"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["oai:test:2", "oai:test:3"]);
    assert_eq!(value["request"]["arguments"]["from"], "2005-01-01");
}

#[test]
fn protocol_error_exits_successfully() {
    let dir = repository();
    let root = dir.path().to_str().unwrap();
    let output = run_cli(&[
        "query",
        "--root",
        root,
        "verb=GetRecord&identifier=oai:test:404&metadataPrefix=oai_dc",
    ]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stdout.contains("<error code=\"idDoesNotExist\">"));
    assert!(stderr.contains("idDoesNotExist"));
}

#[test]
fn provider_fault_exits_with_failure() {
    let dir = repository();
    std::fs::write(dir.path().join("sets.json"), "[").unwrap();
    let root = dir.path().to_str().unwrap();

    let output = run_cli(&["query", "--root", root, "verb=ListSets"]);
    assert!(!output.status.success());
}

#[test]
fn missing_root_is_an_error() {
    let output = run_cli(&["query", "--root", "/nonexistent/oai-pmh-root", "verb=Identify"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Repository directory not found"));
}
