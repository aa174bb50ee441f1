use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use oai_pmh_file::{FileStore, StoredRecord};
use serde_json::json;

/// Lay out a small repository: two sets, a live record, a deleted record
/// and a record in a nested set.
pub fn seed_repository(root: &Path, name: &str) {
    fs::write(
        root.join("repository.json"),
        json!({
            "repositoryName": name,
            "adminEmail": ["admin@example.org"],
            "deletedRecord": "persistent",
            "granularity": "YYYY-MM-DD",
        })
        .to_string(),
    )
    .unwrap();

    fs::write(
        root.join("sets.json"),
        json!([
            { "setSpec": "content", "setName": "Content", "setDescription": "Digitised items" },
            { "setSpec": "content:maps", "setName": "Maps" },
        ])
        .to_string(),
    )
    .unwrap();

    let store = FileStore::new(root);
    let records = [
        json!({
            "identifier": "oai:test:1",
            "datestamp": "2001-12-14",
            "setSpec": ["content"],
            "metadata": { "title": ["Digital Libraries"], "creator": ["Lagoze, Carl"] },
        }),
        json!({
            "identifier": "oai:test:2",
            "datestamp": "2005-06-01",
            "deleted": true,
            "setSpec": ["content"],
        }),
        json!({
            "identifier": "oai:test:3",
            "datestamp": "2010-01-31T08:00:00Z",
            "setSpec": ["content:maps"],
            "metadata": { "title": ["A Map"], "type": ["Image"] },
        }),
    ];
    for record in records {
        let record: StoredRecord = serde_json::from_value(record).unwrap();
        store.put_record(&record).unwrap();
    }
}

/// Run the CLI binary with arguments.
pub fn run_cli(args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_oai-pmh"));
    cmd.args(args);
    cmd.env_remove("OAI_PMH_ROOT");
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI and expect success.
pub fn run_cli_success(args: &[&str]) -> String {
    let output = run_cli(args);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}
