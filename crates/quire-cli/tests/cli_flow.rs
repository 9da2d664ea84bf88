//! End-to-end runs of the `quire` binary against a throwaway database.

use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

fn quire(dir: &Path, args: &[&str]) -> Output {
    let db = dir.join("audit.db");
    Command::new(env!("CARGO_BIN_EXE_quire"))
        .arg("--db")
        .arg(&db)
        .args(args)
        .current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("QUIRE_LOG")
        .output()
        .expect("run quire")
}

fn json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "expected zero exit (stderr={})",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be json")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn recorded_entries_are_listed_for_their_actor() {
    let dir = TempDir::new().unwrap();

    let first = json(&quire(
        dir.path(),
        &[
            "log",
            "record",
            "--actor",
            "usr-alice",
            "--entity-id",
            "doc-1",
            "--entity-kind",
            "document",
            "--event",
            "create",
            "--message",
            "Quarterly report",
        ],
    ));
    assert_eq!(first["entity_kind"], "Document");
    assert_eq!(first["event_kind"], "CREATE");
    assert!(first["id"].as_str().unwrap().starts_with("log-"));

    json(&quire(
        dir.path(),
        &[
            "log", "record", "--actor", "usr-bob", "--entity-id", "doc-1", "--entity-kind",
            "Document", "--event", "UPDATE",
        ],
    ));

    let page = json(&quire(dir.path(), &["log", "list", "--actor", "usr-alice"]));
    assert_eq!(page["total"], 1);
    assert_eq!(page["entries"][0]["id"], first["id"]);
    assert_eq!(page["entries"][0]["message"], "Quarterly report");
}

#[test]
fn limit_and_offset_page_through_results() {
    let dir = TempDir::new().unwrap();
    for event in ["create", "update", "delete"] {
        json(&quire(
            dir.path(),
            &[
                "log", "record", "--actor", "usr-a", "--entity-id", "tag-1", "--entity-kind",
                "tag", "--event", event,
            ],
        ));
    }

    let page = json(&quire(
        dir.path(),
        &[
            "--limit", "2", "log", "list", "--actor", "usr-a", "--offset", "2", "--sort",
            "created-at", "--asc",
        ],
    ));
    assert_eq!(page["total"], 3);
    assert_eq!(page["entries"].as_array().unwrap().len(), 1);
    assert_eq!(page["entries"][0]["event_kind"], "DELETE");
}

#[test]
fn unknown_document_reads_as_not_found() {
    let dir = TempDir::new().unwrap();
    let output = quire(
        dir.path(),
        &["log", "list", "--document", "doc-missing", "--as", "usr-a"],
    );
    assert!(!output.status.success());
    assert!(stderr(&output).contains("document not found: doc-missing"));
}

#[test]
fn invalid_kinds_are_rejected_before_recording() {
    let dir = TempDir::new().unwrap();
    let output = quire(
        dir.path(),
        &[
            "log", "record", "--actor", "usr-a", "--entity-id", "x-1", "--entity-kind",
            "folder", "--event", "create",
        ],
    );
    assert!(!output.status.success());
    assert!(stderr(&output).contains("invalid entity kind 'folder'"));

    let page = json(&quire(dir.path(), &["log", "list", "--actor", "usr-a"]));
    assert_eq!(page["total"], 0);
}

#[test]
fn operator_commands_refuse_non_operators() {
    let dir = TempDir::new().unwrap();

    let dashboard = quire(dir.path(), &["dashboard", "--as", "usr-nobody"]);
    assert!(!dashboard.status.success());
    assert!(stderr(&dashboard).contains("usr-nobody is not an operator"));

    let request = json(&quire(
        dir.path(),
        &[
            "request",
            "create",
            "--username",
            "carol",
            "--email",
            "carol@example.com",
            "--credential",
            "s3cret",
        ],
    ));
    let id = request["id"].as_str().unwrap().to_string();
    assert_eq!(request["status"], "PENDING");
    assert!(request.get("credential").is_none());

    let approve = quire(dir.path(), &["request", "approve", &id, "--as", "usr-nobody"]);
    assert!(!approve.status.success());

    let pending = json(&quire(dir.path(), &["request", "list"]));
    assert_eq!(pending.as_array().unwrap().len(), 1);
    assert_eq!(pending[0]["username"], "carol");
}

#[test]
fn duplicate_pending_request_is_a_conflict() {
    let dir = TempDir::new().unwrap();
    let args = [
        "request",
        "create",
        "--username",
        "dave",
        "--email",
        "dave@example.com",
        "--credential",
        "pw",
    ];
    json(&quire(dir.path(), &args));
    let again = quire(dir.path(), &args);
    assert!(!again.status.success());
    assert!(stderr(&again).contains("AlreadyExistingRequest"));
}
