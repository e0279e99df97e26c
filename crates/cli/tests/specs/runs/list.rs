//! Run listing specs

use crate::prelude::*;

#[test]
fn list_empty() {
    let temp = Project::empty();
    temp.rr().args(&["list"]).passes().stdout_eq("No runs\n");
}

#[test]
fn list_shows_stored_runs_sorted() {
    let temp = Project::empty();
    temp.record("run-ok", SUCCESS_RECORD);
    temp.record("run-err", ERROR_RECORD);
    // A directory without a record is not a committed run
    std::fs::create_dir_all(temp.runs_dir().join("run-half/files")).unwrap();

    let out = temp.rr().args(&["list"]).passes();
    let lines: Vec<&str> = out.stdout().lines().collect();

    assert_eq!(lines.len(), 3, "{}", out.stdout());
    assert!(lines[0].starts_with("ID"));
    assert!(lines[1].starts_with("run-err"));
    assert!(lines[1].contains("error"));
    assert!(lines[2].starts_with("run-ok"));
    assert!(lines[2].contains("success"));
}

#[test]
fn list_as_json() {
    let temp = Project::empty();
    temp.record("run-ok", SUCCESS_RECORD);

    let json = temp.rr().args(&["--output", "json", "list"]).passes().json();

    assert_eq!(json[0]["run_id"], "run-ok");
    assert_eq!(json[0]["stage"], "success");
    assert_eq!(json[0]["created_at"], "2026-01-01T12:00:00Z");
}
