//! Error reporting specs

use crate::prelude::*;

#[test]
fn status_of_unknown_run_fails() {
    let temp = Project::empty();
    temp.rr()
        .args(&["status", "does-not-exist"])
        .fails()
        .stderr_has("Run 'does-not-exist' not found")
        .stderr_has("rr list");
}

#[test]
fn show_of_unknown_run_fails() {
    let temp = Project::empty();
    temp.rr()
        .args(&["show", "does-not-exist"])
        .fails()
        .stderr_has("Run 'does-not-exist' not found");
}

#[test]
fn status_without_access_token_fails() {
    let temp = Project::empty();
    temp.record("run-wait", PENDING_RECORD);

    temp.rr()
        .env_remove("REANA_ACCESS_TOKEN")
        .args(&["status", "run-wait"])
        .fails()
        .stderr_has("no REANA access token configured")
        .stderr_has("REANA_ACCESS_TOKEN");
}

#[test]
fn finished_runs_need_no_cluster_settings() {
    let temp = Project::empty();
    temp.record("run-ok", SUCCESS_RECORD);

    for command in ["status", "cancel"] {
        temp.rr()
            .env_remove("REANA_ACCESS_TOKEN")
            .env_remove("REANA_SERVER_URL")
            .args(&[command, "run-ok"])
            .passes()
            .stdout_has("Stage: success");
    }

    assert_eq!(temp.read_record("run-ok"), SUCCESS_RECORD);
}

#[test]
fn list_without_access_token_passes() {
    let temp = Project::empty();
    temp.rr()
        .env_remove("REANA_ACCESS_TOKEN")
        .env_remove("REANA_SERVER_URL")
        .args(&["list"])
        .passes();
}

#[test]
fn corrupt_record_is_reported() {
    let temp = Project::empty();
    temp.record("run-bad", "{ not json");

    temp.rr()
        .args(&["show", "run-bad"])
        .fails()
        .stderr_has("Record of run 'run-bad' is corrupt");
}

#[test]
fn run_rejects_non_serial_workflow() {
    let temp = Project::empty();
    temp.file("workflow.json", r#"{"workflow": {"type": "cwl"}}"#);

    temp.rr()
        .args(&["run", "workflow.json"])
        .fails()
        .stderr_has("invalid workflow type 'cwl'");
}

#[test]
fn run_reports_missing_spec_file() {
    let temp = Project::empty();
    temp.rr()
        .args(&["run", "missing.json"])
        .fails()
        .stderr_has("failed to read missing.json");
}

#[test]
fn run_against_unreachable_cluster_leaves_no_run() {
    let temp = Project::empty();
    temp.file("workflow.json", r#"{"workflow": {"type": "serial"}}"#);

    temp.rr()
        .args(&["run", "workflow.json"])
        .fails()
        .stderr_has("REANA request failed");

    assert_eq!(std::fs::read_dir(temp.runs_dir()).unwrap().count(), 0);
}

#[test]
fn invalid_config_is_reported() {
    let temp = Project::empty();
    temp.file("config.toml", "timeout = \"soon\"\n");

    temp.rr().args(&["list"]).fails().stderr_has("invalid config");
}
