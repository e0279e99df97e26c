//! Run status specs

use crate::prelude::*;

#[test]
fn status_of_terminal_run_is_offline() {
    let temp = Project::empty();
    temp.record("run-ok", SUCCESS_RECORD);

    // The configured cluster refuses connections; a terminal run never asks it
    temp.rr()
        .args(&["status", "run-ok"])
        .passes()
        .stdout_eq(
            "Run: run-ok\n  Stage: success\n  Created: 2026-01-01T12:00:00Z\n  \
             Started: 2026-01-01T12:00:05Z\n  Ended: 2026-01-01T12:01:00Z\n  \
             Resources:\n    a.txt: /data/run-ok/files/a.txt\n",
        );

    assert_eq!(temp.read_record("run-ok"), SUCCESS_RECORD);
}

#[test]
fn status_of_failed_run_shows_messages() {
    let temp = Project::empty();
    temp.record("run-err", ERROR_RECORD);

    temp.rr()
        .args(&["status", "run-err"])
        .passes()
        .stdout_has("Stage: error")
        .stdout_has("step 2 exited 1");
}

#[test]
fn status_as_json() {
    let temp = Project::empty();
    temp.record("run-err", ERROR_RECORD);

    let json = temp
        .rr()
        .args(&["status", "run-err", "-o", "json"])
        .passes()
        .json();

    assert_eq!(json["run_id"], "run-err");
    assert_eq!(json["state"]["stage"], "error");
    assert_eq!(json["state"]["messages"][0], "step 2 exited 1");
}

#[test]
fn status_failure_leaves_record_unchanged() {
    let temp = Project::empty();
    temp.record("run-wait", PENDING_RECORD);

    temp.rr()
        .args(&["status", "run-wait"])
        .fails()
        .stderr_has("REANA request failed");

    assert_eq!(temp.read_record("run-wait"), PENDING_RECORD);
}

#[test]
fn show_prints_record_without_cluster() {
    let temp = Project::empty();
    temp.record("run-wait", PENDING_RECORD);

    temp.rr()
        .env_remove("REANA_SERVER_URL")
        .args(&["show", "run-wait"])
        .passes()
        .stdout_has("Workflow: wf-9")
        .stdout_has("Stage: pending")
        .stdout_has("Outputs:\n    out.txt\n");
}

#[test]
fn base_dir_flag_overrides_environment() {
    let temp = Project::empty();
    temp.file("elsewhere/run-ok/state.json", SUCCESS_RECORD);
    let elsewhere = temp.path().join("elsewhere");

    temp.rr()
        .args(&["--base-dir", elsewhere.to_str().unwrap(), "list"])
        .passes()
        .stdout_has("run-ok");
}
