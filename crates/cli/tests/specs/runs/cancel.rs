//! Run cancellation specs

use crate::prelude::*;
use rr_core::RunRecord;

#[test]
fn cancel_of_terminal_run_is_noop() {
    let temp = Project::empty();
    temp.record("run-ok", SUCCESS_RECORD);

    temp.rr()
        .args(&["cancel", "run-ok"])
        .passes()
        .stdout_has("Stage: success");

    assert_eq!(temp.read_record("run-ok"), SUCCESS_RECORD);
}

#[test]
fn cancel_of_pending_run_marks_it_failed() {
    let temp = Project::empty();
    temp.record("run-wait", PENDING_RECORD);

    // A pending run is not stopped remotely, so the unreachable cluster is fine
    temp.rr()
        .args(&["cancel", "run-wait"])
        .passes()
        .stdout_has("Stage: error")
        .stdout_has("canceled by user");

    let record: RunRecord = serde_json::from_str(&temp.read_record("run-wait")).unwrap();
    assert!(record.state.is_error());
    assert_eq!(record.state.messages(), ["canceled by user"]);
    assert_eq!(record.workflow_id, "wf-9");
}

#[test]
fn cancel_of_running_run_succeeds_when_stop_fails() {
    let temp = Project::empty();
    temp.record(
        "run-live",
        r#"{
  "workflowId": "wf-10",
  "outputs": [],
  "state": {
    "stage": "running",
    "created_at": "2026-01-01T12:00:00Z",
    "started_at": "2026-01-01T12:00:05Z"
  }
}
"#,
    );

    temp.rr()
        .env("RR_LOG", "off")
        .args(&["cancel", "run-live"])
        .passes()
        .stdout_has("canceled by user")
        .stdout_has("Started: 2026-01-01T12:00:05Z");
}
