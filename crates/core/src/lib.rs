// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rr-core: run lifecycle types for the remote run controller
//!
//! This crate provides:
//! - The run state machine and the persisted per-run record
//! - Classification of remote status tokens onto run transitions
//! - Workflow submissions (specification, uploads, declared outputs)
//! - Clock and ID generation abstractions

pub mod clock;
pub mod id;
pub mod run;
pub mod spec;
pub mod status;

pub use clock::{Clock, FakeClock, SystemClock};
pub use id::{IdGen, RunId, SequentialIdGen, UuidIdGen};
pub use run::{Resources, RunRecord, RunStage, RunState};
pub use spec::{is_safe_relative_path, SpecError, UploadFile, WorkflowSpec};
pub use status::{StatusVocabulary, Transition};
