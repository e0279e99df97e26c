// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run lifecycle types

mod record;
mod state;

pub use record::RunRecord;
pub use state::{Resources, RunStage, RunState};
