// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Run-state reconciliation engine

mod engine;
mod error;
mod upload;

pub use engine::{Engine, CANCELED_BY_USER, UNKNOWN_REASON};
pub use error::EngineError;
