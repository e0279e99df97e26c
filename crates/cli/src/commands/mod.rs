// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod run;
pub mod runs;

use crate::config::Config;
use crate::error::RrError;
use anyhow::Result;
use rr_adapters::{ReanaClient, TracedRemoteClient};
use rr_core::{SystemClock, UuidIdGen};
use rr_engine::Engine;
use rr_storage::RunStore;

/// Engine wired to the configured REANA cluster
pub type CliEngine = Engine<TracedRemoteClient<ReanaClient>, SystemClock, UuidIdGen>;

/// Open the run store named by the configuration
pub fn store(config: &Config) -> Result<RunStore> {
    Ok(RunStore::open(&config.base_dir)?)
}

/// Build an engine; fails if the remote cluster is not configured
pub fn engine(config: &Config) -> Result<CliEngine> {
    let reana = config.reana().map_err(RrError::remote_not_configured)?;
    let remote = TracedRemoteClient::new(ReanaClient::new(reana));
    Ok(Engine::new(remote, store(config)?, SystemClock, UuidIdGen))
}
