// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `rr completions <shell>`
//!
//! For bash: `rr completions bash > ~/.local/share/bash-completion/completions/rr`

use clap::{Args, CommandFactory};
use clap_complete::Shell;
use std::io::Write;

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsArgs {
    /// Write the completion script for the command tree `C`
    ///
    /// Scripts are keyed by the command's own name so they match the
    /// installed binary.
    pub fn write<C: CommandFactory>(&self, out: &mut dyn Write) {
        let mut cmd = C::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(self.shell, &mut cmd, name, out);
    }
}
