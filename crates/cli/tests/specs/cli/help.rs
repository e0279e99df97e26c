//! Help and usage specs

use crate::prelude::*;

#[test]
fn help_lists_commands() {
    let temp = Project::empty();
    temp.rr()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage: rr")
        .stdout_has("run")
        .stdout_has("status")
        .stdout_has("cancel")
        .stdout_has("list")
        .stdout_has("show");
}

#[test]
fn missing_subcommand_fails() {
    let temp = Project::empty();
    temp.rr().fails().stderr_has("Usage: rr");
}

#[test]
fn completions_print_script() {
    let temp = Project::empty();
    temp.rr()
        .args(&["completions", "bash"])
        .passes()
        .stdout_has("_rr()");
}

#[test]
fn completions_cover_every_shell_without_config() {
    let temp = Project::empty();
    temp.file("config.toml", "this is = not [toml");
    for (shell, marker) in [
        ("bash", "complete -F _rr"),
        ("zsh", "#compdef rr"),
        ("fish", "complete -c rr"),
    ] {
        temp.rr()
            .args(&["completions", shell])
            .passes()
            .stdout_has(marker)
            .stdout_has("cancel");
    }
}
