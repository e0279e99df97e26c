// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::collections::HashMap;

fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

fn parse(content: &str) -> FileConfig {
    FileConfig::parse(content, Path::new("config.toml")).unwrap()
}

#[test]
fn file_values_are_used() {
    let file = parse(
        r#"
        base_dir = "/srv/runs"
        server_url = "https://reana.example.org"
        access_token = "secret"
        workflow_name = "benchmark"
        timeout = "2m 30s"
        log_file = "/var/log/rr.log"
        "#,
    );

    let config = Config::resolve(file, env(&[]), None).unwrap();

    assert_eq!(config.base_dir, PathBuf::from("/srv/runs"));
    assert_eq!(config.workflow_name, "benchmark");
    assert_eq!(config.timeout, Duration::from_secs(150));
    assert_eq!(config.log_file, Some(PathBuf::from("/var/log/rr.log")));

    let reana = config.reana().unwrap();
    assert_eq!(reana.server_url, "https://reana.example.org");
    assert_eq!(reana.access_token, "secret");
    assert_eq!(reana.workflow_name, "benchmark");
    assert_eq!(reana.timeout, Duration::from_secs(150));
}

#[test]
fn environment_overrides_file() {
    let file = parse(
        r#"
        base_dir = "/srv/runs"
        server_url = "https://file.example.org"
        access_token = "from-file"
        "#,
    );
    let vars = env(&[
        (ENV_SERVER_URL, "https://env.example.org"),
        (ENV_ACCESS_TOKEN, "from-env"),
        (ENV_BASE_DIR, "/tmp/env-runs"),
    ]);

    let config = Config::resolve(file, vars, None).unwrap();

    assert_eq!(config.base_dir, PathBuf::from("/tmp/env-runs"));
    assert_eq!(config.server_url.as_deref(), Some("https://env.example.org"));
    assert_eq!(config.access_token.as_deref(), Some("from-env"));
}

#[test]
fn flag_overrides_environment() {
    let vars = env(&[(ENV_BASE_DIR, "/tmp/env-runs")]);
    let config =
        Config::resolve(FileConfig::default(), vars, Some(PathBuf::from("/tmp/flag"))).unwrap();
    assert_eq!(config.base_dir, PathBuf::from("/tmp/flag"));
}

#[test]
fn blank_environment_values_are_ignored() {
    let file = parse(r#"access_token = "from-file""#);
    let vars = env(&[(ENV_ACCESS_TOKEN, "  ")]);

    let config = Config::resolve(file, vars, Some(PathBuf::from("/tmp"))).unwrap();

    assert_eq!(config.access_token.as_deref(), Some("from-file"));
}

#[test]
fn defaults_apply_without_file() {
    let config =
        Config::resolve(FileConfig::default(), env(&[]), Some(PathBuf::from("/tmp"))).unwrap();

    assert_eq!(config.workflow_name, DEFAULT_WORKFLOW_NAME);
    assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    assert!(config.log_file.is_none());
}

#[test]
fn remote_settings_are_required_only_for_the_client() {
    let base = Some(PathBuf::from("/tmp"));

    let config = Config::resolve(FileConfig::default(), env(&[]), base.clone()).unwrap();
    assert!(matches!(config.reana(), Err(ConfigError::MissingServerUrl)));

    let config = Config::resolve(
        FileConfig::default(),
        env(&[(ENV_SERVER_URL, "http://localhost:30080")]),
        base,
    )
    .unwrap();
    assert!(matches!(config.reana(), Err(ConfigError::MissingAccessToken)));
}

#[test]
fn unknown_fields_are_rejected() {
    let result = FileConfig::parse("sever_url = \"typo\"", Path::new("config.toml"));
    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

#[test]
fn invalid_timeout_is_rejected() {
    let result = FileConfig::parse("timeout = \"soon\"", Path::new("config.toml"));
    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

#[test]
fn explicit_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    let result = FileConfig::load(Some(&path));

    assert!(matches!(result, Err(ConfigError::Read { .. })));
}

#[test]
fn explicit_file_is_loaded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "workflow_name = \"nightly\"\n").unwrap();

    let file = FileConfig::load(Some(&path)).unwrap();

    assert_eq!(file.workflow_name.as_deref(), Some("nightly"));
}
