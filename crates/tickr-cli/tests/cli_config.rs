//! Runs the `tickr` binary to check config-file resolution and exit codes.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn tickr(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_tickr"));
    cmd.env_remove("TICKR_CONFIG")
        .env_remove("RUST_LOG")
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"));
    cmd
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn write_config(dir: &TempDir, file: &str, server_name: &str) -> PathBuf {
    let path = dir.path().join(file);
    std::fs::write(&path, format!("[server]\nname = \"{server_name}\"\n")).unwrap();
    path
}

#[test]
fn test_env_config_used_without_flag() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "env.toml", "Env Quotes");

    let output = tickr(dir.path())
        .env("TICKR_CONFIG", &path)
        .args(["config", "get", "server.name"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");
    assert_eq!(stdout(&output), "Env Quotes");
}

#[test]
fn test_flag_beats_env_config() {
    let dir = TempDir::new().unwrap();
    let env_path = write_config(&dir, "env.toml", "Env Quotes");
    let flag_path = write_config(&dir, "flag.toml", "Flag Quotes");

    let output = tickr(dir.path())
        .env("TICKR_CONFIG", &env_path)
        .arg("--config")
        .arg(&flag_path)
        .args(["config", "get", "server.name"])
        .output()
        .unwrap();
    assert_eq!(stdout(&output), "Flag Quotes");
}

#[test]
fn test_blank_env_config_falls_through_to_platform_dir() {
    let dir = TempDir::new().unwrap();

    let output = tickr(dir.path())
        .env("TICKR_CONFIG", "   ")
        .args(["config", "path"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");
    let resolved = PathBuf::from(stdout(&output));
    assert!(resolved.starts_with(dir.path()), "{}", resolved.display());
    assert!(resolved.ends_with("tickr/config.toml"), "{}", resolved.display());
}

#[test]
fn test_missing_key_exits_with_one() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "config.toml", "Quotes");

    let output = tickr(dir.path())
        .arg("--config")
        .arg(&path)
        .args(["config", "get", "provider.nope"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("provider.nope"));
}

#[test]
fn test_tickers_prints_tool_json() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "config.toml", "Quotes");

    let output = tickr(dir.path())
        .arg("--config")
        .arg(&path)
        .args(["tickers", "--sector", "energy"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");
    let body: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(body["sector"], "Energy");
    assert_eq!(body["tickers"][0]["symbol"], "XOM");
}
