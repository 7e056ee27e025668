//! Integration tests for the `chat` binary. None of these reach the network:
//! every case fails or exits before the request is sent.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A command isolated from the user's configuration: empty home directory,
/// working directory in a scratch dir and no `CHAT_*` variables.
fn chat(work: &TempDir, home: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("chat"));
    cmd.current_dir(work.path())
        .env("HOME", home.path())
        .env("USERPROFILE", home.path())
        .env_remove("RUST_LOG");
    for key in [
        "CHAT_API_KEY",
        "CHAT_MODEL",
        "CHAT_SYSTEM_PROMPT",
        "CHAT_WEB_SEARCH",
    ] {
        cmd.env_remove(key);
    }
    cmd
}

fn dirs() -> (TempDir, TempDir) {
    (TempDir::new().unwrap(), TempDir::new().unwrap())
}

#[test]
fn test_cli_help() {
    let (work, home) = dirs();
    chat(&work, &home)
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: chat"))
        .stdout(predicate::str::contains("--web-search"))
        .stdout(predicate::str::contains("CHAT_API_KEY"));
}

#[test]
fn test_cli_version() {
    let (work, home) = dirs();
    chat(&work, &home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("chat"));
}

#[test]
fn test_missing_prompt_prints_usage() {
    let (work, home) = dirs();
    chat(&work, &home)
        .args(["-k", "key"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("prompt is required"))
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_unknown_flag_exits_one() {
    let (work, home) = dirs();
    chat(&work, &home)
        .args(["-x", "hello"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("-x"));
}

#[test]
fn test_missing_api_key() {
    let (work, home) = dirs();
    chat(&work, &home)
        .arg("hello")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("API key is required"));
}

#[test]
fn test_invalid_selector() {
    let (work, home) = dirs();
    fs::write(work.path().join("a.txt"), "L1\nL2\nL3").unwrap();
    chat(&work, &home)
        .args(["-k", "key", "-f", "a.txt:0", "hello"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid line number in path: a.txt:0"));
}

#[test]
fn test_selector_past_end_of_file() {
    let (work, home) = dirs();
    fs::write(work.path().join("a.txt"), "L1\nL2\nL3").unwrap();
    chat(&work, &home)
        .args(["-k", "key", "-f", "a.txt:1, a.txt:5", "hello"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("line 5 out of range"));
}

#[test]
fn test_missing_context_file() {
    let (work, home) = dirs();
    chat(&work, &home)
        .args(["-k", "key", "-f", "missing.txt", "hello"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing.txt"));
}

#[test]
fn test_empty_config_key_does_not_satisfy_validation() {
    let (work, home) = dirs();
    fs::write(
        work.path().join(".chatconfig"),
        "CHAT_API_KEY= # set me\nCHAT_MODEL=gpt-x\n",
    )
    .unwrap();
    chat(&work, &home)
        .arg("hello")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("API key is required"));
}
