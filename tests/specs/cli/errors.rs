//! CLI error specs

use crate::prelude::*;

#[test]
fn malformed_line_reports_its_position() {
    let temp = Project::empty();
    let file = temp.file("bad.jsonl", "{\"type\":\"view\"}\n{oops\n");
    temp.uv()
        .args(&["play", file.to_str().unwrap()])
        .fails()
        .stderr_has("bad.jsonl:2");
}

#[test]
fn line_without_type_is_rejected() {
    let temp = Project::empty();
    temp.uv()
        .args(&["types"])
        .stdin("{\"page\":\"home\"}\n")
        .fails()
        .stderr_has("stdin:1")
        .stderr_has("event has no type");
}

#[test]
fn missing_input_file_fails() {
    let temp = Project::empty();
    temp.uv()
        .args(&["play", "missing.jsonl"])
        .fails()
        .stderr_has("failed to open missing.jsonl");
}

#[test]
fn invalid_pattern_fails() {
    let temp = Project::empty();
    temp.uv()
        .args(&["play", "--pattern", "("])
        .stdin(SESSION)
        .fails()
        .stderr_has("invalid selector pattern");
}

#[test]
fn selector_flags_conflict() {
    let temp = Project::empty();
    temp.uv()
        .args(&["play", "--select", "view", "--glob", "ec:*"])
        .fails()
        .stderr_has("cannot be used with");
}

#[test]
fn unknown_log_level_is_rejected() {
    let temp = Project::empty();
    temp.uv()
        .args(&["--log-level", "loud", "types"])
        .fails()
        .stderr_has("loud");
}

#[test]
fn bad_config_fails() {
    let temp = Project::empty();
    temp.file("config/uv/config.toml", "log_level = 3\n");
    temp.uv()
        .args(&["types"])
        .stdin(SESSION)
        .fails()
        .stderr_has("failed to load config");
}
