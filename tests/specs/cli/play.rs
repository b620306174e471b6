//! `uv play` specs
//!
//! Events are emitted in file order; a listener prints each delivery as one
//! JSON line.

use crate::prelude::*;

fn types_of(out: &Outcome) -> Vec<String> {
    out.json_lines()
        .iter()
        .map(|e| e["meta"]["type"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn play_prints_every_event_by_default() {
    let temp = Project::empty();
    let file = temp.file("session.jsonl", SESSION);

    let out = temp.uv().args(&["play", file.to_str().unwrap()]).passes();
    assert_eq!(
        types_of(&out),
        vec!["view", "search", "ec:product.view", "view", "ec:transaction"]
    );
}

#[test]
fn play_keeps_payload_fields() {
    let temp = Project::empty();
    let out = temp
        .uv()
        .args(&["play", "--select", "search"])
        .stdin(SESSION)
        .passes();

    let lines = out.json_lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["query"], "shoes");
    assert_eq!(lines[0]["resultCount"], 10);
    assert!(lines[0].get("type").is_none());
}

#[test]
fn play_exact_selector_filters() {
    let temp = Project::empty();
    let out = temp
        .uv()
        .args(&["play", "--select", "view"])
        .stdin(SESSION)
        .passes();
    assert_eq!(types_of(&out), vec!["view", "view"]);
}

#[test]
fn play_pattern_selector_matches_by_regex() {
    let temp = Project::empty();
    let out = temp
        .uv()
        .args(&["play", "--pattern", "^ec:"])
        .stdin(SESSION)
        .passes();
    assert_eq!(types_of(&out), vec!["ec:product.view", "ec:transaction"]);
}

#[test]
fn play_glob_selector_matches_segments() {
    let temp = Project::empty();
    let out = temp
        .uv()
        .args(&["play", "--glob", "ec:*"])
        .stdin(SESSION)
        .passes();
    assert_eq!(types_of(&out), vec!["ec:product.view", "ec:transaction"]);
}

#[test]
fn play_replay_matches_live_delivery() {
    let temp = Project::empty();
    let live = temp
        .uv()
        .args(&["play", "--pattern", "view"])
        .stdin(SESSION)
        .passes()
        .stdout();

    temp.uv()
        .args(&["play", "--pattern", "view", "--replay"])
        .stdin(SESSION)
        .passes()
        .stdout_eq(&live);
}

#[test]
fn play_empty_input_prints_nothing() {
    let temp = Project::empty();
    temp.uv().args(&["play"]).stdin("\n\n").passes().stdout_eq("");
}

#[test]
fn play_info_level_logs_diagnostics() {
    let temp = Project::empty();
    temp.uv()
        .args(&["--log-level", "info", "play"])
        .stdin(SESSION)
        .passes()
        .stderr_has("view event emitted")
        .stderr_has("Attaching event handler");
}

#[test]
fn play_default_level_is_quiet() {
    let temp = Project::empty();
    temp.uv()
        .args(&["play"])
        .stdin(SESSION)
        .passes()
        .stderr_lacks("event emitted");
}

#[test]
fn play_reads_log_level_from_config() {
    let temp = Project::empty();
    temp.file("config/uv/config.toml", "log_level = \"info\"\n");
    temp.uv()
        .args(&["play"])
        .stdin(SESSION)
        .passes()
        .stderr_has("search event emitted");
}

#[test]
fn play_explicit_config_overrides_default_location() {
    let temp = Project::empty();
    temp.file("config/uv/config.toml", "log_level = \"info\"\n");
    let quiet = temp.file("quiet.toml", "log_level = \"off\"\n");
    temp.uv()
        .args(&["--config", quiet.to_str().unwrap(), "play"])
        .stdin(SESSION)
        .passes()
        .stderr_lacks("event emitted");
}
