//! Help and version specs

use crate::prelude::*;

#[test]
fn help_lists_subcommands() {
    let temp = Project::empty();
    temp.uv()
        .args(&["--help"])
        .passes()
        .stdout_has("play")
        .stdout_has("types")
        .stdout_has("--log-level");
}

#[test]
fn play_help_lists_selector_flags() {
    let temp = Project::empty();
    temp.uv()
        .args(&["play", "--help"])
        .passes()
        .stdout_has("--select")
        .stdout_has("--pattern")
        .stdout_has("--glob")
        .stdout_has("--replay");
}

#[test]
fn version_prints_binary_name() {
    let temp = Project::empty();
    temp.uv().args(&["--version"]).passes().stdout_has("uv ");
}

#[test]
fn uv_binary_resolves_from_the_workspace_root() {
    assert!(uv_bin().is_file());
    let temp = Project::empty();
    temp.uv().args(&["types", "--help"]).passes().stdout_has("--format");
}
