//! Error reporting specs

use crate::prelude::*;

#[test]
fn get_missing_key_fails() {
    let temp = Project::empty();

    temp.kvr()
        .args(&["get", "nope"])
        .fails()
        .stderr_has("not found: nope");
}

#[test]
fn invalid_config_is_rejected() {
    let temp = Project::with_config("[binlog]\nmax_file_count = 0\n");

    temp.kvr()
        .args(&["get", "k"])
        .fails()
        .stderr_has("invalid config");
}

#[test]
fn unknown_config_key_is_rejected() {
    let temp = Project::with_config("[binlog]\nrotate_at = 5\n");

    temp.kvr().args(&["get", "k"]).fails().stderr_has("parse error");
}

#[test]
fn ship_requires_cursor() {
    let temp = Project::empty();

    temp.kvr().args(&["ship"]).fails().stderr_has("--cursor");
}

#[test]
fn apply_missing_file_fails() {
    let temp = Project::empty();

    temp.kvr()
        .args(&["apply", "missing.bin"])
        .fails()
        .stderr_has("stream read failed");
}
