//! Local read/write specs

use crate::prelude::*;

#[test]
fn put_then_get() {
    let temp = Project::empty();

    temp.kvr().args(&["put", "user", "alice"]).passes();
    temp.kvr().args(&["get", "user"]).passes().stdout_eq("alice\n");
}

#[test]
fn put_overwrites() {
    let temp = Project::empty();

    temp.kvr().args(&["put", "user", "alice"]).passes();
    temp.kvr().args(&["put", "user", "bob"]).passes();
    temp.kvr().args(&["get", "user"]).passes().stdout_eq("bob\n");
}

#[test]
fn del_removes_key() {
    let temp = Project::empty();

    temp.kvr().args(&["put", "user", "alice"]).passes();
    temp.kvr().args(&["del", "user"]).passes();
    temp.kvr().args(&["get", "user"]).fails().stderr_has("not found");
}

#[test]
fn writes_land_in_configured_locations() {
    let temp = Project::with_config(SMALL_BINLOG_CONFIG);

    temp.kvr().args(&["put", "k", "v"]).passes();

    assert!(temp.path().join("data/store.json").is_file());
    assert!(temp.path().join("binlog/binlog.0000001").is_file());
}

#[test]
fn binlog_records_each_write() {
    let temp = Project::empty();

    temp.kvr().args(&["put", "a", "1"]).passes();
    temp.kvr().args(&["del", "a"]).passes();

    temp.kvr()
        .args(&["dump", "binlog/binlog.0000001"])
        .passes()
        .stdout_has("put     a (1 bytes)")
        .stdout_has("delete  a");
}

#[test]
fn small_binlog_rotates() {
    let temp = Project::with_config(SMALL_BINLOG_CONFIG);

    for i in 0..10 {
        let key = format!("key-{i}");
        temp.kvr().args(&["put", &key, "value"]).passes();
    }

    assert!(temp.path().join("binlog/binlog.0000002").is_file());
}
