//! Shipping specs
//!
//! A master project ships groups from its binlog; a replica project
//! applies the shipped stream.

use crate::prelude::*;

/// Ship until the cursor stops moving
fn ship_all(master: &Project, out: &str) {
    let mut last = String::new();
    for _ in 0..50 {
        let run = master
            .kvr()
            .args(&["ship", "--cursor", "master.info", "--out", out])
            .passes();
        let cursor = String::from_utf8_lossy(&master.read("master.info")).into_owned();
        if run.stderr().contains("Shipped 0 bytes") && cursor == last {
            return;
        }
        last = cursor;
    }
    panic!("shipping never caught up");
}

#[test]
fn ship_saves_cursor() {
    let master = Project::empty();
    master.kvr().args(&["put", "a", "1"]).passes();

    master
        .kvr()
        .args(&["ship", "--cursor", "master.info", "--out", "stream.bin"])
        .passes()
        .stderr_has("cursor at 1:");

    let cursor: serde_json::Value = serde_json::from_slice(&master.read("master.info")).unwrap();
    assert_eq!(cursor["log_file_index"], 1);
    assert!(cursor["log_pos"].as_i64().unwrap() > 0);
}

#[test]
fn ship_to_stdout_writes_frames() {
    let master = Project::empty();
    master.kvr().args(&["put", "a", "1"]).passes();

    let run = master
        .kvr()
        .args(&["ship", "--cursor", "master.info"])
        .passes();

    assert_eq!(run.stdout_bytes(), master.read("binlog/binlog.0000001").as_slice());
}

#[test]
fn replica_catches_up_across_rotation() {
    let master = Project::with_config(SMALL_BINLOG_CONFIG);
    for i in 0..8 {
        let key = format!("key-{i}");
        master.kvr().args(&["put", &key, "value"]).passes();
    }
    master.kvr().args(&["del", "key-3"]).passes();

    ship_all(&master, "stream.bin");

    let replica = Project::empty();
    replica.file("stream.bin", master.read("stream.bin"));
    replica.kvr().args(&["apply", "stream.bin"]).passes();

    replica.kvr().args(&["get", "key-7"]).passes().stdout_eq("value\n");
    replica.kvr().args(&["get", "key-3"]).fails();
}

#[test]
fn resync_cursor_fails() {
    let master = Project::empty();
    master.kvr().args(&["put", "a", "1"]).passes();
    master.file("master.info", r#"{"log_file_index": -1, "log_pos": 0}"#);

    master
        .kvr()
        .args(&["ship", "--cursor", "master.info"])
        .fails()
        .stderr_has("full resync");
}

#[test]
fn purged_file_requires_resync() {
    let master = Project::empty();
    master.kvr().args(&["put", "a", "1"]).passes();
    // Index 2 becomes active and index 1 is gone
    master.file("binlog/binlog.0000002", b"");
    std::fs::remove_file(master.path().join("binlog/binlog.0000001")).unwrap();
    master.file("master.info", r#"{"log_file_index": 1, "log_pos": 0}"#);

    master
        .kvr()
        .args(&["ship", "--cursor", "master.info"])
        .fails()
        .stderr_has("full resync");

    let cursor: serde_json::Value = serde_json::from_slice(&master.read("master.info")).unwrap();
    assert_eq!(cursor["log_file_index"], -1);
}

#[test]
fn failed_ship_keeps_progress_of_shipped_frames() {
    let master = Project::empty();
    master.kvr().args(&["put", "a", "1"]).passes();
    let good = master.read("binlog/binlog.0000001");
    // A partial frame of the same group: its group key and half a length
    let mut torn = good.clone();
    torn.extend_from_slice(&good[..4]);
    torn.extend_from_slice(&[0, 0]);
    master.file("binlog/binlog.0000001", &torn);
    master.file("master.info", r#"{"log_file_index":1,"log_pos":0}"#);

    for _ in 0..2 {
        master
            .kvr()
            .args(&["ship", "--cursor", "master.info", "--out", "stream.bin"])
            .fails();
        let cursor: serde_json::Value = serde_json::from_slice(&master.read("master.info")).unwrap();
        assert_eq!(cursor["log_file_index"], 1);
        assert_eq!(cursor["log_pos"].as_u64().unwrap(), good.len() as u64);
    }

    // The retry resumed after the shipped frame instead of sending it again
    assert_eq!(master.read("stream.bin"), good);
}
