//! Dump specs

use crate::prelude::*;

#[test]
fn dump_lists_frames_in_order() {
    let temp = Project::empty();
    temp.kvr().args(&["put", "a", "hello"]).passes();
    temp.kvr().args(&["del", "a"]).passes();

    let run = temp
        .kvr()
        .args(&["dump", "binlog/binlog.0000001"])
        .passes();
    let lines: Vec<String> = run.stdout().lines().map(str::to_string).collect();

    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("put     a (5 bytes)"));
    assert!(lines[1].ends_with("delete  a"));
}

#[test]
fn dump_lists_invalid_events() {
    let temp = Project::empty();
    let mut frame = Vec::new();
    frame.extend_from_slice(&3u32.to_be_bytes());
    frame.extend_from_slice(&2u32.to_be_bytes());
    frame.extend_from_slice(&[0x02, b'x']);
    temp.file("bad.bin", frame);

    temp.kvr()
        .args(&["dump", "bad.bin"])
        .passes()
        .stdout_eq("3          invalid unknown event tag 0x02\n");
}

#[test]
fn dump_json() {
    let temp = Project::empty();
    temp.kvr().args(&["put", "a", "1"]).passes();

    let run = temp
        .kvr()
        .args(&["dump", "--json", "binlog/binlog.0000001"])
        .passes();
    let line: serde_json::Value = serde_json::from_str(run.stdout().trim()).unwrap();

    assert_eq!(line["kind"], "put");
    assert_eq!(line["key"], "a");
    assert_eq!(line["value_len"], 1);
}
