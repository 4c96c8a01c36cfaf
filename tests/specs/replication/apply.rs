//! Apply specs

use crate::prelude::*;

fn frame(group_key: u32, payload: &[u8]) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(&group_key.to_be_bytes());
    buf.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    buf.extend_from_slice(payload);
    buf
}

fn put(key: &str, value: &str) -> Vec<u8> {
    let mut buf = vec![0x01];
    buf.extend_from_slice(&(key.len() as u16).to_be_bytes());
    buf.extend_from_slice(key.as_bytes());
    buf.extend_from_slice(value.as_bytes());
    buf
}

#[test]
fn apply_file_reports_groups() {
    let temp = Project::empty();
    let stream = [
        frame(5, &put("a", "1")),
        frame(5, &put("b", "2")),
        frame(7, &put("c", "3")),
    ]
    .concat();
    temp.file("stream.bin", stream);

    temp.kvr()
        .args(&["apply", "stream.bin"])
        .passes()
        .stdout_has("Applied 3 frames: 2 groups committed, 0 groups failed, 0 frames skipped");
    temp.kvr().args(&["get", "c"]).passes().stdout_eq("3\n");
}

#[test]
fn apply_from_stdin() {
    let temp = Project::empty();

    temp.kvr()
        .args(&["apply", "-"])
        .stdin(frame(1, &put("k", "v")))
        .passes();
    temp.kvr().args(&["get", "k"]).passes().stdout_eq("v\n");
}

#[test]
fn invalid_event_is_skipped() {
    let temp = Project::empty();
    let stream = [frame(1, &[0x02, b'x']), frame(1, &put("ok", "1"))].concat();

    temp.kvr()
        .args(&["apply", "-"])
        .stdin(stream)
        .passes()
        .stdout_has("1 frames skipped");
    temp.kvr().args(&["get", "ok"]).passes().stdout_eq("1\n");
}

#[test]
fn truncated_stream_fails() {
    let temp = Project::empty();
    let mut stream = frame(1, &put("k", "v"));
    stream.truncate(stream.len() - 1);

    temp.kvr()
        .args(&["apply", "-"])
        .stdin(stream)
        .fails()
        .stderr_has("stream read failed");
    temp.kvr().args(&["get", "k"]).fails();
}

#[test]
fn applied_events_are_logged_locally() {
    let temp = Project::empty();

    temp.kvr()
        .args(&["apply", "-"])
        .stdin(frame(9, &put("k", "v")))
        .passes();

    temp.kvr()
        .args(&["dump", "binlog/binlog.0000001"])
        .passes()
        .stdout_has("put     k (1 bytes)");
}
