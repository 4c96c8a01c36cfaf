// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[test]
fn file_name_is_zero_padded() {
    assert_eq!(file_name(1), "binlog.0000001");
    assert_eq!(file_name(1234567), "binlog.1234567");
}

#[test]
fn parse_file_name_inverts_file_name() {
    assert_eq!(parse_file_name(&file_name(42)), Some(42));
}

#[parameterized(
    other_prefix = { "wal.0000001" },
    no_digits = { "binlog." },
    no_dot = { "binlog0000001" },
    trailing_suffix = { "binlog.0000001.tmp" },
    index_file = { "binlog.index" },
)]
fn parse_file_name_rejects(name: &str) {
    assert_eq!(parse_file_name(name), None);
}
