//! Help output specs

use crate::prelude::*;

#[test]
fn help_lists_subcommands() {
    let temp = Project::empty();

    let run = temp.kvr().args(&["--help"]).passes();
    for cmd in ["put", "del", "get", "apply", "ship", "dump"] {
        assert!(run.stdout().contains(cmd), "missing {cmd} in help");
    }
}

#[test]
fn ship_help_documents_cursor() {
    let temp = Project::empty();

    temp.kvr()
        .args(&["ship", "--help"])
        .passes()
        .stdout_has("--cursor")
        .stdout_has("--out");
}
