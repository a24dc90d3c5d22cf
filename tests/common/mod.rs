//! Shared helpers for integration tests.

use assert_cmd::Command;
use gazelle_cli::test_utils::GoTree;

/// A `gazelle` command rooted at `tree`, with a fixed go_prefix and
/// build tags so results do not depend on the host platform.
pub fn gazelle(tree: &GoTree) -> Command {
    let mut cmd = Command::cargo_bin("gazelle").unwrap();
    cmd.current_dir(tree.path())
        .env_remove("RUST_LOG")
        .arg("--repo-root")
        .arg(tree.path())
        .args(["--go-prefix", "example.com/repo", "--build-tags", "linux,amd64"]);
    cmd
}

/// A `gazelle` command rooted at `tree` without any preset flags.
pub fn gazelle_bare(tree: &GoTree) -> Command {
    let mut cmd = Command::cargo_bin("gazelle").unwrap();
    cmd.current_dir(tree.path()).env_remove("RUST_LOG");
    cmd
}
