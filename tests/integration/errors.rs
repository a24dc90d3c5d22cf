//! Failure reporting.

use crate::common::{gazelle, gazelle_bare};
use gazelle_cli::test_utils::{GoFile, GoTree};
use predicates::prelude::*;

#[test]
fn test_missing_go_prefix() {
    let tree = GoTree::new().go("a/a.go", GoFile::package("a")).build();
    gazelle_bare(&tree)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("go_prefix is not set"))
        .stderr(predicate::str::contains("suggestion"));
    assert!(!tree.exists("a/BUILD"));
}

#[test]
fn test_invalid_build_file_name() {
    let tree = GoTree::new().go("a/a.go", GoFile::package("a")).build();
    gazelle(&tree)
        .args(["--build-file-name", "BUILD.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("build_file_name must be one of BUILD, BUILD.bazel"));
}

#[test]
fn test_directory_outside_repository() {
    let tree = GoTree::new().go("a/a.go", GoFile::package("a")).build();
    let other = GoTree::new().go("b/b.go", GoFile::package("b")).build();

    gazelle(&tree)
        .arg(other.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not under the repository root"));
}

#[test]
fn test_unresolvable_import_writes_nothing() {
    let tree = GoTree::new()
        .go("a/a.go", GoFile::package("a"))
        .go("b/b.go", GoFile::package("b").import("./relative"))
        .build();

    gazelle(&tree)
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot resolve import path \"./relative\""));
    assert!(!tree.exists("a/BUILD"));
    assert!(!tree.exists("BUILD"));
}

#[test]
fn test_conflicting_packages() {
    let tree = GoTree::new()
        .go("m/a.go", GoFile::package("a"))
        .go("m/b.go", GoFile::package("b"))
        .build();

    gazelle(&tree)
        .assert()
        .failure()
        .stderr(predicate::str::contains("found packages a (a.go), b (b.go)"));
}

#[test]
fn test_unparsable_source() {
    let tree = GoTree::new().file("bad/bad.go", "func main() {}\n").build();

    gazelle(&tree)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load Go package"))
        .stderr(predicate::str::contains("bad.go"));
}
