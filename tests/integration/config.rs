//! Configuration file handling.

use crate::common::gazelle_bare;
use gazelle_cli::test_utils::{GoFile, GoTree};
use predicates::prelude::*;

#[test]
fn test_repository_config_file() {
    let tree = GoTree::new()
        .file(
            "gazelle.toml",
            r#"go_prefix = "example.com/repo"
build_file_name = "BUILD.bazel"
build_tags = ["linux", "amd64"]

[repos]
"example.org/mono" = "mono"
"#,
        )
        .go("lib/lib.go", GoFile::package("lib").import("example.org/mono/pkg"))
        .build();

    gazelle_bare(&tree).assert().success();

    let build = tree.read("lib/BUILD.bazel");
    assert!(build.contains("deps = [\"@mono//pkg:go_default_library\"],"), "{build}");
    assert!(tree.exists("BUILD.bazel"));
    assert!(!tree.exists("lib/BUILD"));
}

#[test]
fn test_flags_override_config_file() {
    let tree = GoTree::new()
        .file("gazelle.toml", "go_prefix = \"example.com/wrong\"\nstyle = \"flat\"\n")
        .go("lib/lib.go", GoFile::package("lib").import("example.com/repo/util"))
        .go("util/util.go", GoFile::package("util"))
        .build();

    gazelle_bare(&tree)
        .args(["--go-prefix", "example.com/repo", "--style", "structured", "--mode", "print"])
        .assert()
        .success()
        .stdout(predicate::str::contains("go_prefix(\"example.com/repo\")"))
        .stdout(predicate::str::contains("\"//util:go_default_library\""));
}

#[test]
fn test_explicit_config_path() {
    let tree = GoTree::new()
        .file("conf/custom.toml", "go_prefix = \"example.com/custom\"\n")
        .go("a/a.go", GoFile::package("a"))
        .build();

    gazelle_bare(&tree)
        .args(["--config", "conf/custom.toml", "--mode", "print"])
        .assert()
        .success()
        .stdout(predicate::str::contains("go_prefix(\"example.com/custom\")"));
}

#[test]
fn test_unknown_config_key() {
    let tree = GoTree::new()
        .file("gazelle.toml", "go_prefix = \"example.com/repo\"\nlayout = \"flat\"\n")
        .go("a/a.go", GoFile::package("a"))
        .build();

    gazelle_bare(&tree)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse config file"));
}
