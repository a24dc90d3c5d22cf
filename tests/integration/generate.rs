//! End-to-end BUILD file generation.

use crate::common::{gazelle, gazelle_bare};
use gazelle_cli::test_utils::{GoFile, GoTree};
use predicates::prelude::*;

fn sample() -> GoTree {
    GoTree::new()
        .go("main.go", GoFile::package("main").import("example.com/repo/lib").import("os"))
        .go("lib/lib.go", GoFile::package("lib").import("github.com/pkg/errors"))
        .go("lib/lib_linux.go", GoFile::package("lib").import("golang.org/x/sys/unix"))
        .go("lib/lib_windows.go", GoFile::package("lib").import("golang.org/x/sys/windows"))
        .go("lib/lib_test.go", GoFile::package("lib").import("testing"))
        .go("lib/api_test.go", GoFile::package("lib_test").import("example.com/repo/lib"))
        .go("lib/internal/impl/impl.go", GoFile::package("impl"))
        .file("lib/testdata/skipped.go", "package broken(\n")
        .file("README.md", "# repo\n")
        .build()
}

#[test]
fn test_fix_writes_structured_files() {
    let tree = sample();
    gazelle(&tree).assert().success().stdout(predicate::str::is_empty());

    let root = tree.read("BUILD");
    assert!(root.starts_with(
        "load(\"@io_bazel_rules_go//go:def.bzl\", \"go_binary\", \"go_prefix\")\n\ngo_prefix(\"example.com/repo\")\n"
    ));
    assert!(root.contains("go_binary(\n    name = \""), "{root}");
    assert!(root.contains("deps = [\"//lib:go_default_library\"],"), "{root}");

    assert_eq!(
        tree.read("lib/BUILD"),
        r#"load("@io_bazel_rules_go//go:def.bzl", "go_library", "go_test")

go_library(
    name = "go_default_library",
    srcs = [
        "lib.go",
        "lib_linux.go",
    ],
    visibility = ["//visibility:public"],
    deps = [
        "@com_github_pkg_errors//:go_default_library",
        "@org_golang_x_sys//unix:go_default_library",
    ],
)

go_test(
    name = "go_default_test",
    srcs = ["lib_test.go"],
    library = ":go_default_library",
)

go_test(
    name = "go_default_xtest",
    srcs = ["api_test.go"],
    deps = ["//lib:go_default_library"],
)
"#
    );

    let internal = tree.read("lib/internal/impl/BUILD");
    assert!(internal.contains("visibility = [\"//lib:__subpackages__\"],"), "{internal}");
    assert!(!tree.exists("lib/testdata/BUILD"));
}

#[test]
fn test_print_leaves_tree_untouched() {
    let tree = sample();
    gazelle(&tree)
        .args(["--mode", "print"])
        .assert()
        .success()
        .stdout(predicate::str::contains("go_prefix(\"example.com/repo\")"))
        .stdout(predicate::str::contains("name = \"go_default_xtest\""));

    assert!(!tree.exists("BUILD"));
    assert!(!tree.exists("lib/BUILD"));
}

#[test]
fn test_flat_style() {
    let tree = sample();
    gazelle(&tree).args(["--style", "flat"]).assert().success();

    let build = tree.read("BUILD");
    assert!(build.contains("name = \"lib\""), "{build}");
    assert!(build.contains("\"lib/lib.go\""), "{build}");
    assert!(build.contains("name = \"lib_test\""), "{build}");
    assert!(build.contains("name = \"lib/internal/impl\""), "{build}");
    assert!(!tree.exists("lib/BUILD"));
}

#[test]
fn test_subdirectory_only() {
    let tree = sample();
    gazelle(&tree).arg("lib/internal").assert().success();

    assert!(tree.exists("lib/internal/impl/BUILD"));
    assert!(!tree.exists("lib/BUILD"));
    assert!(!tree.exists("BUILD"));
}

#[test]
fn test_rerun_is_idempotent() {
    let tree = sample();
    gazelle(&tree).assert().success();
    let first = (tree.read("BUILD"), tree.read("lib/BUILD"));

    gazelle(&tree).assert().success();
    assert_eq!((tree.read("BUILD"), tree.read("lib/BUILD")), first);
}

#[test]
fn test_build_tags_select_files() {
    let tree = sample();
    gazelle_bare(&tree)
        .arg("--repo-root")
        .arg(tree.path())
        .args(["--go-prefix", "example.com/repo", "--build-tags", "windows,amd64", "--mode", "print", "lib"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"lib_windows.go\""))
        .stdout(predicate::str::contains("lib_linux.go").not());
}

#[test]
fn test_vendored_external_mode() {
    let tree = sample();
    gazelle(&tree)
        .args(["--external", "vendored", "--mode", "print", "lib"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"//vendor/github.com/pkg/errors:go_default_library\""));
}
