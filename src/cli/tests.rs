//! Tests for argument parsing and command execution.

use super::*;
use crate::test_utils::{GoFile, GoTree};

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("gazelle").chain(args.iter().copied())).unwrap()
}

fn tree() -> GoTree {
    GoTree::new()
        .go("lib/lib.go", GoFile::package("lib").import("example.com/repo/util"))
        .go("util/util.go", GoFile::package("util"))
        .build()
}

fn run(cli: Cli) -> Result<String> {
    let mut out = Vec::new();
    cli.execute_with_writer(&mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

#[test]
fn test_cli_parsing() {
    let cli = parse(&[
        "--go-prefix",
        "example.com/repo",
        "--mode",
        "print",
        "--style",
        "flat",
        "--build-tags",
        "linux,amd64",
        "--external",
        "vendored",
        "a",
        "b",
    ]);
    assert_eq!(cli.go_prefix.as_deref(), Some("example.com/repo"));
    assert_eq!(cli.mode, Mode::Print);
    assert_eq!(cli.style, Some(Style::Flat));
    assert_eq!(cli.build_tags, vec!["linux", "amd64"]);
    assert_eq!(cli.external, Some(ExternalMode::Vendored));
    assert_eq!(cli.dirs, vec![PathBuf::from("a"), PathBuf::from("b")]);

    let cli = parse(&[]);
    assert_eq!(cli.mode, Mode::Fix);
    assert!(cli.dirs.is_empty());
}

#[test]
fn test_cli_rejects_bad_values() {
    assert!(Cli::try_parse_from(["gazelle", "--mode", "diff"]).is_err());
    assert!(Cli::try_parse_from(["gazelle", "--style", "nested"]).is_err());
    assert!(Cli::try_parse_from(["gazelle", "--verbose", "--quiet"]).is_err());
}

#[test]
fn test_build_config_log_level() {
    assert_eq!(parse(&[]).build_config().log_level, "info");
    assert_eq!(parse(&["-v"]).build_config().log_level, "debug");
    assert_eq!(parse(&["--quiet"]).build_config().log_level, "warn");
}

#[test]
fn test_print_mode() {
    let tree = tree();
    let root = tree.path().to_string_lossy().into_owned();
    let output = run(parse(&["--repo-root", &root, "--go-prefix", "example.com/repo", "--mode", "print"]))
        .unwrap();

    assert!(output.starts_with("load(\"@io_bazel_rules_go//go:def.bzl\", \"go_prefix\")\n"), "{output}");
    assert!(output.contains("deps = [\"//util:go_default_library\"],"), "{output}");
    assert!(!tree.exists("BUILD"));
    assert!(!tree.exists("lib/BUILD"));
}

#[test]
fn test_fix_mode_writes_files() {
    let tree = tree();
    let root = tree.path().to_string_lossy().into_owned();
    let output = run(parse(&["--repo-root", &root, "--go-prefix", "example.com/repo"])).unwrap();

    assert!(output.is_empty());
    assert!(tree.read("BUILD").contains("go_prefix(\"example.com/repo\")"));
    assert!(tree.read("lib/BUILD").contains("name = \"go_default_library\""));
    assert!(tree.exists("util/BUILD"));

    // A second run leaves identical content in place
    let before = tree.read("lib/BUILD");
    run(parse(&["--repo-root", &root, "--go-prefix", "example.com/repo"])).unwrap();
    assert_eq!(tree.read("lib/BUILD"), before);
}

#[test]
fn test_flat_mode_with_several_directories() {
    let tree = GoTree::new()
        .go("a/a.go", GoFile::package("a"))
        .go("b/b.go", GoFile::package("b"))
        .build();
    let root = tree.path().to_string_lossy().into_owned();
    let a = tree.join("a").to_string_lossy().into_owned();
    let b = tree.join("b").to_string_lossy().into_owned();

    run(parse(&["--repo-root", &root, "--go-prefix", "example.com/repo", "--style", "flat", &a, &b]))
        .unwrap();
    let build = tree.read("BUILD");
    assert!(build.contains("name = \"a\""), "{build}");
    assert!(build.contains("name = \"b\""), "{build}");
    assert_eq!(build.matches("go_prefix(").count(), 1, "{build}");
}

#[test]
fn test_config_file_and_flag_precedence() {
    let tree = GoTree::new()
        .file("gazelle.toml", "go_prefix = \"example.com/repo\"\nbuild_file_name = \"BUILD.bazel\"\n")
        .go("lib/lib.go", GoFile::package("lib"))
        .build();
    let root = tree.path().to_string_lossy().into_owned();

    run(parse(&["--repo-root", &root])).unwrap();
    assert!(tree.exists("lib/BUILD.bazel"));
    assert!(!tree.exists("lib/BUILD"));

    run(parse(&["--repo-root", &root, "--build-file-name", "BUILD"])).unwrap();
    assert!(tree.exists("lib/BUILD"));
}

#[test]
fn test_missing_go_prefix() {
    let tree = tree();
    let root = tree.path().to_string_lossy().into_owned();
    let err = run(parse(&["--repo-root", &root])).unwrap_err();

    let ctx = crate::core::user_friendly_error(err);
    assert!(ctx.error.to_string().contains("go_prefix is not set"), "{ctx}");
}

#[test]
fn test_directory_outside_root_is_reported() {
    let tree = tree();
    let other = GoTree::new().go("x.go", GoFile::package("x")).build();
    let root = tree.path().to_string_lossy().into_owned();
    let dir = other.path().to_string_lossy().into_owned();

    let err = run(parse(&["--repo-root", &root, "--go-prefix", "example.com/repo", &dir])).unwrap_err();
    let ctx = crate::core::user_friendly_error(err);
    assert!(matches!(ctx.error, crate::core::GazelleError::PathValidation { .. }), "{ctx}");
    assert!(ctx.suggestion.is_some());
}
