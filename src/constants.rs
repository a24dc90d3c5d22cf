//! Global constants used throughout the Gazelle codebase.
//!
//! This module contains the reserved rule names, rule kinds and file names
//! shared by the resolver, the rule generator and the file builders.
//! Defining them centrally keeps generated names stable across modules.

/// Name of the default `go_library` rule in a Go package directory.
///
/// It must be consistent with `_DEFAULT_LIB` in `go/def.bzl` of rules_go.
pub const DEFAULT_LIB_NAME: &str = "go_default_library";

/// Name of the internal test corresponding to [`DEFAULT_LIB_NAME`].
///
/// It only needs to be unique within the Bazel package.
pub const DEFAULT_TEST_NAME: &str = "go_default_test";

/// Name of the external test corresponding to [`DEFAULT_LIB_NAME`].
pub const DEFAULT_XTEST_NAME: &str = "go_default_xtest";

/// Label of the Skylark file which provides the Go rules.
pub const DEFAULT_RULES_BZL: &str = "@io_bazel_rules_go//go:def.bzl";

/// Rule kinds recognized when building the `load` statement of a file.
pub const KNOWN_RULE_KINDS: &[&str] =
    &["go_prefix", "go_library", "go_binary", "go_test", "cgo_library"];

/// Default name of generated build files.
pub const DEFAULT_BUILD_FILE_NAME: &str = "BUILD";

/// Build file names Bazel accepts.
pub const VALID_BUILD_FILE_NAMES: &[&str] = &["BUILD", "BUILD.bazel"];

/// Name of the optional per-repository configuration file.
pub const CONFIG_FILE_NAME: &str = "gazelle.toml";

/// Visibility attached to packages outside any `internal` directory.
pub const PUBLIC_VISIBILITY: &str = "//visibility:public";
