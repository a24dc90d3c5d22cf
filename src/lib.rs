//! Gazelle - BUILD file generator for Go projects built with Bazel
//!
//! Gazelle inspects a tree of Go packages and derives the `go_library`,
//! `go_binary` and `go_test` rules Bazel needs to build them, including the
//! labels of every dependency, whether it lives in the same repository or in
//! an external one.
//!
//! # Architecture Overview
//!
//! Data flows one way through a generation run:
//!
//! ```text
//! packages::Walker -> generator::Generator -> rules::RuleGenerator -> FileBuilder -> bzl::File
//!                                                     |
//!                                              rules::Resolver
//! ```
//!
//! - The [`packages`] walker enumerates directories and loads a
//!   [`packages::Package`] from the Go files of each one.
//! - The [`rules`] module resolves import paths to Bazel labels and builds the
//!   rules of each package.
//! - The [`generator`] module drives the walk and collects rules into build
//!   files, one per directory or one for the whole tree.
//! - The [`bzl`] module models and prints the resulting build files.
//!
//! Every run recomputes its output from the file system; identical input
//! always produces byte-for-byte identical files.
//!
//! # Layout Styles
//!
//! - **Structured** (default): every Go package gets its own Bazel package.
//!   `example.com/repo/lib` resolves to `//lib:go_default_library`.
//! - **Flat**: a single BUILD file at the repository root holds every rule.
//!   `example.com/repo/lib` resolves to `:lib`.
//!
//! # Configuration (gazelle.toml)
//!
//! ```toml
//! go_prefix = "example.com/repo"
//! style = "structured"
//! build_file_name = "BUILD.bazel"
//!
//! [repos]
//! "example.org/monorepo" = "org_example_monorepo"
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use gazelle_cli::bzl::format_file;
//! use gazelle_cli::generator::{Generator, GeneratorConfig};
//! use gazelle_cli::rules::RemoteResolver;
//!
//! # fn example() -> gazelle_cli::core::Result<()> {
//! let generator = Generator::new(
//!     GeneratorConfig::new("/src/repo", "example.com/repo"),
//!     Box::new(RemoteResolver::new()),
//! )?;
//! for file in generator.generate("/src/repo")? {
//!     println!("# {}\n{}", file.path.display(), format_file(&file));
//! }
//! # Ok(())
//! # }
//! ```

// Generation pipeline
pub mod bzl;
pub mod generator;
pub mod packages;
pub mod rules;

// Command line and configuration
pub mod cli;
pub mod config;

// Supporting modules
pub mod constants;
pub mod core;
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
