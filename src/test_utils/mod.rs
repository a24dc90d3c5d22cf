//! Test utilities for Gazelle
//!
//! This module provides helpers for writing tests: throwaway Go source trees
//! and one-time logging setup.
//!
//! # Example
//!
//! ```rust,no_run
//! use gazelle_cli::test_utils::{GoFile, GoTree};
//!
//! let tree = GoTree::new()
//!     .go("lib/lib.go", GoFile::package("lib").import("fmt"))
//!     .file("lib/lib_test.go", "package lib\n")
//!     .build();
//! assert!(tree.exists("lib/lib.go"));
//! ```

pub mod fixtures;

pub use fixtures::{GoFile, GoTree, GoTreeBuilder};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// The subscriber is installed once per process, no matter how often this is
/// called. With `level` set it wins; otherwise `RUST_LOG` is used when present,
/// and logging stays off when neither is given.
///
/// ```bash
/// RUST_LOG=gazelle_cli=trace cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
