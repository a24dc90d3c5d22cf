//! Go package discovery.
//!
//! The [`Walker`] enumerates the directories of a repository and loads a
//! [`Package`] description from the Go files of each one, honoring build
//! constraints the way the Go toolchain does for the configured build tags.
//!
//! # Example
//!
//! ```rust,no_run
//! use gazelle_cli::packages::Walker;
//! use std::path::Path;
//!
//! # fn example() -> gazelle_cli::core::Result<()> {
//! let walker = Walker::new(&["linux".to_string(), "amd64".to_string()]);
//! walker.walk(Path::new("/src/repo"), |pkg| {
//!     println!("{} ({} files)", pkg.dir.display(), pkg.go_files.len());
//!     Ok(())
//! })?;
//! # Ok(())
//! # }
//! ```

pub mod constraint;
pub mod parse;
pub mod walk;

pub use constraint::{BuildTags, Constraint};
pub use walk::Walker;

use std::path::PathBuf;

/// Description of the Go package in one directory.
///
/// File lists are sorted by name. Import lists are sorted and deduplicated
/// per scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Package {
    /// Absolute directory of the package
    pub dir: PathBuf,
    /// Package name from the package clause (without `_test`)
    pub name: String,
    /// Non-test source files
    pub go_files: Vec<String>,
    /// `_test.go` files of the package itself
    pub test_go_files: Vec<String>,
    /// `_test.go` files of the `<name>_test` package
    pub xtest_go_files: Vec<String>,
    /// Imports of `go_files`
    pub imports: Vec<String>,
    /// Imports of `test_go_files`
    pub test_imports: Vec<String>,
    /// Imports of `xtest_go_files`
    pub xtest_imports: Vec<String>,
}

impl Package {
    /// Reports whether the package builds an executable (`package main`).
    pub fn is_command(&self) -> bool {
        self.name == "main"
    }
}
