//! Generation of BUILD files for a repository.
//!
//! [`Generator`] walks a directory of the repository, turns every Go package
//! into rules with a [`RuleGenerator`] and collects them into build file
//! documents with the [`FileBuilder`] of the configured [`Style`].
//!
//! ```rust,no_run
//! use gazelle_cli::bzl::format_file;
//! use gazelle_cli::generator::{Generator, GeneratorConfig};
//! use gazelle_cli::rules::RemoteResolver;
//!
//! # fn example() -> gazelle_cli::core::Result<()> {
//! let config = GeneratorConfig::new("/src/repo", "example.com/repo");
//! let generator = Generator::new(config, Box::new(RemoteResolver::new()))?;
//! for file in generator.generate("/src/repo/lib")? {
//!     print!("{}", format_file(&file));
//! }
//! # Ok(())
//! # }
//! ```

pub mod file_builder;

pub use file_builder::{FileBuilder, FlatFileBuilder, StructuredFileBuilder, new_file_builder};

use crate::bzl::File;
use crate::constants::{DEFAULT_BUILD_FILE_NAME, DEFAULT_RULES_BZL};
use crate::core::{GazelleError, Result};
use crate::packages::Walker;
use crate::rules::{ExternalResolver, RuleGenerator, Style};
use crate::utils::relative_slash_path;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Settings of one [`Generator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Root directory of the repository
    pub repo_root: PathBuf,
    /// Go import path of the repository root
    pub go_prefix: String,
    /// Name of generated build files
    pub build_file_name: String,
    /// Build tags selecting Go files; empty means the host platform
    pub build_tags: Vec<String>,
    /// Layout of generated build files
    pub style: Style,
    /// Label of the file defining the Go rules
    pub rules_bzl: String,
}

impl GeneratorConfig {
    /// A configuration with default settings for the given repository.
    pub fn new(repo_root: impl Into<PathBuf>, go_prefix: impl Into<String>) -> Self {
        Self {
            repo_root: repo_root.into(),
            go_prefix: go_prefix.into(),
            build_file_name: DEFAULT_BUILD_FILE_NAME.to_string(),
            build_tags: Vec::new(),
            style: Style::default(),
            rules_bzl: DEFAULT_RULES_BZL.to_string(),
        }
    }
}

/// Generates build files for directories of one repository.
#[derive(Debug)]
pub struct Generator {
    repo_root: PathBuf,
    build_file_name: String,
    style: Style,
    rules_bzl: String,
    walker: Walker,
    rules: RuleGenerator,
}

impl Generator {
    /// Creates a generator. External imports are resolved by `external`.
    ///
    /// Fails when the repository root cannot be resolved to an existing directory.
    pub fn new(config: GeneratorConfig, external: Box<dyn ExternalResolver>) -> Result<Self> {
        let repo_root = config.repo_root.canonicalize().map_err(|e| {
            GazelleError::config(format!(
                "repository root {} is not accessible: {e}",
                config.repo_root.display()
            ))
        })?;
        Ok(Self {
            repo_root,
            build_file_name: config.build_file_name,
            style: config.style,
            rules_bzl: config.rules_bzl,
            walker: Walker::new(&config.build_tags),
            rules: RuleGenerator::new(config.go_prefix, config.style, external),
        })
    }

    /// The canonical repository root.
    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    /// Generates the build files for `dir` and its subdirectories.
    ///
    /// `dir` must be the repository root or one of its descendants. File paths
    /// in the result are relative to the repository root. The first error from
    /// the walk or from rule generation aborts the run.
    pub fn generate(&self, dir: impl AsRef<Path>) -> Result<Vec<File>> {
        self.generate_all(&[dir])
    }

    /// Generates the build files for several directories in one pass.
    ///
    /// All packages land in the same set of build files, so the flat layout
    /// yields a single root file covering every directory. A directory nested
    /// in another requested directory is only walked once.
    pub fn generate_all<P: AsRef<Path>>(&self, dirs: &[P]) -> Result<Vec<File>> {
        let mut starts = Vec::with_capacity(dirs.len());
        for dir in dirs {
            starts.push(self.start_of(dir.as_ref())?);
        }
        starts.sort_by(|a, b| a.0.cmp(&b.0));
        let mut walked: Vec<String> = Vec::new();
        starts.retain(|(start, _)| {
            let covered = walked.iter().any(|w| is_within(start, w));
            if !covered {
                walked.push(start.clone());
            }
            !covered
        });

        let mut builder = new_file_builder(self.style, &self.build_file_name, &self.rules_bzl);
        for (start, dir) in &starts {
            debug!("Generating {} build files under //{}", self.style, start);
            self.walker.walk(dir, |pkg| {
                let rel = relative_slash_path(&self.repo_root, &pkg.dir).ok_or_else(|| {
                    GazelleError::PathValidation {
                        dir: pkg.dir.display().to_string(),
                        root: self.repo_root.display().to_string(),
                    }
                })?;
                if builder.is_empty() && !rel.is_empty() && self.owns_root_file(start) {
                    debug!("Root directory has no Go package, adding go_prefix only");
                    builder.add_rules("", vec![self.rules.prefix_rule()]);
                }
                let rules = self.rules.generate(&rel, &pkg)?;
                debug!("Generated {} rules for //{}", rules.len(), rel);
                builder.add_rules(&rel, rules);
                Ok(())
            })?;
        }
        Ok(builder.finish())
    }

    /// Resolves `dir` to its canonical path and its slash path relative to the root.
    fn start_of(&self, dir: &Path) -> Result<(String, PathBuf)> {
        let path_error = || GazelleError::PathValidation {
            dir: dir.display().to_string(),
            root: self.repo_root.display().to_string(),
        };
        let dir = dir.canonicalize().map_err(|_| path_error())?;
        let start = relative_slash_path(&self.repo_root, &dir).ok_or_else(path_error)?;
        Ok((start, dir))
    }

    /// Reports whether a walk starting at `start` rewrites the root build file.
    ///
    /// The flat layout always writes the root file. The structured layout only
    /// does when the walk covers the root directory itself.
    fn owns_root_file(&self, start: &str) -> bool {
        self.style == Style::Flat || start.is_empty()
    }
}

/// Reports whether the slash path `rel` is `base` or lies below it.
fn is_within(rel: &str, base: &str) -> bool {
    base.is_empty()
        || rel
            .strip_prefix(base)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}
