//! Command-line interface for Gazelle
//!
//! `gazelle` generates Bazel BUILD files for the Go packages of a repository.
//!
//! # Usage
//!
//! ```bash
//! # Rewrite the BUILD files of the whole repository
//! gazelle --go-prefix example.com/repo
//!
//! # Print the BUILD files of one subtree instead of writing them
//! gazelle --go-prefix example.com/repo --mode print lib/
//!
//! # One BUILD file for the whole tree, Linux sources only
//! gazelle --style flat --build-tags linux,amd64
//! ```
//!
//! # Global Options
//!
//! - `--repo-root` - repository root (default: the current directory)
//! - `--config` - configuration file (default: `<repo-root>/gazelle.toml`)
//! - `--verbose` - enable debug output
//! - `--quiet` - only report warnings and errors
//!
//! Flags take precedence over values from the configuration file.

#[cfg(test)]
mod tests;

use crate::bzl::format_file;
use crate::config::GazelleConfig;
use crate::generator::Generator;
use crate::rules::{ExternalMode, Style};
use crate::utils::safe_write;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// What to do with generated build files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Write the files into the repository
    #[default]
    Fix,
    /// Print the files to standard output
    Print,
}

/// Runtime settings derived from the global flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Log filter used when `RUST_LOG` is not set
    pub log_level: String,
}

/// Main CLI structure for Gazelle.
#[derive(Parser, Debug)]
#[command(
    name = "gazelle",
    about = "Generate Bazel BUILD files for Go packages",
    version,
    author,
    long_about = "Gazelle walks a Go repository and writes BUILD files with go_library, go_binary and go_test rules for every package it finds."
)]
pub struct Cli {
    /// Directories to generate BUILD files for (default: the repository root)
    #[arg(value_name = "DIRS")]
    dirs: Vec<PathBuf>,

    /// Root directory of the repository
    #[arg(long, value_name = "PATH")]
    repo_root: Option<PathBuf>,

    /// Go import path of the repository root
    #[arg(long, value_name = "PREFIX")]
    go_prefix: Option<String>,

    /// Write files into the repository or print them
    #[arg(long, value_enum, default_value_t = Mode::Fix)]
    mode: Mode,

    /// Layout of generated BUILD files
    #[arg(long, value_enum)]
    style: Option<Style>,

    /// Name of generated build files (BUILD or BUILD.bazel)
    #[arg(long, value_name = "NAME")]
    build_file_name: Option<String>,

    /// Comma-separated build tags selecting Go files (default: host GOOS and GOARCH)
    #[arg(long, value_name = "TAGS", value_delimiter = ',')]
    build_tags: Vec<String>,

    /// How imports from other repositories are referenced
    #[arg(long, value_enum)]
    external: Option<ExternalMode>,

    /// Path to the configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only report warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    /// Builds the runtime settings from the global flags.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        };
        CliConfig {
            log_level: log_level.to_string(),
        }
    }

    /// Runs the command, printing to standard output.
    pub fn execute(self) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.execute_with_writer(&mut out)
    }

    /// Runs the command, printing to `out` in print mode.
    pub fn execute_with_writer(self, out: &mut dyn Write) -> Result<()> {
        let repo_root = match &self.repo_root {
            Some(root) => root.clone(),
            None => std::env::current_dir().context("Failed to determine the current directory")?,
        };

        let config = GazelleConfig::load(&repo_root, self.config.as_deref())?.merge(self.overrides());
        let generator = Generator::new(config.generator_config(&repo_root)?, config.external_resolver())?;

        let dirs = if self.dirs.is_empty() {
            vec![generator.repo_root().to_path_buf()]
        } else {
            self.dirs.clone()
        };

        let files = generator.generate_all(&dirs).with_context(|| {
            let names: Vec<String> = dirs.iter().map(|d| d.display().to_string()).collect();
            format!("Failed to generate BUILD files for {}", names.join(", "))
        })?;
        for file in &files {
            let content = format_file(file);
            match self.mode {
                Mode::Fix => write_build_file(&generator.repo_root().join(&file.path), &content)?,
                Mode::Print => out.write_all(content.as_bytes()).context("Failed to write output")?,
            }
        }
        out.flush().context("Failed to write output")?;
        Ok(())
    }

    /// The configuration layer given by flags.
    fn overrides(&self) -> GazelleConfig {
        GazelleConfig {
            go_prefix: self.go_prefix.clone(),
            style: self.style,
            build_file_name: self.build_file_name.clone(),
            build_tags: self.build_tags.clone(),
            external: self.external,
            ..GazelleConfig::default()
        }
    }
}

/// Writes `content` to `path` unless the file already holds it.
fn write_build_file(path: &Path, content: &str) -> Result<()> {
    if std::fs::read_to_string(path).is_ok_and(|existing| existing == content) {
        debug!("{} is up to date", path.display());
        return Ok(());
    }
    debug!("Writing {}", path.display());
    safe_write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the level chosen by the flags. Logs go to
/// standard error so that print mode output stays clean.
pub fn init_logging(config: &CliConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
