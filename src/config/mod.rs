//! Configuration management for Gazelle
//!
//! Settings come from two layers, later layers winning:
//!
//! 1. **Repository configuration** (`gazelle.toml` at the repository root, or an
//!    explicit file passed with `--config`)
//! 2. **Command-line flags**
//!
//! A missing configuration file is not an error; every setting except
//! `go_prefix` has a default.
//!
//! # File Format
//!
//! ```toml
//! go_prefix = "example.com/repo"
//! style = "structured"            # or "flat"
//! build_file_name = "BUILD.bazel" # or "BUILD"
//! build_tags = ["linux", "amd64"]
//! rules_bzl = "@io_bazel_rules_go//go:def.bzl"
//! external = "external"           # or "vendored"
//!
//! # Import path prefixes mapped to explicit external repository names
//! [repos]
//! "example.org/monorepo" = "org_example_monorepo"
//! ```
//!
//! Unknown keys are rejected so that typos do not silently fall back to
//! defaults.
//!
//! # Modules
//!
//! - `parser` - generic TOML parsing with file path context

pub mod parser;

pub use parser::parse_config;

use crate::constants::{
    CONFIG_FILE_NAME, DEFAULT_BUILD_FILE_NAME, DEFAULT_RULES_BZL, VALID_BUILD_FILE_NAMES,
};
use crate::core::{GazelleError, Result as GazelleResult};
use crate::generator::GeneratorConfig;
use crate::rules::{ExternalMode, ExternalResolver, Label, Style};
use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Import path prefixes: host-like first segment, then slash-separated segments.
const GO_PREFIX_PATTERN: &str = r"^[A-Za-z0-9][A-Za-z0-9._~+-]*(/[A-Za-z0-9._~+-]+)*$";

/// Characters Go accepts in build tags.
const BUILD_TAG_PATTERN: &str = r"^[A-Za-z0-9_.]+$";

/// Bazel workspace names.
const REPO_NAME_PATTERN: &str = r"^[A-Za-z][A-Za-z0-9_.-]*$";

/// Gazelle settings, as read from `gazelle.toml` or assembled from flags.
///
/// Every field is optional so that layers can be merged with
/// [`GazelleConfig::merge`]; defaults are applied by
/// [`GazelleConfig::generator_config`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GazelleConfig {
    /// Go import path of the repository root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub go_prefix: Option<String>,

    /// Layout of generated build files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,

    /// Name of generated build files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_file_name: Option<String>,

    /// Build tags selecting Go files; empty means the host platform
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub build_tags: Vec<String>,

    /// Label of the file defining the Go rules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules_bzl: Option<String>,

    /// How imports from other repositories are referenced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external: Option<ExternalMode>,

    /// Import path prefix to external repository name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub repos: BTreeMap<String, String>,
}

impl GazelleConfig {
    /// Loads the configuration of the repository at `repo_root`.
    ///
    /// With `explicit` set that file must exist. Otherwise `gazelle.toml` in
    /// the repository root is read when present, and defaults are used when
    /// it is not.
    pub fn load(repo_root: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            debug!("Loading configuration from {}", path.display());
            return parse_config(path);
        }

        let path = repo_root.join(CONFIG_FILE_NAME);
        if path.is_file() {
            debug!("Loading configuration from {}", path.display());
            parse_config(&path)
        } else {
            debug!("No {} in {}, using defaults", CONFIG_FILE_NAME, repo_root.display());
            Ok(Self::default())
        }
    }

    /// Layers `overrides` on top of `self`.
    ///
    /// Set values of `overrides` win. Non-empty build tags replace the base
    /// tags as a whole, and `repos` entries are added to the base table.
    #[must_use]
    pub fn merge(mut self, overrides: Self) -> Self {
        if overrides.go_prefix.is_some() {
            self.go_prefix = overrides.go_prefix;
        }
        if overrides.style.is_some() {
            self.style = overrides.style;
        }
        if overrides.build_file_name.is_some() {
            self.build_file_name = overrides.build_file_name;
        }
        if !overrides.build_tags.is_empty() {
            self.build_tags = overrides.build_tags;
        }
        if overrides.rules_bzl.is_some() {
            self.rules_bzl = overrides.rules_bzl;
        }
        if overrides.external.is_some() {
            self.external = overrides.external;
        }
        self.repos.extend(overrides.repos);
        self
    }

    /// Checks every set value.
    pub fn validate(&self) -> GazelleResult<()> {
        let go_prefix = self.go_prefix.as_deref().unwrap_or_default();
        if go_prefix.is_empty() {
            return Err(GazelleError::config(
                "go_prefix is not set; pass --go-prefix or set it in gazelle.toml",
            ));
        }
        if !matches(GO_PREFIX_PATTERN, go_prefix)? {
            return Err(GazelleError::config(format!("invalid go_prefix \"{go_prefix}\"")));
        }

        if let Some(name) = self.build_file_name.as_deref().filter(|n| !VALID_BUILD_FILE_NAMES.contains(n)) {
            return Err(GazelleError::config(format!(
                "build_file_name must be one of {}, got \"{name}\"",
                VALID_BUILD_FILE_NAMES.join(", ")
            )));
        }

        for tag in &self.build_tags {
            if !matches(BUILD_TAG_PATTERN, tag)? {
                return Err(GazelleError::config(format!("invalid build tag \"{tag}\"")));
            }
        }

        if let Some(rules_bzl) = &self.rules_bzl {
            let label = Label::parse(rules_bzl)?;
            if label.relative {
                return Err(GazelleError::config(format!(
                    "rules_bzl must be an absolute label, got \"{rules_bzl}\""
                )));
            }
        }

        for (prefix, repo) in &self.repos {
            if !matches(GO_PREFIX_PATTERN, prefix)? {
                return Err(GazelleError::config(format!("invalid import path prefix \"{prefix}\" in [repos]")));
            }
            if !matches(REPO_NAME_PATTERN, repo)? {
                return Err(GazelleError::config(format!("invalid repository name \"{repo}\" for \"{prefix}\"")));
            }
        }
        Ok(())
    }

    /// Validates the settings and fills in defaults for a generator over the
    /// repository at `repo_root`.
    pub fn generator_config(&self, repo_root: impl Into<PathBuf>) -> GazelleResult<GeneratorConfig> {
        self.validate()?;
        Ok(GeneratorConfig {
            repo_root: repo_root.into(),
            go_prefix: self.go_prefix.clone().unwrap_or_default(),
            build_file_name: self
                .build_file_name
                .clone()
                .unwrap_or_else(|| DEFAULT_BUILD_FILE_NAME.to_string()),
            build_tags: self.build_tags.clone(),
            style: self.style.unwrap_or_default(),
            rules_bzl: self.rules_bzl.clone().unwrap_or_else(|| DEFAULT_RULES_BZL.to_string()),
        })
    }

    /// The external resolver selected by `external` and `repos`.
    pub fn external_resolver(&self) -> Box<dyn ExternalResolver> {
        self.external.unwrap_or_default().resolver(&self.repos)
    }
}

fn matches(pattern: &str, value: &str) -> GazelleResult<bool> {
    let re = Regex::new(pattern).map_err(|e| GazelleError::Other {
        message: format!("invalid pattern {pattern}: {e}"),
    })?;
    Ok(re.is_match(value))
}
