//! Resolution of import paths outside the repository's `go_prefix`.
//!
//! The policy is injected into the rule generator through the
//! [`ExternalResolver`] trait. Two policies are provided:
//!
//! - [`RemoteResolver`] maps each import path into an external Bazel repository
//!   named after the import path's repository root
//!   (`github.com/foo/bar/baz` -> `@com_github_foo_bar//baz:go_default_library`).
//! - [`VendoredResolver`] maps each import path into the repository's own
//!   `vendor/` tree (`//vendor/github.com/foo/bar/baz:go_default_library`).
//!
//! Both are deterministic and never fail for syntactically valid import paths.

use super::label::Label;
use crate::constants::DEFAULT_LIB_NAME;
use crate::core::{GazelleError, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maps import paths that do not belong to the current repository to labels.
pub trait ExternalResolver {
    /// Resolves `import_path`, imported from the package at `dir`, to a label.
    fn resolve(&self, import_path: &str, dir: &str) -> Result<Label>;
}

/// How external packages are referenced from generated rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExternalMode {
    /// Each repository root becomes an external Bazel repository.
    #[default]
    External,
    /// External packages live under `vendor/` of the current repository.
    Vendored,
}

impl ExternalMode {
    /// Builds the resolver for this mode.
    ///
    /// `repos` maps import path prefixes to explicit repository names and is
    /// only consulted in [`ExternalMode::External`].
    pub fn resolver(self, repos: &BTreeMap<String, String>) -> Box<dyn ExternalResolver> {
        match self {
            Self::External => Box::new(RemoteResolver::with_overrides(repos.clone())),
            Self::Vendored => Box::new(VendoredResolver),
        }
    }
}

/// Hosting sites whose repository root spans more than the host segment,
/// with the number of leading segments forming the root.
const KNOWN_HOSTS: &[(&str, usize)] = &[
    ("github.com", 3),
    ("bitbucket.org", 3),
    ("gitlab.com", 3),
    ("golang.org/x", 3),
    ("go.googlesource.com", 2),
    ("gopkg.in", 2),
];

/// Resolves import paths into external Bazel repositories.
#[derive(Debug, Clone, Default)]
pub struct RemoteResolver {
    overrides: BTreeMap<String, String>,
}

impl RemoteResolver {
    /// Creates a resolver using only the built-in repository root rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a resolver with explicit `import path prefix -> repository name`
    /// entries, which take precedence over the built-in rules.
    pub fn with_overrides(overrides: BTreeMap<String, String>) -> Self {
        Self {
            overrides,
        }
    }

    /// Splits `import_path` into a repository name and the package path
    /// inside that repository.
    fn split<'a>(&self, import_path: &'a str) -> (String, &'a str) {
        // Longest matching override wins
        let overridden = self
            .overrides
            .iter()
            .filter(|(prefix, _)| under(import_path, prefix))
            .max_by_key(|(prefix, _)| prefix.len());
        if let Some((prefix, repo)) = overridden {
            return (repo.clone(), import_path[prefix.len()..].trim_start_matches('/'));
        }

        let depth = KNOWN_HOSTS
            .iter()
            .find(|(host, _)| under(import_path, host))
            .map_or(1, |(_, depth)| *depth);
        let root_len = import_path
            .match_indices('/')
            .nth(depth - 1)
            .map_or(import_path.len(), |(idx, _)| idx);
        let (root, rest) = import_path.split_at(root_len);
        (repo_name(root), rest.trim_start_matches('/'))
    }
}

impl ExternalResolver for RemoteResolver {
    fn resolve(&self, import_path: &str, _dir: &str) -> Result<Label> {
        validate_import_path(import_path)?;
        let (repo, pkg) = self.split(import_path);
        Ok(Label::external(repo, pkg, DEFAULT_LIB_NAME))
    }
}

/// Resolves import paths into the `vendor/` directory of the repository.
#[derive(Debug, Clone, Copy, Default)]
pub struct VendoredResolver;

impl ExternalResolver for VendoredResolver {
    fn resolve(&self, import_path: &str, _dir: &str) -> Result<Label> {
        validate_import_path(import_path)?;
        Ok(Label::absolute(format!("vendor/{import_path}"), DEFAULT_LIB_NAME))
    }
}

/// Converts a repository root import path into a Bazel repository name.
///
/// The host's dot-separated components are reversed and joined with the rest
/// of the path; `-` and `.` become `_`.
///
/// ```
/// use gazelle_cli::rules::repo_name;
///
/// assert_eq!(repo_name("github.com/foo/bar-baz"), "com_github_foo_bar_baz");
/// assert_eq!(repo_name("golang.org/x/net"), "org_golang_x_net");
/// ```
pub fn repo_name(import_path: &str) -> String {
    let mut components = import_path.split('/');
    let host = components.next().unwrap_or_default();
    let mut parts: Vec<&str> = host.split('.').rev().collect();
    parts.extend(components);
    parts.join("_").replace(['-', '.'], "_")
}

fn under(import_path: &str, prefix: &str) -> bool {
    import_path
        .strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

fn validate_import_path(import_path: &str) -> Result<()> {
    let invalid = |reason: &str| GazelleError::UnresolvableImport {
        import_path: import_path.to_string(),
        reason: reason.to_string(),
    };

    if import_path.is_empty() {
        return Err(invalid("empty import path"));
    }
    if import_path.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..") {
        return Err(invalid("malformed import path"));
    }
    if import_path.chars().any(|c| c.is_whitespace() || c == ':' || c == '@' || c == '\\') {
        return Err(invalid("invalid character in import path"));
    }
    Ok(())
}
