//! Bazel labels referencing generated targets.

use crate::core::{GazelleError, Result};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A reference to a build target.
///
/// A relative label (`:name`) is only meaningful inside a known Bazel package;
/// an absolute label (`//pkg:name`, `@repo//pkg:name`) is self-contained.
/// Labels are immutable values; two labels are equal iff their normalized
/// string forms match.
#[derive(Debug, Clone)]
pub struct Label {
    /// External repository name, without the leading `@`
    pub repo: Option<String>,
    /// Slash-separated package path, empty for the repository root
    pub pkg: String,
    /// Target name
    pub name: String,
    /// Whether the label is relative to the current package
    pub relative: bool,
}

impl Label {
    /// A label relative to the current package (`:name`).
    pub fn relative(name: impl Into<String>) -> Self {
        Self {
            repo: None,
            pkg: String::new(),
            name: name.into(),
            relative: true,
        }
    }

    /// A label in the main repository (`//pkg:name`).
    pub fn absolute(pkg: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            repo: None,
            pkg: pkg.into(),
            name: name.into(),
            relative: false,
        }
    }

    /// A label in an external repository (`@repo//pkg:name`).
    pub fn external(
        repo: impl Into<String>,
        pkg: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            repo: Some(repo.into()),
            pkg: pkg.into(),
            name: name.into(),
            relative: false,
        }
    }

    /// Parses a label string in one of the forms produced by [`fmt::Display`].
    ///
    /// ```
    /// use gazelle_cli::rules::Label;
    ///
    /// let label = Label::parse("@org_golang_x_net//context").unwrap();
    /// assert_eq!(label.repo.as_deref(), Some("org_golang_x_net"));
    /// assert_eq!(label.pkg, "context");
    /// assert_eq!(label.name, "context");
    /// ```
    pub fn parse(label: &str) -> Result<Self> {
        let err = || GazelleError::LabelParse {
            label: label.to_string(),
        };

        if let Some(name) = label.strip_prefix(':') {
            if name.is_empty() || name.contains(':') {
                return Err(err());
            }
            return Ok(Self::relative(name));
        }

        let (repo, rest) = match label.split_once("//") {
            Some(("", rest)) => (None, rest),
            Some((repo_part, rest)) => {
                let repo = repo_part.strip_prefix('@').filter(|r| !r.is_empty()).ok_or_else(err)?;
                (Some(repo.to_string()), rest)
            }
            None => return Err(err()),
        };

        let (pkg, name) = match rest.split_once(':') {
            Some((pkg, name)) => (pkg, name),
            // The name is implicit and comes from the last component of the package
            None => (rest, rest.rsplit('/').next().unwrap_or(rest)),
        };
        if name.is_empty() || name.contains(':') || pkg.starts_with('/') || pkg.ends_with('/') {
            return Err(err());
        }

        Ok(Self {
            repo,
            pkg: pkg.to_string(),
            name: name.to_string(),
            relative: false,
        })
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.relative {
            return write!(f, ":{}", self.name);
        }

        if let Some(repo) = &self.repo {
            write!(f, "@{repo}")?;
        }
        write!(f, "//{}", self.pkg)?;

        let base = self.pkg.rsplit('/').next().unwrap_or_default();
        if base != self.name {
            write!(f, ":{}", self.name)?;
        }
        Ok(())
    }
}

impl PartialEq for Label {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

impl Eq for Label {}

impl Hash for Label {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}
