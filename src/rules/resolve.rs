//! Import path to label resolution.
//!
//! Import paths inside the repository's `go_prefix` are resolved by a
//! [`LabelResolver`] chosen from the [`Style`] once at construction. Everything
//! else goes to the injected [`ExternalResolver`]. [`Resolver`] applies that
//! dispatch rule.

use super::Style;
use super::external::ExternalResolver;
use super::label::Label;
use crate::constants::DEFAULT_LIB_NAME;
use crate::core::{GazelleError, Result};

/// Resolves labels of Go libraries within the repository of `go_prefix`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelResolver {
    /// Every Go package has its own Bazel package.
    Structured {
        /// The `go_prefix` of the repository root
        go_prefix: String,
    },
    /// All rules live in a single BUILD file at the repository root.
    Flat {
        /// The `go_prefix` of the repository root
        go_prefix: String,
    },
}

impl LabelResolver {
    /// Selects the resolver matching `style`.
    pub fn new(go_prefix: impl Into<String>, style: Style) -> Self {
        let go_prefix = go_prefix.into();
        match style {
            Style::Structured => Self::Structured {
                go_prefix,
            },
            Style::Flat => Self::Flat {
                go_prefix,
            },
        }
    }

    /// The `go_prefix` this resolver was built for.
    pub fn go_prefix(&self) -> &str {
        match self {
            Self::Structured {
                go_prefix,
            }
            | Self::Flat {
                go_prefix,
            } => go_prefix,
        }
    }

    /// Resolves `import_path`, imported from the package at `dir` (relative to
    /// the repository root), to a label.
    pub fn resolve(&self, import_path: &str, dir: &str) -> Result<Label> {
        match self {
            Self::Structured {
                go_prefix,
            } => resolve_structured(go_prefix, import_path),
            Self::Flat {
                go_prefix,
            } => resolve_flat(go_prefix, import_path, dir),
        }
    }
}

fn resolve_structured(go_prefix: &str, import_path: &str) -> Result<Label> {
    if import_path == go_prefix {
        return Ok(Label::absolute("", DEFAULT_LIB_NAME));
    }

    match import_path.strip_prefix(go_prefix).and_then(|rest| rest.strip_prefix('/')) {
        Some(rel) => Ok(Label::absolute(rel, DEFAULT_LIB_NAME)),
        None => Err(outside_prefix(import_path, go_prefix)),
    }
}

fn resolve_flat(go_prefix: &str, import_path: &str, dir: &str) -> Result<Label> {
    let import_path = match import_path.strip_prefix("./") {
        Some(rest) => join_slash(&[go_prefix, dir, rest]),
        None => import_path.to_string(),
    };

    if import_path == go_prefix {
        return Ok(Label::relative(DEFAULT_LIB_NAME));
    }

    match import_path.strip_prefix(go_prefix).and_then(|rest| rest.strip_prefix('/')) {
        Some(rel) => Ok(Label::relative(rel)),
        None => Err(outside_prefix(&import_path, go_prefix)),
    }
}

fn outside_prefix(import_path: &str, go_prefix: &str) -> GazelleError {
    GazelleError::UnresolvableImport {
        import_path: import_path.to_string(),
        reason: format!("import path does not start with go_prefix \"{go_prefix}\""),
    }
}

/// Joins slash-separated path elements, skipping empty ones and cleaning
/// `.`/`..` segments the way Go's `path.Join` does.
pub(crate) fn join_slash(parts: &[&str]) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in parts.iter().flat_map(|p| p.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|s| *s != "..") {
                    segments.pop();
                } else {
                    segments.push("..");
                }
            }
            s => segments.push(s),
        }
    }
    segments.join("/")
}

/// Reports whether `import_path` names a Go standard library package.
///
/// Standard packages have no dot in their first path segment (`fmt`,
/// `net/http`), unlike hosted import paths (`github.com/...`).
pub fn is_standard(import_path: &str) -> bool {
    let first = import_path.split('/').next().unwrap_or_default();
    !first.contains('.')
}

/// Dispatches import paths between the local [`LabelResolver`] and the
/// injected [`ExternalResolver`].
pub struct Resolver {
    local: LabelResolver,
    external: Box<dyn ExternalResolver>,
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver").field("local", &self.local).finish_non_exhaustive()
    }
}

impl Resolver {
    /// Creates a resolver for `go_prefix` laid out with `style`.
    pub fn new(go_prefix: &str, style: Style, external: Box<dyn ExternalResolver>) -> Self {
        Self {
            local: LabelResolver::new(go_prefix, style),
            external,
        }
    }

    /// Resolves `import_path` imported from the package at `dir`.
    pub fn resolve(&self, import_path: &str, dir: &str) -> Result<Label> {
        let go_prefix = self.local.go_prefix();
        let local = import_path == go_prefix
            || import_path.strip_prefix(go_prefix).is_some_and(|rest| rest.starts_with('/'))
            || import_path.starts_with("./");
        if local {
            self.local.resolve(import_path, dir)
        } else {
            self.external.resolve(import_path, dir)
        }
    }
}
