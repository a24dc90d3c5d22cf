//! Error handling for Gazelle
//!
//! This module provides the error types and user-friendly error reporting for
//! BUILD file generation. The error system follows two principles:
//! 1. **Strongly-typed errors** for precise handling inside the library
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`GazelleError`] - Enumerated error types for every failure of a generation run
//! - [`ErrorContext`] - Wrapper that adds user-friendly messages and suggestions
//!
//! Every error is fatal to the current generation run: there is no retry and no
//! partial result. The first error is propagated to the caller together with the
//! offending directory or import path.
//!
//! # Examples
//!
//! ```rust,no_run
//! use gazelle_cli::core::{GazelleError, user_friendly_error};
//!
//! let error = GazelleError::UnresolvableImport {
//!     import_path: "example.com/other".to_string(),
//!     reason: "import path does not start with go_prefix \"example.com/repo\"".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // Shows colored error with suggestions
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// Result type used by the library side of Gazelle.
pub type Result<T> = std::result::Result<T, GazelleError>;

/// The main error type for Gazelle operations
///
/// # Error Categories
///
/// - [`PathValidation`] - requested directory is outside the repository root
/// - [`UnresolvableImport`] - an import path cannot be mapped to a label
/// - [`Walker`] / [`MultiplePackages`] - failures reported by the package walker
/// - [`Config`] / [`LabelParse`] - invalid configuration
///
/// [`PathValidation`]: GazelleError::PathValidation
/// [`UnresolvableImport`]: GazelleError::UnresolvableImport
/// [`Walker`]: GazelleError::Walker
/// [`MultiplePackages`]: GazelleError::MultiplePackages
/// [`Config`]: GazelleError::Config
/// [`LabelParse`]: GazelleError::LabelParse
#[derive(Error, Debug, Clone)]
pub enum GazelleError {
    /// The directory passed to `generate` is not the repository root or one of
    /// its descendants.
    #[error("dir {dir} is not under the repository root {root}")]
    PathValidation {
        /// The requested directory
        dir: String,
        /// The configured repository root
        root: String,
    },

    /// An import path matches neither the local resolver nor the external one.
    #[error("cannot resolve import path \"{import_path}\": {reason}")]
    UnresolvableImport {
        /// The offending import path
        import_path: String,
        /// Why the resolver rejected it
        reason: String,
    },

    /// The package walker failed to read or parse a directory or file.
    #[error("failed to load Go package at {path}: {reason}")]
    Walker {
        /// The directory or file being processed
        path: String,
        /// Specific reason for the failure
        reason: String,
    },

    /// Non-test files of one directory declare different package names.
    #[error("found packages {names} in {dir}")]
    MultiplePackages {
        /// The directory holding the conflicting files
        dir: String,
        /// The conflicting package names, comma separated
        names: String,
    },

    /// A label string in the configuration could not be parsed.
    #[error("unable to parse the label `{label}`")]
    LabelParse {
        /// The malformed label
        label: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error
        message: String,
    },

    /// Other error
    #[error("{message}")]
    Other {
        /// The error message
        message: String,
    },
}

impl GazelleError {
    /// Builds a [`GazelleError::Walker`] from any displayable cause.
    pub fn walker(path: impl AsRef<std::path::Path>, reason: impl fmt::Display) -> Self {
        Self::Walker {
            path: path.as_ref().display().to_string(),
            reason: reason.to_string(),
        }
    }

    /// Builds a [`GazelleError::Config`] error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Error context wrapper that provides user-friendly error information
///
/// `ErrorContext` wraps a [`GazelleError`] and adds optional user-friendly messages,
/// suggestions, and details. This is the primary way Gazelle presents errors to CLI users.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: GazelleError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context from a [`GazelleError`]
    #[must_use]
    pub const fn new(error: GazelleError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// - Error message: Red and bold
    /// - Details: Yellow
    /// - Suggestion: Green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// [`GazelleError`] values anywhere in the error chain get tailored suggestions;
/// [`std::io::Error`] gets filesystem guidance; anything else is reported as-is.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    // Walk the error chain to find errors wrapped by anyhow context
    for cause in error.chain() {
        if let Some(gazelle_error) = cause.downcast_ref::<GazelleError>() {
            return create_error_context(gazelle_error.clone());
        }
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        return create_error_context(GazelleError::Other {
            message: format!("IO error: {io_error}"),
        })
        .with_suggestion("Check that the path exists and you have the necessary permissions");
    }

    let message = format!("{error:#}");
    ErrorContext::new(GazelleError::Other {
        message,
    })
}

fn create_error_context(error: GazelleError) -> ErrorContext {
    match &error {
        GazelleError::PathValidation {
            root, ..
        } => {
            let suggestion = format!(
                "Pass a directory inside {root}, or point --repo-root at the repository containing it"
            );
            ErrorContext::new(error)
                .with_suggestion(suggestion)
                .with_details("BUILD files can only be generated for the repository root or its subdirectories")
        }
        GazelleError::UnresolvableImport {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check --go-prefix, or add an entry to the [repos] table in gazelle.toml")
            .with_details("Every non-standard import must map to a label in this repository or in an external repository"),
        GazelleError::Walker {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Make sure the Go sources are readable and syntactically valid")
            .with_details("The package loader stops at the first unreadable directory or unparsable file"),
        GazelleError::MultiplePackages {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Move files of different packages into separate directories, or exclude them with build constraints"),
        GazelleError::LabelParse {
            ..
        }
        | GazelleError::Config {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check gazelle.toml and the command-line flags"),
        GazelleError::Other {
            ..
        } => ErrorContext::new(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_error_display() {
        let err = GazelleError::PathValidation {
            dir: "/tmp/elsewhere".to_string(),
            root: "/src/repo".to_string(),
        };
        assert_eq!(err.to_string(), "dir /tmp/elsewhere is not under the repository root /src/repo");

        let err = GazelleError::UnresolvableImport {
            import_path: "example.com/another".to_string(),
            reason: "outside go_prefix".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "cannot resolve import path \"example.com/another\": outside go_prefix"
        );
    }

    #[test]
    fn test_clone_keeps_fields() {
        let err = GazelleError::walker("lib/a.go", "expected 'package' clause");
        match err.clone() {
            GazelleError::Walker {
                path,
                reason,
            } => {
                assert_eq!(path, "lib/a.go");
                assert_eq!(reason, "expected 'package' clause");
            }
            other => panic!("unexpected clone: {other:?}"),
        }
    }

    #[test]
    fn test_user_friendly_error_finds_wrapped_error() {
        let result: anyhow::Result<()> = Err(GazelleError::MultiplePackages {
            dir: "lib".to_string(),
            names: "foo, bar".to_string(),
        })
        .context("Failed to generate BUILD files");

        let ctx = user_friendly_error(result.unwrap_err());
        assert!(matches!(ctx.error, GazelleError::MultiplePackages { .. }));
        assert!(ctx.suggestion.is_some());
    }

    #[test]
    fn test_user_friendly_error_generic() {
        let ctx = user_friendly_error(anyhow::anyhow!("Something went wrong"));
        assert_eq!(ctx.to_string(), "Something went wrong");
        assert!(ctx.suggestion.is_none());
    }

    #[test]
    fn test_error_context_display_includes_suggestion() {
        let ctx = ErrorContext::new(GazelleError::config("go_prefix is not set"))
            .with_details("details here")
            .with_suggestion("pass --go-prefix");
        let text = ctx.to_string();
        assert!(text.contains("Configuration error: go_prefix is not set"));
        assert!(text.contains("Details: details here"));
        assert!(text.contains("Suggestion: pass --go-prefix"));
    }
}
