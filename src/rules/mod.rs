//! Bazel rule generation for Go packages.
//!
//! This module turns the description of one Go package into the rules its
//! BUILD file needs, resolving every import into a [`Label`] on the way.
//!
//! # Components
//!
//! - [`Label`] - reference to a build target, relative or fully qualified
//! - [`LabelResolver`] / [`Resolver`] - import path to label mapping inside the
//!   repository, with dispatch to an injected [`ExternalResolver`]
//! - [`RuleGenerator`] - emits `go_library`/`go_binary`/`go_test` rules
//! - [`Rule`] - a generated rule, convertible into a build file call statement
//!
//! # Example
//!
//! ```rust,no_run
//! use gazelle_cli::packages::Package;
//! use gazelle_cli::rules::{RemoteResolver, RuleGenerator, Style};
//!
//! # fn example(pkg: &Package) -> gazelle_cli::core::Result<()> {
//! let generator =
//!     RuleGenerator::new("example.com/repo", Style::Structured, Box::new(RemoteResolver::new()));
//! for rule in generator.generate("lib", pkg)? {
//!     println!("{} {:?}", rule.kind.kind_name(), rule.name());
//! }
//! # Ok(())
//! # }
//! ```

pub mod external;
pub mod generator;
pub mod label;
pub mod resolve;

pub use external::{ExternalMode, ExternalResolver, RemoteResolver, VendoredResolver, repo_name};
pub use generator::{RuleGenerator, visibility};
pub use label::Label;
pub use resolve::{LabelResolver, Resolver, is_standard};

use crate::bzl::{Arg, CallExpr, Expr};
use crate::constants::{DEFAULT_LIB_NAME, DEFAULT_TEST_NAME, DEFAULT_XTEST_NAME};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A strategy for organizing BUILD files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    /// Individual Go packages have their own Bazel packages.
    #[default]
    Structured,
    /// All Go packages under the `go_prefix` share a single BUILD file.
    Flat,
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structured => f.write_str("structured"),
            Self::Flat => f.write_str("flat"),
        }
    }
}

/// The kinds of rules the generator emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// `go_prefix`, declared once at the repository root
    Prefix,
    /// `go_library`
    Library,
    /// `go_binary`, for `package main`
    Binary,
    /// `go_test`, for internal and external tests
    Test,
}

impl RuleKind {
    /// The Skylark function name of this rule kind.
    pub const fn kind_name(self) -> &'static str {
        match self {
            Self::Prefix => "go_prefix",
            Self::Library => "go_library",
            Self::Binary => "go_binary",
            Self::Test => "go_test",
        }
    }
}

/// The value of a rule attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// A plain string
    String(String),
    /// A list of strings
    List(Vec<String>),
    /// A reference to another target
    Label(Label),
}

impl AttrValue {
    fn to_expr(&self) -> Expr {
        match self {
            Self::String(s) => Expr::Str(s.clone()),
            Self::List(items) => Expr::List(items.iter().cloned().map(Expr::Str).collect()),
            Self::Label(label) => Expr::Str(label.to_string()),
        }
    }
}

/// A generated rule.
///
/// Attribute order is significant: it is the order the generator inserted
/// them in, and the order they are printed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// The rule kind
    pub kind: RuleKind,
    /// Positional string arguments
    pub args: Vec<String>,
    /// Keyword attributes in insertion order
    pub attrs: Vec<(String, AttrValue)>,
}

impl Rule {
    /// Creates a rule without arguments or attributes.
    pub fn new(kind: RuleKind) -> Self {
        Self {
            kind,
            args: Vec::new(),
            attrs: Vec::new(),
        }
    }

    /// Appends a positional string argument.
    #[must_use]
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends a keyword attribute.
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: AttrValue) -> Self {
        self.attrs.push((key.into(), value));
        self
    }

    /// Looks up an attribute by name.
    pub fn attr(&self, key: &str) -> Option<&AttrValue> {
        self.attrs.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// The `name` attribute, if present.
    pub fn name(&self) -> Option<&str> {
        match self.attr("name") {
            Some(AttrValue::String(name)) => Some(name),
            _ => None,
        }
    }

    /// Converts the rule into a build file call statement.
    pub fn to_call(&self) -> CallExpr {
        let mut args: Vec<Arg> =
            self.args.iter().map(|a| Arg::Positional(Expr::Str(a.clone()))).collect();
        args.extend(self.attrs.iter().map(|(k, v)| Arg::Keyword(k.clone(), v.to_expr())));
        CallExpr::new(self.kind.kind_name(), args)
    }
}

/// Rules generated next to a primary library or binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Companion {
    /// `go_test` compiled together with the library
    Test,
    /// `go_test` compiled against the library as an ordinary dependency
    ExternalTest,
}

impl Companion {
    const fn suffix(self) -> &'static str {
        match self {
            Self::Test => "_test",
            Self::ExternalTest => "_xtest",
        }
    }
}

/// Fixed names for companions of the default library, keyed by primary name.
const RESERVED_NAMES: &[(&str, Companion, &str)] = &[
    (DEFAULT_LIB_NAME, Companion::Test, DEFAULT_TEST_NAME),
    (DEFAULT_LIB_NAME, Companion::ExternalTest, DEFAULT_XTEST_NAME),
];

/// Finalizes the name of a companion rule of `primary`.
///
/// ```
/// use gazelle_cli::rules::{Companion, companion_name};
///
/// assert_eq!(companion_name("go_default_library", Companion::Test), "go_default_test");
/// assert_eq!(companion_name("tool", Companion::ExternalTest), "tool_xtest");
/// ```
pub fn companion_name(primary: &str, companion: Companion) -> String {
    RESERVED_NAMES
        .iter()
        .find(|(name, c, _)| *name == primary && *c == companion)
        .map_or_else(|| format!("{primary}{}", companion.suffix()), |(_, _, reserved)| {
            (*reserved).to_string()
        })
}
