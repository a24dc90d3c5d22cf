//! A minimal build file syntax tree.
//!
//! Generated BUILD files only ever contain call statements: one optional
//! `load` followed by one call per rule. This module models exactly that and
//! prints it in buildifier's canonical layout (see [`print`]).

pub mod print;

pub use print::format_file;

use std::path::PathBuf;

/// An expression in a build file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A bare identifier
    Ident(String),
    /// A string literal
    Str(String),
    /// A list literal
    List(Vec<Expr>),
}

/// A call argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    /// `value`
    Positional(Expr),
    /// `name = value`
    Keyword(String, Expr),
}

/// A function call such as `go_library(name = "x")`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallExpr {
    /// The called function
    pub func: String,
    /// Arguments in order
    pub args: Vec<Arg>,
    /// Print on a single line regardless of the arguments
    pub force_compact: bool,
}

impl CallExpr {
    /// Creates a call printed in the default layout.
    pub fn new(func: impl Into<String>, args: Vec<Arg>) -> Self {
        Self {
            func: func.into(),
            args,
            force_compact: false,
        }
    }
}

/// A build file document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct File {
    /// Path of the file relative to the repository root
    pub path: PathBuf,
    /// Top-level statements
    pub stmts: Vec<CallExpr>,
}

impl File {
    /// Creates an empty file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            stmts: Vec::new(),
        }
    }

    /// Top-level calls of the rule `kind`.
    pub fn rules(&self, kind: &str) -> impl Iterator<Item = &CallExpr> {
        self.stmts.iter().filter(move |c| c.func == kind)
    }

    /// Prepends the `load` statement for the rule kinds used in this file.
    pub fn insert_load(&mut self, rules_bzl: &str) {
        if let Some(load) = generate_load(self, rules_bzl) {
            self.stmts.insert(0, load);
        }
    }
}

/// Builds `load("<rules_bzl>", "<kind>", ...)` with the kinds sorted.
pub fn load_expr(rules_bzl: &str, kinds: &[&str]) -> CallExpr {
    let mut kinds = kinds.to_vec();
    kinds.sort_unstable();
    kinds.dedup();

    let mut args = vec![Arg::Positional(Expr::Str(rules_bzl.to_string()))];
    args.extend(kinds.into_iter().map(|k| Arg::Positional(Expr::Str(k.to_string()))));
    CallExpr {
        func: "load".to_string(),
        args,
        force_compact: true,
    }
}

/// The `load` statement `file` needs, or `None` when it uses no known rule kind.
pub fn generate_load(file: &File, rules_bzl: &str) -> Option<CallExpr> {
    let kinds: Vec<&str> = crate::constants::KNOWN_RULE_KINDS
        .iter()
        .copied()
        .filter(|kind| file.rules(kind).next().is_some())
        .collect();
    if kinds.is_empty() {
        return None;
    }
    Some(load_expr(rules_bzl, &kinds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_RULES_BZL;

    fn call(func: &str) -> CallExpr {
        CallExpr::new(func, vec![])
    }

    fn load_kinds(load: &CallExpr) -> Vec<String> {
        load.args
            .iter()
            .skip(1)
            .map(|a| match a {
                Arg::Positional(Expr::Str(s)) => s.clone(),
                other => panic!("unexpected load argument {other:?}"),
            })
            .collect()
    }

    #[test]
    fn test_generate_load_sorted_and_unique() {
        let mut file = File::new("BUILD");
        file.stmts = vec![call("go_test"), call("go_library"), call("go_test"), call("go_prefix")];

        let load = generate_load(&file, DEFAULT_RULES_BZL).unwrap();
        assert!(load.force_compact);
        assert_eq!(load.args[0], Arg::Positional(Expr::Str(DEFAULT_RULES_BZL.to_string())));
        assert_eq!(load_kinds(&load), vec!["go_library", "go_prefix", "go_test"]);
    }

    #[test]
    fn test_generate_load_ignores_unknown_kinds() {
        let mut file = File::new("BUILD");
        file.stmts = vec![call("genrule"), call("cc_library")];
        assert!(generate_load(&file, DEFAULT_RULES_BZL).is_none());

        file.insert_load(DEFAULT_RULES_BZL);
        assert_eq!(file.stmts.len(), 2);
    }

    #[test]
    fn test_insert_load_prepends() {
        let mut file = File::new("BUILD");
        file.stmts = vec![call("go_binary")];
        file.insert_load("//custom:def.bzl");

        assert_eq!(file.stmts.len(), 2);
        assert_eq!(file.stmts[0].func, "load");
        assert_eq!(load_kinds(&file.stmts[0]), vec!["go_binary"]);
    }

    #[test]
    fn test_load_expr_dedups() {
        let load = load_expr(DEFAULT_RULES_BZL, &["go_test", "go_prefix", "go_test"]);
        assert_eq!(load_kinds(&load), vec!["go_prefix", "go_test"]);
    }
}
