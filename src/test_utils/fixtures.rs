//! Test fixtures for creating Go source trees
//!
//! [`GoTree`] lays out a throwaway repository in a temporary directory, and
//! [`GoFile`] renders small Go sources with a package clause, imports and an
//! optional build constraint.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A Go source tree in a temporary directory, removed on drop.
#[derive(Debug)]
pub struct GoTree {
    temp_dir: TempDir,
}

impl GoTree {
    /// Starts a builder for an empty tree.
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> GoTreeBuilder {
        GoTreeBuilder::default()
    }

    /// The repository root.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `rel` inside the tree.
    pub fn join(&self, rel: &str) -> PathBuf {
        self.temp_dir.path().join(rel)
    }

    /// Reads the file at `rel`.
    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.join(rel))
            .unwrap_or_else(|e| panic!("Failed to read {rel}: {e}"))
    }

    /// Reports whether `rel` exists.
    pub fn exists(&self, rel: &str) -> bool {
        self.join(rel).exists()
    }
}

/// Collects files and writes them out in [`GoTreeBuilder::build`].
#[derive(Debug, Default)]
pub struct GoTreeBuilder {
    files: Vec<(String, String)>,
}

impl GoTreeBuilder {
    /// Adds a file at the slash-separated path `rel`.
    pub fn file(mut self, rel: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.push((rel.into(), content.into()));
        self
    }

    /// Adds a Go file rendered from `go`.
    pub fn go(self, rel: impl Into<String>, go: GoFile) -> Self {
        let content = go.render();
        self.file(rel, content)
    }

    /// Creates the temporary directory and writes every file.
    pub fn build(self) -> GoTree {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        for (rel, content) in &self.files {
            let path = temp_dir.path().join(rel);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .unwrap_or_else(|e| panic!("Failed to create {}: {e}", parent.display()));
            }
            fs::write(&path, content)
                .unwrap_or_else(|e| panic!("Failed to write {}: {e}", path.display()));
        }
        GoTree {
            temp_dir,
        }
    }
}

/// A minimal Go source file.
#[derive(Clone, Debug)]
pub struct GoFile {
    package: String,
    imports: Vec<String>,
    constraint: Option<String>,
}

impl GoFile {
    /// A file declaring `package`.
    pub fn package(package: &str) -> Self {
        Self {
            package: package.to_string(),
            imports: Vec::new(),
            constraint: None,
        }
    }

    /// Adds an import.
    pub fn import(mut self, path: &str) -> Self {
        self.imports.push(path.to_string());
        self
    }

    /// Adds a `//go:build` line.
    pub fn build_constraint(mut self, expr: &str) -> Self {
        self.constraint = Some(expr.to_string());
        self
    }

    /// Renders the source text.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(expr) = &self.constraint {
            out.push_str(&format!("//go:build {expr}\n\n"));
        }
        out.push_str(&format!("package {}\n", self.package));
        match self.imports.as_slice() {
            [] => {}
            [single] => out.push_str(&format!("\nimport \"{single}\"\n")),
            many => {
                out.push_str("\nimport (\n");
                for path in many {
                    out.push_str(&format!("\t\"{path}\"\n"));
                }
                out.push_str(")\n");
            }
        }
        out
    }
}
