//! Assembly of generated rules into build file documents.

use crate::bzl::File;
use crate::rules::{Rule, Style};
use std::collections::HashMap;
use std::path::Path;

/// Accumulates the rules of a whole walk and produces the finished files.
pub trait FileBuilder {
    /// Adds the rules generated for the directory `rel`.
    fn add_rules(&mut self, rel: &str, rules: Vec<Rule>);

    /// Reports whether no rule has been added yet.
    fn is_empty(&self) -> bool;

    /// Inserts `load` statements and returns the files in creation order.
    fn finish(self: Box<Self>) -> Vec<File>;
}

/// Creates the builder for `style`.
pub fn new_file_builder(style: Style, build_file_name: &str, rules_bzl: &str) -> Box<dyn FileBuilder> {
    match style {
        Style::Structured => Box::new(StructuredFileBuilder::new(build_file_name, rules_bzl)),
        Style::Flat => Box::new(FlatFileBuilder::new(build_file_name, rules_bzl)),
    }
}

/// One build file per package directory.
#[derive(Debug)]
pub struct StructuredFileBuilder {
    build_file_name: String,
    rules_bzl: String,
    files: Vec<File>,
    index: HashMap<String, usize>,
}

impl StructuredFileBuilder {
    /// Creates an empty builder writing files named `build_file_name`.
    pub fn new(build_file_name: &str, rules_bzl: &str) -> Self {
        Self {
            build_file_name: build_file_name.to_string(),
            rules_bzl: rules_bzl.to_string(),
            files: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl FileBuilder for StructuredFileBuilder {
    fn add_rules(&mut self, rel: &str, rules: Vec<Rule>) {
        let i = match self.index.get(rel) {
            Some(&i) => i,
            None => {
                self.files.push(File::new(Path::new(rel).join(&self.build_file_name)));
                self.index.insert(rel.to_string(), self.files.len() - 1);
                self.files.len() - 1
            }
        };
        self.files[i].stmts.extend(rules.iter().map(Rule::to_call));
    }

    fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    fn finish(self: Box<Self>) -> Vec<File> {
        let Self {
            rules_bzl,
            mut files,
            ..
        } = *self;
        for file in &mut files {
            file.insert_load(&rules_bzl);
        }
        files
    }
}

/// A single build file at the repository root holding every rule.
#[derive(Debug)]
pub struct FlatFileBuilder {
    rules_bzl: String,
    file: File,
}

impl FlatFileBuilder {
    /// Creates an empty builder writing `build_file_name` at the root.
    pub fn new(build_file_name: &str, rules_bzl: &str) -> Self {
        Self {
            rules_bzl: rules_bzl.to_string(),
            file: File::new(build_file_name),
        }
    }
}

impl FileBuilder for FlatFileBuilder {
    fn add_rules(&mut self, _rel: &str, rules: Vec<Rule>) {
        self.file.stmts.extend(rules.iter().map(Rule::to_call));
    }

    fn is_empty(&self) -> bool {
        self.file.stmts.is_empty()
    }

    fn finish(self: Box<Self>) -> Vec<File> {
        let Self {
            rules_bzl,
            mut file,
        } = *self;
        file.insert_load(&rules_bzl);
        vec![file]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_RULES_BZL;
    use crate::rules::{AttrValue, RuleKind};
    use std::path::PathBuf;

    fn library(name: &str) -> Rule {
        Rule::new(RuleKind::Library).with_attr("name", AttrValue::String(name.to_string()))
    }

    fn prefix() -> Rule {
        Rule::new(RuleKind::Prefix).with_arg("example.com/repo")
    }

    fn funcs(file: &File) -> Vec<&str> {
        file.stmts.iter().map(|c| c.func.as_str()).collect()
    }

    #[test]
    fn test_structured_one_file_per_directory() {
        let mut builder = new_file_builder(Style::Structured, "BUILD", DEFAULT_RULES_BZL);
        assert!(builder.is_empty());
        builder.add_rules("", vec![prefix(), library("go_default_library")]);
        assert!(!builder.is_empty());
        builder.add_rules("lib", vec![library("go_default_library")]);
        builder.add_rules("", vec![library("extra")]);

        let files = builder.finish();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].path, PathBuf::from("BUILD"));
        assert_eq!(funcs(&files[0]), vec!["load", "go_prefix", "go_library", "go_library"]);
        assert_eq!(files[1].path, PathBuf::from("lib/BUILD"));
        assert_eq!(funcs(&files[1]), vec!["load", "go_library"]);
    }

    #[test]
    fn test_structured_alternate_build_file_name() {
        let mut builder = StructuredFileBuilder::new("BUILD.bazel", DEFAULT_RULES_BZL);
        builder.add_rules("a/b", vec![library("go_default_library")]);
        let files = Box::new(builder).finish();
        assert_eq!(files[0].path, PathBuf::from("a/b/BUILD.bazel"));
    }

    #[test]
    fn test_flat_single_file() {
        let mut builder = new_file_builder(Style::Flat, "BUILD", DEFAULT_RULES_BZL);
        assert!(builder.is_empty());
        builder.add_rules("", vec![prefix()]);
        builder.add_rules("lib", vec![library("lib")]);
        builder.add_rules("lib/sub", vec![library("lib/sub")]);

        let files = builder.finish();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, PathBuf::from("BUILD"));
        assert_eq!(funcs(&files[0]), vec!["load", "go_prefix", "go_library", "go_library"]);
    }

    #[test]
    fn test_flat_empty_finish_has_no_load() {
        let files = new_file_builder(Style::Flat, "BUILD", DEFAULT_RULES_BZL).finish();
        assert_eq!(files.len(), 1);
        assert!(files[0].stmts.is_empty());
    }
}
