//! Generation of the rules of one Go package.

use super::external::ExternalResolver;
use super::resolve::{Resolver, is_standard, join_slash};
use super::{AttrValue, Companion, Label, Rule, RuleKind, Style, companion_name};
use crate::constants::PUBLIC_VISIBILITY;
use crate::core::Result;
use crate::packages::Package;

/// Generates Bazel rules for the build targets of Go packages in a repository.
#[derive(Debug)]
pub struct RuleGenerator {
    go_prefix: String,
    style: Style,
    resolver: Resolver,
}

impl RuleGenerator {
    /// Creates a generator for the repository whose root has import path
    /// `go_prefix`, laid out with `style`.
    pub fn new(go_prefix: impl Into<String>, style: Style, external: Box<dyn ExternalResolver>) -> Self {
        let go_prefix = go_prefix.into();
        let resolver = Resolver::new(&go_prefix, style, external);
        Self {
            go_prefix,
            style,
            resolver,
        }
    }

    /// The `go_prefix` rule declared at the repository root.
    pub fn prefix_rule(&self) -> Rule {
        Rule::new(RuleKind::Prefix).with_arg(self.go_prefix.clone())
    }

    /// Generates the rules for `pkg`.
    ///
    /// `rel` is the slash-separated path from the repository root to the package
    /// directory; it is empty for the root itself. Any import that fails to
    /// resolve aborts the whole package.
    pub fn generate(&self, rel: &str, pkg: &Package) -> Result<Vec<Rule>> {
        let mut rules = Vec::new();
        if rel.is_empty() {
            rules.push(self.prefix_rule());
        }

        let primary = self.generate_primary(rel, pkg)?;
        let library = primary.name().unwrap_or_default().to_string();
        rules.push(primary);

        if !pkg.test_go_files.is_empty() {
            rules.push(self.generate_test(rel, pkg, &library)?);
        }
        if !pkg.xtest_go_files.is_empty() {
            rules.push(self.generate_xtest(rel, pkg, &library)?);
        }
        Ok(rules)
    }

    fn generate_primary(&self, rel: &str, pkg: &Package) -> Result<Rule> {
        let label = self.resolver.resolve(&join_slash(&[&self.go_prefix, rel]), "")?;
        let (kind, name) = if pkg.is_command() {
            let base = pkg.dir.file_name().map(|n| n.to_string_lossy().into_owned());
            (RuleKind::Binary, base.unwrap_or(label.name))
        } else {
            (RuleKind::Library, label.name)
        };

        let rule = Rule::new(kind)
            .with_attr("name", AttrValue::String(name))
            .with_attr("srcs", AttrValue::List(self.ref_srcs(rel, &pkg.go_files)))
            .with_attr("visibility", AttrValue::List(vec![visibility(rel)]));
        self.with_deps(rule, &pkg.imports, rel)
    }

    fn generate_test(&self, rel: &str, pkg: &Package, library: &str) -> Result<Rule> {
        let rule = Rule::new(RuleKind::Test)
            .with_attr("name", AttrValue::String(companion_name(library, Companion::Test)))
            .with_attr("srcs", AttrValue::List(self.ref_srcs(rel, &pkg.test_go_files)))
            .with_attr("library", AttrValue::Label(Label::relative(library)));
        self.with_deps(rule, &pkg.test_imports, rel)
    }

    fn generate_xtest(&self, rel: &str, pkg: &Package, library: &str) -> Result<Rule> {
        let rule = Rule::new(RuleKind::Test)
            .with_attr("name", AttrValue::String(companion_name(library, Companion::ExternalTest)))
            .with_attr("srcs", AttrValue::List(self.ref_srcs(rel, &pkg.xtest_go_files)));
        self.with_deps(rule, &pkg.xtest_imports, rel)
    }

    /// Appends `deps` when any import survives the standard library filter.
    fn with_deps(&self, rule: Rule, imports: &[String], dir: &str) -> Result<Rule> {
        let deps = self.dependencies(imports, dir)?;
        if deps.is_empty() {
            return Ok(rule);
        }
        Ok(rule.with_attr("deps", AttrValue::List(deps)))
    }

    fn dependencies(&self, imports: &[String], dir: &str) -> Result<Vec<String>> {
        imports
            .iter()
            .filter(|p| !is_standard(p))
            .map(|p| self.resolver.resolve(p, dir).map(|l| l.to_string()))
            .collect()
    }

    /// Source file references, qualified by directory in the flat layout.
    fn ref_srcs(&self, rel: &str, srcs: &[String]) -> Vec<String> {
        match self.style {
            Style::Structured => srcs.to_vec(),
            Style::Flat => srcs.iter().map(|s| join_slash(&[rel, s])).collect(),
        }
    }
}

/// Visibility of the package at `rel`.
///
/// Packages under an `internal` directory are only visible to the subtree
/// rooted at the parent of the last `internal` segment.
///
/// ```
/// use gazelle_cli::rules::visibility;
///
/// assert_eq!(visibility("lib"), "//visibility:public");
/// assert_eq!(visibility("internal/x"), "//:__subpackages__");
/// assert_eq!(visibility("a/internal/b"), "//a:__subpackages__");
/// ```
pub fn visibility(rel: &str) -> String {
    let segments: Vec<&str> = rel.split('/').filter(|s| !s.is_empty()).collect();
    match segments.iter().rposition(|s| *s == "internal") {
        Some(i) => format!("//{}:__subpackages__", segments[..i].join("/")),
        None => PUBLIC_VISIBILITY.to_string(),
    }
}
