//! Go build constraints.
//!
//! Two kinds of constraints decide whether a file belongs to a build:
//! file name suffixes (`foo_linux_amd64.go`) and header comments
//! (`//go:build linux && !cgo`, or the legacy `// +build linux,!cgo` lines).

use std::collections::BTreeSet;

/// Operating systems recognized in file name suffixes.
pub const KNOWN_OS: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "hurd", "illumos", "ios", "js", "linux",
    "nacl", "netbsd", "openbsd", "plan9", "solaris", "wasip1", "windows", "zos",
];

/// Operating systems that satisfy the `unix` tag.
const UNIX_OS: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "hurd", "illumos", "ios", "linux", "netbsd",
    "openbsd", "solaris",
];

/// Operating systems that also satisfy the tag of the one they derive from.
const IMPLIED_OS: &[(&str, &str)] = &[("android", "linux"), ("illumos", "solaris"), ("ios", "darwin")];

/// Deepest nesting of `(` and `!` accepted in a `//go:build` expression.
const MAX_NESTING: usize = 100;

/// Architectures recognized in file name suffixes.
pub const KNOWN_ARCH: &[&str] = &[
    "386",
    "amd64",
    "amd64p32",
    "arm",
    "armbe",
    "arm64",
    "arm64be",
    "loong64",
    "mips",
    "mipsle",
    "mips64",
    "mips64le",
    "mips64p32",
    "mips64p32le",
    "ppc",
    "ppc64",
    "ppc64le",
    "riscv",
    "riscv64",
    "s390",
    "s390x",
    "sparc",
    "sparc64",
    "wasm",
];

/// A boolean build constraint expression over build tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// A single tag
    Tag(String),
    /// `!x`
    Not(Box<Constraint>),
    /// `x && y`
    And(Box<Constraint>, Box<Constraint>),
    /// `x || y`
    Or(Box<Constraint>, Box<Constraint>),
}

impl Constraint {
    /// Evaluates the expression, deciding single tags with `matches`.
    pub fn eval(&self, matches: &dyn Fn(&str) -> bool) -> bool {
        match self {
            Self::Tag(tag) => matches(tag),
            Self::Not(inner) => !inner.eval(matches),
            Self::And(a, b) => a.eval(matches) && b.eval(matches),
            Self::Or(a, b) => a.eval(matches) || b.eval(matches),
        }
    }

    fn and(a: Self, b: Self) -> Self {
        Self::And(Box::new(a), Box::new(b))
    }

    fn or(a: Self, b: Self) -> Self {
        Self::Or(Box::new(a), Box::new(b))
    }
}

/// The set of tags a build is configured with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTags {
    tags: BTreeSet<String>,
}

impl BuildTags {
    /// Uses `tags` when non-empty, otherwise the host's GOOS and GOARCH.
    pub fn new(tags: &[String]) -> Self {
        let tags: BTreeSet<String> = if tags.is_empty() {
            [host_goos(), host_goarch()].into_iter().map(str::to_string).collect()
        } else {
            tags.iter().map(|t| t.trim().to_string()).filter(|t| !t.is_empty()).collect()
        };
        Self {
            tags,
        }
    }

    /// The configured tags, sorted.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// Reports whether `tag` is satisfied.
    ///
    /// Besides the configured tags, the `gc` compiler tag, the `cgo` tag and
    /// Go release tags (`go1.N`) are always satisfied. An operating system tag
    /// also satisfies the tags it implies: `android` implies `linux`, `ios`
    /// implies `darwin`, `illumos` implies `solaris`, and every Unix system
    /// implies `unix`.
    pub fn matches(&self, tag: &str) -> bool {
        if self.tags.contains(tag) || tag == "gc" || tag == "cgo" || is_release_tag(tag) {
            return true;
        }
        if tag == "unix" {
            return UNIX_OS.iter().any(|os| self.tags.contains(*os));
        }
        IMPLIED_OS
            .iter()
            .any(|(os, implied)| *implied == tag && self.tags.contains(*os))
    }

    /// Applies the file name convention `*_GOOS`, `*_GOARCH`,
    /// `*_GOOS_GOARCH` (optionally followed by `_test`).
    pub fn matches_file_name(&self, file_name: &str) -> bool {
        let name = file_name.strip_suffix(".go").unwrap_or(file_name);
        let name = name.strip_suffix("_test").unwrap_or(name);
        let Some(i) = name.find('_') else {
            return true;
        };
        let parts: Vec<&str> = name[i..].split('_').collect();
        let n = parts.len();
        if n >= 2 && KNOWN_OS.contains(&parts[n - 2]) && KNOWN_ARCH.contains(&parts[n - 1]) {
            return self.matches(parts[n - 2]) && self.matches(parts[n - 1]);
        }
        if KNOWN_OS.contains(&parts[n - 1]) || KNOWN_ARCH.contains(&parts[n - 1]) {
            return self.matches(parts[n - 1]);
        }
        true
    }

    /// Evaluates an optional header constraint; files without one always match.
    pub fn matches_constraint(&self, constraint: Option<&Constraint>) -> bool {
        constraint.is_none_or(|c| c.eval(&|tag| self.matches(tag)))
    }
}

fn is_release_tag(tag: &str) -> bool {
    tag.strip_prefix("go1.").is_some_and(|minor| {
        !minor.is_empty() && minor.chars().all(|c| c.is_ascii_digit())
    })
}

/// GOOS of the machine running the generator.
pub fn host_goos() -> &'static str {
    match std::env::consts::OS {
        "macos" => "darwin",
        other => other,
    }
}

/// GOARCH of the machine running the generator.
pub fn host_goarch() -> &'static str {
    match std::env::consts::ARCH {
        "x86_64" => "amd64",
        "x86" => "386",
        "aarch64" => "arm64",
        "powerpc" => "ppc",
        "powerpc64" => "ppc64",
        "loongarch64" => "loong64",
        "wasm32" => "wasm",
        other => other,
    }
}

/// Parses the expression of a `//go:build` line.
pub fn parse_go_build(expr: &str) -> Result<Constraint, String> {
    let tokens = tokenize(expr)?;
    let mut parser = ExprParser {
        tokens: &tokens,
        pos: 0,
        depth: 0,
    };
    let constraint = parser.or_expr()?;
    if parser.pos != tokens.len() {
        return Err(format!("unexpected token in build constraint: {expr}"));
    }
    Ok(constraint)
}

/// Parses the arguments of a legacy `// +build` line.
///
/// Space-separated options are ORed; comma-separated terms are ANDed;
/// a leading `!` negates a term. Returns `None` for an empty line.
pub fn parse_plus_build(line: &str) -> Result<Option<Constraint>, String> {
    let mut result: Option<Constraint> = None;
    for option in line.split_whitespace() {
        let mut clause: Option<Constraint> = None;
        for term in option.split(',') {
            let (negated, tag) = match term.strip_prefix('!') {
                Some(tag) => (true, tag),
                None => (false, term),
            };
            if !is_valid_tag(tag) {
                return Err(format!("invalid +build term: {term:?}"));
            }
            let mut atom = Constraint::Tag(tag.to_string());
            if negated {
                atom = Constraint::Not(Box::new(atom));
            }
            clause = Some(match clause {
                Some(c) => Constraint::and(c, atom),
                None => atom,
            });
        }
        if let Some(clause) = clause {
            result = Some(match result {
                Some(r) => Constraint::or(r, clause),
                None => clause,
            });
        }
    }
    Ok(result)
}

fn is_valid_tag(tag: &str) -> bool {
    !tag.is_empty() && tag.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '.')
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Tag(String),
    Not,
    And,
    Or,
    LParen,
    RParen,
}

fn tokenize(expr: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut chars = expr.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        match c {
            c if c.is_whitespace() => {}
            '!' => tokens.push(Token::Not),
            '(' => tokens.push(Token::LParen),
            ')' => tokens.push(Token::RParen),
            '&' | '|' => {
                if chars.next_if(|(_, next)| *next == c).is_none() {
                    return Err(format!("invalid operator at offset {i} in build constraint: {expr}"));
                }
                tokens.push(if c == '&' { Token::And } else { Token::Or });
            }
            c if c.is_alphanumeric() || c == '_' || c == '.' => {
                let mut end = i + c.len_utf8();
                while let Some((j, next)) =
                    chars.next_if(|(_, n)| n.is_alphanumeric() || *n == '_' || *n == '.')
                {
                    end = j + next.len_utf8();
                }
                tokens.push(Token::Tag(expr[i..end].to_string()));
            }
            other => {
                return Err(format!("unexpected character {other:?} in build constraint: {expr}"));
            }
        }
    }
    Ok(tokens)
}

struct ExprParser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl ExprParser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn or_expr(&mut self) -> Result<Constraint, String> {
        let mut left = self.and_expr()?;
        while self.peek() == Some(&Token::Or) {
            self.pos += 1;
            left = Constraint::or(left, self.and_expr()?);
        }
        Ok(left)
    }

    fn and_expr(&mut self) -> Result<Constraint, String> {
        let mut left = self.unary()?;
        while self.peek() == Some(&Token::And) {
            self.pos += 1;
            left = Constraint::and(left, self.unary()?);
        }
        Ok(left)
    }

    fn unary(&mut self) -> Result<Constraint, String> {
        self.depth += 1;
        if self.depth > MAX_NESTING {
            return Err("build constraint is nested too deeply".to_string());
        }
        let result = self.primary();
        self.depth -= 1;
        result
    }

    fn primary(&mut self) -> Result<Constraint, String> {
        let token = self.peek().cloned();
        self.pos += 1;
        match token {
            Some(Token::Not) => Ok(Constraint::Not(Box::new(self.unary()?))),
            Some(Token::LParen) => {
                let inner = self.or_expr()?;
                if self.peek() != Some(&Token::RParen) {
                    return Err("missing ) in build constraint".to_string());
                }
                self.pos += 1;
                Ok(inner)
            }
            Some(Token::Tag(tag)) => Ok(Constraint::Tag(tag)),
            Some(other) => Err(format!("unexpected {other:?} in build constraint")),
            None => Err("unexpected end of build constraint".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(list: &[&str]) -> BuildTags {
        BuildTags::new(&list.iter().map(|s| (*s).to_string()).collect::<Vec<_>>())
    }

    #[test]
    fn test_file_name_constraints() {
        let linux = tags(&["linux", "amd64"]);
        assert!(linux.matches_file_name("foo.go"));
        assert!(linux.matches_file_name("linux.go"));
        assert!(linux.matches_file_name("foo_linux.go"));
        assert!(linux.matches_file_name("foo_amd64.go"));
        assert!(linux.matches_file_name("foo_linux_amd64.go"));
        assert!(linux.matches_file_name("foo_linux_test.go"));
        assert!(linux.matches_file_name("foo_bar.go"));
        assert!(!linux.matches_file_name("foo_windows.go"));
        assert!(!linux.matches_file_name("foo_linux_arm64.go"));
        assert!(!linux.matches_file_name("foo_darwin_amd64_test.go"));
    }

    #[test]
    fn test_go_build_expressions() {
        let linux = tags(&["linux", "amd64"]);
        let check = |expr: &str| parse_go_build(expr).unwrap().eval(&|t| linux.matches(t));

        assert!(check("linux"));
        assert!(!check("windows"));
        assert!(check("linux && amd64"));
        assert!(check("windows || linux"));
        assert!(check("!windows"));
        assert!(!check("linux && !amd64"));
        assert!(check("(darwin || linux) && (amd64 || arm64)"));
        assert!(check("go1.18 && gc"));
        assert!(!check("ignore"));
    }

    #[test]
    fn test_go_build_errors() {
        for bad in ["", "linux &&", "linux & amd64", "(linux", "linux)", "linux amd64", "a-b"] {
            assert!(parse_go_build(bad).is_err(), "{bad:?}");
        }
    }

    #[test]
    fn test_plus_build_lines() {
        let linux = tags(&["linux", "amd64"]);
        let check = |line: &str| {
            linux.matches_constraint(parse_plus_build(line).unwrap().as_ref())
        };

        assert!(check("linux darwin"));
        assert!(check("linux,amd64"));
        assert!(!check("linux,!amd64"));
        assert!(!check("ignore"));
        assert!(check(""));
        assert!(parse_plus_build("linux,").is_err());
    }

    #[test]
    fn test_explicit_tags_do_not_imply_host() {
        let custom = tags(&["integration"]);
        assert!(custom.matches("integration"));
        assert!(!custom.matches(host_goos()));
        assert_eq!(custom.tags().collect::<Vec<_>>(), vec!["integration"]);
    }

    #[test]
    fn test_implied_tags() {
        let android = tags(&["android", "arm64"]);
        assert!(android.matches("linux"));
        assert!(android.matches("unix"));
        assert!(android.matches_file_name("foo_linux.go"));
        assert!(!android.matches("darwin"));

        assert!(tags(&["ios"]).matches("darwin"));
        assert!(tags(&["illumos"]).matches("solaris"));
        assert!(!tags(&["linux"]).matches("android"));
        assert!(!tags(&["windows", "amd64"]).matches("unix"));
        assert!(!tags(&["integration"]).matches("unix"));
    }

    #[test]
    fn test_cgo_is_enabled() {
        let custom = tags(&["linux", "amd64"]);
        assert!(custom.matches_constraint(Some(&parse_go_build("cgo").unwrap())));
        assert!(!custom.matches_constraint(Some(&parse_go_build("!cgo").unwrap())));
    }

    #[test]
    fn test_deep_nesting_is_rejected() {
        let deep = format!("{}linux{}", "(".repeat(5000), ")".repeat(5000));
        let err = parse_go_build(&deep).unwrap_err();
        assert!(err.contains("nested too deeply"), "{err}");
        assert!(parse_go_build(&"!".repeat(5000)).is_err());

        let shallow = format!("{}linux{}", "(".repeat(20), ")".repeat(20));
        assert_eq!(parse_go_build(&shallow).unwrap(), Constraint::Tag("linux".to_string()));
    }

    #[test]
    fn test_default_tags_are_host() {
        let host = BuildTags::new(&[]);
        assert!(host.matches(host_goos()));
        assert!(host.matches(host_goarch()));
    }
}
