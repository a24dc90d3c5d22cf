//! Parsing of Go source file headers.
//!
//! Only the part of a file the package loader needs is read: leading build
//! constraint comments, the package clause and the import declarations.
//! Parsing stops at the first declaration that is not an import.

use super::constraint::{Constraint, parse_go_build, parse_plus_build};

/// What the loader needs to know about one Go file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    /// The name in the package clause
    pub package: String,
    /// Imported paths in declaration order
    pub imports: Vec<String>,
    /// The file's build constraint, if any
    pub constraint: Option<Constraint>,
}

/// Parses the header of a Go source file.
pub fn parse_header(src: &str) -> Result<FileHeader, String> {
    let src = src.strip_prefix('\u{FEFF}').unwrap_or(src);
    let constraint = read_constraint(src)?;
    let mut lexer = Lexer::new(src);

    match lexer.next_token()? {
        Some(Tok::Ident(kw)) if kw == "package" => {}
        _ => return Err("expected 'package' clause".to_string()),
    }
    let package = match lexer.next_token()? {
        Some(Tok::Ident(name)) => name,
        _ => return Err("expected package name".to_string()),
    };

    let mut imports = Vec::new();
    loop {
        match lexer.next_token()? {
            Some(Tok::Semi) => continue,
            Some(Tok::Ident(kw)) if kw == "import" => {}
            _ => break,
        }
        match lexer.next_token()? {
            Some(Tok::LParen) => loop {
                match lexer.next_token()? {
                    Some(Tok::RParen) => break,
                    Some(Tok::Semi) => continue,
                    Some(tok) => imports.push(import_spec(&mut lexer, tok)?),
                    None => return Err("unterminated import group".to_string()),
                }
            },
            Some(tok) => imports.push(import_spec(&mut lexer, tok)?),
            None => return Err("unexpected end of file in import".to_string()),
        }
    }

    Ok(FileHeader {
        package,
        imports,
        constraint,
    })
}

/// Reads an import spec whose first token is `first`: `"path"`,
/// `name "path"`, `. "path"` or `_ "path"`.
fn import_spec(lexer: &mut Lexer<'_>, first: Tok) -> Result<String, String> {
    let tok = match first {
        Tok::Ident(_) | Tok::Dot => lexer.next_token()?,
        other => Some(other),
    };
    match tok {
        Some(Tok::Str(path)) if !path.is_empty() => Ok(path),
        Some(Tok::Str(_)) => Err("empty import path".to_string()),
        _ => Err("expected import path".to_string()),
    }
}

/// Collects the build constraint from the comments preceding the package
/// clause. `//go:build` takes precedence over `// +build` lines; `+build`
/// lines only count when their comment group is followed by a blank line.
fn read_constraint(src: &str) -> Result<Option<Constraint>, String> {
    let mut go_build = None;
    let mut plus_build: Vec<&str> = Vec::new();
    let mut group: Vec<&str> = Vec::new();

    for line in src.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            plus_build.append(&mut group);
            continue;
        }
        let Some(comment) = trimmed.strip_prefix("//") else {
            break;
        };
        if let Some(expr) = comment.strip_prefix("go:build") {
            if expr.is_empty() || expr.starts_with(char::is_whitespace) {
                go_build = Some(parse_go_build(expr)?);
            }
        } else if let Some(args) = comment.trim_start().strip_prefix("+build") {
            if args.is_empty() || args.starts_with(char::is_whitespace) {
                group.push(args);
            }
        }
    }

    if go_build.is_some() {
        return Ok(go_build);
    }
    let mut result: Option<Constraint> = None;
    for line in plus_build {
        if let Some(c) = parse_plus_build(line)? {
            result = Some(match result {
                Some(r) => Constraint::And(Box::new(r), Box::new(c)),
                None => c,
            });
        }
    }
    Ok(result)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Tok {
    Ident(String),
    Str(String),
    LParen,
    RParen,
    Semi,
    Dot,
    Other,
}

struct Lexer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
        }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn skip_trivia(&mut self) -> Result<(), String> {
        loop {
            let rest = self.rest();
            let trimmed = rest.trim_start();
            self.pos += rest.len() - trimmed.len();
            if trimmed.starts_with("//") {
                self.pos += trimmed.find('\n').unwrap_or(trimmed.len());
            } else if let Some(body) = trimmed.strip_prefix("/*") {
                let end = body.find("*/").ok_or("unterminated block comment")?;
                self.pos += 2 + end + 2;
            } else {
                return Ok(());
            }
        }
    }

    fn next_token(&mut self) -> Result<Option<Tok>, String> {
        self.skip_trivia()?;
        let rest = self.rest();
        let Some(c) = rest.chars().next() else {
            return Ok(None);
        };

        let tok = match c {
            '(' => {
                self.pos += 1;
                Tok::LParen
            }
            ')' => {
                self.pos += 1;
                Tok::RParen
            }
            ';' => {
                self.pos += 1;
                Tok::Semi
            }
            '.' => {
                self.pos += 1;
                Tok::Dot
            }
            '"' => {
                let (value, len) = interpreted_string(rest)?;
                self.pos += len;
                Tok::Str(value)
            }
            '`' => {
                let end = rest[1..].find('`').ok_or("unterminated raw string")?;
                self.pos += end + 2;
                Tok::Str(rest[1..=end].to_string())
            }
            c if c.is_alphabetic() || c == '_' => {
                let len = rest
                    .find(|ch: char| !(ch.is_alphanumeric() || ch == '_'))
                    .unwrap_or(rest.len());
                self.pos += len;
                Tok::Ident(rest[..len].to_string())
            }
            other => {
                self.pos += other.len_utf8();
                Tok::Other
            }
        };
        Ok(Some(tok))
    }
}

/// Decodes the interpreted string literal at the start of `s`, returning the
/// value and the literal's length in bytes.
fn interpreted_string(s: &str) -> Result<(String, usize), String> {
    let mut value = String::new();
    let mut chars = s.char_indices().skip(1);
    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return Ok((value, i + 1)),
            '\n' => break,
            '\\' => match chars.next() {
                Some((_, 'n')) => value.push('\n'),
                Some((_, 't')) => value.push('\t'),
                Some((_, esc @ ('\\' | '"' | '\''))) => value.push(esc),
                Some((_, other)) => {
                    return Err(format!("unsupported escape \\{other} in import path"));
                }
                None => break,
            },
            c => value.push(c),
        }
    }
    Err("unterminated string literal".to_string())
}
