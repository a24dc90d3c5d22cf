//! Printing of build files in buildifier's layout.

use super::{Arg, CallExpr, Expr, File};

const INDENT: usize = 4;

/// Formats `file` as text.
///
/// Statements are separated by a blank line. Calls without keyword arguments
/// (or marked compact) fit on one line; other calls put each argument on its
/// own line. Lists with more than one element are split one element per line.
///
/// ```
/// use gazelle_cli::bzl::{Arg, CallExpr, Expr, File, format_file};
///
/// let mut file = File::new("BUILD");
/// file.stmts.push(CallExpr::new(
///     "go_prefix",
///     vec![Arg::Positional(Expr::Str("example.com/repo".to_string()))],
/// ));
/// assert_eq!(format_file(&file), "go_prefix(\"example.com/repo\")\n");
/// ```
pub fn format_file(file: &File) -> String {
    let mut out = String::new();
    for (i, stmt) in file.stmts.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        write_call(&mut out, stmt, 0);
        out.push('\n');
    }
    out
}

fn write_call(out: &mut String, call: &CallExpr, indent: usize) {
    out.push_str(&call.func);
    out.push('(');

    let compact = call.force_compact || call.args.iter().all(|a| matches!(a, Arg::Positional(_)));
    if compact {
        for (i, arg) in call.args.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            write_arg(out, arg, indent);
        }
    } else {
        out.push('\n');
        for arg in &call.args {
            push_indent(out, indent + INDENT);
            write_arg(out, arg, indent + INDENT);
            out.push_str(",\n");
        }
        push_indent(out, indent);
    }
    out.push(')');
}

fn write_arg(out: &mut String, arg: &Arg, indent: usize) {
    match arg {
        Arg::Positional(expr) => write_expr(out, expr, indent),
        Arg::Keyword(name, expr) => {
            out.push_str(name);
            out.push_str(" = ");
            write_expr(out, expr, indent);
        }
    }
}

fn write_expr(out: &mut String, expr: &Expr, indent: usize) {
    match expr {
        Expr::Ident(name) => out.push_str(name),
        Expr::Str(value) => write_quoted(out, value),
        Expr::List(items) if items.len() <= 1 => {
            out.push('[');
            if let Some(item) = items.first() {
                write_expr(out, item, indent);
            }
            out.push(']');
        }
        Expr::List(items) => {
            out.push_str("[\n");
            for item in items {
                push_indent(out, indent + INDENT);
                write_expr(out, item, indent + INDENT);
                out.push_str(",\n");
            }
            push_indent(out, indent);
            out.push(']');
        }
    }
}

fn write_quoted(out: &mut String, value: &str) {
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
}

fn push_indent(out: &mut String, width: usize) {
    out.extend(std::iter::repeat_n(' ', width));
}
