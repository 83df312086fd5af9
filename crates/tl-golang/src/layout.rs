//! Indentation of multi-line source text.
//!
//! Text carried verbatim (opaque statements and expressions, comments) is
//! stored with its continuation lines relative to the line it starts on, so
//! it can be printed back at a different depth. Lines that begin inside a
//! raw string literal belong to the literal and are never touched.

use itertools::Itertools;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Lexeme {
    Code,
    Interpreted,
    Rune,
    Raw,
    LineComment,
    BlockComment,
}

/// For every line after the first, whether it starts inside a raw string.
fn continuation_in_raw_string(text: &str) -> Vec<bool> {
    let mut starts = Vec::new();
    let mut state = Lexeme::Code;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        state = match (state, c) {
            (Lexeme::Code, '"') => Lexeme::Interpreted,
            (Lexeme::Code, '\'') => Lexeme::Rune,
            (Lexeme::Code, '`') => Lexeme::Raw,
            (Lexeme::Code, '/') if chars.peek() == Some(&'/') => {
                chars.next();
                Lexeme::LineComment
            }
            (Lexeme::Code, '/') if chars.peek() == Some(&'*') => {
                chars.next();
                Lexeme::BlockComment
            }
            (Lexeme::Interpreted | Lexeme::Rune, '\\') => {
                chars.next();
                state
            }
            (Lexeme::Interpreted, '"') | (Lexeme::Rune, '\'') | (Lexeme::Raw, '`') => Lexeme::Code,
            (Lexeme::Interpreted | Lexeme::Rune | Lexeme::LineComment, '\n') => Lexeme::Code,
            (Lexeme::BlockComment, '*') if chars.peek() == Some(&'/') => {
                chars.next();
                Lexeme::Code
            }
            _ => state,
        };
        if c == '\n' {
            starts.push(state == Lexeme::Raw);
        }
    }
    starts
}

fn map_continuation_lines(text: &str, mut f: impl FnMut(&str) -> String) -> String {
    if !text.contains('\n') {
        return text.to_string();
    }
    let raw = continuation_in_raw_string(text);
    text.split('\n')
        .enumerate()
        .map(|(idx, line)| {
            if idx == 0 || raw[idx - 1] {
                line.to_string()
            } else {
                f(line)
            }
        })
        .join("\n")
}

/// Strips `indent` from the start of every continuation line.
pub fn dedent(text: &str, indent: &str) -> String {
    if indent.is_empty() {
        return text.to_string();
    }
    map_continuation_lines(text, |line| {
        line.strip_prefix(indent).unwrap_or(line).to_string()
    })
}

/// Prefixes every non-empty continuation line with `indent`.
pub fn indent_continuation(text: &str, indent: &str) -> String {
    if indent.is_empty() {
        return text.to_string();
    }
    map_continuation_lines(text, |line| {
        if line.is_empty() {
            String::new()
        } else {
            format!("{indent}{line}")
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn dedent_then_indent_restores_the_text() {
        let text = "for i := range xs {\n\t\txs[i]++\n\n\t}";
        let relative = dedent(text, "\t");
        assert_eq!(relative, "for i := range xs {\n\txs[i]++\n\n}");
        assert_eq!(indent_continuation(&relative, "\t"), text);
        assert_eq!(
            indent_continuation(&relative, "\t\t"),
            "for i := range xs {\n\t\t\txs[i]++\n\n\t\t}"
        );
    }

    #[test]
    fn raw_string_lines_are_left_alone() {
        let text = "s := `a\n\tb\n` + f(\n\t\tx)";
        assert_eq!(dedent(text, "\t"), "s := `a\n\tb\n` + f(\n\tx)");
        assert_eq!(
            indent_continuation("s := `a\nb\n`", "\t"),
            "s := `a\nb\n`"
        );
    }

    #[test]
    fn quotes_and_comments_do_not_open_raw_strings() {
        let text = "x := \"`\" // `\n\ty := '`'\n\tz";
        assert_eq!(dedent(text, "\t"), "x := \"`\" // `\ny := '`'\nz");
    }

    #[test]
    fn single_lines_are_unchanged() {
        assert_eq!(dedent("\tx := 1", "\t"), "\tx := 1");
        assert_eq!(indent_continuation("x := 1", "\t\t"), "x := 1");
    }
}
