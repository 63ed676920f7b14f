//! Lexical colorizer for code-block lines.
//!
//! Works line by line: escape first, then three ordered substitution passes
//! wrap numeric literals, keywords and punctuation in temporary markers, and
//! a final pass expands the markers into guide markup. The markers use
//! characters none of the passes can match, so later passes never corrupt
//! earlier output.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::guide::{Run, Span, push_escaped};

/// Keywords recognized across the handful of languages the guides document.
/// Case-insensitive, whole-word.
const KEYWORDS: &[&str] = &[
    "var", "and", "or", "xor", "for", "do", "while", "foreach", "as", "return", "die", "exit",
    "if", "then", "else", "elseif", "new", "delete", "try", "throw", "catch", "finally", "class",
    "function", "string", "array", "object", "resource", "bool", "boolean", "int", "integer",
    "float", "double", "real", "global", "const", "static", "public", "private", "protected",
    "published", "extends", "switch", "true", "false", "null", "void", "this", "self", "struct",
    "char", "signed", "unsigned", "short", "long",
];

static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)0x[0-9a-f]+|\d+").unwrap());

static KEYWORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)\b(?:{})\b", KEYWORDS.join("|"))).unwrap()
});

/// Colourize one line of code.
///
/// An empty or whitespace language tag yields a plain text span (escaped like
/// any other text at save time); otherwise the line is escaped here and the
/// finished markup is returned as a verbatim run.
pub fn colourize_line(line: &str, lang: &str) -> Run {
    if lang.trim().is_empty() {
        return Run::Span(Span::new(line));
    }

    let mut escaped = String::new();
    push_escaped(&mut escaped, line);

    let line = wrap_numbers(&escaped);
    let line = wrap_keywords(&line);
    let line = wrap_punctuation(&line);
    Run::Emit(expand_markers(&line))
}

fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Decimal or 0x-prefixed hexadecimal literals, not adjacent to a word
/// character.
fn wrap_numbers(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut copied = 0;
    for m in NUMBER.find_iter(line) {
        let before = line[..m.start()].chars().next_back();
        let after = line[m.end()..].chars().next();
        if before.is_some_and(is_word) || after.is_some_and(is_word) {
            continue;
        }
        out.push_str(&line[copied..m.start()]);
        out.push_str("<i>");
        out.push_str(m.as_str());
        out.push_str("</i>");
        copied = m.end();
    }
    out.push_str(&line[copied..]);
    out
}

/// Whole-word keywords, except when preceded by `$`, `%`, `@` or `>` or
/// followed by `="` (attribute positions in markup-ish sources).
fn wrap_keywords(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut copied = 0;
    for m in KEYWORD.find_iter(line) {
        let before = line[..m.start()].chars().next_back();
        if matches!(before, Some('$' | '%' | '@' | '>')) {
            continue;
        }
        if line[m.end()..].starts_with("=\"") {
            continue;
        }
        out.push_str(&line[copied..m.start()]);
        out.push_str("<f>");
        out.push_str(m.as_str());
        out.push_str("</f>");
        copied = m.end();
    }
    out.push_str(&line[copied..]);
    out
}

fn wrap_punctuation(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    for ch in line.chars() {
        match ch {
            '{' | '}' | '(' | ')' | '[' | ']' | ',' | '.' => {
                out.push_str("<b>");
                out.push(ch);
                out.push_str("</b>");
            }
            _ => out.push(ch),
        }
    }
    out
}

fn expand_markers(line: &str) -> String {
    line.replace("<i>", "@{i}")
        .replace("</i>", "@{ui}")
        .replace("<f>", "@{FG Fill}")
        .replace("</f>", "@{FG Text}")
        .replace("<b>", "@{b}")
        .replace("</b>", "@{ub}")
}
