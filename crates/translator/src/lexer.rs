//! Tokenizer for web UI attention syntax.
//!
//! One regex scans the prompt left to right. Alternatives are tried in order,
//! so escapes win over brackets and a weighted `:1.2)` closer wins over a bare
//! `)`. The final `\\` alternative picks up a backslash that escapes nothing,
//! which makes the scan cover every input byte.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static ATTENTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"\\\(|",
        r"\\\)|",
        r"\\\[|",
        r"\\\]|",
        r"\\\\|",
        r"\||",
        r"\(|",
        r"\[|",
        r":([+-]?[.0-9]+)\)|",
        r"\)|",
        r"\]|",
        r"[^\\()\[\]:]+|",
        r":|",
        r"\\",
    ))
    .expect("attention pattern is valid")
});

/// A lexical unit of an attention prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// `\(`, `\)`, `\[`, `\]` or `\\`; holds the character without the backslash
    Escaped(&'a str),
    /// `|`
    Pipe,
    /// `(`
    OpenRound,
    /// `[`
    OpenSquare,
    /// `:<number>)`
    WeightedClose {
        /// The whole matched closer, e.g. `:1.2)`
        raw: &'a str,
        /// The number as written, e.g. `1.2`
        weight: &'a str,
    },
    /// `)`
    CloseRound,
    /// `]`
    CloseSquare,
    /// Run of characters free of `\ ( ) [ ] :`
    Text(&'a str),
    /// `:` not followed by a weight and `)`
    Colon,
    /// `\` that escapes nothing
    StrayBackslash,
}

impl<'a> Token<'a> {
    /// Source text this token was scanned from
    #[must_use]
    pub fn raw(&self) -> &'a str {
        match *self {
            Token::Escaped(ch) => match ch {
                "(" => r"\(",
                ")" => r"\)",
                "[" => r"\[",
                "]" => r"\]",
                _ => r"\\",
            },
            Token::Pipe => "|",
            Token::OpenRound => "(",
            Token::OpenSquare => "[",
            Token::WeightedClose { raw, .. } => raw,
            Token::CloseRound => ")",
            Token::CloseSquare => "]",
            Token::Text(text) => text,
            Token::Colon => ":",
            Token::StrayBackslash => "\\",
        }
    }
}

/// Split a prompt into tokens
pub fn tokenize(input: &str) -> impl Iterator<Item = Token<'_>> {
    ATTENTION_RE.captures_iter(input).map(classify)
}

fn classify(caps: Captures<'_>) -> Token<'_> {
    let whole = caps.get(0).map_or("", |m| m.as_str());

    if let Some(weight) = caps.get(1) {
        return Token::WeightedClose {
            raw: whole,
            weight: weight.as_str(),
        };
    }

    match whole {
        "|" => Token::Pipe,
        "(" => Token::OpenRound,
        "[" => Token::OpenSquare,
        ")" => Token::CloseRound,
        "]" => Token::CloseSquare,
        ":" => Token::Colon,
        "\\" => Token::StrayBackslash,
        escaped if escaped.len() == 2 && escaped.starts_with('\\') => Token::Escaped(&escaped[1..]),
        text => Token::Text(text),
    }
}
