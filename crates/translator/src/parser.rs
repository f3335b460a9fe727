use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::TranslatorConfig;
use crate::lexer::{tokenize, Token};
use crate::types::{Attention, Segment};

// ASCII word boundary: `BREAK` glued to CJK or accented letters still separates.
static BREAK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*(?-u:\b)BREAK(?-u:\b)\s*").expect("BREAK pattern is valid")
});

/// Resolves bracket emphasis and explicit weights into an [`Attention`] sequence
#[derive(Debug, Clone, Copy)]
pub struct AttentionParser {
    round_multiplier: f64,
    square_multiplier: f64,
}

impl Default for AttentionParser {
    fn default() -> Self {
        Self::new(&TranslatorConfig::default())
    }
}

impl AttentionParser {
    #[must_use]
    pub fn new(config: &TranslatorConfig) -> Self {
        Self {
            round_multiplier: config.round_multiplier,
            square_multiplier: config.square_multiplier,
        }
    }

    /// Parse a prompt. Never fails and never returns an empty sequence.
    pub fn parse(&self, prompt: &str) -> Attention {
        let mut state = ParseState::default();

        for token in tokenize(prompt) {
            match token {
                Token::Escaped(ch) => state.segments.push(Segment::plain(ch)),
                Token::OpenRound => state.round.push(state.segments.len()),
                Token::OpenSquare => state.square.push(state.segments.len()),
                Token::WeightedClose { raw, weight } => {
                    match (parse_weight(weight), state.round.pop()) {
                        (Some(multiplier), Some(start)) => state.multiply_range(start, multiplier),
                        (None, Some(start)) => {
                            log::debug!("Weight '{weight}' is not a number, keeping '{raw}' as text");
                            state.round.push(start);
                            state.push_text(raw);
                        }
                        (_, None) => {
                            log::debug!("Unmatched '{raw}' kept as text");
                            state.push_text(raw);
                        }
                    }
                }
                Token::CloseRound => match state.round.pop() {
                    Some(start) => state.multiply_range(start, self.round_multiplier),
                    None => {
                        log::debug!("Unmatched ')' kept as text");
                        state.push_text(token.raw());
                    }
                },
                Token::CloseSquare => match state.square.pop() {
                    Some(start) => state.multiply_range(start, self.square_multiplier),
                    None => {
                        log::debug!("Unmatched ']' kept as text");
                        state.push_text(token.raw());
                    }
                },
                Token::Pipe | Token::Text(_) | Token::Colon | Token::StrayBackslash => {
                    state.push_text(token.raw());
                }
            }
        }

        if !state.round.is_empty() || !state.square.is_empty() {
            log::debug!(
                "Closing {} round and {} square bracket(s) at end of prompt",
                state.round.len(),
                state.square.len()
            );
        }
        for start in std::mem::take(&mut state.round) {
            state.multiply_range(start, self.round_multiplier);
        }
        for start in std::mem::take(&mut state.square) {
            state.multiply_range(start, self.square_multiplier);
        }

        Attention::from_segments(state.segments)
    }
}

#[derive(Default)]
struct ParseState {
    segments: Vec<Segment>,
    round: Vec<usize>,
    square: Vec<usize>,
}

impl ParseState {
    fn multiply_range(&mut self, start: usize, multiplier: f64) {
        for segment in &mut self.segments[start..] {
            segment.weight *= multiplier;
        }
    }

    fn push_text(&mut self, text: &str) {
        for (i, part) in BREAK_RE.split(text).enumerate() {
            if i > 0 {
                self.segments.push(Segment::break_marker());
            }
            self.segments.push(Segment::plain(part));
        }
    }
}

/// Read the longest numeric prefix of an explicit weight (`1.2.3` reads as `1.2`).
fn parse_weight(raw: &str) -> Option<f64> {
    let mut end = 0;
    let mut seen_dot = false;

    for (i, ch) in raw.char_indices() {
        match ch {
            '+' | '-' if i == 0 => {}
            '0'..='9' => {}
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end = i + ch.len_utf8();
    }

    raw[..end]
        .parse::<f64>()
        .ok()
        .filter(|weight| weight.is_finite())
}
