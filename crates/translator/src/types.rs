use serde::{Deserialize, Serialize};

/// Text emitted in place of the `BREAK` keyword
pub const BREAK_TEXT: &str = "BREAK";

/// Weight carried by the `BREAK` separator
pub const BREAK_WEIGHT: f64 = -1.0;

/// A run of prompt text with its resolved attention weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Literal text, markup already stripped
    pub text: String,

    /// Attention multiplier, 1.0 is neutral
    pub weight: f64,
}

impl Segment {
    /// Create a new segment
    #[must_use]
    pub fn new(text: impl Into<String>, weight: f64) -> Self {
        Self {
            text: text.into(),
            weight,
        }
    }

    /// Create a segment with neutral weight
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, 1.0)
    }

    /// The hard separator produced by `BREAK`
    #[must_use]
    pub fn break_marker() -> Self {
        Self::new(BREAK_TEXT, BREAK_WEIGHT)
    }
}

/// Ordered, never-empty sequence of weighted segments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Segment>", into = "Vec<Segment>")]
pub struct Attention {
    segments: Vec<Segment>,
}

impl Attention {
    /// Build an attention sequence, merging adjacent runs of equal weight.
    ///
    /// An empty input becomes a single neutral empty segment.
    #[must_use]
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        if segments.is_empty() {
            return Self {
                segments: vec![Segment::plain("")],
            };
        }

        Self {
            segments: merge_runs(segments),
        }
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false, kept for API symmetry with `len`
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    /// Concatenated text of every segment, weights ignored
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    #[must_use]
    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }
}

impl From<Vec<Segment>> for Attention {
    fn from(segments: Vec<Segment>) -> Self {
        Self::from_segments(segments)
    }
}

impl From<Attention> for Vec<Segment> {
    fn from(attention: Attention) -> Self {
        attention.segments
    }
}

impl<'a> IntoIterator for &'a Attention {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

/// Coalesce neighbours whose weights compare equal.
///
/// Weights come out of identical multiplication chains, so exact equality is
/// the intended comparison.
#[allow(clippy::float_cmp)]
fn merge_runs(segments: Vec<Segment>) -> Vec<Segment> {
    let mut merged: Vec<Segment> = Vec::with_capacity(segments.len());

    for segment in segments {
        match merged.last_mut() {
            Some(last) if last.weight == segment.weight => last.text.push_str(&segment.text),
            _ => merged.push(segment),
        }
    }

    merged
}
