use std::borrow::Cow;

use crate::config::TranslatorConfig;
use crate::lora::rewrite_lora_tags;
use crate::types::{Attention, Segment};

/// Renders an [`Attention`] sequence in InvokeAI syntax.
///
/// Neutral segments pass through as written; weighted ones become `(text)`
/// followed by one `+` or `-` per `emphasis_step` of distance from 1.0.
#[derive(Debug, Clone, Copy)]
pub struct InvokeFormatter {
    emphasis_step: f64,
    weight_precision: usize,
    max_sign_run: usize,
    rewrite_lora: bool,
}

impl Default for InvokeFormatter {
    fn default() -> Self {
        Self::new(&TranslatorConfig::default())
    }
}

impl InvokeFormatter {
    #[must_use]
    pub fn new(config: &TranslatorConfig) -> Self {
        Self {
            emphasis_step: config.emphasis_step,
            weight_precision: config.weight_precision,
            max_sign_run: config.max_sign_run,
            rewrite_lora: config.rewrite_lora,
        }
    }

    /// Render every segment and concatenate without separators
    #[must_use]
    pub fn format(&self, attention: &Attention) -> String {
        let mut out = String::new();
        for segment in attention {
            self.render_into(&mut out, segment);
        }
        out
    }

    fn render_into(&self, out: &mut String, segment: &Segment) {
        let text = if self.rewrite_lora {
            rewrite_lora_tags(&segment.text)
        } else {
            Cow::Borrowed(segment.text.as_str())
        };

        let weight = round_to_precision(segment.weight, self.weight_precision);

        if weight == 1.0 {
            out.push_str(&text);
            return;
        }

        let sign = if weight < 1.0 { '-' } else { '+' };
        out.push('(');
        out.push_str(&text);
        out.push(')');
        out.extend(std::iter::repeat(sign).take(self.sign_count(weight)));
    }

    fn sign_count(&self, weight: f64) -> usize {
        let steps = ((weight - 1.0).abs() / self.emphasis_step).round();
        // `as` saturates and maps NaN to zero
        (steps as usize).min(self.max_sign_run)
    }
}

/// Round through decimal formatting so `1.2100000000000002` becomes `1.21`
fn round_to_precision(weight: f64, precision: usize) -> f64 {
    format!("{weight:.precision$}").parse().unwrap_or(weight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(segments: Vec<Segment>) -> String {
        InvokeFormatter::default().format(&Attention::from_segments(segments))
    }

    fn weighted(weight: f64) -> String {
        render(vec![Segment::new("cat", weight)])
    }

    #[test]
    fn neutral_weight_passes_through() {
        assert_eq!(weighted(1.0), "cat");
        assert_eq!(weighted(1.004), "cat");
        assert_eq!(weighted(0.996), "cat");
    }

    #[test]
    fn sign_run_tracks_distance_from_one() {
        assert_eq!(weighted(1.1), "(cat)+");
        assert_eq!(weighted(1.2), "(cat)++");
        assert_eq!(weighted(1.3), "(cat)+++");
        assert_eq!(weighted(1.4), "(cat)++++");
        assert_eq!(weighted(0.9), "(cat)-");
        assert_eq!(weighted(0.8), "(cat)--");
        assert_eq!(weighted(0.7), "(cat)---");
        assert_eq!(weighted(0.6), "(cat)----");
    }

    #[test]
    fn float_drift_is_absorbed() {
        assert_eq!(weighted(1.1 * 1.1), "(cat)++");
        assert_eq!(weighted(1.21), "(cat)++");
        assert_eq!(weighted(1.26), "(cat)+++");
        assert_eq!(weighted(1.1 * 1.1 * 1.1), "(cat)+++");
    }

    #[test]
    fn small_deviation_still_wraps_in_parentheses() {
        assert_eq!(weighted(1.02), "(cat)");
    }

    #[test]
    fn break_sentinel_renders_through_generic_rule() {
        assert_eq!(
            render(vec![Segment::break_marker()]),
            format!("(BREAK){}", "-".repeat(20))
        );
    }

    #[test]
    fn sign_run_is_capped() {
        let config = TranslatorConfig {
            max_sign_run: 5,
            ..Default::default()
        };
        let formatter = InvokeFormatter::new(&config);
        let attention = Attention::from_segments(vec![Segment::new("cat", 1e300)]);
        assert_eq!(formatter.format(&attention), "(cat)+++++");
    }

    #[test]
    fn segments_are_joined_without_separator() {
        assert_eq!(
            render(vec![
                Segment::plain("a, "),
                Segment::new("b", 1.2),
                Segment::plain(", c"),
            ]),
            "a, (b)++, c"
        );
    }

    #[test]
    fn lora_tags_are_rewritten_inside_and_outside_emphasis() {
        assert_eq!(
            render(vec![
                Segment::plain("<lora:a:1>, "),
                Segment::new("<lora:b:0.5>", 1.1),
            ]),
            "withLora(a,1), (withLora(b,0.5))+"
        );
    }

    #[test]
    fn lora_rewrite_can_be_disabled() {
        let formatter = InvokeFormatter::new(&TranslatorConfig::without_lora_rewrite());
        let attention = Attention::from_segments(vec![Segment::plain("<lora:a:1>")]);
        assert_eq!(formatter.format(&attention), "<lora:a:1>");
    }

    #[test]
    fn custom_step_changes_run_length() {
        let config = TranslatorConfig {
            emphasis_step: 0.05,
            ..Default::default()
        };
        let formatter = InvokeFormatter::new(&config);
        let attention = Attention::from_segments(vec![Segment::new("cat", 1.2)]);
        assert_eq!(formatter.format(&attention), "(cat)++++");
    }
}
