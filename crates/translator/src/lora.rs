use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

static LORA_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<lora:([^:<>]+):([^:<>]+)>").expect("LoRA pattern is valid"));

/// Rewrite every `<lora:NAME:WEIGHT>` tag into InvokeAI's `withLora(NAME,WEIGHT)`.
///
/// Tags of any other shape (missing weight, extra fields) are left alone.
pub fn rewrite_lora_tags(text: &str) -> Cow<'_, str> {
    LORA_TAG_RE.replace_all(text, "withLora(${1},${2})")
}
