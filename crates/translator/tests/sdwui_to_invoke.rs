use pretty_assertions::assert_eq;
use prompt_bridge_translator::{translate, Segment, Translator, TranslatorConfig};

#[test]
fn empty_prompt_stays_empty() {
    assert_eq!(translate(""), "");
}

#[test]
fn single_word_is_unchanged() {
    assert_eq!(translate("masterpiece"), "masterpiece");
}

#[test]
fn weight_without_brackets_is_inert() {
    assert_eq!(translate("masterpiece:1.2"), "masterpiece:1.2");
}

#[test]
fn round_brackets_add_one_plus_per_level() {
    assert_eq!(translate("(masterpiece)"), "(masterpiece)+");
    assert_eq!(translate("((masterpiece))"), "(masterpiece)++");
    assert_eq!(translate("(((masterpiece)))"), "(masterpiece)+++");
}

#[test]
fn square_brackets_add_one_minus_per_level() {
    assert_eq!(translate("[masterpiece]"), "(masterpiece)-");
    assert_eq!(translate("[[masterpiece]]"), "(masterpiece)--");
    assert_eq!(translate("[[[masterpiece]]]"), "(masterpiece)---");
}

#[test]
fn explicit_weights_map_to_sign_runs() {
    let cases = [
        ("1.1", "+"),
        ("1.2", "++"),
        ("1.3", "+++"),
        ("1.4", "++++"),
        ("0.9", "-"),
        ("0.8", "--"),
        ("0.7", "---"),
        ("0.6", "----"),
    ];

    for (weight, signs) in cases {
        assert_eq!(
            translate(&format!("(masterpiece:{weight})")),
            format!("(masterpiece){signs}"),
            "weight {weight}"
        );
    }
}

#[test]
fn neutral_explicit_weight_drops_markup() {
    assert_eq!(translate("a, (b:1.0), c"), "a, b, c");
}

#[test]
fn lora_tag_becomes_with_lora_call() {
    assert_eq!(
        translate("<lora:slingshot_v1.5:1>"),
        "withLora(slingshot_v1.5,1)"
    );
}

#[test]
fn composite_prompt_translates_segment_by_segment() {
    let prompt = "(masterpiece:1.2), (best quality:1.2), (extremely detailed:1.2), \
(photorealistic:1.1), (extremely detailed face), (ultra detailed), (1girl:1.1), \
(from below, from behind:1.2), (sitting on a bench:1.2), city park, (coffee cup close up:1.2), \
((delicate eyes and face)), (summer dress:1.26), (autumn leaves:1.0), soft light, \
(((petite body))), {high ponytail|short|red} hair, (smiling:1.4), (blush:1.2), \
(open mouth:1.0), (blonde:0.7), (onsen), <lora:slingshot_v1.5:1>";

    let expected = "(masterpiece)++, (best quality)++, (extremely detailed)++, \
(photorealistic)+, (extremely detailed face)+, (ultra detailed)+, (1girl)+, \
(from below, from behind)++, (sitting on a bench)++, city park, (coffee cup close up)++, \
(delicate eyes and face)++, (summer dress)+++, autumn leaves, soft light, \
(petite body)+++, {high ponytail|short|red} hair, (smiling)++++, (blush)++, \
open mouth, (blonde)---, (onsen)+, withLora(slingshot_v1.5,1)";

    assert_eq!(translate(prompt), expected);
}

#[test]
fn break_renders_as_heavily_weighted_token() {
    assert_eq!(
        translate("sky BREAK sea"),
        format!("sky(BREAK){}sea", "-".repeat(20))
    );
}

#[test]
fn break_inside_brackets_picks_up_the_bracket_weight() {
    assert_eq!(
        translate("(a BREAK b)"),
        format!("(a)+(BREAK){}(b)+", "-".repeat(21))
    );
}

#[test]
fn break_glued_to_non_ascii_text_still_separates() {
    assert_eq!(
        translate("猫BREAK犬"),
        format!("猫(BREAK){}犬", "-".repeat(20))
    );
}

#[test]
fn malformed_markup_degrades_to_text() {
    assert_eq!(translate("a) b] c"), "a) b] c");
    assert_eq!(translate("(unclosed"), "(unclosed)+");
    assert_eq!(translate("[unclosed"), "(unclosed)-");
    assert_eq!(translate(r"\(literal\)"), "(literal)");
}

#[test]
fn parse_exposes_merged_segments() {
    let attention = Translator::default().parse("a, (b c), d");
    assert_eq!(
        attention.segments(),
        &[
            Segment::new("a, ", 1.0),
            Segment::new("b c", 1.1),
            Segment::new(", d", 1.0),
        ]
    );
}

#[test]
fn custom_config_from_toml() {
    let config: TranslatorConfig =
        toml::from_str("round_multiplier = 1.2\nrewrite_lora = false\n").unwrap();
    let translator = Translator::new(config).unwrap();
    assert_eq!(
        translator.translate("(a), <lora:x:1>"),
        "(a)++, <lora:x:1>"
    );
}
