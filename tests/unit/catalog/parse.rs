use super::*;

fn def_with_variants(variants: &[&str]) -> SheetDefinition {
    serde_json::from_value(serde_json::json!({
        "name": "Pixie",
        "type_name": "hair",
        "layer_1": {"zPos": 120, "male": "hair/pixie/"},
        "variants": variants,
    }))
    .unwrap()
}

fn parsed(name: &str, variant: &str) -> ParsedValue {
    ParsedValue {
        name: name.to_string(),
        variant: variant.to_string(),
    }
}

#[test]
fn heuristic_splits_after_last_capitalized_segment() {
    assert_eq!(heuristic_parse("Pixie_dark_brown"), parsed("Pixie", "dark_brown"));
    assert_eq!(
        heuristic_parse("Longsleeves_2_Overlay_navy"),
        parsed("Longsleeves 2 Overlay", "navy")
    );
    assert_eq!(
        heuristic_parse("Basic_Shoes_orange"),
        parsed("Basic Shoes", "orange")
    );
}

#[test]
fn heuristic_skips_numeric_segments() {
    // "2" uppercases to itself but is numeric, so it belongs to the variant side.
    assert_eq!(heuristic_parse("Vest_2"), parsed("Vest", "2"));
    assert_eq!(
        heuristic_parse("Shortsleeves_2_Overlay_maroon"),
        parsed("Shortsleeves 2 Overlay", "maroon")
    );
}

#[test]
fn heuristic_defaults_to_last_segment_as_variant() {
    assert_eq!(heuristic_parse("plain_lower_case"), parsed("plain lower", "case"));
    assert_eq!(heuristic_parse("single"), parsed("", "single"));
    assert_eq!(heuristic_parse(""), parsed("", ""));
}

#[test]
fn heuristic_all_capitalized_yields_empty_variant() {
    assert_eq!(heuristic_parse("Left_Monocle"), parsed("Left Monocle", ""));
}

#[test]
fn refinement_prefers_catalog_variant_with_spaces() {
    let def = def_with_variants(&["dark brown", "blonde"]);
    assert_eq!(
        parse_value("Pixie_dark_brown", Some(&def)),
        parsed("Pixie", "dark brown")
    );
}

#[test]
fn refinement_overrides_heuristic_when_they_differ() {
    // Capitalized variants get swallowed into the name by the heuristic.
    let def = def_with_variants(&["Light_Gray"]);
    assert_eq!(heuristic_parse("Cape_Light_Gray"), parsed("Cape Light Gray", ""));
    assert_eq!(
        parse_value("Cape_Light_Gray", Some(&def)),
        parsed("Cape", "Light_Gray")
    );
}

#[test]
fn refinement_takes_first_matching_split() {
    let def = def_with_variants(&["blue", "navy_blue"]);
    assert_eq!(
        parse_value("Tunic_navy_blue", Some(&def)),
        parsed("Tunic", "navy_blue")
    );
}

#[test]
fn refinement_falls_back_to_heuristic() {
    let def = def_with_variants(&["blonde"]);
    assert_eq!(
        parse_value("Pixie_dark_brown", Some(&def)),
        parsed("Pixie", "dark_brown")
    );
    assert_eq!(
        parse_value("Pixie_dark_brown", None),
        heuristic_parse("Pixie_dark_brown")
    );
    let empty = def_with_variants(&[]);
    assert_eq!(
        parse_value("Pixie_dark_brown", Some(&empty)),
        parsed("Pixie", "dark_brown")
    );
}
