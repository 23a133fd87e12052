use griddom::{Element, Key};

// ============================================================================
// Key Codes
// ============================================================================

#[test]
fn test_arrow_key_codes() {
    assert_eq!(Key::Up.key_code(), 38);
    assert_eq!(Key::Down.key_code(), 40);
    assert_eq!(Key::from_key_code(38), Some(Key::Up));
    assert_eq!(Key::from_key_code(40), Some(Key::Down));
}

#[test]
fn test_char_key_codes_are_uppercase() {
    assert_eq!(Key::Char('a').key_code(), 65);
    assert_eq!(Key::from_key_code(65), Some(Key::Char('A')));
    assert_eq!(Key::from_key_code(1), None);
}

#[test]
fn test_keys_without_variants_have_no_key() {
    for code in [9, 13, 27, 37, 39, 46, 116] {
        assert_eq!(Key::from_key_code(code), None, "{code}");
    }
}

// ============================================================================
// Element State
// ============================================================================

#[test]
fn test_class_toggling() {
    let mut el = Element::new("tr").class("GridRowEven");
    el.set_class_enabled("ui-state-highlight", true);
    assert!(el.has_class("ui-state-highlight"));
    el.remove_class("GridRowEven");
    el.add_class("GridRowOdd");
    assert_eq!(el.classes, vec!["ui-state-highlight", "GridRowOdd"]);
}

#[test]
fn test_style_px_round_trip() {
    let mut el = Element::new("div").attr("style", "width: 98px; display:none");
    assert_eq!(el.style_px("width"), Some(98));
    assert!(el.is_hidden());
    el.set_style_px("width", 120);
    el.remove_style("display");
    assert_eq!(el.style_text(), "width: 120px");
}

#[test]
fn test_set_text_clears_children() {
    let mut el = Element::new("div").child(Element::new("img"));
    el.set_text("hello");
    assert!(el.child_nodes().is_empty());
    assert_eq!(el.text_content(), "hello");
    el.set_text("");
    assert_eq!(el.text_content(), "");
}
