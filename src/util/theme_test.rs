use super::*;

#[test]
fn black_attribute_selects_dark() {
    assert_eq!(theme_from_attr(Some("black")), Theme::Dark);
}

#[test]
fn other_or_missing_attribute_selects_light() {
    assert_eq!(theme_from_attr(Some("light")), Theme::Light);
    assert_eq!(theme_from_attr(Some("")), Theme::Light);
    assert_eq!(theme_from_attr(None), Theme::Light);
}

#[test]
fn card_style_palettes_differ_by_theme() {
    let light = card_style(Theme::Light);
    let dark = card_style(Theme::Dark);

    assert_eq!(light["base"]["color"], "#1f2937");
    assert_eq!(dark["base"]["color"], "#e5e7eb");
    assert_eq!(light["invalid"]["color"], "#ef4444");
    assert_eq!(dark["invalid"]["color"], "#fca5a5");
}

#[test]
fn card_style_has_base_and_invalid_blocks() {
    let style = card_style(Theme::Light);
    assert!(style["base"].is_object());
    assert!(style["invalid"].is_object());
    assert_eq!(style["base"]["fontSize"], "16px");
}
