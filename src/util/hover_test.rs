use super::*;

#[test]
fn show_sets_region_text_and_offset_position() {
    let mut hover = HoverState::default();
    hover.show("Тульская область", 100, 40);
    assert_eq!(hover.region.as_deref(), Some("Тульская область"));
    assert_eq!(
        hover.tooltip,
        Tooltip { visible: true, text: "Тульская область".to_owned(), x: 110, y: 50 }
    );
}

#[test]
fn update_position_follows_cursor() {
    let mut hover = HoverState::default();
    hover.show("Крым", 0, 0);
    hover.update_position(5, 7);
    assert_eq!((hover.tooltip.x, hover.tooltip.y), (15, 17));
}

#[test]
fn hide_clears_region_and_hides_tooltip() {
    let mut hover = HoverState::default();
    hover.show("Крым", 0, 0);
    hover.hide();
    assert!(hover.region.is_none());
    assert!(!hover.tooltip.visible);
}
