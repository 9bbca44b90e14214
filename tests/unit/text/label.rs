use super::*;
use crate::animation::ops::{emit, fade_to, move_by, remove_node, sequence};

fn font() -> BmFont {
    BmFont::parse(include_str!("../../data/mini_mono.fnt")).unwrap()
}

fn label(text: &str) -> Label {
    Label::from_bmfont(&font(), text, HAlign::Left, 0.0, Vec2::ZERO)
}

#[test]
fn elements_follow_layout_and_skip_newlines() {
    let l = label("Hi\nyo");
    assert_eq!(l.char_count(), 5);
    assert_eq!(l.text(), "Hi\nyo");
    assert!(l.element(2).is_none());
    assert_eq!(l.char_at(2), Some('\n'));
    assert_eq!(l.elements().count(), 4);
    assert_eq!(l.element(0).unwrap().ch(), 'H');
    assert_eq!(l.element(0).unwrap().position(), Point::new(5.0, 30.0));
    assert_eq!(l.element(3).unwrap().position(), Point::new(5.0, 10.0));
    assert!(l.element(5).is_none());
    assert_eq!(l.content_size(), Size::new(20.0, 40.0));
}

#[test]
fn element_setters_write_props() {
    let mut l = label("A");
    let e = l.element_mut(0).unwrap();
    e.set_scale(2.0);
    e.set_rotation(30.0);
    e.set_opacity(12);
    e.set_color(Rgb8::new(1, 2, 3));
    e.set_z_order(4);
    e.set_position(Point::new(1.0, 1.0));
    let p = *l.element(0).unwrap().props();
    assert_eq!(p.scale, 2.0);
    assert_eq!(p.rotation, 30.0);
    assert_eq!(p.opacity, 12);
    assert_eq!(p.color, Rgb8::new(1, 2, 3));
    assert_eq!(p.z_order, 4);
    assert_eq!(p.position, Point::new(1.0, 1.0));
}

#[test]
fn tick_advances_node_and_elements_and_collects_events() {
    let mut l = label("AB");
    l.run_action(move_by(1.0, Vec2::new(0.0, 10.0)));
    l.element_mut(1)
        .unwrap()
        .run_action(sequence(vec![move_by(1.0, Vec2::new(5.0, 0.0)), emit("b")]));
    assert!(l.is_animating());

    assert!(l.tick(0.5).is_empty());
    assert_eq!(l.node().position, Point::new(0.0, 5.0));
    let events = l.tick(0.5);
    assert_eq!(events, vec![ActionEvent::Cue("b".into())]);
    assert_eq!(l.element(1).unwrap().position(), Point::new(20.0, 10.0));
    assert!(!l.is_animating());
}

#[test]
fn element_remove_step_surfaces_as_event() {
    let mut l = label("A");
    l.element_mut(0).unwrap().run_action(remove_node());
    assert_eq!(l.tick(0.0), vec![ActionEvent::RemoveNode]);
}

#[test]
fn displayed_opacity_cascades_from_node() {
    let mut l = label("A");
    l.node_mut().opacity = 51;
    l.element_mut(0).unwrap().set_opacity(255);
    assert_eq!(l.displayed_opacity(0), Some(51));
    l.element_mut(0).unwrap().set_opacity(0);
    assert_eq!(l.displayed_opacity(0), Some(0));
    assert_eq!(l.displayed_opacity(3), None);
}

#[test]
fn duplicate_starts_from_rest_layout() {
    let mut l = label("AB");
    l.element_mut(0).unwrap().run_action(fade_to(1.0, 0));
    l.tick(1.0);
    l.element_mut(1).unwrap().set_position(Point::new(99.0, 99.0));
    l.element_mut(1).unwrap().run_action(move_by(5.0, Vec2::new(1.0, 0.0)));

    let copy = l.duplicate();
    assert_eq!(copy.text(), "AB");
    assert_eq!(copy.element(0).unwrap().opacity(), 255);
    assert_eq!(copy.element(1).unwrap().position(), Point::new(15.0, 10.0));
    assert!(!copy.is_animating());
}

#[test]
fn constructors_report_font_errors() {
    let err = Label::from_bitmap_font(
        "target/does-not-exist.fnt",
        "A",
        HAlign::Left,
        0.0,
        Vec2::ZERO,
    )
    .unwrap_err();
    assert!(matches!(err, LetterFxError::FontLoad(_)));

    let err = Label::from_outline_font(
        "A",
        "target/does-not-exist.ttf",
        16.0,
        Size::ZERO,
        HAlign::Left,
        VAlign::Top,
    )
    .unwrap_err();
    assert!(matches!(err, LetterFxError::FontLoad(_)));
}

#[test]
fn outline_label_from_bytes() {
    let bytes = include_bytes!("../../data/fonts/DejaVuSansMono.ttf");
    let l = Label::from_outline_bytes("ab c", bytes, 24.0, Size::ZERO, HAlign::Left, VAlign::Top)
        .unwrap();
    assert_eq!(l.char_count(), 4);
    assert_eq!(l.elements().count(), 4);
    assert!(Label::from_outline_bytes("a", bytes, -1.0, Size::ZERO, HAlign::Left, VAlign::Top).is_err());
}
