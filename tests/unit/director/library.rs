use super::*;
use crate::{
    animation::runner::ActionEvent,
    director::DirectorContext,
    foundation::core::Size,
    foundation::diagnostic::Diagnostic,
    text::bmfont::BmFont,
    text::label::Label,
    text::layout::HAlign,
};

fn label(text: &str) -> Label {
    let font = BmFont::parse(include_str!("../../data/mini_mono.fnt")).unwrap();
    Label::from_bmfont(&font, text, HAlign::Left, 0.0, Vec2::ZERO)
}

fn ctx() -> DirectorContext {
    DirectorContext::new(Size::new(960.0, 640.0), 3)
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

fn close_pt(a: Point, b: Point) -> bool {
    close(a.x, b.x) && close(a.y, b.y)
}

fn homes(l: &Label) -> Vec<Point> {
    l.elements().map(|(_, e)| e.position()).collect()
}

fn run_for(l: &mut Label, secs: f64) -> Vec<ActionEvent> {
    let steps = (secs / 0.05).ceil() as usize + 1;
    (0..steps).flat_map(|_| l.tick(0.05)).collect()
}

#[test]
fn fly_in_from_left_starts_one_screen_left_and_lands_home() {
    let mut l = label("abc");
    let home = homes(&l);
    let mut c = ctx();
    Director::new(&mut l, &mut c).animate_in_fly_in_from_left(0.5);
    for (p, h) in homes(&l).iter().zip(&home) {
        assert!(close_pt(*p, *h - Vec2::new(960.0, 0.0)));
    }
    run_for(&mut l, 1.5);
    for (p, h) in homes(&l).iter().zip(&home) {
        assert!(close_pt(*p, *h));
    }
}

#[test]
fn fly_in_from_right_respects_label_scale_and_reverse_order() {
    let mut l = label("ab");
    l.node_mut().scale = 0.5;
    let home = homes(&l);
    let mut c = ctx();
    Director::new(&mut l, &mut c).animate_in_fly_in_from_right(1.0);
    assert!(close_pt(homes(&l)[0], home[0] + Vec2::new(1920.0, 0.0)));
    let first = l.element(0).unwrap().running_actions().next().unwrap();
    let last = l.element(1).unwrap().running_actions().next().unwrap();
    assert!(close(first.leading_delay(), 1.0));
    assert!(close(last.leading_delay(), 0.0));
}

#[test]
fn fly_in_from_top_and_bottom_use_screen_height() {
    let mut l = label("ab");
    let home = homes(&l);
    let mut c = ctx();
    Director::new(&mut l, &mut c).animate_in_fly_in_from_top(0.2);
    assert!(close_pt(homes(&l)[1], home[1] + Vec2::new(0.0, 640.0)));

    let mut l = label("ab");
    let mut c = ctx();
    Director::new(&mut l, &mut c).animate_in_fly_in_from_bottom(0.2);
    assert!(close_pt(homes(&l)[1], home[1] - Vec2::new(0.0, 640.0)));
    run_for(&mut l, 1.3);
    assert!(close_pt(homes(&l)[1], home[1]));
}

#[test]
fn canned_animation_on_one_character_is_rejected_without_mutation() {
    let mut l = label("a");
    let home = homes(&l);
    let mut c = ctx();
    let mut d = Director::new(&mut l, &mut c);
    d.animate_in_fly_in_from_left(1.0);
    d.animate_in_typewriter(1.0, None, None);
    d.animate_in_swell(1.0);
    assert_eq!(d.diagnostics().len(), 3);
    assert!(matches!(
        d.diagnostics().entries()[0],
        Diagnostic::TooFewCharacters {
            op: "animate_in_fly_in_from_left",
            count: 1
        }
    ));
    assert_eq!(homes(&l), home);
    assert_eq!(l.element(0).unwrap().scale(), 1.0);
    assert!(!l.is_animating());
}

#[test]
fn typewriter_reveals_in_order_with_cues() {
    let mut l = label("abc");
    let mut c = ctx();
    Director::new(&mut l, &mut c).animate_in_typewriter(
        1.0,
        Some("key".into()),
        Some("done".into()),
    );
    assert!(l.elements().all(|(_, e)| e.scale() == 0.0));

    let first = l.tick(0.0);
    assert_eq!(first, vec![ActionEvent::Cue("key".into())]);
    assert_eq!(l.element(0).unwrap().scale(), 1.0);
    assert_eq!(l.element(1).unwrap().scale(), 0.0);

    let rest = run_for(&mut l, 1.0);
    assert_eq!(
        rest,
        vec![
            ActionEvent::Cue("key".into()),
            ActionEvent::Cue("key".into()),
            ActionEvent::Cue("done".into()),
        ]
    );
    assert!(l.elements().all(|(_, e)| e.scale() == 1.0));
}

#[test]
fn drop_from_top_bounces_home() {
    let mut l = label("ab");
    let home = homes(&l);
    let mut c = ctx();
    Director::new(&mut l, &mut c).animate_in_drop_from_top(0.3);
    assert!(close_pt(homes(&l)[0], home[0] + Vec2::new(0.0, 640.0)));
    run_for(&mut l, 1.4);
    assert!(close_pt(homes(&l)[0], home[0]));
    assert!(close_pt(homes(&l)[1], home[1]));
}

#[test]
fn swell_in_grows_from_zero_and_settles_at_one() {
    let mut l = label("ab");
    let mut c = ctx();
    Director::new(&mut l, &mut c).animate_in_swell(0.4);
    assert_eq!(l.element(1).unwrap().scale(), 0.0);
    l.tick(0.2);
    assert!(close(l.element(0).unwrap().scale(), 1.5));
    run_for(&mut l, 1.0);
    assert!(l.elements().all(|(_, e)| close(e.scale(), 1.0)));
}

#[test]
fn swell_pulses_from_current_scale() {
    let mut l = label("ab");
    let mut c = ctx();
    Director::new(&mut l, &mut c).animate_swell(0.0);
    l.tick(0.1);
    assert!(close(l.element(1).unwrap().scale(), 1.25));
    l.tick(0.1);
    assert!(close(l.element(1).unwrap().scale(), 1.5));
    l.tick(0.2);
    assert!(close(l.element(1).unwrap().scale(), 1.0));
}

#[test]
fn reveal_from_left_hides_behind_first_and_restores_z() {
    let mut l = label("abc");
    let home = homes(&l);
    let mut c = ctx();
    Director::new(&mut l, &mut c).animate_in_reveal_from_left(1.0);

    let first = l.element(0).unwrap();
    assert_eq!(first.opacity(), 255);
    assert_eq!(first.z_order(), 10);
    for (i, e) in l.elements().skip(1) {
        assert_eq!(e.opacity(), 0, "index {i}");
        assert!(close(e.position().x, home[0].x));
    }

    run_for(&mut l, 1.0);
    assert_eq!(l.element(0).unwrap().z_order(), 0);
    for ((_, e), h) in l.elements().zip(&home) {
        assert!(close_pt(e.position(), *h));
        assert_eq!(e.opacity(), 255);
    }
}

#[test]
fn jump_staggers_hops_and_returns_home() {
    let mut l = label("abc");
    let home = homes(&l);
    let mut c = ctx();
    Director::new(&mut l, &mut c).animate_jump(1.0, 20.0);
    let delays: Vec<f64> = l
        .elements()
        .map(|(_, e)| e.running_actions().next().unwrap().leading_delay())
        .collect();
    assert!(close(delays[0], 0.0) && close(delays[1], 0.5) && close(delays[2], 1.0));

    l.tick(0.25);
    assert!(close(l.element(0).unwrap().position().y, home[0].y + 20.0));
    assert!(close(l.element(2).unwrap().position().y, home[2].y));
    run_for(&mut l, 1.5);
    assert_eq!(homes(&l).len(), 3);
    for (p, h) in homes(&l).iter().zip(&home) {
        assert!(close_pt(*p, *h));
    }
}

#[test]
fn jump_on_single_character_has_no_delay() {
    let mut l = label("a");
    let mut c = ctx();
    Director::new(&mut l, &mut c).animate_jump(1.0, 5.0);
    let a = l.element(0).unwrap().running_actions().next().unwrap();
    assert!(close(a.leading_delay(), 0.0));
}

#[test]
fn stretch_displaces_from_center_then_releases() {
    let mut l = label("abcd");
    let home = homes(&l);
    let cx = l.content_size().width / 2.0;
    let mut c = ctx();
    Director::new(&mut l, &mut c).animate_stretch_elastic(0.5, 1.0, 2.0);

    l.tick(0.5);
    for (p, h) in homes(&l).iter().zip(&home) {
        assert!(close(p.x, cx + (h.x - cx) * 2.0));
        assert!(close(p.y, h.y));
    }
    run_for(&mut l, 1.0);
    for (p, h) in homes(&l).iter().zip(&home) {
        assert!(close_pt(*p, *h));
    }
}

#[test]
fn spin_counter_rotates_characters_against_the_label() {
    let mut l = label("abc");
    let home = homes(&l);
    let cx = l.content_size().width / 2.0;
    let mut c = ctx();
    Director::new(&mut l, &mut c).animate_in_spin(1.0, 2);

    assert!(l.elements().all(|(_, e)| e.opacity() == 0 && close(e.position().x, cx)));
    run_for(&mut l, 1.0);
    assert!(close(l.node().rotation, 720.0));
    for ((_, e), h) in l.elements().zip(&home) {
        assert!(close(e.rotation(), -720.0));
        assert_eq!(e.opacity(), 255);
        assert!(close_pt(e.position(), *h));
    }
}

#[test]
fn rainbow_steps_through_eight_colors_ending_white() {
    let mut l = label("ab");
    let mut c = ctx();
    Director::new(&mut l, &mut c).animate_rainbow(1.0);
    let mut seen = Vec::new();
    for _ in 0..RAINBOW.len() {
        l.tick(0.2);
        seen.push(l.element(0).unwrap().color());
    }
    assert_eq!(seen, RAINBOW.to_vec());
    assert_eq!(seen.last(), Some(&Rgb8::WHITE));
    assert_eq!(RAINBOW.len(), 8);
}

#[test]
fn fly_past_removes_the_label_when_done() {
    let mut l = label("abc");
    let home = homes(&l);
    let mut c = ctx();
    Director::new(&mut l, &mut c).fly_past_and_remove();
    assert!(close_pt(homes(&l)[0], home[0] - Vec2::new(960.0, 0.0)));

    // 0.7 stagger + 0.5 + 0.9 + 0.5 legs.
    let events = run_for(&mut l, 2.6);
    assert_eq!(events, vec![ActionEvent::RemoveNode]);
    // Two legs of 960 - 24 plus a 48 drift: one screen past home.
    for (p, h) in homes(&l).iter().zip(&home) {
        assert!(close(p.x, h.x + 960.0));
    }
}
