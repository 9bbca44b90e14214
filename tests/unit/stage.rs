use super::*;
use crate::{
    animation::ops::{emit, remove_node, scale_to, sequence},
    director::dispatch::Completion,
    foundation::core::Vec2,
    text::bmfont::BmFont,
    text::layout::HAlign,
};

fn label(text: &str) -> Label {
    let font = BmFont::parse(include_str!("../data/mini_mono.fnt")).unwrap();
    Label::from_bmfont(&font, text, HAlign::Left, 0.0, Vec2::ZERO)
}

#[test]
fn labels_get_increasing_ids() {
    let mut stage = Stage::new(StageConfig::default());
    assert!(stage.is_empty());
    let a = stage.add_label(label("a"));
    let b = stage.add_label(label("b"));
    assert_eq!((a, b), (NodeId(0), NodeId(1)));
    assert_eq!(b.to_string(), "#1");
    assert_eq!(stage.len(), 2);
    assert_eq!(stage.labels().map(|(id, _)| id).collect::<Vec<_>>(), vec![a, b]);

    assert_eq!(stage.remove(a).map(|l| l.text()), Some("a".to_owned()));
    assert!(stage.label(a).is_none());
    assert!(stage.director(a).is_none());
    assert_eq!(stage.len(), 1);
}

#[test]
fn cues_are_tagged_with_their_label() {
    let mut stage = Stage::new(StageConfig::default());
    let _quiet = stage.add_label(label("x"));
    let id = stage.add_label(label("ab"));
    stage
        .director(id)
        .unwrap()
        .run_action_on_all(scale_to(0.5, 2.0), Completion::cue("grown"));

    assert!(stage.tick(0.25).is_empty());
    let events = stage.tick(0.25);
    assert_eq!(
        events,
        vec![StageEvent::Cue {
            node: id,
            cue: "grown".into()
        }]
    );
    assert!((stage.elapsed() - 0.5).abs() < 1e-12);
}

#[test]
fn remove_node_drops_the_label_once() {
    let mut stage = Stage::new(StageConfig::default());
    let id = stage.add_label(label("ab"));
    let l = stage.label_mut(id).unwrap();
    l.run_action(sequence(vec![emit("bye"), remove_node()]));
    l.element_mut(0).unwrap().run_action(remove_node());

    let events = stage.tick(0.1);
    assert_eq!(
        events,
        vec![
            StageEvent::Cue {
                node: id,
                cue: "bye".into()
            },
            StageEvent::Removed { node: id },
        ]
    );
    assert!(stage.is_empty());
    assert!(stage.tick(0.1).is_empty());
}

#[test]
fn vortex_ghosts_join_the_stage_and_leave_on_their_own() {
    let mut stage = Stage::new(StageConfig::default());
    let id = stage.add_label(label("abc"));
    stage
        .director(id)
        .unwrap()
        .animate_in_vortex(0.5, 2, false, true);
    assert_eq!(stage.len(), 1);

    stage.tick(0.0);
    assert_eq!(stage.len(), 4);

    let mut removed = Vec::new();
    for _ in 0..40 {
        for event in stage.tick(0.05) {
            if let StageEvent::Removed { node } = event {
                removed.push(node);
            }
        }
    }
    assert_eq!(removed, vec![NodeId(1), NodeId(2), NodeId(3)]);
    assert_eq!(stage.len(), 1);
    assert!(stage.label(id).is_some());
}

#[test]
fn diagnostics_accumulate_until_taken() {
    let mut stage = Stage::new(StageConfig::default());
    let id = stage.add_label(label("a"));
    let mut d = stage.director(id).unwrap();
    d.set_char_scale(3, 1.0);
    d.animate_in_swell(1.0);
    assert_eq!(stage.diagnostics().len(), 2);
    assert_eq!(stage.take_diagnostics().len(), 2);
    assert!(stage.diagnostics().is_empty());
}

#[test]
fn invalid_dt_does_not_move_the_clock() {
    let mut stage = Stage::new(StageConfig::default());
    stage.add_label(label("a"));
    stage.tick(f64::NAN);
    stage.tick(-1.0);
    assert_eq!(stage.elapsed(), 0.0);
}

#[test]
fn events_serialize_with_kind_tags() {
    let json = serde_json::to_string(&StageEvent::Removed { node: NodeId(4) }).unwrap();
    assert_eq!(json, r#"{"kind":"removed","node":4}"#);
}

#[test]
fn stage_diagnostics_stay_bounded() {
    use crate::foundation::diagnostic::DEFAULT_DIAGNOSTIC_LIMIT;

    let mut stage = Stage::new(StageConfig::default());
    let id = stage.add_label(label("a"));
    let mut d = stage.director(id).unwrap();
    for i in 0..DEFAULT_DIAGNOSTIC_LIMIT + 10 {
        d.set_char_scale(i + 1, 2.0);
    }
    assert_eq!(stage.diagnostics().len(), DEFAULT_DIAGNOSTIC_LIMIT);
    assert_eq!(stage.take_diagnostics().len(), DEFAULT_DIAGNOSTIC_LIMIT);
}
