use super::*;
use crate::{
    foundation::core::{Fps, Vec2},
    text::bmfont::BmFont,
    text::layout::HAlign,
};

fn stage_with(text: &str) -> (Stage, NodeId) {
    let font = BmFont::parse(include_str!("../data/mini_mono.fnt")).unwrap();
    let config = StageConfig {
        fps: Fps::new(10, 1).unwrap(),
        ..StageConfig::default()
    };
    let mut stage = Stage::new(config);
    let id = stage.add_label(Label::from_bmfont(&font, text, HAlign::Left, 0.0, Vec2::ZERO));
    (stage, id)
}

fn requests(src: &str) -> Vec<TimedRequest> {
    TimedRequest::list_from_json_str(src).unwrap()
}

#[test]
fn frame_zero_shows_requests_due_at_start() {
    let (mut stage, id) = stage_with("ab");
    let reqs = requests(r#"[{"kind": "typewriter", "duration": 1.0, "on_complete": "done"}]"#);
    let trace = record(&mut stage, id, &reqs, 15);

    assert_eq!(trace.frames.len(), 15);
    let first = &trace.frames[0];
    assert_eq!((first.frame, first.time_secs), (0, 0.0));
    assert_eq!(first.labels.len(), 1);
    assert!(first.labels[0].chars.iter().all(|c| c.props.scale == 0.0));
    assert_eq!(first.labels[0].chars[1].ch, 'b');

    let done: Vec<u64> = trace
        .frames
        .iter()
        .filter(|f| f.events.iter().any(|e| matches!(e, StageEvent::Cue { .. })))
        .map(|f| f.frame)
        .collect();
    assert_eq!(done.len(), 1);
    assert!((10..=11).contains(&done[0]));
    let last = trace.frames.last().unwrap();
    assert!(last.labels[0].chars.iter().all(|c| c.props.scale == 1.0));
    assert!((last.time_secs - 1.4).abs() < 1e-9);
}

#[test]
fn timed_requests_land_on_the_nearest_frame() {
    let (mut stage, id) = stage_with("ab");
    let reqs = requests(
        r#"[
            {"at_secs": 0.5, "kind": "set_all_chars_rotation", "degrees": 30},
            {"at_secs": 0.0, "kind": "set_char_opacity", "index": 0, "opacity": 100}
        ]"#,
    );
    let trace = record(&mut stage, id, &reqs, 7);
    let rotation = |frame: usize| trace.frames[frame].labels[0].chars[0].props.rotation;
    assert_eq!(rotation(4), 0.0);
    assert_eq!(rotation(5), 30.0);
    assert_eq!(trace.frames[0].labels[0].chars[0].displayed_opacity, 100);
}

#[test]
fn removed_label_drops_later_requests_and_keeps_diagnostics() {
    let (mut stage, id) = stage_with("ab");
    let reqs = requests(
        r#"[
            {"kind": "set_char_scale", "index": 9, "scale": 2},
            {"at_secs": 0.2, "kind": "run_on_char", "index": 0, "action": {"kind": "remove_node"}},
            {"at_secs": 0.6, "kind": "stop_all"}
        ]"#,
    );
    let trace = record(&mut stage, id, &reqs, 8);

    assert_eq!(trace.frames[2].labels.len(), 1);
    assert_eq!(trace.frames[3].events, vec![StageEvent::Removed { node: id }]);
    assert!(trace.frames[3..].iter().all(|f| f.labels.is_empty()));
    assert_eq!(
        trace.diagnostics,
        vec!["set_char_scale: index 9 out of bounds for 2 characters".to_owned()]
    );
}

#[test]
fn quiet_frames_omit_events_in_json() {
    let (mut stage, id) = stage_with("a");
    let trace = record(&mut stage, id, &[], 2);
    let json = serde_json::to_value(&trace).unwrap();
    assert!(json["frames"][1].get("events").is_none());
    assert_eq!(json["frames"][1]["labels"][0]["chars"][0]["ch"], "a");
    assert_eq!(json["config"]["fps"]["num"], 10);
}
