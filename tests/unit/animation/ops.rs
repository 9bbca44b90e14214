use super::*;

#[test]
fn fade_helpers_target_extremes() {
    assert_eq!(
        fade_in(0.3),
        Action::FadeTo {
            duration: 0.3,
            opacity: 255
        }
    );
    assert_eq!(
        fade_out(0.3),
        Action::FadeTo {
            duration: 0.3,
            opacity: 0
        }
    );
}

#[test]
fn delayed_clamps_negative_delay() {
    let a = delayed(-1.0, scale_to(0.0, 1.0));
    let Action::Sequence { actions } = a else {
        panic!("expected a sequence");
    };
    assert_eq!(actions[0], delay(0.0));
    assert_eq!(actions[1], scale_to(0.0, 1.0));
}

#[test]
fn eased_boxes_inner() {
    let a = eased(Ease::OutSine, rotate_by(1.0, 90.0));
    let Action::Eased { ease, inner } = a else {
        panic!("expected eased");
    };
    assert_eq!(ease, Ease::OutSine);
    assert_eq!(*inner, rotate_by(1.0, 90.0));
}
