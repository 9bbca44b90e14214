use crate::{
    animation::action::{Action, Cue},
    animation::ease::Ease,
    foundation::core::{Point, Rgb8, Vec2},
};

pub fn move_by(duration: f64, delta: Vec2) -> Action {
    Action::MoveBy { duration, delta }
}

pub fn move_to(duration: f64, target: Point) -> Action {
    Action::MoveTo { duration, target }
}

pub fn jump_to(duration: f64, target: Point, height: f64, jumps: u32) -> Action {
    Action::JumpTo {
        duration,
        target,
        height,
        jumps,
    }
}

pub fn scale_to(duration: f64, scale: f64) -> Action {
    Action::ScaleTo { duration, scale }
}

pub fn rotate_by(duration: f64, degrees: f64) -> Action {
    Action::RotateBy { duration, degrees }
}

pub fn fade_to(duration: f64, opacity: u8) -> Action {
    Action::FadeTo { duration, opacity }
}

pub fn fade_in(duration: f64) -> Action {
    fade_to(duration, 255)
}

pub fn fade_out(duration: f64) -> Action {
    fade_to(duration, 0)
}

pub fn tint_to(duration: f64, color: Rgb8) -> Action {
    Action::TintTo { duration, color }
}

pub fn delay(duration: f64) -> Action {
    Action::Delay { duration }
}

pub fn sequence(actions: Vec<Action>) -> Action {
    Action::Sequence { actions }
}

pub fn spawn(actions: Vec<Action>) -> Action {
    Action::Spawn { actions }
}

pub fn eased(ease: Ease, inner: Action) -> Action {
    Action::Eased {
        ease,
        inner: Box::new(inner),
    }
}

pub fn emit(cue: impl Into<Cue>) -> Action {
    Action::Emit { cue: cue.into() }
}

pub fn remove_node() -> Action {
    Action::RemoveNode
}

pub fn set_z_order(z: i32) -> Action {
    Action::SetZOrder { z }
}

/// `Sequence[Delay(by_secs), action]`; negative delays are treated as 0.
pub fn delayed(by_secs: f64, action: Action) -> Action {
    sequence(vec![delay(by_secs.max(0.0)), action])
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ops.rs"]
mod tests;
