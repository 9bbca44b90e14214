use crate::{
    animation::action::{Action, Cue},
    animation::ease::Ease,
    foundation::core::{NodeProps, Point, Rgb8, Vec2, opacity_u8},
    foundation::math::lerp_f64,
};

/// Side effect produced while advancing actions; handled by the owner of the runner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionEvent {
    /// An [`Action::Emit`] step ran.
    Cue(Cue),
    /// An [`Action::RemoveNode`] step ran.
    RemoveNode,
}

/// Per-node action queue advanced once per tick.
///
/// Every running action progresses independently; finished actions are dropped.
#[derive(Clone, Debug, Default)]
pub struct ActionRunner {
    running: Vec<Running>,
}

#[derive(Clone, Debug)]
struct Running {
    action: Action,
    step: Step,
    elapsed: f64,
}

impl ActionRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `action` against the current properties. "To" steps at the head
    /// of the action capture their starting values now.
    pub fn run(&mut self, action: Action, props: &NodeProps) {
        let mut step = Step::new(&action);
        step.start(props);
        self.running.push(Running {
            action,
            step,
            elapsed: 0.0,
        });
    }

    /// Drop every running action, leaving properties where they are.
    pub fn stop_all(&mut self) {
        self.running.clear();
    }

    pub fn len(&self) -> usize {
        self.running.len()
    }

    pub fn is_empty(&self) -> bool {
        self.running.is_empty()
    }

    /// Running actions in start order.
    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.running.iter().map(|r| &r.action)
    }

    /// Advance all running actions by `dt` seconds.
    pub fn tick(&mut self, dt: f64, props: &mut NodeProps, events: &mut Vec<ActionEvent>) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        for r in &mut self.running {
            r.elapsed += dt;
            let d = r.step.duration;
            let p = if d <= 0.0 {
                1.0
            } else {
                (r.elapsed / d).min(1.0)
            };
            r.step.update(p, props, events);
        }
        self.running.retain(|r| r.elapsed < r.step.duration);
    }
}

#[derive(Clone, Debug)]
enum StepKind {
    MoveBy(Vec2),
    MoveTo(Point),
    JumpTo { target: Point, height: f64, jumps: u32 },
    ScaleTo(f64),
    RotateBy(f64),
    FadeTo(u8),
    TintTo(Rgb8),
    Delay,
    Sequence { steps: Vec<Step>, starts: Vec<f64> },
    Spawn(Vec<Step>),
    Eased(Ease, Box<Step>),
    Emit(Cue),
    RemoveNode,
    SetZOrder(i32),
}

#[derive(Clone, Debug)]
enum LeafState {
    Idle,
    Offset {
        delta: Vec2,
        applied: Vec2,
    },
    Jump {
        delta: Vec2,
        applied: Vec2,
    },
    Scale {
        from: f64,
        to: f64,
    },
    Rotate {
        degrees: f64,
        applied: f64,
    },
    Fade {
        from: u8,
        to: u8,
    },
    Tint {
        from: Rgb8,
        to: Rgb8,
    },
}

#[derive(Clone, Debug)]
struct Step {
    kind: StepKind,
    duration: f64,
    state: LeafState,
    started: bool,
    fired: bool,
    /// Reached progress 1 inside a parent; skipped until pulled back.
    finished: bool,
}

impl Step {
    fn new(action: &Action) -> Self {
        let kind = match action {
            Action::MoveBy { delta, .. } => StepKind::MoveBy(*delta),
            Action::MoveTo { target, .. } => StepKind::MoveTo(*target),
            Action::JumpTo {
                target,
                height,
                jumps,
                ..
            } => StepKind::JumpTo {
                target: *target,
                height: *height,
                jumps: *jumps,
            },
            Action::ScaleTo { scale, .. } => StepKind::ScaleTo(*scale),
            Action::RotateBy { degrees, .. } => StepKind::RotateBy(*degrees),
            Action::FadeTo { opacity, .. } => StepKind::FadeTo(*opacity),
            Action::TintTo { color, .. } => StepKind::TintTo(*color),
            Action::Delay { .. } => StepKind::Delay,
            Action::Sequence { actions } => {
                let steps: Vec<Step> = actions.iter().map(Step::new).collect();
                let mut starts = Vec::with_capacity(steps.len());
                let mut at = 0.0;
                for s in &steps {
                    starts.push(at);
                    at += s.duration;
                }
                StepKind::Sequence { steps, starts }
            }
            Action::Spawn { actions } => StepKind::Spawn(actions.iter().map(Step::new).collect()),
            Action::Eased { ease, inner } => StepKind::Eased(*ease, Box::new(Step::new(inner))),
            Action::Emit { cue } => StepKind::Emit(cue.clone()),
            Action::RemoveNode => StepKind::RemoveNode,
            Action::SetZOrder { z } => StepKind::SetZOrder(*z),
        };
        let duration = match &kind {
            StepKind::Sequence { steps, .. } => steps.iter().map(|s| s.duration).sum(),
            StepKind::Spawn(steps) => steps.iter().map(|s| s.duration).fold(0.0, f64::max),
            StepKind::Eased(_, inner) => inner.duration,
            _ => action.duration(),
        };
        Self {
            kind,
            duration,
            state: LeafState::Idle,
            started: false,
            fired: false,
            finished: false,
        }
    }

    fn start(&mut self, props: &NodeProps) {
        self.started = true;
        self.state = match &mut self.kind {
            StepKind::MoveBy(delta) => LeafState::Offset {
                delta: *delta,
                applied: Vec2::ZERO,
            },
            StepKind::MoveTo(target) => LeafState::Offset {
                delta: *target - props.position,
                applied: Vec2::ZERO,
            },
            StepKind::JumpTo { target, .. } => LeafState::Jump {
                delta: *target - props.position,
                applied: Vec2::ZERO,
            },
            StepKind::ScaleTo(to) => LeafState::Scale {
                from: props.scale,
                to: *to,
            },
            StepKind::RotateBy(degrees) => LeafState::Rotate {
                degrees: *degrees,
                applied: 0.0,
            },
            StepKind::FadeTo(to) => LeafState::Fade {
                from: props.opacity,
                to: *to,
            },
            StepKind::TintTo(to) => LeafState::Tint {
                from: props.color,
                to: *to,
            },
            StepKind::Spawn(steps) => {
                for s in steps.iter_mut() {
                    s.start(props);
                }
                LeafState::Idle
            }
            StepKind::Eased(_, inner) => {
                inner.start(props);
                LeafState::Idle
            }
            // Sequence children start when the playhead reaches them.
            StepKind::Sequence { .. }
            | StepKind::Delay
            | StepKind::Emit(_)
            | StepKind::RemoveNode
            | StepKind::SetZOrder(_) => LeafState::Idle,
        };
    }

    /// Child update: a finished child writes nothing until its progress drops below 1.
    fn advance(&mut self, p: f64, props: &mut NodeProps, events: &mut Vec<ActionEvent>) {
        if self.finished && p >= 1.0 {
            return;
        }
        self.finished = p >= 1.0;
        self.update(p, props, events);
    }

    fn update(&mut self, p: f64, props: &mut NodeProps, events: &mut Vec<ActionEvent>) {
        match &mut self.kind {
            StepKind::Sequence { steps, starts } => {
                let t = p * self.duration;
                // Rewind pass for non-monotonic eases: undo later children first.
                for (s, &at) in steps.iter_mut().zip(starts.iter()).rev() {
                    if s.started && t < at {
                        s.advance(0.0, props, events);
                    }
                }
                for (s, &at) in steps.iter_mut().zip(starts.iter()) {
                    if t < at {
                        break;
                    }
                    if !s.started {
                        s.start(props);
                    }
                    s.advance(local_progress(t - at, s.duration), props, events);
                }
            }
            StepKind::Spawn(steps) => {
                let t = p * self.duration;
                for s in steps.iter_mut() {
                    s.advance(local_progress(t, s.duration), props, events);
                }
            }
            StepKind::Eased(ease, inner) => inner.update(ease.apply(p), props, events),
            StepKind::Emit(cue) => {
                if !self.fired {
                    self.fired = true;
                    events.push(ActionEvent::Cue(cue.clone()));
                }
            }
            StepKind::RemoveNode => {
                if !self.fired {
                    self.fired = true;
                    events.push(ActionEvent::RemoveNode);
                }
            }
            StepKind::SetZOrder(z) => {
                if !self.fired {
                    self.fired = true;
                    props.z_order = *z;
                }
            }
            StepKind::JumpTo { height, jumps, .. } => {
                if let LeafState::Jump { delta, applied } = &mut self.state {
                    let frac = (p * f64::from(*jumps)) % 1.0;
                    let hop = *height * 4.0 * frac * (1.0 - frac);
                    let offset = Vec2::new(delta.x * p, delta.y * p + hop);
                    props.position += offset - *applied;
                    *applied = offset;
                }
            }
            StepKind::MoveBy(_)
            | StepKind::MoveTo(_)
            | StepKind::ScaleTo(_)
            | StepKind::RotateBy(_)
            | StepKind::FadeTo(_)
            | StepKind::TintTo(_)
            | StepKind::Delay => self.update_leaf(p, props),
        }
    }

    fn update_leaf(&mut self, p: f64, props: &mut NodeProps) {
        match &mut self.state {
            LeafState::Idle => {}
            LeafState::Offset { delta, applied } => {
                let offset = *delta * p;
                props.position += offset - *applied;
                *applied = offset;
            }
            LeafState::Jump { .. } => {}
            LeafState::Scale { from, to } => props.scale = lerp_f64(*from, *to, p),
            LeafState::Rotate { degrees, applied } => {
                let v = *degrees * p;
                props.rotation += v - *applied;
                *applied = v;
            }
            LeafState::Fade { from, to } => {
                props.opacity = opacity_u8(lerp_f64(f64::from(*from), f64::from(*to), p).round());
            }
            LeafState::Tint { from, to } => props.color = Rgb8::lerp(*from, *to, p),
        }
    }
}

fn local_progress(t: f64, duration: f64) -> f64 {
    if duration <= 0.0 {
        return 1.0;
    }
    (t / duration).clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/runner.rs"]
mod tests;
