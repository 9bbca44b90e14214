use crate::{
    animation::ease::Ease,
    foundation::core::{Point, Rgb8, Vec2},
};

/// Caller-chosen tag surfaced as a [`crate::StageEvent::Cue`] when an
/// [`Action::Emit`] step runs.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Cue(pub String);

impl From<&str> for Cue {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for Cue {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Cue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Timed, composable transformation of a node or character element.
///
/// "By" steps are additive, so several of them may drive the same property
/// at once. "To" steps capture the starting value when they start.
/// Durations are in seconds.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    MoveBy {
        duration: f64,
        delta: Vec2,
    },
    MoveTo {
        duration: f64,
        target: Point,
    },
    /// Parabolic hops ending at `target`.
    JumpTo {
        duration: f64,
        target: Point,
        height: f64,
        jumps: u32,
    },
    ScaleTo {
        duration: f64,
        scale: f64,
    },
    RotateBy {
        duration: f64,
        degrees: f64,
    },
    FadeTo {
        duration: f64,
        opacity: u8,
    },
    TintTo {
        duration: f64,
        color: Rgb8,
    },
    Delay {
        duration: f64,
    },
    Sequence {
        actions: Vec<Action>,
    },
    Spawn {
        actions: Vec<Action>,
    },
    Eased {
        ease: Ease,
        inner: Box<Action>,
    },
    Emit {
        cue: Cue,
    },
    /// Ask the stage to remove the label that owns the running element.
    RemoveNode,
    SetZOrder {
        z: i32,
    },
}

impl Action {
    /// Total running time in seconds. Instant steps report 0.
    pub fn duration(&self) -> f64 {
        match self {
            Self::MoveBy { duration, .. }
            | Self::MoveTo { duration, .. }
            | Self::JumpTo { duration, .. }
            | Self::ScaleTo { duration, .. }
            | Self::RotateBy { duration, .. }
            | Self::FadeTo { duration, .. }
            | Self::TintTo { duration, .. }
            | Self::Delay { duration } => duration.max(0.0),
            Self::Sequence { actions } => actions.iter().map(Self::duration).sum(),
            Self::Spawn { actions } => actions.iter().map(Self::duration).fold(0.0, f64::max),
            Self::Eased { inner, .. } => inner.duration(),
            Self::Emit { .. } | Self::RemoveNode | Self::SetZOrder { .. } => 0.0,
        }
    }

    /// `true` for zero-length steps that fire once.
    pub fn is_instant(&self) -> bool {
        matches!(
            self,
            Self::Emit { .. } | Self::RemoveNode | Self::SetZOrder { .. }
        )
    }

    /// Leading delay of a sequence, or 0 when the action does not start with one.
    pub fn leading_delay(&self) -> f64 {
        match self {
            Self::Delay { duration } => duration.max(0.0),
            Self::Sequence { actions } => actions.first().map_or(0.0, Self::leading_delay),
            _ => 0.0,
        }
    }

    /// `true` when an [`Action::Emit`] with `cue` appears anywhere in the tree.
    pub fn emits(&self, cue: &Cue) -> bool {
        match self {
            Self::Emit { cue: c } => c == cue,
            Self::Sequence { actions } | Self::Spawn { actions } => {
                actions.iter().any(|a| a.emits(cue))
            }
            Self::Eased { inner, .. } => inner.emits(cue),
            _ => false,
        }
    }

    /// `true` when an [`Action::RemoveNode`] appears anywhere in the tree.
    pub fn removes_node(&self) -> bool {
        match self {
            Self::RemoveNode => true,
            Self::Sequence { actions } | Self::Spawn { actions } => {
                actions.iter().any(Self::removes_node)
            }
            Self::Eased { inner, .. } => inner.removes_node(),
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/action.rs"]
mod tests;
