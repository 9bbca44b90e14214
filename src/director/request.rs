use crate::{
    animation::action::{Action, Cue},
    director::{Director, dispatch::Completion},
    foundation::core::Vec2,
    foundation::error::{LetterFxError, LetterFxResult},
    text::display::TextDisplay,
};

fn yes() -> bool {
    true
}

/// Data form of every director operation, for scripted runs and traces.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnimationRequest {
    FlyInFromLeft {
        duration: f64,
    },
    FlyInFromRight {
        duration: f64,
    },
    FlyInFromTop {
        duration: f64,
    },
    FlyInFromBottom {
        duration: f64,
    },
    Typewriter {
        duration: f64,
        #[serde(default)]
        on_each: Option<Cue>,
        #[serde(default)]
        on_complete: Option<Cue>,
    },
    DropFromTop {
        duration: f64,
    },
    SwellIn {
        duration: f64,
    },
    Swell {
        duration: f64,
    },
    RevealFromLeft {
        duration: f64,
    },
    Jump {
        duration: f64,
        height: f64,
    },
    StretchElastic {
        stretch_duration: f64,
        release_duration: f64,
        amount: f64,
    },
    Spin {
        duration: f64,
        spins: i32,
    },
    Vortex {
        duration: f64,
        spins: i32,
        #[serde(default)]
        remove_on_completion: bool,
        #[serde(default = "yes")]
        create_ghosts: bool,
    },
    Rainbow {
        duration: f64,
    },
    FlyPastAndRemove,
    RunOnChar {
        index: usize,
        action: Action,
    },
    RunOnAll {
        action: Action,
        #[serde(default)]
        completion: Completion,
    },
    RunOnAllSequentially {
        action: Action,
        duration: f64,
        #[serde(default)]
        completion: Completion,
    },
    RunOnAllSequentiallyReverse {
        action: Action,
        duration: f64,
        #[serde(default)]
        completion: Completion,
    },
    StopAll,
    SetCharScale {
        index: usize,
        scale: f64,
    },
    SetCharOpacity {
        index: usize,
        opacity: f64,
    },
    SetCharRotation {
        index: usize,
        degrees: f64,
    },
    SetAllCharsScale {
        scale: f64,
    },
    SetAllCharsOpacity {
        opacity: f64,
    },
    SetAllCharsRotation {
        degrees: f64,
    },
    OffsetAllChars {
        offset: Vec2,
    },
}

/// An [`AnimationRequest`] applied once the stage clock reaches `at_secs`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimedRequest {
    #[serde(default)]
    pub at_secs: f64,
    #[serde(flatten)]
    pub request: AnimationRequest,
}

impl TimedRequest {
    /// Parse a JSON array of timed requests.
    pub fn list_from_json_str(src: &str) -> LetterFxResult<Vec<Self>> {
        let list: Vec<Self> =
            serde_json::from_str(src).map_err(|e| LetterFxError::serde(e.to_string()))?;
        if let Some(bad) = list.iter().find(|r| !r.at_secs.is_finite() || r.at_secs < 0.0) {
            return Err(LetterFxError::validation(format!(
                "request time must be finite and >= 0, got {}",
                bad.at_secs
            )));
        }
        Ok(list)
    }
}

impl<D: TextDisplay> Director<'_, D> {
    /// Run the operation described by `request`.
    pub fn apply(&mut self, request: &AnimationRequest) {
        use AnimationRequest as R;
        match request {
            R::FlyInFromLeft { duration } => self.animate_in_fly_in_from_left(*duration),
            R::FlyInFromRight { duration } => self.animate_in_fly_in_from_right(*duration),
            R::FlyInFromTop { duration } => self.animate_in_fly_in_from_top(*duration),
            R::FlyInFromBottom { duration } => self.animate_in_fly_in_from_bottom(*duration),
            R::Typewriter {
                duration,
                on_each,
                on_complete,
            } => self.animate_in_typewriter(*duration, on_each.clone(), on_complete.clone()),
            R::DropFromTop { duration } => self.animate_in_drop_from_top(*duration),
            R::SwellIn { duration } => self.animate_in_swell(*duration),
            R::Swell { duration } => self.animate_swell(*duration),
            R::RevealFromLeft { duration } => self.animate_in_reveal_from_left(*duration),
            R::Jump { duration, height } => self.animate_jump(*duration, *height),
            R::StretchElastic {
                stretch_duration,
                release_duration,
                amount,
            } => self.animate_stretch_elastic(*stretch_duration, *release_duration, *amount),
            R::Spin { duration, spins } => self.animate_in_spin(*duration, *spins),
            R::Vortex {
                duration,
                spins,
                remove_on_completion,
                create_ghosts,
            } => self.animate_in_vortex(*duration, *spins, *remove_on_completion, *create_ghosts),
            R::Rainbow { duration } => self.animate_rainbow(*duration),
            R::FlyPastAndRemove => self.fly_past_and_remove(),
            R::RunOnChar { index, action } => self.run_action_on_char(*index, action.clone()),
            R::RunOnAll { action, completion } => {
                self.run_action_on_all(action.clone(), completion.clone())
            }
            R::RunOnAllSequentially {
                action,
                duration,
                completion,
            } => self.run_action_on_all_sequentially(action.clone(), *duration, completion.clone()),
            R::RunOnAllSequentiallyReverse {
                action,
                duration,
                completion,
            } => self.run_action_on_all_sequentially_reverse(
                action.clone(),
                *duration,
                completion.clone(),
            ),
            R::StopAll => self.stop_actions_on_all(),
            R::SetCharScale { index, scale } => self.set_char_scale(*index, *scale),
            R::SetCharOpacity { index, opacity } => self.set_char_opacity(*index, *opacity),
            R::SetCharRotation { index, degrees } => self.set_char_rotation(*index, *degrees),
            R::SetAllCharsScale { scale } => self.set_all_chars_scale(*scale),
            R::SetAllCharsOpacity { opacity } => self.set_all_chars_opacity(*opacity),
            R::SetAllCharsRotation { degrees } => self.set_all_chars_rotation(*degrees),
            R::OffsetAllChars { offset } => self.offset_all_chars_position_by(*offset),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/director/request.rs"]
mod tests;
