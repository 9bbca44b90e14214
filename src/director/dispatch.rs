use crate::{
    animation::action::{Action, Cue},
    animation::ops::{delay, delayed, emit, remove_node, sequence},
    director::Director,
    text::display::TextDisplay,
};

/// What happens once a dispatched animation has finished on its last character.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Completion {
    /// Cue emitted after the terminal character's script.
    pub cue: Option<Cue>,
    /// Remove the label after the cue.
    pub remove_label: bool,
}

impl Completion {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn cue(cue: impl Into<Cue>) -> Self {
        Self {
            cue: Some(cue.into()),
            remove_label: false,
        }
    }

    pub fn remove() -> Self {
        Self {
            cue: None,
            remove_label: true,
        }
    }

    pub fn with_removal(mut self) -> Self {
        self.remove_label = true;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.cue.is_none() && !self.remove_label
    }

    /// `Sequence[action, Emit(cue)?, RemoveNode?]`, or `action` unchanged when empty.
    pub fn append_to(&self, action: Action) -> Action {
        if self.is_empty() {
            return action;
        }
        let mut steps = vec![action];
        if let Some(cue) = &self.cue {
            steps.push(emit(cue.clone()));
        }
        if self.remove_label {
            steps.push(remove_node());
        }
        sequence(steps)
    }
}

impl<D: TextDisplay> Director<'_, D> {
    /// Run `action` on the element at `index`.
    pub fn run_action_on_char(&mut self, index: usize, action: Action) {
        if let Some(e) = self.checked_element_mut("run_action_on_char", index) {
            e.run_action(action);
        }
    }

    /// Run a copy of `action` on every element at once. The last element also
    /// runs `completion` after its copy.
    ///
    /// With no elements at all, the completion still runs on the label node
    /// after the action's duration.
    pub fn run_action_on_all(&mut self, action: Action, completion: Completion) {
        let indices = self.element_indices();
        let Some(&last) = indices.last() else {
            if !completion.is_empty() {
                self.display
                    .run_node_action(completion.append_to(delay(action.duration())));
            }
            return;
        };
        for &i in &indices {
            let script = if i == last {
                completion.append_to(action.clone())
            } else {
                action.clone()
            };
            if let Some(e) = self.display.element_mut(i) {
                e.run_action(script);
            }
        }
        tracing::debug!(elements = indices.len(), "broadcast action dispatched");
    }

    /// Run `action` on every element, staggered so index `i` starts after
    /// `duration / (count - 1) * i`. The last index carries `completion`.
    ///
    /// Needs at least two elements; otherwise records one diagnostic and does nothing.
    pub fn run_action_on_all_sequentially(
        &mut self,
        action: Action,
        duration: f64,
        completion: Completion,
    ) {
        self.dispatch_sequential(
            "run_action_on_all_sequentially",
            action,
            duration,
            completion,
            false,
        );
    }

    /// Mirror of [`Self::run_action_on_all_sequentially`]: the last index
    /// starts first and index 0 carries `completion`.
    pub fn run_action_on_all_sequentially_reverse(
        &mut self,
        action: Action,
        duration: f64,
        completion: Completion,
    ) {
        self.dispatch_sequential(
            "run_action_on_all_sequentially_reverse",
            action,
            duration,
            completion,
            true,
        );
    }

    /// Drop every running action on every element.
    pub fn stop_actions_on_all(&mut self) {
        self.for_each_element(|e| e.stop_all_actions());
    }

    fn dispatch_sequential(
        &mut self,
        op: &'static str,
        action: Action,
        duration: f64,
        completion: Completion,
        reverse: bool,
    ) {
        if !self.require_two_elements(op) {
            return;
        }
        let n = self.display.char_count();
        let step = duration / (n - 1) as f64;
        let slot = |i: usize| if reverse { n - 1 - i } else { i };
        let terminal = if reverse { 0 } else { n - 1 };

        // A newline at the terminal index hands its script to the nearest element inward.
        let host = if self.display.element(terminal).is_some() {
            Some(terminal)
        } else if reverse {
            (terminal + 1..n).find(|&i| self.display.element(i).is_some())
        } else {
            (0..terminal)
                .rev()
                .find(|&i| self.display.element(i).is_some())
        };

        for i in 0..n {
            if Some(i) == host && i != terminal {
                continue;
            }
            let Some(e) = self.display.element_mut(i) else {
                continue;
            };
            let script = delayed(step * slot(i) as f64, action.clone());
            let script = if i == terminal {
                completion.append_to(script)
            } else {
                script
            };
            e.run_action(script);
        }

        if let Some(h) = host.filter(|&h| h != terminal)
            && let Some(e) = self.display.element_mut(h)
        {
            e.stop_all_actions();
            e.run_action(completion.append_to(delayed(step * slot(terminal) as f64, action)));
        }

        tracing::debug!(op, chars = n, step, ?host, "sequential action dispatched");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/director/dispatch.rs"]
mod tests;
