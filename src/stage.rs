use std::collections::BTreeMap;

use crate::{
    animation::action::Cue,
    animation::runner::ActionEvent,
    config::StageConfig,
    director::{Director, DirectorContext},
    foundation::diagnostic::Diagnostic,
    text::label::Label,
};

/// Handle of a label owned by a [`Stage`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Something that happened during [`Stage::tick`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StageEvent {
    /// An `Emit` step ran on `node` or one of its characters.
    Cue { node: NodeId, cue: Cue },
    /// `node` asked to be removed and is gone.
    Removed { node: NodeId },
}

/// Flat set of labels advanced together.
#[derive(Debug)]
pub struct Stage {
    config: StageConfig,
    labels: BTreeMap<NodeId, Label>,
    next_id: u64,
    elapsed: f64,
    ctx: DirectorContext<Label>,
}

impl Stage {
    pub fn new(config: StageConfig) -> Self {
        let ctx = DirectorContext::new(config.visible_size, config.seed);
        Self {
            config,
            labels: BTreeMap::new(),
            next_id: 0,
            elapsed: 0.0,
            ctx,
        }
    }

    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    /// Seconds advanced so far.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn add_label(&mut self, label: Label) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.labels.insert(id, label);
        id
    }

    pub fn remove(&mut self, id: NodeId) -> Option<Label> {
        self.labels.remove(&id)
    }

    pub fn label(&self, id: NodeId) -> Option<&Label> {
        self.labels.get(&id)
    }

    pub fn label_mut(&mut self, id: NodeId) -> Option<&mut Label> {
        self.labels.get_mut(&id)
    }

    /// Live labels in insertion order.
    pub fn labels(&self) -> impl Iterator<Item = (NodeId, &Label)> {
        self.labels.iter().map(|(id, l)| (*id, l))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Director for the label `id`, sharing this stage's context.
    pub fn director(&mut self, id: NodeId) -> Option<Director<'_, Label>> {
        let label = self.labels.get_mut(&id)?;
        Some(Director::new(label, &mut self.ctx))
    }

    /// Add labels created by director calls (vortex ghosts) to the stage.
    pub fn adopt_spawned(&mut self) -> Vec<NodeId> {
        let spawned = std::mem::take(&mut self.ctx.spawned);
        spawned.into_iter().map(|l| self.add_label(l)).collect()
    }

    /// Recovered problems from director calls, oldest first.
    ///
    /// The log is bounded: past [`crate::DEFAULT_DIAGNOSTIC_LIMIT`] entries the
    /// oldest are discarded. Long-running hosts should drain it with
    /// [`Stage::take_diagnostics`].
    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.ctx.diagnostics.entries()
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        self.ctx.diagnostics.take()
    }

    /// Advance every label by `dt` seconds.
    ///
    /// Pending spawned labels are adopted first. Labels that ran a
    /// `RemoveNode` step are removed after all labels have ticked.
    #[tracing::instrument(skip(self), fields(labels = self.labels.len()))]
    pub fn tick(&mut self, dt: f64) -> Vec<StageEvent> {
        self.adopt_spawned();

        let mut out = Vec::new();
        let mut doomed = Vec::new();
        for (id, label) in &mut self.labels {
            for event in label.tick(dt) {
                match event {
                    ActionEvent::Cue(cue) => out.push(StageEvent::Cue { node: *id, cue }),
                    ActionEvent::RemoveNode => {
                        if !doomed.contains(id) {
                            doomed.push(*id);
                        }
                    }
                }
            }
        }
        for id in doomed {
            self.labels.remove(&id);
            tracing::debug!(node = %id, "label removed");
            out.push(StageEvent::Removed { node: id });
        }

        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
        out
    }
}

#[cfg(test)]
#[path = "../tests/unit/stage.rs"]
mod tests;
