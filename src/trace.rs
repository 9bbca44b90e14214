use crate::{
    config::StageConfig,
    director::request::TimedRequest,
    foundation::core::NodeProps,
    stage::{NodeId, Stage, StageEvent},
    text::label::Label,
};

/// State of one character element at a frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CharTrace {
    pub index: usize,
    pub ch: char,
    pub props: NodeProps,
    /// Element opacity multiplied by the label's opacity.
    pub displayed_opacity: u8,
}

/// State of one label at a frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LabelTrace {
    pub node: NodeId,
    pub props: NodeProps,
    pub chars: Vec<CharTrace>,
}

impl LabelTrace {
    pub fn capture(node: NodeId, label: &Label) -> Self {
        let chars = label
            .elements()
            .map(|(index, e)| CharTrace {
                index,
                ch: e.ch(),
                props: *e.props(),
                displayed_opacity: label.displayed_opacity(index).unwrap_or(0),
            })
            .collect();
        Self {
            node,
            props: *label.node(),
            chars,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameTrace {
    pub frame: u64,
    pub time_secs: f64,
    pub labels: Vec<LabelTrace>,
    /// Events produced by the tick that led to this frame.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<StageEvent>,
}

impl FrameTrace {
    pub fn capture(frame: u64, stage: &Stage, events: Vec<StageEvent>) -> Self {
        Self {
            frame,
            time_secs: stage.elapsed(),
            labels: stage
                .labels()
                .map(|(id, l)| LabelTrace::capture(id, l))
                .collect(),
            events,
        }
    }
}

/// Frame-by-frame record of a scripted run.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Trace {
    pub config: StageConfig,
    pub frames: Vec<FrameTrace>,
    /// Rendered diagnostics, in the order they were recorded.
    pub diagnostics: Vec<String>,
}

/// Drive `node` through `requests` on `stage` for `frames` frames at the
/// configured fps and record every frame, frame 0 being the state right
/// after the requests due at time 0 were applied.
#[tracing::instrument(skip(stage, requests), fields(requests = requests.len()))]
pub fn record(stage: &mut Stage, node: NodeId, requests: &[TimedRequest], frames: u64) -> Trace {
    let dt = stage.config().fps.frame_duration_secs();
    let mut pending: Vec<&TimedRequest> = requests.iter().collect();
    pending.sort_by(|a, b| a.at_secs.total_cmp(&b.at_secs));
    let mut pending = pending.into_iter().peekable();

    let mut out = Vec::new();
    for frame in 0..frames {
        let events = if frame == 0 { Vec::new() } else { stage.tick(dt) };
        // Half a frame of slack so requests land on the nearest frame.
        let now = stage.elapsed() + dt * 0.5;
        while let Some(r) = pending.next_if(|r| r.at_secs <= now) {
            match stage.director(node) {
                Some(mut director) => director.apply(&r.request),
                None => tracing::debug!(%node, "request dropped, label is gone"),
            }
        }
        stage.adopt_spawned();
        out.push(FrameTrace::capture(frame, stage, events));
    }

    Trace {
        config: stage.config().clone(),
        frames: out,
        diagnostics: stage.diagnostics().iter().map(ToString::to_string).collect(),
    }
}

#[cfg(test)]
#[path = "../tests/unit/trace.rs"]
mod tests;
