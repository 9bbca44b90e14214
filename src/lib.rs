//! letterfx animates text labels one character at a time.
//!
//! - Build a [`Label`] from a BMFont descriptor or an outline font
//! - Put it on a [`Stage`] and ask the stage for a [`Director`]
//! - Call canned animations (fly-in, typewriter, vortex, rainbow, ...) or
//!   dispatch your own [`Action`] scripts
//! - Advance with [`Stage::tick`] and react to the returned [`StageEvent`]s
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod config;
pub(crate) mod director;
pub(crate) mod stage;
pub(crate) mod text;
/// Serializable frame-by-frame snapshots of a stage.
pub mod trace;

pub use crate::foundation::core::{Fps, NodeProps, Point, Rgb8, Size, Vec2, opacity_u8};
pub use crate::foundation::diagnostic::{DEFAULT_DIAGNOSTIC_LIMIT, Diagnostic, DiagnosticLog};
pub use crate::foundation::error::{LetterFxError, LetterFxResult};
pub use crate::foundation::math::Rng64;

pub use crate::animation::action::{Action, Cue};
pub use crate::animation::ease::Ease;
pub use crate::animation::ops;
pub use crate::animation::runner::{ActionEvent, ActionRunner};

pub use crate::config::StageConfig;
pub use crate::director::dispatch::Completion;
pub use crate::director::library::RAINBOW;
pub use crate::director::request::{AnimationRequest, TimedRequest};
pub use crate::director::{Director, DirectorContext};
pub use crate::stage::{NodeId, Stage, StageEvent};
pub use crate::text::bmfont::{BmFont, BmGlyph};
pub use crate::text::display::TextDisplay;
pub use crate::text::label::{CharacterElement, Label};
pub use crate::text::layout::{GlyphBox, HAlign, TextLayout, VAlign, layout_bitmap};
pub use crate::text::outline::TextLayoutEngine;
