//! Per-character animation director.
//!
//! A [`Director`] borrows one text display plus the shared [`DirectorContext`]
//! and turns animation requests into action scripts on the display's
//! character elements. It keeps no state between calls; progression belongs
//! to the element runners, advanced by [`crate::Stage::tick`].

pub(crate) mod dispatch;
pub(crate) mod library;
pub(crate) mod request;
pub(crate) mod vortex;

use crate::{
    foundation::core::{Size, Vec2, opacity_u8},
    foundation::diagnostic::{Diagnostic, DiagnosticLog},
    foundation::math::Rng64,
    text::display::TextDisplay,
    text::label::{CharacterElement, Label},
};

/// State shared by every director call on a stage.
#[derive(Debug)]
pub struct DirectorContext<D = Label> {
    /// Size of the visible area, used for off-screen distances.
    pub visible_size: Size,
    /// Source of per-character stagger.
    pub rng: Rng64,
    /// Recovered problems from per-character operations.
    pub diagnostics: DiagnosticLog,
    /// Displays created during a call (vortex ghosts), waiting to be adopted by the stage.
    pub spawned: Vec<D>,
}

impl<D> DirectorContext<D> {
    pub fn new(visible_size: Size, seed: u64) -> Self {
        Self {
            visible_size,
            rng: Rng64::new(seed),
            diagnostics: DiagnosticLog::default(),
            spawned: Vec::new(),
        }
    }
}

/// Animation front end for one text display.
pub struct Director<'a, D: TextDisplay = Label> {
    display: &'a mut D,
    ctx: &'a mut DirectorContext<D>,
}

impl<'a, D: TextDisplay> Director<'a, D> {
    pub fn new(display: &'a mut D, ctx: &'a mut DirectorContext<D>) -> Self {
        Self { display, ctx }
    }

    pub fn display(&self) -> &D {
        self.display
    }

    pub fn diagnostics(&self) -> &DiagnosticLog {
        &self.ctx.diagnostics
    }

    /// Number of characters, newlines included.
    pub fn char_count(&self) -> usize {
        self.display.char_count()
    }

    /// Element at `index`.
    ///
    /// Out-of-range indices record a diagnostic and return `None`. Newline
    /// indices are valid but have no element.
    pub fn element_at(&mut self, index: usize) -> Option<&CharacterElement> {
        if !self.check_index("element_at", index) {
            return None;
        }
        self.display.element(index)
    }

    pub fn set_char_scale(&mut self, index: usize, scale: f64) {
        if let Some(e) = self.checked_element_mut("set_char_scale", index) {
            e.set_scale(scale);
        }
    }

    /// Set one element's opacity, clamped to `0..=255` and truncated.
    pub fn set_char_opacity(&mut self, index: usize, opacity: f64) {
        if let Some(e) = self.checked_element_mut("set_char_opacity", index) {
            e.set_opacity(opacity_u8(opacity));
        }
    }

    pub fn set_char_rotation(&mut self, index: usize, degrees: f64) {
        if let Some(e) = self.checked_element_mut("set_char_rotation", index) {
            e.set_rotation(degrees);
        }
    }

    pub fn set_all_chars_scale(&mut self, scale: f64) {
        self.for_each_element(|e| e.set_scale(scale));
    }

    pub fn set_all_chars_opacity(&mut self, opacity: f64) {
        let opacity = opacity_u8(opacity);
        self.for_each_element(|e| e.set_opacity(opacity));
    }

    pub fn set_all_chars_rotation(&mut self, degrees: f64) {
        self.for_each_element(|e| e.set_rotation(degrees));
    }

    pub fn offset_all_chars_position_by(&mut self, offset: Vec2) {
        self.for_each_element(|e| e.set_position(e.position() + offset));
    }

    pub(crate) fn for_each_element(&mut self, mut f: impl FnMut(&mut CharacterElement)) {
        for i in 0..self.display.char_count() {
            if let Some(e) = self.display.element_mut(i) {
                f(e);
            }
        }
    }

    /// Indices that have an element, in order.
    pub(crate) fn element_indices(&self) -> Vec<usize> {
        (0..self.display.char_count())
            .filter(|&i| self.display.element(i).is_some())
            .collect()
    }

    fn check_index(&mut self, op: &'static str, index: usize) -> bool {
        let count = self.display.char_count();
        if index < count {
            return true;
        }
        self.ctx
            .diagnostics
            .record(Diagnostic::IndexOutOfRange { op, index, count });
        false
    }

    fn checked_element_mut(
        &mut self,
        op: &'static str,
        index: usize,
    ) -> Option<&mut CharacterElement> {
        if !self.check_index(op, index) {
            return None;
        }
        self.display.element_mut(index)
    }

    /// Record [`Diagnostic::TooFewCharacters`] and return `false` when fewer
    /// than two characters have an element.
    pub(crate) fn require_two_elements(&mut self, op: &'static str) -> bool {
        let count = self.display.element_count();
        if count >= 2 {
            return true;
        }
        self.ctx
            .diagnostics
            .record(Diagnostic::TooFewCharacters { op, count });
        false
    }

    /// Factor turning screen distances into label-local ones.
    pub(crate) fn rescale_factor(&self) -> f64 {
        let scale = self.display.node().scale;
        if scale == 0.0 { 1.0 } else { 1.0 / scale }
    }

    /// Visible size expressed in label-local units.
    pub(crate) fn screen_extent(&self) -> Size {
        self.ctx.visible_size * self.rescale_factor()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/director/accessor.rs"]
mod tests;
