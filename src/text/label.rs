use std::path::Path;

use anyhow::Context;

use crate::{
    animation::action::Action,
    animation::runner::{ActionEvent, ActionRunner},
    foundation::core::{NodeProps, Point, Rgb8, Size, Vec2},
    foundation::error::{LetterFxError, LetterFxResult},
    text::bmfont::BmFont,
    text::layout::{GlyphBox, HAlign, TextLayout, VAlign, layout_bitmap},
    text::outline::TextLayoutEngine,
};

/// Visual element for one non-newline character of a [`Label`].
#[derive(Clone, Debug)]
pub struct CharacterElement {
    ch: char,
    props: NodeProps,
    size: Size,
    runner: ActionRunner,
}

impl CharacterElement {
    /// Element at rest on its laid-out glyph box.
    pub fn new(ch: char, glyph: GlyphBox) -> Self {
        Self {
            ch,
            props: NodeProps::at(glyph.center),
            size: glyph.size,
            runner: ActionRunner::new(),
        }
    }

    pub fn ch(&self) -> char {
        self.ch
    }

    /// Glyph box size, unscaled.
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn props(&self) -> &NodeProps {
        &self.props
    }

    pub fn position(&self) -> Point {
        self.props.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.props.position = position;
    }

    pub fn scale(&self) -> f64 {
        self.props.scale
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.props.scale = scale;
    }

    pub fn rotation(&self) -> f64 {
        self.props.rotation
    }

    pub fn set_rotation(&mut self, degrees: f64) {
        self.props.rotation = degrees;
    }

    pub fn opacity(&self) -> u8 {
        self.props.opacity
    }

    pub fn set_opacity(&mut self, opacity: u8) {
        self.props.opacity = opacity;
    }

    pub fn color(&self) -> Rgb8 {
        self.props.color
    }

    pub fn set_color(&mut self, color: Rgb8) {
        self.props.color = color;
    }

    pub fn z_order(&self) -> i32 {
        self.props.z_order
    }

    pub fn set_z_order(&mut self, z: i32) {
        self.props.z_order = z;
    }

    /// Start `action` now, alongside whatever is already running.
    pub fn run_action(&mut self, action: Action) {
        self.runner.run(action, &self.props);
    }

    pub fn stop_all_actions(&mut self) {
        self.runner.stop_all();
    }

    /// Actions currently running, in start order.
    pub fn running_actions(&self) -> impl Iterator<Item = &Action> {
        self.runner.actions()
    }

    pub fn is_animating(&self) -> bool {
        !self.runner.is_empty()
    }

    pub(crate) fn tick(&mut self, dt: f64, events: &mut Vec<ActionEvent>) {
        self.runner.tick(dt, &mut self.props, events);
    }
}

/// Text node with one [`CharacterElement`] per non-newline character.
///
/// The label node itself carries a position, scale, rotation and opacity
/// plus its own action runner; element positions are label-local.
#[derive(Clone, Debug)]
pub struct Label {
    layout: TextLayout,
    elements: Vec<Option<CharacterElement>>,
    node: NodeProps,
    runner: ActionRunner,
}

impl Label {
    /// Build a label from a laid-out string.
    pub fn from_layout(layout: TextLayout) -> Self {
        let elements = layout
            .chars()
            .iter()
            .zip(layout.glyphs())
            .map(|(ch, glyph)| glyph.map(|g| CharacterElement::new(*ch, g)))
            .collect();
        Self {
            layout,
            elements,
            node: NodeProps::default(),
            runner: ActionRunner::new(),
        }
    }

    /// Load a BMFont text descriptor from `path` and lay out `text` with it.
    pub fn from_bitmap_font(
        path: impl AsRef<Path>,
        text: &str,
        alignment: HAlign,
        max_line_width: f64,
        image_offset: Vec2,
    ) -> LetterFxResult<Self> {
        let font = BmFont::from_path(path.as_ref())?;
        Ok(Self::from_bmfont(
            &font,
            text,
            alignment,
            max_line_width,
            image_offset,
        ))
    }

    /// Lay out `text` with an already parsed bitmap font.
    pub fn from_bmfont(
        font: &BmFont,
        text: &str,
        alignment: HAlign,
        max_line_width: f64,
        image_offset: Vec2,
    ) -> Self {
        Self::from_layout(layout_bitmap(
            font,
            text,
            alignment,
            max_line_width,
            image_offset,
        ))
    }

    /// Read a TrueType/OpenType file and shape `text` at `size` pixels.
    pub fn from_outline_font(
        text: &str,
        font_file: impl AsRef<Path>,
        size: f32,
        dimensions: Size,
        h_align: HAlign,
        v_align: VAlign,
    ) -> LetterFxResult<Self> {
        let path = font_file.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("read font file '{}'", path.display()))
            .map_err(|e| LetterFxError::font_load(format!("{e:#}")))?;
        Self::from_outline_bytes(text, &bytes, size, dimensions, h_align, v_align)
    }

    /// Shape `text` from in-memory font bytes.
    pub fn from_outline_bytes(
        text: &str,
        font_bytes: &[u8],
        size: f32,
        dimensions: Size,
        h_align: HAlign,
        v_align: VAlign,
    ) -> LetterFxResult<Self> {
        let mut engine = TextLayoutEngine::new();
        let layout =
            engine.layout_chars(text, font_bytes, size, dimensions, h_align, v_align)?;
        Ok(Self::from_layout(layout))
    }

    pub fn text(&self) -> String {
        self.layout.text()
    }

    /// Rest layout the label was built from.
    pub fn layout(&self) -> &TextLayout {
        &self.layout
    }

    /// Number of characters, newlines included.
    pub fn char_count(&self) -> usize {
        self.elements.len()
    }

    pub fn char_at(&self, index: usize) -> Option<char> {
        self.layout.chars().get(index).copied()
    }

    /// Element at `index`; `None` for newlines and out-of-range indices.
    pub fn element(&self, index: usize) -> Option<&CharacterElement> {
        self.elements.get(index).and_then(Option::as_ref)
    }

    pub fn element_mut(&mut self, index: usize) -> Option<&mut CharacterElement> {
        self.elements.get_mut(index).and_then(Option::as_mut)
    }

    /// `(index, element)` for every non-newline character.
    pub fn elements(&self) -> impl Iterator<Item = (usize, &CharacterElement)> {
        self.elements
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.as_ref().map(|e| (i, e)))
    }

    pub fn content_size(&self) -> Size {
        self.layout.size()
    }

    pub fn node(&self) -> &NodeProps {
        &self.node
    }

    pub fn node_mut(&mut self) -> &mut NodeProps {
        &mut self.node
    }

    /// Run `action` on the label node itself.
    pub fn run_action(&mut self, action: Action) {
        self.runner.run(action, &self.node);
    }

    /// `true` while the node or any element still has running actions.
    pub fn is_animating(&self) -> bool {
        !self.runner.is_empty() || self.elements().any(|(_, e)| e.is_animating())
    }

    /// Element opacity multiplied by the label's opacity.
    pub fn displayed_opacity(&self, index: usize) -> Option<u8> {
        self.element(index).map(|e| {
            let o = u16::from(e.opacity()) * u16::from(self.node.opacity) / 255;
            o as u8
        })
    }

    /// A fresh label with the same text and rest layout, with no running actions.
    pub fn duplicate(&self) -> Self {
        Self::from_layout(self.layout.clone())
    }

    /// Advance the node runner, then every element runner, by `dt` seconds.
    ///
    /// A [`ActionEvent::RemoveNode`] from an element script refers to the label.
    pub fn tick(&mut self, dt: f64) -> Vec<ActionEvent> {
        let mut events = Vec::new();
        self.runner.tick(dt, &mut self.node, &mut events);
        for element in self.elements.iter_mut().flatten() {
            element.tick(dt, &mut events);
        }
        events
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/label.rs"]
mod tests;
