use crate::{
    foundation::core::{Point, Rgb8, Size},
    foundation::error::{LetterFxError, LetterFxResult},
    text::layout::{GlyphBox, HAlign, TextLayout, VAlign},
};

/// Stateful helper that shapes text from raw font bytes with Parley and
/// reports one box per character.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgb8>,
    last_family_name: Option<String>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TextLayoutEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextLayoutEngine")
            .field("last_family_name", &self.last_family_name)
            .finish_non_exhaustive()
    }
}

/// Placement of one character inside a shaped line, parley coordinates (y-down).
struct Placed {
    index: usize,
    x: f64,
    advance: f64,
}

impl TextLayoutEngine {
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            last_family_name: None,
        }
    }

    /// Family name of the most recently registered font, if any.
    pub fn last_family_name(&self) -> Option<&str> {
        self.last_family_name.as_deref()
    }

    fn shape(
        &mut self,
        text: &str,
        font_bytes: &[u8],
        size_px: f32,
        max_width_px: Option<f32>,
    ) -> LetterFxResult<parley::Layout<Rgb8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(LetterFxError::validation(
                "font size must be finite and > 0",
            ));
        }

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| LetterFxError::font_load("no font families found in font bytes"))?;
        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| LetterFxError::font_load("registered font family has no name"))?
            .to_string();
        self.last_family_name = Some(family_name.clone());

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(Rgb8::WHITE));

        let mut layout: parley::Layout<Rgb8> = builder.build(text);
        layout.break_all_lines(max_width_px);
        layout.align(
            max_width_px,
            parley::Alignment::Start,
            parley::AlignmentOptions::default(),
        );
        Ok(layout)
    }

    /// Shape `text` and return per-character boxes in label space (y-up).
    ///
    /// A positive `dimensions.width` wraps lines and fixes the box width; a
    /// positive `dimensions.height` fixes the box height and enables
    /// vertical alignment. Ligatures split their advance evenly across the
    /// characters they cover.
    pub fn layout_chars(
        &mut self,
        text: &str,
        font_bytes: &[u8],
        size_px: f32,
        dimensions: Size,
        h_align: HAlign,
        v_align: VAlign,
    ) -> LetterFxResult<TextLayout> {
        let wrap = (dimensions.width > 0.0).then_some(dimensions.width as f32);
        let layout = self.shape(text, font_bytes, size_px, wrap)?;

        let offsets: Vec<(usize, char)> = text.char_indices().collect();
        let chars: Vec<char> = offsets.iter().map(|(_, c)| *c).collect();

        // (placements, used width, baseline, ascent, descent) per line.
        let mut lines = Vec::new();
        for line in layout.lines() {
            let metrics = line.metrics();
            let mut placed = Vec::new();
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(glyph_run) = item else {
                    continue;
                };
                let mut x = f64::from(glyph_run.offset());
                for cluster in glyph_run.run().visual_clusters() {
                    let range = cluster.text_range();
                    let advance = f64::from(cluster.advance());
                    let covered: Vec<usize> = offsets
                        .iter()
                        .enumerate()
                        .filter(|(_, (at, c))| range.contains(at) && *c != '\n')
                        .map(|(i, _)| i)
                        .collect();
                    let share = advance / covered.len().max(1) as f64;
                    for (k, index) in covered.into_iter().enumerate() {
                        placed.push(Placed {
                            index,
                            x: x + share * k as f64,
                            advance: share,
                        });
                    }
                    x += advance;
                }
            }
            let used = placed
                .iter()
                .filter(|p| !chars[p.index].is_whitespace())
                .map(|p| p.x + p.advance)
                .fold(0.0, f64::max);
            lines.push((
                placed,
                used,
                f64::from(metrics.baseline),
                f64::from(metrics.ascent),
                f64::from(metrics.descent),
            ));
        }

        let widest = lines.iter().map(|l| l.1).fold(0.0, f64::max);
        let width = if dimensions.width > 0.0 {
            dimensions.width
        } else {
            widest
        };
        let text_height = f64::from(layout.height());
        let height = if dimensions.height > 0.0 {
            dimensions.height
        } else {
            text_height
        };
        let y0 = v_align.offset(height, text_height);

        let mut glyphs: Vec<Option<GlyphBox>> = chars
            .iter()
            .map(|c| {
                (*c != '\n').then_some(GlyphBox {
                    center: Point::new(0.0, height),
                    size: Size::ZERO,
                })
            })
            .collect();
        for (placed, used, baseline, ascent, descent) in &lines {
            let x0 = h_align.offset(width, *used);
            let center_down = y0 + baseline + (descent - ascent) / 2.0;
            for p in placed {
                glyphs[p.index] = Some(GlyphBox {
                    center: Point::new(x0 + p.x + p.advance / 2.0, height - center_down),
                    size: Size::new(p.advance, ascent + descent),
                });
            }
        }

        tracing::debug!(
            chars = chars.len(),
            lines = lines.len(),
            width,
            height,
            "outline text laid out"
        );
        TextLayout::new(chars, glyphs, Size::new(width, height))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/outline.rs"]
mod tests;
