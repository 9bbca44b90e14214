use crate::{
    foundation::core::{Point, Size, Vec2},
    foundation::error::{LetterFxError, LetterFxResult},
    text::bmfont::BmFont,
};

/// Horizontal alignment of lines inside the label box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical alignment of the text block inside the label box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VAlign {
    #[default]
    Top,
    Center,
    Bottom,
}

impl HAlign {
    pub(crate) fn offset(self, available: f64, used: f64) -> f64 {
        match self {
            Self::Left => 0.0,
            Self::Center => (available - used) / 2.0,
            Self::Right => available - used,
        }
    }
}

impl VAlign {
    pub(crate) fn offset(self, available: f64, used: f64) -> f64 {
        match self {
            Self::Top => 0.0,
            Self::Center => (available - used) / 2.0,
            Self::Bottom => available - used,
        }
    }
}

/// Placed glyph rectangle, label-local, y-up.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GlyphBox {
    pub center: Point,
    pub size: Size,
}

/// Result of laying out a string: one slot per character, `None` for newlines.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLayout {
    chars: Vec<char>,
    glyphs: Vec<Option<GlyphBox>>,
    size: Size,
}

impl TextLayout {
    /// Assemble a layout from precomputed boxes.
    ///
    /// Every newline must map to `None` and every other character to `Some`.
    pub fn new(chars: Vec<char>, glyphs: Vec<Option<GlyphBox>>, size: Size) -> LetterFxResult<Self> {
        if chars.len() != glyphs.len() {
            return Err(LetterFxError::validation(format!(
                "layout has {} characters but {} glyph slots",
                chars.len(),
                glyphs.len()
            )));
        }
        if let Some(i) = chars
            .iter()
            .zip(&glyphs)
            .position(|(c, g)| (*c == '\n') != g.is_none())
        {
            return Err(LetterFxError::validation(format!(
                "glyph slot {i} does not match its character (newlines have no glyph)"
            )));
        }
        Ok(Self {
            chars,
            glyphs,
            size,
        })
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn glyphs(&self) -> &[Option<GlyphBox>] {
        &self.glyphs
    }

    /// Content size of the label box.
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }
}

/// Lay out `text` with a bitmap font.
///
/// `max_line_width > 0` wraps at spaces and fixes the box width; otherwise
/// the box is as wide as the longest line. `image_offset` shifts every glyph.
pub fn layout_bitmap(
    font: &BmFont,
    text: &str,
    alignment: HAlign,
    max_line_width: f64,
    image_offset: Vec2,
) -> TextLayout {
    let chars: Vec<char> = text.chars().collect();
    let lines = wrap_lines(font, &chars, max_line_width);
    let widths: Vec<f64> = lines
        .iter()
        .map(|line| line_width(font, &chars, line))
        .collect();
    let widest = widths.iter().copied().fold(0.0, f64::max);
    let width = if max_line_width > 0.0 {
        max_line_width
    } else {
        widest
    };
    let line_height = font.line_height();
    let height = line_height * lines.len() as f64;

    let mut glyphs = vec![None; chars.len()];
    for (row, (line, used)) in lines.iter().zip(&widths).enumerate() {
        let x0 = alignment.offset(width, *used);
        let top = height - row as f64 * line_height;
        let mut pen = 0.0;
        let mut prev: Option<char> = None;
        for &i in line {
            let ch = chars[i];
            if let Some(p) = prev {
                pen += font.kerning(p, ch);
            }
            prev = Some(ch);
            let placed = match font.glyph(ch).or_else(|| font.glyph('?')) {
                Some(g) => {
                    let b = GlyphBox {
                        center: Point::new(
                            x0 + pen + g.x_offset + g.width / 2.0,
                            top - g.y_offset - g.height / 2.0,
                        ) + image_offset,
                        size: Size::new(g.width, g.height),
                    };
                    pen += g.x_advance;
                    b
                }
                None => GlyphBox {
                    center: Point::new(x0 + pen, top - line_height / 2.0) + image_offset,
                    size: Size::ZERO,
                },
            };
            glyphs[i] = Some(placed);
        }
    }

    TextLayout {
        chars,
        glyphs,
        size: Size::new(width, height),
    }
}

/// Break `chars` into rows of indices. Newlines end a row and belong to none.
fn wrap_lines(font: &BmFont, chars: &[char], max_line_width: f64) -> Vec<Vec<usize>> {
    let mut lines = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '\n' {
            lines.push(std::mem::take(&mut current));
            i += 1;
            continue;
        }
        let start = i;
        while i < chars.len() && chars[i] != '\n' && chars[i] != ' ' {
            i += 1;
        }
        let word_end = i;
        while i < chars.len() && chars[i] == ' ' {
            i += 1;
        }
        if max_line_width > 0.0 && !current.is_empty() {
            let candidate: Vec<usize> = current.iter().copied().chain(start..word_end).collect();
            if line_width(font, chars, &candidate) > max_line_width {
                lines.push(std::mem::take(&mut current));
            }
        }
        current.extend(start..i);
    }
    lines.push(current);
    lines
}

/// Pen advance of a row, ignoring trailing spaces.
fn line_width(font: &BmFont, chars: &[char], line: &[usize]) -> f64 {
    let trimmed = line
        .iter()
        .rposition(|&i| chars[i] != ' ')
        .map_or(&line[..0], |last| &line[..=last]);
    let mut pen = 0.0;
    let mut prev: Option<char> = None;
    for &i in trimmed {
        let ch = chars[i];
        if let Some(p) = prev {
            pen += font.kerning(p, ch);
        }
        prev = Some(ch);
        if let Some(g) = font.glyph(ch).or_else(|| font.glyph('?')) {
            pen += g.x_advance;
        }
    }
    pen
}

#[cfg(test)]
#[path = "../../tests/unit/text/layout.rs"]
mod tests;
