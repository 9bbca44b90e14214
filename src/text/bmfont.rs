use std::{collections::HashMap, path::Path};

use anyhow::Context;

use crate::foundation::error::{LetterFxError, LetterFxResult};

/// One glyph entry of a BMFont descriptor, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BmGlyph {
    /// Atlas rectangle origin.
    pub x: u32,
    pub y: u32,
    pub width: f64,
    pub height: f64,
    /// Offset from the pen position to the glyph's top-left corner.
    pub x_offset: f64,
    pub y_offset: f64,
    /// Pen advance after drawing this glyph.
    pub x_advance: f64,
    pub page: u32,
}

/// Parsed AngelCode BMFont text descriptor (`.fnt`).
#[derive(Clone, Debug, Default)]
pub struct BmFont {
    face: String,
    size: f64,
    line_height: f64,
    base: f64,
    pages: Vec<String>,
    glyphs: HashMap<char, BmGlyph>,
    kernings: HashMap<(char, char), f64>,
}

impl BmFont {
    /// Read and parse a descriptor from disk.
    #[tracing::instrument]
    pub fn from_path(path: &Path) -> LetterFxResult<Self> {
        let src = std::fs::read_to_string(path)
            .with_context(|| format!("read bmfont descriptor '{}'", path.display()))
            .map_err(|e| LetterFxError::font_load(format!("{e:#}")))?;
        Self::parse(&src)
            .map_err(|e| LetterFxError::font_load(format!("'{}': {e}", path.display())))
    }

    /// Parse the text form of a BMFont descriptor.
    pub fn parse(src: &str) -> LetterFxResult<Self> {
        let mut font = Self::default();
        let mut saw_common = false;

        for (line_no, raw) in src.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let (tag, fields) = split_tag(line);
            let get = |key: &str| fields.iter().find(|(k, _)| *k == key).map(|(_, v)| v.as_str());
            let num = |key: &str| -> LetterFxResult<f64> {
                match get(key) {
                    None => Ok(0.0),
                    Some(v) => v.parse::<f64>().map_err(|_| {
                        LetterFxError::font_load(format!(
                            "line {}: invalid number for '{key}': '{v}'",
                            line_no + 1
                        ))
                    }),
                }
            };

            match tag {
                "info" => {
                    font.face = get("face").unwrap_or_default().to_owned();
                    font.size = num("size")?.abs();
                }
                "common" => {
                    font.line_height = num("lineHeight")?;
                    font.base = num("base")?;
                    saw_common = true;
                }
                "page" => {
                    let id = num("id")? as usize;
                    let file = get("file").unwrap_or_default().to_owned();
                    if font.pages.len() <= id {
                        font.pages.resize(id + 1, String::new());
                    }
                    font.pages[id] = file;
                }
                "char" => {
                    let id = num("id")?;
                    let Some(ch) = char_from_id(id) else {
                        tracing::debug!(id, "skipping bmfont glyph with invalid code point");
                        continue;
                    };
                    font.glyphs.insert(
                        ch,
                        BmGlyph {
                            x: num("x")? as u32,
                            y: num("y")? as u32,
                            width: num("width")?,
                            height: num("height")?,
                            x_offset: num("xoffset")?,
                            y_offset: num("yoffset")?,
                            x_advance: num("xadvance")?,
                            page: num("page")? as u32,
                        },
                    );
                }
                "kerning" => {
                    let (Some(first), Some(second)) =
                        (char_from_id(num("first")?), char_from_id(num("second")?))
                    else {
                        continue;
                    };
                    font.kernings.insert((first, second), num("amount")?);
                }
                _ => {}
            }
        }

        if !saw_common {
            return Err(LetterFxError::font_load(
                "bmfont descriptor has no 'common' line",
            ));
        }
        if font.line_height <= 0.0 {
            return Err(LetterFxError::font_load("bmfont lineHeight must be > 0"));
        }
        if font.glyphs.is_empty() {
            return Err(LetterFxError::font_load("bmfont descriptor has no glyphs"));
        }
        Ok(font)
    }

    pub fn face(&self) -> &str {
        &self.face
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn line_height(&self) -> f64 {
        self.line_height
    }

    pub fn base(&self) -> f64 {
        self.base
    }

    /// Atlas page file names, indexed by page id.
    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    pub fn glyph(&self, ch: char) -> Option<&BmGlyph> {
        self.glyphs.get(&ch)
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// Kerning adjustment applied between `first` and `second`, 0 when none.
    pub fn kerning(&self, first: char, second: char) -> f64 {
        self.kernings.get(&(first, second)).copied().unwrap_or(0.0)
    }
}

fn char_from_id(id: f64) -> Option<char> {
    if id < 0.0 || id.fract() != 0.0 || id > f64::from(u32::MAX) {
        return None;
    }
    char::from_u32(id as u32)
}

/// Split `tag key=value key="quoted value" ...` into the tag and its fields.
fn split_tag(line: &str) -> (&str, Vec<(&str, String)>) {
    let (tag, mut rest) = match line.find(char::is_whitespace) {
        Some(at) => (&line[..at], line[at..].trim_start()),
        None => (line, ""),
    };

    let mut fields = Vec::new();
    while !rest.is_empty() {
        let Some(eq) = rest.find('=') else {
            break;
        };
        let key = rest[..eq].trim();
        let after = &rest[eq + 1..];
        let (value, remaining) = if let Some(quoted) = after.strip_prefix('"') {
            match quoted.find('"') {
                Some(end) => (quoted[..end].to_owned(), &quoted[end + 1..]),
                None => (quoted.to_owned(), ""),
            }
        } else {
            match after.find(char::is_whitespace) {
                Some(end) => (after[..end].to_owned(), &after[end..]),
                None => (after.to_owned(), ""),
            }
        };
        fields.push((key, value));
        rest = remaining.trim_start();
    }
    (tag, fields)
}

#[cfg(test)]
#[path = "../../tests/unit/text/bmfont.rs"]
mod tests;
