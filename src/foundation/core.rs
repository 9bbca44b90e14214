use crate::foundation::error::{LetterFxError, LetterFxResult};

pub use kurbo::{Point, Size, Vec2};

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32, // must be > 0
}

impl Fps {
    /// Create a validated frame rate.
    pub fn new(num: u32, den: u32) -> LetterFxResult<Self> {
        if den == 0 {
            return Err(LetterFxError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(LetterFxError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Frame rate as floating point frames per second.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Length of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Convert a frame count to seconds.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }

    /// Convert seconds to a whole frame count, rounding up so the last frame covers `secs`.
    pub fn secs_to_frames_ceil(self, secs: f64) -> u64 {
        (secs * self.as_f64()).ceil().max(0.0) as u64
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 60, den: 1 }
    }
}

/// Straight (non-premultiplied) RGB8 tint color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Untinted.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Build a color from channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channel-wise interpolation, rounded and clamped to `0..=255`.
    pub fn lerp(a: Self, b: Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }

        Self {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
        }
    }
}

impl Default for Rgb8 {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Clamp an arbitrary opacity value into the 8-bit range and truncate it.
///
/// `NaN` maps to fully transparent.
pub fn opacity_u8(o: f64) -> u8 {
    if o.is_nan() {
        return 0;
    }
    o.clamp(0.0, 255.0) as u8
}

/// Mutable visual state shared by label nodes and character elements.
///
/// Positions are in the parent's space with y pointing up. Rotation is in
/// degrees, positive values turn clockwise.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NodeProps {
    /// Anchor position (glyph center for characters).
    pub position: Point,
    /// Uniform scale, default 1.
    pub scale: f64,
    /// Rotation in degrees.
    pub rotation: f64,
    /// Opacity in `0..=255`.
    pub opacity: u8,
    /// Tint color, white means untinted.
    pub color: Rgb8,
    /// Local draw order among siblings.
    pub z_order: i32,
}

impl Default for NodeProps {
    fn default() -> Self {
        Self {
            position: Point::ZERO,
            scale: 1.0,
            rotation: 0.0,
            opacity: 255,
            color: Rgb8::WHITE,
            z_order: 0,
        }
    }
}

impl NodeProps {
    /// Properties at rest at `position`.
    pub fn at(position: Point) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
