use crate::foundation::error::{LyricueError, LyricueResult};

pub use kurbo::{Point, Vec2};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
/// 0-based frame index on the render clock.
pub struct FrameIndex(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Half-open frame range `[start, end)`.
pub struct FrameRange {
    /// First frame in the range.
    pub start: FrameIndex,
    /// One past the last frame.
    pub end: FrameIndex, // exclusive
}

impl FrameRange {
    /// Build a range, rejecting `start > end`.
    pub fn new(start: FrameIndex, end: FrameIndex) -> LyricueResult<Self> {
        if start.0 > end.0 {
            return Err(LyricueError::validation("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Number of frames covered.
    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    /// Whether the range covers no frames.
    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    /// Whether `f` falls inside the range.
    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }

    /// Iterate frames in increasing order.
    pub fn iter(self) -> impl Iterator<Item = FrameIndex> {
        (self.start.0..self.end.0).map(FrameIndex)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Rational frame rate `num / den`.
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be > 0.
    pub den: u32,
}

impl Fps {
    /// Build a validated frame rate.
    pub fn new(num: u32, den: u32) -> LyricueResult<Self> {
        if den == 0 {
            return Err(LyricueError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(LyricueError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Re-check invariants after deserialization.
    pub fn validate(self) -> LyricueResult<()> {
        Self::new(self.num, self.den).map(|_| ())
    }

    /// Frames per second as a float.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Playback time of `frame` in seconds.
    pub fn frame_to_secs(self, frame: FrameIndex) -> f64 {
        (frame.0 as f64) * f64::from(self.den) / f64::from(self.num)
    }

    /// Last frame whose start time is `<= secs` (0 for negative input).
    pub fn secs_to_frames_floor(self, secs: f64) -> u64 {
        (secs * self.as_f64()).floor().max(0.0) as u64
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 30, den: 1 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Output surface size in pixels.
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Reject zero-sized canvases.
    pub fn validate(self) -> LyricueResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(LyricueError::validation("canvas width/height must be > 0"));
        }
        Ok(())
    }

    /// Absolute pixel position of a `(left%, top%)` placement.
    pub fn percent_point(self, left_pct: f64, top_pct: f64) -> Point {
        Point::new(
            f64::from(self.width) * left_pct / 100.0,
            f64::from(self.height) * top_pct / 100.0,
        )
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

/// Straight (non-premultiplied) RGBA8 color.
///
/// Serialized as `#RRGGBB`, `#RRGGBBAA`, or `"transparent"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Paper white used for lyric text.
    pub const PAPER: Self = Self::rgb(0xFF, 0xFD, 0xF8);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Fully transparent.
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    /// Opaque color from channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#RRGGBB`, `#RRGGBBAA`, or `transparent`.
    pub fn parse(s: &str) -> LyricueResult<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("transparent") {
            return Ok(Self::TRANSPARENT);
        }
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| LyricueError::validation(format!("color '{s}' must start with '#'")))?;
        if !(hex.len() == 6 || hex.len() == 8) || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(LyricueError::validation(format!(
                "color '{s}' must be #RRGGBB or #RRGGBBAA"
            )));
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
        let parsed = (|| -> Result<Self, std::num::ParseIntError> {
            Ok(Self {
                r: channel(0)?,
                g: channel(2)?,
                b: channel(4)?,
                a: if hex.len() == 8 { channel(6)? } else { 255 },
            })
        })();
        parsed.map_err(|e| LyricueError::validation(format!("color '{s}': {e}")))
    }

    /// Whether the color paints nothing.
    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// `#rrggbb` without alpha (alpha is emitted separately as an opacity).
    pub fn hex_rgb(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Alpha as a `[0, 1]` opacity.
    pub fn alpha_f64(self) -> f64 {
        f64::from(self.a) / 255.0
    }
}

impl TryFrom<String> for Rgba8 {
    type Error = LyricueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Rgba8> for String {
    fn from(c: Rgba8) -> Self {
        if c.is_transparent() {
            "transparent".to_string()
        } else if c.a == 255 {
            c.hex_rgb()
        } else {
            format!("{}{:02x}", c.hex_rgb(), c.a)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
