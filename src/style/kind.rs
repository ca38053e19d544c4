use crate::{
    animation::{ease::Ease, ease::lerp, reveal::GlyphReveal, sway::Sway},
    foundation::core::{FrameIndex, Vec2},
    foundation::error::{LyricueError, LyricueResult},
};

/// Giant outlined glyphs traced over time, optionally bobbing.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BigOutline {
    /// Seconds for the full draw progress (outline then fill).
    pub reveal_secs: f64,
    /// Vertical bob applied to the whole layer.
    pub sway: Option<Sway>,
}

impl Default for BigOutline {
    fn default() -> Self {
        Self {
            reveal_secs: 2.0,
            sway: Some(Sway::new(30.0, 40.0)),
        }
    }
}

/// Glyphs rise into place one after another while fading in.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FloatUp {
    /// Delay before the first glyph moves.
    pub delay_secs: f64,
    /// Extra delay per glyph.
    pub stagger_secs: f64,
    /// Starting distance below the resting position.
    pub rise_px: f64,
    /// Seconds to travel `rise_px`.
    pub rise_secs: f64,
    /// Seconds to fade in.
    pub fade_secs: f64,
    /// Easing of the rise.
    pub ease: Ease,
}

impl Default for FloatUp {
    fn default() -> Self {
        Self {
            delay_secs: 0.5,
            stagger_secs: 0.2,
            rise_px: 100.0,
            rise_secs: 1.5,
            fade_secs: 1.0,
            ease: Ease::OutQuad,
        }
    }
}

/// Staggered fill reveal with continuous per-glyph wavering.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Wave {
    /// Reveal timing.
    pub reveal: Reveal,
    /// Vertical bob.
    pub bob: Sway,
    /// Horizontal drift (cosine).
    pub drift: Sway,
    /// Rotation in degrees.
    pub tilt: Sway,
    /// Phase added per glyph index, in radians.
    pub phase_step: f64,
}

impl Default for Wave {
    fn default() -> Self {
        Self {
            reveal: Reveal::default(),
            bob: Sway::new(5.0, 20.0),
            drift: Sway::new(2.0, 30.0),
            tilt: Sway::new(3.0, 25.0),
            phase_step: 1.5,
        }
    }
}

/// Staggered hand-drawn reveal, glyph by glyph.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Reveal {
    /// Delay before the first glyph starts.
    pub delay_secs: f64,
    /// Extra delay per glyph.
    pub stagger_secs: f64,
    /// Seconds per glyph reveal.
    pub reveal_secs: f64,
}

impl Default for Reveal {
    fn default() -> Self {
        Self {
            delay_secs: 0.0,
            stagger_secs: 0.1,
            reveal_secs: 1.0,
        }
    }
}

impl Reveal {
    fn window(&self, index: usize) -> (f64, f64) {
        let start = self.delay_secs + index as f64 * self.stagger_secs;
        (start, start + self.reveal_secs)
    }

    fn progress(&self, index: usize, t: f64) -> f64 {
        let (start, end) = self.window(index);
        Ease::Linear.ramp(t, start, end)
    }
}

/// Solid glyphs that sharpen out of a blur, like ink soaking into paper.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct InkBleed {
    /// Delay before the first glyph.
    pub delay_secs: f64,
    /// Extra delay per glyph.
    pub stagger_secs: f64,
    /// Seconds from full blur to sharp.
    pub settle_secs: f64,
    /// Initial blur radius.
    pub blur_px: f64,
}

impl Default for InkBleed {
    fn default() -> Self {
        Self {
            delay_secs: 0.0,
            stagger_secs: 0.1,
            settle_secs: 1.0,
            blur_px: 15.0,
        }
    }
}

/// Glyphs fly in from off-screen directions and converge.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Gather {
    /// Starting distance from the resting position.
    pub distance_px: f64,
    /// Seconds to converge.
    pub gather_secs: f64,
    /// Easing of the convergence.
    pub ease: Ease,
    /// Outline/fill reveal, running alongside the motion.
    pub reveal: Reveal,
}

impl Default for Gather {
    fn default() -> Self {
        Self {
            distance_px: 600.0,
            gather_secs: 1.2,
            ease: Ease::OutCubic,
            reveal: Reveal {
                delay_secs: 0.5,
                stagger_secs: 0.0,
                reveal_secs: 2.5,
            },
        }
    }
}

/// Animation applied to a keyword-matched special layer.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnimationKind {
    /// Giant outline, slow bob.
    BigOutline(BigOutline),
    /// Glyphs float up in sequence.
    FloatUp(FloatUp),
    /// Wavering glyphs.
    Wave(Wave),
    /// Plain staggered reveal.
    Reveal(Reveal),
    /// Blur-to-sharp ink effect.
    InkBleed(InkBleed),
    /// Converging glyphs.
    Gather(Gather),
    /// Static text; only the line envelope applies.
    FadeInOut,
}

/// Per-glyph animated state relative to its resting layout position.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct GlyphMotion {
    /// Displacement in layer-local pixels.
    pub offset: Vec2,
    /// Rotation in degrees.
    pub rotation_deg: f64,
    /// Glyph-local opacity, `[0, 1]`.
    pub opacity: f64,
    /// Blur radius in pixels.
    pub blur_px: f64,
    /// Outline/fill reveal.
    pub reveal: GlyphReveal,
}

impl GlyphMotion {
    /// Resting, fully drawn glyph.
    pub const SETTLED: Self = Self {
        offset: Vec2::ZERO,
        rotation_deg: 0.0,
        opacity: 1.0,
        blur_px: 0.0,
        reveal: GlyphReveal::DONE,
    };
}

// Up, right, left, down.
const GATHER_DIRECTIONS: [(f64, f64); 4] = [(0.0, -1.0), (1.0, 0.0), (-1.0, 0.0), (0.0, 1.0)];

impl AnimationKind {
    /// Base font size for this kind when an item sets none.
    pub fn default_font_size(&self) -> f64 {
        match self {
            Self::BigOutline(_) => 240.0,
            Self::Wave(_) => 70.0,
            Self::InkBleed(_) | Self::Reveal(_) => 60.0,
            Self::FloatUp(_) | Self::Gather(_) | Self::FadeInOut => 80.0,
        }
    }

    /// Whether glyphs are drawn as hollow outlines by default.
    pub fn is_outline(&self) -> bool {
        matches!(self, Self::BigOutline(_))
    }

    /// Layer-wide displacement at `frame`.
    pub fn layer_offset(&self, frame: FrameIndex) -> Vec2 {
        match self {
            Self::BigOutline(BigOutline {
                sway: Some(sway), ..
            }) => Vec2::new(0.0, sway.sin(frame)),
            _ => Vec2::ZERO,
        }
    }

    /// State of glyph `index` at `t` seconds into the line.
    ///
    /// Pass `f64::INFINITY` for `t` to get the settled end state.
    pub fn glyph(&self, index: usize, t: f64, frame: FrameIndex) -> GlyphMotion {
        match self {
            Self::BigOutline(p) => GlyphMotion {
                reveal: GlyphReveal::at(Ease::Linear.ramp(t, 0.0, p.reveal_secs)),
                ..GlyphMotion::SETTLED
            },
            Self::FloatUp(p) => {
                let start = p.delay_secs + index as f64 * p.stagger_secs;
                let rise = p.ease.ramp(t, start, start + p.rise_secs);
                GlyphMotion {
                    offset: Vec2::new(0.0, lerp(p.rise_px, 0.0, rise)),
                    opacity: Ease::Linear.ramp(t, start, start + p.fade_secs),
                    ..GlyphMotion::SETTLED
                }
            }
            Self::Wave(p) => {
                let phase = index as f64 * p.phase_step;
                GlyphMotion {
                    offset: Vec2::new(
                        p.drift.with_phase(phase).cos(frame),
                        p.bob.with_phase(phase).sin(frame),
                    ),
                    rotation_deg: p.tilt.with_phase(phase).sin(frame),
                    reveal: GlyphReveal::at(p.reveal.progress(index, t)),
                    ..GlyphMotion::SETTLED
                }
            }
            Self::Reveal(p) => GlyphMotion {
                reveal: GlyphReveal::at(p.progress(index, t)),
                ..GlyphMotion::SETTLED
            },
            Self::InkBleed(p) => {
                let start = p.delay_secs + index as f64 * p.stagger_secs;
                let k = Ease::Linear.ramp(t, start, start + p.settle_secs);
                GlyphMotion {
                    opacity: k,
                    blur_px: lerp(p.blur_px, 0.0, k),
                    ..GlyphMotion::SETTLED
                }
            }
            Self::Gather(p) => {
                let k = p.ease.ramp(t, 0.0, p.gather_secs);
                let (dx, dy) = GATHER_DIRECTIONS[index % GATHER_DIRECTIONS.len()];
                let dist = lerp(p.distance_px, 0.0, k);
                GlyphMotion {
                    offset: Vec2::new(dx * dist, dy * dist),
                    reveal: GlyphReveal::at(p.reveal.progress(index, t)),
                    ..GlyphMotion::SETTLED
                }
            }
            Self::FadeInOut => GlyphMotion::SETTLED,
        }
    }

    /// Reject negative or non-finite timings and distances.
    pub fn validate(&self) -> LyricueResult<()> {
        let reveal_fields = |r: &Reveal| {
            [
                ("delay_secs", r.delay_secs),
                ("stagger_secs", r.stagger_secs),
                ("reveal_secs", r.reveal_secs),
            ]
        };
        let fields: Vec<(&str, f64)> = match self {
            Self::BigOutline(p) => vec![("reveal_secs", p.reveal_secs)],
            Self::FloatUp(p) => vec![
                ("delay_secs", p.delay_secs),
                ("stagger_secs", p.stagger_secs),
                ("rise_px", p.rise_px),
                ("rise_secs", p.rise_secs),
                ("fade_secs", p.fade_secs),
            ],
            Self::Wave(p) => reveal_fields(&p.reveal).to_vec(),
            Self::Reveal(p) => reveal_fields(p).to_vec(),
            Self::InkBleed(p) => vec![
                ("delay_secs", p.delay_secs),
                ("stagger_secs", p.stagger_secs),
                ("settle_secs", p.settle_secs),
                ("blur_px", p.blur_px),
            ],
            Self::Gather(p) => {
                let mut v = vec![("distance_px", p.distance_px), ("gather_secs", p.gather_secs)];
                v.extend(reveal_fields(&p.reveal));
                v
            }
            Self::FadeInOut => Vec::new(),
        };
        for (name, v) in fields {
            if !v.is_finite() || v < 0.0 {
                return Err(LyricueError::validation(format!(
                    "animation {name} must be finite and >= 0, got {v}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/kind.rs"]
mod tests;
