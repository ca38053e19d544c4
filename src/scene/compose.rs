use crate::{
    animation::ease::Ease,
    foundation::core::{Canvas, Fps, FrameIndex, Point, Rgba8, Vec2},
    style::{
        config::{LyricConfigItem, MatchRole},
        kind::GlyphMotion,
        plan::{PlanPreset, TextLayout},
    },
    timeline::{
        evaluator::{ActiveEntry, EvaluationResult, TimelineEvaluator},
        lrc::Timeline,
    },
};

/// Z-order of the plain lyric line.
pub const NORMAL_LAYER_Z: i32 = 1;
/// Advance of an ASCII glyph relative to the font size; other glyphs are full width.
pub const ASCII_ADVANCE_EM: f64 = 0.55;
/// Outline width for outline animations without an override.
pub const DEFAULT_OUTLINE_WIDTH: f64 = 2.0;

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Everything to draw for one frame, in painter's order.
pub struct FrameScene {
    /// Frame index.
    pub frame: FrameIndex,
    /// Query time in seconds.
    pub time_secs: f64,
    /// Active entry, if any.
    pub active: Option<ActiveEntry>,
    /// Text of the active entry.
    pub text: Option<String>,
    /// Opacity of a black overlay drawn under all layers.
    pub backdrop_opacity: f64,
    /// Layers sorted by ascending `z` (stable for equal `z`).
    pub layers: Vec<Layer>,
}

impl FrameScene {
    /// Scene with nothing on screen.
    pub fn empty(frame: FrameIndex, time_secs: f64) -> Self {
        Self {
            frame,
            time_secs,
            active: None,
            text: None,
            backdrop_opacity: 0.0,
            layers: Vec::new(),
        }
    }

    /// Whether nothing would be drawn.
    pub fn is_blank(&self) -> bool {
        self.layers.is_empty() && self.backdrop_opacity <= 0.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
/// What produced a layer.
pub enum LayerSource {
    /// The plain lyric line.
    Normal,
    /// A keyword table item.
    Special {
        /// Index of the item in the table.
        index: usize,
        /// Why it is on screen.
        role: MatchRole,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Outline paint.
pub struct Stroke {
    /// Outline color.
    pub color: Rgba8,
    /// Width in layer-local pixels.
    pub width: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// A positioned group of glyphs sharing font, paint and transform.
///
/// The layer transform is `translate(anchor) * scale(scale) * translate(offset)`; glyph
/// positions are in the resulting layer-local space.
pub struct Layer {
    /// Origin.
    pub source: LayerSource,
    /// Paint order.
    pub z: i32,
    /// Canvas-space center.
    pub anchor: Point,
    /// Uniform scale around `anchor`.
    pub scale: f64,
    /// Layer-local displacement (procedural bob).
    pub offset: Vec2,
    /// Group opacity.
    pub opacity: f64,
    /// Group blur radius.
    pub blur_px: f64,
    /// Font size in layer-local pixels.
    pub font_size: f64,
    /// Font family override.
    pub font_family: Option<String>,
    /// Fill color.
    pub fill: Rgba8,
    /// Outline, if drawn.
    pub stroke: Option<Stroke>,
    /// Glyphs, whitespace excluded.
    pub glyphs: Vec<GlyphDraw>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// One glyph with its animated state.
pub struct GlyphDraw {
    /// The character.
    pub ch: char,
    /// Center in layer-local space, animation offset applied.
    pub center: Point,
    /// Rotation about `center`, degrees.
    pub rotation_deg: f64,
    /// Glyph opacity.
    pub opacity: f64,
    /// Glyph blur radius.
    pub blur_px: f64,
    /// Fraction of the outline drawn.
    pub stroke_reveal: f64,
    /// Fill opacity.
    pub fill_opacity: f64,
}

/// Compose the scene for `frame` from scratch.
#[tracing::instrument(skip(timeline, evaluator, preset))]
pub fn compose_frame(
    timeline: &Timeline,
    evaluator: &TimelineEvaluator,
    preset: &PlanPreset,
    canvas: Canvas,
    fps: Fps,
    frame: FrameIndex,
) -> FrameScene {
    let time = fps.frame_to_secs(frame);
    let result = evaluator.evaluate(timeline, time);
    compose_result(timeline, result, preset, canvas, frame, time)
}

/// Compose from an already computed evaluation (e.g. from a cursor).
pub fn compose_result(
    timeline: &Timeline,
    result: EvaluationResult,
    preset: &PlanPreset,
    canvas: Canvas,
    frame: FrameIndex,
    time_secs: f64,
) -> FrameScene {
    let Some(active) = result.active().copied() else {
        return FrameScene::empty(frame, time_secs);
    };
    let Some(entry) = timeline.get(active.index) else {
        return FrameScene::empty(frame, time_secs);
    };

    let matches = preset.specials.matches(entry);
    let any_primary = matches.iter().any(|m| m.role == MatchRole::Primary);

    let mut layers: Vec<Layer> = matches
        .iter()
        .map(|m| special_layer(m.item, m.index, m.role, &active, canvas, frame))
        .collect();
    if !any_primary {
        layers.push(normal_layer(&entry.text, preset, &active, canvas));
    }
    layers.retain(|l| !l.glyphs.is_empty());
    layers.sort_by_key(|l| l.z);

    let backdrop_opacity = match preset.darken_on_special {
        Some(level) if any_primary => level * active.progress,
        _ => 0.0,
    };

    FrameScene {
        frame,
        time_secs,
        active: Some(active),
        text: Some(entry.text.clone()),
        backdrop_opacity,
        layers,
    }
}

fn normal_layer(text: &str, preset: &PlanPreset, active: &ActiveEntry, canvas: Canvas) -> Layer {
    let style = &preset.normal;
    let (anchor, vertical) = match style.layout {
        TextLayout::Horizontal { top_pct } => (canvas.percent_point(50.0, top_pct), false),
        TextLayout::Vertical { left_pct, top_pct } => {
            (canvas.percent_point(left_pct, top_pct), true)
        }
    };
    let slide = style.slide_px * (1.0 - Ease::Linear.ramp(active.elapsed, 0.0, style.slide_secs));
    let gap = style.letter_spacing_em * style.font_size;
    let glyphs = layout_glyphs(text, style.font_size, gap, vertical, |_| GlyphMotion::SETTLED);

    Layer {
        source: LayerSource::Normal,
        z: NORMAL_LAYER_Z,
        anchor,
        scale: 1.0,
        offset: Vec2::new(0.0, slide),
        opacity: active.progress,
        blur_px: 0.0,
        font_size: style.font_size,
        font_family: style.font_family.clone(),
        fill: style.color,
        stroke: None,
        glyphs,
    }
}

fn special_layer(
    item: &LyricConfigItem,
    index: usize,
    role: MatchRole,
    active: &ActiveEntry,
    canvas: Canvas,
    frame: FrameIndex,
) -> Layer {
    let kind = &item.animation;
    let (t, role_opacity) = match role {
        MatchRole::Primary => (active.elapsed, 1.0),
        MatchRole::Linger => (f64::INFINITY, item.linger_opacity),
    };
    let font_size = item.effective_font_size();
    let glyphs = layout_glyphs(
        item.display_text(),
        font_size,
        item.gap_px,
        item.placement.vertical,
        |i| kind.glyph(i, t, frame),
    );

    let (fill, stroke) = if kind.is_outline() {
        let stroke = Stroke {
            color: item.stroke_color.unwrap_or(Rgba8::PAPER),
            width: item.stroke_width.unwrap_or(DEFAULT_OUTLINE_WIDTH),
        };
        (item.color.unwrap_or(Rgba8::TRANSPARENT), Some(stroke))
    } else {
        let fill = item.color.unwrap_or(Rgba8::PAPER);
        let stroke = item
            .stroke_width
            .filter(|w| *w > 0.0)
            .map(|width| Stroke {
                color: item.stroke_color.unwrap_or(fill),
                width,
            });
        (fill, stroke)
    };

    Layer {
        source: LayerSource::Special { index, role },
        z: item.placement.z_index,
        anchor: canvas.percent_point(item.placement.left, item.placement.top),
        scale: item.placement.scale,
        offset: kind.layer_offset(frame),
        opacity: active.progress * item.opacity.unwrap_or(1.0) * role_opacity,
        blur_px: item.blur_px,
        font_size,
        font_family: item.font_family.clone(),
        fill,
        stroke,
        glyphs,
    }
}

fn advance(ch: char, font_size: f64) -> f64 {
    if ch.is_ascii() {
        font_size * ASCII_ADVANCE_EM
    } else {
        font_size
    }
}

/// Lay glyphs out centered on the origin, one row (or column) with `gap` between cells.
fn layout_glyphs(
    text: &str,
    font_size: f64,
    gap: f64,
    vertical: bool,
    motion: impl Fn(usize) -> GlyphMotion,
) -> Vec<GlyphDraw> {
    let cells: Vec<(char, f64)> = text
        .chars()
        .map(|ch| {
            let size = if vertical { font_size } else { advance(ch, font_size) };
            (ch, size)
        })
        .collect();
    let total = cells.iter().map(|(_, s)| s).sum::<f64>()
        + gap * cells.len().saturating_sub(1) as f64;

    let mut cursor = -total / 2.0;
    let mut out = Vec::with_capacity(cells.len());
    for (i, (ch, size)) in cells.into_iter().enumerate() {
        let mid = cursor + size / 2.0;
        cursor += size + gap;
        if ch.is_whitespace() {
            continue;
        }
        let m = motion(i);
        let base = if vertical {
            Point::new(0.0, mid)
        } else {
            Point::new(mid, 0.0)
        };
        out.push(GlyphDraw {
            ch,
            center: base + m.offset,
            rotation_deg: m.rotation_deg,
            opacity: m.opacity,
            blur_px: m.blur_px,
            stroke_reveal: m.reveal.stroke,
            fill_opacity: m.reveal.fill,
        });
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/scene/compose.rs"]
mod tests;
