//! Lyricue turns a timed-lyric (`.lrc`) document into per-frame karaoke overlays.
//!
//! # Pipeline overview
//!
//! 1. **Parse**: `&str -> Timeline` (sorted `[MM:SS.ff]` entries; malformed lines skipped)
//! 2. **Evaluate**: `Timeline + seconds -> EvaluationResult` (active line, fade progress)
//! 3. **Compose**: `EvaluationResult + PlanPreset -> FrameScene` (z-ordered glyph layers)
//! 4. **Render**: `FrameScene -> SVG -> FrameRGBA` (via `usvg`/`resvg`), then PNG
//!
//! Parsing and evaluation are total: they never fail and never panic. Evaluation is a pure
//! function of `(timeline, time)`, so frames can be produced in any order or in parallel.
//! IO (lyrics, fonts) is front-loaded into a [`LyricSession`].
//!
//! # Getting started
//!
//! ```no_run
//! use lyricue::{FrameIndex, LyricSession};
//!
//! let session = LyricSession::open(std::path::Path::new("project.json"))?;
//! let scene = session.compose(FrameIndex(2520));
//! println!("{:?}", scene.text);
//! # Ok::<(), lyricue::LyricueError>(())
//! ```
//!
//! See [`crate::guide`] for the project format and the preset catalogue.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod assets;
mod foundation;
mod render;
mod scene;
mod session;
mod style;
mod timeline;

/// Project format, timing rules and presets.
pub mod guide;

pub use animation::ease::{Ease, lerp};
pub use animation::envelope::{
    DEGENERATE_EPSILON, FadeEnvelope, MAX_FADE_IN_RATIO, MIN_FADE_OUT_RATIO,
};
pub use animation::interp::{Extrapolate, interpolate, validate_breakpoints};
pub use animation::reveal::{FILL_START, GlyphReveal, STROKE_END};
pub use animation::sway::Sway;
pub use assets::font::{FALLBACK_FAMILY, FontHandle, LoadedFont, sha256_hex};
pub use foundation::core::{Canvas, Fps, FrameIndex, FrameRange, Point, Rgba8, Vec2};
pub use foundation::error::{LyricueError, LyricueResult};
pub use render::raster::{FrameRGBA, rasterize_svg, write_png};
pub use render::svg::{OUTLINE_LENGTH_EM, SvgOptions, scene_to_svg, scene_to_svg_with, xml_escape};
pub use scene::compose::{
    FrameScene, GlyphDraw, Layer, LayerSource, NORMAL_LAYER_Z, Stroke, compose_frame,
    compose_result,
};
pub use session::lyric_session::{LyricSession, RenderStats, RenderThreading};
pub use session::project::Project;
pub use style::config::{
    DEFAULT_MATCH_WINDOW_SECS, LyricConfigItem, MatchRole, Placement, SpecialMatch, SpecialTable,
};
pub use style::kind::{AnimationKind, BigOutline, FloatUp, Gather, GlyphMotion, InkBleed, Reveal, Wave};
pub use style::plan::{NormalTextStyle, PlanId, PlanPreset, SORA, TextLayout, UBAE, WAKE};
pub use timeline::evaluator::{
    ActiveEntry, EvaluationResult, LAST_ENTRY_HOLD_SECS, TimelineCursor, TimelineEvaluator,
    active_index, evaluate,
};
pub use timeline::lrc::{LyricEntry, ParseOptions, RepeatTags, Timeline};
