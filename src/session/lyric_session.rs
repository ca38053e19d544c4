use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use rayon::prelude::*;

use crate::{
    assets::font::FontHandle,
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{LyricueError, LyricueResult},
    render::{
        raster::{FrameRGBA, rasterize_svg, write_png},
        svg::{SvgOptions, scene_to_svg_with},
    },
    scene::compose::{FrameScene, compose_frame},
    session::project::Project,
    style::plan::PlanPreset,
    timeline::{
        evaluator::{EvaluationResult, TimelineCursor, TimelineEvaluator},
        lrc::Timeline,
    },
};

/// How [`LyricSession::render_range_to_dir`] schedules work.
#[derive(Clone, Debug)]
pub struct RenderThreading {
    /// Rasterize on a rayon pool.
    pub parallel: bool,
    /// Pool size; `None` uses rayon's default.
    pub threads: Option<usize>,
    /// Rasterize each distinct frame once and copy the PNG for repeats.
    pub static_frame_elision: bool,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            threads: None,
            static_frame_elision: true,
        }
    }
}

/// Counters from a range render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct RenderStats {
    /// Frames written.
    pub frames_total: u64,
    /// Frames rasterized.
    pub frames_rendered: u64,
    /// Frames copied from an identical earlier frame.
    pub frames_elided: u64,
}

/// Loaded project state: timeline, evaluator, preset and fonts, owned together.
///
/// Every per-frame method is pure in `frame`; the session holds no mutable state, so frames
/// may be produced in any order or in parallel.
#[derive(Debug)]
pub struct LyricSession {
    project: Project,
    timeline: Timeline,
    evaluator: TimelineEvaluator,
    preset: PlanPreset,
    fonts: FontHandle,
}

impl LyricSession {
    /// Open a project file; relative paths resolve against its directory.
    pub fn open(path: &Path) -> LyricueResult<Self> {
        let project = Project::from_path(path)?;
        let root = path.parent().unwrap_or_else(|| Path::new("."));
        Self::new(project, root)
    }

    /// Load the timeline (leniently) and fonts (strictly) for `project`.
    #[tracing::instrument(skip(project, root), fields(root = %root.display()))]
    pub fn new(project: Project, root: &Path) -> LyricueResult<Self> {
        project.validate()?;
        let timeline = Timeline::load_or_empty(&root.join(&project.lyrics), project.parse);
        let fonts = FontHandle::prepare(root, project.font.as_deref())?;
        tracing::info!(
            entries = timeline.len(),
            plan = %project.plan,
            family = fonts.family(),
            "session ready"
        );
        Self::from_parts(project, timeline, fonts)
    }

    /// Assemble from already loaded parts.
    pub fn from_parts(project: Project, timeline: Timeline, fonts: FontHandle) -> LyricueResult<Self> {
        project.validate()?;
        Ok(Self {
            evaluator: project.evaluator(),
            preset: project.preset(),
            project,
            timeline,
            fonts,
        })
    }

    /// Project settings.
    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Parsed lyrics.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Effective preset.
    pub fn preset(&self) -> &PlanPreset {
        &self.preset
    }

    /// Font database.
    pub fn fonts(&self) -> &FontHandle {
        &self.fonts
    }

    /// Query time of `frame`.
    pub fn time_of(&self, frame: FrameIndex) -> f64 {
        self.project.fps.frame_to_secs(frame)
    }

    /// Active entry at `frame`.
    pub fn evaluate(&self, frame: FrameIndex) -> EvaluationResult {
        self.evaluator.evaluate(&self.timeline, self.time_of(frame))
    }

    /// Cursor for sequential walks; results equal [`LyricSession::evaluate`].
    pub fn cursor(&self) -> TimelineCursor {
        TimelineCursor::new(self.evaluator)
    }

    /// Scene at `frame`.
    pub fn compose(&self, frame: FrameIndex) -> FrameScene {
        compose_frame(
            &self.timeline,
            &self.evaluator,
            &self.preset,
            self.project.canvas,
            self.project.fps,
            frame,
        )
    }

    /// SVG overlay at `frame`.
    pub fn render_svg(&self, frame: FrameIndex) -> String {
        self.scene_svg(&self.compose(frame))
    }

    fn scene_svg(&self, scene: &FrameScene) -> String {
        scene_to_svg_with(
            scene,
            self.project.canvas,
            &SvgOptions {
                family: self.fonts.family(),
                background: self.project.background,
            },
        )
    }

    /// Pixels at `frame`.
    pub fn render_frame(&self, frame: FrameIndex) -> LyricueResult<FrameRGBA> {
        rasterize_svg(&self.render_svg(frame), &self.fonts, self.project.canvas)
    }

    /// Frames to render when no explicit range is given.
    ///
    /// `duration_frames` if set; otherwise through the end of the last line's hold.
    pub fn default_range(&self) -> FrameRange {
        let end = match self.project.duration_frames {
            Some(n) => n,
            None => self
                .timeline
                .entries()
                .last()
                .map(|e| {
                    let secs = e.time + self.project.last_entry_hold_secs;
                    self.project.fps.secs_to_frames_floor(secs).saturating_add(1)
                })
                .unwrap_or(1),
        };
        FrameRange {
            start: FrameIndex(0),
            end: FrameIndex(end),
        }
    }

    /// PNG path for `frame` inside `dir`.
    pub fn frame_path(dir: &Path, frame: FrameIndex) -> PathBuf {
        dir.join(format!("frame_{:06}.png", frame.0))
    }

    /// Render `range` as a PNG sequence into `dir`.
    #[tracing::instrument(skip(self, dir), fields(dir = %dir.display()))]
    pub fn render_range_to_dir(
        &self,
        range: FrameRange,
        dir: &Path,
        threading: &RenderThreading,
    ) -> LyricueResult<RenderStats> {
        if range.is_empty() {
            return Err(LyricueError::validation("render range must be non-empty"));
        }
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create output dir '{}'", dir.display()))?;

        // Composition is cheap; build every document first, then rasterize distinct ones.
        let svgs: Vec<(FrameIndex, String)> =
            range.iter().map(|f| (f, self.render_svg(f))).collect();

        let mut unique = Vec::<usize>::with_capacity(svgs.len());
        let mut frame_to_unique = Vec::<usize>::with_capacity(svgs.len());
        if threading.static_frame_elision {
            let mut first = HashMap::<&str, usize>::new();
            for (idx, (_, svg)) in svgs.iter().enumerate() {
                let slot = *first.entry(svg.as_str()).or_insert_with(|| {
                    unique.push(idx);
                    unique.len() - 1
                });
                frame_to_unique.push(slot);
            }
        } else {
            unique.extend(0..svgs.len());
            frame_to_unique.extend(0..svgs.len());
        }

        let render_one = |idx: &usize| -> LyricueResult<()> {
            let (frame, svg) = &svgs[*idx];
            let pixels = rasterize_svg(svg, &self.fonts, self.project.canvas)?;
            write_png(&pixels, &Self::frame_path(dir, *frame))
        };

        if threading.parallel {
            let pool = build_thread_pool(threading.threads)?;
            pool.install(|| unique.par_iter().try_for_each(render_one))?;
        } else {
            unique.iter().try_for_each(render_one)?;
        }

        for (idx, slot) in frame_to_unique.iter().enumerate() {
            let source = unique[*slot];
            if source == idx {
                continue;
            }
            let from = Self::frame_path(dir, svgs[source].0);
            let to = Self::frame_path(dir, svgs[idx].0);
            std::fs::copy(&from, &to)
                .with_context(|| format!("copy '{}' to '{}'", from.display(), to.display()))?;
        }

        let stats = RenderStats {
            frames_total: svgs.len() as u64,
            frames_rendered: unique.len() as u64,
            frames_elided: (svgs.len() - unique.len()) as u64,
        };
        tracing::info!(?stats, "rendered frame range");
        Ok(stats)
    }
}

fn build_thread_pool(threads: Option<usize>) -> LyricueResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(LyricueError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| LyricueError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/session/lyric_session.rs"]
mod tests;
