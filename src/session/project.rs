use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    animation::envelope::FadeEnvelope,
    foundation::core::{Canvas, Fps, Rgba8},
    foundation::error::{LyricueError, LyricueResult},
    style::{
        config::SpecialTable,
        plan::{PlanId, PlanPreset},
    },
    timeline::{
        evaluator::{LAST_ENTRY_HOLD_SECS, TimelineEvaluator},
        lrc::ParseOptions,
    },
};

fn default_hold() -> f64 {
    LAST_ENTRY_HOLD_SECS
}

/// One render session, as stored in a project JSON file.
///
/// Paths are relative to the directory containing the project file.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Project {
    /// Frame clock.
    #[serde(default)]
    pub fps: Fps,
    /// Output size.
    #[serde(default)]
    pub canvas: Canvas,
    /// Timed-lyric document.
    pub lyrics: PathBuf,
    /// Font file to prefer over system fonts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<PathBuf>,
    /// Visual preset.
    #[serde(default)]
    pub plan: PlanId,
    /// Replaces the plan's keyword table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specials: Option<SpecialTable>,
    /// Replaces the plan's fade curve.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub envelope: Option<FadeEnvelope>,
    /// On-screen time of the final line.
    #[serde(default = "default_hold")]
    pub last_entry_hold_secs: f64,
    /// Parser options.
    #[serde(default)]
    pub parse: ParseOptions,
    /// Solid background; omitted renders a transparent overlay.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Rgba8>,
    /// Fixed render length in frames; derived from the lyrics when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_frames: Option<u64>,
}

impl Project {
    /// Minimal project for a lyric file with every other setting defaulted.
    pub fn new(lyrics: impl Into<PathBuf>) -> Self {
        Self {
            fps: Fps::default(),
            canvas: Canvas::default(),
            lyrics: lyrics.into(),
            font: None,
            plan: PlanId::default(),
            specials: None,
            envelope: None,
            last_entry_hold_secs: LAST_ENTRY_HOLD_SECS,
            parse: ParseOptions::default(),
            background: None,
            duration_frames: None,
        }
    }

    /// Parse and validate project JSON.
    pub fn from_json_str(s: &str) -> LyricueResult<Self> {
        let project: Self = serde_json::from_str(s)?;
        project.validate()?;
        Ok(project)
    }

    /// Read, parse and validate a project file.
    pub fn from_path(path: &Path) -> LyricueResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read project '{}'", path.display()))?;
        Self::from_json_str(&s).map_err(|e| match e {
            LyricueError::Serde(msg) => {
                LyricueError::serde(format!("project '{}': {msg}", path.display()))
            }
            other => other,
        })
    }

    /// Check every setting and the effective preset.
    pub fn validate(&self) -> LyricueResult<()> {
        self.fps.validate()?;
        self.canvas.validate()?;
        if self.lyrics.as_os_str().is_empty() {
            return Err(LyricueError::validation("project lyrics path must be non-empty"));
        }
        if !self.last_entry_hold_secs.is_finite() || self.last_entry_hold_secs <= 0.0 {
            return Err(LyricueError::validation(format!(
                "last_entry_hold_secs must be > 0, got {}",
                self.last_entry_hold_secs
            )));
        }
        if self.duration_frames == Some(0) {
            return Err(LyricueError::validation("duration_frames must be > 0 when set"));
        }
        self.preset().validate()
    }

    /// Plan preset with the project's overrides applied.
    pub fn preset(&self) -> PlanPreset {
        let mut preset = self.plan.preset();
        if let Some(specials) = &self.specials {
            preset.specials = specials.clone();
        }
        if let Some(envelope) = self.envelope {
            preset.envelope = envelope;
        }
        preset
    }

    /// Evaluator matching the effective envelope and hold.
    pub fn evaluator(&self) -> TimelineEvaluator {
        TimelineEvaluator {
            envelope: self.preset().envelope,
            last_entry_hold_secs: self.last_entry_hold_secs,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/project.rs"]
mod tests;
