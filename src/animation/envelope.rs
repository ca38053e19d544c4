use crate::{
    animation::interp::{Extrapolate, interpolate},
    foundation::error::{LyricueError, LyricueResult},
};

/// Fade-in window never exceeds this share of the line duration.
pub const MAX_FADE_IN_RATIO: f64 = 0.4;
/// Fade-out never starts before this share of the line duration.
pub const MIN_FADE_OUT_RATIO: f64 = 0.6;
/// Gap inserted before the end breakpoint by the degenerate-duration fallback.
pub const DEGENERATE_EPSILON: f64 = 0.01;

const LEVELS: [f64; 4] = [0.0, 1.0, 1.0, 0.0];

/// Fade-in / hold / fade-out curve over one lyric line.
///
/// Breakpoints for a line of duration `d` are
/// `[0, min(fade_in, 0.4d), max(d - fade_out, 0.6d), d]` mapped to `[0, 1, 1, 0]`,
/// clamped outside `[0, d]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FadeEnvelope {
    /// Nominal fade-in length in seconds.
    pub fade_in_secs: f64,
    /// Nominal fade-out length in seconds.
    pub fade_out_secs: f64,
}

impl Default for FadeEnvelope {
    fn default() -> Self {
        Self::symmetric(1.0)
    }
}

impl FadeEnvelope {
    /// Same fade length on both ends.
    pub fn symmetric(fade_secs: f64) -> Self {
        Self {
            fade_in_secs: fade_secs,
            fade_out_secs: fade_secs,
        }
    }

    /// Reject negative or non-finite fade lengths.
    pub fn validate(&self) -> LyricueResult<()> {
        for (name, v) in [
            ("fade_in_secs", self.fade_in_secs),
            ("fade_out_secs", self.fade_out_secs),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(LyricueError::validation(format!(
                    "envelope {name} must be finite and >= 0, got {v}"
                )));
            }
        }
        Ok(())
    }

    /// Strictly increasing breakpoints for a line of `duration` seconds.
    ///
    /// Returns `None` when no strictly increasing sequence exists (non-positive or
    /// non-finite duration, or a duration too small to separate in `f64`).
    pub fn breakpoints(&self, duration: f64) -> Option<[f64; 4]> {
        if !duration.is_finite() || duration <= 0.0 {
            return None;
        }

        let fade_in_end = self.fade_in_secs.min(duration * MAX_FADE_IN_RATIO);
        let fade_out_start = (duration - self.fade_out_secs).max(duration * MIN_FADE_OUT_RATIO);
        let primary = [0.0, fade_in_end, fade_out_start, duration];
        if strictly_increasing(&primary) {
            return Some(primary);
        }

        // Zero-length fades or very short lines collapse breakpoints together.
        let fade_in_end = if fade_in_end > 0.0 {
            fade_in_end
        } else {
            duration * MAX_FADE_IN_RATIO
        };
        let eps = DEGENERATE_EPSILON.min(duration * (1.0 - MIN_FADE_OUT_RATIO));
        let fallback = [0.0, fade_in_end, duration - eps, duration];
        strictly_increasing(&fallback).then_some(fallback)
    }

    /// Envelope level at `elapsed` seconds into a line of `duration` seconds, in `[0, 1]`.
    pub fn try_sample(&self, elapsed: f64, duration: f64) -> LyricueResult<f64> {
        let bp = self.breakpoints(duration).ok_or_else(|| {
            LyricueError::interpolation(format!("no valid envelope for duration {duration}"))
        })?;
        interpolate(elapsed, &bp, &LEVELS, Extrapolate::Clamp)
    }

    /// Total variant of [`FadeEnvelope::try_sample`]: degenerate durations yield 0.
    pub fn sample(&self, elapsed: f64, duration: f64) -> f64 {
        self.try_sample(elapsed, duration).unwrap_or(0.0)
    }
}

fn strictly_increasing(v: &[f64]) -> bool {
    v.windows(2).all(|w| w[0] < w[1])
}

#[cfg(test)]
#[path = "../../tests/unit/animation/envelope.rs"]
mod tests;
