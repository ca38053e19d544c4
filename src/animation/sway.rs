use crate::foundation::core::FrameIndex;

/// Frame-driven sinusoidal motion: `amp * sin(frame / divisor + phase)`.
///
/// Driven by the frame number rather than line-local time so that the motion stays
/// continuous across lyric changes.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Sway {
    /// Peak displacement (pixels or degrees, depending on the consumer).
    pub amp: f64,
    /// Frames per radian; larger is slower.
    pub divisor: f64,
    /// Phase offset in radians.
    #[serde(default)]
    pub phase: f64,
}

impl Sway {
    /// Build a sway with zero phase.
    pub const fn new(amp: f64, divisor: f64) -> Self {
        Self {
            amp,
            divisor,
            phase: 0.0,
        }
    }

    /// Same sway shifted by `extra` radians.
    pub fn with_phase(self, extra: f64) -> Self {
        Self {
            phase: self.phase + extra,
            ..self
        }
    }

    fn angle(self, frame: FrameIndex) -> f64 {
        if self.divisor == 0.0 {
            return self.phase;
        }
        frame.0 as f64 / self.divisor + self.phase
    }

    /// Sine displacement at `frame`.
    pub fn sin(self, frame: FrameIndex) -> f64 {
        self.angle(frame).sin() * self.amp
    }

    /// Cosine displacement at `frame`.
    pub fn cos(self, frame: FrameIndex) -> f64 {
        self.angle(frame).cos() * self.amp
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/sway.rs"]
mod tests;
