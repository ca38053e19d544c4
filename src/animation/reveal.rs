use crate::animation::ease::Ease;

/// Progress at which the outline is fully drawn.
pub const STROKE_END: f64 = 0.6;
/// Progress at which the fill starts fading in.
pub const FILL_START: f64 = 0.5;

/// Hand-drawn letter reveal split into outline and fill phases.
///
/// The outline is traced over `[0, 0.6]` of the progress; the fill fades in over
/// `[0.5, 1]`, so the two phases overlap slightly.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct GlyphReveal {
    /// Fraction of the outline drawn, `[0, 1]`.
    pub stroke: f64,
    /// Fill opacity, `[0, 1]`.
    pub fill: f64,
}

impl GlyphReveal {
    /// Fully drawn and filled.
    pub const DONE: Self = Self {
        stroke: 1.0,
        fill: 1.0,
    };

    /// Split a `[0, 1]` draw progress into outline and fill.
    pub fn at(progress: f64) -> Self {
        Self {
            stroke: Ease::Linear.ramp(progress, 0.0, STROKE_END),
            fill: Ease::Linear.ramp(progress, FILL_START, 1.0),
        }
    }
}
