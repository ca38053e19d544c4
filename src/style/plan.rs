//! Named visual presets.
//!
//! A plan bundles the plain-line style, the fade envelope and a keyword table. Plans differ
//! only in data; composition treats them all alike.

use std::{fmt, str::FromStr};

use crate::{
    animation::{envelope::FadeEnvelope, sway::Sway},
    foundation::core::Rgba8,
    foundation::error::{LyricueError, LyricueResult},
    style::{
        config::{LyricConfigItem, Placement, SpecialTable},
        kind::{AnimationKind, BigOutline, FloatUp, Gather, InkBleed, Reveal, Wave},
    },
};

/// Line that triggers the "空" / "なんて" specials.
pub const SORA: &str = "空なんて";
/// Line that keeps the sky visible and gets its own special.
pub const UBAE: &str = "奪えなくていい";
/// Companion line waving alongside "なんて".
pub const WAKE: &str = "分けなくていい";

/// Preset identifier, `a` through `i`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanId {
    /// Vertical plain lyrics, no specials.
    A,
    /// Blurred giant sky with ink-bleed answer.
    B,
    /// Converging sky with rising answer.
    C,
    /// Colossal outline backdrop.
    D,
    /// Outline sky with blur-in words.
    E,
    /// Floating outline with vertical hand-drawn words.
    F,
    /// Giant outline with floating words.
    G,
    /// Placed outline, float and wave layers.
    H,
    /// Keyword table driven.
    #[default]
    I,
}

impl PlanId {
    /// Every plan, in order.
    pub const ALL: [Self; 9] = [
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
        Self::H,
        Self::I,
    ];

    /// Lower-case letter.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "a",
            Self::B => "b",
            Self::C => "c",
            Self::D => "d",
            Self::E => "e",
            Self::F => "f",
            Self::G => "g",
            Self::H => "h",
            Self::I => "i",
        }
    }

    /// Build the preset for this plan.
    pub fn preset(self) -> PlanPreset {
        match self {
            Self::A => plan_a(),
            Self::B => plan_b(),
            Self::C => plan_c(),
            Self::D => plan_d(),
            Self::E => plan_e(),
            Self::F => plan_f(),
            Self::G => plan_g(),
            Self::H => plan_h(),
            Self::I => plan_i(),
        }
    }
}

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanId {
    type Err = LyricueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| LyricueError::validation(format!("unknown plan '{s}' (expected a..i)")))
    }
}

/// Anchor for the plain lyric line.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TextLayout {
    /// Centered horizontally, glyph row centered on `top_pct`.
    Horizontal {
        /// Vertical center, percent of canvas height.
        top_pct: f64,
    },
    /// One glyph per row, column centered on `(left_pct, top_pct)`.
    Vertical {
        /// Column center, percent of canvas width.
        left_pct: f64,
        /// Column center, percent of canvas height.
        top_pct: f64,
    },
}

/// Style of the plain (non-special) lyric line.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct NormalTextStyle {
    /// Anchor.
    pub layout: TextLayout,
    /// Font size in pixels.
    pub font_size: f64,
    /// Fill color.
    pub color: Rgba8,
    /// Extra spacing between glyphs, in em.
    pub letter_spacing_em: f64,
    /// Upward slide during the first `slide_secs` of a line.
    pub slide_px: f64,
    /// Slide duration.
    pub slide_secs: f64,
    /// Font family override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
}

impl Default for NormalTextStyle {
    fn default() -> Self {
        Self {
            layout: TextLayout::Horizontal { top_pct: 80.0 },
            font_size: 50.0,
            color: Rgba8::PAPER,
            letter_spacing_em: 0.0,
            slide_px: 0.0,
            slide_secs: 1.0,
            font_family: None,
        }
    }
}

impl NormalTextStyle {
    fn bottom(font_size: f64) -> Self {
        Self {
            font_size,
            ..Self::default()
        }
    }

    fn vertical(font_size: f64) -> Self {
        Self {
            layout: TextLayout::Vertical {
                left_pct: 86.0,
                top_pct: 50.0,
            },
            font_size,
            letter_spacing_em: 0.2,
            slide_px: 10.0,
            ..Self::default()
        }
    }

    /// Check ranges.
    pub fn validate(&self) -> LyricueResult<()> {
        let pcts = match self.layout {
            TextLayout::Horizontal { top_pct } => vec![("top_pct", top_pct)],
            TextLayout::Vertical { left_pct, top_pct } => {
                vec![("left_pct", left_pct), ("top_pct", top_pct)]
            }
        };
        for (name, v) in pcts {
            if !(0.0..=100.0).contains(&v) {
                return Err(LyricueError::validation(format!(
                    "normal text {name} must be within [0, 100], got {v}"
                )));
            }
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(LyricueError::validation(format!(
                "normal text font_size must be > 0, got {}",
                self.font_size
            )));
        }
        for (name, v) in [
            ("letter_spacing_em", self.letter_spacing_em),
            ("slide_px", self.slide_px),
            ("slide_secs", self.slide_secs),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(LyricueError::validation(format!(
                    "normal text {name} must be finite and >= 0, got {v}"
                )));
            }
        }
        Ok(())
    }
}

/// Everything composition needs besides the timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlanPreset {
    /// Plain line style.
    pub normal: NormalTextStyle,
    /// Line fade curve.
    pub envelope: FadeEnvelope,
    /// Keyword-triggered layers.
    pub specials: SpecialTable,
    /// Backdrop dimming (peak opacity of a black overlay) while a primary special is shown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub darken_on_special: Option<f64>,
}

impl Default for PlanPreset {
    fn default() -> Self {
        PlanId::default().preset()
    }
}

impl PlanPreset {
    /// Validate style, envelope and table.
    pub fn validate(&self) -> LyricueResult<()> {
        self.normal.validate()?;
        self.envelope.validate()?;
        self.specials.validate()?;
        if let Some(d) = self.darken_on_special
            && !(0.0..=1.0).contains(&d)
        {
            return Err(LyricueError::validation(format!(
                "darken_on_special must be within [0, 1], got {d}"
            )));
        }
        Ok(())
    }
}

fn preset(normal: NormalTextStyle, items: Vec<LyricConfigItem>) -> PlanPreset {
    PlanPreset {
        normal,
        envelope: FadeEnvelope::default(),
        specials: SpecialTable::new(items),
        darken_on_special: None,
    }
}

fn center(scale: f64, z_index: i32) -> Placement {
    Placement::at(50.0, 50.0, scale, z_index)
}

fn plan_a() -> PlanPreset {
    let mut normal = NormalTextStyle::vertical(42.0);
    normal.color = Rgba8 {
        a: 242,
        ..Rgba8::rgb(255, 255, 255)
    };
    preset(normal, Vec::new())
}

fn plan_b() -> PlanPreset {
    let sky = LyricConfigItem::new(
        SORA,
        AnimationKind::Reveal(Reveal {
            delay_secs: 0.0,
            stagger_secs: 0.0,
            reveal_secs: 4.0,
        }),
        center(9.0, 0),
    )
    .with_text("空")
    .sized(50.0)
    .stroked(1.0)
    .blurred(8.0)
    .lingering(UBAE, 0.3);
    let answer = LyricConfigItem::new(
        UBAE,
        AnimationKind::InkBleed(InkBleed::default()),
        Placement::at(72.0, 8.0, 1.0, 10).vertical(),
    )
    .sized(48.0);
    PlanPreset {
        darken_on_special: Some(0.3),
        ..preset(NormalTextStyle::vertical(50.0), vec![sky, answer])
    }
}

fn plan_c() -> PlanPreset {
    let sky = LyricConfigItem::new(SORA, AnimationKind::Gather(Gather::default()), center(9.0, 0))
        .with_text("空")
        .sized(50.0)
        .stroked(1.0)
        .lingering(UBAE, 0.3);
    let answer = LyricConfigItem::new(
        UBAE,
        AnimationKind::FloatUp(FloatUp {
            delay_secs: 0.0,
            stagger_secs: 0.1,
            ..FloatUp::default()
        }),
        Placement::at(72.0, 8.0, 1.0, 10).vertical(),
    )
    .sized(48.0);
    preset(NormalTextStyle::vertical(50.0), vec![sky, answer])
}

fn plan_d() -> PlanPreset {
    let instant = AnimationKind::BigOutline(BigOutline {
        reveal_secs: 0.0,
        sway: None,
    });
    let sky = LyricConfigItem::new(SORA, instant, center(25.0, 0))
        .with_text("空")
        .sized(100.0)
        .stroked(0.5)
        .faded(0.3)
        .lingering(UBAE, 1.0);
    let nante = LyricConfigItem::new(
        SORA,
        AnimationKind::Reveal(Reveal {
            delay_secs: 0.5,
            ..Reveal::default()
        }),
        center(1.0, 10),
    )
    .with_text("なんて")
    .sized(80.0);
    let mut answer =
        LyricConfigItem::new(UBAE, AnimationKind::Reveal(Reveal::default()), center(1.0, 10));
    answer.gap_px = 5.0;
    preset(NormalTextStyle::bottom(60.0), vec![sky, nante, answer])
}

fn plan_e() -> PlanPreset {
    let sky = LyricConfigItem::new(
        SORA,
        AnimationKind::BigOutline(BigOutline {
            reveal_secs: 2.0 / 0.6,
            sway: None,
        }),
        Placement::at(45.0, 50.0, 2.0, 0),
    )
    .with_text("空")
    .sized(120.0)
    .stroked(1.5);
    let nante = LyricConfigItem::new(
        SORA,
        AnimationKind::InkBleed(InkBleed {
            delay_secs: 1.5,
            stagger_secs: 0.2,
            settle_secs: 1.0,
            blur_px: 10.0,
        }),
        Placement::at(60.0, 50.0, 1.0, 10),
    )
    .with_text("なんて")
    .sized(80.0);
    let answer = LyricConfigItem::new(
        UBAE,
        AnimationKind::InkBleed(InkBleed::default()),
        center(1.0, 10),
    );
    PlanPreset {
        envelope: FadeEnvelope::symmetric(0.5),
        ..preset(NormalTextStyle::bottom(55.0), vec![sky, nante, answer])
    }
}

fn plan_f() -> PlanPreset {
    let sky = LyricConfigItem::new(
        SORA,
        AnimationKind::BigOutline(BigOutline {
            reveal_secs: 2.0,
            sway: Some(Sway::new(20.0, 30.0)),
        }),
        Placement::at(30.0, 50.0, 1.0, 0),
    )
    .with_text("空")
    .sized(200.0)
    .stroked(0.8);
    let nante = LyricConfigItem::new(
        SORA,
        AnimationKind::Reveal(Reveal {
            delay_secs: 1.0,
            stagger_secs: 0.2,
            reveal_secs: 1.0,
        }),
        Placement::at(60.0, 70.0, 1.0, 10).vertical(),
    )
    .with_text("なんて")
    .sized(70.0);
    let answer = LyricConfigItem::new(
        UBAE,
        AnimationKind::Reveal(Reveal::default()),
        Placement::at(50.0, 30.0, 1.0, 10).vertical(),
    );
    PlanPreset {
        envelope: FadeEnvelope::symmetric(0.5),
        ..preset(NormalTextStyle::vertical(50.0), vec![sky, nante, answer])
    }
}

fn plan_g() -> PlanPreset {
    let sky = LyricConfigItem::new(
        SORA,
        AnimationKind::BigOutline(BigOutline {
            sway: None,
            ..BigOutline::default()
        }),
        center(1.0, 0),
    )
    .with_text("空")
    .sized(600.0)
    .faded(0.5)
    .lingering(UBAE, 1.0);
    let nante = LyricConfigItem::new(SORA, AnimationKind::FloatUp(FloatUp::default()), center(1.0, 10))
        .with_text("なんて");
    let answer = LyricConfigItem::new(
        UBAE,
        AnimationKind::Reveal(Reveal::default()),
        Placement::at(60.0, 50.0, 1.0, 10),
    )
    .sized(70.0);
    preset(NormalTextStyle::bottom(50.0), vec![sky, nante, answer])
}

fn plan_h() -> PlanPreset {
    let builtin = SpecialTable::builtin();
    let placement_of = |i: usize| builtin.items[i].placement;
    let sky = LyricConfigItem::new(
        SORA,
        AnimationKind::BigOutline(BigOutline::default()),
        placement_of(0),
    )
    .with_text("空")
    .faded(0.5)
    .lingering(WAKE, 1.0)
    .lingering(UBAE, 1.0);
    let nante = LyricConfigItem::new(SORA, AnimationKind::FloatUp(FloatUp::default()), placement_of(1))
        .with_text("なんて");
    let wake = LyricConfigItem::new(WAKE, AnimationKind::Wave(Wave::default()), placement_of(2));
    let answer = LyricConfigItem::new(UBAE, AnimationKind::Wave(Wave::default()), placement_of(3));
    preset(NormalTextStyle::bottom(50.0), vec![sky, nante, wake, answer])
}

fn plan_i() -> PlanPreset {
    PlanPreset {
        specials: SpecialTable::builtin(),
        ..preset(NormalTextStyle::bottom(50.0), Vec::new())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/plan.rs"]
mod tests;
