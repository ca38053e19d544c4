//! Keyword-driven special-effect table.
//!
//! Each [`LyricConfigItem`] says: when the active lyric line contains `keyword` (and, if
//! `start_time` is set, the line starts within `window_secs` of it), draw `text` with the
//! given animation at the given placement instead of the plain lyric line.

use crate::{
    foundation::core::Rgba8,
    foundation::error::{LyricueError, LyricueResult},
    style::kind::{AnimationKind, BigOutline, FloatUp, Wave},
    timeline::lrc::LyricEntry,
};

/// Default tolerance between a line's start and an item's `start_time`.
pub const DEFAULT_MATCH_WINDOW_SECS: f64 = 5.0;

/// Where a special layer sits on the canvas.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Placement {
    /// Vertical center, percent of canvas height.
    pub top: f64,
    /// Horizontal center, percent of canvas width.
    pub left: f64,
    /// Uniform scale applied around the center.
    #[serde(default = "one")]
    pub scale: f64,
    /// Layer order; higher draws later.
    #[serde(default = "default_z")]
    pub z_index: i32,
    /// Stack glyphs top-to-bottom instead of left-to-right.
    #[serde(default)]
    pub vertical: bool,
}

fn one() -> f64 {
    1.0
}

fn default_z() -> i32 {
    10
}

impl Placement {
    /// Horizontal placement centered on `(left%, top%)`.
    pub const fn at(top: f64, left: f64, scale: f64, z_index: i32) -> Self {
        Self {
            top,
            left,
            scale,
            z_index,
            vertical: false,
        }
    }

    /// Same placement with vertical glyph stacking.
    pub const fn vertical(self) -> Self {
        Self {
            vertical: true,
            ..self
        }
    }

    fn validate(&self) -> LyricueResult<()> {
        for (name, v) in [("top", self.top), ("left", self.left)] {
            if !(0.0..=100.0).contains(&v) {
                return Err(LyricueError::validation(format!(
                    "placement {name} must be within [0, 100], got {v}"
                )));
            }
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(LyricueError::validation(format!(
                "placement scale must be > 0, got {}",
                self.scale
            )));
        }
        Ok(())
    }
}

/// One keyword-triggered special layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LyricConfigItem {
    /// Substring of the active line that triggers this item.
    pub keyword: String,
    /// Text to draw; defaults to `keyword`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Only match lines starting near this time (seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<f64>,
    /// Animation applied to the glyphs.
    pub animation: AnimationKind,
    /// Canvas placement.
    pub placement: Placement,
    /// Base font size before `placement.scale`; defaults per animation kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    /// Spacing between glyphs in pixels.
    #[serde(default = "default_gap")]
    pub gap_px: f64,
    /// Fill color override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgba8>,
    /// Outline color override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<Rgba8>,
    /// Outline width override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    /// Font family override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// Base opacity multiplier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Constant blur over the whole layer.
    #[serde(default)]
    pub blur_px: f64,
    /// Keep showing this item, fully drawn, while a later line contains one of these.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub linger_on: Vec<String>,
    /// Opacity multiplier while lingering.
    #[serde(default = "one")]
    pub linger_opacity: f64,
}

fn default_gap() -> f64 {
    10.0
}

impl LyricConfigItem {
    /// Minimal item: keyword, animation, placement; everything else defaulted.
    pub fn new(keyword: impl Into<String>, animation: AnimationKind, placement: Placement) -> Self {
        Self {
            keyword: keyword.into(),
            text: None,
            start_time: None,
            animation,
            placement,
            font_size: None,
            gap_px: default_gap(),
            color: None,
            stroke_color: None,
            stroke_width: None,
            font_family: None,
            opacity: None,
            blur_px: 0.0,
            linger_on: Vec::new(),
            linger_opacity: 1.0,
        }
    }

    /// Builder: draw different text than the keyword.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Builder: restrict to lines near `secs`.
    pub fn starting_at(mut self, secs: f64) -> Self {
        self.start_time = Some(secs);
        self
    }

    /// Builder: base font size.
    pub fn sized(mut self, px: f64) -> Self {
        self.font_size = Some(px);
        self
    }

    /// Builder: base opacity.
    pub fn faded(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Builder: outline width.
    pub fn stroked(mut self, width: f64) -> Self {
        self.stroke_width = Some(width);
        self
    }

    /// Builder: constant layer blur.
    pub fn blurred(mut self, px: f64) -> Self {
        self.blur_px = px;
        self
    }

    /// Builder: linger while `keyword` is on screen, at `opacity`.
    pub fn lingering(mut self, keyword: impl Into<String>, opacity: f64) -> Self {
        self.linger_on.push(keyword.into());
        self.linger_opacity = opacity;
        self
    }

    /// Text actually drawn.
    pub fn display_text(&self) -> &str {
        self.text.as_deref().unwrap_or(&self.keyword)
    }

    /// Effective font size.
    pub fn effective_font_size(&self) -> f64 {
        self.font_size
            .unwrap_or_else(|| self.animation.default_font_size())
    }

    /// Check field ranges.
    pub fn validate(&self) -> LyricueResult<()> {
        let ctx = |e: LyricueError| match e {
            LyricueError::Validation(msg) => {
                LyricueError::validation(format!("special '{}': {msg}", self.keyword))
            }
            other => other,
        };

        if self.keyword.trim().is_empty() {
            return Err(LyricueError::validation("special keyword must not be empty"));
        }
        if self.display_text().trim().is_empty() {
            return Err(ctx(LyricueError::validation("text must not be empty")));
        }
        if let Some(t) = self.start_time
            && (!t.is_finite() || t < 0.0)
        {
            return Err(ctx(LyricueError::validation(format!(
                "start_time must be finite and >= 0, got {t}"
            ))));
        }
        self.placement.validate().map_err(ctx)?;
        self.animation.validate().map_err(ctx)?;

        let non_negative = [
            ("font_size", self.font_size),
            ("stroke_width", self.stroke_width),
            ("gap_px", Some(self.gap_px)),
            ("blur_px", Some(self.blur_px)),
        ];
        for (name, v) in non_negative {
            if let Some(v) = v
                && (!v.is_finite() || v < 0.0)
            {
                return Err(ctx(LyricueError::validation(format!(
                    "{name} must be finite and >= 0, got {v}"
                ))));
            }
        }
        for (name, v) in [
            ("opacity", self.opacity),
            ("linger_opacity", Some(self.linger_opacity)),
        ] {
            if let Some(v) = v
                && !(0.0..=1.0).contains(&v)
            {
                return Err(ctx(LyricueError::validation(format!(
                    "{name} must be within [0, 1], got {v}"
                ))));
            }
        }
        Ok(())
    }
}

/// Why an item is on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchRole {
    /// The active line triggers the item; it animates and replaces the plain line.
    Primary,
    /// A `linger_on` keyword keeps a previous item visible in its settled state.
    Linger,
}

/// An item selected for the active line.
#[derive(Clone, Copy, Debug)]
pub struct SpecialMatch<'a> {
    /// Index of the item in its table.
    pub index: usize,
    /// The matched item.
    pub item: &'a LyricConfigItem,
    /// Match role.
    pub role: MatchRole,
}

/// Ordered keyword table; the single source of truth for special rendering.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SpecialTable {
    /// Items in declaration order.
    pub items: Vec<LyricConfigItem>,
    /// Allowed `|line start - start_time|`, exclusive.
    pub window_secs: f64,
}

impl Default for SpecialTable {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            window_secs: DEFAULT_MATCH_WINDOW_SECS,
        }
    }
}

impl SpecialTable {
    /// Table from items with the default match window.
    pub fn new(items: Vec<LyricConfigItem>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    /// The stock table: "空" outline, "なんて" float-up, waving "…なくていい" lines.
    pub fn builtin() -> Self {
        let sky = Placement::at(30.0, 50.0, 2.5, 0);
        let nante = Placement::at(60.0, 50.0, 1.5, 10);
        let wake = Placement::at(85.0, 50.0, 1.0, 10);
        Self::new(vec![
            LyricConfigItem::new("空", AnimationKind::BigOutline(BigOutline::default()), sky)
                .starting_at(83.0)
                .faded(0.5),
            LyricConfigItem::new("なんて", AnimationKind::FloatUp(FloatUp::default()), nante)
                .starting_at(83.0),
            LyricConfigItem::new("分けなくていい", AnimationKind::Wave(Wave::default()), wake)
                .starting_at(84.0),
            LyricConfigItem::new("奪えなくていい", AnimationKind::Wave(Wave::default()), wake)
                .starting_at(154.0),
        ])
    }

    /// Whether the table has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Validate every item and the window.
    pub fn validate(&self) -> LyricueResult<()> {
        if !self.window_secs.is_finite() || self.window_secs <= 0.0 {
            return Err(LyricueError::validation(format!(
                "special window_secs must be > 0, got {}",
                self.window_secs
            )));
        }
        self.items.iter().try_for_each(LyricConfigItem::validate)
    }

    /// Items to draw for `entry`, in table order.
    ///
    /// Primary matches need the keyword in the line and, when `start_time` is set, a line
    /// start strictly within `window_secs` of it. Linger matches ignore `start_time`.
    pub fn matches<'a>(&'a self, entry: &LyricEntry) -> Vec<SpecialMatch<'a>> {
        self.items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| {
                let role = if self.is_primary(item, entry) {
                    MatchRole::Primary
                } else if item.linger_on.iter().any(|k| entry.text.contains(k.as_str())) {
                    MatchRole::Linger
                } else {
                    return None;
                };
                Some(SpecialMatch { index, item, role })
            })
            .collect()
    }

    fn is_primary(&self, item: &LyricConfigItem, entry: &LyricEntry) -> bool {
        if !entry.text.contains(item.keyword.as_str()) {
            return false;
        }
        match item.start_time {
            Some(t) => (entry.time - t).abs() < self.window_secs,
            None => true,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/config.rs"]
mod tests;
