//! Scene to SVG overlay serialization.
//!
//! Each layer becomes a transformed group, each glyph a centered `<text>` element. The
//! outline reveal is a dash pattern over an estimated outline length, since SVG text has no
//! `pathLength`.

use std::collections::BTreeMap;

use crate::{
    foundation::core::{Canvas, Rgba8},
    scene::compose::{FrameScene, GlyphDraw, Layer},
};

/// Estimated outline length of one glyph, in em.
pub const OUTLINE_LENGTH_EM: f64 = 8.0;

/// Document-level SVG settings.
#[derive(Clone, Copy, Debug)]
pub struct SvgOptions<'a> {
    /// Primary font family; a generic serif is always appended as fallback.
    pub family: &'a str,
    /// Solid fill behind everything; `None` keeps the overlay transparent.
    pub background: Option<Rgba8>,
}

/// Serialize with a transparent background.
pub fn scene_to_svg(scene: &FrameScene, canvas: Canvas, family: &str) -> String {
    scene_to_svg_with(
        scene,
        canvas,
        &SvgOptions {
            family,
            background: None,
        },
    )
}

/// Serialize `scene` into a standalone SVG document of the canvas size.
pub fn scene_to_svg_with(scene: &FrameScene, canvas: Canvas, opts: &SvgOptions<'_>) -> String {
    let (w, h) = (canvas.width, canvas.height);
    let mut out = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );
    out.push('\n');

    let filters = collect_blurs(scene);
    if !filters.is_empty() {
        out.push_str("<defs>\n");
        for (key, id) in &filters {
            out.push_str(&format!(
                r#"<filter id="{id}" x="-50%" y="-50%" width="200%" height="200%"><feGaussianBlur stdDeviation="{}"/></filter>"#,
                num(*key as f64 / 100.0)
            ));
            out.push('\n');
        }
        out.push_str("</defs>\n");
    }

    if let Some(bg) = opts.background.filter(|c| !c.is_transparent()) {
        out.push_str(&rect(canvas, bg, 1.0));
    }
    if scene.backdrop_opacity > 0.0 {
        out.push_str(&rect(canvas, Rgba8::BLACK, scene.backdrop_opacity));
    }

    let family_attr = font_family_attr(opts.family);
    for layer in &scene.layers {
        write_layer(&mut out, layer, &family_attr, &filters);
    }

    out.push_str("</svg>\n");
    out
}

fn rect(canvas: Canvas, color: Rgba8, opacity: f64) -> String {
    format!(
        "<rect x=\"0\" y=\"0\" width=\"{}\" height=\"{}\" fill=\"{}\" fill-opacity=\"{}\"/>\n",
        canvas.width,
        canvas.height,
        color.hex_rgb(),
        num(color.alpha_f64() * opacity)
    )
}

fn write_layer(out: &mut String, layer: &Layer, default_family: &str, filters: &BTreeMap<i64, String>) {
    if layer.opacity <= 0.0 || layer.glyphs.is_empty() {
        return;
    }

    let family = layer
        .font_family
        .as_deref()
        .map(font_family_attr)
        .unwrap_or_else(|| default_family.to_string());
    out.push_str(&format!(
        r#"<g transform="translate({} {}) scale({}) translate({} {})" opacity="{}"{}>"#,
        num(layer.anchor.x),
        num(layer.anchor.y),
        num(layer.scale),
        num(layer.offset.x),
        num(layer.offset.y),
        num(layer.opacity.min(1.0)),
        filter_attr(layer.blur_px, filters),
    ));
    out.push('\n');
    out.push_str(&format!(
        r#"<g font-family="{}" font-size="{}" text-anchor="middle" dominant-baseline="central">"#,
        xml_escape(&family),
        num(layer.font_size)
    ));
    out.push('\n');

    for glyph in &layer.glyphs {
        write_glyph(out, layer, glyph, filters);
    }

    out.push_str("</g>\n</g>\n");
}

fn write_glyph(out: &mut String, layer: &Layer, glyph: &GlyphDraw, filters: &BTreeMap<i64, String>) {
    let fill_alpha = layer.fill.alpha_f64() * glyph.fill_opacity;
    let stroke = layer
        .stroke
        .filter(|s| s.width > 0.0 && !s.color.is_transparent() && glyph.stroke_reveal > 0.0);
    if glyph.opacity <= 0.0 || (fill_alpha <= 0.0 && stroke.is_none()) {
        return;
    }

    let mut paint = if fill_alpha > 0.0 {
        format!(
            r#" fill="{}" fill-opacity="{}""#,
            layer.fill.hex_rgb(),
            num(fill_alpha)
        )
    } else {
        r#" fill="none""#.to_string()
    };
    if let Some(s) = stroke {
        paint.push_str(&format!(
            r#" stroke="{}" stroke-opacity="{}" stroke-width="{}""#,
            s.color.hex_rgb(),
            num(s.color.alpha_f64()),
            num(s.width)
        ));
        if glyph.stroke_reveal < 1.0 {
            let len = layer.font_size * OUTLINE_LENGTH_EM;
            paint.push_str(&format!(
                r#" stroke-dasharray="{} {}" stroke-dashoffset="{}""#,
                num(len),
                num(len),
                num(len * (1.0 - glyph.stroke_reveal))
            ));
        }
    }

    let rotate = if glyph.rotation_deg != 0.0 {
        format!(" rotate({})", num(glyph.rotation_deg))
    } else {
        String::new()
    };
    let mut ch = [0u8; 4];
    out.push_str(&format!(
        r#"<g transform="translate({} {}){rotate}" opacity="{}"{}><text x="0" y="0"{paint}>{}</text></g>"#,
        num(glyph.center.x),
        num(glyph.center.y),
        num(glyph.opacity.min(1.0)),
        filter_attr(glyph.blur_px, filters),
        xml_escape(glyph.ch.encode_utf8(&mut ch)),
    ));
    out.push('\n');
}

fn blur_key(px: f64) -> Option<i64> {
    (px.is_finite() && px > 0.0).then(|| (px * 100.0).round() as i64).filter(|k| *k > 0)
}

fn collect_blurs(scene: &FrameScene) -> BTreeMap<i64, String> {
    let mut keys = BTreeMap::new();
    let all = scene
        .layers
        .iter()
        .flat_map(|l| std::iter::once(l.blur_px).chain(l.glyphs.iter().map(|g| g.blur_px)));
    for px in all {
        if let Some(k) = blur_key(px) {
            keys.entry(k).or_insert_with(|| format!("blur-{k}"));
        }
    }
    keys
}

fn filter_attr(px: f64, filters: &BTreeMap<i64, String>) -> String {
    blur_key(px)
        .and_then(|k| filters.get(&k))
        .map(|id| format!(r#" filter="url(#{id})""#))
        .unwrap_or_default()
}

fn font_family_attr(family: &str) -> String {
    if family == crate::assets::font::FALLBACK_FAMILY {
        family.to_string()
    } else {
        format!("'{}', serif", family.replace('\'', ""))
    }
}

/// Escape text for XML content and attribute values.
pub fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Compact decimal: at most three fractional digits, no trailing zeros.
fn num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
