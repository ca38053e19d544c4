use super::*;
use crate::{
    foundation::core::{FrameIndex, Point, Vec2},
    scene::compose::{LayerSource, Stroke},
};

fn glyph(ch: char) -> GlyphDraw {
    GlyphDraw {
        ch,
        center: Point::new(-10.0, 0.0),
        rotation_deg: 0.0,
        opacity: 1.0,
        blur_px: 0.0,
        stroke_reveal: 1.0,
        fill_opacity: 1.0,
    }
}

fn layer(glyphs: Vec<GlyphDraw>) -> Layer {
    Layer {
        source: LayerSource::Normal,
        z: 1,
        anchor: Point::new(960.0, 864.0),
        scale: 1.0,
        offset: Vec2::ZERO,
        opacity: 0.5,
        blur_px: 0.0,
        font_size: 50.0,
        font_family: None,
        fill: Rgba8::PAPER,
        stroke: None,
        glyphs,
    }
}

fn scene(layers: Vec<Layer>) -> FrameScene {
    FrameScene {
        layers,
        ..FrameScene::empty(FrameIndex(0), 0.0)
    }
}

#[test]
fn empty_scene_is_a_bare_document() {
    let svg = scene_to_svg(&scene(Vec::new()), Canvas::default(), "serif");
    assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="1920" height="1080""#));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert!(!svg.contains("<text"));
    assert!(!svg.contains("<defs>"));
}

#[test]
fn text_is_escaped() {
    let s = scene(vec![layer(vec![glyph('<'), glyph('&')])]);
    let svg = scene_to_svg(&s, Canvas::default(), "serif");
    assert!(svg.contains(">&lt;</text>"));
    assert!(svg.contains(">&amp;</text>"));
    assert_eq!(xml_escape(r#"a"b'c"#), "a&quot;b&apos;c");
}

#[test]
fn layer_transform_and_opacity() {
    let s = scene(vec![layer(vec![glyph('空')])]);
    let svg = scene_to_svg(&s, Canvas::default(), "Noto Serif JP");
    assert!(svg.contains(r#"transform="translate(960 864) scale(1) translate(0 0)" opacity="0.5""#));
    assert!(svg.contains("font-family=\"&apos;Noto Serif JP&apos;, serif\""));
    assert!(svg.contains(r##"fill="#fffdf8" fill-opacity="1""##));
    assert!(svg.contains(">空</text>"));
}

#[test]
fn partial_stroke_uses_dash_offset() {
    let mut l = layer(vec![GlyphDraw {
        stroke_reveal: 0.25,
        fill_opacity: 0.0,
        ..glyph('A')
    }]);
    l.fill = Rgba8::TRANSPARENT;
    l.stroke = Some(Stroke {
        color: Rgba8::PAPER,
        width: 2.0,
    });
    let svg = scene_to_svg(&scene(vec![l]), Canvas::default(), "serif");
    // 50px * 8em = 400, three quarters hidden.
    assert!(svg.contains(r#"stroke-dasharray="400 400" stroke-dashoffset="300""#), "{svg}");
    assert!(svg.contains(r#"fill="none""#));
}

#[test]
fn invisible_glyphs_are_skipped() {
    let hidden = GlyphDraw {
        opacity: 0.0,
        ..glyph('a')
    };
    let unfilled = GlyphDraw {
        fill_opacity: 0.0,
        ..glyph('b')
    };
    let svg = scene_to_svg(
        &scene(vec![layer(vec![hidden, unfilled, glyph('c')])]),
        Canvas::default(),
        "serif",
    );
    assert_eq!(svg.matches("<text").count(), 1);
}

#[test]
fn blur_filters_are_deduplicated() {
    let mut l = layer(vec![
        GlyphDraw {
            blur_px: 7.5,
            ..glyph('a')
        },
        GlyphDraw {
            blur_px: 7.5,
            ..glyph('b')
        },
    ]);
    l.blur_px = 8.0;
    let svg = scene_to_svg(&scene(vec![l]), Canvas::default(), "serif");
    assert_eq!(svg.matches("<filter ").count(), 2);
    assert!(svg.contains(r#"<feGaussianBlur stdDeviation="7.5"/>"#));
    assert_eq!(svg.matches(r#"filter="url(#blur-750)""#).count(), 2);
    assert_eq!(svg.matches(r#"filter="url(#blur-800)""#).count(), 1);
}

#[test]
fn backdrop_and_background_rects() {
    let mut s = scene(Vec::new());
    s.backdrop_opacity = 0.25;
    let svg = scene_to_svg_with(
        &s,
        Canvas::default(),
        &SvgOptions {
            family: "serif",
            background: Some(Rgba8::rgb(0x10, 0x20, 0x30)),
        },
    );
    let bg = svg.find(r##"fill="#102030""##).unwrap();
    let dark = svg.find(r##"fill="#000000" fill-opacity="0.25""##).unwrap();
    assert!(bg < dark);
}

#[test]
fn numbers_are_compact() {
    assert_eq!(num(1.0), "1");
    assert_eq!(num(0.125), "0.125");
    assert_eq!(num(-0.0001), "0");
    assert_eq!(num(f64::NAN), "0");
    assert_eq!(num(1651.2), "1651.2");
}
