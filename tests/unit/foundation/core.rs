use super::*;

#[test]
fn frame_range_contains_boundaries() {
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert!(!r.contains(FrameIndex(1)));
    assert!(r.contains(FrameIndex(2)));
    assert!(r.contains(FrameIndex(4)));
    assert!(!r.contains(FrameIndex(5)));
    assert_eq!(r.iter().count() as u64, r.len_frames());
}

#[test]
fn frame_range_rejects_inverted() {
    assert!(FrameRange::new(FrameIndex(5), FrameIndex(2)).is_err());
}

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}

#[test]
fn fps_frame_clock() {
    let fps = Fps::new(30, 1).unwrap();
    assert_eq!(fps.frame_to_secs(FrameIndex(45)), 1.5);
    assert_eq!(fps.secs_to_frames_floor(1.5), 45);
    assert_eq!(fps.secs_to_frames_floor(-2.0), 0);

    let ntsc = Fps::new(30000, 1001).unwrap();
    let secs = ntsc.frame_to_secs(FrameIndex(123));
    assert_eq!(ntsc.secs_to_frames_floor(secs + 1e-9), 123);
}

#[test]
fn canvas_percent_point() {
    let c = Canvas::default();
    let p = c.percent_point(50.0, 80.0);
    assert_eq!(p, Point::new(960.0, 864.0));
    assert!(Canvas { width: 0, height: 4 }.validate().is_err());
}

#[test]
fn color_parse_and_serialize() {
    assert_eq!(Rgba8::parse("#FFFDF8").unwrap(), Rgba8::PAPER);
    assert_eq!(Rgba8::parse("transparent").unwrap(), Rgba8::TRANSPARENT);
    let c = Rgba8::parse("#00000080").unwrap();
    assert_eq!(c.a, 0x80);
    assert_eq!(String::from(c), "#00000080");
    assert_eq!(String::from(Rgba8::PAPER), "#fffdf8");

    assert!(Rgba8::parse("FFFDF8").is_err());
    assert!(Rgba8::parse("#FFF").is_err());
    assert!(Rgba8::parse("#GGGGGG").is_err());
}

#[test]
fn color_deserializes_from_json_string() {
    let c: Rgba8 = serde_json::from_str("\"#ff0000\"").unwrap();
    assert_eq!(c, Rgba8::rgb(255, 0, 0));
    assert!(serde_json::from_str::<Rgba8>("\"red\"").is_err());
}
