use super::*;
use crate::foundation::core::{Canvas, Fps, Rgba8};

fn session_with(mutate: impl FnOnce(&mut Project)) -> LyricSession {
    let mut project = Project::new("unused.lrc");
    project.fps = Fps { num: 10, den: 1 };
    project.canvas = Canvas {
        width: 64,
        height: 36,
    };
    mutate(&mut project);
    let timeline = Timeline::parse("[00:01.00]a\n[00:02.00]b");
    LyricSession::from_parts(project, timeline, FontHandle::system()).unwrap()
}

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("lyricue-{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn evaluates_on_the_frame_clock() {
    let s = session_with(|_| {});
    assert_eq!(s.evaluate(FrameIndex(5)), EvaluationResult::Inactive);
    assert_eq!(s.evaluate(FrameIndex(10)).active_index(), Some(0));
    assert_eq!(s.evaluate(FrameIndex(20)).active_index(), Some(1));
    assert_eq!(s.time_of(FrameIndex(15)), 1.5);

    let mut cursor = s.cursor();
    for f in 0..80 {
        let frame = FrameIndex(f);
        assert_eq!(
            cursor.evaluate(s.timeline(), s.time_of(frame)),
            s.evaluate(frame)
        );
    }
}

#[test]
fn default_range_covers_last_hold() {
    let s = session_with(|_| {});
    // 2.0 s + 5.0 s hold at 10 fps, inclusive of the end frame.
    assert_eq!(s.default_range().len_frames(), 71);

    let fixed = session_with(|p| p.duration_frames = Some(12));
    assert_eq!(fixed.default_range().end, FrameIndex(12));
}

#[test]
fn default_range_saturates_on_huge_hold() {
    let s = session_with(|p| p.last_entry_hold_secs = 1e30);
    assert!(s.project().validate().is_ok());
    let range = s.default_range();
    assert_eq!(range.end, FrameIndex(u64::MAX));
    assert!(!range.is_empty());
}

#[test]
fn background_is_painted_into_svg() {
    let s = session_with(|p| p.background = Some(Rgba8::rgb(1, 2, 3)));
    let svg = s.render_svg(FrameIndex(0));
    assert!(svg.contains(r##"fill="#010203""##));
    assert!(svg.contains(r#"width="64" height="36""#));
}

#[test]
fn render_frame_has_canvas_size() {
    let s = session_with(|p| p.background = Some(Rgba8::BLACK));
    let frame = s.render_frame(FrameIndex(0)).unwrap();
    assert_eq!((frame.width, frame.height), (64, 36));
    assert_eq!(frame.pixel(0, 0), Some([0, 0, 0, 255]));
}

#[test]
fn identical_frames_are_elided() {
    let s = session_with(|_| {});
    let dir = temp_dir("elide");
    let range = FrameRange::new(FrameIndex(0), FrameIndex(6)).unwrap();

    let stats = s
        .render_range_to_dir(range, &dir, &RenderThreading::default())
        .unwrap();
    assert_eq!(
        stats,
        RenderStats {
            frames_total: 6,
            frames_rendered: 1,
            frames_elided: 5,
        }
    );
    for f in range.iter() {
        assert!(LyricSession::frame_path(&dir, f).is_file(), "{f:?}");
    }
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn parallel_render_without_elision() {
    let s = session_with(|_| {});
    let dir = temp_dir("parallel");
    let range = FrameRange::new(FrameIndex(8), FrameIndex(14)).unwrap();
    let threading = RenderThreading {
        parallel: true,
        threads: Some(2),
        static_frame_elision: false,
    };
    let stats = s.render_range_to_dir(range, &dir, &threading).unwrap();
    assert_eq!(stats.frames_rendered, 6);
    assert_eq!(stats.frames_elided, 0);
    assert!(LyricSession::frame_path(&dir, FrameIndex(13)).is_file());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn bad_threading_and_empty_range_are_rejected() {
    let s = session_with(|_| {});
    let dir = temp_dir("reject");
    let empty = FrameRange::new(FrameIndex(3), FrameIndex(3)).unwrap();
    assert!(
        s.render_range_to_dir(empty, &dir, &RenderThreading::default())
            .is_err()
    );

    let range = FrameRange::new(FrameIndex(0), FrameIndex(1)).unwrap();
    let zero_threads = RenderThreading {
        parallel: true,
        threads: Some(0),
        static_frame_elision: true,
    };
    assert!(s.render_range_to_dir(range, &dir, &zero_threads).is_err());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn frame_paths_are_zero_padded() {
    let p = LyricSession::frame_path(Path::new("out"), FrameIndex(42));
    assert_eq!(p, Path::new("out").join("frame_000042.png"));
}
