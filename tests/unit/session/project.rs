use super::*;
use crate::timeline::lrc::RepeatTags;

#[test]
fn minimal_project_uses_defaults() {
    let p = Project::from_json_str(r#"{"lyrics": "song.lrc"}"#).unwrap();
    assert_eq!(p.fps, Fps { num: 30, den: 1 });
    assert_eq!(p.canvas, Canvas::default());
    assert_eq!(p.plan, PlanId::I);
    assert_eq!(p.last_entry_hold_secs, 5.0);
    assert_eq!(p.parse.repeat_tags, RepeatTags::FirstTag);
    assert_eq!(p, Project::new("song.lrc"));
}

#[test]
fn overrides_apply_to_preset_and_evaluator() {
    let p = Project::from_json_str(
        r##"{
            "lyrics": "song.lrc",
            "plan": "d",
            "envelope": {"fade_in_secs": 0.25, "fade_out_secs": 2},
            "last_entry_hold_secs": 3,
            "specials": {"items": [], "window_secs": 2},
            "background": "#000000",
            "parse": {"repeat_tags": "expand"}
        }"##,
    )
    .unwrap();
    let preset = p.preset();
    assert!(preset.specials.is_empty());
    assert_eq!(preset.specials.window_secs, 2.0);
    assert_eq!(preset.normal, PlanId::D.preset().normal);

    let ev = p.evaluator();
    assert_eq!(ev.envelope.fade_in_secs, 0.25);
    assert_eq!(ev.last_entry_hold_secs, 3.0);
    assert_eq!(p.background, Some(Rgba8::BLACK));
    assert_eq!(p.parse.repeat_tags, RepeatTags::Expand);
}

#[test]
fn invalid_projects_are_rejected() {
    let cases = [
        r#"{"lyrics": "a.lrc", "fps": {"num": 30, "den": 0}}"#,
        r#"{"lyrics": "a.lrc", "canvas": {"width": 0, "height": 10}}"#,
        r#"{"lyrics": ""}"#,
        r#"{"lyrics": "a.lrc", "last_entry_hold_secs": 0}"#,
        r#"{"lyrics": "a.lrc", "duration_frames": 0}"#,
        r#"{"lyrics": "a.lrc", "envelope": {"fade_in_secs": -1}}"#,
        r#"{"lyrics": "a.lrc", "specials": {"items": [{"keyword": "x",
            "animation": {"type": "WAVE"}, "placement": {"top": 50, "left": 50, "scale": 0}}]}}"#,
    ];
    for json in cases {
        let err = Project::from_json_str(json).unwrap_err();
        assert!(matches!(err, LyricueError::Validation(_)), "{json}: {err}");
    }
}

#[test]
fn malformed_json_is_a_serde_error() {
    assert!(matches!(
        Project::from_json_str("{"),
        Err(LyricueError::Serde(_))
    ));
    assert!(matches!(
        Project::from_json_str(r#"{"lyrics": "a.lrc", "plan": "q"}"#),
        Err(LyricueError::Serde(_))
    ));
    assert!(matches!(
        Project::from_json_str(r#"{"lyrics": "a.lrc", "colour": "red"}"#),
        Err(LyricueError::Serde(_))
    ));
}

#[test]
fn from_path_reports_missing_file() {
    let missing = std::env::temp_dir().join("lyricue-no-such-project.json");
    let err = Project::from_path(&missing).unwrap_err();
    assert!(err.to_string().contains("lyricue-no-such-project.json"), "{err}");
}
