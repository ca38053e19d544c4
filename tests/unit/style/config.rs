use super::*;
use crate::style::kind::Reveal;

fn line(time: f64, text: &str) -> LyricEntry {
    LyricEntry {
        time,
        text: text.to_string(),
    }
}

fn roles(table: &SpecialTable, entry: &LyricEntry) -> Vec<(usize, MatchRole)> {
    table
        .matches(entry)
        .into_iter()
        .map(|m| (m.index, m.role))
        .collect()
}

#[test]
fn keyword_and_window_must_both_hold() {
    let table = SpecialTable::builtin();
    assert_eq!(
        roles(&table, &line(83.5, "空なんて")),
        vec![(0, MatchRole::Primary), (1, MatchRole::Primary)]
    );
    // Keyword present but too far from start_time.
    assert!(table.matches(&line(20.0, "空なんて")).is_empty());
    // In window but no keyword.
    assert!(table.matches(&line(83.5, "青い海")).is_empty());
}

#[test]
fn window_is_exclusive() {
    let table = SpecialTable::new(vec![
        LyricConfigItem::new("a", AnimationKind::FadeInOut, Placement::at(50.0, 50.0, 1.0, 0))
            .starting_at(10.0),
    ]);
    assert_eq!(table.matches(&line(14.999, "a")).len(), 1);
    assert!(table.matches(&line(15.0, "a")).is_empty());
    assert!(table.matches(&line(5.0, "a")).is_empty());
}

#[test]
fn items_without_start_time_match_anywhere() {
    let table = SpecialTable::new(vec![LyricConfigItem::new(
        "夜",
        AnimationKind::FadeInOut,
        Placement::at(50.0, 50.0, 1.0, 0),
    )]);
    assert_eq!(table.matches(&line(0.0, "夜が明ける")).len(), 1);
    assert_eq!(table.matches(&line(999.0, "夜")).len(), 1);
}

#[test]
fn linger_ignores_start_time() {
    let table = SpecialTable::new(vec![
        LyricConfigItem::new("空", AnimationKind::FadeInOut, Placement::at(30.0, 50.0, 2.0, 0))
            .starting_at(83.0)
            .lingering("奪えなくていい", 0.3),
    ]);
    assert_eq!(
        roles(&table, &line(154.0, "奪えなくていい")),
        vec![(0, MatchRole::Linger)]
    );
    // Primary wins over linger when both apply.
    assert_eq!(
        roles(&table, &line(83.0, "空 奪えなくていい")),
        vec![(0, MatchRole::Primary)]
    );
}

#[test]
fn builtin_table_is_valid_and_ordered() {
    let table = SpecialTable::builtin();
    table.validate().unwrap();
    let keywords: Vec<&str> = table.items.iter().map(|i| i.keyword.as_str()).collect();
    assert_eq!(keywords, ["空", "なんて", "分けなくていい", "奪えなくていい"]);
    assert_eq!(table.items[0].placement.z_index, 0);
    assert_eq!(table.items[0].effective_font_size(), 240.0);
    assert_eq!(table.window_secs, DEFAULT_MATCH_WINDOW_SECS);
}

#[test]
fn display_text_defaults_to_keyword() {
    let p = Placement::at(50.0, 50.0, 1.0, 0);
    let item = LyricConfigItem::new("空", AnimationKind::FadeInOut, p);
    assert_eq!(item.display_text(), "空");
    assert_eq!(item.with_text("そら").display_text(), "そら");
}

#[test]
fn validate_reports_offending_item() {
    let bad = LyricConfigItem::new(
        "空",
        AnimationKind::Reveal(Reveal::default()),
        Placement::at(150.0, 50.0, 1.0, 0),
    );
    let msg = SpecialTable::new(vec![bad]).validate().unwrap_err().to_string();
    assert!(msg.contains("special '空'"), "{msg}");
    assert!(msg.contains("top"), "{msg}");

    let p = Placement::at(50.0, 50.0, 1.0, 0);
    assert!(
        LyricConfigItem::new("a", AnimationKind::FadeInOut, p)
            .faded(1.5)
            .validate()
            .is_err()
    );
    assert!(
        LyricConfigItem::new("", AnimationKind::FadeInOut, p)
            .validate()
            .is_err()
    );
    let zero_window = SpecialTable {
        window_secs: 0.0,
        ..SpecialTable::default()
    };
    assert!(zero_window.validate().is_err());
}

#[test]
fn deserializes_with_defaults() {
    let json = r##"{
        "items": [{
            "keyword": "空",
            "start_time": 83,
            "animation": {"type": "BIG_OUTLINE"},
            "placement": {"top": 30, "left": 50},
            "color": "#112233"
        }]
    }"##;
    let table: SpecialTable = serde_json::from_str(json).unwrap();
    assert_eq!(table.window_secs, 5.0);
    let item = &table.items[0];
    assert_eq!(item.placement.scale, 1.0);
    assert_eq!(item.placement.z_index, 10);
    assert!(!item.placement.vertical);
    assert_eq!(item.gap_px, 10.0);
    assert_eq!(item.linger_opacity, 1.0);
    assert_eq!(item.color, Some(Rgba8::rgb(0x11, 0x22, 0x33)));
    assert!(item.animation.is_outline());
}
