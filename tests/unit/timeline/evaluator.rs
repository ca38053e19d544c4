use super::*;
use crate::timeline::lrc::LyricEntry;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn hello_world() -> Timeline {
    Timeline::parse("[00:01.50]Hello\n[00:03.00]World")
}

fn active(r: EvaluationResult) -> ActiveEntry {
    match r {
        EvaluationResult::Active(a) => a,
        EvaluationResult::Inactive => panic!("expected an active entry"),
    }
}

#[test]
fn start_of_first_entry() {
    let a = active(evaluate(&hello_world(), 1.5));
    assert_eq!(a.index, 0);
    assert_eq!(a.elapsed, 0.0);
    assert!(approx(a.duration, 1.5));
    assert_eq!(a.progress, 0.0);
}

#[test]
fn still_first_entry_just_before_next() {
    let a = active(evaluate(&hello_world(), 2.9));
    assert_eq!(a.index, 0);
    assert!(approx(a.elapsed, 1.4));
}

#[test]
fn last_entry_uses_hold_window() {
    let a = active(evaluate(&hello_world(), 3.0));
    assert_eq!(a.index, 1);
    assert_eq!(a.duration, LAST_ENTRY_HOLD_SECS);
    assert_eq!(a.elapsed, 0.0);
}

#[test]
fn last_entry_stays_active_forever() {
    let a = active(evaluate(&hello_world(), 10_000.0));
    assert_eq!(a.index, 1);
    assert_eq!(a.progress, 0.0);
}

#[test]
fn before_first_entry_is_inactive() {
    assert_eq!(evaluate(&hello_world(), 0.5), EvaluationResult::Inactive);
    assert_eq!(evaluate(&hello_world(), -3.0), EvaluationResult::Inactive);
    assert_eq!(evaluate(&hello_world(), f64::NAN), EvaluationResult::Inactive);
}

#[test]
fn empty_timeline_is_inactive() {
    let t = Timeline::default();
    assert_eq!(evaluate(&t, 0.0), EvaluationResult::Inactive);
    assert_eq!(evaluate(&t, 100.0).active_index(), None);
}

#[test]
fn half_open_intervals_cover_every_entry() {
    let t = Timeline::parse("[00:01.00]a\n[00:02.00]b\n[00:04.00]c\n[00:07.50]d");
    let starts: Vec<f64> = t.entries().iter().map(|e| e.time).collect();
    for (i, w) in starts.windows(2).enumerate() {
        let (lo, hi) = (w[0], w[1]);
        for k in 0..20 {
            let q = lo + (hi - lo) * f64::from(k) / 20.0;
            assert_eq!(evaluate(&t, q).active_index(), Some(i), "q={q}");
        }
        assert_eq!(evaluate(&t, hi).active_index(), Some(i + 1));
    }
}

#[test]
fn duplicate_times_select_the_last_of_the_run() {
    let t = Timeline::from_entries(vec![
        LyricEntry {
            time: 1.0,
            text: "first".to_string(),
        },
        LyricEntry {
            time: 1.0,
            text: "second".to_string(),
        },
        LyricEntry {
            time: 3.0,
            text: "third".to_string(),
        },
    ]);
    let a = active(evaluate(&t, 1.0));
    assert_eq!(a.index, 1);
    assert!(approx(a.duration, 2.0));
}

#[test]
fn progress_follows_envelope() {
    let t = Timeline::parse("[00:00.00]a\n[00:04.00]b");
    assert!(approx(active(evaluate(&t, 0.5)).progress, 0.5));
    assert!(approx(active(evaluate(&t, 2.0)).progress, 1.0));
    assert!(approx(active(evaluate(&t, 3.5)).progress, 0.5));
}

#[test]
fn very_short_lines_stay_bounded() {
    let t = Timeline::from_entries(vec![
        LyricEntry {
            time: 1.0,
            text: "a".to_string(),
        },
        LyricEntry {
            time: 1.000_001,
            text: "b".to_string(),
        },
    ]);
    let a = active(evaluate(&t, 1.000_000_5));
    assert_eq!(a.index, 0);
    assert!((0.0..=1.0).contains(&a.progress));
}

#[test]
fn custom_hold_and_envelope() {
    let ev = TimelineEvaluator {
        envelope: FadeEnvelope::symmetric(0.5),
        last_entry_hold_secs: 2.0,
    };
    let a = active(ev.evaluate(&hello_world(), 3.25));
    assert_eq!(a.duration, 2.0);
    assert!(approx(a.progress, 0.5));
}

#[test]
fn cursor_matches_stateless_evaluation() {
    let t = Timeline::parse("[00:01.00]a\n[00:01.00]a2\n[00:02.00]b\n[00:04.00]c\n[00:07.50]d");
    let ev = TimelineEvaluator::default();
    let mut cursor = TimelineCursor::new(ev);

    // Forward frame walk, then a seek backwards, then jumps.
    let mut queries: Vec<f64> = (0..300).map(|f| f64::from(f) / 30.0).collect();
    queries.extend([0.2, 5.0, 1.0, 9.0, 1.99, f64::NAN, 2.0, -1.0, 7.5]);

    for q in queries {
        assert_eq!(cursor.evaluate(&t, q), ev.evaluate(&t, q), "q={q}");
    }

    cursor.reset();
    assert_eq!(cursor.evaluate(&t, 4.5), ev.evaluate(&t, 4.5));
}

#[test]
fn result_serializes_with_state_tag() {
    let json = serde_json::to_value(evaluate(&hello_world(), 1.5)).unwrap();
    assert_eq!(json["state"], "active");
    assert_eq!(json["index"], 0);
    let json = serde_json::to_value(evaluate(&hello_world(), 0.0)).unwrap();
    assert_eq!(json["state"], "inactive");
}
