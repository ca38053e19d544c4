use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn long_line_uses_fixed_fades() {
    let env = FadeEnvelope::default();
    assert_eq!(env.breakpoints(4.0), Some([0.0, 1.0, 3.0, 4.0]));
    assert!(approx(env.sample(0.5, 4.0), 0.5));
    assert!(approx(env.sample(2.0, 4.0), 1.0));
    assert!(approx(env.sample(3.5, 4.0), 0.5));
}

#[test]
fn short_line_caps_fades_by_ratio() {
    let env = FadeEnvelope::default();
    let bp = env.breakpoints(1.5).unwrap();
    assert!(approx(bp[1], 0.6));
    assert!(approx(bp[2], 0.9));
    assert_eq!(bp[3], 1.5);
}

#[test]
fn clamps_outside_duration() {
    let env = FadeEnvelope::default();
    assert_eq!(env.sample(-1.0, 4.0), 0.0);
    assert_eq!(env.sample(10.0, 4.0), 0.0);
    assert_eq!(env.sample(0.0, 4.0), 0.0);
    assert_eq!(env.sample(4.0, 4.0), 0.0);
}

#[test]
fn zero_fade_out_falls_back_to_strict_sequence() {
    let env = FadeEnvelope {
        fade_in_secs: 1.0,
        fade_out_secs: 0.0,
    };
    let bp = env.breakpoints(5.0).unwrap();
    assert!(bp.windows(2).all(|w| w[0] < w[1]));
    assert!(approx(bp[2], 5.0 - DEGENERATE_EPSILON));
}

#[test]
fn zero_fade_in_falls_back_to_strict_sequence() {
    let env = FadeEnvelope::symmetric(0.0);
    let bp = env.breakpoints(2.0).unwrap();
    assert!(bp.windows(2).all(|w| w[0] < w[1]));
    assert!(approx(bp[1], 0.8));
}

#[test]
fn tiny_durations_stay_strictly_increasing() {
    let env = FadeEnvelope::default();
    for d in [1e-3, 1e-6, 0.004, 0.02] {
        let bp = env.breakpoints(d).unwrap();
        assert!(bp.windows(2).all(|w| w[0] < w[1]), "{d}: {bp:?}");
    }
}

#[test]
fn degenerate_durations_have_no_breakpoints() {
    let env = FadeEnvelope::default();
    assert_eq!(env.breakpoints(0.0), None);
    assert_eq!(env.breakpoints(-1.0), None);
    assert_eq!(env.breakpoints(f64::INFINITY), None);
    assert!(env.try_sample(0.0, 0.0).is_err());
    assert_eq!(env.sample(0.0, 0.0), 0.0);
}

#[test]
fn bounded_and_continuous_over_duration() {
    let env = FadeEnvelope::default();
    let d = 3.3;
    let mut prev = env.sample(0.0, d);
    let steps = 3300;
    for i in 1..=steps {
        let t = d * f64::from(i) / f64::from(steps);
        let v = env.sample(t, d);
        assert!((0.0..=1.0).contains(&v));
        assert!((v - prev).abs() < 0.01, "jump at {t}");
        prev = v;
    }
}

#[test]
fn validate_rejects_negative_fades() {
    assert!(FadeEnvelope::symmetric(-0.5).validate().is_err());
    assert!(FadeEnvelope::symmetric(f64::NAN).validate().is_err());
    assert!(FadeEnvelope::default().validate().is_ok());
}
