use super::*;

const ALL: [Ease; 7] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::InCubic,
    Ease::OutCubic,
    Ease::InOutCubic,
];

#[test]
fn endpoints_are_stable() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b);
        assert!(b < c);
    }
}

#[test]
fn out_quad_matches_float_up_curve() {
    let t: f64 = 0.3;
    assert!((Ease::OutQuad.apply(t) - t * (2.0 - t)).abs() < 1e-12);
}

#[test]
fn ramp_clamps_outside_window() {
    assert_eq!(Ease::Linear.ramp(-1.0, 0.0, 2.0), 0.0);
    assert_eq!(Ease::Linear.ramp(1.0, 0.0, 2.0), 0.5);
    assert_eq!(Ease::Linear.ramp(5.0, 0.0, 2.0), 1.0);
    assert_eq!(Ease::Linear.ramp(f64::INFINITY, 0.0, 2.0), 1.0);
    assert_eq!(Ease::Linear.ramp(f64::NAN, 0.0, 2.0), 0.0);
}

#[test]
fn ramp_zero_length_window_is_a_step() {
    assert_eq!(Ease::Linear.ramp(0.99, 1.0, 1.0), 0.0);
    assert_eq!(Ease::Linear.ramp(1.0, 1.0, 1.0), 1.0);
}

#[test]
fn ease_serializes_snake_case() {
    assert_eq!(serde_json::to_string(&Ease::OutCubic).unwrap(), "\"out_cubic\"");
}
