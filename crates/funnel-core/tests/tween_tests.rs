use funnel_core::tween::{step, Easing, Tween};
use glam::Vec3;

#[test]
fn easings_hit_endpoints() {
    for easing in [Easing::Linear, Easing::EaseOutQuad, Easing::EaseInOutCubic] {
        assert_eq!(easing.apply(0.0), 0.0);
        assert_eq!(easing.apply(1.0), 1.0);
        // out-of-range progress is clamped
        assert_eq!(easing.apply(-1.0), 0.0);
        assert_eq!(easing.apply(2.0), 1.0);
    }
    assert!((Easing::EaseInOutCubic.apply(0.5) - 0.5).abs() < 1e-6);
}

#[test]
fn easings_are_monotonic() {
    for easing in [Easing::Linear, Easing::EaseOutQuad, Easing::EaseInOutCubic] {
        let mut prev = 0.0;
        for i in 1..=100 {
            let v = easing.apply(i as f32 / 100.0);
            assert!(v >= prev, "{easing:?} at {i}");
            prev = v;
        }
    }
}

#[test]
fn tween_reaches_end_and_stops() {
    let mut t = Tween::new(Vec3::ZERO, Vec3::new(2.0, 4.0, 6.0), 1.0, Easing::Linear);
    let half = t.advance(0.5);
    assert!((half - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-5);
    assert!(!t.is_finished());
    t.advance(10.0);
    assert!(t.is_finished());
    assert_eq!(t.progress(), 1.0);
    assert!((t.value() - t.end()).length() < 1e-5);
}

#[test]
fn zero_duration_is_immediate() {
    let t = Tween::new(1.0_f32, 3.0, 0.0, Easing::EaseInOutCubic);
    assert_eq!(t.value(), 3.0);
    assert!(t.is_finished());
}

#[test]
fn step_clears_finished_slot() {
    let mut slot = Some(Tween::new(0.0_f32, 1.0, 0.2, Easing::EaseOutQuad));
    assert!(step(&mut slot, 0.1).is_some());
    assert!(slot.is_some());
    assert!(step(&mut slot, 0.1).is_some());
    assert!(slot.is_none());
    assert_eq!(step(&mut slot, 0.1), None);
}
