// Host-side tests for the spring interpolator.

use approx::assert_abs_diff_eq;
use artifact_core::{tick, Spring, SpringConfig};
use glam::Vec2;
use std::time::Duration;

const FRAME: Duration = Duration::from_micros(16_667);

fn run(spring: &mut Spring<f32>, frames: usize) {
    for _ in 0..frames {
        spring.advance(FRAME);
    }
}

#[test]
fn converges_and_snaps_onto_target() {
    let mut s = Spring::new(0.0_f32, SpringConfig::DEFAULT);
    s.retarget(1.0);
    assert!(!s.is_at_rest());
    run(&mut s, 180);
    assert!(s.is_at_rest());
    assert_eq!(s.value, 1.0);
    assert_eq!(s.velocity, 0.0);
}

#[test]
fn overdamped_glow_never_overshoots() {
    let mut s = Spring::new(0.0_f32, SpringConfig::GLOW);
    s.retarget(2.0);
    let mut prev = s.value;
    for _ in 0..240 {
        let v = s.advance(FRAME);
        assert!(v <= 2.0 + 1e-5, "overshot: {v}");
        assert!(v >= prev - 1e-6, "not monotone: {prev} -> {v}");
        prev = v;
    }
    assert_abs_diff_eq!(s.value, 2.0, epsilon = 1e-3);
}

#[test]
fn entrance_preset_overshoots() {
    let mut s = Spring::new(0.0_f32, SpringConfig::ENTRANCE);
    s.retarget(1.0);
    let mut peak = 0.0_f32;
    for _ in 0..60 {
        peak = peak.max(s.advance(FRAME));
    }
    assert!(peak > 1.05, "peak {peak}");
}

#[test]
fn retarget_preserves_value_and_velocity() {
    let mut s = Spring::new(0.0_f32, SpringConfig::ENTRANCE);
    s.retarget(1.0);
    run(&mut s, 5);
    let (value, velocity) = (s.value, s.velocity);
    assert!(velocity.abs() > 0.0);

    s.retarget(-1.0);
    assert_eq!(s.value, value);
    assert_eq!(s.velocity, velocity);
    assert_eq!(tick(s, Duration::ZERO).value, value);
}

#[test]
fn retarget_mid_flight_has_no_jump() {
    let mut s = Spring::new(0.0_f32, SpringConfig::DEFAULT);
    s.retarget(1.0);
    run(&mut s, 6);
    let before = s.value;
    let v0 = s.velocity.abs();
    s.retarget(0.0);
    let after = s.advance(FRAME);
    let dt = FRAME.as_secs_f32();
    // at most one frame of motion: |v0|·dt plus the acceleration term
    let bound = v0 * dt + 0.5 * 170.0 * 1.0 * dt * dt + 1e-4;
    assert!((after - before).abs() <= bound, "jump {} > {}", (after - before).abs(), bound);
}

#[test]
fn long_stall_is_clamped() {
    let mut s = Spring::new(0.0_f32, SpringConfig::ENTRANCE);
    s.retarget(1.0);
    let clamped = tick(s, Duration::from_millis(250));
    let stalled = tick(s, Duration::from_secs(10));
    assert_eq!(clamped, stalled);
    assert!(stalled.value.is_finite());
}

#[test]
fn vector_spring_settles_both_axes() {
    let mut s = Spring::new(Vec2::ZERO, SpringConfig::ENTRANCE);
    s.retarget(Vec2::new(0.08, 0.05));
    for _ in 0..180 {
        s.advance(FRAME);
    }
    assert!(s.is_at_rest());
    assert_eq!(s.value, Vec2::new(0.08, 0.05));
}

#[test]
fn snap_stops_immediately() {
    let mut s = Spring::new(0.0_f32, SpringConfig::GENTLE);
    s.retarget(3.0);
    run(&mut s, 3);
    s.snap(-1.0);
    assert!(s.is_at_rest());
    assert_eq!(s.advance(FRAME), -1.0);
}

#[test]
fn channels_are_independent() {
    let mut a = Spring::new(0.0_f32, SpringConfig::STIFF);
    let mut b = Spring::new(0.0_f32, SpringConfig::STIFF);
    a.retarget(1.0);
    for _ in 0..10 {
        a.advance(FRAME);
        b.advance(FRAME);
    }
    assert!(a.value > 0.0);
    assert_eq!(b.value, 0.0);
}
