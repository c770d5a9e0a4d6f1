// Host-side tests for staggered activation.

use artifact_core::constants::front_cluster_delays;
use artifact_core::{activation_schedule, Choreographer, Ring, RingConfig, RingPhase};
use glam::Vec3;
use std::time::Duration;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn cluster() -> Vec<Ring> {
    front_cluster_delays()
        .into_iter()
        .enumerate()
        .map(|(i, d)| Ring::new(i, RingConfig::new(Vec3::X * i as f32, 0.4).with_delay(d)))
        .collect()
}

#[test]
fn schedule_is_offset_by_toggle_time() {
    let delays = front_cluster_delays();
    assert_eq!(
        activation_schedule(&delays, ms(1000)),
        vec![ms(1000), ms(1300), ms(1300), ms(1600), ms(1600)]
    );
    assert!(activation_schedule(&[], ms(5)).is_empty());
}

#[test]
fn repeated_toggle_is_a_noop() {
    let mut c = Choreographer::new();
    let mut rings = cluster();
    assert!(c.on_global_toggle(true, ms(0), &mut rings));
    assert!(!c.on_global_toggle(true, ms(100), &mut rings));
    assert_eq!(c.pending_count(), 5);
    assert_eq!(c.fires_at(4), Some(ms(600)));
    assert!(!Choreographer::new().on_global_toggle(false, ms(0), &mut rings));
}

#[test]
fn deactivation_cancels_every_timer() {
    let mut c = Choreographer::new();
    let mut rings = cluster();
    c.on_global_toggle(true, ms(0), &mut rings);
    c.poll(ms(0), &mut rings);
    c.on_global_toggle(false, ms(150), &mut rings);
    assert_eq!(c.pending_count(), 0);
    assert!(rings.iter().all(|r| r.phase() == RingPhase::Dormant));
    assert!(c.poll(ms(10_000), &mut rings).is_empty());
    assert!(rings.iter().all(|r| r.phase() == RingPhase::Dormant));
}

#[test]
fn rapid_toggle_keeps_one_timer_per_ring() {
    let mut c = Choreographer::new();
    let mut rings = cluster();
    c.on_global_toggle(true, ms(0), &mut rings);
    c.on_global_toggle(false, ms(50), &mut rings);
    c.on_global_toggle(true, ms(100), &mut rings);
    assert_eq!(c.pending_count(), 5);
    assert_eq!(c.fires_at(1), Some(ms(400)));

    // the first episode's 300 ms instant passes without effect
    assert!(c.poll(ms(300), &mut rings).as_slice() == [0]);
    assert!(matches!(rings[1].phase(), RingPhase::Pending { .. }));
    assert_eq!(c.poll(ms(400), &mut rings).as_slice(), &[1, 2]);
}

#[test]
fn poll_fires_in_time_then_id_order() {
    let mut c = Choreographer::new();
    let mut rings = cluster();
    c.on_global_toggle(true, ms(0), &mut rings);
    assert_eq!(c.poll(ms(10_000), &mut rings).as_slice(), &[0, 1, 2, 3, 4]);
    assert_eq!(c.pending_count(), 0);
    assert!(rings.iter().all(|r| r.is_glowing()));
}

#[test]
fn reactivation_replays_same_stagger() {
    let mut c = Choreographer::new();
    let mut rings = cluster();
    c.on_global_toggle(true, ms(0), &mut rings);
    let first: Vec<_> = (0..5).map(|i| c.fires_at(i)).collect();
    c.poll(ms(1000), &mut rings);
    c.on_global_toggle(false, ms(2000), &mut rings);
    c.on_global_toggle(true, ms(5000), &mut rings);
    let second: Vec<_> = (0..5)
        .map(|i| c.fires_at(i).map(|t| t - ms(5000)))
        .collect();
    assert_eq!(first, second);
    assert_eq!(c.toggled_at(), Some(ms(5000)));
}
