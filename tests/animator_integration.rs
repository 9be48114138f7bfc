//! Animator state machine driven through its public API.

mod common;

use neo_impact::animator::{AnimatorEvent, AnimatorPhase, AnimatorSettings, PositionAnimator};
use neo_impact::body::BodySource;

fn animator_with(names: &[&str]) -> PositionAnimator {
    let mut animator = PositionAnimator::new(AnimatorSettings::default());
    for (k, name) in names.iter().enumerate() {
        animator
            .add_body(common::seed(name, 1.0 + k as f64 * 0.5, 0.1, 5.0))
            .unwrap();
    }
    animator
}

#[test]
fn test_full_impact_cycle_fires_once() {
    let mut animator = animator_with(&["A", "B"]);
    let id = animator.find_by_name("A").unwrap().id;
    assert!(animator.begin_simulation(id));

    let mut completions = 0;
    for _ in 0..common::TICKS_TO_IMPACT + 50 {
        completions += animator
            .tick()
            .iter()
            .filter(|e| matches!(e, AnimatorEvent::ImpactCompleted { .. }))
            .count();
    }
    assert_eq!(completions, 1);

    let body = animator.body(id).unwrap();
    let impact = body.impact.unwrap();
    assert!(impact.done);
    assert_eq!(impact.progress, 1.0);
    assert!(body.position.unwrap().length() < 1e-9);
    assert_eq!(animator.phase(), AnimatorPhase::Orbit);
}

#[test]
fn test_second_request_is_ignored_while_simulated() {
    let mut animator = animator_with(&["A", "B"]);
    let a = animator.find_by_name("A").unwrap().id;
    let b = animator.find_by_name("B").unwrap().id;

    assert!(animator.begin_simulation(a));
    let phase = animator.phase();
    assert!(!animator.begin_simulation(b));
    assert_eq!(animator.active(), Some(a));
    assert_eq!(animator.phase(), phase);
    assert!(animator.body(b).unwrap().impact.is_none());
}

#[test]
fn test_reset_allows_another_simulation() {
    let mut animator = animator_with(&["A", "B"]);
    let a = animator.find_by_name("A").unwrap().id;
    let b = animator.find_by_name("B").unwrap().id;

    animator.begin_simulation(a);
    for _ in 0..common::TICKS_TO_IMPACT {
        animator.tick();
    }
    assert!(animator.is_simulated());
    assert!(!animator.begin_simulation(b));

    assert!(animator.reset());
    assert!(animator.body(a).unwrap().impact.is_none());
    assert!(animator.begin_simulation(b));
}

#[test]
fn test_feed_reload_keeps_manual_bodies() {
    let mut animator = animator_with(&["A", "B"]);
    let mut manual = common::seed("Manual-0001", 1.2, 0.0, 0.0);
    manual.source = BodySource::Manual;
    let manual_id = animator.add_body(manual).unwrap();

    let ids = animator
        .replace_source(BodySource::Feed, vec![common::seed("C", 2.0, 0.3, 1.0)])
        .unwrap();
    assert_eq!(ids.len(), 1);
    assert_eq!(animator.len(), 2);
    assert!(animator.body(manual_id).is_some());
    assert!(animator.find_by_name("A").is_none());
}

#[test]
fn test_pause_stops_every_body() {
    let mut animator = animator_with(&["A", "B"]);
    animator.tick();
    let before: Vec<_> = animator.bodies().iter().map(|b| b.position).collect();
    assert!(animator.pause());
    for _ in 0..10 {
        animator.tick();
    }
    let after: Vec<_> = animator.bodies().iter().map(|b| b.position).collect();
    assert_eq!(before, after);
    assert!(animator.resume());
}
