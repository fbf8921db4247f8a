#![allow(clippy::float_cmp)]

use super::*;
use crate::consts::{METEOR_CAP, SPARKLE_COUNT};
use crate::frame_loop::ManualScheduler;
use crate::meteor::Meteor;
use crate::storage::MemoryStore;

// =============================================================
// Helpers
// =============================================================

type TestEngine = Engine<ManualScheduler, MemoryStore>;

fn engine_with(store: MemoryStore) -> TestEngine {
    let mut engine = Engine::new(EngineCore::with_seed(7), ManualScheduler::new(), store);
    engine.resize(Viewport::new(1200.0, 800.0, 1.0));
    engine
}

fn engine() -> TestEngine {
    engine_with(MemoryStore::new())
}

/// Fire the pending frame the way the browser would. Returns whether it painted.
fn fire(engine: &mut TestEngine) -> bool {
    if engine.scheduler_mut().fire().is_none() {
        return false;
    }
    engine.on_frame()
}

fn still_meteor() -> Meteor {
    Meteor { x: 100.0, y: 100.0, vx: 5.0, vy: 5.0, length: 200.0, age: 0.0, max_age: 30.0, width: 1.5 }
}

// =============================================================
// Startup
// =============================================================

#[test]
fn fresh_environment_starts_dark_with_light_mode_label() {
    let mut engine = engine();
    assert_eq!(engine.theme(), Theme::Dark);
    let label = engine.set_theme(engine.theme(), false);
    assert_eq!(label.text, "Light Mode");
    assert!(engine.is_running());
}

#[test]
fn stored_light_starts_light_with_dark_mode_label() {
    let mut engine = engine_with(MemoryStore::with_value("light"));
    assert_eq!(engine.theme(), Theme::Light);
    let label = engine.set_theme(engine.theme(), false);
    assert_eq!(label.text, "Dark Mode");
}

#[test]
fn stored_garbage_starts_dark() {
    let engine = engine_with(MemoryStore::with_value("sepia"));
    assert_eq!(engine.theme(), Theme::Dark);
}

#[test]
fn new_engine_is_stopped() {
    let engine = engine();
    assert!(!engine.is_running());
    assert!(!engine.scheduler().has_pending());
}

#[test]
fn initial_apply_does_not_persist() {
    let mut engine = engine();
    engine.set_theme(engine.theme(), false);
    assert_eq!(engine.store().writes(), 0);
    assert_eq!(engine.store().load(), None);
}

// =============================================================
// Theme
// =============================================================

#[test]
fn toggle_persists_and_flips() {
    let mut engine = engine();
    let label = engine.toggle();
    assert_eq!(engine.theme(), Theme::Light);
    assert_eq!(label.text, "Dark Mode");
    assert_eq!(engine.store().load().as_deref(), Some("light"));
}

#[test]
fn toggle_twice_is_an_involution() {
    let mut engine = engine_with(MemoryStore::with_value("dark"));
    let before = engine.store().load();
    engine.toggle();
    engine.toggle();
    assert_eq!(engine.theme(), Theme::Dark);
    assert_eq!(engine.store().load(), before);
    assert_eq!(engine.store().writes(), 2);
}

#[test]
fn set_theme_starts_the_loop_in_both_themes() {
    for theme in [Theme::Dark, Theme::Light] {
        let mut engine = engine();
        engine.set_theme(theme, true);
        assert!(engine.is_running());
        assert!(engine.scheduler().has_pending());
    }
}

#[test]
fn toggle_while_running_does_not_double_schedule() {
    let mut engine = engine();
    engine.start();
    engine.toggle();
    engine.toggle();
    assert_eq!(engine.scheduler().requests(), 1);
}

// =============================================================
// Loop
// =============================================================

#[test]
fn start_and_stop_are_idempotent() {
    let mut engine = engine();
    assert!(engine.start());
    assert!(!engine.start());
    assert!(engine.stop());
    assert!(!engine.stop());
    assert_eq!(engine.scheduler().requests(), 1);
    assert_eq!(engine.scheduler().cancels(), 1);
}

#[test]
fn frames_keep_coming_while_running() {
    let mut engine = engine();
    engine.start();
    for _ in 0..30 {
        assert!(fire(&mut engine));
    }
    assert!(engine.scheduler().has_pending());
}

#[test]
fn no_frame_after_stop_until_start() {
    let mut engine = engine();
    engine.start();
    fire(&mut engine);
    engine.stop();
    assert!(!fire(&mut engine));
    assert!(!engine.on_frame());
    engine.start();
    assert!(fire(&mut engine));
}

#[test]
fn hidden_page_pauses_and_visible_resumes() {
    let mut engine = engine();
    engine.start();
    engine.set_page_visible(false);
    assert!(!engine.is_running());
    assert!(!engine.scheduler().has_pending());
    engine.set_page_visible(false);
    assert_eq!(engine.scheduler().cancels(), 1);
    engine.set_page_visible(true);
    assert!(engine.is_running());
    assert!(fire(&mut engine));
}

#[test]
fn stale_frame_does_not_step() {
    let mut engine = engine();
    let stars = engine.core.stars.clone();
    assert!(!engine.on_frame());
    assert_eq!(engine.core.stars, stars);
}

// =============================================================
// Simulation
// =============================================================

#[test]
fn resize_rebuilds_star_field() {
    let mut engine = engine();
    assert_eq!(engine.core.stars.len(), 200);
    engine.resize(Viewport::new(3000.0, 2000.0, 2.0));
    assert_eq!(engine.core.stars.len(), 667);
    engine.resize(Viewport::new(6000.0, 4000.0, 2.0));
    assert_eq!(engine.core.stars.len(), 850);
}

#[test]
fn frames_keep_particles_within_bounds() {
    let mut engine = engine();
    engine.start();
    for _ in 0..2000 {
        fire(&mut engine);
        assert!(engine.core.meteors.len() <= METEOR_CAP);
        for s in engine.core.stars.stars() {
            assert!((0.08..=1.0).contains(&s.alpha));
            assert!(s.x >= -5.0 && s.x < 1205.0);
        }
    }
}

#[test]
fn dark_sky_eventually_spawns_meteors() {
    let mut engine = engine();
    engine.start();
    let mut seen = false;
    for _ in 0..500 {
        fire(&mut engine);
        seen |= !engine.core.meteors.is_empty();
    }
    assert!(seen);
}

#[test]
fn dark_frames_scatter_sparkles_light_frames_clear_them() {
    let mut engine = engine();
    engine.start();
    fire(&mut engine);
    assert_eq!(engine.core.sparkles.len(), SPARKLE_COUNT);
    engine.toggle();
    fire(&mut engine);
    assert!(engine.core.sparkles.is_empty());
}

#[test]
fn reduced_motion_freezes_stars() {
    let mut engine = engine();
    engine.set_reduced_motion(true);
    engine.start();
    let before = engine.core.stars.clone();
    for _ in 0..50 {
        fire(&mut engine);
    }
    assert_eq!(engine.core.stars, before);
}

#[test]
fn reduced_motion_never_spawns() {
    let mut engine = engine();
    engine.set_reduced_motion(true);
    engine.start();
    for _ in 0..2000 {
        fire(&mut engine);
    }
    assert!(engine.core.meteors.is_empty());
}

#[test]
fn reduced_motion_ages_meteors_double_in_place() {
    let mut engine = engine();
    engine.core.meteors.push(still_meteor());
    engine.set_reduced_motion(true);
    engine.start();
    fire(&mut engine);
    let m = engine.core.meteors.meteors()[0];
    assert_eq!((m.x, m.y), (100.0, 100.0));
    assert_eq!(m.age, 2.0);
}

#[test]
fn reduced_motion_holds_sparkles_still() {
    let mut engine = engine();
    engine.start();
    fire(&mut engine);
    engine.set_reduced_motion(true);
    let sparkles = engine.core.sparkles.clone();
    fire(&mut engine);
    fire(&mut engine);
    assert_eq!(engine.core.sparkles, sparkles);
}

#[test]
fn leaving_reduced_motion_resumes_twinkle() {
    let mut engine = engine();
    engine.set_reduced_motion(true);
    engine.start();
    fire(&mut engine);
    let before = engine.core.stars.clone();
    engine.set_reduced_motion(false);
    fire(&mut engine);
    assert_ne!(engine.core.stars, before);
}

#[test]
fn same_seed_same_sky() {
    let mut a = engine();
    let mut b = engine();
    a.start();
    b.start();
    for _ in 0..100 {
        fire(&mut a);
        fire(&mut b);
    }
    assert_eq!(a.core.stars, b.core.stars);
    assert_eq!(a.core.meteors, b.core.meteors);
}
