#![allow(clippy::float_cmp)]

use std::f64::consts::PI;

use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::*;

const EPSILON: f64 = 1e-9;

fn rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

fn vp() -> Viewport {
    Viewport::new(1000.0, 500.0, 1.0)
}

fn meteor_at(x: f64, y: f64) -> Meteor {
    Meteor { x, y, vx: 6.0, vy: 8.0, length: 180.0, age: 0.0, max_age: 20.0, width: 1.5 }
}

// --- spawn ranges ---

#[test]
fn random_meteor_respects_ranges() {
    let viewport = vp();
    let mut r = rng(1);
    for _ in 0..500 {
        let m = Meteor::random(&mut r, &viewport);
        assert!((-200.0..=800.0).contains(&m.x), "x {}", m.x);
        assert!((-100.0..=100.0).contains(&m.y), "y {}", m.y);
        assert!((120.0..=340.0).contains(&m.length));
        assert!((18.0..=30.0).contains(&m.max_age));
        assert!((1.2..=2.2).contains(&m.width));
        assert_eq!(m.age, 0.0);

        let speed = m.vx.hypot(m.vy);
        assert!(speed >= 10.0 - EPSILON && speed <= 18.0 + EPSILON, "speed {speed}");
        let angle = m.vy.atan2(m.vx);
        assert!(angle >= PI * 0.2 - EPSILON && angle <= PI * 0.3 + EPSILON, "angle {angle}");
    }
}

#[test]
fn meteors_head_down_and_right() {
    let mut r = rng(2);
    for _ in 0..100 {
        let m = Meteor::random(&mut r, &vp());
        assert!(m.vx > 0.0 && m.vy > 0.0);
    }
}

// --- advance ---

#[test]
fn full_motion_moves_and_ages_by_one() {
    let mut m = meteor_at(10.0, 20.0);
    m.advance(Motion::Full);
    assert_eq!((m.x, m.y), (16.0, 28.0));
    assert_eq!(m.age, 1.0);
}

#[test]
fn reduced_motion_ages_double_without_moving() {
    let mut m = meteor_at(10.0, 20.0);
    m.advance(Motion::Reduced);
    assert_eq!((m.x, m.y), (10.0, 20.0));
    assert_eq!(m.age, 2.0);
}

// --- is_spent ---

#[test]
fn spent_exactly_when_age_exceeds_max() {
    let viewport = vp();
    let mut m = meteor_at(0.0, 0.0);
    m.age = 20.0;
    assert!(!m.is_spent(&viewport));
    m.age = 20.000_001;
    assert!(m.is_spent(&viewport));
}

#[test]
fn spent_exactly_past_exit_margin() {
    let viewport = vp();
    let m = meteor_at(1400.0, 0.0);
    assert!(!m.is_spent(&viewport));
    let m = meteor_at(1400.5, 0.0);
    assert!(m.is_spent(&viewport));
    let m = meteor_at(0.0, 900.0);
    assert!(!m.is_spent(&viewport));
    let m = meteor_at(0.0, 900.5);
    assert!(m.is_spent(&viewport));
}

#[test]
fn off_left_or_top_is_not_spent() {
    let viewport = vp();
    assert!(!meteor_at(-5000.0, -5000.0).is_spent(&viewport));
}

// --- geometry ---

#[test]
fn tail_trails_along_velocity() {
    let m = meteor_at(100.0, 100.0);
    // length / 18 = 10
    assert_eq!(m.tail(), (40.0, 20.0));
}

#[test]
fn alpha_fades_linearly_to_zero() {
    let mut m = meteor_at(0.0, 0.0);
    assert_eq!(m.alpha(1.0), 1.0);
    m.age = 10.0;
    assert!((m.alpha(1.0) - 0.5).abs() < EPSILON);
    assert!((m.alpha(0.35) - 0.175).abs() < EPSILON);
    m.age = 20.0;
    assert_eq!(m.alpha(1.0), 0.0);
    m.age = 25.0;
    assert_eq!(m.alpha(1.0), 0.0);
}

// --- shower ---

#[test]
fn spawn_never_exceeds_cap() {
    let viewport = vp();
    let mut r = rng(3);
    let mut shower = MeteorShower::default();
    for _ in 0..200 {
        shower.maybe_spawn(&mut r, 1.0, &viewport);
        assert!(shower.len() <= METEOR_CAP);
    }
    assert_eq!(shower.len(), METEOR_CAP);
}

#[test]
fn spawn_with_zero_chance_never_spawns() {
    let mut r = rng(4);
    let mut shower = MeteorShower::default();
    for _ in 0..200 {
        assert!(!shower.maybe_spawn(&mut r, 0.0, &vp()));
    }
    assert!(shower.is_empty());
}

#[test]
fn spawn_rate_tracks_chance() {
    let mut r = rng(5);
    let mut hits = 0;
    for _ in 0..20_000 {
        let mut shower = MeteorShower::default();
        if shower.maybe_spawn(&mut r, 0.05, &vp()) {
            hits += 1;
        }
    }
    // Expect ~1000; allow generous slack.
    assert!((800..1200).contains(&hits), "hits {hits}");
}

#[test]
fn push_refuses_when_full() {
    let mut shower = MeteorShower::default();
    for _ in 0..METEOR_CAP {
        assert!(shower.push(meteor_at(0.0, 0.0)));
    }
    assert!(!shower.push(meteor_at(0.0, 0.0)));
    assert_eq!(shower.len(), METEOR_CAP);
}

#[test]
fn advance_prunes_only_spent_meteors() {
    let viewport = vp();
    let mut shower = MeteorShower::default();
    let mut old = meteor_at(0.0, 0.0);
    old.age = 20.0;
    let mut leaving = meteor_at(1399.0, 0.0);
    leaving.vy = 0.0;
    shower.push(old);
    shower.push(leaving);
    shower.push(meteor_at(0.0, 0.0));

    shower.advance(Motion::Full, &viewport);

    assert_eq!(shower.len(), 1);
    assert_eq!(shower.meteors()[0].age, 1.0);
}

#[test]
fn meteor_lives_until_age_passes_max() {
    let viewport = Viewport::new(100_000.0, 100_000.0, 1.0);
    let mut shower = MeteorShower::default();
    shower.push(meteor_at(0.0, 0.0));
    for frame in 1..=20 {
        shower.advance(Motion::Full, &viewport);
        assert_eq!(shower.len(), 1, "removed early at frame {frame}");
    }
    shower.advance(Motion::Full, &viewport);
    assert!(shower.is_empty());
}

#[test]
fn reduced_motion_burns_out_in_half_the_frames() {
    let viewport = vp();
    let mut shower = MeteorShower::default();
    shower.push(meteor_at(0.0, 0.0));
    for _ in 0..10 {
        shower.advance(Motion::Reduced, &viewport);
    }
    assert_eq!(shower.len(), 1);
    shower.advance(Motion::Reduced, &viewport);
    assert!(shower.is_empty());
}

#[test]
fn motion_from_reduced_flag() {
    assert_eq!(Motion::from_reduced(true), Motion::Reduced);
    assert_eq!(Motion::from_reduced(false), Motion::Full);
    assert!(Motion::Reduced.is_reduced());
    assert!(!Motion::default().is_reduced());
}
