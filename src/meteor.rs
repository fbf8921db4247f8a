//! Meteors: short-lived streaks that cross the sky top-left to bottom-right.

#[cfg(test)]
#[path = "meteor_test.rs"]
mod meteor_test;

use rand::Rng;

use crate::consts::{
    METEOR_ANGLE_MAX, METEOR_ANGLE_MIN, METEOR_CAP, METEOR_EXIT_MARGIN, METEOR_LENGTH_MAX, METEOR_LENGTH_MIN,
    METEOR_LIFE_MAX, METEOR_LIFE_MIN, METEOR_REDUCED_AGE_STEP, METEOR_SPAWN_X, METEOR_SPAWN_Y, METEOR_SPEED_MAX,
    METEOR_SPEED_MIN, METEOR_TAIL_DIVISOR, METEOR_WIDTH_MAX, METEOR_WIDTH_MIN,
};
use crate::viewport::Viewport;

/// How much the sky is allowed to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Motion {
    #[default]
    Full,
    /// The user or system asked for reduced motion.
    Reduced,
}

impl Motion {
    #[must_use]
    pub fn from_reduced(reduced: bool) -> Self {
        if reduced { Self::Reduced } else { Self::Full }
    }

    #[must_use]
    pub fn is_reduced(self) -> bool {
        self == Self::Reduced
    }
}

/// A single shooting star. `x`/`y` is the head.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Meteor {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub length: f64,
    /// Frames lived so far.
    pub age: f64,
    /// Lifetime in frames.
    pub max_age: f64,
    /// Stroke width in CSS pixels.
    pub width: f64,
}

impl Meteor {
    /// Spawn at a random point biased towards the upper left of the viewport.
    pub fn random(rng: &mut impl Rng, viewport: &Viewport) -> Self {
        let (w, h) = (viewport.width, viewport.height);
        let angle = rng.random_range(METEOR_ANGLE_MIN..=METEOR_ANGLE_MAX);
        let speed = rng.random_range(METEOR_SPEED_MIN..=METEOR_SPEED_MAX);
        Self {
            x: rng.random_range(w * METEOR_SPAWN_X.0..=w * METEOR_SPAWN_X.1),
            y: rng.random_range(h * METEOR_SPAWN_Y.0..=h * METEOR_SPAWN_Y.1),
            vx: angle.cos() * speed,
            vy: angle.sin() * speed,
            length: rng.random_range(METEOR_LENGTH_MIN..=METEOR_LENGTH_MAX),
            age: 0.0,
            max_age: rng.random_range(METEOR_LIFE_MIN..=METEOR_LIFE_MAX),
            width: rng.random_range(METEOR_WIDTH_MIN..=METEOR_WIDTH_MAX),
        }
    }

    /// Move and age by one frame.
    pub fn advance(&mut self, motion: Motion) {
        match motion {
            Motion::Full => {
                self.x += self.vx;
                self.y += self.vy;
                self.age += 1.0;
            }
            Motion::Reduced => self.age += METEOR_REDUCED_AGE_STEP,
        }
    }

    /// Whether the meteor has burned out or left the viewport.
    #[must_use]
    pub fn is_spent(&self, viewport: &Viewport) -> bool {
        self.age > self.max_age
            || self.x > viewport.width + METEOR_EXIT_MARGIN
            || self.y > viewport.height + METEOR_EXIT_MARGIN
    }

    /// End of the streak, trailing behind the head along the velocity.
    #[must_use]
    pub fn tail(&self) -> (f64, f64) {
        let k = self.length / METEOR_TAIL_DIVISOR;
        (self.x - self.vx * k, self.y - self.vy * k)
    }

    /// Opacity fading linearly from `base` at birth to zero at `max_age`.
    #[must_use]
    pub fn alpha(&self, base: f64) -> f64 {
        ((1.0 - self.age / self.max_age) * base).max(0.0)
    }
}

/// The live meteors, capped at [`METEOR_CAP`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeteorShower {
    meteors: Vec<Meteor>,
}

impl MeteorShower {
    /// Roll for a new meteor. Returns `true` if one was spawned.
    pub fn maybe_spawn(&mut self, rng: &mut impl Rng, chance: f64, viewport: &Viewport) -> bool {
        if self.meteors.len() >= METEOR_CAP || !rng.random_bool(chance.clamp(0.0, 1.0)) {
            return false;
        }
        self.meteors.push(Meteor::random(rng, viewport));
        true
    }

    /// Advance every meteor, then drop the spent ones in place.
    pub fn advance(&mut self, motion: Motion, viewport: &Viewport) {
        self.meteors.retain_mut(|m| {
            m.advance(motion);
            !m.is_spent(viewport)
        });
    }

    /// Insert a meteor without rolling. Returns `false` when the shower is full.
    pub fn push(&mut self, meteor: Meteor) -> bool {
        if self.meteors.len() >= METEOR_CAP {
            return false;
        }
        self.meteors.push(meteor);
        true
    }

    #[must_use]
    pub fn meteors(&self) -> &[Meteor] {
        &self.meteors
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.meteors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.meteors.is_empty()
    }
}
