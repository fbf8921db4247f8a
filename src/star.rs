//! Star field: twinkling, slowly drifting background points.
//!
//! A field is built wholesale for a viewport and rebuilt whenever the viewport
//! changes. Between rebuilds stars are only mutated in place by [`StarField::tick`];
//! none are added or removed.

#[cfg(test)]
#[path = "star_test.rs"]
mod star_test;

use rand::Rng;

use crate::consts::{
    SPARKLE_COUNT, SPARKLE_RADIUS_MAX, SPARKLE_RADIUS_MIN, STAR_ALPHA_CEIL, STAR_ALPHA_FLOOR, STAR_DRIFT_MAX,
    STAR_INITIAL_ALPHA_MAX, STAR_INITIAL_ALPHA_MIN, STAR_RADIUS_MAX, STAR_RADIUS_MIN, STAR_TWINKLE_MAX,
    STAR_TWINKLE_MIN, STAR_WRAP_MARGIN,
};
use crate::viewport::Viewport;

/// A single background star.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    /// Current brightness in `[STAR_ALPHA_FLOOR, STAR_ALPHA_CEIL]` once ticked.
    pub alpha: f64,
    /// Width of the per-frame alpha random walk.
    pub twinkle: f64,
    /// Horizontal velocity in px/frame.
    pub drift: f64,
}

impl Star {
    fn random(rng: &mut impl Rng, viewport: &Viewport) -> Self {
        Self {
            x: rng.random_range(0.0..=viewport.width),
            y: rng.random_range(0.0..=viewport.height),
            radius: rng.random_range(STAR_RADIUS_MIN..=STAR_RADIUS_MAX),
            alpha: rng.random_range(STAR_INITIAL_ALPHA_MIN..=STAR_INITIAL_ALPHA_MAX),
            twinkle: rng.random_range(STAR_TWINKLE_MIN..=STAR_TWINKLE_MAX),
            drift: rng.random_range(-STAR_DRIFT_MAX..=STAR_DRIFT_MAX),
        }
    }

    /// Advance one frame: random-walk the alpha and drift horizontally.
    pub fn tick(&mut self, rng: &mut impl Rng, width: f64) {
        let half = self.twinkle / 2.0;
        self.alpha = (self.alpha + rng.random_range(-half..=half)).clamp(STAR_ALPHA_FLOOR, STAR_ALPHA_CEIL);
        self.x = wrap_x(self.x + self.drift, width);
    }
}

/// Wrap `x` into `[-margin, width + margin)`, preserving the overshoot.
#[must_use]
pub fn wrap_x(x: f64, width: f64) -> f64 {
    let lo = -STAR_WRAP_MARGIN;
    let span = width + 2.0 * STAR_WRAP_MARGIN;
    if x >= lo && x < lo + span {
        return x;
    }
    let wrapped = lo + (x - lo).rem_euclid(span);
    // rem_euclid can round up to exactly `span` for tiny negative offsets.
    if wrapped >= lo + span { lo } else { wrapped }
}

/// The full set of stars for the current viewport.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StarField {
    stars: Vec<Star>,
}

impl StarField {
    /// Build a fresh field sized by [`Viewport::star_count`].
    #[must_use]
    pub fn build(viewport: &Viewport, rng: &mut impl Rng) -> Self {
        let stars = (0..viewport.star_count())
            .map(|_| Star::random(rng, viewport))
            .collect();
        Self { stars }
    }

    /// Twinkle and drift every star by one frame.
    pub fn tick(&mut self, rng: &mut impl Rng, width: f64) {
        for star in &mut self.stars {
            star.tick(rng, width);
        }
    }

    #[must_use]
    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }
}

/// A faint coloured dot overlaid for texture in the dark theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sparkle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub rgb: (u8, u8, u8),
}

/// Scatter a fresh batch of sparkles across the viewport.
pub fn scatter_sparkles(rng: &mut impl Rng, viewport: &Viewport, out: &mut Vec<Sparkle>) {
    out.clear();
    out.extend((0..SPARKLE_COUNT).map(|_| Sparkle {
        x: rng.random_range(0.0..=viewport.width),
        y: rng.random_range(0.0..=viewport.height),
        radius: rng.random_range(SPARKLE_RADIUS_MIN..=SPARKLE_RADIUS_MAX),
        rgb: (rng.random_range(180..255), rng.random_range(120..255), rng.random_range(200..255)),
    }));
}
