//! Shared numeric constants for the sky simulation.

use std::f64::consts::PI;

// ── Viewport ────────────────────────────────────────────────────

/// Upper bound on the device pixel ratio used for the backing store.
pub const MAX_PIXEL_RATIO: f64 = 2.0;

// ── Stars ───────────────────────────────────────────────────────

/// Viewport area (CSS px²) per star before clamping.
pub const STAR_AREA_PER_STAR: f64 = 9000.0;

/// Fewest stars a field may hold.
pub const STAR_COUNT_MIN: usize = 200;

/// Most stars a field may hold.
pub const STAR_COUNT_MAX: usize = 850;

pub const STAR_RADIUS_MIN: f64 = 0.6;
pub const STAR_RADIUS_MAX: f64 = 1.8;

pub const STAR_INITIAL_ALPHA_MIN: f64 = 0.2;
pub const STAR_INITIAL_ALPHA_MAX: f64 = 1.0;

/// Twinkle rate bounds: the width of the per-frame alpha random walk.
pub const STAR_TWINKLE_MIN: f64 = 0.002;
pub const STAR_TWINKLE_MAX: f64 = 0.012;

/// Horizontal drift in px/frame; negative drifts left.
pub const STAR_DRIFT_MAX: f64 = 0.03;

/// Alpha never walks below this.
pub const STAR_ALPHA_FLOOR: f64 = 0.08;
pub const STAR_ALPHA_CEIL: f64 = 1.0;

/// Tolerance band beyond each viewport edge before a star wraps.
pub const STAR_WRAP_MARGIN: f64 = 5.0;

// ── Sparkles ────────────────────────────────────────────────────

/// Sparkle dots painted per frame in the dark theme.
pub const SPARKLE_COUNT: usize = 12;

pub const SPARKLE_RADIUS_MIN: f64 = 0.7;
pub const SPARKLE_RADIUS_MAX: f64 = 1.6;

pub const SPARKLE_ALPHA: f64 = 0.08;

// ── Meteors ─────────────────────────────────────────────────────

/// Maximum number of concurrent meteors.
pub const METEOR_CAP: usize = 6;

/// Per-frame spawn probability in the dark theme.
pub const METEOR_CHANCE_DARK: f64 = 0.05;

/// Per-frame spawn probability in the light theme.
pub const METEOR_CHANCE_LIGHT: f64 = 0.012;

/// Spawn box as fractions of the viewport: x ∈ [-0.2W, 0.8W], y ∈ [-0.2H, 0.2H].
pub const METEOR_SPAWN_X: (f64, f64) = (-0.2, 0.8);
pub const METEOR_SPAWN_Y: (f64, f64) = (-0.2, 0.2);

/// Heading below horizontal, 36° to 54°.
pub const METEOR_ANGLE_MIN: f64 = PI * 0.20;
pub const METEOR_ANGLE_MAX: f64 = PI * 0.30;

pub const METEOR_SPEED_MIN: f64 = 10.0;
pub const METEOR_SPEED_MAX: f64 = 18.0;

pub const METEOR_LENGTH_MIN: f64 = 120.0;
pub const METEOR_LENGTH_MAX: f64 = 340.0;

/// Lifetime in frames.
pub const METEOR_LIFE_MIN: f64 = 18.0;
pub const METEOR_LIFE_MAX: f64 = 30.0;

pub const METEOR_WIDTH_MIN: f64 = 1.2;
pub const METEOR_WIDTH_MAX: f64 = 2.2;

/// Tail offset is `velocity * (length / METEOR_TAIL_DIVISOR)`.
pub const METEOR_TAIL_DIVISOR: f64 = 18.0;

/// Distance past the right/bottom edge after which a meteor is dropped.
pub const METEOR_EXIT_MARGIN: f64 = 400.0;

/// Age added per frame under reduced motion.
pub const METEOR_REDUCED_AGE_STEP: f64 = 2.0;
