#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use crate::consts::{MAX_PIXEL_RATIO, STAR_AREA_PER_STAR, STAR_COUNT_MAX, STAR_COUNT_MIN};

/// Visible drawing area.
///
/// `width` / `height` are in CSS pixels.
/// `pixel_ratio` is the backing-store scale (1.0 = one device pixel per CSS pixel).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub pixel_ratio: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 0.0, height: 0.0, pixel_ratio: 1.0 }
    }
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64, pixel_ratio: f64) -> Self {
        Self {
            width: sanitize_extent(width),
            height: sanitize_extent(height),
            pixel_ratio: sanitize_pixel_ratio(pixel_ratio),
        }
    }

    /// Build from raw window measurements: floors the inner size and caps DPR.
    #[must_use]
    pub fn from_window(inner_width: f64, inner_height: f64, device_pixel_ratio: f64) -> Self {
        Self::new(inner_width.floor(), inner_height.floor(), device_pixel_ratio)
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Backing-store size in device pixels.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn backing_size(&self) -> (u32, u32) {
        (
            (self.width * self.pixel_ratio).floor() as u32,
            (self.height * self.pixel_ratio).floor() as u32,
        )
    }

    /// Number of stars for this area: `clamp(round(area / 9000), 200, 850)`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn star_count(&self) -> usize {
        let density = (self.area() / STAR_AREA_PER_STAR).round();
        // Saturating float-to-int cast keeps huge areas at usize::MAX before the clamp.
        (density as usize).clamp(STAR_COUNT_MIN, STAR_COUNT_MAX)
    }
}

fn sanitize_extent(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

fn sanitize_pixel_ratio(dpr: f64) -> f64 {
    if dpr.is_finite() && dpr > 0.0 { dpr.min(MAX_PIXEL_RATIO) } else { 1.0 }
}
