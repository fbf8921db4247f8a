//! Rendering: paints one frame of the sky to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It reads simulation state and produces pixels; it never mutates particles.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The caller ([`crate::host`]) logs failures and keeps the loop alive.

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::SPARKLE_ALPHA;
use crate::engine::EngineCore;
use crate::meteor::Meteor;
use crate::star::{Sparkle, Star};
use crate::theme::Palette;
use crate::viewport::Viewport;

/// Inner radius of the vignette, in CSS pixels.
const VIGNETTE_INNER_RADIUS: f64 = 10.0;

/// Size the canvas backing store for `viewport` and reset the transform so
/// drawing coordinates stay in CSS pixels.
///
/// # Errors
///
/// Returns `Err` if the style or transform calls fail.
pub fn apply_viewport(
    canvas: &HtmlCanvasElement,
    ctx: &CanvasRenderingContext2d,
    viewport: &Viewport,
) -> Result<(), JsValue> {
    let (backing_w, backing_h) = viewport.backing_size();
    canvas.set_width(backing_w);
    canvas.set_height(backing_h);

    let style = canvas.style();
    style.set_property("width", &format!("{}px", viewport.width))?;
    style.set_property("height", &format!("{}px", viewport.height))?;

    let dpr = viewport.pixel_ratio;
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)
}

/// Draw the full frame: sky, stars, sparkles, meteors.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails.
pub fn draw(ctx: &CanvasRenderingContext2d, core: &EngineCore) -> Result<(), JsValue> {
    let viewport = &core.viewport;
    let palette = core.theme.palette();

    ctx.clear_rect(0.0, 0.0, viewport.width, viewport.height);
    if viewport.area() <= 0.0 {
        return Ok(());
    }

    paint_background(ctx, viewport, palette)?;
    paint_stars(ctx, core.stars.stars(), palette.star_alpha)?;
    paint_sparkles(ctx, &core.sparkles)?;
    paint_meteors(ctx, core.meteors.meteors(), palette.meteor_alpha)?;
    Ok(())
}

// =============================================================
// Layers
// =============================================================

fn paint_background(ctx: &CanvasRenderingContext2d, viewport: &Viewport, palette: &Palette) -> Result<(), JsValue> {
    let (w, h) = (viewport.width, viewport.height);

    let sky = ctx.create_linear_gradient(0.0, 0.0, 0.0, h);
    for &(offset, color) in palette.sky {
        sky.add_color_stop(offset, color)?;
    }
    ctx.set_fill_style_canvas_gradient(&sky);
    ctx.fill_rect(0.0, 0.0, w, h);

    let vignette = ctx.create_radial_gradient(w * 0.5, h * 0.3, VIGNETTE_INNER_RADIUS, w * 0.5, h * 0.5, w.max(h))?;
    vignette.add_color_stop(0.0, "rgba(0,0,0,0)")?;
    vignette.add_color_stop(1.0, palette.vignette_edge)?;
    ctx.set_fill_style_canvas_gradient(&vignette);
    ctx.fill_rect(0.0, 0.0, w, h);
    Ok(())
}

fn paint_stars(ctx: &CanvasRenderingContext2d, stars: &[Star], boost: f64) -> Result<(), JsValue> {
    for s in stars {
        ctx.begin_path();
        ctx.set_fill_style_str(&rgba(255, 255, 255, s.alpha * boost));
        ctx.arc(s.x, s.y, s.radius, 0.0, TAU)?;
        ctx.fill();
    }
    Ok(())
}

fn paint_sparkles(ctx: &CanvasRenderingContext2d, sparkles: &[Sparkle]) -> Result<(), JsValue> {
    for s in sparkles {
        let (r, g, b) = s.rgb;
        ctx.begin_path();
        ctx.set_fill_style_str(&rgba(r, g, b, SPARKLE_ALPHA));
        ctx.arc(s.x, s.y, s.radius, 0.0, TAU)?;
        ctx.fill();
    }
    Ok(())
}

fn paint_meteors(ctx: &CanvasRenderingContext2d, meteors: &[Meteor], base_alpha: f64) -> Result<(), JsValue> {
    ctx.set_line_cap("round");
    for m in meteors {
        let a = m.alpha(base_alpha);
        let (tail_x, tail_y) = m.tail();

        let streak = ctx.create_linear_gradient(m.x, m.y, tail_x, tail_y);
        streak.add_color_stop(0.0, &rgba(255, 255, 255, 0.95 * a))?;
        streak.add_color_stop(0.35, &rgba(46, 233, 255, 0.38 * a))?;
        streak.add_color_stop(1.0, "rgba(255,255,255,0)")?;

        ctx.set_stroke_style_canvas_gradient(&streak);
        ctx.set_line_width(m.width);
        ctx.begin_path();
        ctx.move_to(m.x, m.y);
        ctx.line_to(tail_x, tail_y);
        ctx.stroke();
    }
    Ok(())
}

fn rgba(r: u8, g: u8, b: u8, a: f64) -> String {
    format!("rgba({r},{g},{b},{:.3})", a.clamp(0.0, 1.0))
}
