use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::frame_loop::{FrameLoop, FrameScheduler};
use crate::meteor::{MeteorShower, Motion};
use crate::star::{Sparkle, StarField, scatter_sparkles};
use crate::storage::PreferenceStore;
use crate::theme::{Theme, ToggleLabel};
use crate::viewport::Viewport;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Simulation state: everything a frame paints, and nothing about how frames
/// are scheduled or where the theme is stored.
///
/// Separated from [`Engine`] so particle behaviour can be tested without a
/// scheduler, a store, or a browser.
pub struct EngineCore {
    pub theme: Theme,
    pub viewport: Viewport,
    pub motion: Motion,
    pub stars: StarField,
    pub meteors: MeteorShower,
    pub sparkles: Vec<Sparkle>,
    rng: SmallRng,
}

impl EngineCore {
    /// A core with an empty viewport and a deterministic random source.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            theme: Theme::default(),
            viewport: Viewport::default(),
            motion: Motion::default(),
            stars: StarField::default(),
            meteors: MeteorShower::default(),
            sparkles: Vec::new(),
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Adopt a new viewport and rebuild the star field for it.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.stars = StarField::build(&viewport, &mut self.rng);
        log::debug!(
            "sky: resized to {}x{} @{}x, {} stars",
            viewport.width,
            viewport.height,
            viewport.pixel_ratio,
            self.stars.len()
        );
    }

    /// Advance the simulation by one frame.
    ///
    /// Under reduced motion stars hold still and no meteors spawn; meteors
    /// already in flight stay put and burn out twice as fast.
    pub fn step(&mut self) {
        let palette = self.theme.palette();
        if !self.motion.is_reduced() {
            self.stars.tick(&mut self.rng, self.viewport.width);
            self.meteors.maybe_spawn(&mut self.rng, palette.meteor_chance, &self.viewport);
        }
        self.meteors.advance(self.motion, &self.viewport);

        if !palette.sparkles {
            self.sparkles.clear();
        } else if !self.motion.is_reduced() || self.sparkles.is_empty() {
            scatter_sparkles(&mut self.rng, &self.viewport, &mut self.sparkles);
        }
    }
}

/// The sky controller: simulation plus frame loop plus preference store.
///
/// All entry points are called from one thread (frame callbacks and DOM
/// events), so no locking is needed; the loop state alone guards against
/// double scheduling.
pub struct Engine<S, P> {
    pub core: EngineCore,
    frames: FrameLoop<S>,
    store: P,
}

impl<S: FrameScheduler, P: PreferenceStore> Engine<S, P> {
    /// Create a stopped engine whose theme comes from the stored preference.
    #[must_use]
    pub fn new(mut core: EngineCore, scheduler: S, store: P) -> Self {
        core.theme = Theme::from_stored(store.load().as_deref());
        log::debug!("sky: initial theme {}", core.theme.as_str());
        Self { core, frames: FrameLoop::new(scheduler), store }
    }

    // --- Theme ---

    /// Switch theme, optionally persisting it, and make sure the loop runs.
    ///
    /// Returns the button label for the new theme.
    pub fn set_theme(&mut self, theme: Theme, persist: bool) -> ToggleLabel {
        self.core.theme = theme;
        if persist {
            self.store.save(theme.as_str());
        }
        log::debug!("sky: theme {} (persist: {persist})", theme.as_str());
        self.frames.start();
        theme.toggle_label()
    }

    /// Flip the theme and persist the choice.
    pub fn toggle(&mut self) -> ToggleLabel {
        self.set_theme(self.core.theme.toggled(), true)
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.core.theme
    }

    // --- Environment ---

    pub fn resize(&mut self, viewport: Viewport) {
        self.core.resize(viewport);
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.core.motion = Motion::from_reduced(reduced);
    }

    /// Pause while the page is hidden; resume when it is shown again.
    pub fn set_page_visible(&mut self, visible: bool) {
        if visible {
            self.frames.start();
        } else {
            self.frames.stop();
        }
    }

    // --- Loop ---

    pub fn start(&mut self) -> bool {
        self.frames.start()
    }

    pub fn stop(&mut self) -> bool {
        self.frames.stop()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.frames.is_running()
    }

    /// Handle a frame callback: step the simulation and request the next frame.
    ///
    /// Returns `false` for a stale callback (loop stopped), in which case the
    /// caller must not paint.
    pub fn on_frame(&mut self) -> bool {
        if !self.frames.begin_frame() {
            return false;
        }
        self.core.step();
        self.frames.schedule_next();
        true
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        self.frames.scheduler()
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        self.frames.scheduler_mut()
    }

    #[must_use]
    pub fn store(&self) -> &P {
        &self.store
    }
}
