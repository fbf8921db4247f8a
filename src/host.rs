//! Browser host: binds an [`Engine`] to the page.
//!
//! ARCHITECTURE
//! ============
//! The engine owns all sky state; this module owns the DOM handles and the
//! event closures. One `Rc<RefCell<SkyHost>>` is shared by the animation-frame
//! callback and the click, resize, visibility, and reduced-motion listeners.
//! Everything runs on the browser's main thread, so the `RefCell` is never
//! contended.
//!
//! Missing elements fail [`mount`] immediately. After mounting nothing is
//! fatal: a failed frame is logged and the next one is still scheduled.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, Element, EventTarget, HtmlCanvasElement, HtmlElement, Window};

use crate::config::SkyConfig;
use crate::engine::{Engine, EngineCore};
use crate::error::SkyError;
use crate::frame_loop::{FrameHandle, FrameScheduler};
use crate::render;
use crate::storage::LocalStore;
use crate::theme::{Theme, ToggleLabel};
use crate::viewport::Viewport;

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Class toggled on `<body>` while the dark theme is active.
const BODY_DARK_CLASS: &str = "dark";

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

// =============================================================
// Scheduler
// =============================================================

/// `requestAnimationFrame` as a [`FrameScheduler`].
///
/// The callback is installed after the host exists, since the callback needs
/// the host and the host needs the scheduler.
pub struct RafScheduler {
    window: Window,
    callback: FrameCallback,
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        let slot = self.callback.borrow();
        let callback = slot.as_ref()?;
        match self.window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            Ok(id) => Some(FrameHandle(id)),
            Err(err) => {
                log::warn!("sky: requestAnimationFrame failed: {err:?}");
                None
            }
        }
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Err(err) = self.window.cancel_animation_frame(handle.0) {
            log::warn!("sky: cancelAnimationFrame failed: {err:?}");
        }
    }
}

// =============================================================
// DOM
// =============================================================

/// The theme button's icon and caption.
struct ToggleButton {
    icon: Element,
    text: Element,
}

impl ToggleButton {
    fn show(&self, label: ToggleLabel) {
        self.icon.set_text_content(Some(label.icon));
        self.text.set_text_content(Some(label.text));
    }
}

struct SkyHost {
    engine: Engine<RafScheduler, LocalStore>,
    window: Window,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    body: HtmlElement,
    button: ToggleButton,
}

impl SkyHost {
    /// Apply a theme to the engine, the button, and `<body>`.
    fn apply_theme(&mut self, theme: Theme, persist: bool) {
        let label = self.engine.set_theme(theme, persist);
        self.button.show(label);
        if let Err(err) = self.body.class_list().toggle_with_force(BODY_DARK_CLASS, theme.is_dark()) {
            log::warn!("sky: could not set body class: {err:?}");
        }
    }

    fn toggle(&mut self) {
        self.apply_theme(self.engine.theme().toggled(), true);
    }

    /// Re-measure the window, resize the backing store, and rebuild stars.
    fn resize(&mut self) -> Result<(), SkyError> {
        let viewport = measure(&self.window)?;
        render::apply_viewport(&self.canvas, &self.ctx, &viewport)?;
        self.engine.resize(viewport);
        Ok(())
    }

    fn frame(&mut self) {
        if !self.engine.on_frame() {
            return;
        }
        if let Err(err) = render::draw(&self.ctx, &self.engine.core) {
            log::error!("sky: frame failed: {err:?}");
        }
    }
}

fn measure(window: &Window) -> Result<Viewport, SkyError> {
    let width = window.inner_width()?.as_f64().unwrap_or(0.0);
    let height = window.inner_height()?.as_f64().unwrap_or(0.0);
    Ok(Viewport::from_window(width, height, window.device_pixel_ratio()))
}

fn element_by_id(document: &Document, id: &str) -> Result<Element, SkyError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| SkyError::MissingElement(format!("#{id}")))
}

fn child(parent: &Element, selector: &str) -> Result<Element, SkyError> {
    parent
        .query_selector(selector)?
        .ok_or_else(|| SkyError::MissingElement(selector.to_owned()))
}

fn canvas_context(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, SkyError> {
    canvas
        .get_context("2d")?
        .ok_or(SkyError::NoContext)?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| SkyError::NoContext)
}

/// Register `handler` for `event` on `target` for the lifetime of the page.
fn listen(target: &EventTarget, event: &str, handler: impl FnMut() + 'static) -> Result<(), SkyError> {
    let closure = Closure::<dyn FnMut()>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn random_seed() -> u64 {
    // 2^53: the integer precision of Math.random's result.
    (js_sys::Math::random() * 9_007_199_254_740_992.0) as u64
}

fn init_logging(level: log::Level) {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(level).is_err() {
        log::debug!("sky: console logger already installed");
    }
}

// =============================================================
// Entry point
// =============================================================

/// Mount the sky on the current page.
///
/// `config` is an optional JSON object; see [`SkyConfig`] for fields.
///
/// # Errors
///
/// Fails if the config is malformed or any required element is missing.
#[wasm_bindgen]
pub fn mount(config: Option<String>) -> Result<SkyHandle, JsValue> {
    let config = SkyConfig::parse(config.as_deref())?;
    init_logging(config.log_level());
    Ok(mount_with(&config)?)
}

fn mount_with(config: &SkyConfig) -> Result<SkyHandle, SkyError> {
    let window = web_sys::window().ok_or(SkyError::NoWindow)?;
    let document = window.document().ok_or(SkyError::NoDocument)?;
    let body = document.body().ok_or(SkyError::NoBody)?;

    let canvas = element_by_id(&document, &config.canvas_id)?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| SkyError::NotCanvas(config.canvas_id.clone()))?;
    let ctx = canvas_context(&canvas)?;
    let toggle = element_by_id(&document, &config.toggle_id)?;
    let button = ToggleButton {
        icon: child(&toggle, &config.icon_selector)?,
        text: child(&toggle, &config.text_selector)?,
    };

    let callback: FrameCallback = Rc::new(RefCell::new(None));
    let scheduler = RafScheduler { window: window.clone(), callback: Rc::clone(&callback) };
    let store = LocalStore::open(&window, &config.storage_key);
    let core = EngineCore::with_seed(config.seed.unwrap_or_else(random_seed));
    let engine = Engine::new(core, scheduler, store);

    let host = Rc::new(RefCell::new(SkyHost { engine, window: window.clone(), canvas, ctx, body, button }));
    host.borrow_mut().resize()?;

    {
        let host = Rc::clone(&host);
        *callback.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |_ts: f64| {
            host.borrow_mut().frame();
        }));
    }

    let media = window.match_media(REDUCED_MOTION_QUERY)?;
    if let Some(query) = &media {
        host.borrow_mut().engine.set_reduced_motion(query.matches());
    }

    {
        let mut sky = host.borrow_mut();
        let theme = sky.engine.theme();
        sky.apply_theme(theme, false);
        if document.hidden() {
            sky.engine.stop();
        }
    }

    {
        let host = Rc::clone(&host);
        listen(&toggle, "click", move || host.borrow_mut().toggle())?;
    }
    {
        let host = Rc::clone(&host);
        listen(&window, "resize", move || {
            if let Err(err) = host.borrow_mut().resize() {
                log::warn!("sky: resize failed: {err}");
            }
        })?;
    }
    {
        let host = Rc::clone(&host);
        let doc = document.clone();
        listen(&document, "visibilitychange", move || {
            host.borrow_mut().engine.set_page_visible(!doc.hidden());
        })?;
    }
    if let Some(query) = media {
        let host = Rc::clone(&host);
        let target = query.clone();
        listen(&target, "change", move || {
            host.borrow_mut().engine.set_reduced_motion(query.matches());
        })?;
    }

    log::info!("sky: mounted on #{} ({} theme)", config.canvas_id, host.borrow().engine.theme().as_str());
    Ok(SkyHandle { host })
}

// =============================================================
// JS handle
// =============================================================

/// Handle returned to JavaScript for driving a mounted sky.
#[wasm_bindgen]
pub struct SkyHandle {
    host: Rc<RefCell<SkyHost>>,
}

#[wasm_bindgen]
impl SkyHandle {
    /// Flip the theme as a button click would. Returns whether it is now dark.
    pub fn toggle(&self) -> bool {
        let mut host = self.host.borrow_mut();
        host.toggle();
        host.engine.theme().is_dark()
    }

    /// Set the theme explicitly and persist it.
    #[wasm_bindgen(js_name = setDark)]
    pub fn set_dark(&self, dark: bool) {
        let theme = if dark { Theme::Dark } else { Theme::Light };
        self.host.borrow_mut().apply_theme(theme, true);
    }

    #[wasm_bindgen(js_name = isDark)]
    pub fn is_dark(&self) -> bool {
        self.host.borrow().engine.theme().is_dark()
    }

    /// Resume animation. No-op if already running.
    pub fn start(&self) {
        self.host.borrow_mut().engine.start();
    }

    /// Pause animation. No-op if already stopped.
    pub fn stop(&self) {
        self.host.borrow_mut().engine.stop();
    }
}
