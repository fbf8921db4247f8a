//! Animated night/day sky background for a web page.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It paints a
//! gradient sky, a twinkling star field, and the occasional meteor on a
//! full-viewport canvas, and toggles between a dark and a light theme from a
//! page button, remembering the choice in `localStorage`. The host page calls
//! [`host::mount`] once; everything else is driven by animation frames and
//! DOM events.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Sky controller and testable [`engine::EngineCore`] simulation |
//! | [`theme`] | Dark/light theme, button labels, per-theme palette |
//! | [`viewport`] | Canvas size, pixel ratio, and star density |
//! | [`star`] | Star field and dark-theme sparkles |
//! | [`meteor`] | Meteor spawning, motion, and expiry |
//! | [`frame_loop`] | Start/stop state machine over a frame scheduler |
//! | [`storage`] | Best-effort theme preference persistence |
//! | [`render`] | Canvas 2D painting |
//! | [`host`] | DOM binding and the JavaScript entry point |
//! | [`config`] | Mount configuration |
//! | [`error`] | Startup error type |
//! | [`consts`] | Tuned numeric constants |

pub mod config;
pub mod consts;
pub mod engine;
pub mod error;
pub mod frame_loop;
pub mod host;
pub mod meteor;
pub mod render;
pub mod star;
pub mod storage;
pub mod theme;
pub mod viewport;
