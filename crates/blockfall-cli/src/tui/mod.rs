//! Minimal frame loop for full-screen terminal apps.
//!
//! [`Runtime`] owns the clock: it emits a tick at a fixed rate for game
//! logic, redraws only after something changed (throttled to the frame
//! rate), and forwards terminal input in between.

pub use self::{app::App, runtime::Runtime};

mod app;
mod event_loop;
mod runtime;
