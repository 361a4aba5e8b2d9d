//! Viewport fitting.
//!
//! The engine re-asserts its own surface sizing asynchronously after the
//! camera stream attaches and after internal re-layouts, so fitting once on
//! readiness is not enough. This module provides one idempotent
//! [`ViewportFitter::fit`] operation and the tasks that funnel into it:
//!
//! - a readiness listener that fits on every scene `Loaded`/`Ready` signal,
//!   with a settle delay before the first fit and a fallback timer in case no
//!   readiness signal ever arrives
//! - a bounded repeating schedule that absorbs late internal re-layouts and
//!   self-cancels at its attempt ceiling
//! - a resize listener that fits on every viewport resize for the life of
//!   the session
//!
//! All tasks are guarded by the session's cancellation token.

mod fitter;
mod schedule;

pub use fitter::ViewportFitter;

#[cfg(test)]
pub use fitter::tests::RecordingSurface;
pub use schedule::{
    spawn_fit_schedule, spawn_readiness_listener, spawn_resize_listener, FitScheduleConfig,
    DEFAULT_FIT_ATTEMPTS, DEFAULT_FIT_INTERVAL, DEFAULT_READY_FALLBACK, DEFAULT_SETTLE_DELAY,
};
