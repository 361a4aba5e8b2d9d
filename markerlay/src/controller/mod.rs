//! Session lifecycle orchestration.
//!
//! This module provides [`SessionController`], which coordinates the startup,
//! operation, and teardown of an AR session.
//!
//! # Startup Sequence
//!
//! 1. Tear down any previous session (the camera belongs to one runtime)
//! 2. `LibraryLoader::ensure_ready` gates everything else
//! 3. `SessionBuilder::build` constructs the scene
//! 4. Viewport tasks start: readiness listener, bounded fit schedule,
//!    resize listener
//! 5. The tracking bridge starts driving overlay playback
//!
//! All spawned tasks share one cancellation token; teardown cancels it,
//! awaits the tasks, then stops the engine runtime.

mod config;
mod controller;
mod error;

pub use config::ControllerConfig;
pub use controller::SessionController;
pub use error::SessionError;
