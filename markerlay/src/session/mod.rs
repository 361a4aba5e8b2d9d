//! AR session construction.
//!
//! This module turns a [`SessionConfig`] into a live scene behind the engine:
//! a passive camera, one tracked entity bound to a single marker target, and a
//! looping overlay video parented to it. The geometry and tracking-filter
//! values are fixed design constants, never derived from input.
//!
//! Construction requires the loader's [`Ready`](crate::loader::Ready) proof,
//! so a session can never exist before both engine dependencies are installed.

mod builder;
mod config;
mod descriptor;
mod error;
mod handle;

pub use builder::SessionBuilder;
pub use config::SessionConfig;
pub use descriptor::{
    CameraSettings, ChromeSettings, OverlaySettings, RendererSettings, SceneDescriptor,
    TrackerSettings, FILTER_BETA, FILTER_MIN_CONFIDENCE, OVERLAY_HEIGHT, OVERLAY_WIDTH,
    TRACKED_MARKER_INDEX,
};
pub use error::BuildError;
pub use handle::SessionHandle;
