//! Tracking/rendering engine abstraction
//!
//! This module defines the trait surface through which the session core talks
//! to the external marker-tracking and rendering engine. The engine owns all of
//! the hard mechanics — camera access, marker detection, pose estimation,
//! rendering — and the core only orchestrates it: build a scene, subscribe to
//! its signals, force its surfaces to cover the viewport, stop it.
//!
//! All engine-facing traits are dyn-compatible so the orchestration layer can
//! hold them as `Arc<dyn ...>` and tests can substitute scripted mocks without
//! any real engine behind them.

mod traits;
mod types;

pub use traits::{
    BoxFuture, EngineError, OverlayPlayer, PlaybackError, RenderSurface, SceneRuntime,
    TrackingEngine,
};
pub use types::{
    DeviceClass, Placement, SceneEvent, SurfaceElement, SurfaceKind, TrackingSignal, Viewport,
};
