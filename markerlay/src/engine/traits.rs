//! Engine trait seams.
//!
//! The orchestration layer never talks to a concrete engine type. Everything
//! goes through these traits so the core can be driven end-to-end in tests by
//! scripted mocks, and so a different tracking engine can be dropped in behind
//! the same session lifecycle.
//!
//! # Dyn Compatibility
//!
//! Async methods use `Pin<Box<dyn Future>>` (the [`BoxFuture`] alias) so the
//! traits support trait objects (`Arc<dyn SceneRuntime>` etc.).

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::broadcast;

use super::types::{Placement, SceneEvent, SurfaceElement, TrackingSignal, Viewport};
use crate::session::SceneDescriptor;

/// Boxed future type for dyn-compatible async methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Errors reported by the tracking engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine failed to construct a usable scene from the descriptor.
    #[error("scene construction failed: {0}")]
    SceneConstruction(String),

    /// The engine rejected a stop request.
    #[error("failed to stop tracking session: {0}")]
    Stop(String),

    /// The session was already stopped.
    #[error("tracking session already stopped")]
    AlreadyStopped,
}

/// Errors reported when requesting overlay playback.
///
/// Playback rejection is an expected condition (autoplay policy), recovered
/// locally by the bridge rather than escalated.
#[derive(Debug, Clone, Error)]
pub enum PlaybackError {
    /// The host refused to start playback, typically an autoplay policy.
    #[error("playback request rejected: {0}")]
    Rejected(String),

    /// The overlay media element is not available.
    #[error("overlay media unavailable")]
    Unavailable,
}

/// Entry point into the external tracking/rendering engine.
pub trait TrackingEngine: Send + Sync {
    /// Build a scene from the descriptor, replacing any content previously
    /// rendered at the descriptor's mount point.
    ///
    /// The marker source reference is passed to the engine verbatim; malformed
    /// references surface here as [`EngineError::SceneConstruction`], not
    /// earlier.
    fn build_scene(
        &self,
        descriptor: &SceneDescriptor,
    ) -> BoxFuture<'_, Result<Arc<dyn SceneRuntime>, EngineError>>;
}

/// A live scene constructed by the engine.
///
/// The runtime owns the camera hardware for its lifetime. [`stop`] must be
/// invoked before the runtime is discarded so the engine releases the camera;
/// dropping a running scene leaks the capture session inside the engine.
///
/// [`stop`]: SceneRuntime::stop
pub trait SceneRuntime: Send + Sync {
    /// Subscribe to scene lifecycle events (`Loaded`, `Ready`).
    fn subscribe_scene(&self) -> broadcast::Receiver<SceneEvent>;

    /// Subscribe to marker tracking signals for the tracked entity.
    fn subscribe_tracking(&self) -> broadcast::Receiver<TrackingSignal>;

    /// The render surface backing this scene.
    fn surface(&self) -> Arc<dyn RenderSurface>;

    /// The overlay media player parented to the tracked entity.
    fn overlay(&self) -> Arc<dyn OverlayPlayer>;

    /// Stop the tracking subsystem and release the camera.
    fn stop(&self) -> Result<(), EngineError>;
}

/// The engine's render surface and the live elements on it.
pub trait RenderSurface: Send + Sync {
    /// Current viewport dimensions.
    fn viewport(&self) -> Viewport;

    /// Enumerate the live elements currently on the surface.
    ///
    /// The set changes over time as the engine injects camera feed elements,
    /// which is one reason a single fit pass is insufficient.
    fn elements(&self) -> Vec<SurfaceElement>;

    /// Apply an explicit placement to one element.
    ///
    /// Placement is best-effort: applying to an element that no longer exists
    /// is a silent no-op, never an error.
    fn place(&self, element: &SurfaceElement, placement: &Placement);

    /// Ask the engine to resize its internal render target.
    fn resize_renderer(&self, viewport: Viewport);

    /// Subscribe to viewport resize notifications.
    fn subscribe_resize(&self) -> broadcast::Receiver<Viewport>;
}

/// Playback control for the overlay media source.
pub trait OverlayPlayer: Send + Sync {
    /// Request playback start.
    ///
    /// Starting an already-playing overlay is a no-op. Rejection (autoplay
    /// policy) is returned as an error for the caller to log and absorb.
    fn play(&self) -> BoxFuture<'_, Result<(), PlaybackError>>;

    /// Pause playback. Pausing a paused overlay is a no-op.
    fn pause(&self);

    /// Reset the play position to the start of the clip.
    fn rewind(&self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_display() {
        let err = EngineError::SceneConstruction("bad marker descriptor".to_string());
        assert!(err.to_string().contains("scene construction failed"));
        assert!(err.to_string().contains("bad marker descriptor"));
    }

    #[test]
    fn test_playback_error_display() {
        let err = PlaybackError::Rejected("NotAllowedError".to_string());
        assert!(err.to_string().contains("rejected"));
        assert!(err.to_string().contains("NotAllowedError"));
    }
}
