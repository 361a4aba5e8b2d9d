//! Handle to a live AR session.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::engine::{
    EngineError, OverlayPlayer, RenderSurface, SceneEvent, SceneRuntime, TrackingSignal,
};

/// Handle to a live scene and its mounted render surface.
///
/// The handle is the exclusive owner of the engine runtime for its lifetime.
/// [`stop`] invokes the engine's own session-stop control first — the engine
/// owns camera hardware that must be explicitly released — and is idempotent;
/// a handle that was never stopped performs a best-effort stop on drop.
///
/// [`stop`]: SessionHandle::stop
pub struct SessionHandle {
    runtime: Arc<dyn SceneRuntime>,
    mount: String,
    stopped: AtomicBool,
}

impl SessionHandle {
    /// Wrap an engine runtime mounted at the given point.
    pub(crate) fn new(runtime: Arc<dyn SceneRuntime>, mount: impl Into<String>) -> Self {
        Self {
            runtime,
            mount: mount.into(),
            stopped: AtomicBool::new(false),
        }
    }

    /// The mount point this session renders into.
    pub fn mount(&self) -> &str {
        &self.mount
    }

    /// Subscribe to scene lifecycle events.
    pub fn subscribe_scene(&self) -> broadcast::Receiver<SceneEvent> {
        self.runtime.subscribe_scene()
    }

    /// Subscribe to marker tracking signals.
    pub fn subscribe_tracking(&self) -> broadcast::Receiver<TrackingSignal> {
        self.runtime.subscribe_tracking()
    }

    /// The render surface backing this session.
    pub fn surface(&self) -> Arc<dyn RenderSurface> {
        self.runtime.surface()
    }

    /// The overlay media player.
    pub fn overlay(&self) -> Arc<dyn OverlayPlayer> {
        self.runtime.overlay()
    }

    /// Whether this session has been stopped.
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    /// Stop the tracking session and release the camera.
    ///
    /// Safe to call more than once; subsequent calls are no-ops.
    pub fn stop(&self) -> Result<(), EngineError> {
        if self.stopped.swap(true, Ordering::SeqCst) {
            debug!(mount = %self.mount, "session already stopped");
            return Ok(());
        }

        debug!(mount = %self.mount, "stopping tracking session");
        self.runtime.stop()
    }
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        if !self.stopped.swap(true, Ordering::SeqCst) {
            if let Err(e) = self.runtime.stop() {
                warn!(mount = %self.mount, error = %e, "failed to stop tracking session on drop");
            }
        }
    }
}
