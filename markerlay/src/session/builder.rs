//! Session builder.

use std::sync::Arc;

use tracing::{debug, info};

use super::config::SessionConfig;
use super::descriptor::SceneDescriptor;
use super::error::BuildError;
use super::handle::SessionHandle;
use crate::engine::TrackingEngine;
use crate::loader::Ready;

/// Builds live sessions against a tracking engine.
///
/// The builder is cheap to construct and reusable; each [`build`] call
/// produces an independent [`SessionHandle`]. The caller must have torn down
/// any prior handle for the same mount first — the engine replaces the
/// mount's content without stopping whatever was there before, and the camera
/// belongs to whichever runtime holds it.
///
/// [`build`]: SessionBuilder::build
pub struct SessionBuilder {
    engine: Arc<dyn TrackingEngine>,
}

impl SessionBuilder {
    /// Create a builder for the given engine.
    pub fn new(engine: Arc<dyn TrackingEngine>) -> Self {
        Self { engine }
    }

    /// Build a session at the given mount point.
    ///
    /// Requires the loader's [`Ready`] proof: both engine dependencies must be
    /// installed before any scene can be constructed.
    pub async fn build(
        &self,
        mount: &str,
        config: &SessionConfig,
        ready: Ready,
    ) -> Result<SessionHandle, BuildError> {
        // Proof of loader readiness; nothing to do with it beyond holding it.
        let _ = ready;

        let descriptor = SceneDescriptor::new(mount, config);
        debug!(
            mount,
            marker = %config.marker_source_ref,
            media = %config.overlay_media_ref,
            "building AR scene"
        );

        let runtime = self.engine.build_scene(&descriptor).await?;
        info!(mount, "AR scene constructed");

        Ok(SessionHandle::new(runtime, mount))
    }
}
