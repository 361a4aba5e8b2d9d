//! The session lifecycle controller.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::config::ControllerConfig;
use super::error::SessionError;
use crate::bridge::{spawn_bridge, TrackingBridge};
use crate::engine::TrackingEngine;
use crate::loader::LibraryLoader;
use crate::session::{SessionBuilder, SessionHandle};
use crate::telemetry::{SessionMetrics, TelemetrySnapshot};
use crate::viewport::{
    spawn_fit_schedule, spawn_readiness_listener, spawn_resize_listener, ViewportFitter,
};

/// A running session and everything that must die with it.
struct ActiveSession {
    handle: SessionHandle,
    cancel: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
}

/// Coordinates the full lifecycle of an AR session.
///
/// Owns the one live [`SessionHandle`]: starting a new session always tears
/// down the previous one first, because the engine holds exclusive camera
/// access per runtime. Reconfiguration never mutates a live session — it
/// rebuilds.
///
/// # Example
///
/// ```ignore
/// use markerlay::controller::{ControllerConfig, SessionController};
/// use markerlay::session::SessionConfig;
///
/// let config = ControllerConfig::new(
///     "ar-root",
///     SessionConfig::new(marker_url, video_url, mirror),
/// );
/// let mut controller = SessionController::new(engine, loader, config);
/// controller.start().await?;
/// // ...
/// controller.shutdown().await;
/// ```
pub struct SessionController {
    engine: Arc<dyn TrackingEngine>,
    loader: Arc<LibraryLoader>,
    config: ControllerConfig,
    metrics: Arc<SessionMetrics>,
    active: Option<ActiveSession>,
}

impl SessionController {
    /// Create a controller. No work happens until [`start`](Self::start).
    pub fn new(
        engine: Arc<dyn TrackingEngine>,
        loader: Arc<LibraryLoader>,
        config: ControllerConfig,
    ) -> Self {
        Self {
            engine,
            loader,
            config,
            metrics: Arc::new(SessionMetrics::new()),
            active: None,
        }
    }

    /// Whether a session is currently live.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Current configuration.
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// The dependency loader, for progress subscription.
    pub fn loader(&self) -> &Arc<LibraryLoader> {
        &self.loader
    }

    /// Point-in-time telemetry snapshot.
    pub fn telemetry(&self) -> TelemetrySnapshot {
        self.metrics.snapshot()
    }

    /// Start a session, tearing down any previous one first.
    pub async fn start(&mut self) -> Result<(), SessionError> {
        self.shutdown().await;

        let ready = self.loader.ensure_ready().await?;

        let builder = SessionBuilder::new(Arc::clone(&self.engine));
        let handle = builder
            .build(&self.config.mount, &self.config.session, ready)
            .await?;
        self.metrics.scene_built();

        let cancel = CancellationToken::new();
        let fitter = ViewportFitter::new(self.config.session.mirror, Arc::clone(&self.metrics));
        let surface = handle.surface();
        let scene_rx = handle.subscribe_scene();
        let tracking_rx = handle.subscribe_tracking();
        let bridge = TrackingBridge::new(handle.overlay(), Arc::clone(&self.metrics));

        let tasks = vec![
            spawn_readiness_listener(
                fitter.clone(),
                Arc::clone(&surface),
                scene_rx,
                self.config.settle_delay,
                self.config.ready_fallback,
                cancel.clone(),
            ),
            spawn_fit_schedule(
                self.config.fit_schedule.clone(),
                fitter.clone(),
                Arc::clone(&surface),
                cancel.clone(),
            ),
            spawn_resize_listener(fitter, surface, Arc::clone(&self.metrics), cancel.clone()),
            spawn_bridge(bridge, tracking_rx, cancel.clone()),
        ];

        info!(
            mount = %self.config.mount,
            mirror = self.config.session.mirror,
            "AR session started"
        );
        self.active = Some(ActiveSession {
            handle,
            cancel,
            tasks,
        });
        Ok(())
    }

    /// Tear down the live session, if any.
    ///
    /// Cancels every task, waits for them to finish, then stops the engine
    /// runtime so the camera is released. Idempotent.
    pub async fn shutdown(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        debug!(mount = %self.config.mount, "tearing down AR session");
        active.cancel.cancel();
        for task in active.tasks {
            if let Err(e) = task.await {
                warn!(error = %e, "session task ended abnormally");
            }
        }

        if let Err(e) = active.handle.stop() {
            warn!(error = %e, "failed to stop tracking session");
        }
        info!(mount = %self.config.mount, "AR session stopped");
    }

    /// Change the mirror setting.
    ///
    /// A live session is never mutated; the session is rebuilt with the new
    /// orientation. A no-op when the setting is unchanged on a live session.
    pub async fn set_mirror(&mut self, mirror: bool) -> Result<(), SessionError> {
        if self.is_active() && self.config.session.mirror == mirror {
            return Ok(());
        }
        self.config.session.mirror = mirror;
        self.start().await
    }
}
