//! Atomic session metrics.

use std::sync::atomic::{AtomicU64, Ordering};

use super::snapshot::TelemetrySnapshot;

/// Lock-free counters recorded across a session's lifetime.
///
/// Shared as `Arc<SessionMetrics>` between the controller and its spawned
/// tasks. Counters survive rebuilds within one controller so diagnostics
/// cover the whole page lifetime, not just the current session.
#[derive(Debug, Default)]
pub struct SessionMetrics {
    scene_builds: AtomicU64,
    markers_found: AtomicU64,
    markers_lost: AtomicU64,
    playback_rejections: AtomicU64,
    fits_applied: AtomicU64,
    resize_events: AtomicU64,
}

impl SessionMetrics {
    /// Create zeroed metrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful scene build.
    pub fn scene_built(&self) {
        self.scene_builds.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a marker Found signal.
    pub fn marker_found(&self) {
        self.markers_found.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a marker Lost signal.
    pub fn marker_lost(&self) {
        self.markers_lost.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a rejected overlay playback request.
    pub fn playback_rejected(&self) {
        self.playback_rejections.fetch_add(1, Ordering::Relaxed);
    }

    /// Record one viewport fit application.
    pub fn fit_applied(&self) {
        self.fits_applied.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an observed viewport resize.
    pub fn resize_observed(&self) {
        self.resize_events.fetch_add(1, Ordering::Relaxed);
    }

    /// Take a point-in-time snapshot of all counters.
    pub fn snapshot(&self) -> TelemetrySnapshot {
        TelemetrySnapshot {
            scene_builds: self.scene_builds.load(Ordering::Relaxed),
            markers_found: self.markers_found.load(Ordering::Relaxed),
            markers_lost: self.markers_lost.load(Ordering::Relaxed),
            playback_rejections: self.playback_rejections.load(Ordering::Relaxed),
            fits_applied: self.fits_applied.load(Ordering::Relaxed),
            resize_events: self.resize_events.load(Ordering::Relaxed),
        }
    }
}
