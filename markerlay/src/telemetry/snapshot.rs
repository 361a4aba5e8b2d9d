//! Point-in-time telemetry snapshot.

use std::fmt;

/// A copy of all session counters at one moment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TelemetrySnapshot {
    /// Scenes successfully built.
    pub scene_builds: u64,
    /// Marker Found signals observed.
    pub markers_found: u64,
    /// Marker Lost signals observed.
    pub markers_lost: u64,
    /// Overlay playback requests rejected by the host.
    pub playback_rejections: u64,
    /// Viewport fits applied.
    pub fits_applied: u64,
    /// Viewport resizes observed.
    pub resize_events: u64,
}

impl fmt::Display for TelemetrySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "builds: {}, found: {}, lost: {}, playback rejections: {}, fits: {}, resizes: {}",
            self.scene_builds,
            self.markers_found,
            self.markers_lost,
            self.playback_rejections,
            self.fits_applied,
            self.resize_events
        )
    }
}
