//! Per-session configuration.

/// Configuration for one AR session.
///
/// Immutable once a session starts. Changing any field requires tearing the
/// session down and rebuilding; the controller never mutates a live session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Remote marker descriptor reference, passed to the engine verbatim.
    pub marker_source_ref: String,

    /// Remote overlay video reference, passed to the engine verbatim.
    pub overlay_media_ref: String,

    /// Mirror the camera feed horizontally (desktop front-camera ergonomics).
    pub mirror: bool,
}

impl SessionConfig {
    /// Create a session configuration.
    ///
    /// Neither reference is validated here; malformed values surface as
    /// engine-level build failures.
    pub fn new(
        marker_source_ref: impl Into<String>,
        overlay_media_ref: impl Into<String>,
        mirror: bool,
    ) -> Self {
        Self {
            marker_source_ref: marker_source_ref.into(),
            overlay_media_ref: overlay_media_ref.into(),
            mirror,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_config_new() {
        let config = SessionConfig::new("m.mind", "v.mp4", false);
        assert_eq!(config.marker_source_ref, "m.mind");
        assert_eq!(config.overlay_media_ref, "v.mp4");
        assert!(!config.mirror);
    }
}
