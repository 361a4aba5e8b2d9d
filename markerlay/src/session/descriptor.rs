//! Scene descriptor handed to the tracking engine.
//!
//! The descriptor is plain data: the engine interprets it and owns everything
//! that happens afterwards. Geometry and filter values are tuning constants
//! recorded against the printed target's aspect ratio and the engine's jitter
//! behavior — smoother tracking is preferred over faster lock-on.

use serde::Serialize;

use super::config::SessionConfig;

/// Marker slot the tracked entity binds to. This system tracks exactly one
/// target.
pub const TRACKED_MARKER_INDEX: u32 = 0;

/// Overlay plane width in scene units.
pub const OVERLAY_WIDTH: f32 = 1.2;

/// Overlay plane height in scene units.
pub const OVERLAY_HEIGHT: f32 = 1.8;

/// Minimum cutoff frequency for the tracking confidence filter.
pub const FILTER_MIN_CONFIDENCE: f64 = 0.0001;

/// Beta parameter for the tracking confidence filter.
pub const FILTER_BETA: f64 = 0.001;

/// Complete description of the scene the engine should construct.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneDescriptor {
    /// Mount point identifier whose rendered content the scene replaces.
    pub mount: String,

    /// Marker descriptor reference, forwarded verbatim.
    pub marker_source: String,

    /// Tracking subsystem settings.
    pub tracker: TrackerSettings,

    /// Camera entity settings.
    pub camera: CameraSettings,

    /// Overlay video entity settings.
    pub overlay: OverlaySettings,

    /// Renderer settings.
    pub renderer: RendererSettings,

    /// Engine chrome suppression flags.
    pub chrome: ChromeSettings,
}

impl SceneDescriptor {
    /// Build the descriptor for a session.
    pub fn new(mount: impl Into<String>, config: &SessionConfig) -> Self {
        Self {
            mount: mount.into(),
            marker_source: config.marker_source_ref.clone(),
            tracker: TrackerSettings::default(),
            camera: CameraSettings::default(),
            overlay: OverlaySettings::for_media(&config.overlay_media_ref),
            renderer: RendererSettings::default(),
            chrome: ChromeSettings::default(),
        }
    }
}

/// Tracking subsystem settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackerSettings {
    /// Index of the marker target the entity binds to.
    pub target_index: u32,

    /// Start tracking as soon as the scene is up.
    pub auto_start: bool,

    /// Confidence filter minimum cutoff frequency.
    pub filter_min_confidence: f64,

    /// Confidence filter beta.
    pub filter_beta: f64,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            target_index: TRACKED_MARKER_INDEX,
            auto_start: true,
            filter_min_confidence: FILTER_MIN_CONFIDENCE,
            filter_beta: FILTER_BETA,
        }
    }
}

/// Camera entity settings. The camera is passive: its pose comes from the
/// tracking engine, so user orientation controls are disabled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CameraSettings {
    /// Camera position in scene units.
    pub position: [f32; 3],

    /// User look controls.
    pub look_controls_enabled: bool,

    /// Whether this camera renders the scene.
    pub active: bool,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            look_controls_enabled: false,
            active: true,
        }
    }
}

/// Overlay video entity settings.
///
/// The media source is offscreen: the engine textures the overlay plane from
/// it. It is muted by default so playback requests survive autoplay policy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlaySettings {
    /// Overlay media reference, forwarded verbatim.
    pub media_source: String,

    /// Plane position relative to the tracked entity.
    pub position: [f32; 3],

    /// Plane rotation relative to the tracked entity, degrees.
    pub rotation: [f32; 3],

    /// Plane width in scene units.
    pub width: f32,

    /// Plane height in scene units.
    pub height: f32,

    /// Plane opacity.
    pub opacity: f32,

    /// Preload the media before first playback.
    pub preload: bool,

    /// Loop playback.
    pub looped: bool,

    /// Start muted.
    pub muted: bool,

    /// The media is fetched cross-origin.
    pub cross_origin: bool,

    /// Play inline rather than fullscreen on handheld hosts.
    pub inline_playback: bool,
}

impl OverlaySettings {
    /// Overlay settings for the given media reference.
    pub fn for_media(media_source: impl Into<String>) -> Self {
        Self {
            media_source: media_source.into(),
            position: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0],
            width: OVERLAY_WIDTH,
            height: OVERLAY_HEIGHT,
            opacity: 1.0,
            preload: true,
            looped: true,
            muted: true,
            cross_origin: true,
            inline_playback: true,
        }
    }
}

/// Renderer settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RendererSettings {
    /// Output color space.
    pub color_space: String,

    /// Enable renderer color management.
    pub color_management: bool,

    /// Enable antialiasing.
    pub antialias: bool,

    /// Render with an alpha channel so the camera feed shows through.
    pub alpha: bool,
}

impl Default for RendererSettings {
    fn default() -> Self {
        Self {
            color_space: "srgb".to_string(),
            color_management: true,
            antialias: true,
            alpha: true,
        }
    }
}

/// Engine chrome suppression.
///
/// The engine ships its own loading/error/scanning overlays and VR entry UI.
/// All of it is disabled; the host owns presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ChromeSettings {
    /// Engine loading overlay.
    pub loading_ui: bool,

    /// Engine error overlay.
    pub error_ui: bool,

    /// Engine scanning-hint overlay.
    pub scanning_ui: bool,

    /// VR mode entry button.
    pub vr_mode_ui: bool,

    /// Device orientation permission dialog.
    pub orientation_permission_ui: bool,

    /// Engine loading screen.
    pub loading_screen: bool,
}
