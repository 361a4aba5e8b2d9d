//! Shared value types for the engine surface.

use std::sync::OnceLock;

use regex::Regex;

/// User-agent fragments that identify handheld devices.
///
/// Handheld devices use the rear camera and get no mirror transform; anything
/// else is assumed to be a desktop/laptop with a user-facing webcam.
const HANDHELD_UA_PATTERN: &str =
    r"(?i)android|webos|iphone|ipad|ipod|blackberry|iemobile|opera mini";

/// Current viewport dimensions in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Viewport width in pixels.
    pub width: u32,
    /// Viewport height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Create a viewport with the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Explicit placement applied to a render surface element.
///
/// The engine's own sizing is unreliable across devices and orientations, so
/// the fitter overrides it with explicit pixel dimensions pinned to the
/// viewport origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Explicit width in pixels.
    pub width: u32,
    /// Explicit height in pixels.
    pub height: u32,
    /// Scale content to cover the full area, cropping overflow.
    pub cover: bool,
    /// Apply a horizontal mirror transform.
    pub mirrored: bool,
}

impl Placement {
    /// Full-viewport cover placement with the given mirror orientation.
    pub fn cover(viewport: Viewport, mirrored: bool) -> Self {
        Self {
            width: viewport.width,
            height: viewport.height,
            cover: true,
            mirrored,
        }
    }
}

/// Kind of a live element on the engine's render surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    /// The engine's render canvas.
    Canvas,
    /// A camera passthrough feed element injected by the engine.
    CameraFeed,
    /// The offscreen overlay media source. Never displayed directly, so the
    /// fitter must leave it untouched.
    OverlaySource,
}

/// A single addressable element on the render surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceElement {
    /// Engine-assigned element identifier.
    pub id: String,
    /// What the element is.
    pub kind: SurfaceKind,
}

impl SurfaceElement {
    /// Create a surface element descriptor.
    pub fn new(id: impl Into<String>, kind: SurfaceKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }
}

/// Marker-tracking signal emitted by the engine for the tracked entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingSignal {
    /// The marker entered the engine's confident detection state.
    Found,
    /// The marker left the engine's confident detection state.
    Lost,
}

/// Scene lifecycle event emitted by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneEvent {
    /// The scene graph finished loading.
    Loaded,
    /// The tracking subsystem reported itself ready (camera attached).
    Ready,
}

/// Coarse device classification driving mirror ergonomics.
///
/// A user in front of a desktop webcam expects a mirror-like feed; a handheld
/// pointing its rear camera at a printed target does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    /// Desktop/laptop with a user-facing camera.
    Desktop,
    /// Handheld device with a rear camera.
    Handheld,
}

impl DeviceClass {
    /// Classify a device from its user-agent string.
    pub fn from_user_agent(user_agent: &str) -> Self {
        static HANDHELD_UA: OnceLock<Regex> = OnceLock::new();
        let re = HANDHELD_UA.get_or_init(|| {
            Regex::new(HANDHELD_UA_PATTERN).expect("handheld UA pattern is valid")
        });

        if re.is_match(user_agent) {
            DeviceClass::Handheld
        } else {
            DeviceClass::Desktop
        }
    }

    /// Whether this device class gets a mirrored camera feed by default.
    pub fn default_mirror(&self) -> bool {
        matches!(self, DeviceClass::Desktop)
    }
}
