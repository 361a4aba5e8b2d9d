//! Pre-load runtime patch.

use serde::Serialize;

/// Side configuration applied to the host before the scene framework's source
/// runs.
///
/// The framework probes a remote device-profile database during
/// initialization and logs a noisy network failure when it is unreachable.
/// Supplying an inline no-op payload suppresses the fetch entirely; the
/// remaining flags disable legacy VR chrome the session never uses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuntimePatch {
    /// Replacement device-profile source. Defaults to an inline empty JSON
    /// payload so no network request is made.
    pub device_profile_url: String,

    /// Disable the cardboard-viewer UI.
    pub cardboard_ui_disabled: bool,

    /// Disable the rotate-device instruction overlay.
    pub rotate_instructions_disabled: bool,

    /// Render buffer scale.
    pub buffer_scale: f64,

    /// Keep the framework's deprecated API surface off.
    pub enable_deprecated_api: bool,
}

impl RuntimePatch {
    /// Inline data URL carrying an empty JSON document.
    pub fn no_op_device_profile() -> String {
        format!("data:application/json,{}", serde_json::json!({}))
    }
}

impl Default for RuntimePatch {
    fn default() -> Self {
        Self {
            device_profile_url: Self::no_op_device_profile(),
            cardboard_ui_disabled: true,
            rotate_instructions_disabled: true,
            buffer_scale: 1.0,
            enable_deprecated_api: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_op_device_profile_is_inline_empty_json() {
        assert_eq!(
            RuntimePatch::no_op_device_profile(),
            "data:application/json,{}"
        );
    }

    #[test]
    fn test_default_patch_disables_vr_chrome() {
        let patch = RuntimePatch::default();
        assert!(patch.cardboard_ui_disabled);
        assert!(patch.rotate_instructions_disabled);
        assert!(!patch.enable_deprecated_api);
        assert_eq!(patch.buffer_scale, 1.0);
    }

    #[test]
    fn test_patch_serializes() {
        let patch = RuntimePatch::default();
        let json = serde_json::to_value(&patch).expect("patch serializes");
        assert_eq!(json["device_profile_url"], "data:application/json,{}");
        assert_eq!(json["cardboard_ui_disabled"], true);
    }
}
