//! Configuration file loading.
//!
//! Sessions are configured through a small INI file:
//!
//! ```ini
//! [session]
//! marker_url = https://cdn.example/targets.mind
//! video_url = https://cdn.example/clip.mp4
//! mirror = auto
//!
//! [viewport]
//! fit_attempts = 10
//! fit_interval_ms = 500
//!
//! [loader]
//! scene_framework_url = https://aframe.io/releases/1.5.0/aframe.min.js
//! image_tracker_url = https://cdn.jsdelivr.net/npm/mind-ar@1.2.5/dist/mindar-image-aframe.prod.js
//! ```
//!
//! Only `[session] marker_url` and `video_url` are required — they are
//! content, not infrastructure, so there is no baked-in default. Everything
//! else falls back to the crate's tuning constants.

use std::path::{Path, PathBuf};
use std::time::Duration;

use ini::Ini;
use thiserror::Error;

use crate::engine::DeviceClass;
use crate::loader::{LoaderConfig, RuntimePatch};
use crate::session::SessionConfig;
use crate::viewport::{FitScheduleConfig, DEFAULT_FIT_ATTEMPTS, DEFAULT_FIT_INTERVAL};

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read or parsed.
    #[error("failed to load config file {path}: {reason}")]
    LoadFailed { path: PathBuf, reason: String },

    /// A required key is absent.
    #[error("missing required key [{section}] {key}")]
    MissingKey {
        section: &'static str,
        key: &'static str,
    },

    /// A key holds a value that cannot be parsed.
    #[error("invalid value for [{section}] {key}: {value}")]
    InvalidValue {
        section: &'static str,
        key: &'static str,
        value: String,
    },
}

/// Mirror setting from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MirrorSetting {
    /// Decide from the device class: desktops mirror, handhelds do not.
    #[default]
    Auto,
    /// Always mirror.
    On,
    /// Never mirror.
    Off,
}

impl MirrorSetting {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(MirrorSetting::Auto),
            "on" | "true" | "yes" => Ok(MirrorSetting::On),
            "off" | "false" | "no" => Ok(MirrorSetting::Off),
            _ => Err(ConfigError::InvalidValue {
                section: "session",
                key: "mirror",
                value: value.to_string(),
            }),
        }
    }

    /// Resolve to a concrete mirror flag for the given device.
    pub fn resolve(&self, device: DeviceClass) -> bool {
        match self {
            MirrorSetting::Auto => device.default_mirror(),
            MirrorSetting::On => true,
            MirrorSetting::Off => false,
        }
    }
}

/// Loaded configuration file.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Marker descriptor location.
    pub marker_url: String,

    /// Overlay video location.
    pub video_url: String,

    /// Mirror setting.
    pub mirror: MirrorSetting,

    /// Fit schedule attempt ceiling.
    pub fit_attempts: u32,

    /// Fit schedule interval in milliseconds.
    pub fit_interval_ms: u64,

    /// Scene framework source override.
    pub scene_framework_url: Option<String>,

    /// Image tracker source override.
    pub image_tracker_url: Option<String>,
}

impl ConfigFile {
    /// Default configuration file location under the user config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("markerlay").join("markerlay.ini"))
    }

    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_file(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let session = ini
            .section(Some("session"))
            .ok_or(ConfigError::MissingKey {
                section: "session",
                key: "marker_url",
            })?;

        let marker_url = session
            .get("marker_url")
            .ok_or(ConfigError::MissingKey {
                section: "session",
                key: "marker_url",
            })?
            .to_string();

        let video_url = session
            .get("video_url")
            .ok_or(ConfigError::MissingKey {
                section: "session",
                key: "video_url",
            })?
            .to_string();

        let mirror = match session.get("mirror") {
            Some(value) => MirrorSetting::parse(value)?,
            None => MirrorSetting::default(),
        };

        let viewport = ini.section(Some("viewport"));
        let fit_attempts = match viewport.and_then(|s| s.get("fit_attempts")) {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
                section: "viewport",
                key: "fit_attempts",
                value: value.to_string(),
            })?,
            None => DEFAULT_FIT_ATTEMPTS,
        };
        let fit_interval_ms = match viewport.and_then(|s| s.get("fit_interval_ms")) {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
                section: "viewport",
                key: "fit_interval_ms",
                value: value.to_string(),
            })?,
            None => DEFAULT_FIT_INTERVAL.as_millis() as u64,
        };

        let loader = ini.section(Some("loader"));
        let scene_framework_url = loader
            .and_then(|s| s.get("scene_framework_url"))
            .map(str::to_string);
        let image_tracker_url = loader
            .and_then(|s| s.get("image_tracker_url"))
            .map(str::to_string);

        Ok(Self {
            marker_url,
            video_url,
            mirror,
            fit_attempts,
            fit_interval_ms,
            scene_framework_url,
            image_tracker_url,
        })
    }

    /// Build the session configuration for the given device class.
    pub fn session_config(&self, device: DeviceClass) -> SessionConfig {
        SessionConfig::new(
            self.marker_url.clone(),
            self.video_url.clone(),
            self.mirror.resolve(device),
        )
    }

    /// Build the fit schedule configuration.
    pub fn fit_schedule(&self) -> FitScheduleConfig {
        FitScheduleConfig {
            attempts: self.fit_attempts,
            interval: Duration::from_millis(self.fit_interval_ms),
        }
    }

    /// Build the loader configuration.
    pub fn loader_config(&self) -> LoaderConfig {
        let defaults = LoaderConfig::default();
        LoaderConfig {
            scene_framework_url: self
                .scene_framework_url
                .clone()
                .unwrap_or(defaults.scene_framework_url),
            image_tracker_url: self
                .image_tracker_url
                .clone()
                .unwrap_or(defaults.image_tracker_url),
            patch: RuntimePatch::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use tempfile::NamedTempFile;

    use crate::loader::DEFAULT_SCENE_FRAMEWORK_URL;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("create temp config");
        file.write_all(contents.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn test_load_minimal_config() {
        let file = write_config(
            "[session]\n\
             marker_url = https://cdn.example/targets.mind\n\
             video_url = https://cdn.example/clip.mp4\n",
        );

        let config = ConfigFile::load(file.path()).unwrap();
        assert_eq!(config.marker_url, "https://cdn.example/targets.mind");
        assert_eq!(config.video_url, "https://cdn.example/clip.mp4");
        assert_eq!(config.mirror, MirrorSetting::Auto);
        assert_eq!(config.fit_attempts, DEFAULT_FIT_ATTEMPTS);
        assert_eq!(
            config.fit_interval_ms,
            DEFAULT_FIT_INTERVAL.as_millis() as u64
        );
        assert!(config.scene_framework_url.is_none());
    }

    #[test]
    fn test_load_full_config() {
        let file = write_config(
            "[session]\n\
             marker_url = m.mind\n\
             video_url = v.mp4\n\
             mirror = off\n\
             [viewport]\n\
             fit_attempts = 20\n\
             fit_interval_ms = 250\n\
             [loader]\n\
             scene_framework_url = https://cdn.example/framework.js\n\
             image_tracker_url = https://cdn.example/tracker.js\n",
        );

        let config = ConfigFile::load(file.path()).unwrap();
        assert_eq!(config.mirror, MirrorSetting::Off);
        assert_eq!(config.fit_attempts, 20);
        assert_eq!(config.fit_interval_ms, 250);

        let schedule = config.fit_schedule();
        assert_eq!(schedule.attempts, 20);
        assert_eq!(schedule.interval, Duration::from_millis(250));

        let loader = config.loader_config();
        assert_eq!(loader.scene_framework_url, "https://cdn.example/framework.js");
        assert_eq!(loader.image_tracker_url, "https://cdn.example/tracker.js");
    }

    #[test]
    fn test_missing_marker_url_is_an_error() {
        let file = write_config("[session]\nvideo_url = v.mp4\n");
        let err = ConfigFile::load(file.path()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingKey {
                section: "session",
                key: "marker_url"
            }
        ));
    }

    #[test]
    fn test_invalid_mirror_is_an_error() {
        let file = write_config(
            "[session]\nmarker_url = m\nvideo_url = v\nmirror = sideways\n",
        );
        let err = ConfigFile::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "mirror", .. }));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = ConfigFile::load(Path::new("/nonexistent/markerlay.ini")).unwrap_err();
        assert!(matches!(err, ConfigError::LoadFailed { .. }));
    }

    #[test]
    fn test_mirror_auto_resolves_by_device() {
        assert!(MirrorSetting::Auto.resolve(DeviceClass::Desktop));
        assert!(!MirrorSetting::Auto.resolve(DeviceClass::Handheld));
        assert!(MirrorSetting::On.resolve(DeviceClass::Handheld));
        assert!(!MirrorSetting::Off.resolve(DeviceClass::Desktop));
    }

    #[test]
    fn test_session_config_resolves_mirror() {
        let file = write_config(
            "[session]\nmarker_url = m.mind\nvideo_url = v.mp4\nmirror = auto\n",
        );
        let config = ConfigFile::load(file.path()).unwrap();

        let desktop = config.session_config(DeviceClass::Desktop);
        assert!(desktop.mirror);
        assert_eq!(desktop.marker_source_ref, "m.mind");

        let handheld = config.session_config(DeviceClass::Handheld);
        assert!(!handheld.mirror);
    }

    #[test]
    fn test_loader_defaults_when_section_absent() {
        let file = write_config("[session]\nmarker_url = m\nvideo_url = v\n");
        let config = ConfigFile::load(file.path()).unwrap();
        let loader = config.loader_config();
        assert_eq!(loader.scene_framework_url, DEFAULT_SCENE_FRAMEWORK_URL);
    }
}
