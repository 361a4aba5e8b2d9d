//! Loader state machine and progress reporting.

use std::fmt;

use super::error::LoadError;

/// The two external engine dependencies, in load order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dependency {
    /// The 3D/AR scene framework. Loads first.
    SceneFramework,
    /// The marker-tracking engine. Loads second; its initialization assumes
    /// the scene framework's globals exist.
    ImageTracker,
}

impl Dependency {
    /// Human-readable name for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Dependency::SceneFramework => "scene framework",
            Dependency::ImageTracker => "image tracker",
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Loader lifecycle state.
///
/// Singleton per loader instance; once `Ready` it never reverts, and
/// `Failed` is sticky — later calls replay the stored error instead of
/// re-triggering loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoaderState {
    /// No load has been requested yet.
    NotStarted,
    /// Fetching/installing the scene framework.
    LoadingSceneFramework,
    /// Fetching/installing the image tracker.
    LoadingImageTracker,
    /// Both dependencies are installed.
    Ready,
    /// A load step failed; the error replays to every caller.
    Failed(LoadError),
}

/// Proof that both engine dependencies are installed.
///
/// Only the loader can mint this, which makes "build a scene before the
/// dependencies are ready" unrepresentable at the type level.
#[derive(Debug, Clone, Copy)]
pub struct Ready(());

impl Ready {
    pub(crate) fn proof() -> Self {
        Ready(())
    }
}

/// Load progress milestone, published on a watch channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadProgress {
    /// Percent complete, 0-100.
    pub percent: u8,
}

impl LoadProgress {
    /// No load requested yet.
    pub const IDLE: LoadProgress = LoadProgress { percent: 0 };
    /// Load sequence started.
    pub const STARTED: LoadProgress = LoadProgress { percent: 10 };
    /// Runtime patch applied.
    pub const PATCHED: LoadProgress = LoadProgress { percent: 20 };
    /// Scene framework installed.
    pub const FRAMEWORK_INSTALLED: LoadProgress = LoadProgress { percent: 50 };
    /// Image tracker installed.
    pub const TRACKER_INSTALLED: LoadProgress = LoadProgress { percent: 80 };
    /// Both dependencies ready.
    pub const COMPLETE: LoadProgress = LoadProgress { percent: 100 };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dependency_display() {
        assert_eq!(Dependency::SceneFramework.to_string(), "scene framework");
        assert_eq!(Dependency::ImageTracker.to_string(), "image tracker");
    }

    #[test]
    fn test_progress_milestones_are_ordered() {
        assert!(LoadProgress::IDLE < LoadProgress::STARTED);
        assert!(LoadProgress::STARTED < LoadProgress::PATCHED);
        assert!(LoadProgress::PATCHED < LoadProgress::FRAMEWORK_INSTALLED);
        assert!(LoadProgress::FRAMEWORK_INSTALLED < LoadProgress::TRACKER_INSTALLED);
        assert!(LoadProgress::TRACKER_INSTALLED < LoadProgress::COMPLETE);
    }

    #[test]
    fn test_loader_state_failed_holds_error() {
        let state = LoaderState::Failed(LoadError::PatchRejected("host gone".to_string()));
        assert!(matches!(state, LoaderState::Failed(_)));
    }
}
