//! Engine dependency loading.
//!
//! The tracking engine arrives as two external scripts with a hard ordering
//! requirement: the image tracker's initialization assumes the scene
//! framework's globals already exist. [`LibraryLoader`] owns that sequence as
//! a process-wide service with an idempotent [`ensure_ready`]: concurrent and
//! repeated calls share a single load outcome instead of re-triggering
//! fetches, and once the loader is `Ready` it never reverts.
//!
//! # Startup Sequence
//!
//! 1. Skip everything if both dependencies are already present in the host
//! 2. Apply the [`RuntimePatch`] (no-op device-profile payload) before any
//!    framework source runs
//! 3. Fetch and install the scene framework
//! 4. Fetch and install the image tracker
//!
//! A failure at any step is sticky: the loader transitions to
//! `Failed(reason)` and every later call replays that error. The caller
//! decides whether to surface it; there is no retry at this layer.
//!
//! [`ensure_ready`]: LibraryLoader::ensure_ready

mod error;
mod fetcher;
mod host;
mod loader;
mod patch;
mod state;

pub use error::LoadError;
pub use fetcher::{HttpScriptFetcher, ScriptFetcher, DEFAULT_FETCH_TIMEOUT_SECS};
pub use host::ScriptHost;
pub use loader::{
    LibraryLoader, LoaderConfig, DEFAULT_IMAGE_TRACKER_URL, DEFAULT_SCENE_FRAMEWORK_URL,
};
pub use patch::RuntimePatch;
pub use state::{Dependency, LoadProgress, LoaderState, Ready};

#[cfg(test)]
pub use fetcher::tests::MockScriptFetcher;
