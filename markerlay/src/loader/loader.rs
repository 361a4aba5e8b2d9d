//! The library loader service.

use std::sync::Arc;

use futures::future::{BoxFuture, Shared};
use futures::FutureExt;
use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::error::LoadError;
use super::fetcher::ScriptFetcher;
use super::host::ScriptHost;
use super::patch::RuntimePatch;
use super::state::{Dependency, LoadProgress, LoaderState, Ready};

/// Published release of the scene framework.
pub const DEFAULT_SCENE_FRAMEWORK_URL: &str = "https://aframe.io/releases/1.5.0/aframe.min.js";

/// Published release of the image tracker.
pub const DEFAULT_IMAGE_TRACKER_URL: &str =
    "https://cdn.jsdelivr.net/npm/mind-ar@1.2.5/dist/mindar-image-aframe.prod.js";

/// Configuration for the library loader.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Scene framework source location.
    pub scene_framework_url: String,

    /// Image tracker source location.
    pub image_tracker_url: String,

    /// Runtime patch applied before the framework's source runs.
    pub patch: RuntimePatch,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            scene_framework_url: DEFAULT_SCENE_FRAMEWORK_URL.to_string(),
            image_tracker_url: DEFAULT_IMAGE_TRACKER_URL.to_string(),
            patch: RuntimePatch::default(),
        }
    }
}

type SharedLoad = Shared<BoxFuture<'static, Result<Ready, LoadError>>>;

struct LoaderInner {
    state: LoaderState,
    load: Option<SharedLoad>,
}

/// Process-wide loader for the two engine dependencies.
///
/// [`ensure_ready`] is safe to call any number of times, concurrently or
/// sequentially: callers while a load is in flight attach to the same shared
/// outcome, callers after `Ready` resolve immediately, and callers after a
/// failure receive the stored error. Each dependency is fetched at most once
/// per process lifetime.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use markerlay::loader::{HttpScriptFetcher, LibraryLoader};
///
/// let loader = Arc::new(LibraryLoader::new(
///     Arc::new(HttpScriptFetcher::new()?),
///     host,
/// ));
/// let ready = loader.ensure_ready().await?;
/// ```
///
/// [`ensure_ready`]: LibraryLoader::ensure_ready
pub struct LibraryLoader {
    fetcher: Arc<dyn ScriptFetcher>,
    host: Arc<dyn ScriptHost>,
    config: LoaderConfig,
    inner: Arc<Mutex<LoaderInner>>,
    progress_tx: watch::Sender<LoadProgress>,
}

impl LibraryLoader {
    /// Create a loader with the default dependency URLs.
    pub fn new(fetcher: Arc<dyn ScriptFetcher>, host: Arc<dyn ScriptHost>) -> Self {
        Self::with_config(fetcher, host, LoaderConfig::default())
    }

    /// Create a loader with a custom configuration.
    pub fn with_config(
        fetcher: Arc<dyn ScriptFetcher>,
        host: Arc<dyn ScriptHost>,
        config: LoaderConfig,
    ) -> Self {
        let (progress_tx, _) = watch::channel(LoadProgress::IDLE);
        Self {
            fetcher,
            host,
            config,
            inner: Arc::new(Mutex::new(LoaderInner {
                state: LoaderState::NotStarted,
                load: None,
            })),
            progress_tx,
        }
    }

    /// Current loader state.
    pub fn state(&self) -> LoaderState {
        self.inner.lock().state.clone()
    }

    /// Whether both dependencies are installed.
    pub fn is_ready(&self) -> bool {
        matches!(self.inner.lock().state, LoaderState::Ready)
    }

    /// Subscribe to load progress milestones.
    pub fn subscribe_progress(&self) -> watch::Receiver<LoadProgress> {
        self.progress_tx.subscribe()
    }

    /// Ensure both dependencies are installed, in order.
    ///
    /// Returns the [`Ready`] proof required by
    /// [`SessionBuilder::build`](crate::session::SessionBuilder::build).
    pub async fn ensure_ready(&self) -> Result<Ready, LoadError> {
        let load = {
            let mut inner = self.inner.lock();
            match &inner.state {
                LoaderState::Ready => return Ok(Ready::proof()),
                LoaderState::Failed(e) => return Err(e.clone()),
                _ => {}
            }

            match inner.load.clone() {
                Some(load) => load,
                None => {
                    let load = Self::run_load(
                        Arc::clone(&self.inner),
                        Arc::clone(&self.fetcher),
                        Arc::clone(&self.host),
                        self.config.clone(),
                        self.progress_tx.clone(),
                    )
                    .boxed()
                    .shared();
                    inner.load = Some(load.clone());
                    load
                }
            }
        };

        load.await
    }

    /// Run the load sequence once, recording the outcome in the shared state.
    async fn run_load(
        inner: Arc<Mutex<LoaderInner>>,
        fetcher: Arc<dyn ScriptFetcher>,
        host: Arc<dyn ScriptHost>,
        config: LoaderConfig,
        progress: watch::Sender<LoadProgress>,
    ) -> Result<Ready, LoadError> {
        let result = Self::load_dependencies(&inner, &fetcher, &host, &config, &progress).await;

        let mut guard = inner.lock();
        match &result {
            Ok(_) => {
                guard.state = LoaderState::Ready;
                info!("engine dependencies ready");
            }
            Err(e) => {
                guard.state = LoaderState::Failed(e.clone());
                warn!(error = %e, "engine dependency load failed");
            }
        }
        guard.load = None;

        result
    }

    async fn load_dependencies(
        inner: &Arc<Mutex<LoaderInner>>,
        fetcher: &Arc<dyn ScriptFetcher>,
        host: &Arc<dyn ScriptHost>,
        config: &LoaderConfig,
        progress: &watch::Sender<LoadProgress>,
    ) -> Result<Ready, LoadError> {
        progress.send_replace(LoadProgress::STARTED);

        // A previous session in this process may have installed everything.
        if host.is_present(Dependency::SceneFramework) && host.is_present(Dependency::ImageTracker)
        {
            debug!("both dependencies already present, skipping load");
            progress.send_replace(LoadProgress::COMPLETE);
            return Ok(Ready::proof());
        }

        host.apply_patch(&config.patch)?;
        progress.send_replace(LoadProgress::PATCHED);

        if !host.is_present(Dependency::SceneFramework) {
            inner.lock().state = LoaderState::LoadingSceneFramework;
            debug!(url = %config.scene_framework_url, "fetching scene framework");
            let source = fetcher.fetch(&config.scene_framework_url).await?;
            host.install(Dependency::SceneFramework, source).await?;
            info!("scene framework installed");
        }
        progress.send_replace(LoadProgress::FRAMEWORK_INSTALLED);

        // Must not begin until the framework install has completed: the
        // tracker's initialization assumes the framework's globals exist.
        if !host.is_present(Dependency::ImageTracker) {
            inner.lock().state = LoaderState::LoadingImageTracker;
            debug!(url = %config.image_tracker_url, "fetching image tracker");
            let source = fetcher.fetch(&config.image_tracker_url).await?;
            host.install(Dependency::ImageTracker, source).await?;
            info!("image tracker installed");
        }
        progress.send_replace(LoadProgress::TRACKER_INSTALLED);

        progress.send_replace(LoadProgress::COMPLETE);
        Ok(Ready::proof())
    }
}
