//! Integration tests for the session lifecycle.
//!
//! These tests drive the full controller flow against a scripted mock engine:
//! - loader readiness gating session construction
//! - marker Found/Lost signals driving overlay playback
//! - teardown/rebuild keeping at most one live runtime
//! - viewport fitting rules, the bounded fit schedule, and resize handling
//!
//! Run with: `cargo test --test session_lifecycle_integration`

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::sleep;

use markerlay::controller::{ControllerConfig, SessionController, SessionError};
use markerlay::engine::{
    BoxFuture, EngineError, OverlayPlayer, Placement, PlaybackError, RenderSurface, SceneEvent,
    SceneRuntime, SurfaceElement, SurfaceKind, TrackingEngine, TrackingSignal, Viewport,
};
use markerlay::loader::{
    Dependency, LibraryLoader, LoadError, LoadProgress, RuntimePatch, ScriptFetcher, ScriptHost,
};
use markerlay::session::{SceneDescriptor, SessionConfig};
use markerlay::viewport::FitScheduleConfig;

// ============================================================================
// Mock Engine
// ============================================================================

/// Overlay player recording every call in order.
struct ScriptedPlayer {
    log: Mutex<Vec<&'static str>>,
    reject_playback: AtomicBool,
}

impl ScriptedPlayer {
    fn new() -> Self {
        Self {
            log: Mutex::new(Vec::new()),
            reject_playback: AtomicBool::new(false),
        }
    }

    fn log(&self) -> Vec<&'static str> {
        self.log.lock().unwrap().clone()
    }

    fn count(&self, call: &str) -> usize {
        self.log.lock().unwrap().iter().filter(|c| **c == call).count()
    }
}

impl OverlayPlayer for ScriptedPlayer {
    fn play(&self) -> BoxFuture<'_, Result<(), PlaybackError>> {
        Box::pin(async move {
            self.log.lock().unwrap().push("play");
            if self.reject_playback.load(Ordering::SeqCst) {
                Err(PlaybackError::Rejected("NotAllowedError".to_string()))
            } else {
                Ok(())
            }
        })
    }

    fn pause(&self) {
        self.log.lock().unwrap().push("pause");
    }

    fn rewind(&self) {
        self.log.lock().unwrap().push("rewind");
    }
}

/// Render surface recording placements and renderer resizes.
struct ScriptedSurface {
    viewport: Mutex<Viewport>,
    placements: Mutex<Vec<(SurfaceElement, Placement)>>,
    renderer_resizes: AtomicUsize,
    resize_tx: broadcast::Sender<Viewport>,
}

impl ScriptedSurface {
    fn new() -> Self {
        Self {
            viewport: Mutex::new(Viewport::new(1280, 720)),
            placements: Mutex::new(Vec::new()),
            renderer_resizes: AtomicUsize::new(0),
            resize_tx: broadcast::channel(16).0,
        }
    }

    fn emit_resize(&self, viewport: Viewport) {
        *self.viewport.lock().unwrap() = viewport;
        let _ = self.resize_tx.send(viewport);
    }

    fn renderer_resize_count(&self) -> usize {
        self.renderer_resizes.load(Ordering::SeqCst)
    }

    fn placements_for(&self, id: &str) -> Vec<Placement> {
        self.placements
            .lock()
            .unwrap()
            .iter()
            .filter(|(element, _)| element.id == id)
            .map(|(_, placement)| *placement)
            .collect()
    }
}

impl RenderSurface for ScriptedSurface {
    fn viewport(&self) -> Viewport {
        *self.viewport.lock().unwrap()
    }

    fn elements(&self) -> Vec<SurfaceElement> {
        vec![
            SurfaceElement::new("canvas", SurfaceKind::Canvas),
            SurfaceElement::new("camera-feed", SurfaceKind::CameraFeed),
            SurfaceElement::new("overlay-source", SurfaceKind::OverlaySource),
        ]
    }

    fn place(&self, element: &SurfaceElement, placement: &Placement) {
        self.placements
            .lock()
            .unwrap()
            .push((element.clone(), *placement));
    }

    fn resize_renderer(&self, _viewport: Viewport) {
        self.renderer_resizes.fetch_add(1, Ordering::SeqCst);
    }

    fn subscribe_resize(&self) -> broadcast::Receiver<Viewport> {
        self.resize_tx.subscribe()
    }
}

/// One live scene produced by the mock engine.
struct ScriptedRuntime {
    descriptor: SceneDescriptor,
    surface: Arc<ScriptedSurface>,
    player: Arc<ScriptedPlayer>,
    scene_tx: broadcast::Sender<SceneEvent>,
    tracking_tx: broadcast::Sender<TrackingSignal>,
    stopped: AtomicBool,
}

impl ScriptedRuntime {
    fn new(descriptor: SceneDescriptor) -> Self {
        Self {
            descriptor,
            surface: Arc::new(ScriptedSurface::new()),
            player: Arc::new(ScriptedPlayer::new()),
            scene_tx: broadcast::channel(16).0,
            tracking_tx: broadcast::channel(16).0,
            stopped: AtomicBool::new(false),
        }
    }

    fn emit_scene(&self, event: SceneEvent) {
        let _ = self.scene_tx.send(event);
    }

    fn emit_tracking(&self, signal: TrackingSignal) {
        let _ = self.tracking_tx.send(signal);
    }

    fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

impl SceneRuntime for ScriptedRuntime {
    fn subscribe_scene(&self) -> broadcast::Receiver<SceneEvent> {
        self.scene_tx.subscribe()
    }

    fn subscribe_tracking(&self) -> broadcast::Receiver<TrackingSignal> {
        self.tracking_tx.subscribe()
    }

    fn surface(&self) -> Arc<dyn RenderSurface> {
        self.surface.clone()
    }

    fn overlay(&self) -> Arc<dyn OverlayPlayer> {
        self.player.clone()
    }

    fn stop(&self) -> Result<(), EngineError> {
        self.stopped.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// Engine that records every built runtime.
struct ScriptedEngine {
    built: Mutex<Vec<Arc<ScriptedRuntime>>>,
}

impl ScriptedEngine {
    fn new() -> Self {
        Self {
            built: Mutex::new(Vec::new()),
        }
    }

    fn runtime(&self, index: usize) -> Arc<ScriptedRuntime> {
        self.built.lock().unwrap()[index].clone()
    }

    fn build_count(&self) -> usize {
        self.built.lock().unwrap().len()
    }

    fn live_count(&self) -> usize {
        self.built
            .lock()
            .unwrap()
            .iter()
            .filter(|r| !r.is_stopped())
            .count()
    }
}

impl TrackingEngine for ScriptedEngine {
    fn build_scene(
        &self,
        descriptor: &SceneDescriptor,
    ) -> BoxFuture<'_, Result<Arc<dyn SceneRuntime>, EngineError>> {
        let descriptor = descriptor.clone();
        Box::pin(async move {
            let runtime = Arc::new(ScriptedRuntime::new(descriptor));
            self.built.lock().unwrap().push(runtime.clone());
            Ok(runtime as Arc<dyn SceneRuntime>)
        })
    }
}

// ============================================================================
// Mock Loader Collaborators
// ============================================================================

/// Fetcher that always succeeds.
struct InstantFetcher;

impl ScriptFetcher for InstantFetcher {
    fn fetch(&self, _url: &str) -> BoxFuture<'_, Result<Vec<u8>, LoadError>> {
        Box::pin(async { Ok(b"// source".to_vec()) })
    }
}

/// Host with nothing preinstalled; installs always succeed.
struct EmptyHost;

impl ScriptHost for EmptyHost {
    fn is_present(&self, _dependency: Dependency) -> bool {
        false
    }

    fn apply_patch(&self, _patch: &RuntimePatch) -> Result<(), LoadError> {
        Ok(())
    }

    fn install(
        &self,
        _dependency: Dependency,
        _source: Vec<u8>,
    ) -> BoxFuture<'_, Result<(), LoadError>> {
        Box::pin(async { Ok(()) })
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn make_loader() -> Arc<LibraryLoader> {
    Arc::new(LibraryLoader::new(
        Arc::new(InstantFetcher),
        Arc::new(EmptyHost),
    ))
}

/// Controller config with test-friendly timing: immediate settle, a fallback
/// far enough out to never fire, and a short bounded schedule.
fn quick_config(mirror: bool) -> ControllerConfig {
    ControllerConfig::new("ar-root", SessionConfig::new("m.mind", "v.mp4", mirror))
        .with_settle_delay(Duration::from_millis(1))
        .with_ready_fallback(Duration::from_secs(60))
        .with_fit_schedule(FitScheduleConfig {
            attempts: 3,
            interval: Duration::from_millis(10),
        })
}

async fn settle() {
    sleep(Duration::from_millis(60)).await;
}

// ============================================================================
// Integration Tests
// ============================================================================

/// End-to-end scenario: loader ready, build succeeds, first Found starts
/// playback with no prior pause, Lost pauses once and rewinds to the start.
#[tokio::test]
async fn test_end_to_end_found_lost_playback() {
    let engine = Arc::new(ScriptedEngine::new());
    let loader = make_loader();
    let mut controller = SessionController::new(engine.clone(), loader, quick_config(false));

    controller.start().await.expect("session should start");
    assert!(controller.is_active());
    assert_eq!(engine.build_count(), 1);

    let runtime = engine.runtime(0);
    assert_eq!(runtime.descriptor.marker_source, "m.mind");
    assert_eq!(runtime.descriptor.overlay.media_source, "v.mp4");

    runtime.emit_scene(SceneEvent::Ready);
    settle().await;

    runtime.emit_tracking(TrackingSignal::Found);
    settle().await;
    assert_eq!(
        runtime.player.log(),
        vec!["play"],
        "first Found starts playback with no prior pause"
    );

    runtime.emit_tracking(TrackingSignal::Lost);
    settle().await;
    assert_eq!(runtime.player.log(), vec!["play", "pause", "rewind"]);

    let telemetry = controller.telemetry();
    assert_eq!(telemetry.markers_found, 1);
    assert_eq!(telemetry.markers_lost, 1);
    assert_eq!(telemetry.playback_rejections, 0);

    controller.shutdown().await;
    assert!(runtime.is_stopped());
}

/// Found, Lost, Found requests playback exactly twice and pause+rewind
/// exactly once, in that order.
#[tokio::test]
async fn test_found_lost_found_playback_counts() {
    let engine = Arc::new(ScriptedEngine::new());
    let mut controller = SessionController::new(engine.clone(), make_loader(), quick_config(false));

    controller.start().await.unwrap();
    let runtime = engine.runtime(0);

    runtime.emit_tracking(TrackingSignal::Found);
    settle().await;
    runtime.emit_tracking(TrackingSignal::Lost);
    settle().await;
    runtime.emit_tracking(TrackingSignal::Found);
    settle().await;

    assert_eq!(runtime.player.log(), vec!["play", "pause", "rewind", "play"]);

    controller.shutdown().await;
}

/// Rebuilding always stops the prior runtime first; at most one runtime is
/// ever live.
#[tokio::test]
async fn test_rebuild_keeps_single_live_runtime() {
    let engine = Arc::new(ScriptedEngine::new());
    let mut controller = SessionController::new(engine.clone(), make_loader(), quick_config(false));

    controller.start().await.unwrap();
    controller.start().await.unwrap();
    controller.start().await.unwrap();

    assert_eq!(engine.build_count(), 3);
    assert_eq!(engine.live_count(), 1);
    assert!(engine.runtime(0).is_stopped());
    assert!(engine.runtime(1).is_stopped());
    assert!(!engine.runtime(2).is_stopped());

    controller.shutdown().await;
    assert_eq!(engine.live_count(), 0);
}

/// Signals fired after teardown produce no playback side effects.
#[tokio::test]
async fn test_late_signals_after_teardown_are_ignored() {
    let engine = Arc::new(ScriptedEngine::new());
    let mut controller = SessionController::new(engine.clone(), make_loader(), quick_config(false));

    controller.start().await.unwrap();
    let runtime = engine.runtime(0);

    controller.shutdown().await;
    assert!(runtime.is_stopped());

    // The engine fires late, after teardown completed.
    runtime.emit_tracking(TrackingSignal::Found);
    runtime.emit_tracking(TrackingSignal::Lost);
    runtime.emit_tracking(TrackingSignal::Found);
    settle().await;

    assert!(runtime.player.log().is_empty());
}

/// Playback rejection is absorbed: the session stays up, tracking continues,
/// and the next Found retries playback.
#[tokio::test]
async fn test_playback_rejection_keeps_session_alive() {
    let engine = Arc::new(ScriptedEngine::new());
    let mut controller = SessionController::new(engine.clone(), make_loader(), quick_config(false));

    controller.start().await.unwrap();
    let runtime = engine.runtime(0);
    runtime.player.reject_playback.store(true, Ordering::SeqCst);

    runtime.emit_tracking(TrackingSignal::Found);
    settle().await;

    assert!(controller.is_active());
    assert_eq!(controller.telemetry().playback_rejections, 1);

    // Autoplay unblocks; re-detection retries naturally.
    runtime.player.reject_playback.store(false, Ordering::SeqCst);
    runtime.emit_tracking(TrackingSignal::Lost);
    runtime.emit_tracking(TrackingSignal::Found);
    settle().await;

    assert_eq!(runtime.player.count("play"), 2);

    controller.shutdown().await;
}

/// Mirroring applies to the canvas and camera feed, never to the offscreen
/// overlay source; without mirroring nothing is flipped.
#[tokio::test]
async fn test_mirror_placement_rules() {
    let engine = Arc::new(ScriptedEngine::new());
    let mut controller = SessionController::new(engine.clone(), make_loader(), quick_config(true));

    controller.start().await.unwrap();
    let mirrored_runtime = engine.runtime(0);
    mirrored_runtime.emit_scene(SceneEvent::Ready);
    settle().await;

    let canvas = mirrored_runtime.surface.placements_for("canvas");
    assert!(!canvas.is_empty());
    assert!(canvas.iter().all(|p| p.mirrored));
    let feed = mirrored_runtime.surface.placements_for("camera-feed");
    assert!(feed.iter().all(|p| p.mirrored));
    assert!(
        mirrored_runtime
            .surface
            .placements_for("overlay-source")
            .is_empty(),
        "overlay source must stay untransformed"
    );

    // Rebuild without mirroring.
    controller.set_mirror(false).await.unwrap();
    let plain_runtime = engine.runtime(1);
    plain_runtime.emit_scene(SceneEvent::Ready);
    settle().await;

    let canvas = plain_runtime.surface.placements_for("canvas");
    assert!(!canvas.is_empty());
    assert!(canvas.iter().all(|p| !p.mirrored));

    controller.shutdown().await;
}

/// The bounded fit schedule self-cancels at its ceiling; resize-triggered
/// fits continue afterwards.
#[tokio::test]
async fn test_fit_schedule_ceiling_then_resize_fits() {
    let engine = Arc::new(ScriptedEngine::new());
    let mut controller = SessionController::new(engine.clone(), make_loader(), quick_config(false));

    controller.start().await.unwrap();
    let runtime = engine.runtime(0);

    // Initial settle fit + 3 scheduled fits, then the schedule is done.
    sleep(Duration::from_millis(150)).await;
    let after_schedule = runtime.surface.renderer_resize_count();
    assert_eq!(after_schedule, 4);

    sleep(Duration::from_millis(100)).await;
    assert_eq!(
        runtime.surface.renderer_resize_count(),
        after_schedule,
        "no fits after the schedule ceiling without events"
    );

    // Resizes still funnel into fit, indefinitely.
    runtime.surface.emit_resize(Viewport::new(640, 480));
    settle().await;
    assert_eq!(runtime.surface.renderer_resize_count(), after_schedule + 1);

    let canvas = runtime.surface.placements_for("canvas");
    let last = canvas.last().unwrap();
    assert_eq!(last.width, 640);
    assert_eq!(last.height, 480);

    controller.shutdown().await;
}

/// Loader progress reaches 100 and the loader never re-fetches for a second
/// session.
#[tokio::test]
async fn test_loader_progress_and_reuse_across_sessions() {
    let engine = Arc::new(ScriptedEngine::new());
    let loader = make_loader();
    let mut controller = SessionController::new(engine.clone(), loader.clone(), quick_config(false));

    let progress = loader.subscribe_progress();
    assert_eq!(*progress.borrow(), LoadProgress::IDLE);

    controller.start().await.unwrap();
    assert_eq!(*progress.borrow(), LoadProgress::COMPLETE);
    assert!(loader.is_ready());

    // A second session reuses the installed dependencies.
    controller.start().await.unwrap();
    assert_eq!(engine.build_count(), 2);

    controller.shutdown().await;
}

/// A failed dependency load surfaces as a session error and the session
/// never starts.
#[tokio::test]
async fn test_failed_load_means_no_session() {
    struct FailingFetcher;

    impl ScriptFetcher for FailingFetcher {
        fn fetch(&self, url: &str) -> BoxFuture<'_, Result<Vec<u8>, LoadError>> {
            let url = url.to_string();
            Box::pin(async move {
                Err(LoadError::FetchFailed {
                    url,
                    reason: "connection refused".to_string(),
                })
            })
        }
    }

    let engine = Arc::new(ScriptedEngine::new());
    let loader = Arc::new(LibraryLoader::new(
        Arc::new(FailingFetcher),
        Arc::new(EmptyHost),
    ));
    let mut controller = SessionController::new(engine.clone(), loader, quick_config(false));

    let err = controller.start().await.unwrap_err();
    assert!(matches!(err, SessionError::DependencyLoad(_)));
    assert!(!controller.is_active());
    assert_eq!(engine.build_count(), 0);
}
