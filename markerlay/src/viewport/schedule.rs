//! Fit scheduling tasks.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use super::fitter::ViewportFitter;
use crate::engine::{RenderSurface, SceneEvent};
use crate::telemetry::SessionMetrics;

/// Number of scheduled fit attempts after session start.
pub const DEFAULT_FIT_ATTEMPTS: u32 = 10;

/// Interval between scheduled fit attempts.
pub const DEFAULT_FIT_INTERVAL: Duration = Duration::from_millis(500);

/// Delay before the first fit, letting the engine settle after construction.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(500);

/// How long to wait for a scene readiness signal before forcing a fit anyway.
pub const DEFAULT_READY_FALLBACK: Duration = Duration::from_secs(2);

/// Configuration for the bounded fit schedule.
#[derive(Debug, Clone)]
pub struct FitScheduleConfig {
    /// Attempt ceiling. The schedule self-cancels after this many fits.
    pub attempts: u32,

    /// Interval between attempts.
    pub interval: Duration,
}

impl Default for FitScheduleConfig {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_FIT_ATTEMPTS,
            interval: DEFAULT_FIT_INTERVAL,
        }
    }
}

/// Spawn the bounded repeating fit schedule.
///
/// Fits once per interval until the attempt ceiling, then self-cancels.
/// Resize-triggered fits are unaffected by the ceiling; this schedule only
/// absorbs the engine's late internal re-layouts shortly after start.
pub fn spawn_fit_schedule(
    config: FitScheduleConfig,
    fitter: ViewportFitter,
    surface: Arc<dyn RenderSurface>,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        for attempt in 1..=config.attempts {
            tokio::select! {
                biased;

                _ = cancel.cancelled() => {
                    debug!(attempt, "fit schedule cancelled");
                    return;
                }

                _ = sleep(config.interval) => {
                    trace!(attempt, "scheduled viewport fit");
                    fitter.fit(surface.as_ref());
                }
            }
        }
        debug!(attempts = config.attempts, "fit schedule complete");
    })
}

/// Spawn the resize listener.
///
/// Fits on every viewport resize for the life of the session.
pub fn spawn_resize_listener(
    fitter: ViewportFitter,
    surface: Arc<dyn RenderSurface>,
    metrics: Arc<SessionMetrics>,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    let mut resize_rx = surface.subscribe_resize();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;

                _ = cancel.cancelled() => break,

                event = resize_rx.recv() => match event {
                    Ok(viewport) => {
                        metrics.resize_observed();
                        debug!(
                            width = viewport.width,
                            height = viewport.height,
                            "viewport resized"
                        );
                        fitter.fit(surface.as_ref());
                    }
                    // Missed notifications collapse into one fit; only the
                    // current viewport matters.
                    Err(broadcast::error::RecvError::Lagged(_)) => {
                        fitter.fit(surface.as_ref());
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
        debug!("resize listener stopped");
    })
}

/// Spawn the readiness listener.
///
/// Waits out the settle delay, applies the initial fit, then fits again on
/// every scene readiness signal. If no signal arrives within the fallback
/// window, fits anyway rather than suspending indefinitely.
pub fn spawn_readiness_listener(
    fitter: ViewportFitter,
    surface: Arc<dyn RenderSurface>,
    mut scene_rx: broadcast::Receiver<SceneEvent>,
    settle_delay: Duration,
    ready_fallback: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return,
            _ = sleep(settle_delay) => {}
        }

        fitter.fit(surface.as_ref());

        let fallback = sleep(ready_fallback);
        tokio::pin!(fallback);
        let mut fallback_pending = true;

        loop {
            tokio::select! {
                biased;

                _ = cancel.cancelled() => break,

                _ = &mut fallback, if fallback_pending => {
                    fallback_pending = false;
                    debug!("no scene readiness signal observed, forcing viewport fit");
                    fitter.fit(surface.as_ref());
                }

                event = scene_rx.recv() => match event {
                    Ok(event) => {
                        fallback_pending = false;
                        debug!(?event, "scene readiness signal, fitting viewport");
                        fitter.fit(surface.as_ref());
                    }
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
        debug!("readiness listener stopped");
    })
}
