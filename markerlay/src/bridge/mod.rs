//! Tracking event bridge.
//!
//! Bridges marker tracking signals to overlay playback. Purely signal-driven:
//! the engine pushes `Found`/`Lost` over a broadcast channel and the bridge
//! reacts, it never polls tracking state.
//!
//! # State Machine
//!
//! ```text
//! Lost --Found--> Found --Lost--> Lost
//! ```
//!
//! Initial state is `Lost`. Every `Found` requests playback, even when
//! already `Found` — starting an already-playing overlay is a no-op, and a
//! previously rejected playback request (autoplay policy) gets its natural
//! retry this way. `Lost` acts only on a `Found -> Lost` transition: pause,
//! then rewind, so re-detection replays the clip from the start.

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::engine::{OverlayPlayer, TrackingSignal};
use crate::telemetry::SessionMetrics;

/// Detection state of the tracked marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingState {
    /// The marker is not currently detected.
    Lost,
    /// The marker is in the engine's confident detection state.
    Found,
}

/// Drives overlay playback from marker tracking signals.
pub struct TrackingBridge {
    player: Arc<dyn OverlayPlayer>,
    metrics: Arc<SessionMetrics>,
    state: TrackingState,
}

impl TrackingBridge {
    /// Create a bridge for the given overlay player.
    pub fn new(player: Arc<dyn OverlayPlayer>, metrics: Arc<SessionMetrics>) -> Self {
        Self {
            player,
            metrics,
            state: TrackingState::Lost,
        }
    }

    /// Current detection state.
    pub fn state(&self) -> TrackingState {
        self.state
    }

    /// React to one tracking signal.
    pub async fn handle(&mut self, signal: TrackingSignal) {
        match signal {
            TrackingSignal::Found => {
                self.state = TrackingState::Found;
                self.metrics.marker_found();
                debug!("marker found, requesting overlay playback");

                if let Err(e) = self.player.play().await {
                    // Typically autoplay policy. Tracking keeps running and
                    // the next Found retries playback.
                    warn!(error = %e, "overlay playback rejected");
                    self.metrics.playback_rejected();
                }
            }
            TrackingSignal::Lost => {
                self.metrics.marker_lost();
                if self.state == TrackingState::Found {
                    debug!("marker lost, pausing and rewinding overlay");
                    self.player.pause();
                    self.player.rewind();
                }
                self.state = TrackingState::Lost;
            }
        }
    }
}

/// Spawn the bridge's consumer task.
///
/// Runs until cancellation or until the engine closes the signal channel.
/// Signals arriving after cancellation are never acted upon.
pub fn spawn_bridge(
    mut bridge: TrackingBridge,
    mut tracking_rx: broadcast::Receiver<TrackingSignal>,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;

                _ = cancel.cancelled() => break,

                signal = tracking_rx.recv() => match signal {
                    Ok(signal) => bridge.handle(signal).await,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped, "tracking signals lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
        debug!("tracking bridge stopped");
    })
}
