//! Controller configuration.

use std::time::Duration;

use crate::session::SessionConfig;
use crate::viewport::{FitScheduleConfig, DEFAULT_READY_FALLBACK, DEFAULT_SETTLE_DELAY};

/// Configuration for a [`SessionController`](super::SessionController).
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Mount point the session renders into.
    pub mount: String,

    /// Session configuration (asset references + mirror).
    pub session: SessionConfig,

    /// Bounded fit schedule tuning.
    pub fit_schedule: FitScheduleConfig,

    /// Delay before the first fit, letting the engine settle.
    pub settle_delay: Duration,

    /// How long to wait for a readiness signal before fitting anyway.
    pub ready_fallback: Duration,
}

impl ControllerConfig {
    /// Create a controller config with default fit timing.
    pub fn new(mount: impl Into<String>, session: SessionConfig) -> Self {
        Self {
            mount: mount.into(),
            session,
            fit_schedule: FitScheduleConfig::default(),
            settle_delay: DEFAULT_SETTLE_DELAY,
            ready_fallback: DEFAULT_READY_FALLBACK,
        }
    }

    /// Override the fit schedule.
    pub fn with_fit_schedule(mut self, fit_schedule: FitScheduleConfig) -> Self {
        self.fit_schedule = fit_schedule;
        self
    }

    /// Override the settle delay.
    pub fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }

    /// Override the readiness fallback window.
    pub fn with_ready_fallback(mut self, ready_fallback: Duration) -> Self {
        self.ready_fallback = ready_fallback;
        self
    }
}
