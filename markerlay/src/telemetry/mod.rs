//! Session telemetry for observability and diagnostics.
//!
//! No error in this system is surfaced as a blocking failure; the only
//! user-visible failure mode is that the AR view never appears. These counters
//! are the diagnostic trail behind that: lock-free atomic instrumentation
//! recorded by the bridge, the fitter tasks, and the controller, with
//! point-in-time snapshots for display.
//!
//! ```text
//! Bridge / Fitter / Controller ──► SessionMetrics ──► TelemetrySnapshot
//!                                  (atomic counters)  (point-in-time copy)
//! ```

mod metrics;
mod snapshot;

pub use metrics::SessionMetrics;
pub use snapshot::TelemetrySnapshot;
