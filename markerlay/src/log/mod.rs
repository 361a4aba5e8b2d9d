//! Logging setup.
//!
//! Every failure in this system is diagnosed through logs — nothing is ever
//! surfaced as a blocking error to the user. Hosts that embed the library
//! call [`TracingLogger::init`] once at startup; `RUST_LOG` overrides the
//! default filter.

use tracing_subscriber::EnvFilter;

/// Initializes the global tracing subscriber.
pub struct TracingLogger;

impl TracingLogger {
    /// Initialize with the `info` default level.
    pub fn init() {
        Self::init_with_default_filter("info");
    }

    /// Initialize with a custom default filter, still honoring `RUST_LOG`.
    ///
    /// Safe to call more than once; only the first call installs a
    /// subscriber.
    pub fn init_with_default_filter(default_filter: &str) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init();
    }
}
