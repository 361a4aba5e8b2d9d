//! Loader error types.

use thiserror::Error;

use super::state::Dependency;

/// Errors that can occur while loading engine dependencies.
///
/// `Clone` because the loader shares one load outcome across every concurrent
/// and subsequent caller; each waiter receives its own copy of the failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// Fetching a dependency's source failed.
    #[error("failed to fetch {url}: {reason}")]
    FetchFailed { url: String, reason: String },

    /// The host failed to execute a dependency's source.
    #[error("failed to install {dependency}: {reason}")]
    InstallFailed {
        dependency: Dependency,
        reason: String,
    },

    /// The host rejected the pre-load runtime patch.
    #[error("runtime patch rejected: {0}")]
    PatchRejected(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_failed_display() {
        let err = LoadError::FetchFailed {
            url: "https://cdn.example/lib.js".to_string(),
            reason: "HTTP 503".to_string(),
        };
        assert!(err.to_string().contains("https://cdn.example/lib.js"));
        assert!(err.to_string().contains("HTTP 503"));
    }

    #[test]
    fn test_install_failed_names_dependency() {
        let err = LoadError::InstallFailed {
            dependency: Dependency::ImageTracker,
            reason: "syntax error".to_string(),
        };
        assert!(err.to_string().contains("image tracker"));
    }
}
