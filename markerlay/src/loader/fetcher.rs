//! Script fetching abstraction.

use std::time::Duration;

use super::error::LoadError;
use crate::engine::BoxFuture;

/// Default request timeout for dependency fetches, in seconds.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Trait for fetching dependency sources.
///
/// This abstraction allows for dependency injection and easier testing by
/// enabling mock fetchers that record call order or fail on demand.
pub trait ScriptFetcher: Send + Sync {
    /// Fetch a dependency's source bytes.
    fn fetch(&self, url: &str) -> BoxFuture<'_, Result<Vec<u8>, LoadError>>;
}

/// Real fetcher implementation using reqwest.
pub struct HttpScriptFetcher {
    client: reqwest::Client,
}

impl HttpScriptFetcher {
    /// Creates a fetcher with the default timeout.
    pub fn new() -> Result<Self, LoadError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS))
    }

    /// Creates a fetcher with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, LoadError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LoadError::FetchFailed {
                url: String::new(),
                reason: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self { client })
    }
}

impl ScriptFetcher for HttpScriptFetcher {
    fn fetch(&self, url: &str) -> BoxFuture<'_, Result<Vec<u8>, LoadError>> {
        let url = url.to_string();
        Box::pin(async move {
            let response =
                self.client
                    .get(&url)
                    .send()
                    .await
                    .map_err(|e| LoadError::FetchFailed {
                        url: url.clone(),
                        reason: e.to_string(),
                    })?;

            if !response.status().is_success() {
                return Err(LoadError::FetchFailed {
                    url: url.clone(),
                    reason: format!("HTTP {}", response.status()),
                });
            }

            response
                .bytes()
                .await
                .map(|b| b.to_vec())
                .map_err(|e| LoadError::FetchFailed {
                    url,
                    reason: e.to_string(),
                })
        })
    }
}
