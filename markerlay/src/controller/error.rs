//! Session lifecycle error types.

use std::fmt;

use crate::loader::LoadError;
use crate::session::BuildError;

/// Errors that can occur while starting a session.
///
/// Both variants are fatal for the attempt: the session never starts and no
/// retry happens at this layer. Teardown itself is infallible — engine stop
/// failures during shutdown are logged, not returned.
#[derive(Debug)]
pub enum SessionError {
    /// An engine dependency failed to load.
    DependencyLoad(LoadError),

    /// The scene could not be built.
    SceneBuild(BuildError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::DependencyLoad(e) => {
                write!(f, "failed to load engine dependencies: {}", e)
            }
            SessionError::SceneBuild(e) => {
                write!(f, "failed to build session: {}", e)
            }
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::DependencyLoad(e) => Some(e),
            SessionError::SceneBuild(e) => Some(e),
        }
    }
}

impl From<LoadError> for SessionError {
    fn from(e: LoadError) -> Self {
        SessionError::DependencyLoad(e)
    }
}

impl From<BuildError> for SessionError {
    fn from(e: BuildError) -> Self {
        SessionError::SceneBuild(e)
    }
}
