//! Session construction error types.

use std::fmt;

use crate::engine::EngineError;

/// Errors that can occur while building a session.
///
/// Build failures are fatal for the session attempt: they are logged and the
/// session simply never starts. There is no retry at this layer.
#[derive(Debug)]
pub enum BuildError {
    /// The engine failed to construct a usable scene.
    Engine(EngineError),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::Engine(e) => write!(f, "failed to build AR scene: {}", e),
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BuildError::Engine(e) => Some(e),
        }
    }
}

impl From<EngineError> for BuildError {
    fn from(e: EngineError) -> Self {
        BuildError::Engine(e)
    }
}
