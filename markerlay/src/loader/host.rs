//! Script host abstraction.

use super::error::LoadError;
use super::patch::RuntimePatch;
use super::state::Dependency;
use crate::engine::BoxFuture;

/// The runtime into which dependency sources are installed.
///
/// The host is supplied by the embedding environment. It owns the global
/// namespace the dependencies register themselves into, which is why presence
/// checks live here: a dependency installed during an earlier session in the
/// same process must not be installed again.
pub trait ScriptHost: Send + Sync {
    /// Whether a dependency's globals are already present in the host.
    fn is_present(&self, dependency: Dependency) -> bool;

    /// Apply the pre-load runtime patch.
    ///
    /// Must be called before the scene framework's source executes; the
    /// framework reads the patched configuration during initialization.
    fn apply_patch(&self, patch: &RuntimePatch) -> Result<(), LoadError>;

    /// Execute a dependency's source, making its globals available.
    fn install(&self, dependency: Dependency, source: Vec<u8>) -> BoxFuture<'_, Result<(), LoadError>>;
}
