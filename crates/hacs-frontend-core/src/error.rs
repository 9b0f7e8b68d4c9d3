//! Error types for host calls and the setup sequence.

use std::path::PathBuf;
use thiserror::Error;

/// Error raised by the external plugin-endpoint hook; passed through untouched.
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// Failure reported by a host registry.
#[derive(Error, Debug)]
pub enum HostError {
    /// Static path source does not exist on disk.
    #[error("static path source not found: {}", .0.display())]
    ResourceNotFound(PathBuf),

    /// Host refused a panel registration (e.g. malformed config).
    #[error("panel rejected by host: {0}")]
    PanelRejected(String),
}

/// Fatal failure of a frontend setup pass. Aborts the remaining steps.
#[derive(Error, Debug)]
pub enum SetupError {
    #[error("failed to bind static path {url_prefix}: {source}")]
    StaticPath {
        url_prefix: String,
        #[source]
        source: HostError,
    },

    #[error("failed to register panel '{domain}': {source}")]
    Panel {
        domain: String,
        #[source]
        source: HostError,
    },

    #[error("plugin endpoint setup failed: {0}")]
    Hook(#[source] HookError),
}

impl SetupError {
    /// True when a static path source was missing on disk.
    pub fn is_resource_not_found(&self) -> bool {
        matches!(
            self,
            SetupError::StaticPath {
                source: HostError::ResourceNotFound(_),
                ..
            }
        )
    }
}
