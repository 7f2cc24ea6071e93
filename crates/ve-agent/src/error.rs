//! Typed errors for loading a manifest/scheme set off disk.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse decoder manifest: {0}")]
    Manifest(#[from] ve_protocol::ManifestError),
    #[error("failed to parse scheme file {path}: {source}")]
    Scheme {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
