//! Decoder-manifest loading errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to parse manifest JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ManifestResult<T> = Result<T, ManifestError>;
