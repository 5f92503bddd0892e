//! Error types for Golem

use thiserror::Error;

/// Result type alias using Golem's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or meshing a field
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid parameter, rejected before any sampling happens
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Mesh generation failed
    #[error("Mesh generation failed: {0}")]
    MeshGeneration(String),

    /// The caller raised the cancel flag while cells were being processed
    #[error("Mesh generation cancelled")]
    Cancelled,
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }
}
