//! Errors surfaced by the generation service

use thiserror::Error;

/// Result type alias for generation calls
pub type Result<T> = std::result::Result<T, GenerationError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    /// Shape parameters or mesh settings were rejected before sampling
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Polygonization or the worker task failed
    #[error("Generation failed: {0}")]
    ComputeFailure(String),

    #[error("Generation cancelled")]
    Cancelled,
}

impl From<golem_core::Error> for GenerationError {
    fn from(err: golem_core::Error) -> Self {
        match err {
            golem_core::Error::InvalidParameter(msg) => Self::InvalidParameter(msg),
            golem_core::Error::MeshGeneration(msg) => Self::ComputeFailure(msg),
            golem_core::Error::Cancelled => Self::Cancelled,
        }
    }
}

impl From<tokio::task::JoinError> for GenerationError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::ComputeFailure(format!("generation task failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_map_one_to_one() {
        let invalid: GenerationError = golem_core::Error::InvalidParameter("height".into()).into();
        assert_eq!(invalid, GenerationError::InvalidParameter("height".into()));

        let failed: GenerationError = golem_core::Error::MeshGeneration("overflow".into()).into();
        assert!(matches!(failed, GenerationError::ComputeFailure(_)));

        let cancelled: GenerationError = golem_core::Error::Cancelled.into();
        assert_eq!(cancelled, GenerationError::Cancelled);
    }
}
