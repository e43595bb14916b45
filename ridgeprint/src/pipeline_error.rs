//! Error types for the pipeline layer

use crate::Stage;
use ridgeprint_color::ColorError;
use ridgeprint_filter::FilterError;
use ridgeprint_morph::MorphError;
use thiserror::Error;

/// Failure reported by an individual stage
#[derive(Debug, Error)]
pub enum StageError {
    /// Core library error
    #[error(transparent)]
    Core(#[from] ridgeprint_core::Error),

    /// Equalization error
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// Binarization error
    #[error(transparent)]
    Color(#[from] ColorError),

    /// Despeckle or thinning error
    #[error(transparent)]
    Morph(#[from] MorphError),
}

/// Errors that can occur while running the pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A stage rejected its input (empty matrix, malformed pixels)
    #[error("{stage} stage rejected its input")]
    InvalidInput {
        stage: Stage,
        #[source]
        source: StageError,
    },

    /// A stage was requested before the stage it depends on
    #[error("{requested} stage cannot run: {reason}")]
    PreconditionViolation { requested: Stage, reason: String },
}

impl PipelineError {
    /// The stage that failed or was refused.
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::InvalidInput { stage, .. } => *stage,
            PipelineError::PreconditionViolation { requested, .. } => *requested,
        }
    }

    pub(crate) fn invalid_input(stage: Stage, source: impl Into<StageError>) -> Self {
        PipelineError::InvalidInput {
            stage,
            source: source.into(),
        }
    }
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;
