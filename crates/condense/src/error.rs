// ABOUTME: Failure taxonomy of a single summarization request.
// ABOUTME: PipelineError variants render as the human-readable message returned to the caller.

use thiserror::Error;

use condense_extract::ExtractError;
use condense_summary::SummaryError;

/// Why a request produced no summary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// The page could not be fetched; carries the tagged `ERROR:` message.
    #[error("{0}")]
    TransportFailure(String),

    #[error("No valid text or URL content could be retrieved.")]
    EmptyContent,

    #[error("The input text is too short (less than {minimum} words) to generate a meaningful summary. Please provide a longer article.")]
    InsufficientLength { words: usize, minimum: usize },

    #[error("Not enough unique words for extractive summary.")]
    DegenerateVocabulary,

    #[error("An internal summarization error occurred: {0}")]
    InternalFault(String),
}

impl PipelineError {
    /// Short machine-readable name of the failure category.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::TransportFailure(_) => "transport_failure",
            PipelineError::EmptyContent => "empty_content",
            PipelineError::InsufficientLength { .. } => "insufficient_length",
            PipelineError::DegenerateVocabulary => "degenerate_vocabulary",
            PipelineError::InternalFault(_) => "internal_fault",
        }
    }
}

impl From<ExtractError> for PipelineError {
    fn from(err: ExtractError) -> Self {
        PipelineError::TransportFailure(err.tagged())
    }
}

impl From<SummaryError> for PipelineError {
    fn from(err: SummaryError) -> Self {
        match err {
            SummaryError::DegenerateVocabulary => PipelineError::DegenerateVocabulary,
            other => PipelineError::InternalFault(other.to_string()),
        }
    }
}
