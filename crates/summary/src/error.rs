// ABOUTME: Error types for sentence ranking and summary composition.
// ABOUTME: Provides SummaryError with DegenerateVocabulary and InvalidSentenceCount variants.

use thiserror::Error;

/// Errors that can occur while ranking or composing a summary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SummaryError {
    /// No sentence contributed a weighted term (all stopwords, punctuation, or empty).
    #[error("Not enough unique words for extractive summary.")]
    DegenerateVocabulary,

    /// A summary must keep at least one sentence.
    #[error("summary sentence count must be at least 1, got {0}")]
    InvalidSentenceCount(usize),
}

impl SummaryError {
    /// Returns true if ranking failed for lack of usable vocabulary.
    pub fn is_degenerate_vocabulary(&self) -> bool {
        matches!(self, SummaryError::DegenerateVocabulary)
    }
}
