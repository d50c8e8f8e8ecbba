// ABOUTME: Top-K sentence selection and order-preserving summary reconstruction.
// ABOUTME: Summarizer ties tokenization, ranking, and composition together for a single text.

use serde::Serialize;

use crate::error::SummaryError;
use crate::rank::{rank, ScoredSentence};
use crate::tokenize::{split_sentences, Sentence};

/// Number of sentences kept when the caller does not choose one.
pub const DEFAULT_SUMMARY_SENTENCES: usize = 5;

/// An extractive summary: selected sentences in original order plus their joined text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub sentences: Vec<Sentence>,
    pub text: String,
}

impl Summary {
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

/// Pick the `k` highest-scoring sentences and return them in reading order.
///
/// The sort is stable, so among equal scores the earlier sentence wins the
/// last slot.
pub fn select_top(scored: &[ScoredSentence], k: usize) -> Vec<&Sentence> {
    let mut ranked: Vec<&ScoredSentence> = scored.iter().collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.truncate(k);

    let mut chosen: Vec<&Sentence> = ranked.into_iter().map(|s| &s.sentence).collect();
    chosen.sort_by_key(|s| s.index);
    chosen
}

/// Compose a summary of at most `k` sentences, joined by single spaces.
///
/// When there are `k` or fewer sentences all of them are returned unchanged.
pub fn compose(scored: &[ScoredSentence], k: usize) -> Result<Summary, SummaryError> {
    if k == 0 {
        return Err(SummaryError::InvalidSentenceCount(k));
    }

    let sentences: Vec<Sentence> = select_top(scored, k).into_iter().cloned().collect();
    let text = sentences
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    Ok(Summary { sentences, text })
}

/// Extractive summarizer keeping a fixed number of sentences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summarizer {
    sentence_count: usize,
}

impl Default for Summarizer {
    fn default() -> Self {
        Self::new(DEFAULT_SUMMARY_SENTENCES)
    }
}

impl Summarizer {
    pub fn new(sentence_count: usize) -> Self {
        Self { sentence_count }
    }

    pub fn sentence_count(&self) -> usize {
        self.sentence_count
    }

    /// Summarize `text`.
    ///
    /// A text with at most K sentences is returned verbatim; blank text yields
    /// an empty summary.
    pub fn summarize(&self, text: &str) -> Result<Summary, SummaryError> {
        self.summarize_sentences(text, split_sentences(text))
    }

    /// Summarize a text whose sentences were already split.
    pub fn summarize_sentences(
        &self,
        text: &str,
        sentences: Vec<Sentence>,
    ) -> Result<Summary, SummaryError> {
        if self.sentence_count == 0 {
            return Err(SummaryError::InvalidSentenceCount(0));
        }
        if sentences.is_empty() {
            return Ok(Summary::default());
        }
        if sentences.len() <= self.sentence_count {
            return Ok(Summary {
                sentences,
                text: text.to_string(),
            });
        }

        let scored = rank(&sentences)?;
        compose(&scored, self.sentence_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scored(scores: &[f64]) -> Vec<ScoredSentence> {
        scores
            .iter()
            .enumerate()
            .map(|(i, score)| ScoredSentence {
                sentence: Sentence::new(i, format!("S{i}.")),
                score: *score,
            })
            .collect()
    }

    #[test]
    fn test_select_top_restores_reading_order() {
        let s = scored(&[0.1, 0.9, 0.3, 0.8, 0.2]);
        let picked: Vec<usize> = select_top(&s, 3).iter().map(|s| s.index).collect();
        assert_eq!(picked, vec![1, 2, 3]);
    }

    #[test]
    fn test_ties_at_cut_prefer_earlier_sentence() {
        let s = scored(&[0.5, 0.7, 0.5, 0.5]);
        let picked: Vec<usize> = select_top(&s, 2).iter().map(|s| s.index).collect();
        assert_eq!(picked, vec![0, 1]);
    }

    #[test]
    fn test_compose_joins_with_single_space() {
        let s = scored(&[0.9, 0.1, 0.8]);
        let summary = compose(&s, 2).unwrap();
        assert_eq!(summary.text, "S0. S2.");
    }

    #[test]
    fn test_compose_with_k_at_least_count_keeps_everything() {
        let s = scored(&[0.2, 0.1]);
        let summary = compose(&s, 5).unwrap();
        assert_eq!(summary.text, "S0. S1.");
    }

    #[test]
    fn test_zero_k_is_rejected() {
        assert_eq!(
            compose(&scored(&[1.0]), 0),
            Err(SummaryError::InvalidSentenceCount(0))
        );
        assert_eq!(
            Summarizer::new(0).summarize("One. Two."),
            Err(SummaryError::InvalidSentenceCount(0))
        );
    }

    #[test]
    fn test_short_text_is_identity() {
        let text = "The cat sat. The cat sat on the mat. A dog barked loudly outside.";
        let summary = Summarizer::default().summarize(text).unwrap();
        assert_eq!(summary.text, text);
        assert_eq!(summary.sentences.len(), 3);
    }

    #[test]
    fn test_blank_text_gives_empty_summary() {
        let summary = Summarizer::default().summarize("   \n ").unwrap();
        assert!(summary.is_empty());
        assert_eq!(summary.text, "");
    }
}
