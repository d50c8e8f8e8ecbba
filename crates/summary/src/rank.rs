// ABOUTME: TF-IDF sentence ranking where every sentence is one document of a per-text corpus.
// ABOUTME: Builds a sparse term-weight matrix and scores sentences by their mean term weight per token.

//! Sentence ranking.
//!
//! For a corpus of N sentences:
//! - `tf(t, s) = count(t, s) / |terms(s)|`
//! - `idf(t) = ln((1 + N) / (1 + df(t))) + 1`
//! - `score(s)` = sum of `tf * idf` over the distinct terms of `s`
//!
//! Because `tf` is already divided by the sentence length, the score is the
//! mean idf over the sentence's term occurrences. It does not shrink as a
//! sentence grows, so rare vocabulary wins over short filler.
//!
//! Rows are ordered maps so that summation order, and therefore every score,
//! is identical from run to run.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::SummaryError;
use crate::tokenize::{terms, Sentence};

/// A sentence paired with its importance score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredSentence {
    pub sentence: Sentence,
    pub score: f64,
}

/// Sparse (sentence index, term) -> weight mapping for one document.
#[derive(Debug, Clone, PartialEq)]
pub struct TermWeightMatrix {
    rows: Vec<BTreeMap<String, f64>>,
    vocabulary: usize,
}

impl TermWeightMatrix {
    /// Build the matrix for a sentence sequence.
    ///
    /// Fails with `DegenerateVocabulary` if no sentence has a weighted term.
    pub fn build(sentences: &[Sentence]) -> Result<Self, SummaryError> {
        let counts: Vec<(usize, BTreeMap<String, usize>)> = sentences
            .iter()
            .map(|s| {
                let ts = terms(&s.text);
                let len = ts.len();
                let mut tf = BTreeMap::new();
                for t in ts {
                    *tf.entry(t).or_insert(0) += 1;
                }
                (len, tf)
            })
            .collect();

        let mut df: BTreeMap<&str, usize> = BTreeMap::new();
        for (_, tf) in &counts {
            for term in tf.keys() {
                *df.entry(term.as_str()).or_insert(0) += 1;
            }
        }
        if df.is_empty() {
            return Err(SummaryError::DegenerateVocabulary);
        }

        let n = sentences.len() as f64;
        let idf: BTreeMap<&str, f64> = df
            .iter()
            .map(|(term, d)| (*term, ((1.0 + n) / (1.0 + *d as f64)).ln() + 1.0))
            .collect();

        let rows = counts
            .iter()
            .map(|(len, tf)| {
                tf.iter()
                    .map(|(term, count)| {
                        let weight = (*count as f64 / *len as f64) * idf[term.as_str()];
                        (term.clone(), weight)
                    })
                    .collect()
            })
            .collect();

        Ok(Self {
            rows,
            vocabulary: df.len(),
        })
    }

    /// Number of distinct weighted terms across the corpus.
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary
    }

    /// Term weights of the sentence at `index`.
    pub fn row(&self, index: usize) -> Option<&BTreeMap<String, f64>> {
        self.rows.get(index)
    }

    /// Score of the sentence at `index`; 0.0 for a sentence without terms.
    pub fn score(&self, index: usize) -> f64 {
        self.rows
            .get(index)
            .map(|row| row.values().sum())
            .unwrap_or(0.0)
    }
}

/// Score every sentence, returned in original order.
///
/// Ties are left as-is; composition resolves them by position.
pub fn rank(sentences: &[Sentence]) -> Result<Vec<ScoredSentence>, SummaryError> {
    let matrix = TermWeightMatrix::build(sentences)?;
    Ok(sentences
        .iter()
        .enumerate()
        .map(|(row, s)| ScoredSentence {
            sentence: s.clone(),
            score: matrix.score(row),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize::split_sentences;

    #[test]
    fn test_stopword_only_corpus_is_degenerate() {
        let sentences = split_sentences("It is what it is. And so it was. I am.");
        assert_eq!(rank(&sentences), Err(SummaryError::DegenerateVocabulary));
    }

    #[test]
    fn test_empty_corpus_is_degenerate() {
        assert_eq!(rank(&[]), Err(SummaryError::DegenerateVocabulary));
    }

    #[test]
    fn test_weights_follow_smoothed_idf() {
        // "apple" appears in both sentences, "pear" only in the first.
        let sentences = split_sentences("Apple pear. Apple.");
        let matrix = TermWeightMatrix::build(&sentences).unwrap();
        assert_eq!(matrix.vocabulary_len(), 2);

        let first = matrix.row(0).unwrap();
        let common_idf = 1.0;
        let rare_idf = (3.0f64 / 2.0).ln() + 1.0;
        assert!((first["apple"] - 0.5 * common_idf).abs() < 1e-12);
        assert!((first["pear"] - 0.5 * rare_idf).abs() < 1e-12);

        let second = matrix.row(1).unwrap();
        assert!((second["apple"] - common_idf).abs() < 1e-12);
    }

    #[test]
    fn test_sentence_without_terms_scores_zero() {
        let sentences = split_sentences("Quantum entanglement puzzles physicists. It is so.");
        let scored = rank(&sentences).unwrap();
        assert_eq!(scored[1].score, 0.0);
        assert!(scored[0].score > 0.0);
    }

    #[test]
    fn test_scores_are_reproducible() {
        let text = "Rust compiles fast code. Compilers check borrows. \
                    Borrow checking prevents races. Fast code matters.";
        let a = rank(&split_sentences(text)).unwrap();
        let b = rank(&split_sentences(text)).unwrap();
        let bits_a: Vec<u64> = a.iter().map(|s| s.score.to_bits()).collect();
        let bits_b: Vec<u64> = b.iter().map(|s| s.score.to_bits()).collect();
        assert_eq!(bits_a, bits_b);
    }

    #[test]
    fn test_score_is_mean_idf_per_token() {
        // "apple" is in both sentences (idf 1), "pear" only in the first.
        let sentences = split_sentences("Apple pear pear. Apple.");
        let matrix = TermWeightMatrix::build(&sentences).unwrap();
        let rare_idf = (3.0f64 / 2.0).ln() + 1.0;
        assert!((matrix.score(0) - (1.0 + 2.0 * rare_idf) / 3.0).abs() < 1e-12);
        assert!((matrix.score(1) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_long_distinctive_sentence_beats_short_common_one() {
        let sentences = split_sentences(
            "It was the council. \
             Council engineers from Valparaiso presented detailed foundation \
             survey results yesterday. \
             The council met again. \
             Then the council adjourned.",
        );
        let scored = rank(&sentences).unwrap();
        assert!((scored[0].score - 1.0).abs() < 1e-12);
        assert!(scored[1].score > scored[0].score);
        assert!(scored[1].score > scored[2].score);
        assert!(scored[1].score > scored[3].score);
    }

    #[test]
    fn test_duplicate_sentences_keep_separate_scores() {
        let sentences = split_sentences("Solar power grows. Wind farms expand. Solar power grows.");
        let scored = rank(&sentences).unwrap();
        assert_eq!(scored.len(), 3);
        assert_eq!(scored[0].score, scored[2].score);
        assert_eq!(scored[2].sentence.index, 2);
    }
}
