// ABOUTME: Extractive summarization library for condense.
// ABOUTME: Provides sentence/word tokenization, TF-IDF sentence ranking, and order-preserving composition.

//! Unsupervised extractive summarization.
//!
//! Text is split into sentences, each sentence is treated as one document of a
//! small corpus, and sentences are scored by summing the TF-IDF weights of
//! their terms, which is the mean idf per term occurrence. The top-K sentences are re-emitted in reading order.
//!
//! # Example
//!
//! ```
//! use condense_summary::Summarizer;
//!
//! let summary = Summarizer::new(5)
//!     .summarize("The cat sat. The cat sat on the mat. A dog barked loudly outside.")
//!     .unwrap();
//! assert_eq!(summary.sentences.len(), 3);
//! ```

pub mod compose;
pub mod error;
pub mod rank;
pub mod stats;
pub mod stopwords;
pub mod tokenize;

pub use compose::{compose, select_top, Summary, Summarizer, DEFAULT_SUMMARY_SENTENCES};
pub use error::SummaryError;
pub use rank::{rank, ScoredSentence, TermWeightMatrix};
pub use stats::{stats, TextStats};
pub use stopwords::is_stopword;
pub use tokenize::{sentences, split_sentences, terms, word_count, words, Sentence};

/// Force the process-wide lookup tables (stopwords, tokenizer patterns).
///
/// Call once at startup so the first request does not pay for initialization.
pub fn init() {
    stopwords::init();
    tokenize::init();
}
