// ABOUTME: Main-content extraction as an ordered cascade of strategies with a word-count quality gate.
// ABOUTME: Defines Article, the Extractor cascade, and the infallible extract() entry point.

//! Main-content extraction.
//!
//! Strategies are tried in order. A gated strategy's text is accepted only if
//! it reaches the word floor; the final body strategy is always accepted.
//! Extraction never fails: a page with no text yields an empty `Article`.

pub mod strategy;

use scraper::Html;
use serde::Serialize;

use condense_summary::word_count;

pub use strategy::{
    ArticleContainer, BodyText, ExtractionStrategy, Paragraphs, StrategyKind,
};

/// Word floor below which an article or paragraph extraction counts as under-extracted.
pub const MIN_ARTICLE_WORDS: usize = 100;

/// Text extracted from a page and the strategy that produced it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Article {
    pub text: String,
    pub strategy: Option<StrategyKind>,
    pub word_count: usize,
}

impl Article {
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Ordered strategy cascade.
pub struct Extractor {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
    min_words: usize,
}

impl std::fmt::Debug for Extractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kinds: Vec<StrategyKind> = self.strategies.iter().map(|s| s.kind()).collect();
        f.debug_struct("Extractor")
            .field("strategies", &kinds)
            .field("min_words", &self.min_words)
            .finish()
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(MIN_ARTICLE_WORDS)
    }
}

impl Extractor {
    /// The standard cascade: `<article>`, then paragraphs, then the whole body.
    pub fn new(min_words: usize) -> Self {
        Self::with_strategies(
            vec![
                Box::new(ArticleContainer),
                Box::new(Paragraphs),
                Box::new(BodyText),
            ],
            min_words,
        )
    }

    pub fn with_strategies(strategies: Vec<Box<dyn ExtractionStrategy>>, min_words: usize) -> Self {
        Self {
            strategies,
            min_words,
        }
    }

    pub fn min_words(&self) -> usize {
        self.min_words
    }

    /// Extract the main text of `markup`.
    pub fn extract(&self, markup: &str) -> Article {
        let doc = Html::parse_document(markup);

        for strategy in &self.strategies {
            let kind = strategy.kind();
            let Some(text) = strategy.extract(&doc) else {
                tracing::trace!(strategy = %kind, "no content");
                continue;
            };

            let words = word_count(&text);
            if strategy.gated() && words < self.min_words {
                tracing::debug!(strategy = %kind, words, min = self.min_words, "under-extracted");
                continue;
            }

            tracing::debug!(strategy = %kind, words, "extracted");
            return Article {
                text,
                strategy: Some(kind),
                word_count: words,
            };
        }

        Article::default()
    }
}

/// Extract the main text of `markup` with the standard cascade.
pub fn extract(markup: &str) -> String {
    Extractor::default().extract(markup).text
}
