// ABOUTME: Pipeline configuration: summary length, validation floor, extraction options, abstractive endpoint.
// ABOUTME: PipelineConfigBuilder provides a fluent API mirroring the extraction ClientBuilder.

use std::time::Duration;

use condense_extract::Options;
use condense_summary::DEFAULT_SUMMARY_SENTENCES;
use url::Url;

/// Inputs with fewer words than this are rejected before ranking.
pub const MIN_SUMMARY_WORDS: usize = 50;

/// Where to reach an optional abstractive summarization model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceConfig {
    pub endpoint: Url,
    pub token: Option<String>,
    pub timeout: Duration,
}

impl InferenceConfig {
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            token: None,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Settings for one pipeline instance.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// K: sentences kept in the extractive summary.
    pub summary_sentences: usize,
    /// Validation floor, independent of the extractor's article floor.
    pub min_words: usize,
    pub extract: Options,
    pub abstractive: Option<InferenceConfig>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            summary_sentences: DEFAULT_SUMMARY_SENTENCES,
            min_words: MIN_SUMMARY_WORDS,
            extract: Options::default(),
            abstractive: None,
        }
    }
}

impl PipelineConfig {
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }
}

/// Builder for [`PipelineConfig`].
#[derive(Debug, Clone, Default)]
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    pub fn summary_sentences(mut self, k: usize) -> Self {
        self.config.summary_sentences = k;
        self
    }

    pub fn min_words(mut self, words: usize) -> Self {
        self.config.min_words = words;
        self
    }

    pub fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.config.extract.timeout = timeout;
        self
    }

    pub fn allow_private_networks(mut self, allow: bool) -> Self {
        self.config.extract.allow_private_networks = allow;
        self
    }

    pub fn extract_options(mut self, opts: Options) -> Self {
        self.config.extract = opts;
        self
    }

    pub fn abstractive(mut self, inference: Option<InferenceConfig>) -> Self {
        self.config.abstractive = inference;
        self
    }

    pub fn build(self) -> PipelineConfig {
        self.config
    }
}
