// ABOUTME: Request orchestration: Ingest -> Validate -> Extract -> Summarize -> Respond, stopping at the first failure.
// ABOUTME: Pipeline owns the extraction client, the summarizer, and the abstractive backend for one configuration.

//! The summarization pipeline.
//!
//! - **Ingest** takes direct text as-is, or fetches a URL and extracts its main
//!   content. Fetch failures are carried forward, not raised.
//! - **Validate** rejects failed ingests, blank text, text carrying the `ERROR:`
//!   marker, and text under the word floor.
//! - **Extract** splits the document into positioned sentences.
//! - **Summarize** ranks and composes; faults here are reported, never retried.
//! - **Respond** assembles the report with statistics and the abstractive summary.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use condense_extract::{Client, ExtractError, ERROR_MARKER};
use condense_summary::{split_sentences, stats, word_count, Sentence, Summary, Summarizer};

use crate::abstractive::Abstractive;
use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::report::{Response, SummaryReport};

/// Where the document text comes from. The two sources are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Text(String),
    Url(String),
}

/// Stages of a single request, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Ingest,
    Validate,
    Extract,
    Summarize,
    Respond,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Ingest => "ingest",
            Stage::Validate => "validate",
            Stage::Extract => "extract",
            Stage::Summarize => "summarize",
            Stage::Respond => "respond",
        };
        write!(f, "{}", s)
    }
}

/// Origin marker of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    Direct,
    Fetched { url: String },
}

/// Source text of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub text: String,
    pub origin: Origin,
}

/// Result of the ingest stage; a failed fetch is checked by validation.
#[derive(Debug)]
enum Ingested {
    Document(Document),
    Failed(ExtractError),
}

/// A configured summarization pipeline. Holds no per-request state.
#[derive(Debug)]
pub struct Pipeline {
    config: PipelineConfig,
    client: Client,
    summarizer: Summarizer,
    abstractive: Abstractive,
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

impl Pipeline {
    /// Build a pipeline; the abstractive backend is chosen from the config.
    pub fn new(config: PipelineConfig) -> Result<Self, ExtractError> {
        let client = Client::new(config.extract.clone())?;
        let abstractive = Abstractive::from_config(config.abstractive.as_ref());
        Ok(Self {
            summarizer: Summarizer::new(config.summary_sentences),
            config,
            client,
            abstractive,
        })
    }

    /// Replace the abstractive backend.
    pub fn with_abstractive(mut self, abstractive: Abstractive) -> Self {
        self.abstractive = abstractive;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run a request, returning the success report or the first failure.
    pub async fn run(&self, input: Input) -> Result<SummaryReport, PipelineError> {
        tracing::debug!(stage = %Stage::Ingest, "start");
        let ingested = self.ingest(input).await;

        tracing::debug!(stage = %Stage::Validate, "start");
        let document = self.validate(ingested)?;

        tracing::debug!(stage = %Stage::Extract, "start");
        let sentences = split_sentences(&document.text);

        tracing::debug!(stage = %Stage::Summarize, sentences = sentences.len(), "start");
        let summary = self.summarize(&document.text, sentences)?;

        tracing::debug!(stage = %Stage::Respond, kept = summary.sentences.len(), "start");
        Ok(self.report(document, summary).await)
    }

    /// Run a request and fold the outcome into a [`Response`].
    pub async fn respond(&self, input: Input) -> Response {
        Response::from(self.run(input).await)
    }

    async fn ingest(&self, input: Input) -> Ingested {
        match input {
            Input::Text(text) => Ingested::Document(Document {
                text,
                origin: Origin::Direct,
            }),
            Input::Url(url) => match self.client.fetch_article(&url).await {
                Ok(article) => Ingested::Document(Document {
                    text: article.text,
                    origin: Origin::Fetched { url },
                }),
                Err(err) => {
                    tracing::warn!(url = %url, error = %err, "fetch failed");
                    Ingested::Failed(err)
                }
            },
        }
    }

    fn validate(&self, ingested: Ingested) -> Result<Document, PipelineError> {
        let document = match ingested {
            Ingested::Document(document) => document,
            Ingested::Failed(err) => return Err(err.into()),
        };

        let text = document.text.trim();
        if text.is_empty() {
            return Err(PipelineError::EmptyContent);
        }
        if text.starts_with(ERROR_MARKER) {
            return Err(PipelineError::TransportFailure(text.to_string()));
        }

        let words = word_count(&document.text);
        if words < self.config.min_words {
            return Err(PipelineError::InsufficientLength {
                words,
                minimum: self.config.min_words,
            });
        }
        Ok(document)
    }

    fn summarize(&self, text: &str, sentences: Vec<Sentence>) -> Result<Summary, PipelineError> {
        let summarizer = self.summarizer;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            summarizer.summarize_sentences(text, sentences)
        }));

        let result = match outcome {
            Ok(result) => result.map_err(PipelineError::from),
            Err(payload) => Err(PipelineError::InternalFault(panic_message(payload.as_ref()))),
        };
        if let Err(PipelineError::InternalFault(msg)) = &result {
            tracing::error!(error = %msg, "summarization fault");
        }
        result
    }

    async fn report(&self, document: Document, summary: Summary) -> SummaryReport {
        let abstractive_summary = self.abstractive.summarize(&document.text).await;
        SummaryReport {
            status: "success".to_string(),
            original_stats: stats(&document.text),
            extractive_stats: stats(&summary.text),
            extractive_summary: summary.text,
            abstractive_summary,
            original_text: document.text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipeline() -> Pipeline {
        Pipeline::new(PipelineConfig::default()).unwrap()
    }

    #[test]
    fn test_validate_rejects_blank_text() {
        let ingested = Ingested::Document(Document {
            text: " \n\t".to_string(),
            origin: Origin::Direct,
        });
        assert_eq!(
            pipeline().validate(ingested),
            Err(PipelineError::EmptyContent)
        );
    }

    #[test]
    fn test_validate_rejects_error_tagged_direct_text() {
        let text = format!(
            "ERROR: Failed to fetch URL or connect to the internet. {}",
            vec!["word"; 60].join(" ")
        );
        let ingested = Ingested::Document(Document {
            text: text.clone(),
            origin: Origin::Direct,
        });
        assert_eq!(
            pipeline().validate(ingested),
            Err(PipelineError::TransportFailure(text))
        );
    }

    #[test]
    fn test_validate_surfaces_fetch_failure() {
        let ingested = Ingested::Failed(ExtractError::fetch(
            "https://example.com",
            "Fetch",
            Some(anyhow::anyhow!("HTTP status 502")),
        ));
        match pipeline().validate(ingested) {
            Err(PipelineError::TransportFailure(msg)) => {
                assert!(msg.starts_with("ERROR: Failed to fetch URL"));
                assert!(msg.contains("HTTP status 502"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_invalid_sentence_count_is_internal_fault() {
        let config = PipelineConfig::builder().summary_sentences(0).build();
        let pipeline = Pipeline::new(config).unwrap();
        let err = pipeline
            .summarize("One. Two.", split_sentences("One. Two."))
            .unwrap_err();
        assert!(matches!(err, PipelineError::InternalFault(_)));
    }

    #[test]
    fn test_panic_message_variants() {
        let boxed: Box<dyn std::any::Any + Send> = Box::new("static str");
        assert_eq!(panic_message(boxed.as_ref()), "static str");
        let boxed: Box<dyn std::any::Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(boxed.as_ref()), "owned");
        let boxed: Box<dyn std::any::Any + Send> = Box::new(7u8);
        assert_eq!(panic_message(boxed.as_ref()), "unknown panic");
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::Summarize.to_string(), "summarize");
    }
}
