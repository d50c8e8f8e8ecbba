// ABOUTME: Main library entry point for condense: extract an article and summarize it extractively.
// ABOUTME: Re-exports the public API: Pipeline, Input, PipelineConfig, PipelineError, Response, SummaryReport.

//! Condense - article extraction and extractive summarization.
//!
//! # Example
//!
//! ```no_run
//! use condense::{Input, Pipeline, PipelineConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pipeline = Pipeline::new(PipelineConfig::default())?;
//!     let response = pipeline
//!         .respond(Input::Url("https://example.com/article".to_string()))
//!         .await;
//!     println!("{}", serde_json::to_string_pretty(&response)?);
//!     Ok(())
//! }
//! ```

pub mod abstractive;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;

pub use crate::abstractive::{Abstractive, InferenceBackend, PlaceholderBackend, SummarizerBackend};
pub use crate::config::{InferenceConfig, PipelineConfig, PipelineConfigBuilder, MIN_SUMMARY_WORDS};
pub use crate::error::PipelineError;
pub use crate::pipeline::{Document, Input, Origin, Pipeline, Stage};
pub use crate::report::{ErrorBody, Response, SummaryReport};
