// ABOUTME: Main library entry point for condense content extraction.
// ABOUTME: Re-exports the public API: Client, ClientBuilder, Options, Article, Extractor, ExtractError.

//! Main-content extraction from web pages.
//!
//! Fetches a page (or takes raw markup) and isolates its readable article
//! text, discarding navigation and boilerplate.
//!
//! # Example
//!
//! ```no_run
//! use condense_extract::{Client, ExtractError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ExtractError> {
//!     let client = Client::builder().build()?;
//!     let article = client.fetch_article("https://example.com/article").await?;
//!     println!("{}", article.text);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod dom;
pub mod error;
pub mod extractors;
pub mod options;
pub mod resource;

pub use crate::client::Client;
pub use crate::error::{ErrorCode, ExtractError, ERROR_MARKER};
pub use crate::extractors::{
    extract, Article, ExtractionStrategy, Extractor, StrategyKind, MIN_ARTICLE_WORDS,
};
pub use crate::options::{ClientBuilder, Options, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
