// ABOUTME: Individual main-content extraction strategies over a parsed HTML document.
// ABOUTME: ArticleContainer, Paragraphs, and BodyText, each returning None when they find no text.

use std::fmt;

use scraper::{Html, Selector};
use serde::Serialize;

use crate::dom::text::{element_lines, element_text, normalize_whitespace};

/// Which strategy produced an extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    ArticleContainer,
    Paragraphs,
    Body,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StrategyKind::ArticleContainer => "article",
            StrategyKind::Paragraphs => "paragraphs",
            StrategyKind::Body => "body",
        };
        write!(f, "{}", s)
    }
}

/// One way of locating the readable text of a page.
pub trait ExtractionStrategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    /// Extracted text, or None when the strategy finds nothing.
    fn extract(&self, doc: &Html) -> Option<String>;

    /// Whether the result must reach the word floor to be accepted.
    fn gated(&self) -> bool {
        true
    }
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// All text under the first semantic `<article>` element, whitespace-collapsed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArticleContainer;

impl ExtractionStrategy for ArticleContainer {
    fn kind(&self) -> StrategyKind {
        StrategyKind::ArticleContainer
    }

    fn extract(&self, doc: &Html) -> Option<String> {
        let selector = Selector::parse("article").ok()?;
        let article = doc.select(&selector).next()?;
        non_empty(normalize_whitespace(&element_text(article)))
    }
}

/// Text of every `<p>` element joined by newlines, whitespace-collapsed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Paragraphs;

impl ExtractionStrategy for Paragraphs {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Paragraphs
    }

    fn extract(&self, doc: &Html) -> Option<String> {
        let selector = Selector::parse("p").ok()?;
        let joined = doc
            .select(&selector)
            .map(element_text)
            .collect::<Vec<_>>()
            .join("\n");
        non_empty(normalize_whitespace(&joined))
    }
}

/// Every text node of `<body>`, one per line, with paragraph breaks kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct BodyText;

impl ExtractionStrategy for BodyText {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Body
    }

    fn extract(&self, doc: &Html) -> Option<String> {
        let selector = Selector::parse("body").ok()?;
        let body = doc.select(&selector).next()?;
        non_empty(element_lines(body))
    }

    fn gated(&self) -> bool {
        false
    }
}
