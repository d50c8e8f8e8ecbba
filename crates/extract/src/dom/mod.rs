// ABOUTME: DOM traversal utilities for turning parsed HTML into plain text.
// ABOUTME: Provides text collection that skips non-rendered elements and whitespace normalization.

//! DOM utilities for HTML documents parsed with scraper.

pub mod text;
