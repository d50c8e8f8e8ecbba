// ABOUTME: Collects rendered text from scraper element trees and normalizes whitespace.
// ABOUTME: Block-level boundaries become line breaks so adjacent blocks never run together.

use ego_tree::NodeRef;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Node};

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s\p{Cc}]+").unwrap());

/// Elements whose text is never rendered as prose.
const SKIPPED_TAGS: &[&str] = &["script", "style", "noscript", "template", "head"];

/// Elements that start a new line of text.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav",
    "ol", "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

enum Piece<'a> {
    Text(&'a str),
    Break,
}

fn walk<'a>(node: NodeRef<'a, Node>, out: &mut Vec<Piece<'a>>) {
    for child in node.children() {
        match child.value() {
            Node::Text(text) => out.push(Piece::Text(text)),
            Node::Element(el) => {
                let name = el.name();
                if SKIPPED_TAGS.contains(&name) {
                    continue;
                }
                let block = BLOCK_TAGS.contains(&name);
                if block {
                    out.push(Piece::Break);
                }
                walk(child, out);
                if block {
                    out.push(Piece::Break);
                }
            }
            _ => {}
        }
    }
}

/// All rendered text under `element`, with a newline at every block boundary.
pub fn element_text(element: ElementRef<'_>) -> String {
    let mut pieces = Vec::new();
    walk(*element, &mut pieces);

    let mut out = String::new();
    for piece in pieces {
        match piece {
            Piece::Text(t) => out.push_str(t),
            Piece::Break => out.push('\n'),
        }
    }
    out
}

/// Every non-blank text node under `element`, trimmed, one per line.
pub fn element_lines(element: ElementRef<'_>) -> String {
    let mut pieces = Vec::new();
    walk(*element, &mut pieces);

    pieces
        .into_iter()
        .filter_map(|p| match p {
            Piece::Text(t) => Some(t.trim()),
            Piece::Break => None,
        })
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Collapse every run of whitespace or control characters to one space and trim.
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn first<'a>(doc: &'a Html, css: &str) -> ElementRef<'a> {
        doc.select(&Selector::parse(css).unwrap()).next().unwrap()
    }

    #[test]
    fn test_element_text_skips_scripts_and_breaks_blocks() {
        let doc = Html::parse_document(
            "<html><body><div><p>One</p><script>var x = 1;</script>\
             <p>Two <b>bold</b></p></div></body></html>",
        );
        let text = element_text(first(&doc, "div"));
        assert!(!text.contains("var x"));
        assert_eq!(normalize_whitespace(&text), "One Two bold");
    }

    #[test]
    fn test_element_lines_trims_and_drops_blank_nodes() {
        let doc = Html::parse_document(
            "<html><body>\n  <h1> Title </h1>\n  <p>First   line</p>\n\
             <style>p{}</style></body></html>",
        );
        assert_eq!(element_lines(first(&doc, "body")), "Title\nFirst   line");
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  a\t\tb\n\r\nc\u{7}d  "), "a b c d");
        assert_eq!(normalize_whitespace(" \n "), "");
    }
}
