// ABOUTME: Deterministic sentence and word tokenization for English prose.
// ABOUTME: Sentences are substrings of the input tagged with their 0-based position.

//! Sentence and word boundary detection.
//!
//! Sentence boundaries are `.`, `?` and `!` (runs collapse into one boundary)
//! followed by whitespace or the end of the text. Closing quotes and brackets
//! after the terminator stay with the sentence. A lone period after a known
//! abbreviation, a name initial, or a dotted token such as `U.S` does not end a
//! sentence. A capital letter counts as an initial only when another initial
//! follows it (`J. K.`), or when it sits between capitalised words
//! (`John F. Kennedy`). `No.` is an abbreviation only in front of a number.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::stopwords::is_stopword;

static WORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\w+(?:['\x{2019}-]\w+)*").unwrap()
});

/// Lowercased abbreviations that do not end a sentence when followed by a period.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "mt", "vs", "etc", "inc", "ltd", "co",
    "corp", "dept", "univ", "gen", "col", "lt", "sgt", "capt", "gov", "sen", "rep", "rev",
    "vol", "fig", "approx", "est", "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep",
    "sept", "oct", "nov", "dec", "al", "cf",
];

/// Abbreviations that only hold in front of a number, as in `No. 5`.
const NUMBER_ABBREVIATIONS: &[&str] = &["no", "nos"];

/// A sentence of a document and its position in the document's sentence sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub index: usize,
    pub text: String,
}

impl Sentence {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }
}

pub(crate) fn init() {
    Lazy::force(&WORD_RE);
}

fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '?' | '!')
}

fn is_closer(c: char) -> bool {
    matches!(
        c,
        '"' | '\'' | ')' | ']' | '}' | '\u{201D}' | '\u{2019}' | '\u{00BB}'
    )
}

fn strip_leading_punct(token: &str) -> &str {
    token.trim_start_matches(|c: char| !c.is_alphanumeric())
}

fn starts_uppercase(token: &str) -> bool {
    strip_leading_punct(token)
        .chars()
        .next()
        .is_some_and(char::is_uppercase)
}

/// `J.` style token: one capital letter and a period.
fn is_initial_token(token: &str) -> bool {
    let mut chars = strip_leading_punct(token).chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(letter), Some('.'), None) if letter.is_uppercase()
    )
}

fn is_initial(letter: char, previous: &str, next: &str) -> bool {
    if !letter.is_uppercase() {
        return false;
    }
    if is_initial_token(next) {
        return true;
    }
    starts_uppercase(next) && (is_initial_token(previous) || starts_uppercase(previous))
}

/// Returns true when the lone period between `preceding` and `following`
/// belongs to an abbreviation rather than ending a sentence.
fn ends_with_abbreviation(preceding: &str, following: &str) -> bool {
    let mut tokens = preceding.split_whitespace().rev().map(strip_leading_punct);
    let token = tokens.next().unwrap_or("");
    if token.is_empty() {
        return false;
    }
    let next = following.split_whitespace().next().unwrap_or("");

    let mut chars = token.chars();
    if let (Some(first), None) = (chars.next(), chars.next()) {
        return is_initial(first, tokens.next().unwrap_or(""), next);
    }

    if token.contains('.') {
        return true;
    }

    let lower = token.to_lowercase();
    if NUMBER_ABBREVIATIONS.contains(&lower.as_str()) {
        return strip_leading_punct(next).starts_with(|c: char| c.is_ascii_digit());
    }
    ABBREVIATIONS.contains(&lower.as_str())
}

fn push_sentence(segment: &str, out: &mut Vec<Sentence>) {
    let trimmed = segment.trim();
    if !trimmed.is_empty() {
        let index = out.len();
        out.push(Sentence::new(index, trimmed));
    }
}

/// Split text into sentences, keeping each sentence's position.
///
/// Every sentence is a trimmed substring of `text`; empty segments are dropped
/// and do not consume an index.
pub fn split_sentences(text: &str) -> Vec<Sentence> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut out = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        let (pos, c) = chars[i];
        if !is_terminator(c) {
            i += 1;
            continue;
        }

        let mut j = i + 1;
        while j < chars.len() && is_terminator(chars[j].1) {
            j += 1;
        }
        while j < chars.len() && is_closer(chars[j].1) {
            j += 1;
        }

        let at_end = j == chars.len();
        if at_end || chars[j].1.is_whitespace() {
            let lone_period = c == '.' && j == i + 1;
            let end = if at_end { text.len() } else { chars[j].0 };
            if !(lone_period && ends_with_abbreviation(&text[start..pos], &text[end..])) {
                push_sentence(&text[start..end], &mut out);
                start = end;
            }
        }
        i = j;
    }

    if start < text.len() {
        push_sentence(&text[start..], &mut out);
    }
    out
}

/// Split text into sentence strings in reading order.
pub fn sentences(text: &str) -> Vec<String> {
    split_sentences(text).into_iter().map(|s| s.text).collect()
}

/// Split text into punctuation-stripped word tokens, case preserved.
pub fn words(text: &str) -> Vec<&str> {
    WORD_RE.find_iter(text).map(|m| m.as_str()).collect()
}

/// Number of word tokens in `text`.
pub fn word_count(text: &str) -> usize {
    WORD_RE.find_iter(text).count()
}

/// Weighting terms of a sentence: lowercased words of two or more characters
/// that are not stopwords, in order of appearance.
pub fn terms(text: &str) -> Vec<String> {
    words(text)
        .into_iter()
        .map(str::to_lowercase)
        .filter(|w| w.chars().count() >= 2 && !is_stopword(w))
        .collect()
}
