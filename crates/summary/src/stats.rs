// ABOUTME: Word and sentence counts reported alongside a summary.

use serde::{Deserialize, Serialize};

use crate::tokenize::{split_sentences, word_count};

/// Length statistics for a piece of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStats {
    pub word_count: usize,
    pub sentence_count: usize,
}

pub fn stats(text: &str) -> TextStats {
    TextStats {
        word_count: word_count(text),
        sentence_count: split_sentences(text).len(),
    }
}
