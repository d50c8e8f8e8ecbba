// ABOUTME: Closed English stopword list excluded from sentence term weighting.
// ABOUTME: Loaded once into a process-wide set and treated as read-only afterwards.

use std::collections::HashSet;

use once_cell::sync::Lazy;

/// English stopwords (the NLTK corpus list).
const ENGLISH: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| ENGLISH.iter().copied().collect());

/// Force the stopword set to be built.
pub(crate) fn init() {
    Lazy::force(&STOPWORDS);
}

/// Returns true if `word` (already lowercased) is a stopword.
///
/// Curly apostrophes are folded to ASCII before lookup.
pub fn is_stopword(word: &str) -> bool {
    if word.contains('\u{2019}') {
        return STOPWORDS.contains(word.replace('\u{2019}', "'").as_str());
    }
    STOPWORDS.contains(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_function_words_are_stopwords() {
        for w in ["the", "and", "of", "is", "were", "should've"] {
            assert!(is_stopword(w), "{w} should be a stopword");
        }
    }

    #[test]
    fn test_content_words_are_not_stopwords() {
        for w in ["cat", "summary", "london", "barked"] {
            assert!(!is_stopword(w), "{w} should not be a stopword");
        }
    }

    #[test]
    fn test_curly_apostrophe_folds() {
        assert!(is_stopword("don\u{2019}t"));
    }

    #[test]
    fn test_list_has_no_duplicates() {
        assert_eq!(STOPWORDS.len(), ENGLISH.len());
    }
}
