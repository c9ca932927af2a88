//! Text normalization for classifier input

use nlpkit_core::{is_stopword, Lemmatizer};
use once_cell::sync::Lazy;
use regex::Regex;

static NON_LETTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z\s]").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Lowercase, keep only ASCII letters and whitespace, collapse whitespace runs
pub fn clean_text(text: &str) -> String {
    let lower = text.to_lowercase();
    let letters = NON_LETTER.replace_all(&lower, "");
    WHITESPACE.replace_all(&letters, " ").trim().to_string()
}

/// Drop stopwords and lemmatize the remaining words as nouns
pub fn lemmatize_text(text: &str, lemmatizer: &dyn Lemmatizer) -> String {
    text.split_whitespace()
        .filter(|word| !is_stopword(word))
        .map(|word| lemmatizer.lemmatize(word, None))
        .collect::<Vec<_>>()
        .join(" ")
}
