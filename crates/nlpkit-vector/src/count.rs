//! Bag of words term counts

use std::collections::{HashMap, HashSet};

use ndarray::Array2;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use nlpkit_core::{NlpError, Result};

use crate::{DocumentTermMatrix, Vectorizer, Vocabulary};

/// Tokens of two or more word characters
static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").unwrap());

/// Counts term occurrences per document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountVectorizer {
    lowercase: bool,
    binary: bool,
    /// Minimum number of documents a term must appear in
    min_df: usize,
    /// Maximum share of documents a term may appear in
    max_df: f64,
    max_features: Option<usize>,
    vocabulary: Option<Vocabulary>,
}

impl Default for CountVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl CountVectorizer {
    pub fn new() -> Self {
        Self {
            lowercase: true,
            binary: false,
            min_df: 1,
            max_df: 1.0,
            max_features: None,
            vocabulary: None,
        }
    }

    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    /// Record presence (1) instead of counts
    pub fn with_binary(mut self, binary: bool) -> Self {
        self.binary = binary;
        self
    }

    pub fn with_min_df(mut self, min_df: usize) -> Self {
        self.min_df = min_df;
        self
    }

    pub fn with_max_df(mut self, max_df: f64) -> Self {
        self.max_df = max_df;
        self
    }

    /// Keep only the `n` most frequent terms across the corpus
    pub fn with_max_features(mut self, n: usize) -> Self {
        self.max_features = Some(n);
        self
    }

    pub fn is_binary(&self) -> bool {
        self.binary
    }

    /// Split a document into vocabulary candidates
    pub fn analyze(&self, document: &str) -> Vec<String> {
        let text = if self.lowercase {
            document.to_lowercase()
        } else {
            document.to_string()
        };
        TOKEN_PATTERN
            .find_iter(&text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Raw counts against the fitted vocabulary
    pub(crate) fn count_matrix(&self, documents: &[String]) -> Result<Array2<f64>> {
        let vocabulary = self.fitted_vocabulary()?;
        let mut matrix = Array2::<f64>::zeros((documents.len(), vocabulary.len()));

        for (row, document) in documents.iter().enumerate() {
            for token in self.analyze(document) {
                if let Some(col) = vocabulary.get(&token) {
                    if self.binary {
                        matrix[[row, col]] = 1.0;
                    } else {
                        matrix[[row, col]] += 1.0;
                    }
                }
            }
        }

        Ok(matrix)
    }

    pub(crate) fn fitted_vocabulary(&self) -> Result<&Vocabulary> {
        self.vocabulary
            .as_ref()
            .ok_or_else(|| NlpError::Model("vectorizer is not fitted".to_string()))
    }
}

impl Vectorizer for CountVectorizer {
    fn fit(&mut self, documents: &[String]) -> Result<()> {
        if documents.is_empty() {
            return Err(NlpError::InvalidInput("cannot fit on an empty corpus".to_string()));
        }

        let mut doc_freq: HashMap<String, usize> = HashMap::new();
        let mut term_freq: HashMap<String, usize> = HashMap::new();

        for document in documents {
            let tokens = self.analyze(document);
            let unique: HashSet<&String> = tokens.iter().collect();
            for term in unique {
                *doc_freq.entry(term.clone()).or_insert(0) += 1;
            }
            for term in tokens.iter() {
                *term_freq.entry(term.clone()).or_insert(0) += 1;
            }
        }

        let max_count = (self.max_df * documents.len() as f64).floor() as usize;
        let mut kept: Vec<(String, usize)> = doc_freq
            .into_iter()
            .filter(|(_, df)| *df >= self.min_df && *df <= max_count)
            .map(|(term, _)| {
                let total = term_freq.get(&term).copied().unwrap_or(0);
                (term, total)
            })
            .collect();

        if let Some(limit) = self.max_features {
            // Most frequent first, ties alphabetical
            kept.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            kept.truncate(limit);
        }

        if kept.is_empty() {
            return Err(NlpError::InvalidInput(
                "empty vocabulary; documents contain no terms after filtering".to_string(),
            ));
        }

        let vocabulary = Vocabulary::from_terms(kept.into_iter().map(|(term, _)| term));
        debug!(terms = vocabulary.len(), documents = documents.len(), "Fitted count vocabulary");
        self.vocabulary = Some(vocabulary);
        Ok(())
    }

    fn transform(&self, documents: &[String]) -> Result<DocumentTermMatrix> {
        let matrix = self.count_matrix(documents)?;
        let terms = self.fitted_vocabulary()?.terms().to_vec();
        Ok(DocumentTermMatrix::new(terms, matrix))
    }

    fn vocabulary(&self) -> Option<&Vocabulary> {
        self.vocabulary.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample_corpus;

    #[test]
    fn test_sample_vocabulary() {
        let mut vectorizer = CountVectorizer::new();
        vectorizer.fit(&sample_corpus()).unwrap();
        let vocab = vectorizer.vocabulary().unwrap();
        assert_eq!(
            vocab.terms(),
            &["and", "document", "first", "is", "one", "second", "the", "third", "this"]
        );
    }

    #[test]
    fn test_sample_counts() {
        let mut vectorizer = CountVectorizer::new();
        let dtm = vectorizer.fit_transform(&sample_corpus()).unwrap();
        assert_eq!(dtm.n_documents(), 4);
        assert_eq!(dtm.value(1, "document"), Some(2.0));
        assert_eq!(dtm.value(2, "and"), Some(1.0));
        assert_eq!(dtm.value(0, "second"), Some(0.0));
        // Row sums equal the number of kept tokens
        assert_eq!(dtm.matrix.row(1).sum(), 6.0);
    }

    #[test]
    fn test_single_char_tokens_dropped() {
        let mut vectorizer = CountVectorizer::new();
        let dtm = vectorizer
            .fit_transform(&["a b cd".to_string(), "I am".to_string()])
            .unwrap();
        assert_eq!(dtm.terms, vec!["am", "cd"]);
    }

    #[test]
    fn test_binary() {
        let mut vectorizer = CountVectorizer::new().with_binary(true);
        let dtm = vectorizer.fit_transform(&sample_corpus()).unwrap();
        assert_eq!(dtm.value(1, "document"), Some(1.0));
    }

    #[test]
    fn test_max_features_ties_alphabetical() {
        let mut vectorizer = CountVectorizer::new().with_max_features(5);
        vectorizer.fit(&sample_corpus()).unwrap();
        // document, is, the, this occur 4 times; first twice
        assert_eq!(
            vectorizer.vocabulary().unwrap().terms(),
            &["document", "first", "is", "the", "this"]
        );
    }

    #[test]
    fn test_min_and_max_df() {
        let mut vectorizer = CountVectorizer::new().with_min_df(2).with_max_df(0.9);
        vectorizer.fit(&sample_corpus()).unwrap();
        assert_eq!(vectorizer.vocabulary().unwrap().terms(), &["document", "first"]);
    }

    #[test]
    fn test_transform_before_fit_fails() {
        let vectorizer = CountVectorizer::new();
        assert!(vectorizer.transform(&sample_corpus()).is_err());
    }

    #[test]
    fn test_unknown_terms_ignored() {
        let mut vectorizer = CountVectorizer::new();
        vectorizer.fit(&sample_corpus()).unwrap();
        let dtm = vectorizer.transform(&["completely novel words".to_string()]).unwrap();
        assert_eq!(dtm.matrix.sum(), 0.0);
    }

    #[test]
    fn test_empty_corpus_rejected() {
        let mut vectorizer = CountVectorizer::new();
        assert!(vectorizer.fit(&[]).is_err());
        assert!(vectorizer.fit(&["a b".to_string()]).is_err());
    }
}
