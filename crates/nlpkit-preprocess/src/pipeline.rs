//! Preprocessing pipeline: clean, lemmatize, encode labels, vectorize
//!
//! Author: hephaex@gmail.com

use std::path::Path;
use std::sync::Arc;

use ndarray::Array2;
use nlpkit_core::{Lemmatizer, NlpError, Result};
use nlpkit_vector::{TfidfVectorizer, Vectorizer};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::clean::{clean_text, lemmatize_text};
use crate::encoder::LabelEncoder;

/// Default vocabulary cap of the TF-IDF features
pub const DEFAULT_MAX_FEATURES: usize = 1000;

// ============================================================================
// Records
// ============================================================================

/// One labelled input text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledText {
    pub text: String,
    pub label: String,
}

impl LabeledText {
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }
}

/// One output row, as written to `processed_data.csv`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedRecord {
    pub text: String,
    pub label: String,
    pub cleaned_text: String,
    pub processed_text: String,
    pub encoded_label: usize,
}

/// The three built-in demonstration rows
pub fn sample_records() -> Vec<LabeledText> {
    vec![
        LabeledText::new("This is a sample text!", "positive"),
        LabeledText::new("Another example with numbers 123.", "negative"),
        LabeledText::new("Text preprocessing is important!!!", "positive"),
    ]
}

/// Read `text,label` rows from a CSV file with a header line
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<LabeledText>> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| NlpError::Serialization(format!("{}: {e}", path.display())))?;

    let records = reader
        .deserialize()
        .collect::<std::result::Result<Vec<LabeledText>, _>>()
        .map_err(|e| NlpError::Serialization(format!("{}: {e}", path.display())))?;

    debug!(path = %path.display(), rows = records.len(), "Read input records");
    Ok(records)
}

// ============================================================================
// Pipeline
// ============================================================================

/// Everything produced by one pipeline run
#[derive(Debug, Clone)]
pub struct PreprocessOutput {
    pub records: Vec<ProcessedRecord>,
    pub encoder: LabelEncoder,
    pub vectorizer: TfidfVectorizer,
    /// Dense documents x features TF-IDF weights
    pub tfidf: Array2<f64>,
}

impl PreprocessOutput {
    /// `(rows, columns)` of the processed table
    pub fn data_shape(&self) -> (usize, usize) {
        (self.records.len(), 5)
    }

    pub fn tfidf_shape(&self) -> (usize, usize) {
        self.tfidf.dim()
    }

    pub fn summary(&self) -> String {
        let (rows, columns) = self.data_shape();
        let (docs, features) = self.tfidf_shape();
        format!(
            "Processed data shape: ({rows}, {columns})\nTF-IDF matrix shape: ({docs}, {features})"
        )
    }
}

/// Prepares labelled texts for a classifier
pub struct PreprocessPipeline {
    lemmatizer: Arc<dyn Lemmatizer>,
    max_features: usize,
}

impl PreprocessPipeline {
    pub fn new(lemmatizer: Arc<dyn Lemmatizer>) -> Self {
        Self {
            lemmatizer,
            max_features: DEFAULT_MAX_FEATURES,
        }
    }

    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features;
        self
    }

    /// Normalize one text: `(cleaned, processed)`
    pub fn process_text(&self, text: &str) -> (String, String) {
        let cleaned = clean_text(text);
        let processed = lemmatize_text(&cleaned, self.lemmatizer.as_ref());
        (cleaned, processed)
    }

    pub fn run(&self, inputs: &[LabeledText]) -> Result<PreprocessOutput> {
        if inputs.is_empty() {
            return Err(NlpError::InvalidInput("no records to preprocess".to_string()));
        }

        let normalized: Vec<(String, String)> = inputs
            .iter()
            .map(|input| self.process_text(&input.text))
            .collect();

        let labels: Vec<&str> = inputs.iter().map(|input| input.label.as_str()).collect();
        let mut encoder = LabelEncoder::new();
        let codes = encoder.fit_transform(&labels)?;

        let processed: Vec<String> = normalized.iter().map(|(_, p)| p.clone()).collect();
        let mut vectorizer = TfidfVectorizer::new().with_max_features(self.max_features);
        let tfidf = vectorizer.fit_transform(&processed)?.matrix;

        let records = inputs
            .iter()
            .zip(normalized)
            .zip(codes)
            .map(|((input, (cleaned, processed)), code)| ProcessedRecord {
                text: input.text.clone(),
                label: input.label.clone(),
                cleaned_text: cleaned,
                processed_text: processed,
                encoded_label: code,
            })
            .collect();

        info!(
            rows = inputs.len(),
            classes = encoder.classes().len(),
            features = tfidf.ncols(),
            "Preprocessing complete"
        );

        Ok(PreprocessOutput {
            records,
            encoder,
            vectorizer,
            tfidf,
        })
    }
}
