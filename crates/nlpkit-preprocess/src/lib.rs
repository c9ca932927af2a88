//! nlpkit Preprocess - Text preparation for classifiers
//!
//! Cleans and lemmatizes labelled texts, encodes the labels, extracts
//! TF-IDF features and persists the results:
//! - `clean_text` / `lemmatize_text` normalization
//! - `LabelEncoder` with sorted classes
//! - `PreprocessPipeline` tying the steps together
//! - `ArtifactStore` for CSV, NumPy and JSON outputs

pub mod artifacts;
pub mod clean;
pub mod encoder;
pub mod pipeline;

pub use artifacts::{ArtifactManifest, ArtifactStore, LoadedArtifacts};
pub use clean::{clean_text, lemmatize_text};
pub use encoder::LabelEncoder;
pub use pipeline::{
    read_records, sample_records, LabeledText, PreprocessOutput, PreprocessPipeline,
    ProcessedRecord, DEFAULT_MAX_FEATURES,
};
