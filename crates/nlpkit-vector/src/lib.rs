//! nlpkit Vector - Numeric text representations
//!
//! Turns a corpus of documents into numbers:
//! - Bag of words counts (`CountVectorizer`) and row-normalized counts
//! - TF-IDF weights (`TfidfVectorizer`)
//! - Word and document embeddings from an embedding provider (`WordVectors`)

pub mod count;
pub mod embedding;
pub mod matrix;
pub mod tfidf;
pub mod word_vectors;

pub use count::CountVectorizer;
pub use embedding::{
    create_embedding_client, EmbeddingClient, HashingEmbedding, OllamaEmbedding, OpenAiEmbedding,
};
pub use matrix::{l2_normalize_rows, normalize_rows, DocumentTermMatrix, Vocabulary};
pub use tfidf::{Norm, TfidfVectorizer};
pub use word_vectors::{cosine_similarity, WordVectors};

use nlpkit_core::Result;

/// The four-document corpus used by the vectorization demonstration
pub const SAMPLE_DOCUMENTS: [&str; 4] = [
    "This is the first document",
    "This document is the second document",
    "And this is the third one",
    "Is this the first document",
];

/// Owned copy of [`SAMPLE_DOCUMENTS`]
pub fn sample_corpus() -> Vec<String> {
    SAMPLE_DOCUMENTS.iter().map(|d| d.to_string()).collect()
}

/// Common interface of the corpus vectorizers
///
/// `fit` derives the vocabulary once; `transform` may be called on any
/// documents afterwards, ignoring terms outside the vocabulary.
pub trait Vectorizer {
    fn fit(&mut self, documents: &[String]) -> Result<()>;

    fn transform(&self, documents: &[String]) -> Result<DocumentTermMatrix>;

    fn fit_transform(&mut self, documents: &[String]) -> Result<DocumentTermMatrix> {
        self.fit(documents)?;
        self.transform(documents)
    }

    /// Fitted vocabulary, `None` before `fit`
    fn vocabulary(&self) -> Option<&Vocabulary>;
}
