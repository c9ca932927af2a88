//! Word vectors and averaged document embeddings

use std::collections::HashMap;

use ndarray::{Array1, Array2, ArrayView1};
use tracing::{debug, info};

use nlpkit_core::{NlpError, Result};

use crate::EmbeddingClient;

/// Word -> vector table built from a corpus
#[derive(Debug, Clone)]
pub struct WordVectors {
    /// Vocabulary ordered by frequency desc, ties by first appearance
    words: Vec<String>,
    index: HashMap<String, usize>,
    counts: Vec<usize>,
    vectors: Array2<f32>,
}

impl WordVectors {
    /// Lowercase + whitespace split, the tokenization used for embeddings
    pub fn tokenize(document: &str) -> Vec<String> {
        document
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    /// Build the vocabulary of `documents` and embed every kept word once
    pub async fn build(
        client: &dyn EmbeddingClient,
        documents: &[String],
        min_count: usize,
    ) -> Result<Self> {
        let mut frequency: HashMap<String, (usize, usize)> = HashMap::new();
        let mut order = 0;
        for document in documents {
            for word in Self::tokenize(document) {
                let entry = frequency.entry(word).or_insert_with(|| {
                    order += 1;
                    (0, order)
                });
                entry.0 += 1;
            }
        }

        let mut ranked: Vec<(String, usize, usize)> = frequency
            .into_iter()
            .filter(|(_, (count, _))| *count >= min_count.max(1))
            .map(|(word, (count, first))| (word, count, first))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.2.cmp(&b.2)));

        if ranked.is_empty() {
            return Err(NlpError::InvalidInput(
                "no word reaches the minimum count".to_string(),
            ));
        }

        let words: Vec<String> = ranked.iter().map(|(w, _, _)| w.clone()).collect();
        let counts: Vec<usize> = ranked.iter().map(|(_, c, _)| *c).collect();

        debug!(words = words.len(), provider = client.name(), "Embedding vocabulary");
        let embeddings = client.embed_batch(&words).await?;
        if embeddings.len() != words.len() {
            return Err(NlpError::Embedding(format!(
                "expected {} embeddings, got {}",
                words.len(),
                embeddings.len()
            )));
        }

        let dimension = embeddings.first().map(Vec::len).unwrap_or(0);
        if embeddings.iter().any(|e| e.len() != dimension) {
            return Err(NlpError::Embedding(
                "embeddings have inconsistent dimensions".to_string(),
            ));
        }

        let flat: Vec<f32> = embeddings.into_iter().flatten().collect();
        let vectors = Array2::from_shape_vec((words.len(), dimension), flat)
            .map_err(|e| NlpError::Embedding(e.to_string()))?;

        let index = words
            .iter()
            .enumerate()
            .map(|(i, w)| (w.clone(), i))
            .collect();

        info!(words = words.len(), dimension, "Built word vectors");
        Ok(Self {
            words,
            index,
            counts,
            vectors,
        })
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.words
    }

    pub fn dimension(&self) -> usize {
        self.vectors.ncols()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    /// Corpus frequency of a vocabulary word
    pub fn count(&self, word: &str) -> Option<usize> {
        self.index.get(word).map(|&i| self.counts[i])
    }

    pub fn get(&self, word: &str) -> Option<ArrayView1<'_, f32>> {
        self.index.get(word).map(|&i| self.vectors.row(i))
    }

    /// Mean of the known words' vectors, or the zero vector when none is known
    pub fn document_embedding(&self, document: &str) -> Array1<f32> {
        let mut sum = Array1::<f32>::zeros(self.dimension());
        let mut known = 0usize;
        for word in Self::tokenize(document) {
            if let Some(vector) = self.get(&word) {
                sum += &vector;
                known += 1;
            }
        }
        if known > 0 {
            sum /= known as f32;
        }
        sum
    }

    /// Vocabulary words ranked by cosine similarity to `word`
    pub fn most_similar(&self, word: &str, top_n: usize) -> Result<Vec<(String, f32)>> {
        let target = self
            .get(word)
            .ok_or_else(|| NlpError::NotFound(format!("word not in vocabulary: {word}")))?;

        let mut scored: Vec<(String, f32)> = self
            .words
            .iter()
            .filter(|w| w.as_str() != word)
            .filter_map(|w| {
                let other = self.get(w)?;
                Some((w.clone(), cosine_similarity(target, other)))
            })
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_n);
        Ok(scored)
    }
}

/// Cosine similarity; zero when either vector has zero length
pub fn cosine_similarity(a: ArrayView1<'_, f32>, b: ArrayView1<'_, f32>) -> f32 {
    let norm_a = a.dot(&a).sqrt();
    let norm_b = b.dot(&b).sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    a.dot(&b) / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{sample_corpus, HashingEmbedding};

    async fn sample_vectors() -> WordVectors {
        WordVectors::build(&HashingEmbedding::new(100), &sample_corpus(), 1)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_vocabulary_order() {
        let wv = sample_vectors().await;
        assert_eq!(
            wv.vocabulary(),
            &["this", "is", "the", "document", "first", "second", "and", "third", "one"]
        );
        assert_eq!(wv.count("document"), Some(4));
        assert_eq!(wv.dimension(), 100);
    }

    #[tokio::test]
    async fn test_min_count_filters() {
        let wv = WordVectors::build(&HashingEmbedding::new(8), &sample_corpus(), 3)
            .await
            .unwrap();
        assert_eq!(wv.vocabulary(), &["this", "is", "the", "document"]);
        assert!(!wv.contains("first"));
    }

    #[tokio::test]
    async fn test_document_embedding_is_mean() {
        let wv = sample_vectors().await;
        let doc = wv.document_embedding("Is this");
        let is = wv.get("is").unwrap();
        let this = wv.get("this").unwrap();
        for i in 0..wv.dimension() {
            assert!((doc[i] - (is[i] + this[i]) / 2.0).abs() < 1e-6);
        }
    }

    #[tokio::test]
    async fn test_document_embedding_unknown_words_zero() {
        let wv = sample_vectors().await;
        let doc = wv.document_embedding("entirely unseen words");
        assert_eq!(doc.len(), 100);
        assert!(doc.iter().all(|v| *v == 0.0));
        assert!(wv.document_embedding("").iter().all(|v| *v == 0.0));
    }

    #[tokio::test]
    async fn test_most_similar() {
        let wv = sample_vectors().await;
        let similar = wv.most_similar("document", 3).unwrap();
        assert_eq!(similar.len(), 3);
        assert!(similar.iter().all(|(w, _)| w != "document"));
        assert!(similar[0].1 >= similar[1].1);
        assert!(wv.most_similar("missing", 3).is_err());
    }

    #[test]
    fn test_cosine_similarity() {
        let a = Array1::from(vec![1.0f32, 0.0]);
        let b = Array1::from(vec![0.0f32, 2.0]);
        assert!(cosine_similarity(a.view(), a.view()) > 0.999);
        assert!(cosine_similarity(a.view(), b.view()).abs() < 0.001);
        let zero = Array1::<f32>::zeros(2);
        assert_eq!(cosine_similarity(a.view(), zero.view()), 0.0);
    }
}
