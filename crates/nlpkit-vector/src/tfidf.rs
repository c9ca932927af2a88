//! TF-IDF weighting
//!
//! Counts are scaled by the inverse document frequency of each term and each
//! row is then normalized. With smoothing the idf is `ln((1 + n) / (1 + df)) + 1`,
//! as if one extra document contained every term once.

use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};
use tracing::debug;

use nlpkit_core::{NlpError, Result};

use crate::{
    l2_normalize_rows, normalize_rows, CountVectorizer, DocumentTermMatrix, Vectorizer, Vocabulary,
};

/// Row normalization applied after weighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

/// TF-IDF vectorizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    counts: CountVectorizer,
    norm: Option<Norm>,
    smooth_idf: bool,
    sublinear_tf: bool,
    idf: Option<Vec<f64>>,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TfidfVectorizer {
    pub fn new() -> Self {
        Self {
            counts: CountVectorizer::new(),
            norm: Some(Norm::L2),
            smooth_idf: true,
            sublinear_tf: false,
            idf: None,
        }
    }

    pub fn with_max_features(mut self, n: usize) -> Self {
        self.counts = self.counts.with_max_features(n);
        self
    }

    pub fn with_min_df(mut self, min_df: usize) -> Self {
        self.counts = self.counts.with_min_df(min_df);
        self
    }

    pub fn with_max_df(mut self, max_df: f64) -> Self {
        self.counts = self.counts.with_max_df(max_df);
        self
    }

    /// `None` disables row normalization
    pub fn with_norm(mut self, norm: Option<Norm>) -> Self {
        self.norm = norm;
        self
    }

    pub fn with_smooth_idf(mut self, smooth: bool) -> Self {
        self.smooth_idf = smooth;
        self
    }

    /// Replace tf with `1 + ln(tf)`
    pub fn with_sublinear_tf(mut self, sublinear: bool) -> Self {
        self.sublinear_tf = sublinear;
        self
    }

    /// Fitted idf weights in vocabulary order
    pub fn idf(&self) -> Option<&[f64]> {
        self.idf.as_deref()
    }

    /// Terms of the fitted vocabulary
    pub fn feature_names(&self) -> Result<&[String]> {
        Ok(self.counts.fitted_vocabulary()?.terms())
    }

    fn compute_idf(&self, counts: &Array2<f64>) -> Vec<f64> {
        let n = counts.nrows() as f64;
        let offset = if self.smooth_idf { 1.0 } else { 0.0 };
        counts
            .map(|v| if *v > 0.0 { 1.0 } else { 0.0 })
            .sum_axis(Axis(0))
            .iter()
            .map(|df| ((n + offset) / (df + offset)).ln() + 1.0)
            .collect()
    }
}

impl Vectorizer for TfidfVectorizer {
    fn fit(&mut self, documents: &[String]) -> Result<()> {
        self.counts.fit(documents)?;
        let counts = self.counts.count_matrix(documents)?;
        let idf = self.compute_idf(&counts);
        debug!(terms = idf.len(), "Fitted idf weights");
        self.idf = Some(idf);
        Ok(())
    }

    fn transform(&self, documents: &[String]) -> Result<DocumentTermMatrix> {
        let idf = self
            .idf
            .as_ref()
            .ok_or_else(|| NlpError::Model("vectorizer is not fitted".to_string()))?;

        let mut tf = self.counts.count_matrix(documents)?;
        if self.sublinear_tf {
            tf.mapv_inplace(|v| if v > 0.0 { 1.0 + v.ln() } else { 0.0 });
        }

        let idf = Array1::from(idf.clone());
        let mut weighted = tf * &idf;

        match self.norm {
            Some(Norm::L2) => l2_normalize_rows(&mut weighted),
            Some(Norm::L1) => weighted = normalize_rows(&weighted),
            None => {}
        }

        Ok(DocumentTermMatrix::new(
            self.feature_names()?.to_vec(),
            weighted,
        ))
    }

    fn vocabulary(&self) -> Option<&Vocabulary> {
        self.counts.vocabulary()
    }
}
