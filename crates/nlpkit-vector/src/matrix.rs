//! Vocabulary and document-term matrix types

use std::collections::HashMap;
use std::fmt;

use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};

// ============================================================================
// Vocabulary
// ============================================================================

/// Term -> column index mapping, ordered alphabetically
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Vocabulary {
    terms: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Build from terms; duplicates are dropped and the rest sorted
    pub fn from_terms(terms: impl IntoIterator<Item = String>) -> Self {
        let mut terms: Vec<String> = terms.into_iter().collect();
        terms.sort();
        terms.dedup();
        let index = terms
            .iter()
            .enumerate()
            .map(|(i, term)| (term.clone(), i))
            .collect();
        Self { terms, index }
    }

    pub fn get(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.index.contains_key(term)
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl From<Vec<String>> for Vocabulary {
    fn from(terms: Vec<String>) -> Self {
        Self::from_terms(terms)
    }
}

impl From<Vocabulary> for Vec<String> {
    fn from(vocabulary: Vocabulary) -> Self {
        vocabulary.terms
    }
}

// ============================================================================
// Document-Term Matrix
// ============================================================================

/// Documents x terms weights with their column labels
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentTermMatrix {
    pub terms: Vec<String>,
    pub matrix: Array2<f64>,
}

impl DocumentTermMatrix {
    pub fn new(terms: Vec<String>, matrix: Array2<f64>) -> Self {
        Self { terms, matrix }
    }

    pub fn n_documents(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn n_terms(&self) -> usize {
        self.matrix.ncols()
    }

    /// Weight of `term` in document `row`
    pub fn value(&self, row: usize, term: &str) -> Option<f64> {
        let col = self.terms.iter().position(|t| t == term)?;
        self.matrix.get((row, col)).copied()
    }

    /// Copy with each non-empty row scaled to sum 1
    pub fn normalized(&self) -> Self {
        Self {
            terms: self.terms.clone(),
            matrix: normalize_rows(&self.matrix),
        }
    }

    /// Aligned table: one row per document, one column per term
    pub fn render(&self, precision: usize) -> String {
        let integral = self.matrix.iter().all(|v| v.fract() == 0.0);
        let cells: Vec<Vec<String>> = self
            .matrix
            .rows()
            .into_iter()
            .map(|row| {
                row.iter()
                    .map(|v| {
                        if integral {
                            format!("{}", *v as i64)
                        } else {
                            format!("{v:.precision$}")
                        }
                    })
                    .collect()
            })
            .collect();

        let widths: Vec<usize> = self
            .terms
            .iter()
            .enumerate()
            .map(|(col, term)| {
                cells
                    .iter()
                    .map(|row| row[col].len())
                    .chain(std::iter::once(term.len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();
        let label_width = self.n_documents().saturating_sub(1).to_string().len();

        let mut out = String::new();
        out.push_str(&" ".repeat(label_width));
        for (term, width) in self.terms.iter().zip(widths.iter().copied()) {
            out.push_str(&format!("  {term:>width$}"));
        }
        out.push('\n');
        for (i, row) in cells.iter().enumerate() {
            out.push_str(&format!("{i:<label_width$}"));
            for (cell, width) in row.iter().zip(widths.iter().copied()) {
                out.push_str(&format!("  {cell:>width$}"));
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for DocumentTermMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(6))
    }
}

// ============================================================================
// Row Normalization
// ============================================================================

/// L1 row normalization; rows summing to zero stay zero
pub fn normalize_rows(matrix: &Array2<f64>) -> Array2<f64> {
    let mut out = matrix.clone();
    for mut row in out.axis_iter_mut(Axis(0)) {
        let sum: f64 = row.iter().map(|v| v.abs()).sum();
        if sum > 0.0 {
            row.mapv_inplace(|v| v / sum);
        }
    }
    out
}

/// In-place L2 row normalization; zero rows are left untouched
pub fn l2_normalize_rows(matrix: &mut Array2<f64>) {
    for mut row in matrix.axis_iter_mut(Axis(0)) {
        let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            row.mapv_inplace(|v| v / norm);
        }
    }
}
