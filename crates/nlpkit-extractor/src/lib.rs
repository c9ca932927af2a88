//! nlpkit Extractor - Named entity recognition
//!
//! Implements a small trainable recognizer for labelled spans:
//! - `EntityRecognizer`: learned gazetteer plus DATE / TIME / MONEY patterns
//! - `Trainer`: shuffled, dropout-regularized training passes
//! - `Evaluator`: span-label and exact entity-level scoring

pub mod metrics;
pub mod ner;
pub mod samples;
pub mod training;

pub use metrics::{ClassificationReport, EvaluationResult, Evaluator, LabelScores, ScoringMode};
pub use ner::{predict_entities, EntityRecognizer, PatternRules, RecognizerState};
pub use training::{Trainer, TrainingConfig, TrainingReport};

use nlpkit_core::{NlpError, Result};
use serde::{Deserialize, Serialize};

// ============================================================================
// Span Types
// ============================================================================

/// A labelled byte range of a text
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntitySpan {
    pub start: usize,
    pub end: usize,
    pub label: String,
}

impl EntitySpan {
    pub fn new(start: usize, end: usize, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            label: label.into(),
        }
    }

    pub fn overlaps(&self, other: &EntitySpan) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A text with its gold entity spans
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedText {
    pub text: String,
    pub entities: Vec<EntitySpan>,
}

impl AnnotatedText {
    pub fn new(text: impl Into<String>, entities: Vec<EntitySpan>) -> Self {
        Self {
            text: text.into(),
            entities,
        }
    }

    /// Annotate by surface text; offsets are located in the text in order
    pub fn from_surfaces(text: impl Into<String>, entities: &[(&str, &str)]) -> Result<Self> {
        let text = text.into();
        let mut cursor = 0;
        let mut spans = Vec::with_capacity(entities.len());

        for (surface, label) in entities {
            let start = text[cursor..]
                .find(surface)
                .map(|i| i + cursor)
                .or_else(|| text.find(surface))
                .ok_or_else(|| {
                    NlpError::InvalidInput(format!("entity '{surface}' not found in '{text}'"))
                })?;
            let end = start + surface.len();
            spans.push(EntitySpan::new(start, end, *label));
            cursor = end;
        }

        let annotated = Self::new(text, spans);
        annotated.validate()?;
        Ok(annotated)
    }

    /// Spans must be non-empty, inside the text, on char boundaries and
    /// pairwise disjoint
    pub fn validate(&self) -> Result<()> {
        for span in &self.entities {
            let inside = span.start < span.end
                && span.end <= self.text.len()
                && self.text.is_char_boundary(span.start)
                && self.text.is_char_boundary(span.end);
            if !inside {
                return Err(NlpError::InvalidInput(format!(
                    "invalid span {}..{} ({}) for text of {} bytes",
                    span.start,
                    span.end,
                    span.label,
                    self.text.len()
                )));
            }
            if span.label.trim().is_empty() {
                return Err(NlpError::InvalidInput(format!(
                    "span {}..{} has an empty label",
                    span.start, span.end
                )));
            }
        }

        let mut sorted: Vec<&EntitySpan> = self.entities.iter().collect();
        sorted.sort();
        for pair in sorted.windows(2) {
            if pair[0].overlaps(pair[1]) {
                return Err(NlpError::InvalidInput(format!(
                    "overlapping spans {}..{} and {}..{}",
                    pair[0].start, pair[0].end, pair[1].start, pair[1].end
                )));
            }
        }
        Ok(())
    }

    /// Surface text of a span
    pub fn surface(&self, span: &EntitySpan) -> Option<&str> {
        self.text.get(span.start..span.end)
    }
}

/// Entity found by a recognizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedEntity {
    pub text: String,
    pub label: String,
    pub start: usize,
    pub end: usize,
    pub confidence: f32,
}

impl ExtractedEntity {
    pub fn span(&self) -> EntitySpan {
        EntitySpan::new(self.start, self.end, self.label.clone())
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Trait for entity extractors
pub trait EntityExtractor: Send + Sync {
    fn extract(&self, text: &str) -> Result<Vec<ExtractedEntity>>;
}
