//! Quality Metrics module
//!
//! Two scoring modes for entity recognition:
//! - `SpanLabel`: every (start, end, label) triple seen in gold or prediction
//!   is one classification instance, the missing side labelled `O`;
//!   precision, recall and F1 are support-weighted averages over labels
//! - `Exact`: micro precision, recall and F1 over exact span matches
//!
//! Undefined ratios (zero denominators) count as 0.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use nlpkit_core::Result;
use serde::{Deserialize, Serialize};

use crate::ner::EntityRecognizer;
use crate::{AnnotatedText, EntitySpan};

/// Label of the instances missing from one side in span-label scoring
pub const OUTSIDE: &str = "O";

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn f1(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}

// ============================================================================
// Reports
// ============================================================================

/// Scores of one label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScores {
    pub label: String,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Gold instances of the label
    pub support: usize,
}

impl LabelScores {
    fn from_counts(label: &str, tp: usize, fp: usize, fn_: usize) -> Self {
        let precision = ratio(tp, tp + fp);
        let recall = ratio(tp, tp + fn_);
        Self {
            label: label.to_string(),
            precision,
            recall,
            f1: f1(precision, recall),
            support: tp + fn_,
        }
    }
}

/// Per-label scores with averages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub labels: Vec<LabelScores>,
    /// Share of instances classified correctly; span-label mode only
    pub accuracy: Option<f64>,
}

impl ClassificationReport {
    pub fn total_support(&self) -> usize {
        self.labels.iter().map(|l| l.support).sum()
    }

    /// Unweighted mean of (precision, recall, f1) over labels
    pub fn macro_avg(&self) -> (f64, f64, f64) {
        let n = self.labels.len();
        if n == 0 {
            return (0.0, 0.0, 0.0);
        }
        let sum = self.labels.iter().fold((0.0, 0.0, 0.0), |acc, l| {
            (acc.0 + l.precision, acc.1 + l.recall, acc.2 + l.f1)
        });
        (sum.0 / n as f64, sum.1 / n as f64, sum.2 / n as f64)
    }

    /// Support-weighted mean of (precision, recall, f1) over labels
    pub fn weighted_avg(&self) -> (f64, f64, f64) {
        let total = self.total_support();
        if total == 0 {
            return (0.0, 0.0, 0.0);
        }
        let sum = self.labels.iter().fold((0.0, 0.0, 0.0), |acc, l| {
            let w = l.support as f64;
            (acc.0 + w * l.precision, acc.1 + w * l.recall, acc.2 + w * l.f1)
        });
        let total = total as f64;
        (sum.0 / total, sum.1 / total, sum.2 / total)
    }

    /// Plain-text table in the usual classification report layout
    pub fn render(&self) -> String {
        let width = self
            .labels
            .iter()
            .map(|l| l.label.len())
            .chain(std::iter::once("weighted avg".len()))
            .max()
            .unwrap_or(12);

        let mut out = format!(
            "{:>width$} {:>9} {:>9} {:>9} {:>9}\n\n",
            "", "precision", "recall", "f1-score", "support"
        );
        for l in &self.labels {
            out.push_str(&format!(
                "{:>width$} {:>9.2} {:>9.2} {:>9.2} {:>9}\n",
                l.label, l.precision, l.recall, l.f1, l.support
            ));
        }
        out.push('\n');

        let total = self.total_support();
        if let Some(accuracy) = self.accuracy {
            out.push_str(&format!(
                "{:>width$} {:>9} {:>9} {:>9.2} {:>9}\n",
                "accuracy", "", "", accuracy, total
            ));
        }
        for (name, (p, r, f)) in [
            ("macro avg", self.macro_avg()),
            ("weighted avg", self.weighted_avg()),
        ] {
            out.push_str(&format!(
                "{name:>width$} {p:>9.2} {r:>9.2} {f:>9.2} {total:>9}\n"
            ));
        }
        out
    }
}

/// Overall scores of one evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub mode: ScoringMode,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub report: ClassificationReport,
}

impl EvaluationResult {
    pub fn summary(&self) -> String {
        format!(
            "Precision: {:.4}\nRecall: {:.4}\nF1-Score: {:.4}",
            self.precision, self.recall, self.f1
        )
    }
}

// ============================================================================
// Evaluator
// ============================================================================

/// How predictions are matched against gold spans
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    #[default]
    SpanLabel,
    Exact,
}

impl std::str::FromStr for ScoringMode {
    type Err = nlpkit_core::NlpError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "span-label" | "span_label" | "spanlabel" => Ok(Self::SpanLabel),
            "exact" => Ok(Self::Exact),
            _ => Err(nlpkit_core::NlpError::InvalidInput(format!(
                "unknown scoring mode: {s}"
            ))),
        }
    }
}

/// Scores recognizer output against gold annotations
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator {
    mode: ScoringMode,
}

impl Evaluator {
    pub fn new(mode: ScoringMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ScoringMode {
        self.mode
    }

    /// Predict on every example and score against its gold spans
    pub fn evaluate(
        &self,
        model: &EntityRecognizer,
        examples: &[AnnotatedText],
    ) -> Result<EvaluationResult> {
        let mut pairs = Vec::with_capacity(examples.len());
        for example in examples {
            let predicted: Vec<EntitySpan> = model
                .predict(&example.text)?
                .iter()
                .map(|entity| entity.span())
                .collect();
            pairs.push((example.entities.clone(), predicted));
        }
        Ok(self.score(&pairs))
    }

    /// Score `(gold, predicted)` span sets, one pair per text
    pub fn score(&self, pairs: &[(Vec<EntitySpan>, Vec<EntitySpan>)]) -> EvaluationResult {
        match self.mode {
            ScoringMode::SpanLabel => span_label_scores(pairs),
            ScoringMode::Exact => exact_scores(pairs),
        }
    }
}

fn span_label_scores(pairs: &[(Vec<EntitySpan>, Vec<EntitySpan>)]) -> EvaluationResult {
    let mut y_true: Vec<String> = Vec::new();
    let mut y_pred: Vec<String> = Vec::new();

    for (gold, predicted) in pairs {
        let gold: BTreeSet<&EntitySpan> = gold.iter().collect();
        let predicted: BTreeSet<&EntitySpan> = predicted.iter().collect();
        for span in gold.union(&predicted) {
            let label_if = |set: &BTreeSet<&EntitySpan>| {
                if set.contains(span) {
                    span.label.clone()
                } else {
                    OUTSIDE.to_string()
                }
            };
            y_true.push(label_if(&gold));
            y_pred.push(label_if(&predicted));
        }
    }

    let labels: BTreeSet<&str> = y_true
        .iter()
        .chain(y_pred.iter())
        .map(String::as_str)
        .collect();

    let scores: Vec<LabelScores> = labels
        .into_iter()
        .map(|label| {
            let mut tp = 0;
            let mut fp = 0;
            let mut fn_ = 0;
            for (t, p) in y_true.iter().zip(&y_pred) {
                match (t == label, p == label) {
                    (true, true) => tp += 1,
                    (false, true) => fp += 1,
                    (true, false) => fn_ += 1,
                    (false, false) => {}
                }
            }
            LabelScores::from_counts(label, tp, fp, fn_)
        })
        .collect();

    let correct = y_true.iter().zip(&y_pred).filter(|(t, p)| t == p).count();
    let report = ClassificationReport {
        labels: scores,
        accuracy: Some(ratio(correct, y_true.len())),
    };
    let (precision, recall, f1) = report.weighted_avg();

    EvaluationResult {
        mode: ScoringMode::SpanLabel,
        precision,
        recall,
        f1,
        report,
    }
}

fn exact_scores(pairs: &[(Vec<EntitySpan>, Vec<EntitySpan>)]) -> EvaluationResult {
    // label -> (tp, fp, fn)
    let mut counts: BTreeMap<String, (usize, usize, usize)> = BTreeMap::new();

    for (gold, predicted) in pairs {
        let gold: HashSet<&EntitySpan> = gold.iter().collect();
        let predicted: HashSet<&EntitySpan> = predicted.iter().collect();
        for span in &predicted {
            let entry = counts.entry(span.label.clone()).or_default();
            if gold.contains(*span) {
                entry.0 += 1;
            } else {
                entry.1 += 1;
            }
        }
        for span in gold.difference(&predicted) {
            counts.entry(span.label.clone()).or_default().2 += 1;
        }
    }

    let (tp, fp, fn_) = counts
        .values()
        .fold((0, 0, 0), |acc, c| (acc.0 + c.0, acc.1 + c.1, acc.2 + c.2));
    let precision = ratio(tp, tp + fp);
    let recall = ratio(tp, tp + fn_);

    let report = ClassificationReport {
        labels: counts
            .iter()
            .map(|(label, (tp, fp, fn_))| LabelScores::from_counts(label, *tp, *fp, *fn_))
            .collect(),
        accuracy: None,
    };

    EvaluationResult {
        mode: ScoringMode::Exact,
        precision,
        recall,
        f1: f1(precision, recall),
        report,
    }
}
