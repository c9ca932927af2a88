//! Trainable entity recognizer
//!
//! Recognition combines two sources:
//! - a learned gazetteer: surface form -> label weights, matched
//!   case-insensitively on word boundaries
//! - pattern rules for DATE, TIME and MONEY expressions
//!
//! Candidates are resolved to non-overlapping spans, longer and more
//! confident spans first.
//!
//! Author: hephaex@gmail.com

use std::collections::{BTreeMap, HashMap};

use nlpkit_core::{NlpError, Result};
use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;
use tracing::debug;

use crate::{AnnotatedText, EntityExtractor, EntitySpan, ExtractedEntity};

/// Weight added to a gold (surface, label) pair per update
const REINFORCEMENT: f64 = 1.0;
/// Weight removed from a spurious gazetteer prediction
const PENALTY: f64 = 0.5;

// ============================================================================
// Pattern Rules
// ============================================================================

static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\b(?:January|February|March|April|May|June|July|August|September|October|November|December)(?:\s+\d{1,2})?(?:,?\s+\d{4})?\b",
        r"\b(?:Monday|Tuesday|Wednesday|Thursday|Friday|Saturday|Sunday)\b",
        r"\b(?i:yesterday|today|tomorrow)\b",
        r"\b(?i:last|next|this)\s+(?i:week|month|year)\b",
        r"\b\d{4}-\d{2}-\d{2}\b",
        r"\b(?:1[89]|20)\d{2}\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static TIME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{1,2}(?::\d{2})?\s?(?i:am|pm)\b").unwrap());

static MONEY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[$€£]\d+(?:[.,]\d+)*(?:\s(?i:thousand|million|billion|trillion))?").unwrap()
});

/// Regex rules for numeric and calendar expressions
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternRules;

impl PatternRules {
    pub const DATE: &'static str = "DATE";
    pub const TIME: &'static str = "TIME";
    pub const MONEY: &'static str = "MONEY";

    pub const CONFIDENCE: f32 = 0.9;

    pub fn labels() -> [&'static str; 3] {
        [Self::DATE, Self::TIME, Self::MONEY]
    }

    /// Pattern matches whose label is accepted by `allow`
    pub fn find(&self, text: &str, allow: impl Fn(&str) -> bool) -> Vec<ExtractedEntity> {
        let mut rules: Vec<(&Regex, &str)> = Vec::new();
        if allow(Self::DATE) {
            rules.extend(DATE_PATTERNS.iter().map(|r| (r, Self::DATE)));
        }
        if allow(Self::TIME) {
            rules.push((&TIME_PATTERN, Self::TIME));
        }
        if allow(Self::MONEY) {
            rules.push((&MONEY_PATTERN, Self::MONEY));
        }

        let mut entities = Vec::new();
        for (regex, label) in rules {
            for mat in regex.find_iter(text) {
                entities.push(ExtractedEntity {
                    text: mat.as_str().to_string(),
                    label: label.to_string(),
                    start: mat.start(),
                    end: mat.end(),
                    confidence: Self::CONFIDENCE,
                });
            }
        }
        entities
    }
}

// ============================================================================
// Gazetteer
// ============================================================================

#[derive(Debug, Clone)]
struct GazetteerEntry {
    pattern: Regex,
    weights: BTreeMap<String, f64>,
}

impl GazetteerEntry {
    fn new(surface: &str) -> Result<Self> {
        let pattern = Regex::new(&format!("(?i){}", regex::escape(surface)))
            .map_err(|e| NlpError::Model(format!("cannot index '{surface}': {e}")))?;
        Ok(Self {
            pattern,
            weights: BTreeMap::new(),
        })
    }

    /// Highest positive weight and its label
    fn best(&self) -> Option<(&str, f64)> {
        self.weights
            .iter()
            .filter(|(_, w)| **w > 0.0)
            .fold(None, |best: Option<(&str, f64)>, (label, w)| match best {
                Some((_, bw)) if bw >= *w => best,
                _ => Some((label.as_str(), *w)),
            })
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// A match must not split a word at either end
fn on_word_boundaries(text: &str, start: usize, end: usize) -> bool {
    let joins = |outside: Option<char>, inside: Option<char>| match (outside, inside) {
        (Some(o), Some(i)) => is_word_char(o) && is_word_char(i),
        _ => false,
    };
    !joins(text[..start].chars().next_back(), text[start..end].chars().next())
        && !joins(text[end..].chars().next(), text[start..end].chars().next_back())
}

/// Source of a candidate span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Gazetteer,
    Pattern,
}

// ============================================================================
// Recognizer
// ============================================================================

/// Lifecycle of a recognizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecognizerState {
    /// Labels may be added
    Untrained,
    /// `update` may be called
    Training,
    /// `predict` may be called
    Trained,
}

/// Trainable named entity recognizer
#[derive(Debug, Clone)]
pub struct EntityRecognizer {
    state: RecognizerState,
    labels: Vec<String>,
    gazetteer: HashMap<String, GazetteerEntry>,
    use_patterns: bool,
}

impl Default for EntityRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityRecognizer {
    pub fn new() -> Self {
        Self {
            state: RecognizerState::Untrained,
            labels: Vec::new(),
            gazetteer: HashMap::new(),
            use_patterns: true,
        }
    }

    pub fn with_patterns(mut self, use_patterns: bool) -> Self {
        self.use_patterns = use_patterns;
        self
    }

    pub fn state(&self) -> RecognizerState {
        self.state
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of learned surface forms
    pub fn gazetteer_len(&self) -> usize {
        self.gazetteer.len()
    }

    fn expect_state(&self, expected: RecognizerState, action: &str) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(NlpError::Model(format!(
                "cannot {action} while recognizer is {:?}",
                self.state
            )))
        }
    }

    pub fn add_label(&mut self, label: &str) -> Result<()> {
        self.expect_state(RecognizerState::Untrained, "add a label")?;
        let label = label.trim();
        if label.is_empty() {
            return Err(NlpError::InvalidInput("empty entity label".to_string()));
        }
        if !self.labels.iter().any(|l| l == label) {
            self.labels.push(label.to_string());
        }
        Ok(())
    }

    pub fn begin_training(&mut self) -> Result<()> {
        self.expect_state(RecognizerState::Untrained, "begin training")?;
        if self.labels.is_empty() {
            return Err(NlpError::Model("no entity labels registered".to_string()));
        }
        self.state = RecognizerState::Training;
        Ok(())
    }

    pub fn finish_training(&mut self) -> Result<()> {
        self.expect_state(RecognizerState::Training, "finish training")?;
        self.state = RecognizerState::Trained;
        Ok(())
    }

    /// One training step on one example; returns the example's loss
    ///
    /// The loss counts gold spans the current weights miss plus spurious
    /// predicted spans. Each gold reinforcement is skipped with probability
    /// `dropout`.
    pub fn update<R: Rng>(
        &mut self,
        example: &AnnotatedText,
        dropout: f64,
        rng: &mut R,
    ) -> Result<f64> {
        self.expect_state(RecognizerState::Training, "update")?;
        example.validate()?;

        let predicted = self.recognize(&example.text);
        let predicted_spans: Vec<EntitySpan> =
            predicted.iter().map(|(entity, _)| entity.span()).collect();

        let missed = example
            .entities
            .iter()
            .filter(|gold| !predicted_spans.contains(gold))
            .count();
        let spurious: Vec<&(ExtractedEntity, Source)> = predicted
            .iter()
            .filter(|(entity, _)| !example.entities.contains(&entity.span()))
            .collect();
        let loss = (missed + spurious.len()) as f64;

        if let Some(gold) = example
            .entities
            .iter()
            .find(|gold| !self.labels.contains(&gold.label))
        {
            return Err(NlpError::InvalidInput(format!(
                "label {} was not registered",
                gold.label
            )));
        }

        for gold in &example.entities {
            if rng.gen::<f64>() < dropout {
                continue;
            }
            let surface = &example.text[gold.start..gold.end];
            self.adjust(surface, &gold.label, REINFORCEMENT)?;
        }

        for (entity, source) in spurious {
            if *source == Source::Gazetteer {
                self.adjust(&entity.text, &entity.label, -PENALTY)?;
            }
        }

        Ok(loss)
    }

    fn adjust(&mut self, surface: &str, label: &str, delta: f64) -> Result<()> {
        let key = surface.to_lowercase();
        if !self.gazetteer.contains_key(&key) {
            self.gazetteer
                .insert(key.clone(), GazetteerEntry::new(surface)?);
        }
        if let Some(entry) = self.gazetteer.get_mut(&key) {
            *entry.weights.entry(label.to_string()).or_insert(0.0) += delta;
        }
        Ok(())
    }

    /// Entities in a text; requires a trained recognizer
    pub fn predict(&self, text: &str) -> Result<Vec<ExtractedEntity>> {
        self.expect_state(RecognizerState::Trained, "predict")?;
        Ok(self
            .recognize(text)
            .into_iter()
            .map(|(entity, _)| entity)
            .collect())
    }

    fn recognize(&self, text: &str) -> Vec<(ExtractedEntity, Source)> {
        let mut candidates = Vec::new();

        for entry in self.gazetteer.values() {
            let Some((label, weight)) = entry.best() else {
                continue;
            };
            let confidence = (weight / (weight + 1.0)) as f32;
            for mat in entry.pattern.find_iter(text) {
                if on_word_boundaries(text, mat.start(), mat.end()) {
                    candidates.push((
                        ExtractedEntity {
                            text: mat.as_str().to_string(),
                            label: label.to_string(),
                            start: mat.start(),
                            end: mat.end(),
                            confidence,
                        },
                        Source::Gazetteer,
                    ));
                }
            }
        }

        if self.use_patterns {
            let found = PatternRules.find(text, |label| self.labels.iter().any(|l| l == label));
            candidates.extend(found.into_iter().map(|e| (e, Source::Pattern)));
        }

        let resolved = resolve_overlaps(candidates);
        debug!(entities = resolved.len(), "Recognized entities");
        resolved
    }
}

impl EntityExtractor for EntityRecognizer {
    fn extract(&self, text: &str) -> Result<Vec<ExtractedEntity>> {
        self.predict(text)
    }
}

/// Keep non-overlapping candidates, longer then more confident first
fn resolve_overlaps(
    mut candidates: Vec<(ExtractedEntity, Source)>,
) -> Vec<(ExtractedEntity, Source)> {
    candidates.sort_by(|(a, _), (b, _)| {
        b.len()
            .cmp(&a.len())
            .then(b.confidence.total_cmp(&a.confidence))
            .then(a.start.cmp(&b.start))
            .then(a.label.cmp(&b.label))
    });

    let mut result: Vec<(ExtractedEntity, Source)> = Vec::new();
    for (entity, source) in candidates {
        let overlaps = result
            .iter()
            .any(|(kept, _)| entity.start < kept.end && kept.start < entity.end);
        if !overlaps {
            result.push((entity, source));
        }
    }

    result.sort_by_key(|(entity, _)| entity.start);
    result
}

/// `(surface text, label)` of every entity found in `text`
pub fn predict_entities(model: &EntityRecognizer, text: &str) -> Result<Vec<(String, String)>> {
    Ok(model
        .predict(text)?
        .into_iter()
        .map(|entity| (entity.text, entity.label))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn trained(examples: &[AnnotatedText]) -> EntityRecognizer {
        let mut model = EntityRecognizer::new();
        for example in examples {
            for span in &example.entities {
                model.add_label(&span.label).unwrap();
            }
        }
        model.begin_training().unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..5 {
            for example in examples {
                model.update(example, 0.0, &mut rng).unwrap();
            }
        }
        model.finish_training().unwrap();
        model
    }

    fn example() -> AnnotatedText {
        AnnotatedText::from_surfaces(
            "Google announced new AI products in San Francisco yesterday",
            &[("Google", "ORG"), ("San Francisco", "GPE"), ("yesterday", "DATE")],
        )
        .unwrap()
    }

    #[test]
    fn test_state_machine() {
        let mut model = EntityRecognizer::new();
        assert_eq!(model.state(), RecognizerState::Untrained);
        assert!(model.predict("text").is_err());
        assert!(model.begin_training().is_err());

        model.add_label("ORG").unwrap();
        model.add_label("ORG").unwrap();
        assert_eq!(model.labels(), &["ORG"]);
        model.begin_training().unwrap();
        assert!(model.add_label("GPE").is_err());
        assert!(model.predict("text").is_err());

        model.finish_training().unwrap();
        assert_eq!(model.state(), RecognizerState::Trained);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(model.update(&example(), 0.0, &mut rng).is_err());
    }

    #[test]
    fn test_update_reports_loss() {
        let mut model = EntityRecognizer::new();
        for label in ["ORG", "GPE", "DATE"] {
            model.add_label(label).unwrap();
        }
        model.begin_training().unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        // Only the DATE pattern fires before anything is learned
        let first = model.update(&example(), 0.0, &mut rng).unwrap();
        assert!((first - 2.0).abs() < 0.001);
        let second = model.update(&example(), 0.0, &mut rng).unwrap();
        assert!(second.abs() < 0.001);
    }

    #[test]
    fn test_full_dropout_learns_nothing() {
        let mut model = EntityRecognizer::new().with_patterns(false);
        model.add_label("ORG").unwrap();
        model.begin_training().unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let example = AnnotatedText::from_surfaces("Google", &[("Google", "ORG")]).unwrap();
        for _ in 0..10 {
            model.update(&example, 1.0, &mut rng).unwrap();
        }
        assert_eq!(model.gazetteer_len(), 0);
    }

    #[test]
    fn test_gazetteer_matches_case_insensitive_on_word_boundaries() {
        let model = trained(&[example()]);
        let found = predict_entities(&model, "GOOGLE bought a Googleplex in san francisco").unwrap();
        assert_eq!(
            found,
            vec![
                ("GOOGLE".to_string(), "ORG".to_string()),
                ("san francisco".to_string(), "GPE".to_string()),
            ]
        );
    }

    #[test]
    fn test_patterns_only_for_registered_labels() {
        let model = trained(&[example()]);
        let found = predict_entities(&model, "See you on Friday at 10 AM with $5").unwrap();
        assert_eq!(found, vec![("Friday".to_string(), "DATE".to_string())]);

        let no_patterns = {
            let mut model = EntityRecognizer::new().with_patterns(false);
            model.add_label("DATE").unwrap();
            model.begin_training().unwrap();
            model.finish_training().unwrap();
            model
        };
        assert!(no_patterns.predict("on Friday").unwrap().is_empty());
    }

    #[test]
    fn test_pattern_rules() {
        let found = PatternRules.find(
            "Amazon acquired Whole Foods for $13.7 billion in 2017 at 3 PM last week",
            |_| true,
        );
        let surfaces: Vec<(&str, &str)> = found
            .iter()
            .map(|e| (e.text.as_str(), e.label.as_str()))
            .collect();
        assert!(surfaces.contains(&("$13.7 billion", "MONEY")));
        assert!(surfaces.contains(&("2017", "DATE")));
        assert!(surfaces.contains(&("3 PM", "TIME")));
        assert!(surfaces.contains(&("last week", "DATE")));
    }

    #[test]
    fn test_resolve_prefers_longer_spans() {
        let entity = |start: usize, end: usize, label: &str, confidence: f32| ExtractedEntity {
            text: String::new(),
            label: label.to_string(),
            start,
            end,
            confidence,
        };
        let resolved = resolve_overlaps(vec![
            (entity(0, 4, "DATE", 0.9), Source::Pattern),
            (entity(0, 12, "DATE", 0.5), Source::Pattern),
            (entity(13, 17, "ORG", 0.4), Source::Gazetteer),
            (entity(13, 17, "GPE", 0.8), Source::Gazetteer),
        ]);
        let kept: Vec<(usize, &str)> = resolved
            .iter()
            .map(|(e, _)| (e.start, e.label.as_str()))
            .collect();
        assert_eq!(kept, vec![(0, "DATE"), (13, "GPE")]);
        assert_eq!(resolved[0].0.end, 12);
    }
}
