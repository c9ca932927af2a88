//! Recognizer training loop
//!
//! Author: hephaex@gmail.com

use nlpkit_core::{NerConfig, NlpError, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ner::EntityRecognizer;
use crate::AnnotatedText;

/// Training hyperparameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    pub iterations: usize,
    /// Probability of skipping each gold reinforcement
    pub dropout: f64,
    /// Fixed seed for reproducible shuffling and dropout
    pub seed: Option<u64>,
    /// Log the accumulated loss every this many iterations (0 disables)
    pub log_every: usize,
    pub use_patterns: bool,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            iterations: 30,
            dropout: 0.5,
            seed: None,
            log_every: 10,
            use_patterns: true,
        }
    }
}

impl From<&NerConfig> for TrainingConfig {
    fn from(config: &NerConfig) -> Self {
        Self {
            iterations: config.iterations,
            dropout: config.dropout,
            seed: config.seed,
            log_every: config.log_every,
            use_patterns: config.use_patterns,
        }
    }
}

impl TrainingConfig {
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_dropout(mut self, dropout: f64) -> Self {
        self.dropout = dropout;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Loss history of a training run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    /// Accumulated loss per iteration
    pub losses: Vec<f64>,
}

impl TrainingReport {
    pub fn iterations(&self) -> usize {
        self.losses.len()
    }

    pub fn final_loss(&self) -> Option<f64> {
        self.losses.last().copied()
    }
}

/// Trains an `EntityRecognizer` from annotated texts
pub struct Trainer {
    config: TrainingConfig,
}

impl Trainer {
    pub fn new(config: TrainingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    pub fn train(&self, examples: &[AnnotatedText]) -> Result<(EntityRecognizer, TrainingReport)> {
        if examples.is_empty() {
            return Err(NlpError::InvalidInput("no training examples".to_string()));
        }
        if !(0.0..=1.0).contains(&self.config.dropout) {
            return Err(NlpError::InvalidInput(format!(
                "dropout must be within [0, 1], got {}",
                self.config.dropout
            )));
        }
        for (i, example) in examples.iter().enumerate() {
            example.validate().map_err(|e| {
                NlpError::InvalidInput(format!("training example {}: {e}", i + 1))
            })?;
        }

        let mut model = EntityRecognizer::new().with_patterns(self.config.use_patterns);
        for example in examples {
            for span in &example.entities {
                model.add_label(&span.label)?;
            }
        }
        model.begin_training()?;

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        info!(
            examples = examples.len(),
            labels = model.labels().len(),
            iterations = self.config.iterations,
            "Training the NER model"
        );

        let mut order: Vec<usize> = (0..examples.len()).collect();
        let mut report = TrainingReport::default();
        for iteration in 0..self.config.iterations {
            order.shuffle(&mut rng);
            let mut loss = 0.0;
            for &index in &order {
                loss += model.update(&examples[index], self.config.dropout, &mut rng)?;
            }
            report.losses.push(loss);

            if self.config.log_every > 0 && (iteration + 1) % self.config.log_every == 0 {
                info!("Iteration {}: Loss = {:.4}", iteration + 1, loss);
            }
        }

        model.finish_training()?;
        Ok((model, report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples::training_examples;
    use crate::ner::RecognizerState;
    use crate::EntitySpan;

    #[test]
    fn test_train_on_samples() {
        let trainer = Trainer::new(TrainingConfig::default().with_seed(42));
        let (model, report) = trainer.train(&training_examples().unwrap()).unwrap();
        assert_eq!(model.state(), RecognizerState::Trained);
        assert_eq!(report.iterations(), 30);
        assert!(report.final_loss().unwrap() <= report.losses[0]);
        for label in ["ORG", "GPE", "MONEY", "PERSON", "DATE", "TIME"] {
            assert!(model.labels().iter().any(|l| l == label), "missing {label}");
        }
    }

    #[test]
    fn test_seeded_training_is_reproducible() {
        let examples = training_examples().unwrap();
        let config = TrainingConfig::default().with_seed(9).with_iterations(5);
        let (_, first) = Trainer::new(config.clone()).train(&examples).unwrap();
        let (_, second) = Trainer::new(config).train(&examples).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rejects_invalid_examples() {
        let trainer = Trainer::new(TrainingConfig::default().with_seed(1));
        assert!(trainer.train(&[]).is_err());

        let bad = AnnotatedText::new("short", vec![EntitySpan::new(2, 40, "ORG")]);
        let err = trainer.train(&[bad]).unwrap_err();
        assert!(err.to_string().contains("training example 1"));

        let ok = AnnotatedText::from_surfaces("Google", &[("Google", "ORG")]).unwrap();
        let trainer = Trainer::new(TrainingConfig::default().with_dropout(1.5));
        assert!(trainer.train(&[ok]).is_err());
    }

    #[test]
    fn test_config_from_ner_config() {
        let ner = NerConfig {
            iterations: 3,
            seed: Some(5),
            ..NerConfig::default()
        };
        let config = TrainingConfig::from(&ner);
        assert_eq!(config.iterations, 3);
        assert_eq!(config.seed, Some(5));
        assert!((config.dropout - 0.5).abs() < 0.001);
    }
}
