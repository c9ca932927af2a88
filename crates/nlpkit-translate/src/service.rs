//! Translation service
//!
//! Wraps a `Translator` and turns every provider fault into a structured
//! outcome. Multi-item operations pause between calls and record per-item
//! failures without stopping.
//!
//! Author: hephaex@gmail.com

use std::sync::Arc;
use std::time::Duration;

use nlpkit_core::{NlpError, Result, TranslationConfig, Translation, Translator};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::languages::{detected_language_name, language_name, ENGLISH};

// ============================================================================
// Outcomes
// ============================================================================

/// Result of translating one text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TranslationOutcome {
    Success {
        original: String,
        translation: Translation,
    },
    Failure {
        original: String,
        error: String,
    },
}

impl TranslationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn original(&self) -> &str {
        match self {
            Self::Success { original, .. } | Self::Failure { original, .. } => original,
        }
    }

    pub fn translated_text(&self) -> Option<&str> {
        match self {
            Self::Success { translation, .. } => Some(&translation.text),
            Self::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error, .. } => Some(error),
        }
    }
}

/// Result of detecting the language of a text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DetectionOutcome {
    Success {
        code: String,
        /// Capitalized name, `Unknown` for codes the provider table lacks
        name: String,
        confidence: f32,
    },
    Failure {
        error: String,
    },
}

/// One language of an announcement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnouncementEntry {
    pub code: String,
    pub name: String,
    pub outcome: TranslationOutcome,
}

/// Direction chosen by `bidirectional`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    EnglishToIndian,
    IndianToEnglish,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnglishToIndian => f.write_str("English to Indian Language"),
            Self::IndianToEnglish => f.write_str("Indian Language to English"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidirectionalResult {
    pub direction: Direction,
    pub outcome: TranslationOutcome,
}

// ============================================================================
// Service
// ============================================================================

/// Translation operations over an injected provider
#[derive(Clone)]
pub struct TranslationService {
    translator: Arc<dyn Translator>,
    batch_delay: Duration,
    document_delay: Duration,
}

impl TranslationService {
    /// Create with the default pacing (100 ms per batch item, 200 ms per
    /// paragraph or announcement language)
    pub fn new(translator: Arc<dyn Translator>) -> Self {
        Self::from_config(translator, &TranslationConfig::default())
    }

    pub fn from_config(translator: Arc<dyn Translator>, config: &TranslationConfig) -> Self {
        Self {
            translator,
            batch_delay: Duration::from_millis(config.batch_delay_ms),
            document_delay: Duration::from_millis(config.document_delay_ms),
        }
    }

    pub fn with_delays(mut self, batch: Duration, document: Duration) -> Self {
        self.batch_delay = batch;
        self.document_delay = document;
        self
    }

    pub fn provider(&self) -> &str {
        self.translator.name()
    }

    async fn pause(delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    /// Translate one text; provider faults become `Failure`
    pub async fn translate_text(&self, text: &str, source: &str, target: &str) -> TranslationOutcome {
        match self.translator.translate(text, source, target).await {
            Ok(translation) => {
                debug!(from = %translation.source, to = target, "Translated text");
                TranslationOutcome::Success {
                    original: text.to_string(),
                    translation,
                }
            }
            Err(e) => {
                warn!(provider = self.translator.name(), "Translation failed: {e}");
                TranslationOutcome::Failure {
                    original: text.to_string(),
                    error: e.to_string(),
                }
            }
        }
    }

    pub async fn detect_language(&self, text: &str) -> DetectionOutcome {
        match self.translator.detect(text).await {
            Ok(detection) => DetectionOutcome::Success {
                name: detected_language_name(&detection.language)
                    .unwrap_or_else(|| "Unknown".to_string()),
                code: detection.language,
                confidence: detection.confidence.clamp(0.0, 1.0),
            },
            Err(e) => {
                warn!(provider = self.translator.name(), "Detection failed: {e}");
                DetectionOutcome::Failure {
                    error: e.to_string(),
                }
            }
        }
    }

    /// Translate each text in order, pausing after every item
    pub async fn translate_batch(
        &self,
        texts: &[String],
        source: &str,
        target: &str,
    ) -> Vec<TranslationOutcome> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.translate_text(text, source, target).await);
            Self::pause(self.batch_delay).await;
        }
        results
    }

    /// Translate paragraphs in order, pausing after every paragraph
    pub async fn translate_document(
        &self,
        paragraphs: &[String],
        source: &str,
        target: &str,
    ) -> Vec<TranslationOutcome> {
        info!(paragraphs = paragraphs.len(), from = source, to = target, "Translating document");
        let mut results = Vec::with_capacity(paragraphs.len());
        for paragraph in paragraphs {
            results.push(self.translate_text(paragraph, source, target).await);
            Self::pause(self.document_delay).await;
        }
        results
    }

    /// Translate an English announcement into each target language
    pub async fn translate_announcement(
        &self,
        announcement: &str,
        targets: &[String],
    ) -> Vec<AnnouncementEntry> {
        info!(languages = targets.len(), "Translating announcement");
        let mut entries = Vec::with_capacity(targets.len());
        for code in targets {
            let outcome = self.translate_text(announcement, ENGLISH, code).await;
            entries.push(AnnouncementEntry {
                code: code.clone(),
                name: language_name(code).unwrap_or_else(|| code.clone()),
                outcome,
            });
            Self::pause(self.document_delay).await;
        }
        entries
    }

    /// Detect the language, then translate English into `indian_language`
    /// or anything else into English
    pub async fn bidirectional(&self, text: &str, indian_language: &str) -> Result<BidirectionalResult> {
        let detection = self
            .translator
            .detect(text)
            .await
            .map_err(|e| NlpError::Translation(format!("Language detection failed: {e}")))?;

        let (direction, outcome) = if detection.language == ENGLISH {
            (
                Direction::EnglishToIndian,
                self.translate_text(text, ENGLISH, indian_language).await,
            )
        } else {
            (
                Direction::IndianToEnglish,
                self.translate_text(text, indian_language, ENGLISH).await,
            )
        };
        Ok(BidirectionalResult { direction, outcome })
    }
}

impl std::fmt::Debug for TranslationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationService")
            .field("provider", &self.translator.name())
            .field("batch_delay", &self.batch_delay)
            .field("document_delay", &self.document_delay)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedTranslator;

    /// Reports every text as the same language
    struct FixedLanguage(&'static str, f32);

    #[async_trait::async_trait]
    impl Translator for FixedLanguage {
        async fn translate(&self, _text: &str, _source: &str, _target: &str) -> Result<Translation> {
            Err(NlpError::Translation("detection only".to_string()))
        }

        async fn detect(&self, _text: &str) -> Result<nlpkit_core::Detection> {
            Ok(nlpkit_core::Detection {
                language: self.0.to_string(),
                confidence: self.1,
            })
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    fn service(translator: ScriptedTranslator) -> TranslationService {
        TranslationService::new(Arc::new(translator)).with_delays(Duration::ZERO, Duration::ZERO)
    }

    #[tokio::test]
    async fn test_translate_text_success() {
        let outcome = service(ScriptedTranslator::new())
            .translate_text("Hello", "en", "hi")
            .await;
        assert!(outcome.is_success());
        assert_eq!(outcome.translated_text(), Some("[hi] Hello"));
        assert_eq!(outcome.original(), "Hello");
    }

    #[tokio::test]
    async fn test_provider_fault_becomes_failure() {
        let outcome = service(ScriptedTranslator::new().failing_all())
            .translate_text("Hello", "en", "hi")
            .await;
        assert!(!outcome.is_success());
        assert!(outcome.error().unwrap().contains("scripted failure"));
    }

    #[tokio::test]
    async fn test_empty_text_is_a_failure() {
        let outcome = service(ScriptedTranslator::new())
            .translate_text("", "en", "hi")
            .await;
        assert!(outcome.error().unwrap().contains("empty text"));
    }

    #[tokio::test]
    async fn test_detect_language_names() {
        let service = service(ScriptedTranslator::new());
        match service.detect_language("यह एक हिंदी वाक्य है।").await {
            DetectionOutcome::Success {
                code,
                name,
                confidence,
            } => {
                assert_eq!(code, "hi");
                assert_eq!(name, "Hindi");
                assert!((confidence - 1.0).abs() < 0.001);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            service.detect_language(" ").await,
            DetectionOutcome::Failure { .. }
        ));
    }

    #[tokio::test]
    async fn test_detect_names_unsupported_languages() {
        let service = TranslationService::new(Arc::new(FixedLanguage("fr", 0.98)));
        assert_eq!(
            service.detect_language("Bonjour tout le monde").await,
            DetectionOutcome::Success {
                code: "fr".to_string(),
                name: "French".to_string(),
                confidence: 0.98,
            }
        );

        let service = TranslationService::new(Arc::new(FixedLanguage("xx", 1.5)));
        match service.detect_language("???").await {
            DetectionOutcome::Success {
                name, confidence, ..
            } => {
                assert_eq!(name, "Unknown");
                assert!((confidence - 1.0).abs() < f32::EPSILON);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_batch_records_failures_without_stopping() {
        let service = service(ScriptedTranslator::new().with_failure("two"));
        let texts: Vec<String> = ["one", "two", "three"].iter().map(|s| s.to_string()).collect();
        let results = service.translate_batch(&texts, "en", "ta").await;
        let ok: Vec<bool> = results.iter().map(TranslationOutcome::is_success).collect();
        assert_eq!(ok, vec![true, false, true]);
    }

    #[tokio::test]
    async fn test_announcement_names_languages() {
        let service = service(ScriptedTranslator::new());
        let targets = vec!["hi".to_string(), "kn".to_string()];
        let entries = service.translate_announcement("Stay safe.", &targets).await;
        assert_eq!(entries[0].name, "Hindi");
        assert_eq!(entries[1].name, "Kannada");
        assert_eq!(entries[1].outcome.translated_text(), Some("[kn] Stay safe."));
    }

    #[tokio::test]
    async fn test_bidirectional() {
        let service = service(ScriptedTranslator::new());
        let forward = service.bidirectional("Good morning", "te").await.unwrap();
        assert_eq!(forward.direction, Direction::EnglishToIndian);
        assert_eq!(forward.outcome.translated_text(), Some("[te] Good morning"));

        let back = service.bidirectional("नमस्ते", "hi").await.unwrap();
        assert_eq!(back.direction, Direction::IndianToEnglish);
        assert_eq!(back.outcome.translated_text(), Some("[en] नमस्ते"));

        let failing = TranslationService::new(Arc::new(ScriptedTranslator::new().failing_all()));
        assert!(failing.bidirectional("Hello", "hi").await.is_err());
    }

    #[tokio::test]
    async fn test_default_pacing() {
        let service = TranslationService::new(Arc::new(ScriptedTranslator::new()));
        assert_eq!(service.batch_delay, Duration::from_millis(100));
        assert_eq!(service.document_delay, Duration::from_millis(200));
        assert_eq!(service.provider(), "scripted");
    }
}
