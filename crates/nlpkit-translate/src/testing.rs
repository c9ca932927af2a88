//! Deterministic translation provider
//!
//! `ScriptedTranslator` never touches the network: translations echo the
//! input tagged with the target code, detection looks at the Unicode script
//! of the text, and chosen inputs can be made to fail.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use nlpkit_core::{Detection, NlpError, Result, Translation, Translator};

use crate::languages::ENGLISH;

/// A call received by a `ScriptedTranslator`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedCall {
    Translate {
        text: String,
        source: String,
        target: String,
    },
    Detect {
        text: String,
    },
}

/// Offline provider with predictable output
#[derive(Debug, Default)]
pub struct ScriptedTranslator {
    failing: HashSet<String>,
    fail_all: bool,
    calls: Mutex<Vec<ScriptedCall>>,
}

impl ScriptedTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every call whose text equals `text`
    pub fn with_failure(mut self, text: impl Into<String>) -> Self {
        self.failing.insert(text.into());
        self
    }

    /// Fail every call
    pub fn failing_all(mut self) -> Self {
        self.fail_all = true;
        self
    }

    /// Calls received so far, in order
    pub fn calls(&self) -> Vec<ScriptedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: ScriptedCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    fn check(&self, text: &str) -> Result<()> {
        if text.trim().is_empty() {
            return Err(NlpError::InvalidInput(
                "cannot translate empty text".to_string(),
            ));
        }
        if self.fail_all || self.failing.contains(text) {
            return Err(NlpError::Translation(format!(
                "scripted failure for '{text}'"
            )));
        }
        Ok(())
    }
}

/// Language code guessed from the first letter in a known script
pub fn detect_script(text: &str) -> &'static str {
    for c in text.chars().filter(|c| c.is_alphabetic()) {
        let code = match c as u32 {
            0x0600..=0x06FF => "ur",
            0x0900..=0x097F => "hi",
            0x0980..=0x09FF => "bn",
            0x0A00..=0x0A7F => "pa",
            0x0A80..=0x0AFF => "gu",
            0x0B00..=0x0B7F => "or",
            0x0B80..=0x0BFF => "ta",
            0x0C00..=0x0C7F => "te",
            0x0C80..=0x0CFF => "kn",
            0x0D00..=0x0D7F => "ml",
            _ => continue,
        };
        return code;
    }
    ENGLISH
}

#[async_trait]
impl Translator for ScriptedTranslator {
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<Translation> {
        self.record(ScriptedCall::Translate {
            text: text.to_string(),
            source: source.to_string(),
            target: target.to_string(),
        });
        self.check(text)?;

        let source = if source == "auto" {
            detect_script(text)
        } else {
            source
        };
        Ok(Translation {
            text: format!("[{target}] {text}"),
            source: source.to_string(),
            target: target.to_string(),
            pronunciation: None,
        })
    }

    async fn detect(&self, text: &str) -> Result<Detection> {
        self.record(ScriptedCall::Detect {
            text: text.to_string(),
        });
        self.check(text)?;
        Ok(Detection {
            language: detect_script(text).to_string(),
            confidence: 1.0,
        })
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_script() {
        assert_eq!(detect_script("This is an English sentence."), "en");
        assert_eq!(detect_script("यह एक हिंदी वाक्य है।"), "hi");
        assert_eq!(detect_script("இது ஒரு தமிழ் வாக்கியம்."), "ta");
        assert_eq!(detect_script("এটি একটি বাংলা বাক্য।"), "bn");
        assert_eq!(detect_script("123"), "en");
    }

    #[tokio::test]
    async fn test_scripted_translation() {
        let translator = ScriptedTranslator::new().with_failure("boom");
        let result = translator.translate("Hello", "auto", "hi").await.unwrap();
        assert_eq!(result.text, "[hi] Hello");
        assert_eq!(result.source, "en");

        assert!(translator.translate("boom", "en", "hi").await.is_err());
        assert!(matches!(
            translator.translate("", "en", "hi").await,
            Err(NlpError::InvalidInput(_))
        ));
        assert_eq!(translator.calls().len(), 3);
    }
}
