//! nlpkit Core - Shared types, traits and errors
//!
//! This crate defines the abstractions shared by every nlpkit stage:
//! - Common error types
//! - Part-of-speech tags used by the lexical database and lemmatizers
//! - Capability traits (tokenizer, stemmer, lemmatizer, translator)
//! - Configuration management
//! - The English stopword list

pub mod config;
pub mod stopwords;

pub use config::{
    AppConfig, ConfigError, EmbeddingConfig, EmbeddingProvider, LexiconConfig, LoggingConfig,
    NerConfig, PreprocessConfig, TranslationConfig,
};
pub use stopwords::{english_stopwords, is_stopword};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for nlpkit operations
#[derive(Error, Debug)]
pub enum NlpError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Lexicon error: {0}")]
    Lexicon(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Translation error: {0}")]
    Translation(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<serde_json::Error> for NlpError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, NlpError>;

// ============================================================================
// Part of Speech
// ============================================================================

/// Syntactic category of a word sense
///
/// Mirrors the WordNet categories. Adjective satellites are stored in the
/// adjective files of the database and are treated as adjectives for lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    AdjectiveSatellite,
    Adverb,
}

impl PartOfSpeech {
    /// Lookup order used when no part of speech is given
    pub const ALL: [PartOfSpeech; 4] = [Self::Noun, Self::Verb, Self::Adjective, Self::Adverb];

    /// Single-letter WordNet tag
    pub fn as_char(&self) -> char {
        match self {
            Self::Noun => 'n',
            Self::Verb => 'v',
            Self::Adjective => 'a',
            Self::AdjectiveSatellite => 's',
            Self::Adverb => 'r',
        }
    }

    /// Parse a single-letter WordNet tag
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'n' => Some(Self::Noun),
            'v' => Some(Self::Verb),
            'a' => Some(Self::Adjective),
            's' => Some(Self::AdjectiveSatellite),
            'r' => Some(Self::Adverb),
            _ => None,
        }
    }

    /// Category whose index and data files hold this part of speech
    pub fn file_pos(&self) -> Self {
        match self {
            Self::AdjectiveSatellite => Self::Adjective,
            other => *other,
        }
    }

    /// File name suffix used by the WordNet database (`index.noun`, ...)
    pub fn file_suffix(&self) -> &'static str {
        match self.file_pos() {
            Self::Noun => "noun",
            Self::Verb => "verb",
            Self::Adverb => "adv",
            _ => "adj",
        }
    }
}

impl std::fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl std::str::FromStr for PartOfSpeech {
    type Err = NlpError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "n" | "noun" => Ok(Self::Noun),
            "v" | "verb" => Ok(Self::Verb),
            "a" | "adj" | "adjective" => Ok(Self::Adjective),
            "s" | "satellite" => Ok(Self::AdjectiveSatellite),
            "r" | "adv" | "adverb" => Ok(Self::Adverb),
            _ => Err(NlpError::InvalidInput(format!("unknown part of speech: {s}"))),
        }
    }
}

// ============================================================================
// Text Capabilities
// ============================================================================

/// Splits a text unit into an ordered token sequence
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;

    /// Policy name for reports and logging
    fn name(&self) -> &str;
}

/// Reduces a word to its stem. Unknown words yield a best-effort stem.
pub trait Stemmer: Send + Sync {
    fn stem(&self, word: &str) -> String;

    fn name(&self) -> &str;
}

/// Maps a word to its dictionary form, optionally guided by a part of speech
pub trait Lemmatizer: Send + Sync {
    fn lemmatize(&self, word: &str, pos: Option<PartOfSpeech>) -> String;
}

// ============================================================================
// Translation Capability
// ============================================================================

/// Result of a successful translation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    /// Translated text
    pub text: String,

    /// Source language as reported (or detected) by the provider
    pub source: String,

    /// Requested target language
    pub target: String,

    /// Romanized pronunciation, when the provider supplies one
    pub pronunciation: Option<String>,
}

/// Result of a language detection call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Detected language code
    pub language: String,

    /// Confidence in [0, 1]
    pub confidence: f32,
}

/// Trait for translation providers
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` from `source` (a code or `auto`) into `target`
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<Translation>;

    /// Detect the language of `text`
    async fn detect(&self, text: &str) -> Result<Detection>;

    /// Provider name for logging
    fn name(&self) -> &str;
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoTranslator;

    #[async_trait::async_trait]
    impl Translator for EchoTranslator {
        async fn translate(&self, text: &str, source: &str, target: &str) -> Result<Translation> {
            Ok(Translation {
                text: text.to_string(),
                source: source.to_string(),
                target: target.to_string(),
                pronunciation: None,
            })
        }

        async fn detect(&self, _text: &str) -> Result<Detection> {
            Ok(Detection {
                language: "en".to_string(),
                confidence: 1.0,
            })
        }

        fn name(&self) -> &str {
            "echo"
        }
    }

    #[test]
    fn test_pos_roundtrip_chars() {
        for pos in PartOfSpeech::ALL {
            assert_eq!(PartOfSpeech::from_char(pos.as_char()), Some(pos));
        }
        assert_eq!(PartOfSpeech::from_char('x'), None);
    }

    #[test]
    fn test_pos_parse() {
        assert_eq!("v".parse::<PartOfSpeech>().unwrap(), PartOfSpeech::Verb);
        assert_eq!("Noun".parse::<PartOfSpeech>().unwrap(), PartOfSpeech::Noun);
        assert!("xyz".parse::<PartOfSpeech>().is_err());
    }

    #[test]
    fn test_satellite_uses_adjective_files() {
        assert_eq!(
            PartOfSpeech::AdjectiveSatellite.file_pos(),
            PartOfSpeech::Adjective
        );
        assert_eq!(PartOfSpeech::AdjectiveSatellite.file_suffix(), "adj");
        assert_eq!(PartOfSpeech::Adverb.file_suffix(), "adv");
    }

    #[test]
    fn test_error_display() {
        let err = NlpError::InvalidInput("empty text".to_string());
        assert_eq!(err.to_string(), "Invalid input: empty text");
    }

    #[test]
    fn test_translator_trait_object() {
        let translator: Box<dyn Translator> = Box::new(EchoTranslator);
        let result = tokio_test::block_on(translator.translate("hello", "en", "hi")).unwrap();
        assert_eq!(result.text, "hello");
        assert_eq!(result.target, "hi");
        assert_eq!(translator.name(), "echo");
    }
}
