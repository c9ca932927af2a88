//! nlpkit Configuration Management
//!
//! Handles configuration from environment variables and TOML config files
//! with sensible defaults, so every demonstration runs without any setup.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Word embedding provider
    pub embedding: EmbeddingConfig,

    /// Translation provider and pacing
    pub translation: TranslationConfig,

    /// Lexical database location
    pub lexicon: LexiconConfig,

    /// Entity recognizer training
    pub ner: NerConfig,

    /// Preprocessing pipeline outputs
    pub preprocess: PreprocessConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Embedding
        if let Ok(provider) = std::env::var("EMBEDDING_PROVIDER") {
            config.embedding.provider = provider.parse()?;
        }
        if let Ok(model) = std::env::var("EMBEDDING_MODEL") {
            config.embedding.model = model;
        }
        if let Ok(dimension) = std::env::var("EMBEDDING_DIMENSION") {
            config.embedding.dimension =
                dimension.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "EMBEDDING_DIMENSION".to_string(),
                    value: dimension,
                })?;
        }
        if let Ok(url) = std::env::var("OLLAMA_URL") {
            config.embedding.ollama_url = url;
        }
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            config.embedding.openai_api_key = Some(key);
        }

        // Translation
        if let Ok(endpoint) = std::env::var("TRANSLATE_ENDPOINT") {
            config.translation.endpoint = endpoint;
        }

        // Lexicon
        if let Ok(dir) = std::env::var("WORDNET_DIR") {
            config.lexicon.wordnet_dir = Some(PathBuf::from(dir));
        }

        // NER
        if let Ok(iterations) = std::env::var("NER_ITERATIONS") {
            config.ner.iterations = iterations.parse().map_err(|_| ConfigError::InvalidValue {
                key: "NER_ITERATIONS".to_string(),
                value: iterations,
            })?;
        }
        if let Ok(seed) = std::env::var("NER_SEED") {
            config.ner.seed = Some(seed.parse().map_err(|_| ConfigError::InvalidValue {
                key: "NER_SEED".to_string(),
                value: seed,
            })?);
        }

        // Preprocessing
        if let Ok(dir) = std::env::var("PREPROCESS_OUTPUT_DIR") {
            config.preprocess.output_dir = PathBuf::from(dir);
        }

        // Logging
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Ok(json) = std::env::var("LOG_JSON") {
            config.logging.json_format = matches!(json.to_lowercase().as_str(), "1" | "true");
        }

        Ok(config)
    }

    /// Load from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path,
            message: e.to_string(),
        })
    }

    /// Merge with environment variables (env takes precedence)
    pub fn with_env_override(mut self) -> Result<Self, ConfigError> {
        let env_config = Self::from_env()?;
        let defaults = Self::default();

        // Only override if env values differ from defaults
        if env_config.embedding.provider != defaults.embedding.provider {
            self.embedding.provider = env_config.embedding.provider;
        }
        if env_config.embedding.model != defaults.embedding.model {
            self.embedding.model = env_config.embedding.model;
        }
        if env_config.translation.endpoint != defaults.translation.endpoint {
            self.translation.endpoint = env_config.translation.endpoint;
        }
        if env_config.lexicon.wordnet_dir.is_some() {
            self.lexicon.wordnet_dir = env_config.lexicon.wordnet_dir;
        }
        if env_config.ner.iterations != defaults.ner.iterations {
            self.ner.iterations = env_config.ner.iterations;
        }
        if env_config.ner.seed.is_some() {
            self.ner.seed = env_config.ner.seed;
        }
        if env_config.preprocess.output_dir != defaults.preprocess.output_dir {
            self.preprocess.output_dir = env_config.preprocess.output_dir;
        }
        if env_config.logging.level != defaults.logging.level {
            self.logging.level = env_config.logging.level;
        }
        if env_config.logging.json_format {
            self.logging.json_format = true;
        }

        // Always use env for sensitive values
        if env_config.embedding.openai_api_key.is_some() {
            self.embedding.openai_api_key = env_config.embedding.openai_api_key;
        }

        Ok(self)
    }
}

/// Embedding provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Provider to use
    pub provider: EmbeddingProvider,

    /// Model name (ignored by the hashing provider)
    pub model: String,

    /// Vector dimension for the hashing provider
    pub dimension: usize,

    /// Minimum word frequency for the embedding vocabulary
    pub min_count: usize,

    /// Ollama server URL
    pub ollama_url: String,

    /// OpenAI API key
    pub openai_api_key: Option<String>,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: EmbeddingProvider::Hashing,
            model: "nomic-embed-text".to_string(),
            dimension: 100,
            min_count: 1,
            ollama_url: "http://localhost:11434".to_string(),
            openai_api_key: None,
        }
    }
}

/// Supported embedding providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProvider {
    /// Deterministic local vectors derived from a hash of the word
    Hashing,
    OpenAI,
    Ollama,
}

impl std::str::FromStr for EmbeddingProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hashing" | "local" => Ok(Self::Hashing),
            "openai" => Ok(Self::OpenAI),
            "ollama" => Ok(Self::Ollama),
            _ => Err(ConfigError::InvalidValue {
                key: "EMBEDDING_PROVIDER".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Translation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    /// Base URL of the translation endpoint
    pub endpoint: String,

    /// Delay after each item of a batch, in milliseconds
    pub batch_delay_ms: u64,

    /// Delay after each paragraph or announcement language, in milliseconds
    pub document_delay_ms: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://translate.googleapis.com".to_string(),
            batch_delay_ms: 100,
            document_delay_ms: 200,
        }
    }
}

/// Lexical database configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconConfig {
    /// Directory holding the WordNet database files (`index.noun`, `data.noun`, ...)
    pub wordnet_dir: Option<PathBuf>,
}

/// Entity recognizer training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NerConfig {
    /// Passes over the training examples
    pub iterations: usize,

    /// Probability of dropping each weight update
    pub dropout: f64,

    /// Seed for shuffling and dropout; random when unset
    pub seed: Option<u64>,

    /// Log the accumulated loss every this many iterations
    pub log_every: usize,

    /// Enable DATE / TIME / MONEY pattern rules next to the learned gazetteer
    pub use_patterns: bool,
}

impl Default for NerConfig {
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

/// Preprocessing pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    /// Directory receiving the processed table and fitted artifacts
    pub output_dir: PathBuf,

    /// Vocabulary cap of the TF-IDF vectorizer
    pub max_features: usize,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            max_features: 1000,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// JSON format for logs
    pub json_format: bool,

    /// Include file/line in logs
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            include_location: false,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
