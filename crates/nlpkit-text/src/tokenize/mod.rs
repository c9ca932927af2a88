//! Tokenization policies
//!
//! Each policy implements [`nlpkit_core::Tokenizer`]. Policies differ only in
//! how they treat punctuation, contractions, hashtags and mentions.

mod mwe;
mod treebank;
mod tweet;

pub use mwe::MweTokenizer;
pub use treebank::TreebankWordTokenizer;
pub use tweet::TweetTokenizer;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use nlpkit_core::{NlpError, Tokenizer};

static WORD_PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+|[^\w\s]+").unwrap());

// ============================================================================
// Simple Policies
// ============================================================================

/// Splits on runs of whitespace; punctuation stays attached to words
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    fn name(&self) -> &str {
        "whitespace"
    }
}

/// Emits maximal runs of word characters or of punctuation
#[derive(Debug, Clone, Copy, Default)]
pub struct WordPunctTokenizer;

impl Tokenizer for WordPunctTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        WORD_PUNCT
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    fn name(&self) -> &str {
        "wordpunct"
    }
}

// ============================================================================
// Policy Selection
// ============================================================================

/// Named tokenization policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenizerPolicy {
    Whitespace,
    WordPunct,
    Treebank,
    Tweet,
    Mwe,
}

impl TokenizerPolicy {
    pub const ALL: [TokenizerPolicy; 5] = [
        Self::Whitespace,
        Self::WordPunct,
        Self::Treebank,
        Self::Tweet,
        Self::Mwe,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Whitespace => "whitespace",
            Self::WordPunct => "wordpunct",
            Self::Treebank => "treebank",
            Self::Tweet => "tweet",
            Self::Mwe => "mwe",
        }
    }

    /// Build a tokenizer with default options.
    ///
    /// `expressions` only applies to the MWE policy, which word-punct
    /// tokenizes the text before merging.
    pub fn build(&self, expressions: &[Vec<String>]) -> Box<dyn Tokenizer> {
        match self {
            Self::Whitespace => Box::new(WhitespaceTokenizer),
            Self::WordPunct => Box::new(WordPunctTokenizer),
            Self::Treebank => Box::new(TreebankWordTokenizer::new()),
            Self::Tweet => Box::new(TweetTokenizer::new()),
            Self::Mwe => Box::new(MweTokenizer::new(expressions.to_vec())),
        }
    }
}

impl std::fmt::Display for TokenizerPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TokenizerPolicy {
    type Err = NlpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "whitespace" | "ws" => Ok(Self::Whitespace),
            "wordpunct" | "punct" | "punctuation" => Ok(Self::WordPunct),
            "treebank" => Ok(Self::Treebank),
            "tweet" | "twitter" => Ok(Self::Tweet),
            "mwe" => Ok(Self::Mwe),
            _ => Err(NlpError::InvalidInput(format!(
                "unknown tokenizer policy: {s}"
            ))),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
