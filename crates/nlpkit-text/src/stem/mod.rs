//! Stemmers
//!
//! `PorterStemmer` is the classic algorithm implemented here; `SnowballStemmer`
//! delegates to the `rust-stemmers` Snowball implementations.

mod porter;

pub use porter::PorterStemmer;

use rust_stemmers::Algorithm;
use serde::{Deserialize, Serialize};

use nlpkit_core::{NlpError, Result, Stemmer};

/// Snowball stemmer for a selectable language
pub struct SnowballStemmer {
    language: String,
    inner: rust_stemmers::Stemmer,
}

impl SnowballStemmer {
    /// Create a stemmer for a language name such as `english` or `german`
    pub fn new(language: &str) -> Result<Self> {
        let language = language.to_lowercase();
        let algorithm = Self::algorithm(&language)?;
        Ok(Self {
            language,
            inner: rust_stemmers::Stemmer::create(algorithm),
        })
    }

    pub fn english() -> Self {
        Self {
            language: "english".to_string(),
            inner: rust_stemmers::Stemmer::create(Algorithm::English),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Languages accepted by [`SnowballStemmer::new`]
    pub fn languages() -> &'static [&'static str] {
        &[
            "arabic",
            "danish",
            "dutch",
            "english",
            "finnish",
            "french",
            "german",
            "hungarian",
            "italian",
            "norwegian",
            "portuguese",
            "romanian",
            "russian",
            "spanish",
            "swedish",
            "turkish",
        ]
    }

    fn algorithm(language: &str) -> Result<Algorithm> {
        let algorithm = match language {
            "arabic" => Algorithm::Arabic,
            "danish" => Algorithm::Danish,
            "dutch" => Algorithm::Dutch,
            "english" | "porter2" => Algorithm::English,
            "finnish" => Algorithm::Finnish,
            "french" => Algorithm::French,
            "german" => Algorithm::German,
            "hungarian" => Algorithm::Hungarian,
            "italian" => Algorithm::Italian,
            "norwegian" => Algorithm::Norwegian,
            "portuguese" => Algorithm::Portuguese,
            "romanian" => Algorithm::Romanian,
            "russian" => Algorithm::Russian,
            "spanish" => Algorithm::Spanish,
            "swedish" => Algorithm::Swedish,
            "turkish" => Algorithm::Turkish,
            other => {
                return Err(NlpError::InvalidInput(format!(
                    "unsupported snowball language: {other}"
                )))
            }
        };
        Ok(algorithm)
    }
}

impl std::fmt::Debug for SnowballStemmer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnowballStemmer")
            .field("language", &self.language)
            .finish()
    }
}

impl Stemmer for SnowballStemmer {
    fn stem(&self, word: &str) -> String {
        self.inner.stem(&word.to_lowercase()).into_owned()
    }

    fn name(&self) -> &str {
        "snowball"
    }
}

/// Named stemming algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StemmerKind {
    Porter,
    Snowball,
}

impl StemmerKind {
    /// Build the stemmer; Snowball uses English
    pub fn build(&self) -> Box<dyn Stemmer> {
        match self {
            Self::Porter => Box::new(PorterStemmer),
            Self::Snowball => Box::new(SnowballStemmer::english()),
        }
    }
}

impl std::str::FromStr for StemmerKind {
    type Err = NlpError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "porter" => Ok(Self::Porter),
            "snowball" | "porter2" => Ok(Self::Snowball),
            _ => Err(NlpError::InvalidInput(format!("unknown stemmer: {s}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_WORDS: [&str; 7] = [
        "working", "works", "worked", "running", "runs", "easily", "fairly",
    ];

    #[test]
    fn test_snowball_sample_words() {
        let stemmer = SnowballStemmer::english();
        let stems: Vec<String> = SAMPLE_WORDS.iter().map(|w| stemmer.stem(w)).collect();
        assert_eq!(
            stems,
            vec!["work", "work", "work", "run", "run", "easili", "fair"]
        );
    }

    #[test]
    fn test_snowball_lowercases() {
        assert_eq!(SnowballStemmer::english().stem("Running"), "run");
    }

    #[test]
    fn test_snowball_languages() {
        let german = SnowballStemmer::new("German").unwrap();
        assert_eq!(german.language(), "german");
        assert!(SnowballStemmer::new("klingon").is_err());
        for language in SnowballStemmer::languages() {
            assert!(SnowballStemmer::new(language).is_ok());
        }
    }

    #[test]
    fn test_stemmer_kind() {
        let porter = "porter".parse::<StemmerKind>().unwrap().build();
        assert_eq!(porter.name(), "porter");
        assert_eq!(porter.stem("fairly"), "fairli");

        let snowball = "snowball".parse::<StemmerKind>().unwrap().build();
        assert_eq!(snowball.stem("fairly"), "fair");
        assert!("lancaster".parse::<StemmerKind>().is_err());
    }
}
