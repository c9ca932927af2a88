//! Supported languages and language pairs

use std::fmt;

use nlpkit_core::{NlpError, Result};
use serde::{Deserialize, Serialize};

/// Code of the only non-Indian language
pub const ENGLISH: &str = "en";

/// Indian languages as (name, code)
pub const INDIAN_LANGUAGES: [(&str, &str); 13] = [
    ("hindi", "hi"),
    ("bengali", "bn"),
    ("telugu", "te"),
    ("marathi", "mr"),
    ("tamil", "ta"),
    ("gujarati", "gu"),
    ("urdu", "ur"),
    ("kannada", "kn"),
    ("malayalam", "ml"),
    ("punjabi", "pa"),
    ("odia", "or"),
    ("assamese", "as"),
    ("sanskrit", "sa"),
];

/// Every language the translation provider can report, as (code, name)
pub const PROVIDER_LANGUAGES: [(&str, &str); 107] = [
    ("af", "afrikaans"),
    ("sq", "albanian"),
    ("am", "amharic"),
    ("ar", "arabic"),
    ("hy", "armenian"),
    ("az", "azerbaijani"),
    ("eu", "basque"),
    ("be", "belarusian"),
    ("bn", "bengali"),
    ("bs", "bosnian"),
    ("bg", "bulgarian"),
    ("ca", "catalan"),
    ("ceb", "cebuano"),
    ("ny", "chichewa"),
    ("zh-cn", "chinese (simplified)"),
    ("zh-tw", "chinese (traditional)"),
    ("co", "corsican"),
    ("hr", "croatian"),
    ("cs", "czech"),
    ("da", "danish"),
    ("nl", "dutch"),
    ("en", "english"),
    ("eo", "esperanto"),
    ("et", "estonian"),
    ("tl", "filipino"),
    ("fi", "finnish"),
    ("fr", "french"),
    ("fy", "frisian"),
    ("gl", "galician"),
    ("ka", "georgian"),
    ("de", "german"),
    ("el", "greek"),
    ("gu", "gujarati"),
    ("ht", "haitian creole"),
    ("ha", "hausa"),
    ("haw", "hawaiian"),
    ("iw", "hebrew"),
    ("he", "hebrew"),
    ("hi", "hindi"),
    ("hmn", "hmong"),
    ("hu", "hungarian"),
    ("is", "icelandic"),
    ("ig", "igbo"),
    ("id", "indonesian"),
    ("ga", "irish"),
    ("it", "italian"),
    ("ja", "japanese"),
    ("jw", "javanese"),
    ("kn", "kannada"),
    ("kk", "kazakh"),
    ("km", "khmer"),
    ("ko", "korean"),
    ("ku", "kurdish (kurmanji)"),
    ("ky", "kyrgyz"),
    ("lo", "lao"),
    ("la", "latin"),
    ("lv", "latvian"),
    ("lt", "lithuanian"),
    ("lb", "luxembourgish"),
    ("mk", "macedonian"),
    ("mg", "malagasy"),
    ("ms", "malay"),
    ("ml", "malayalam"),
    ("mt", "maltese"),
    ("mi", "maori"),
    ("mr", "marathi"),
    ("mn", "mongolian"),
    ("my", "myanmar (burmese)"),
    ("ne", "nepali"),
    ("no", "norwegian"),
    ("or", "odia"),
    ("ps", "pashto"),
    ("fa", "persian"),
    ("pl", "polish"),
    ("pt", "portuguese"),
    ("pa", "punjabi"),
    ("ro", "romanian"),
    ("ru", "russian"),
    ("sm", "samoan"),
    ("gd", "scots gaelic"),
    ("sr", "serbian"),
    ("st", "sesotho"),
    ("sn", "shona"),
    ("sd", "sindhi"),
    ("si", "sinhala"),
    ("sk", "slovak"),
    ("sl", "slovenian"),
    ("so", "somali"),
    ("es", "spanish"),
    ("su", "sundanese"),
    ("sw", "swahili"),
    ("sv", "swedish"),
    ("tg", "tajik"),
    ("ta", "tamil"),
    ("te", "telugu"),
    ("th", "thai"),
    ("tr", "turkish"),
    ("uk", "ukrainian"),
    ("ur", "urdu"),
    ("ug", "uyghur"),
    ("uz", "uzbek"),
    ("vi", "vietnamese"),
    ("cy", "welsh"),
    ("xh", "xhosa"),
    ("yi", "yiddish"),
    ("yo", "yoruba"),
    ("zu", "zulu"),
];

pub fn is_indian(code: &str) -> bool {
    INDIAN_LANGUAGES.iter().any(|(_, c)| *c == code)
}

/// English or one of the Indian languages
pub fn is_supported(code: &str) -> bool {
    code == ENGLISH || is_indian(code)
}

/// Capitalized language name, if the code is supported
pub fn language_name(code: &str) -> Option<String> {
    if code == ENGLISH {
        return Some("English".to_string());
    }
    INDIAN_LANGUAGES
        .iter()
        .find(|(_, c)| *c == code)
        .map(|(name, _)| capitalize(name))
}

/// Capitalized name of any detected language code, supported or not
pub fn detected_language_name(code: &str) -> Option<String> {
    if let Some(name) = language_name(code) {
        return Some(name);
    }
    let code = code.to_lowercase();
    PROVIDER_LANGUAGES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| capitalize(name))
}

/// Indian languages sorted by name
pub fn sorted_indian_languages() -> Vec<(&'static str, &'static str)> {
    let mut languages = INDIAN_LANGUAGES.to_vec();
    languages.sort();
    languages
}

pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ============================================================================
// Language Pair
// ============================================================================

/// Source side of a translation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceLanguage {
    /// Let the provider detect the language
    Auto,
    Code(String),
}

impl SourceLanguage {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Auto => "auto",
            Self::Code(code) => code,
        }
    }

    /// `auto` or any non-empty code, lowercased
    pub fn parse(input: &str) -> Result<Self> {
        let code = input.trim().to_lowercase();
        match code.as_str() {
            "" => Err(NlpError::InvalidInput("empty language code".to_string())),
            "auto" => Ok(Self::Auto),
            _ => Ok(Self::Code(code)),
        }
    }

    /// Like `parse`, but explicit codes must be supported
    pub fn parse_supported(input: &str) -> Result<Self> {
        let source = Self::parse(input)?;
        match &source {
            Self::Code(code) if !is_supported(code) => Err(NlpError::InvalidInput(format!(
                "unsupported source language: {code}"
            ))),
            _ => Ok(source),
        }
    }
}

impl fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source and validated target of a translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguagePair {
    pub source: SourceLanguage,
    pub target: String,
}

impl LanguagePair {
    pub fn new(source: SourceLanguage, target: &str) -> Result<Self> {
        let target = target.trim().to_lowercase();
        if !is_supported(&target) {
            return Err(NlpError::InvalidInput(format!(
                "unsupported target language: {target}"
            )));
        }
        Ok(Self { source, target })
    }

    pub fn english_to(target: &str) -> Result<Self> {
        Self::new(SourceLanguage::Code(ENGLISH.to_string()), target)
    }

    pub fn to_english(source: SourceLanguage) -> Self {
        Self {
            source,
            target: ENGLISH.to_string(),
        }
    }
}
