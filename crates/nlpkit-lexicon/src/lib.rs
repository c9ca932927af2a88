//! nlpkit Lexicon - Lexical relationships over WordNet
//!
//! Provides:
//! - The `LexicalDatabase` abstraction over a raw synset store
//! - `WordNetDb`, a reader for the Princeton WordNet database files
//! - `MemoryLexicon`, an in-memory store for tests and small lexicons
//! - The `WordNet` facade: synsets, synonyms, antonyms, hypernyms, hyponyms,
//!   definitions and path similarity
//! - `WordNetLemmatizer`, morphology-based lemmatization

pub mod analysis;
pub mod memory;
pub mod morphy;
pub mod wndb;
pub mod wordnet;

mod store;

pub use analysis::{
    parse_explorer_input, ExplorerCommand, SimilarityReport, TextAnalysis, WordAnalysis,
    DEMO_WORDS, SAMPLE_TEXT, SIMILARITY_PAIRS,
};
pub use memory::MemoryLexicon;
pub use morphy::morphy;
pub use wndb::WordNetDb;
pub use wordnet::{WordNet, WordNetLemmatizer};

use std::fmt;

use nlpkit_core::PartOfSpeech;
use serde::{Deserialize, Serialize};

// ============================================================================
// Synset Types
// ============================================================================

/// Identifies a synset: the data file it lives in plus its offset there
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SynsetId {
    /// File category; satellites are stored as adjectives
    pub pos: PartOfSpeech,
    pub offset: u32,
}

impl SynsetId {
    pub fn new(pos: PartOfSpeech, offset: u32) -> Self {
        Self {
            pos: pos.file_pos(),
            offset,
        }
    }
}

impl fmt::Display for SynsetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08}-{}", self.offset, self.pos.as_char())
    }
}

/// Relation kinds used by the explorer; other WordNet pointers are kept
/// under their raw symbol
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerKind {
    Antonym,
    Hypernym,
    InstanceHypernym,
    Hyponym,
    InstanceHyponym,
    SimilarTo,
    Other(String),
}

impl PointerKind {
    pub fn from_symbol(symbol: &str) -> Self {
        match symbol {
            "!" => Self::Antonym,
            "@" => Self::Hypernym,
            "@i" => Self::InstanceHypernym,
            "~" => Self::Hyponym,
            "~i" => Self::InstanceHyponym,
            "&" => Self::SimilarTo,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn symbol(&self) -> &str {
        match self {
            Self::Antonym => "!",
            Self::Hypernym => "@",
            Self::InstanceHypernym => "@i",
            Self::Hyponym => "~",
            Self::InstanceHyponym => "~i",
            Self::SimilarTo => "&",
            Self::Other(symbol) => symbol,
        }
    }
}

/// A relation from a synset (or one of its lemmas) to another synset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pointer {
    pub kind: PointerKind,
    pub target: SynsetId,
    /// 1-based lemma number in the source synset, 0 for synset-level pointers
    pub source_word: u16,
    /// 1-based lemma number in the target synset, 0 for synset-level pointers
    pub target_word: u16,
}

impl Pointer {
    /// Synset-level pointer
    pub fn semantic(kind: PointerKind, target: SynsetId) -> Self {
        Self {
            kind,
            target,
            source_word: 0,
            target_word: 0,
        }
    }

    /// Lemma-level pointer between word `source` and word `target` (1-based)
    pub fn lexical(kind: PointerKind, target: SynsetId, source: u16, target_word: u16) -> Self {
        Self {
            kind,
            target,
            source_word: source,
            target_word,
        }
    }

    pub fn is_lexical(&self) -> bool {
        self.source_word != 0 || self.target_word != 0
    }
}

/// A set of synonymous lemmas sharing one meaning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Synset {
    pub id: SynsetId,
    /// Syntactic category, including adjective satellites
    pub pos: PartOfSpeech,
    /// Lemmas as stored (underscores for spaces, original case)
    pub lemmas: Vec<String>,
    pub pointers: Vec<Pointer>,
    /// Definition followed by quoted examples, separated by `; `
    pub gloss: String,
}

impl Synset {
    pub fn new(
        id: SynsetId,
        pos: PartOfSpeech,
        lemmas: Vec<String>,
        gloss: impl Into<String>,
    ) -> Self {
        Self {
            id,
            pos,
            lemmas,
            pointers: Vec::new(),
            gloss: gloss.into(),
        }
    }

    pub fn with_pointer(mut self, pointer: Pointer) -> Self {
        self.pointers.push(pointer);
        self
    }

    /// Gloss without the quoted usage examples
    pub fn definition(&self) -> String {
        self.gloss
            .split("; ")
            .filter(|part| !part.trim_start().starts_with('"'))
            .collect::<Vec<_>>()
            .join("; ")
            .trim()
            .to_string()
    }

    /// Quoted usage examples from the gloss
    pub fn examples(&self) -> Vec<String> {
        self.gloss
            .split("; ")
            .map(str::trim)
            .filter(|part| part.starts_with('"'))
            .map(|part| part.trim_matches('"').to_string())
            .collect()
    }

    /// Targets of synset-level pointers of the given kind
    pub fn related(&self, kind: &PointerKind) -> impl Iterator<Item = SynsetId> + '_ {
        let kind = kind.clone();
        self.pointers
            .iter()
            .filter(move |p| p.kind == kind)
            .map(|p| p.target)
    }
}

// ============================================================================
// Lexical Database Trait
// ============================================================================

/// Raw access to a synset store
pub trait LexicalDatabase: Send + Sync {
    /// Synsets indexed under a lemma (lowercase, `_` for spaces), in sense order
    fn lookup(&self, lemma: &str, pos: PartOfSpeech) -> &[SynsetId];

    fn synset(&self, id: SynsetId) -> Option<&Synset>;

    /// Base forms listed for an irregular inflection
    fn exceptions(&self, form: &str, pos: PartOfSpeech) -> &[String];

    fn synset_count(&self) -> usize;

    fn contains_lemma(&self, lemma: &str, pos: PartOfSpeech) -> bool {
        !self.lookup(lemma, pos).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synset(gloss: &str) -> Synset {
        Synset::new(
            SynsetId::new(PartOfSpeech::Noun, 1),
            PartOfSpeech::Noun,
            vec!["dog".to_string()],
            gloss,
        )
    }

    #[test]
    fn test_definition_and_examples() {
        let s = synset(r#"a motor vehicle with four wheels; usually propelled by an engine; "he needs a car""#);
        assert_eq!(
            s.definition(),
            "a motor vehicle with four wheels; usually propelled by an engine"
        );
        assert_eq!(s.examples(), vec!["he needs a car"]);
    }

    #[test]
    fn test_pointer_symbols() {
        for symbol in ["!", "@", "@i", "~", "~i", "&", "+"] {
            assert_eq!(PointerKind::from_symbol(symbol).symbol(), symbol);
        }
        assert_eq!(PointerKind::from_symbol("+"), PointerKind::Other("+".to_string()));
    }

    #[test]
    fn test_satellite_ids_use_adjective_file() {
        let id = SynsetId::new(PartOfSpeech::AdjectiveSatellite, 435);
        assert_eq!(id.pos, PartOfSpeech::Adjective);
        assert_eq!(id.to_string(), "00000435-a");
    }

    #[test]
    fn test_lexical_pointer() {
        let target = SynsetId::new(PartOfSpeech::Adjective, 829);
        assert!(Pointer::lexical(PointerKind::Antonym, target, 1, 1).is_lexical());
        assert!(!Pointer::semantic(PointerKind::Hypernym, target).is_lexical());
    }
}
