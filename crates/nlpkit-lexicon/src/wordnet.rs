//! WordNet facade
//!
//! Word-level queries over any `LexicalDatabase`: senses, relation sets,
//! definitions, path similarity and the morphology-based lemmatizer.
//!
//! Author: hephaex@gmail.com

use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::sync::Arc;

use nlpkit_core::{Lemmatizer, LexiconConfig, NlpError, PartOfSpeech, Result};
use tracing::{debug, warn};

use crate::analysis::{SimilarityReport, TextAnalysis, WordAnalysis};
use crate::morphy::morphy;
use crate::store::normalize_lemma;
use crate::{LexicalDatabase, MemoryLexicon, PointerKind, Synset, SynsetId, WordNetDb};

/// Query interface over a lexical database
#[derive(Clone)]
pub struct WordNet {
    db: Arc<dyn LexicalDatabase>,
}

impl std::fmt::Debug for WordNet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordNet")
            .field("synsets", &self.db.synset_count())
            .finish()
    }
}

impl WordNet {
    pub fn new(db: impl LexicalDatabase + 'static) -> Self {
        Self { db: Arc::new(db) }
    }

    pub fn from_arc(db: Arc<dyn LexicalDatabase>) -> Self {
        Self { db }
    }

    /// Load the WNDB files under `dir`
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(WordNetDb::open(dir)?))
    }

    /// Load the database named by the configuration
    pub fn from_config(config: &LexiconConfig) -> Result<Self> {
        let dir = config.wordnet_dir.as_ref().ok_or_else(|| {
            NlpError::Config("no WordNet directory configured (set WORDNET_DIR)".to_string())
        })?;
        Self::open(dir)
    }

    /// Like `from_config`, but falls back to an empty lexicon
    ///
    /// Every query then finds nothing and lemmatization returns words unchanged.
    pub fn from_config_or_empty(config: &LexiconConfig) -> Self {
        match Self::from_config(config) {
            Ok(wordnet) => wordnet,
            Err(e) => {
                warn!(error = %e, "WordNet unavailable, using an empty lexicon");
                Self::new(MemoryLexicon::new())
            }
        }
    }

    pub fn database(&self) -> &dyn LexicalDatabase {
        self.db.as_ref()
    }

    pub fn synset(&self, id: SynsetId) -> Option<&Synset> {
        self.db.synset(id)
    }

    // ========================================================================
    // Senses
    // ========================================================================

    /// Senses of a word, after morphology, in index order
    ///
    /// Without a part of speech, nouns come first, then verbs, adjectives
    /// (satellites included) and adverbs.
    pub fn synsets(&self, word: &str, pos: Option<PartOfSpeech>) -> Vec<&Synset> {
        let categories: Vec<PartOfSpeech> = match pos {
            Some(pos) => vec![pos.file_pos()],
            None => PartOfSpeech::ALL.to_vec(),
        };

        let mut seen: Vec<SynsetId> = Vec::new();
        let mut senses = Vec::new();
        for pos in categories {
            for form in morphy(self.database(), word, pos) {
                for id in self.db.lookup(&form, pos) {
                    if seen.contains(id) {
                        continue;
                    }
                    seen.push(*id);
                    match self.db.synset(*id) {
                        Some(synset) => senses.push(synset),
                        None => debug!(synset = %id, lemma = %form, "Indexed synset missing from data"),
                    }
                }
            }
        }
        senses
    }

    /// Conventional synset name, e.g. `dog.n.01` or `glad.s.02`
    pub fn synset_name(&self, synset: &Synset) -> String {
        let Some(first) = synset.lemmas.first() else {
            return format!("{}.{}", synset.id, synset.pos.as_char());
        };
        let sense = self
            .db
            .lookup(first, synset.id.pos)
            .iter()
            .position(|id| *id == synset.id)
            .map_or(1, |i| i + 1);
        format!(
            "{}.{}.{:02}",
            first.to_lowercase(),
            synset.pos.as_char(),
            sense
        )
    }

    // ========================================================================
    // Relations
    // ========================================================================

    /// Lemmas of every sense, excluding the word itself
    pub fn synonyms(&self, word: &str, pos: Option<PartOfSpeech>) -> Vec<String> {
        let word_lower = word.trim().to_lowercase();
        let mut synonyms = Vec::new();
        for synset in self.synsets(word, pos) {
            for lemma in &synset.lemmas {
                let synonym = display_lemma(lemma);
                if synonym.to_lowercase() != word_lower {
                    push_unique(&mut synonyms, synonym);
                }
            }
        }
        synonyms
    }

    /// Lemma-level antonyms of every lemma of every sense
    pub fn antonyms(&self, word: &str, pos: Option<PartOfSpeech>) -> Vec<String> {
        let mut antonyms = Vec::new();
        for synset in self.synsets(word, pos) {
            for pointer in &synset.pointers {
                if pointer.kind != PointerKind::Antonym || !pointer.is_lexical() {
                    continue;
                }
                let lemma = self.db.synset(pointer.target).and_then(|target| {
                    let index = usize::from(pointer.target_word).checked_sub(1)?;
                    target.lemmas.get(index)
                });
                if let Some(lemma) = lemma {
                    push_unique(&mut antonyms, display_lemma(lemma));
                }
            }
        }
        antonyms
    }

    /// Lemmas of the direct (and instance) hypernyms of every sense
    pub fn hypernyms(&self, word: &str, pos: Option<PartOfSpeech>) -> Vec<String> {
        self.related_lemmas(
            word,
            pos,
            &[PointerKind::Hypernym, PointerKind::InstanceHypernym],
        )
    }

    /// Lemmas of the direct (and instance) hyponyms of every sense
    pub fn hyponyms(&self, word: &str, pos: Option<PartOfSpeech>) -> Vec<String> {
        self.related_lemmas(
            word,
            pos,
            &[PointerKind::Hyponym, PointerKind::InstanceHyponym],
        )
    }

    fn related_lemmas(
        &self,
        word: &str,
        pos: Option<PartOfSpeech>,
        kinds: &[PointerKind],
    ) -> Vec<String> {
        let mut lemmas = Vec::new();
        for synset in self.synsets(word, pos) {
            for kind in kinds {
                for target in synset.related(kind).filter_map(|id| self.db.synset(id)) {
                    for lemma in &target.lemmas {
                        push_unique(&mut lemmas, display_lemma(lemma));
                    }
                }
            }
        }
        lemmas
    }

    /// `(synset name, definition)` for every sense of the word
    pub fn definitions(&self, word: &str) -> Vec<(String, String)> {
        self.synsets(word, None)
            .into_iter()
            .map(|synset| (self.synset_name(synset), synset.definition()))
            .collect()
    }

    // ========================================================================
    // Similarity
    // ========================================================================

    /// Minimum hypernym distance from `start` to each of its ancestors
    fn hypernym_distances(&self, start: SynsetId) -> HashMap<SynsetId, usize> {
        let mut distances = HashMap::from([(start, 0)]);
        let mut queue = VecDeque::from([start]);

        while let Some(id) = queue.pop_front() {
            let depth = distances[&id];
            let Some(synset) = self.db.synset(id) else {
                continue;
            };
            let parents = synset
                .related(&PointerKind::Hypernym)
                .chain(synset.related(&PointerKind::InstanceHypernym));
            for parent in parents {
                if !distances.contains_key(&parent) {
                    distances.insert(parent, depth + 1);
                    queue.push_back(parent);
                }
            }
        }
        distances
    }

    /// Shortest path length between two synsets through a common hypernym
    ///
    /// Verb hierarchies have no single top node; when both synsets are verbs
    /// a shared root one step above each deepest ancestor joins them.
    pub fn shortest_path_distance(&self, a: &Synset, b: &Synset) -> Option<usize> {
        if a.id == b.id {
            return Some(0);
        }

        let from_a = self.hypernym_distances(a.id);
        let from_b = self.hypernym_distances(b.id);

        let mut best = from_a
            .iter()
            .filter_map(|(id, da)| from_b.get(id).map(|db| da + db))
            .min();

        if a.pos == PartOfSpeech::Verb && b.pos == PartOfSpeech::Verb {
            let root_a = from_a.values().max().copied().unwrap_or(0) + 1;
            let root_b = from_b.values().max().copied().unwrap_or(0) + 1;
            let through_root = root_a + root_b;
            best = Some(best.map_or(through_root, |d| d.min(through_root)));
        }
        best
    }

    /// `1 / (distance + 1)`, in (0, 1]
    pub fn path_similarity(&self, a: &Synset, b: &Synset) -> Option<f64> {
        self.shortest_path_distance(a, b)
            .map(|distance| 1.0 / (distance as f64 + 1.0))
    }

    /// Path similarity between the first senses of two words
    pub fn similarity(&self, word1: &str, word2: &str) -> Option<f64> {
        let first = *self.synsets(word1, None).first()?;
        let second = *self.synsets(word2, None).first()?;
        self.path_similarity(first, second)
    }

    /// Similarity with the senses it was computed from; `None` when either
    /// word is unknown
    pub fn compare(&self, word1: &str, word2: &str) -> Option<SimilarityReport> {
        let first = *self.synsets(word1, None).first()?;
        let second = *self.synsets(word2, None).first()?;
        Some(SimilarityReport {
            word1: word1.to_string(),
            word2: word2.to_string(),
            score: self.path_similarity(first, second),
            synset1: self.synset_name(first),
            synset2: self.synset_name(second),
            definition1: first.definition(),
            definition2: second.definition(),
        })
    }

    // ========================================================================
    // Analysis
    // ========================================================================

    pub fn analyze_word(&self, word: &str) -> WordAnalysis {
        WordAnalysis {
            word: word.to_string(),
            definitions: self.definitions(word),
            synonyms: self.synonyms(word, None),
            antonyms: self.antonyms(word, None),
            hypernyms: self.hypernyms(word, None),
            hyponyms: self.hyponyms(word, None),
        }
    }

    pub fn analyze_text(&self, text: &str) -> TextAnalysis {
        let words = TextAnalysis::extract_words(text);
        let analyses = words.iter().map(|word| self.analyze_word(word)).collect();
        TextAnalysis {
            text: text.to_string(),
            words,
            analyses,
        }
    }
}

fn display_lemma(lemma: &str) -> String {
    lemma.replace('_', " ")
}

fn push_unique(items: &mut Vec<String>, item: String) {
    if !items.contains(&item) {
        items.push(item);
    }
}

// ============================================================================
// Lemmatizer
// ============================================================================

/// Lemmatizer backed by WordNet morphology
///
/// Returns the shortest base form known to the database, or the word
/// unchanged. Nouns are assumed when no part of speech is given. Index
/// lemmas are lowercase, so words with capitals are returned as given.
#[derive(Debug, Clone)]
pub struct WordNetLemmatizer {
    wordnet: WordNet,
}

impl WordNetLemmatizer {
    pub fn new(wordnet: WordNet) -> Self {
        Self { wordnet }
    }
}

impl Lemmatizer for WordNetLemmatizer {
    fn lemmatize(&self, word: &str, pos: Option<PartOfSpeech>) -> String {
        if word.chars().any(char::is_uppercase) {
            return word.to_string();
        }
        let pos = pos.unwrap_or(PartOfSpeech::Noun);
        morphy(self.wordnet.database(), word, pos)
            .into_iter()
            .reduce(|shortest, candidate| {
                if candidate.chars().count() < shortest.chars().count() {
                    candidate
                } else {
                    shortest
                }
            })
            .unwrap_or_else(|| word.to_string())
    }
}

/// Whether the database knows `word` in any category
pub fn is_known(wordnet: &WordNet, word: &str) -> bool {
    let lemma = normalize_lemma(word);
    PartOfSpeech::ALL
        .iter()
        .any(|pos| wordnet.database().contains_lemma(&lemma, *pos))
}
