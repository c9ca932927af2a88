//! In-memory lexical database
//!
//! Lemmas are indexed in insertion order, so the first synset added for a
//! lemma becomes its first sense.

use nlpkit_core::PartOfSpeech;

use crate::store::Store;
use crate::{LexicalDatabase, Synset, SynsetId};

/// Lexicon assembled in code
#[derive(Debug, Default, Clone)]
pub struct MemoryLexicon {
    store: Store,
}

impl MemoryLexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a synset and index each of its lemmas
    pub fn with_synset(mut self, synset: Synset) -> Self {
        self.add_synset(synset);
        self
    }

    /// Register an irregular form, e.g. `geese` -> `goose`
    pub fn with_exception(mut self, pos: PartOfSpeech, form: &str, base: &str) -> Self {
        self.store.add_exception(pos, form, base);
        self
    }

    pub fn add_synset(&mut self, synset: Synset) {
        for lemma in &synset.lemmas {
            self.store.push_index(lemma, synset.id.pos, synset.id);
        }
        self.store.insert_synset(synset);
    }
}

impl LexicalDatabase for MemoryLexicon {
    fn lookup(&self, lemma: &str, pos: PartOfSpeech) -> &[SynsetId] {
        self.store.lookup(lemma, pos)
    }

    fn synset(&self, id: SynsetId) -> Option<&Synset> {
        self.store.synset(id)
    }

    fn exceptions(&self, form: &str, pos: PartOfSpeech) -> &[String] {
        self.store.exceptions(form, pos)
    }

    fn synset_count(&self) -> usize {
        self.store.synset_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_follows_insertion_order() {
        let first = SynsetId::new(PartOfSpeech::Noun, 10);
        let second = SynsetId::new(PartOfSpeech::Noun, 20);
        let lexicon = MemoryLexicon::new()
            .with_synset(Synset::new(
                first,
                PartOfSpeech::Noun,
                vec!["bank".to_string()],
                "sloping land beside a body of water",
            ))
            .with_synset(Synset::new(
                second,
                PartOfSpeech::Noun,
                vec!["bank".to_string(), "depository_financial_institution".to_string()],
                "a financial institution",
            ));

        assert_eq!(lexicon.lookup("bank", PartOfSpeech::Noun), &[first, second]);
        assert_eq!(
            lexicon.lookup("Depository Financial Institution", PartOfSpeech::Noun),
            &[second]
        );
        assert!(lexicon.lookup("bank", PartOfSpeech::Verb).is_empty());
        assert_eq!(lexicon.synset_count(), 2);
    }

    #[test]
    fn test_exceptions_lowercased() {
        let lexicon = MemoryLexicon::new().with_exception(PartOfSpeech::Noun, "Geese", "goose");
        assert_eq!(lexicon.exceptions("geese", PartOfSpeech::Noun), &["goose"]);
        assert!(lexicon.exceptions("geese", PartOfSpeech::Verb).is_empty());
    }
}
