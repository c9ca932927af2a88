//! Shared in-memory tables behind both database implementations

use std::collections::HashMap;

use nlpkit_core::PartOfSpeech;

use crate::{Synset, SynsetId};

#[derive(Debug, Default, Clone)]
pub(crate) struct Store {
    index: HashMap<(PartOfSpeech, String), Vec<SynsetId>>,
    synsets: HashMap<SynsetId, Synset>,
    exceptions: HashMap<(PartOfSpeech, String), Vec<String>>,
}

pub(crate) fn normalize_lemma(lemma: &str) -> String {
    lemma.trim().to_lowercase().replace(' ', "_")
}

impl Store {
    pub fn lookup(&self, lemma: &str, pos: PartOfSpeech) -> &[SynsetId] {
        self.index
            .get(&(pos.file_pos(), normalize_lemma(lemma)))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn synset(&self, id: SynsetId) -> Option<&Synset> {
        self.synsets.get(&id)
    }

    pub fn exceptions(&self, form: &str, pos: PartOfSpeech) -> &[String] {
        self.exceptions
            .get(&(pos.file_pos(), form.to_lowercase()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn synset_count(&self) -> usize {
        self.synsets.len()
    }

    /// Replace the sense list of a lemma
    pub fn set_index(&mut self, lemma: &str, pos: PartOfSpeech, ids: Vec<SynsetId>) {
        self.index
            .insert((pos.file_pos(), normalize_lemma(lemma)), ids);
    }

    /// Append a sense to a lemma unless already present
    pub fn push_index(&mut self, lemma: &str, pos: PartOfSpeech, id: SynsetId) {
        let senses = self
            .index
            .entry((pos.file_pos(), normalize_lemma(lemma)))
            .or_default();
        if !senses.contains(&id) {
            senses.push(id);
        }
    }

    pub fn insert_synset(&mut self, synset: Synset) {
        self.synsets.insert(synset.id, synset);
    }

    pub fn add_exception(&mut self, pos: PartOfSpeech, form: &str, base: &str) {
        let bases = self
            .exceptions
            .entry((pos.file_pos(), form.to_lowercase()))
            .or_default();
        let base = base.to_lowercase();
        if !bases.contains(&base) {
            bases.push(base);
        }
    }
}
