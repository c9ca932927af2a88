//! WordNet morphology
//!
//! Irregular forms come from the exception lists; regular inflections are
//! undone with the detachment rules of each category. A candidate survives
//! only if the index knows it for that part of speech.

use std::collections::HashSet;

use nlpkit_core::PartOfSpeech;

use crate::store::normalize_lemma;
use crate::LexicalDatabase;

const NOUN_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ses", "s"),
    ("ves", "f"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

const VERB_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ies", "y"),
    ("es", "e"),
    ("es", ""),
    ("ed", "e"),
    ("ed", ""),
    ("ing", "e"),
    ("ing", ""),
];

const ADJECTIVE_RULES: &[(&str, &str)] = &[("er", ""), ("est", ""), ("er", "e"), ("est", "e")];

/// Detachment rules for a part of speech
pub fn detachment_rules(pos: PartOfSpeech) -> &'static [(&'static str, &'static str)] {
    match pos {
        PartOfSpeech::Noun => NOUN_RULES,
        PartOfSpeech::Verb => VERB_RULES,
        PartOfSpeech::Adjective | PartOfSpeech::AdjectiveSatellite => ADJECTIVE_RULES,
        PartOfSpeech::Adverb => &[],
    }
}

fn apply_rules(forms: &[String], pos: PartOfSpeech) -> Vec<String> {
    forms
        .iter()
        .flat_map(|form| {
            detachment_rules(pos).iter().filter_map(move |(suffix, replacement)| {
                form.strip_suffix(suffix)
                    .map(|stem| format!("{stem}{replacement}"))
            })
        })
        .collect()
}

fn known_forms(db: &dyn LexicalDatabase, forms: Vec<String>, pos: PartOfSpeech) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for form in forms {
        if db.contains_lemma(&form, pos) && !found.contains(&form) {
            found.push(form);
        }
    }
    found
}

/// Base forms of `form` known to the database for `pos`, in candidate order
///
/// The form itself comes first. When the exception list covers the form,
/// only its listed bases are tried. Otherwise the detachment rules are
/// applied repeatedly to the new candidates until one is known or the
/// rules yield nothing more.
pub fn morphy(db: &dyn LexicalDatabase, form: &str, pos: PartOfSpeech) -> Vec<String> {
    let form = normalize_lemma(form);
    if form.is_empty() {
        return Vec::new();
    }

    let exceptions = db.exceptions(&form, pos);
    if !exceptions.is_empty() {
        let mut candidates = vec![form];
        candidates.extend(exceptions.iter().cloned());
        return known_forms(db, candidates, pos);
    }

    let mut forms = apply_rules(std::slice::from_ref(&form), pos);
    let mut candidates = vec![form];
    candidates.extend(forms.iter().cloned());
    let found = known_forms(db, candidates, pos);
    if !found.is_empty() {
        return found;
    }

    let mut seen: HashSet<String> = forms.iter().cloned().collect();
    while !forms.is_empty() {
        forms = apply_rules(&forms, pos)
            .into_iter()
            .filter(|candidate| seen.insert(candidate.clone()))
            .collect();
        let found = known_forms(db, forms.clone(), pos);
        if !found.is_empty() {
            return found;
        }
    }
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryLexicon, Synset, SynsetId};

    fn lexicon() -> MemoryLexicon {
        let mut offset = 0;
        let mut entry = |pos: PartOfSpeech, lemma: &str| {
            offset += 100;
            Synset::new(
                SynsetId::new(pos, offset),
                pos,
                vec![lemma.to_string()],
                lemma,
            )
        };
        MemoryLexicon::new()
            .with_synset(entry(PartOfSpeech::Noun, "box"))
            .with_synset(entry(PartOfSpeech::Noun, "church"))
            .with_synset(entry(PartOfSpeech::Noun, "city"))
            .with_synset(entry(PartOfSpeech::Noun, "goose"))
            .with_synset(entry(PartOfSpeech::Verb, "make"))
            .with_synset(entry(PartOfSpeech::Verb, "walk"))
            .with_synset(entry(PartOfSpeech::Adjective, "large"))
            .with_exception(PartOfSpeech::Noun, "geese", "goose")
    }

    #[test]
    fn test_noun_rules() {
        let db = lexicon();
        assert_eq!(morphy(&db, "boxes", PartOfSpeech::Noun), vec!["box"]);
        assert_eq!(morphy(&db, "churches", PartOfSpeech::Noun), vec!["church"]);
        assert_eq!(morphy(&db, "cities", PartOfSpeech::Noun), vec!["city"]);
    }

    #[test]
    fn test_verb_rules() {
        let db = lexicon();
        assert_eq!(morphy(&db, "making", PartOfSpeech::Verb), vec!["make"]);
        assert_eq!(morphy(&db, "walked", PartOfSpeech::Verb), vec!["walk"]);
        assert_eq!(morphy(&db, "walks", PartOfSpeech::Verb), vec!["walk"]);
    }

    #[test]
    fn test_adjective_rules_apply_to_satellites() {
        let db = lexicon();
        assert_eq!(morphy(&db, "larger", PartOfSpeech::Adjective), vec!["large"]);
        assert_eq!(
            morphy(&db, "largest", PartOfSpeech::AdjectiveSatellite),
            vec!["large"]
        );
    }

    #[test]
    fn test_rules_repeat_until_a_form_is_known() {
        let db = lexicon();
        // walkings -> walking -> walk
        assert_eq!(morphy(&db, "walkings", PartOfSpeech::Verb), vec!["walk"]);
        // boxeses -> boxes -> box
        assert_eq!(morphy(&db, "boxeses", PartOfSpeech::Noun), vec!["box"]);
        assert!(morphy(&db, "sssss", PartOfSpeech::Noun).is_empty());
    }

    #[test]
    fn test_exceptions_replace_rules() {
        let db = lexicon();
        assert_eq!(morphy(&db, "Geese", PartOfSpeech::Noun), vec!["goose"]);
    }

    #[test]
    fn test_unknown_form() {
        let db = lexicon();
        assert!(morphy(&db, "xyzzy", PartOfSpeech::Noun).is_empty());
        assert!(morphy(&db, "", PartOfSpeech::Noun).is_empty());
        assert!(morphy(&db, "boxes", PartOfSpeech::Adverb).is_empty());
    }
}
