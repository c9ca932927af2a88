//! Queries against the miniature WNDB database in `tests/fixtures/wordnet`

use std::path::PathBuf;

use nlpkit_core::{Lemmatizer, PartOfSpeech};
use nlpkit_lexicon::{
    LexicalDatabase, WordNet, WordNetDb, WordNetLemmatizer, SAMPLE_TEXT, SIMILARITY_PAIRS,
};

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/wordnet")
}

fn wordnet() -> WordNet {
    WordNet::open(fixture_dir()).unwrap()
}

#[test]
fn test_loads_all_categories() {
    let db = WordNetDb::open(fixture_dir()).unwrap();
    assert_eq!(db.synset_count(), 37);
    assert!(db.contains_lemma("dog", PartOfSpeech::Noun));
    assert!(db.contains_lemma("glad", PartOfSpeech::AdjectiveSatellite));
    assert!(db.contains_lemma("happily", PartOfSpeech::Adverb));
    assert!(db.exceptions("happily", PartOfSpeech::Adverb).is_empty());
}

#[test]
fn test_synonyms_of_happy() {
    let wn = wordnet();
    let synonyms = wn.synonyms("happy", None);
    assert_eq!(synonyms, vec!["felicitous", "glad"]);
    assert!(!synonyms.iter().any(|s| s.eq_ignore_ascii_case("happy")));
}

#[test]
fn test_antonyms() {
    let wn = wordnet();
    assert!(wn.antonyms("good", None).contains(&"bad".to_string()));
    assert_eq!(wn.antonyms("beautiful", None), vec!["ugly"]);
    assert_eq!(wn.antonyms("big", None), vec!["small"]);
    assert_eq!(wn.antonyms("happily", None), vec!["unhappily"]);
    assert!(wn.antonyms("dog", None).is_empty());
}

#[test]
fn test_hypernyms_and_hyponyms() {
    let wn = wordnet();
    assert_eq!(wn.hypernyms("dog", None), vec!["canine", "canid"]);
    assert_eq!(wn.hyponyms("dog", None), vec!["puppy"]);
    assert_eq!(wn.hyponyms("animal", None), vec!["carnivore", "goose"]);
    assert_eq!(
        wn.hypernyms("run", Some(PartOfSpeech::Verb)),
        vec!["travel rapidly", "speed", "hurry", "zip"]
    );
}

#[test]
fn test_senses_and_names() {
    let wn = wordnet();
    let names: Vec<String> = wn
        .definitions("happy")
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    assert_eq!(names, vec!["happy.a.01", "felicitous.s.01", "glad.s.01"]);

    let runs = wn.synsets("runs", None);
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0].pos, PartOfSpeech::Noun);
    assert_eq!(runs[1].pos, PartOfSpeech::Verb);

    let (name, definition) = &wn.definitions("car")[0];
    assert_eq!(name, "car.n.01");
    assert_eq!(
        definition,
        "a motor vehicle with four wheels; usually propelled by an internal combustion engine"
    );
    assert_eq!(wn.synonyms("computer", None).len(), 5);
}

#[test]
fn test_similarity_pairs() {
    let wn = wordnet();
    let scores: Vec<Option<f64>> = SIMILARITY_PAIRS
        .iter()
        .map(|(a, b)| wn.similarity(a, b))
        .collect();

    let expected = [Some(0.2), Some(1.0), Some(1.0), None, Some(1.0 / 3.0)];
    for (score, expected) in scores.iter().zip(expected) {
        match (score, expected) {
            (Some(s), Some(e)) => assert!((s - e).abs() < 0.001, "{s} != {e}"),
            (None, None) => {}
            other => panic!("unexpected similarity {other:?}"),
        }
    }
}

#[test]
fn test_verb_similarity_uses_shared_root() {
    let wn = wordnet();
    let walk = wn.synsets("walk", Some(PartOfSpeech::Verb))[0];
    let run = wn.synsets("run", Some(PartOfSpeech::Verb))[0];
    assert_eq!(wn.shortest_path_distance(walk, run), Some(3));
    assert!((wn.path_similarity(walk, run).unwrap() - 0.25).abs() < 0.001);
}

#[test]
fn test_lemmatizer() {
    let lemmatizer = WordNetLemmatizer::new(wordnet());
    let verb = Some(PartOfSpeech::Verb);
    assert_eq!(lemmatizer.lemmatize("running", verb), "run");
    assert_eq!(lemmatizer.lemmatize("ran", verb), "run");
    assert_eq!(lemmatizer.lemmatize("runs", verb), "run");
    assert_eq!(lemmatizer.lemmatize("better", None), "better");
    assert_eq!(lemmatizer.lemmatize("best", None), "best");
    assert_eq!(lemmatizer.lemmatize("geese", None), "goose");
    assert_eq!(lemmatizer.lemmatize("feet", None), "foot");
    assert_eq!(
        lemmatizer.lemmatize("better", Some(PartOfSpeech::Adjective)),
        "good"
    );
}

#[test]
fn test_analyze_sample_text() {
    let wn = wordnet();
    let analysis = wn.analyze_text(SAMPLE_TEXT);
    assert_eq!(
        analysis.words,
        vec!["quick", "brown", "dog", "runs", "happily", "beautiful", "garden"]
    );
    assert_eq!(analysis.analyses.len(), 7);

    let happily = &analysis.analyses[4];
    assert_eq!(happily.antonyms, vec!["unhappily"]);

    let report = analysis.report();
    assert!(report.contains("Extracted words for analysis: quick, brown, dog"));
    assert!(report.contains("Analysis for word: 'GARDEN'"));
}

#[test]
fn test_analysis_serializes() {
    let wn = wordnet();
    let json = serde_json::to_value(wn.analyze_word("dog")).unwrap();
    assert_eq!(json["word"], "dog");
    assert_eq!(json["hyponyms"][0], "puppy");
}
