//! End-to-end preprocessing with WordNet lemmatization and persistence

use std::sync::Arc;

use nlpkit_core::PartOfSpeech;
use nlpkit_lexicon::{MemoryLexicon, Synset, SynsetId, WordNet, WordNetLemmatizer};
use nlpkit_preprocess::{
    artifacts::{DATA_FILE, MANIFEST_FILE, MATRIX_FILE},
    clean_text, sample_records, ArtifactStore, PreprocessPipeline,
};
use proptest::prelude::*;

fn lemmatizer() -> Arc<WordNetLemmatizer> {
    let lexicon = MemoryLexicon::new()
        .with_synset(Synset::new(
            SynsetId::new(PartOfSpeech::Noun, 100),
            PartOfSpeech::Noun,
            vec!["number".to_string()],
            "a concept of quantity",
        ))
        .with_synset(Synset::new(
            SynsetId::new(PartOfSpeech::Noun, 200),
            PartOfSpeech::Noun,
            vec!["example".to_string()],
            "an item of information that is typical of a class",
        ));
    Arc::new(WordNetLemmatizer::new(WordNet::new(lexicon)))
}

#[test]
fn test_sample_pipeline_with_wordnet() {
    let output = PreprocessPipeline::new(lemmatizer())
        .run(&sample_records())
        .unwrap();
    assert_eq!(output.records[1].processed_text, "another example number");
    assert_eq!(output.encoder.classes(), &["negative", "positive"]);
    assert_eq!(output.tfidf_shape(), (3, 7));
}

#[test]
fn test_save_and_load_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let store = ArtifactStore::new(dir.path().join("output"));

    let output = PreprocessPipeline::new(lemmatizer())
        .run(&sample_records())
        .unwrap();
    let manifest = store.save(&output).unwrap();

    for file in [DATA_FILE, MATRIX_FILE, MANIFEST_FILE] {
        assert!(store.path(file).exists(), "missing {file}");
    }
    assert_eq!(manifest.files.len(), 4);
    assert_eq!(manifest.tfidf_shape, (3, 7));

    let csv = std::fs::read_to_string(store.path(DATA_FILE)).unwrap();
    assert!(csv.starts_with("text,label,cleaned_text,processed_text,encoded_label"));

    let loaded = store.load().unwrap();
    assert_eq!(loaded.records, output.records);
    assert_eq!(loaded.encoder, output.encoder);
    assert_eq!(loaded.manifest, manifest);
    assert_eq!(loaded.tfidf.dim(), output.tfidf.dim());
    for (a, b) in loaded.tfidf.iter().zip(output.tfidf.iter()) {
        assert!((a - b).abs() < 1e-12);
    }
    assert_eq!(
        loaded.vectorizer.feature_names().unwrap(),
        output.vectorizer.feature_names().unwrap()
    );
}

#[test]
fn test_load_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    assert!(ArtifactStore::new(dir.path().join("nothing")).load().is_err());
}

proptest! {
    #[test]
    fn test_clean_text_alphabet(text in "\\PC{0,60}") {
        let cleaned = clean_text(&text);
        prop_assert!(cleaned
            .chars()
            .all(|c| c.is_ascii_lowercase() || c == ' '));
        prop_assert!(!cleaned.contains("  "));
        prop_assert_eq!(cleaned.trim(), cleaned.as_str());
    }
}
