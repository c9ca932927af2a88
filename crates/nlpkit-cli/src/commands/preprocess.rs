//! `nlpkit preprocess`: prepare labelled texts for a classifier and save the artifacts

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use nlpkit_core::AppConfig;
use nlpkit_lexicon::WordNetLemmatizer;
use nlpkit_preprocess::{read_records, sample_records, ArtifactStore, PreprocessPipeline};
use tracing::info;

use super::wordnet;

#[derive(Args)]
pub struct PreprocessArgs {
    /// CSV with `text,label` columns (default: the built-in sample)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Output directory (default: from configuration)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Vocabulary cap of the TF-IDF vectorizer (default: from configuration)
    #[arg(long)]
    max_features: Option<usize>,
}

pub fn run(config: &AppConfig, args: PreprocessArgs) -> anyhow::Result<()> {
    let records = match &args.input {
        Some(path) => read_records(path)?,
        None => sample_records(),
    };
    let output_dir = args
        .output
        .unwrap_or_else(|| config.preprocess.output_dir.clone());
    let max_features = args.max_features.unwrap_or(config.preprocess.max_features);

    let lemmatizer = Arc::new(WordNetLemmatizer::new(wordnet(config)));
    let pipeline = PreprocessPipeline::new(lemmatizer).with_max_features(max_features);
    let output = pipeline.run(&records)?;

    println!("Processed records:");
    for record in &output.records {
        println!(
            "  [{}] {:<12} {}",
            record.encoded_label, record.label, record.processed_text
        );
    }
    println!();
    println!("Classes: {:?}", output.encoder.classes());
    println!("Features: {:?}", output.vectorizer.feature_names()?);
    println!();

    let store = ArtifactStore::new(&output_dir);
    let manifest = store.save(&output)?;
    info!(dir = %output_dir.display(), files = manifest.files.len(), "Saved artifacts");

    println!("Preprocessing completed successfully!");
    println!("{}", output.summary());
    println!("Files written to {}:", store.dir().display());
    for file in &manifest.files {
        println!("  {file}");
    }
    Ok(())
}
