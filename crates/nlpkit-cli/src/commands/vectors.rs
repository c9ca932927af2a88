//! `nlpkit vectors`: count, normalized count, TF-IDF and embedding views of a corpus

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use nlpkit_core::AppConfig;
use nlpkit_vector::{
    create_embedding_client, sample_corpus, CountVectorizer, TfidfVectorizer, Vectorizer,
    WordVectors,
};

#[derive(Args)]
pub struct VectorsArgs {
    /// Text file with one document per line (default: the four sample documents)
    #[arg(long)]
    corpus: Option<PathBuf>,

    /// Word whose embedding and nearest neighbours are shown
    #[arg(long, default_value = "document")]
    word: String,

    /// Decimal places of the printed weights
    #[arg(long, default_value_t = 6)]
    precision: usize,
}

fn read_corpus(path: &PathBuf) -> anyhow::Result<Vec<String>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

pub async fn run(config: &AppConfig, args: VectorsArgs) -> anyhow::Result<()> {
    let documents = match &args.corpus {
        Some(path) => read_corpus(path)?,
        None => sample_corpus(),
    };

    println!("=== Bag of Words - Count Occurrence ===");
    let counts = CountVectorizer::new().fit_transform(&documents)?;
    println!("{}", counts.render(args.precision));

    println!("=== Bag of Words - Normalized Count ===");
    println!("{}", counts.normalized().render(args.precision));

    println!("=== TF-IDF ===");
    let tfidf = TfidfVectorizer::new().fit_transform(&documents)?;
    println!("{}", tfidf.render(args.precision));

    println!("=== Word Embeddings ===");
    let client = create_embedding_client(&config.embedding)?;
    let vectors = WordVectors::build(client.as_ref(), &documents, config.embedding.min_count)
        .await
        .context("building word vectors")?;
    println!("Provider: {} (dimension {})", client.name(), vectors.dimension());
    println!("Vocabulary: {:?}", vectors.vocabulary());
    println!();

    let word = args.word.to_lowercase();
    match vectors.get(&word) {
        Some(embedding) => {
            let shown: Vec<String> = embedding.iter().take(10).map(|v| format!("{v:.4}")).collect();
            println!("Embedding for '{word}' (first {} of {}):", shown.len(), embedding.len());
            println!("[{}]", shown.join(", "));
            println!();
            println!("Most similar to '{word}':");
            for (other, score) in vectors.most_similar(&word, 5)? {
                println!("  {other:<15} {score:.4}");
            }
        }
        None => println!("'{word}' is not in the vocabulary"),
    }
    println!();

    println!("Document embeddings (averaged word vectors):");
    for (i, document) in documents.iter().enumerate() {
        let embedding = vectors.document_embedding(document);
        println!("Document {} embedding shape: ({},)", i + 1, embedding.len());
    }
    Ok(())
}
