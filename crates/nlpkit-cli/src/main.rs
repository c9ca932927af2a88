//! nlpkit CLI - Classic NLP demonstrations
//!
//! Usage:
//!   nlpkit text [--text <TEXT>] [--policy <POLICY>]
//!   nlpkit vectors [--corpus <FILE>] [--word <WORD>]
//!   nlpkit preprocess [--input <CSV>] [--output <DIR>]
//!   nlpkit ner [--seed <N>] [--mode exact] [TEXT]...
//!   nlpkit wordnet [--dir <WORDNET>] [--interactive]
//!   nlpkit translate [--offline] [demo | text | detect | languages]
//!
//! Author: hephaex@gmail.com

mod commands;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use nlpkit_core::{AppConfig, LoggingConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "nlpkit")]
#[command(about = "Tokenization, vectorization, NER, WordNet and translation demonstrations")]
#[command(version)]
struct Cli {
    /// TOML configuration file; environment variables override it
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tokenize, stem and lemmatize a sentence
    Text(commands::text::TextArgs),
    /// Bag of words, normalized counts, TF-IDF and embeddings of a corpus
    Vectors(commands::vectors::VectorsArgs),
    /// Clean, lemmatize, encode and vectorize labelled texts, then save them
    Preprocess(commands::preprocess::PreprocessArgs),
    /// Train, evaluate and apply the entity recognizer
    Ner(commands::ner::NerArgs),
    /// Explore WordNet relations and similarities
    Wordnet(commands::wordnet::WordnetArgs),
    /// Translate between English and Indian languages
    Translate(commands::translate::TranslateArgs),
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?
            .with_env_override()?,
        None => AppConfig::from_env()?,
    };
    Ok(config)
}

fn init_tracing(config: &LoggingConfig, verbose: bool) {
    let level = if verbose { "debug" } else { config.level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_file(config.include_location)
        .with_line_number(config.include_location);

    if config.json_format {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_ref()).context("invalid configuration")?;
    init_tracing(&config.logging, cli.verbose);

    match cli.command {
        Commands::Text(args) => commands::text::run(&config, args),
        Commands::Vectors(args) => commands::vectors::run(&config, args).await,
        Commands::Preprocess(args) => commands::preprocess::run(&config, args),
        Commands::Ner(args) => commands::ner::run(&config, args),
        Commands::Wordnet(args) => commands::wordnet::run(&config, args),
        Commands::Translate(args) => commands::translate::run(&config, args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_subcommands() {
        let cli = Cli::try_parse_from(["nlpkit", "ner", "--seed", "7", "--mode", "exact"]).unwrap();
        assert!(matches!(cli.command, Commands::Ner(_)));

        let cli = Cli::try_parse_from(["nlpkit", "translate", "--offline", "demo"]).unwrap();
        assert!(matches!(cli.command, Commands::Translate(_)));

        assert!(Cli::try_parse_from(["nlpkit", "ner", "--mode", "fuzzy"]).is_err());
        assert!(Cli::try_parse_from(["nlpkit", "text", "--policy", "nope"]).is_err());
    }
}
