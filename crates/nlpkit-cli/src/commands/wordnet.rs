//! `nlpkit wordnet`: word analyses, text analysis, similarities and the explorer

use std::path::PathBuf;

use clap::Args;
use nlpkit_core::AppConfig;
use nlpkit_lexicon::wordnet::is_known;
use nlpkit_lexicon::{
    parse_explorer_input, ExplorerCommand, WordNet, DEMO_WORDS, SAMPLE_TEXT, SIMILARITY_PAIRS,
};

use super::{prompt_line, section};

#[derive(Args)]
pub struct WordnetArgs {
    /// WordNet database directory (default: from configuration)
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Words to analyse (default: the demo words, sentence and pairs)
    words: Vec<String>,

    /// Start the interactive explorer after the reports
    #[arg(short, long)]
    interactive: bool,

    /// Print word analyses as JSON
    #[arg(long)]
    json: bool,
}

fn print_analysis(wordnet: &WordNet, word: &str, json: bool) -> anyhow::Result<()> {
    let analysis = wordnet.analyze_word(word);
    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        println!("{}", analysis.report());
    }
    Ok(())
}

fn demo(wordnet: &WordNet, json: bool) -> anyhow::Result<()> {
    for word in DEMO_WORDS {
        print_analysis(wordnet, word, json)?;
    }

    section("TEXT ANALYSIS");
    println!("{}", wordnet.analyze_text(SAMPLE_TEXT).report());

    section("WORD SIMILARITY");
    for (first, second) in SIMILARITY_PAIRS {
        match wordnet.compare(first, second) {
            Some(report) => print!("{}", report.report()),
            None => println!("\nSimilarity between '{first}' and '{second}': no senses found"),
        }
    }
    Ok(())
}

fn explore(wordnet: &WordNet, json: bool) -> anyhow::Result<()> {
    section("INTERACTIVE WORDNET EXPLORER ('quit' to exit)");

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    while let Some(line) = prompt_line(&mut input, "\nEnter a word to analyze: ")? {
        match parse_explorer_input(&line) {
            ExplorerCommand::Quit => break,
            ExplorerCommand::Empty => continue,
            ExplorerCommand::Analyze(word) => {
                if is_known(wordnet, &word) {
                    print_analysis(wordnet, &word, json)?;
                } else {
                    println!("'{word}' was not found in WordNet");
                }
            }
        }
    }
    Ok(())
}

pub fn run(config: &AppConfig, args: WordnetArgs) -> anyhow::Result<()> {
    let wordnet = match &args.dir {
        Some(dir) => WordNet::open(dir)?,
        None => super::wordnet(config),
    };

    if args.words.is_empty() {
        demo(&wordnet, args.json)?;
    } else {
        for word in &args.words {
            print_analysis(&wordnet, word, args.json)?;
        }
    }

    if args.interactive {
        explore(&wordnet, args.json)?;
    }
    Ok(())
}
