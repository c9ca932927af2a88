//! `nlpkit text`: tokenization policies, stemmers and the lemmatizer

use clap::Args;
use nlpkit_core::{AppConfig, Lemmatizer, PartOfSpeech};
use nlpkit_lexicon::WordNetLemmatizer;
use nlpkit_text::{StemmerKind, TokenizerPolicy};

use super::{format_list, rule, wordnet};

pub const SAMPLE_TEXT: &str =
    "Hello! I'm working on NLP assignments. Natural Language Processing is amazing! #NLP @student";

pub const STEM_WORDS: [&str; 7] = [
    "working", "works", "worked", "running", "runs", "easily", "fairly",
];

pub const LEMMA_WORDS: [&str; 7] = ["running", "ran", "runs", "better", "best", "geese", "feet"];

const VERB_WORDS: [&str; 3] = ["running", "ran", "runs"];

#[derive(Args)]
pub struct TextArgs {
    /// Sentence to tokenize
    #[arg(long, default_value = SAMPLE_TEXT)]
    text: String,

    /// Only run this tokenization policy
    #[arg(long)]
    policy: Option<TokenizerPolicy>,
}

/// Multi-word expressions merged by the MWE policy
pub fn mwe_expressions() -> Vec<Vec<String>> {
    [["Natural", "Language"], ["Language", "Processing"]]
        .iter()
        .map(|pair| pair.iter().map(|w| w.to_string()).collect())
        .collect()
}

pub fn run(config: &AppConfig, args: TextArgs) -> anyhow::Result<()> {
    println!("Original Text:");
    println!("{}", args.text);
    println!("\n{}\n", rule());

    let policies: Vec<TokenizerPolicy> = match args.policy {
        Some(policy) => vec![policy],
        None => TokenizerPolicy::ALL.to_vec(),
    };
    let expressions = mwe_expressions();
    for (i, policy) in policies.iter().enumerate() {
        let tokenizer = policy.build(&expressions);
        println!("{}. {} TOKENIZATION:", i + 1, policy.as_str().to_uppercase());
        println!("{}", format_list(&tokenizer.tokenize(&args.text)));
        println!("\n{}\n", rule());
    }
    if args.policy.is_some() {
        return Ok(());
    }

    for kind in [StemmerKind::Porter, StemmerKind::Snowball] {
        let stemmer = kind.build();
        let stems: Vec<String> = STEM_WORDS.iter().map(|w| stemmer.stem(w)).collect();
        println!("{} STEMMER:", stemmer.name().to_uppercase());
        println!("Original: {}", format_list(&STEM_WORDS));
        println!("Stemmed:  {}", format_list(&stems));
        println!("\n{}\n", rule());
    }

    let lemmatizer = WordNetLemmatizer::new(wordnet(config));
    let lemmas: Vec<String> = LEMMA_WORDS
        .iter()
        .map(|word| {
            let pos = VERB_WORDS.contains(word).then_some(PartOfSpeech::Verb);
            lemmatizer.lemmatize(word, pos)
        })
        .collect();
    println!("LEMMATIZATION (WordNet):");
    println!("Original:   {}", format_list(&LEMMA_WORDS));
    println!("Lemmatized: {}", format_list(&lemmas));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mwe_policy_merges_sample_phrases() {
        let tokenizer = TokenizerPolicy::Mwe.build(&mwe_expressions());
        let tokens = tokenizer.tokenize(SAMPLE_TEXT);
        assert!(tokens.contains(&"Natural_Language".to_string()));
        assert!(!tokens.contains(&"Language_Processing".to_string()));
    }
}
