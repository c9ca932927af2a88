//! Word and text analysis reports
//!
//! Author: hephaex@gmail.com


use nlpkit_core::{is_stopword, Tokenizer};
use nlpkit_text::TreebankWordTokenizer;
use serde::{Deserialize, Serialize};

/// Words analysed by the explorer demo
pub const DEMO_WORDS: [&str; 5] = ["happy", "dog", "computer", "run", "beautiful"];

/// Sentence analysed by the explorer demo
pub const SAMPLE_TEXT: &str = "The quick brown dog runs happily through the beautiful garden.";

/// Word pairs compared by the explorer demo
pub const SIMILARITY_PAIRS: [(&str, &str); 5] = [
    ("dog", "cat"),
    ("car", "automobile"),
    ("big", "large"),
    ("good", "bad"),
    ("walk", "run"),
];

const RULE: &str = "============================================================";
const DEFINITIONS_SHOWN: usize = 3;
const RELATIONS_SHOWN: usize = 10;

// ============================================================================
// Word Analysis
// ============================================================================

/// Every relation found for one word
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordAnalysis {
    pub word: String,
    /// `(synset name, definition)` per sense
    pub definitions: Vec<(String, String)>,
    pub synonyms: Vec<String>,
    pub antonyms: Vec<String>,
    pub hypernyms: Vec<String>,
    pub hyponyms: Vec<String>,
}

impl WordAnalysis {
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Console report: first three definitions, first ten of each relation
    pub fn report(&self) -> String {
        let mut lines = vec![
            format!("\n{RULE}"),
            format!("Analysis for word: '{}'", self.word.to_uppercase()),
            RULE.to_string(),
        ];

        if self.definitions.is_empty() {
            lines.push("\nNo WordNet senses found.".to_string());
        } else {
            lines.push(format!("\nDefinitions ({} senses):", self.definitions.len()));
            for (i, (name, definition)) in
                self.definitions.iter().take(DEFINITIONS_SHOWN).enumerate()
            {
                lines.push(format!("  {}. [{name}] {definition}", i + 1));
            }
        }

        for (title, items) in [
            ("Synonyms", &self.synonyms),
            ("Antonyms", &self.antonyms),
            ("Hypernyms", &self.hypernyms),
            ("Hyponyms", &self.hyponyms),
        ] {
            lines.push(format!("\n{title} ({}): {}", items.len(), relation_line(items)));
        }
        terminate_lines(&lines)
    }
}

fn terminate_lines(lines: &[String]) -> String {
    lines.iter().map(|line| format!("{line}\n")).collect()
}

fn relation_line(items: &[String]) -> String {
    if items.is_empty() {
        "None found".to_string()
    } else {
        items
            .iter()
            .take(RELATIONS_SHOWN)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

// ============================================================================
// Text Analysis
// ============================================================================

/// Analyses of the content words of a text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAnalysis {
    pub text: String,
    /// Content words in first-seen order
    pub words: Vec<String>,
    pub analyses: Vec<WordAnalysis>,
}

impl TextAnalysis {
    /// Lowercase, treebank-tokenize, keep alphabetic non-stopwords, dedupe
    pub fn extract_words(text: &str) -> Vec<String> {
        let tokenizer = TreebankWordTokenizer::new();
        let mut words: Vec<String> = Vec::new();
        for token in tokenizer.tokenize(&text.to_lowercase()) {
            let alphabetic = !token.is_empty() && token.chars().all(char::is_alphabetic);
            if alphabetic && !is_stopword(&token) && !words.contains(&token) {
                words.push(token);
            }
        }
        words
    }

    pub fn report(&self) -> String {
        let mut out = terminate_lines(&[
            format!("\n{RULE}"),
            "TEXT ANALYSIS".to_string(),
            RULE.to_string(),
            format!("\nOriginal text: {}", self.text),
            format!("\nExtracted words for analysis: {}", self.words.join(", ")),
        ]);
        for analysis in &self.analyses {
            out.push_str(&analysis.report());
        }
        out
    }
}

// ============================================================================
// Similarity
// ============================================================================

/// Path similarity between the first senses of two words
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityReport {
    pub word1: String,
    pub word2: String,
    /// `None` when the senses share no hypernym path
    pub score: Option<f64>,
    pub synset1: String,
    pub synset2: String,
    pub definition1: String,
    pub definition2: String,
}

impl SimilarityReport {
    pub fn report(&self) -> String {
        let score = match self.score {
            Some(score) => format!("{score:.3}"),
            None => "no path".to_string(),
        };
        format!(
            "\nSimilarity between '{}' and '{}': {score}\n  {}: {}\n  {}: {}\n",
            self.word1, self.word2, self.word1, self.definition1, self.word2, self.definition2
        )
    }
}

// ============================================================================
// Interactive Explorer
// ============================================================================

/// One line of explorer input, interpreted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExplorerCommand {
    Quit,
    /// Blank input; prompt again
    Empty,
    Analyze(String),
}

pub fn parse_explorer_input(line: &str) -> ExplorerCommand {
    let input = line.trim();
    match input.to_lowercase().as_str() {
        "quit" | "exit" | "q" => ExplorerCommand::Quit,
        "" => ExplorerCommand::Empty,
        _ => ExplorerCommand::Analyze(input.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis() -> WordAnalysis {
        WordAnalysis {
            word: "happy".to_string(),
            definitions: vec![
                ("happy.a.01".to_string(), "enjoying joy".to_string()),
                ("felicitous.s.02".to_string(), "marked by good fortune".to_string()),
                ("glad.s.02".to_string(), "eagerly disposed".to_string()),
                ("happy.x.04".to_string(), "a fourth sense".to_string()),
            ],
            synonyms: vec!["felicitous".to_string(), "glad".to_string()],
            antonyms: vec!["unhappy".to_string()],
            hypernyms: Vec::new(),
            hyponyms: (0..12).map(|i| format!("h{i}")).collect(),
        }
    }

    #[test]
    fn test_word_report() {
        let report = analysis().report();
        assert!(report.contains("Analysis for word: 'HAPPY'"));
        assert!(report.contains("Definitions (4 senses):"));
        assert!(report.contains("  3. [glad.s.02] eagerly disposed"));
        assert!(!report.contains("a fourth sense"));
        assert!(report.contains("Synonyms (2): felicitous, glad"));
        assert!(report.contains("Hypernyms (0): None found"));
        assert!(report.contains("Hyponyms (12): h0"));
        assert!(report.contains("h9"));
        assert!(!report.contains("h10"));
    }

    #[test]
    fn test_reports_end_every_line() {
        let report = analysis().report();
        let header = format!("\n{RULE}\nAnalysis for word: 'HAPPY'\n{RULE}\n");
        assert!(report.starts_with(&header));
        assert!(report.ends_with("Hyponyms (12): h0, h1, h2, h3, h4, h5, h6, h7, h8, h9\n"));

        let text = TextAnalysis {
            text: "happy".to_string(),
            words: vec!["happy".to_string()],
            analyses: vec![analysis()],
        };
        let report = text.report();
        assert!(report.starts_with(&format!("\n{RULE}\nTEXT ANALYSIS\n{RULE}\n")));
        let words_then_word_report = format!("Extracted words for analysis: happy\n\n{RULE}\nAnalysis");
        assert!(report.contains(&words_then_word_report));
    }

    #[test]
    fn test_extract_words() {
        assert_eq!(
            TextAnalysis::extract_words(SAMPLE_TEXT),
            vec!["quick", "brown", "dog", "runs", "happily", "beautiful", "garden"]
        );
        assert_eq!(
            TextAnalysis::extract_words("Dogs and dogs, 42 dogs!"),
            vec!["dogs"]
        );
        assert!(TextAnalysis::extract_words("").is_empty());
    }

    #[test]
    fn test_similarity_report() {
        let report = SimilarityReport {
            word1: "dog".to_string(),
            word2: "cat".to_string(),
            score: Some(0.2),
            synset1: "dog.n.01".to_string(),
            synset2: "cat.n.01".to_string(),
            definition1: "a canine".to_string(),
            definition2: "a feline".to_string(),
        };
        assert!(report.report().contains("Similarity between 'dog' and 'cat': 0.200"));
        let unconnected = SimilarityReport {
            score: None,
            ..report
        };
        assert!(unconnected.report().contains("no path"));
    }

    #[test]
    fn test_explorer_input() {
        assert_eq!(parse_explorer_input("  QUIT "), ExplorerCommand::Quit);
        assert_eq!(parse_explorer_input("exit"), ExplorerCommand::Quit);
        assert_eq!(parse_explorer_input("q"), ExplorerCommand::Quit);
        assert_eq!(parse_explorer_input("   "), ExplorerCommand::Empty);
        assert_eq!(
            parse_explorer_input(" Happy "),
            ExplorerCommand::Analyze("Happy".to_string())
        );
    }
}
