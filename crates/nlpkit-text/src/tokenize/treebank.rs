//! Penn Treebank word tokenizer
//!
//! Applies the Treebank regex cascade: starting quotes, punctuation,
//! brackets, ending quotes and clitics, then splits on whitespace.

use once_cell::sync::Lazy;
use regex::Regex;

use nlpkit_core::Tokenizer;

type Rule = (Regex, &'static str);

fn rules(specs: &[(&str, &'static str)]) -> Vec<Rule> {
    specs
        .iter()
        .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), *replacement))
        .collect()
}

static STARTING_QUOTES: Lazy<Vec<Rule>> = Lazy::new(|| {
    rules(&[
        (r#"^""#, "``"),
        (r"(``)", " $1 "),
        (r#"([ (\[{<])("|'{2})"#, "$1 `` "),
    ])
});

static PUNCTUATION: Lazy<Vec<Rule>> = Lazy::new(|| {
    rules(&[
        (r"([:,])([^\d])", " $1 $2"),
        (r"([:,])$", " $1 "),
        (r"\.\.\.", " ... "),
        (r"[;@#$%&]", " $0 "),
        (r#"([^\.])(\.)([\]\)}>"']*)\s*$"#, "$1 $2$3 "),
        (r"[?!]", " $0 "),
        (r"([^'])' ", "$1 ' "),
    ])
});

static BRACKETS: Lazy<Vec<Rule>> = Lazy::new(|| {
    rules(&[(r"[\]\[\(\)\{\}<>]", " $0 "), (r"--", " -- ")])
});

static ENDING_QUOTES: Lazy<Vec<Rule>> = Lazy::new(|| {
    rules(&[
        (r"''", " '' "),
        (r#"""#, " '' "),
        (r"([^' ])('[sS]|'[mM]|'[dD]|') ", "$1 $2 "),
        (r"([^' ])('ll|'LL|'re|'RE|'ve|'VE|n't|N'T) ", "$1 $2 "),
    ])
});

static CONTRACTIONS: Lazy<Vec<Rule>> = Lazy::new(|| {
    rules(&[
        (r"(?i)\b(can)(not)\b", " $1 $2 "),
        (r"(?i)\b(d)('ye)\b", " $1 $2 "),
        (r"(?i)\b(gim)(me)\b", " $1 $2 "),
        (r"(?i)\b(gon)(na)\b", " $1 $2 "),
        (r"(?i)\b(got)(ta)\b", " $1 $2 "),
        (r"(?i)\b(lem)(me)\b", " $1 $2 "),
        (r"(?i)\b(more)('n)\b", " $1 $2 "),
        (r"(?i)\b(wan)(na)\s", " $1 $2 "),
        (r"(?i) ('t)(is)\b", " $1 $2 "),
        (r"(?i) ('t)(was)\b", " $1 $2 "),
    ])
});

fn apply(rules: &[Rule], text: String) -> String {
    rules.iter().fold(text, |acc, (regex, replacement)| {
        regex.replace_all(&acc, *replacement).into_owned()
    })
}

/// Treebank-style tokenizer
#[derive(Debug, Clone, Copy, Default)]
pub struct TreebankWordTokenizer {
    convert_parentheses: bool,
}

impl TreebankWordTokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit `-LRB-` / `-RRB-` style tokens for brackets
    pub fn with_convert_parentheses(mut self, convert: bool) -> Self {
        self.convert_parentheses = convert;
        self
    }

    fn convert_bracket(token: &str) -> &str {
        match token {
            "(" => "-LRB-",
            ")" => "-RRB-",
            "[" => "-LSB-",
            "]" => "-RSB-",
            "{" => "-LCB-",
            "}" => "-RCB-",
            other => other,
        }
    }
}

impl Tokenizer for TreebankWordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let mut text = apply(&STARTING_QUOTES, text.to_string());
        text = apply(&PUNCTUATION, text);
        text = apply(&BRACKETS, text);

        // Ending-quote and clitic rules anchor on a trailing space
        text = format!(" {text} ");
        text = apply(&ENDING_QUOTES, text);
        text = apply(&CONTRACTIONS, text);

        text.split_whitespace()
            .map(|token| {
                if self.convert_parentheses {
                    Self::convert_bracket(token).to_string()
                } else {
                    token.to_string()
                }
            })
            .collect()
    }

    fn name(&self) -> &str {
        "treebank"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(text: &str) -> Vec<String> {
        TreebankWordTokenizer::new().tokenize(text)
    }

    #[test]
    fn test_contractions() {
        assert_eq!(
            tokenize("They'll save and invest more."),
            vec!["They", "'ll", "save", "and", "invest", "more", "."]
        );
        assert_eq!(tokenize("I can't go"), vec!["I", "ca", "n't", "go"]);
        assert_eq!(tokenize("I cannot go"), vec!["I", "can", "not", "go"]);
    }

    #[test]
    fn test_sample_sentence() {
        let tokens = tokenize(
            "Hello! I'm working on NLP assignments. Natural Language Processing is amazing! #NLP @student",
        );
        assert_eq!(
            tokens,
            vec![
                "Hello",
                "!",
                "I",
                "'m",
                "working",
                "on",
                "NLP",
                "assignments.",
                "Natural",
                "Language",
                "Processing",
                "is",
                "amazing",
                "!",
                "#",
                "NLP",
                "@",
                "student"
            ]
        );
    }

    #[test]
    fn test_only_final_period_split() {
        let tokens = tokenize("Mr. Smith went home.");
        assert_eq!(tokens, vec!["Mr.", "Smith", "went", "home", "."]);
    }

    #[test]
    fn test_quotes() {
        let tokens = tokenize(r#""Hi," she said."#);
        assert_eq!(tokens, vec!["``", "Hi", ",", "''", "she", "said", "."]);
    }

    #[test]
    fn test_brackets() {
        assert_eq!(tokenize("(a) b"), vec!["(", "a", ")", "b"]);
        let converted = TreebankWordTokenizer::new()
            .with_convert_parentheses(true)
            .tokenize("(a)");
        assert_eq!(converted, vec!["-LRB-", "a", "-RRB-"]);
    }

    #[test]
    fn test_numbers_with_commas_kept() {
        assert_eq!(tokenize("It cost 1,000 dollars"), vec!["It", "cost", "1,000", "dollars"]);
    }
}
