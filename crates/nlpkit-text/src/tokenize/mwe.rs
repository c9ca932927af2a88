//! Multi-word expression merging

use std::collections::HashMap;

use nlpkit_core::Tokenizer;

use super::WordPunctTokenizer;

/// Merges configured multi-word expressions into single `_`-joined tokens
///
/// Matching is greedy: from each position the longest configured expression
/// wins, and matched tokens are consumed.
#[derive(Debug, Clone)]
pub struct MweTokenizer {
    /// First token -> expressions starting with it, longest first
    expressions: HashMap<String, Vec<Vec<String>>>,
    separator: String,
}

impl MweTokenizer {
    pub fn new(expressions: Vec<Vec<String>>) -> Self {
        let mut tokenizer = Self {
            expressions: HashMap::new(),
            separator: "_".to_string(),
        };
        for expression in expressions {
            tokenizer.add_expression(expression);
        }
        tokenizer
    }

    /// Convenience constructor from string slices
    pub fn from_phrases(phrases: &[&[&str]]) -> Self {
        Self::new(
            phrases
                .iter()
                .map(|phrase| phrase.iter().map(|w| w.to_string()).collect())
                .collect(),
        )
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Register an expression; single-token and empty expressions are ignored
    pub fn add_expression(&mut self, expression: Vec<String>) {
        if expression.len() < 2 {
            return;
        }
        let candidates = self
            .expressions
            .entry(expression[0].clone())
            .or_default();
        if !candidates.contains(&expression) {
            candidates.push(expression);
            candidates.sort_by(|a, b| b.len().cmp(&a.len()));
        }
    }

    /// Merge expressions in an already tokenized sequence
    pub fn merge(&self, tokens: &[String]) -> Vec<String> {
        let mut merged = Vec::with_capacity(tokens.len());
        let mut i = 0;

        while i < tokens.len() {
            let matched = self.expressions.get(&tokens[i]).and_then(|candidates| {
                candidates
                    .iter()
                    .find(|expression| tokens[i..].starts_with(expression.as_slice()))
            });

            match matched {
                Some(expression) => {
                    merged.push(expression.join(&self.separator));
                    i += expression.len();
                }
                None => {
                    merged.push(tokens[i].clone());
                    i += 1;
                }
            }
        }

        merged
    }
}

impl Default for MweTokenizer {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Tokenizer for MweTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        self.merge(&WordPunctTokenizer.tokenize(text))
    }

    fn name(&self) -> &str {
        "mwe"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MweTokenizer {
        MweTokenizer::from_phrases(&[&["Natural", "Language"], &["Language", "Processing"]])
    }

    #[test]
    fn test_overlapping_expressions_consume_greedily() {
        let tokens = sample().tokenize("Natural Language Processing is amazing");
        assert_eq!(
            tokens,
            vec!["Natural_Language", "Processing", "is", "amazing"]
        );
    }

    #[test]
    fn test_longest_match_wins() {
        let mut tokenizer = sample();
        tokenizer.add_expression(vec![
            "Natural".to_string(),
            "Language".to_string(),
            "Processing".to_string(),
        ]);
        let tokens = tokenizer.tokenize("Natural Language Processing");
        assert_eq!(tokens, vec!["Natural_Language_Processing"]);
    }

    #[test]
    fn test_partial_match_left_alone() {
        let tokens = sample().tokenize("Natural selection");
        assert_eq!(tokens, vec!["Natural", "selection"]);
    }

    #[test]
    fn test_custom_separator() {
        let tokenizer = sample().with_separator(" ");
        let merged = tokenizer.merge(&["Language".to_string(), "Processing".to_string()]);
        assert_eq!(merged, vec!["Language Processing"]);
    }
}
