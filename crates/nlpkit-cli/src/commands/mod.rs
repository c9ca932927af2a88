//! Subcommand implementations

pub mod ner;
pub mod preprocess;
pub mod text;
pub mod translate;
pub mod vectors;
pub mod wordnet;

use std::io::{BufRead, Write};

use nlpkit_core::AppConfig;
use nlpkit_lexicon::WordNet;

const RULE_WIDTH: usize = 80;

pub(crate) fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Heading framed by rules
pub(crate) fn section(title: &str) {
    println!("\n{}", rule());
    println!("{title}");
    println!("{}", rule());
}

/// `['a', 'b']`, the list notation of the reports
pub(crate) fn format_list<S: AsRef<str>>(items: &[S]) -> String {
    let quoted: Vec<String> = items
        .iter()
        .map(|item| format!("'{}'", item.as_ref()))
        .collect();
    format!("[{}]", quoted.join(", "))
}

/// WordNet from the configured directory, or an empty lexicon
pub(crate) fn wordnet(config: &AppConfig) -> WordNet {
    WordNet::from_config_or_empty(&config.lexicon)
}

/// Print `prompt` and read one line; `None` at end of input
pub(crate) fn prompt_line(input: &mut impl BufRead, prompt: &str) -> anyhow::Result<Option<String>> {
    print!("{prompt}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_list() {
        assert_eq!(format_list(&["I", "'m"]), "['I', ''m']");
        assert_eq!(format_list::<&str>(&[]), "[]");
    }

    #[test]
    fn test_prompt_line_reads_until_eof() {
        let mut input = std::io::Cursor::new("first\r\nsecond");
        assert_eq!(prompt_line(&mut input, "").unwrap().as_deref(), Some("first"));
        assert_eq!(prompt_line(&mut input, "").unwrap().as_deref(), Some("second"));
        assert_eq!(prompt_line(&mut input, "").unwrap(), None);
    }
}
