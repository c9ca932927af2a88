//! Social-media aware tokenizer
//!
//! Keeps URLs, emoticons, @mentions, hashtags and apostrophe words intact.

use once_cell::sync::Lazy;
use regex::Regex;

use nlpkit_core::Tokenizer;

const EMOTICON: &str = r"(?:[<>]?[:;=8][\-o\*']?[\)\]\(\[dDpP/\\:\}\{@\|]|[\)\]\(\[dDpP/\\:\}\{@\|][\-o\*']?[:;=8][<>]?|<3)";

static EMOTICON_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(&format!("^{EMOTICON}$")).unwrap());

// Alternatives are tried left to right, so order matters
static TWEET_TOKEN: Lazy<Regex> = Lazy::new(|| {
    let url = r"(?:https?://|www\.)[^\s<>]+[^\s<>.,;:!?)\]'\x22]";
    let mention = r"@[\w_]+";
    let hashtag = r"#+[\w_]+[\w'_\-]*[\w_]+";
    let email = r"[\w.+-]+@[\w-]+\.(?:[\w-]\.?)+[\w-]";
    let apostrophe_word = r"[^\W\d_](?:[^\W\d_]|['\-_])+[^\W\d_]";
    let number = r"[+\-]?\d+(?:[,/.:-]\d+[+\-]?)?";
    let word = r"[\w_]+";
    let ellipsis = r"(?:\.(?:\s*\.){1,})";
    let other = r"\S";

    Regex::new(&[
        url,
        EMOTICON,
        email,
        mention,
        hashtag,
        apostrophe_word,
        number,
        word,
        ellipsis,
        other,
    ]
    .join("|"))
    .unwrap()
});

/// Tweet-aware tokenizer
#[derive(Debug, Clone, Copy)]
pub struct TweetTokenizer {
    preserve_case: bool,
    reduce_len: bool,
    strip_handles: bool,
}

impl Default for TweetTokenizer {
    fn default() -> Self {
        Self {
            preserve_case: true,
            reduce_len: false,
            strip_handles: false,
        }
    }
}

impl TweetTokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lowercase tokens other than emoticons when false
    pub fn with_preserve_case(mut self, preserve: bool) -> Self {
        self.preserve_case = preserve;
        self
    }

    /// Collapse runs of 3+ identical characters down to 3
    pub fn with_reduce_len(mut self, reduce: bool) -> Self {
        self.reduce_len = reduce;
        self
    }

    /// Drop @mentions
    pub fn with_strip_handles(mut self, strip: bool) -> Self {
        self.strip_handles = strip;
        self
    }
}

fn reduce_lengthening(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous = None;
    let mut run = 0;
    for c in text.chars() {
        if Some(c) == previous {
            run += 1;
        } else {
            previous = Some(c);
            run = 1;
        }
        if run <= 3 {
            out.push(c);
        }
    }
    out
}

fn is_emoticon(token: &str) -> bool {
    EMOTICON_ONLY.is_match(token)
}

impl Tokenizer for TweetTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let text = if self.reduce_len {
            reduce_lengthening(text)
        } else {
            text.to_string()
        };

        TWEET_TOKEN
            .find_iter(&text)
            .map(|m| m.as_str())
            .filter(|token| !(self.strip_handles && token.starts_with('@') && token.len() > 1))
            .map(|token| {
                if self.preserve_case || is_emoticon(token) {
                    token.to_string()
                } else {
                    token.to_lowercase()
                }
            })
            .collect()
    }

    fn name(&self) -> &str {
        "tweet"
    }
}
