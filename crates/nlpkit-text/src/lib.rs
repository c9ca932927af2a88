//! nlpkit Text - Tokenization and stemming
//!
//! Implements the tokenization policies (whitespace, word/punctuation,
//! Penn Treebank, tweet-aware and multi-word-expression merging) and the
//! Porter and Snowball stemmers behind the `nlpkit_core` capability traits.

pub mod stem;
pub mod tokenize;

pub use stem::{PorterStemmer, SnowballStemmer, StemmerKind};
pub use tokenize::{
    MweTokenizer, TokenizerPolicy, TreebankWordTokenizer, TweetTokenizer, WhitespaceTokenizer,
    WordPunctTokenizer,
};
