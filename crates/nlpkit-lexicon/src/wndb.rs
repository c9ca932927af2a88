//! Reader for the Princeton WordNet database files
//!
//! Loads `index.<pos>`, `data.<pos>` and `<pos>.exc` for the four file
//! categories from one directory. Lines starting with a space are license
//! or comment lines. Missing files for a category are tolerated; a directory
//! with no index file at all is an error.
//!
//! Author: hephaex@gmail.com

use std::fs;
use std::path::{Path, PathBuf};

use nlpkit_core::{NlpError, PartOfSpeech, Result};
use tracing::{debug, info};

use crate::store::Store;
use crate::{LexicalDatabase, Pointer, PointerKind, Synset, SynsetId};

/// WordNet database loaded from WNDB files
#[derive(Debug, Clone)]
pub struct WordNetDb {
    root: PathBuf,
    store: Store,
}

impl WordNetDb {
    /// Load every category found under `root`
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(NlpError::Lexicon(format!(
                "WordNet directory not found: {}",
                root.display()
            )));
        }

        let mut store = Store::default();
        let mut categories = 0;

        for pos in PartOfSpeech::ALL {
            let suffix = pos.file_suffix();

            let data_path = root.join(format!("data.{suffix}"));
            if let Some(content) = read_optional(&data_path)? {
                for (n, line) in content_lines(&content) {
                    let synset = parse_data_line(line).map_err(|e| {
                        NlpError::Lexicon(format!("{}:{}: {e}", data_path.display(), n))
                    })?;
                    store.insert_synset(synset);
                }
            }

            let index_path = root.join(format!("index.{suffix}"));
            if let Some(content) = read_optional(&index_path)? {
                categories += 1;
                for (n, line) in content_lines(&content) {
                    let (lemma, ids) = parse_index_line(line, pos).map_err(|e| {
                        NlpError::Lexicon(format!("{}:{}: {e}", index_path.display(), n))
                    })?;
                    store.set_index(&lemma, pos, ids);
                }
            }

            let exc_path = root.join(format!("{suffix}.exc"));
            if let Some(content) = read_optional(&exc_path)? {
                for (_, line) in content_lines(&content) {
                    let mut fields = line.split_whitespace();
                    if let Some(form) = fields.next() {
                        for base in fields {
                            store.add_exception(pos, form, base);
                        }
                    }
                }
            }
        }

        if categories == 0 {
            return Err(NlpError::Lexicon(format!(
                "no WordNet index files in {}",
                root.display()
            )));
        }

        info!(
            path = %root.display(),
            synsets = store.synset_count(),
            "Loaded WordNet database"
        );
        Ok(Self { root, store })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl LexicalDatabase for WordNetDb {
    fn lookup(&self, lemma: &str, pos: PartOfSpeech) -> &[SynsetId] {
        self.store.lookup(lemma, pos)
    }

    fn synset(&self, id: SynsetId) -> Option<&Synset> {
        self.store.synset(id)
    }

    fn exceptions(&self, form: &str, pos: PartOfSpeech) -> &[String] {
        self.store.exceptions(form, pos)
    }

    fn synset_count(&self) -> usize {
        self.store.synset_count()
    }
}

// ============================================================================
// Line Parsing
// ============================================================================

fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "WordNet file missing, skipping");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Non-comment lines with their 1-based line numbers
fn content_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.starts_with(' ') && !line.trim().is_empty())
        .map(|(i, line)| (i + 1, line))
}

struct Fields<'a> {
    inner: std::str::SplitWhitespace<'a>,
}

impl<'a> Fields<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.split_whitespace(),
        }
    }

    fn next(&mut self, what: &str) -> std::result::Result<&'a str, String> {
        self.inner.next().ok_or_else(|| format!("missing {what}"))
    }

    fn number(&mut self, what: &str, radix: u32) -> std::result::Result<u32, String> {
        let field = self.next(what)?;
        u32::from_str_radix(field, radix).map_err(|_| format!("invalid {what}: {field}"))
    }

    fn pos(&mut self) -> std::result::Result<PartOfSpeech, String> {
        let field = self.next("part of speech")?;
        field
            .chars()
            .next()
            .and_then(PartOfSpeech::from_char)
            .filter(|_| field.len() == 1)
            .ok_or_else(|| format!("invalid part of speech: {field}"))
    }
}

/// Drop adjective position markers such as `(a)`, `(p)` or `(ip)`
fn strip_marker(word: &str) -> &str {
    match word.find('(') {
        Some(i) if word.ends_with(')') => &word[..i],
        _ => word,
    }
}

/// `offset lex_filenum ss_type w_cnt [word lex_id]... p_cnt [ptr]... [frames] | gloss`
pub(crate) fn parse_data_line(line: &str) -> std::result::Result<Synset, String> {
    let (head, gloss) = match line.split_once(" | ") {
        Some((head, gloss)) => (head, gloss.trim()),
        None => (line.trim_end_matches('|'), ""),
    };

    let mut fields = Fields::new(head);
    let offset = fields.number("synset offset", 10)?;
    fields.next("lexicographer file number")?;
    let pos = fields.pos()?;
    let word_count = fields.number("word count", 16)?;

    let mut lemmas = Vec::with_capacity(word_count as usize);
    for _ in 0..word_count {
        lemmas.push(strip_marker(fields.next("word")?).to_string());
        fields.next("lex id")?;
    }

    let id = SynsetId::new(pos, offset);
    let mut synset = Synset::new(id, pos, lemmas, gloss);

    let pointer_count = fields.number("pointer count", 10)?;
    for _ in 0..pointer_count {
        let symbol = fields.next("pointer symbol")?;
        let target_offset = fields.number("pointer offset", 10)?;
        let target_pos = fields.pos()?;
        let source_target = fields.next("source/target")?;
        if source_target.len() != 4 || !source_target.is_ascii() {
            return Err(format!("invalid source/target: {source_target}"));
        }
        let source = u16::from_str_radix(&source_target[..2], 16)
            .map_err(|_| format!("invalid source/target: {source_target}"))?;
        let target = u16::from_str_radix(&source_target[2..], 16)
            .map_err(|_| format!("invalid source/target: {source_target}"))?;

        synset.pointers.push(Pointer::lexical(
            PointerKind::from_symbol(symbol),
            SynsetId::new(target_pos, target_offset),
            source,
            target,
        ));
    }

    // Verb frames follow the pointers and are not needed here
    Ok(synset)
}

/// `lemma pos synset_cnt p_cnt [ptr_symbol]... sense_cnt tagsense_cnt [offset]...`
pub(crate) fn parse_index_line(
    line: &str,
    file_pos: PartOfSpeech,
) -> std::result::Result<(String, Vec<SynsetId>), String> {
    let mut fields = Fields::new(line);
    let lemma = fields.next("lemma")?.to_string();
    fields.pos()?;
    let synset_count = fields.number("synset count", 10)?;
    let pointer_count = fields.number("pointer count", 10)?;
    for _ in 0..pointer_count {
        fields.next("pointer symbol")?;
    }
    fields.next("sense count")?;
    fields.next("tagged sense count")?;

    let mut ids = Vec::with_capacity(synset_count as usize);
    for _ in 0..synset_count {
        ids.push(SynsetId::new(file_pos, fields.number("synset offset", 10)?));
    }
    Ok((lemma, ids))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_data_line() {
        let line = "00001215 00 a 02 large 0 big(p) 0 001 ! 00001355 a 0101 | above average in size; \"a large city\"  ";
        let synset = parse_data_line(line).unwrap();
        assert_eq!(synset.id, SynsetId::new(PartOfSpeech::Adjective, 1215));
        assert_eq!(synset.lemmas, vec!["large", "big"]);
        assert_eq!(synset.pointers.len(), 1);
        let pointer = &synset.pointers[0];
        assert_eq!(pointer.kind, PointerKind::Antonym);
        assert_eq!(pointer.target.offset, 1355);
        assert_eq!((pointer.source_word, pointer.target_word), (1, 1));
        assert_eq!(synset.definition(), "above average in size");
    }

    #[test]
    fn test_parse_verb_line_with_frames() {
        let line = "00000567 38 v 01 run 0 001 @ 00000397 v 0000 02 + 01 00 + 02 00 | move fast by using one's feet  ";
        let synset = parse_data_line(line).unwrap();
        assert_eq!(synset.pos, PartOfSpeech::Verb);
        assert_eq!(synset.pointers[0].kind, PointerKind::Hypernym);
        assert!(!synset.pointers[0].is_lexical());
        assert_eq!(synset.gloss, "move fast by using one's feet");
    }

    #[test]
    fn test_parse_satellite_and_hex_word_count() {
        let line = "00000100 00 s 0a a 0 b 0 c 0 d 0 e 0 f 0 g 0 h 0 i 0 j 0 000 | ten words";
        let synset = parse_data_line(line).unwrap();
        assert_eq!(synset.pos, PartOfSpeech::AdjectiveSatellite);
        assert_eq!(synset.id.pos, PartOfSpeech::Adjective);
        assert_eq!(synset.lemmas.len(), 10);
    }

    #[test]
    fn test_parse_index_line() {
        let (lemma, ids) =
            parse_index_line("happy a 3 2 ! & 3 0 00000940 00000553 00000435  ", PartOfSpeech::Adjective)
                .unwrap();
        assert_eq!(lemma, "happy");
        let offsets: Vec<u32> = ids.iter().map(|id| id.offset).collect();
        assert_eq!(offsets, vec![940, 553, 435]);
    }

    #[test]
    fn test_malformed_lines() {
        assert!(parse_data_line("00000100 00 x 01 word 0 000 | bad pos").is_err());
        assert!(parse_data_line("00000100 00 n 02 word 0").is_err());
        assert!(parse_index_line("dog n 2 0 2 0 00000001", PartOfSpeech::Noun).is_err());
    }

    #[test]
    fn test_non_ascii_source_target_is_an_error() {
        let err = parse_data_line("00000100 00 n 01 word 0 001 @ 00000200 n \u{e9}00 | gloss")
            .unwrap_err();
        assert!(err.contains("invalid source/target"));
        assert!(parse_data_line("00000100 00 n 01 word 0 001 @ 00000200 n 0000 | gloss").is_ok());
    }

    #[test]
    fn test_open_missing_directory() {
        let err = WordNetDb::open("/nonexistent/wordnet").unwrap_err();
        assert!(matches!(err, NlpError::Lexicon(_)));
    }

    #[test]
    fn test_open_directory_without_index() {
        let dir = tempfile::tempdir().unwrap();
        assert!(WordNetDb::open(dir.path()).is_err());
    }

    #[test]
    fn test_open_partial_database() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("data.noun"),
            "  1 header\n00000010 05 n 01 goose 0 000 | a bird  \n",
        )
        .unwrap();
        fs::write(dir.path().join("index.noun"), "goose n 1 0 1 0 00000010  \n").unwrap();
        fs::write(dir.path().join("noun.exc"), "geese goose\n").unwrap();

        let db = WordNetDb::open(dir.path()).unwrap();
        assert_eq!(db.synset_count(), 1);
        assert_eq!(db.lookup("goose", PartOfSpeech::Noun).len(), 1);
        assert!(db.lookup("goose", PartOfSpeech::Verb).is_empty());
        assert_eq!(db.exceptions("geese", PartOfSpeech::Noun), &["goose"]);
    }
}
