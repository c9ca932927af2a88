//! Porter stemming algorithm
//!
//! The original five-step suffix stripper (M.F. Porter, 1980). Operates on
//! lowercase ASCII; words containing anything else are returned lowercased
//! but otherwise untouched.

use nlpkit_core::Stemmer;

/// Classic Porter stemmer
#[derive(Debug, Clone, Copy, Default)]
pub struct PorterStemmer;

impl PorterStemmer {
    pub fn new() -> Self {
        Self
    }
}

impl Stemmer for PorterStemmer {
    fn stem(&self, word: &str) -> String {
        let lower = word.to_lowercase();
        if lower.len() <= 2 || !lower.bytes().all(|b| b.is_ascii_lowercase()) {
            return lower;
        }
        let mut state = Porter::new(lower.into_bytes());
        state.run();
        state.into_string()
    }

    fn name(&self) -> &str {
        "porter"
    }
}

/// Working buffer: `b[..=k]` is the current word, `j` marks a suffix boundary
struct Porter {
    b: Vec<u8>,
    k: isize,
    j: isize,
}

impl Porter {
    fn new(b: Vec<u8>) -> Self {
        let k = b.len() as isize - 1;
        Self { b, k, j: 0 }
    }

    fn into_string(mut self) -> String {
        self.b.truncate((self.k + 1) as usize);
        String::from_utf8(self.b).unwrap_or_default()
    }

    fn at(&self, i: isize) -> u8 {
        self.b[i as usize]
    }

    fn run(&mut self) {
        self.step1ab();
        if self.k > 0 {
            self.step1c();
            self.step2();
            self.step3();
            self.step4();
            self.step5();
        }
    }

    /// Whether `b[i]` is a consonant
    fn cons(&self, i: isize) -> bool {
        match self.at(i) {
            b'a' | b'e' | b'i' | b'o' | b'u' => false,
            b'y' => i == 0 || !self.cons(i - 1),
            _ => true,
        }
    }

    /// Number of vowel-consonant sequences in `b[..=j]`
    fn m(&self) -> usize {
        let mut n = 0;
        let mut i = 0;
        loop {
            if i > self.j {
                return n;
            }
            if !self.cons(i) {
                break;
            }
            i += 1;
        }
        i += 1;
        loop {
            loop {
                if i > self.j {
                    return n;
                }
                if self.cons(i) {
                    break;
                }
                i += 1;
            }
            i += 1;
            n += 1;
            loop {
                if i > self.j {
                    return n;
                }
                if !self.cons(i) {
                    break;
                }
                i += 1;
            }
            i += 1;
        }
    }

    /// `b[..=j]` contains a vowel
    fn vowel_in_stem(&self) -> bool {
        (0..=self.j).any(|i| !self.cons(i))
    }

    /// `b[i-1..=i]` is a double consonant
    fn doublec(&self, i: isize) -> bool {
        i >= 1 && self.at(i) == self.at(i - 1) && self.cons(i)
    }

    /// `b[i-2..=i]` is consonant-vowel-consonant and the last is not w, x or y
    fn cvc(&self, i: isize) -> bool {
        if i < 2 || !self.cons(i) || self.cons(i - 1) || !self.cons(i - 2) {
            return false;
        }
        !matches!(self.at(i), b'w' | b'x' | b'y')
    }

    /// Current word ends with `s`; on success `j` is the index before the suffix
    fn ends(&mut self, s: &str) -> bool {
        let len = s.len() as isize;
        if len > self.k + 1 {
            return false;
        }
        let start = (self.k + 1 - len) as usize;
        if &self.b[start..=self.k as usize] != s.as_bytes() {
            return false;
        }
        self.j = self.k - len;
        true
    }

    /// Replace `b[j+1..=k]` with `s`
    fn setto(&mut self, s: &str) {
        self.b.truncate((self.j + 1) as usize);
        self.b.extend_from_slice(s.as_bytes());
        self.k = self.j + s.len() as isize;
    }

    fn r(&mut self, s: &str) {
        if self.m() > 0 {
            self.setto(s);
        }
    }

    /// Plurals and -ed / -ing
    fn step1ab(&mut self) {
        if self.at(self.k) == b's' {
            if self.ends("sses") {
                self.k -= 2;
            } else if self.ends("ies") {
                self.setto("i");
            } else if self.at(self.k - 1) != b's' {
                self.k -= 1;
            }
        }
        if self.ends("eed") {
            if self.m() > 0 {
                self.k -= 1;
            }
        } else if (self.ends("ed") || self.ends("ing")) && self.vowel_in_stem() {
            self.k = self.j;
            if self.ends("at") {
                self.setto("ate");
            } else if self.ends("bl") {
                self.setto("ble");
            } else if self.ends("iz") {
                self.setto("ize");
            } else if self.doublec(self.k) {
                if !matches!(self.at(self.k), b'l' | b's' | b'z') {
                    self.k -= 1;
                }
            } else if self.m() == 1 && self.cvc(self.k) {
                self.j = self.k;
                self.setto("e");
            }
        }
    }

    /// Terminal y -> i when there is another vowel in the stem
    fn step1c(&mut self) {
        if self.ends("y") && self.vowel_in_stem() {
            let k = self.k as usize;
            self.b[k] = b'i';
        }
    }

    /// Double suffixes map to single ones
    fn step2(&mut self) {
        let rules: &[(&str, &str)] = match self.at(self.k - 1) {
            b'a' => &[("ational", "ate"), ("tional", "tion")],
            b'c' => &[("enci", "ence"), ("anci", "ance")],
            b'e' => &[("izer", "ize")],
            b'l' => &[
                ("bli", "ble"),
                ("alli", "al"),
                ("entli", "ent"),
                ("eli", "e"),
                ("ousli", "ous"),
            ],
            b'o' => &[("ization", "ize"), ("ation", "ate"), ("ator", "ate")],
            b's' => &[
                ("alism", "al"),
                ("iveness", "ive"),
                ("fulness", "ful"),
                ("ousness", "ous"),
            ],
            b't' => &[("aliti", "al"), ("iviti", "ive"), ("biliti", "ble")],
            b'g' => &[("logi", "log")],
            _ => &[],
        };
        self.replace_first(rules);
    }

    /// -ic-, -full, -ness etc.
    fn step3(&mut self) {
        let rules: &[(&str, &str)] = match self.at(self.k) {
            b'e' => &[("icate", "ic"), ("ative", ""), ("alize", "al")],
            b'i' => &[("iciti", "ic")],
            b'l' => &[("ical", "ic"), ("ful", "")],
            b's' => &[("ness", "")],
            _ => &[],
        };
        self.replace_first(rules);
    }

    fn replace_first(&mut self, rules: &[(&str, &str)]) {
        for (suffix, replacement) in rules {
            if self.ends(suffix) {
                self.r(replacement);
                return;
            }
        }
    }

    /// Strip -ant, -ence etc. when m > 1
    fn step4(&mut self) {
        let suffixes: &[&str] = match self.at(self.k - 1) {
            b'a' => &["al"],
            b'c' => &["ance", "ence"],
            b'e' => &["er"],
            b'i' => &["ic"],
            b'l' => &["able", "ible"],
            b'n' => &["ant", "ement", "ment", "ent"],
            b'o' => &["ion", "ou"],
            b's' => &["ism"],
            b't' => &["ate", "iti"],
            b'u' => &["ous"],
            b'v' => &["ive"],
            b'z' => &["ize"],
            _ => &[],
        };

        let mut matched = false;
        for suffix in suffixes {
            if !self.ends(suffix) {
                continue;
            }
            // -ion only after s or t
            if *suffix == "ion" && (self.j < 0 || !matches!(self.at(self.j), b's' | b't')) {
                continue;
            }
            matched = true;
            break;
        }

        if matched && self.m() > 1 {
            self.k = self.j;
        }
    }

    /// Remove a final -e and reduce -ll when m > 1
    fn step5(&mut self) {
        self.j = self.k;
        if self.at(self.k) == b'e' {
            let a = self.m();
            if a > 1 || (a == 1 && !self.cvc(self.k - 1)) {
                self.k -= 1;
            }
        }
        if self.at(self.k) == b'l' && self.doublec(self.k) && self.m() > 1 {
            self.k -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stem(word: &str) -> String {
        PorterStemmer.stem(word)
    }

    #[test]
    fn test_sample_words() {
        let words = ["working", "works", "worked", "running", "runs", "easily", "fairly"];
        let stems: Vec<String> = words.iter().map(|w| stem(w)).collect();
        assert_eq!(
            stems,
            vec!["work", "work", "work", "run", "run", "easili", "fairli"]
        );
    }

    #[test]
    fn test_classic_vocabulary() {
        assert_eq!(stem("caresses"), "caress");
        assert_eq!(stem("ponies"), "poni");
        assert_eq!(stem("cats"), "cat");
        assert_eq!(stem("agreed"), "agre");
        assert_eq!(stem("plastered"), "plaster");
        assert_eq!(stem("motoring"), "motor");
        assert_eq!(stem("sing"), "sing");
        assert_eq!(stem("hopping"), "hop");
        assert_eq!(stem("falling"), "fall");
        assert_eq!(stem("filing"), "file");
        assert_eq!(stem("happy"), "happi");
        assert_eq!(stem("relational"), "relat");
        assert_eq!(stem("generalization"), "gener");
        assert_eq!(stem("adoption"), "adopt");
        assert_eq!(stem("controll"), "control");
        assert_eq!(stem("probate"), "probat");
    }

    #[test]
    fn test_short_and_non_ascii_words_untouched() {
        assert_eq!(stem("is"), "is");
        assert_eq!(stem("Go"), "go");
        assert_eq!(stem("naïve"), "naïve");
    }
}
