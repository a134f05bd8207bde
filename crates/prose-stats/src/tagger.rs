//! Tokenization and part-of-speech tagging.
//!
//! [`Tagger`] is the seam to whatever model produces tags. [`LexiconTagger`]
//! is a deterministic dictionary tagger with suffix fallbacks, good enough to
//! run the pipeline without an external model.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use prose_types::Token;
use unicode_segmentation::UnicodeSegmentation;

use crate::error::TaggerError;

/// Turns raw text into tagged tokens in text order.
pub trait Tagger {
    fn tokenize_and_tag(&self, text: &str) -> Result<Vec<Token>, TaggerError>;
}

impl<T: Tagger + ?Sized> Tagger for &T {
    fn tokenize_and_tag(&self, text: &str) -> Result<Vec<Token>, TaggerError> {
        (**self).tokenize_and_tag(text)
    }
}

/// Split on Unicode word boundaries, dropping whitespace. Every punctuation
/// mark becomes its own token, and a possessive `’s` is split off its word.
pub fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    for segment in text.split_word_bounds() {
        if segment.chars().all(char::is_whitespace) {
            continue;
        }
        match split_possessive(segment) {
            Some((word, clitic)) => {
                tokens.push(word);
                tokens.push(clitic);
            }
            None => tokens.push(segment),
        }
    }
    tokens
}

const POSSESSIVE_CLITICS: &[&str] = &["’s", "'s", "’S", "'S"];

fn split_possessive(segment: &str) -> Option<(&str, &str)> {
    POSSESSIVE_CLITICS.iter().find_map(|clitic| {
        let word = segment.strip_suffix(clitic)?;
        (!word.is_empty()).then(|| segment.split_at(word.len()))
    })
}

fn is_possessive_clitic(word: &str) -> bool {
    POSSESSIVE_CLITICS.contains(&word)
}

const CLOSED_CLASS: &[(&str, &str)] = &[
    ("a", "DT"),
    ("an", "DT"),
    ("the", "DT"),
    ("this", "DT"),
    ("that", "DT"),
    ("these", "DT"),
    ("those", "DT"),
    ("all", "PDT"),
    ("both", "PDT"),
    ("and", "CC"),
    ("but", "CC"),
    ("or", "CC"),
    ("nor", "CC"),
    ("of", "IN"),
    ("in", "IN"),
    ("on", "IN"),
    ("at", "IN"),
    ("by", "IN"),
    ("with", "IN"),
    ("from", "IN"),
    ("for", "IN"),
    ("into", "IN"),
    ("upon", "IN"),
    ("if", "IN"),
    ("than", "IN"),
    ("to", "TO"),
    ("there", "EX"),
    ("i", "PRP"),
    ("you", "PRP"),
    ("he", "PRP"),
    ("she", "PRP"),
    ("it", "PRP"),
    ("we", "PRP"),
    ("they", "PRP"),
    ("me", "PRP"),
    ("him", "PRP"),
    ("her", "PRP$"),
    ("us", "PRP"),
    ("them", "PRP"),
    ("my", "PRP$"),
    ("your", "PRP$"),
    ("his", "PRP$"),
    ("its", "PRP$"),
    ("our", "PRP$"),
    ("their", "PRP$"),
    ("can", "MD"),
    ("could", "MD"),
    ("may", "MD"),
    ("might", "MD"),
    ("must", "MD"),
    ("shall", "MD"),
    ("should", "MD"),
    ("will", "MD"),
    ("would", "MD"),
    ("is", "VBZ"),
    ("are", "VBP"),
    ("was", "VBD"),
    ("were", "VBD"),
    ("be", "VB"),
    ("been", "VBN"),
    ("has", "VBZ"),
    ("have", "VBP"),
    ("had", "VBD"),
    ("not", "RB"),
    ("which", "WDT"),
    ("what", "WP"),
    ("who", "WP"),
    ("whose", "WP$"),
    ("how", "WRB"),
    ("where", "WRB"),
    ("when", "WRB"),
    ("why", "WRB"),
    ("oh", "UH"),
    ("ah", "UH"),
];

/// Dictionary tagger: lexicon lookup first, then shape and suffix rules.
#[derive(Debug, Clone)]
pub struct LexiconTagger {
    lexicon: HashMap<String, String>,
}

impl LexiconTagger {
    /// Tagger with the built-in closed-class word list only.
    pub fn new() -> Self {
        Self::with_entries(std::iter::empty::<(String, String)>())
    }

    /// Built-in list extended (and overridden) by `entries`.
    pub fn with_entries<I, W, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = (W, T)>,
        W: AsRef<str>,
        T: Into<String>,
    {
        let mut lexicon: HashMap<String, String> = CLOSED_CLASS
            .iter()
            .map(|(word, tag)| (word.to_string(), tag.to_string()))
            .collect();
        for (word, tag) in entries {
            lexicon.insert(word.as_ref().to_lowercase(), tag.into());
        }
        Self { lexicon }
    }

    /// Load `word<TAB>TAG` lines; blank lines and `#` comments are skipped.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TaggerError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| TaggerError::Lexicon {
            path: path.to_path_buf(),
            source,
        })?;
        let mut entries = Vec::new();
        for (lineno, line) in raw.lines().enumerate() {
            let line = line.trim_end();
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            match line.split_once('\t') {
                Some((word, tag)) if !word.trim().is_empty() && !tag.trim().is_empty() => {
                    entries.push((word.trim().to_string(), tag.trim().to_string()));
                }
                _ => {
                    return Err(TaggerError::LexiconLine {
                        path: path.to_path_buf(),
                        line: lineno + 1,
                    });
                }
            }
        }
        Ok(Self::with_entries(entries))
    }

    pub fn len(&self) -> usize {
        self.lexicon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lexicon.is_empty()
    }

    fn tag_word(&self, word: &str, sentence_start: bool) -> String {
        if let Some(tag) = punctuation_tag(word) {
            return tag.to_string();
        }
        if is_possessive_clitic(word) {
            return "POS".to_string();
        }
        if is_numeral(word) {
            return "CD".to_string();
        }
        let lower = word.to_lowercase();
        if let Some(tag) = self.lexicon.get(&lower) {
            return tag.clone();
        }
        if !sentence_start && word.chars().next().is_some_and(char::is_uppercase) {
            return "NNP".to_string();
        }
        suffix_tag(&lower).to_string()
    }
}

impl Default for LexiconTagger {
    fn default() -> Self {
        Self::new()
    }
}

impl Tagger for LexiconTagger {
    fn tokenize_and_tag(&self, text: &str) -> Result<Vec<Token>, TaggerError> {
        let mut tokens = Vec::new();
        let mut sentence_start = true;
        for word in tokenize(text) {
            let tag = self.tag_word(word, sentence_start);
            sentence_start = tag == "." || (sentence_start && tag.starts_with('“'));
            tokens.push(Token::new(word, tag));
        }
        Ok(tokens)
    }
}

fn punctuation_tag(word: &str) -> Option<&'static str> {
    let mut chars = word.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    let tag = match c {
        '.' | '!' | '?' => ".",
        ',' => ",",
        ':' | ';' | '-' | '–' | '—' | '…' => ":",
        '(' | '[' | '{' | '<' => "(",
        ')' | ']' | '}' | '>' => ")",
        '“' | '"' | '‘' | '«' => "“",
        '”' | '’' | '»' | '\'' => "”",
        '$' => "$",
        '#' => "#",
        c if c.is_alphanumeric() => return None,
        _ => "SYM",
    };
    Some(tag)
}

fn is_numeral(word: &str) -> bool {
    word.chars().next().is_some_and(|c| c.is_ascii_digit())
        && word.chars().all(|c| c.is_ascii_digit() || c == ',' || c == '.')
}

fn suffix_tag(lower: &str) -> &'static str {
    if lower.len() > 3 && lower.ends_with("ly") {
        "RB"
    } else if lower.len() > 4 && lower.ends_with("ing") {
        "VBG"
    } else if lower.len() > 3 && lower.ends_with("ed") {
        "VBD"
    } else if lower.len() > 2 && lower.ends_with('s') && !lower.ends_with("ss") {
        "NNS"
    } else {
        "NN"
    }
}
