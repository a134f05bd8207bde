//! Shared types for annotated prose.
//!
//! A tagger turns raw text into [`Token`]s (surface form plus a Penn-Treebank
//! style tag code). A [`TagMap`] resolves each tag code to a coarse
//! [`Category`], and lemmatization turns the tokens with a category into
//! [`LemmaToken`]s. Both token kinds implement [`Tagged`], so frequency
//! queries run uniformly over either stream.
//!
//! ```rust
//! use prose_types::{Category, TagFilter, TagMap, Tagged, Token};
//!
//! let map = TagMap::penn_treebank();
//! let token = Token::new("llamas", "NNS");
//! assert_eq!(map.coarse_category(token.tag()), Some(Category::Noun));
//! assert!(TagFilter::family("NN").matches(token.tag()));
//! ```

use std::fmt;

mod tag_map;

pub use tag_map::{EmptyFilter, TagFilter, TagMap};

/// Coarse lexical category a tag resolves to.
///
/// Tags that resolve to no category (determiners, pronouns, punctuation, ...)
/// are represented as `None` by [`TagMap::coarse_category`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Category {
    Noun,
    Verb,
    Adj,
    Adv,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Noun,
        Category::Verb,
        Category::Adj,
        Category::Adv,
    ];

    /// Parse a WordNet POS character (`n`, `v`, `a`/`s`, `r`).
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'n' => Some(Category::Noun),
            'v' => Some(Category::Verb),
            'a' | 's' => Some(Category::Adj),
            'r' => Some(Category::Adv),
            _ => None,
        }
    }

    /// WordNet POS character, also the suffix of its `index.*` file.
    pub fn to_char(self) -> char {
        match self {
            Category::Noun => 'n',
            Category::Verb => 'v',
            Category::Adj => 'a',
            Category::Adv => 'r',
        }
    }

    /// Canonical tag written into lemma streams.
    ///
    /// Each is the base of its tag family, so family filters such as
    /// `TagFilter::family("JJ")` select the same words before and after
    /// lemmatization.
    pub fn tag(self) -> &'static str {
        match self {
            Category::Noun => "NN",
            Category::Verb => "VB",
            Category::Adj => "JJ",
            Category::Adv => "RB",
        }
    }

    /// Name used by WordNet file names (`index.noun`, `verb.exc`, ...).
    pub fn file_stem(self) -> &'static str {
        match self {
            Category::Noun => "noun",
            Category::Verb => "verb",
            Category::Adj => "adj",
            Category::Adv => "adv",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Category::Noun => "NOUN",
            Category::Verb => "VERB",
            Category::Adj => "ADJ",
            Category::Adv => "ADV",
        })
    }
}

/// Read-only `(word, tag)` view shared by tagged and lemmatized streams.
pub trait Tagged {
    fn word(&self) -> &str;
    fn tag(&self) -> &str;
}

/// A surface form and the tag code the tagger assigned to it.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Token {
    word: String,
    tag: String,
}

impl Token {
    pub fn new(word: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            tag: tag.into(),
        }
    }

    pub fn into_parts(self) -> (String, String) {
        (self.word, self.tag)
    }
}

impl Tagged for Token {
    fn word(&self) -> &str {
        &self.word
    }

    fn tag(&self) -> &str {
        &self.tag
    }
}

impl<W: Into<String>, T: Into<String>> From<(W, T)> for Token {
    fn from((word, tag): (W, T)) -> Self {
        Token::new(word, tag)
    }
}

/// A lemma and the coarse category it was lemmatized under.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LemmaToken {
    lemma: String,
    category: Category,
}

impl LemmaToken {
    pub fn new(lemma: impl Into<String>, category: Category) -> Self {
        Self {
            lemma: lemma.into(),
            category,
        }
    }

    pub fn lemma(&self) -> &str {
        &self.lemma
    }

    pub fn category(&self) -> Category {
        self.category
    }
}

impl Tagged for LemmaToken {
    fn word(&self) -> &str {
        &self.lemma
    }

    fn tag(&self) -> &str {
        self.category.tag()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_chars_round_trip_through_wordnet_markers() {
        for category in Category::ALL {
            assert_eq!(Category::from_char(category.to_char()), Some(category));
        }
        assert_eq!(Category::from_char('s'), Some(Category::Adj));
        assert_eq!(Category::from_char('x'), None);
    }

    #[test]
    fn lemma_tokens_expose_family_base_tags() {
        let lemma = LemmaToken::new("run", Category::Verb);
        assert_eq!(lemma.word(), "run");
        assert_eq!(lemma.tag(), "VB");
        assert!(TagFilter::family("VB").matches(lemma.tag()));
    }

    #[test]
    fn tokens_build_from_pairs() {
        let token: Token = ("fox", "NN").into();
        assert_eq!(token.word(), "fox");
        assert_eq!(token.tag(), "NN");
        assert_eq!(token.into_parts(), ("fox".to_string(), "NN".to_string()));
    }
}
