use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::Category;

/// Penn Treebank tag inventory and the coarse category each tag lemmatizes as.
///
/// `EX`/`IN` lemmatize as adverbs, `PDT`/`RP` as adjectives and `CD` as a
/// noun, matching the WordNet lemmatizer conventions the caches were built with.
const PENN_TREEBANK: &[(&str, Option<Category>)] = &[
    ("CC", None),
    ("CD", Some(Category::Noun)),
    ("DT", None),
    ("EX", Some(Category::Adv)),
    ("FW", None),
    ("IN", Some(Category::Adv)),
    ("JJ", Some(Category::Adj)),
    ("JJR", Some(Category::Adj)),
    ("JJS", Some(Category::Adj)),
    ("LS", None),
    ("MD", None),
    ("NN", Some(Category::Noun)),
    ("NNS", Some(Category::Noun)),
    ("NNP", Some(Category::Noun)),
    ("NNPS", Some(Category::Noun)),
    ("PDT", Some(Category::Adj)),
    ("POS", None),
    ("PRP", None),
    ("PRP$", None),
    ("RB", Some(Category::Adv)),
    ("RBR", Some(Category::Adv)),
    ("RBS", Some(Category::Adv)),
    ("RP", Some(Category::Adj)),
    ("SYM", None),
    ("TO", None),
    ("UH", None),
    ("VB", Some(Category::Verb)),
    ("VBD", Some(Category::Verb)),
    ("VBG", Some(Category::Verb)),
    ("VBN", Some(Category::Verb)),
    ("VBP", Some(Category::Verb)),
    ("VBZ", Some(Category::Verb)),
    ("WDT", None),
    ("WP", None),
    ("WP$", None),
    ("WRB", None),
    ("$", None),
    ("#", None),
    ("“", None),
    ("”", None),
    ("``", None),
    ("''", None),
    ("(", None),
    (")", None),
    (",", None),
    (".", None),
    (":", None),
];

/// Immutable lookup from tag code to coarse category.
///
/// Build one at startup and share it; tags missing from the table resolve to
/// `None` exactly like tags mapped to no category.
#[derive(Clone, Debug)]
pub struct TagMap {
    entries: HashMap<String, Option<Category>>,
}

impl TagMap {
    /// The full Penn Treebank table.
    pub fn penn_treebank() -> Self {
        Self::from_entries(
            PENN_TREEBANK
                .iter()
                .map(|(tag, category)| (tag.to_string(), *category)),
        )
    }

    /// Build a custom (often reduced) table.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Option<Category>)>,
        S: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(tag, category)| (tag.into(), category))
                .collect(),
        }
    }

    pub fn coarse_category(&self, tag: &str) -> Option<Category> {
        self.entries.get(tag).copied().flatten()
    }

    /// Whether the tag is listed at all, with or without a category.
    pub fn contains(&self, tag: &str) -> bool {
        self.entries.contains_key(tag)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TagMap {
    fn default() -> Self {
        Self::penn_treebank()
    }
}

/// Which tags a frequency query selects.
///
/// `Exact` compares the whole tag code, `Family` compares a prefix so `JJ`
/// also selects `JJR` and `JJS`, and `Any` selects every token.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum TagFilter {
    Any,
    Exact(String),
    Family(String),
}

impl TagFilter {
    pub fn exact(tag: impl Into<String>) -> Self {
        TagFilter::Exact(tag.into())
    }

    pub fn family(prefix: impl Into<String>) -> Self {
        TagFilter::Family(prefix.into())
    }

    /// Family of tags lemmatized under `category` (`NN`, `VB`, `JJ`, `RB`).
    pub fn of_category(category: Category) -> Self {
        TagFilter::Family(category.tag().to_string())
    }

    pub fn matches(&self, tag: &str) -> bool {
        match self {
            TagFilter::Any => true,
            TagFilter::Exact(expected) => tag == expected,
            TagFilter::Family(prefix) => tag.starts_with(prefix.as_str()),
        }
    }
}

impl fmt::Display for TagFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagFilter::Any => f.write_str("ANY"),
            TagFilter::Exact(tag) => f.write_str(tag),
            TagFilter::Family(prefix) => write!(f, "{prefix}*"),
        }
    }
}

/// Error returned when a filter string is empty.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmptyFilter;

impl fmt::Display for EmptyFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("tag filter must not be empty")
    }
}

impl std::error::Error for EmptyFilter {}

/// `ANY` selects everything, a trailing `*` marks a family, anything else is exact.
impl FromStr for TagFilter {
    type Err = EmptyFilter;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("any") || raw == "*" {
            return Ok(TagFilter::Any);
        }
        match raw.strip_suffix('*') {
            Some("") => Err(EmptyFilter),
            Some(prefix) => Ok(TagFilter::Family(prefix.to_string())),
            None if raw.is_empty() => Err(EmptyFilter),
            None => Ok(TagFilter::Exact(raw.to_string())),
        }
    }
}
