//! WordNet-style morphological processing (morphy) and a lemmatizer built on it.
//!
//! [`Morphy`] checks exceptions, applies suffix rules, and verifies candidates
//! via a caller-provided lemma existence predicate. [`Lexicon`] supplies that
//! predicate from a WordNet dictionary's `index.*` files, and
//! [`WordNetLemmatizer`] ties the two together to pick one lemma per word.
//!
//! # How it works
//! 1. Emit the surface form if it exists.
//! 2. Check exceptions (`*.exc` files).
//! 3. Apply category-specific suffix rules.
//! 4. Deduplicate while preserving provenance (`Surface`, `Exception`, `Rule`).
//!
//! The lemmatizer returns the shortest candidate (earliest on ties), or the
//! surface form unchanged when nothing matches.
//!
//! # Example
//! ```no_run
//! use prose_types::Category;
//! use wordnet_morphy::{LoadMode, WordNetLemmatizer};
//!
//! # fn main() -> anyhow::Result<()> {
//! let lemmatizer = WordNetLemmatizer::load_with_mode("/path/to/wordnet", LoadMode::Mmap)?;
//! assert_eq!(lemmatizer.lemmatize("running", Category::Verb), "run");
//! # Ok(()) }
//! ```
//!
//! For a runnable demo, see `cargo run -p wordnet-morphy --example lookup -- <dict> [--demo|<word>]`.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use prose_types::Category;

mod lexicon;

pub use lexicon::{Lexicon, LoadMode};
use lexicon::normalize_lemma;

/// Where a candidate lemma originated.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CandidateSource {
    Surface,
    Exception,
    Rule {
        suffix: &'static str,
        replacement: &'static str,
    },
}

/// A lemma candidate paired with its category and provenance.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LemmaCandidate<'a> {
    pub category: Category,
    pub lemma: Cow<'a, str>,
    pub source: CandidateSource,
}

/// Morphy over caller-provided existence checks.
#[derive(Clone, Debug, Default)]
pub struct Morphy {
    exceptions: HashMap<Category, HashMap<String, Vec<String>>>,
}

impl Morphy {
    /// Load morphy exception lists (`*.exc`) from a WordNet dict directory.
    ///
    /// Files are optional; missing ones are treated as empty.
    pub fn load(dict_dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dict_dir.as_ref();
        let mut exceptions = HashMap::new();
        for category in Category::ALL {
            let path = dir.join(format!("{}.exc", category.file_stem()));
            exceptions.insert(category, load_exc(path)?);
        }
        Ok(Self { exceptions })
    }

    /// Build from in-memory exception lists (`surface -> lemmas`).
    pub fn from_exceptions(exceptions: HashMap<Category, HashMap<String, Vec<String>>>) -> Self {
        Self { exceptions }
    }

    /// Generate lemmas for a surface form, returning enriched provenance.
    pub fn lemmas_for<'a, F>(
        &'a self,
        category: Category,
        surface: &str,
        lemma_exists: F,
    ) -> Vec<LemmaCandidate<'a>>
    where
        F: Fn(Category, &str) -> bool,
    {
        let mut seen: HashSet<Cow<'a, str>> = HashSet::new();
        let mut out: Vec<LemmaCandidate<'a>> = Vec::new();
        let norm_surface = normalize_lemma(surface);

        if lemma_exists(category, &norm_surface) {
            push_unique(
                &mut out,
                &mut seen,
                LemmaCandidate {
                    category,
                    lemma: Cow::Owned(norm_surface.clone()),
                    source: CandidateSource::Surface,
                },
            );
        }

        if let Some(exc_map) = self.exceptions.get(&category)
            && let Some(entries) = exc_map.get(&norm_surface)
        {
            for lemma in entries {
                if lemma_exists(category, lemma) {
                    push_unique(
                        &mut out,
                        &mut seen,
                        LemmaCandidate {
                            category,
                            lemma: Cow::Borrowed(lemma.as_str()),
                            source: CandidateSource::Exception,
                        },
                    );
                }
            }
        }

        for &(suffix, replacement) in rules_for(category) {
            let Some((stem, undoubled)) = apply_rule(&norm_surface, suffix, replacement) else {
                continue;
            };
            // The plain stem wins; the undoubled form is only a fallback.
            let candidate = if lemma_exists(category, &stem) {
                stem
            } else {
                match undoubled {
                    Some(undoubled) if lemma_exists(category, &undoubled) => undoubled,
                    _ => continue,
                }
            };
            push_unique(
                &mut out,
                &mut seen,
                LemmaCandidate {
                    category,
                    lemma: Cow::Owned(candidate),
                    source: CandidateSource::Rule {
                        suffix,
                        replacement,
                    },
                },
            );
        }

        out
    }
}

/// Morphy plus a lexicon: one lemma per `(word, category)`.
#[derive(Clone, Debug, Default)]
pub struct WordNetLemmatizer {
    morphy: Morphy,
    lexicon: Lexicon,
}

impl WordNetLemmatizer {
    pub fn new(morphy: Morphy, lexicon: Lexicon) -> Self {
        Self { morphy, lexicon }
    }

    pub fn load(dict_dir: impl AsRef<Path>) -> Result<Self> {
        Self::load_with_mode(dict_dir, LoadMode::Mmap)
    }

    pub fn load_with_mode(dict_dir: impl AsRef<Path>, mode: LoadMode) -> Result<Self> {
        let dir = dict_dir.as_ref();
        let lexicon = Lexicon::load_with_mode(dir, mode)
            .with_context(|| format!("loading lexicon from {}", dir.display()))?;
        let morphy = Morphy::load(dir)
            .with_context(|| format!("loading exceptions from {}", dir.display()))?;
        Ok(Self { morphy, lexicon })
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn candidates<'a>(&'a self, word: &str, category: Category) -> Vec<LemmaCandidate<'a>> {
        self.morphy.lemmas_for(category, word, |c, lemma| {
            self.lexicon.lemma_exists(c, lemma)
        })
    }

    /// Shortest known lemma, or `word` unchanged when WordNet has none.
    pub fn lemmatize(&self, word: &str, category: Category) -> String {
        self.candidates(word, category)
            .into_iter()
            .reduce(|best, next| {
                if next.lemma.len() < best.lemma.len() {
                    next
                } else {
                    best
                }
            })
            .map(|cand| cand.lemma.into_owned())
            .unwrap_or_else(|| word.to_string())
    }
}

fn load_exc(path: PathBuf) -> Result<HashMap<String, Vec<String>>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }
    let file =
        File::open(&path).with_context(|| format!("open exception file {}", path.display()))?;
    let reader = BufReader::new(file);
    let mut map = HashMap::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line =
            line.with_context(|| format!("read line {} in {}", lineno + 1, path.display()))?;
        let mut parts = line.split_whitespace();
        let surface = match parts.next() {
            Some(s) => normalize_lemma(s),
            None => continue,
        };
        let lemmas: Vec<String> = parts.map(normalize_lemma).collect();
        if !lemmas.is_empty() {
            map.insert(surface, lemmas);
        }
    }
    Ok(map)
}

fn push_unique<'a>(
    out: &mut Vec<LemmaCandidate<'a>>,
    seen: &mut HashSet<Cow<'a, str>>,
    candidate: LemmaCandidate<'a>,
) {
    if seen.insert(candidate.lemma.clone()) {
        out.push(candidate);
    }
}

/// Inflectional suffixes that double a final consonant ("running", "bigger").
const DOUBLING_SUFFIXES: &[&str] = &["ed", "ing", "er", "est"];

/// Stem produced by one rule, plus its undoubled form ("runn" -> "run") when
/// the suffix is one that doubles consonants.
fn apply_rule(surface: &str, suffix: &str, replacement: &str) -> Option<(String, Option<String>)> {
    let stem = surface.strip_suffix(suffix)?;
    if stem.is_empty() {
        return None;
    }
    let candidate = format!("{stem}{replacement}");

    let mut undoubled = None;
    if replacement.is_empty() && DOUBLING_SUFFIXES.contains(&suffix) {
        let mut chars = candidate.chars();
        let last = chars.next_back();
        let prev = chars.next_back();
        if let (Some(a), Some(b)) = (last, prev)
            && a == b
        {
            let mut single = candidate.clone();
            single.pop();
            undoubled = Some(single);
        }
    }
    Some((candidate, undoubled))
}

fn rules_for(category: Category) -> &'static [(&'static str, &'static str)] {
    match category {
        Category::Noun => &[
            ("s", ""),
            ("ses", "s"),
            ("ves", "f"),
            ("xes", "x"),
            ("zes", "z"),
            ("ches", "ch"),
            ("shes", "sh"),
            ("men", "man"),
            ("ies", "y"),
        ],
        Category::Verb => &[
            ("s", ""),
            ("ies", "y"),
            ("es", "e"),
            ("es", ""),
            ("ed", "e"),
            ("ed", ""),
            ("ing", "e"),
            ("ing", ""),
        ],
        Category::Adj => &[("er", ""), ("est", ""), ("er", "e"), ("est", "e")],
        Category::Adv => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_exists(targets: &[(&str, Category)]) -> impl Fn(Category, &str) -> bool {
        let set: HashSet<(Category, String)> = targets
            .iter()
            .map(|(lemma, category)| (*category, normalize_lemma(lemma)))
            .collect();
        move |category, lemma| set.contains(&(category, normalize_lemma(lemma)))
    }

    fn morphy_with_children() -> Morphy {
        Morphy::from_exceptions(HashMap::from([(
            Category::Noun,
            HashMap::from([("children".into(), vec!["child".into()])]),
        )]))
    }

    #[test]
    fn uses_exceptions_and_rules() {
        let morph = morphy_with_children();
        let candidates = morph.lemmas_for(
            Category::Noun,
            "children",
            fake_exists(&[("child", Category::Noun)]),
        );
        assert_eq!(candidates.len(), 1);
        assert!(matches!(candidates[0].source, CandidateSource::Exception));
        assert_eq!(candidates[0].lemma, "child");
    }

    #[test]
    fn includes_surface_and_rule_hits() {
        let morph = Morphy::default();
        let candidates = morph.lemmas_for(
            Category::Verb,
            "running",
            fake_exists(&[("running", Category::Verb), ("run", Category::Verb)]),
        );
        assert_eq!(candidates.len(), 2);
        assert!(matches!(candidates[0].source, CandidateSource::Surface));
        assert!(matches!(candidates[1].source, CandidateSource::Rule { .. }));
    }

    #[test]
    fn keeps_genuine_double_consonants() {
        let morph = Morphy::default();
        let candidates = morph.lemmas_for(
            Category::Verb,
            "called",
            fake_exists(&[("call", Category::Verb)]),
        );
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].lemma, "call");
    }

    #[test]
    fn plural_nouns_are_never_undoubled() {
        let morph = Morphy::default();
        let candidates = morph.lemmas_for(
            Category::Noun,
            "bells",
            fake_exists(&[("bell", Category::Noun), ("bel", Category::Noun)]),
        );
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].lemma, "bell");

        let lexicon = Lexicon::from_lemmas([
            (Category::Noun, "bell"),
            (Category::Noun, "bel"),
            (Category::Noun, "cell"),
            (Category::Noun, "cel"),
            (Category::Adj, "big"),
            (Category::Verb, "stop"),
        ]);
        let lemmatizer = WordNetLemmatizer::new(Morphy::default(), lexicon);
        assert_eq!(lemmatizer.lemmatize("bells", Category::Noun), "bell");
        assert_eq!(lemmatizer.lemmatize("cells", Category::Noun), "cell");
        assert_eq!(lemmatizer.lemmatize("bigger", Category::Adj), "big");
        assert_eq!(lemmatizer.lemmatize("stopped", Category::Verb), "stop");
    }

    #[test]
    fn adverbs_have_no_suffix_rules() {
        let morph = Morphy::default();
        let candidates = morph.lemmas_for(
            Category::Adv,
            "faster",
            fake_exists(&[("fast", Category::Adv)]),
        );
        assert!(candidates.is_empty());
    }

    #[test]
    fn lemmatizer_prefers_shortest_candidate() {
        let lexicon = Lexicon::from_lemmas([
            (Category::Verb, "running"),
            (Category::Verb, "run"),
            (Category::Noun, "child"),
            (Category::Noun, "wolf"),
            (Category::Adj, "wild"),
        ]);
        let lemmatizer = WordNetLemmatizer::new(morphy_with_children(), lexicon);
        assert_eq!(lemmatizer.lemmatize("running", Category::Verb), "run");
        assert_eq!(lemmatizer.lemmatize("Children", Category::Noun), "child");
        assert_eq!(lemmatizer.lemmatize("wolves", Category::Noun), "wolf");
        assert_eq!(lemmatizer.lemmatize("wildest", Category::Adj), "wild");
    }

    #[test]
    fn lemmatizer_returns_unknown_words_unchanged() {
        let lemmatizer = WordNetLemmatizer::default();
        assert_eq!(lemmatizer.lemmatize("Hal", Category::Noun), "Hal");
    }
}
