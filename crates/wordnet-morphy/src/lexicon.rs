use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use memmap2::Mmap;
use prose_types::Category;

/// Strategy for reading the `index.*` files.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LoadMode {
    /// Memory-map each index file while parsing.
    Mmap,
    /// Read each file into an owned buffer (portable fallback).
    Owned,
}

enum Buffer {
    Mmap(Mmap),
    Owned(Vec<u8>),
}

impl Buffer {
    fn as_slice(&self) -> &[u8] {
        match self {
            Buffer::Mmap(m) => m.as_ref(),
            Buffer::Owned(v) => v.as_slice(),
        }
    }
}

/// Set of lemmas known to WordNet, per coarse category.
///
/// Only the lemma column of `index.noun|verb|adj|adv` is kept; synsets and
/// glosses are never parsed.
#[derive(Clone, Debug, Default)]
pub struct Lexicon {
    lemmas: HashMap<Category, HashSet<String>>,
}

impl Lexicon {
    pub fn load(dict_dir: impl AsRef<Path>) -> Result<Self> {
        Self::load_with_mode(dict_dir, LoadMode::Mmap)
    }

    pub fn load_with_mode(dict_dir: impl AsRef<Path>, mode: LoadMode) -> Result<Self> {
        let dir = dict_dir.as_ref();
        let mut lemmas = HashMap::new();
        for category in Category::ALL {
            let path = dir.join(format!("index.{}", category.file_stem()));
            if !path.exists() {
                anyhow::bail!("missing required WordNet file: {}", path.display());
            }
            let buffer = load_file(path.clone(), mode)?;
            let set = parse_index_lemmas(buffer.as_slice())
                .with_context(|| format!("parse {}", path.display()))?;
            lemmas.insert(category, set);
        }
        Ok(Self { lemmas })
    }

    /// Build a lexicon from explicit `(category, lemma)` pairs.
    pub fn from_lemmas<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Category, S)>,
        S: AsRef<str>,
    {
        let mut lemmas: HashMap<Category, HashSet<String>> = HashMap::new();
        for (category, lemma) in entries {
            lemmas
                .entry(category)
                .or_default()
                .insert(normalize_lemma(lemma.as_ref()));
        }
        Self { lemmas }
    }

    pub fn lemma_exists(&self, category: Category, lemma: &str) -> bool {
        self.lemmas
            .get(&category)
            .is_some_and(|set| set.contains(&normalize_lemma(lemma)))
    }

    pub fn lemma_count(&self) -> usize {
        self.lemmas.values().map(HashSet::len).sum()
    }
}

fn load_file(path: PathBuf, mode: LoadMode) -> Result<Buffer> {
    let file = File::open(&path).with_context(|| format!("open {}", path.display()))?;
    match mode {
        LoadMode::Mmap => {
            // Safety: the mapping is read-only and dropped before `load_with_mode` returns.
            let mmap = unsafe { Mmap::map(&file) }
                .with_context(|| format!("mmap {}", path.display()))?;
            Ok(Buffer::Mmap(mmap))
        }
        LoadMode::Owned => {
            let mut buf = Vec::new();
            let mut file = file;
            file.read_to_end(&mut buf)
                .with_context(|| format!("read {}", path.display()))?;
            Ok(Buffer::Owned(buf))
        }
    }
}

fn parse_index_lemmas(bytes: &[u8]) -> Result<HashSet<String>> {
    let text = std::str::from_utf8(bytes).context("index file is not valid utf8")?;
    let mut set = HashSet::new();
    for line in text.lines() {
        // License header lines are indented.
        if line.is_empty() || line.starts_with(' ') {
            continue;
        }
        if let Some(lemma) = line.split_whitespace().next() {
            set.insert(normalize_lemma(lemma));
        }
    }
    Ok(set)
}

pub(crate) fn normalize_lemma(text: &str) -> String {
    text.trim().to_lowercase().replace(' ', "_")
}
