use std::env;
use std::path::PathBuf;

use tracing::warn;
use wordnet_morphy::LoadMode;

const DEFAULT_CORPUS_DIR: &str = "texts";
const DEFAULT_CACHE_SUBDIR: &str = ".annotations";
const DEFAULT_WORDNET_DIR: &str = "wordnet";
const DEFAULT_TOP_K: usize = 20;

/// Locations and defaults for a pipeline run.
#[derive(Debug, Clone)]
pub struct Config {
    pub corpus_dir: PathBuf,
    pub cache_dir: PathBuf,
    pub wordnet_dir: PathBuf,
    pub wordnet_mode: LoadMode,
    pub lexicon_path: Option<PathBuf>,
    pub top_k: usize,
}

impl Default for Config {
    fn default() -> Self {
        let corpus_dir = PathBuf::from(DEFAULT_CORPUS_DIR);
        Self {
            cache_dir: corpus_dir.join(DEFAULT_CACHE_SUBDIR),
            corpus_dir,
            wordnet_dir: PathBuf::from(DEFAULT_WORDNET_DIR),
            wordnet_mode: LoadMode::Mmap,
            lexicon_path: None,
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl Config {
    /// Resolve from `CORPUS_DIR`, `ANNOTATION_CACHE_DIR`, `WORDNET_DIR`,
    /// `WORDNET_LOAD_MODE`, `TAG_LEXICON` and `TOP_K`.
    ///
    /// Unset variables fall back to defaults; unparsable ones are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let corpus_dir = lookup("CORPUS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CORPUS_DIR));
        let cache_dir = lookup("ANNOTATION_CACHE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| corpus_dir.join(DEFAULT_CACHE_SUBDIR));
        let wordnet_dir = lookup("WORDNET_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_WORDNET_DIR));
        let wordnet_mode = lookup("WORDNET_LOAD_MODE")
            .and_then(|raw| {
                let mode = parse_load_mode(&raw);
                if mode.is_none() {
                    warn!("ignoring WORDNET_LOAD_MODE={raw:?}; expected mmap or owned");
                }
                mode
            })
            .unwrap_or(LoadMode::Mmap);
        let lexicon_path = lookup("TAG_LEXICON").map(PathBuf::from);
        let top_k = lookup("TOP_K")
            .and_then(|raw| {
                let k = raw.parse::<usize>().ok().filter(|k| *k > 0);
                if k.is_none() {
                    warn!("ignoring TOP_K={raw:?}; expected a positive integer");
                }
                k
            })
            .unwrap_or(DEFAULT_TOP_K);

        Config {
            corpus_dir,
            cache_dir,
            wordnet_dir,
            wordnet_mode,
            lexicon_path,
            top_k,
        }
    }
}

fn parse_load_mode(raw: &str) -> Option<LoadMode> {
    match raw.to_ascii_lowercase().as_str() {
        "mmap" => Some(LoadMode::Mmap),
        "owned" => Some(LoadMode::Owned),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config.corpus_dir, PathBuf::from("texts"));
        assert_eq!(config.cache_dir, PathBuf::from("texts").join(".annotations"));
        assert_eq!(config.wordnet_mode, LoadMode::Mmap);
        assert_eq!(config.lexicon_path, None);
        assert_eq!(config.top_k, 20);
    }

    #[test]
    fn cache_dir_follows_corpus_dir() {
        let config = Config::from_lookup(lookup(&[("CORPUS_DIR", "books")]));
        assert_eq!(config.cache_dir, PathBuf::from("books").join(".annotations"));
    }

    #[test]
    fn reads_overrides_and_ignores_bad_values() {
        let config = Config::from_lookup(lookup(&[
            ("ANNOTATION_CACHE_DIR", "/tmp/cache"),
            ("WORDNET_LOAD_MODE", "Owned"),
            ("TAG_LEXICON", "tags.tsv"),
            ("TOP_K", "0"),
        ]));
        assert_eq!(config.cache_dir, PathBuf::from("/tmp/cache"));
        assert_eq!(config.wordnet_mode, LoadMode::Owned);
        assert_eq!(config.lexicon_path, Some(PathBuf::from("tags.tsv")));
        assert_eq!(config.top_k, 20);

        let config = Config::from_lookup(lookup(&[("WORDNET_LOAD_MODE", "disk"), ("TOP_K", "5")]));
        assert_eq!(config.wordnet_mode, LoadMode::Mmap);
        assert_eq!(config.top_k, 5);
    }
}
