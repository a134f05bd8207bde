//! Disk cache of tagged streams, keyed by corpus id.
//!
//! One JSON file per corpus id. The file name is the id with every
//! non-alphanumeric character replaced by `_`, followed by the CRC32 of the raw
//! id so `a/b` and `a_b` never share an entry. The on-disk schema is versioned
//! and independent of [`Token`]; an entry written under another schema version
//! (or for another id, or truncated) is treated as a miss.
//!
//! Entries are replaced wholesale, never edited. The cache does not look at
//! the raw text: after editing a corpus, call [`AnnotationCache::invalidate`].
//! At most one process may write a given id at a time.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use prose_types::{Tagged, Token};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::CacheError;

/// Bump when the entry layout or the tag inventory changes.
pub const SCHEMA_VERSION: u32 = 1;

const ENTRY_SUFFIX: &str = ".tokens.json";
/// Byte cap on the readable part of a file name; the CRC keeps names distinct.
const MAX_STEM_BYTES: usize = 100;

#[derive(Serialize)]
struct EntryRef<'a> {
    schema_version: u32,
    corpus_id: &'a str,
    tokens: Vec<(&'a str, &'a str)>,
}

#[derive(Deserialize)]
struct EntryOwned {
    schema_version: u32,
    corpus_id: String,
    tokens: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
pub struct AnnotationCache {
    dir: PathBuf,
}

impl AnnotationCache {
    /// Open (creating if needed) a cache rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| CacheError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Deterministic location of the entry for `corpus_id`.
    pub fn entry_path(&self, corpus_id: &str) -> PathBuf {
        self.dir.join(entry_file_name(corpus_id))
    }

    pub fn contains(&self, corpus_id: &str) -> bool {
        self.entry_path(corpus_id).is_file()
    }

    /// Stored stream for `corpus_id`; `None` when absent or unreadable.
    pub fn get(&self, corpus_id: &str) -> Option<Vec<Token>> {
        let path = self.entry_path(corpus_id);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("cache miss for `{corpus_id}`");
                return None;
            }
            Err(err) => {
                warn!("unreadable cache entry {}: {err}", path.display());
                return None;
            }
        };

        let entry: EntryOwned = match serde_json::from_slice(&bytes) {
            Ok(entry) => entry,
            Err(err) => {
                warn!("discarding corrupt cache entry {}: {err}", path.display());
                return None;
            }
        };
        if entry.schema_version != SCHEMA_VERSION {
            warn!(
                "discarding cache entry {} with schema version {} (expected {SCHEMA_VERSION})",
                path.display(),
                entry.schema_version
            );
            return None;
        }
        if entry.corpus_id != corpus_id {
            warn!(
                "cache entry {} belongs to `{}`, not `{corpus_id}`",
                path.display(),
                entry.corpus_id
            );
            return None;
        }

        Some(entry.tokens.into_iter().map(Token::from).collect())
    }

    /// Store `stream` for `corpus_id`, replacing any previous entry.
    ///
    /// The entry is written to a sibling temp file and renamed into place, so
    /// readers see either the old entry or the new one.
    pub fn put(&self, corpus_id: &str, stream: &[Token]) -> Result<(), CacheError> {
        let entry = EntryRef {
            schema_version: SCHEMA_VERSION,
            corpus_id,
            tokens: stream.iter().map(|t| (t.word(), t.tag())).collect(),
        };
        let bytes = serde_json::to_vec(&entry).map_err(|source| CacheError::Encode {
            id: corpus_id.to_string(),
            source,
        })?;

        let path = self.entry_path(corpus_id);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, &bytes).map_err(|source| CacheError::Io {
            path: tmp.clone(),
            source,
        })?;
        if let Err(source) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(CacheError::Io { path, source });
        }
        debug!("cached {} tokens for `{corpus_id}`", stream.len());
        Ok(())
    }

    /// Remove the entry; returns whether one existed.
    pub fn invalidate(&self, corpus_id: &str) -> Result<bool, CacheError> {
        let path = self.entry_path(corpus_id);
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(source) => Err(CacheError::Io { path, source }),
        }
    }
}

fn entry_file_name(corpus_id: &str) -> String {
    let mut sanitized = String::new();
    for c in corpus_id.chars() {
        let c = if c.is_alphanumeric() { c } else { '_' };
        if sanitized.len() + c.len_utf8() > MAX_STEM_BYTES {
            break;
        }
        sanitized.push(c);
    }
    format!(
        "{sanitized}-{:08x}{ENTRY_SUFFIX}",
        crc32fast::hash(corpus_id.as_bytes())
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Token> {
        vec![
            Token::new("Alas", "NNP"),
            Token::new(",", ","),
            Token::new("poor", "JJ"),
            Token::new("Yorick", "NNP"),
        ]
    }

    #[test]
    fn file_names_are_deterministic_and_distinct() {
        assert_eq!(entry_file_name("a/b"), entry_file_name("a/b"));
        assert_ne!(entry_file_name("a/b"), entry_file_name("a_b"));
        assert!(entry_file_name("Texts/Hamlet").starts_with("Texts_Hamlet-"));
        assert!(entry_file_name("Texts/Hamlet").ends_with(ENTRY_SUFFIX));
    }

    #[test]
    fn long_ids_get_bounded_file_names() {
        let long = "chapter/".repeat(200);
        let name = entry_file_name(&long);
        assert!(name.len() <= 255);
        assert_ne!(name, entry_file_name(&format!("{long}x")));

        let dir = tempfile::tempdir().unwrap();
        let cache = AnnotationCache::open(dir.path()).unwrap();
        cache.put(&long, &sample()).unwrap();
        assert_eq!(cache.get(&long), Some(sample()));
    }

    #[test]
    fn failed_rename_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let cache = AnnotationCache::open(dir.path()).unwrap();
        let blocker = cache.entry_path("hamlet");
        fs::create_dir(&blocker).unwrap();
        fs::write(blocker.join("occupied"), b"x").unwrap();

        assert!(matches!(
            cache.put("hamlet", &sample()),
            Err(CacheError::Io { .. })
        ));
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn get_after_put_returns_identical_stream() {
        let dir = tempfile::tempdir().unwrap();
        let cache = AnnotationCache::open(dir.path()).unwrap();
        assert_eq!(cache.get("hamlet"), None);

        cache.put("hamlet", &sample()).unwrap();
        assert!(cache.contains("hamlet"));
        assert_eq!(cache.get("hamlet"), Some(sample()));
    }

    #[test]
    fn put_replaces_previous_entry() {
        let dir = tempfile::tempdir().unwrap();
        let cache = AnnotationCache::open(dir.path()).unwrap();
        cache.put("hamlet", &sample()).unwrap();
        cache.put("hamlet", &[Token::new("Ophelia", "NNP")]).unwrap();
        assert_eq!(cache.get("hamlet"), Some(vec![Token::new("Ophelia", "NNP")]));
    }

    #[test]
    fn empty_streams_are_cached() {
        let dir = tempfile::tempdir().unwrap();
        let cache = AnnotationCache::open(dir.path()).unwrap();
        cache.put("empty", &[]).unwrap();
        assert_eq!(cache.get("empty"), Some(Vec::new()));
    }

    #[test]
    fn corrupt_or_foreign_entries_miss() {
        let dir = tempfile::tempdir().unwrap();
        let cache = AnnotationCache::open(dir.path()).unwrap();

        fs::write(cache.entry_path("truncated"), b"{\"schema_version\": 1, \"tok").unwrap();
        assert_eq!(cache.get("truncated"), None);

        let old = r#"{"schema_version":0,"corpus_id":"old","tokens":[["a","DT"]]}"#;
        fs::write(cache.entry_path("old"), old).unwrap();
        assert_eq!(cache.get("old"), None);

        let foreign = r#"{"schema_version":1,"corpus_id":"other","tokens":[]}"#;
        fs::write(cache.entry_path("mine"), foreign).unwrap();
        assert_eq!(cache.get("mine"), None);
    }

    #[test]
    fn invalidate_reports_whether_an_entry_existed() {
        let dir = tempfile::tempdir().unwrap();
        let cache = AnnotationCache::open(dir.path()).unwrap();
        cache.put("hamlet", &sample()).unwrap();
        assert!(cache.invalidate("hamlet").unwrap());
        assert!(!cache.invalidate("hamlet").unwrap());
        assert_eq!(cache.get("hamlet"), None);
    }
}
