use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::CorpusError;

pub const DEFAULT_CHAPTER_DELIMITER: &str = "<ch>";

/// Supplies raw text by corpus id and stores derived texts.
pub trait CorpusSource {
    fn load(&self, id: &str) -> Result<String, CorpusError>;
    fn save(&self, id: &str, text: &str) -> Result<(), CorpusError>;
}

impl<S: CorpusSource + ?Sized> CorpusSource for &S {
    fn load(&self, id: &str) -> Result<String, CorpusError> {
        (**self).load(id)
    }

    fn save(&self, id: &str, text: &str) -> Result<(), CorpusError> {
        (**self).save(id, text)
    }
}

/// Plain-text files under a root directory: id `a/b` lives at `<root>/a/b.txt`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, id: &str) -> PathBuf {
        self.root.join(format!("{id}.txt"))
    }
}

impl CorpusSource for DirectorySource {
    fn load(&self, id: &str) -> Result<String, CorpusError> {
        fs::read_to_string(self.path_for(id)).map_err(|source| match source.kind() {
            ErrorKind::NotFound => CorpusError::NotFound { id: id.to_string() },
            _ => CorpusError::Io {
                id: id.to_string(),
                source,
            },
        })
    }

    fn save(&self, id: &str, text: &str) -> Result<(), CorpusError> {
        let path = self.path_for(id);
        let io_err = |source| CorpusError::Io {
            id: id.to_string(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(&path, text).map_err(io_err)
    }
}

/// In-memory corpus, handy for tests and for embedding small texts.
#[derive(Debug, Default)]
pub struct MemorySource {
    texts: RefCell<HashMap<String, String>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(self, id: impl Into<String>, text: impl Into<String>) -> Self {
        self.texts.borrow_mut().insert(id.into(), text.into());
        self
    }

    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.texts.borrow().keys().cloned().collect();
        ids.sort();
        ids
    }
}

impl CorpusSource for MemorySource {
    fn load(&self, id: &str) -> Result<String, CorpusError> {
        self.texts
            .borrow()
            .get(id)
            .cloned()
            .ok_or_else(|| CorpusError::NotFound { id: id.to_string() })
    }

    fn save(&self, id: &str, text: &str) -> Result<(), CorpusError> {
        self.texts
            .borrow_mut()
            .insert(id.to_string(), text.to_string());
        Ok(())
    }
}

/// Split on every delimiter occurrence; empty pieces are kept so chapter
/// numbers line up with delimiter positions.
pub fn split_chapters<'a>(text: &'a str, delimiter: &str) -> Vec<&'a str> {
    if delimiter.is_empty() {
        return vec![text];
    }
    text.split(delimiter).collect()
}

/// Save each chapter of `id` as `<id>_ch<N>` and return the new ids in order.
pub fn export_chapters<S: CorpusSource + ?Sized>(
    source: &S,
    id: &str,
    delimiter: &str,
) -> Result<Vec<String>, CorpusError> {
    let text = source.load(id)?;
    let chapters = split_chapters(&text, delimiter);
    info!("splitting `{id}` into {} chapters", chapters.len());

    let mut ids = Vec::with_capacity(chapters.len());
    for (index, chapter) in chapters.into_iter().enumerate() {
        let chapter_id = format!("{id}_ch{index}");
        source.save(&chapter_id, chapter)?;
        ids.push(chapter_id);
    }
    Ok(ids)
}
