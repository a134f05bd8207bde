use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Raw text could not be obtained from (or written to) the corpus source.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("corpus `{id}` not found")]
    NotFound { id: String },
    #[error("failed to access corpus `{id}`: {source}")]
    Io {
        id: String,
        #[source]
        source: io::Error,
    },
}

/// The tagger or lemmatizer failed or produced unusable output.
#[derive(Debug, Error)]
pub enum TaggerError {
    #[error("tagger failed: {0}")]
    Failed(String),
    #[error("malformed token at position {index}: {reason}")]
    Malformed { index: usize, reason: String },
    #[error("failed to read tag lexicon {}: {source}", path.display())]
    Lexicon {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid tag lexicon line {line} in {}: expected `word<TAB>TAG`", path.display())]
    LexiconLine { path: PathBuf, line: usize },
}

/// Explicit cache maintenance failed. Reads never return this; they miss.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache i/o failed at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode cache entry for `{id}`: {source}")]
    Encode {
        id: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Fatal conditions of an annotation run, passed through unmodified.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Corpus(#[from] CorpusError),
    #[error(transparent)]
    Tagger(#[from] TaggerError),
}
