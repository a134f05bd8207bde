//! Cached part-of-speech annotation and co-occurrence statistics for prose.
//!
//! Raw text comes from a [`CorpusSource`], is tagged by a [`Tagger`] and
//! memoized in an [`AnnotationCache`] by the [`Annotator`], which can also
//! project the tagged stream onto lemmas through a [`TagMap`] and a
//! [`Lemmatizer`]. The [`analyzer`] queries count words over either stream and
//! [`ReportBuilder`] renders their top entries.
//!
//! ```no_run
//! use prose_stats::{Annotator, Config, ReportBuilder, TagFilter, analyzer};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::from_env();
//! let annotator = Annotator::from_config(&config)?;
//! let tokens = annotator.tag("hamlet")?;
//! let pairs = analyzer::adjacent_pairs(
//!     &tokens,
//!     &TagFilter::family("JJ"),
//!     &TagFilter::family("NN"),
//! );
//! print!("{}", ReportBuilder::new().section("Adjective + noun", &pairs, config.top_k).render_text());
//! # Ok(()) }
//! ```

pub mod analyzer;
pub mod annotator;
pub mod cache;
pub mod config;
pub mod corpus;
pub mod count_table;
pub mod error;
pub mod lemmatizer;
pub mod report;
pub mod tagger;

pub use annotator::Annotator;
pub use cache::AnnotationCache;
pub use config::Config;
pub use corpus::{CorpusSource, DirectorySource, MemorySource, export_chapters, split_chapters};
pub use count_table::CountTable;
pub use error::{CacheError, CorpusError, PipelineError, TaggerError};
pub use lemmatizer::{IdentityLemmatizer, Lemmatizer};
pub use prose_types::{Category, LemmaToken, TagFilter, TagMap, Tagged, Token};
pub use report::ReportBuilder;
pub use tagger::{LexiconTagger, Tagger, tokenize};
