use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use prose_types::{LemmaToken, TagMap, Tagged, Token};
use tracing::{debug, info, warn};
use wordnet_morphy::WordNetLemmatizer;

use crate::cache::AnnotationCache;
use crate::config::Config;
use crate::corpus::{CorpusSource, DirectorySource};
use crate::error::{PipelineError, TaggerError};
use crate::lemmatizer::Lemmatizer;
use crate::tagger::{LexiconTagger, Tagger};

/// Cache-aware tagging and lemmatization of corpora.
pub struct Annotator<S, T, L> {
    source: S,
    tagger: T,
    lemmatizer: L,
    cache: AnnotationCache,
    tag_map: Arc<TagMap>,
}

impl<S, T, L> Annotator<S, T, L>
where
    S: CorpusSource,
    T: Tagger,
    L: Lemmatizer,
{
    pub fn new(
        source: S,
        tagger: T,
        lemmatizer: L,
        cache: AnnotationCache,
        tag_map: Arc<TagMap>,
    ) -> Self {
        Self {
            source,
            tagger,
            lemmatizer,
            cache,
            tag_map,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn cache(&self) -> &AnnotationCache {
        &self.cache
    }

    pub fn tag_map(&self) -> &TagMap {
        &self.tag_map
    }

    /// Tagged stream for `corpus_id`, from the cache when present.
    ///
    /// On a miss the raw text is loaded and tagged, and the result cached. A
    /// failed cache write is logged; the stream is still returned.
    pub fn tag(&self, corpus_id: &str) -> Result<Vec<Token>, PipelineError> {
        if let Some(stream) = self.cache.get(corpus_id) {
            info!("loaded {} cached tokens for `{corpus_id}`", stream.len());
            return Ok(stream);
        }

        let start = Instant::now();
        let text = self.source.load(corpus_id)?;
        let stream = self.tagger.tokenize_and_tag(&text)?;
        validate(&stream)?;
        info!(
            "tagged {} tokens for `{corpus_id}` in {} ms",
            stream.len(),
            start.elapsed().as_millis()
        );

        if let Err(err) = self.cache.put(corpus_id, &stream) {
            warn!("could not cache tokens for `{corpus_id}`: {err}");
        }
        Ok(stream)
    }

    /// Drop any cached entry and tag from scratch.
    pub fn retag(&self, corpus_id: &str) -> Result<Vec<Token>, PipelineError> {
        match self.cache.invalidate(corpus_id) {
            Ok(true) => debug!("invalidated cached tokens for `{corpus_id}`"),
            Ok(false) => {}
            Err(err) => warn!("could not invalidate cache for `{corpus_id}`: {err}"),
        }
        self.tag(corpus_id)
    }

    /// Lemmas of the tokens whose tag has a coarse category, in stream order.
    /// Tokens without a category are dropped.
    pub fn lemmatize(&self, stream: &[Token]) -> Result<Vec<LemmaToken>, PipelineError> {
        let mut lemmas = Vec::with_capacity(stream.len());
        for token in stream {
            let Some(category) = self.tag_map.coarse_category(token.tag()) else {
                continue;
            };
            let lemma = self.lemmatizer.lemmatize(token.word(), category)?;
            lemmas.push(LemmaToken::new(lemma, category));
        }
        debug!(
            "lemmatized {} of {} tokens",
            lemmas.len(),
            stream.len()
        );
        Ok(lemmas)
    }
}

impl Annotator<DirectorySource, LexiconTagger, WordNetLemmatizer> {
    /// Default stack: text files, lexicon tagger, WordNet lemmatizer.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let source = DirectorySource::new(&config.corpus_dir);
        let tagger = match &config.lexicon_path {
            Some(path) => LexiconTagger::load(path)?,
            None => LexiconTagger::new(),
        };
        let lemmatizer =
            WordNetLemmatizer::load_with_mode(&config.wordnet_dir, config.wordnet_mode)
                .with_context(|| format!("loading WordNet from {}", config.wordnet_dir.display()))?;
        let cache = AnnotationCache::open(&config.cache_dir)?;
        Ok(Self::new(
            source,
            tagger,
            lemmatizer,
            cache,
            Arc::new(TagMap::penn_treebank()),
        ))
    }
}

/// Tagger output must have a surface form and a tag for every token.
fn validate(stream: &[Token]) -> Result<(), TaggerError> {
    for (index, token) in stream.iter().enumerate() {
        if token.word().is_empty() {
            return Err(TaggerError::Malformed {
                index,
                reason: "empty surface form".to_string(),
            });
        }
        if token.tag().is_empty() {
            return Err(TaggerError::Malformed {
                index,
                reason: format!("empty tag for `{}`", token.word()),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use prose_types::Category;

    use crate::corpus::MemorySource;
    use crate::lemmatizer::IdentityLemmatizer;

    struct FixedTagger(Vec<Token>);

    impl Tagger for FixedTagger {
        fn tokenize_and_tag(&self, _text: &str) -> Result<Vec<Token>, TaggerError> {
            Ok(self.0.clone())
        }
    }

    struct UpperLemmatizer;

    impl Lemmatizer for UpperLemmatizer {
        fn lemmatize(&self, word: &str, _category: Category) -> Result<String, TaggerError> {
            Ok(word.to_uppercase())
        }
    }

    fn annotator<T: Tagger, L: Lemmatizer>(
        dir: &std::path::Path,
        tagger: T,
        lemmatizer: L,
    ) -> Annotator<MemorySource, T, L> {
        Annotator::new(
            MemorySource::new().with_text("book", "irrelevant"),
            tagger,
            lemmatizer,
            AnnotationCache::open(dir).unwrap(),
            Arc::new(TagMap::penn_treebank()),
        )
    }

    #[test]
    fn lemmatize_drops_tokens_without_category() {
        let dir = tempfile::tempdir().unwrap();
        let annotator = annotator(dir.path(), FixedTagger(Vec::new()), UpperLemmatizer);
        let stream = vec![
            Token::new("the", "DT"),
            Token::new("wildest", "JJS"),
            Token::new("dogs", "NNS"),
            Token::new(",", ","),
            Token::new("ran", "VBD"),
            Token::new("off", "RP"),
            Token::new("quickly", "RB"),
            Token::new("??", "XYZ"),
        ];
        let lemmas = annotator.lemmatize(&stream).unwrap();
        assert_eq!(
            lemmas,
            vec![
                LemmaToken::new("WILDEST", Category::Adj),
                LemmaToken::new("DOGS", Category::Noun),
                LemmaToken::new("RAN", Category::Verb),
                LemmaToken::new("OFF", Category::Adj),
                LemmaToken::new("QUICKLY", Category::Adv),
            ]
        );
    }

    #[test]
    fn reduced_tag_maps_drive_lemmatization() {
        let dir = tempfile::tempdir().unwrap();
        let annotator = Annotator::new(
            MemorySource::new(),
            FixedTagger(Vec::new()),
            IdentityLemmatizer,
            AnnotationCache::open(dir.path()).unwrap(),
            Arc::new(TagMap::from_entries([("NN", Some(Category::Noun))])),
        );
        let stream = vec![Token::new("fox", "NN"), Token::new("quick", "JJ")];
        let lemmas = annotator.lemmatize(&stream).unwrap();
        assert_eq!(lemmas, vec![LemmaToken::new("fox", Category::Noun)]);
    }

    #[test]
    fn malformed_tagger_output_is_rejected_and_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let tagger = FixedTagger(vec![Token::new("fox", "NN"), Token::new("jumps", "")]);
        let annotator = annotator(dir.path(), tagger, IdentityLemmatizer);
        let err = annotator.tag("book").unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Tagger(TaggerError::Malformed { index: 1, .. })
        ));
        assert!(!annotator.cache().contains("book"));
    }

    #[test]
    fn missing_corpus_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let annotator = annotator(dir.path(), FixedTagger(Vec::new()), IdentityLemmatizer);
        let err = annotator.tag("absent").unwrap_err();
        assert!(matches!(err, PipelineError::Corpus(_)));
    }
}
