use prose_types::Category;
use wordnet_morphy::WordNetLemmatizer;

use crate::error::TaggerError;

/// Maps a word and its coarse category to a dictionary base form.
pub trait Lemmatizer {
    fn lemmatize(&self, word: &str, category: Category) -> Result<String, TaggerError>;
}

impl<L: Lemmatizer + ?Sized> Lemmatizer for &L {
    fn lemmatize(&self, word: &str, category: Category) -> Result<String, TaggerError> {
        (**self).lemmatize(word, category)
    }
}

impl Lemmatizer for WordNetLemmatizer {
    fn lemmatize(&self, word: &str, category: Category) -> Result<String, TaggerError> {
        Ok(WordNetLemmatizer::lemmatize(self, word, category))
    }
}

/// Returns every word unchanged; useful when only the category projection matters.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityLemmatizer;

impl Lemmatizer for IdentityLemmatizer {
    fn lemmatize(&self, word: &str, _category: Category) -> Result<String, TaggerError> {
        Ok(word.to_string())
    }
}
