use std::env;
use std::path::PathBuf;

use prose_types::Category;
use wordnet_morphy::{LoadMode, WordNetLemmatizer};

fn dict_dir() -> Option<PathBuf> {
    env::var("WORDNET_DIR").ok().map(PathBuf::from)
}

#[test]
fn lemmatizes_demo_words_against_open_english_wordnet() {
    let Some(dir) = dict_dir() else {
        eprintln!("skipping: WORDNET_DIR not set");
        return;
    };
    let lemmatizer = WordNetLemmatizer::load_with_mode(&dir, LoadMode::Mmap).expect("load wordnet");

    assert_eq!(lemmatizer.lemmatize("running", Category::Verb), "run");
    assert_eq!(lemmatizer.lemmatize("children", Category::Noun), "child");
    assert_eq!(lemmatizer.lemmatize("dogs", Category::Noun), "dog");
    assert!(!lemmatizer.candidates("better", Category::Adj).is_empty());
}
