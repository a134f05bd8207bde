use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use prose_types::Category;
use wordnet_morphy::{LoadMode, WordNetLemmatizer};

const USAGE: &str =
    "usage: cargo run -p wordnet-morphy --example lookup -- <dict-dir> [--demo | <word>]";

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let dict_dir = args.next().map(PathBuf::from).context(USAGE)?;
    let next = args.next();
    if args.next().is_some() {
        bail!("too many arguments");
    }

    let words: Vec<String> = match next.as_deref() {
        Some("--demo") => ["running", "better", "children", "wolves", "happiest"]
            .into_iter()
            .map(String::from)
            .collect(),
        Some(word) => vec![word.to_string()],
        None => bail!(USAGE),
    };

    let lemmatizer = WordNetLemmatizer::load_with_mode(&dict_dir, LoadMode::Mmap)?;

    println!("Dictionary: {}", dict_dir.display());
    println!("Lemma keys: {}", lemmatizer.lexicon().lemma_count());

    for word in words {
        println!("\nSurface: {}", word);
        for category in Category::ALL {
            let candidates = lemmatizer.candidates(&word, category);
            if candidates.is_empty() {
                continue;
            }
            println!("  {} -> {}", category, lemmatizer.lemmatize(&word, category));
            for cand in candidates {
                println!("    {:<10} [{:?}]", cand.lemma, cand.source);
            }
        }
    }

    Ok(())
}
