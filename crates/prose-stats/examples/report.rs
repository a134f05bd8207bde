//! Print the usual statistics for one corpus.
//!
//! ```bash
//! CORPUS_DIR=texts WORDNET_DIR=wordnet cargo run -p prose-stats --example report -- hamlet [target]
//! ```

use std::env;

use anyhow::{Context, Result};
use prose_stats::{Annotator, Config, ReportBuilder, TagFilter, analyzer};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    init_tracing();

    let mut args = env::args().skip(1);
    let corpus_id = args
        .next()
        .context("usage: report <corpus-id> [target-word]")?;
    let target = args.next();

    let config = Config::from_env();
    info!("corpus dir {}", config.corpus_dir.display());
    info!("cache dir {}", config.cache_dir.display());

    let annotator = Annotator::from_config(&config)?;
    let tokens = annotator.tag(&corpus_id)?;
    let lemmas = annotator.lemmatize(&tokens)?;
    let k = config.top_k;

    let adjective = TagFilter::family("JJ");
    let noun = TagFilter::family("NN");

    let mut report = ReportBuilder::new()
        .section(
            "Nouns (lemmas)",
            &analyzer::count_by_category(&lemmas, &TagFilter::exact("NN")),
            k,
        )
        .section(
            "Verbs (lemmas)",
            &analyzer::count_by_category(&lemmas, &TagFilter::exact("VB")),
            k,
        )
        .section(
            "Adjective + noun",
            &analyzer::adjacent_pairs(&tokens, &adjective, &noun),
            k,
        )
        .section("Proper names", &analyzer::proper_name_chains(&tokens), k);

    if let Some(target) = target {
        report = report
            .section(
                format!("Adjectives before `{target}`"),
                &analyzer::words_before(&tokens, &target, &adjective),
                k,
            )
            .section(
                format!("Nouns after `{target}`"),
                &analyzer::words_after(&tokens, &target, &noun),
                k,
            );
    }

    print!("{}", report.render_text());
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .init();
}
