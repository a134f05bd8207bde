//! Frequency and co-occurrence queries over tagged or lemmatized streams.
//!
//! Every query is a single pass that keeps only the previous token as state.
//! Keys are lower-cased, except for proper-name chains which keep their case.
//! Whether a query matches a whole tag or a tag family is up to the
//! [`TagFilter`] the caller passes; the conventional choices are exact tags
//! for [`count_by_category`] and families for the windowed queries.

use prose_types::{TagFilter, Tagged};
use tracing::debug;

use crate::count_table::CountTable;

const PROPER_NOUN_FAMILY: &str = "NNP";
const RIGHT_SINGLE_QUOTE: &str = "’";

/// Lower-cased words whose tag matches `filter`.
pub fn count_by_category<T: Tagged>(stream: &[T], filter: &TagFilter) -> CountTable {
    let mut table = CountTable::new();
    for token in stream.iter().filter(|t| filter.matches(t.tag())) {
        table.increment(&token.word().to_lowercase());
    }
    debug!("{filter}: {} distinct words", table.len());
    table
}

/// Adjacent pairs `"<first> <second>"` where the earlier token matches `first`
/// and the one right after it matches `second`. No gaps are allowed.
pub fn adjacent_pairs<T: Tagged>(
    stream: &[T],
    first: &TagFilter,
    second: &TagFilter,
) -> CountTable {
    let mut table = CountTable::new();
    for pair in stream.windows(2) {
        let (prev, cur) = (&pair[0], &pair[1]);
        if first.matches(prev.tag()) && second.matches(cur.tag()) {
            let key = format!(
                "{} {}",
                prev.word().to_lowercase(),
                cur.word().to_lowercase()
            );
            table.increment(&key);
        }
    }
    debug!("{first} {second}: {} distinct pairs", table.len());
    table
}

/// Words matching `filter` that immediately follow `target` (case-insensitive).
pub fn words_after<T: Tagged>(stream: &[T], target: &str, filter: &TagFilter) -> CountTable {
    let target = target.to_lowercase();
    let mut table = CountTable::new();
    for pair in stream.windows(2) {
        let (prev, cur) = (&pair[0], &pair[1]);
        if filter.matches(cur.tag()) && prev.word().to_lowercase() == target {
            table.increment(&cur.word().to_lowercase());
        }
    }
    debug!("after `{target}` ({filter}): {} distinct words", table.len());
    table
}

/// Words matching `filter` that immediately precede `target` (case-insensitive).
pub fn words_before<T: Tagged>(stream: &[T], target: &str, filter: &TagFilter) -> CountTable {
    let target = target.to_lowercase();
    let mut table = CountTable::new();
    for pair in stream.windows(2) {
        let (prev, cur) = (&pair[0], &pair[1]);
        if filter.matches(prev.tag()) && cur.word().to_lowercase() == target {
            table.increment(&prev.word().to_lowercase());
        }
    }
    debug!("before `{target}` ({filter}): {} distinct words", table.len());
    table
}

/// Maximal runs of proper nouns (`NNP`, `NNPS`) joined by spaces, case kept.
///
/// A right single quote always ends a run, whatever its tag. A run that is
/// still open at the end of the stream is counted.
pub fn proper_name_chains<T: Tagged>(stream: &[T]) -> CountTable {
    let family = TagFilter::family(PROPER_NOUN_FAMILY);
    let mut table = CountTable::new();
    let mut name: Option<String> = None;

    for token in stream {
        let is_name = token.word() != RIGHT_SINGLE_QUOTE && family.matches(token.tag());
        if is_name {
            match name.as_mut() {
                Some(open) => {
                    open.push(' ');
                    open.push_str(token.word());
                }
                None => name = Some(token.word().to_string()),
            }
        } else if let Some(done) = name.take() {
            table.increment(&done);
        }
    }
    if let Some(done) = name {
        table.increment(&done);
    }
    debug!("{} distinct proper names", table.len());
    table
}

/// Entries whose key contains `needle` (case-sensitive), most common first.
pub fn names_containing(table: &CountTable, needle: &str) -> Vec<(String, u64)> {
    table
        .most_common()
        .into_iter()
        .filter(|(name, _)| name.contains(needle))
        .collect()
}
