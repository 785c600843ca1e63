//! Term extraction shared by both store backends.
//!
//! Text is lowercased and split on every non-alphanumeric character, so
//! `"Node.js"` indexes as `node` and `js`. Both the stored index and the
//! query go through the same function.

use std::collections::HashSet;

/// Splits text into lowercase alphanumeric terms, in order of appearance.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Tokenizes every field and removes duplicate terms, keeping first occurrence.
pub fn index_terms<'a, I>(fields: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    fields
        .into_iter()
        .flat_map(tokenize)
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

/// Number of distinct query terms present in `terms`.
pub fn match_score(terms: &[String], query_terms: &[String]) -> usize {
    query_terms.iter().filter(|q| terms.contains(q)).count()
}
