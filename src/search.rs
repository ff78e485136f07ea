//! Company-name substring search.
//!
//! A query matches a record when the lower-cased query occurs anywhere in the
//! record's lower-cased `Company Name`. Matches come back in dataset order and
//! are capped at `limit`. Records without a `Company Name` never match, not
//! even the empty query.

use anyhow::{bail, Result};

use crate::config::Config;
use crate::dataset::Dataset;
use crate::models::Record;

/// Result cap used when none is configured.
pub const DEFAULT_MAX_RESULTS: usize = 20;

/// Returns the first `limit` records whose company name contains `query`,
/// ignoring case.
pub fn search<'a>(dataset: &'a Dataset, query: &str, limit: usize) -> Vec<&'a Record> {
    let needle = query.to_lowercase();

    dataset
        .records()
        .iter()
        .filter(|record| {
            record
                .company_key()
                .is_some_and(|key| key.contains(needle.as_str()))
        })
        .take(limit)
        .collect()
}

/// CLI entry point: loads the dataset, runs the query and prints the matches.
pub fn run_search(config: &Config, query: &str, limit: Option<usize>, json: bool) -> Result<()> {
    let limit = limit.unwrap_or(config.search.max_results);
    if limit == 0 {
        bail!("--limit must be >= 1");
    }

    let dataset = Dataset::load(&config.data.json_path)?;
    let results = search(&dataset, query, limit);
    tracing::debug!(query, matches = results.len(), "search complete");

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No results.");
        return Ok(());
    }

    for (i, record) in results.iter().enumerate() {
        println!("{}. {}", i + 1, record.company_name().unwrap_or_default());
        for (name, value) in record.fields() {
            if name == crate::models::COMPANY_NAME_FIELD || value.is_empty() {
                continue;
            }
            println!("    {}: {}", name, value);
        }
        println!();
    }

    Ok(())
}
