// src/loader.rs
// =============================================================================
// Reads the list of URLs to fetch.
//
// The file has one URL per line. Surrounding whitespace is trimmed, blank
// lines are skipped and repeated URLs are kept only once, so the dispatcher
// always gets a clean, unique working set.
// =============================================================================

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

// Loads and cleans the URL list at `path`
//
// Failing to read the file is the one error that stops a run before it
// starts, so it carries the path in its context.
pub fn load_urls(path: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("couldn't read url file '{}'", path.display()))?;

    let urls = parse_url_list(&contents);
    tracing::debug!(path = %path.display(), count = urls.len(), "loaded url list");
    Ok(urls)
}

/// Trims, drops blank lines and deduplicates, keeping first-seen order.
pub fn parse_url_list(contents: &str) -> Vec<String> {
    let mut seen = HashSet::new();

    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| seen.insert(*line))
        .map(str::to_string)
        .collect()
}
