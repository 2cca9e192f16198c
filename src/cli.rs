// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
// =============================================================================

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{CrawlConfig, DEFAULT_MAX_CONCURRENCY, DEFAULT_REQUEST_TIMEOUT};

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
#[derive(Parser, Debug)]
#[command(
    name = "title-grabber",
    version,
    about = "Fetch a list of web pages concurrently and report their titles",
    long_about = "title-grabber reads a file of URLs (one per line), fetches every page with a bounded \
                  number of concurrent requests and prints each page's <title>. \
                  A failing URL is reported on its own line and never stops the run."
)]
pub struct Cli {
    /// File with one URL per line (blank lines and duplicates are ignored)
    #[arg(default_value = "urls.txt")]
    pub file: PathBuf,

    /// Maximum number of pages fetched at the same time
    #[arg(short, long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    pub concurrency: usize,

    /// Per-request timeout in seconds
    #[arg(short, long, default_value_t = DEFAULT_REQUEST_TIMEOUT.as_secs())]
    pub timeout: u64,

    /// Output results in JSON format instead of one line per URL
    #[arg(long)]
    pub json: bool,

    /// Log every fetch, not just failures
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn crawl_config(&self) -> CrawlConfig {
        CrawlConfig::default()
            .with_max_concurrency(self.concurrency)
            .with_request_timeout(Duration::from_secs(self.timeout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["title-grabber"]);
        assert_eq!(cli.file, PathBuf::from("urls.txt"));
        assert!(!cli.json);
        assert_eq!(cli.crawl_config(), CrawlConfig::default());
    }

    #[test]
    fn test_flags_map_onto_config() {
        let cli = Cli::parse_from(["title-grabber", "list.txt", "-c", "12", "--timeout", "2", "--json"]);
        let config = cli.crawl_config();

        assert_eq!(cli.file, PathBuf::from("list.txt"));
        assert!(cli.json);
        assert_eq!(config.max_concurrency, 12);
        assert_eq!(config.request_timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_oversized_concurrency_is_capped() {
        let cli = Cli::parse_from(["title-grabber", "-c", "2305843009213693952"]);
        assert_eq!(cli.crawl_config().permits(), tokio::sync::Semaphore::MAX_PERMITS);
    }
}
