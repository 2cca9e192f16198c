// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Load the URL list (trimmed, deduplicated)
// 3. Fetch every page concurrently and collect the results
// 4. Print the results and a summary
// 5. Exit with proper code (0 = run completed, 2 = could not run)
//
// A URL that fails to fetch is just one more line in the output. Only a
// problem that stops the run from starting (like a missing URL file) changes
// the exit code.
// =============================================================================

mod cli;
mod config;
mod crawl;
mod fetcher;
mod loader;
mod logging;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use fetcher::{ErrorKind, PageResult, NO_TITLE};
use std::collections::BTreeMap;
use std::time::Instant;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run(cli: Cli) -> Result<()> {
    let started = Instant::now();

    let urls = loader::load_urls(&cli.file)?;
    if urls.is_empty() {
        println!("⚠️  No URLs found in {}", cli.file.display());
        return Ok(());
    }

    if !cli.json {
        println!("🌐 Fetching {} unique URL(s)...\n", urls.len());
    }

    let results = crawl::crawl(urls, &cli.crawl_config()).await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print_lines(&results);
        print_summary(&results);
        println!("✅ Done in {:.2?}", started.elapsed());
    }

    Ok(())
}

// One line per URL:
//   [OK] url (status) -> title
//   [ERROR] url: error
fn print_lines(results: &[PageResult]) {
    for result in results {
        match (result.error(), result.title()) {
            (Some(error), _) => println!("[ERROR] {}: {}", result.url(), error),
            (None, title) => println!(
                "[OK] {} ({}) -> {}",
                result.url(),
                result.status().unwrap_or_default(),
                title.unwrap_or_default()
            ),
        }
    }
    println!();
}

fn print_summary(results: &[PageResult]) {
    let ok_count = results.iter().filter(|r| r.is_ok()).count();
    let failed_count = results.len() - ok_count;
    let untitled_count = results.iter().filter(|r| r.title() == Some(NO_TITLE)).count();

    // BTreeMap keeps the breakdown in a stable order
    let mut by_kind: BTreeMap<ErrorKind, usize> = BTreeMap::new();
    for kind in results.iter().filter_map(|r| r.error().map(|e| e.kind())) {
        *by_kind.entry(kind).or_default() += 1;
    }

    println!("📊 Summary:");
    println!("   ✅ OK: {} ({} without a title)", ok_count, untitled_count);
    println!("   ❌ Failed: {}", failed_count);
    for (kind, count) in &by_kind {
        println!("      {}: {}", kind.as_str(), count);
    }
    println!("   📋 Total: {}", results.len());
}
