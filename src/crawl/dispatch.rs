// src/crawl/dispatch.rs
// =============================================================================
// This module fetches a whole list of URLs concurrently.
//
// How it works:
// 1. Spawn one tokio task per URL, all up front
// 2. Each task waits for a permit from a shared Semaphore before fetching,
//    so at most `max_concurrency` fetches are in flight at once
// 3. The permit is dropped when the task ends, whatever the outcome
// 4. Wait for every task, then hand back all results at once
//
// Result order is not meaningful. Callers shouldn't rely on it.
//
// Rust concepts:
// - Arc: Shared ownership of the semaphore across tasks
// - RAII guards: The permit is released when it goes out of scope
// - JoinHandle: Each spawned task sends its one result back through it
// =============================================================================

use futures::future::join_all;
use reqwest::Client;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

use crate::config::CrawlConfig;
use crate::fetcher::{fetch, FetchError, PageResult};

/// Follow at most this many redirects before giving up on a page
const MAX_REDIRECTS: usize = 10;

// Fetches every URL and returns one PageResult per URL
//
// Parameters:
//   urls: the pages to fetch (expected to be unique and non-blank)
//   config: concurrency ceiling and per-request timeout
//
// Returns: a Vec with exactly urls.len() results, in no particular order
pub async fn crawl(urls: Vec<String>, config: &CrawlConfig) -> Vec<PageResult> {
    if urls.is_empty() {
        return Vec::new();
    }

    match build_client() {
        Ok(client) => crawl_with_client(client, urls, config).await,
        Err(e) => {
            // Without a client nothing can be fetched, but every URL still
            // gets its result
            tracing::error!("failed to create HTTP client: {}", e);
            let message = format!("could not create http client: {}", e);
            urls.into_iter()
                .map(|url| PageResult::failed(url, None, FetchError::InvalidRequest(message.clone())))
                .collect()
        }
    }
}

/// Same as [`crawl`], but with a caller-supplied client.
pub async fn crawl_with_client(
    client: Client,
    urls: Vec<String>,
    config: &CrawlConfig,
) -> Vec<PageResult> {
    let started = Instant::now();
    let total = urls.len();
    let semaphore = Arc::new(Semaphore::new(config.permits()));

    tracing::info!(
        urls = total,
        max_concurrency = config.permits(),
        timeout_ms = config.request_timeout.as_millis() as u64,
        "starting crawl"
    );

    // Launch everything first. Tasks beyond the ceiling just sit waiting
    // for a permit.
    let (urls, handles): (Vec<String>, Vec<JoinHandle<PageResult>>) = urls
        .into_iter()
        .map(|url| {
            let handle = tokio::spawn(fetch_task(
                client.clone(),
                Arc::clone(&semaphore),
                url.clone(),
                config.clone(),
            ));
            (url, handle)
        })
        .unzip();

    let joined = join_all(handles).await;

    let results: Vec<PageResult> = urls
        .into_iter()
        .zip(joined)
        .map(|(url, joined)| match joined {
            Ok(result) => result,
            Err(e) => {
                // A panicking task still owes us a result for its URL
                tracing::error!(url = %url, "fetch task failed: {}", e);
                PageResult::failed(url, None, FetchError::Internal(e.to_string()))
            }
        })
        .collect();

    let failed = results.iter().filter(|r| !r.is_ok()).count();
    tracing::info!(
        total,
        failed,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "crawl finished"
    );

    results
}

// One unit of work: wait for a permit, fetch, log, release
async fn fetch_task(
    client: Client,
    semaphore: Arc<Semaphore>,
    url: String,
    config: CrawlConfig,
) -> PageResult {
    // The permit lives until the end of this function, including early
    // returns and unwinding
    let _permit = match semaphore.acquire_owned().await {
        Ok(permit) => permit,
        Err(e) => return PageResult::failed(url, None, FetchError::Internal(e.to_string())),
    };

    tracing::debug!(url = %url, "fetching");
    let result = fetch(&client, &url, config.request_timeout).await;

    match (result.error(), result.title()) {
        (Some(error), _) => tracing::warn!(url = %url, status = ?result.status(), "{}", error),
        (None, Some(title)) => tracing::debug!(url = %url, status = ?result.status(), title, "fetched"),
        (None, None) => {}
    }

    result
}

fn build_client() -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .build()
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a Semaphore instead of buffer_unordered?
//    - buffer_unordered only creates futures as slots free up
//    - Here every URL gets its own task right away, and the semaphore decides
//      which of them may actually touch the network
//
// 2. What is an OwnedSemaphorePermit?
//    - acquire_owned() returns a permit that holds its own Arc to the semaphore
//    - Dropping the permit gives the slot back
//    - Because it's dropped automatically, a slot can't leak even if the
//      fetch times out or the task panics
//
// 3. Why keep the URL next to each JoinHandle?
//    - If a task panics, its JoinHandle returns an Err with no PageResult
//    - Keeping the URL lets us still report that URL as failed
// -----------------------------------------------------------------------------
