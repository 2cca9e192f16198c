// src/crawl/mod.rs
// =============================================================================
// This module runs a batch of page fetches.
//
// Features:
// - One task per URL, all launched up front
// - A global ceiling on how many fetches run at once
// - Every URL gets exactly one result, even when its fetch fails
//
// Single level only: links found on the fetched pages are not followed.
// =============================================================================

mod dispatch;

// Re-export the dispatcher entry point
pub use dispatch::crawl;
