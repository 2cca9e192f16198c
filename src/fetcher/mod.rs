// src/fetcher/mod.rs
// =============================================================================
// This module contains everything needed to fetch one page.
//
// Submodules:
// - http: Makes the GET request and classifies the outcome
// - title: Finds the <title> in the downloaded HTML
// - error: The per-URL error types
//
// The title extractor is kept apart from the HTTP code so a page that can't
// be parsed is reported differently from a page that couldn't be fetched.
// =============================================================================

mod error;
mod http;
mod title;

pub use error::{ErrorKind, FetchError};
pub use http::{fetch, PageResult};
pub use title::NO_TITLE;
