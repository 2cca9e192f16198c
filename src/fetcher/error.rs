// src/fetcher/error.rs
// =============================================================================
// Error types for a single page fetch.
//
// Every failure that can happen while fetching one URL ends up as a
// FetchError stored on that URL's PageResult. Nothing in here ever aborts
// the whole run.
//
// Rust concepts:
// - thiserror: derives std::error::Error and Display from attributes
// - Enums with data: each variant carries the details of its failure
// =============================================================================

use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// The broad class of a fetch failure.
///
/// Timeouts and transport failures are both `Network`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    RequestConstruction,
    Network,
    Status,
    Parse,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::RequestConstruction => "invalid request",
            ErrorKind::Network => "network",
            ErrorKind::Status => "status",
            ErrorKind::Parse => "parse",
            ErrorKind::Internal => "internal",
        }
    }
}

/// Why the body of a page could not be turned into a title.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum ParseError {
    /// The response body stream failed before it was fully read
    #[error("could not read response body: {0}")]
    Body(String),
    /// The byte stream handed to the extractor failed
    #[error("could not read html stream: {0}")]
    Read(String),
}

/// Everything that can go wrong fetching one URL.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FetchError {
    /// The URL is malformed or reqwest refused to build the request
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The deadline passed before the page was fully fetched
    #[error("request timed out after {}ms", .0.as_millis())]
    Timeout(#[serde(serialize_with = "serialize_millis")] Duration),

    /// DNS, connection, TLS or redirect failure
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with something other than 200 OK
    #[error("got status code {0}")]
    Status(u16),

    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The fetch task itself died (panicked or was cancelled by the runtime)
    #[error("fetch task failed: {0}")]
    Internal(String),
}

impl FetchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::InvalidRequest(_) => ErrorKind::RequestConstruction,
            FetchError::Timeout(_) | FetchError::Network(_) => ErrorKind::Network,
            FetchError::Status(_) => ErrorKind::Status,
            FetchError::Parse(_) => ErrorKind::Parse,
            FetchError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Classifies an error coming out of reqwest.
    ///
    /// reqwest's own predicates are checked first. The message text is only
    /// consulted for TLS problems, which reqwest has no predicate for.
    /// The client has no timeout of its own (the deadline is enforced around
    /// the whole fetch), so reqwest timeouts aren't expected here.
    pub fn from_reqwest(error: reqwest::Error) -> Self {
        let error_string = error.to_string();

        if error.is_builder() {
            FetchError::InvalidRequest(error_string)
        } else if error.is_redirect() {
            FetchError::Network("too many redirects".to_string())
        } else if error.is_connect() {
            FetchError::Network(format!("connection failed: {}", error_string))
        } else if error_string.contains("certificate") || error_string.contains("ssl") {
            FetchError::Network(format!("tls error: {}", error_string))
        } else {
            FetchError::Network(error_string)
        }
    }
}

fn serialize_millis<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u64(duration.as_millis() as u64)
}
