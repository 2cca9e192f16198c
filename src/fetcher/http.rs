// src/fetcher/http.rs
// =============================================================================
// This module fetches a single page and turns the outcome into a PageResult.
//
// Key functionality:
// - Makes one HTTP GET request per URL (no retries)
// - Bounds the whole request (headers + body) by a per-call timeout
// - Treats only 200 OK as success; anything else is recorded as an error
// - Hands the body of a 200 response to the title extractor
//
// Rust concepts:
// - async/await: For network I/O that doesn't block other fetches
// - tokio::time::timeout: Drops (cancels) a future that runs too long
// - Private fields + constructors: A PageResult can't be half-filled
// =============================================================================

use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::time::Duration;
use url::Url;

use super::error::{FetchError, ParseError};
use super::title::extract_title;

// The terminal outcome of fetching one URL
//
// Exactly one of these holds:
// - title is Some and error is None (the page was fetched and parsed)
// - error is Some and title is None (something failed along the way)
//
// status is recorded whenever a response was received, even on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageResult {
    url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<FetchError>,
}

impl PageResult {
    pub fn success(url: impl Into<String>, status: u16, title: String) -> Self {
        Self {
            url: url.into(),
            status: Some(status),
            title: Some(title),
            error: None,
        }
    }

    pub fn failed(url: impl Into<String>, status: Option<u16>, error: FetchError) -> Self {
        Self {
            url: url.into(),
            status,
            title: None,
            error: Some(error),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    /// True when the page was fetched and a title (or the sentinel) extracted
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

// Fetches one URL and extracts its title
//
// Parameters:
//   client: shared reqwest client (cheap to clone, pools connections)
//   url: the page to fetch
//   timeout: deadline for the whole request, including reading the body
//
// Returns: a PageResult, never an Err. Every failure is recorded in the
// result so it can't affect any other fetch.
pub async fn fetch(client: &Client, url: &str, timeout: Duration) -> PageResult {
    // When the deadline passes, tokio drops the inner future. That cancels
    // the in-flight request and closes its connection.
    match tokio::time::timeout(timeout, fetch_page(client, url)).await {
        Ok(result) => result,
        Err(_) => PageResult::failed(url, None, FetchError::Timeout(timeout)),
    }
}

async fn fetch_page(client: &Client, url: &str) -> PageResult {
    // Validate up front so a malformed URL never reaches the network layer
    if let Err(e) = Url::parse(url) {
        return PageResult::failed(url, None, FetchError::InvalidRequest(e.to_string()));
    }

    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => return PageResult::failed(url, None, FetchError::from_reqwest(e)),
    };

    let status = response.status();

    // Only 200 counts. Redirects are already followed by the client, so a
    // 3xx here means the redirect couldn't be completed.
    if status != StatusCode::OK {
        return PageResult::failed(url, Some(status.as_u16()), FetchError::Status(status.as_u16()));
    }

    // bytes() consumes the response, so it is released as soon as the body
    // has been read (or the read fails)
    let body = match response.bytes().await {
        Ok(body) => body,
        Err(e) => {
            let error = ParseError::Body(e.to_string()).into();
            return PageResult::failed(url, Some(status.as_u16()), error);
        }
    };

    match extract_title(body.as_ref()) {
        Ok(title) => PageResult::success(url, status.as_u16(), title),
        Err(e) => PageResult::failed(url, Some(status.as_u16()), e.into()),
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why doesn't fetch() return a Result?
//    - The caller wants one record per URL, success or not
//    - Folding the error into PageResult means the dispatcher never has to
//      handle failures, and one bad URL can't stop the others
//
// 2. How does tokio::time::timeout cancel a request?
//    - It races the future against a timer
//    - If the timer wins, the future is dropped
//    - Dropping a reqwest future aborts the request and frees the connection
//
// 3. Why private fields on PageResult?
//    - The only way to build one is success() or failed()
//    - So a result with both a title and an error can't exist
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::{ErrorKind, NO_TITLE};
    use std::time::Instant;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TIMEOUT: Duration = Duration::from_secs(5);

    async fn serve(server: &MockServer, route: &str, template: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(template)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_fetch_extracts_title() {
        let server = MockServer::start().await;
        serve(
            &server,
            "/hello",
            ResponseTemplate::new(200)
                .set_body_string("<html><head><title>Hello</title></head><body></body></html>"),
        )
        .await;

        let url = format!("{}/hello", server.uri());
        let result = fetch(&Client::new(), &url, TIMEOUT).await;

        assert_eq!(result.url(), url);
        assert_eq!(result.status(), Some(200));
        assert_eq!(result.title(), Some("Hello"));
        assert!(result.error().is_none());
    }

    #[tokio::test]
    async fn test_fetch_without_title_is_success() {
        let server = MockServer::start().await;
        serve(&server, "/plain", ResponseTemplate::new(200).set_body_string("<p>hi</p>")).await;

        let result = fetch(&Client::new(), &format!("{}/plain", server.uri()), TIMEOUT).await;

        assert!(result.is_ok());
        assert_eq!(result.title(), Some(NO_TITLE));
    }

    #[tokio::test]
    async fn test_404_is_status_error_even_with_title() {
        let server = MockServer::start().await;
        serve(
            &server,
            "/missing",
            ResponseTemplate::new(404).set_body_string("<title>Not Found</title>"),
        )
        .await;

        let result = fetch(&Client::new(), &format!("{}/missing", server.uri()), TIMEOUT).await;

        assert_eq!(result.status(), Some(404));
        assert_eq!(result.error(), Some(&FetchError::Status(404)));
        assert!(result.title().is_none());
    }

    #[tokio::test]
    async fn test_other_2xx_is_not_success() {
        let server = MockServer::start().await;
        serve(&server, "/empty", ResponseTemplate::new(204)).await;

        let result = fetch(&Client::new(), &format!("{}/empty", server.uri()), TIMEOUT).await;

        assert_eq!(result.status(), Some(204));
        assert_eq!(result.error().map(FetchError::kind), Some(ErrorKind::Status));
    }

    #[tokio::test]
    async fn test_slow_endpoint_times_out() {
        let server = MockServer::start().await;
        serve(
            &server,
            "/slow",
            ResponseTemplate::new(200).set_delay(Duration::from_secs(10)),
        )
        .await;

        let timeout = Duration::from_millis(200);
        let started = Instant::now();
        let result = fetch(&Client::new(), &format!("{}/slow", server.uri()), timeout).await;

        assert!(started.elapsed() < Duration::from_secs(2));
        assert_eq!(result.error(), Some(&FetchError::Timeout(timeout)));
        assert_eq!(result.error().map(FetchError::kind), Some(ErrorKind::Network));
        assert!(result.status().is_none());
        assert!(result.title().is_none());
    }

    #[tokio::test]
    async fn test_truncated_body_is_parse_error_with_status() {
        // Promise 1000 bytes, send a few, then hang up
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let response = "HTTP/1.1 200 OK\r\nContent-Length: 1000\r\n\r\n<title>cut";
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        });

        let result = fetch(&Client::new(), &format!("http://{}/", addr), TIMEOUT).await;

        assert_eq!(result.status(), Some(200));
        assert!(matches!(result.error(), Some(FetchError::Parse(ParseError::Body(_)))));
        assert_eq!(result.error().map(FetchError::kind), Some(ErrorKind::Parse));
        assert!(result.title().is_none());
    }

    #[tokio::test]
    async fn test_malformed_url_is_request_error() {
        let result = fetch(&Client::new(), "not a url", TIMEOUT).await;

        assert_eq!(result.error().map(FetchError::kind), Some(ErrorKind::RequestConstruction));
        assert!(result.status().is_none());
    }

    #[tokio::test]
    async fn test_unsupported_scheme_is_request_error() {
        let result = fetch(&Client::new(), "ftp://example.com/file", TIMEOUT).await;

        assert_eq!(result.error().map(FetchError::kind), Some(ErrorKind::RequestConstruction));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        // Nothing listens on port 1
        let result = fetch(&Client::new(), "http://127.0.0.1:1/", TIMEOUT).await;

        assert_eq!(result.error().map(FetchError::kind), Some(ErrorKind::Network));
        assert!(result.status().is_none());
    }

    #[test]
    fn test_page_result_json_skips_empty_fields() {
        let ok = PageResult::success("https://example.com", 200, "Example".to_string());
        let json = serde_json::to_value(&ok).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "url": "https://example.com", "status": 200, "title": "Example" })
        );

        let failed = PageResult::failed("https://example.com", Some(500), FetchError::Status(500));
        let json = serde_json::to_value(&failed).unwrap();
        assert!(json.get("title").is_none());
        assert_eq!(json["error"]["kind"], "status");
    }
}
