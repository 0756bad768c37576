//! HTTP fetcher implementation
//!
//! This module owns the network side of a crawl:
//! - building the shared HTTP client with a proper user agent string
//! - GET requests with a per-request timeout
//! - classification of failures into the error text recorded on results
//!
//! Fetch failures never abort a crawl; their Display text ends up in the
//! `error` field of the page's [`CrawlResult`](super::CrawlResult).

use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Connect timeout applied to every request, independent of the
/// configured request timeout
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// A failed page fetch
///
/// The Display text of a variant is exactly what gets recorded on the
/// page's result, so the wording here is part of the output format.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    #[error("HTTP error: status {0}")]
    Status(u16),

    #[error("Network error: {0}")]
    Network(String),
}

/// Builds the HTTP client shared by all fetches of a crawl
///
/// # Arguments
///
/// * `timeout` - Default request timeout, applied from connection start
///   until the body has been read
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    let user_agent = format!("sitescribe/{}", env!("CARGO_PKG_VERSION"));

    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .connect_timeout(CONNECT_TIMEOUT)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches one page and returns its body as text
///
/// Issues a GET request with `timeout` applied to the whole exchange.
/// Redirects are followed; the caller keeps accounting under the URL it
/// requested. A non-2xx status is a failure, as is any transport error.
///
/// # Arguments
///
/// * `client` - The shared HTTP client
/// * `url` - Absolute URL to fetch
/// * `timeout` - Deadline for the request including body download
///
/// # Returns
///
/// * `Ok(String)` - The response body
/// * `Err(FetchError)` - Timeout, non-2xx status, or transport failure
pub async fn fetch(client: &Client, url: &str, timeout: Duration) -> Result<String, FetchError> {
    let response = client
        .get(url)
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| classify_error(e, timeout))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }

    response
        .text()
        .await
        .map_err(|e| classify_error(e, timeout))
}

/// Maps a reqwest error onto the fetch error vocabulary
fn classify_error(error: reqwest::Error, timeout: Duration) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout(timeout.as_millis() as u64)
    } else {
        FetchError::Network(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(Duration::from_secs(30));
        assert!(client.is_ok());
    }

    #[test]
    fn test_timeout_error_text_names_the_limit() {
        let error = FetchError::Timeout(1500);
        assert_eq!(error.to_string(), "Request timed out after 1500 ms");
    }

    #[test]
    fn test_status_error_text_names_the_code() {
        let error = FetchError::Status(404);
        assert_eq!(error.to_string(), "HTTP error: status 404");
    }

    #[test]
    fn test_network_error_text_keeps_cause() {
        let error = FetchError::Network("connection refused".to_string());
        assert_eq!(error.to_string(), "Network error: connection refused");
    }

    // Request behavior against live sockets is covered by the wiremock
    // integration tests.
}
