//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the HTTP client with the configured timeout and user agent
//! - GET requests for pages whose links are extracted
//! - GET requests whose only interesting part is the status code
//! - Error classification into `FetchError`

use crate::config::HttpConfig;
use crate::url::is_html;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use thiserror::Error;

/// Upper bound for establishing a connection, independent of the request timeout
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Maximum redirect hops followed before a request fails
const MAX_REDIRECTS: usize = 10;

/// Transport-level failure of a single request
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}: {message}")]
    Connect { url: String, message: String },

    #[error("Request failed for {url}: {message}")]
    Request { url: String, message: String },

    #[error("Failed to read body of {url}: {message}")]
    Body { url: String, message: String },
}

impl FetchError {
    fn from_reqwest(url: &str, error: reqwest::Error) -> Self {
        let url = url.to_string();
        if error.is_timeout() {
            FetchError::Timeout { url }
        } else if error.is_connect() {
            FetchError::Connect {
                url,
                message: error.to_string(),
            }
        } else {
            FetchError::Request {
                url,
                message: error.to_string(),
            }
        }
    }
}

/// Result of a successful page fetch
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// The response is an HTML document
    Html {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// The response is something else; the body was not downloaded
    NotHtml {
        /// HTTP status code
        status_code: u16,
        /// The Content-Type received (empty if absent)
        content_type: String,
    },
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```
/// use link_sweeper::config::HttpConfig;
/// use link_sweeper::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(
            config.timeout_secs.min(CONNECT_TIMEOUT_SECS),
        ))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page and downloads its body if it is HTML
///
/// The HTTP status is not inspected: an error page served as `text/html`
/// is still returned as `FetchOutcome::Html`.
pub async fn fetch_page(client: &Client, url: &str) -> Result<FetchOutcome, FetchError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| FetchError::from_reqwest(url, e))?;

    let status_code = response.status().as_u16();
    let final_url = response.url().to_string();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !is_html(&content_type) {
        return Ok(FetchOutcome::NotHtml {
            status_code,
            content_type,
        });
    }

    let body = response.text().await.map_err(|e| FetchError::Body {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    Ok(FetchOutcome::Html {
        final_url,
        status_code,
        body,
    })
}

/// Sends a GET request and returns only the final status code
///
/// Redirects are followed, so a moved page reports the status of its target.
pub async fn fetch_status(client: &Client, url: &str) -> Result<u16, FetchError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| FetchError::from_reqwest(url, e))?;
    Ok(response.status().as_u16())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client() -> Client {
        build_http_client(&HttpConfig::default()).unwrap()
    }

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client(&HttpConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn test_fetch_html_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("<html><body>hi</body></html>", "text/html; charset=utf-8"),
            )
            .mount(&server)
            .await;

        let outcome = fetch_page(&client(), &format!("{}/", server.uri()))
            .await
            .unwrap();
        match outcome {
            FetchOutcome::Html {
                status_code, body, ..
            } => {
                assert_eq!(status_code, 200);
                assert!(body.contains("hi"));
            }
            other => panic!("expected HTML, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_non_html_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/doc.pdf"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(vec![0x25, 0x50, 0x44, 0x46])
                    .insert_header("content-type", "application/pdf"),
            )
            .mount(&server)
            .await;

        let outcome = fetch_page(&client(), &format!("{}/doc.pdf", server.uri()))
            .await
            .unwrap();
        match outcome {
            FetchOutcome::NotHtml {
                status_code,
                content_type,
            } => {
                assert_eq!(status_code, 200);
                assert_eq!(content_type, "application/pdf");
            }
            other => panic!("expected non-HTML, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_html_error_page_is_still_html() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_raw("<a href=\"/home\">home</a>", "text/html"),
            )
            .mount(&server)
            .await;

        let outcome = fetch_page(&client(), &format!("{}/missing", server.uri()))
            .await
            .unwrap();
        assert!(matches!(
            outcome,
            FetchOutcome::Html {
                status_code: 404,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_fetch_non_html_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gone.json"))
            .respond_with(
                ResponseTemplate::new(410).insert_header("content-type", "application/json"),
            )
            .mount(&server)
            .await;

        let outcome = fetch_page(&client(), &format!("{}/gone.json", server.uri()))
            .await
            .unwrap();
        assert!(matches!(
            outcome,
            FetchOutcome::NotHtml {
                status_code: 410,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_fetch_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gone"))
            .respond_with(ResponseTemplate::new(410))
            .mount(&server)
            .await;

        let status = fetch_status(&client(), &format!("{}/gone", server.uri()))
            .await
            .unwrap();
        assert_eq!(status, 410);
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        // Port 9 on localhost (discard) is closed on test machines
        let result = fetch_status(&client(), "http://127.0.0.1:9/").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_fetch_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;

        let config = HttpConfig {
            timeout_secs: 1,
            ..HttpConfig::default()
        };
        let client = build_http_client(&config).unwrap();

        let result = fetch_status(&client, &format!("{}/slow", server.uri())).await;
        assert!(matches!(result, Err(FetchError::Timeout { .. })));
    }
}
