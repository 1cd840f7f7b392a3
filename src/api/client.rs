//! Exa API client built on `reqwest`.
//!
//! One pooled client per process. Every request carries the JSON content
//! headers and the `x-api-key` credential, and is bounded by the configured
//! overall timeout.

use std::error::Error as StdError;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, StatusCode};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde_json::Value;

use super::provider::SearchApi;
use super::request::{ContentsRequest, FindSimilarRequest, SearchRequest};
use crate::config::ServerConfig;
use crate::error::ApiError;

const API_KEY_HEADER: HeaderName = HeaderName::from_static("x-api-key");

/// HTTP client for the Exa search API.
#[derive(Debug, Clone)]
pub struct ExaClient {
    http: Client,
    base_url: String,
    timeout: Duration,
}

impl ExaClient {
    /// Creates a client from server configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ClientBuild`] if the API key is not a valid header
    /// value or the TLS backend fails to initialize.
    pub fn new(config: &ServerConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut key = HeaderValue::from_str(config.api_key.expose_secret())
            .map_err(|e| ApiError::ClientBuild(format!("invalid API key header: {e}")))?;
        key.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key);

        let http = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::ClientBuild(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout,
        })
    }

    /// Returns the base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Posts a JSON body to `path` and decodes the JSON reply.
    async fn post<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<Value, ApiError> {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(%url, "sending Exa request");

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(&e))?;

        if !status.is_success() {
            let err = rejection(status, &bytes);
            tracing::warn!(%url, status = status.as_u16(), "Exa API rejected request");
            return Err(err);
        }

        serde_json::from_slice(&bytes).map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    fn transport_error(&self, err: &reqwest::Error) -> ApiError {
        tracing::warn!(error = %err, "Exa request failed");
        if err.is_timeout() {
            ApiError::Timeout {
                secs: self.timeout.as_secs(),
            }
        } else {
            ApiError::Transport(describe(err))
        }
    }
}

/// Builds a status error, lifting `message` out of a JSON body when present.
fn rejection(status: StatusCode, body: &[u8]) -> ApiError {
    let message = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_owned));

    ApiError::Status {
        status: status.as_u16(),
        message,
    }
}

/// Flattens an error and its sources into one line.
fn describe(err: &reqwest::Error) -> String {
    let mut out = err.to_string();
    let mut source = StdError::source(err);
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

#[async_trait]
impl SearchApi for ExaClient {
    fn name(&self) -> &'static str {
        "exa"
    }

    async fn search(&self, request: &SearchRequest) -> Result<Value, ApiError> {
        self.post("/search", request).await
    }

    async fn find_similar(&self, request: &FindSimilarRequest) -> Result<Value, ApiError> {
        self.post("/findSimilar", request).await
    }

    async fn contents(&self, request: &ContentsRequest) -> Result<Value, ApiError> {
        self.post("/contents", request).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer, timeout: Duration) -> ExaClient {
        let config = ServerConfig::builder()
            .api_key("test-api-key")
            .base_url(server.uri())
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| unreachable!());
        ExaClient::new(&config).unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn test_rejection_extracts_message() {
        let err = rejection(StatusCode::TOO_MANY_REQUESTS, br#"{"message": "rate limited"}"#);
        assert!(matches!(
            err,
            ApiError::Status { status: 429, message: Some(ref m) } if m == "rate limited"
        ));
    }

    #[test]
    fn test_rejection_non_json_body() {
        let err = rejection(StatusCode::BAD_GATEWAY, b"<html>bad gateway</html>");
        assert!(matches!(
            err,
            ApiError::Status {
                status: 502,
                message: None
            }
        ));
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = ServerConfig::builder()
            .api_key("k")
            .base_url("https://api.exa.ai/")
            .build()
            .unwrap_or_else(|_| unreachable!());
        let client = ExaClient::new(&config).unwrap_or_else(|_| unreachable!());
        assert_eq!(client.base_url(), "https://api.exa.ai");
    }

    #[test]
    fn test_invalid_api_key_header() {
        let config = ServerConfig::builder()
            .api_key("bad\nkey")
            .build()
            .unwrap_or_else(|_| unreachable!());
        assert!(matches!(
            ExaClient::new(&config),
            Err(ApiError::ClientBuild(_))
        ));
    }

    #[tokio::test]
    async fn test_search_sends_headers_and_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/search"))
            .and(header("x-api-key", "test-api-key"))
            .and(header("accept", "application/json"))
            .and(body_json(json!({
                "query": "rust",
                "type": "auto",
                "numResults": 5,
                "contents": {"text": true}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "requestId": "test-123",
                "results": [{"id": "doc-1", "url": "https://example.com"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, Duration::from_secs(5));
        let value = client
            .search(&SearchRequest::new("rust", 5))
            .await
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(value["requestId"], "test-123");
    }

    #[tokio::test]
    async fn test_find_similar_and_contents_paths() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/findSimilar"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/contents"))
            .and(body_json(json!({"ids": ["a", "b"], "contents": {"text": true}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": [{}, {}]})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, Duration::from_secs(5));
        assert!(
            client
                .find_similar(&FindSimilarRequest::new("https://example.com", 10))
                .await
                .is_ok()
        );
        let contents = client
            .contents(&ContentsRequest::new(vec!["a".into(), "b".into()]))
            .await
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(contents["results"].as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/search"))
            .respond_with(
                ResponseTemplate::new(429).set_body_json(json!({"message": "rate limited"})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server, Duration::from_secs(5));
        let err = client
            .search(&SearchRequest::new("rust", 10))
            .await
            .err()
            .map(|e| e.to_string())
            .unwrap_or_default();
        assert!(err.contains("429"));
        assert!(err.contains("rate limited"));
    }

    #[tokio::test]
    async fn test_timeout_is_transport_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/search"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"results": []}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let client = client_for(&server, Duration::from_millis(200));
        let err = client.search(&SearchRequest::new("slow", 10)).await;
        assert!(matches!(err, Err(ApiError::Timeout { .. })));
    }

    #[tokio::test]
    async fn test_invalid_json_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/contents"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = client_for(&server, Duration::from_secs(5));
        let err = client.contents(&ContentsRequest::new(vec!["x".into()])).await;
        assert!(matches!(err, Err(ApiError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let config = ServerConfig::builder()
            .api_key("k")
            .base_url("http://127.0.0.1:1")
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap_or_else(|_| unreachable!());
        let client = ExaClient::new(&config).unwrap_or_else(|_| unreachable!());

        let err = client
            .search(&SearchRequest::new("offline", 1))
            .await
            .err()
            .map(|e| e.to_string())
            .unwrap_or_default();
        assert!(err.starts_with("Request error"));
    }
}
