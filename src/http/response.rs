// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP response types

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use super::body::Body;
use super::headers::CONTENT_TYPE;
use crate::error::{Error, Result};

/// HTTP response representation
#[derive(Debug)]
pub struct Response {
    /// Response status code
    pub status: StatusCode,
    /// Reason phrase sent by the server, when the transport exposes it
    pub reason: Option<String>,
    /// Response headers
    pub headers: HeaderMap,
    /// Final URL (after redirects)
    pub url: Url,
    body: Body,
}

impl Response {
    /// Create a new response
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Body>, url: Url) -> Self {
        Self {
            status,
            reason: None,
            headers,
            url,
            body: body.into(),
        }
    }

    /// Set the server's reason phrase
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Reason phrase, falling back to the canonical one for the status
    pub fn reason(&self) -> &str {
        self.reason
            .as_deref()
            .or_else(|| self.status.canonical_reason())
            .unwrap_or("")
    }

    /// Check if status is success (2xx)
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Get status code as u16
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Get a header value
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Get content type
    pub fn content_type(&self) -> Option<&str> {
        self.header(CONTENT_TYPE)
    }

    /// Get the final URL as string
    pub fn url_str(&self) -> &str {
        self.url.as_str()
    }

    /// Borrow the body
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Mutably borrow the body, e.g. to buffer it
    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    /// Consume the response and return its raw body
    pub async fn bytes(self) -> Result<Bytes> {
        Ok(self.body.into_bytes().await?)
    }

    /// Consume the response and return its body as UTF-8 text
    pub async fn text(self) -> Result<String> {
        let bytes = self.bytes().await?;
        String::from_utf8(bytes.to_vec()).map_err(|e| Error::body(e.to_string()))
    }

    /// Consume the response and parse its body as JSON
    pub async fn json<T: DeserializeOwned>(self) -> Result<T> {
        let bytes = self.bytes().await?;
        serde_json::from_slice(&bytes).map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: StatusCode, body: &'static str) -> Response {
        Response::new(
            status,
            HeaderMap::new(),
            body,
            Url::parse("https://example.com").unwrap(),
        )
    }

    #[test]
    fn test_response_status() {
        let resp = response(StatusCode::OK, "");
        assert!(resp.is_success());
        assert_eq!(resp.status_code(), 200);
        assert_eq!(resp.reason(), "OK");
    }

    #[test]
    fn test_custom_reason() {
        let resp = response(StatusCode::NOT_FOUND, "").with_reason("Nope");
        assert_eq!(resp.reason(), "Nope");
    }

    #[tokio::test]
    async fn test_response_text() {
        let resp = response(StatusCode::OK, "Hello, World!");
        assert_eq!(resp.text().await.unwrap(), "Hello, World!");
    }

    #[tokio::test]
    async fn test_response_json() {
        let resp = response(StatusCode::OK, r#"{"origin":"1.2.3.4"}"#);
        let value: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(value["origin"], "1.2.3.4");
    }
}
