//! HTTP client trait abstraction.
//!
//! The generation service is a single request/response pair, so the trait
//! surface is one POST. Implementations: the production reqwest adapter and
//! an in-memory mock for tests.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use thiserror::Error;

/// HTTP headers represented as a key-value map.
pub type Headers = HashMap<String, String>;

/// HTTP response wrapper.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: Bytes,
}

impl Response {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Check if the response indicates success (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the response body as a string (lossy).
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Parse the response body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// HTTP client errors.
#[derive(Debug, Clone, Error)]
pub enum HttpError {
    /// Connection failed
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    /// Request timed out
    #[error("request timed out: {0}")]
    Timeout(String),
    /// Other transport error
    #[error("{0}")]
    Other(String),
}

/// Trait for HTTP client operations.
///
/// # Example
///
/// ```ignore
/// use specdeck::traits::{Headers, HttpClient, HttpError, Response};
///
/// async fn send<C: HttpClient>(client: &C) -> Result<Response, HttpError> {
///     client.post("https://api.example.com/v1", "{}", &Headers::new()).await
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Perform a POST request with a string body.
    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError>;
}
