//! Mock HTTP client for testing.
//!
//! Returns queued responses in order and records every request for
//! verification. Clones share the same queue and log, so a test can keep a
//! handle while the client is moved into the code under test.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::traits::{Headers, HttpClient, HttpError, Response};

/// A recorded HTTP request.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub headers: Headers,
    pub body: String,
}

/// Mock [`HttpClient`] with a FIFO response queue.
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    responses: Arc<Mutex<VecDeque<Result<Response, HttpError>>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response to be returned by the next request.
    pub fn enqueue_response(&self, response: Response) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    /// Queue a transport error to be returned by the next request.
    pub fn enqueue_error(&self, error: HttpError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// All requests made so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests made so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            url: url.to_string(),
            headers: headers.clone(),
            body: body.to_string(),
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(HttpError::Other("no mock response configured".to_string())))
    }
}
