//! Trait abstractions for external collaborators.
//!
//! Enables dependency injection and mocking in tests.

mod http;

pub use http::{Headers, HttpClient, HttpError, Response};
