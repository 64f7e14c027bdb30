//! Adapter implementations for external dependencies.
//!
//! Production adapters wrap real libraries; the mock adapter backs tests.

pub mod mock;
mod reqwest_http;

pub use reqwest_http::ReqwestHttpClient;
