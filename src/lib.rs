//! specdeck - a terminal viewer for the Bosen AI system specification
//!
//! Renders the embedded specification document from a typed content model
//! and hosts the interactive image-edit lab backed by a remote generative
//! image service. This library exposes modules for use in integration tests.

pub mod adapters;
pub mod app;
pub mod config;
pub mod document;
pub mod genai;
pub mod ingest;
pub mod logging;
pub mod markdown;
pub mod models;
pub mod session;
pub mod traits;
pub mod ui;
