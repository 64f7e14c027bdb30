//! Generation service configuration.
//!
//! Resolved at startup from an optional JSON config file with environment
//! overrides. A missing API key is not fatal: the document still renders and
//! the image lab reports the missing key when a generation is attempted.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default base URL of the generation service.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default image-capable model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "SPECDECK_BASE_URL";

/// Environment variable overriding the model name.
pub const MODEL_ENV: &str = "SPECDECK_MODEL";

/// Settings for the generation client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key; `None` until configured
    #[serde(default)]
    pub api_key: Option<String>,
    /// Service base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model name used for generation
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
        }
    }
}

impl GeminiConfig {
    /// Load configuration: config file first, then environment overrides.
    pub fn load() -> Self {
        let mut config = config_file_path()
            .and_then(|path| std::fs::read_to_string(path).ok())
            .and_then(|text| serde_json::from_str::<GeminiConfig>(&text).ok())
            .unwrap_or_default();
        config.apply_env_overrides();
        config
    }

    /// Apply `GEMINI_API_KEY` / `SPECDECK_BASE_URL` / `SPECDECK_MODEL`.
    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                self.api_key = Some(key);
            }
        }
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.trim().is_empty() {
                self.base_url = url.trim_end_matches('/').to_string();
            }
        }
        if let Ok(model) = std::env::var(MODEL_ENV) {
            if !model.trim().is_empty() {
                self.model = model;
            }
        }
    }
}

/// Path of the optional config file: `<config_dir>/specdeck/config.json`.
fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("specdeck").join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeminiConfig::default();
        assert!(config.api_key.is_none());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_partial_config_file_fills_defaults() {
        let config: GeminiConfig = serde_json::from_str(r#"{"api_key": "k-123"}"#).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("k-123"));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_full_config_file() {
        let config: GeminiConfig = serde_json::from_str(
            r#"{"api_key": "k", "base_url": "http://localhost:1234", "model": "m-image"}"#,
        )
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:1234");
        assert_eq!(config.model, "m-image");
    }
}
