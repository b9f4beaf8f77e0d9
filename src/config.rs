//! Search client configuration.
//!
//! The API credential is read once at startup and handed to
//! [`SearchClient::new`](crate::search::SearchClient::new), which rejects a
//! missing key before any request is made.

use crate::error::{EconSearchError, Result};
use std::fmt;
use url::Url;

/// Default Gemini REST endpoint
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model identifier
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Environment variables checked for the credential, in order
pub const API_KEY_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

/// Connection settings for the model endpoint.
#[derive(Clone)]
pub struct SearchConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl SearchConfig {
    /// Create a config with the default model and endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Read the credential from the environment.
    ///
    /// A missing variable yields an empty key; validation happens when the
    /// client is built.
    pub fn from_env() -> Self {
        let api_key = API_KEY_VARS
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|v| !v.trim().is_empty())
            .unwrap_or_default();
        Self::new(api_key)
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Check the settings are usable.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(EconSearchError::Config(format!(
                "API key is missing (set {} or pass --api-key)",
                API_KEY_VARS.join(" or ")
            )));
        }
        if self.model.trim().is_empty() {
            return Err(EconSearchError::Config("Model name is empty".to_string()));
        }
        Url::parse(&self.base_url).map_err(|e| {
            EconSearchError::Config(format!("Invalid base URL '{}': {}", self.base_url, e))
        })?;
        Ok(())
    }

    /// Full `generateContent` endpoint for the configured model.
    pub fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

impl fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_config_error() {
        let err = SearchConfig::new("  ").validate().expect_err("blank key");
        assert!(matches!(err, EconSearchError::Config(_)));
        assert!(err.to_string().contains("API key is missing"));
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        let err = SearchConfig::new("key")
            .with_base_url("not a url")
            .validate()
            .expect_err("bad url");
        assert!(matches!(err, EconSearchError::Config(_)));
    }

    #[test]
    fn test_generate_url() {
        let config = SearchConfig::new("key").with_base_url("http://localhost:9000/v1beta/");
        assert!(config.validate().is_ok());
        assert_eq!(
            config.generate_url(),
            "http://localhost:9000/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_debug_redacts_key() {
        let rendered = format!("{:?}", SearchConfig::new("super-secret"));
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
