//! Custom error types for econsearch.
//!
//! All fallible library functions return `Result<T, EconSearchError>`.

use thiserror::Error;

/// Message shown when the model answered but no usable JSON could be recovered.
pub const FORMAT_ERROR_MESSAGE: &str =
    "The system retrieved data but could not format it strictly. Please refine your query.";

/// Main error type for econsearch operations.
#[derive(Debug, Error)]
pub enum EconSearchError {
    /// Missing credential or unusable client settings
    #[error("Config error: {0}")]
    Config(String),

    /// Network/HTTP request error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Model endpoint returned a non-success status
    #[error("API error: {code} - {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Response body or reason
        message: String,
    },

    /// Model output held no recoverable JSON, or the JSON did not decode.
    ///
    /// The inner string is diagnostic detail for logs; `Display` always
    /// shows the user-facing message.
    #[error("{}", FORMAT_ERROR_MESSAGE)]
    Format(String),
}

impl EconSearchError {
    /// Build a format error carrying diagnostic detail.
    pub fn format(detail: impl Into<String>) -> Self {
        Self::Format(detail.into())
    }

    /// Whether this error came from the model output rather than transport.
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format(_))
    }
}

/// Result type alias using `EconSearchError`
pub type Result<T> = std::result::Result<T, EconSearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_display_hides_detail() {
        let err = EconSearchError::format("expected value at line 1 column 1");
        assert_eq!(err.to_string(), FORMAT_ERROR_MESSAGE);
        assert!(err.is_format());
    }

    #[test]
    fn test_api_error_display() {
        let err = EconSearchError::Api {
            code: 503,
            message: "overloaded".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 503 - overloaded");
        assert!(!err.is_format());
    }
}
