//! Client error types
//!
//! One error enum shared by the RPC client and the live controller.

use thiserror::Error;

use crate::aliyun::ErrorResponse;

/// Maximum response body size accepted from the API (16 MB).
pub const MAX_RESPONSE_SIZE: usize = 16 * 1024 * 1024;

pub type Result<T> = std::result::Result<T, LiveError>;

#[derive(Debug, Error)]
pub enum LiveError {
    /// Rejected locally, no request was sent.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Network(String),

    /// Error payload returned by the API.
    #[error(transparent)]
    Api(#[from] ErrorResponse),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Response too large ({size} bytes, max {MAX_RESPONSE_SIZE})")]
    ResponseTooLarge { size: u64 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Signing error: {0}")]
    Sign(String),
}

impl LiveError {
    /// Vendor error code, when the API rejected the call.
    #[must_use]
    pub fn api_code(&self) -> Option<&str> {
        match self {
            Self::Api(resp) => Some(resp.code.as_str()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for LiveError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for LiveError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<config::ConfigError> for LiveError {
    fn from(err: config::ConfigError) -> Self {
        Self::InvalidConfig(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_validation() {
        let err = LiveError::Validation("appName should not be empty".to_string());
        assert_eq!(err.to_string(), "Validation error: appName should not be empty");
    }

    #[test]
    fn test_error_display_network() {
        let err = LiveError::Network("connection refused".to_string());
        assert_eq!(err.to_string(), "Network error: connection refused");
    }

    #[test]
    fn test_error_display_api_is_transparent() {
        let resp = ErrorResponse {
            request_id: "6EBD1AC4-C34D-4AE1-963E-B688A228BE31".to_string(),
            code: "InvalidStreamName.Malformed".to_string(),
            message: "Specified StreamName is malformed.".to_string(),
            status_code: 400,
            ..Default::default()
        };
        let err = LiveError::from(resp.clone());
        assert_eq!(err.to_string(), resp.to_string());
        assert_eq!(err.api_code(), Some("InvalidStreamName.Malformed"));
    }

    #[test]
    fn test_api_code_none_for_local_errors() {
        assert!(LiveError::Parse("eof".to_string()).api_code().is_none());
    }

    #[test]
    fn test_error_display_response_too_large() {
        let err = LiveError::ResponseTooLarge { size: 20_000_000 };
        let msg = err.to_string();
        assert!(msg.contains("20000000"));
        assert!(msg.contains(&MAX_RESPONSE_SIZE.to_string()));
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: LiveError = json_err.into();
        assert!(matches!(err, LiveError::Parse(_)));
    }
}
