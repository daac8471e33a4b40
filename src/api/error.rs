//! # API Errors
//!
//! Failures are reported at two levels:
//!
//! - [`TransportError`] is what a [`Transport`](super::Transport) reports about a single request.
//! - [`ApiError`] is what callers of [`ApiClient`](super::ApiClient) see after normalization.
//!
//! Configuration problems (bad base URL, bad header, unknown store action) are
//! [`ConfigError`]s and are reported when the configuration is applied, never at request time.

use serde_json::Value;

/// Normalized failure of a wrapper call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// No transport has been installed yet.
    #[error("API client not initialized. Call initialize() first.")]
    NotInitialized,
    /// The server answered with an error status. `body` is the server's error payload.
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: Value },
    /// The request went out but no response came back.
    #[error("No response from server")]
    Network,
    /// The request could not be built or sent.
    #[error("Request failed: {0}")]
    RequestSetup(String),
}

/// The kind of an [`ApiError`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    NotInitialized,
    ApiError,
    NetworkError,
    RequestSetupError,
}

impl ApiError {
    pub fn kind(&self) -> ApiErrorKind {
        match self {
            ApiError::NotInitialized => ApiErrorKind::NotInitialized,
            ApiError::Api { .. } => ApiErrorKind::ApiError,
            ApiError::Network => ApiErrorKind::NetworkError,
            ApiError::RequestSetup(_) => ApiErrorKind::RequestSetupError,
        }
    }

    /// The server's error body, for [`ApiError::Api`] only.
    pub fn payload(&self) -> Option<&Value> {
        match self {
            ApiError::Api { body, .. } => Some(body),
            _ => None,
        }
    }

    /// HTTP status of the server response, for [`ApiError::Api`] only.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failure reported by a transport for one request.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransportError {
    /// A response arrived with a non-success status.
    #[error("Server responded with status {status}")]
    Response { status: u16, body: Value },
    /// The request was sent but nothing came back (timeout, connection reset, refused).
    #[error("No response: {0}")]
    NoResponse(String),
    /// The request could not be constructed or dispatched.
    #[error("{0}")]
    Setup(String),
}

/// Errors raised while applying configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid base URL '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },
    #[error("Invalid header '{name}': {message}")]
    InvalidHeader { name: String, message: String },
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
    #[error("Unknown store action: {0}")]
    UnknownAction(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ApiError::NotInitialized.to_string(),
            "API client not initialized. Call initialize() first."
        );
        assert_eq!(ApiError::Network.to_string(), "No response from server");
        assert_eq!(
            ApiError::RequestSetup("bad header".into()).to_string(),
            "Request failed: bad header"
        );
    }

    #[test]
    fn test_api_error_exposes_server_body() {
        let err = ApiError::Api {
            status: 422,
            body: json!({"detail": "name is required"}),
        };
        assert_eq!(err.kind(), ApiErrorKind::ApiError);
        assert_eq!(err.status(), Some(422));
        assert_eq!(err.payload(), Some(&json!({"detail": "name is required"})));
        assert_eq!(ApiError::Network.payload(), None);
    }
}
