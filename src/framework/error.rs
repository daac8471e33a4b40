//! # Store Errors
//!
//! Store actions never return errors to the caller. Whatever goes wrong is turned into a
//! [`StoreError`] and kept in the store's `error` field until the next action starts.

use crate::api::ApiError;

/// Last failure recorded by a store.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// The wrapper call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
    /// The payload could not be serialized.
    #[error("Failed to encode request payload: {0}")]
    Encode(String),
    /// The response body did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),
    /// Any other failure, kept as its string form.
    #[error("{0}")]
    Other(String),
}

impl StoreError {
    /// The wrapper error, if this failure came from the API.
    pub fn api(&self) -> Option<&ApiError> {
        match self {
            StoreError::Api(error) => Some(error),
            _ => None,
        }
    }
}

impl From<String> for StoreError {
    fn from(msg: String) -> Self {
        StoreError::Other(msg)
    }
}

impl From<&str> for StoreError {
    fn from(msg: &str) -> Self {
        StoreError::Other(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiErrorKind;

    #[test]
    fn test_api_errors_keep_their_message() {
        let err = StoreError::from(ApiError::Network);
        assert_eq!(err.to_string(), "No response from server");
        assert_eq!(err.api().map(ApiError::kind), Some(ApiErrorKind::NetworkError));
    }

    #[test]
    fn test_plain_values_are_wrapped() {
        let err = StoreError::from("quota exceeded");
        assert_eq!(err, StoreError::Other("quota exceeded".into()));
        assert_eq!(err.to_string(), "quota exceeded");
        assert!(err.api().is_none());
    }
}
