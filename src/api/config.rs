//! # Transport Configuration
//!
//! [`ApiConfig`] describes how the HTTP transport is built: where requests go, which
//! headers they carry, how long they may take and whether cookies are kept.
//!
//! Every request carries `Content-Type: application/json` unless the caller's headers
//! say otherwise. Header names are compared case-insensitively when merging.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Default content type sent with every request.
pub const DEFAULT_CONTENT_TYPE: (&str, &str) = ("Content-Type", "application/json");

fn default_with_credentials() -> bool {
    true
}

/// Configuration for the process-wide transport.
///
/// ```rust
/// use rest_store::api::ApiConfig;
/// use std::time::Duration;
///
/// let config = ApiConfig::new("https://api.example.com/v1")
///     .header("Authorization", "Bearer token")
///     .timeout(Duration::from_secs(10));
///
/// assert_eq!(config.merged_headers().len(), 2);
/// assert!(config.with_credentials);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    /// Extra headers, merged over the default content type.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Per-request timeout in milliseconds. `None` means no timeout.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    /// Keep and resend cookies between requests.
    #[serde(default = "default_with_credentials")]
    pub with_credentials: bool,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            headers: BTreeMap::new(),
            timeout_ms: None,
            with_credentials: true,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    pub fn with_credentials(mut self, enabled: bool) -> Self {
        self.with_credentials = enabled;
        self
    }

    pub fn timeout_duration(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Default headers with the caller's headers layered on top.
    pub fn merged_headers(&self) -> BTreeMap<String, String> {
        let mut merged = BTreeMap::new();
        let (name, value) = DEFAULT_CONTENT_TYPE;
        merged.insert(name.to_string(), value.to_string());

        for (name, value) in &self.headers {
            merged.retain(|existing: &String, _| !existing.eq_ignore_ascii_case(name));
            merged.insert(name.clone(), value.clone());
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_content_type() {
        let config = ApiConfig::new("http://localhost");
        let headers = config.merged_headers();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers["Content-Type"], "application/json");
    }

    #[test]
    fn test_caller_headers_win() {
        let config = ApiConfig::new("http://localhost")
            .header("content-type", "text/plain")
            .header("X-Tenant", "acme");
        let headers = config.merged_headers();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers["content-type"], "text/plain");
        assert_eq!(headers["X-Tenant"], "acme");
        assert!(!headers.contains_key("Content-Type"));
    }

    #[test]
    fn test_timeout_saturates_instead_of_wrapping() {
        let config = ApiConfig::new("http://localhost").timeout(Duration::MAX);
        assert_eq!(config.timeout_ms, Some(u64::MAX));

        let config = ApiConfig::new("http://localhost").timeout(Duration::from_secs(3));
        assert_eq!(config.timeout_duration(), Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: ApiConfig =
            serde_json::from_str(r#"{"base_url": "https://api.example.com"}"#).unwrap();
        assert_eq!(config.base_url, "https://api.example.com");
        assert!(config.headers.is_empty());
        assert!(config.with_credentials);
        assert_eq!(config.timeout_duration(), None);

        let config: ApiConfig = serde_json::from_str(
            r#"{"base_url": "https://api.example.com", "timeout_ms": 2500, "with_credentials": false}"#,
        )
        .unwrap();
        assert_eq!(config.timeout_duration(), Some(Duration::from_millis(2500)));
        assert!(!config.with_credentials);
    }
}
