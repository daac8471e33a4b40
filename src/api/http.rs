//! # reqwest Transport
//!
//! [`HttpTransport`] is the production [`Transport`]. It is built once from an
//! [`ApiConfig`] and owns a `reqwest::Client` carrying the merged default headers,
//! the timeout and the cookie store.
//!
//! URLs are joined by plain concatenation: the base URL without trailing slashes,
//! one `/`, then the request path without leading slashes.

use crate::api::config::ApiConfig;
use crate::api::error::{ConfigError, TransportError};
use crate::api::transport::{ApiRequest, FormField, FormPayload, RequestBody, Transport};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;
use url::Url;

/// [`Transport`] backed by `reqwest`.
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Builds the client described by `config`.
    ///
    /// # Errors
    ///
    /// Fails when the base URL does not parse, a header name or value is invalid, or
    /// the underlying client cannot be constructed.
    pub fn new(config: &ApiConfig) -> Result<Self, ConfigError> {
        Url::parse(&config.base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: config.base_url.clone(),
            message: e.to_string(),
        })?;

        let mut headers = HeaderMap::new();
        for (name, value) in config.merged_headers() {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| ConfigError::InvalidHeader {
                    name: name.clone(),
                    message: e.to_string(),
                })?;
            let header_value =
                HeaderValue::from_str(&value).map_err(|e| ConfigError::InvalidHeader {
                    name: name.clone(),
                    message: e.to_string(),
                })?;
            headers.insert(header_name, header_value);
        }

        let mut builder = Client::builder()
            .default_headers(headers)
            .cookie_store(config.with_credentials);
        if let Some(timeout) = config.timeout_duration() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ConfigError::ClientBuild(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn build_form(form: FormPayload) -> Result<Form, TransportError> {
        let mut multipart = Form::new();
        for field in form.into_fields() {
            match field {
                FormField::Text { name, value } => {
                    multipart = multipart.text(name, value);
                }
                FormField::File {
                    name,
                    file_name,
                    content_type,
                    bytes,
                } => {
                    let mut part = Part::bytes(bytes).file_name(file_name);
                    if let Some(content_type) = content_type {
                        part = part.mime_str(&content_type).map_err(|e| {
                            TransportError::Setup(format!("Invalid MIME type: {e}"))
                        })?;
                    }
                    multipart = multipart.part(name, part);
                }
            }
        }
        Ok(multipart)
    }

    /// Errors from `send()` never carry a response: either the request could not be
    /// built, or it went out and nothing usable came back.
    fn map_send_error(error: reqwest::Error) -> TransportError {
        if error.is_builder() {
            TransportError::Setup(error.to_string())
        } else {
            TransportError::NoResponse(error.to_string())
        }
    }
}

/// Empty bodies become `null`, non-JSON bodies are kept as a JSON string.
fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> Result<Value, TransportError> {
        let url = self.url_for(&request.path);
        let url = Url::parse(&url).map_err(|e| TransportError::Setup(format!("{e}: {url}")))?;

        let mut builder = self.client.request(request.method.into(), url);
        if let Some(params) = &request.params {
            if !params.is_empty() {
                builder = builder.query(params);
            }
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            // Sent as raw bytes so the client's default Content-Type (the caller's, if
            // configured) is the one that goes out.
            RequestBody::Json(body) => builder.body(
                serde_json::to_vec(&body).map_err(|e| TransportError::Setup(e.to_string()))?,
            ),
            // The multipart content type (with boundary) replaces the JSON default.
            RequestBody::Multipart(form) => builder.multipart(Self::build_form(form)?),
        };

        let response = builder.send().await.map_err(Self::map_send_error)?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::NoResponse(e.to_string()))?;
        debug!(status = status.as_u16(), bytes = text.len(), "Response received");

        let body = parse_body(&text);
        if status.is_success() {
            Ok(body)
        } else {
            Err(TransportError::Response {
                status: status.as_u16(),
                body,
            })
        }
    }
}
