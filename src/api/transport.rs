//! # Transport Seam
//!
//! A [`Transport`] is the thing that actually talks HTTP. The [`ApiClient`](super::ApiClient)
//! never touches the network itself: it builds an [`ApiRequest`], hands it to whichever
//! transport is installed and normalizes what comes back.
//!
//! Two implementations ship with the crate:
//!
//! - [`HttpTransport`](super::HttpTransport), backed by `reqwest`.
//! - [`MockTransport`](super::mock::MockTransport), a scripted transport for tests.

use crate::api::error::TransportError;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::fmt;

/// Query parameters for `GET` and `DELETE` requests.
pub type QueryParams = Map<String, Value>;

/// HTTP verbs used by the wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// One field of a multipart upload.
#[derive(Debug, Clone, PartialEq)]
pub enum FormField {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        content_type: Option<String>,
        bytes: Vec<u8>,
    },
}

/// A form-like payload for [`ApiClient::post_file`](super::ApiClient::post_file).
///
/// ```rust
/// use rest_store::api::FormPayload;
///
/// let form = FormPayload::new()
///     .text("title", "Quarterly report")
///     .file("document", "report.pdf", b"%PDF-1.7".to_vec());
/// assert_eq!(form.fields().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormPayload {
    fields: Vec<FormField>,
}

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(FormField::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        self.fields.push(FormField::File {
            name: name.into(),
            file_name: file_name.into(),
            content_type: None,
            bytes,
        });
        self
    }

    pub fn file_with_type(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        self.fields.push(FormField::File {
            name: name.into(),
            file_name: file_name.into(),
            content_type: Some(content_type.into()),
            bytes,
        });
        self
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn into_fields(self) -> Vec<FormField> {
        self.fields
    }
}

/// Request body carried by an [`ApiRequest`].
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart(FormPayload),
}

/// A fully described request, relative to the transport's base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub params: Option<QueryParams>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: None,
            body: RequestBody::Empty,
        }
    }

    pub fn with_params(mut self, params: Option<QueryParams>) -> Self {
        self.params = params;
        self
    }

    pub fn with_json(mut self, body: Option<Value>) -> Self {
        self.body = body.map_or(RequestBody::Empty, RequestBody::Json);
        self
    }

    pub fn with_form(mut self, form: FormPayload) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }
}

/// The capability the wrapper needs from an HTTP client.
///
/// Implementations return the parsed response body on success. A response with an
/// error status must come back as [`TransportError::Response`] carrying the body.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn execute(&self, request: ApiRequest) -> Result<Value, TransportError>;
}
