//! HTTP wrapper.
//!
//! This module provides a uniform request/response/error contract over an HTTP
//! transport. Callers configure an [`ApiClient`] once and use its verbs everywhere;
//! failures always come back as one of the [`ApiError`] kinds.
//!
//! # Main Components
//!
//! - [`ApiClient`] - Verb methods funnelled through one normalizing request path
//! - [`ApiConfig`] - Base URL, headers, timeout and credentials
//! - [`Transport`] - The seam to the HTTP implementation ([`HttpTransport`] in production)
//! - [`ApiError`] - Normalized failures
//!
//! # Testing
//!
//! See [`mock`] module for a scripted transport.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod mock;
pub mod transport;

pub use client::ApiClient;
pub use config::ApiConfig;
pub use error::{ApiError, ApiErrorKind, ConfigError, TransportError};
pub use http::HttpTransport;
pub use transport::{ApiRequest, FormField, FormPayload, Method, QueryParams, RequestBody, Transport};
