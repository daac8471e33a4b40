//! # API Client
//!
//! [`ApiClient`] is the uniform entry point for HTTP calls. It owns a single transport
//! slot shared by all of its clones, so the composition root can configure it once and
//! hand clones to every store.
//!
//! Every verb funnels through one private request path which:
//!
//! 1. fails fast with [`ApiError::NotInitialized`] when no transport is installed,
//! 2. dispatches the request through the current transport,
//! 3. maps transport failures onto [`ApiError`] and logs them.

use crate::api::config::ApiConfig;
use crate::api::error::{ApiError, ConfigError, TransportError};
use crate::api::http::HttpTransport;
use crate::api::transport::{ApiRequest, FormPayload, Method, QueryParams, Transport};
use serde_json::Value;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, error, info, instrument};

type TransportSlot = Arc<RwLock<Option<Arc<dyn Transport>>>>;

/// Shared handle to the configured transport.
///
/// ```rust
/// use rest_store::api::{ApiClient, ApiConfig, ApiError};
///
/// # #[tokio::main]
/// # async fn main() {
/// let api = ApiClient::new();
/// assert_eq!(api.get("/users", None).await, Err(ApiError::NotInitialized));
///
/// api.initialize(ApiConfig::new("https://api.example.com")).unwrap();
/// assert!(api.is_initialized());
/// # }
/// ```
#[derive(Clone, Default)]
pub struct ApiClient {
    transport: TransportSlot,
}

impl ApiClient {
    /// Creates a client with no transport installed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a `reqwest` transport from `config` and installs it, replacing any
    /// previous transport entirely.
    ///
    /// On error the previously installed transport is left untouched.
    pub fn initialize(&self, config: ApiConfig) -> Result<(), ConfigError> {
        let transport = HttpTransport::new(&config)?;
        info!(base_url = %config.base_url, "API client initialized");
        self.install(Arc::new(transport));
        Ok(())
    }

    /// Installs a custom transport, replacing any previous one.
    pub fn initialize_with<T: Transport>(&self, transport: T) {
        self.install(Arc::new(transport));
    }

    /// Installs an already shared transport, replacing any previous one.
    pub fn initialize_shared(&self, transport: Arc<dyn Transport>) {
        self.install(transport);
    }

    pub fn is_initialized(&self) -> bool {
        self.current().is_some()
    }

    /// Drops the installed transport. Subsequent calls fail with `NotInitialized`.
    pub fn reset(&self) {
        *self
            .transport
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
        debug!("API client reset");
    }

    fn install(&self, transport: Arc<dyn Transport>) {
        *self
            .transport
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(transport);
    }

    fn current(&self) -> Option<Arc<dyn Transport>> {
        self.transport
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[instrument(skip(self, params))]
    pub async fn get(&self, path: &str, params: Option<&QueryParams>) -> Result<Value, ApiError> {
        let request = ApiRequest::new(Method::Get, path).with_params(params.cloned());
        self.request(request).await
    }

    #[instrument(skip(self, body))]
    pub async fn post(&self, path: &str, body: Option<Value>) -> Result<Value, ApiError> {
        let request = ApiRequest::new(Method::Post, path).with_json(body);
        self.request(request).await
    }

    #[instrument(skip(self, body))]
    pub async fn put(&self, path: &str, body: Option<Value>) -> Result<Value, ApiError> {
        let request = ApiRequest::new(Method::Put, path).with_json(body);
        self.request(request).await
    }

    #[instrument(skip(self, params))]
    pub async fn delete(
        &self,
        path: &str,
        params: Option<&QueryParams>,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::new(Method::Delete, path).with_params(params.cloned());
        self.request(request).await
    }

    /// Multipart upload.
    #[instrument(skip(self, form))]
    pub async fn post_file(&self, path: &str, form: FormPayload) -> Result<Value, ApiError> {
        let request = ApiRequest::new(Method::Post, path).with_form(form);
        self.request(request).await
    }

    async fn request(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let method = request.method;
        let Some(transport) = self.current() else {
            error!(%method, path = %request.path, "API client not initialized");
            return Err(ApiError::NotInitialized);
        };

        debug!(%method, path = %request.path, "Sending request");
        transport.execute(request).await.map_err(normalize)
    }
}

fn normalize(error: TransportError) -> ApiError {
    match error {
        TransportError::Response { status, body } => {
            error!(status, %body, "API error");
            ApiError::Api { status, body }
        }
        TransportError::NoResponse(cause) => {
            error!(%cause, "No response from server");
            ApiError::Network
        }
        TransportError::Setup(message) => {
            error!(%message, "Request setup failed");
            ApiError::RequestSetup(message)
        }
    }
}
