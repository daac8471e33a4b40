use crate::api::{ApiClient, ApiConfig, ConfigError, Transport};
use crate::framework::{create_store, Resource, Store, StoreOptions};
use tracing::info;

/// The composition root for REST-backed state.
///
/// `RestSystem` is responsible for:
/// - **Client ownership**: it holds the single [`ApiClient`] of the application
/// - **Configuration**: initializing and re-initializing the transport in one place
/// - **Store wiring**: every store it creates sends requests through that client
///
/// Re-configuring the system affects every store it created, for requests issued after the
/// call. Requests already in flight finish on the transport they started with.
///
/// # Example
///
/// ```ignore
/// let system = RestSystem::new(ApiConfig::new("https://api.example.com"))?;
///
/// let todos = system.store::<Todo, _>("/todos", StoreOptions::new())?;
/// todos.fetch_all().unwrap().run().await;
///
/// // Rotate credentials for every store at once
/// system.reconfigure(ApiConfig::new("https://api.example.com").header("Authorization", token))?;
/// ```
#[derive(Clone)]
pub struct RestSystem {
    api: ApiClient,
}

impl RestSystem {
    /// Creates a system whose client is initialized from `config`.
    pub fn new(config: ApiConfig) -> Result<Self, ConfigError> {
        let api = ApiClient::new();
        api.initialize(config)?;
        info!("REST system started");
        Ok(Self { api })
    }

    /// Creates a system backed by a custom transport.
    pub fn with_transport<T: Transport>(transport: T) -> Self {
        let api = ApiClient::new();
        api.initialize_with(transport);
        Self { api }
    }

    /// Creates a system with no transport installed yet. Every request fails with
    /// `NotInitialized` until [`RestSystem::reconfigure`] is called.
    pub fn uninitialized() -> Self {
        Self {
            api: ApiClient::new(),
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Replaces the transport of every store created by this system.
    pub fn reconfigure(&self, config: ApiConfig) -> Result<(), ConfigError> {
        self.api.initialize(config)
    }

    /// Creates a store for `endpoint` bound to this system's client.
    pub fn store<T, X>(
        &self,
        endpoint: impl Into<String>,
        options: StoreOptions<T, X>,
    ) -> Result<Store<T, X>, ConfigError>
    where
        T: Resource,
        X: Clone + Send + Sync + 'static,
    {
        create_store(&self.api, endpoint, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use crate::api::ApiError;
    use crate::framework::{ResourceId, StoreError};
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct Note {
        id: String,
        body: String,
    }

    impl Resource for Note {
        type Create = Note;
        type Update = Note;

        fn id(&self) -> ResourceId {
            self.id.clone().into()
        }
    }

    #[tokio::test]
    async fn test_stores_share_the_system_client() {
        let mock = MockTransport::new();
        mock.expect_get("/notes/n1").return_ok(json!({"id": "n1", "body": "hi"}));

        let system = RestSystem::with_transport(mock.clone());
        let notes = system.store::<Note, _>("/notes", StoreOptions::new()).unwrap();
        notes.fetch_one().unwrap().run("n1").await;

        assert_eq!(notes.state().item.map(|n| n.body), Some("hi".to_string()));
        mock.verify();
    }

    #[tokio::test]
    async fn test_uninitialized_system_records_not_initialized() {
        let system = RestSystem::uninitialized();
        let notes = system.store::<Note, _>("/notes", StoreOptions::new()).unwrap();
        notes.fetch_all().unwrap().run().await;

        assert_eq!(
            notes.state().error,
            Some(StoreError::Api(ApiError::NotInitialized))
        );
        assert!(!notes.state().loading);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(RestSystem::new(ApiConfig::new("::not-a-url")).is_err());
    }
}
