//! # Generic Store
//!
//! This module defines [`Store`], the reactive state container produced by
//! [`create_store`]. A store is scoped to one endpoint, owns its own [`StoreState`] and
//! calls the shared [`ApiClient`] directly.
//!
//! ## Actions
//!
//! Each selected base action is reached through an accessor that returns `None` when the
//! action was not selected:
//!
//! | Accessor | Request | On success |
//! |---|---|---|
//! | [`Store::fetch_all`] | `GET {endpoint}` | `items`, `meta` |
//! | [`Store::fetch_one`] | `GET {endpoint}/{id}` | `item` |
//! | [`Store::create`] | `POST {endpoint}` | refetch, returns the created resource |
//! | [`Store::update`] | `PUT {endpoint}/{id}` | refetch, returns the updated resource |
//! | [`Store::remove`] | `DELETE {endpoint}/{id}` | refetch |
//!
//! Invoking an action sets `loading = true` and clears `error` immediately, before the
//! returned future is polled. The future performs the request and then updates, in order:
//! the primary fields, `loading = false`, and (for successful mutations) a refetch of the
//! list. Failures are recorded in `error`; they are never returned.
//!
//! ## Concurrency Model
//!
//! Nothing is serialized. Two actions running at once on one store write their results in
//! completion order and the last write wins.

use crate::api::{ApiClient, ConfigError, Method, QueryParams};
use crate::framework::actions::{ActionSet, StoreAction};
use crate::framework::entity::{resource_name, Resource, ResourceId};
use crate::framework::error::StoreError;
use crate::framework::state::{ListResponse, StoreState};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError, Weak};
use tokio::sync::watch;
use tracing::{debug, info, warn};

type ExtendFn<T, X> = Box<dyn FnOnce(StoreApi<T, X>) -> X + Send>;
type StateUpdate<T, X> = Box<dyn FnOnce(&mut StoreState<T, X>) + Send>;
/// Updates issued through [`StoreApi::set`] while the hook runs. `None` once the store is built.
type PendingUpdates<T, X> = Arc<Mutex<Option<Vec<StateUpdate<T, X>>>>>;
type BoxedFetch = Pin<Box<dyn Future<Output = ()> + Send>>;
type FetchAllFn<T, X> = Arc<dyn Fn(Store<T, X>, QueryParams) -> BoxedFetch + Send + Sync>;

enum ActionSelection {
    All,
    Set(ActionSet),
    Names(Vec<String>),
}

/// Configuration for [`create_store`].
///
/// ```rust
/// use rest_store::framework::{StoreAction, StoreOptions};
/// # use rest_store::framework::{Resource, ResourceId};
/// # #[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
/// # struct Tag { id: u32 }
/// # impl Resource for Tag {
/// #     type Create = Tag;
/// #     type Update = Tag;
/// #     fn id(&self) -> ResourceId { self.id.into() }
/// # }
///
/// // Read-only store with a `selected` extension field.
/// let options = StoreOptions::<Tag>::new()
///     .actions([StoreAction::FetchAll, StoreAction::FetchOne])
///     .extend(|_api| Option::<u32>::None);
/// ```
pub struct StoreOptions<T: Resource, X = ()> {
    actions: ActionSelection,
    extend: ExtendFn<T, X>,
    fetch_all: Option<FetchAllFn<T, X>>,
}

impl<T: Resource> StoreOptions<T, ()> {
    /// All five actions, no extension.
    pub fn new() -> Self {
        Self {
            actions: ActionSelection::All,
            extend: Box::new(|_| ()),
            fetch_all: None,
        }
    }
}

impl<T: Resource> Default for StoreOptions<T, ()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Resource, X> StoreOptions<T, X> {
    /// Restricts the store to the given actions.
    pub fn actions(mut self, actions: impl IntoIterator<Item = StoreAction>) -> Self {
        self.actions = ActionSelection::Set(actions.into_iter().collect());
        self
    }

    /// Restricts the store to the named actions. Names are validated by [`create_store`].
    pub fn action_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.actions = ActionSelection::Names(names.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the extension hook. It receives the store's [`StoreApi`] and returns the
    /// extension value stored in [`StoreState::ext`].
    ///
    /// State written with [`StoreApi::set`] inside the hook is applied on top of the base
    /// state once the store exists, so the hook can seed or override `items`, `meta` and
    /// the other base fields.
    ///
    /// Changing the extension type discards a replacement set with
    /// [`StoreOptions::fetch_all_with`]; set it after `extend`.
    pub fn extend<Y, F>(self, extend: F) -> StoreOptions<T, Y>
    where
        F: FnOnce(StoreApi<T, Y>) -> Y + Send + 'static,
    {
        StoreOptions {
            actions: self.actions,
            extend: Box::new(extend),
            fetch_all: None,
        }
    }

    /// Replaces the built-in `fetchAll`, and selects it if it was not selected.
    ///
    /// The replacement is what [`Store::fetch_all`] runs and what mutations refetch
    /// through. It starts after `loading` was set and must leave `loading = false`;
    /// [`Store::load_list`] performs the built-in request and state update. Calling
    /// `store.fetch_all()` from inside the replacement recurses.
    pub fn fetch_all_with<F, Fut>(mut self, fetch: F) -> Self
    where
        F: Fn(Store<T, X>, QueryParams) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
        X: 'static,
    {
        let fetch: FetchAllFn<T, X> =
            Arc::new(move |store: Store<T, X>, params: QueryParams| -> BoxedFetch {
                Box::pin(fetch(store, params))
            });
        self.fetch_all = Some(fetch);
        self
    }
}

struct StoreInner<T, X> {
    endpoint: String,
    actions: ActionSet,
    api: ApiClient,
    state: watch::Sender<StoreState<T, X>>,
    fetch_all: Option<FetchAllFn<T, X>>,
}

/// Setter/getter pair handed to the extension hook.
///
/// It holds a weak reference, so extension values may keep it without keeping the store
/// alive. Inside the hook itself the store is still being built: [`StoreApi::get`] and
/// [`StoreApi::store`] return `None`, and [`StoreApi::set`] queues its update until the
/// hook has returned.
pub struct StoreApi<T, X> {
    inner: Weak<StoreInner<T, X>>,
    pending: PendingUpdates<T, X>,
}

impl<T, X> Clone for StoreApi<T, X> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            pending: self.pending.clone(),
        }
    }
}

impl<T: Resource, X: Clone + Send + Sync + 'static> StoreApi<T, X> {
    /// The full store handle, including the base actions.
    pub fn store(&self) -> Option<Store<T, X>> {
        self.inner.upgrade().map(|inner| Store { inner })
    }

    /// Snapshot of the current state.
    pub fn get(&self) -> Option<StoreState<T, X>> {
        self.inner.upgrade().map(|inner| inner.state.borrow().clone())
    }

    /// Applies `update` to the state. Returns `false` if the store is gone.
    pub fn set(&self, update: impl FnOnce(&mut StoreState<T, X>) + Send + 'static) -> bool {
        if let Some(inner) = self.inner.upgrade() {
            inner.state.send_modify(update);
            return true;
        }
        match self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_mut()
        {
            Some(queue) => {
                queue.push(Box::new(update));
                true
            }
            None => false,
        }
    }
}

/// Handle to a store. Cheap to clone; clones share state.
pub struct Store<T, X = ()> {
    inner: Arc<StoreInner<T, X>>,
}

impl<T, X> Clone for Store<T, X> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// Builds an independent store for `endpoint`.
///
/// # Errors
///
/// Fails with [`ConfigError::UnknownAction`] when the options name an action outside the
/// five base actions.
pub fn create_store<T, X>(
    api: &ApiClient,
    endpoint: impl Into<String>,
    options: StoreOptions<T, X>,
) -> Result<Store<T, X>, ConfigError>
where
    T: Resource,
    X: Clone + Send + Sync + 'static,
{
    let mut actions = match options.actions {
        ActionSelection::All => ActionSet::all(),
        ActionSelection::Set(set) => set,
        ActionSelection::Names(names) => ActionSet::parse(&names)?,
    };
    if options.fetch_all.is_some() {
        actions.insert(StoreAction::FetchAll);
    }
    let endpoint = endpoint.into();
    let extend = options.extend;
    let fetch_all = options.fetch_all;
    let pending: PendingUpdates<T, X> = Arc::new(Mutex::new(Some(Vec::new())));

    let inner = Arc::new_cyclic(|weak: &Weak<StoreInner<T, X>>| {
        let ext = extend(StoreApi {
            inner: weak.clone(),
            pending: pending.clone(),
        });
        let (state, _) = watch::channel(StoreState::new(ext));
        StoreInner {
            endpoint,
            actions,
            api: api.clone(),
            state,
            fetch_all,
        }
    });

    // Extension writes are layered over the base state.
    let seeded = pending
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .take()
        .unwrap_or_default();
    if !seeded.is_empty() {
        inner.state.send_modify(|state| {
            for update in seeded {
                update(state);
            }
        });
    }

    debug!(
        resource = resource_name::<T>(),
        endpoint = %inner.endpoint,
        actions = ?inner.actions,
        "Store created"
    );
    Ok(Store { inner })
}

fn encode<P: Serialize>(payload: &P) -> Result<Value, StoreError> {
    serde_json::to_value(payload).map_err(|e| StoreError::Encode(e.to_string()))
}

fn decode<R: DeserializeOwned>(body: Value) -> Result<R, StoreError> {
    serde_json::from_value(body).map_err(|e| StoreError::Decode(e.to_string()))
}

impl<T: Resource, X: Clone + Send + Sync + 'static> Store<T, X> {
    pub fn endpoint(&self) -> &str {
        &self.inner.endpoint
    }

    /// The actions this store was built with.
    pub fn actions(&self) -> ActionSet {
        self.inner.actions
    }

    pub fn has_action(&self, action: StoreAction) -> bool {
        self.inner.actions.contains(action)
    }

    /// The client this store sends requests through.
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> StoreState<T, X> {
        self.inner.state.borrow().clone()
    }

    /// Snapshot of the extension value.
    pub fn ext(&self) -> X {
        self.inner.state.borrow().ext.clone()
    }

    /// Merges changes into the state and notifies subscribers.
    pub fn set_state(&self, update: impl FnOnce(&mut StoreState<T, X>)) {
        self.inner.state.send_modify(update);
    }

    /// Replaces the whole state and notifies subscribers.
    pub fn replace_state(&self, state: StoreState<T, X>) {
        self.inner.state.send_replace(state);
    }

    /// Receiver that observes every state transition.
    pub fn subscribe(&self) -> watch::Receiver<StoreState<T, X>> {
        self.inner.state.subscribe()
    }

    pub fn fetch_all(&self) -> Option<FetchAll<'_, T, X>> {
        self.has_action(StoreAction::FetchAll)
            .then_some(FetchAll { store: self })
    }

    pub fn fetch_one(&self) -> Option<FetchOne<'_, T, X>> {
        self.has_action(StoreAction::FetchOne)
            .then_some(FetchOne { store: self })
    }

    pub fn create(&self) -> Option<Create<'_, T, X>> {
        self.has_action(StoreAction::Create)
            .then_some(Create { store: self })
    }

    pub fn update(&self) -> Option<Update<'_, T, X>> {
        self.has_action(StoreAction::Update)
            .then_some(Update { store: self })
    }

    pub fn remove(&self) -> Option<Remove<'_, T, X>> {
        self.has_action(StoreAction::Remove)
            .then_some(Remove { store: self })
    }

    fn item_path(&self, id: &ResourceId) -> String {
        format!("{}/{}", self.inner.endpoint, id)
    }

    fn begin(&self, action: StoreAction) {
        self.inner.state.send_modify(|state| {
            state.loading = true;
            state.error = None;
        });
        debug!(
            resource = resource_name::<T>(),
            endpoint = %self.inner.endpoint,
            %action,
            "Action started"
        );
    }

    fn fail(&self, action: StoreAction, error: StoreError) {
        warn!(
            resource = resource_name::<T>(),
            endpoint = %self.inner.endpoint,
            %action,
            %error,
            "Action failed"
        );
        self.inner.state.send_modify(|state| {
            if action == StoreAction::FetchOne {
                state.item = None;
            }
            state.error = Some(error);
            state.loading = false;
        });
    }

    fn start_fetch_all(&self, params: QueryParams) -> impl Future<Output = ()> + Send + 'static {
        self.begin(StoreAction::FetchAll);
        let store = self.clone();
        async move {
            match store.inner.fetch_all.clone() {
                Some(fetch) => fetch(store, params).await,
                None => store.load_list(params).await,
            }
        }
    }

    /// The built-in list request: `GET {endpoint}` with `params`, then `items`, `meta`
    /// and `loading = false`, or `error` on failure. Does not set `loading` first.
    pub async fn load_list(&self, params: QueryParams) {
        let result = match self.inner.api.get(&self.inner.endpoint, Some(&params)).await {
            Ok(body) => decode::<ListResponse<T>>(body),
            Err(error) => Err(error.into()),
        };

        match result {
            Ok(response) => {
                let (items, meta) = response.into_parts();
                let count = items.len();
                self.inner.state.send_modify(|state| {
                    state.items = items;
                    state.meta = meta;
                    state.loading = false;
                });
                info!(
                    resource = resource_name::<T>(),
                    endpoint = %self.inner.endpoint,
                    count,
                    page = meta.current_page,
                    total = meta.total_count,
                    "Fetched list"
                );
            }
            Err(error) => self.fail(StoreAction::FetchAll, error),
        }
    }

    async fn finish_fetch_one(&self, id: ResourceId) {
        let result = match self.inner.api.get(&self.item_path(&id), None).await {
            Ok(body) => decode::<T>(body),
            Err(error) => Err(error.into()),
        };

        match result {
            Ok(resource) => {
                self.inner.state.send_modify(|state| {
                    state.item = Some(resource);
                    state.loading = false;
                });
                info!(resource = resource_name::<T>(), %id, "Fetched item");
            }
            Err(error) => self.fail(StoreAction::FetchOne, error),
        }
    }

    async fn save(&self, method: Method, path: &str, payload: Value) -> Result<T, StoreError> {
        let body = match method {
            Method::Put => self.inner.api.put(path, Some(payload)).await?,
            _ => self.inner.api.post(path, Some(payload)).await?,
        };
        decode(body)
    }

    /// Shared tail of `create` and `update`.
    async fn finish_save(
        &self,
        action: StoreAction,
        method: Method,
        path: String,
        payload: Result<Value, StoreError>,
    ) -> Option<T> {
        let result = match payload {
            Ok(payload) => self.save(method, &path, payload).await,
            Err(error) => Err(error),
        };

        match result {
            Ok(resource) => {
                self.inner.state.send_modify(|state| state.loading = false);
                info!(
                    resource = resource_name::<T>(),
                    id = %resource.id(),
                    %action,
                    "Saved"
                );
                self.refetch(action).await;
                Some(resource)
            }
            Err(error) => {
                self.fail(action, error);
                None
            }
        }
    }

    async fn finish_remove(&self, id: ResourceId) {
        match self.inner.api.delete(&self.item_path(&id), None).await {
            Ok(_) => {
                self.inner.state.send_modify(|state| state.loading = false);
                info!(resource = resource_name::<T>(), %id, "Removed");
                self.refetch(StoreAction::Remove).await;
            }
            Err(error) => self.fail(StoreAction::Remove, error.into()),
        }
    }

    /// Reloads the list after a successful mutation, if this store can list at all.
    async fn refetch(&self, after: StoreAction) {
        if !self.has_action(StoreAction::FetchAll) {
            debug!(
                resource = resource_name::<T>(),
                %after,
                "fetchAll not selected, skipping refetch"
            );
            return;
        }
        self.start_fetch_all(QueryParams::new()).await;
    }
}

/// `fetchAll`: `GET {endpoint}` into `items` and `meta`.
pub struct FetchAll<'a, T, X> {
    store: &'a Store<T, X>,
}

impl<T: Resource, X: Clone + Send + Sync + 'static> FetchAll<'_, T, X> {
    /// Fetches with no query parameters.
    pub fn run(self) -> impl Future<Output = ()> + Send + 'static {
        self.store.start_fetch_all(QueryParams::new())
    }

    pub fn run_with(self, params: QueryParams) -> impl Future<Output = ()> + Send + 'static {
        self.store.start_fetch_all(params)
    }
}

/// `fetchOne`: `GET {endpoint}/{id}` into `item`.
pub struct FetchOne<'a, T, X> {
    store: &'a Store<T, X>,
}

impl<T: Resource, X: Clone + Send + Sync + 'static> FetchOne<'_, T, X> {
    pub fn run(self, id: impl Into<ResourceId>) -> impl Future<Output = ()> + Send + 'static {
        let id = id.into();
        self.store.begin(StoreAction::FetchOne);
        let store = self.store.clone();
        async move { store.finish_fetch_one(id).await }
    }
}

/// `create`: `POST {endpoint}`, then refetch. Resolves to the created resource, or `None`
/// on failure.
pub struct Create<'a, T, X> {
    store: &'a Store<T, X>,
}

impl<T: Resource, X: Clone + Send + Sync + 'static> Create<'_, T, X> {
    pub fn run(self, payload: T::Create) -> impl Future<Output = Option<T>> + Send + 'static {
        self.store.begin(StoreAction::Create);
        let store = self.store.clone();
        async move {
            let path = store.inner.endpoint.clone();
            store
                .finish_save(StoreAction::Create, Method::Post, path, encode(&payload))
                .await
        }
    }
}

/// `update`: `PUT {endpoint}/{id}`, then refetch. Resolves to the updated resource, or
/// `None` on failure.
pub struct Update<'a, T, X> {
    store: &'a Store<T, X>,
}

impl<T: Resource, X: Clone + Send + Sync + 'static> Update<'_, T, X> {
    pub fn run(
        self,
        id: impl Into<ResourceId>,
        payload: T::Update,
    ) -> impl Future<Output = Option<T>> + Send + 'static {
        let path = self.store.item_path(&id.into());
        self.store.begin(StoreAction::Update);
        let store = self.store.clone();
        async move {
            store
                .finish_save(StoreAction::Update, Method::Put, path, encode(&payload))
                .await
        }
    }
}

/// `remove`: `DELETE {endpoint}/{id}`, then refetch.
pub struct Remove<'a, T, X> {
    store: &'a Store<T, X>,
}

impl<T: Resource, X: Clone + Send + Sync + 'static> Remove<'_, T, X> {
    pub fn run(self, id: impl Into<ResourceId>) -> impl Future<Output = ()> + Send + 'static {
        let id = id.into();
        self.store.begin(StoreAction::Remove);
        let store = self.store.clone();
        async move { store.finish_remove(id).await }
    }
}
