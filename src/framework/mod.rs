//! Generic store factory for REST resources.
//!
//! This module provides the building blocks for type-safe state containers that perform
//! standard CRUD operations against a REST endpoint and track loading, error and
//! pagination state.
//!
//! # Main Components
//!
//! - [`Resource`] - Trait that resource types implement to be managed by a store
//! - [`create_store`] - Builds a [`Store`] for one endpoint from [`StoreOptions`]
//! - [`Store`] - Reactive handle: state snapshot, merge, subscribe, and the selected actions
//! - [`StoreState`] - `items`, `item`, `loading`, `error`, `meta` and the extension value
//! - [`StoreError`] - What a failed action leaves in `error`
//!
//! # Testing
//!
//! See [`crate::api::mock`] for a scripted transport that drives stores without a network.

pub mod actions;
pub mod entity;
pub mod error;
pub mod state;
pub mod store;

// Re-export core types for convenience
pub use actions::{ActionSet, StoreAction};
pub use entity::{Resource, ResourceId};
pub use error::StoreError;
pub use state::{ListResponse, PageMeta, StoreState};
pub use store::{
    create_store, Create, FetchAll, FetchOne, Remove, Store, StoreApi, StoreOptions, Update,
};
