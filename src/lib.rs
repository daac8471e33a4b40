//! # rest-store
//!
//! > **Typed CRUD state containers over a uniform HTTP wrapper.**
//!
//! This crate wraps an HTTP client with a single request/response/error contract and builds
//! reusable stores that perform the standard CRUD operations against a REST endpoint while
//! tracking loading, error and pagination state.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Why a wrapper plus stores?
//!
//! - **The wrapper** gives every caller the same four failure kinds, whatever went wrong on the wire.
//! - **The stores** give every resource type the same state shape and the same action semantics.
//!
//! Write the CRUD plumbing **once**; every resource gets it by implementing [`Resource`](framework::Resource).
//!
//! ## 🚀 Core Concepts
//!
//! ### Generics: The Power of `T`
//! You'll see `Store<T: Resource, X>` everywhere. `T` is the resource, `X` is whatever the
//! store's extension adds (`()` when nothing).
//!
//! ### Absent, not disabled
//! A store built with a subset of actions does not expose the others at all: their accessors
//! return `None`, so callers can tell.
//!
//! ### Errors are state
//! Store actions never fail. Whatever goes wrong lands in `state().error` and `loading` is reset.
//! The wrapper underneath does return errors, see [`ApiError`](api::ApiError).
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. One client, explicitly owned
//! There is no hidden global. The composition root owns one [`ApiClient`](api::ApiClient);
//! clones share its transport, so re-initializing it switches every store at once.
//!
//! ### 2. Synchronous start, asynchronous finish
//! Invoking an action flips `loading` and clears `error` right away. The returned future does the
//! request and applies the result.
//!
//! ### 3. Observability
//! We use `tracing` everywhere with structured fields (`resource`, `endpoint`, `action`).
//! See [`runtime::setup_tracing`].
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Wire ([`api`])
//! - **Role**: Verb methods over a pluggable [`Transport`](api::Transport) with error normalization.
//! - **Key items**: [`ApiClient`](api::ApiClient), [`ApiConfig`](api::ApiConfig), [`MockTransport`](api::mock::MockTransport).
//!
//! ### 2. The Engine ([`framework`])
//! - **Role**: The generic store factory and its state-transition contract.
//! - **Key items**: [`create_store`](framework::create_store), [`Store`](framework::Store), [`StoreOptions`](framework::StoreOptions).
//!
//! ### 3. The Orchestrator ([`runtime`])
//! - **Role**: Owns the client and hands out stores; sets up logging.
//! - **Key items**: [`RestSystem`](runtime::RestSystem).
//!
//! ## 🚀 Quick Start
//!
//! ```rust,no_run
//! use rest_store::api::ApiConfig;
//! use rest_store::framework::{Resource, ResourceId, StoreOptions};
//! use rest_store::runtime::{setup_tracing, RestSystem};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! struct Todo { id: u32, title: String }
//!
//! #[derive(Debug, Serialize)]
//! struct NewTodo { title: String }
//!
//! impl Resource for Todo {
//!     type Create = NewTodo;
//!     type Update = NewTodo;
//!     fn id(&self) -> ResourceId { self.id.into() }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     setup_tracing();
//!
//!     let system = RestSystem::new(ApiConfig::new("https://api.example.com"))?;
//!     let todos = system.store::<Todo, _>("/todos", StoreOptions::new())?;
//!
//!     if let Some(create) = todos.create() {
//!         create.run(NewTodo { title: "Write docs".into() }).await;
//!     }
//!
//!     let state = todos.state();
//!     match state.error {
//!         Some(error) => eprintln!("failed: {error}"),
//!         None => println!("{} todos, page {}", state.items.len(), state.meta.current_page),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod api;
pub mod framework;
pub mod runtime;
