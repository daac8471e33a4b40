//! Runtime wiring and observability.
//!
//! This module contains the composition root of an application using this crate:
//!
//! - **Client ownership**: one [`ApiClient`](crate::api::ApiClient) shared by every store
//! - **Store creation**: stores are created through the system so they all use that client
//! - **Observability setup**: initializing tracing and logging
//!
//! # Main Components
//!
//! - [`RestSystem`] - Owns the API client and hands out stores bound to it
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod system;
pub mod tracing;

pub use system::RestSystem;
pub use self::tracing::setup_tracing;
