//! # Mock Transport
//!
//! Utilities for testing stores and API callers without a network.
//!
//! [`MockTransport`] is a scripted [`Transport`]: queue the requests you expect with
//! [`MockTransport::expect_get`] and friends, say what each should return, install the
//! mock into an [`ApiClient`](crate::api::ApiClient), run the code under test and finish
//! with [`MockTransport::verify`].
//!
//! Expectations are consumed in order. A request that does not match the next expectation
//! (wrong verb or path), or arrives when none is left, panics with a description of both.
//!
//! ```rust
//! use rest_store::api::{ApiClient, mock::MockTransport};
//! use serde_json::json;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let mock = MockTransport::new();
//! mock.expect_get("/users/1").return_ok(json!({"id": 1, "name": "Ada"}));
//!
//! let api = ApiClient::new();
//! api.initialize_with(mock.clone());
//!
//! let user = api.get("/users/1", None).await.unwrap();
//! assert_eq!(user["name"], "Ada");
//! mock.verify();
//! # }
//! ```

use crate::api::error::TransportError;
use crate::api::transport::{ApiRequest, Method, Transport};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// An expected request and the response to give it.
struct Expectation {
    method: Method,
    path: String,
    response: Result<Value, TransportError>,
}

#[derive(Default)]
struct MockState {
    expectations: VecDeque<Expectation>,
    requests: Vec<ApiRequest>,
}

/// A scripted transport with expectation tracking.
///
/// Clones share the same expectation queue and request log.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    /// Creates a mock with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Expects a request with the given verb and path.
    pub fn expect(&self, method: Method, path: impl Into<String>) -> ExpectationBuilder {
        ExpectationBuilder {
            method,
            path: path.into(),
            state: self.state.clone(),
        }
    }

    pub fn expect_get(&self, path: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Get, path)
    }

    pub fn expect_post(&self, path: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Post, path)
    }

    pub fn expect_put(&self, path: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Put, path)
    }

    pub fn expect_delete(&self, path: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Delete, path)
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.lock().requests.clone()
    }

    /// Number of requests received with the given verb.
    pub fn count(&self, method: Method) -> usize {
        self.lock()
            .requests
            .iter()
            .filter(|request| request.method == method)
            .count()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let state = self.lock();
        if !state.expectations.is_empty() {
            let pending: Vec<String> = state
                .expectations
                .iter()
                .map(|e| format!("{} {}", e.method, e.path))
                .collect();
            panic!(
                "Not all expectations were met. {} remaining: {:?}",
                pending.len(),
                pending
            );
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: ApiRequest) -> Result<Value, TransportError> {
        let mut state = self.lock();
        let expectation = state.expectations.pop_front();
        let described = format!("{} {}", request.method, request.path);
        state.requests.push(request);
        drop(state);

        match expectation {
            Some(expectation)
                if format!("{} {}", expectation.method, expectation.path) == described =>
            {
                expectation.response
            }
            Some(expectation) => panic!(
                "Unexpected request {described}, expected {} {}",
                expectation.method, expectation.path
            ),
            None => panic!("Unexpected request {described}, no expectations left"),
        }
    }
}

/// Builder for a single expectation.
pub struct ExpectationBuilder {
    method: Method,
    path: String,
    state: Arc<Mutex<MockState>>,
}

impl ExpectationBuilder {
    fn push(self, response: Result<Value, TransportError>) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.expectations.push_back(Expectation {
            method: self.method,
            path: self.path,
            response,
        });
    }

    /// Sets the expectation to return a successful body.
    pub fn return_ok(self, body: Value) {
        self.push(Ok(body));
    }

    /// Sets the expectation to fail.
    pub fn return_err(self, error: TransportError) {
        self.push(Err(error));
    }
}
